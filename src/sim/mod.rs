//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the scheduler in `game`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod effects;
pub mod game;
pub mod level;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, block_hits_player};
pub use effects::{TimedEffect, activate_slow_motion, activate_speed_boost};
pub use game::{AdvanceReport, Clock, Game, ManualClock, PeriodicTimer, TickKind};
pub use level::increase_level;
pub use spawn::{roll_kind, tick_spawn};
pub use state::{Block, BlockKind, GameEvent, GamePhase, GameState, Player};
pub use tick::{PlayerInput, apply_input, tick_move};
