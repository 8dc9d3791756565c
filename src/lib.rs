//! Block Dodge - A falling-block arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, game state)
//! - `render`: Platform-neutral frame snapshots for the presentation layer
//! - `audio`: Tone descriptions and Web Audio playback
//! - `config`: Data-driven tuning and player settings
//! - `error`: Setup and configuration errors

pub mod audio;
pub mod config;
pub mod error;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use config::GameConfig;
pub use error::{ConfigError, GameError};
pub use settings::Settings;
pub use tuning::{CollisionPolicy, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fast tick period (block movement + collisions)
    pub const FAST_TICK_MS: u64 = 20;
    /// Spawn tick period at level 1
    pub const INITIAL_SPAWN_INTERVAL_MS: u64 = 1000;
    /// Spawn interval shrinks by this much per level
    pub const SPAWN_INTERVAL_STEP_MS: u64 = 80;
    /// Spawn interval never drops below this
    pub const MIN_SPAWN_INTERVAL_MS: u64 = 500;
    /// Backlog beyond this is dropped instead of simulated
    pub const MAX_CATCH_UP_MS: u64 = 250;

    /// Playfield defaults (the browser overrides these with measured sizes)
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player paddle
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;
    /// Horizontal step per key press
    pub const PLAYER_STEP: f32 = 10.0;
    pub const PLAYER_BOOST_STEP: f32 = 20.0;

    /// Falling blocks
    pub const BLOCK_WIDTH: f32 = 30.0;
    pub const BLOCK_HEIGHT: f32 = 30.0;
    /// Fall speed in pixels per fast tick
    pub const FALL_SPEED: f32 = 5.0;
    pub const SLOW_FALL_SPEED: f32 = 2.0;
    /// At most this many blocks per spawn tick
    pub const MAX_BLOCKS_PER_SPAWN: u32 = 5;

    /// Spawn odds
    pub const HAZARD_CHANCE: f64 = 0.1;
    pub const POWER_UP_CHANCE: f64 = 0.1;

    /// Timed effect duration (speed boost, slow motion)
    pub const EFFECT_DURATION_MS: u64 = 3000;

    /// Scoring
    pub const POINTS_PER_BLOCK: u64 = 10;
    pub const POINTS_PER_LEVEL: u64 = 100;
    pub const STARTING_LIVES: u32 = 3;

    /// Background color per level, cycled
    pub const BACKGROUND_COLORS: [&str; 10] = [
        "#282C34", "#34495E", "#1ABC9C", "#3498DB", "#9B59B6", "#E67E22", "#E74C3C", "#F1C40F",
        "#2ECC71", "#95A5A6",
    ];

    /// High-contrast alternative palette
    pub const HIGH_CONTRAST_COLORS: [&str; 10] = [
        "#000000", "#1A1A1A", "#000033", "#002200", "#220000", "#111111", "#000022", "#001100",
        "#110000", "#0A0A0A",
    ];
}

/// Palette index for a level (levels start at 1, period 10)
#[inline]
pub fn palette_index(level: u32) -> usize {
    (level.max(1) as usize - 1) % consts::BACKGROUND_COLORS.len()
}

/// Background color for a level
#[inline]
pub fn background_color(level: u32, high_contrast: bool) -> &'static str {
    let palette = if high_contrast {
        &consts::HIGH_CONTRAST_COLORS
    } else {
        &consts::BACKGROUND_COLORS
    };
    palette[palette_index(level)]
}
