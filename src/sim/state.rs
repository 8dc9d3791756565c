//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]; tick functions
//! take it by `&mut` and nothing else is shared.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::TimedEffect;
use crate::tuning::Tuning;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created, timers not armed yet
    NotStarted,
    /// Active gameplay
    Running,
    /// Lives exhausted (terminal)
    GameOver,
}

/// Falling block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockKind {
    #[default]
    Plain,
    /// Bomb: costs a life
    Hazard,
    /// Grants a life
    Shield,
    /// Slows every falling block for a while
    SlowMotion,
}

impl BlockKind {
    pub const ALL: [BlockKind; 4] = [
        BlockKind::Plain,
        BlockKind::Hazard,
        BlockKind::Shield,
        BlockKind::SlowMotion,
    ];

    /// Extra CSS class on top of `block` (none for plain blocks)
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            BlockKind::Plain => None,
            BlockKind::Hazard => Some("hazard"),
            BlockKind::Shield => Some("shield"),
            BlockKind::SlowMotion => Some("slow-motion"),
        }
    }

    /// Whether touching this block costs a life
    pub fn is_harmful(&self) -> bool {
        matches!(self, BlockKind::Plain | BlockKind::Hazard)
    }

    pub fn is_power_up(&self) -> bool {
        matches!(self, BlockKind::Shield | BlockKind::SlowMotion)
    }
}

/// A falling block. `pos` is the top-left corner in playfield pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    pub kind: BlockKind,
    pub pos: Vec2,
}

/// The player's paddle, pinned to the bottom edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Left edge, clamped to [0, playfield_width - player_width]
    pub x: f32,
}

/// Something the presentation or audio layer should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    BlockSpawned { id: u32, kind: BlockKind },
    /// Block left the bottom of the playfield and scored
    BlockPassed { id: u32 },
    /// Block touched the player
    Collision { id: u32, kind: BlockKind },
    LifeLost { lives: u32 },
    LifeGained { lives: u32 },
    SpeedBoostStarted,
    SlowMotionStarted,
    LevelUp { level: u32 },
    GameOver { final_score: u64 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance values this run was created with
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    /// Current level (starts at 1)
    pub level: u32,
    pub lives: u32,
    /// Simulation time in milliseconds since start
    pub now_ms: u64,
    pub player: Player,
    /// Live blocks in spawn order
    pub blocks: Vec<Block>,
    pub speed_boost: TimedEffect,
    pub slow_motion: TimedEffect,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            phase: GamePhase::NotStarted,
            score: 0,
            level: 1,
            lives: tuning.starting_lives,
            now_ms: 0,
            player: Player {
                x: tuning.player_start_x().clamp(0.0, tuning.player_max_x()),
            },
            blocks: Vec::new(),
            speed_boost: TimedEffect::default(),
            slow_motion: TimedEffect::default(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn speed_boost_active(&self) -> bool {
        self.speed_boost.is_active(self.now_ms)
    }

    pub fn slow_motion_active(&self) -> bool {
        self.slow_motion.is_active(self.now_ms)
    }

    /// Pixels a block falls this tick
    pub fn fall_speed(&self) -> f32 {
        if self.slow_motion_active() {
            self.tuning.slow_fall_speed
        } else {
            self.tuning.fall_speed
        }
    }

    /// Pixels the player moves per key press
    pub fn player_step(&self) -> f32 {
        if self.speed_boost_active() {
            self.tuning.player_boost_step
        } else {
            self.tuning.player_step
        }
    }

    /// Push a block into the live collection (tests and spawner)
    pub fn push_block(&mut self, kind: BlockKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.blocks.push(Block { id, kind, pos });
        id
    }

    /// Take the pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Remove one life; ends the run when none are left
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LifeLost { lives: self.lives });
        log::debug!("Life lost, {} left", self.lives);

        if self.lives == 0 {
            self.end_game();
        }
    }

    pub fn gain_life(&mut self) {
        self.lives = self.lives.saturating_add(1);
        self.events.push(GameEvent::LifeGained { lives: self.lives });
    }

    fn end_game(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
        log::info!(
            "Game over at level {} with score {}",
            self.level,
            self.score
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(1, Tuning::default());
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.player.x, 175.0);
        assert!(state.blocks.is_empty());
        assert!(!state.speed_boost_active());
        assert!(!state.slow_motion_active());
    }

    #[test]
    fn test_lose_life_ends_game_once() {
        let mut state = GameState::new(1, Tuning::default());
        state.phase = GamePhase::Running;
        state.lives = 1;
        state.score = 40;

        state.lose_life();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 0);

        state.lose_life();
        let game_overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        assert!(state
            .events
            .contains(&GameEvent::GameOver { final_score: 40 }));
    }

    #[test]
    fn test_css_classes() {
        assert_eq!(BlockKind::Plain.css_class(), None);
        assert_eq!(BlockKind::Hazard.css_class(), Some("hazard"));
        assert_eq!(BlockKind::Shield.css_class(), Some("shield"));
        assert_eq!(BlockKind::SlowMotion.css_class(), Some("slow-motion"));
        for kind in BlockKind::ALL {
            assert_ne!(kind.is_harmful(), kind.is_power_up());
        }
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = GameState::new(1, Tuning::default());
        let a = state.push_block(BlockKind::Plain, Vec2::ZERO);
        let b = state.push_block(BlockKind::Shield, Vec2::ZERO);
        assert!(b > a);
        assert_eq!(state.blocks.len(), 2);
    }
}
