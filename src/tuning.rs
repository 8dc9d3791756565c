//! Data-driven game balance
//!
//! Every value defaults to the matching constant in [`crate::consts`]. Tuning
//! is deserialized with `#[serde(default)]`, so a JSON document only needs
//! the keys it wants to override.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// What happens to a block after it touches the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Block keeps falling and collides again on every overlapping tick
    #[default]
    Persist,
    /// Block is removed on contact (no points awarded)
    Consume,
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_step: f32,
    pub player_boost_step: f32,

    // === Blocks ===
    pub block_width: f32,
    pub block_height: f32,
    /// Pixels per fast tick
    pub fall_speed: f32,
    /// Pixels per fast tick while slow motion is active
    pub slow_fall_speed: f32,
    pub max_blocks_per_spawn: u32,
    pub hazard_chance: f64,
    pub power_up_chance: f64,
    pub collision_policy: CollisionPolicy,

    // === Timing ===
    pub fast_tick_ms: u64,
    pub initial_spawn_interval_ms: u64,
    pub spawn_interval_step_ms: u64,
    pub min_spawn_interval_ms: u64,
    pub effect_duration_ms: u64,
    pub max_catch_up_ms: u64,

    // === Scoring ===
    pub points_per_block: u64,
    pub points_per_level: u64,
    pub starting_lives: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_step: PLAYER_STEP,
            player_boost_step: PLAYER_BOOST_STEP,

            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            fall_speed: FALL_SPEED,
            slow_fall_speed: SLOW_FALL_SPEED,
            max_blocks_per_spawn: MAX_BLOCKS_PER_SPAWN,
            hazard_chance: HAZARD_CHANCE,
            power_up_chance: POWER_UP_CHANCE,
            collision_policy: CollisionPolicy::Persist,

            fast_tick_ms: FAST_TICK_MS,
            initial_spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
            spawn_interval_step_ms: SPAWN_INTERVAL_STEP_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            effect_duration_ms: EFFECT_DURATION_MS,
            max_catch_up_ms: MAX_CATCH_UP_MS,

            points_per_block: POINTS_PER_BLOCK,
            points_per_level: POINTS_PER_LEVEL,
            starting_lives: STARTING_LIVES,
        }
    }
}

impl Tuning {
    /// Spawn tick period for a level.
    ///
    /// Level 1 uses the initial interval; every later level uses
    /// `max(initial - level * step, min)`.
    pub fn spawn_interval_ms(&self, level: u32) -> u64 {
        if level <= 1 {
            return self.initial_spawn_interval_ms;
        }
        self.initial_spawn_interval_ms
            .saturating_sub(u64::from(level) * self.spawn_interval_step_ms)
            .max(self.min_spawn_interval_ms)
    }

    /// Blocks created per spawn tick at a level
    pub fn blocks_per_spawn(&self, level: u32) -> u32 {
        level.clamp(1, self.max_blocks_per_spawn.max(1))
    }

    /// Rightmost legal player position
    #[inline]
    pub fn player_max_x(&self) -> f32 {
        (self.playfield_width - self.player_width).max(0.0)
    }

    /// Player starts centred
    #[inline]
    pub fn player_start_x(&self) -> f32 {
        self.playfield_width / 2.0 - self.player_width / 2.0
    }

    /// Exclusive upper bound for a block's spawn x
    #[inline]
    pub fn block_spawn_range(&self) -> f32 {
        self.playfield_width - self.block_width
    }

    /// Top edge at which a block can first touch the player
    #[inline]
    pub fn player_top(&self) -> f32 {
        self.playfield_height - self.player_height
    }

    /// Check that the simulation can run with these values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dimensions = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_step", self.player_step),
            ("player_boost_step", self.player_boost_step),
            ("block_width", self.block_width),
            ("block_height", self.block_height),
            ("fall_speed", self.fall_speed),
            ("slow_fall_speed", self.slow_fall_speed),
        ];
        for (name, value) in dimensions {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidDimension { name, value });
            }
        }

        if self.playfield_width <= self.player_width
            || self.playfield_width <= self.block_width
            || self.playfield_height <= self.player_height
        {
            return Err(ConfigError::PlayfieldTooSmall {
                width: self.playfield_width,
                height: self.playfield_height,
            });
        }

        let timings = [
            ("fast_tick_ms", self.fast_tick_ms),
            ("initial_spawn_interval_ms", self.initial_spawn_interval_ms),
            ("min_spawn_interval_ms", self.min_spawn_interval_ms),
            ("effect_duration_ms", self.effect_duration_ms),
            ("max_blocks_per_spawn", u64::from(self.max_blocks_per_spawn)),
            ("points_per_level", self.points_per_level),
            ("starting_lives", u64::from(self.starting_lives)),
        ];
        for (name, value) in timings {
            if value == 0 {
                return Err(ConfigError::InvalidTiming { name, value });
            }
        }

        for (name, value) in [
            ("hazard_chance", self.hazard_chance),
            ("power_up_chance", self.power_up_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidChance { name, value });
            }
        }

        Ok(())
    }
}
