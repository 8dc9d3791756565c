//! Level progression
//!
//! Levels go up every `points_per_level` points. The state side only bumps
//! the counter; the driver in [`super::game`] swaps the spawn timer for one
//! with [`Tuning::spawn_interval_ms`] and the presentation layer picks the
//! background with [`crate::background_color`].
//!
//! [`Tuning::spawn_interval_ms`]: crate::tuning::Tuning::spawn_interval_ms

use super::state::{GameEvent, GameState};

/// Advance to the next level
pub fn increase_level(state: &mut GameState) {
    state.level += 1;
    state.events.push(GameEvent::LevelUp { level: state.level });
    log::info!(
        "Level {} reached (spawn every {} ms)",
        state.level,
        state.tuning.spawn_interval_ms(state.level)
    );
}

/// Add points for a block that made it past the player, levelling up on
/// every positive multiple of `points_per_level`
pub fn award_pass(state: &mut GameState) {
    state.score += state.tuning.points_per_block;
    if state.score > 0 && state.score % state.tuning.points_per_level == 0 {
        increase_level(state);
    }
}
