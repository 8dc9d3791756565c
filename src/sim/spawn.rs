//! Block spawner
//!
//! Each spawn tick drops `min(level, max_blocks_per_spawn)` blocks at random
//! horizontal positions along the top edge.

use glam::Vec2;
use rand::Rng;

use super::state::{BlockKind, GameEvent, GameState};

/// Pick a block kind.
///
/// The hazard roll comes first and wins; the power-up roll (and the
/// shield/slow-motion coin flip) only happens when it failed.
pub fn roll_kind<R: Rng>(rng: &mut R, hazard_chance: f64, power_up_chance: f64) -> BlockKind {
    if rng.random_bool(hazard_chance) {
        return BlockKind::Hazard;
    }
    if rng.random_bool(power_up_chance) {
        return if rng.random_bool(0.5) {
            BlockKind::Shield
        } else {
            BlockKind::SlowMotion
        };
    }
    BlockKind::Plain
}

/// Run one spawn tick. Returns the number of blocks created.
pub fn tick_spawn(state: &mut GameState) -> u32 {
    if !state.is_running() {
        return 0;
    }

    let count = state.tuning.blocks_per_spawn(state.level);
    let range = state.tuning.block_spawn_range().max(0.0);
    let hazard_chance = state.tuning.hazard_chance;
    let power_up_chance = state.tuning.power_up_chance;

    for _ in 0..count {
        let kind = roll_kind(&mut state.rng, hazard_chance, power_up_chance);
        let x = if range > 0.0 {
            state.rng.random_range(0.0..range)
        } else {
            0.0
        };
        let id = state.push_block(kind, Vec2::new(x, 0.0));
        state.events.push(GameEvent::BlockSpawned { id, kind });
    }

    log::debug!(
        "Spawned {} blocks at level {} ({} live)",
        count,
        state.level,
        state.blocks.len()
    );
    count
}
