//! Fast tick and player input
//!
//! `tick_move` runs every fast tick: blocks fall, blocks past the bottom edge
//! score, and blocks touching the player apply their effect.

use super::collision::block_hits_player;
use super::effects::{activate_slow_motion, activate_speed_boost};
use super::level::award_pass;
use super::state::{BlockKind, GameEvent, GamePhase, GameState};
use crate::tuning::CollisionPolicy;

/// Discrete player commands (one per key press)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    MoveLeft,
    MoveRight,
    /// Space bar
    SpeedBoost,
}

impl PlayerInput {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(PlayerInput::MoveLeft),
            "ArrowRight" => Some(PlayerInput::MoveRight),
            " " | "Space" | "Spacebar" => Some(PlayerInput::SpeedBoost),
            _ => None,
        }
    }
}

/// Apply one input. Returns false when the input was rejected (not running,
/// or a boost that is already active).
pub fn apply_input(state: &mut GameState, input: PlayerInput) -> bool {
    if !state.is_running() {
        return false;
    }

    match input {
        PlayerInput::MoveLeft | PlayerInput::MoveRight => {
            let step = state.player_step();
            let delta = if input == PlayerInput::MoveLeft {
                -step
            } else {
                step
            };
            let max_x = state.tuning.player_max_x();
            state.player.x = (state.player.x + delta).clamp(0.0, max_x);
            true
        }
        PlayerInput::SpeedBoost => activate_speed_boost(state),
    }
}

/// Advance every live block by one fast tick.
///
/// Per block, in spawn order: a block already below the playfield is removed
/// and scores, otherwise it falls by the current speed and is tested against
/// the player at its position from before the move. A block leaving the
/// bottom is gone before the test and never collides. The tick stops as soon
/// as the run ends.
pub fn tick_move(state: &mut GameState) {
    if !state.is_running() {
        return;
    }

    let height = state.tuning.playfield_height;
    let mut i = 0;
    while i < state.blocks.len() {
        let block = state.blocks[i];
        // Slow motion picked up earlier in this tick already applies
        let speed = state.fall_speed();

        let mut removed = false;
        if block.pos.y > height {
            state.blocks.remove(i);
            removed = true;
            state.events.push(GameEvent::BlockPassed { id: block.id });
            award_pass(state);
        } else {
            state.blocks[i].pos.y += speed;
        }

        if !removed
            && block_hits_player(block.pos.x, block.pos.y, &state.player, &state.tuning)
        {
            state.events.push(GameEvent::Collision {
                id: block.id,
                kind: block.kind,
            });
            log::debug!("Block {} ({:?}) hit the player", block.id, block.kind);

            match block.kind {
                BlockKind::Hazard | BlockKind::Plain => state.lose_life(),
                BlockKind::Shield => state.gain_life(),
                BlockKind::SlowMotion => activate_slow_motion(state),
            }

            if state.tuning.collision_policy == CollisionPolicy::Consume {
                state.blocks.remove(i);
                removed = true;
            }

            if state.phase == GamePhase::GameOver {
                return;
            }
        }

        if !removed {
            i += 1;
        }
    }
}
