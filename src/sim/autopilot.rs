//! Idle/demo mode - the game plays itself
//!
//! Dodges the lowest harmful block above the paddle's lane, otherwise walks
//! toward the lowest falling power-up. Produces ordinary key presses so it
//! goes through the same input path as a player.

use std::cmp::Ordering;

use super::collision::{Rect, block_rect, player_rect};
use super::state::{Block, GameState};
use super::tick::PlayerInput;

/// How far above the paddle a block starts to count as a threat
const LOOKAHEAD: f32 = 160.0;
/// Extra lane width on each side of the paddle
const LANE_MARGIN: f32 = 4.0;

fn lowest<'a>(blocks: impl Iterator<Item = &'a Block>) -> Option<&'a Block> {
    blocks.max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(Ordering::Equal))
}

/// Next key press for the autopilot, if any
pub fn suggest(state: &GameState) -> Option<PlayerInput> {
    if !state.is_running() {
        return None;
    }

    let tuning = &state.tuning;
    let paddle = player_rect(&state.player, tuning);
    let lane = Rect::new(
        paddle.min.x - LANE_MARGIN,
        paddle.min.y,
        paddle.size.x + 2.0 * LANE_MARGIN,
        paddle.size.y,
    );
    let danger_line = tuning.player_top() - LOOKAHEAD;
    let on_screen = |b: &&Block| b.pos.y <= tuning.playfield_height;

    let threat = lowest(
        state
            .blocks
            .iter()
            .filter(|b| b.kind.is_harmful())
            .filter(on_screen)
            .filter(|b| b.pos.y + tuning.block_height >= danger_line)
            .filter(|b| block_rect(b.pos.x, b.pos.y, tuning).overlaps_x(&lane)),
    );

    if let Some(threat) = threat {
        if !state.speed_boost_active() {
            return Some(PlayerInput::SpeedBoost);
        }
        let threat_x = block_rect(threat.pos.x, threat.pos.y, tuning).center().x;
        let go_right = threat_x < paddle.center().x;
        let at_right = state.player.x >= tuning.player_max_x();
        let at_left = state.player.x <= 0.0;
        // Pinned against a wall: run under the block to the other side
        let input = match (go_right, at_right, at_left) {
            (true, false, _) | (false, _, true) => PlayerInput::MoveRight,
            _ => PlayerInput::MoveLeft,
        };
        return Some(input);
    }

    let pickup = lowest(
        state
            .blocks
            .iter()
            .filter(|b| b.kind.is_power_up())
            .filter(on_screen),
    )?;
    let dx = block_rect(pickup.pos.x, pickup.pos.y, tuning).center().x - paddle.center().x;
    if dx.abs() <= state.player_step() / 2.0 {
        None
    } else if dx > 0.0 {
        Some(PlayerInput::MoveRight)
    } else {
        Some(PlayerInput::MoveLeft)
    }
}
