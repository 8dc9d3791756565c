//! Axis-aligned collision between falling blocks and the player
//!
//! The player sits on the bottom edge, so a block can only touch it once its
//! bottom edge reaches the player's top edge. Horizontal ranges must overlap
//! strictly: touching edges is not a hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Player;
use crate::tuning::Tuning;

/// Axis-aligned rectangle in playfield pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Open-interval overlap on the x axis
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.min.x < other.max().x && self.max().x > other.min.x
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }
}

/// Rectangle covered by a block whose top edge is at `top`
pub fn block_rect(x: f32, top: f32, tuning: &Tuning) -> Rect {
    Rect::new(x, top, tuning.block_width, tuning.block_height)
}

/// Rectangle covered by the player
pub fn player_rect(player: &Player, tuning: &Tuning) -> Rect {
    Rect::new(
        player.x,
        tuning.player_top(),
        tuning.player_width,
        tuning.player_height,
    )
}

/// Whether a block with its top edge at `top` touches the player.
///
/// Only the lower bound is checked vertically: a block that has already
/// passed the player's top edge keeps colliding until it is removed.
pub fn block_hits_player(block_x: f32, top: f32, player: &Player, tuning: &Tuning) -> bool {
    let block = block_rect(block_x, top, tuning);
    let paddle = player_rect(player, tuning);
    block.max().y >= paddle.min.y && block.overlaps_x(&paddle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: f32) -> Player {
        Player { x }
    }

    #[test]
    fn test_hit_when_bottom_reaches_player_top() {
        let tuning = Tuning::default();
        let player = player_at(175.0);

        // Player top is 580, block height 30: bottom touches at top = 550
        assert!(block_hits_player(180.0, 550.0, &player, &tuning));
        assert!(!block_hits_player(180.0, 549.0, &player, &tuning));
    }

    #[test]
    fn test_horizontal_edges_do_not_count() {
        let tuning = Tuning::default();
        let player = player_at(100.0);

        // Block spanning [70, 100) only touches the left edge
        assert!(!block_hits_player(70.0, 560.0, &player, &tuning));
        // Block starting at player's right edge (150)
        assert!(!block_hits_player(150.0, 560.0, &player, &tuning));
        // One pixel of overlap on each side
        assert!(block_hits_player(71.0, 560.0, &player, &tuning));
        assert!(block_hits_player(149.0, 560.0, &player, &tuning));
    }

    #[test]
    fn test_below_playfield_still_collides() {
        let tuning = Tuning::default();
        let player = player_at(0.0);
        assert!(block_hits_player(10.0, 605.0, &player, &tuning));
    }

    #[test]
    fn test_rect_helpers() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.max(), Vec2::new(40.0, 60.0));
        assert_eq!(rect.center(), Vec2::new(25.0, 40.0));
    }
}
