//! Frame snapshots for the presentation layer
//!
//! A [`Frame`] is everything the screen shows at one moment: rectangles for
//! the player and blocks, the level background and the HUD strings. The
//! browser frontend applies it to DOM elements; the headless demo logs it.

use crate::settings::Settings;
use crate::sim::collision::{Rect, block_rect, player_rect};
use crate::sim::state::{BlockKind, GamePhase, GameState};

/// A block as drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockSprite {
    pub id: u32,
    pub kind: BlockKind,
    pub rect: Rect,
}

/// HUD text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: String,
    pub lives: String,
    /// Shown once the run is over
    pub banner: Option<String>,
    /// Active effects, e.g. "Slow 1.2s"
    pub effects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub background: &'static str,
    pub player: Rect,
    pub blocks: Vec<BlockSprite>,
    pub hud: Hud,
}

pub fn score_text(score: u64, level: u32) -> String {
    format!("Score: {score} | Level: {level}")
}

pub fn lives_text(lives: u32) -> String {
    format!("Lives: {lives}")
}

pub fn game_over_message(score: u64) -> String {
    format!("Game Over! Final Score: {score}")
}

fn effect_labels(state: &GameState) -> Vec<String> {
    let now = state.now_ms;
    [("Boost", &state.speed_boost), ("Slow", &state.slow_motion)]
        .into_iter()
        .filter(|(_, effect)| effect.is_active(now))
        .map(|(name, effect)| format!("{name} {:.1}s", effect.remaining_ms(now) as f32 / 1000.0))
        .collect()
}

impl Frame {
    /// Snapshot the current state
    pub fn capture(state: &GameState, settings: &Settings) -> Self {
        let tuning = &state.tuning;
        let blocks = state
            .blocks
            .iter()
            .map(|b| BlockSprite {
                id: b.id,
                kind: b.kind,
                rect: block_rect(b.pos.x, b.pos.y, tuning),
            })
            .collect();

        let banner = (state.phase == GamePhase::GameOver).then(|| game_over_message(state.score));

        Self {
            background: crate::background_color(state.level, settings.high_contrast),
            player: player_rect(&state.player, tuning),
            blocks,
            hud: Hud {
                score: score_text(state.score, state.level),
                lives: lives_text(state.lives),
                banner,
                effects: effect_labels(state),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::effects::activate_slow_motion;
    use crate::tuning::Tuning;
    use glam::Vec2;

    #[test]
    fn test_hud_strings() {
        assert_eq!(score_text(120, 2), "Score: 120 | Level: 2");
        assert_eq!(lives_text(3), "Lives: 3");
        assert_eq!(game_over_message(450), "Game Over! Final Score: 450");
    }

    #[test]
    fn test_capture_positions() {
        let mut state = GameState::new(1, Tuning::default());
        state.push_block(BlockKind::Hazard, Vec2::new(12.0, 34.0));
        let frame = Frame::capture(&state, &Settings::default());

        assert_eq!(frame.background, "#282C34");
        assert_eq!(frame.player, Rect::new(175.0, 580.0, 50.0, 20.0));
        assert_eq!(frame.blocks.len(), 1);
        assert_eq!(frame.blocks[0].kind, BlockKind::Hazard);
        assert_eq!(frame.blocks[0].rect, Rect::new(12.0, 34.0, 30.0, 30.0));
        assert_eq!(frame.hud.banner, None);
    }

    #[test]
    fn test_background_follows_level() {
        let mut state = GameState::new(1, Tuning::default());
        state.level = 11;
        let level_11 = Frame::capture(&state, &Settings::default()).background;
        state.level = 1;
        let level_1 = Frame::capture(&state, &Settings::default()).background;
        assert_eq!(level_11, level_1);
    }

    #[test]
    fn test_game_over_banner_and_effects() {
        let mut state = GameState::new(1, Tuning::default());
        state.now_ms = 1000;
        activate_slow_motion(&mut state);
        state.now_ms = 2800;
        state.score = 70;
        state.phase = GamePhase::GameOver;

        let frame = Frame::capture(&state, &Settings::default());
        assert_eq!(
            frame.hud.banner.as_deref(),
            Some("Game Over! Final Score: 70")
        );
        assert_eq!(frame.hud.effects, vec!["Slow 1.2s".to_string()]);
    }
}
