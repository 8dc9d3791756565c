//! Combined game configuration
//!
//! The browser frontend reads an optional JSON document shaped like
//! `{"tuning": {...}, "settings": {...}}`; any missing key keeps its default.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::settings::Settings;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tuning: Tuning,
    pub settings: Settings,
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the playfield and player sizes with measured ones, then validate
    pub fn with_measured_sizes(
        mut self,
        playfield: (f32, f32),
        player: (f32, f32),
    ) -> Result<Self, ConfigError> {
        self.tuning.playfield_width = playfield.0;
        self.tuning.playfield_height = playfield.1;
        self.tuning.player_width = player.0;
        self.tuning.player_height = player.1;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tuning.validate()
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys: serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::CollisionPolicy;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = GameConfig::from_json("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{
            "tuning": { "playfield_width": 800, "collision_policy": "consume" },
            "settings": { "muted": true }
        }"#;
        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.tuning.playfield_width, 800.0);
        assert_eq!(config.tuning.playfield_height, 600.0);
        assert_eq!(config.tuning.collision_policy, CollisionPolicy::Consume);
        assert!(config.settings.muted);
        assert_eq!(config.settings.sfx_volume, 1.0);
    }

    #[test]
    fn test_invalid_json_and_values() {
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"tuning": {"block_height": -1}}"#),
            Err(ConfigError::InvalidDimension {
                name: "block_height",
                ..
            })
        ));
    }

    #[test]
    fn test_measured_sizes() {
        let config = GameConfig::default()
            .with_measured_sizes((320.0, 480.0), (60.0, 15.0))
            .unwrap();
        assert_eq!(config.tuning.player_max_x(), 260.0);

        let err = GameConfig::default().with_measured_sizes((0.0, 0.0), (60.0, 15.0));
        assert!(err.is_err());
    }

    #[test]
    fn test_json_roundtrip_keeps_overrides() {
        let mut config = GameConfig::default();
        config.tuning.starting_lives = 5;
        let parsed = GameConfig::from_json(&config.to_json()).unwrap();
        assert_eq!(parsed.tuning.starting_lives, 5);
    }
}
