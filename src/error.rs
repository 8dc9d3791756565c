//! Setup and configuration errors
//!
//! Losing all lives is a normal phase transition, not an error. Everything
//! here can only happen before the first tick: bad tuning JSON, a playfield
//! that was never sized, or missing DOM elements in the browser frontend.

use std::fmt;

/// Invalid or unparsable configuration
#[derive(Debug)]
pub enum ConfigError {
    /// JSON could not be parsed into a [`crate::GameConfig`]
    Parse(serde_json::Error),
    /// A size or speed that must be positive and finite was not
    InvalidDimension { name: &'static str, value: f32 },
    /// Playfield cannot hold the player and a falling block
    PlayfieldTooSmall { width: f32, height: f32 },
    /// A timer period or duration of zero
    InvalidTiming { name: &'static str, value: u64 },
    /// A probability outside [0, 1]
    InvalidChance { name: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "failed to parse game config: {e}"),
            ConfigError::InvalidDimension { name, value } => {
                write!(f, "{name} must be positive and finite, got {value}")
            }
            ConfigError::PlayfieldTooSmall { width, height } => write!(
                f,
                "playfield {width}x{height} is too small for the player and blocks"
            ),
            ConfigError::InvalidTiming { name, value } => {
                write!(f, "{name} must be greater than zero, got {value}")
            }
            ConfigError::InvalidChance { name, value } => {
                write!(f, "{name} must be within [0, 1], got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Errors raised while setting up or driving a game
#[derive(Debug)]
pub enum GameError {
    Config(ConfigError),
    /// Required DOM element not found (browser frontend)
    MissingElement(&'static str),
    /// `start` called on a game that already left `NotStarted`
    AlreadyStarted,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Config(e) => write!(f, "{e}"),
            GameError::MissingElement(id) => write!(f, "missing element #{id}"),
            GameError::AlreadyStarted => write!(f, "game already started"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for GameError {
    fn from(e: ConfigError) -> Self {
        GameError::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ConfigError::PlayfieldTooSmall {
            width: 0.0,
            height: 600.0,
        };
        assert_eq!(
            err.to_string(),
            "playfield 0x600 is too small for the player and blocks"
        );

        let err = GameError::MissingElement("player");
        assert_eq!(err.to_string(), "missing element #player");
    }

    #[test]
    fn test_parse_error_has_source() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = GameError::from(ConfigError::from(parse));
        let source = std::error::Error::source(&err).expect("config source");
        assert!(source.to_string().starts_with("failed to parse game config"));
    }
}
