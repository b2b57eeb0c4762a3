//! Game settings
//!
//! Loaded from / saved to a JSON file. Every field is optional in the file
//! and falls back to the built-in constants.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::FieldLayout;

/// Settings load/save/validation failure
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {e}"),
            ConfigError::Json(e) => write!(f, "JSON error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid settings: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for serve velocities and row colors (None = fresh each run)
    pub seed: Option<u64>,
    /// Lives granted at the start of every round
    pub starting_lives: u32,

    // === Timing ===
    /// Delay between simulation ticks (ms)
    pub tick_delay_ms: u64,
    /// Debounce before a pointer move reaches the paddle (ms)
    pub paddle_debounce_ms: u64,

    /// Brick grid
    pub layout: FieldLayout,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            starting_lives: STARTING_LIVES,
            tick_delay_ms: TICK_DELAY_MS,
            paddle_debounce_ms: PADDLE_DEBOUNCE_MS,
            layout: FieldLayout::default(),
        }
    }
}

impl Settings {
    /// Configured seed, or a random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_lives == 0 {
            return Err(ConfigError::Invalid("starting_lives must be at least 1".into()));
        }
        if self.tick_delay_ms == 0 {
            return Err(ConfigError::Invalid("tick_delay_ms must be at least 1".into()));
        }
        if self.layout.rows == 0 || self.layout.cols == 0 {
            return Err(ConfigError::Invalid(format!(
                "brick grid {}x{} is empty",
                self.layout.rows, self.layout.cols
            )));
        }
        Ok(())
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let settings = Settings::default();
        assert_eq!(settings.starting_lives, 3);
        assert_eq!(settings.tick_delay_ms, 5);
        assert_eq!(settings.paddle_debounce_ms, 30);
        assert_eq!(settings.layout.capacity(), 35);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "layout": { "rows": 2 } }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.layout.rows, 2);
        assert_eq!(settings.layout.cols, BRICK_COLS);
        assert_eq!(settings.starting_lives, STARTING_LIVES);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Settings::from_json(r#"{ "starting_lives": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Settings::from_json(r#"{ "layout": { "cols": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "brick_breaker_settings_{}.json",
            std::process::id()
        ));
        let settings = Settings {
            seed: Some(99),
            tick_delay_ms: 8,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load(Path::new("/nonexistent/brick_breaker.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_fixed_seed_is_kept() {
        let settings = Settings {
            seed: Some(5),
            ..Default::default()
        };
        assert_eq!(settings.resolve_seed(), 5);
    }
}
