use crate::gesture::GestureConfig;
use crate::input::InputConfig;
use crate::resolver::ResolverConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading or saving an engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to read or write config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tuning for the stroke window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Most recent samples kept for classification
    pub capacity: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { capacity: 40 }
    }
}

/// Every tunable of the engine, one node per component.
/// All nodes carry hand-tuned defaults; a partial JSON file fills the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub gesture: GestureConfig,
    pub resolver: ResolverConfig,
    pub input: InputConfig,
}

impl EngineConfig {
    /// Check cross-field consistency before use
    pub fn validate(&self) -> ConfigResult<()> {
        if self.window.capacity == 0 {
            return Err(ConfigError::InvalidValue(
                "window.capacity must be at least 1".to_string(),
            ));
        }
        let min_needed = self
            .gesture
            .circle
            .min_samples
            .max(self.gesture.square.min_samples)
            .max(self.gesture.zigzag.min_samples);
        if self.window.capacity < min_needed {
            return Err(ConfigError::InvalidValue(format!(
                "window.capacity {} is below the largest detector minimum {}",
                self.window.capacity, min_needed
            )));
        }
        if self.gesture.square.chord_stride == 0 || self.gesture.zigzag.chord_stride == 0 {
            return Err(ConfigError::InvalidValue(
                "chord_stride must be at least 1".to_string(),
            ));
        }
        if self.resolver.cooldown_secs < 0.0 {
            return Err(ConfigError::InvalidValue(
                "resolver.cooldown_secs must not be negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.resolver.high_pressure_threshold) {
            return Err(ConfigError::InvalidValue(
                "resolver.high_pressure_threshold must be in [0, 1]".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.input.default_pressure) {
            return Err(ConfigError::InvalidValue(
                "input.default_pressure must be in [0, 1]".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate a JSON config file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as pretty-printed JSON
    pub fn save_to_file(&self, path: &Path) -> ConfigResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
