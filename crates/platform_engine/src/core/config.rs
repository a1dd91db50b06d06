//! Configuration system
//!
//! File-backed configuration with TOML and RON support. The simulation
//! core itself takes plain values; this module is how applications get
//! those values from disk with validation and sane defaults.

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Semantic validation failure
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Simulation tuning values
///
/// Defaults match the tuning the engine was developed against; units
/// are pixels and seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Upper bound on a single simulation step, seconds
    pub max_time_step: f32,
    /// Downward acceleration applied to airborne movers, px/sec^2
    pub gravity: f32,
    /// Horizontal run speed, px/sec
    pub move_speed: f32,
    /// Initial upward jump speed, px/sec
    pub jump_speed: f32,
}

impl SimulationConfig {
    /// Create a configuration with default tuning
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_time_step: 0.1,
            gravity: 800.0,
            move_speed: 150.0,
            jump_speed: 210.0,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_time_step <= 0.0 {
            return Err(ConfigError::Invalid(
                "max_time_step must be positive".to_string(),
            ));
        }
        if self.max_time_step > 1.0 {
            return Err(ConfigError::Invalid(
                "max_time_step above one second defeats the hitch clamp".to_string(),
            ));
        }
        if self.gravity <= 0.0 {
            return Err(ConfigError::Invalid("gravity must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for SimulationConfig {}
