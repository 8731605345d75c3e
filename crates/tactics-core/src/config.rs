//! Configuration loading and typed config structures.
//!
//! Configuration lives in `tactics-config.yaml`. Every field has a default,
//! so an empty file (or no file) yields a working setup.

use std::path::Path;

use serde::Deserialize;

/// Debounce window applied when nothing is configured.
pub const DEFAULT_DEBOUNCE_TICKS: u64 = 90;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is not usable.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TacticsConfig {
    /// Decision engine settings.
    #[serde(default)]
    pub tactics: EngineConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TacticsConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml yields an error for an empty document; treat it as defaults.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `debounce_ticks` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tactics.debounce_ticks == 0 {
            return Err(ConfigError::Invalid {
                reason: "tactics.debounce_ticks must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

/// Decision engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Minimum ticks between two interrupts for the same agent.
    #[serde(default = "default_debounce_ticks")]
    pub debounce_ticks: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce_ticks: default_debounce_ticks(),
        }
    }
}

/// Logging configuration, consumed by binaries when installing the
/// `tracing` subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

const fn default_debounce_ticks() -> u64 {
    DEFAULT_DEBOUNCE_TICKS
}

fn default_log_level() -> String {
    "info".to_owned()
}
