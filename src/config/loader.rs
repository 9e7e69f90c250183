use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::ControllerConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl ControllerConfig {
    /// Default location of the controller config file.
    ///
    /// `viewstack/config.toml` under `dirs::config_dir()`, or the current
    /// directory if there is none.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("viewstack").join("config.toml")
    }

    /// Loads configuration from [`ControllerConfig::config_path`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `ControllerConfig::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No controller config file, using defaults");
            return Ok(ControllerConfig::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: ControllerConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;

        config.validate()?;
        tracing::info!(
            path = %path.display(),
            transitions = config.transitions.len(),
            "Loaded controller config"
        );
        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ControllerConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError {
                path: PathBuf::from("<inline>"),
                source: e,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The default tag is not empty
    /// - Every transition preset has a non-empty, unique name
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_tag.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "default_tag must not be empty".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for transition in &self.transitions {
            if transition.name.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: "Transition presets must be named".to_string(),
                });
            }
            if !seen.insert(transition.name.as_str()) {
                return Err(ConfigError::ValidationError {
                    message: format!("Duplicate transition preset '{}'", transition.name),
                });
            }
        }

        Ok(())
    }
}
