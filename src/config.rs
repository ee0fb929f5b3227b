//! Resolver configuration.
//!
//! Deserialized from JSON; every field defaults so an empty `{}` file
//! is valid. Nothing is read from ambient global state: the resolver
//! takes a [`ResolverConfig`] and that is all it knows.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::resolver::Strategy;

/// Errors from loading or validating a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for this schema.
    #[error("config parse error: {0}")]
    Parse(String),

    /// The config parsed but describes something unusable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for a [`DurationResolver`](crate::DurationResolver).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Path or name of the ffprobe executable.
    pub ffprobe_path: PathBuf,
    /// Path or name of the ffmpeg executable.
    pub ffmpeg_path: PathBuf,
    /// Wall-clock budget per external probe, in milliseconds.
    pub probe_timeout_ms: u64,
    /// Whether virtual share paths should be rewritten to UNC form.
    pub windows_like: bool,
    /// Strategy chain, tried in order until one returns a positive
    /// duration.
    pub strategies: Vec<Strategy>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            ffprobe_path: PathBuf::from("ffprobe"),
            ffmpeg_path: PathBuf::from("ffmpeg"),
            probe_timeout_ms: airtime_probe::DEFAULT_TIMEOUT_MS,
            windows_like: cfg!(windows),
            strategies: vec![
                Strategy::ExternalJson,
                Strategy::ExternalText,
                Strategy::Ebml,
                Strategy::IsoBmff,
            ],
        }
    }
}

impl ResolverConfig {
    /// Deserialize a config from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
                    path: path.to_path_buf(),
                    source: e,
                })?;
                Self::from_json(&text)
            }
            None => Ok(Self::default()),
        }
    }

    /// Reject configs that could only ever resolve to "unknown".
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "probe_timeout_ms must be positive".to_string(),
            ));
        }
        if self.strategies.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one strategy is required".to_string(),
            ));
        }
        if self.strategies.contains(&Strategy::Unresolved) {
            return Err(ConfigError::Invalid(
                "\"unresolved\" is an outcome, not a strategy".to_string(),
            ));
        }
        Ok(())
    }
}
