//! Demo configuration loaded from TOML.

use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use worldbench::DEFAULT_LOG_CAPACITY;

pub const DEFAULT_WORLD: &str = "example";

/// Settings for the demo binary. Every field has a default so an absent
/// config file means "run with defaults".
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// World whose state is printed after the demo requests run.
    pub world: String,
    /// Directory the snapshot is written to; `None` disables persistence.
    pub snapshot_dir: Option<PathBuf>,
    /// Capacity of the in-memory log buffer.
    pub log_capacity: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            world: DEFAULT_WORLD.to_string(),
            snapshot_dir: None,
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

impl DemoConfig {
    /// Loads the config from `path`. A missing file yields the defaults;
    /// an unreadable or malformed file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|err| ConfigError::ReadConfigFile {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        toml::from_str(&text).map_err(|err| ConfigError::ParseConfigFile {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ReadConfigFile { path: String, message: String },
    ParseConfigFile { path: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ReadConfigFile { path, message } => {
                write!(f, "read config file failed ({path}): {message}")
            }
            ConfigError::ParseConfigFile { path, message } => {
                write!(f, "parse config file failed ({path}): {message}")
            }
        }
    }
}

impl Error for ConfigError {}
