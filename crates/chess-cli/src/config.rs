//! Engine configuration file.
//!
//! Settings are read from a TOML file such as:
//!
//! ```toml
//! max_depth = 6
//! max_time_ms = 2000
//! max_nodes = 500000
//! ```

use chess_search::SearchLimits;
use crate::command::{DEPTH_RANGE, TIME_RANGE};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("max_depth must be between 1 and 10, got {0}")]
    DepthOutOfRange(u32),
    #[error("max_time_ms must be between 1 and 60000, got {0}")]
    TimeOutOfRange(u64),
}

/// Search settings loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Deepest iteration the search may start. Defaults to 4.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    /// Wall-clock budget per search in milliseconds. Defaults to 5000.
    #[serde(default = "default_max_time_ms")]
    pub max_time_ms: u64,
    /// Optional node ceiling per search.
    #[serde(default)]
    pub max_nodes: Option<u64>,
}

fn default_max_depth() -> u32 {
    SearchLimits::DEFAULT_DEPTH
}

fn default_max_time_ms() -> u64 {
    SearchLimits::DEFAULT_TIME.as_millis() as u64
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_time_ms: default_max_time_ms(),
            max_nodes: None,
        }
    }
}

impl EngineConfig {
    /// Default file name looked up in the working directory.
    pub const FILE_NAME: &'static str = "engine.toml";

    /// Loads the configuration at `path`, or the defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file exists but cannot be read, or
    /// [`ConfigError::Parse`] if it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        info!(
            max_depth = config.max_depth,
            max_time_ms = config.max_time_ms,
            max_nodes = ?config.max_nodes,
            "loaded config from {}",
            path.display()
        );
        Ok(config)
    }

    /// Checks the depth and time against the bounds the interactive
    /// commands enforce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !DEPTH_RANGE.contains(&self.max_depth) {
            return Err(ConfigError::DepthOutOfRange(self.max_depth));
        }
        if !TIME_RANGE.contains(&self.max_time_ms) {
            return Err(ConfigError::TimeOutOfRange(self.max_time_ms));
        }
        Ok(())
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn search_limits(&self) -> SearchLimits {
        let limits = SearchLimits::new(self.max_depth, Duration::from_millis(self.max_time_ms));
        match self.max_nodes {
            Some(nodes) => limits.with_max_nodes(nodes),
            None => limits,
        }
    }
}
