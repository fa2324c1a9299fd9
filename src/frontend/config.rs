//! Frontend configuration
//!
//! Controls which passes run after parsing. Read from a RON file:
//!
//! ```ron
//! (
//!     expand_macros: true,
//!     full_traversal: false,
//!     log_level: Info,
//! )
//! ```
//!
//! Every field is optional and falls back to its default.

use crate::frontend::macros::ExpandOptions;
use crate::util::logger::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Frontend configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// Run the macro expander after parsing
    #[serde(default = "default_true")]
    pub expand_macros: bool,

    /// Also expand index expressions and for-loop headers
    #[serde(default)]
    pub full_traversal: bool,

    /// Log level used by the command line driver
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_true() -> bool {
    true
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            expand_macros: true,
            full_traversal: false,
            log_level: LogLevel::default(),
        }
    }
}

impl FrontendConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_expand_macros(
        mut self,
        enabled: bool,
    ) -> Self {
        self.expand_macros = enabled;
        self
    }

    #[inline]
    pub fn with_full_traversal(
        mut self,
        enabled: bool,
    ) -> Self {
        self.full_traversal = enabled;
        self
    }

    #[inline]
    pub fn with_log_level(
        mut self,
        level: LogLevel,
    ) -> Self {
        self.log_level = level;
        self
    }

    /// Options handed to the macro expander
    pub fn expand_options(&self) -> ExpandOptions {
        ExpandOptions {
            full_traversal: self.full_traversal,
        }
    }

    /// Load from a RON file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron(&text)?;
        debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to write config: {0}")]
    Serialize(#[from] ron::Error),
}
