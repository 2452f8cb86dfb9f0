//! Dimension manager configuration
//!
//! Loaded from TOML. Every key is optional and falls back to its default:
//!
//! ```toml
//! autoload_registered = true
//! reject_repeat_notify = true
//! log_registrations = false
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for the dimension manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionConfig {
    /// Queue worlds registered during the notification for
    /// `load_pending_worlds`
    pub autoload_registered: bool,
    /// Fail a second notification in one session instead of ignoring it
    pub reject_repeat_notify: bool,
    /// Log every new registration at debug level
    pub log_registrations: bool,
}

impl Default for DimensionConfig {
    fn default() -> Self {
        Self {
            autoload_registered: true,
            reject_repeat_notify: true,
            log_registrations: true,
        }
    }
}

impl DimensionConfig {
    /// Parse from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("Loaded dimension config from {}", path.display());
        Ok(config)
    }
}
