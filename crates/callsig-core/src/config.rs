//! Caller configuration
//!
//! Loaded from TOML, e.g.
//!
//! ```toml
//! bind_mode = "named"
//! fingerprint_calls = false
//! ```

use crate::{BindMode, CallsigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for a routine caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CallerConfig {
    /// How arguments are passed to the execution facility
    #[serde(default)]
    pub bind_mode: BindMode,

    /// Tag invocation logs with the `sql_id` of the rendered call statement
    #[serde(default = "default_fingerprint_calls")]
    pub fingerprint_calls: bool,
}

fn default_fingerprint_calls() -> bool {
    true
}

impl Default for CallerConfig {
    fn default() -> Self {
        Self {
            bind_mode: BindMode::default(),
            fingerprint_calls: default_fingerprint_calls(),
        }
    }
}

impl CallerConfig {
    /// Configuration that binds arguments by name
    pub fn named() -> Self {
        Self {
            bind_mode: BindMode::Named,
            ..Self::default()
        }
    }

    /// Configuration that binds arguments by position
    pub fn positional() -> Self {
        Self::default()
    }

    pub fn with_bind_mode(mut self, bind_mode: BindMode) -> Self {
        self.bind_mode = bind_mode;
        self
    }

    pub fn with_fingerprint_calls(mut self, enabled: bool) -> Self {
        self.fingerprint_calls = enabled;
        self
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CallsigError::Configuration(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            bind_mode = ?config.bind_mode,
            "loaded caller configuration"
        );
        Ok(config)
    }
}
