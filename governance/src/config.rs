//! Engine configuration with TOML file support.
//!
//! Only operational knobs live here. The seed reputation, the proposal
//! threshold and the voting window are fixed constants in `rbg_types::params`.

use rbg_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::GovernanceError;

/// Configuration for a governance engine host.
///
/// Can be loaded from a TOML file via [`GovernanceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Reject a second vote by the same user on the same proposal.
    /// Off by default: repeated votes each add the voter's full weight.
    #[serde(default)]
    pub reject_duplicate_votes: bool,
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl GovernanceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, GovernanceError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| GovernanceError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, GovernanceError> {
        toml::from_str(s).map_err(|e| GovernanceError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, GovernanceError> {
        toml::to_string_pretty(self).map_err(|e| GovernanceError::Config(e.to_string()))
    }

    pub fn log_format(&self) -> LogFormat {
        LogFormat::parse(&self.log_format)
    }

    /// Install the global tracing subscriber described by this config.
    /// Returns `false` if one was already installed.
    pub fn init_logging(&self) -> bool {
        rbg_utils::init_logging(self.log_format(), &self.log_level).is_ok()
    }
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            log_format: default_log_format(),
            log_level: default_log_level(),
            reject_duplicate_votes: false,
        }
    }
}
