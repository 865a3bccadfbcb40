//! CLI configuration file (`--config`).
//!
//! ```yaml
//! keep_non_decoded_logs: true
//! log:
//!   level: info
//!   json: false
//!   components:
//!     abidecoder-evm: debug
//! ```
//!
//! JSON is accepted as well, being a subset of YAML.

use abidecoder_observability::LogConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub log: LogConfig,
    /// Report logs that do not decode instead of dropping them.
    #[serde(default)]
    pub keep_non_decoded_logs: bool,
}

impl CliConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("invalid CLI config")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config file '{}'", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("parse config file '{}'", path.display()))
    }

    /// `--verbose` raises the global level to `debug`.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.log.level = "debug".into();
        }
        self
    }
}
