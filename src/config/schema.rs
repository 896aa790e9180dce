//! Configuration schema for resloc
//!
//! Configuration is stored at `~/.config/resloc/config.toml`

use crate::digest::DigestAlgorithm;
use crate::error::ReslocResult;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Content digest settings
    pub digest: DigestConfig,

    /// Runtime image settings
    pub runtime_image: RuntimeImageConfig,
}

/// General application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

impl GeneralConfig {
    /// Whether logs should be emitted as JSON
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// Content digest settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    /// Algorithm name; platform default when unset
    pub algorithm: Option<String>,
}

impl DigestConfig {
    /// Configured algorithm, or the platform default.
    ///
    /// The name is validated here rather than at load time so an unknown
    /// algorithm only fails the commands that hash.
    pub fn algorithm(&self) -> ReslocResult<DigestAlgorithm> {
        match self.algorithm {
            Some(ref name) => name.parse(),
            None => Ok(DigestAlgorithm::platform_default()),
        }
    }
}

/// Runtime image settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeImageConfig {
    /// Path to a `lib/modules` image; discovered from `JAVA_HOME` when unset
    pub path: Option<PathBuf>,
}
