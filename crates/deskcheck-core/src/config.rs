//! Validator configuration

use crate::file_utils::DEFAULT_MAX_FILE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Warn about keys and values reserved for KDE
    pub warn_vendor_reserved: bool,

    /// Hide warnings about deprecated keys, values and field codes
    pub suppress_deprecated_warnings: bool,

    /// Hide hints (suggested categories and the like)
    pub suppress_hints: bool,

    /// Files larger than this many bytes are not validated
    pub max_file_size: u64,

    /// Glob patterns skipped when walking directories
    pub exclude: Vec<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            warn_vendor_reserved: false,
            suppress_deprecated_warnings: false,
            suppress_hints: false,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            exclude: vec![".git/**".to_string(), "target/**".to_string()],
        }
    }
}

impl LintConfig {
    /// Load config from file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config or use default
    pub fn load_or_default(path: Option<&Path>) -> Self {
        path.and_then(|p| Self::load(p).ok()).unwrap_or_default()
    }

    /// Per-user config location, `$XDG_CONFIG_HOME/deskcheck/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("deskcheck").join("config.toml"))
    }

    /// Render as TOML, for writing a starter config file
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
