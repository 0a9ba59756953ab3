//! Configuration loading and path resolution
//!
//! Resolution follows a fixed priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing config file never stops startup: a warning is logged and
//! compiled defaults are used.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "GIGSET_CONFIG";

/// Environment variable naming the catalog database file
pub const DATABASE_ENV_VAR: &str = "GIGSET_DATABASE";

/// Default cap on the catalog candidate pool scored by keyword/fuzzy matching
pub const DEFAULT_CANDIDATE_POOL_LIMIT: usize = 1000;

/// Default confidence at or above which a match is pre-selected
pub const DEFAULT_AUTO_SELECT_CONFIDENCE: f64 = 0.7;

/// Contents of `gigset-qs.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Catalog database file
    pub database_path: Option<PathBuf>,
    /// Logging settings
    pub logging: LoggingConfig,
    /// Song matching settings
    pub matching: MatchingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter level ("trace", "debug", "info", "warn", "error")
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Song matching configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Maximum number of catalog songs considered by keyword and fuzzy matching.
    ///
    /// Songs outside the pool are invisible to those strategies.
    pub candidate_pool_limit: usize,

    /// Confidence at or above which a non-exact match is pre-selected
    pub auto_select_confidence: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            candidate_pool_limit: DEFAULT_CANDIDATE_POOL_LIMIT,
            auto_select_confidence: DEFAULT_AUTO_SELECT_CONFIDENCE,
        }
    }
}

impl MatchingConfig {
    /// Reject values the matcher cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.candidate_pool_limit == 0 {
            return Err(Error::Config(
                "matching.candidate_pool_limit must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.auto_select_confidence) {
            return Err(Error::Config(format!(
                "matching.auto_select_confidence must be within 0.0-1.0, got {}",
                self.auto_select_confidence
            )));
        }
        Ok(())
    }
}

impl TomlConfig {
    /// Parse config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;
        config.matching.validate()?;
        Ok(config)
    }

    /// Load config from an explicit file
    ///
    /// A missing file yields defaults (with a warning). A file that exists but
    /// cannot be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                path = %path.display(),
                "Config file not found, using compiled defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read TOML failed: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Resolve the config file location and load it
    pub fn resolve_and_load(cli_arg: Option<&Path>) -> Result<Self> {
        match resolve_config_path(cli_arg) {
            Some(path) => Self::load(&path),
            None => {
                warn!("No config directory available, using compiled defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Locate the config file: CLI argument, then `GIGSET_CONFIG`, then the
/// platform config directory
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir().map(|d| d.join("gigset").join("gigset-qs.toml"))
}

/// Locate the catalog database: CLI argument, then `GIGSET_DATABASE`, then the
/// TOML `database_path`, then the OS-dependent default
pub fn resolve_database_path(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(DATABASE_ENV_VAR) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.database_path {
        return path.clone();
    }

    default_database_path()
}

/// OS-dependent default database location
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("gigset"))
        .unwrap_or_else(|| PathBuf::from("./gigset_data"))
        .join("gigset.db")
}
