//! Configuration loading.
//!
//! The configuration file is optional. Without one the audit walks the whole
//! project tree, follows no symlinks, and exits 0 whenever the audit completes.
//!
//! The default configuration file is `shai-hulud-audit.toml` in the current
//! working directory. Use [`Config::load`] to read it:
//!
//! ```rust,no_run
//! use shai_hulud_audit::config::Config;
//!
//! let config = Config::load(None).expect("failed to load config");
//! assert!(config.walk.max_depth.is_none());
//! ```
//!
//! # File format
//!
//! ```toml
//! [walk]
//! max_depth = 12
//! follow_links = false
//! skip_dirs = [".git"]
//!
//! [strict]
//! enabled = true
//! ```

use crate::error::ConfigError;
use std::path::Path;

/// File name looked up in the current directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "shai-hulud-audit.toml";

/// Main configuration for the audit.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    /// Limits for the recursive `package.json` walk.
    pub walk: WalkConfig,
    /// When strict mode is enabled, any threat makes the CLI exit non-zero.
    pub strict: StrictConfig,
}

/// Directory traversal settings for the manifest script scanner.
///
/// The defaults give an exhaustive walk. Every field is an opt-in limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Maximum directory depth below the project root (`None` = unlimited).
    pub max_depth: Option<usize>,
    /// Follow symbolic links while walking. Loops are detected by `walkdir`.
    pub follow_links: bool,
    /// Directory names that are never descended into (exact match, e.g. `.git`).
    pub skip_dirs: Vec<String>,
}

/// Strict-mode configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct StrictConfig {
    /// Set to `true` to exit 1 when the report contains threats.
    pub enabled: bool,
}

impl WalkConfig {
    /// Returns `true` if a directory with this file name must not be entered.
    pub fn is_skipped(&self, dir_name: &str) -> bool {
        self.skip_dirs.iter().any(|d| d == dir_name)
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// Resolution order:
    /// 1. If `path` is `Some`, load from that file (error if missing).
    /// 2. If `path` is `None`, try `shai-hulud-audit.toml` in the current directory.
    /// 3. If that file does not exist either, return [`Config::default()`].
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NotFound`] when the explicit path does not exist.
    /// - [`ConfigError::Read`] when the file cannot be read.
    /// - [`ConfigError::Parse`] when the TOML content is invalid.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let config_path = match path {
            Some(p) if p.exists() => p.to_path_buf(),
            Some(p) => return Err(ConfigError::NotFound(p.to_path_buf())),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if !default_path.exists() {
                    return Ok(Config::default());
                }
                default_path.to_path_buf()
            }
        };

        let content =
            std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                path: config_path.clone(),
                source,
            })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: config_path.clone(),
            source,
        })?;
        tracing::debug!(path = %config_path.display(), "loaded configuration");
        Ok(config)
    }
}
