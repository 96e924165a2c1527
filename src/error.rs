//! Error types.
//!
//! Only two things can go wrong in a way the caller has to handle:
//!
//! - [`AuditError::LockfileNotFound`]: the project has no `package-lock.json`.
//!   This aborts the audit before any other scanner runs.
//! - [`ConfigError`]: the configuration file is missing, unreadable or invalid.
//!
//! Everything else (a corrupt lock document, a malformed `package.json`, an
//! unreadable `bundle.js`) is recovered inside the scanner that hit it and
//! reported through `tracing`.

use std::path::PathBuf;

/// Fatal audit errors.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// The dependency-lock document does not exist at the expected location.
    #[error("lock file not found: {}", .path.display())]
    LockfileNotFound { path: PathBuf },
}

impl AuditError {
    /// The path the audit attempted to read.
    pub fn path(&self) -> &std::path::Path {
        match self {
            AuditError::LockfileNotFound { path } => path,
        }
    }
}

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
