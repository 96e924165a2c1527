//! Compromise detectors.
//!
//! Every detector implements the [`Scanner`] trait and appends what it finds
//! to the shared [`AuditReport`]:
//!
//! - [`lockfile`]: installed package versions from `package-lock.json`.
//! - [`scripts`]: `postinstall` / `install` hooks that run the worm payload.
//! - [`payload`]: SHA-256 fingerprint of a root-level `bundle.js`.
//!
//! Use [`all_scanners`] to obtain them in execution order and [`all_rules`]
//! to list every rule they report.

pub mod lockfile;
pub mod payload;
pub mod scripts;

use crate::config::{Config, WalkConfig};
use crate::error::AuditError;
use crate::finding::AuditReport;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A single compromise detector.
///
/// Scanners recover from their own I/O and parse failures. The only error
/// one may return is [`AuditError`], which aborts the whole audit.
///
/// # Implementing a custom scanner
///
/// ```rust,ignore
/// use shai_hulud_audit::scanners::Scanner;
///
/// pub struct MyScanner;
///
/// impl Scanner for MyScanner {
///     fn name(&self) -> &'static str { "my_scanner" }
///     fn description(&self) -> &'static str { "My custom scanner" }
///     fn scan(&self, root: &Path, config: &Config, report: &mut AuditReport) -> Result<(), AuditError> {
///         // ... push findings into `report` ...
///         Ok(())
///     }
/// }
/// ```
pub trait Scanner {
    /// Returns the scanner's unique identifier (e.g., `"lockfile"`).
    fn name(&self) -> &'static str;

    /// Returns a short, human-readable description of the scanner.
    fn description(&self) -> &'static str;

    /// Runs the scanner against the project at `root`.
    fn scan(&self, root: &Path, config: &Config, report: &mut AuditReport)
        -> Result<(), AuditError>;
}

/// Returns every registered [`Scanner`] in execution order.
///
/// The order has no correctness impact; it only fixes the order in which
/// findings appear in the report.
pub fn all_scanners() -> Vec<Box<dyn Scanner>> {
    vec![
        Box::new(lockfile::LockfileScanner),
        Box::new(scripts::ScriptHookScanner),
        Box::new(payload::PayloadScanner),
    ]
}

/// Recursively collects every file named exactly `file_name`, including
/// symlinks that resolve to a file.
///
/// Entries are visited in file-name order so repeated walks over an
/// unchanged tree return the same list. Unreadable directories are skipped.
pub fn collect_files_named(root: &Path, file_name: &str, walk: &WalkConfig) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(root)
        .follow_links(walk.follow_links)
        .sort_by_file_name();
    if let Some(depth) = walk.max_depth {
        // Depth is counted in directories below root; the file sits one level deeper.
        walker = walker.max_depth(depth.saturating_add(1));
    }

    let mut files = Vec::new();
    let entries = walker.into_iter().filter_entry(|e| {
        !(e.depth() > 0
            && e.file_type().is_dir()
            && walk.is_skipped(&e.file_name().to_string_lossy()))
    });
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_name() != file_name {
            continue;
        }
        // A symlinked file is read through its target even when directory
        // links are not followed.
        if entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file()) {
            files.push(entry.into_path());
        }
    }
    files
}

/// Metadata for a single audit rule.
///
/// Returned by [`all_rules`] and used by the `list-rules` and `explain`
/// CLI commands.
pub struct RuleInfo {
    /// Unique rule identifier (e.g., `"hulud/install-hook"`).
    pub id: &'static str,
    /// Severity as a string (`"error"`, `"warning"`, `"info"`).
    pub severity: &'static str,
    /// Scanner that reports this rule.
    pub scanner: &'static str,
    /// Short description of what the rule checks.
    pub message: &'static str,
    /// Guidance on how to fix a violation.
    pub remediation: &'static str,
}

/// Aggregates [`RuleInfo`] from every scanner module.
pub fn all_rules() -> Vec<RuleInfo> {
    let mut rules = Vec::new();
    rules.extend(lockfile::rules());
    rules.extend(scripts::rules());
    rules.extend(payload::rules());
    rules
}
