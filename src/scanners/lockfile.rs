//! Lock document matcher.
//!
//! Reads `package-lock.json` (lockfile v2/v3 `packages` map) and classifies
//! every installed package against the [compromise registry](crate::registry).
//!
//! # Rules
//!
//! | ID | Sev | What it checks |
//! |----|-----|----------------|
//! | `hulud/malicious-package` | Error | Installed version is on the compromised list |
//! | `hulud/unaffected-version` | Info | Tracked package installed at a version not on the list |
//!
//! Packages the registry does not track produce no finding at all.
//!
//! # Failure policy
//!
//! A missing lock document is the only fatal condition of an audit and is
//! returned as [`AuditError::LockfileNotFound`]. A document that exists but
//! cannot be read or parsed is logged and treated as having no entries, so
//! the other scanners still run.

use crate::config::Config;
use crate::error::AuditError;
use crate::finding::{AuditReport, InstalledPackage};
use crate::registry;
use crate::scanners::{RuleInfo, Scanner};
use serde_json::Value;
use std::path::Path;

/// File name of the dependency-lock document, relative to the project root.
pub const LOCKFILE_NAME: &str = "package-lock.json";

/// Key segment marking an installed package inside the `packages` map.
const INSTALL_DIR: &str = "node_modules/";

pub const RULE_MALICIOUS: &str = "hulud/malicious-package";
pub const RULE_UNAFFECTED: &str = "hulud/unaffected-version";

const REMEDIATION_MALICIOUS: &str = "Remove node_modules, pin the package to a version published before the compromise, reinstall, and rotate every credential reachable from this machine";
const REMEDIATION_UNAFFECTED: &str =
    "No action required for this version; avoid upgrading to a compromised release";

/// Classified lock-document entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageMatches {
    /// Entries whose exact version is known to be compromised.
    pub malicious: Vec<InstalledPackage>,
    /// Tracked packages installed at a version not on the compromised list.
    pub present_unaffected: Vec<InstalledPackage>,
    /// Installed-package entries examined.
    pub entries_checked: usize,
    /// `false` when the document existed but could not be read or parsed.
    pub parsed: bool,
}

/// Classifies every installed package in the lock document at `lock_path`.
///
/// Findings are returned in document order. A package installed at several
/// depths produces one finding per occurrence.
///
/// # Errors
///
/// Returns [`AuditError::LockfileNotFound`] if `lock_path` does not exist.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use shai_hulud_audit::scanners::lockfile::find_malicious_packages;
///
/// let matches = find_malicious_packages(Path::new("./my-app/package-lock.json"))?;
/// for pkg in &matches.malicious {
///     println!("compromised: {pkg}");
/// }
/// # Ok::<(), shai_hulud_audit::error::AuditError>(())
/// ```
pub fn find_malicious_packages(lock_path: &Path) -> Result<PackageMatches, AuditError> {
    if !lock_path.exists() {
        return Err(AuditError::LockfileNotFound {
            path: lock_path.to_path_buf(),
        });
    }

    let document = match read_document(lock_path) {
        Some(doc) => doc,
        None => return Ok(PackageMatches::default()),
    };

    let installed = installed_packages(&document);
    let mut matches = PackageMatches {
        entries_checked: installed.len(),
        parsed: true,
        ..PackageMatches::default()
    };

    for pkg in installed {
        if registry::is_compromised_version(&pkg.name, &pkg.version) {
            tracing::debug!(package = %pkg, path = %pkg.source_path, "compromised version installed");
            matches.malicious.push(pkg);
        } else if registry::is_tracked_package(&pkg.name) {
            matches.present_unaffected.push(pkg);
        }
    }

    Ok(matches)
}

fn read_document(lock_path: &Path) -> Option<Value> {
    let content = match std::fs::read_to_string(lock_path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(path = %lock_path.display(), error = %e, "error reading lock file");
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(doc) => Some(doc),
        Err(e) => {
            tracing::warn!(path = %lock_path.display(), error = %e, "error parsing lock file");
            None
        }
    }
}

/// Extracts installed packages from a parsed lock document.
///
/// Missing or mistyped fields are skipped rather than treated as errors: a
/// document without a `packages` object yields nothing, and so does an entry
/// without a string `version` (workspace links, for instance).
fn installed_packages(document: &Value) -> Vec<InstalledPackage> {
    let Some(packages) = document.get("packages").and_then(Value::as_object) else {
        return Vec::new();
    };

    packages
        .iter()
        .filter_map(|(key, entry)| {
            let name = package_name_from_key(key)?;
            let version = entry.get("version").and_then(Value::as_str)?;
            Some(InstalledPackage {
                name: name.to_string(),
                version: version.to_string(),
                source_path: key.clone(),
            })
        })
        .collect()
}

/// Returns the package name encoded in a `packages` key.
///
/// The name is whatever follows the last `node_modules/` segment, so
/// `node_modules/a/node_modules/@scope/b` yields `@scope/b`. Keys without an
/// installation segment (the root entry `""`, workspace sources such as
/// `packages/app`) are not installed packages.
fn package_name_from_key(key: &str) -> Option<&str> {
    let (prefix, name) = key.rsplit_once(INSTALL_DIR)?;
    // Only a whole path segment counts; `vendor_node_modules/` is not one.
    if !(prefix.is_empty() || prefix.ends_with('/')) || name.is_empty() {
        return None;
    }
    Some(name)
}

/// Built-in scanner for compromised package versions in `package-lock.json`.
pub struct LockfileScanner;

impl Scanner for LockfileScanner {
    fn name(&self) -> &'static str {
        "lockfile"
    }

    fn description(&self) -> &'static str {
        "Known compromised package versions in package-lock.json"
    }

    fn scan(
        &self,
        root: &Path,
        _config: &Config,
        report: &mut AuditReport,
    ) -> Result<(), AuditError> {
        let matches = find_malicious_packages(&root.join(LOCKFILE_NAME))?;
        report.stats.lockfile_entries = matches.entries_checked;
        report.stats.lockfile_parsed = matches.parsed;
        report.malicious_packages.extend(matches.malicious);
        report.present_unaffected.extend(matches.present_unaffected);
        Ok(())
    }
}

/// Returns the [`RuleInfo`] catalogue for the lock document rules.
pub fn rules() -> Vec<RuleInfo> {
    vec![
        RuleInfo {
            id: RULE_MALICIOUS,
            severity: "error",
            scanner: "lockfile",
            message: "Installed package version is a known Shai-Hulud compromised release",
            remediation: REMEDIATION_MALICIOUS,
        },
        RuleInfo {
            id: RULE_UNAFFECTED,
            severity: "info",
            scanner: "lockfile",
            message: "Tracked package installed at a version not known to be malicious",
            remediation: REMEDIATION_UNAFFECTED,
        },
    ]
}
