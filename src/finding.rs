use std::fmt;
use std::path::{Path, PathBuf};

use crate::scanners::{lockfile, payload, scripts};

/// Threats are errors; tracked packages at an unaffected version are info.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Info,
}

/// One installed package entry read from the lock document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InstalledPackage {
    pub name: String,
    pub version: String,
    /// Lock-document key the entry came from, e.g.
    /// `node_modules/foo/node_modules/@ctrl/tinycolor`. Provenance only.
    pub source_path: String,
}

impl fmt::Display for InstalledPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// The lifecycle hooks the script scanner inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleHook {
    PostInstall,
    Install,
}

impl LifecycleHook {
    pub const ALL: [LifecycleHook; 2] = [LifecycleHook::PostInstall, LifecycleHook::Install];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleHook::PostInstall => "postinstall",
            LifecycleHook::Install => "install",
        }
    }
}

impl fmt::Display for LifecycleHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScriptHookFinding {
    pub manifest_path: PathBuf,
    pub hook: LifecycleHook,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FingerprintFinding {
    pub file_path: PathBuf,
    /// Lowercase hex SHA-256 of the whole file.
    pub fingerprint: String,
}

/// Counters collected while scanning. Deterministic for a fixed tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditStats {
    /// Installed-package entries examined in the lock document.
    pub lockfile_entries: usize,
    /// `false` when the lock document existed but could not be parsed.
    pub lockfile_parsed: bool,
    pub manifests_scanned: usize,
    /// Manifests that could not be read or parsed.
    pub manifests_skipped: usize,
    pub payload_present: bool,
}

/// Result of one audit run over a project root.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditReport {
    pub root: PathBuf,
    pub malicious_packages: Vec<InstalledPackage>,
    /// Tracked package names installed at a version not on the compromised list.
    pub present_unaffected: Vec<InstalledPackage>,
    pub script_findings: Vec<ScriptHookFinding>,
    pub fingerprint_findings: Vec<FingerprintFinding>,
    pub stats: AuditStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    /// Nothing tracked was found.
    Clean,
    /// Only present-but-unaffected packages were found.
    Review,
    Compromised,
}

/// Renderer-facing view of a single finding, independent of its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub rule_id: String,
    pub message: String,
    pub severity: Severity,
    pub file: Option<PathBuf>,
    /// Offending text: the lock key or the hook command.
    pub snippet: Option<String>,
}

impl AuditReport {
    pub fn new(root: &Path) -> Self {
        AuditReport {
            root: root.to_path_buf(),
            malicious_packages: Vec::new(),
            present_unaffected: Vec::new(),
            script_findings: Vec::new(),
            fingerprint_findings: Vec::new(),
            stats: AuditStats::default(),
        }
    }

    /// Number of findings that indicate an actual compromise.
    pub fn threat_count(&self) -> usize {
        self.malicious_packages.len() + self.script_findings.len() + self.fingerprint_findings.len()
    }

    pub fn has_threats(&self) -> bool {
        self.threat_count() > 0
    }

    /// `true` when no finding of any kind, near-misses included, was produced.
    pub fn is_clean(&self) -> bool {
        !self.has_threats() && self.present_unaffected.is_empty()
    }

    pub fn status(&self) -> AuditStatus {
        if self.has_threats() {
            AuditStatus::Compromised
        } else if !self.present_unaffected.is_empty() {
            AuditStatus::Review
        } else {
            AuditStatus::Clean
        }
    }

    /// Flattens every typed finding into the generic [`Finding`] view.
    ///
    /// Order: malicious packages, present-but-unaffected packages, install
    /// hooks, payload fingerprints. Within each group the scan order is kept.
    pub fn findings(&self) -> Vec<Finding> {
        let lock_path = self.root.join(lockfile::LOCKFILE_NAME);
        let mut out = Vec::new();

        for pkg in &self.malicious_packages {
            out.push(Finding {
                rule_id: lockfile::RULE_MALICIOUS.to_string(),
                message: format!("Known malicious package installed: {pkg}"),
                severity: Severity::Error,
                file: Some(lock_path.clone()),
                snippet: Some(pkg.source_path.clone()),
            });
        }

        for pkg in &self.present_unaffected {
            out.push(Finding {
                rule_id: lockfile::RULE_UNAFFECTED.to_string(),
                message: format!(
                    "Found package {pkg}, but version is not known to be malicious"
                ),
                severity: Severity::Info,
                file: Some(lock_path.clone()),
                snippet: Some(pkg.source_path.clone()),
            });
        }

        for hit in &self.script_findings {
            out.push(Finding {
                rule_id: scripts::RULE_INSTALL_HOOK.to_string(),
                message: format!("Suspicious '{}' script runs the worm payload", hit.hook),
                severity: Severity::Error,
                file: Some(hit.manifest_path.clone()),
                snippet: Some(hit.command.clone()),
            });
        }

        for hit in &self.fingerprint_findings {
            out.push(Finding {
                rule_id: payload::RULE_MALICIOUS_BUNDLE.to_string(),
                message: format!("Malicious bundle.js with hash {}", hit.fingerprint),
                severity: Severity::Error,
                file: Some(hit.file_path.clone()),
                snippet: None,
            });
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(name: &str, version: &str) -> InstalledPackage {
        InstalledPackage {
            name: name.to_string(),
            version: version.to_string(),
            source_path: format!("node_modules/{name}"),
        }
    }

    #[test]
    fn empty_report_is_clean() {
        let report = AuditReport::new(Path::new("/project"));
        assert!(report.is_clean());
        assert_eq!(report.status(), AuditStatus::Clean);
        assert!(report.findings().is_empty());
    }

    #[test]
    fn near_misses_need_review_but_are_not_threats() {
        let mut report = AuditReport::new(Path::new("/project"));
        report.present_unaffected.push(pkg("@ctrl/tinycolor", "4.1.3"));

        assert!(!report.has_threats());
        assert!(!report.is_clean());
        assert_eq!(report.status(), AuditStatus::Review);
        let findings = report.findings();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Info);
        assert_eq!(findings[0].snippet.as_deref(), Some("node_modules/@ctrl/tinycolor"));
    }

    #[test]
    fn findings_are_grouped_by_kind_in_scan_order() {
        let mut report = AuditReport::new(Path::new("/project"));
        report.present_unaffected.push(pkg("chalk", "5.6.0"));
        report.malicious_packages.push(pkg("debug", "4.4.2"));
        report.malicious_packages.push(pkg("chalk", "5.6.1"));
        report.script_findings.push(ScriptHookFinding {
            manifest_path: PathBuf::from("/project/package.json"),
            hook: LifecycleHook::PostInstall,
            command: "node bundle.js".to_string(),
        });

        let findings = report.findings();
        let ids: Vec<_> = findings.iter().map(|f| f.rule_id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "hulud/malicious-package",
                "hulud/malicious-package",
                "hulud/unaffected-version",
                "hulud/install-hook"
            ]
        );
        assert!(findings[0].message.contains("debug@4.4.2"));
        assert!(findings[1].message.contains("chalk@5.6.1"));
        assert_eq!(report.status(), AuditStatus::Compromised);
        assert_eq!(findings[3].severity, Severity::Error);
        assert_eq!(findings[3].snippet.as_deref(), Some("node bundle.js"));
    }

    #[test]
    fn hook_names_serialize_lowercase() {
        let json = serde_json::to_string(&LifecycleHook::PostInstall).unwrap();
        assert_eq!(json, "\"postinstall\"");
        assert_eq!(LifecycleHook::Install.to_string(), "install");
    }
}
