//! Install-hook scanner.
//!
//! Walks the project tree for `package.json` manifests and flags the
//! `postinstall` and `install` lifecycle hooks that launch the worm payload
//! with `node bundle.js`. Other script names are never inspected, since npm
//! only runs these two automatically on install.
//!
//! # Rules
//!
//! | ID | Sev | What it checks |
//! |----|-----|----------------|
//! | `hulud/install-hook` | Error | `postinstall` / `install` runs `node bundle.js` |

use crate::config::{Config, WalkConfig};
use crate::error::AuditError;
use crate::finding::{AuditReport, LifecycleHook, ScriptHookFinding};
use crate::scanners::{collect_files_named, RuleInfo, Scanner};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const MANIFEST_NAME: &str = "package.json";

/// Command fragment the worm injects into lifecycle hooks.
pub const PAYLOAD_INVOCATION: &str = "node bundle.js";

pub const RULE_INSTALL_HOOK: &str = "hulud/install-hook";

const REMEDIATION: &str = "Do not run npm install in this tree; remove the package that ships this manifest and audit CI secrets and npm tokens";

/// Outcome of one manifest walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptScan {
    pub findings: Vec<ScriptHookFinding>,
    pub manifests_scanned: usize,
    /// Manifests that could not be read or parsed.
    pub manifests_skipped: usize,
}

/// Finds every `postinstall` / `install` hook under `root` that runs the payload.
///
/// Manifests that fail to parse are skipped. A `root` that does not exist
/// yields an empty result.
pub fn find_suspicious_scripts(root: &Path, walk: &WalkConfig) -> ScriptScan {
    let mut scan = ScriptScan::default();

    for manifest_path in collect_files_named(root, MANIFEST_NAME, walk) {
        let Some(manifest) = read_manifest(&manifest_path) else {
            scan.manifests_skipped += 1;
            continue;
        };
        scan.manifests_scanned += 1;
        scan.findings.extend(suspicious_hooks(&manifest, &manifest_path));
    }

    scan
}

fn read_manifest(path: &Path) -> Option<Value> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable manifest");
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "skipping malformed manifest");
            None
        }
    }
}

fn suspicious_hooks(manifest: &Value, manifest_path: &Path) -> Vec<ScriptHookFinding> {
    let Some(scripts) = manifest.get("scripts").and_then(Value::as_object) else {
        return Vec::new();
    };

    LifecycleHook::ALL
        .iter()
        .filter_map(|hook| {
            let command = scripts.get(hook.as_str()).and_then(Value::as_str)?;
            if !command.contains(PAYLOAD_INVOCATION) {
                return None;
            }
            tracing::debug!(
                manifest = %manifest_path.display(),
                hook = %hook,
                "payload invocation in lifecycle hook"
            );
            Some(ScriptHookFinding {
                manifest_path: PathBuf::from(manifest_path),
                hook: *hook,
                command: command.to_string(),
            })
        })
        .collect()
}

/// Built-in scanner for malicious lifecycle hooks.
pub struct ScriptHookScanner;

impl Scanner for ScriptHookScanner {
    fn name(&self) -> &'static str {
        "scripts"
    }

    fn description(&self) -> &'static str {
        "postinstall/install hooks that run the worm payload"
    }

    fn scan(
        &self,
        root: &Path,
        config: &Config,
        report: &mut AuditReport,
    ) -> Result<(), AuditError> {
        let scan = find_suspicious_scripts(root, &config.walk);
        report.stats.manifests_scanned = scan.manifests_scanned;
        report.stats.manifests_skipped = scan.manifests_skipped;
        report.script_findings.extend(scan.findings);
        Ok(())
    }
}

/// Returns the [`RuleInfo`] catalogue for the install-hook rule.
pub fn rules() -> Vec<RuleInfo> {
    vec![RuleInfo {
        id: RULE_INSTALL_HOOK,
        severity: "error",
        scanner: "scripts",
        message: "postinstall/install script runs `node bundle.js`",
        remediation: REMEDIATION,
    }]
}
