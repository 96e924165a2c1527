mod common;

use common::{write_lockfile, write_manifest};
use serde_json::json;
use shai_hulud_audit::audit::{run_audit, run_scanners};
use shai_hulud_audit::config::Config;
use shai_hulud_audit::error::AuditError;
use shai_hulud_audit::finding::{AuditReport, AuditStatus};
use shai_hulud_audit::scanners::lockfile::LockfileScanner;
use shai_hulud_audit::scanners::Scanner;
use std::cell::Cell;
use std::path::Path;

/// Scanner that only counts how often it ran.
struct CountingScanner {
    calls: Cell<usize>,
}

impl CountingScanner {
    fn new() -> Self {
        CountingScanner {
            calls: Cell::new(0),
        }
    }
}

impl Scanner for CountingScanner {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn description(&self) -> &'static str {
        "counts invocations"
    }

    fn scan(
        &self,
        _root: &Path,
        _config: &Config,
        _report: &mut AuditReport,
    ) -> Result<(), AuditError> {
        self.calls.set(self.calls.get() + 1);
        Ok(())
    }
}

fn infected_project(root: &Path) {
    write_lockfile(
        root,
        &[
            ("node_modules/@ctrl/tinycolor", "4.1.1"),
            ("node_modules/chalk", "5.3.0"),
            ("node_modules/lodash", "4.17.21"),
        ],
    );
    write_manifest(root, json!({ "test": "jest" }));
    write_manifest(
        &root.join("node_modules/@ctrl/tinycolor"),
        json!({ "postinstall": "node bundle.js" }),
    );
    std::fs::write(root.join("bundle.js"), b"not the real payload").unwrap();
}

#[test]
fn missing_lockfile_stops_before_other_scanners() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), json!({ "postinstall": "node bundle.js" }));

    let scripts = CountingScanner::new();
    let payload = CountingScanner::new();
    let result = run_scanners(
        dir.path(),
        &Config::default(),
        &[&LockfileScanner, &scripts, &payload],
    );

    let err = result.unwrap_err();
    assert!(matches!(err, AuditError::LockfileNotFound { .. }));
    assert_eq!(err.path(), dir.path().join("package-lock.json").as_path());
    assert_eq!(scripts.calls.get(), 0);
    assert_eq!(payload.calls.get(), 0);
}

#[test]
fn corrupt_lockfile_does_not_stop_other_scanners() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("package-lock.json"), "[[[").unwrap();

    let scripts = CountingScanner::new();
    let payload = CountingScanner::new();
    let report = run_scanners(
        dir.path(),
        &Config::default(),
        &[&LockfileScanner, &scripts, &payload],
    )
    .unwrap();

    assert!(!report.stats.lockfile_parsed);
    assert_eq!(scripts.calls.get(), 1);
    assert_eq!(payload.calls.get(), 1);
}

#[test]
fn run_audit_propagates_missing_lockfile() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_audit(dir.path(), &Config::default()).unwrap_err();
    assert!(matches!(err, AuditError::LockfileNotFound { .. }));
}

#[test]
fn full_audit_collects_every_finding_kind() {
    let dir = tempfile::tempdir().unwrap();
    infected_project(dir.path());

    let report = run_audit(dir.path(), &Config::default()).unwrap();
    assert_eq!(report.root, dir.path());
    assert_eq!(report.malicious_packages.len(), 1);
    assert_eq!(report.malicious_packages[0].to_string(), "@ctrl/tinycolor@4.1.1");
    assert_eq!(report.present_unaffected.len(), 1);
    assert_eq!(report.present_unaffected[0].to_string(), "chalk@5.3.0");
    assert_eq!(report.script_findings.len(), 1);
    // bundle.js exists but is not the payload.
    assert!(report.fingerprint_findings.is_empty());
    assert!(report.stats.payload_present);
    assert_eq!(report.stats.lockfile_entries, 3);
    assert_eq!(report.stats.manifests_scanned, 2);
    assert_eq!(report.status(), AuditStatus::Compromised);
}

#[test]
fn clean_project_has_clean_report() {
    let dir = tempfile::tempdir().unwrap();
    write_lockfile(dir.path(), &[("node_modules/lodash", "4.17.21")]);
    write_manifest(dir.path(), json!({ "postinstall": "husky install" }));

    let report = run_audit(dir.path(), &Config::default()).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.status(), AuditStatus::Clean);
    assert!(!report.stats.payload_present);
}

#[test]
fn audit_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    infected_project(dir.path());
    write_manifest(
        &dir.path().join("node_modules/z/node_modules/y"),
        json!({ "install": "node bundle.js" }),
    );

    let first = run_audit(dir.path(), &Config::default()).unwrap();
    let second = run_audit(dir.path(), &Config::default()).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn audit_never_modifies_the_project() {
    let dir = tempfile::tempdir().unwrap();
    infected_project(dir.path());
    let before = std::fs::read(dir.path().join("package-lock.json")).unwrap();

    run_audit(dir.path(), &Config::default()).unwrap();

    assert_eq!(std::fs::read(dir.path().join("package-lock.json")).unwrap(), before);
    assert!(dir.path().join("bundle.js").exists());
}
