//! Audit orchestration.
//!
//! The [`run_audit`] function is the main entry-point for auditing one project
//! root. It runs every registered [`Scanner`] in a fixed sequence and collects
//! their findings into a single [`AuditReport`].

use crate::config::Config;
use crate::error::AuditError;
use crate::finding::AuditReport;
use crate::scanners::{self, Scanner};
use std::path::Path;

/// Runs a complete compromise audit on the project at `root`.
///
/// # Pipeline
///
/// 1. Lock document matcher over `root/package-lock.json`.
/// 2. Install-hook scanner over every `package.json` under `root`.
/// 3. Payload fingerprint check of `root/bundle.js`.
///
/// # Errors
///
/// Returns [`AuditError::LockfileNotFound`] when `root/package-lock.json`
/// does not exist. In that case neither of the other scanners runs. All other
/// I/O and parse problems are recovered inside the scanners.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use shai_hulud_audit::{audit, config::Config};
///
/// let report = audit::run_audit(Path::new("./my-app"), &Config::default())?;
/// if report.has_threats() {
///     eprintln!("{} threats found", report.threat_count());
/// }
/// # Ok::<(), shai_hulud_audit::error::AuditError>(())
/// ```
pub fn run_audit(root: &Path, config: &Config) -> Result<AuditReport, AuditError> {
    let all = scanners::all_scanners();
    let refs: Vec<&dyn Scanner> = all.iter().map(|s| s.as_ref()).collect();
    run_scanners(root, config, &refs)
}

/// Runs the given scanners in order, stopping at the first fatal error.
pub fn run_scanners(
    root: &Path,
    config: &Config,
    scanners: &[&dyn Scanner],
) -> Result<AuditReport, AuditError> {
    tracing::info!(root = %root.display(), "starting Shai-Hulud audit");
    let mut report = AuditReport::new(root);

    for (step, scanner) in scanners.iter().enumerate() {
        tracing::info!(step = step + 1, scanner = scanner.name(), "{}", scanner.description());
        scanner.scan(root, config, &mut report)?;
    }

    tracing::info!(
        threats = report.threat_count(),
        unaffected = report.present_unaffected.len(),
        "audit complete"
    );
    Ok(report)
}
