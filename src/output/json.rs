//! JSON output formatter.
//!
//! Wraps the [`AuditReport`] in an envelope carrying the tool version, the
//! render timestamp, the overall status, and a summary of counts.

use crate::finding::{AuditReport, AuditStatus};

#[derive(serde::Serialize)]
struct JsonOutput<'a> {
    tool: &'static str,
    version: &'static str,
    audit_timestamp: String,
    status: AuditStatus,
    summary: Summary,
    report: &'a AuditReport,
}

#[derive(serde::Serialize)]
struct Summary {
    malicious_packages: usize,
    present_unaffected: usize,
    suspicious_scripts: usize,
    malicious_bundles: usize,
}

/// Formats an [`AuditReport`] as pretty-printed JSON.
///
/// # Panics
///
/// Panics if the report cannot be serialized (should not happen with valid data).
pub fn format(report: &AuditReport) -> String {
    let output = JsonOutput {
        tool: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        audit_timestamp: chrono::Utc::now().to_rfc3339(),
        status: report.status(),
        summary: Summary {
            malicious_packages: report.malicious_packages.len(),
            present_unaffected: report.present_unaffected.len(),
            suspicious_scripts: report.script_findings.len(),
            malicious_bundles: report.fingerprint_findings.len(),
        },
        report,
    };

    serde_json::to_string_pretty(&output).expect("JSON serialization failed")
}
