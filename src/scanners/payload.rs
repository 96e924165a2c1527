//! Payload fingerprint scanner.
//!
//! The worm drops a `bundle.js` next to the manifest of every package it
//! republishes. This scanner hashes `<root>/bundle.js` (the root only, not
//! recursive) and compares it with the known payload fingerprint.
//!
//! # Rules
//!
//! | ID | Sev | What it checks |
//! |----|-----|----------------|
//! | `hulud/malicious-bundle` | Error | `bundle.js` SHA-256 equals the worm payload |

use crate::config::Config;
use crate::error::AuditError;
use crate::finding::{AuditReport, FingerprintFinding};
use crate::registry::MALICIOUS_BUNDLE_SHA256;
use crate::scanners::{RuleInfo, Scanner};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::path::Path;

pub const PAYLOAD_NAME: &str = "bundle.js";

pub const RULE_MALICIOUS_BUNDLE: &str = "hulud/malicious-bundle";

const REMEDIATION: &str = "Delete the file, treat the machine as compromised, and rotate GitHub, npm and cloud credentials";

/// Checks `<root>/bundle.js` against the known worm payload fingerprint.
///
/// Returns at most one finding. A missing file is not an error.
pub fn check_malicious_payload(root: &Path) -> Vec<FingerprintFinding> {
    check_payload_against(root, MALICIOUS_BUNDLE_SHA256)
}

/// Checks `<root>/bundle.js` against an arbitrary SHA-256 fingerprint.
///
/// `expected_sha256` is compared case-insensitively as hex.
pub fn check_payload_against(root: &Path, expected_sha256: &str) -> Vec<FingerprintFinding> {
    let file_path = root.join(PAYLOAD_NAME);
    if !file_path.is_file() {
        return Vec::new();
    }

    tracing::info!(path = %file_path.display(), "checking hash");
    let fingerprint = match sha256_file(&file_path) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::warn!(path = %file_path.display(), error = %e, "failed to read payload candidate");
            return Vec::new();
        }
    };

    if fingerprint.eq_ignore_ascii_case(expected_sha256) {
        vec![FingerprintFinding {
            file_path,
            fingerprint,
        }]
    } else {
        tracing::info!(
            path = %file_path.display(),
            hash = %fingerprint,
            "bundle.js hash does not match the known payload"
        );
        Vec::new()
    }
}

/// Lowercase hex SHA-256 over the entire file content.
pub fn sha256_file(path: &Path) -> std::io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Built-in scanner for the worm's `bundle.js` payload.
pub struct PayloadScanner;

impl Scanner for PayloadScanner {
    fn name(&self) -> &'static str {
        "payload"
    }

    fn description(&self) -> &'static str {
        "SHA-256 fingerprint of a root-level bundle.js"
    }

    fn scan(
        &self,
        root: &Path,
        _config: &Config,
        report: &mut AuditReport,
    ) -> Result<(), AuditError> {
        report.stats.payload_present = root.join(PAYLOAD_NAME).is_file();
        report
            .fingerprint_findings
            .extend(check_malicious_payload(root));
        Ok(())
    }
}

/// Returns the [`RuleInfo`] catalogue for the payload rule.
pub fn rules() -> Vec<RuleInfo> {
    vec![RuleInfo {
        id: RULE_MALICIOUS_BUNDLE,
        severity: "error",
        scanner: "payload",
        message: "bundle.js matches the known Shai-Hulud payload fingerprint",
        remediation: REMEDIATION,
    }]
}
