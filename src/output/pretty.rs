//! Human-readable colored text formatter.

use crate::finding::{AuditReport, AuditStatus};
use colored::Colorize;

/// Formats an [`AuditReport`] as human-readable, ANSI-colored text.
///
/// Sections rendered (in order):
/// 1. **Header**: project root.
/// 2. **Scanned**: lock entries, manifests and payload presence.
/// 3. **Findings**: one block per non-empty finding kind.
/// 4. **Summary**: overall status.
pub fn format(report: &AuditReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\n{}\n\n",
        format!("  Shai-Hulud Audit: {}  ", report.root.display())
            .bold()
            .on_blue()
            .white()
    ));

    let stats = &report.stats;
    out.push_str(&format!("{}\n", "Scanned".bold().underline()));
    let lock_detail = if stats.lockfile_parsed {
        format!("{} installed packages checked", stats.lockfile_entries)
    } else {
        "unreadable, no packages checked".yellow().to_string()
    };
    out.push_str(&format!("  {:<20} {lock_detail}\n", "package-lock.json"));
    out.push_str(&format!(
        "  {:<20} {} scanned, {} skipped\n",
        "package.json",
        stats.manifests_scanned,
        stats.manifests_skipped
    ));
    out.push_str(&format!(
        "  {:<20} {}\n\n",
        "bundle.js",
        if stats.payload_present { "present" } else { "absent" }
    ));

    if !report.malicious_packages.is_empty() {
        out.push_str(&format!("{}\n", "Malicious Packages".red().bold().underline()));
        for pkg in &report.malicious_packages {
            out.push_str(&format!(
                "  [{}] {}\n         {}\n",
                "ERROR".red().bold(),
                pkg.to_string().bold(),
                pkg.source_path.dimmed()
            ));
        }
        out.push('\n');
    }

    if !report.present_unaffected.is_empty() {
        out.push_str(&format!("{}\n", "Identified Packages".bold().underline()));
        for pkg in &report.present_unaffected {
            out.push_str(&format!(
                "  [{}] {} (version not known to be malicious)\n         {}\n",
                " INFO".blue(),
                pkg,
                pkg.source_path.dimmed()
            ));
        }
        out.push('\n');
    }

    if !report.script_findings.is_empty() {
        out.push_str(&format!("{}\n", "Suspicious Scripts".red().bold().underline()));
        for hit in &report.script_findings {
            out.push_str(&format!(
                "  [{}] '{}' in {}\n         > {}\n",
                "ERROR".red().bold(),
                hit.hook,
                hit.manifest_path.display(),
                hit.command.dimmed()
            ));
        }
        out.push('\n');
    }

    if !report.fingerprint_findings.is_empty() {
        out.push_str(&format!("{}\n", "Malicious bundle.js".red().bold().underline()));
        for hit in &report.fingerprint_findings {
            out.push_str(&format!(
                "  [{}] {}\n         sha256 {}\n",
                "ERROR".red().bold(),
                hit.file_path.display(),
                hit.fingerprint.dimmed()
            ));
        }
        out.push('\n');
    }

    let status_str = match report.status() {
        AuditStatus::Clean => "CLEAN".green().bold().to_string(),
        AuditStatus::Review => "REVIEW".yellow().bold().to_string(),
        AuditStatus::Compromised => "COMPROMISED".red().bold().to_string(),
    };
    if report.is_clean() {
        out.push_str(&format!(
            "Result: {status_str}  |  No known Shai-Hulud related threats detected in this project.\n"
        ));
    } else {
        out.push_str(&format!(
            "Result: {status_str}  |  {} malicious packages, {} suspicious scripts, {} malicious bundles, {} identified packages\n",
            report.malicious_packages.len(),
            report.script_findings.len(),
            report.fingerprint_findings.len(),
            report.present_unaffected.len(),
        ));
    }

    out
}
