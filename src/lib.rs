//! # shai-hulud-audit
//!
//! Offline compromise-indicator scanner for npm projects.
//!
//! `shai-hulud-audit` checks a project directory for traces of the Shai-Hulud
//! npm worm (September 2025): installed package versions known to carry the
//! payload, `postinstall` / `install` hooks that run it, and the `bundle.js`
//! payload itself identified by its SHA-256 fingerprint. It never touches the
//! network and never modifies the scanned project.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use shai_hulud_audit::{audit, config::Config, output};
//!
//! let config = Config::load(None).expect("failed to load config");
//! let report = audit::run_audit(Path::new("./my-app"), &config)
//!     .expect("project has no package-lock.json");
//!
//! let text = output::format_report(&report, &output::OutputFormat::Pretty);
//! print!("{text}");
//! ```
//!
//! ## Architecture
//!
//! 1. **[`registry`]**: embedded table of compromised package versions and
//!    the payload fingerprint.
//! 2. **[`scanners`]**: the three detectors behind the [`scanners::Scanner`]
//!    trait.
//! 3. **[`audit`]**: runs the detectors in sequence and owns the
//!    fatal-vs-recoverable error policy.
//! 4. **[`finding`]**: report types ([`finding::AuditReport`] and friends).
//! 5. **[`output`]**: pretty text, JSON, or [SARIF] rendering.
//!
//! [SARIF]: https://sarifweb.azurewebsites.net/

pub mod audit;
pub mod config;
pub mod error;
pub mod finding;
pub mod output;
pub mod registry;
pub mod scanners;
