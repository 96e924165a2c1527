use clap::{Parser, Subcommand};
use shai_hulud_audit::output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "shai-hulud-audit",
    version,
    about = "Offline scanner for Shai-Hulud npm worm compromise indicators"
)]
pub struct Cli {
    /// Show debug diagnostics on stderr
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show errors on stderr
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Audit a project directory for compromise indicators
    Audit {
        /// Path to the project (the directory holding package-lock.json)
        path: PathBuf,

        /// Output format
        #[arg(long, short, default_value = "pretty", value_enum)]
        format: OutputFormat,

        /// Write output to file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Exit with status 1 when threats are found
        #[arg(long)]
        strict: bool,

        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List every tracked package and its compromised versions
    ListPackages,

    /// Check whether a package (and optionally a version) is tracked
    Lookup {
        /// Package name, e.g. "@ctrl/tinycolor"
        name: String,

        /// Exact version string, e.g. "4.1.1"
        version: Option<String>,
    },

    /// List all rules with descriptions
    ListRules,

    /// Show full explanation for a rule
    Explain {
        /// Rule ID (e.g., "hulud/install-hook")
        rule_id: String,
    },
}
