mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use shai_hulud_audit::error::AuditError;
use shai_hulud_audit::{audit, config, output, registry, scanners};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Audit {
            path,
            format,
            output: output_path,
            strict,
            config: config_path,
        } => {
            if !path.is_dir() {
                eprintln!("Error: not a directory: {}", path.display());
                std::process::exit(2);
            }

            let mut config = config::Config::load(config_path.as_deref()).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(2);
            });

            if strict {
                config.strict.enabled = true;
            }

            let report = match audit::run_audit(&path, &config) {
                Ok(report) => report,
                Err(e @ AuditError::LockfileNotFound { .. }) => {
                    eprintln!("{e}. Skipping.");
                    eprintln!(
                        "Run `npm install --package-lock-only` in {} to generate one.",
                        path.display()
                    );
                    std::process::exit(1);
                }
            };
            let formatted = output::format_report(&report, &format);

            if let Some(out_path) = output_path {
                std::fs::write(&out_path, &formatted).unwrap_or_else(|e| {
                    eprintln!("Error writing output: {e}");
                    std::process::exit(2);
                });
                eprintln!("Output written to {}", out_path.display());
            } else {
                print!("{formatted}");
            }

            let failed = config.strict.enabled && report.has_threats();
            std::process::exit(if failed { 1 } else { 0 });
        }

        Commands::ListPackages => {
            println!("{}", "Tracked Packages".bold().underline());
            println!();
            for entry in registry::entries() {
                println!("  {:<50} {}", entry.package, entry.versions.join(", ").dimmed());
            }
            println!();
            println!("  Total: {} packages", registry::len());
            println!("  bundle.js sha256: {}", registry::MALICIOUS_BUNDLE_SHA256);
        }

        Commands::Lookup { name, version } => {
            if !registry::is_valid_package_name(&name) {
                eprintln!("Error: '{name}' is not a valid npm package name");
                std::process::exit(2);
            }

            let Some(versions) = registry::compromised_versions(&name) else {
                println!("{} {name} is not tracked", "OK".green().bold());
                return;
            };

            match version {
                Some(v) if registry::is_compromised_version(&name, &v) => {
                    println!("{} {name}@{v} is a known compromised release", "MALICIOUS".red().bold());
                }
                Some(v) => {
                    println!(
                        "{} {name}@{v} is not known to be malicious (compromised: {})",
                        "TRACKED".yellow().bold(),
                        versions.join(", ")
                    );
                }
                None => {
                    println!(
                        "{} {name} compromised versions: {}",
                        "TRACKED".yellow().bold(),
                        versions.join(", ")
                    );
                }
            }
        }

        Commands::ListRules => {
            let rules = scanners::all_rules();
            println!("{}", "Built-in Rules".bold().underline());
            println!();

            let mut current_scanner = "";
            for rule in &rules {
                if rule.scanner != current_scanner {
                    if !current_scanner.is_empty() {
                        println!();
                    }
                    println!("  {}", rule.scanner.bold());
                    current_scanner = rule.scanner;
                }

                let severity = match rule.severity {
                    "error" => "ERROR".red().bold().to_string(),
                    "warning" => " WARN".yellow().bold().to_string(),
                    "info" => " INFO".blue().to_string(),
                    _ => rule.severity.to_string(),
                };

                println!(
                    "    [{severity}] {id:<28} {message}",
                    id = rule.id,
                    message = rule.message,
                );
            }

            println!();
            println!("  Total: {} rules", rules.len());
        }

        Commands::Explain { rule_id } => {
            let rules = scanners::all_rules();
            match rules.iter().find(|r| r.id == rule_id) {
                Some(rule) => {
                    println!("{}", rule.id.bold());
                    println!();
                    println!("  Scanner:      {}", rule.scanner);
                    println!("  Severity:     {}", rule.severity);
                    println!("  Description:  {}", rule.message);
                    println!("  Remediation:  {}", rule.remediation);
                }
                None => {
                    eprintln!("Unknown rule: {rule_id}");
                    eprintln!("Use 'shai-hulud-audit list-rules' to see all available rules.");
                    std::process::exit(2);
                }
            }
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the flag-derived level.
fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
