//! WinTweak - tiered Windows 11 configuration tweaks
//!
//! Command line entry point.
//!
//! # Overview
//!
//! The binary is a thin caller of the library. It initializes:
//! - Logging (daily rotating file, console with `--debug`)
//! - A tokio runtime with 4 worker threads for command execution
//! - Settings from `Optimizer Settings.yaml` ([`ConfigManager`])
//! - One [`Optimizer`] handle for the whole process, with its ledger kept in
//!   `Applied Tweaks.yaml` so `restore` can revert what an earlier `apply` did
//!
//! # Admission gate
//!
//! Every command that changes the machine first scans for third-party
//! endpoint security. When anything is found the warning is printed and the
//! process exits with status 1 without touching the system. `scan` and
//! `list` are read-only and skip the gate.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::time::Duration;
use wintweak::logging::{LOG_PREFIX, setup_logging_with_console};
use wintweak::services::{ReportError, admission_warning};
use wintweak::{APP_NAME, ConfigManager, Optimizer, Selection, Tier, VERSION};

#[derive(Parser, Debug)]
#[command(name = "wintweak", version, about)]
struct Cli {
    /// Directory holding `Optimizer Settings.yaml`
    #[arg(long, value_name = "DIR", default_value = "WinTweak Data")]
    config_dir: Utf8PathBuf,

    /// Debug level logging, mirrored to the console
    #[arg(long)]
    debug: bool,

    /// Export the command report to FILE when done
    #[arg(long, value_name = "FILE", global = true)]
    report: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look for third-party endpoint security products
    Scan,

    /// List catalog tweaks
    List {
        #[arg(long)]
        tier: Option<Tier>,
    },

    /// Apply every selected tweak up to TIER
    Apply {
        tier: Tier,

        /// Pick a tweak by identifier (repeatable)
        #[arg(long = "select", value_name = "ID")]
        select: Vec<String>,

        /// Select every Standard, Ultimate and Extreme tweak up to TIER
        #[arg(long)]
        select_all: bool,

        /// Select every Basic tweak
        #[arg(long)]
        select_all_basic: bool,
    },

    /// Revert tracked tweaks and reset the baseline settings
    Restore,

    /// Export both registry scopes now
    Backup,

    /// Request a system restore point
    RestorePoint,

    /// Write a domain trust status report
    VerifyDomain,
}

impl Command {
    fn requires_admission(&self) -> bool {
        !matches!(self, Command::Scan | Command::List { .. })
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::new(&cli.config_dir)?;
    let settings = config_manager.load_settings()?;
    let debug = cli.debug || settings.debug_mode;

    let _log_guard = setup_logging_with_console(&settings.log_dir, LOG_PREFIX, debug, debug)?;
    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(4)
        .thread_name("wintweak-worker")
        .build()
        .context("Failed to build tokio runtime")?;

    let optimizer = Optimizer::system(settings).with_ledger(config_manager.ledger_store())?;
    let result = runtime.block_on(run(cli.command, &optimizer));

    if let Some(path) = &cli.report {
        match optimizer.report().export(path) {
            Ok(()) => println!("Report written to {}", path),
            Err(ReportError::Empty) => tracing::warn!("Nothing to report, {} not written", path),
            Err(e) => tracing::error!("{}", e),
        }
    }

    runtime.shutdown_timeout(Duration::from_secs(5));
    optimizer.metrics().log_summary();
    tracing::info!("Shutdown complete");

    result
}

async fn run(command: Command, optimizer: &Optimizer) -> Result<ExitCode> {
    if command.requires_admission() {
        let matches = optimizer.scan().await;
        if !matches.is_empty() {
            tracing::warn!("Refusing to run: {} security product(s) detected", matches.len());
            eprintln!("{}", admission_warning(&matches));
            return Ok(ExitCode::FAILURE);
        }
    }

    match command {
        Command::Scan => {
            let matches = optimizer.scan().await;
            if matches.is_empty() {
                println!("No third-party endpoint security detected");
            } else {
                println!("{}", admission_warning(&matches));
            }
        }

        Command::List { tier } => {
            for def in optimizer
                .catalog()
                .iter()
                .filter(|def| tier.is_none_or(|tier| def.tier == tier))
            {
                let mut flags = Vec::new();
                if def.requires_reboot {
                    flags.push("reboot");
                }
                if !def.has_inverse() {
                    flags.push("one-shot");
                }
                let flags = if flags.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", flags.join(", "))
                };
                println!("[{}] {} - {}{}", def.tier, def.id, def.name, flags);
                println!("      {}", def.summary);
            }
        }

        Command::Apply {
            tier,
            select,
            select_all,
            select_all_basic,
        } => {
            let mut selection = if select_all {
                Selection::all_advanced()
            } else {
                Selection::new()
            };
            if select_all_basic {
                selection.select_all_in(Tier::Basic);
            }
            for id in select {
                selection.select(id);
            }

            let report = optimizer.apply(tier, &selection).await?;
            println!("Applied {} tweak(s) at tier {}:", report.applied.len(), tier);
            for name in &report.applied {
                let marker = if report.partially_failed.contains(name) {
                    " (with errors)"
                } else {
                    ""
                };
                println!("  * {}{}", name, marker);
            }

            // Keep the process alive until the registry backup is on disk
            if let Some(artifact) = optimizer.settle().await?.or(report.backup) {
                println!("Registry backup: {}", artifact.path);
            } else {
                println!("Registry backup failed, see the log for details");
            }
            if report.requires_reboot {
                println!("Restart the computer to complete the changes");
            }
        }

        Command::Restore => {
            let report = optimizer.restore_all().await?;
            for name in &report.restored {
                println!("Restored {}", name);
            }
            for id in &report.missing_inverse {
                println!("No inverse for {}, covered by the baseline reset", id);
            }
            println!("Reset {} baseline group(s)", report.baseline.len());
        }

        Command::Backup => {
            let artifact = optimizer.backup_now().await?;
            println!("Registry backup: {}", artifact.path);
        }

        Command::RestorePoint => {
            if !optimizer.create_restore_point().await {
                eprintln!("Could not create a system restore point");
                return Ok(ExitCode::FAILURE);
            }
            println!("System restore point created");
        }

        Command::VerifyDomain => {
            let report = optimizer.verify_domain_trust().await?;
            println!("{}", report.text);
            println!("Saved to {}", report.path);
        }
    }

    Ok(ExitCode::SUCCESS)
}
