//! MEP Traversability - command-line entry point
//!
//! Loads a scene and the AR/KR settings, checks one curve element in both
//! contexts and reports the verdicts.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use mep_traversability::core::config::CheckConfig;
use mep_traversability::core::error::Result;
use mep_traversability::core::types::ElementId;
use mep_traversability::geometry::BoxKernel;
use mep_traversability::host::{JournalTransactions, Messenger};
use mep_traversability::model::load_context;
use mep_traversability::traversability::{run_checks, VerdictStatus, WorkflowOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Check whether a duct or pipe can be routed without collisions
#[derive(Parser, Debug)]
#[command(name = "mep-traverse")]
#[command(about = "Check an MEP curve against AR and KR models and correct simple collisions")]
struct Args {
    /// Scene file (JSON) with the active document and its links
    #[arg(long)]
    model: PathBuf,

    /// Settings file (TOML); built-in defaults when omitted
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Id of the curve element in the active document
    #[arg(long)]
    element: u64,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Prints user-facing failures to stderr
struct StderrMessenger;

impl Messenger for StderrMessenger {
    fn show_failure(&self, title: &str, message: &str) {
        eprintln!("{}: {}", title, message);
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_directive = if args.verbose {
        "mep_traversability=debug"
    } else {
        "mep_traversability=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(outcome) if outcome.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<WorkflowOutcome> {
    let config = match &args.settings {
        Some(path) => CheckConfig::load(path)?,
        None => CheckConfig::default(),
    };
    let mut context = load_context(&args.model)?;
    let transactions = JournalTransactions::new();

    let outcome = run_checks(
        &mut context,
        ElementId(args.element),
        &BoxKernel,
        &config,
        &transactions,
        &StderrMessenger,
    )?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Text => print_text(&outcome, &config),
    }

    Ok(outcome)
}

fn print_text(outcome: &WorkflowOutcome, config: &CheckConfig) {
    for verdict in &outcome.verdicts {
        match &verdict.status {
            VerdictStatus::Passed => println!("{}: curve {} passed", verdict.context, verdict.curve),
            VerdictStatus::Corrected {
                displacement,
                moved,
            } => {
                let moved: Vec<String> = moved.iter().map(ToString::to_string).collect();
                let d = *displacement * config.units.to_display(1.0);
                println!(
                    "{}: curve {} corrected, moved {} by ({:.1}, {:.1}, {:.1})",
                    verdict.context,
                    verdict.curve,
                    moved.join(", "),
                    d.x,
                    d.y,
                    d.z
                );
            }
            VerdictStatus::Blocked => {
                println!(
                    "{}: curve {} blocked by {} elements",
                    verdict.context,
                    verdict.curve,
                    verdict.collisions.len()
                );
                for collision in &verdict.collisions {
                    println!(
                        "  {} {} in {} (depth {:.1})",
                        collision.candidate.category,
                        collision.candidate.id,
                        collision.candidate.source,
                        config.units.to_display(collision.overlap.depth)
                    );
                }
            }
        }
    }

    if let Some(kind) = outcome.failed_context() {
        println!("Aborted after {} check", kind);
    }
}
