//! haul - Command-line interface for the bulk transfer engine.
//!
//! Parses the requested operations, loads the transfer configuration,
//! drives the batch through the engine, and reports the partitioned
//! summary. Confirmation prompts for the cleanup phase go through
//! dialoguer; everything destructive requires explicit consent.

use clap::Parser;
use dialoguer::Confirm;
use engine::{
    resolve_jobs, resolve_plan, run_cleanup, run_jobs, CleanupOutcome, CleanupReport, Confirmer,
    Document, OperationSet, RunSummary,
};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

const MODE_HELP: &str = "\
MODE tokens select the operations to run, as letters that may be packed
together or given separately (order does not matter):
  t    transfer:  copy each source into its destination
  v    validate:  verify each destination faithfully holds its source
  c    cleanup:   after verification, offer guarded deletion of sources

Requesting no mode at all runs the full plan: transfer, validate, cleanup.
Cleanup always re-validates and asks before deleting anything.

The configuration file is either declarative YAML:
  transfers:
    - source: /data/projects
      destination: /archive/projects
  transfer_groups:
    - destination_base: /archive/pool
      preserve_source_name: true   # default
      sources:
        - /data/alpha
        - /data/beta

or a tabular .csv file with a mandatory header row, two comma-separated
columns (source, destination); '#' rows and blank rows are ignored.";

/// haul - Bulk directory transfers with verification and guarded cleanup
#[derive(Parser, Debug)]
#[command(name = "haul")]
#[command(version)]
#[command(about = "Copy directory batches, verify them, and clean up verified sources")]
#[command(after_help = MODE_HELP)]
struct Args {
    /// Operations to run: tokens of the letters t, v, c (e.g. "tc" or "t c")
    #[arg(value_name = "MODE")]
    modes: Vec<String>,

    /// Transfer configuration file (YAML, or tabular .csv)
    #[arg(long, value_name = "PATH", default_value = "haul.yaml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

/// Interactive confirmation through the terminal.
struct ConsolePrompt;

impl Confirmer for ConsolePrompt {
    fn confirm(&self, prompt: &str) -> bool {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let exit_code = match run_cli(&args) {
        Ok(()) => 0,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}

/// Main CLI logic - separated for testability.
///
/// Errors returned here are fatal (usage or configuration); per-job
/// failures are reported in the summary and do not affect the exit code.
fn run_cli(args: &Args) -> Result<(), String> {
    let operations = OperationSet::from_tokens(&args.modes)
        .map_err(|e| format!("{}. Valid letters: t (transfer), v (validate), c (cleanup)", e))?;
    let plan = resolve_plan(operations);

    let document =
        Document::load(&args.config).map_err(|e| format!("Configuration failed: {}", e))?;
    let jobs = resolve_jobs(&document)
        .map_err(|e| format!("{} (configuration: {})", e, args.config.display()))?;

    log::info!(
        "Resolved {} job(s); phases: copy={} verify={} cleanup={}",
        jobs.len(),
        plan.copy,
        plan.verify,
        plan.cleanup_prompt
    );

    let summary = run_jobs(&jobs, plan);
    print_summary(&summary);

    if plan.cleanup_prompt {
        let report = run_cleanup(&summary, &ConsolePrompt);
        print_cleanup(&report);
    }

    Ok(())
}

/// Print the partitioned batch summary.
fn print_summary(summary: &RunSummary) {
    let succeeded = summary.succeeded();
    let failed = summary.failed();

    println!();
    println!(
        "Run finished at {}: {} succeeded, {} failed",
        summary.finished_at.format("%Y-%m-%d %H:%M:%S"),
        succeeded.len(),
        failed.len()
    );

    if !succeeded.is_empty() {
        println!("Succeeded:");
        for outcome in &succeeded {
            println!(
                "  {} -> {}",
                outcome.job.source.display(),
                outcome.job.destination.display()
            );
        }
    }

    if !failed.is_empty() {
        println!("Failed:");
        for outcome in &failed {
            println!(
                "  {} -> {} ({})",
                outcome.job.source.display(),
                outcome.job.destination.display(),
                outcome.failure_phase().unwrap_or("failed")
            );
            let reason = match (&outcome.copy, &outcome.verify) {
                (engine::PhaseResult::Failed(reason), _) => Some(reason),
                (_, engine::PhaseResult::Failed(reason)) => Some(reason),
                _ => None,
            };
            if let Some(reason) = reason {
                for line in reason.lines() {
                    println!("    {}", line);
                }
            }
        }
    }
}

/// Print the cleanup phase results.
fn print_cleanup(report: &CleanupReport) {
    if report.blanket_declined {
        println!("Cleanup skipped; all sources kept.");
        return;
    }
    if report.results.is_empty() {
        return;
    }

    println!("Cleanup: {} source(s) deleted", report.deleted_count());
    for (path, outcome) in &report.results {
        match outcome {
            CleanupOutcome::Deleted => println!("  deleted {}", path.display()),
            CleanupOutcome::Declined => println!("  kept {} (declined)", path.display()),
            CleanupOutcome::RecheckFailed(reason) => {
                println!("  kept {} (re-validation failed)", path.display());
                for line in reason.lines() {
                    println!("    {}", line);
                }
            }
            CleanupOutcome::DeleteFailed(reason) => {
                println!("  failed to delete {}: {}", path.display(), reason)
            }
        }
    }
}
