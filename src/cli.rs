//! Command-line interface for cvsift.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::batch::{BatchOptions, CancellationFlag, run_batch};
use crate::compare::compare;
use crate::config::Config;
use crate::document::extract_path;
use crate::validate::validate_value;

/// cvsift - Extract CV structure from .docx files and verify round trips.
#[derive(Parser)]
#[command(name = "cvsift")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: <config dir>/cvsift/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log more detail; repeat for more
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract the structured record of one document as JSON.
    Extract {
        /// Input .docx file
        input: PathBuf,

        /// Write the record here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Structurally compare two records (.docx or .json).
    Compare {
        left: PathBuf,
        right: PathBuf,

        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a record (.docx or .json) for structural errors and warnings.
    Validate { input: PathBuf },
    /// Extract many documents concurrently into an output directory.
    Batch {
        /// Input .docx files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (default from config)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Number of concurrent workers (default from config)
        #[arg(short, long)]
        workers: Option<usize>,
    },
    /// Write a default config file.
    InitConfig {
        /// Target path (default: <config dir>/cvsift/config.toml)
        path: Option<PathBuf>,
    },
}

/// Default log filter for a `--verbose` count
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Run the CLI.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Extract {
            input,
            output,
            pretty,
        } => extract_command(&input, output.as_deref(), pretty || config.output.pretty),
        Commands::Compare { left, right, json } => compare_command(&left, &right, json),
        Commands::Validate { input } => validate_command(&input),
        Commands::Batch {
            inputs,
            output_dir,
            workers,
        } => {
            let mut options = BatchOptions::from(&config);
            if let Some(output_dir) = output_dir {
                options.output_dir = output_dir;
            }
            if let Some(workers) = workers {
                options.workers = workers;
            }
            batch_command(inputs, options).await
        }
        Commands::InitConfig { path } => {
            let path = Config::init_default(path.as_deref())?;
            println!("Wrote {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Read a record from a .docx (by extraction) or a JSON file
fn load_record(path: &Path) -> Result<Value> {
    let is_docx = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"));

    if is_docx {
        let record = extract_path(path)?;
        return Ok(serde_json::to_value(record)?);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn extract_command(input: &Path, output: Option<&Path>, pretty: bool) -> Result<ExitCode> {
    let record = extract_path(input)?;
    let json = if pretty {
        serde_json::to_string_pretty(&record)?
    } else {
        serde_json::to_string(&record)?
    };

    match output {
        Some(output) => {
            std::fs::write(output, json)
                .with_context(|| format!("Failed to write {}", output.display()))?;
        }
        None => println!("{json}"),
    }
    Ok(ExitCode::SUCCESS)
}

fn compare_command(left: &Path, right: &Path, json: bool) -> Result<ExitCode> {
    let comparison = compare(&load_record(left)?, &load_record(right)?);

    if json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else if comparison.ok {
        println!("OK");
    } else {
        for finding in &comparison.findings {
            println!("{finding}");
        }
    }

    Ok(if comparison.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn validate_command(input: &Path) -> Result<ExitCode> {
    let report = validate_value(&load_record(input)?);

    for error in &report.errors {
        println!("error: {error}");
    }
    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    if report.errors.is_empty() && report.warnings.is_empty() {
        println!("OK");
    }

    Ok(if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn batch_command(inputs: Vec<PathBuf>, options: BatchOptions) -> Result<ExitCode> {
    let cancel = CancellationFlag::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, finishing documents already started");
            on_interrupt.cancel();
        }
    });

    let sink = Arc::new(Mutex::new(std::io::stdout()));
    let summary = run_batch(inputs, options, sink, cancel).await?;

    eprintln!(
        "{} extracted, {} failed, {} skipped",
        summary.succeeded(),
        summary.failed(),
        summary.skipped()
    );

    Ok(if summary.failed() == 0 && summary.skipped() == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
