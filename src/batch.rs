//! Batch extraction
//!
//! Runs extraction over many documents with a fixed number of workers, one
//! document per task. Tasks share only the output directory tree and the
//! report sink; each task writes its report lines in one locked block.

use anyhow::Result;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tokio::task::JoinError;

use crate::config::Config;
use crate::document::extract_path;

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub workers: usize,
    pub output_dir: PathBuf,
    pub pretty: bool,
}

impl From<&Config> for BatchOptions {
    fn from(config: &Config) -> Self {
        BatchOptions {
            workers: config.batch.workers,
            output_dir: config.batch.output_dir.clone(),
            pretty: config.output.pretty,
        }
    }
}

/// Stops scheduling further documents; a document already running completes
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    Extracted { output: PathBuf, valid: bool },
    Failed { error: String },
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOutcome {
    pub input: PathBuf,
    pub status: DocumentStatus,
}

impl DocumentOutcome {
    fn skipped(input: PathBuf) -> Self {
        DocumentOutcome {
            input,
            status: DocumentStatus::Skipped,
        }
    }
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    /// One outcome per input, in input order
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.count(|status| matches!(status, DocumentStatus::Extracted { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|status| matches!(status, DocumentStatus::Failed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|status| matches!(status, DocumentStatus::Skipped))
    }

    fn count(&self, predicate: impl Fn(&DocumentStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(&o.status)).count()
    }
}

/// Create `path` and its parents; succeeds when it already exists, including
/// when another worker creates it concurrently
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(path)
}

/// Longest directory prefix shared by the parents of every input
pub fn common_root(inputs: &[PathBuf]) -> PathBuf {
    let mut parents = inputs
        .iter()
        .map(|input| input.parent().unwrap_or(Path::new("")));
    let Some(first) = parents.next() else {
        return PathBuf::new();
    };

    let mut root: Vec<Component> = first.components().collect();
    for parent in parents {
        let shared = root
            .iter()
            .zip(parent.components())
            .take_while(|(a, b)| *a == b)
            .count();
        root.truncate(shared);
    }
    root.iter().collect()
}

/// `<output_dir>/<input dir relative to root>/<input stem>.json`
///
/// Only plain directory names are mirrored, so the result always stays
/// inside `output_dir`.
pub fn output_path(output_dir: &Path, root: &Path, input: &Path) -> PathBuf {
    let relative = input.strip_prefix(root).unwrap_or(input);
    let mut output = output_dir.to_path_buf();
    if let Some(parent) = relative.parent() {
        output.extend(parent.components().filter_map(|component| match component {
            Component::Normal(name) => Some(name),
            _ => None,
        }));
    }

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    output.join(format!("{stem}.json"))
}

/// Extract, validate and write one document, returning its report lines
fn process_document(
    input: &Path,
    output: PathBuf,
    options: &BatchOptions,
) -> (DocumentStatus, Vec<String>) {
    let mut lines = Vec::new();

    let record = match extract_path(input) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(path = %input.display(), error = %e, "Extraction failed");
            lines.push(format!("FAILED {}: {e}", input.display()));
            return (DocumentStatus::Failed { error: e.to_string() }, lines);
        }
    };

    let output_dir = output.parent().unwrap_or(&options.output_dir);
    let written = ensure_dir(output_dir)
        .map_err(anyhow::Error::from)
        .and_then(|()| {
            let json = if options.pretty {
                serde_json::to_string_pretty(&record)?
            } else {
                serde_json::to_string(&record)?
            };
            std::fs::write(&output, json)?;
            Ok(())
        });
    if let Err(e) = written {
        lines.push(format!("FAILED {}: {e}", input.display()));
        return (DocumentStatus::Failed { error: e.to_string() }, lines);
    }

    let report = record.validate();
    lines.push(format!("OK {} -> {}", input.display(), output.display()));
    lines.extend(report.errors.iter().map(|e| format!("  error: {e}")));
    lines.extend(report.warnings.iter().map(|w| format!("  warning: {w}")));

    let status = DocumentStatus::Extracted {
        output,
        valid: report.is_valid(),
    };
    (status, lines)
}

/// Write one task's lines as a single uninterrupted block
fn write_report<W: Write>(sink: &Mutex<W>, lines: &[String]) {
    let mut sink = match sink.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    for line in lines {
        if let Err(e) = writeln!(sink, "{line}") {
            tracing::warn!(error = %e, "Failed to write batch report");
            return;
        }
    }
    let _ = sink.flush();
}

/// Outcome of a finished task; a task that panicked fails only its document
fn joined<W: Write>(
    input: PathBuf,
    result: std::result::Result<DocumentOutcome, JoinError>,
    sink: &Mutex<W>,
) -> DocumentOutcome {
    match result {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(path = %input.display(), error = %e, "Document task failed");
            write_report(sink, &[format!("FAILED {}: {e}", input.display())]);
            DocumentOutcome {
                input,
                status: DocumentStatus::Failed {
                    error: e.to_string(),
                },
            }
        }
    }
}

enum Scheduled {
    Running(PathBuf, tokio::task::JoinHandle<DocumentOutcome>),
    Done(DocumentOutcome),
}

/// Process `inputs` with at most `options.workers` documents in flight
///
/// Outputs mirror the input directories below their common root. An input
/// whose output path is already claimed by an earlier input fails instead of
/// overwriting it.
pub async fn run_batch<W>(
    inputs: Vec<PathBuf>,
    options: BatchOptions,
    sink: Arc<Mutex<W>>,
    cancel: CancellationFlag,
) -> Result<BatchSummary>
where
    W: Write + Send + 'static,
{
    let root = common_root(&inputs);
    let options = Arc::new(options);
    let semaphore = Arc::new(Semaphore::new(options.workers.max(1)));
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut scheduled = Vec::with_capacity(inputs.len());

    for input in inputs {
        if cancel.is_cancelled() {
            scheduled.push(Scheduled::Done(DocumentOutcome::skipped(input)));
            continue;
        }

        let output = output_path(&options.output_dir, &root, &input);
        if let Some(first) = claimed.get(&output) {
            let error = format!(
                "output {} already used by {}",
                output.display(),
                first.display()
            );
            write_report(&sink, &[format!("FAILED {}: {error}", input.display())]);
            scheduled.push(Scheduled::Done(DocumentOutcome {
                input,
                status: DocumentStatus::Failed { error },
            }));
            continue;
        }
        claimed.insert(output.clone(), input.clone());

        let permit = semaphore.clone().acquire_owned().await?;
        // Cancellation may have arrived while waiting for a free worker
        if cancel.is_cancelled() {
            scheduled.push(Scheduled::Done(DocumentOutcome::skipped(input)));
            continue;
        }

        let options = options.clone();
        let sink = sink.clone();
        let task_input = input.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let (status, lines) = process_document(&task_input, output, &options);
            write_report(&sink, &lines);
            DocumentOutcome {
                input: task_input,
                status,
            }
        });
        scheduled.push(Scheduled::Running(input, handle));
    }

    let mut summary = BatchSummary::default();
    for task in scheduled {
        let outcome = match task {
            Scheduled::Running(input, handle) => joined(input, handle.await, &sink),
            Scheduled::Done(outcome) => outcome,
        };
        summary.outcomes.push(outcome);
    }

    tracing::info!(
        succeeded = summary.succeeded(),
        failed = summary.failed(),
        skipped = summary.skipped(),
        "Batch finished"
    );
    Ok(summary)
}
