//! Rendering and tailoring seams, and round-trip verification
//!
//! The templating engine and the text-generation service live outside this
//! crate. They are reached through [`Renderer`] and [`Tailor`]; round-trip
//! verification renders a record, re-extracts the produced document and
//! compares the two records.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::compare::{Comparison, compare_records};
use crate::document::{CvRecord, extract_path};

/// Turns a record into a document using a template
pub trait Renderer {
    /// Render `record` with `template` into `output` and return the path of
    /// the written document
    fn render(&self, record: &CvRecord, template: &Path, output: &Path) -> Result<PathBuf>;
}

/// Rewrites record content, e.g. through a text-generation service
pub trait Tailor {
    fn tailor(&self, record: &CvRecord) -> Result<CvRecord>;
}

/// Tailor that returns the record unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTailor;

impl Tailor for IdentityTailor {
    fn tailor(&self, record: &CvRecord) -> Result<CvRecord> {
        Ok(record.clone())
    }
}

/// Render `record`, extract the result again and compare both records
pub fn verify_round_trip<R: Renderer + ?Sized>(
    record: &CvRecord,
    renderer: &R,
    template: &Path,
    output: &Path,
) -> Result<Comparison> {
    let rendered = renderer
        .render(record, template, output)
        .with_context(|| format!("Failed to render {}", output.display()))?;
    let reextracted = extract_path(&rendered)?;

    let comparison = compare_records(record, &reextracted);
    if comparison.ok {
        tracing::debug!(path = %rendered.display(), "Round trip preserved the record");
    } else {
        tracing::warn!(
            path = %rendered.display(),
            findings = comparison.findings.len(),
            "Round trip changed the record"
        );
    }
    Ok(comparison)
}
