//! Record assembly
//!
//! This module contains `extract()`, which coordinates the part reader, the
//! body sectioner and the header splitter to turn a document container into a
//! [`CvRecord`].

use std::collections::HashSet;
use std::path::Path;

use super::io::{Package, XmlPart};
use super::models::*;
use super::parsing::body::section_body;
use super::parsing::header::split_header;
use super::parsing::part::read_paragraphs;
use crate::error::Result;

/// Extract the structured record from an already opened container
///
/// This function:
/// 1. Streams the body part into paragraphs and sections them
/// 2. Collects the header lines, preferring text-box content per part
/// 3. Splits header lines into identity and sidebar sections
pub fn extract(package: &Package) -> CvRecord {
    let body_paragraphs = read_paragraphs(&package.body.name, &package.body.xml);
    let body = section_body(&body_paragraphs);

    let header_lines = collect_header_lines(&package.headers);
    let header = split_header(&header_lines);

    tracing::debug!(
        path = %package.path.display(),
        paragraphs = body_paragraphs.len(),
        header_lines = header_lines.len(),
        experiences = body.experiences.len(),
        "Extracted record"
    );

    CvRecord {
        identity: header.identity,
        sidebar: header.sidebar,
        overview: body.overview,
        experiences: body.experiences,
    }
}

/// Open a .docx file and extract its record
pub fn extract_path(path: &Path) -> Result<CvRecord> {
    let package = Package::open(path)?;
    Ok(extract(&package))
}

/// Header paragraphs, split into lines, across all header parts
///
/// Per part, text-box paragraphs are used when they carry any text, direct
/// paragraphs otherwise. A line already contributed by an earlier part is
/// skipped; repeats inside one part are kept.
pub(crate) fn collect_header_lines(parts: &[XmlPart]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut seen_in_earlier_parts: HashSet<String> = HashSet::new();

    for part in parts {
        let paragraphs = read_paragraphs(&part.name, &part.xml);
        let part_lines = preferred_lines(&paragraphs);

        lines.extend(
            part_lines
                .iter()
                .filter(|line| !seen_in_earlier_parts.contains(*line))
                .cloned(),
        );
        seen_in_earlier_parts.extend(part_lines);
    }

    lines
}

fn preferred_lines(paragraphs: &[Paragraph]) -> Vec<String> {
    let text_box = paragraph_lines(paragraphs.iter().filter(|p| p.in_text_box));
    if !text_box.is_empty() {
        return text_box;
    }
    paragraph_lines(paragraphs.iter().filter(|p| !p.in_text_box))
}

fn paragraph_lines<'a>(paragraphs: impl Iterator<Item = &'a Paragraph>) -> Vec<String> {
    paragraphs
        .flat_map(|p| p.text.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
