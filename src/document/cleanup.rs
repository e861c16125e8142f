//! Text normalization utilities
//!
//! `normalize` keeps the paragraph's line structure (newlines and tabs) and is
//! applied before classification. `clean_text` flattens to a single line and is
//! applied to the final string fields.

use once_cell::sync::Lazy;
use regex::Regex;

const NBSP: char = '\u{00A0}';
const SOFT_HYPHEN: char = '\u{00AD}';

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Canonicalize decoded text while preserving line breaks and tabs
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            NBSP => out.push(' '),
            SOFT_HYPHEN => out.push('-'),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }

    out
}

/// Normalize, collapse every whitespace run to one space and trim
pub fn clean_text(text: &str) -> String {
    let normalized = normalize(text);
    WHITESPACE_RUN
        .replace_all(&normalized, " ")
        .trim()
        .to_string()
}

/// Valid XML 1.0 character ranges
pub(crate) fn is_xml_char(c: char) -> bool {
    matches!(
        c as u32,
        0x9 | 0xA | 0xD | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
    )
}

/// Upper-cased text with punctuation removed and spaces collapsed
pub(crate) fn heading_key(text: &str) -> String {
    let stripped: String = clean_text(text)
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Append `item` unless an identical string is already present
pub(crate) fn push_unique(items: &mut Vec<String>, item: String) {
    if !items.contains(&item) {
        items.push(item);
    }
}
