//! Paragraph classification
//!
//! Projects paragraph properties onto a style name and bullet flag, and
//! computes the closed [`ParagraphKind`] the body sectioner dispatches on.

use once_cell::sync::Lazy;
use regex::Regex;

use super::super::cleanup::{clean_text, heading_key};
use super::super::models::Paragraph;

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

// "Jan 2020 - Present", "March 2018 – Sept. 2019", "Feb 2021 -- Now"
static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    let month_year = format!(r"\b{MONTH}\.?\s+\d{{4}}\b");
    Regex::new(&format!(
        r"(?i){month_year}\s*(?:--|-|–|—)\s*(?:{month_year}|\b(?:present|now|current)\b)"
    ))
    .unwrap()
});

static ENVIRONMENT_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)^\s*environment\s*:(.*)$").unwrap());

static BULLET_GLYPH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[•▪●◦‣·]\s*|[-*–]\s+)").unwrap());

/// Formatting properties read from `w:pPr`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ParagraphProperties {
    pub(crate) style: Option<String>,
    pub(crate) has_numbering: bool,
}

/// Named style value, or an empty string
pub(crate) fn style(props: &ParagraphProperties) -> String {
    props.style.clone().unwrap_or_default()
}

/// True for list-numbered paragraphs and list-like style names
pub(crate) fn is_bullet(props: &ParagraphProperties) -> bool {
    if props.has_numbering {
        return true;
    }

    let style = style(props).to_lowercase();
    style.contains("list") || style.contains("bullet") || style.contains("number")
}

/// Body section introduced by a marker paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySection {
    Overview,
    Experience,
}

/// What a body paragraph means to the sectioner, in precedence order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParagraphKind {
    Empty,
    SectionMarker(BodySection),
    DateHeading,
    StyledHeading,
    Environment(Vec<String>),
    Bullet,
    Plain,
}

/// Classify a paragraph once; the date pattern wins over the heading style
pub fn classify(paragraph: &Paragraph) -> ParagraphKind {
    let text = paragraph.text.trim();
    if clean_text(text).is_empty() {
        return ParagraphKind::Empty;
    }

    match heading_key(text).as_str() {
        "OVERVIEW" => return ParagraphKind::SectionMarker(BodySection::Overview),
        "PROFESSIONAL EXPERIENCE" => {
            return ParagraphKind::SectionMarker(BodySection::Experience);
        }
        _ => {}
    }

    if is_date_range_heading(text) {
        return ParagraphKind::DateHeading;
    }

    if paragraph.style.to_lowercase().starts_with("heading") && !paragraph.is_bullet {
        return ParagraphKind::StyledHeading;
    }

    if let Some(tokens) = environment_tokens(text) {
        return ParagraphKind::Environment(tokens);
    }

    if paragraph.is_bullet {
        ParagraphKind::Bullet
    } else {
        ParagraphKind::Plain
    }
}

pub fn is_date_range_heading(text: &str) -> bool {
    DATE_RANGE.is_match(text)
}

/// Comma-split, cleaned tokens of an `Environment:` line
pub fn environment_tokens(text: &str) -> Option<Vec<String>> {
    let captures = ENVIRONMENT_LABEL.captures(text)?;
    let tokens = captures
        .get(1)
        .map(|m| m.as_str())
        .unwrap_or_default()
        .split(',')
        .map(clean_text)
        .filter(|token| !token.is_empty())
        .collect();
    Some(tokens)
}

/// Drop one leading literal bullet glyph and the whitespace after it
pub(crate) fn strip_bullet_glyph(text: &str) -> String {
    BULLET_GLYPH.replace(text, "").trim().to_string()
}
