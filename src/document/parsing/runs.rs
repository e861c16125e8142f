//! Run text decoding
//!
//! Linearizes the content of one paragraph into a string, honoring the
//! WordprocessingML markers for line breaks, tabs and hyphenation.

use super::super::cleanup::normalize;

/// What a run-level element contributes to the paragraph text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunMarker {
    Hyphen,
    LineBreak,
    Tab,
}

impl RunMarker {
    /// Map a qualified element name to its marker, if it is one
    pub(crate) fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"w:noBreakHyphen" | b"w:softHyphen" => Some(RunMarker::Hyphen),
            b"w:br" | b"w:cr" => Some(RunMarker::LineBreak),
            b"w:tab" => Some(RunMarker::Tab),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            RunMarker::Hyphen => '-',
            RunMarker::LineBreak => '\n',
            RunMarker::Tab => '\t',
        }
    }
}

/// Accumulates raw paragraph text in document order
#[derive(Debug, Default)]
pub(crate) struct RunText {
    raw: String,
}

impl RunText {
    pub(crate) fn push_text(&mut self, text: &str) {
        self.raw.push_str(text);
    }

    pub(crate) fn push_marker(&mut self, marker: RunMarker) {
        self.raw.push(marker.as_char());
    }

    /// Substitutions are already applied, so normalization sees real hyphens
    /// and breaks before the result is trimmed.
    pub(crate) fn finish(self) -> String {
        normalize(&self.raw).trim().to_string()
    }
}
