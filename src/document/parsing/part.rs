//! Streaming paragraph extraction from one XML part
//!
//! Reads `word/document.xml` or a `word/headerN.xml` part event by event and
//! yields one [`Paragraph`] per `w:p`, in document order. Text-box paragraphs
//! nested inside an anchoring paragraph are emitted separately and flagged.

use once_cell::sync::Lazy;
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, BytesText, Event};
use regex::{Captures, Regex};

use super::super::models::Paragraph;
use super::paragraph::{ParagraphProperties, is_bullet, style};
use super::runs::{RunMarker, RunText};

static ENTITY_REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"&[^&;\s]*;").unwrap());

/// One open `w:p` while its subtree is being read
#[derive(Debug, Default)]
struct ParagraphFrame {
    slot: usize,
    text: RunText,
    props: ParagraphProperties,
    props_depth: usize,
    in_text: bool,
    in_text_box: bool,
}

impl ParagraphFrame {
    fn finish(self) -> Paragraph {
        Paragraph {
            text: self.text.finish(),
            is_bullet: is_bullet(&self.props),
            style: style(&self.props),
            in_text_box: self.in_text_box,
        }
    }
}

#[derive(Debug, Default)]
struct PartReader {
    paragraphs: Vec<Paragraph>,
    frames: Vec<ParagraphFrame>,
    text_box_depth: usize,
    fallback_depth: usize,
}

impl PartReader {
    fn open(&mut self, element: &BytesStart, is_empty: bool) {
        let name = element.name();
        let name = name.as_ref();

        if name == b"mc:Fallback" {
            if !is_empty {
                self.fallback_depth += 1;
            }
            return;
        }
        if self.fallback_depth > 0 {
            return;
        }

        match name {
            b"w:p" => {
                if !is_empty {
                    self.paragraphs.push(Paragraph::default());
                    self.frames.push(ParagraphFrame {
                        slot: self.paragraphs.len() - 1,
                        in_text_box: self.text_box_depth > 0,
                        ..Default::default()
                    });
                }
            }
            b"w:txbxContent" if !is_empty => self.text_box_depth += 1,
            _ => {
                let Some(frame) = self.frames.last_mut() else {
                    return;
                };

                if frame.props_depth > 0 {
                    match name {
                        b"w:pStyle" => frame.props.style = attribute_value(element, b"w:val"),
                        b"w:numPr" => frame.props.has_numbering = true,
                        b"w:pPr" if !is_empty => frame.props_depth += 1,
                        _ => {}
                    }
                    return;
                }

                match name {
                    b"w:pPr" if !is_empty => frame.props_depth += 1,
                    b"w:t" if !is_empty => frame.in_text = true,
                    _ => {
                        if let Some(marker) = RunMarker::from_name(name) {
                            frame.text.push_marker(marker);
                        }
                    }
                }
            }
        }
    }

    fn close(&mut self, name: &[u8]) {
        if name == b"mc:Fallback" {
            self.fallback_depth = self.fallback_depth.saturating_sub(1);
            return;
        }
        if self.fallback_depth > 0 {
            return;
        }

        match name {
            b"w:p" => {
                // Unbalanced end tags are tolerated, a stray `</w:p>` is dropped
                if let Some(frame) = self.frames.pop() {
                    self.store(frame);
                }
            }
            b"w:txbxContent" => self.text_box_depth = self.text_box_depth.saturating_sub(1),
            b"w:pPr" => {
                if let Some(frame) = self.frames.last_mut() {
                    frame.props_depth = frame.props_depth.saturating_sub(1);
                }
            }
            b"w:t" => {
                if let Some(frame) = self.frames.last_mut() {
                    frame.in_text = false;
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.fallback_depth > 0 {
            return;
        }
        if let Some(frame) = self.frames.last_mut().filter(|frame| frame.in_text) {
            frame.text.push_text(text);
        }
    }

    fn store(&mut self, frame: ParagraphFrame) {
        let slot = frame.slot;
        self.paragraphs[slot] = frame.finish();
    }

    fn finish(mut self) -> Vec<Paragraph> {
        while let Some(frame) = self.frames.pop() {
            self.store(frame);
        }
        self.paragraphs
    }
}

fn attribute_value(element: &BytesStart, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

/// Unescaped text; a reference that cannot be resolved is kept literally
/// while the others in the same node are still decoded
fn decode_text(text: &BytesText) -> String {
    if let Ok(decoded) = text.unescape() {
        return decoded.into_owned();
    }

    let raw = String::from_utf8_lossy(text);
    ENTITY_REFERENCE
        .replace_all(&raw, |caps: &Captures| {
            let reference = &caps[0];
            match unescape(reference) {
                Ok(decoded) => decoded.into_owned(),
                Err(_) => reference.to_string(),
            }
        })
        .into_owned()
}

/// Decode every paragraph of one part, recovering from malformed XML
///
/// A reader error ends the part at that point; paragraphs read so far, and any
/// still open, are kept.
pub(crate) fn read_paragraphs(part_name: &str, xml: &str) -> Vec<Paragraph> {
    let mut reader = Reader::from_str(xml.strip_prefix('\u{FEFF}').unwrap_or(xml));
    reader.config_mut().trim_text(false);
    reader.config_mut().check_end_names = false;

    let mut state = PartReader::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => state.open(e, false),
            Ok(Event::Empty(ref e)) => state.open(e, true),
            Ok(Event::End(ref e)) => state.close(e.name().as_ref()),
            Ok(Event::Text(ref e)) => state.text(&decode_text(e)),
            Ok(Event::CData(ref e)) => state.text(&String::from_utf8_lossy(e)),
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::warn!(
                    part = part_name,
                    position = reader.buffer_position(),
                    error = %e,
                    "Malformed XML, keeping paragraphs read so far"
                );
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    let paragraphs = state.finish();
    tracing::debug!(part = part_name, paragraphs = paragraphs.len(), "Read part");
    paragraphs
}
