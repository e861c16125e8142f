//! Body sectioning
//!
//! A three-state machine over the main part's paragraph stream that collects
//! the overview text and the list of experience entries.

use super::super::cleanup::clean_text;
use super::super::models::{ExperienceBuilder, ExperienceEntry, Paragraph};
use super::paragraph::{BodySection, ParagraphKind, classify, strip_bullet_glyph};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum SectionState {
    #[default]
    None,
    Overview,
    Experience,
}

/// Overview and experiences recovered from the body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyOutline {
    pub overview: String,
    pub experiences: Vec<ExperienceEntry>,
}

#[derive(Debug, Default)]
pub struct BodySectioner {
    state: SectionState,
    overview: Vec<String>,
    current: Option<ExperienceBuilder>,
    experiences: Vec<ExperienceEntry>,
}

impl BodySectioner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, paragraph: &Paragraph) {
        let kind = classify(paragraph);

        if let ParagraphKind::SectionMarker(section) = kind {
            self.flush();
            self.state = match section {
                BodySection::Overview => SectionState::Overview,
                BodySection::Experience => SectionState::Experience,
            };
            return;
        }

        match self.state {
            SectionState::None => {}
            SectionState::Overview => match kind {
                ParagraphKind::Plain | ParagraphKind::Bullet | ParagraphKind::Environment(_) => {
                    self.overview.push(clean_text(&paragraph.text));
                }
                // Sub-headings inside the overview are not part of its text
                ParagraphKind::Empty
                | ParagraphKind::SectionMarker(_)
                | ParagraphKind::DateHeading
                | ParagraphKind::StyledHeading => {}
            },
            SectionState::Experience => self.feed_experience(paragraph, kind),
        }
    }

    fn feed_experience(&mut self, paragraph: &Paragraph, kind: ParagraphKind) {
        match kind {
            ParagraphKind::Empty | ParagraphKind::SectionMarker(_) => {}
            ParagraphKind::DateHeading | ParagraphKind::StyledHeading => {
                self.flush();
                self.current = Some(ExperienceBuilder::new(clean_text(&paragraph.text)));
            }
            ParagraphKind::Environment(tokens) => self.entry().extend_environment(tokens),
            ParagraphKind::Bullet => {
                let bullet = strip_bullet_glyph(&clean_text(&paragraph.text));
                if !bullet.is_empty() {
                    self.entry().push_bullet(bullet);
                }
            }
            ParagraphKind::Plain => {
                let fragment = clean_text(&paragraph.text);
                self.entry().push_description(fragment);
            }
        }
    }

    /// Current entry, opening a headingless one if content precedes any heading
    fn entry(&mut self) -> &mut ExperienceBuilder {
        self.current.get_or_insert_with(ExperienceBuilder::default)
    }

    fn flush(&mut self) {
        if let Some(builder) = self.current.take() {
            self.experiences.push(builder.finalize());
        }
    }

    pub fn finish(mut self) -> BodyOutline {
        self.flush();
        BodyOutline {
            overview: self.overview.join(" "),
            experiences: self.experiences,
        }
    }
}

/// Run one sectioner over the whole paragraph stream
pub fn section_body<'a, I>(paragraphs: I) -> BodyOutline
where
    I: IntoIterator<Item = &'a Paragraph>,
{
    let mut sectioner = BodySectioner::new();
    for paragraph in paragraphs {
        sectioner.feed(paragraph);
    }
    sectioner.finish()
}
