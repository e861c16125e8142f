//! Core data structures for CV representation
//!
//! This module defines the public record types produced by extraction and
//! consumed by rendering, validation and round-trip comparison.

use serde::{Deserialize, Serialize};

/// Keys of the sidebar, in the order they are serialized.
pub const SIDEBAR_KEYS: [SidebarKey; 7] = [
    SidebarKey::Skills,
    SidebarKey::Languages,
    SidebarKey::Tools,
    SidebarKey::Certifications,
    SidebarKey::Industries,
    SidebarKey::SpokenLanguages,
    SidebarKey::AcademicBackground,
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub title: String,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
}

impl Identity {
    /// Build an identity, splitting `full_name` into first token and remainder
    pub fn new(title: impl Into<String>, full_name: impl Into<String>) -> Self {
        let title = title.into();
        let full_name = full_name.into();
        let mut tokens = full_name.split_whitespace();
        let first_name = tokens.next().unwrap_or_default().to_string();
        let last_name = tokens.collect::<Vec<_>>().join(" ");

        Identity {
            title,
            full_name,
            first_name,
            last_name,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.full_name.is_empty()
            && self.first_name.is_empty()
            && self.last_name.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SidebarKey {
    Skills,
    Languages,
    Tools,
    Certifications,
    Industries,
    SpokenLanguages,
    AcademicBackground,
}

impl SidebarKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SidebarKey::Skills => "skills",
            SidebarKey::Languages => "languages",
            SidebarKey::Tools => "tools",
            SidebarKey::Certifications => "certifications",
            SidebarKey::Industries => "industries",
            SidebarKey::SpokenLanguages => "spoken_languages",
            SidebarKey::AcademicBackground => "academic_background",
        }
    }
}

/// Sidebar lists from the page header, one per [`SidebarKey`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarSections {
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub tools: Vec<String>,
    pub certifications: Vec<String>,
    pub industries: Vec<String>,
    pub spoken_languages: Vec<String>,
    pub academic_background: Vec<String>,
}

impl SidebarSections {
    pub fn get(&self, key: SidebarKey) -> &[String] {
        match key {
            SidebarKey::Skills => &self.skills,
            SidebarKey::Languages => &self.languages,
            SidebarKey::Tools => &self.tools,
            SidebarKey::Certifications => &self.certifications,
            SidebarKey::Industries => &self.industries,
            SidebarKey::SpokenLanguages => &self.spoken_languages,
            SidebarKey::AcademicBackground => &self.academic_background,
        }
    }

    pub(crate) fn get_mut(&mut self, key: SidebarKey) -> &mut Vec<String> {
        match key {
            SidebarKey::Skills => &mut self.skills,
            SidebarKey::Languages => &mut self.languages,
            SidebarKey::Tools => &mut self.tools,
            SidebarKey::Certifications => &mut self.certifications,
            SidebarKey::Industries => &mut self.industries,
            SidebarKey::SpokenLanguages => &mut self.spoken_languages,
            SidebarKey::AcademicBackground => &mut self.academic_background,
        }
    }

    pub fn is_empty(&self) -> bool {
        SIDEBAR_KEYS.iter().all(|key| self.get(*key).is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub heading: String,
    pub description: String,
    pub bullets: Vec<String>,
    /// `None` when the entry carried no `Environment:` line
    pub environment: Option<Vec<String>>,
}

/// Accumulates one experience entry while the body is streamed
#[derive(Debug, Default)]
pub struct ExperienceBuilder {
    heading: String,
    description: Vec<String>,
    bullets: Vec<String>,
    environment: Vec<String>,
}

impl ExperienceBuilder {
    pub fn new(heading: impl Into<String>) -> Self {
        ExperienceBuilder {
            heading: heading.into(),
            ..Default::default()
        }
    }

    pub fn push_description(&mut self, fragment: impl Into<String>) {
        self.description.push(fragment.into());
    }

    pub fn push_bullet(&mut self, bullet: impl Into<String>) {
        self.bullets.push(bullet.into());
    }

    pub fn extend_environment<I>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.environment.extend(tokens);
    }

    pub fn finalize(self) -> ExperienceEntry {
        ExperienceEntry {
            heading: self.heading,
            description: self.description.join(" "),
            bullets: self.bullets,
            environment: if self.environment.is_empty() {
                None
            } else {
                Some(self.environment)
            },
        }
    }
}

/// The unit exchanged between extraction, rendering and verification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvRecord {
    pub identity: Identity,
    pub sidebar: SidebarSections,
    pub overview: String,
    pub experiences: Vec<ExperienceEntry>,
}

/// One physical paragraph as decoded from a document part
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    pub is_bullet: bool,
    pub style: String,
    /// Paragraph lives inside floating text-box content
    pub in_text_box: bool,
}

impl Paragraph {
    pub fn plain(text: impl Into<String>) -> Self {
        Paragraph {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bullet(text: impl Into<String>) -> Self {
        Paragraph {
            text: text.into(),
            is_bullet: true,
            ..Default::default()
        }
    }

    pub fn styled(text: impl Into<String>, style: impl Into<String>) -> Self {
        Paragraph {
            text: text.into(),
            style: style.into(),
            ..Default::default()
        }
    }
}
