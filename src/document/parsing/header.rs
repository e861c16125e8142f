//! Header splitting
//!
//! Page headers carry the identity block and the labeled sidebar lists. This
//! module finds the sidebar headings, resolves where the identity lines live
//! and routes every other line to its section.

use std::collections::HashSet;

use super::super::cleanup::{clean_text, push_unique};
use super::super::models::{Identity, SidebarKey, SidebarSections};
use super::sidebar::normalize_sidebar;

/// Identity and sidebar recovered from the headers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderOutline {
    pub identity: Identity,
    pub sidebar: SidebarSections,
}

/// Map a header line to a sidebar section when it is a known heading label
///
/// A trailing period, colon or semicolon is ignored, so "SKILLS." and
/// "Skills:" both match.
pub fn section_label(line: &str) -> Option<SidebarKey> {
    let label = clean_text(line).to_uppercase();
    let label = label.trim_end_matches(['.', ':', ';']).trim_end();

    let key = match label {
        "SKILLS" | "TECHNICAL SKILLS" | "CORE SKILLS" => SidebarKey::Skills,
        "LANGUAGES" | "PROGRAMMING LANGUAGES" => SidebarKey::Languages,
        "TOOLS" | "TOOLS & TECHNOLOGIES" | "TECHNOLOGIES" => SidebarKey::Tools,
        "CERTIFICATIONS" | "CERTIFICATES" => SidebarKey::Certifications,
        "INDUSTRIES" | "INDUSTRY EXPERIENCE" => SidebarKey::Industries,
        "SPOKEN LANGUAGES" => SidebarKey::SpokenLanguages,
        "ACADEMIC BACKGROUND" | "EDUCATION" => SidebarKey::AcademicBackground,
        _ => return None,
    };
    Some(key)
}

/// Where the identity lines were found
#[derive(Debug, Clone, PartialEq, Eq)]
enum IdentityBlock {
    /// Lines before the first sidebar heading
    Leading(Identity),
    /// The last lines after the final heading; `start` is the index of the
    /// first consumed line so the sidebar walk can stop there
    Trailing { identity: Identity, start: usize },
    Missing,
}

impl IdentityBlock {
    fn resolve(lines: &[String], first_heading: usize, last_heading: usize) -> Self {
        let leading = unique_cleaned(&lines[..first_heading]);
        if let Some((title, rest)) = leading.split_first() {
            let full_name = rest
                .iter()
                .map(|(_, line)| line.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            return IdentityBlock::Leading(Identity::new(title.1.clone(), full_name));
        }

        let trailing: Vec<_> = unique_cleaned(&lines[last_heading + 1..])
            .into_iter()
            .map(|(index, line)| (index + last_heading + 1, line))
            .collect();
        match trailing_identity(&trailing) {
            Some((identity, start)) => IdentityBlock::Trailing { identity, start },
            None => IdentityBlock::Missing,
        }
    }
}

/// Trailing identity rule: the last three unique lines are title, first name
/// and last name; with only two, they are title and full name.
fn trailing_identity(lines: &[(usize, String)]) -> Option<(Identity, usize)> {
    match lines {
        [.., (start, title), (_, first), (_, last)] => {
            let identity = Identity {
                title: title.clone(),
                full_name: format!("{first} {last}"),
                first_name: first.clone(),
                last_name: last.clone(),
            };
            Some((identity, *start))
        }
        [(start, title), (_, full_name)] => {
            Some((Identity::new(title.clone(), full_name.clone()), *start))
        }
        _ => None,
    }
}

/// Cleaned, non-empty lines with their index, first occurrence only
fn unique_cleaned(lines: &[String]) -> Vec<(usize, String)> {
    let mut seen = HashSet::new();
    lines
        .iter()
        .enumerate()
        .map(|(index, line)| (index, clean_text(line)))
        .filter(|(_, line)| !line.is_empty() && seen.insert(line.clone()))
        .collect()
}

/// Split the de-duplicated header lines into identity and sidebar sections
pub fn split_header(lines: &[String]) -> HeaderOutline {
    let headings: Vec<(usize, SidebarKey)> = lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| section_label(line).map(|key| (index, key)))
        .collect();

    let (Some(&(first_heading, _)), Some(&(last_heading, _))) = (headings.first(), headings.last())
    else {
        tracing::debug!(lines = lines.len(), "No sidebar headings in header");
        return HeaderOutline::default();
    };

    let block = IdentityBlock::resolve(lines, first_heading, last_heading);
    let (identity, walk_end) = match block {
        IdentityBlock::Leading(identity) => (identity, lines.len()),
        IdentityBlock::Trailing { identity, start } => (identity, start),
        IdentityBlock::Missing => (Identity::default(), lines.len()),
    };

    let mut raw = SidebarSections::default();
    let mut seen = HashSet::new();
    let mut current = None;

    for line in &lines[first_heading..walk_end] {
        if let Some(key) = section_label(line) {
            // A repeated heading closes the section instead of reopening it
            current = if seen.insert(key) { Some(key) } else { None };
            continue;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(key) = current {
            push_unique(raw.get_mut(key), line.to_string());
        }
    }

    HeaderOutline {
        identity,
        sidebar: normalize_sidebar(&raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_section_label_tolerates_trailing_punctuation() {
        assert_eq!(section_label("SKILLS."), Some(SidebarKey::Skills));
        assert_eq!(section_label("Skills:"), Some(SidebarKey::Skills));
        assert_eq!(section_label(" spoken  languages ;"), Some(SidebarKey::SpokenLanguages));
        assert_eq!(section_label("Academic Background"), Some(SidebarKey::AcademicBackground));
        assert_eq!(section_label("Skills and more"), None);
    }

    #[test]
    fn test_no_headings_returns_empty_outline() {
        let outline = split_header(&lines(&["Engineer", "Ada Lovelace", "Python"]));
        assert_eq!(outline, HeaderOutline::default());
    }

    #[test]
    fn test_leading_identity_block() {
        let outline = split_header(&lines(&[
            "Senior Engineer",
            "Ada",
            "Ada",
            "King Lovelace",
            "SKILLS.",
            "Python, Python",
            "AWS  ·  Azure",
            "Tools",
            "git | docker",
        ]));

        assert_eq!(outline.identity.title, "Senior Engineer");
        assert_eq!(outline.identity.full_name, "Ada King Lovelace");
        assert_eq!(outline.identity.first_name, "Ada");
        assert_eq!(outline.identity.last_name, "King Lovelace");
        assert_eq!(outline.sidebar.skills, vec!["Python", "AWS", "Azure"]);
        assert_eq!(outline.sidebar.tools, vec!["git", "docker"]);
    }

    #[test]
    fn test_trailing_identity_with_three_lines() {
        let outline = split_header(&lines(&[
            "SKILLS",
            "Rust",
            "EDUCATION",
            "MSc Computer Science",
            "Staff Engineer",
            "Grace",
            "Hopper",
        ]));

        assert_eq!(
            outline.identity,
            Identity {
                title: "Staff Engineer".into(),
                full_name: "Grace Hopper".into(),
                first_name: "Grace".into(),
                last_name: "Hopper".into(),
            }
        );
        assert_eq!(outline.sidebar.skills, vec!["Rust"]);
        assert_eq!(outline.sidebar.academic_background, vec!["MSc Computer Science"]);
    }

    #[test]
    fn test_trailing_identity_with_two_lines() {
        let outline = split_header(&lines(&["SKILLS", "Staff Engineer", "Grace Brewster Hopper"]));

        assert_eq!(outline.identity.title, "Staff Engineer");
        assert_eq!(outline.identity.first_name, "Grace");
        assert_eq!(outline.identity.last_name, "Brewster Hopper");
        assert!(outline.sidebar.skills.is_empty());
    }

    #[test]
    fn test_repeated_heading_closes_section() {
        let outline = split_header(&lines(&[
            "Engineer",
            "Ada Lovelace",
            "Languages",
            "English",
            "Languages",
            "French",
        ]));

        assert_eq!(outline.sidebar.languages, vec!["English"]);
    }

    #[test]
    fn test_split_is_deterministic() {
        let input = lines(&["Engineer", "Ada Lovelace", "SKILLS", "Go; Rust", "INDUSTRIES", "Banking"]);
        assert_eq!(split_header(&input), split_header(&input));
    }
}
