//! Sidebar item normalization
//!
//! Splits raw sidebar lines into atomic items and de-duplicates them.

use once_cell::sync::Lazy;
use regex::Regex;

use super::super::cleanup::{clean_text, normalize, push_unique};
use super::super::models::{SIDEBAR_KEYS, SidebarSections};

static ITEM_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;|•·▪●◦‣∙]|\s{2,}").unwrap());

/// Atomic, cleaned items of one raw sidebar line
pub fn split_items(line: &str) -> Vec<String> {
    // Runs of spaces are separators, so split before whitespace is collapsed
    ITEM_SEPARATOR
        .split(&normalize(line))
        .map(clean_text)
        .filter(|item| !item.is_empty())
        .collect()
}

/// Turn per-section raw lines into per-section unique items
pub fn normalize_sidebar(raw: &SidebarSections) -> SidebarSections {
    let mut sections = SidebarSections::default();

    for key in SIDEBAR_KEYS {
        let items = sections.get_mut(key);
        for line in raw.get(key) {
            for item in split_items(line) {
                push_unique(items, item);
            }
        }
    }

    sections
}
