//! Document parsing utilities
//!
//! This module contains the streaming part reader and the classifiers and
//! state machines that turn paragraphs into record fields.

pub mod body;
pub mod header;
pub mod paragraph;
pub(crate) mod part;
pub(crate) mod runs;
pub mod sidebar;
