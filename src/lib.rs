//! cvsift: structure extraction and round-trip verification for .docx CVs
//!
//! This library reads a Word CV, recovers its identity block, sidebar lists,
//! overview and experience entries, and compares records re-extracted from
//! rendered documents against the originals.

pub mod batch;
pub mod cli;
pub mod compare;
pub mod config;
pub mod document;
pub mod error;
pub mod render;
pub mod validate;

// Re-export commonly used types
pub use compare::{Comparison, compare, compare_records};
pub use document::{
    CvRecord, ExperienceEntry, Identity, Package, SidebarSections, extract, extract_path,
};
pub use error::ExtractError;
pub use validate::ValidationReport;
