//! Document parsing and data structures module
//!
//! This module reads Microsoft Word (.docx) CVs and converts them into the
//! structured [`CvRecord`] representation.

pub mod cleanup;
pub mod io;
pub mod loader;
pub mod models;
pub mod parsing;

// Re-export the record types and the extraction entry points
pub use io::Package;
pub use loader::{extract, extract_path};
pub use models::*;
