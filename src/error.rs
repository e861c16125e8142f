//! Error types for document extraction.

use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a document from being read at all.
///
/// Every variant carries the path of the offending document so batch callers
/// can report it without extra bookkeeping.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file could not be opened.
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a readable zip container.
    #[error("Invalid .docx container {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// The container looks like a spreadsheet rather than a Word document.
    #[error("{} appears to be an Excel file (.xlsx), not a Word document", .path.display())]
    NotWordDocument { path: PathBuf },

    /// A required part is absent.
    #[error("Invalid .docx file {}: missing {part}", .path.display())]
    MissingPart { path: PathBuf, part: String },

    /// A part exists but could not be decompressed.
    #[error("Failed to read {part} from {}: {source}", .path.display())]
    ReadPart {
        path: PathBuf,
        part: String,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    /// Path of the document that failed
    pub fn path(&self) -> &std::path::Path {
        match self {
            ExtractError::Open { path, .. }
            | ExtractError::Archive { path, .. }
            | ExtractError::NotWordDocument { path }
            | ExtractError::MissingPart { path, .. }
            | ExtractError::ReadPart { path, .. } => path,
        }
    }
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
