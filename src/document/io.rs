//! Container reading
//!
//! Opens the zip container of a .docx file and loads the XML parts the
//! extractor needs: the main body and every page header.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{ExtractError, Result};

/// Name of the main body part
pub const BODY_PART: &str = "word/document.xml";

static HEADER_PART: Lazy<Regex> = Lazy::new(|| Regex::new(r"^word/header\d+\.xml$").unwrap());

/// One named XML part, decoded lossily to text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlPart {
    pub name: String,
    pub xml: String,
}

/// The parts of one document, read fully into memory
#[derive(Debug, Clone)]
pub struct Package {
    pub path: PathBuf,
    pub body: XmlPart,
    /// Header parts in lexical name order
    pub headers: Vec<XmlPart>,
}

impl Package {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| ExtractError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(path, file)
    }

    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Result<Self> {
        Self::from_reader(path, Cursor::new(bytes))
    }

    pub fn from_reader<R: Read + Seek>(path: impl Into<PathBuf>, reader: R) -> Result<Self> {
        let path = path.into();
        let mut archive = ZipArchive::new(reader).map_err(|source| ExtractError::Archive {
            path: path.clone(),
            source,
        })?;

        if archive.by_name(BODY_PART).is_err() {
            if archive.by_name("xl/workbook.xml").is_ok() {
                return Err(ExtractError::NotWordDocument { path });
            }
            return Err(ExtractError::MissingPart {
                path,
                part: BODY_PART.to_string(),
            });
        }

        let body = read_part(&mut archive, &path, BODY_PART)?;

        let mut header_names: Vec<String> = archive
            .file_names()
            .filter(|name| HEADER_PART.is_match(name))
            .map(str::to_string)
            .collect();
        header_names.sort();

        let headers = header_names
            .iter()
            .map(|name| read_part(&mut archive, &path, name))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            path = %path.display(),
            headers = headers.len(),
            "Opened document container"
        );

        Ok(Package {
            path,
            body,
            headers,
        })
    }
}

fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &Path,
    name: &str,
) -> Result<XmlPart> {
    let mut file = archive.by_name(name).map_err(|source| match source {
        ZipError::FileNotFound => ExtractError::MissingPart {
            path: path.to_path_buf(),
            part: name.to_string(),
        },
        source => ExtractError::Archive {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|source| ExtractError::ReadPart {
            path: path.to_path_buf(),
            part: name.to_string(),
            source,
        })?;

    Ok(XmlPart {
        name: name.to_string(),
        xml: String::from_utf8_lossy(&bytes).into_owned(),
    })
}
