//! Report sources and the report file-naming contract.
//!
//! The [`ReportSource`] trait abstracts file I/O so the pipeline can be fed
//! from disk or from memory. Extracting text from `.docx` archives is left
//! to an external tool; [`FileSystemSource`] only reads plain-text reports.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::turn::Turn;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("could not read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("'{path}' is a .docx report; convert it to text first")]
    UnsupportedFormat { path: String },

    #[error("'{name}' does not match YYYY-MM.CCCC.report.txt")]
    InvalidFileName { name: String },
}

/// Where report bytes come from.
pub trait ReportSource {
    fn read_report(&self, path: &Path) -> Result<Vec<u8>, SourceError>;
}

/// Reads plain-text reports from disk.
pub struct FileSystemSource;

impl ReportSource for FileSystemSource {
    fn read_report(&self, path: &Path) -> Result<Vec<u8>, SourceError> {
        let is_docx = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"));
        if is_docx {
            return Err(SourceError::UnsupportedFormat {
                path: path.display().to_string(),
            });
        }
        std::fs::read(path).map_err(|e| SourceError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// In-memory source for tests and embedding.
pub struct InMemorySource {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl InMemorySource {
    pub fn new(files: BTreeMap<PathBuf, Vec<u8>>) -> Self {
        Self { files }
    }

    /// Resolve `.` and `..` without touching the filesystem.
    fn normalize_path(path: &Path) -> PathBuf {
        let mut components = Vec::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    components.pop();
                }
                other => components.push(other),
            }
        }
        components.iter().collect()
    }
}

impl ReportSource for InMemorySource {
    fn read_report(&self, path: &Path) -> Result<Vec<u8>, SourceError> {
        let normalized = Self::normalize_path(path);
        self.files
            .get(&normalized)
            .cloned()
            .ok_or_else(|| SourceError::Io {
                path: normalized.display().to_string(),
                message: "not found in memory".to_string(),
            })
    }
}

// ──────────────────────────────────────────────
// File names
// ──────────────────────────────────────────────

static REPORT_FILE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{3,4})-([0-9]{1,2})\.([0-9]{3,4})\.report\.(docx|txt)$").expect("regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Txt,
    Docx,
}

/// `YYYY-MM.CCCC.report.(txt|docx)`: the turn and clan a report file is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportFileName {
    pub turn: Turn,
    pub clan: u16,
    pub format: ReportFormat,
}

impl ReportFileName {
    /// Parse the final path component of `path`.
    pub fn from_path(path: &Path) -> Result<ReportFileName, SourceError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        ReportFileName::parse(name)
    }

    pub fn parse(name: &str) -> Result<ReportFileName, SourceError> {
        let invalid = || SourceError::InvalidFileName {
            name: name.to_string(),
        };
        let caps = REPORT_FILE_NAME.captures(name).ok_or_else(invalid)?;
        let year: u16 = caps[1].parse().map_err(|_| invalid())?;
        let month: u8 = caps[2].parse().map_err(|_| invalid())?;
        let clan: u16 = caps[3].parse().map_err(|_| invalid())?;
        let turn = Turn::new(year, month).ok_or_else(invalid)?;
        if !(1..=999).contains(&clan) {
            return Err(invalid());
        }
        let format = match &caps[4] {
            "docx" => ReportFormat::Docx,
            _ => ReportFormat::Txt,
        };
        Ok(ReportFileName { turn, clan, format })
    }
}
