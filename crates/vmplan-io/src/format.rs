//! File format detection.

use std::path::Path;

use crate::error::{IoError, IoResult};

/// Tabular or structured encoding of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

impl Format {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> IoResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Format::Csv),
            Some("json") => Ok(Format::Json),
            _ => Err(IoError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl std::str::FromStr for Format {
    type Err = IoError;

    fn from_str(s: &str) -> IoResult<Self> {
        match s {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            other => Err(IoError::UnsupportedFormat(other.to_string())),
        }
    }
}
