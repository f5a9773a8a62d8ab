//! Error types for file ingestion and export.

use thiserror::Error;

use vmplan_core::PlanError;

/// Result type alias for I/O operations.
pub type IoResult<T> = Result<T, IoError>;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("unsupported file format: {0} (expected .csv or .json)")]
    UnsupportedFormat(String),

    #[error("file error: {0}")]
    File(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid record: {0}")]
    Invalid(#[from] PlanError),

    #[error("row {row}: {reason}")]
    Inconsistent { row: usize, reason: String },
}
