//! Error types for vessel record ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading an input batch.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file missing or unreadable.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
