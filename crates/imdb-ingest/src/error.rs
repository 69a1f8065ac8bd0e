//! Error types for reading delimited sources.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while opening, projecting or parsing a source file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file not found.
    #[error("source file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Source has no header line.
    #[error("source file is empty: {path}")]
    EmptySource { path: PathBuf },

    /// Failed to parse the file with Polars.
    #[error("failed to parse TSV {path}: {message}")]
    TsvParse { path: PathBuf, message: String },

    // === Projection Errors ===
    /// Requested column not present in the header.
    #[error("column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// Requested column position past the last header field.
    #[error("column index {index} out of range ({width} columns) in {path}")]
    ColumnIndexOutOfRange {
        index: usize,
        width: usize,
        path: PathBuf,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for source reads.
pub type Result<T> = std::result::Result<T, IngestError>;
