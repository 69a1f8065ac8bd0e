//! Error types for table output.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output file could not be opened for writing.
    #[error("failed to create {path}: {source}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The frame could not be encoded.
    #[error("failed to write parquet {path}: {message}")]
    Parquet { path: PathBuf, message: String },

    #[error("dataframe error: {message}")]
    DataFrame { message: String },
}

impl From<PolarsError> for OutputError {
    fn from(err: PolarsError) -> Self {
        OutputError::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OutputError>;
