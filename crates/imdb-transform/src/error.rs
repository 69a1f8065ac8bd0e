//! Error types for table transformation.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while joining, reshaping, deriving or casting a frame.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A step referenced a column the frame does not have.
    #[error("column '{column}' not found")]
    MissingColumn { column: String },

    /// A text operation was applied to a non-text column.
    #[error("column '{column}' holds {dtype}, expected text")]
    NotText { column: String, dtype: String },

    /// A value could not be converted to the target type.
    #[error("column '{column}': cannot cast '{value}' to {target}")]
    InvalidValue {
        column: String,
        value: String,
        target: &'static str,
    },

    /// A row lacks one of the fields a composite key is built from.
    #[error("column '{column}' is absent at row {row}; cannot build a composite key")]
    MissingKeyPart { column: String, row: usize },

    /// A named step failed; wraps the underlying cause.
    #[error("step '{step}' failed")]
    Step {
        step: &'static str,
        #[source]
        source: Box<TransformError>,
    },

    /// Error surfaced by Polars.
    #[error("dataframe error: {message}")]
    DataFrame { message: String },
}

impl From<PolarsError> for TransformError {
    fn from(err: PolarsError) -> Self {
        match err {
            PolarsError::ColumnNotFound(name) => TransformError::MissingColumn {
                column: name.to_string(),
            },
            other => TransformError::DataFrame {
                message: other.to_string(),
            },
        }
    }
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
