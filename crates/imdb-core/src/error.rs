//! Table-scoped and pipeline-level errors.

use imdb_ingest::IngestError;
use imdb_model::{ConfigError, TableName};
use imdb_output::OutputError;
use imdb_transform::TransformError;
use thiserror::Error;

/// Why a table's inputs could not be assembled.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Read(#[from] IngestError),

    #[error("join failed")]
    Join(#[source] TransformError),
}

/// Failure of one table rule.
#[derive(Debug, Error)]
pub enum TableError {
    /// Reading or joining the sources failed.
    #[error("{table}: failed to process source files")]
    FileProcessing {
        table: TableName,
        #[source]
        source: SourceError,
    },

    /// A normalization step failed.
    #[error("{table}: data transformation failed")]
    DataTransformation {
        table: TableName,
        #[source]
        source: TransformError,
    },

    /// The table writer rejected the frame.
    #[error("{table}: failed to write {}", partition_label(.partition))]
    OutputWrite {
        table: TableName,
        partition: Option<usize>,
        #[source]
        source: OutputError,
    },
}

fn partition_label(partition: &Option<usize>) -> String {
    match partition {
        Some(partition) => format!("partition {partition:02}"),
        None => "output".to_string(),
    }
}

impl TableError {
    pub fn table(&self) -> TableName {
        match self {
            TableError::FileProcessing { table, .. }
            | TableError::DataTransformation { table, .. }
            | TableError::OutputWrite { table, .. } => *table,
        }
    }
}

/// Failure of a whole run. The first failing table aborts the rest.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid configuration")]
    InvalidConfig(#[from] ConfigError),

    #[error("table {table} failed")]
    Table {
        table: TableName,
        #[source]
        source: TableError,
    },
}

impl From<TableError> for PipelineError {
    fn from(source: TableError) -> Self {
        PipelineError::Table {
            table: source.table(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_write_names_partition() {
        let err = TableError::OutputWrite {
            table: TableName::Principals,
            partition: Some(2),
            source: OutputError::DataFrame {
                message: "boom".to_string(),
            },
        };
        assert_eq!(err.to_string(), "Principals: failed to write partition 02");
    }

    #[test]
    fn test_pipeline_error_keeps_table() {
        let err: PipelineError = TableError::DataTransformation {
            table: TableName::Jobs,
            source: TransformError::MissingColumn {
                column: "job".to_string(),
            },
        }
        .into();
        assert!(matches!(
            err,
            PipelineError::Table {
                table: TableName::Jobs,
                ..
            }
        ));
    }
}
