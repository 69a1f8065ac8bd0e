//! Table writers.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use imdb_model::TableName;
use polars::prelude::{DataFrame, ParquetWriter};
use tracing::info;

use crate::error::{OutputError, Result};

/// Output file name for a table or one of its batch partitions.
///
/// Partitions are numbered from 1 and zero-padded to two digits.
pub fn partition_file_name(table: TableName, partition: Option<usize>) -> String {
    match partition {
        Some(partition) => format!("{table}_{partition:02}.parquet"),
        None => format!("{table}.parquet"),
    }
}

/// Persists one frame of a table.
///
/// Implementations report failures as [`OutputError`] so callers can tell
/// them apart from transformation failures.
pub trait TableWriter {
    /// Writes `frame` as `table` (or one of its partitions) and returns
    /// where it went.
    fn write(&self, table: TableName, partition: Option<usize>, frame: &mut DataFrame)
    -> Result<PathBuf>;
}

/// Writes each frame to `<output_dir>/<file name>.parquet`, replacing any
/// file from an earlier run.
#[derive(Debug, Clone)]
pub struct ParquetTableWriter {
    output_dir: PathBuf,
}

impl ParquetTableWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn ensure_output_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).map_err(|source| OutputError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })
    }
}

impl TableWriter for ParquetTableWriter {
    fn write(
        &self,
        table: TableName,
        partition: Option<usize>,
        frame: &mut DataFrame,
    ) -> Result<PathBuf> {
        self.ensure_output_dir()?;
        let path = self.output_dir.join(partition_file_name(table, partition));
        let file = File::create(&path).map_err(|source| OutputError::CreateFile {
            path: path.clone(),
            source,
        })?;
        ParquetWriter::new(file)
            .finish(frame)
            .map_err(|err| OutputError::Parquet {
                path: path.clone(),
                message: err.to_string(),
            })?;
        info!(path = %path.display(), rows = frame.height(), "table written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_names() {
        assert_eq!(partition_file_name(TableName::Titles, None), "Titles.parquet");
        assert_eq!(
            partition_file_name(TableName::Principals, Some(3)),
            "Principals_03.parquet"
        );
        assert_eq!(
            partition_file_name(TableName::Characters, Some(112)),
            "Characters_112.parquet"
        );
    }
}
