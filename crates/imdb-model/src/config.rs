//! Run configuration shared by every table rule.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Row cap applied to sampled sources in debug mode.
pub const DEBUG_ROW_LIMIT: usize = 1_000_000;

/// Batch window used in debug mode.
pub const DEBUG_BATCH_SIZE: usize = 100_000;

/// Batch window used for full production runs.
pub const PRODUCTION_BATCH_SIZE: usize = 10_000_000;

/// Immutable run configuration.
///
/// Built once before the first rule runs and handed to every rule by
/// reference. Nothing mutates it mid-run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory holding the decompressed `.tsv` sources.
    pub source_dir: PathBuf,
    /// Directory receiving the parquet outputs.
    pub output_dir: PathBuf,
    /// Sampling mode: row-limits non-batched rules and runs a single batch.
    pub debug: bool,
    /// Row cap used only when `debug` is set.
    pub row_limit: usize,
    /// Row window for batched rules.
    pub batch_size: usize,
}

impl PipelineConfig {
    /// Creates a production configuration reading and writing in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::production(dir)
    }

    pub fn production(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            output_dir: dir.clone(),
            source_dir: dir,
            debug: false,
            row_limit: 0,
            batch_size: PRODUCTION_BATCH_SIZE,
        }
    }

    pub fn debug(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            output_dir: dir.clone(),
            source_dir: dir,
            debug: true,
            row_limit: DEBUG_ROW_LIMIT,
            batch_size: DEBUG_BATCH_SIZE,
        }
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = row_limit;
        self
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Checks the invariants the batch planner and readers rely on.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if self.debug && self.row_limit == 0 {
            return Err(ConfigError::ZeroRowLimit);
        }
        Ok(())
    }

    /// Row cap for sampled (non-batched) primary sources.
    pub fn effective_row_limit(&self) -> Option<usize> {
        self.debug.then_some(self.row_limit)
    }

    pub fn source_path(&self, file_name: &str) -> PathBuf {
        self.source_dir.join(file_name)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
