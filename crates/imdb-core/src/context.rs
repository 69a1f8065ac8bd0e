//! Run context handed to every table rule.

use std::path::PathBuf;

use imdb_model::{ConfigError, PipelineConfig, SourceFile};

/// Validated, read-only view of the run configuration.
#[derive(Debug, Clone)]
pub struct RunContext {
    config: PipelineConfig,
}

impl RunContext {
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn source_path(&self, source: SourceFile) -> PathBuf {
        self.config.source_path(source.file_name())
    }

    /// Row cap for sampled primary sources; `None` outside debug mode.
    pub fn row_limit(&self) -> Option<usize> {
        self.config.effective_row_limit()
    }

    pub fn batch_size(&self) -> usize {
        self.config.batch_size
    }

    pub fn is_debug(&self) -> bool {
        self.config.debug
    }
}
