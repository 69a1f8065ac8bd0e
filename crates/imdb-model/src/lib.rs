pub mod config;
pub mod error;
pub mod processing;
pub mod table;

pub use config::{
    DEBUG_BATCH_SIZE, DEBUG_ROW_LIMIT, PRODUCTION_BATCH_SIZE, PipelineConfig,
};
pub use error::{ConfigError, Result};
pub use processing::{RunReport, TableReport};
pub use table::{SourceFile, TableName};
