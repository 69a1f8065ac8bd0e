//! Table rules and orchestration.
//!
//! This crate turns the snapshot sources into the fourteen output tables:
//!
//! - **rule**: the [`TableRule`] contract and the declarative [`TableDefinition`]
//! - **tables**: the standard definitions, one per [`TableName`](imdb_model::TableName)
//! - **batch**: row-window planning for the largest source
//! - **pipeline**: fail-fast execution of all rules in order
//!
//! # Example
//!
//! ```ignore
//! use imdb_core::run_pipeline;
//! use imdb_model::PipelineConfig;
//! use imdb_output::ParquetTableWriter;
//!
//! let config = PipelineConfig::debug(".data");
//! let writer = ParquetTableWriter::new(config.output_dir());
//! let report = run_pipeline(config, &writer)?;
//! ```

pub mod batch;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod rule;
pub mod tables;

pub use batch::{BatchWindow, plan_batches};
pub use context::RunContext;
pub use error::{PipelineError, SourceError, TableError};
pub use pipeline::{Pipeline, run_pipeline};
pub use rule::{Lookup, TableDefinition, TableRule};
