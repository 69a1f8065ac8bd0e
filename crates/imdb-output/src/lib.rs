//! Table output.
//!
//! Writes each normalized table, or each batch partition of a batched table,
//! as one Parquet file named after the table.

mod error;
mod writer;

pub use error::{OutputError, Result};
pub use writer::{ParquetTableWriter, TableWriter, partition_file_name};
