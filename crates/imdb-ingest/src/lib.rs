//! Snapshot source reading.
//!
//! This crate opens the tab-separated snapshot files and loads them into
//! Polars DataFrames with every column typed as `String`. Typing happens
//! later, after the null sentinel has been normalized.
//!
//! # Features
//!
//! - **Projection**: by header name or by fixed column position
//! - **Windows**: skip data rows and cap the row count for batch reads
//! - **Row counting**: a single-column pass used to plan batches
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use imdb_ingest::{ReadRequest, read_source};
//!
//! let request = ReadRequest::named(["tconst", "genres"]).with_row_limit(Some(1_000));
//! let df = read_source(Path::new(".data/title.basics.tsv"), &request)?;
//! ```

mod error;
mod tsv;

// === Error Types ===
pub use error::{IngestError, Result};

// === TSV Reading ===
pub use tsv::{
    NULL_TOKEN, Projection, ReadRequest, TsvHeader, count_rows, read_header, read_source,
};
