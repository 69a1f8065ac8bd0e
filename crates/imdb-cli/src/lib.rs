//! Library half of the `imdb-normalize` command.
//!
//! - **logging**: `tracing` subscriber setup
//! - **fetch**: download and decompression of the snapshot archives
//! - **summary**: terminal tables for run reports and the table listing

pub mod fetch;
pub mod logging;
pub mod summary;
