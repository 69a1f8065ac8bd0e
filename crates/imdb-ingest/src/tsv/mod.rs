//! Tab-separated source reading.

mod header;
mod reader;

pub use header::{NULL_TOKEN, TsvHeader, read_header};
pub use reader::{Projection, ReadRequest, count_rows, read_source};
