//! Row deduplication on a declared key.

use std::collections::HashSet;

use polars::prelude::*;

use crate::error::{Result, TransformError};
use crate::frame::filter_rows;

/// Keeps the first row of each distinct `keys` tuple, preserving order.
///
/// Absent values compare equal to each other.
pub fn dedupe(df: DataFrame, keys: &[String]) -> Result<DataFrame> {
    let key_columns = keys
        .iter()
        .map(|key| {
            df.column(key)
                .map_err(|_| TransformError::MissingColumn {
                    column: key.clone(),
                })
                .and_then(|column| Ok(column.cast(&DataType::String)?))
        })
        .collect::<Result<Vec<Column>>>()?;
    let key_values = key_columns
        .iter()
        .map(|column| Ok(column.str()?))
        .collect::<Result<Vec<&StringChunked>>>()?;

    let mut iterators: Vec<_> = key_values.iter().map(|values| values.into_iter()).collect();
    let mut seen: HashSet<Vec<Option<&str>>> = HashSet::with_capacity(df.height());
    let mut keep = Vec::with_capacity(df.height());
    for _ in 0..df.height() {
        let tuple: Vec<Option<&str>> = iterators
            .iter_mut()
            .map(|values| values.next().flatten())
            .collect();
        keep.push(seen.insert(tuple));
    }

    if keep.iter().all(|kept| *kept) {
        return Ok(df);
    }
    filter_rows(&df, &keep)
}
