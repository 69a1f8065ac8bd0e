//! Frame access helpers shared by the steps and joins.

use polars::prelude::*;

use crate::error::{Result, TransformError};

/// Borrows a column as text, failing when it is missing or not `String`.
pub fn text_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked> {
    let column = df.column(name).map_err(|_| TransformError::MissingColumn {
        column: name.to_string(),
    })?;
    column.str().map_err(|_| TransformError::NotText {
        column: name.to_string(),
        dtype: column.dtype().to_string(),
    })
}

/// Rows of `df` at the given positions, in that order.
pub fn take_rows(df: &DataFrame, rows: Vec<IdxSize>) -> Result<DataFrame> {
    let indices = IdxCa::from_vec("rows".into(), rows);
    Ok(df.take(&indices)?)
}

/// Rows of `df` where `keep` is true.
pub fn filter_rows(df: &DataFrame, keep: &[bool]) -> Result<DataFrame> {
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    Ok(df.filter(&mask)?)
}

/// Builds a frame of text columns; handy for tests and fixtures.
pub fn text_frame(columns: &[(&str, &[Option<&str>])]) -> Result<DataFrame> {
    let columns = columns
        .iter()
        .map(|(name, values)| Series::new((*name).into(), values.to_vec()).into_column())
        .collect();
    Ok(DataFrame::new(columns)?)
}

/// Reads a text column back as owned values.
pub fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    Ok(text_column(df, name)?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}
