//! List column expansion.

use polars::prelude::*;

use crate::error::Result;
use crate::frame::{take_rows, text_column};

/// Encoding of a multi-valued cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    /// Items separated by a single character, e.g. `Crime,Drama`.
    Delimited(char),
    /// A JSON string array, e.g. `["Self","Host"]`.
    JsonArray,
}

impl ListFormat {
    pub fn split(&self, raw: &str) -> Vec<String> {
        match self {
            ListFormat::Delimited(separator) => raw.split(*separator).map(str::to_string).collect(),
            ListFormat::JsonArray => match serde_json::from_str::<Vec<String>>(raw) {
                Ok(items) => items,
                Err(_) => raw
                    .replace("[\"", "")
                    .replace("\"]", "")
                    .split(',')
                    .map(str::to_string)
                    .collect(),
            },
        }
    }
}

/// Expands `column` so each list item gets its own row in `into`.
///
/// Every other column is repeated unchanged. Rows whose list is absent or
/// empty produce no output. When `into` differs from `column` the source
/// column is dropped.
pub fn explode(df: DataFrame, column: &str, into: &str, format: ListFormat) -> Result<DataFrame> {
    let mut rows: Vec<IdxSize> = Vec::with_capacity(df.height());
    let mut items: Vec<String> = Vec::with_capacity(df.height());
    for (row, value) in text_column(&df, column)?.into_iter().enumerate() {
        let Some(raw) = value else {
            continue;
        };
        for item in format.split(raw) {
            rows.push(row as IdxSize);
            items.push(item);
        }
    }

    let mut exploded = take_rows(&df, rows)?;
    if into != column {
        exploded = exploded.drop(column)?;
    }
    exploded.with_column(Series::new(into.into(), items))?;
    Ok(exploded)
}
