//! Sentinel replacement and null filtering.

use polars::prelude::*;

use crate::error::Result;
use crate::frame::{filter_rows, text_column};

/// Replaces `token` with absence in every text column.
pub fn normalize_nulls(mut df: DataFrame, token: &str) -> Result<DataFrame> {
    for name in df.get_column_names_owned() {
        let Ok(values) = df.column(&name)?.str() else {
            continue;
        };
        if !values.into_iter().any(|value| value == Some(token)) {
            continue;
        }
        let cleaned: Vec<Option<&str>> = values
            .into_iter()
            .map(|value| value.filter(|value| *value != token))
            .collect();
        let series = Series::new(name.clone(), cleaned);
        df.with_column(series)?;
    }
    Ok(df)
}

/// Drops rows where any of `columns` is absent.
pub fn drop_nulls(df: DataFrame, columns: &[String]) -> Result<DataFrame> {
    let mut keep = vec![true; df.height()];
    for name in columns {
        for (row, value) in text_column(&df, name)?.into_iter().enumerate() {
            if value.is_none() {
                keep[row] = false;
            }
        }
    }
    if keep.iter().all(|kept| *kept) {
        return Ok(df);
    }
    filter_rows(&df, &keep)
}
