//! Final column typing.

use polars::prelude::*;

use crate::error::{Result, TransformError};
use crate::frame::text_column;

/// Target type of an output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastKind {
    Text,
    /// Unparseable values fail unless `strict` is off, in which case they become absent.
    Int64 { strict: bool },
    Float64,
    /// Accepts `0`/`1` and `true`/`false`.
    Boolean,
}

impl CastKind {
    pub fn dtype(&self) -> DataType {
        match self {
            CastKind::Text => DataType::String,
            CastKind::Int64 { .. } => DataType::Int64,
            CastKind::Float64 => DataType::Float64,
            CastKind::Boolean => DataType::Boolean,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            CastKind::Text => "String",
            CastKind::Int64 { .. } => "Int64",
            CastKind::Float64 => "Float64",
            CastKind::Boolean => "Boolean",
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" => Some(true),
        "0" => Some(false),
        other if other.eq_ignore_ascii_case("true") => Some(true),
        other if other.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

/// Parses every value of a text column, absent values stay absent.
fn parse_values<T>(
    values: &StringChunked,
    column: &str,
    kind: CastKind,
    strict: bool,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Vec<Option<T>>> {
    values
        .into_iter()
        .map(|value| match value {
            None => Ok(None),
            Some(raw) => match parse(raw) {
                Some(parsed) => Ok(Some(parsed)),
                None if !strict => Ok(None),
                None => Err(TransformError::InvalidValue {
                    column: column.to_string(),
                    value: raw.to_string(),
                    target: kind.type_name(),
                }),
            },
        })
        .collect()
}

/// Casts one column to `kind`.
pub fn cast_column(mut df: DataFrame, column: &str, kind: CastKind) -> Result<DataFrame> {
    let current = df
        .column(column)
        .map_err(|_| TransformError::MissingColumn {
            column: column.to_string(),
        })?;
    if current.dtype() == &kind.dtype() {
        return Ok(df);
    }
    let series = match kind {
        CastKind::Text => current
            .cast(&DataType::String)?
            .as_materialized_series()
            .clone(),
        CastKind::Int64 { strict } => Series::new(
            column.into(),
            parse_values(text_column(&df, column)?, column, kind, strict, |raw| {
                raw.trim().parse::<i64>().ok()
            })?,
        ),
        CastKind::Float64 => Series::new(
            column.into(),
            parse_values(text_column(&df, column)?, column, kind, true, |raw| {
                raw.trim().parse::<f64>().ok()
            })?,
        ),
        CastKind::Boolean => Series::new(
            column.into(),
            parse_values(text_column(&df, column)?, column, kind, true, parse_bool)?,
        ),
    };
    df.with_column(series)?;
    Ok(df)
}
