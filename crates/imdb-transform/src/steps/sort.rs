//! Stable ordering by a text column.

use std::cmp::Ordering;

use polars::prelude::*;

use crate::error::Result;
use crate::frame::{take_rows, text_column};

/// Sorts rows by `column` ascending, absent values last, ties kept in order.
pub fn sort_by(df: DataFrame, column: &str) -> Result<DataFrame> {
    let mut order: Vec<(IdxSize, Option<&str>)> = text_column(&df, column)?
        .into_iter()
        .enumerate()
        .map(|(row, value)| (row as IdxSize, value))
        .collect();
    order.sort_by(|(_, a), (_, b)| match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    let rows = order.into_iter().map(|(row, _)| row).collect();
    take_rows(&df, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{text_frame, text_values};

    #[test]
    fn test_nulls_last_and_stable() {
        let df = text_frame(&[
            ("name", &[None, Some("b"), Some("a"), Some("b")]),
            ("row", &[Some("0"), Some("1"), Some("2"), Some("3")]),
        ])
        .unwrap();
        let df = sort_by(df, "name").unwrap();
        assert_eq!(
            text_values(&df, "row").unwrap(),
            vec![Some("2".into()), Some("1".into()), Some("3".into()), Some("0".into())]
        );
    }
}
