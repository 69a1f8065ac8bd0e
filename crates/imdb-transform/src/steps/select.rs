//! Projection to the output column set.

use polars::prelude::*;

use crate::error::{Result, TransformError};

/// Keeps only the listed columns, in order, renaming `(from, to)`.
pub fn select(df: &DataFrame, columns: &[(String, String)]) -> Result<DataFrame> {
    let mut selected = Vec::with_capacity(columns.len());
    for (from, to) in columns {
        let mut column = df
            .column(from)
            .map_err(|_| TransformError::MissingColumn {
                column: from.clone(),
            })?
            .clone();
        column.rename(to.as_str().into());
        selected.push(column);
    }
    Ok(DataFrame::new(selected)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::text_frame;

    #[test]
    fn test_select_renames_and_orders() {
        let df = text_frame(&[
            ("tconst", &[Some("tt1")]),
            ("primaryTitle", &[Some("A")]),
            ("originalTitle", &[Some("B")]),
        ])
        .unwrap();
        let columns = vec![
            ("primaryTitle".to_string(), "name".to_string()),
            ("tconst".to_string(), "id".to_string()),
        ];
        let df = select(&df, &columns).unwrap();
        assert_eq!(df.get_column_names(), vec!["name", "id"]);
    }

    #[test]
    fn test_select_missing_column() {
        let df = text_frame(&[("tconst", &[Some("tt1")])]).unwrap();
        let columns = vec![("runtime".to_string(), "runtime".to_string())];
        assert!(matches!(
            select(&df, &columns),
            Err(TransformError::MissingColumn { .. })
        ));
    }
}
