//! Key and label derivation.

use polars::prelude::*;

use crate::error::Result;
use crate::frame::text_column;
use crate::keys::{derive_composite_id_column, derive_id_column};
use crate::labels::LabelRule;

pub fn derive_id(
    mut df: DataFrame,
    from: &str,
    into: &str,
    truncate: Option<usize>,
) -> Result<DataFrame> {
    let ids = derive_id_column(text_column(&df, from)?, into, truncate);
    df.with_column(ids)?;
    Ok(df)
}

pub fn derive_composite_id(mut df: DataFrame, from: &[String; 3], into: &str) -> Result<DataFrame> {
    let ids = derive_composite_id_column(
        [
            (from[0].as_str(), text_column(&df, &from[0])?),
            (from[1].as_str(), text_column(&df, &from[1])?),
            (from[2].as_str(), text_column(&df, &from[2])?),
        ],
        into,
    )?;
    df.with_column(ids)?;
    Ok(df)
}

/// Rewrites a label column in place.
pub fn relabel(mut df: DataFrame, column: &str, rule: LabelRule) -> Result<DataFrame> {
    let labels: Vec<Option<String>> = text_column(&df, column)?
        .into_iter()
        .map(|value| value.map(|raw| rule.apply(raw)))
        .collect();
    df.with_column(Series::new(column.into(), labels))?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{text_frame, text_values};
    use crate::keys::hash_hex;

    #[test]
    fn test_relabel_keeps_absent() {
        let df = text_frame(&[("job", &[Some("sound_mixer"), None])]).unwrap();
        let df = relabel(df, "job", LabelRule::Humanize { max_chars: Some(36) }).unwrap();
        assert_eq!(text_values(&df, "job").unwrap(), vec![Some("Sound Mixer".into()), None]);
    }

    #[test]
    fn test_composite_column() {
        let df = text_frame(&[
            ("tconst", &[Some("tt1")]),
            ("ordering", &[Some("1")]),
            ("nconst", &[Some("nm1")]),
        ])
        .unwrap();
        let from = ["tconst".to_string(), "ordering".to_string(), "nconst".to_string()];
        let df = derive_composite_id(df, &from, "id").unwrap();
        assert_eq!(text_values(&df, "id").unwrap(), vec![Some(hash_hex("tt11nm1"))]);
    }
}
