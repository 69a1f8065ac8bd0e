//! Reusable normalization steps.
//!
//! Each table is described as an ordered list of [`Step`]s. A step takes the
//! frame by value and returns the transformed frame, so steps compose without
//! copying columns they leave alone.

mod cast;
mod dedupe;
mod derive;
mod explode;
mod nulls;
mod select;
mod sort;

pub use cast::{CastKind, cast_column};
pub use dedupe::dedupe;
pub use derive::{derive_composite_id, derive_id, relabel};
pub use explode::{ListFormat, explode};
pub use nulls::{drop_nulls, normalize_nulls};
pub use select::select;
pub use sort::sort_by;

use polars::prelude::DataFrame;

use crate::error::Result;
use crate::labels::LabelRule;

/// One named unit of table normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Replace the sentinel token with absence in every text column.
    NormalizeNulls { token: String },
    /// Drop rows where any listed column is absent.
    DropNulls { columns: Vec<String> },
    /// One row per list item of `column`, stored in `into`.
    Explode {
        column: String,
        into: String,
        format: ListFormat,
    },
    /// Hash `from` (optionally truncated) into `into`.
    DeriveId {
        from: String,
        into: String,
        truncate: Option<usize>,
    },
    /// Hash the delimiter-free concatenation of three columns.
    DeriveCompositeId { from: [String; 3], into: String },
    /// Rewrite a label column.
    Relabel { column: String, rule: LabelRule },
    /// Project and rename `(from, to)`.
    Select { columns: Vec<(String, String)> },
    /// Drop repeats of the key tuple, keeping the first.
    Dedupe { keys: Vec<String> },
    /// Stable ascending sort, absent values last.
    Sort { column: String },
    /// Final column types.
    Cast { columns: Vec<(String, CastKind)> },
}

fn owned(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|column| (*column).to_string()).collect()
}

impl Step {
    pub fn normalize_nulls(token: &str) -> Self {
        Step::NormalizeNulls {
            token: token.to_string(),
        }
    }

    pub fn drop_nulls(columns: &[&str]) -> Self {
        Step::DropNulls {
            columns: owned(columns),
        }
    }

    pub fn explode(column: &str, into: &str, format: ListFormat) -> Self {
        Step::Explode {
            column: column.to_string(),
            into: into.to_string(),
            format,
        }
    }

    pub fn derive_id(from: &str, into: &str) -> Self {
        Step::DeriveId {
            from: from.to_string(),
            into: into.to_string(),
            truncate: None,
        }
    }

    pub fn derive_truncated_id(from: &str, into: &str, max_chars: usize) -> Self {
        Step::DeriveId {
            from: from.to_string(),
            into: into.to_string(),
            truncate: Some(max_chars),
        }
    }

    pub fn derive_composite_id(from: [&str; 3], into: &str) -> Self {
        Step::DeriveCompositeId {
            from: from.map(str::to_string),
            into: into.to_string(),
        }
    }

    pub fn relabel(column: &str, rule: LabelRule) -> Self {
        Step::Relabel {
            column: column.to_string(),
            rule,
        }
    }

    pub fn select(columns: &[(&str, &str)]) -> Self {
        Step::Select {
            columns: columns
                .iter()
                .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
                .collect(),
        }
    }

    pub fn dedupe(keys: &[&str]) -> Self {
        Step::Dedupe { keys: owned(keys) }
    }

    pub fn sort(column: &str) -> Self {
        Step::Sort {
            column: column.to_string(),
        }
    }

    pub fn cast(columns: &[(&str, CastKind)]) -> Self {
        Step::Cast {
            columns: columns
                .iter()
                .map(|(column, kind)| ((*column).to_string(), *kind))
                .collect(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Step::NormalizeNulls { .. } => "normalize_nulls",
            Step::DropNulls { .. } => "drop_nulls",
            Step::Explode { .. } => "explode",
            Step::DeriveId { .. } => "derive_id",
            Step::DeriveCompositeId { .. } => "derive_composite_id",
            Step::Relabel { .. } => "relabel",
            Step::Select { .. } => "select",
            Step::Dedupe { .. } => "dedupe",
            Step::Sort { .. } => "sort",
            Step::Cast { .. } => "cast",
        }
    }

    pub fn apply(&self, df: DataFrame) -> Result<DataFrame> {
        match self {
            Step::NormalizeNulls { token } => normalize_nulls(df, token),
            Step::DropNulls { columns } => drop_nulls(df, columns),
            Step::Explode {
                column,
                into,
                format,
            } => explode(df, column, into, *format),
            Step::DeriveId {
                from,
                into,
                truncate,
            } => derive_id(df, from, into, *truncate),
            Step::DeriveCompositeId { from, into } => derive_composite_id(df, from, into),
            Step::Relabel { column, rule } => relabel(df, column, *rule),
            Step::Select { columns } => select(&df, columns),
            Step::Dedupe { keys } => dedupe(df, keys),
            Step::Sort { column } => sort_by(df, column),
            Step::Cast { columns } => columns
                .iter()
                .try_fold(df, |df, (column, kind)| cast_column(df, column, *kind)),
        }
    }
}
