//! Joins against a lookup frame.
//!
//! Output rows follow the primary frame's order. Lookup columns other than
//! the join key are appended; a name already used by the primary frame gets a
//! `_right` suffix.

use std::collections::HashMap;

use polars::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::frame::{take_rows, text_column};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Keep only primary rows whose key exists in the lookup.
    Inner,
    /// Keep every primary row; lookup columns are absent when unmatched.
    Left,
}

/// Join kind and key columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinSpec {
    pub kind: JoinKind,
    pub left_on: String,
    pub right_on: String,
}

impl JoinSpec {
    pub fn inner(left_on: &str, right_on: &str) -> Self {
        Self {
            kind: JoinKind::Inner,
            left_on: left_on.to_string(),
            right_on: right_on.to_string(),
        }
    }

    pub fn left(left_on: &str, right_on: &str) -> Self {
        Self {
            kind: JoinKind::Left,
            left_on: left_on.to_string(),
            right_on: right_on.to_string(),
        }
    }
}

/// Key index over a lookup frame, built once and reused for every primary
/// frame joined against it.
pub struct JoinIndex<'a> {
    lookup: &'a DataFrame,
    spec: &'a JoinSpec,
    rows: HashMap<&'a str, Vec<IdxSize>>,
}

impl<'a> JoinIndex<'a> {
    /// Indexes the lookup's key column. Absent keys are left out.
    pub fn build(lookup: &'a DataFrame, spec: &'a JoinSpec) -> Result<Self> {
        let keys = text_column(lookup, &spec.right_on)?;
        let mut rows: HashMap<&'a str, Vec<IdxSize>> = HashMap::with_capacity(lookup.height());
        for (row, key) in keys.into_iter().enumerate() {
            if let Some(key) = key {
                rows.entry(key).or_default().push(row as IdxSize);
            }
        }
        debug!(on = %spec.right_on, keys = rows.len(), "lookup indexed");
        Ok(Self { lookup, spec, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Joins `primary` against the indexed lookup.
    ///
    /// A primary row matching several lookup rows is repeated once per match.
    /// Absent keys never match.
    pub fn join(&self, primary: &DataFrame) -> Result<DataFrame> {
        let spec = self.spec;
        let mut left_rows: Vec<IdxSize> = Vec::with_capacity(primary.height());
        let mut right_rows: Vec<Option<usize>> = Vec::with_capacity(primary.height());
        for (row, key) in text_column(primary, &spec.left_on)?.into_iter().enumerate() {
            match key.and_then(|key| self.rows.get(key)) {
                Some(matches) => {
                    for matched in matches {
                        left_rows.push(row as IdxSize);
                        right_rows.push(Some(*matched as usize));
                    }
                }
                None if spec.kind == JoinKind::Left => {
                    left_rows.push(row as IdxSize);
                    right_rows.push(None);
                }
                None => {}
            }
        }

        let mut joined = take_rows(primary, left_rows)?;
        for name in self.lookup.get_column_names_owned() {
            if name.as_str() == spec.right_on {
                continue;
            }
            let values = text_column(self.lookup, &name)?;
            let gathered: Vec<Option<&str>> = right_rows
                .iter()
                .map(|row| row.and_then(|row| values.get(row)))
                .collect();
            let target = if joined.column(&name).is_ok() {
                format!("{name}_right")
            } else {
                name.to_string()
            };
            joined.with_column(Series::new(target.into(), gathered))?;
        }

        debug!(
            kind = ?spec.kind,
            on = %spec.left_on,
            primary_rows = primary.height(),
            lookup_rows = self.lookup.height(),
            rows = joined.height(),
            "frames joined"
        );
        Ok(joined)
    }
}

/// One-off join of `primary` with `lookup` on text key columns.
pub fn join_frames(primary: &DataFrame, lookup: &DataFrame, spec: &JoinSpec) -> Result<DataFrame> {
    JoinIndex::build(lookup, spec)?.join(primary)
}
