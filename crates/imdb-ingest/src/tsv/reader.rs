//! Windowed, projected reads of tab-separated sources.

use std::path::Path;
use std::sync::Arc;

use polars::prelude::*;
use tracing::debug;

use crate::error::{IngestError, Result};

use super::header::{TsvHeader, read_header};

/// Column subset to load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Projection {
    /// Every header column, in file order.
    #[default]
    All,
    /// Columns picked by header name, returned in the listed order.
    Named(Vec<String>),
    /// Columns picked by position and renamed to the paired name.
    Positional(Vec<(usize, String)>),
}

/// Parameters of one source read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReadRequest {
    pub projection: Projection,
    /// Cap on data rows read (debug sampling or batch window length).
    pub row_limit: Option<usize>,
    /// Data rows skipped after the header (batch window offset).
    pub skip_rows: usize,
}

impl ReadRequest {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn named<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            projection: Projection::Named(columns.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn positional<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = (usize, S)>,
        S: Into<String>,
    {
        Self {
            projection: Projection::Positional(
                columns
                    .into_iter()
                    .map(|(index, name)| (index, name.into()))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_row_limit(mut self, row_limit: Option<usize>) -> Self {
        self.row_limit = row_limit;
        self
    }

    #[must_use]
    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }
}

/// Resolves a projection into `(position, header name, output name)` triples.
fn resolve_projection(
    header: &TsvHeader,
    projection: &Projection,
) -> Result<Vec<(usize, String, String)>> {
    match projection {
        Projection::All => Ok(header
            .columns
            .iter()
            .enumerate()
            .map(|(index, name)| (index, name.clone(), name.clone()))
            .collect()),
        Projection::Named(names) => names
            .iter()
            .map(|name| Ok((header.position(name)?, name.clone(), name.clone())))
            .collect(),
        Projection::Positional(columns) => columns
            .iter()
            .map(|(index, target)| {
                Ok((*index, header.name_at(*index)?.to_string(), target.clone()))
            })
            .collect(),
    }
}

fn parse_error(path: &Path, err: &PolarsError) -> IngestError {
    IngestError::TsvParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Loads the given column positions with every value typed as `String`.
fn load_positions(
    path: &Path,
    positions: Vec<usize>,
    row_limit: Option<usize>,
    skip_rows: usize,
) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_projection(Some(Arc::new(positions)))
        .with_skip_rows_after_header(skip_rows)
        .with_n_rows(row_limit)
        .map_parse_options(|options| {
            options
                .with_separator(b'\t')
                .with_quote_char(None)
                .with_truncate_ragged_lines(true)
        })
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| parse_error(path, &e))?
        .finish()
        .map_err(|e| parse_error(path, &e))
}

/// Reads a tab-separated source into a DataFrame of `String` columns.
///
/// The header row is always consumed; `skip_rows` counts data rows only.
/// Output columns follow the projection order and carry the projection's
/// names. The snapshot's null token is left untouched here.
pub fn read_source(path: &Path, request: &ReadRequest) -> Result<DataFrame> {
    let header = read_header(path)?;
    let targets = resolve_projection(&header, &request.projection)?;

    let mut positions: Vec<usize> = targets.iter().map(|(index, _, _)| *index).collect();
    positions.sort_unstable();
    positions.dedup();

    let raw = load_positions(path, positions, request.row_limit, request.skip_rows)?;

    let mut columns = Vec::with_capacity(targets.len());
    for (_, source, target) in &targets {
        let mut column = raw.column(source)?.clone();
        column.rename(target.as_str().into());
        columns.push(column);
    }
    let df = DataFrame::new(columns)?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        skip_rows = request.skip_rows,
        "source read"
    );
    Ok(df)
}

/// Counts data rows with a lazy scan; no column is materialized.
pub fn count_rows(path: &Path) -> Result<usize> {
    read_header(path)?;
    let path_str = path.to_string_lossy();
    let counted = LazyCsvReader::new(PlPath::new(&path_str))
        .with_has_header(true)
        .with_separator(b'\t')
        .with_quote_char(None)
        .with_infer_schema_length(Some(0))
        .with_truncate_ragged_lines(true)
        .finish()
        .and_then(|frame| frame.select([len().alias("rows")]).collect())
        .map_err(|e| parse_error(path, &e))?;
    let rows = counted
        .column("rows")
        .and_then(|column| column.get(0))
        .map_err(|e| parse_error(path, &e))?
        .extract::<usize>()
        .unwrap_or(0);
    debug!(path = %path.display(), rows, "rows counted");
    Ok(rows)
}
