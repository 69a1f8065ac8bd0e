//! The table rule contract and its declarative implementation.
//!
//! Every output table is produced by a [`TableRule`]. The fourteen standard
//! rules are all [`TableDefinition`]s: a primary source, an optional lookup
//! joined against it, and a [`TransformPlan`] of reusable steps. Only the
//! configuration differs between tables.

use std::path::PathBuf;
use std::time::Instant;

use imdb_ingest::{Projection, ReadRequest, count_rows, read_source};
use imdb_model::{SourceFile, TableName, TableReport};
use imdb_output::TableWriter;
use imdb_transform::{JoinIndex, JoinSpec, TransformPlan};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use crate::batch::plan_batches;
use crate::context::RunContext;
use crate::error::{SourceError, TableError};

/// Produces one output table.
pub trait TableRule: Send + Sync {
    /// The table this rule writes.
    fn table(&self) -> TableName;

    /// One-line summary for listings.
    fn description(&self) -> &'static str {
        "Table rule"
    }

    /// Reads the sources, normalizes them and writes the table.
    ///
    /// # Errors
    ///
    /// Read and join failures are [`TableError::FileProcessing`], step
    /// failures [`TableError::DataTransformation`] and writer failures
    /// [`TableError::OutputWrite`]. Nothing is retried.
    fn process(
        &self,
        ctx: &RunContext,
        writer: &dyn TableWriter,
    ) -> Result<TableReport, TableError>;
}

/// A secondary source joined against the primary rows.
///
/// Lookups are always read in full, never sampled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub source: SourceFile,
    pub columns: Projection,
    pub join: JoinSpec,
}

impl Lookup {
    pub fn new(source: SourceFile, columns: Projection, join: JoinSpec) -> Self {
        Self {
            source,
            columns,
            join,
        }
    }
}

/// Declarative table rule.
#[derive(Debug, Clone)]
pub struct TableDefinition {
    pub table: TableName,
    pub description: &'static str,
    pub source: SourceFile,
    pub columns: Projection,
    pub lookup: Option<Lookup>,
    /// Process the primary source in row windows, one partition each.
    pub batched: bool,
    pub plan: TransformPlan,
}

impl TableDefinition {
    pub fn new(
        table: TableName,
        source: SourceFile,
        columns: Projection,
        plan: TransformPlan,
    ) -> Self {
        Self {
            table,
            description: "",
            source,
            columns,
            lookup: None,
            batched: false,
            plan,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub fn with_lookup(mut self, lookup: Lookup) -> Self {
        self.lookup = Some(lookup);
        self
    }

    #[must_use]
    pub fn batched(mut self) -> Self {
        self.batched = true;
        self
    }

    fn source_error(&self, source: impl Into<SourceError>) -> TableError {
        TableError::FileProcessing {
            table: self.table,
            source: source.into(),
        }
    }

    fn read(
        &self,
        ctx: &RunContext,
        source: SourceFile,
        request: &ReadRequest,
    ) -> Result<DataFrame, TableError> {
        let path = ctx.source_path(source);
        info!(
            source = %source,
            skip_rows = request.skip_rows,
            row_limit = ?request.row_limit,
            "reading source"
        );
        read_source(&path, request).map_err(|err| self.source_error(err))
    }

    fn load_lookup(&self, ctx: &RunContext) -> Result<Option<DataFrame>, TableError> {
        self.lookup
            .as_ref()
            .map(|lookup| {
                let request = ReadRequest {
                    projection: lookup.columns.clone(),
                    ..ReadRequest::default()
                };
                self.read(ctx, lookup.source, &request)
            })
            .transpose()
    }

    /// Indexes a loaded lookup frame on its join key.
    fn index_lookup<'a>(
        &'a self,
        lookup: Option<&'a DataFrame>,
    ) -> Result<Option<JoinIndex<'a>>, TableError> {
        match (&self.lookup, lookup) {
            (Some(spec), Some(frame)) => JoinIndex::build(frame, &spec.join)
                .map(Some)
                .map_err(|err| self.source_error(SourceError::Join(err))),
            _ => Ok(None),
        }
    }

    /// Joins against the indexed lookup (if any) and runs the plan on one
    /// primary frame.
    pub fn transform(
        &self,
        primary: DataFrame,
        lookup: Option<&JoinIndex<'_>>,
    ) -> Result<DataFrame, TableError> {
        let joined = match lookup {
            Some(index) => index
                .join(&primary)
                .map_err(|err| self.source_error(SourceError::Join(err)))?,
            None => primary,
        };
        self.plan
            .execute(joined)
            .map_err(|source| TableError::DataTransformation {
                table: self.table,
                source,
            })
    }

    fn write(
        &self,
        writer: &dyn TableWriter,
        partition: Option<usize>,
        mut frame: DataFrame,
    ) -> Result<(PathBuf, usize), TableError> {
        let rows = frame.height();
        let path = writer
            .write(self.table, partition, &mut frame)
            .map_err(|source| TableError::OutputWrite {
                table: self.table,
                partition,
                source,
            })?;
        Ok((path, rows))
    }

    fn process_whole(
        &self,
        ctx: &RunContext,
        writer: &dyn TableWriter,
    ) -> Result<TableReport, TableError> {
        let request = ReadRequest {
            projection: self.columns.clone(),
            row_limit: ctx.row_limit(),
            skip_rows: 0,
        };
        let primary = self.read(ctx, self.source, &request)?;
        let lookup = self.load_lookup(ctx)?;
        let index = self.index_lookup(lookup.as_ref())?;
        let frame = self.transform(primary, index.as_ref())?;

        let mut report = TableReport::new(self.table);
        let (path, rows) = self.write(writer, None, frame)?;
        report.push_partition(path, rows);
        Ok(report)
    }

    /// Runs the rule once per row window, loading the lookup only once.
    fn process_batches(
        &self,
        ctx: &RunContext,
        writer: &dyn TableWriter,
    ) -> Result<TableReport, TableError> {
        let path = ctx.source_path(self.source);
        let total_rows = count_rows(&path).map_err(|err| self.source_error(err))?;
        let lookup = self.load_lookup(ctx)?;
        let index = self.index_lookup(lookup.as_ref())?;
        let windows = plan_batches(total_rows, ctx.batch_size(), ctx.is_debug());
        info!(
            total_rows,
            batches = windows.len(),
            batch_size = ctx.batch_size(),
            "batching source"
        );

        let mut report = TableReport::new(self.table);
        for window in &windows {
            let _span = info_span!("batch", suffix = %window.suffix()).entered();
            let request = ReadRequest {
                projection: self.columns.clone(),
                row_limit: Some(window.rows),
                skip_rows: window.skip_rows,
            };
            let primary = self.read(ctx, self.source, &request)?;
            let frame = self.transform(primary, index.as_ref())?;
            let (path, rows) = self.write(writer, Some(window.partition), frame)?;
            debug!(rows, "batch written");
            report.push_partition(path, rows);
        }
        Ok(report)
    }
}

impl TableRule for TableDefinition {
    fn table(&self) -> TableName {
        self.table
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn process(
        &self,
        ctx: &RunContext,
        writer: &dyn TableWriter,
    ) -> Result<TableReport, TableError> {
        let _span = info_span!("table", table = %self.table).entered();
        let started = Instant::now();
        let report = if self.batched {
            self.process_batches(ctx, writer)?
        } else {
            self.process_whole(ctx, writer)?
        };
        info!(
            rows = report.rows,
            partitions = report.partitions.len(),
            duration_ms = started.elapsed().as_millis(),
            "table finished"
        );
        Ok(report)
    }
}
