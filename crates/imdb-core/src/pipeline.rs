//! Pipeline orchestration.
//!
//! Rules run one after another in a fixed order. Rules never read each
//! other's output; the order only keeps logs readable. The first failing rule
//! aborts the run, and tables written before it stay on disk.

use std::time::Instant;

use imdb_model::{PipelineConfig, RunReport, TableName};
use imdb_output::TableWriter;
use tracing::{error, info};

use crate::context::RunContext;
use crate::error::PipelineError;
use crate::rule::TableRule;
use crate::tables::standard_tables;

/// An ordered list of table rules.
pub struct Pipeline {
    rules: Vec<Box<dyn TableRule>>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl Pipeline {
    /// A pipeline with no rules.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The fourteen standard rules.
    pub fn standard() -> Self {
        standard_tables()
            .into_iter()
            .fold(Self::empty(), |pipeline, definition| {
                pipeline.add_rule(Box::new(definition))
            })
    }

    /// Append a rule.
    #[must_use]
    pub fn add_rule(mut self, rule: Box<dyn TableRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Keep only the rules for `tables`, preserving pipeline order.
    #[must_use]
    pub fn retain_tables(mut self, tables: &[TableName]) -> Self {
        self.rules.retain(|rule| tables.contains(&rule.table()));
        self
    }

    pub fn tables(&self) -> Vec<TableName> {
        self.rules.iter().map(|rule| rule.table()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs every rule in order, stopping at the first failure.
    pub fn run(
        &self,
        ctx: &RunContext,
        writer: &dyn TableWriter,
    ) -> Result<RunReport, PipelineError> {
        let started = Instant::now();
        let config = ctx.config();
        info!(
            tables = self.rules.len(),
            source_dir = %config.source_dir.display(),
            output_dir = %config.output_dir.display(),
            debug = config.debug,
            batch_size = config.batch_size,
            "pipeline started"
        );

        let mut report = RunReport::default();
        for rule in &self.rules {
            match rule.process(ctx, writer) {
                Ok(table_report) => report.tables.push(table_report),
                Err(err) => {
                    error!(table = %rule.table(), error = %err, "table failed, aborting run");
                    return Err(err.into());
                }
            }
        }

        report.duration_ms = started.elapsed().as_millis();
        info!(
            rows = report.total_rows(),
            partitions = report.total_partitions(),
            duration_ms = report.duration_ms,
            "pipeline finished"
        );
        Ok(report)
    }
}

/// Validates `config` and runs the standard pipeline.
pub fn run_pipeline(
    config: PipelineConfig,
    writer: &dyn TableWriter,
) -> Result<RunReport, PipelineError> {
    let ctx = RunContext::new(config)?;
    Pipeline::standard().run(&ctx, writer)
}
