use anyhow::{Context, Result};
use imdb_cli::fetch::{fetch_sources, remove_sources, source_urls};
use imdb_cli::summary::listing_table;
use imdb_core::tables::standard_tables;
use imdb_core::{Pipeline, RunContext};
use imdb_model::{PipelineConfig, RunReport};
use imdb_output::ParquetTableWriter;
use tracing::{info, info_span};

use crate::cli::{FetchArgs, RunArgs};

pub fn run_tables() -> Result<()> {
    println!("{}", listing_table(&standard_tables()));
    Ok(())
}

pub fn run_fetch(args: &FetchArgs) -> Result<()> {
    let urls = source_urls(&args.source.base_url);
    let paths = fetch_sources(&args.data_dir, &urls, !args.source.no_progress)
        .context("fetch sources")?;
    for path in paths {
        println!("{}", path.display());
    }
    Ok(())
}

pub fn run_pipeline(args: &RunArgs) -> Result<(RunReport, PipelineConfig)> {
    let config = config_from_args(args);
    let span = info_span!("run", data_dir = %config.source_dir.display());
    let _guard = span.enter();

    let urls = source_urls(&args.source.base_url);
    if args.fetch {
        fetch_sources(&config.source_dir, &urls, !args.source.no_progress)
            .context("fetch sources")?;
    }

    let ctx = RunContext::new(config.clone()).context("invalid configuration")?;
    let mut pipeline = Pipeline::standard();
    if !args.tables.is_empty() {
        pipeline = pipeline.retain_tables(&args.tables);
        info!(tables = ?pipeline.tables(), "running selected tables");
    }
    let writer = ParquetTableWriter::new(config.output_dir());
    let report = pipeline.run(&ctx, &writer)?;

    if args.cleanup {
        remove_sources(&config.source_dir, &urls).context("remove sources")?;
    }
    Ok((report, config))
}

/// Builds the run configuration; unset flags keep the preset's values.
fn config_from_args(args: &RunArgs) -> PipelineConfig {
    let mut config = if args.debug {
        PipelineConfig::debug(&args.data_dir)
    } else {
        PipelineConfig::production(&args.data_dir)
    };
    if let Some(dir) = &args.output_dir {
        config = config.with_output_dir(dir);
    }
    if let Some(row_limit) = args.row_limit {
        config = config.with_row_limit(row_limit);
    }
    if let Some(batch_size) = args.batch_size {
        config = config.with_batch_size(batch_size);
    }
    config
}
