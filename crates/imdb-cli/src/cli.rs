//! CLI argument definitions for the IMDb normalizer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use imdb_cli::fetch::DEFAULT_BASE_URL;
use imdb_model::TableName;

#[derive(Parser)]
#[command(
    name = "imdb-normalize",
    version,
    about = "IMDb snapshot normalizer - Convert the public TSV dumps to relational Parquet tables",
    long_about = "Convert the IMDb public dataset snapshot into fourteen normalized tables.\n\n\
                  Reads the six decompressed TSV sources from a data directory and writes\n\
                  one Parquet file per table, or numbered partitions for the batched tables."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the normalized tables from a snapshot directory.
    Run(RunArgs),

    /// Download and decompress the six source files.
    Fetch(FetchArgs),

    /// List the output tables in pipeline order.
    Tables,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Directory holding the decompressed TSV sources.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Output directory for Parquet files (default: <DATA_DIR>).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Sample the sources and run a single batch.
    #[arg(long = "debug")]
    pub debug: bool,

    /// Rows read per source in debug mode.
    #[arg(long = "row-limit", value_name = "ROWS")]
    pub row_limit: Option<usize>,

    /// Rows per batch for the partitioned tables.
    #[arg(long = "batch-size", value_name = "ROWS")]
    pub batch_size: Option<usize>,

    /// Only build these tables (repeatable, case-insensitive).
    #[arg(long = "table", value_name = "NAME")]
    pub tables: Vec<TableName>,

    /// Download the sources before running.
    #[arg(long = "fetch")]
    pub fetch: bool,

    /// Delete the TSV sources after a successful run.
    #[arg(long = "cleanup")]
    pub cleanup: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Parser)]
pub struct FetchArgs {
    /// Directory to place the decompressed sources in.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args)]
pub struct SourceArgs {
    /// Base URL the gzip archives are published under.
    #[arg(long = "base-url", value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Hide the download progress bars.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
