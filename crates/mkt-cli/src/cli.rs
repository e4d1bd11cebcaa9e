//! CLI argument definitions for the pipeline stages.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "mkt-cli",
    version,
    about = "Marketing medallion pipeline - generate, clean, and enrich campaign snapshots",
    long_about = "Run the three batch stages of the marketing data pipeline.\n\n\
                  generate writes synthetic raw snapshots to the bronze layer,\n\
                  clean normalizes the latest bronze snapshot into silver,\n\
                  metrics derives per-record KPIs from silver into gold."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for humans, json for machine parsing).
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
    /// Generate synthetic raw campaign records into the bronze layer.
    Generate(GenerateArgs),

    /// Normalize the latest bronze snapshot into the silver layer.
    Clean(CleanArgs),

    /// Derive per-record KPIs from the latest silver snapshot.
    Metrics(MetricsArgs),
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Directory the raw snapshot is written to.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "data/bronze")]
    pub output_dir: PathBuf,

    /// Snapshot filename prefix.
    #[arg(long = "prefix", default_value = "marketing")]
    pub prefix: String,

    /// Number of customer records to generate.
    #[arg(long = "rows", default_value_t = 5000)]
    pub rows: usize,

    /// Seed for reproducible generation.
    #[arg(long = "seed")]
    pub seed: Option<u64>,
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Directory holding raw snapshots.
    #[arg(long = "input-dir", value_name = "DIR", default_value = "data/bronze")]
    pub input_dir: PathBuf,

    /// Directory the cleaned snapshot is written to.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "data/silver")]
    pub output_dir: PathBuf,

    /// Snapshot filename prefix, shared by input and output.
    #[arg(long = "prefix", default_value = "marketing")]
    pub prefix: String,

    /// Keep rows that fail validation, marking them in a boolean
    /// `valid` column instead of dropping them.
    #[arg(long = "flag-invalid")]
    pub flag_invalid: bool,
}

#[derive(Parser)]
pub struct MetricsArgs {
    /// Directory holding cleaned snapshots.
    #[arg(long = "input-dir", value_name = "DIR", default_value = "data/silver")]
    pub input_dir: PathBuf,

    /// Directory the enriched snapshot is written to.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "data/gold")]
    pub output_dir: PathBuf,

    /// Prefix of the cleaned snapshots to read.
    #[arg(long = "prefix", default_value = "marketing")]
    pub prefix: String,

    /// Prefix of the enriched snapshots written out.
    #[arg(long = "output-prefix", default_value = "marketing_metrics")]
    pub output_prefix: String,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
