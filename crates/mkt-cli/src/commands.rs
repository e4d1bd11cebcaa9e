//! Stage drivers: wire locator, engine, and writer for each layer.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use tracing::info_span;

use mkt_core::metrics::compute_metrics;
use mkt_core::normalize::{InvalidRowPolicy, NormalizeOptions, normalize};
use mkt_ingest::locate;
use mkt_model::{NormalizeReport, SnapshotFormat, SnapshotPaths};
use mkt_output::{FILE_STAMP_FORMAT, write_snapshot};

use crate::cli::{CleanArgs, GenerateArgs, MetricsArgs};
use crate::generate::{GenerateOptions, generate_frame};

/// What a completed stage run produced, for the summary table.
#[derive(Debug)]
pub struct StageOutcome {
    pub stage: &'static str,
    /// Snapshot the stage read, absent for generation.
    pub input: Option<PathBuf>,
    pub rows_in: usize,
    pub rows_out: usize,
    pub paths: SnapshotPaths,
    pub report: Option<NormalizeReport>,
    pub report_path: Option<PathBuf>,
}

pub fn run_generate(args: &GenerateArgs) -> Result<StageOutcome> {
    let span = info_span!("generate", rows = args.rows);
    let _guard = span.enter();

    let frame = generate_frame(&GenerateOptions {
        rows: args.rows,
        seed: args.seed,
    })
    .context("generate raw records")?;
    let paths = write_snapshot(&frame, &args.output_dir, &args.prefix, Local::now().naive_local())
        .context("write raw snapshot")?;

    Ok(StageOutcome {
        stage: "generate",
        input: None,
        rows_in: args.rows,
        rows_out: frame.height(),
        paths,
        report: None,
        report_path: None,
    })
}

pub fn run_clean(args: &CleanArgs) -> Result<StageOutcome> {
    let span = info_span!("clean", input_dir = %args.input_dir.display());
    let _guard = span.enter();

    let located = locate(&args.input_dir, &args.prefix, SnapshotFormat::Parquet)
        .context("locate raw snapshot")?;
    let options = NormalizeOptions {
        policy: if args.flag_invalid {
            InvalidRowPolicy::Flag
        } else {
            InvalidRowPolicy::Drop
        },
    };
    let normalized = normalize(&located.frame, &options)
        .with_context(|| format!("normalize {}", located.path.display()))?;

    let stamp = Local::now().naive_local();
    let paths = write_snapshot(&normalized.frame, &args.output_dir, &args.prefix, stamp)
        .context("write cleaned snapshot")?;
    let report_path = write_report(&normalized.report, &args.output_dir, &args.prefix, stamp)
        .context("write normalization report")?;

    Ok(StageOutcome {
        stage: "clean",
        input: Some(located.path),
        rows_in: located.frame.height(),
        rows_out: normalized.frame.height(),
        paths,
        report: Some(normalized.report),
        report_path: Some(report_path),
    })
}

pub fn run_metrics(args: &MetricsArgs) -> Result<StageOutcome> {
    let span = info_span!("metrics", input_dir = %args.input_dir.display());
    let _guard = span.enter();

    let located = locate(&args.input_dir, &args.prefix, SnapshotFormat::Parquet)
        .context("locate cleaned snapshot")?;
    let enriched = compute_metrics(&located.frame)
        .with_context(|| format!("compute metrics over {}", located.path.display()))?;
    let paths = write_snapshot(
        &enriched,
        &args.output_dir,
        &args.output_prefix,
        Local::now().naive_local(),
    )
    .context("write metrics snapshot")?;

    Ok(StageOutcome {
        stage: "metrics",
        input: Some(located.path),
        rows_in: located.frame.height(),
        rows_out: enriched.height(),
        paths,
        report: None,
        report_path: None,
    })
}

/// The normalization report lands beside the cleaned snapshot, sharing
/// its timestamp.
fn write_report(
    report: &NormalizeReport,
    dir: &std::path::Path,
    prefix: &str,
    stamp: NaiveDateTime,
) -> Result<PathBuf> {
    let path = dir.join(format!(
        "{prefix}_{}_report.json",
        stamp.format(FILE_STAMP_FORMAT)
    ));
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, json)?;
    Ok(path)
}
