//! Snapshot readers.
//!
//! Parquet is the authoritative format for round-tripping types; CSV
//! reading exists for completeness and debugging, with schema inference
//! left to Polars.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use mkt_model::{PipelineError, Result, SnapshotFormat};

/// Reads one snapshot file into a `DataFrame`.
///
/// Any open or parse failure surfaces as `SnapshotRead` naming the file;
/// a truncated or corrupt snapshot never yields a partial table.
pub fn read_snapshot(path: &Path, format: SnapshotFormat) -> Result<DataFrame> {
    let frame = match format {
        SnapshotFormat::Parquet => read_parquet(path),
        SnapshotFormat::Csv => read_csv(path),
    }
    .map_err(|source| PipelineError::SnapshotRead {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(rows = frame.height(), path = %path.display(), "loaded snapshot");
    Ok(frame)
}

fn read_parquet(path: &Path) -> PolarsResult<DataFrame> {
    let file = File::open(path).map_err(PolarsError::from)?;
    ParquetReader::new(file).finish()
}

fn read_csv(path: &Path) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
}
