//! Snapshot discovery and loading (the pipeline's locator).

pub mod discovery;
pub mod reader;

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;

use mkt_model::{Result, SnapshotFormat};

pub use discovery::{
    SnapshotCandidate, latest_snapshot, list_snapshot_files, parse_snapshot_timestamp,
    select_latest,
};
pub use reader::read_snapshot;

/// A located snapshot: the loaded table plus the file it came from.
#[derive(Debug)]
pub struct Located {
    pub path: PathBuf,
    pub frame: DataFrame,
}

/// Finds the latest snapshot in a layer directory and loads it.
pub fn locate(dir: &Path, prefix: &str, format: SnapshotFormat) -> Result<Located> {
    let path = latest_snapshot(dir, prefix, format)?;
    let frame = read_snapshot(&path, format)?;
    Ok(Located { path, frame })
}
