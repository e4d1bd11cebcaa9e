//! Snapshot file discovery.
//!
//! Each layer directory holds timestamped snapshots named
//! `<prefix>_<YYYYMMDD_HHMMSS>.<ext>`. Selection of the latest snapshot
//! is a pure function over an explicit candidate listing: embedded
//! timestamp first, filesystem mtime when the name carries none, lexical
//! filename order as the final tie-break.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::NaiveDateTime;

use mkt_model::{PipelineError, Result, SnapshotFormat};

/// Timestamp formats accepted inside snapshot filenames, most specific
/// first.
const TIMESTAMP_FORMATS: &[&str] = &["%Y%m%d_%H%M%S", "%Y%m%d_%H%M"];

/// One file matching the snapshot naming pattern.
#[derive(Debug, Clone)]
pub struct SnapshotCandidate {
    pub path: PathBuf,
    pub file_name: String,
    /// Timestamp embedded in the filename, when parseable.
    pub timestamp: Option<NaiveDateTime>,
    /// Filesystem modification time, used when no timestamp parses.
    pub modified: Option<SystemTime>,
}

/// Parses the timestamp embedded in a snapshot filename.
///
/// Returns `None` when the name does not match `<prefix>_<ts>.<ext>` or
/// the timestamp segment fits none of the accepted formats.
pub fn parse_snapshot_timestamp(
    file_name: &str,
    prefix: &str,
    extension: &str,
) -> Option<NaiveDateTime> {
    let stem = file_name
        .strip_prefix(prefix)?
        .strip_prefix('_')?
        .strip_suffix(extension)?
        .strip_suffix('.')?;
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(stem, format).ok())
}

/// Lists every file in `dir` matching `<prefix>*.<ext>` for the given
/// format, sorted by filename.
pub fn list_snapshot_files(
    dir: &Path,
    prefix: &str,
    format: SnapshotFormat,
) -> Result<Vec<SnapshotCandidate>> {
    if !dir.is_dir() {
        return Err(PipelineError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| PipelineError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let extension = format.extension();
    let mut candidates = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| PipelineError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        let matches_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if !file_name.starts_with(prefix) || !matches_extension {
            continue;
        }
        let timestamp = parse_snapshot_timestamp(file_name, prefix, extension);
        let modified = entry.metadata().ok().and_then(|meta| meta.modified().ok());
        candidates.push(SnapshotCandidate {
            path: path.clone(),
            file_name: file_name.to_string(),
            timestamp,
            modified,
        });
    }

    candidates.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(candidates)
}

/// Picks the latest candidate under the deterministic comparator.
///
/// Any candidate with a parsed timestamp outranks every candidate
/// without one; among untimestamped candidates mtime decides; equal keys
/// fall back to lexical filename order, greatest last.
pub fn select_latest(candidates: &[SnapshotCandidate]) -> Option<&SnapshotCandidate> {
    candidates.iter().max_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.modified.cmp(&b.modified))
            .then_with(|| a.file_name.cmp(&b.file_name))
    })
}

/// Resolves the path of the latest snapshot in a layer directory.
pub fn latest_snapshot(dir: &Path, prefix: &str, format: SnapshotFormat) -> Result<PathBuf> {
    let candidates = list_snapshot_files(dir, prefix, format)?;
    let latest = select_latest(&candidates).ok_or_else(|| PipelineError::SnapshotNotFound {
        dir: dir.to_path_buf(),
        prefix: prefix.to_string(),
        extension: format.extension(),
    })?;
    tracing::debug!(
        candidates = candidates.len(),
        latest = %latest.file_name,
        "selected latest snapshot"
    );
    Ok(latest.path.clone())
}
