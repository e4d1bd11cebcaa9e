//! Snapshot writer: one table out as Parquet plus CSV.
//!
//! Each file is serialized to a `.tmp` sibling and renamed into place,
//! so a failed run never leaves a partial file under the final name.
//! Parquet is authoritative for types; the CSV is a human-readable
//! derivative.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use polars::prelude::*;

use mkt_model::{Result, SnapshotPaths};

/// Filename timestamp layout, shared by writer and locator.
pub const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Persists a table into `dir` as `<prefix>_<stamp>.parquet` and
/// `<prefix>_<stamp>.csv`, creating the directory when needed.
pub fn write_snapshot(
    frame: &DataFrame,
    dir: &Path,
    prefix: &str,
    stamp: NaiveDateTime,
) -> Result<SnapshotPaths> {
    std::fs::create_dir_all(dir)?;
    let base = format!("{prefix}_{}", stamp.format(FILE_STAMP_FORMAT));

    let parquet = dir.join(format!("{base}.parquet"));
    write_atomic(&parquet, |file| {
        ParquetWriter::new(file).finish(&mut frame.clone())?;
        Ok(())
    })?;

    let csv = dir.join(format!("{base}.csv"));
    write_atomic(&csv, |file| {
        CsvWriter::new(file)
            .include_header(true)
            .finish(&mut frame.clone())?;
        Ok(())
    })?;

    tracing::info!(
        rows = frame.height(),
        parquet = %parquet.display(),
        csv = %csv.display(),
        "wrote snapshot"
    );
    Ok(SnapshotPaths { parquet, csv })
}

/// Serializes into `<target>.tmp`, then renames over the final name.
/// On any failure the tmp file is removed and nothing exists under
/// `target`.
fn write_atomic(target: &Path, serialize: impl FnOnce(File) -> Result<()>) -> Result<()> {
    let tmp = tmp_sibling(target);
    let outcome = File::create(&tmp)
        .map_err(Into::into)
        .and_then(serialize)
        .and_then(|()| std::fs::rename(&tmp, target).map_err(Into::into));
    if outcome.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    outcome
}

fn tmp_sibling(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_sibling_appends_suffix() {
        let tmp = tmp_sibling(Path::new("data/silver/marketing_20250906_120000.parquet"));
        assert_eq!(
            tmp,
            Path::new("data/silver/marketing_20250906_120000.parquet.tmp")
        );
    }
}
