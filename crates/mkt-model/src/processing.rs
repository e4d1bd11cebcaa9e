//! Snapshot file conventions shared by the locator and the writer.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// On-disk snapshot format.
///
/// Parquet is authoritative for types; CSV is the human-readable
/// derivative and is never read back by the pipeline itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotFormat {
    Parquet,
    Csv,
}

impl SnapshotFormat {
    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            SnapshotFormat::Parquet => "parquet",
            SnapshotFormat::Csv => "csv",
        }
    }
}

/// Paths of one dual-format snapshot written by a stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotPaths {
    pub parquet: PathBuf,
    pub csv: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions() {
        assert_eq!(SnapshotFormat::Parquet.extension(), "parquet");
        assert_eq!(SnapshotFormat::Csv.extension(), "csv");
    }
}
