//! Error taxonomy shared by every pipeline stage.
//!
//! Fatal errors abort the current stage before anything is written. Soft
//! validation drops are not errors; they travel in the normalization
//! report instead.

use std::path::PathBuf;

use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// No file matching `<prefix>_*.<extension>` exists in the layer
    /// directory.
    #[error("no snapshot matching {prefix}_*.{extension} in {}", dir.display())]
    SnapshotNotFound {
        dir: PathBuf,
        prefix: String,
        extension: &'static str,
    },

    /// A snapshot file exists but cannot be parsed into a table.
    #[error("failed to read snapshot {}: {source}", path.display())]
    SnapshotRead {
        path: PathBuf,
        source: PolarsError,
    },

    /// Normalization left zero usable rows; writing an empty snapshot
    /// would look like success downstream.
    #[error("normalization left no usable rows (input had {rows_in})")]
    EmptyOutput { rows_in: usize },

    #[error("directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read directory {}: {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Frame(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_pattern() {
        let error = PipelineError::SnapshotNotFound {
            dir: PathBuf::from("data/bronze"),
            prefix: "marketing".to_string(),
            extension: "parquet",
        };
        let message = error.to_string();
        assert!(message.contains("marketing_*.parquet"));
        assert!(message.contains("bronze"));
    }

    #[test]
    fn empty_output_reports_input_size() {
        let error = PipelineError::EmptyOutput { rows_in: 42 };
        assert!(error.to_string().contains("42"));
    }
}
