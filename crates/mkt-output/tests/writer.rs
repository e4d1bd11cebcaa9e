//! Filesystem tests for the snapshot writer.

use std::fs::File;

use chrono::NaiveDate;
use polars::prelude::*;
use tempfile::TempDir;

use mkt_output::write_snapshot;

fn sample_frame() -> DataFrame {
    DataFrame::new(vec![
        Series::new("customer_id".into(), vec!["A", "B"]).into(),
        Series::new("clicks".into(), vec![5i64, 0]).into(),
        Series::new("roas".into(), vec![Some(1.5f64), None]).into(),
    ])
    .unwrap()
}

fn stamp() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 9, 6)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[test]
fn writes_both_formats_with_timestamped_names() {
    let dir = TempDir::new().unwrap();
    let paths = write_snapshot(&sample_frame(), dir.path(), "marketing", stamp()).unwrap();

    assert!(paths.parquet.ends_with("marketing_20250906_120000.parquet"));
    assert!(paths.csv.ends_with("marketing_20250906_120000.csv"));
    assert!(paths.parquet.is_file());
    assert!(paths.csv.is_file());

    // No tmp droppings left behind.
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn creates_missing_output_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("data").join("gold");
    let paths = write_snapshot(&sample_frame(), &nested, "marketing_metrics", stamp()).unwrap();
    assert!(paths.parquet.is_file());
}

#[test]
fn parquet_round_trips_nulls() {
    let dir = TempDir::new().unwrap();
    let frame = sample_frame();
    let paths = write_snapshot(&frame, dir.path(), "marketing", stamp()).unwrap();

    let loaded = ParquetReader::new(File::open(&paths.parquet).unwrap())
        .finish()
        .unwrap();
    assert!(loaded.equals_missing(&frame));
}

#[test]
fn csv_serializes_nulls_as_empty_cells() {
    let dir = TempDir::new().unwrap();
    let paths = write_snapshot(&sample_frame(), dir.path(), "marketing", stamp()).unwrap();
    let text = std::fs::read_to_string(&paths.csv).unwrap();
    assert!(text.starts_with("customer_id,clicks,roas\n"));
    // The null roas cell must not serialize as NaN or inf.
    assert!(!text.to_lowercase().contains("nan"));
    assert!(!text.to_lowercase().contains("inf"));
}
