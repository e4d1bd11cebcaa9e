//! Parquet snapshot round-trip through the reader.

use std::fs::File;

use polars::prelude::*;
use tempfile::TempDir;

use mkt_ingest::read_snapshot;
use mkt_model::SnapshotFormat;

#[test]
fn parquet_round_trips_types() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("marketing_20250906_120000.parquet");

    let mut frame = DataFrame::new(vec![
        Series::new("customer_id".into(), vec!["A", "B"]).into(),
        Series::new("clicks".into(), vec![3i64, 0]).into(),
        Series::new("ad_spend".into(), vec![Some(1.25f64), None]).into(),
    ])
    .unwrap();
    ParquetWriter::new(File::create(&path).unwrap())
        .finish(&mut frame)
        .unwrap();

    let loaded = read_snapshot(&path, SnapshotFormat::Parquet).unwrap();
    assert!(loaded.equals_missing(&frame));
    assert_eq!(loaded.column("clicks").unwrap().dtype(), &DataType::Int64);
    assert_eq!(
        loaded.column("ad_spend").unwrap().dtype(),
        &DataType::Float64
    );
}
