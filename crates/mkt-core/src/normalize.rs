//! Schema normalization for raw campaign snapshots.
//!
//! Steps run in a fixed order so a rerun over the same input produces
//! the same table: dedup on the primary key, per-column type coercion,
//! imputation, row validation, and finally the processing timestamp.
//! Coercion failures are soft (the value becomes missing); only an
//! empty result table is fatal.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use polars::prelude::*;

use mkt_common::{any_to_f64, any_to_i64, any_to_string, is_missing_value};
use mkt_model::{
    CampaignType, ColumnSpec, ColumnType, EXTRACTION_DATE, Imputation, NormalizeReport,
    PRIMARY_KEY, PipelineError, Result, columns,
};

/// Stamp format for `extraction_date`, fractional seconds included.
pub const STAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Canonical form for other timestamp columns.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Accepted input layouts for timestamp strings, most specific first.
const PARSE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// What happens to a row that fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidRowPolicy {
    /// Remove the row from the output (the default).
    #[default]
    Drop,
    /// Keep every row and append a boolean `valid` column, preserving
    /// input cardinality for consumers that need it.
    Flag,
}

#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    pub policy: InvalidRowPolicy,
}

/// A normalized table plus its row accounting.
#[derive(Debug)]
pub struct Normalized {
    pub frame: DataFrame,
    pub report: NormalizeReport,
}

/// Typed working storage for one column during normalization.
enum ColumnData {
    Text(Vec<Option<String>>),
    Count(Vec<Option<i64>>),
    Amount(Vec<Option<f64>>),
}

/// Normalizes a raw snapshot into the canonical schema.
pub fn normalize(raw: &DataFrame, options: &NormalizeOptions) -> Result<Normalized> {
    let rows_in = raw.height();
    let mut report = NormalizeReport {
        rows_in: rows_in as u64,
        ..Default::default()
    };

    let deduped = dedup_by_key(raw)?;
    report.rows_deduped = (rows_in - deduped.height()) as u64;
    tracing::debug!(
        rows_in,
        removed = report.rows_deduped,
        "deduplicated on primary key"
    );

    let height = deduped.height();
    let mut table: Vec<(ColumnSpec, ColumnData)> = columns()
        .iter()
        .map(|spec| (*spec, coerce_column(&deduped, spec, height)))
        .collect();

    impute(&mut table);
    report.values_repaired = repair_retargeting(&mut table);

    let failures: Vec<Option<String>> = (0..height)
        .map(|idx| first_failed_rule(&table, idx))
        .collect();
    for rule in failures.iter().flatten() {
        report.record_drop(rule);
    }

    let keep: Vec<bool> = failures.iter().map(Option::is_none).collect();
    if options.policy == InvalidRowPolicy::Drop {
        retain_rows(&mut table, &keep);
    }

    stamp_extraction_date(&mut table, chrono::Local::now().naive_local());

    let mut series: Vec<Column> = table
        .iter()
        .map(|(spec, data)| build_series(spec.name, data))
        .collect();
    if options.policy == InvalidRowPolicy::Flag {
        series.push(Series::new("valid".into(), keep).into());
    }
    let frame = DataFrame::new(series)?;

    report.rows_out = frame.height() as u64;
    if frame.height() == 0 {
        return Err(PipelineError::EmptyOutput { rows_in });
    }
    tracing::info!(
        rows_in,
        rows_out = report.rows_out,
        dropped = report.rows_dropped(),
        repaired = report.values_repaired,
        "normalized snapshot"
    );
    Ok(Normalized { frame, report })
}

/// Keeps the first occurrence of each primary-key value, in input order.
/// Rows with a missing key are all kept; validation deals with them.
fn dedup_by_key(raw: &DataFrame) -> Result<DataFrame> {
    let Ok(key_column) = raw.column(PRIMARY_KEY) else {
        return Ok(raw.clone());
    };
    let mut seen = BTreeSet::new();
    let mut keep = Vec::with_capacity(raw.height());
    for idx in 0..raw.height() {
        let key = any_to_string(key_column.get(idx).unwrap_or(AnyValue::Null));
        if is_missing_value(&key) {
            keep.push(true);
        } else {
            keep.push(seen.insert(key));
        }
    }
    let mask = BooleanChunked::from_slice("dedup".into(), &keep);
    Ok(raw.filter(&mask)?)
}

/// Coerces one input column to its canonical type. A column absent from
/// the input materializes as all-missing.
fn coerce_column(df: &DataFrame, spec: &ColumnSpec, height: usize) -> ColumnData {
    let source = df.column(spec.name).ok();
    let cell = |idx: usize| -> AnyValue<'_> {
        source
            .and_then(|column| column.get(idx).ok())
            .unwrap_or(AnyValue::Null)
    };
    match spec.dtype {
        ColumnType::Text => {
            ColumnData::Text((0..height).map(|idx| coerce_text(cell(idx))).collect())
        }
        ColumnType::Count => {
            ColumnData::Count((0..height).map(|idx| any_to_i64(cell(idx))).collect())
        }
        ColumnType::Amount => {
            ColumnData::Amount((0..height).map(|idx| any_to_f64(cell(idx))).collect())
        }
        ColumnType::Timestamp => {
            ColumnData::Text((0..height).map(|idx| coerce_timestamp(cell(idx))).collect())
        }
    }
}

fn coerce_text(value: AnyValue<'_>) -> Option<String> {
    let text = any_to_string(value);
    let trimmed = text.trim();
    if is_missing_value(trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Canonicalizes a timestamp cell to `YYYY-MM-DDTHH:MM:SS`.
fn coerce_timestamp(value: AnyValue<'_>) -> Option<String> {
    let parsed = match value {
        AnyValue::Datetime(raw, unit, _) => timestamp_from_units(raw, unit),
        AnyValue::DatetimeOwned(raw, unit, _) => timestamp_from_units(raw, unit),
        AnyValue::Date(days) => NaiveDate::from_ymd_opt(1970, 1, 1)
            .and_then(|epoch| epoch.checked_add_signed(Duration::days(i64::from(days))))
            .and_then(|date| date.and_hms_opt(0, 0, 0)),
        other => parse_timestamp_str(&any_to_string(other)),
    }?;
    Some(parsed.format(TIMESTAMP_FORMAT).to_string())
}

fn timestamp_from_units(raw: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let (secs, nanos) = match unit {
        TimeUnit::Nanoseconds => (raw.div_euclid(1_000_000_000), raw.rem_euclid(1_000_000_000)),
        TimeUnit::Microseconds => (raw.div_euclid(1_000_000), raw.rem_euclid(1_000_000) * 1_000),
        TimeUnit::Milliseconds => (raw.div_euclid(1_000), raw.rem_euclid(1_000) * 1_000_000),
    };
    DateTime::from_timestamp(secs, nanos as u32).map(|dt| dt.naive_utc())
}

fn parse_timestamp_str(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if is_missing_value(trimmed) {
        return None;
    }
    for format in PARSE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Applies the per-column imputation rules. The column mean is computed
/// over values present after dedup, before any row is dropped; a column
/// with no present values fills with NaN, which then propagates.
fn impute(table: &mut [(ColumnSpec, ColumnData)]) {
    for (spec, data) in table.iter_mut() {
        let ColumnData::Amount(values) = data else {
            continue;
        };
        let fill = match spec.imputation {
            Imputation::None => continue,
            Imputation::Zero => 0.0,
            Imputation::ColumnMean => {
                let present: Vec<f64> = values.iter().flatten().copied().collect();
                if present.is_empty() {
                    f64::NAN
                } else {
                    present.iter().sum::<f64>() / present.len() as f64
                }
            }
        };
        for value in values.iter_mut() {
            if value.is_none() {
                *value = Some(fill);
            }
        }
    }
}

/// Retargeting campaigns cannot carry previous purchases; such rows are
/// repaired in place rather than dropped. Returns the repair count.
fn repair_retargeting(table: &mut [(ColumnSpec, ColumnData)]) -> u64 {
    let retargeting: Vec<bool> = match data_for(table, "campaign_type") {
        Some(ColumnData::Text(values)) => values
            .iter()
            .map(|value| value.as_deref() == Some(CampaignType::Retargeting.as_str()))
            .collect(),
        _ => return 0,
    };
    let Some((_, ColumnData::Count(purchases))) = table
        .iter_mut()
        .find(|(spec, _)| spec.name == "previous_purchases")
    else {
        return 0;
    };
    let mut repaired = 0;
    for (value, is_retargeting) in purchases.iter_mut().zip(retargeting) {
        if is_retargeting && *value != Some(0) {
            *value = Some(0);
            repaired += 1;
        }
    }
    repaired
}

/// Returns the first rule a row fails, in the fixed rule order:
/// cross-field comparisons, then missing required values, then closed
/// sets, then numeric ranges.
fn first_failed_rule(table: &[(ColumnSpec, ColumnData)], idx: usize) -> Option<String> {
    let conversions = count_at(table, "conversions", idx);
    let clicks = count_at(table, "clicks", idx);
    let impressions = count_at(table, "impressions", idx);
    if let (Some(conversions), Some(clicks)) = (conversions, clicks) {
        if conversions > clicks {
            return Some("conversions_exceed_clicks".to_string());
        }
    }
    if let (Some(clicks), Some(impressions)) = (clicks, impressions) {
        if clicks > impressions {
            return Some("clicks_exceed_impressions".to_string());
        }
    }
    for (spec, data) in table {
        if spec.required && is_missing_at(data, idx) {
            return Some(format!("missing_value:{}", spec.name));
        }
    }
    for (spec, data) in table {
        if !spec.check.is_closed_set() {
            continue;
        }
        if let ColumnData::Text(values) = data {
            if let Some(value) = values[idx].as_deref() {
                if !spec.check.str_ok(value) {
                    return Some(format!("invalid_category:{}", spec.name));
                }
            }
        }
    }
    for (spec, data) in table {
        let in_range = match data {
            ColumnData::Count(values) => values[idx].map(|v| spec.check.int_ok(v)),
            ColumnData::Amount(values) => values[idx].map(|v| spec.check.float_ok(v)),
            ColumnData::Text(_) => None,
        };
        if in_range == Some(false) {
            return Some(format!("out_of_range:{}", spec.name));
        }
    }
    None
}

fn data_for<'a>(table: &'a [(ColumnSpec, ColumnData)], name: &str) -> Option<&'a ColumnData> {
    table
        .iter()
        .find(|(spec, _)| spec.name == name)
        .map(|(_, data)| data)
}

fn count_at(table: &[(ColumnSpec, ColumnData)], name: &str, idx: usize) -> Option<i64> {
    match data_for(table, name)? {
        ColumnData::Count(values) => values[idx],
        _ => None,
    }
}

fn is_missing_at(data: &ColumnData, idx: usize) -> bool {
    match data {
        ColumnData::Text(values) => values[idx].is_none(),
        ColumnData::Count(values) => values[idx].is_none(),
        ColumnData::Amount(values) => values[idx].is_none(),
    }
}

fn retain_rows(table: &mut [(ColumnSpec, ColumnData)], keep: &[bool]) {
    for (_, data) in table.iter_mut() {
        match data {
            ColumnData::Text(values) => retain_by_mask(values, keep),
            ColumnData::Count(values) => retain_by_mask(values, keep),
            ColumnData::Amount(values) => retain_by_mask(values, keep),
        }
    }
}

fn retain_by_mask<T>(values: &mut Vec<T>, keep: &[bool]) {
    let mut idx = 0;
    values.retain(|_| {
        let kept = keep[idx];
        idx += 1;
        kept
    });
}

/// Overwrites `extraction_date` with the processing instant for every
/// surviving row.
fn stamp_extraction_date(table: &mut [(ColumnSpec, ColumnData)], now: NaiveDateTime) {
    let stamp = now.format(STAMP_FORMAT).to_string();
    if let Some((_, ColumnData::Text(values))) = table
        .iter_mut()
        .find(|(spec, _)| spec.name == EXTRACTION_DATE)
    {
        for value in values.iter_mut() {
            *value = Some(stamp.clone());
        }
    }
}

fn build_series(name: &str, data: &ColumnData) -> Column {
    match data {
        ColumnData::Text(values) => Series::new(name.into(), values.clone()).into(),
        ColumnData::Count(values) => Series::new(name.into(), values.clone()).into(),
        ColumnData::Amount(values) => Series::new(name.into(), values.clone()).into(),
    }
}
