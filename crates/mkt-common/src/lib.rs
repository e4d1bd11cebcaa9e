//! Value-level helpers over Polars `AnyValue`.
//!
//! Raw snapshots arrive with whatever dtypes the upstream writer chose,
//! so every crate that touches a cell goes through these conversions
//! instead of matching on `AnyValue` itself. Coercion here is lenient:
//! anything unconvertible maps to `None`, never to an error.

use polars::prelude::*;

/// Missing-value markers that upstream CSV tooling leaves behind.
const MISSING_MARKERS: &[&str] = &["na", "n/a", "nan", "null", "none"];

/// Returns true when a string cell should be treated as missing.
///
/// Empty and whitespace-only strings are missing, as are the usual
/// spreadsheet/pandas placeholders (case-insensitive).
pub fn is_missing_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || MISSING_MARKERS
            .iter()
            .any(|marker| trimmed.eq_ignore_ascii_case(marker))
}

/// Parses a string as `f64`, treating missing markers as `None`.
pub fn parse_f64(value: &str) -> Option<f64> {
    if is_missing_value(value) {
        return None;
    }
    value.trim().parse::<f64>().ok()
}

/// Parses a string as `i64`, treating missing markers as `None`.
///
/// Falls back to float parsing with truncation so "3.0" in a count
/// column still coerces.
pub fn parse_i64(value: &str) -> Option<i64> {
    if is_missing_value(value) {
        return None;
    }
    let trimmed = value.trim();
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Some(parsed);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v as i64)
}

/// Formats a float without trailing zeros ("1.50" -> "1.5", "1.0" -> "1").
pub fn format_numeric(value: f64) -> String {
    let rendered = format!("{value}");
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Converts an `AnyValue` to its string form. `Null` becomes "".
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        other => other.to_string(),
    }
}

/// Converts an `AnyValue` to `f64`. Non-finite floats count as missing.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    let converted = match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(ref s) => parse_f64(s),
        _ => None,
    };
    converted.filter(|v| v.is_finite())
}

/// Converts an `AnyValue` to `i64`. Floats truncate; non-finite floats
/// count as missing.
pub fn any_to_i64(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(i64::from(v)),
        AnyValue::Int16(v) => Some(i64::from(v)),
        AnyValue::Int32(v) => Some(i64::from(v)),
        AnyValue::Int64(v) => Some(v),
        AnyValue::UInt8(v) => Some(i64::from(v)),
        AnyValue::UInt16(v) => Some(i64::from(v)),
        AnyValue::UInt32(v) => Some(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).ok(),
        AnyValue::Float32(v) => f64::from(v).is_finite().then(|| f64::from(v) as i64),
        AnyValue::Float64(v) => v.is_finite().then(|| v as i64),
        AnyValue::String(s) => parse_i64(s),
        AnyValue::StringOwned(ref s) => parse_i64(s),
        _ => None,
    }
}

/// Reads one cell as a string; missing column or out-of-bounds index
/// reads as "".
pub fn column_str(df: &DataFrame, name: &str, idx: usize) -> String {
    match df.column(name) {
        Ok(column) => any_to_string(column.get(idx).unwrap_or(AnyValue::Null)),
        Err(_) => String::new(),
    }
}

/// Reads one cell as `f64`.
pub fn column_f64(df: &DataFrame, name: &str, idx: usize) -> Option<f64> {
    let column = df.column(name).ok()?;
    any_to_f64(column.get(idx).unwrap_or(AnyValue::Null))
}

/// Reads one cell as `i64`.
pub fn column_i64(df: &DataFrame, name: &str, idx: usize) -> Option<i64> {
    let column = df.column(name).ok()?;
    any_to_i64(column.get(idx).unwrap_or(AnyValue::Null))
}
