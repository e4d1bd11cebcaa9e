//! Per-record KPI derivation for the enriched layer.
//!
//! Every ratio goes through [`safe_div`], so a zero or missing
//! denominator yields a null cell. No float sentinel (infinity, NaN)
//! ever reaches a column or the serialized output.

use chrono::Local;
use polars::prelude::*;

use mkt_common::column_f64;
use mkt_model::{EXTRACTION_DATE, Result};

use crate::normalize::STAMP_FORMAT;

/// The six derived columns, in output order.
pub const METRIC_COLUMNS: &[&str] = &["ctr", "cvr", "cpc", "cpa", "roas", "margin"];

/// Guarded division: `None` on a missing operand, a zero denominator,
/// or a non-finite result.
pub fn safe_div(num: Option<f64>, den: Option<f64>) -> Option<f64> {
    let (num, den) = (num?, den?);
    if den == 0.0 || !den.is_finite() || !num.is_finite() {
        return None;
    }
    let quotient = num / den;
    quotient.is_finite().then_some(quotient)
}

/// Rounds half away from zero at the given number of decimal places,
/// matching decimal rounding rather than float truncation.
pub fn round_half_away(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Appends the six KPI columns to a cleaned table, one value per row,
/// and restamps `extraction_date` with the computation instant.
///
/// Row granularity is preserved 1:1; rows whose inputs cannot support a
/// given ratio get a null in that metric and keep everything else.
pub fn compute_metrics(clean: &DataFrame) -> Result<DataFrame> {
    let height = clean.height();
    let mut ctr = Vec::with_capacity(height);
    let mut cvr = Vec::with_capacity(height);
    let mut cpc = Vec::with_capacity(height);
    let mut cpa = Vec::with_capacity(height);
    let mut roas = Vec::with_capacity(height);
    let mut margin = Vec::with_capacity(height);

    for idx in 0..height {
        let impressions = column_f64(clean, "impressions", idx);
        let clicks = column_f64(clean, "clicks", idx);
        let conversions = column_f64(clean, "conversions", idx);
        let ad_spend = column_f64(clean, "ad_spend", idx);
        let revenue = column_f64(clean, "revenue", idx);

        ctr.push(rounded(safe_div(clicks, impressions), 100.0));
        cvr.push(rounded(safe_div(conversions, clicks), 100.0));
        cpc.push(rounded(safe_div(ad_spend, clicks), 1.0));
        cpa.push(rounded(safe_div(ad_spend, conversions), 1.0));
        roas.push(rounded(safe_div(revenue, ad_spend), 1.0));
        let gross = match (revenue, ad_spend) {
            (Some(revenue), Some(ad_spend)) => Some(revenue - ad_spend),
            _ => None,
        };
        margin.push(rounded(safe_div(gross, revenue), 100.0));
    }

    let mut enriched = clean.clone();
    enriched.with_column(Series::new("ctr".into(), ctr))?;
    enriched.with_column(Series::new("cvr".into(), cvr))?;
    enriched.with_column(Series::new("cpc".into(), cpc))?;
    enriched.with_column(Series::new("cpa".into(), cpa))?;
    enriched.with_column(Series::new("roas".into(), roas))?;
    enriched.with_column(Series::new("margin".into(), margin))?;

    let stamp = Local::now().naive_local().format(STAMP_FORMAT).to_string();
    enriched.with_column(Series::new(
        EXTRACTION_DATE.into(),
        vec![Some(stamp); height],
    ))?;

    tracing::info!(rows = height, "computed record-level metrics");
    Ok(enriched)
}

fn rounded(ratio: Option<f64>, scale: f64) -> Option<f64> {
    ratio.map(|value| round_half_away(value * scale, 2))
}
