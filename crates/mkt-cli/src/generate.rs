//! Synthetic raw-data generator for the bronze layer.
//!
//! Field sampling follows the production feed's shape: impressions
//! depend on the channel, clicks and visits are gated on the funnel
//! step above them, and retargeting campaigns carry no previous
//! purchases. The output deliberately satisfies only most of the
//! normalizer's constraints; the cleaning stage owns enforcement.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use mkt_core::normalize::STAMP_FORMAT;
use mkt_model::{AdvertisingPlatform, CampaignChannel, CampaignType, Gender};

/// Revenue booked per conversion, sampled uniformly.
const REVENUE_VALUES: [f64; 2] = [1700.0, 2200.0];

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub rows: usize,
    /// Seed for reproducible sampling; entropy-seeded when absent.
    pub seed: Option<u64>,
}

/// Generates a raw snapshot of `rows` customer/campaign records.
pub fn generate_frame(options: &GenerateOptions) -> PolarsResult<DataFrame> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    // Two live campaigns per run, like the production feed.
    let campaign_ids = [Uuid::new_v4().to_string(), Uuid::new_v4().to_string()];
    let window_start = date_window_start();
    let window_seconds = 31 * 24 * 60 * 60;
    let extraction = Local::now()
        .naive_local()
        .format(STAMP_FORMAT)
        .to_string();

    let rows = options.rows;
    let mut customer_id = Vec::with_capacity(rows);
    let mut age = Vec::with_capacity(rows);
    let mut gender = Vec::with_capacity(rows);
    let mut income = Vec::with_capacity(rows);
    let mut campaign_id = Vec::with_capacity(rows);
    let mut campaign_channel = Vec::with_capacity(rows);
    let mut campaign_type = Vec::with_capacity(rows);
    let mut ad_spend = Vec::with_capacity(rows);
    let mut impressions = Vec::with_capacity(rows);
    let mut clicks = Vec::with_capacity(rows);
    let mut conversions = Vec::with_capacity(rows);
    let mut revenue = Vec::with_capacity(rows);
    let mut website_visits = Vec::with_capacity(rows);
    let mut time_on_site = Vec::with_capacity(rows);
    let mut previous_purchases = Vec::with_capacity(rows);
    let mut date_received = Vec::with_capacity(rows);
    let mut advertising_platform = Vec::with_capacity(rows);

    for _ in 0..rows {
        let channel = *pick(&mut rng, CampaignChannel::VALUES);
        let kind = *pick(&mut rng, CampaignType::VALUES);

        let impressions_v = match channel {
            "display" => rng.gen_range(5..=35i64),
            "social_media" => rng.gen_range(5..=25),
            "email" => rng.gen_range(1..=15),
            _ => rng.gen_range(1..=10),
        };
        // 15% of records convert, for one or two conversions.
        let conversions_v = if rng.gen_bool(0.15) {
            rng.gen_range(1..=2i64)
        } else {
            0
        };
        let revenue_v = conversions_v as f64 * *pick(&mut rng, &REVENUE_VALUES);
        // Converting records always carry a healthy click count; half of
        // the rest never clicked at all.
        let clicks_v = if conversions_v > 0 {
            rng.gen_range(10.max(conversions_v)..=32)
        } else if rng.gen_bool(0.5) {
            0
        } else {
            rng.gen_range(1..=32)
        };
        let website_visits_v = if clicks_v == 0 {
            0
        } else {
            rng.gen_range(1..=clicks_v.min(3))
        };
        let time_on_site_v = if website_visits_v == 0 {
            0
        } else {
            rng.gen_range(60..=600i64)
        };
        let previous_purchases_v = if kind == CampaignType::Retargeting.as_str() {
            0
        } else {
            rng.gen_range(0..=2i64)
        };
        let ad_spend_v = round2(impressions_v as f64 * rng.gen_range(0.05..0.20));
        let received = window_start + Duration::seconds(rng.gen_range(0..window_seconds));

        customer_id.push(Uuid::new_v4().to_string());
        age.push(rng.gen_range(18..=65i64));
        gender.push(*pick(&mut rng, Gender::VALUES));
        income.push(round2(rng.gen_range(1000.0..10000.0)));
        campaign_id.push(pick(&mut rng, &campaign_ids).clone());
        campaign_channel.push(channel);
        campaign_type.push(kind);
        ad_spend.push(ad_spend_v);
        impressions.push(impressions_v);
        clicks.push(clicks_v);
        conversions.push(conversions_v);
        revenue.push(revenue_v);
        website_visits.push(website_visits_v);
        time_on_site.push(time_on_site_v);
        previous_purchases.push(previous_purchases_v);
        date_received.push(received.format("%Y-%m-%dT%H:%M:%S").to_string());
        advertising_platform.push(*pick(&mut rng, AdvertisingPlatform::VALUES));
    }

    DataFrame::new(vec![
        Series::new("customer_id".into(), customer_id).into(),
        Series::new("age".into(), age).into(),
        Series::new("gender".into(), gender).into(),
        Series::new("income".into(), income).into(),
        Series::new("campaign_id".into(), campaign_id).into(),
        Series::new("campaign_channel".into(), campaign_channel).into(),
        Series::new("campaign_type".into(), campaign_type).into(),
        Series::new("ad_spend".into(), ad_spend).into(),
        Series::new("impressions".into(), impressions).into(),
        Series::new("clicks".into(), clicks).into(),
        Series::new("conversions".into(), conversions).into(),
        Series::new("revenue".into(), revenue).into(),
        Series::new("website_visits".into(), website_visits).into(),
        Series::new("time_on_site".into(), time_on_site).into(),
        Series::new("previous_purchases".into(), previous_purchases).into(),
        Series::new("date_received".into(), date_received).into(),
        Series::new("advertising_platform".into(), advertising_platform).into(),
        Series::new("extraction_date".into(), vec![extraction; rows]).into(),
    ])
}

/// Received dates fall in a one-month observation window.
fn date_window_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 8, 6)
        .expect("valid window start")
        .and_hms_opt(0, 0, 0)
        .expect("valid midnight")
}

fn pick<'a, T>(rng: &mut StdRng, values: &'a [T]) -> &'a T {
    &values[rng.gen_range(0..values.len())]
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
