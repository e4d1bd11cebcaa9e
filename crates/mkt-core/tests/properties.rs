//! Property tests: normalizer invariants hold for arbitrary raw input.

use std::collections::BTreeSet;

use polars::prelude::*;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use mkt_core::normalize::{NormalizeOptions, normalize};
use mkt_model::PipelineError;

#[derive(Debug, Clone)]
struct RawRow {
    customer_id: String,
    age: i64,
    gender: String,
    income: Option<f64>,
    campaign_type: String,
    ad_spend: Option<f64>,
    impressions: i64,
    clicks: i64,
    conversions: i64,
    website_visits: i64,
    time_on_site: i64,
    previous_purchases: i64,
}

prop_compose! {
    fn raw_row()(
        id in 0u8..12,
        age in 10i64..80,
        gender in prop::sample::select(vec!["M", "F", "X", ""]),
        income in prop::option::of(500f64..12000.0),
        campaign_type in prop::sample::select(vec![
            "brand_awareness", "retargeting", "seasonal", "mystery",
        ]),
        ad_spend in prop::option::of(0f64..10.0),
        impressions in 0i64..40,
        clicks in 0i64..40,
        conversions in 0i64..5,
        website_visits in 0i64..5,
        time_on_site in prop::sample::select(vec![0i64, 30, 60, 300, 600, 700]),
        previous_purchases in 0i64..4,
    ) -> RawRow {
        RawRow {
            customer_id: format!("cust-{id}"),
            age,
            gender: gender.to_string(),
            income,
            campaign_type: campaign_type.to_string(),
            ad_spend,
            impressions,
            clicks,
            conversions,
            website_visits,
            time_on_site,
            previous_purchases,
        }
    }
}

fn frame_from_rows(rows: &[RawRow]) -> DataFrame {
    let n = rows.len();
    DataFrame::new(vec![
        Series::new(
            "customer_id".into(),
            rows.iter().map(|r| r.customer_id.clone()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new("age".into(), rows.iter().map(|r| r.age).collect::<Vec<_>>()).into(),
        Series::new(
            "gender".into(),
            rows.iter().map(|r| r.gender.clone()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "income".into(),
            rows.iter().map(|r| r.income).collect::<Vec<_>>(),
        )
        .into(),
        Series::new("campaign_id".into(), vec!["92c14ef8"; n]).into(),
        Series::new("campaign_channel".into(), vec!["email"; n]).into(),
        Series::new(
            "campaign_type".into(),
            rows.iter().map(|r| r.campaign_type.clone()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "ad_spend".into(),
            rows.iter().map(|r| r.ad_spend).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "impressions".into(),
            rows.iter().map(|r| r.impressions).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "clicks".into(),
            rows.iter().map(|r| r.clicks).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "conversions".into(),
            rows.iter().map(|r| r.conversions).collect::<Vec<_>>(),
        )
        .into(),
        Series::new("revenue".into(), vec![1700.0f64; n]).into(),
        Series::new(
            "website_visits".into(),
            rows.iter().map(|r| r.website_visits).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "time_on_site".into(),
            rows.iter().map(|r| r.time_on_site).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "previous_purchases".into(),
            rows.iter().map(|r| r.previous_purchases).collect::<Vec<_>>(),
        )
        .into(),
        Series::new("date_received".into(), vec!["2025-08-15T00:00:00"; n]).into(),
        Series::new("advertising_platform".into(), vec!["Google Ads"; n]).into(),
        Series::new("extraction_date".into(), vec!["2025-09-01T00:00:00.000000"; n]).into(),
    ])
    .unwrap()
}

proptest! {
    #[test]
    fn output_rows_satisfy_all_invariants(rows in prop::collection::vec(raw_row(), 1..40)) {
        let raw = frame_from_rows(&rows);
        let normalized = match normalize(&raw, &NormalizeOptions::default()) {
            Ok(normalized) => normalized,
            // Everything invalid is a legal outcome for arbitrary input.
            Err(PipelineError::EmptyOutput { .. }) => return Ok(()),
            Err(other) => return Err(TestCaseError::fail(other.to_string())),
        };
        let frame = &normalized.frame;

        // Unique primary key.
        let ids = frame.column("customer_id").unwrap().str().unwrap();
        let mut seen = BTreeSet::new();
        for idx in 0..frame.height() {
            prop_assert!(seen.insert(ids.get(idx).unwrap().to_string()));
        }

        // Funnel ordering and declared ranges.
        let impressions = frame.column("impressions").unwrap().i64().unwrap();
        let clicks = frame.column("clicks").unwrap().i64().unwrap();
        let conversions = frame.column("conversions").unwrap().i64().unwrap();
        let age = frame.column("age").unwrap().i64().unwrap();
        let time_on_site = frame.column("time_on_site").unwrap().i64().unwrap();
        let purchases = frame.column("previous_purchases").unwrap().i64().unwrap();
        let campaign_type = frame.column("campaign_type").unwrap().str().unwrap();
        for idx in 0..frame.height() {
            let clicks_v = clicks.get(idx).unwrap();
            let conversions_v = conversions.get(idx).unwrap();
            prop_assert!(conversions_v <= clicks_v);
            prop_assert!(clicks_v <= impressions.get(idx).unwrap());
            prop_assert!((18..=65).contains(&age.get(idx).unwrap()));
            prop_assert!((0..=2).contains(&conversions_v));
            let tos = time_on_site.get(idx).unwrap();
            prop_assert!(tos == 0 || (60..=600).contains(&tos));
            if campaign_type.get(idx) == Some("retargeting") {
                prop_assert_eq!(purchases.get(idx), Some(0));
            }
        }

        // Imputed columns have no gaps.
        prop_assert_eq!(frame.column("income").unwrap().null_count(), 0);
        prop_assert_eq!(frame.column("ad_spend").unwrap().null_count(), 0);

        // Row accounting adds up.
        let report = &normalized.report;
        prop_assert_eq!(
            report.rows_in,
            report.rows_deduped + report.rows_dropped() + report.rows_out
        );
    }
}
