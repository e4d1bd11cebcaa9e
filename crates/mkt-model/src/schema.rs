//! Declarative column schema for campaign snapshots.
//!
//! Each column is described once: canonical type, imputation rule, and
//! validation check. The normalizer evaluates this table uniformly, so
//! adding or removing a column is a data change here rather than new
//! control flow there.

use crate::enums::{AdvertisingPlatform, CampaignChannel, CampaignType, Gender};

/// Canonical type a column is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Opaque or categorical string.
    Text,
    /// Non-negative integer count (Int64).
    Count,
    /// Monetary or continuous amount (Float64).
    Amount,
    /// ISO-8601 timestamp, stored as a canonicalized string.
    Timestamp,
}

/// How a missing value is repaired after coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Imputation {
    /// No repair; missing stays missing.
    None,
    /// Fill with the mean of the column's present values.
    ColumnMean,
    /// Fill with zero.
    Zero,
}

/// Row-level validation predicate for one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check {
    /// No constraint.
    None,
    /// Value must be a member of a closed set.
    OneOf(&'static [&'static str]),
    /// Inclusive integer range.
    IntRange { min: i64, max: i64 },
    /// Exactly zero, or inside the inclusive integer range.
    ZeroOrIntRange { min: i64, max: i64 },
    /// Inclusive float range. NaN passes (a propagated all-missing mean
    /// must not wipe out the table).
    FloatRange { min: f64, max: f64 },
    /// Float lower bound, NaN passes.
    FloatMin { min: f64 },
}

impl Check {
    /// Evaluate the check against an integer value.
    pub fn int_ok(&self, value: i64) -> bool {
        match self {
            Check::IntRange { min, max } => value >= *min && value <= *max,
            Check::ZeroOrIntRange { min, max } => {
                value == 0 || (value >= *min && value <= *max)
            }
            Check::None | Check::OneOf(_) | Check::FloatRange { .. } | Check::FloatMin { .. } => {
                true
            }
        }
    }

    /// Evaluate the check against a float value. NaN never fails a range.
    pub fn float_ok(&self, value: f64) -> bool {
        match self {
            Check::FloatRange { min, max } => !(value < *min) && !(value > *max),
            Check::FloatMin { min } => !(value < *min),
            Check::None
            | Check::OneOf(_)
            | Check::IntRange { .. }
            | Check::ZeroOrIntRange { .. } => true,
        }
    }

    /// Evaluate the check against a string value.
    pub fn str_ok(&self, value: &str) -> bool {
        match self {
            Check::OneOf(values) => values.contains(&value),
            _ => true,
        }
    }

    /// Returns true when this is a closed-set membership check.
    pub fn is_closed_set(&self) -> bool {
        matches!(self, Check::OneOf(_))
    }
}

/// One column's place in the canonical schema.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub dtype: ColumnType,
    pub imputation: Imputation,
    pub check: Check,
    /// A required column that is still missing after imputation fails the
    /// row. `extraction_date` is the one exception: it is rewritten at
    /// every stage, so its incoming value never matters.
    pub required: bool,
}

/// Canonical snapshot schema, in output column order.
static COLUMNS: [ColumnSpec; 18] = [
    ColumnSpec {
        name: "customer_id",
        dtype: ColumnType::Text,
        imputation: Imputation::None,
        check: Check::None,
        required: true,
    },
    ColumnSpec {
        name: "age",
        dtype: ColumnType::Count,
        imputation: Imputation::None,
        check: Check::IntRange { min: 18, max: 65 },
        required: true,
    },
    ColumnSpec {
        name: "gender",
        dtype: ColumnType::Text,
        imputation: Imputation::None,
        check: Check::OneOf(Gender::VALUES),
        required: true,
    },
    ColumnSpec {
        name: "income",
        dtype: ColumnType::Amount,
        imputation: Imputation::ColumnMean,
        check: Check::FloatRange {
            min: 1000.0,
            max: 10000.0,
        },
        required: true,
    },
    ColumnSpec {
        name: "campaign_id",
        dtype: ColumnType::Text,
        imputation: Imputation::None,
        check: Check::None,
        required: true,
    },
    ColumnSpec {
        name: "campaign_channel",
        dtype: ColumnType::Text,
        imputation: Imputation::None,
        check: Check::OneOf(CampaignChannel::VALUES),
        required: true,
    },
    ColumnSpec {
        name: "campaign_type",
        dtype: ColumnType::Text,
        imputation: Imputation::None,
        check: Check::OneOf(CampaignType::VALUES),
        required: true,
    },
    ColumnSpec {
        name: "ad_spend",
        dtype: ColumnType::Amount,
        imputation: Imputation::Zero,
        check: Check::FloatMin { min: 0.0 },
        required: true,
    },
    ColumnSpec {
        name: "impressions",
        dtype: ColumnType::Count,
        imputation: Imputation::None,
        check: Check::IntRange {
            min: 0,
            max: i64::MAX,
        },
        required: true,
    },
    ColumnSpec {
        name: "clicks",
        dtype: ColumnType::Count,
        imputation: Imputation::None,
        check: Check::IntRange {
            min: 0,
            max: i64::MAX,
        },
        required: true,
    },
    ColumnSpec {
        name: "conversions",
        dtype: ColumnType::Count,
        imputation: Imputation::None,
        check: Check::IntRange { min: 0, max: 2 },
        required: true,
    },
    ColumnSpec {
        name: "revenue",
        dtype: ColumnType::Amount,
        imputation: Imputation::None,
        check: Check::FloatMin { min: 0.0 },
        required: true,
    },
    ColumnSpec {
        name: "website_visits",
        dtype: ColumnType::Count,
        imputation: Imputation::None,
        check: Check::IntRange { min: 0, max: 3 },
        required: true,
    },
    ColumnSpec {
        name: "time_on_site",
        dtype: ColumnType::Count,
        imputation: Imputation::None,
        check: Check::ZeroOrIntRange { min: 60, max: 600 },
        required: true,
    },
    ColumnSpec {
        name: "previous_purchases",
        dtype: ColumnType::Count,
        imputation: Imputation::None,
        check: Check::IntRange { min: 0, max: 2 },
        required: true,
    },
    ColumnSpec {
        name: "date_received",
        dtype: ColumnType::Timestamp,
        imputation: Imputation::None,
        check: Check::None,
        required: true,
    },
    ColumnSpec {
        name: "advertising_platform",
        dtype: ColumnType::Text,
        imputation: Imputation::None,
        check: Check::OneOf(AdvertisingPlatform::VALUES),
        required: true,
    },
    ColumnSpec {
        name: "extraction_date",
        dtype: ColumnType::Timestamp,
        imputation: Imputation::None,
        check: Check::None,
        required: false,
    },
];

/// The full column table, in canonical output order.
pub fn columns() -> &'static [ColumnSpec] {
    &COLUMNS
}

/// Look up a single column by name.
pub fn column_spec(name: &str) -> Option<&'static ColumnSpec> {
    COLUMNS.iter().find(|spec| spec.name == name)
}

/// The dedup key column.
pub const PRIMARY_KEY: &str = "customer_id";

/// The per-stage processing timestamp column.
pub const EXTRACTION_DATE: &str = "extraction_date";
