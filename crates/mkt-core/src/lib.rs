//! Transformation and validation engine: the schema normalizer used by
//! the cleaning stage and the metrics engine used by the enrichment
//! stage.

pub mod metrics;
pub mod normalize;

pub use metrics::{METRIC_COLUMNS, compute_metrics, round_half_away, safe_div};
pub use normalize::{
    InvalidRowPolicy, NormalizeOptions, Normalized, STAMP_FORMAT, normalize,
};
