//! Normalization observability report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Counts produced by one normalization run.
///
/// Serialized as JSON next to the cleaned snapshot so a run's row
/// accounting survives alongside its data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizeReport {
    /// Rows in the located input snapshot.
    pub rows_in: u64,
    /// Rows removed as duplicate `customer_id` occurrences.
    pub rows_deduped: u64,
    /// Rows dropped (or flagged invalid) per validation rule. Each row is
    /// attributed to the first rule it failed.
    pub rows_dropped_by_rule: BTreeMap<String, u64>,
    /// Values repaired in place rather than dropped (retargeting rows
    /// with a nonzero `previous_purchases`).
    pub values_repaired: u64,
    /// Rows in the output table.
    pub rows_out: u64,
}

impl NormalizeReport {
    /// Attribute one dropped/flagged row to a rule.
    pub fn record_drop(&mut self, rule: &str) {
        *self.rows_dropped_by_rule.entry(rule.to_string()).or_insert(0) += 1;
    }

    /// Total rows dropped or flagged across all rules.
    pub fn rows_dropped(&self) -> u64 {
        self.rows_dropped_by_rule.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_accumulate_per_rule() {
        let mut report = NormalizeReport::default();
        report.record_drop("conversions_exceed_clicks");
        report.record_drop("conversions_exceed_clicks");
        report.record_drop("out_of_range:age");
        assert_eq!(
            report.rows_dropped_by_rule["conversions_exceed_clicks"],
            2
        );
        assert_eq!(report.rows_dropped(), 3);
    }
}
