//! Daily aggregation of canonical sales records into the charted series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use morsel_core::models::{DailySales, RegionFilter, SalesRecord};

/// Stateless helper that rolls canonical records up by calendar day.
pub struct SalesAggregator;

impl SalesAggregator {
    /// Apply `filter`, group the surviving records by exact date and sum
    /// their sales.
    ///
    /// Returns at most one point per date, ascending. Filtering everything
    /// away yields an empty series, not an error. Idempotent: identical
    /// inputs produce identical output.
    pub fn aggregate_daily(records: &[SalesRecord], filter: &RegionFilter) -> Vec<DailySales> {
        // BTreeMap keeps the dates sorted for free.
        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();

        for record in records {
            if !filter.matches(&record.region) {
                continue;
            }
            *by_date.entry(record.date).or_insert(0.0) += record.sales;
        }

        by_date
            .into_iter()
            .map(|(date, sales)| DailySales { date, sales })
            .collect()
    }

    /// Sum of the whole series.
    pub fn total_sales(series: &[DailySales]) -> f64 {
        series.iter().map(|d| d.sales).sum()
    }

    /// Highest single-day sales, `0.0` for an empty series. The event
    /// annotation label is anchored at this value.
    pub fn peak_sales(series: &[DailySales]) -> f64 {
        series.iter().map(|d| d.sales).fold(0.0, f64::max)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
