use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Domain constants ──────────────────────────────────────────────────────────

/// The single product all normalization filters for (case-insensitive match).
pub const TARGET_PRODUCT: &str = "pink morsel";

/// The fixed set of region names offered by the region selector, in display
/// order. Input data may carry these in any casing.
pub const REGIONS: [&str; 4] = ["north", "east", "south", "west"];

/// Filename of the combined canonical artifact, relative to the data
/// directory.
pub const ARTIFACT_FILE_NAME: &str = "pink_morsel_sales.csv";

/// The price increase date marked on every rendered chart.
pub fn price_increase_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 15).expect("fixed calendar date")
}

// ── SalesRecord ───────────────────────────────────────────────────────────────

/// One canonical sales record: the normalized three-column schema that the
/// combined artifact is made of.
///
/// Field order matters: it defines the artifact column order
/// `Sales,Date,Region`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Sale amount in dollars: `price * quantity`, fractional cents allowed.
    #[serde(rename = "Sales")]
    pub sales: f64,
    /// Calendar date of the transaction.
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    /// Region name, casing preserved verbatim from the input file.
    #[serde(rename = "Region")]
    pub region: String,
}

// ── DailySales ────────────────────────────────────────────────────────────────

/// One point of the aggregated time series: total sales for a single date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySales {
    pub date: NaiveDate,
    pub sales: f64,
}

// ── RegionFilter ──────────────────────────────────────────────────────────────

/// Optional restriction of the aggregate to a single region.
///
/// `"all"` (any casing) is the no-filter sentinel; anything else selects
/// records whose region matches case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionFilter {
    All,
    Named(String),
}

impl RegionFilter {
    /// Build a filter from a selector option name.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("all") {
            RegionFilter::All
        } else {
            RegionFilter::Named(name.to_string())
        }
    }

    /// Whether a record with the given region passes this filter.
    pub fn matches(&self, region: &str) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Named(name) => name.eq_ignore_ascii_case(region),
        }
    }

    /// Display label for headers and chart legends.
    pub fn label(&self) -> &str {
        match self {
            RegionFilter::All => "all",
            RegionFilter::Named(name) => name.as_str(),
        }
    }
}
