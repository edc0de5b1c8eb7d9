//! Field coercion for raw sales CSV cells.
//!
//! Each helper returns `None` on unparseable input; the caller attaches the
//! file and column context when turning that into a
//! [`MalformedValue`](crate::error::SalesError::MalformedValue) error.

use chrono::NaiveDate;

/// Parse a price cell, stripping one leading currency symbol.
///
/// `"$3.00"` and `"3.00"` both parse to `3.0`.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().strip_prefix('$').unwrap_or_else(|| raw.trim());
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a quantity cell as a whole number.
pub fn parse_quantity(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Parse an ISO-8601 (`YYYY-MM-DD`) date cell.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}
