//! Input-file discovery and record normalization.
//!
//! Reads raw daily sales CSVs (`product,price,quantity,date,region`) and
//! converts the target product's rows into canonical [`SalesRecord`]s.

use std::path::{Path, PathBuf};

use morsel_core::error::{Result, SalesError};
use morsel_core::models::SalesRecord;
use morsel_core::parse;
use tracing::debug;

/// Filename pattern the discovery step matches, as shown in error messages.
pub const INPUT_PATTERN: &str = "daily_sales_data_*.csv";

/// Anchored regex equivalent of [`INPUT_PATTERN`].
const INPUT_PATTERN_RE: &str = r"^daily_sales_data_.*\.csv$";

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all raw sales files directly inside `data_dir`, sorted by filename.
///
/// Only the directory itself is listed; subdirectories are not descended
/// into. A nonexistent directory yields an empty list (the combiner decides
/// whether that is fatal).
pub fn find_sales_files(data_dir: &Path) -> Vec<PathBuf> {
    let pattern = regex::Regex::new(INPUT_PATTERN_RE).expect("pattern is valid");

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| pattern.is_match(name))
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Normalize one raw sales file into canonical records.
///
/// Keeps a row iff its `product` equals `target_product` case-insensitively
/// (exact match, not substring), coerces `price`/`quantity`/`date`, derives
/// `sales = price * quantity`, and copies `region` verbatim.
///
/// Zero matching rows is a valid result (`Ok(vec![])`); a missing required
/// column or an unparseable cell on a kept row is a hard error.
pub fn normalize_file(path: &Path, target_product: &str) -> Result<Vec<SalesRecord>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let headers = rdr.headers()?.clone();

    let column = |name: &'static str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(SalesError::MissingColumn {
                column: name,
                path: path.to_path_buf(),
            })
    };
    let product_col = column("product")?;
    let price_col = column("price")?;
    let quantity_col = column("quantity")?;
    let date_col = column("date")?;
    let region_col = column("region")?;

    let mut records = Vec::new();
    let mut rows_read = 0usize;

    for row in rdr.records() {
        let row = row?;
        rows_read += 1;

        let product = row.get(product_col).unwrap_or("");
        if !product.eq_ignore_ascii_case(target_product) {
            continue;
        }

        let raw_price = row.get(price_col).unwrap_or("");
        let price = parse::parse_price(raw_price)
            .ok_or_else(|| malformed("price", raw_price, path))?;

        let raw_quantity = row.get(quantity_col).unwrap_or("");
        let quantity = parse::parse_quantity(raw_quantity)
            .ok_or_else(|| malformed("quantity", raw_quantity, path))?;

        let raw_date = row.get(date_col).unwrap_or("");
        let date =
            parse::parse_date(raw_date).ok_or_else(|| malformed("date", raw_date, path))?;

        records.push(SalesRecord {
            sales: price * quantity as f64,
            date,
            region: row.get(region_col).unwrap_or("").to_string(),
        });
    }

    debug!(
        "File {}: {} rows read, {} kept",
        path.display(),
        rows_read,
        records.len()
    );

    Ok(records)
}

fn malformed(column: &'static str, value: &str, path: &Path) -> SalesError {
    SalesError::MalformedValue {
        column,
        value: value.to_string(),
        path: path.to_path_buf(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
