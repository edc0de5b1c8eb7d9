//! Dataset combination, atomic persistence and artifact loading.
//!
//! The batch half of the system: discover the raw files, normalize each one,
//! concatenate, order deterministically, and regenerate the combined
//! artifact in full. Any failure aborts the whole run before anything is
//! persisted.

use std::path::{Path, PathBuf};

use morsel_core::error::{Result, SalesError};
use morsel_core::models::{SalesRecord, ARTIFACT_FILE_NAME, TARGET_PRODUCT};
use tracing::{debug, info};

use crate::reader::{find_sales_files, normalize_file, INPUT_PATTERN};

// ── Public types ──────────────────────────────────────────────────────────────

/// Summary of one batch ETL run, for logging and the exit message.
#[derive(Debug, Clone)]
pub struct CombineReport {
    /// Number of input files discovered and normalized.
    pub files_processed: usize,
    /// Number of canonical rows in the regenerated artifact.
    pub rows_written: usize,
    /// Where the artifact was written.
    pub output_path: PathBuf,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Normalize every discovered input file and return the combined, ordered
/// dataset.
///
/// Zero discovered files is fatal ([`SalesError::NoInputFiles`]); zero rows
/// surviving the product filter is a valid empty dataset.
pub fn combine_all(data_dir: &Path, target_product: &str) -> Result<Vec<SalesRecord>> {
    let files = discover(data_dir)?;
    combine_files(&files, target_product)
}

/// Write `records` to `output_path` in the canonical `Sales,Date,Region`
/// schema, fully replacing any previous artifact.
///
/// The rows go to a temp file which is then renamed into place, so a
/// concurrent reader sees either the previous artifact or the new one in
/// full, never a partial write. An empty dataset still writes the header
/// row.
pub fn persist(records: &[SalesRecord], output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let tmp = output_path.with_extension("csv.tmp");
    // Header is written explicitly: `serialize` only emits one on the first
    // record, which would leave a zero-row artifact headerless.
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&tmp)?;
    wtr.write_record(["Sales", "Date", "Region"])?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    drop(wtr);

    std::fs::rename(&tmp, output_path)?;
    Ok(())
}

/// Run the batch pipeline end-to-end: combine all inputs under `data_dir`
/// and regenerate `<data_dir>/pink_morsel_sales.csv`.
pub fn run_etl(data_dir: &Path) -> Result<CombineReport> {
    let files = discover(data_dir)?;
    let combined = combine_files(&files, TARGET_PRODUCT)?;

    let output_path = data_dir.join(ARTIFACT_FILE_NAME);
    persist(&combined, &output_path)?;

    info!(
        "Wrote {} rows from {} files -> {}",
        combined.len(),
        files.len(),
        output_path.display()
    );

    Ok(CombineReport {
        files_processed: files.len(),
        rows_written: combined.len(),
        output_path,
    })
}

/// Read a previously persisted artifact back into canonical records.
///
/// The presentation layer calls this fresh on every interaction; there is
/// no cache between reads.
pub fn load_artifact(path: &Path) -> Result<Vec<SalesRecord>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in rdr.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn discover(data_dir: &Path) -> Result<Vec<PathBuf>> {
    if !data_dir.is_dir() {
        return Err(SalesError::DataPathNotFound(data_dir.to_path_buf()));
    }

    let files = find_sales_files(data_dir);
    if files.is_empty() {
        return Err(SalesError::NoInputFiles {
            path: data_dir.to_path_buf(),
            pattern: INPUT_PATTERN.to_string(),
        });
    }
    Ok(files)
}

fn combine_files(files: &[PathBuf], target_product: &str) -> Result<Vec<SalesRecord>> {
    let mut combined = Vec::new();
    for file in files {
        let records = normalize_file(file, target_product)?;
        debug!("{}: {} canonical rows", file.display(), records.len());
        combined.extend(records);
    }

    // Deterministic output order: chronological, then lexicographic region.
    // `sort_by` is stable, so equal (date, region) pairs keep input order.
    combined.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.region.cmp(&b.region)));

    Ok(combined)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const HEADER: &str = "product,price,quantity,date,region";

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    fn record(sales: f64, date: &str, region: &str) -> SalesRecord {
        SalesRecord {
            sales,
            date: date.parse().unwrap(),
            region: region.to_string(),
        }
    }

    // ── combine_all ───────────────────────────────────────────────────────

    #[test]
    fn test_combine_no_input_files_is_fatal() {
        let dir = TempDir::new().unwrap();
        // A file that exists but does not match the pattern changes nothing.
        write_csv(dir.path(), "other.csv", &[HEADER]);

        let err = combine_all(dir.path(), TARGET_PRODUCT).unwrap_err();
        assert!(matches!(err, SalesError::NoInputFiles { .. }));
    }

    #[test]
    fn test_combine_missing_data_dir_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = combine_all(&missing, TARGET_PRODUCT).unwrap_err();
        assert!(matches!(err, SalesError::DataPathNotFound(_)));
    }

    #[test]
    fn test_combine_sorted_by_date_then_region() {
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "daily_sales_data_0.csv",
            &[
                HEADER,
                "pink morsel,$1.00,1,2021-01-02,south",
                "pink morsel,$1.00,2,2021-01-01,west",
            ],
        );
        write_csv(
            dir.path(),
            "daily_sales_data_1.csv",
            &[
                HEADER,
                "pink morsel,$1.00,3,2021-01-01,east",
                "pink morsel,$1.00,4,2021-01-02,north",
            ],
        );

        let combined = combine_all(dir.path(), TARGET_PRODUCT).unwrap();
        let keys: Vec<(String, String)> = combined
            .iter()
            .map(|r| (r.date.to_string(), r.region.clone()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("2021-01-01".to_string(), "east".to_string()),
                ("2021-01-01".to_string(), "west".to_string()),
                ("2021-01-02".to_string(), "north".to_string()),
                ("2021-01-02".to_string(), "south".to_string()),
            ]
        );
    }

    #[test]
    fn test_combine_deterministic_across_runs() {
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "daily_sales_data_0.csv",
            &[
                HEADER,
                "pink morsel,$2.00,5,2021-01-02,north",
                "pink morsel,$3.00,2,2021-01-01,south",
            ],
        );

        let first = combine_all(dir.path(), TARGET_PRODUCT).unwrap();
        let second = combine_all(dir.path(), TARGET_PRODUCT).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_combine_stable_on_ties() {
        // Two rows with identical (date, region) keep their input order.
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "daily_sales_data_0.csv",
            &[
                HEADER,
                "pink morsel,$5.00,2,2021-01-01,north",
                "pink morsel,$1.00,4,2021-01-01,north",
            ],
        );

        let combined = combine_all(dir.path(), TARGET_PRODUCT).unwrap();
        assert_eq!(combined[0].sales, 10.0);
        assert_eq!(combined[1].sales, 4.0);
    }

    #[test]
    fn test_combine_empty_contributions_dropped() {
        // A file with no matching product contributes nothing but is valid.
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "daily_sales_data_0.csv",
            &[HEADER, "gummy bear,$2.00,5,2021-01-01,north"],
        );
        write_csv(
            dir.path(),
            "daily_sales_data_1.csv",
            &[HEADER, "pink morsel,$3.00,2,2021-01-01,north"],
        );

        let combined = combine_all(dir.path(), TARGET_PRODUCT).unwrap();
        assert_eq!(combined.len(), 1);
    }

    #[test]
    fn test_combine_all_inputs_empty_is_ok() {
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "daily_sales_data_0.csv",
            &[HEADER, "gummy bear,$2.00,5,2021-01-01,north"],
        );

        let combined = combine_all(dir.path(), TARGET_PRODUCT).unwrap();
        assert!(combined.is_empty());
    }

    #[test]
    fn test_combine_malformed_file_aborts_whole_run() {
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "daily_sales_data_0.csv",
            &[HEADER, "pink morsel,$3.00,2,2021-01-01,north"],
        );
        write_csv(
            dir.path(),
            "daily_sales_data_1.csv",
            &[HEADER, "pink morsel,abc,2,2021-01-02,south"],
        );

        let err = combine_all(dir.path(), TARGET_PRODUCT).unwrap_err();
        assert!(matches!(err, SalesError::MalformedValue { .. }));
    }

    // ── persist / load_artifact ───────────────────────────────────────────

    #[test]
    fn test_persist_empty_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("pink_morsel_sales.csv");
        persist(&[], &out).unwrap();

        let content = std::fs::read_to_string(&out).unwrap();
        assert_eq!(content, "Sales,Date,Region\n");
    }

    #[test]
    fn test_persist_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("pink_morsel_sales.csv");
        persist(&[record(6.0, "2021-01-01", "north")], &out).unwrap();

        assert!(out.exists());
        assert!(!out.with_extension("csv.tmp").exists());
    }

    #[test]
    fn test_persist_overwrites_previous_artifact() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("pink_morsel_sales.csv");
        persist(
            &[
                record(6.0, "2021-01-01", "north"),
                record(4.0, "2021-01-02", "south"),
            ],
            &out,
        )
        .unwrap();
        persist(&[record(1.5, "2021-03-03", "east")], &out).unwrap();

        let back = load_artifact(&out).unwrap();
        assert_eq!(back, vec![record(1.5, "2021-03-03", "east")]);
    }

    #[test]
    fn test_persist_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("pink_morsel_sales.csv");
        let records = vec![
            record(5.97, "2021-01-01", "North"),
            record(14.0, "2021-01-02", "south"),
        ];
        persist(&records, &out).unwrap();

        assert_eq!(load_artifact(&out).unwrap(), records);
    }

    #[test]
    fn test_load_artifact_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(load_artifact(&dir.path().join("absent.csv")).is_err());
    }

    // ── run_etl ───────────────────────────────────────────────────────────

    #[test]
    fn test_run_etl_end_to_end() {
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "daily_sales_data_0.csv",
            &[
                HEADER,
                "pink morsel,$3.00,2,2021-01-01,north",
                "gummy bear,$2.00,5,2021-01-01,north",
            ],
        );
        write_csv(
            dir.path(),
            "daily_sales_data_1.csv",
            &[HEADER, "pink morsel,$2.00,2,2021-01-02,south"],
        );

        let report = run_etl(dir.path()).unwrap();
        assert_eq!(report.files_processed, 2);
        assert_eq!(report.rows_written, 2);

        let artifact = load_artifact(&report.output_path).unwrap();
        assert_eq!(
            artifact,
            vec![
                record(6.0, "2021-01-01", "north"),
                record(4.0, "2021-01-02", "south"),
            ]
        );
    }

    #[test]
    fn test_run_etl_artifact_not_rediscovered_as_input() {
        // A second run must not pick up the artifact from the first.
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "daily_sales_data_0.csv",
            &[HEADER, "pink morsel,$3.00,2,2021-01-01,north"],
        );

        run_etl(dir.path()).unwrap();
        let report = run_etl(dir.path()).unwrap();
        assert_eq!(report.files_processed, 1);
        assert_eq!(report.rows_written, 1);
    }

    #[test]
    fn test_run_etl_failure_persists_nothing() {
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "daily_sales_data_0.csv",
            &[HEADER, "pink morsel,abc,2,2021-01-01,north"],
        );

        assert!(run_etl(dir.path()).is_err());
        assert!(!dir.path().join(ARTIFACT_FILE_NAME).exists());
    }
}
