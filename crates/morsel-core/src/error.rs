use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the sales ETL and visualiser.
#[derive(Error, Debug)]
pub enum SalesError {
    /// A required input column is absent from a CSV header row.
    #[error("Missing required column '{column}' in {path}")]
    MissingColumn {
        column: &'static str,
        path: PathBuf,
    },

    /// A cell could not be coerced to its expected type.
    #[error("Malformed {column} value '{value}' in {path}")]
    MalformedValue {
        column: &'static str,
        value: String,
        path: PathBuf,
    },

    /// Discovery found no input files matching the sales pattern.
    #[error("No input files matching '{pattern}' in {path}")]
    NoInputFiles { path: PathBuf, pattern: String },

    /// The configured data directory does not exist.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// A CSV file could not be read or parsed at the transport level.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the workspace crates.
pub type Result<T> = std::result::Result<T, SalesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_column() {
        let err = SalesError::MissingColumn {
            column: "price",
            path: PathBuf::from("/data/daily_sales_data_0.csv"),
        };
        let msg = err.to_string();
        assert!(msg.contains("Missing required column 'price'"));
        assert!(msg.contains("daily_sales_data_0.csv"));
    }

    #[test]
    fn test_error_display_malformed_value() {
        let err = SalesError::MalformedValue {
            column: "price",
            value: "abc".to_string(),
            path: PathBuf::from("/data/daily_sales_data_1.csv"),
        };
        let msg = err.to_string();
        assert!(msg.contains("Malformed price value 'abc'"));
        assert!(msg.contains("daily_sales_data_1.csv"));
    }

    #[test]
    fn test_error_display_no_input_files() {
        let err = SalesError::NoInputFiles {
            path: PathBuf::from("/empty/dir"),
            pattern: "daily_sales_data_*.csv".to_string(),
        };
        let msg = err.to_string();
        assert_eq!(
            msg,
            "No input files matching 'daily_sales_data_*.csv' in /empty/dir"
        );
    }

    #[test]
    fn test_error_display_data_path_not_found() {
        let err = SalesError::DataPathNotFound(PathBuf::from("/missing/dir"));
        assert_eq!(err.to_string(), "Data path not found: /missing/dir");
    }

    #[test]
    fn test_error_display_terminal() {
        let err = SalesError::Terminal("crossterm failure".to_string());
        assert_eq!(err.to_string(), "Terminal error: crossterm failure");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SalesError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
