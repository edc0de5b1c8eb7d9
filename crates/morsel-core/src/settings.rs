use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Pink Morsel sales ETL and chart viewer
#[derive(Parser, Debug, Clone)]
#[command(
    name = "morsel-viz",
    about = "Pink Morsel sales ETL and chart viewer",
    version
)]
pub struct Settings {
    /// View mode: one-shot batch ETL run, or the interactive chart
    #[arg(long, default_value = "chart", value_parser = ["chart", "etl"])]
    pub view: String,

    /// Directory holding the daily sales CSV files (and the output artifact)
    #[arg(long, env = "MORSEL_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Initial region filter for the chart view
    #[arg(long, default_value = "all", value_parser = ["all", "north", "east", "south", "west"])]
    pub region: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.morsel-viz/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".morsel-viz").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path, creating parent
    /// directories if needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the merged result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation – accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        // Build raw ArgMatches so we can query ValueSource.
        let matches = Settings::command().get_matches_from(args.clone());

        // Parse into the typed struct using the same args.
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            let _ = LastUsedParams::clear_at(config_path);
            return settings;
        }

        let last = LastUsedParams::load_from(config_path);

        // Merge last-used values for fields that were NOT explicitly set on
        // the command line (CLI always wins). data_dir is never persisted:
        // it is per-invocation or comes from MORSEL_DATA_DIR.
        if !is_arg_explicitly_set(&matches, "view") {
            if let Some(v) = last.view {
                settings.view = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "region") {
            if let Some(v) = last.region {
                settings.region = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }

        // Persist the merged values for the next run.
        let to_save = LastUsedParams {
            view: Some(settings.view.clone()),
            region: Some(settings.region.clone()),
            theme: Some(settings.theme.clone()),
        };
        if let Err(e) = to_save.save_to(config_path) {
            tracing::warn!("Could not persist last-used params: {}", e);
        }

        settings
    }
}

/// Whether `id` was supplied on the command line (as opposed to defaulted or
/// taken from the environment).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<OsString> {
        std::iter::once("morsel-viz")
            .chain(list.iter().copied())
            .map(OsString::from)
            .collect()
    }

    #[test]
    fn test_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = LastUsedParams::config_path_in(tmp.path());
        let settings = Settings::load_with_last_used_impl(args(&[]), &path);
        assert_eq!(settings.view, "chart");
        assert_eq!(settings.region, "all");
        assert_eq!(settings.theme, "auto");
        assert_eq!(settings.log_level, "INFO");
    }

    #[test]
    fn test_cli_value_wins_over_persisted() {
        let tmp = TempDir::new().unwrap();
        let path = LastUsedParams::config_path_in(tmp.path());
        LastUsedParams {
            view: None,
            region: Some("north".to_string()),
            theme: None,
        }
        .save_to(&path)
        .unwrap();

        let settings =
            Settings::load_with_last_used_impl(args(&["--region", "south"]), &path);
        assert_eq!(settings.region, "south");
    }

    #[test]
    fn test_persisted_value_used_when_not_on_cli() {
        let tmp = TempDir::new().unwrap();
        let path = LastUsedParams::config_path_in(tmp.path());
        LastUsedParams {
            view: None,
            region: Some("west".to_string()),
            theme: Some("dark".to_string()),
        }
        .save_to(&path)
        .unwrap();

        let settings = Settings::load_with_last_used_impl(args(&[]), &path);
        assert_eq!(settings.region, "west");
        assert_eq!(settings.theme, "dark");
    }

    #[test]
    fn test_merged_values_persisted_for_next_run() {
        let tmp = TempDir::new().unwrap();
        let path = LastUsedParams::config_path_in(tmp.path());

        Settings::load_with_last_used_impl(args(&["--region", "east"]), &path);

        let saved = LastUsedParams::load_from(&path);
        assert_eq!(saved.region.as_deref(), Some("east"));
        assert_eq!(saved.view.as_deref(), Some("chart"));
    }

    #[test]
    fn test_clear_removes_config() {
        let tmp = TempDir::new().unwrap();
        let path = LastUsedParams::config_path_in(tmp.path());
        LastUsedParams {
            view: Some("etl".to_string()),
            region: None,
            theme: None,
        }
        .save_to(&path)
        .unwrap();
        assert!(path.exists());

        let settings = Settings::load_with_last_used_impl(args(&["--clear"]), &path);
        assert!(settings.clear);
        assert!(!path.exists());
    }

    #[test]
    fn test_save_is_atomic_no_tmp_left() {
        let tmp = TempDir::new().unwrap();
        let path = LastUsedParams::config_path_in(tmp.path());
        LastUsedParams::default().save_to(&path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_load_from_garbage_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("last_used.json");
        std::fs::write(&path, "{not json").unwrap();
        let loaded = LastUsedParams::load_from(&path);
        assert!(loaded.view.is_none());
        assert!(loaded.region.is_none());
    }
}
