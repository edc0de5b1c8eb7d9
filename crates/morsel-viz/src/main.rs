mod bootstrap;

use anyhow::{bail, Result};
use morsel_core::models::ARTIFACT_FILE_NAME;
use morsel_core::settings::Settings;
use morsel_data::combiner;
use morsel_ui::app::App;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!(
        "Pink Morsel visualiser v{} starting",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!(
        "View: {}, Region: {}, Theme: {}",
        settings.view,
        settings.region,
        settings.theme
    );

    let data_dir = match settings
        .data_dir
        .clone()
        .or_else(bootstrap::discover_data_path)
    {
        Some(dir) => dir,
        None => bail!("No data directory found: pass --data-dir or set MORSEL_DATA_DIR"),
    };

    match settings.view.as_str() {
        "etl" => {
            tracing::info!("Running batch ETL over {}", data_dir.display());

            let report = combiner::run_etl(&data_dir)?;
            println!(
                "Wrote {} rows from {} files -> {}",
                report.rows_written,
                report.files_processed,
                report.output_path.display()
            );
        }

        "chart" => {
            tracing::info!("Starting interactive chart view...");

            // The chart reads the artifact fresh on every interaction; it
            // only needs the path, not the data, up front.
            let artifact_path = data_dir.join(ARTIFACT_FILE_NAME);
            let app = App::new(&settings.theme, artifact_path, &settings.region);
            app.run()?;
        }

        unknown => {
            eprintln!("Unknown view mode: {}", unknown);
        }
    }

    Ok(())
}
