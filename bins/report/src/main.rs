//! Frostline report
//!
//! Prints the dashboard summary for a snapshot directory as JSON.

use std::process::ExitCode;

use frostline_core::dashboard::{DashboardFilters, DashboardService};
use frostline_data::{
    FilterStore, JsonDirSource, JsonFileFilterStore, load_or_default, load_snapshot,
};
use frostline_shared::{AppConfig, AppError, AppResult};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "frostline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = err.error_code(), error = %err, "Report failed");
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run() -> AppResult<()> {
    let config = AppConfig::load()?;
    let dir = std::env::args().nth(1).unwrap_or_else(|| config.data.dir.clone());

    let filter_store = JsonFileFilterStore::new(&config.data.filters_path);
    let filters = load_or_default(&filter_store, DashboardFilters::from(&config.reporting)).await?;
    filter_store.save(&filters).await?;
    info!(path = %config.data.filters_path, period = ?filters.period, "Using dashboard filters");

    let snapshot = load_snapshot(&JsonDirSource::new(&dir)).await?;

    let today = chrono::Local::now().date_naive();
    let summary = DashboardService::summarize(&snapshot, &filters, today)?;
    info!(%dir, %today, "Dashboard summarized");

    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| AppError::Internal(format!("Failed to serialize summary: {e}")))?;
    println!("{json}");

    Ok(())
}
