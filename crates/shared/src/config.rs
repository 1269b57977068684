//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Record snapshot location.
    #[serde(default)]
    pub data: DataConfig,
    /// Dashboard defaults.
    #[serde(default)]
    pub reporting: ReportingConfig,
}

/// Where records and persisted dashboard filters live.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory holding `sales.json`, `costs.json`, `production.json` and `inventory.json`.
    #[serde(default = "default_data_dir")]
    pub dir: String,
    /// File the dashboard filters are persisted to.
    #[serde(default = "default_filters_path")]
    pub filters_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            filters_path: default_filters_path(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_filters_path() -> String {
    "data/filters.json".to_string()
}

/// Defaults applied when no filters have been persisted yet.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// Number of entries in the top products / top expenses rankings.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Production target the productivity ratio is measured against.
    #[serde(default = "default_production_target")]
    pub production_target: Decimal,
    /// Restrict productivity to one activity type.
    #[serde(default)]
    pub activity_type_id: Option<Uuid>,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            production_target: default_production_target(),
            activity_type_id: None,
        }
    }
}

fn default_top_n() -> usize {
    5
}

fn default_production_target() -> Decimal {
    Decimal::from(1000)
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FROSTLINE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
