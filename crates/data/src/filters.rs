//! Persistence of dashboard filters.

use std::path::PathBuf;

use async_trait::async_trait;
use frostline_core::dashboard::DashboardFilters;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::DataError;

/// Read/write access to the persisted dashboard filters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FilterStore: Send + Sync {
    /// Returns the saved filters, or `None` if nothing was saved yet.
    async fn load(&self) -> Result<Option<DashboardFilters>, DataError>;

    /// Replaces the saved filters.
    async fn save(&self, filters: &DashboardFilters) -> Result<(), DataError>;
}

/// Loads saved filters, falling back to `defaults` when none exist.
///
/// # Errors
///
/// Returns an error if the store fails to read.
pub async fn load_or_default<S>(
    store: &S,
    defaults: DashboardFilters,
) -> Result<DashboardFilters, DataError>
where
    S: FilterStore + ?Sized,
{
    Ok(store.load().await?.unwrap_or(defaults))
}

/// Stores filters as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileFilterStore {
    path: PathBuf,
}

impl JsonFileFilterStore {
    /// Creates a store writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FilterStore for JsonFileFilterStore {
    async fn load(&self) -> Result<Option<DashboardFilters>, DataError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No saved filters");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, filters: &DashboardFilters) -> Result<(), DataError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(filters)?;
        tokio::fs::write(&self.path, bytes).await?;
        debug!(path = %self.path.display(), "Saved filters");
        Ok(())
    }
}

/// Keeps filters in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryFilterStore {
    filters: RwLock<Option<DashboardFilters>>,
}

impl MemoryFilterStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FilterStore for MemoryFilterStore {
    async fn load(&self) -> Result<Option<DashboardFilters>, DataError> {
        Ok(self.filters.read().await.clone())
    }

    async fn save(&self, filters: &DashboardFilters) -> Result<(), DataError> {
        *self.filters.write().await = Some(filters.clone());
        Ok(())
    }
}
