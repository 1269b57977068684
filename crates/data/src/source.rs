//! Record sources.
//!
//! The reporting layer never fetches records itself. Callers fetch the four
//! collections through a `RecordSource`, then hand the snapshot over.

use std::path::PathBuf;

use async_trait::async_trait;
use frostline_core::dashboard::RecordSnapshot;
use frostline_core::records::{Cost, InventoryMovement, Production, Sale};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::DataError;
use crate::validate;

/// Something that can hand out the four record collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetches every sale.
    async fn fetch_sales(&self) -> Result<Vec<Sale>, DataError>;

    /// Fetches every cost.
    async fn fetch_costs(&self) -> Result<Vec<Cost>, DataError>;

    /// Fetches every production run.
    async fn fetch_production(&self) -> Result<Vec<Production>, DataError>;

    /// Fetches every inventory movement.
    async fn fetch_inventory(&self) -> Result<Vec<InventoryMovement>, DataError>;
}

/// Fetches all four collections concurrently.
///
/// # Errors
///
/// Returns the first error any fetch reports.
pub async fn load_snapshot<S>(source: &S) -> Result<RecordSnapshot, DataError>
where
    S: RecordSource + ?Sized,
{
    let (sales, costs, productions, movements) = tokio::try_join!(
        source.fetch_sales(),
        source.fetch_costs(),
        source.fetch_production(),
        source.fetch_inventory(),
    )?;

    info!(
        sales = sales.len(),
        costs = costs.len(),
        productions = productions.len(),
        movements = movements.len(),
        "Loaded record snapshot"
    );

    Ok(RecordSnapshot {
        sales,
        costs,
        productions,
        movements,
    })
}

/// Reads collections exported as JSON arrays from a directory.
///
/// Expects `sales.json`, `costs.json`, `production.json` and `inventory.json`.
/// A missing file is an empty collection.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    /// Creates a source rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn read<T>(
        &self,
        collection: &'static str,
        parse: fn(&Map<String, Value>) -> Result<T, String>,
    ) -> Result<Vec<T>, DataError> {
        let path = self.dir.join(format!("{collection}.json"));
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Collection file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let value: Value = serde_json::from_slice(&bytes)?;
        let validated = validate::collection(collection, &value, parse)?;

        for rejected in &validated.rejected {
            warn!(error = %rejected, "Skipping invalid document");
        }
        debug!(
            collection,
            accepted = validated.records.len(),
            rejected = validated.rejected.len(),
            "Validated collection"
        );

        Ok(validated.records)
    }
}

#[async_trait]
impl RecordSource for JsonDirSource {
    async fn fetch_sales(&self) -> Result<Vec<Sale>, DataError> {
        self.read("sales", validate::sale).await
    }

    async fn fetch_costs(&self) -> Result<Vec<Cost>, DataError> {
        self.read("costs", validate::cost).await
    }

    async fn fetch_production(&self) -> Result<Vec<Production>, DataError> {
        self.read("production", validate::production).await
    }

    async fn fetch_inventory(&self) -> Result<Vec<InventoryMovement>, DataError> {
        let movements = self.read("inventory", validate::movement).await?;
        for movement in movements.iter().filter(|m| !m.is_consistent()) {
            warn!(
                movement_id = %movement.id,
                expected = ?movement.expected_remaining(),
                recorded = %movement.remaining_quantity,
                "Inventory movement remaining quantity does not match its arithmetic"
            );
        }
        Ok(movements)
    }
}

/// Source backed by in-memory collections.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    snapshot: RecordSnapshot,
}

impl MemorySource {
    /// Creates a source serving clones of `snapshot`.
    #[must_use]
    pub const fn new(snapshot: RecordSnapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl RecordSource for MemorySource {
    async fn fetch_sales(&self) -> Result<Vec<Sale>, DataError> {
        Ok(self.snapshot.sales.clone())
    }

    async fn fetch_costs(&self) -> Result<Vec<Cost>, DataError> {
        Ok(self.snapshot.costs.clone())
    }

    async fn fetch_production(&self) -> Result<Vec<Production>, DataError> {
        Ok(self.snapshot.productions.clone())
    }

    async fn fetch_inventory(&self) -> Result<Vec<InventoryMovement>, DataError> {
        Ok(self.snapshot.movements.clone())
    }
}
