//! Domain records consumed by the reporting layer.
//!
//! Records are created and owned by the data-access layer. The reporting
//! layer only reads them.

pub mod inventory;
pub mod types;

pub use inventory::{InventoryMovement, MovementType};
pub use types::{Cost, Dated, Production, Sale};
