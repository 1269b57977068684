//! Inventory movement records.

use chrono::NaiveDate;
use frostline_shared::types::{MovementId, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::Dated;

/// Direction of an inventory movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    /// Stock entering the warehouse.
    In,
    /// Stock leaving the warehouse.
    Out,
    /// Manual correction; the moved quantity is signed.
    Adjustment,
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::In => write!(f, "IN"),
            Self::Out => write!(f, "OUT"),
            Self::Adjustment => write!(f, "ADJUSTMENT"),
        }
    }
}

impl std::str::FromStr for MovementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "IN" => Ok(Self::In),
            "OUT" => Ok(Self::Out),
            "ADJUSTMENT" => Ok(Self::Adjustment),
            _ => Err(format!("Unknown movement type: {s}")),
        }
    }
}

/// A stock movement for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryMovement {
    /// Unique identifier.
    pub id: MovementId,
    /// Movement direction.
    pub movement_type: MovementType,
    /// Quantity on hand before the movement.
    pub initial_quantity: Decimal,
    /// Quantity moved.
    pub quantity_moved: Decimal,
    /// Quantity on hand after the movement.
    pub remaining_quantity: Decimal,
    /// Product moved.
    pub product_id: Option<ProductId>,
    /// Movement date.
    pub date: NaiveDate,
}

impl InventoryMovement {
    /// Quantity that should remain after this movement.
    ///
    /// `IN` and `ADJUSTMENT` add the moved quantity, `OUT` subtracts it.
    /// `None` if the result does not fit in a `Decimal`.
    #[must_use]
    pub fn expected_remaining(&self) -> Option<Decimal> {
        match self.movement_type {
            MovementType::In | MovementType::Adjustment => {
                self.initial_quantity.checked_add(self.quantity_moved)
            }
            MovementType::Out => self.initial_quantity.checked_sub(self.quantity_moved),
        }
    }

    /// Returns true if `remaining_quantity` matches the movement arithmetic.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.expected_remaining() == Some(self.remaining_quantity)
    }
}

impl Dated for InventoryMovement {
    fn date(&self) -> NaiveDate {
        self.date
    }
}
