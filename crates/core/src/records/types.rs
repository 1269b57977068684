//! Sales, costs and production records.

use chrono::NaiveDate;
use frostline_shared::types::{
    ActivityTypeId, CostId, DualAmount, ProductId, ProductionId, SaleId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Records that carry a business date.
pub trait Dated {
    /// Date the record was booked on.
    fn date(&self) -> NaiveDate;
}

/// A sale of a product, recorded in both currencies at transaction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    /// Unique identifier.
    pub id: SaleId,
    /// Product sold. `None` when the source document did not name one.
    pub product_id: Option<ProductId>,
    /// Amount in US dollars.
    pub amount_usd: Decimal,
    /// Amount in Congolese francs.
    pub amount_cdf: Decimal,
    /// Sale date.
    pub date: NaiveDate,
}

impl Sale {
    /// Returns both recorded amounts.
    #[must_use]
    pub const fn amounts(&self) -> DualAmount {
        DualAmount::new(self.amount_usd, self.amount_cdf)
    }
}

/// An expense, categorized by expense type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    /// Unique identifier.
    pub id: CostId,
    /// Expense type (e.g. "Electricity", "Packaging").
    pub expense_type_name: Option<String>,
    /// Amount in US dollars.
    pub amount_usd: Decimal,
    /// Amount in Congolese francs.
    pub amount_cdf: Decimal,
    /// Expense date.
    pub date: NaiveDate,
}

impl Cost {
    /// Returns both recorded amounts.
    #[must_use]
    pub const fn amounts(&self) -> DualAmount {
        DualAmount::new(self.amount_usd, self.amount_cdf)
    }
}

/// A production run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Production {
    /// Unique identifier.
    pub id: ProductionId,
    /// Units produced (bags of ice, bottles of water).
    pub quantity_produced: Decimal,
    /// Activity the run belongs to.
    pub activity_type_id: Option<ActivityTypeId>,
    /// Production date.
    pub date: NaiveDate,
}

impl Dated for Sale {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for Cost {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for Production {
    fn date(&self) -> NaiveDate {
        self.date
    }
}
