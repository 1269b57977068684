//! Report data types.

use std::hash::Hash;

use chrono::NaiveDate;
use frostline_shared::types::{DualAmount, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A value records can be grouped by in a ranking.
pub trait RankKey: Clone + Eq + Hash {
    /// Returns true if the key carries no usable value and the record must be skipped.
    fn is_blank(&self) -> bool {
        false
    }
}

impl RankKey for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl RankKey for &str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl RankKey for ProductId {}

/// Per-currency amount accessors used by rankings and totals.
///
/// A `None` from either accessor counts as zero.
#[derive(Debug, Clone, Copy)]
pub struct AmountExtractors<U, C> {
    /// Reads the US dollar amount.
    pub usd: U,
    /// Reads the Congolese franc amount.
    pub cdf: C,
}

impl<U, C> AmountExtractors<U, C> {
    /// Creates a pair of extractors.
    pub const fn new(usd: U, cdf: C) -> Self {
        Self { usd, cdf }
    }

    /// Reads both amounts from `record`, treating missing values as zero.
    pub fn extract<T>(&self, record: &T) -> DualAmount
    where
        U: Fn(&T) -> Option<Decimal>,
        C: Fn(&T) -> Option<Decimal>,
    {
        DualAmount::new(
            (self.usd)(record).unwrap_or(Decimal::ZERO),
            (self.cdf)(record).unwrap_or(Decimal::ZERO),
        )
    }
}

/// Totals for one key of a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedTotal<K> {
    /// Grouping key (product or expense type).
    pub key: K,
    /// Total in US dollars.
    pub usd: Decimal,
    /// Total in Congolese francs.
    pub cdf: Decimal,
    /// Number of records folded into this total.
    pub count: usize,
}

/// Period-over-period change, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthPercent {
    /// Signed change in percent, rounded to 2 decimal places.
    pub value: Decimal,
    /// Set when the previous value was zero and `value` is the fixed 100.
    pub from_zero_base: bool,
}

/// Actual output measured against a target, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductivityRatio {
    /// Total quantity produced.
    pub actual: Decimal,
    /// Target quantity.
    pub target: Decimal,
    /// `actual / target * 100`, rounded to 2 decimal places.
    pub percent: Decimal,
}

/// Stock position of one product derived from its movements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    /// Product.
    pub product_id: ProductId,
    /// Sum of `IN` quantities.
    pub quantity_in: Decimal,
    /// Sum of `OUT` quantities.
    pub quantity_out: Decimal,
    /// Sum of signed `ADJUSTMENT` quantities.
    pub adjustments: Decimal,
    /// Remaining quantity reported by the latest movement.
    pub current_quantity: Decimal,
    /// Date of the latest movement.
    pub last_movement: NaiveDate,
    /// Movements whose remaining quantity does not match their arithmetic.
    pub inconsistent_movements: usize,
}
