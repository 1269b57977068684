//! Dual-currency amounts with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every transaction records a US dollar amount and a Congolese franc amount
//! independently; the two are never derived from each other through a rate.
//!
//! Arithmetic is checked: `Decimal` operators panic on overflow, so sums and
//! differences return `None` instead.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A pair of amounts, one per recorded currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualAmount {
    /// Amount in US dollars.
    pub usd: Decimal,
    /// Amount in Congolese francs.
    pub cdf: Decimal,
}

impl DualAmount {
    /// Both amounts zero.
    pub const ZERO: Self = Self {
        usd: Decimal::ZERO,
        cdf: Decimal::ZERO,
    };

    /// Creates a new dual amount.
    #[must_use]
    pub const fn new(usd: Decimal, cdf: Decimal) -> Self {
        Self { usd, cdf }
    }

    /// Returns true if both amounts are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.usd.is_zero() && self.cdf.is_zero()
    }

    /// Adds per currency, or `None` if either side overflows.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(Self::new(
            self.usd.checked_add(rhs.usd)?,
            self.cdf.checked_add(rhs.cdf)?,
        ))
    }

    /// Subtracts per currency, or `None` if either side overflows.
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        Some(Self::new(
            self.usd.checked_sub(rhs.usd)?,
            self.cdf.checked_sub(rhs.cdf)?,
        ))
    }

    /// Sums `amounts`, or `None` on overflow. An empty input sums to zero.
    pub fn checked_sum<I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        amounts.into_iter().try_fold(Self::ZERO, Self::checked_add)
    }
}
