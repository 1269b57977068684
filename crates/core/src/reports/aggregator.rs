//! Reporting aggregator.
//!
//! Pure functions from record slices to dashboard figures. Nothing here
//! mutates its input or keeps state between calls. All arithmetic is
//! checked; a figure that does not fit in a `Decimal` is a
//! `ReportError::Overflow`, never a panic.

use std::collections::HashMap;

use frostline_shared::types::{DualAmount, ProductId};
use rust_decimal::Decimal;

use super::error::ReportError;
use super::types::{AmountExtractors, GrowthPercent, ProductivityRatio, RankKey, RankedTotal};
use crate::records::{Cost, Production, Sale};

/// Aggregation operations over record snapshots.
pub struct Aggregator;

impl Aggregator {
    /// Groups `records` by key and returns the `top_n` groups with the highest USD total.
    ///
    /// Records whose key is missing or blank are skipped. Groups with equal
    /// USD totals keep the order in which their key was first seen.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Overflow` if a group total does not fit in a `Decimal`.
    pub fn rank_by_key<T, K, FK, U, C>(
        records: &[T],
        key: FK,
        amounts: &AmountExtractors<U, C>,
        top_n: usize,
    ) -> Result<Vec<RankedTotal<K>>, ReportError>
    where
        K: RankKey,
        FK: Fn(&T) -> Option<K>,
        U: Fn(&T) -> Option<Decimal>,
        C: Fn(&T) -> Option<Decimal>,
    {
        let mut ranked: Vec<RankedTotal<K>> = Vec::new();
        let mut index: HashMap<K, usize> = HashMap::new();

        for record in records {
            let Some(k) = key(record).filter(|k| !k.is_blank()) else {
                continue;
            };
            let amount = amounts.extract(record);

            let slot = *index.entry(k.clone()).or_insert_with(|| {
                ranked.push(RankedTotal {
                    key: k,
                    usd: Decimal::ZERO,
                    cdf: Decimal::ZERO,
                    count: 0,
                });
                ranked.len() - 1
            });

            let total = &mut ranked[slot];
            total.usd = checked(total.usd.checked_add(amount.usd), "ranking total")?;
            total.cdf = checked(total.cdf.checked_add(amount.cdf), "ranking total")?;
            total.count += 1;
        }

        // Vec::sort_by is stable: ties stay in first-seen order.
        ranked.sort_by(|a, b| b.usd.cmp(&a.usd));
        ranked.truncate(top_n);
        Ok(ranked)
    }

    /// Best-selling products by USD revenue.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Overflow` if a product total overflows.
    pub fn top_products(
        sales: &[Sale],
        top_n: usize,
    ) -> Result<Vec<RankedTotal<ProductId>>, ReportError> {
        Self::rank_by_key(
            sales,
            |s: &Sale| s.product_id,
            &AmountExtractors::new(
                |s: &Sale| Some(s.amount_usd),
                |s: &Sale| Some(s.amount_cdf),
            ),
            top_n,
        )
    }

    /// Largest expense types by USD cost.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Overflow` if an expense total overflows.
    pub fn top_expenses(
        costs: &[Cost],
        top_n: usize,
    ) -> Result<Vec<RankedTotal<String>>, ReportError> {
        Self::rank_by_key(
            costs,
            |c: &Cost| c.expense_type_name.as_deref().map(str::trim).map(String::from),
            &AmountExtractors::new(
                |c: &Cost| Some(c.amount_usd),
                |c: &Cost| Some(c.amount_cdf),
            ),
            top_n,
        )
    }

    /// Sums both currencies over `records`, treating missing amounts as zero.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Overflow` if the sum overflows.
    pub fn total_amounts<T, U, C>(
        records: &[T],
        amounts: &AmountExtractors<U, C>,
    ) -> Result<DualAmount, ReportError>
    where
        U: Fn(&T) -> Option<Decimal>,
        C: Fn(&T) -> Option<Decimal>,
    {
        let total = DualAmount::checked_sum(records.iter().map(|r| amounts.extract(r)));
        checked(total, "total")
    }

    /// Total revenue.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Overflow` if the sum overflows.
    pub fn total_sales(sales: &[Sale]) -> Result<DualAmount, ReportError> {
        let total = DualAmount::checked_sum(sales.iter().map(Sale::amounts));
        checked(total, "sales total")
    }

    /// Total spending.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Overflow` if the sum overflows.
    pub fn total_costs(costs: &[Cost]) -> Result<DualAmount, ReportError> {
        let total = DualAmount::checked_sum(costs.iter().map(Cost::amounts));
        checked(total, "costs total")
    }

    /// Revenue minus spending, per currency.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Overflow` if either total or the difference overflows.
    pub fn net_result(sales: &[Sale], costs: &[Cost]) -> Result<DualAmount, ReportError> {
        let revenue = Self::total_sales(sales)?;
        let spending = Self::total_costs(costs)?;
        checked(revenue.checked_sub(spending), "net result")
    }

    /// Change from `previous` to `current`, in percent.
    ///
    /// When `previous` is zero the result is 100 whatever `current` is,
    /// including zero, and `from_zero_base` is set.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Overflow` if the change does not fit in a `Decimal`,
    /// e.g. against a vanishingly small `previous`.
    pub fn growth_percent(
        current: Decimal,
        previous: Decimal,
    ) -> Result<GrowthPercent, ReportError> {
        if previous.is_zero() {
            return Ok(GrowthPercent {
                value: Decimal::ONE_HUNDRED,
                from_zero_base: true,
            });
        }

        let value = current
            .checked_sub(previous)
            .and_then(|diff| diff.checked_div(previous))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));
        Ok(GrowthPercent {
            value: checked(value, "growth percent")?.round_dp(2),
            from_zero_base: false,
        })
    }

    /// Total quantity produced. Callers filter by period beforehand.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Overflow` if the sum overflows.
    pub fn total_production(productions: &[Production]) -> Result<Decimal, ReportError> {
        let total = productions
            .iter()
            .try_fold(Decimal::ZERO, |acc, p| acc.checked_add(p.quantity_produced));
        checked(total, "production total")
    }

    /// Produced quantity against `target`, in percent.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::DivisionByZero` if `target` is zero,
    /// `ReportError::InvalidInput` if it is negative and
    /// `ReportError::Overflow` if the ratio does not fit in a `Decimal`.
    pub fn productivity_ratio(
        productions: &[Production],
        target: Decimal,
    ) -> Result<ProductivityRatio, ReportError> {
        if target.is_zero() {
            return Err(ReportError::DivisionByZero("production target"));
        }
        if target.is_sign_negative() {
            return Err(ReportError::InvalidInput(format!(
                "production target must be positive, got {target}"
            )));
        }

        let actual = Self::total_production(productions)?;
        let percent = actual
            .checked_div(target)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));
        Ok(ProductivityRatio {
            actual,
            target,
            percent: checked(percent, "productivity ratio")?.round_dp(2),
        })
    }
}

pub(crate) fn checked<T>(value: Option<T>, figure: &'static str) -> Result<T, ReportError> {
    value.ok_or(ReportError::Overflow(figure))
}
