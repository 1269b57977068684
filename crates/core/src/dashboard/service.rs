//! Dashboard assembly service.

use chrono::NaiveDate;

use super::filters::DashboardFilters;
use super::types::{AmountTrend, DashboardSummary, RecordSnapshot};
use crate::period::{ReportPeriod, filter_by_period};
use crate::records::{Dated, Production};
use crate::reports::{Aggregator, ReportError};

/// Service that turns a snapshot into dashboard figures.
pub struct DashboardService;

impl DashboardService {
    /// Builds the dashboard for `filters`, resolving relative periods against `today`.
    ///
    /// Inventory is never period-filtered: stock levels always reflect every movement.
    /// A growth or productivity figure that cannot be computed is reported as `None`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidInput` if the filter period cannot be resolved
    /// and `ReportError::Overflow` if a total, ranking or stock level overflows.
    pub fn summarize(
        snapshot: &RecordSnapshot,
        filters: &DashboardFilters,
        today: NaiveDate,
    ) -> Result<DashboardSummary, ReportError> {
        let period = filters.period.resolve(today)?;
        let previous_period = period.as_ref().map(ReportPeriod::previous).transpose()?;

        let sales = Self::select(&snapshot.sales, period.as_ref());
        let costs = Self::select(&snapshot.costs, period.as_ref());
        let productions: Vec<Production> = Self::select(&snapshot.productions, period.as_ref())
            .into_iter()
            .filter(|p| {
                filters
                    .activity_type_id
                    .is_none_or(|wanted| p.activity_type_id == Some(wanted))
            })
            .collect();

        let previous_sales = previous_period
            .as_ref()
            .map(|p| Aggregator::total_sales(&filter_by_period(&snapshot.sales, p)))
            .transpose()?;
        let previous_costs = previous_period
            .as_ref()
            .map(|p| Aggregator::total_costs(&filter_by_period(&snapshot.costs, p)))
            .transpose()?;

        Ok(DashboardSummary {
            period,
            previous_period,
            sales: AmountTrend::new(Aggregator::total_sales(&sales)?, previous_sales),
            costs: AmountTrend::new(Aggregator::total_costs(&costs)?, previous_costs),
            net_result: Aggregator::net_result(&sales, &costs)?,
            sale_count: sales.len(),
            top_products: Aggregator::top_products(&sales, filters.top_n)?,
            top_expenses: Aggregator::top_expenses(&costs, filters.top_n)?,
            production_total: Aggregator::total_production(&productions)?,
            productivity: Aggregator::productivity_ratio(&productions, filters.production_target)
                .ok(),
            stock_levels: Aggregator::stock_levels(&snapshot.movements)?,
        })
    }

    fn select<T: Dated + Clone>(records: &[T], period: Option<&ReportPeriod>) -> Vec<T> {
        match period {
            Some(p) => filter_by_period(records, p),
            None => records.to_vec(),
        }
    }
}
