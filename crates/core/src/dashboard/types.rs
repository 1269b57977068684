//! Dashboard data types.

use frostline_shared::types::{DualAmount, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::period::ReportPeriod;
use crate::records::{Cost, InventoryMovement, Production, Sale};
use crate::reports::{Aggregator, GrowthPercent, ProductivityRatio, RankedTotal, StockLevel};

/// Records fetched for one dashboard refresh.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordSnapshot {
    /// Sales.
    pub sales: Vec<Sale>,
    /// Costs.
    pub costs: Vec<Cost>,
    /// Production runs.
    pub productions: Vec<Production>,
    /// Inventory movements.
    pub movements: Vec<InventoryMovement>,
}

/// A period total next to the previous period's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountTrend {
    /// Total for the selected period.
    pub current: DualAmount,
    /// Total for the previous period, if there is one.
    pub previous: Option<DualAmount>,
    /// USD growth from previous to current.
    pub growth_usd: Option<GrowthPercent>,
    /// CDF growth from previous to current.
    pub growth_cdf: Option<GrowthPercent>,
}

impl AmountTrend {
    /// Builds a trend, computing growth when a previous total exists.
    ///
    /// A growth figure that overflows is left out and renders as "N/A".
    #[must_use]
    pub fn new(current: DualAmount, previous: Option<DualAmount>) -> Self {
        let growth = |now: Decimal, before: Decimal| Aggregator::growth_percent(now, before).ok();
        Self {
            current,
            previous,
            growth_usd: previous.and_then(|p| growth(current.usd, p.usd)),
            growth_cdf: previous.and_then(|p| growth(current.cdf, p.cdf)),
        }
    }
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Selected period; `None` for all time.
    pub period: Option<ReportPeriod>,
    /// Comparison period.
    pub previous_period: Option<ReportPeriod>,
    /// Revenue.
    pub sales: AmountTrend,
    /// Spending.
    pub costs: AmountTrend,
    /// Revenue minus spending for the selected period.
    pub net_result: DualAmount,
    /// Number of sales in the selected period.
    pub sale_count: usize,
    /// Best-selling products.
    pub top_products: Vec<RankedTotal<ProductId>>,
    /// Largest expense types.
    pub top_expenses: Vec<RankedTotal<String>>,
    /// Units produced in the selected period.
    pub production_total: Decimal,
    /// Production against target; `None` renders as "N/A".
    pub productivity: Option<ProductivityRatio>,
    /// Current stock per product.
    pub stock_levels: Vec<StockLevel>,
}
