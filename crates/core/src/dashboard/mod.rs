//! Dashboard figures.
//!
//! This module assembles the dashboard from a record snapshot:
//! - Filters and their resolution to a reporting period
//! - Period totals with growth against the previous period
//! - Rankings, productivity and stock levels

pub mod filters;
pub mod service;
pub mod types;

pub use filters::{DashboardFilters, PeriodFilter};
pub use service::DashboardService;
pub use types::*;
