//! Reporting logic for Frostline.
//!
//! This crate turns flat collections of sales, costs, production runs and
//! inventory movements into the figures shown on the dashboard. It has ZERO
//! I/O dependencies: callers fetch records, then pass snapshots in.
//!
//! # Modules
//!
//! - `records` - Validated domain records consumed by the aggregator
//! - `period` - Inclusive reporting periods and period filtering
//! - `reports` - Rankings, growth, productivity and stock aggregation
//! - `dashboard` - Dashboard filters and summary assembly

pub mod dashboard;
pub mod period;
pub mod records;
pub mod reports;
