//! Dashboard report aggregation.
//!
//! This module provides pure business logic for dashboard figures:
//! - Top-N rankings by product or expense type
//! - Period-over-period growth
//! - Productivity against a target
//! - Stock levels from inventory movements

pub mod aggregator;
pub mod error;
pub mod inventory;
pub mod types;


pub use aggregator::Aggregator;
pub use error::ReportError;
pub use types::*;
