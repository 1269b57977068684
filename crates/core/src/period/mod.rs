//! Reporting periods.

pub mod range;

pub use range::{ReportPeriod, filter_by_period};
