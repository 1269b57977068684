//! Dashboard filter settings.
//!
//! Filters are plain values handed to `DashboardService`; persisting them is
//! left to an injected store in the data layer.

use chrono::NaiveDate;
use frostline_shared::config::ReportingConfig;
use frostline_shared::types::ActivityTypeId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::period::ReportPeriod;
use crate::reports::ReportError;

/// Which dates the dashboard covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PeriodFilter {
    /// The calendar month containing today.
    #[default]
    CurrentMonth,
    /// The calendar month before the current one.
    PreviousMonth,
    /// An explicit inclusive range.
    Custom {
        /// First day.
        start: NaiveDate,
        /// Last day.
        end: NaiveDate,
    },
    /// Every record, no comparison period.
    AllTime,
}

impl PeriodFilter {
    /// Resolves the filter against `today`. `None` means no date restriction.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidInput` for an inverted custom range.
    pub fn resolve(&self, today: NaiveDate) -> Result<Option<ReportPeriod>, ReportError> {
        match *self {
            Self::CurrentMonth => ReportPeriod::containing_month(today).map(Some),
            Self::PreviousMonth => ReportPeriod::containing_month(today)?.previous().map(Some),
            Self::Custom { start, end } => ReportPeriod::new(start, end).map(Some),
            Self::AllTime => Ok(None),
        }
    }
}

/// Everything the user can tune on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardFilters {
    /// Reporting period.
    #[serde(default)]
    pub period: PeriodFilter,
    /// Length of the top products / top expenses lists.
    pub top_n: usize,
    /// Production target for the productivity ratio.
    pub production_target: Decimal,
    /// Only count production of this activity type.
    #[serde(default)]
    pub activity_type_id: Option<ActivityTypeId>,
}

impl Default for DashboardFilters {
    fn default() -> Self {
        Self::from(&ReportingConfig::default())
    }
}

impl From<&ReportingConfig> for DashboardFilters {
    fn from(config: &ReportingConfig) -> Self {
        Self {
            period: PeriodFilter::CurrentMonth,
            top_n: config.top_n,
            production_target: config.production_target,
            activity_type_id: config.activity_type_id.map(ActivityTypeId::from_uuid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_current_and_previous_month() {
        let today = date(2026, 1, 19);

        let current = PeriodFilter::CurrentMonth.resolve(today).unwrap().unwrap();
        assert_eq!(current, ReportPeriod::month(2026, 1).unwrap());

        let previous = PeriodFilter::PreviousMonth.resolve(today).unwrap().unwrap();
        assert_eq!(previous, ReportPeriod::month(2025, 12).unwrap());
    }

    #[test]
    fn test_resolve_custom_and_all_time() {
        let today = date(2026, 1, 19);
        let custom = PeriodFilter::Custom {
            start: date(2026, 1, 5),
            end: date(2026, 1, 10),
        };
        assert_eq!(
            custom.resolve(today).unwrap(),
            Some(ReportPeriod::new(date(2026, 1, 5), date(2026, 1, 10)).unwrap())
        );
        assert_eq!(PeriodFilter::AllTime.resolve(today).unwrap(), None);

        let inverted = PeriodFilter::Custom {
            start: date(2026, 1, 10),
            end: date(2026, 1, 5),
        };
        assert!(inverted.resolve(today).is_err());
    }

    #[test]
    fn test_filters_from_config() {
        let config = ReportingConfig {
            top_n: 3,
            production_target: dec!(750),
            activity_type_id: None,
        };
        let filters = DashboardFilters::from(&config);
        assert_eq!(filters.period, PeriodFilter::CurrentMonth);
        assert_eq!(filters.top_n, 3);
        assert_eq!(filters.production_target, dec!(750));
    }

    #[test]
    fn test_filters_serde() {
        let filters = DashboardFilters {
            period: PeriodFilter::Custom {
                start: date(2026, 2, 1),
                end: date(2026, 2, 14),
            },
            top_n: 4,
            production_target: dec!(1200),
            activity_type_id: None,
        };

        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(json["period"]["kind"], "custom");
        assert_eq!(json["period"]["start"], "2026-02-01");

        let back: DashboardFilters = serde_json::from_value(json).unwrap();
        assert_eq!(back, filters);
    }

    #[test]
    fn test_filters_period_defaults_when_absent() {
        let filters: DashboardFilters =
            serde_json::from_str(r#"{"top_n": 5, "production_target": "1000"}"#).unwrap();
        assert_eq!(filters.period, PeriodFilter::CurrentMonth);
        assert!(filters.activity_type_id.is_none());
    }
}
