//! Inclusive date ranges used to slice records for a report.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::records::Dated;
use crate::reports::ReportError;

/// An inclusive `[start, end]` date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportPeriod {
    /// First day of the period.
    pub start: NaiveDate,
    /// Last day of the period.
    pub end: NaiveDate,
}

impl ReportPeriod {
    /// Creates a period.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidInput` if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::InvalidInput(format!(
                "period start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The calendar month `year-month`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidInput` for a month outside 1-12 or an
    /// unrepresentable year.
    pub fn month(year: i32, month: u32) -> Result<Self, ReportError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            ReportError::InvalidInput(format!("invalid month {year}-{month:02}"))
        })?;
        let end = last_day_of_month(start)?;
        Ok(Self { start, end })
    }

    /// The calendar month containing `date`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidInput` at the edge of the representable calendar.
    pub fn containing_month(date: NaiveDate) -> Result<Self, ReportError> {
        Self::month(date.year(), date.month())
    }

    /// Returns true if `date` falls within this period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days in the period, both ends included.
    #[must_use]
    pub fn len_days(&self) -> u64 {
        (self.end - self.start).num_days().unsigned_abs() + 1
    }

    /// Returns true if the period spans exactly one calendar month.
    #[must_use]
    pub fn is_calendar_month(&self) -> bool {
        self.start.day() == 1 && last_day_of_month(self.start).is_ok_and(|end| end == self.end)
    }

    /// The period immediately before this one.
    ///
    /// A calendar month maps to the previous calendar month; any other range
    /// maps to the range of equal length ending the day before `start`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidInput` at the edge of the representable calendar.
    pub fn previous(&self) -> Result<Self, ReportError> {
        let end = self
            .start
            .checked_sub_days(Days::new(1))
            .ok_or_else(|| out_of_range(self.start))?;

        if self.is_calendar_month() {
            return Self::containing_month(end);
        }

        let start = end
            .checked_sub_days(Days::new(self.len_days() - 1))
            .ok_or_else(|| out_of_range(end))?;
        Ok(Self { start, end })
    }
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Returns the records dated within `period`, in input order.
#[must_use]
pub fn filter_by_period<T: Dated + Clone>(records: &[T], period: &ReportPeriod) -> Vec<T> {
    records
        .iter()
        .filter(|r| period.contains(r.date()))
        .cloned()
        .collect()
}

fn last_day_of_month(first: NaiveDate) -> Result<NaiveDate, ReportError> {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| out_of_range(first))
}

fn out_of_range(date: NaiveDate) -> ReportError {
    ReportError::InvalidInput(format!("date {date} is at the edge of the calendar"))
}
