//! Calendar-month period arithmetic.
//!
//! A [`Period`] is an inclusive calendar-month date range. All operations are
//! pure date arithmetic on `chrono::NaiveDate` — calendar dates, not instants,
//! so there is no timezone ambiguity.

use chrono::{Datelike, Days, NaiveDate};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PeriodError {
    /// Month outside `1..=12`.
    #[error("month out of range: {0} (expected 1..=12)")]
    MonthOutOfRange(u32),

    /// The year/month pair does not form a representable calendar date.
    #[error("invalid calendar month: {year}-{month:02}")]
    InvalidDate { year: i32, month: u32 },
}

/// One calendar month, with its inclusive first/last day precomputed.
///
/// Immutable once constructed. The month label (`"N월"`) keys the spreadsheet
/// column for this period; it is derived from the month number only, so the
/// same label recurs across calendar years (the grid's existing contract).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    year: i32,
    month: u32,
    start: NaiveDate,
    end: NaiveDate,
}

impl Period {
    /// Builds the period for a specific `(year, month)` pair.
    ///
    /// The end date is computed as the first day of the following month minus
    /// one day, with December rolling over to January of the next year.
    ///
    /// # Errors
    ///
    /// - [`PeriodError::MonthOutOfRange`] if `month` is not in `1..=12`.
    /// - [`PeriodError::InvalidDate`] if the year is outside the range
    ///   `chrono` can represent.
    pub fn for_month(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::MonthOutOfRange(month));
        }
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(PeriodError::InvalidDate { year, month })?;
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1).ok_or(
            PeriodError::InvalidDate {
                year: next_year,
                month: next_month,
            },
        )?;
        let end = next_first
            .checked_sub_days(Days::new(1))
            .ok_or(PeriodError::InvalidDate { year, month })?;
        Ok(Self {
            year,
            month,
            start,
            end,
        })
    }

    /// The calendar month strictly before the month containing `today`.
    ///
    /// January rolls back to December of the prior year.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidDate`] only when `today` sits at the edge
    /// of `chrono`'s representable range.
    pub fn last_completed(today: NaiveDate) -> Result<Self, PeriodError> {
        let (year, month) = if today.month() == 1 {
            (today.year() - 1, 12)
        } else {
            (today.year(), today.month() - 1)
        };
        Self::for_month(year, month)
    }

    /// The period immediately preceding this one, with the same year-rollback
    /// rule as [`Period::last_completed`].
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidDate`] only at the edge of the
    /// representable year range.
    pub fn previous(&self) -> Result<Self, PeriodError> {
        let (year, month) = if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        };
        Self::for_month(year, month)
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month (inclusive).
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the month (inclusive).
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// The display label keying this period's spreadsheet column, e.g. `"3월"`.
    ///
    /// Month number only — two periods with the same month in different years
    /// share a label and therefore a column.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}월", self.month)
    }
}

impl std::fmt::Display for Period {
    /// Renders the inclusive date range, e.g. `"2025-03-01 ~ 2025-03-31"`.
    /// This is the exact string written to the column's anchor cell.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ~ {}", self.start, self.end)
    }
}

#[cfg(test)]
#[path = "period_test.rs"]
mod tests;
