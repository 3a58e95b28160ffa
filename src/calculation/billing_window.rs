//! Billing window resolution.
//!
//! A vendor's billing cycle starts on a fixed day of month and runs until the same day of
//! the following month. This module turns a `(start_day, month, year)` triple into the
//! concrete half-open date range `[start, end_exclusive)`.
//!
//! Dates are built with calendar normalisation: a month past December carries into the
//! next year and a day past the end of the month carries into the following month, so a
//! start day of 31 in February resolves to early March.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::BillingPeriod;

/// A resolved billing window `[start, end_exclusive)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingWindow {
    /// First day of the window (inclusive).
    pub start: NaiveDate,
    /// Day after the last day of the window (exclusive).
    pub end_exclusive: NaiveDate,
}

impl BillingWindow {
    /// Number of calendar days in the window.
    pub fn days(&self) -> u32 {
        days_between(self.start, self.end_exclusive)
    }

    /// Last day of the window (inclusive).
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.end_exclusive.pred_opt()
    }

    /// Checks if a date falls within the window.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end_exclusive
    }
}

/// Builds a calendar date, normalising month and day overflow.
///
/// `month` is 1-based and may exceed 12; `day` is 1-based and may exceed the length of
/// the month.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::normalized_date;
/// use chrono::NaiveDate;
///
/// // Month 13 is January of the following year.
/// assert_eq!(
///     normalized_date(2026, 13, 28).unwrap(),
///     NaiveDate::from_ymd_opt(2027, 1, 28).unwrap()
/// );
///
/// // 31 February 2026 is 3 March 2026.
/// assert_eq!(
///     normalized_date(2026, 2, 31).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()
/// );
/// ```
pub fn normalized_date(year: i32, month: u32, day: u32) -> EngineResult<NaiveDate> {
    if month == 0 || day == 0 {
        return Err(EngineError::InvalidBillingPeriod {
            message: format!("month and day are 1-based, got {}-{}", month, day),
        });
    }

    let months_from_epoch = i64::from(year) * 12 + i64::from(month - 1);
    let out_of_range = || EngineError::InvalidBillingPeriod {
        message: format!("date {}-{}-{} is out of range", year, month, day),
    };

    let normalized_year =
        i32::try_from(months_from_epoch.div_euclid(12)).map_err(|_| out_of_range())?;
    let normalized_month = months_from_epoch.rem_euclid(12) as u32 + 1;

    NaiveDate::from_ymd_opt(normalized_year, normalized_month, 1)
        .and_then(|first| first.checked_add_days(Days::new(u64::from(day - 1))))
        .ok_or_else(out_of_range)
}

/// Resolves the billing window for a cycle starting on `start_day` in `period`.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::billing_window;
/// use attendance_engine::models::BillingPeriod;
/// use chrono::NaiveDate;
///
/// let window = billing_window(5, BillingPeriod::new(2, 2026).unwrap()).unwrap();
/// assert_eq!(window.start, NaiveDate::from_ymd_opt(2026, 2, 5).unwrap());
/// assert_eq!(window.end_exclusive, NaiveDate::from_ymd_opt(2026, 3, 5).unwrap());
/// assert_eq!(window.days(), 28);
/// ```
pub fn billing_window(start_day: u32, period: BillingPeriod) -> EngineResult<BillingWindow> {
    if !(1..=31).contains(&start_day) {
        return Err(EngineError::invalid_field(
            "billing rule",
            "start_day",
            format!("must be between 1 and 31, got {}", start_day),
        ));
    }

    let start = normalized_date(period.year, period.month, start_day)?;
    let end_exclusive = normalized_date(period.year, period.month + 1, start_day)?;

    Ok(BillingWindow {
        start,
        end_exclusive,
    })
}

/// Whole days from `start` to `end`, or 0 if `end` is not after `start`.
pub(crate) fn days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let days = end.signed_duration_since(start).num_days();
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}
