//! Attendance eligibility.
//!
//! An employee can have attendance submitted for a period only when the billing window
//! overlaps their tenure and nothing has been submitted for that period yet.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::BillingPeriod;

use super::billing_window::{BillingWindow, billing_window};
use super::payable_days::Tenure;

/// Whether, and why not, an employee may have attendance submitted for a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Eligibility {
    /// Attendance may be submitted.
    Eligible,
    /// The employee's billing rule could not be resolved.
    MissingBillingRule,
    /// The billing window ends on or before the joining date.
    BeforeJoining,
    /// The billing window starts after the resignation date.
    AfterResignation,
    /// Attendance for this period already exists.
    AlreadySubmitted,
}

impl Eligibility {
    /// Returns true for [`Eligibility::Eligible`].
    pub fn is_eligible(self) -> bool {
        self == Eligibility::Eligible
    }
}

/// Checks whether a billing window overlaps `[joining_date, resignation_date]`.
pub fn window_overlaps_tenure(window: &BillingWindow, tenure: &Tenure) -> Eligibility {
    if window.end_exclusive <= tenure.joining_date {
        return Eligibility::BeforeJoining;
    }
    if tenure
        .resignation_date
        .is_some_and(|resigned| window.start > resigned)
    {
        return Eligibility::AfterResignation;
    }
    Eligibility::Eligible
}

/// Determines an employee's eligibility for attendance submission in `period`.
///
/// # Arguments
///
/// * `start_day` - The billing cycle start day, or `None` if the rule is unknown
/// * `period` - The `(month, year)` billing period
/// * `tenure` - The employee's joining and resignation dates
/// * `already_submitted` - Whether a record for the employee and period exists
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::{Eligibility, Tenure, check_eligibility};
/// use attendance_engine::models::BillingPeriod;
/// use chrono::NaiveDate;
///
/// let period = BillingPeriod::new(2, 2026).unwrap();
/// let tenure = Tenure {
///     joining_date: NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
///     resignation_date: None,
/// };
///
/// let eligibility = check_eligibility(Some(5), period, &tenure, false).unwrap();
/// assert_eq!(eligibility, Eligibility::BeforeJoining);
/// ```
pub fn check_eligibility(
    start_day: Option<u32>,
    period: BillingPeriod,
    tenure: &Tenure,
    already_submitted: bool,
) -> EngineResult<Eligibility> {
    let Some(start_day) = start_day else {
        return Ok(Eligibility::MissingBillingRule);
    };

    let window = billing_window(start_day, period)?;
    let overlap = window_overlaps_tenure(&window, tenure);
    if !overlap.is_eligible() {
        return Ok(overlap);
    }

    if already_submitted {
        return Ok(Eligibility::AlreadySubmitted);
    }

    Ok(Eligibility::Eligible)
}
