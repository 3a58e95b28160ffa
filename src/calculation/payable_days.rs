//! Payable-days calculation.
//!
//! This module intersects an employee's tenure with the billing window of a period to
//! find how many days of that period the employee is paid for. The resignation day itself
//! is payable, so tenure is treated as `[joining_date, resignation_date + 1)`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{AuditStep, BillingPeriod, Employee};

use super::billing_window::{BillingWindow, billing_window, days_between};

/// The tenure dates of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenure {
    /// The date the employee joined.
    pub joining_date: NaiveDate,
    /// The date the employee resigned, if any.
    pub resignation_date: Option<NaiveDate>,
}

impl Tenure {
    /// Day after the last payable day of the tenure, or `None` while still employed.
    pub fn end_exclusive(&self) -> Option<NaiveDate> {
        self.resignation_date.and_then(|d| d.succ_opt())
    }
}

impl From<&Employee> for Tenure {
    fn from(employee: &Employee) -> Self {
        Self {
            joining_date: employee.joining_date,
            resignation_date: employee.resignation_date,
        }
    }
}

/// The result of a payable-days calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct PayableDaysResult {
    /// Days payable in the period.
    pub payable_days: u32,
    /// The billing window, if the start day was known.
    pub billing_window: Option<BillingWindow>,
    /// The payable part of the billing window, if it is non-empty.
    pub payable_window: Option<BillingWindow>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the days in a billing period for which an employee is paid.
///
/// The billing window is `[date(year, month, start_day), date(year, month + 1, start_day))`.
/// Payable days run from the later of the joining date and the window start up to the
/// earlier of the window end and the day after resignation. A missing `start_day`
/// yields 0 payable days rather than an error.
///
/// # Arguments
///
/// * `start_day` - The billing cycle start day (1-31), or `None` if the rule is unknown
/// * `period` - The `(month, year)` billing period
/// * `tenure` - The employee's joining and resignation dates
///
/// # Returns
///
/// Returns a `PayableDaysResult`, or an error if `start_day` is outside 1-31 or the
/// period cannot be represented as calendar dates.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::{Tenure, calculate_payable_days};
/// use attendance_engine::models::BillingPeriod;
/// use chrono::NaiveDate;
///
/// let period = BillingPeriod::new(2, 2026).unwrap();
/// let tenure = Tenure {
///     joining_date: NaiveDate::from_ymd_opt(2026, 2, 20).unwrap(),
///     resignation_date: None,
/// };
///
/// let result = calculate_payable_days(Some(5), period, &tenure).unwrap();
/// assert_eq!(result.payable_days, 13);
/// ```
pub fn calculate_payable_days(
    start_day: Option<u32>,
    period: BillingPeriod,
    tenure: &Tenure,
) -> EngineResult<PayableDaysResult> {
    let Some(start_day) = start_day else {
        let audit_step = AuditStep {
            rule_id: "payable_days".to_string(),
            rule_name: "Payable Days".to_string(),
            input: serde_json::json!({
                "start_day": null,
                "month": period.month,
                "year": period.year,
                "joining_date": tenure.joining_date.to_string(),
                "resignation_date": tenure.resignation_date.map(|d| d.to_string()),
            }),
            output: serde_json::json!({
                "payable_days": 0,
            }),
            reasoning: "No billing cycle start day; payable days default to 0".to_string(),
        };

        return Ok(PayableDaysResult {
            payable_days: 0,
            billing_window: None,
            payable_window: None,
            audit_step,
        });
    };

    let window = billing_window(start_day, period)?;

    let payable_start = tenure.joining_date.max(window.start);
    let payable_end_exclusive = match tenure.end_exclusive() {
        Some(resignation_end) => resignation_end.min(window.end_exclusive),
        None => window.end_exclusive,
    };
    let payable_days = days_between(payable_start, payable_end_exclusive);

    let payable_window = (payable_days > 0).then_some(BillingWindow {
        start: payable_start,
        end_exclusive: payable_end_exclusive,
    });

    let reasoning = if payable_days == 0 {
        format!(
            "Tenure {} to {} does not overlap billing window {} to {}",
            tenure.joining_date,
            tenure
                .resignation_date
                .map_or_else(|| "present".to_string(), |d| d.to_string()),
            window.start,
            window.end_exclusive
        )
    } else if payable_days == window.days() {
        format!(
            "Employed for the whole billing window {} to {}: {} days",
            window.start, window.end_exclusive, payable_days
        )
    } else {
        format!(
            "Payable from {} until {} (exclusive): {} of {} days",
            payable_start,
            payable_end_exclusive,
            payable_days,
            window.days()
        )
    };

    let audit_step = AuditStep {
        rule_id: "payable_days".to_string(),
        rule_name: "Payable Days".to_string(),
        input: serde_json::json!({
            "start_day": start_day,
            "month": period.month,
            "year": period.year,
            "joining_date": tenure.joining_date.to_string(),
            "resignation_date": tenure.resignation_date.map(|d| d.to_string()),
        }),
        output: serde_json::json!({
            "period_start": window.start.to_string(),
            "period_end_exclusive": window.end_exclusive.to_string(),
            "payable_start": payable_start.to_string(),
            "payable_end_exclusive": payable_end_exclusive.to_string(),
            "payable_days": payable_days,
        }),
        reasoning,
    };

    Ok(PayableDaysResult {
        payable_days,
        billing_window: Some(window),
        payable_window,
        audit_step,
    })
}
