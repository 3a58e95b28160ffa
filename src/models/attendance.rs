//! Monthly attendance models.
//!
//! This module contains the stored [`MonthlyAttendance`] record, the enriched
//! [`AttendanceView`] returned by queries, the [`AttendanceFilter`] used to select
//! transactions, and the [`SheetRow`] produced for the attendance entry screen.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calculation::Eligibility;

use super::{AuditStep, BillingPeriod, Employee};

/// One employee's attendance for one billing period.
///
/// `payable_days` and `loss_of_pay` are always computed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAttendance {
    /// Server-assigned identifier.
    pub id: u64,
    /// The employee the record belongs to.
    pub emp_id: String,
    /// The approver who submitted the record.
    pub approver_emp_id: String,
    /// The billing month (1-12).
    pub month: u32,
    /// The billing year.
    pub year: i32,
    /// Days payable in the billing period.
    pub payable_days: u32,
    /// Leaves taken in the billing period.
    pub leaves_taken: u32,
    /// Leaves beyond the monthly free allowance.
    pub loss_of_pay: u32,
    /// When the record was stored.
    pub submitted_at: DateTime<Utc>,
}

impl MonthlyAttendance {
    /// Returns the billing period this record covers.
    pub fn period(&self) -> BillingPeriod {
        BillingPeriod {
            month: self.month,
            year: self.year,
        }
    }
}

/// An attendance record joined with the current employee details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceView {
    /// The stored record.
    #[serde(flatten)]
    pub record: MonthlyAttendance,
    /// The employee's name, if the employee still exists.
    pub name: Option<String>,
    /// The employee's vendor.
    pub vendor_name: Option<String>,
    /// The employee's designation.
    pub designation: Option<String>,
    /// Whether the employee has resigned.
    pub resigned: bool,
}

/// Filter for attendance transaction queries. Absent fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceFilter {
    /// Match the employee ID exactly.
    pub emp_id: Option<String>,
    /// Match the approver ID exactly.
    pub approver_emp_id: Option<String>,
    /// Match the billing month.
    pub month: Option<u32>,
    /// Match the billing year.
    pub year: Option<i32>,
    /// Match the employee's vendor.
    pub vendor_name: Option<String>,
    /// Match the employee's designation.
    pub designation: Option<String>,
    /// Match the employee's resignation status.
    pub resigned: Option<bool>,
}

impl AttendanceFilter {
    /// Returns true if the record, joined with its employee, matches every set field.
    pub fn matches(&self, record: &MonthlyAttendance, employee: Option<&Employee>) -> bool {
        fn eq_opt<T: PartialEq + ?Sized>(want: Option<&T>, have: Option<&T>) -> bool {
            match want {
                Some(want) => have == Some(want),
                None => true,
            }
        }

        eq_opt(self.emp_id.as_deref(), Some(record.emp_id.as_str()))
            && eq_opt(
                self.approver_emp_id.as_deref(),
                Some(record.approver_emp_id.as_str()),
            )
            && eq_opt(self.month.as_ref(), Some(&record.month))
            && eq_opt(self.year.as_ref(), Some(&record.year))
            && eq_opt(
                self.vendor_name.as_deref(),
                employee.map(|e| e.vendor_name.as_str()),
            )
            && eq_opt(
                self.designation.as_deref(),
                employee.and_then(|e| e.designation.as_deref()),
            )
            && eq_opt(
                self.resigned.as_ref(),
                Some(&employee.is_some_and(Employee::has_resigned)),
            )
    }
}

/// A row of the attendance entry sheet for one employee and billing period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    /// The employee ID.
    pub emp_id: String,
    /// The employee's name.
    pub name: String,
    /// The employee's gender.
    pub gender: String,
    /// The employee's billing-cycle rule.
    pub billing_rule_id: String,
    /// The billing rule's start day, if the rule exists.
    pub billing_rule_start_day: Option<u32>,
    /// The employee's vendor.
    pub vendor_name: String,
    /// The employee's location.
    pub location: String,
    /// The employee's designation.
    pub designation: Option<String>,
    /// The employee's approver.
    pub approver_emp_id: String,
    /// Whether the employee has resigned.
    pub resigned: bool,
    /// First day of the billing period, if the rule exists.
    pub period_start: Option<NaiveDate>,
    /// Day after the last day of the billing period, if the rule exists.
    pub period_end_exclusive: Option<NaiveDate>,
    /// Payable days for the period.
    pub payable_days: u32,
    /// Whether attendance can be submitted, and if not, why.
    pub eligibility: Eligibility,
    /// How `payable_days` was derived.
    pub audit_step: AuditStep,
}
