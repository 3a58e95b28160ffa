//! The monthly attendance workflow: entry sheet, batch submission and queries.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::{
    Eligibility, Tenure, calculate_loss_of_pay, calculate_payable_days, check_eligibility,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceFilter, AttendanceView, AuditWarning, BillingPeriod, Employee, MonthlyAttendance,
    SheetRow, WarningSeverity,
};

use super::{Registry, Tables};

/// One employee's attendance as submitted by an approver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceEntry {
    /// The employee ID.
    pub emp_id: String,
    /// The approver submitting the record; defaults to the employee's approver.
    #[serde(default)]
    pub approver_emp_id: Option<String>,
    /// The billing month (1-12).
    pub month: u32,
    /// The billing year.
    pub year: i32,
    /// Payable days as shown to the approver. Informational only.
    #[serde(default)]
    pub payable_days: Option<u32>,
    /// Leaves taken in the period.
    pub leaves_taken: u32,
}

/// Which employees an attendance sheet covers.
#[derive(Debug, Clone, Default)]
pub struct SheetScope {
    /// Limit the sheet to one approver's employees.
    pub approver_emp_id: Option<String>,
    /// Include rows for employees who cannot have attendance submitted.
    pub include_ineligible: bool,
}

/// The attendance entry sheet for one billing period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSheet {
    /// The billing month.
    pub month: u32,
    /// The billing year.
    pub year: i32,
    /// One row per employee, ordered by employee ID.
    pub rows: Vec<SheetRow>,
    /// Problems found while building the sheet.
    pub warnings: Vec<AuditWarning>,
}

/// The stored records of an accepted batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    /// The records as stored, in submission order.
    pub records: Vec<MonthlyAttendance>,
    /// Non-fatal discrepancies in the batch.
    pub warnings: Vec<AuditWarning>,
}

impl Tables {
    fn start_day(&self, employee: &Employee) -> Option<u32> {
        self.billing_rules
            .get(&employee.billing_rule_id)
            .map(|rule| rule.start_day)
    }

    fn is_submitted(&self, emp_id: &str, period: BillingPeriod) -> bool {
        self.attendance_by_period
            .contains_key(&(emp_id.to_string(), period))
    }

    fn view(&self, record: &MonthlyAttendance) -> AttendanceView {
        let employee = self.employees.get(&record.emp_id);
        AttendanceView {
            record: record.clone(),
            name: employee.map(|e| e.name.clone()),
            vendor_name: employee.map(|e| e.vendor_name.clone()),
            designation: employee.and_then(|e| e.designation.clone()),
            resigned: employee.is_some_and(Employee::has_resigned),
        }
    }
}

impl Registry {
    /// Builds the attendance entry sheet for `period`.
    ///
    /// By default only employees who can have attendance submitted are listed.
    pub fn attendance_sheet(
        &self,
        period: BillingPeriod,
        scope: &SheetScope,
    ) -> EngineResult<AttendanceSheet> {
        let period = BillingPeriod::with_min_year(period.month, period.year, self.rules.min_year)?;
        let tables = self.tables.read();

        let mut rows = Vec::new();
        let mut warnings = Vec::new();

        let in_scope = tables.employees.values().filter(|e| {
            scope
                .approver_emp_id
                .as_deref()
                .is_none_or(|approver| e.approver_emp_id == approver)
        });

        for employee in in_scope {
            let start_day = tables.start_day(employee);
            if start_day.is_none() {
                warn!(
                    emp_id = %employee.emp_id,
                    billing_rule_id = %employee.billing_rule_id,
                    "Billing rule missing; payable days default to 0"
                );
                warnings.push(AuditWarning::for_employee(
                    "MISSING_BILLING_RULE",
                    WarningSeverity::High,
                    &employee.emp_id,
                    format!(
                        "Billing rule '{}' not found; payable days set to 0",
                        employee.billing_rule_id
                    ),
                ));
            }

            let tenure = Tenure::from(employee);
            let result = calculate_payable_days(start_day, period, &tenure)?;
            let eligibility = check_eligibility(
                start_day,
                period,
                &tenure,
                tables.is_submitted(&employee.emp_id, period),
            )?;

            if !eligibility.is_eligible() && !scope.include_ineligible {
                continue;
            }

            rows.push(SheetRow {
                emp_id: employee.emp_id.clone(),
                name: employee.name.clone(),
                gender: employee.gender.clone(),
                billing_rule_id: employee.billing_rule_id.clone(),
                billing_rule_start_day: start_day,
                vendor_name: employee.vendor_name.clone(),
                location: employee.location.clone(),
                designation: employee.designation.clone(),
                approver_emp_id: employee.approver_emp_id.clone(),
                resigned: employee.has_resigned(),
                period_start: result.billing_window.map(|w| w.start),
                period_end_exclusive: result.billing_window.map(|w| w.end_exclusive),
                payable_days: result.payable_days,
                eligibility,
                audit_step: result.audit_step,
            });
        }

        Ok(AttendanceSheet {
            month: period.month,
            year: period.year,
            rows,
            warnings,
        })
    }

    /// Validates and stores a batch of attendance records.
    ///
    /// The batch is all-or-nothing: the first invalid entry rejects it and nothing is
    /// stored. `scope` restricts the batch to one approver's employees.
    pub fn submit_attendance(
        &self,
        entries: Vec<AttendanceEntry>,
        scope: Option<&str>,
        now: DateTime<Utc>,
    ) -> EngineResult<SubmissionOutcome> {
        if entries.is_empty() {
            return Err(EngineError::invalid_field(
                "attendance",
                "records",
                "at least one record is required",
            ));
        }

        let mut tables = self.tables.write();
        let mut pending = Vec::with_capacity(entries.len());
        let mut warnings = Vec::new();
        let mut seen = BTreeSet::new();

        for entry in entries {
            let period =
                BillingPeriod::with_min_year(entry.month, entry.year, self.rules.min_year)?;
            let employee = tables
                .employees
                .get(&entry.emp_id)
                .ok_or_else(|| EngineError::not_found("employee", entry.emp_id.as_str()))?;

            if let Some(approver) = scope {
                if employee.approver_emp_id != approver {
                    return Err(EngineError::Forbidden {
                        message: format!(
                            "Employee '{}' is not assigned to approver '{}'",
                            employee.emp_id, approver
                        ),
                    });
                }
            }
            if let Some(approver) = entry.approver_emp_id.as_deref() {
                if approver != employee.approver_emp_id {
                    return Err(EngineError::invalid_field(
                        "attendance",
                        "approver_emp_id",
                        format!(
                            "employee '{}' is approved by '{}', not '{}'",
                            employee.emp_id, employee.approver_emp_id, approver
                        ),
                    ));
                }
            }

            let start_day = tables.start_day(employee);
            let tenure = Tenure::from(employee);
            let already_submitted = tables.is_submitted(&employee.emp_id, period)
                || !seen.insert((employee.emp_id.clone(), period));

            match check_eligibility(start_day, period, &tenure, already_submitted)? {
                Eligibility::Eligible => {}
                Eligibility::AlreadySubmitted => {
                    return Err(EngineError::AttendanceAlreadySubmitted {
                        emp_id: employee.emp_id.clone(),
                        month: period.month,
                        year: period.year,
                    });
                }
                _ => {
                    return Err(EngineError::NotEligible {
                        emp_id: employee.emp_id.clone(),
                        month: period.month,
                        year: period.year,
                    });
                }
            }

            let payable_days = calculate_payable_days(start_day, period, &tenure)?.payable_days;
            if let Some(submitted) = entry.payable_days {
                if submitted != payable_days {
                    warnings.push(AuditWarning::for_employee(
                        "PAYABLE_DAYS_MISMATCH",
                        WarningSeverity::Medium,
                        &employee.emp_id,
                        format!(
                            "Submitted payable days {} replaced by computed {}",
                            submitted, payable_days
                        ),
                    ));
                }
            }
            if entry.leaves_taken > payable_days {
                return Err(EngineError::invalid_field(
                    "attendance",
                    "leaves_taken",
                    format!(
                        "{} leaves exceed {} payable days for employee '{}'",
                        entry.leaves_taken, payable_days, employee.emp_id
                    ),
                ));
            }

            pending.push(MonthlyAttendance {
                id: 0,
                emp_id: employee.emp_id.clone(),
                approver_emp_id: employee.approver_emp_id.clone(),
                month: period.month,
                year: period.year,
                payable_days,
                leaves_taken: entry.leaves_taken,
                loss_of_pay: calculate_loss_of_pay(
                    entry.leaves_taken,
                    self.rules.free_leaves_per_month,
                ),
                submitted_at: now,
            });
        }

        for record in &mut pending {
            tables.last_attendance_id += 1;
            record.id = tables.last_attendance_id;
            tables
                .attendance_by_period
                .insert((record.emp_id.clone(), record.period()), record.id);
            tables.attendance.insert(record.id, record.clone());
        }

        info!(
            records = pending.len(),
            warnings = warnings.len(),
            "Attendance batch stored"
        );

        Ok(SubmissionOutcome {
            records: pending,
            warnings,
        })
    }

    /// Returns stored attendance matching `filter`, ordered by period then employee.
    ///
    /// `scope` restricts results to one approver; a filter naming another approver
    /// matches nothing.
    pub fn query_attendance(
        &self,
        filter: &AttendanceFilter,
        scope: Option<&str>,
    ) -> Vec<AttendanceView> {
        let mut filter = filter.clone();
        if let Some(approver) = scope {
            if filter
                .approver_emp_id
                .as_deref()
                .is_some_and(|wanted| wanted != approver)
            {
                return Vec::new();
            }
            filter.approver_emp_id = Some(approver.to_string());
        }

        let tables = self.tables.read();
        let mut views: Vec<AttendanceView> = tables
            .attendance
            .values()
            .filter(|record| filter.matches(record, tables.employees.get(&record.emp_id)))
            .map(|record| tables.view(record))
            .collect();

        views.sort_by(|a, b| {
            (a.record.year, a.record.month, &a.record.emp_id).cmp(&(
                b.record.year,
                b.record.month,
                &b.record.emp_id,
            ))
        });
        views
    }
}
