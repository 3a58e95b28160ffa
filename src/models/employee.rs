//! Employee model and related types.
//!
//! This module defines the [`Employee`] struct: a contractor placed with a vendor, assigned
//! to an approver, and billed on the vendor's billing-cycle rule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents an employee whose attendance is administered.
///
/// On the wire the joining date is called `doj`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub emp_id: String,
    /// The employee's full name.
    pub name: String,
    /// The employee's gender as recorded by HR.
    pub gender: String,
    /// The state the employee works in.
    pub state: String,
    /// The work location (references a location).
    pub location: String,
    /// The vendor the employee is placed through.
    pub vendor_name: String,
    /// The approver who signs off the employee's attendance.
    pub approver_emp_id: String,
    /// The billing-cycle rule that defines the employee's billing periods.
    pub billing_rule_id: String,
    /// The employee's designation with the vendor, if any.
    #[serde(default)]
    pub designation: Option<String>,
    /// The employee's date of birth.
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    /// The date the employee joined.
    #[serde(rename = "doj")]
    pub joining_date: NaiveDate,
    /// The date the employee resigned; the day itself is still payable.
    #[serde(default)]
    pub resignation_date: Option<NaiveDate>,
    /// Whether the employee is flagged as resigned.
    #[serde(default)]
    pub resigned: bool,
}

impl Employee {
    /// Validates the fields that do not depend on other records.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::Employee;
    /// use chrono::NaiveDate;
    ///
    /// let mut employee = Employee {
    ///     emp_id: "E001".to_string(),
    ///     name: "Jane Doe".to_string(),
    ///     gender: "F".to_string(),
    ///     state: "NY".to_string(),
    ///     location: "NYC".to_string(),
    ///     vendor_name: "Acme Corp".to_string(),
    ///     approver_emp_id: "A001".to_string(),
    ///     billing_rule_id: "BR1".to_string(),
    ///     designation: None,
    ///     dob: None,
    ///     joining_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
    ///     resignation_date: None,
    ///     resigned: false,
    /// };
    /// assert!(employee.validate().is_ok());
    ///
    /// employee.resignation_date = NaiveDate::from_ymd_opt(2025, 12, 31);
    /// assert!(employee.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        for (field, value) in [
            ("emp_id", &self.emp_id),
            ("name", &self.name),
            ("gender", &self.gender),
            ("state", &self.state),
        ] {
            if value.trim().is_empty() {
                return Err(EngineError::invalid_field(
                    "employee",
                    field,
                    "must not be empty",
                ));
            }
        }

        if let Some(dob) = self.dob {
            if dob >= self.joining_date {
                return Err(EngineError::invalid_field(
                    "employee",
                    "dob",
                    format!("{} is not before the joining date {}", dob, self.joining_date),
                ));
            }
        }

        if let Some(resignation_date) = self.resignation_date {
            if resignation_date < self.joining_date {
                return Err(EngineError::invalid_field(
                    "employee",
                    "resignation_date",
                    format!(
                        "{} is before the joining date {}",
                        resignation_date, self.joining_date
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Returns true if the employee has a resignation on record or is flagged as resigned.
    pub fn has_resigned(&self) -> bool {
        self.resigned || self.resignation_date.is_some()
    }
}
