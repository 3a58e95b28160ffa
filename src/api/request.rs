//! Request and response bodies for the Attendance Engine API.
//!
//! Most master-data entities are accepted as-is; the types here cover path-keyed
//! updates, where the key is taken from the URL rather than the body, and query strings.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Employee;
use crate::session::Session;
use crate::store::AttendanceEntry;

/// Response body for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub token: Uuid,
    /// Whether the session may manage master data.
    pub is_admin: bool,
    /// The approver the session acts for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approver_emp_id: Option<String>,
    /// When the token stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl From<Session> for LoginResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            is_admin: session.is_admin,
            approver_emp_id: session.approver_emp_id,
            expires_at: session.expires_at,
        }
    }
}

/// Body of `PUT /api/locations/:location`.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationUpdate {
    /// The new state.
    pub state: String,
}

/// Body of `PUT /api/billing-cycle-rules/:rule_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingRuleUpdate {
    /// The new start day (1-31).
    pub start_day: u32,
    /// The vendor the rule belongs to.
    pub vendor_name: String,
}

/// Query of `GET /api/designations`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DesignationQuery {
    /// Only list designations of this vendor.
    pub vendor_name: Option<String>,
}

/// Body of `PUT /api/employees/:emp_id`: an employee without its ID.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeUpdate {
    /// The employee's full name.
    pub name: String,
    /// The employee's gender.
    pub gender: String,
    /// The state the employee works in.
    pub state: String,
    /// The work location.
    pub location: String,
    /// The vendor the employee is placed through.
    pub vendor_name: String,
    /// The employee's approver.
    pub approver_emp_id: String,
    /// The employee's billing-cycle rule.
    pub billing_rule_id: String,
    /// The employee's designation.
    #[serde(default)]
    pub designation: Option<String>,
    /// Date of birth.
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    /// Joining date.
    pub doj: NaiveDate,
    /// Resignation date.
    #[serde(default)]
    pub resignation_date: Option<NaiveDate>,
    /// Resigned flag.
    #[serde(default)]
    pub resigned: bool,
}

impl EmployeeUpdate {
    /// Builds the full employee record for `emp_id`.
    pub fn into_employee(self, emp_id: &str) -> Employee {
        Employee {
            emp_id: emp_id.to_string(),
            name: self.name,
            gender: self.gender,
            state: self.state,
            location: self.location,
            vendor_name: self.vendor_name,
            approver_emp_id: self.approver_emp_id,
            billing_rule_id: self.billing_rule_id,
            designation: self.designation,
            dob: self.dob,
            joining_date: self.doj,
            resignation_date: self.resignation_date,
            resigned: self.resigned,
        }
    }
}

/// Query of `GET /api/attendance-sheet`.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetQuery {
    /// The billing month (1-12).
    pub month: u32,
    /// The billing year.
    pub year: i32,
    /// Also list employees who cannot have attendance submitted.
    #[serde(default)]
    pub all: bool,
}

/// Body of `POST /api/monthly-attendance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRequest {
    /// The records to store.
    pub records: Vec<AttendanceEntry>,
}
