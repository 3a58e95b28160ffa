//! Approver model.
//!
//! Approvers sign off the monthly attendance of the employees assigned to them and can
//! log in with their employee ID. Their password is only ever held as an Argon2 hash and is
//! never serialized.

use serde::Serialize;

use crate::error::{EngineError, EngineResult};

/// An approver of monthly attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Approver {
    /// The approver's employee ID, also used as login name.
    pub emp_id: String,
    /// The approver's name.
    pub name: String,
    /// The approver's email address.
    pub email: String,
    /// Argon2 PHC string of the approver's password.
    #[serde(skip)]
    pub password_hash: String,
    /// The approver's manager's employee ID.
    pub manager_emp_id: Option<String>,
    /// The approver's manager's name.
    pub manager_name: Option<String>,
    /// The approver's manager's email address.
    pub manager_email: Option<String>,
}

impl Approver {
    /// Validates the required approver fields.
    pub fn validate(&self) -> EngineResult<()> {
        for (field, value) in [
            ("emp_id", &self.emp_id),
            ("name", &self.name),
            ("email", &self.email),
            ("password", &self.password_hash),
        ] {
            if value.trim().is_empty() {
                return Err(EngineError::invalid_field(
                    "approver",
                    field,
                    "emp_id, name, email, and password are required",
                ));
            }
        }

        if !self.email.contains('@') {
            return Err(EngineError::invalid_field(
                "approver",
                "email",
                format!("'{}' is not an email address", self.email),
            ));
        }

        Ok(())
    }
}
