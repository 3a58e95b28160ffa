//! Error types for the Attendance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while managing master data,
//! sessions and attendance.

use thiserror::Error;

/// The main error type for the Attendance Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/service.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/service.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds a value the engine cannot use.
    #[error("Invalid configuration value '{key}': {message}")]
    InvalidConfig {
        /// The dotted configuration key.
        key: String,
        /// What is wrong with the value.
        message: String,
    },

    /// A billing period could not be resolved to calendar dates.
    #[error("Invalid billing period: {message}")]
    InvalidBillingPeriod {
        /// A description of the problem.
        message: String,
    },

    /// A field of an entity failed validation.
    #[error("Invalid {entity} field '{field}': {message}")]
    InvalidField {
        /// The entity kind (e.g. "employee").
        entity: &'static str,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An entity addressed by key does not exist.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// The entity kind.
        entity: &'static str,
        /// The key that was looked up.
        key: String,
    },

    /// An entity with the same key already exists.
    #[error("{entity} already exists: {key}")]
    Duplicate {
        /// The entity kind.
        entity: &'static str,
        /// The conflicting key.
        key: String,
    },

    /// An entity cannot be deleted while other records reference it.
    #[error("{entity} '{key}' is still referenced by {referenced_by}")]
    InUse {
        /// The entity kind.
        entity: &'static str,
        /// The key of the entity.
        key: String,
        /// A description of the referencing records.
        referenced_by: String,
    },

    /// Attendance for the employee and period has already been recorded.
    #[error("Attendance already submitted for employee '{emp_id}' for {month}/{year}")]
    AttendanceAlreadySubmitted {
        /// The employee ID.
        emp_id: String,
        /// The billing month.
        month: u32,
        /// The billing year.
        year: i32,
    },

    /// The employee's tenure does not overlap the billing period.
    #[error("Employee '{emp_id}' is not eligible for attendance in {month}/{year}")]
    NotEligible {
        /// The employee ID.
        emp_id: String,
        /// The billing month.
        month: u32,
        /// The billing year.
        year: i32,
    },

    /// A password could not be hashed or a stored hash is malformed.
    #[error("Password hash error: {message}")]
    PasswordHash {
        /// A description of the failure.
        message: String,
    },

    /// Login failed.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The request carried no usable session token.
    #[error("{message}")]
    Unauthorized {
        /// A description of the problem.
        message: String,
    },

    /// The session token was valid once but has expired.
    #[error("Token expired!")]
    SessionExpired,

    /// The session is valid but lacks the required privileges.
    #[error("{message}")]
    Forbidden {
        /// A description of the missing privilege.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidField`].
    pub fn invalid_field(
        entity: &'static str,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            entity,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`EngineError::NotFound`].
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/service.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/service.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_field_displays_entity_field_and_message() {
        let error = EngineError::invalid_field("billing rule", "start_day", "must be 1-31");
        assert_eq!(
            error.to_string(),
            "Invalid billing rule field 'start_day': must be 1-31"
        );
    }

    #[test]
    fn test_not_found_displays_entity_and_key() {
        let error = EngineError::not_found("vendor", "Acme Corp");
        assert_eq!(error.to_string(), "vendor not found: Acme Corp");
    }

    #[test]
    fn test_in_use_displays_referencing_records() {
        let error = EngineError::InUse {
            entity: "vendor",
            key: "Acme Corp".to_string(),
            referenced_by: "2 employee(s)".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "vendor 'Acme Corp' is still referenced by 2 employee(s)"
        );
    }

    #[test]
    fn test_attendance_already_submitted_displays_period() {
        let error = EngineError::AttendanceAlreadySubmitted {
            emp_id: "E001".to_string(),
            month: 2,
            year: 2026,
        };
        assert_eq!(
            error.to_string(),
            "Attendance already submitted for employee 'E001' for 2/2026"
        );
    }

    #[test]
    fn test_session_errors_display_client_messages() {
        assert_eq!(EngineError::SessionExpired.to_string(), "Token expired!");
        let error = EngineError::Unauthorized {
            message: "Token is missing!".to_string(),
        };
        assert_eq!(error.to_string(), "Token is missing!");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::not_found("employee", "E404"))
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
