//! Response types for the Attendance Engine API.
//!
//! This module defines the error response structures and the mapping from
//! [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::InvalidBillingPeriod { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_BILLING_PERIOD", message),
            ),
            EngineError::InvalidField { entity, field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "VALIDATION_ERROR",
                    message,
                    format!("The {} field '{}' is invalid", entity, field),
                ),
            ),
            EngineError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message))
            }
            EngineError::Duplicate { .. } => {
                (StatusCode::CONFLICT, ApiError::new("DUPLICATE", message))
            }
            EngineError::InUse { .. } => (StatusCode::CONFLICT, ApiError::new("IN_USE", message)),
            EngineError::AttendanceAlreadySubmitted { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("ATTENDANCE_ALREADY_SUBMITTED", message),
            ),
            EngineError::NotEligible { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "NOT_ELIGIBLE",
                    message,
                    "The billing period does not overlap the employee's tenure",
                ),
            ),
            EngineError::PasswordHash { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", "Password could not be processed"),
            ),
            EngineError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ApiError::new("INVALID_CREDENTIALS", message),
            ),
            EngineError::Unauthorized { .. } => {
                (StatusCode::UNAUTHORIZED, ApiError::new("UNAUTHORIZED", message))
            }
            EngineError::SessionExpired => (
                StatusCode::UNAUTHORIZED,
                ApiError::new("SESSION_EXPIRED", message),
            ),
            EngineError::Forbidden { .. } => {
                (StatusCode::FORBIDDEN, ApiError::new("FORBIDDEN", message))
            }
        };
        ApiErrorResponse { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let api_error: ApiErrorResponse = EngineError::not_found("vendor", "Initech").into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "NOT_FOUND");
        assert!(api_error.error.message.contains("Initech"));
    }

    #[test]
    fn test_conflicts_map_to_409() {
        let duplicate: ApiErrorResponse = EngineError::Duplicate {
            entity: "vendor",
            key: "Acme Corp".to_string(),
        }
        .into();
        let submitted: ApiErrorResponse = EngineError::AttendanceAlreadySubmitted {
            emp_id: "E001".to_string(),
            month: 2,
            year: 2026,
        }
        .into();

        assert_eq!(duplicate.status, StatusCode::CONFLICT);
        assert_eq!(submitted.status, StatusCode::CONFLICT);
        assert_eq!(submitted.error.code, "ATTENDANCE_ALREADY_SUBMITTED");
    }

    #[test]
    fn test_auth_errors_map_to_401_and_403() {
        let expired: ApiErrorResponse = EngineError::SessionExpired.into();
        assert_eq!(expired.status, StatusCode::UNAUTHORIZED);
        assert_eq!(expired.error.message, "Token expired!");

        let forbidden: ApiErrorResponse = EngineError::Forbidden {
            message: "Admin privileges required!".to_string(),
        }
        .into();
        assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_invalid_field_is_a_validation_error() {
        let api_error: ApiErrorResponse =
            EngineError::invalid_field("employee", "location", "unknown location 'LA'").into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_password_hash_error_hides_details() {
        let api_error: ApiErrorResponse = EngineError::PasswordHash {
            message: "salt too short".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "INTERNAL_ERROR");
        assert!(!api_error.error.message.contains("salt"));
    }
}
