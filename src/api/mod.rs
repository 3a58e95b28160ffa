//! HTTP API module for the Attendance Engine.
//!
//! This module provides the REST endpoints for master data, login sessions and the
//! monthly attendance workflow.

mod auth;
mod handlers;
mod request;
mod response;
mod state;

pub use auth::{AdminSession, AuthSession};
pub use handlers::create_router;
pub use request::{
    BillingRuleUpdate, DesignationQuery, EmployeeUpdate, LocationUpdate, LoginResponse,
    SheetQuery, SubmissionRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
