//! HTTP request handlers for the Attendance Engine API.
//!
//! This module contains the router and the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    Approver, AttendanceFilter, BillingCycleRule, BillingPeriod, Employee, Location, Vendor,
};
use crate::session::Credentials;
use crate::store::{ApproverUpdate, NewApprover, NewDesignation, SheetScope};

use super::auth::{AdminSession, AuthSession};
use super::request::{
    BillingRuleUpdate, DesignationQuery, EmployeeUpdate, LocationUpdate, LoginResponse,
    SheetQuery, SubmissionRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/login", post(login_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/logout", post(logout_handler))
        .route("/api/vendors", get(list_vendors).post(create_vendor))
        .route("/api/vendors/:vendor_name", delete(delete_vendor))
        .route("/api/vendors/:vendor_name/options", get(vendor_options))
        .route("/api/locations", get(list_locations).post(create_location))
        .route(
            "/api/locations/:location",
            put(update_location).delete(delete_location),
        )
        .route("/api/approvers", get(list_approvers).post(create_approver))
        .route(
            "/api/approvers/:emp_id",
            put(update_approver).delete(delete_approver),
        )
        .route(
            "/api/billing-cycle-rules",
            get(list_billing_rules).post(create_billing_rule),
        )
        .route(
            "/api/billing-cycle-rules/:rule_id",
            put(update_billing_rule).delete(delete_billing_rule),
        )
        .route(
            "/api/designations",
            get(list_designations).post(create_designation),
        )
        .route(
            "/api/designations/:designation_id",
            put(update_designation).delete(delete_designation),
        )
        .route("/api/employees", get(list_employees).post(create_employee))
        .route(
            "/api/employees/:emp_id",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
        .route("/api/attendance-sheet", get(attendance_sheet))
        .route(
            "/api/monthly-attendance",
            get(query_attendance).post(submit_attendance),
        )
        .with_state(state)
}

/// Unwraps a JSON body, mapping rejections to the API error format.
fn parse_json<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

/// Unwraps a query string, mapping rejections to validation errors.
fn parse_query<T>(
    correlation_id: Uuid,
    query: Result<Query<T>, QueryRejection>,
) -> Result<T, ApiErrorResponse> {
    query.map(|Query(q)| q).map_err(|rejection| {
        let body_text = rejection.body_text();
        warn!(
            correlation_id = %correlation_id,
            error = %body_text,
            "Query string rejected"
        );
        ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
    })
}

/// Logs the outcome of an operation and converts it into a response.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    operation: &'static str,
    status: StatusCode,
    result: EngineResult<T>,
) -> Response {
    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                operation,
                status = status.as_u16(),
                "Request completed"
            );
            (status, Json(body)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %err,
                "Request failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Like [`respond`] for operations without a body on success.
fn respond_empty(correlation_id: Uuid, operation: &'static str, result: EngineResult<()>) -> Response {
    match result {
        Ok(()) => {
            info!(correlation_id = %correlation_id, operation, "Request completed");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %err,
                "Request failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

// =============================================================================
// Sessions
// =============================================================================

/// Handler for POST /api/login and /api/auth/login.
async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing login request");

    let credentials = parse_json(correlation_id, payload)?;
    let result = state
        .sessions()
        .login(&credentials, state.registry(), Utc::now())
        .map(LoginResponse::from);
    Ok(respond(correlation_id, "login", StatusCode::OK, result))
}

/// Handler for POST /api/logout.
async fn logout_handler(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> StatusCode {
    state.sessions().logout(session.token);
    StatusCode::NO_CONTENT
}

// =============================================================================
// Vendors
// =============================================================================

async fn list_vendors(State(state): State<AppState>, _admin: AdminSession) -> Json<Vec<Vendor>> {
    Json(state.registry().vendors())
}

async fn create_vendor(
    State(state): State<AppState>,
    _admin: AdminSession,
    payload: Result<Json<Vendor>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let vendor = parse_json(correlation_id, payload)?;
    let result = state.registry().create_vendor(vendor);
    Ok(respond(correlation_id, "create_vendor", StatusCode::CREATED, result))
}

async fn delete_vendor(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(vendor_name): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = state.registry().delete_vendor(&vendor_name);
    respond_empty(correlation_id, "delete_vendor", result)
}

/// Handler for GET /api/vendors/:vendor_name/options.
///
/// Returns the billing rules and designations an employee of the vendor can be given.
async fn vendor_options(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(vendor_name): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = state.registry().vendor_options(&vendor_name);
    respond(correlation_id, "vendor_options", StatusCode::OK, result)
}

// =============================================================================
// Locations
// =============================================================================

async fn list_locations(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Json<Vec<Location>> {
    Json(state.registry().locations())
}

async fn create_location(
    State(state): State<AppState>,
    _admin: AdminSession,
    payload: Result<Json<Location>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let location = parse_json(correlation_id, payload)?;
    let result = state.registry().create_location(location);
    Ok(respond(correlation_id, "create_location", StatusCode::CREATED, result))
}

async fn update_location(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(location): Path<String>,
    payload: Result<Json<LocationUpdate>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let update = parse_json(correlation_id, payload)?;
    let result = state.registry().update_location(&location, update.state);
    Ok(respond(correlation_id, "update_location", StatusCode::OK, result))
}

async fn delete_location(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(location): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = state.registry().delete_location(&location);
    respond_empty(correlation_id, "delete_location", result)
}

// =============================================================================
// Approvers
// =============================================================================

async fn list_approvers(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Json<Vec<Approver>> {
    Json(state.registry().approvers())
}

async fn create_approver(
    State(state): State<AppState>,
    _admin: AdminSession,
    payload: Result<Json<NewApprover>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let approver = parse_json(correlation_id, payload)?;
    let result = state.registry().create_approver(approver);
    Ok(respond(correlation_id, "create_approver", StatusCode::CREATED, result))
}

async fn update_approver(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(emp_id): Path<String>,
    payload: Result<Json<ApproverUpdate>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let update = parse_json(correlation_id, payload)?;
    let result = state.registry().update_approver(&emp_id, update);
    Ok(respond(correlation_id, "update_approver", StatusCode::OK, result))
}

async fn delete_approver(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(emp_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = state.registry().delete_approver(&emp_id);
    respond_empty(correlation_id, "delete_approver", result)
}

// =============================================================================
// Billing-cycle rules
// =============================================================================

async fn list_billing_rules(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Json<Vec<BillingCycleRule>> {
    Json(state.registry().billing_rules())
}

async fn create_billing_rule(
    State(state): State<AppState>,
    _admin: AdminSession,
    payload: Result<Json<BillingCycleRule>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let rule = parse_json(correlation_id, payload)?;
    let result = state.registry().create_billing_rule(rule);
    Ok(respond(correlation_id, "create_billing_rule", StatusCode::CREATED, result))
}

async fn update_billing_rule(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(rule_id): Path<String>,
    payload: Result<Json<BillingRuleUpdate>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let update = parse_json(correlation_id, payload)?;
    let result = state
        .registry()
        .update_billing_rule(&rule_id, update.start_day, update.vendor_name);
    Ok(respond(correlation_id, "update_billing_rule", StatusCode::OK, result))
}

async fn delete_billing_rule(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(rule_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = state.registry().delete_billing_rule(&rule_id);
    respond_empty(correlation_id, "delete_billing_rule", result)
}

// =============================================================================
// Designations
// =============================================================================

async fn list_designations(
    State(state): State<AppState>,
    _admin: AdminSession,
    query: Result<Query<DesignationQuery>, QueryRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let query = parse_query(correlation_id, query)?;
    let designations = state.registry().designations(query.vendor_name.as_deref());
    Ok(Json(designations).into_response())
}

async fn create_designation(
    State(state): State<AppState>,
    _admin: AdminSession,
    payload: Result<Json<NewDesignation>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let designation = parse_json(correlation_id, payload)?;
    let result = state.registry().create_designation(designation);
    Ok(respond(correlation_id, "create_designation", StatusCode::CREATED, result))
}

async fn update_designation(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(designation_id): Path<u64>,
    payload: Result<Json<NewDesignation>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let designation = parse_json(correlation_id, payload)?;
    let result = state
        .registry()
        .update_designation(designation_id, designation);
    Ok(respond(correlation_id, "update_designation", StatusCode::OK, result))
}

async fn delete_designation(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(designation_id): Path<u64>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = state.registry().delete_designation(designation_id);
    respond_empty(correlation_id, "delete_designation", result)
}

// =============================================================================
// Employees
// =============================================================================

async fn list_employees(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Json<Vec<Employee>> {
    Json(state.registry().employees())
}

async fn get_employee(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(emp_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = state.registry().employee(&emp_id);
    respond(correlation_id, "get_employee", StatusCode::OK, result)
}

async fn create_employee(
    State(state): State<AppState>,
    _admin: AdminSession,
    payload: Result<Json<Employee>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let employee = parse_json(correlation_id, payload)?;
    let result = state.registry().create_employee(employee);
    Ok(respond(correlation_id, "create_employee", StatusCode::CREATED, result))
}

async fn update_employee(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(emp_id): Path<String>,
    payload: Result<Json<EmployeeUpdate>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let update = parse_json(correlation_id, payload)?;
    let result = state
        .registry()
        .update_employee(&emp_id, update.into_employee(&emp_id));
    Ok(respond(correlation_id, "update_employee", StatusCode::OK, result))
}

async fn delete_employee(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(emp_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = state.registry().delete_employee(&emp_id);
    respond_empty(correlation_id, "delete_employee", result)
}

// =============================================================================
// Attendance
// =============================================================================

/// Handler for GET /api/attendance-sheet.
///
/// Approvers only see their own employees; the administrator sees everyone.
async fn attendance_sheet(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    query: Result<Query<SheetQuery>, QueryRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let query = parse_query(correlation_id, query)?;
    info!(
        correlation_id = %correlation_id,
        username = %session.username,
        month = query.month,
        year = query.year,
        "Building attendance sheet"
    );

    let start_time = Instant::now();
    let scope = SheetScope {
        approver_emp_id: session.approver_scope().map(str::to_string),
        include_ineligible: query.all,
    };
    let min_year = state.registry().rules().min_year;
    let result = BillingPeriod::with_min_year(query.month, query.year, min_year)
        .and_then(|period| state.registry().attendance_sheet(period, &scope));
    if let Ok(sheet) = &result {
        info!(
            correlation_id = %correlation_id,
            rows = sheet.rows.len(),
            warnings = sheet.warnings.len(),
            duration_us = start_time.elapsed().as_micros(),
            "Attendance sheet built"
        );
    }
    Ok(respond(correlation_id, "attendance_sheet", StatusCode::OK, result))
}

/// Handler for POST /api/monthly-attendance.
async fn submit_attendance(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    payload: Result<Json<SubmissionRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        username = %session.username,
        "Processing attendance submission"
    );

    let request = parse_json(correlation_id, payload)?;
    let result = state.registry().submit_attendance(
        request.records,
        session.approver_scope(),
        Utc::now(),
    );
    if let Ok(outcome) = &result {
        for warning in &outcome.warnings {
            warn!(
                correlation_id = %correlation_id,
                code = %warning.code,
                message = %warning.message,
                "Submission warning"
            );
        }
    }
    Ok(respond(correlation_id, "submit_attendance", StatusCode::CREATED, result))
}

/// Handler for GET /api/monthly-attendance.
async fn query_attendance(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    query: Result<Query<AttendanceFilter>, QueryRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let filter = parse_query(correlation_id, query)?;
    let records = state
        .registry()
        .query_attendance(&filter, session.approver_scope());
    info!(
        correlation_id = %correlation_id,
        username = %session.username,
        results = records.len(),
        "Attendance query completed"
    );
    Ok(Json(records).into_response())
}
