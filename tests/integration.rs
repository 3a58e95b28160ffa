//! Integration tests for the Attendance Engine HTTP API.
//!
//! This test suite drives the router end to end against the default seed data:
//! - Login, logout and token handling
//! - Master-data CRUD and referential integrity
//! - Vendor options
//! - Attendance sheet payable days and eligibility
//! - Attendance submission and duplicate protection
//! - Attendance queries and approver scoping

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    create_router(AppState::new(config).expect("Failed to seed registry"))
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

async fn login(router: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        router,
        "POST",
        "/api/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

fn record(emp_id: &str, month: u32, year: i32, leaves_taken: u32) -> Value {
    json!({
        "emp_id": emp_id,
        "month": month,
        "year": year,
        "leaves_taken": leaves_taken
    })
}

fn new_employee(emp_id: &str, doj: &str) -> Value {
    json!({
        "emp_id": emp_id,
        "name": "Heidi",
        "gender": "Female",
        "state": "NY",
        "location": "NYC",
        "vendor_name": "Acme Corp",
        "approver_emp_id": "A001",
        "billing_rule_id": "BR1",
        "designation": "Engineer",
        "doj": doj
    })
}

// =============================================================================
// Sessions
// =============================================================================

#[tokio::test]
async fn test_login_alias_and_approver_session() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "A001", "password": "pass" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_admin"], false);
    assert_eq!(body["approver_emp_id"], "A001");
    assert!(body["expires_at"].is_string());
}

#[tokio::test]
async fn test_unknown_user_is_rejected() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        "POST",
        "/api/login",
        None,
        Some(json!({ "username": "nobody", "password": "pass" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_logout_invalidates_token() {
    let router = create_router_for_test();
    let token = login(&router, "admin", "admin").await;

    let (status, _) = send(&router, "POST", "/api/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&router, "GET", "/api/vendors", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token is invalid!");
}

#[tokio::test]
async fn test_garbage_token_is_invalid() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "GET", "/api/vendors", Some("not-a-token"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_approver_cannot_manage_master_data() {
    let router = create_router_for_test();
    let token = login(&router, "A001", "pass").await;

    let (status, body) = send(
        &router,
        "POST",
        "/api/vendors",
        Some(&token),
        Some(json!({ "vendor_name": "Initech" })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Admin privileges required!");
}

// =============================================================================
// Master data
// =============================================================================

#[tokio::test]
async fn test_vendor_lifecycle() {
    let router = create_router_for_test();
    let token = login(&router, "admin", "admin").await;

    let (status, body) = send(
        &router,
        "POST",
        "/api/vendors",
        Some(&token),
        Some(json!({ "vendor_name": "Initech" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["vendor_name"], "Initech");

    let (status, body) = send(
        &router,
        "POST",
        "/api/vendors",
        Some(&token),
        Some(json!({ "vendor_name": "Initech" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE");

    let (_, body) = send(&router, "GET", "/api/vendors", Some(&token), None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, _) = send(&router, "DELETE", "/api/vendors/Initech", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_referenced_vendor_cannot_be_deleted() {
    let router = create_router_for_test();
    let token = login(&router, "admin", "admin").await;

    let (status, body) = send(
        &router,
        "DELETE",
        "/api/vendors/Acme%20Corp",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "IN_USE");
}

#[tokio::test]
async fn test_vendor_options_lists_rules_and_designations() {
    let router = create_router_for_test();
    let token = login(&router, "admin", "admin").await;

    let (status, body) = send(
        &router,
        "GET",
        "/api/vendors/Acme%20Corp/options",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["billing_rules"].as_array().unwrap().len(), 1);
    assert_eq!(body["billing_rules"][0]["rule_id"], "BR1");
    let titles: Vec<&str> = body["designations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["designation"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Engineer", "Manager"]);
}

#[tokio::test]
async fn test_location_update_and_unknown_location() {
    let router = create_router_for_test();
    let token = login(&router, "admin", "admin").await;

    let (status, body) = send(
        &router,
        "PUT",
        "/api/locations/LA",
        Some(&token),
        Some(json!({ "state": "CA-South" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "CA-South");

    let (status, body) = send(
        &router,
        "PUT",
        "/api/locations/Boston",
        Some(&token),
        Some(json!({ "state": "MA" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_approver_password_is_never_returned() {
    let router = create_router_for_test();
    let token = login(&router, "admin", "admin").await;

    let (status, body) = send(
        &router,
        "POST",
        "/api/approvers",
        Some(&token),
        Some(json!({
            "emp_id": "A003",
            "name": "Carol",
            "email": "carol@acme.com",
            "password": "secret"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    // The new approver can log in
    login(&router, "A003", "secret").await;
}

#[tokio::test]
async fn test_billing_rule_start_day_is_validated() {
    let router = create_router_for_test();
    let token = login(&router, "admin", "admin").await;

    let (status, body) = send(
        &router,
        "POST",
        "/api/billing-cycle-rules",
        Some(&token),
        Some(json!({ "rule_id": "BR3", "start_day": 32, "vendor_name": "Acme Corp" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_designations_filter_by_vendor() {
    let router = create_router_for_test();
    let token = login(&router, "admin", "admin").await;

    let (status, body) = send(
        &router,
        "GET",
        "/api/designations?vendor_name=Globex%20Inc",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let designations = body.as_array().unwrap();
    assert_eq!(designations.len(), 1);
    assert_eq!(designations[0]["designation"], "Analyst");
}

#[tokio::test]
async fn test_employee_create_update_delete() {
    let router = create_router_for_test();
    let token = login(&router, "admin", "admin").await;

    let (status, body) = send(
        &router,
        "POST",
        "/api/employees",
        Some(&token),
        Some(new_employee("E010", "2026-02-20")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["doj"], "2026-02-20");

    let mut update = new_employee("ignored", "2026-02-20");
    update.as_object_mut().unwrap().remove("emp_id");
    update["resignation_date"] = json!("2026-03-31");
    let (status, body) = send(
        &router,
        "PUT",
        "/api/employees/E010",
        Some(&token),
        Some(update),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["emp_id"], "E010");
    assert_eq!(body["resigned"], true);

    let (status, _) = send(&router, "DELETE", "/api/employees/E010", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&router, "GET", "/api/employees/E010", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_employee_with_unknown_reference_is_rejected() {
    let router = create_router_for_test();
    let token = login(&router, "admin", "admin").await;

    let mut employee = new_employee("E011", "2026-01-01");
    employee["approver_emp_id"] = json!("A999");
    let (status, body) = send(&router, "POST", "/api/employees", Some(&token), Some(employee)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("A999"));
}

#[tokio::test]
async fn test_employee_missing_joining_date_is_validation_error() {
    let router = create_router_for_test();
    let token = login(&router, "admin", "admin").await;

    let mut employee = new_employee("E012", "2026-01-01");
    employee.as_object_mut().unwrap().remove("doj");
    let (status, body) = send(&router, "POST", "/api/employees", Some(&token), Some(employee)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Attendance sheet
// =============================================================================

#[tokio::test]
async fn test_sheet_for_admin_covers_all_eligible_employees() {
    let router = create_router_for_test();
    let token = login(&router, "admin", "admin").await;

    let (status, body) = send(
        &router,
        "GET",
        "/api/attendance-sheet?month=2&year=2026",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = body["rows"].as_array().unwrap();
    let summary: Vec<(&str, u64)> = rows
        .iter()
        .map(|r| (r["emp_id"].as_str().unwrap(), r["payable_days"].as_u64().unwrap()))
        .collect();
    assert_eq!(summary, vec![("E001", 28), ("E002", 28), ("E003", 10)]);
    assert_eq!(rows[1]["period_start"], "2026-02-15");
    assert_eq!(rows[1]["period_end_exclusive"], "2026-03-15");
    assert_eq!(rows[0]["eligibility"], "eligible");
}

#[tokio::test]
async fn test_sheet_for_mid_period_joiner() {
    let router = create_router_for_test();
    let admin = login(&router, "admin", "admin").await;
    send(
        &router,
        "POST",
        "/api/employees",
        Some(&admin),
        Some(new_employee("E010", "2026-02-20")),
    )
    .await;

    let approver = login(&router, "A001", "pass").await;
    let (_, body) = send(
        &router,
        "GET",
        "/api/attendance-sheet?month=2&year=2026",
        Some(&approver),
        None,
    )
    .await;

    let row = body["rows"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["emp_id"] == "E010")
        .unwrap();
    // Feb 20 to Mar 1 exclusive
    assert_eq!(row["payable_days"], 9);
}

#[tokio::test]
async fn test_sheet_for_approver_is_scoped() {
    let router = create_router_for_test();
    let token = login(&router, "A002", "pass").await;

    let (status, body) = send(
        &router,
        "GET",
        "/api/attendance-sheet?month=2&year=2026",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["emp_id"], "E002");
}

#[tokio::test]
async fn test_sheet_all_includes_ineligible_rows() {
    let router = create_router_for_test();
    let token = login(&router, "admin", "admin").await;

    let (_, body) = send(
        &router,
        "GET",
        "/api/attendance-sheet?month=6&year=2026&all=true",
        Some(&token),
        None,
    )
    .await;

    let e003 = body["rows"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["emp_id"] == "E003")
        .unwrap();
    assert_eq!(e003["eligibility"], "after_resignation");
    assert_eq!(e003["payable_days"], 0);
}

#[tokio::test]
async fn test_sheet_rejects_invalid_month() {
    let router = create_router_for_test();
    let token = login(&router, "admin", "admin").await;

    let (status, body) = send(
        &router,
        "GET",
        "/api/attendance-sheet?month=13&year=2026",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &router,
        "GET",
        "/api/attendance-sheet?year=2026",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sheet_honours_configured_min_year() {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let mut service = config.service().clone();
    service.attendance.min_year = 1990;
    let config = ConfigLoader::from_parts(service, config.seed().clone()).unwrap();
    let router = create_router(AppState::new(config).expect("Failed to seed registry"));
    let token = login(&router, "admin", "admin").await;

    let (status, body) = send(
        &router,
        "GET",
        "/api/attendance-sheet?month=1&year=1995",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "sheet failed: {}", body);
    assert_eq!(body["year"], 1995);
    assert_eq!(body["rows"].as_array().unwrap().len(), 0);

    let (status, _) = send(
        &router,
        "GET",
        "/api/attendance-sheet?month=1&year=1989",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Attendance submission and queries
// =============================================================================

#[tokio::test]
async fn test_submission_stores_server_computed_values() {
    let router = create_router_for_test();
    let token = login(&router, "A001", "pass").await;

    let mut claimed = record("E001", 2, 2026, 4);
    claimed["payable_days"] = json!(31);
    let (status, body) = send(
        &router,
        "POST",
        "/api/monthly-attendance",
        Some(&token),
        Some(json!({ "records": [claimed, record("E003", 2, 2026, 0)] })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let records = body["records"].as_array().unwrap();
    assert_eq!(records[0]["payable_days"], 28);
    assert_eq!(records[0]["loss_of_pay"], 2);
    assert_eq!(records[1]["payable_days"], 10);
    assert_eq!(body["warnings"][0]["code"], "PAYABLE_DAYS_MISMATCH");
}

#[tokio::test]
async fn test_duplicate_submission_conflicts() {
    let router = create_router_for_test();
    let token = login(&router, "A002", "pass").await;
    let batch = json!({ "records": [record("E002", 2, 2026, 0)] });

    let (status, _) = send(
        &router,
        "POST",
        "/api/monthly-attendance",
        Some(&token),
        Some(batch.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &router,
        "POST",
        "/api/monthly-attendance",
        Some(&token),
        Some(batch),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ATTENDANCE_ALREADY_SUBMITTED");

    // The employee is no longer offered on the sheet
    let (_, body) = send(
        &router,
        "GET",
        "/api/attendance-sheet?month=2&year=2026",
        Some(&token),
        None,
    )
    .await;
    assert!(body["rows"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_approver_cannot_submit_for_other_approvers_employee() {
    let router = create_router_for_test();
    let token = login(&router, "A001", "pass").await;

    let (status, body) = send(
        &router,
        "POST",
        "/api/monthly-attendance",
        Some(&token),
        Some(json!({ "records": [record("E002", 2, 2026, 0)] })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_submission_before_joining_is_not_eligible() {
    let router = create_router_for_test();
    let token = login(&router, "admin", "admin").await;

    let (status, body) = send(
        &router,
        "POST",
        "/api/monthly-attendance",
        Some(&token),
        Some(json!({ "records": [record("E001", 11, 2022, 0)] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NOT_ELIGIBLE");
}

#[tokio::test]
async fn test_query_filters_by_period_and_scope() {
    let router = create_router_for_test();
    let admin = login(&router, "admin", "admin").await;
    let (status, _) = send(
        &router,
        "POST",
        "/api/monthly-attendance",
        Some(&admin),
        Some(json!({
            "records": [
                record("E001", 1, 2026, 3),
                record("E001", 2, 2026, 0),
                record("E002", 2, 2026, 1)
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(
        &router,
        "GET",
        "/api/monthly-attendance?month=2&year=2026",
        Some(&admin),
        None,
    )
    .await;
    let emp_ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["emp_id"].as_str().unwrap())
        .collect();
    assert_eq!(emp_ids, vec!["E001", "E002"]);

    let (_, body) = send(
        &router,
        "GET",
        "/api/monthly-attendance?vendor_name=Acme%20Corp&month=1",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["loss_of_pay"], 1);
    assert_eq!(body[0]["name"], "Eve");

    let approver = login(&router, "A002", "pass").await;
    let (_, body) = send(
        &router,
        "GET",
        "/api/monthly-attendance",
        Some(&approver),
        None,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["emp_id"], "E002");
}

#[tokio::test]
async fn test_employee_with_attendance_cannot_be_deleted() {
    let router = create_router_for_test();
    let token = login(&router, "admin", "admin").await;
    send(
        &router,
        "POST",
        "/api/monthly-attendance",
        Some(&token),
        Some(json!({ "records": [record("E001", 2, 2026, 0)] })),
    )
    .await;

    let (status, body) = send(&router, "DELETE", "/api/employees/E001", Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "IN_USE");
}
