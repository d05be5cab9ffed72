//! Integration tests for the time tracker HTTP API.
//!
//! This test suite covers:
//! - Employee creation and listing
//! - Recording time entries, including overnight shifts
//! - Duplicate rejection for employees and entries
//! - Monthly overviews and yearly reports against business-day targets
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use time_tracker::api::{AppState, create_router};
use time_tracker::config::ConfigLoader;
use time_tracker::storage::Store;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    AppState::in_memory().expect("Failed to open in-memory store")
}

async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post(state: &AppState, uri: &str, body: Value) -> (StatusCode, Value) {
    send(create_router(state.clone()), "POST", uri, Some(body)).await
}

async fn get(state: &AppState, uri: &str) -> (StatusCode, Value) {
    send(create_router(state.clone()), "GET", uri, None).await
}

fn employee_body(first: &str, last: &str, email: &str) -> Value {
    json!({
        "first_name": first,
        "last_name": last,
        "email": email,
        "birth_date": "1990-01-01",
        "hire_date": "2020-01-01"
    })
}

fn entry_body(employee_id: i64, date: &str, start: &str, end: &str, pause_minutes: u32) -> Value {
    json!({
        "employee_id": employee_id,
        "date": date,
        "start": start,
        "end": end,
        "pause_minutes": pause_minutes
    })
}

async fn create_employee(state: &AppState, first: &str, last: &str, email: &str) -> i64 {
    let (status, body) = post(state, "/employees", employee_body(first, last, email)).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", body);
    body["id"].as_i64().unwrap()
}

// =============================================================================
// SECTION 1: Employees
// =============================================================================

#[tokio::test]
async fn test_create_employee_returns_stored_record() {
    let state = create_test_state();
    let (status, body) = post(
        &state,
        "/employees",
        json!({
            "first_name": "  Max ",
            "last_name": "Mustermann",
            "email": "max@example.com",
            "birth_date": "1990-01-01",
            "hire_date": "2020-01-01",
            "gender": "male",
            "remaining_holidays": 12
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["first_name"], "Max");
    assert_eq!(body["gender"], "male");
    assert_eq!(body["remaining_holidays"], 12);
}

#[tokio::test]
async fn test_employees_listed_by_last_then_first_name() {
    let state = create_test_state();
    create_employee(&state, "Zoe", "Alpha", "zoe@example.com").await;
    create_employee(&state, "Anna", "Beta", "anna@example.com").await;
    create_employee(&state, "Adam", "Alpha", "adam@example.com").await;

    let (status, body) = get(&state, "/employees").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["first_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Adam", "Zoe", "Anna"]);
}

#[tokio::test]
async fn test_duplicate_email_returns_409() {
    let state = create_test_state();
    create_employee(&state, "Max", "Mustermann", "max@example.com").await;

    let (status, body) = post(
        &state,
        "/employees",
        employee_body("Other", "Person", "max@example.com"),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_ENTRY");
    let (_, list) = get(&state, "/employees").await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_hire_before_birth_rejected() {
    let state = create_test_state();
    let (status, body) = post(
        &state,
        "/employees",
        json!({
            "first_name": "Max",
            "last_name": "Mustermann",
            "email": "max@example.com",
            "birth_date": "2000-06-01",
            "hire_date": "1999-06-01"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_VALUE");
    assert_eq!(body["details"], "hire_date");
}

#[tokio::test]
async fn test_invalid_email_rejected() {
    let state = create_test_state();
    let (status, body) = post(&state, "/employees", employee_body("Max", "M", "not-an-email")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "email");
}

// =============================================================================
// SECTION 2: Time Entries
// =============================================================================

#[tokio::test]
async fn test_overnight_entry_wraps_midnight() {
    let state = create_test_state();
    let id = create_employee(&state, "Max", "Mustermann", "max@example.com").await;

    let (status, body) = post(&state, "/time-entries", entry_body(id, "2024-03-01", "22:00", "06:00", 30)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["net"], "07:30");
}

#[tokio::test]
async fn test_break_longer_than_shift_clamps_to_zero() {
    let state = create_test_state();
    let id = create_employee(&state, "Max", "Mustermann", "max@example.com").await;

    let (status, body) = post(&state, "/time-entries", entry_body(id, "2024-03-01", "09:00", "10:00", 120)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["net"], "00:00");
}

#[tokio::test]
async fn test_duplicate_entry_keeps_single_row() {
    let state = create_test_state();
    let id = create_employee(&state, "Max", "Mustermann", "max@example.com").await;
    let body = entry_body(id, "2024-02-01", "09:00", "17:00", 60);

    let (first, _) = post(&state, "/time-entries", body.clone()).await;
    let (second, error) = post(&state, "/time-entries", body).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(error["code"], "DUPLICATE_ENTRY");
    assert_eq!(state.store().entries_for_employee(id).unwrap().len(), 1);
}

#[tokio::test]
async fn test_same_start_on_other_day_is_not_duplicate() {
    let state = create_test_state();
    let id = create_employee(&state, "Max", "Mustermann", "max@example.com").await;

    let (first, _) = post(&state, "/time-entries", entry_body(id, "2024-02-01", "09:00", "17:00", 60)).await;
    let (second, _) = post(&state, "/time-entries", entry_body(id, "2024-02-02", "09:00", "17:00", 60)).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CREATED);
}

#[tokio::test]
async fn test_break_of_a_full_day_rejected() {
    let state = create_test_state();
    let id = create_employee(&state, "Max", "Mustermann", "max@example.com").await;

    let (status, body) = post(&state, "/time-entries", entry_body(id, "2024-02-01", "09:00", "17:00", 1440)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "pause");
}

// =============================================================================
// SECTION 3: Reports
// =============================================================================

#[tokio::test]
async fn test_february_2024_report() {
    let state = create_test_state();
    let id = create_employee(&state, "Max", "Mustermann", "max@example.com").await;
    post(&state, "/time-entries", entry_body(id, "2024-02-01", "09:00", "17:00", 60)).await;
    post(&state, "/time-entries", entry_body(id, "2024-02-02", "09:00", "17:00", 60)).await;

    let (status, months) = get(&state, &format!("/employees/{}/months", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(months[0]["worked_minutes"], 840);

    let (status, body) = get(&state, "/reports/2024").await;
    assert_eq!(status, StatusCode::OK);
    let report = &body[0];
    assert_eq!(report["name"], "Max Mustermann");
    assert_eq!(report["months"][0]["month_name"], "February");
    assert_eq!(report["months"][0]["worked"], "14:00");
    assert_eq!(report["months"][0]["target"], "168:00");
    assert_eq!(report["difference_sign"], "-");
    assert_eq!(report["difference_hours"], "154,0");
}

#[tokio::test]
async fn test_report_running_difference_across_months() {
    let state = create_test_state();
    let id = create_employee(&state, "Max", "Mustermann", "max@example.com").await;
    post(&state, "/time-entries", entry_body(id, "2024-01-15", "08:00", "16:00", 0)).await;
    post(&state, "/time-entries", entry_body(id, "2024-03-04", "08:00", "16:00", 0)).await;

    let (_, body) = get(&state, "/reports/2024").await;
    let months = body[0]["months"].as_array().unwrap();

    // January 2024 has 23 weekdays, March 21.
    assert_eq!(months.len(), 2);
    assert_eq!(months[0]["difference_minutes"], 480 - 23 * 480);
    assert_eq!(months[1]["running_difference_minutes"], 960 - 44 * 480);
}

#[tokio::test]
async fn test_report_for_year_without_entries() {
    let state = create_test_state();
    create_employee(&state, "Max", "Mustermann", "max@example.com").await;

    let (status, body) = get(&state, "/reports/2023").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["months"], json!([]));
    assert_eq!(body[0]["difference_sign"], "+");
    assert_eq!(body[0]["difference_hours"], "0,0");
}

#[tokio::test]
async fn test_available_years_across_employees() {
    let state = create_test_state();
    let max = create_employee(&state, "Max", "Mustermann", "max@example.com").await;
    let erika = create_employee(&state, "Erika", "Musterfrau", "erika@example.com").await;
    post(&state, "/time-entries", entry_body(max, "2024-02-01", "09:00", "17:00", 60)).await;
    post(&state, "/time-entries", entry_body(erika, "2022-12-31", "09:00", "17:00", 60)).await;
    post(&state, "/time-entries", entry_body(erika, "2024-05-02", "09:00", "17:00", 60)).await;

    let (status, body) = get(&state, "/reports/years").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([2022, 2024]));
}

#[tokio::test]
async fn test_months_for_unknown_employee_returns_404() {
    let state = create_test_state();
    let (status, body) = get(&state, "/employees/99/months").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EMPLOYEE_NOT_FOUND");
}

// =============================================================================
// SECTION 4: Configuration and file-backed storage
// =============================================================================

#[test]
fn test_shipped_config_loads() {
    let config = ConfigLoader::load("./timetracker.yaml")
        .expect("Failed to load config")
        .into_config();
    assert_eq!(config.server.bind, "127.0.0.1:3000");
    assert_eq!(config.reporting.hours_per_day, 8);
}

#[tokio::test]
async fn test_configured_hours_per_day_drive_targets() {
    let config = ConfigLoader::from_yaml_str("reporting:\n  hours_per_day: 6\n")
        .unwrap()
        .into_config();
    let state = AppState::new(Store::open_in_memory().unwrap(), config.reporting.hours_per_day);
    let id = create_employee(&state, "Max", "Mustermann", "max@example.com").await;
    post(&state, "/time-entries", entry_body(id, "2024-02-01", "09:00", "17:00", 60)).await;

    let (_, body) = get(&state, "/reports/2024").await;
    assert_eq!(body[0]["months"][0]["target"], "126:00");
}

#[tokio::test]
async fn test_entries_survive_reopening_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracker.db");

    let state = AppState::new(Store::open(&path).unwrap(), 8);
    let id = create_employee(&state, "Max", "Mustermann", "max@example.com").await;
    post(&state, "/time-entries", entry_body(id, "2024-02-01", "09:00", "17:00", 60)).await;
    drop(state);

    let reopened = AppState::new(Store::open(&path).unwrap(), 8);
    let (_, body) = get(&reopened, &format!("/employees/{}/months", id)).await;
    assert_eq!(body[0]["worked"], "07:00");
}
