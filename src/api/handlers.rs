//! HTTP request handlers for the time tracker API.
//!
//! This module contains the handler functions for all API endpoints.
//! Handlers only translate between JSON and the domain functions; every
//! report is recomputed from stored entries on each request.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    EmployeeReport, build_employee_report, list_available_years, month_name, summarize_by_month,
};
use crate::models::{Employee, TimeEntry};
use crate::parsing::format_hhmm;

use super::request::{AddTimeEntryRequest, CreateEmployeeRequest};
use super::response::{ApiError, ApiErrorResponse, MonthSummaryResponse, SavedEntryResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", get(list_employees_handler).post(create_employee_handler))
        .route("/employees/:id/months", get(monthly_overview_handler))
        .route("/time-entries", post(add_time_entry_handler))
        .route("/reports/years", get(report_years_handler))
        .route("/reports/:year", get(yearly_report_handler))
        .with_state(state)
}

/// Turns a body rejection into a `400` with a JSON error.
fn reject_body(rejection: JsonRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

/// Handler for `GET /employees`.
async fn list_employees_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<Employee>>> {
    let employees = state.store().fetch_employees()?;
    Ok(Json(employees))
}

/// Handler for `POST /employees`.
///
/// Responds `201` with the stored employee, `409` when the email is taken.
/// Calls `insert_employee` rather than the boolean `save_employee` so the
/// error kind can pick the status code.
async fn create_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create employee request");

    let Json(request) = payload.map_err(|rejection| reject_body(rejection, correlation_id))?;
    let new_employee = request.into_new_employee().inspect_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Employee rejected");
    })?;

    let employee = state.store().insert_employee(&new_employee).inspect_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Employee not saved");
    })?;

    info!(
        correlation_id = %correlation_id,
        employee_id = employee.id,
        "Employee created"
    );
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Handler for `POST /time-entries`.
///
/// Responds `201` with the saved entry and its net time, `409` when an
/// entry with the same employee, date and start already exists.
async fn add_time_entry_handler(
    State(state): State<AppState>,
    payload: Result<Json<AddTimeEntryRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing time entry request");

    let Json(request) = payload.map_err(|rejection| reject_body(rejection, correlation_id))?;
    let new_entry = request.into_new_entry().inspect_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Time entry rejected");
    })?;

    let store = state.store();
    let employee = store.require_employee(new_entry.employee_id)?;
    let entry = store.insert_time_entry(&new_entry).inspect_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Time entry not saved");
    })?;
    drop(store);

    Ok((StatusCode::CREATED, Json(saved_entry_response(&employee, &entry))))
}

fn saved_entry_response(employee: &Employee, entry: &TimeEntry) -> SavedEntryResponse {
    SavedEntryResponse {
        entry_id: entry.id,
        name: employee.full_name(),
        date: entry.date,
        start: entry.start.format("%H:%M").to_string(),
        end: entry.end.format("%H:%M").to_string(),
        pause: entry.pause.format("%H:%M").to_string(),
        net: format_hhmm(entry.net_minutes()),
    }
}

/// Handler for `GET /employees/:id/months`.
async fn monthly_overview_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
) -> ApiResult<Json<Vec<MonthSummaryResponse>>> {
    let entries = {
        let store = state.store();
        store.require_employee(employee_id)?;
        store.entries_for_employee(employee_id)?
    };

    let months = summarize_by_month(&entries)
        .into_iter()
        .map(|(key, minutes)| MonthSummaryResponse {
            year: key.year,
            month: key.month,
            month_name: month_name(key.month).to_string(),
            worked_minutes: minutes,
            worked: format_hhmm(minutes),
        })
        .collect();
    Ok(Json(months))
}

/// Loads every employee together with their entries.
fn load_all(state: &AppState) -> ApiResult<Vec<(Employee, Vec<TimeEntry>)>> {
    let store = state.store();
    let employees = store.fetch_employees()?;
    let mut loaded = Vec::with_capacity(employees.len());
    for employee in employees {
        let entries = store.entries_for_employee(employee.id)?;
        loaded.push((employee, entries));
    }
    Ok(loaded)
}

/// Handler for `GET /reports/years`.
async fn report_years_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<i32>>> {
    let loaded = load_all(&state)?;
    let years = list_available_years(loaded.iter().map(|(_, entries)| entries.as_slice()));
    Ok(Json(years.into_iter().collect()))
}

/// Handler for `GET /reports/:year`.
async fn yearly_report_handler(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> ApiResult<Json<Vec<EmployeeReport>>> {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();

    let loaded = load_all(&state)?;
    let reports = loaded
        .iter()
        .map(|(employee, entries)| {
            build_employee_report(employee, entries, year, state.hours_per_day())
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        correlation_id = %correlation_id,
        year,
        employees = reports.len(),
        duration_us = started.elapsed().as_micros(),
        "Report built"
    );
    Ok(Json(reports))
}
