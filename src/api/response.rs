//! Response types for the time tracker API.
//!
//! This module defines the success bodies that are not plain domain
//! types, the error body, and the mapping from [`TrackerError`] to HTTP
//! status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Body returned after a time entry was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedEntryResponse {
    /// Id of the new entry.
    pub entry_id: i64,
    /// Full name of the employee.
    pub name: String,
    /// Day of the entry.
    pub date: NaiveDate,
    /// Clock-in as `HH:MM`.
    pub start: String,
    /// Clock-out as `HH:MM`.
    pub end: String,
    /// Break as `HH:MM`.
    pub pause: String,
    /// Net worked time as `HH:MM`.
    pub net: String,
}

/// One row of an employee's monthly overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummaryResponse {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1-12.
    pub month: u32,
    /// English month name.
    pub month_name: String,
    /// Net minutes worked.
    pub worked_minutes: i64,
    /// Net time worked as `HH:MM`.
    pub worked: String,
}

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
    /// A `400 Bad Request` with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<TrackerError> for ApiErrorResponse {
    fn from(error: TrackerError) -> Self {
        let message = error.to_string();
        match error {
            TrackerError::InvalidFormat { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_FORMAT",
                    message,
                    "Dates use D.M.YYYY, times use HH:MM or HHMM",
                ),
            },
            TrackerError::InvalidDomainValue { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details("INVALID_VALUE", message, field),
            },
            TrackerError::DuplicateEntry { what } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "DUPLICATE_ENTRY",
                    format!("A matching {} already exists. Nothing saved.", what),
                    message,
                ),
            },
            TrackerError::ConstraintViolation { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "CONSTRAINT_VIOLATION",
                    "The record was rejected by storage. Nothing saved.",
                    message,
                ),
            },
            TrackerError::EmployeeNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("EMPLOYEE_NOT_FOUND", message),
            },
            TrackerError::ConfigNotFound { .. }
            | TrackerError::ConfigParseError { .. }
            | TrackerError::Storage(_)
            | TrackerError::Io(_) => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("INTERNAL_ERROR", "Internal error", message),
            },
        }
    }
}
