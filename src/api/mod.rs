//! HTTP API module for the time tracker.
//!
//! This module provides the JSON endpoints for managing employees,
//! recording time entries and reading monthly and yearly reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AddTimeEntryRequest, CreateEmployeeRequest};
pub use response::{ApiError, ApiErrorResponse, MonthSummaryResponse, SavedEntryResponse};
pub use state::AppState;
