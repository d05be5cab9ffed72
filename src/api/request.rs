//! Request types for the time tracker API.
//!
//! This module defines the JSON request bodies for the `POST` endpoints
//! and their conversion into validated domain values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::TrackerResult;
use crate::models::{Gender, NewEmployee, NewTimeEntry};
use crate::parsing::{minutes_to_time, parse_loose_time};

/// Request body for `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address; must be unique.
    pub email: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Date of hire; not before `birth_date`.
    pub hire_date: NaiveDate,
    /// Gender, `unknown` when absent.
    #[serde(default)]
    pub gender: Gender,
    /// Remaining holiday allowance in days.
    #[serde(default)]
    pub remaining_holidays: u32,
}

impl CreateEmployeeRequest {
    /// Validates the request into a [`NewEmployee`].
    pub fn into_new_employee(self) -> TrackerResult<NewEmployee> {
        Ok(NewEmployee::new(
            &self.first_name,
            &self.last_name,
            &self.email,
            self.birth_date,
            self.hire_date,
        )?
        .with_gender(self.gender)
        .with_remaining_holidays(self.remaining_holidays))
    }
}

/// Request body for `POST /time-entries`.
///
/// Times use the loose `HH:MM` / `HHMM` input format; the break is given
/// in minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTimeEntryRequest {
    /// The employee the entry belongs to.
    pub employee_id: i64,
    /// Day the shift started on.
    pub date: NaiveDate,
    /// Clock-in time.
    pub start: String,
    /// Clock-out time.
    pub end: String,
    /// Break length in minutes.
    #[serde(default)]
    pub pause_minutes: u32,
}

impl AddTimeEntryRequest {
    /// Parses the request into a [`NewTimeEntry`].
    pub fn into_new_entry(self) -> TrackerResult<NewTimeEntry> {
        Ok(NewTimeEntry {
            employee_id: self.employee_id,
            date: self.date,
            start: parse_loose_time(&self.start)?,
            end: parse_loose_time(&self.end)?,
            pause: minutes_to_time(self.pause_minutes)?,
        })
    }
}
