//! Employee model and related types.
//!
//! This module defines the validated [`NewEmployee`] used for inserts,
//! the persisted [`Employee`] and the [`Gender`] enum.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};

/// Longest accepted first or last name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("email pattern is a valid regex")
});

/// Gender as recorded on the employee; `Unknown` when not given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Diverse.
    Diverse,
    /// Not specified.
    #[default]
    Unknown,
}

impl Gender {
    /// The value stored in the `gender` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Diverse => "diverse",
            Gender::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "diverse" => Ok(Gender::Diverse),
            "unknown" | "" => Ok(Gender::Unknown),
            other => Err(TrackerError::invalid_value(
                "gender",
                format!("'{}' is not one of male, female, diverse, unknown", other),
            )),
        }
    }
}

/// An employee that has passed validation but has not been stored yet.
///
/// The only way to obtain one is [`NewEmployee::new`], so every value of
/// this type satisfies the field rules: trimmed non-empty names, a
/// well-formed email and a hire date no earlier than the birth date.
///
/// # Example
///
/// ```
/// use time_tracker::models::NewEmployee;
/// use chrono::NaiveDate;
///
/// let born = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
/// let hired = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
/// let employee = NewEmployee::new("Ada", "Lovelace", "ada@example.com", born, hired).unwrap();
/// assert_eq!(employee.email(), "ada@example.com");
///
/// assert!(NewEmployee::new("Ada", "Lovelace", "ada@example.com", hired, born).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEmployee {
    first_name: String,
    last_name: String,
    email: String,
    birth_date: NaiveDate,
    hire_date: NaiveDate,
    gender: Gender,
    remaining_holidays: u32,
}

impl NewEmployee {
    /// Validates the fields and builds a new employee.
    ///
    /// Checks run in a fixed order: first name, last name, email format,
    /// then hire date against birth date. The first failure is returned.
    pub fn new(
        first_name: &str,
        last_name: &str,
        email: &str,
        birth_date: NaiveDate,
        hire_date: NaiveDate,
    ) -> TrackerResult<Self> {
        let first_name = validate_name("first_name", first_name)?;
        let last_name = validate_name("last_name", last_name)?;
        let email = validate_email(email)?;

        if hire_date < birth_date {
            return Err(TrackerError::invalid_value(
                "hire_date",
                format!(
                    "hire date {} cannot be earlier than birth date {}",
                    hire_date, birth_date
                ),
            ));
        }

        Ok(Self {
            first_name,
            last_name,
            email,
            birth_date,
            hire_date,
            gender: Gender::Unknown,
            remaining_holidays: 0,
        })
    }

    /// Sets the gender.
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    /// Sets the remaining holiday allowance in days.
    pub fn with_remaining_holidays(mut self, days: u32) -> Self {
        self.remaining_holidays = days;
        self
    }

    /// The trimmed first name.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// The trimmed last name.
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// The email address, as entered (minus surrounding whitespace).
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Date of birth.
    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Date of hire.
    pub fn hire_date(&self) -> NaiveDate {
        self.hire_date
    }

    /// Recorded gender.
    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Remaining holiday allowance in days.
    pub fn remaining_holidays(&self) -> u32 {
        self.remaining_holidays
    }

    /// Attaches the id assigned by storage.
    pub fn into_employee(self, id: i64) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            birth_date: self.birth_date,
            hire_date: self.hire_date,
            gender: self.gender,
            remaining_holidays: self.remaining_holidays,
        }
    }
}

/// A stored employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Id assigned by storage.
    pub id: i64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address, unique across employees.
    pub email: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Date of hire.
    pub hire_date: NaiveDate,
    /// Recorded gender.
    #[serde(default)]
    pub gender: Gender,
    /// Remaining holiday allowance in days, shown on reports.
    #[serde(default)]
    pub remaining_holidays: u32,
}

impl Employee {
    /// First and last name separated by a space.
    ///
    /// ```
    /// use time_tracker::models::{Employee, Gender};
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     id: 1,
    ///     first_name: "Grace".to_string(),
    ///     last_name: "Hopper".to_string(),
    ///     email: "grace@example.com".to_string(),
    ///     birth_date: NaiveDate::from_ymd_opt(1906, 12, 9).unwrap(),
    ///     hire_date: NaiveDate::from_ymd_opt(1944, 7, 1).unwrap(),
    ///     gender: Gender::Female,
    ///     remaining_holidays: 0,
    /// };
    /// assert_eq!(employee.full_name(), "Grace Hopper");
    /// ```
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in completed years on the given day.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        let mut years = today.year() - self.birth_date.year();
        if (today.month(), today.day()) < (self.birth_date.month(), self.birth_date.day()) {
            years -= 1;
        }
        years
    }
}

fn validate_name(field: &str, value: &str) -> TrackerResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TrackerError::invalid_value(field, "must not be empty"));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(TrackerError::invalid_value(
            field,
            format!("must be at most {} characters", MAX_NAME_LENGTH),
        ));
    }
    Ok(value.to_string())
}

fn validate_email(value: &str) -> TrackerResult<String> {
    let value = value.trim();
    if !EMAIL_PATTERN.is_match(value) {
        return Err(TrackerError::invalid_value(
            "email",
            format!("'{}' is not a valid email address", value),
        ));
    }
    Ok(value.to_string())
}
