//! Error types for the time tracker.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure that can occur while parsing input, validating
//! employees and entries, talking to storage, or loading configuration.

use thiserror::Error;

/// The main error type for the time tracker.
///
/// None of these errors is fatal to the process: format and domain errors
/// are corrected by re-input, duplicates and constraint failures are
/// reported to the user as a non-blocking message.
///
/// # Example
///
/// ```
/// use time_tracker::error::TrackerError;
///
/// let error = TrackerError::InvalidFormat {
///     input: "31.2.2024".to_string(),
///     message: "not a calendar date".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid format '31.2.2024': not a calendar date");
/// ```
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A date or time string could not be parsed.
    #[error("Invalid format '{input}': {message}")]
    InvalidFormat {
        /// The raw input that failed to parse.
        input: String,
        /// A description of what was wrong with it.
        message: String,
    },

    /// A field value violates a domain rule (e.g. hire date before birth date).
    #[error("Invalid value for '{field}': {message}")]
    InvalidDomainValue {
        /// The offending field.
        field: String,
        /// A description of the violated rule.
        message: String,
    },

    /// A record with the same unique key already exists.
    #[error("Duplicate {what}: a matching record already exists")]
    DuplicateEntry {
        /// What kind of record was duplicated.
        what: String,
    },

    /// The storage layer rejected a write (foreign key, NOT NULL, CHECK).
    #[error("Constraint violation: {message}")]
    ConstraintViolation {
        /// The storage engine's description of the violation.
        message: String,
    },

    /// No employee exists with the given id.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        id: i64,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Any other storage failure.
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Reading from or writing to the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrackerError {
    /// Shorthand for an [`TrackerError::InvalidFormat`] error.
    pub fn invalid_format(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`TrackerError::InvalidDomainValue`] error.
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDomainValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true for errors the boolean save contracts report as `false`.
    pub fn is_rejected_write(&self) -> bool {
        matches!(
            self,
            TrackerError::DuplicateEntry { .. } | TrackerError::ConstraintViolation { .. }
        )
    }
}

/// A type alias for Results that return TrackerError.
pub type TrackerResult<T> = Result<T, TrackerError>;
