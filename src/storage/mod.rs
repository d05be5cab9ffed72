//! SQLite persistence for employees and time entries.
//!
//! A [`Store`] is an explicit handle owned by the outermost caller (the
//! HTTP server or the interactive menu) and passed to whatever needs it.
//! The save operations report duplicates and other rejected writes as
//! `Ok(false)` so callers can show a message instead of failing.

mod employees;
mod schema;
mod time_entries;

use std::path::Path;

use rusqlite::{Connection, ErrorCode, ffi};
use tracing::info;

use crate::error::{TrackerError, TrackerResult};

/// Handle to the time tracker database.
///
/// # Example
///
/// ```
/// use time_tracker::storage::Store;
///
/// let store = Store::open_in_memory().unwrap();
/// assert!(store.fetch_employees().unwrap().is_empty());
/// ```
#[derive(Debug)]
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (creating if needed) the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> TrackerResult<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Opening database");
        Self::from_connection(Connection::open(path)?)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> TrackerResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> TrackerResult<Self> {
        // Foreign keys are off by default and must be enabled per connection.
        conn.pragma_update(None, "foreign_keys", true)?;
        schema::migrate(&conn)?;
        Ok(Self { conn })
    }

    /// The underlying connection, for ad-hoc queries.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

/// Maps storage constraint failures onto the domain error kinds.
///
/// Unique and primary key violations become `DuplicateEntry`; every other
/// constraint failure becomes `ConstraintViolation`.
fn classify_write_error(err: rusqlite::Error, what: &str) -> TrackerError {
    if let rusqlite::Error::SqliteFailure(failure, message) = &err {
        if failure.code == ErrorCode::ConstraintViolation {
            let unique = matches!(
                failure.extended_code,
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY
            );
            return if unique {
                TrackerError::DuplicateEntry {
                    what: what.to_string(),
                }
            } else {
                TrackerError::ConstraintViolation {
                    message: message.clone().unwrap_or_else(|| err.to_string()),
                }
            };
        }
    }
    TrackerError::Storage(err)
}
