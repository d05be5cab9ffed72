//! Table definitions.
//!
//! Column names of `time_entry` keep the capitalised `Start`, `Ende`,
//! `Pause` and `Date` of existing databases. The unique constraints here
//! are what actually prevents duplicates; the repository pre-checks only
//! produce a friendlier rejection.
//!
//! Databases created before `remaining_holidays` existed get the column
//! added on open.

use rusqlite::{Connection, params};
use tracing::{debug, info};

use crate::error::TrackerResult;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS employee (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name         TEXT NOT NULL CHECK (length(first_name) BETWEEN 1 AND 100),
    last_name          TEXT NOT NULL CHECK (length(last_name) BETWEEN 1 AND 100),
    email              TEXT NOT NULL UNIQUE,
    birth_date         DATE NOT NULL,
    hire_date          DATE NOT NULL,
    gender             TEXT NOT NULL DEFAULT 'unknown',
    remaining_holidays INTEGER NOT NULL DEFAULT 0 CHECK (remaining_holidays >= 0),
    CHECK (hire_date >= birth_date)
);

CREATE INDEX IF NOT EXISTS ix_employee_first_name ON employee (first_name);
CREATE INDEX IF NOT EXISTS ix_employee_last_name ON employee (last_name);

CREATE TABLE IF NOT EXISTS time_entry (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    "Start"     TIME NOT NULL,
    "Ende"      TIME NOT NULL,
    "Pause"     TIME NOT NULL,
    "Date"      DATE NOT NULL,
    employee_id INTEGER NOT NULL REFERENCES employee (id),
    UNIQUE (employee_id, "Date", "Start")
);

CREATE INDEX IF NOT EXISTS ix_time_entry_employee_id ON time_entry (employee_id);
"#;

/// Creates any missing tables, indexes and columns.
pub(crate) fn migrate(conn: &Connection) -> TrackerResult<()> {
    conn.execute_batch(SCHEMA)?;
    if !has_column(conn, "employee", "remaining_holidays")? {
        conn.execute_batch(
            "ALTER TABLE employee ADD COLUMN remaining_holidays INTEGER NOT NULL DEFAULT 0",
        )?;
        info!("Added employee.remaining_holidays");
    }
    debug!("Schema ready");
    Ok(())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT count(*) FROM pragma_table_info(?1) WHERE name = ?2",
        params![table, column],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
