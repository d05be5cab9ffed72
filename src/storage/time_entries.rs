//! Time entry repository.
//!
//! Clock values are written as `HH:MM:SS.ffffff`, the format existing
//! databases hold, so the text-based unique key matches old and new rows.
//! The existence check compares through SQLite's `time()` and accepts
//! either format.

use chrono::NaiveTime;
use rusqlite::{OptionalExtension, Row, params};
use tracing::{info, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{NewTimeEntry, TimeEntry};

use super::{Store, classify_write_error};

/// Text form of a clock value as stored in `time_entry`.
pub(crate) fn stored_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S%.6f").to_string()
}

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<TimeEntry> {
    Ok(TimeEntry {
        id: row.get(0)?,
        employee_id: row.get(1)?,
        date: row.get(2)?,
        start: row.get(3)?,
        end: row.get(4)?,
        pause: row.get(5)?,
    })
}

impl Store {
    /// Inserts a time entry and returns it with its new id.
    ///
    /// # Errors
    ///
    /// `DuplicateEntry` when the employee already has an entry with the
    /// same date and start time, `ConstraintViolation` when the employee
    /// does not exist.
    pub fn insert_time_entry(&self, entry: &NewTimeEntry) -> TrackerResult<TimeEntry> {
        let tx = self.conn.unchecked_transaction()?;

        let exists = tx
            .query_row(
                r#"SELECT 1 FROM time_entry
                   WHERE employee_id = ?1 AND "Date" = ?2 AND time("Start") = time(?3)"#,
                params![entry.employee_id, entry.date, stored_time(entry.start)],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if exists {
            return Err(TrackerError::DuplicateEntry {
                what: "time entry".to_string(),
            });
        }

        tx.execute(
            r#"INSERT INTO time_entry ("Start", "Ende", "Pause", "Date", employee_id)
               VALUES (?1, ?2, ?3, ?4, ?5)"#,
            params![
                stored_time(entry.start),
                stored_time(entry.end),
                stored_time(entry.pause),
                entry.date,
                entry.employee_id
            ],
        )
        .map_err(|e| classify_write_error(e, "time entry"))?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        info!(
            entry_id = id,
            employee_id = entry.employee_id,
            date = %entry.date,
            net_minutes = entry.net_minutes(),
            "Time entry saved"
        );
        Ok(entry.clone().into_entry(id))
    }

    /// Stores a time entry; `false` means nothing was written because the
    /// `(employee, date, start)` key is taken or storage rejected the row.
    pub fn save_time_entry(&self, entry: &NewTimeEntry) -> TrackerResult<bool> {
        match self.insert_time_entry(entry) {
            Ok(_) => Ok(true),
            Err(err) if err.is_rejected_write() => {
                warn!(
                    employee_id = entry.employee_id,
                    date = %entry.date,
                    start = %entry.start,
                    error = %err,
                    "Time entry not saved"
                );
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Entries of one employee ordered by date, then start time.
    pub fn entries_for_employee(&self, employee_id: i64) -> TrackerResult<Vec<TimeEntry>> {
        let mut stmt = self.conn.prepare(
            r#"SELECT id, employee_id, "Date", "Start", "Ende", "Pause"
               FROM time_entry
               WHERE employee_id = ?1
               ORDER BY "Date", "Start""#,
        )?;
        let entries = stmt
            .query_map([employee_id], row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}
