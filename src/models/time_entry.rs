//! Time entry model.
//!
//! A time entry is one worked shift of one employee: the calendar date,
//! clock-in and clock-out times and the break length. The break is kept
//! as a time of day read as hours:minutes of duration, so the longest
//! representable break is 23:59.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::calculation::compute_net_minutes;
use crate::error::TrackerResult;
use crate::parsing::{parse_loose_date, parse_loose_time};

/// A time entry that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTimeEntry {
    /// The owning employee.
    pub employee_id: i64,
    /// The day the shift started on.
    pub date: NaiveDate,
    /// Clock-in time.
    pub start: NaiveTime,
    /// Clock-out time; earlier than `start` for a shift crossing midnight.
    pub end: NaiveTime,
    /// Break length as hours:minutes.
    pub pause: NaiveTime,
}

impl NewTimeEntry {
    /// Builds an entry from raw user input.
    ///
    /// The date must be `D.M.YYYY`, the times `HH:MM` or `HHMM`.
    ///
    /// # Example
    ///
    /// ```
    /// use time_tracker::models::NewTimeEntry;
    ///
    /// let entry = NewTimeEntry::from_input(1, "1.2.2024", "9:00", "1700", "1:00").unwrap();
    /// assert_eq!(entry.net_minutes(), 420);
    ///
    /// assert!(NewTimeEntry::from_input(1, "1.2.2024", "9:00", "17", "1:00").is_err());
    /// ```
    pub fn from_input(
        employee_id: i64,
        date: &str,
        start: &str,
        end: &str,
        pause: &str,
    ) -> TrackerResult<Self> {
        Ok(Self {
            employee_id,
            date: parse_loose_date(date)?,
            start: parse_loose_time(start)?,
            end: parse_loose_time(end)?,
            pause: parse_loose_time(pause)?,
        })
    }

    /// Net worked minutes for this entry.
    pub fn net_minutes(&self) -> i64 {
        compute_net_minutes(self.start, self.end, self.pause)
    }

    /// Attaches the id assigned by storage.
    pub fn into_entry(self, id: i64) -> TimeEntry {
        TimeEntry {
            id,
            employee_id: self.employee_id,
            date: self.date,
            start: self.start,
            end: self.end,
            pause: self.pause,
        }
    }
}

/// A stored time entry.
///
/// `(employee_id, date, start)` is unique among stored entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Id assigned by storage.
    pub id: i64,
    /// The owning employee.
    pub employee_id: i64,
    /// The day the shift started on.
    pub date: NaiveDate,
    /// Clock-in time.
    pub start: NaiveTime,
    /// Clock-out time.
    pub end: NaiveTime,
    /// Break length as hours:minutes.
    pub pause: NaiveTime,
}

impl TimeEntry {
    /// Net worked minutes for this entry.
    pub fn net_minutes(&self) -> i64 {
        compute_net_minutes(self.start, self.end, self.pause)
    }
}
