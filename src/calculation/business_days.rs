//! Business-day targets.
//!
//! The monthly target is the number of weekdays in the month times the
//! daily hours. No holiday calendar is consulted.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{TrackerError, TrackerResult};

/// Default target hours per business day.
pub const DEFAULT_HOURS_PER_DAY: u32 = 8;

/// Returns true for Monday through Friday.
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts Monday-to-Friday days in a month.
///
/// # Errors
///
/// Returns `InvalidDomainValue` when `month` is not 1-12 or the year is
/// outside the supported calendar range.
///
/// # Example
///
/// ```
/// use time_tracker::calculation::business_days_in_month;
///
/// assert_eq!(business_days_in_month(2024, 2).unwrap(), 21);
/// assert!(business_days_in_month(2024, 13).is_err());
/// ```
pub fn business_days_in_month(year: i32, month: u32) -> TrackerResult<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        TrackerError::invalid_value("month", format!("{}-{} is not a valid month", year, month))
    })?;

    Ok(first
        .iter_days()
        .take_while(|day| day.month() == month)
        .filter(|day| is_business_day(*day))
        .count() as u32)
}

/// Target minutes for a month: business days × `hours_per_day` × 60.
///
/// # Example
///
/// ```
/// use time_tracker::calculation::{business_minutes_in_month, DEFAULT_HOURS_PER_DAY};
///
/// assert_eq!(
///     business_minutes_in_month(2024, 2, DEFAULT_HOURS_PER_DAY).unwrap(),
///     21 * 8 * 60
/// );
/// ```
pub fn business_minutes_in_month(year: i32, month: u32, hours_per_day: u32) -> TrackerResult<i64> {
    let days = business_days_in_month(year, month)?;
    Ok(i64::from(days) * i64::from(hours_per_day) * 60)
}
