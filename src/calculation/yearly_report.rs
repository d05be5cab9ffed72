//! Per-employee yearly report.
//!
//! For every month of the requested year that has entries, the report
//! compares worked minutes with the business-day target and keeps a
//! running over/under balance across the year.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::TrackerResult;
use crate::models::{Employee, TimeEntry};
use crate::parsing::format_hhmm;

use super::business_days::business_minutes_in_month;
use super::monthly_summary::{month_name, summarize_by_month};

/// One month of an employee's yearly report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthReport {
    /// Month number, 1-12.
    pub month: u32,
    /// English month name.
    pub month_name: String,
    /// Net minutes worked.
    pub worked_minutes: i64,
    /// Business-day target in minutes.
    pub target_minutes: i64,
    /// `worked_minutes - target_minutes` for this month alone.
    pub difference_minutes: i64,
    /// Sum of the monthly differences up to and including this month.
    pub running_difference_minutes: i64,
    /// Worked time as `HH:MM`.
    pub worked: String,
    /// Target time as `HH:MM`.
    pub target: String,
}

/// An employee's report for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeReport {
    /// The employee's id.
    pub employee_id: i64,
    /// First and last name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Remaining holiday allowance in days.
    pub remaining_holidays: u32,
    /// The reported year.
    pub year: i32,
    /// Months of `year` with entries, ascending.
    pub months: Vec<MonthReport>,
    /// Worked minutes over all reported months.
    pub total_worked_minutes: i64,
    /// Target minutes over all reported months.
    pub total_target_minutes: i64,
    /// `total_worked_minutes - total_target_minutes`.
    pub difference_minutes: i64,
    /// `"-"` when under target, `"+"` otherwise.
    pub difference_sign: String,
    /// Magnitude of the difference in hours, one decimal, comma separator.
    pub difference_hours: String,
}

/// Builds the report of one employee for one year.
///
/// Months are taken from [`summarize_by_month`] restricted to `year`,
/// ascending. Only months with entries are listed and contribute to the
/// yearly target.
///
/// # Errors
///
/// Propagates `InvalidDomainValue` from the target computation, which
/// cannot happen for months derived from real dates.
///
/// # Example
///
/// ```
/// use time_tracker::calculation::build_employee_report;
/// use time_tracker::models::{NewEmployee, NewTimeEntry};
/// use chrono::NaiveDate;
///
/// let employee = NewEmployee::new(
///     "Max",
///     "Mustermann",
///     "max@example.com",
///     NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
/// )
/// .unwrap()
/// .into_employee(1);
///
/// let entries = vec![
///     NewTimeEntry::from_input(1, "1.2.2024", "9:00", "17:00", "1:00").unwrap().into_entry(1),
///     NewTimeEntry::from_input(1, "2.2.2024", "9:00", "17:00", "1:00").unwrap().into_entry(2),
/// ];
///
/// let report = build_employee_report(&employee, &entries, 2024, 8).unwrap();
/// assert_eq!(report.months[0].worked, "14:00");
/// assert_eq!(report.months[0].target, "168:00");
/// assert_eq!(report.difference_sign, "-");
/// assert_eq!(report.difference_hours, "154,0");
/// ```
pub fn build_employee_report(
    employee: &Employee,
    entries: &[TimeEntry],
    year: i32,
    hours_per_day: u32,
) -> TrackerResult<EmployeeReport> {
    let summary = summarize_by_month(entries);

    let mut months = Vec::new();
    let mut running = 0;
    let mut total_worked = 0;
    let mut total_target = 0;

    for (key, worked_minutes) in summary.into_iter().filter(|(key, _)| key.year == year) {
        let target_minutes = business_minutes_in_month(key.year, key.month, hours_per_day)?;
        let difference_minutes = worked_minutes - target_minutes;
        running += difference_minutes;
        total_worked += worked_minutes;
        total_target += target_minutes;

        months.push(MonthReport {
            month: key.month,
            month_name: month_name(key.month).to_string(),
            worked_minutes,
            target_minutes,
            difference_minutes,
            running_difference_minutes: running,
            worked: format_hhmm(worked_minutes),
            target: format_hhmm(target_minutes),
        });
    }

    let (difference_sign, difference_hours) = format_signed_hours(running);

    Ok(EmployeeReport {
        employee_id: employee.id,
        name: employee.full_name(),
        email: employee.email.clone(),
        remaining_holidays: employee.remaining_holidays,
        year,
        months,
        total_worked_minutes: total_worked,
        total_target_minutes: total_target,
        difference_minutes: running,
        difference_sign,
        difference_hours,
    })
}

/// Splits a minute difference into a sign and a decimal-hours magnitude.
///
/// The magnitude has exactly one decimal place, rounded half away from
/// zero, with a comma as the decimal separator.
///
/// ```
/// use time_tracker::calculation::format_signed_hours;
///
/// assert_eq!(format_signed_hours(-9240), ("-".to_string(), "154,0".to_string()));
/// assert_eq!(format_signed_hours(90), ("+".to_string(), "1,5".to_string()));
/// assert_eq!(format_signed_hours(0), ("+".to_string(), "0,0".to_string()));
/// ```
pub fn format_signed_hours(minutes: i64) -> (String, String) {
    let sign = if minutes < 0 { "-" } else { "+" };
    let mut hours = (Decimal::from(minutes.unsigned_abs()) / Decimal::from(60))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    hours.rescale(1);
    (sign.to_string(), hours.to_string().replace('.', ","))
}
