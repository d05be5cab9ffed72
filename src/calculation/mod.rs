//! Time accounting for the time tracker.
//!
//! This module contains the net-minutes calculation for a single entry,
//! business-day targets per month, grouping of entries into monthly
//! totals, and the per-employee yearly report built on top of them.

mod business_days;
mod monthly_summary;
mod net_minutes;
mod yearly_report;

pub use business_days::{
    DEFAULT_HOURS_PER_DAY, business_days_in_month, business_minutes_in_month, is_business_day,
};
pub use monthly_summary::{
    MonthlyMinutes, YearMonth, entries_in_month, list_available_years, month_name,
    summarize_by_month,
};
pub use net_minutes::compute_net_minutes;
pub use yearly_report::{EmployeeReport, MonthReport, build_employee_report, format_signed_hours};
