//! Text rendering for the interactive report.

use chrono::NaiveDate;

use crate::calculation::{MonthlyMinutes, YearMonth, month_name};
use crate::models::{Employee, TimeEntry};
use crate::parsing::format_hhmm;

/// Horizontal rule between report sections.
const RULE_WIDTH: usize = 60;

pub(crate) fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

fn dmy(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// One line of the employee picker.
pub fn employee_row(employee: &Employee, index: usize) -> String {
    format!(
        "[{}] {} {}  (Email: {}, Birth: {}, Hire: {})",
        index,
        employee.first_name,
        employee.last_name,
        employee.email,
        dmy(employee.birth_date),
        dmy(employee.hire_date)
    )
}

/// The block printed above every report.
pub fn employee_header(employee: &Employee) -> Vec<String> {
    vec![
        "Report for:".to_string(),
        format!("  Name:      {}", employee.full_name()),
        format!("  Birth:     {}", dmy(employee.birth_date)),
        format!("  Hire date: {}", dmy(employee.hire_date)),
        format!("  Email:     {}", employee.email),
        rule(),
    ]
}

/// One line per month with its worked total, ascending.
pub fn monthly_overview(summary: &MonthlyMinutes) -> Vec<String> {
    let mut lines = vec!["Monthly overview:".to_string(), rule()];
    lines.extend(summary.iter().map(|(key, minutes)| {
        format!(
            "{} {:<4}  -  {}",
            month_name(key.month),
            key.year,
            format_hhmm(*minutes)
        )
    }));
    lines.push(rule());
    lines
}

/// Entry listing of one month followed by the month sum.
pub fn month_detail(month: YearMonth, entries: &[&TimeEntry]) -> Vec<String> {
    let mut lines = vec![format!("Period: {}", month)];
    if entries.is_empty() {
        lines.push("No entries in this month.".to_string());
        return lines;
    }

    lines.push("Entries:".to_string());
    let mut total = 0;
    for entry in entries {
        let net = entry.net_minutes();
        total += net;
        lines.push(format!(
            "[{}] {}  {}–{}  Break {}  Net {}",
            entry.id,
            dmy(entry.date),
            entry.start.format("%H:%M"),
            entry.end.format("%H:%M"),
            entry.pause.format("%H:%M"),
            format_hhmm(net)
        ));
    }
    lines.push(rule());
    lines.push(format!("Sum (month): {}", format_hhmm(total)));
    lines
}
