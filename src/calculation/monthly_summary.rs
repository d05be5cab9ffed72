//! Grouping of entries into per-month totals.
//!
//! Totals are recomputed from the entries on every call; nothing is cached.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::models::TimeEntry;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English name of a month (1-12), or `"?"` outside that range.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|index| MONTH_NAMES.get(index as usize))
        .copied()
        .unwrap_or("?")
}

/// A calendar month, ordered by year then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1-12.
    pub month: u32,
}

impl YearMonth {
    /// Creates a new year/month key.
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The month an entry's date falls in.
    pub fn of(entry: &TimeEntry) -> Self {
        Self::new(entry.date.year(), entry.date.month())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", month_name(self.month), self.year)
    }
}

/// Net minutes per month.
pub type MonthlyMinutes = BTreeMap<YearMonth, i64>;

/// Sums the net minutes of entries per calendar month of their date.
///
/// The input order does not matter. Months without entries are absent
/// from the result.
///
/// # Example
///
/// ```
/// use time_tracker::calculation::{summarize_by_month, YearMonth};
/// use time_tracker::models::NewTimeEntry;
///
/// let entries = vec![
///     NewTimeEntry::from_input(1, "1.2.2024", "9:00", "17:00", "1:00").unwrap().into_entry(1),
///     NewTimeEntry::from_input(1, "2.2.2024", "9:00", "17:00", "1:00").unwrap().into_entry(2),
/// ];
/// let summary = summarize_by_month(&entries);
/// assert_eq!(summary.len(), 1);
/// assert_eq!(summary[&YearMonth::new(2024, 2)], 840);
/// ```
pub fn summarize_by_month(entries: &[TimeEntry]) -> MonthlyMinutes {
    let mut summary = MonthlyMinutes::new();
    for entry in entries {
        *summary.entry(YearMonth::of(entry)).or_insert(0) += entry.net_minutes();
    }
    summary
}

/// Entries of one month, in the order given.
pub fn entries_in_month(entries: &[TimeEntry], month: YearMonth) -> Vec<&TimeEntry> {
    entries
        .iter()
        .filter(|entry| YearMonth::of(entry) == month)
        .collect()
}

/// Every year that has at least one entry, ascending.
///
/// Takes the entry lists of all employees and returns their union.
pub fn list_available_years<'a, I>(entries_per_employee: I) -> BTreeSet<i32>
where
    I: IntoIterator<Item = &'a [TimeEntry]>,
{
    entries_per_employee
        .into_iter()
        .flatten()
        .map(|entry| entry.date.year())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn entry(id: i64, date: (i32, u32, u32), start: (u32, u32), end: (u32, u32), pause: (u32, u32)) -> TimeEntry {
        TimeEntry {
            id,
            employee_id: 1,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            pause: NaiveTime::from_hms_opt(pause.0, pause.1, 0).unwrap(),
        }
    }

    #[test]
    fn test_two_months_two_keys() {
        let entries = vec![
            entry(1, (2024, 1, 31), (9, 0), (17, 0), (1, 0)),
            entry(2, (2024, 2, 1), (9, 0), (13, 0), (0, 0)),
            entry(3, (2024, 2, 2), (8, 0), (12, 30), (0, 30)),
        ];
        let summary = summarize_by_month(&entries);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[&YearMonth::new(2024, 1)], 420);
        assert_eq!(summary[&YearMonth::new(2024, 2)], 240 + 240);
    }

    #[test]
    fn test_same_month_different_years_kept_apart() {
        let entries = vec![
            entry(1, (2023, 3, 1), (9, 0), (10, 0), (0, 0)),
            entry(2, (2024, 3, 1), (9, 0), (11, 0), (0, 0)),
        ];
        let summary = summarize_by_month(&entries);
        assert_eq!(summary[&YearMonth::new(2023, 3)], 60);
        assert_eq!(summary[&YearMonth::new(2024, 3)], 120);
    }

    #[test]
    fn test_order_independent() {
        let mut entries = vec![
            entry(1, (2024, 5, 3), (9, 0), (17, 0), (0, 30)),
            entry(2, (2024, 4, 3), (9, 0), (17, 0), (0, 30)),
            entry(3, (2024, 5, 4), (22, 0), (6, 0), (0, 0)),
        ];
        let forward = summarize_by_month(&entries);
        entries.reverse();
        assert_eq!(forward, summarize_by_month(&entries));
    }

    #[test]
    fn test_overnight_counts_toward_start_date_month() {
        let entries = vec![entry(1, (2024, 1, 31), (22, 0), (6, 0), (0, 0))];
        let summary = summarize_by_month(&entries);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[&YearMonth::new(2024, 1)], 480);
    }

    #[test]
    fn test_empty_input() {
        assert!(summarize_by_month(&[]).is_empty());
    }

    #[test]
    fn test_iteration_is_chronological() {
        let entries = vec![
            entry(1, (2024, 12, 1), (9, 0), (10, 0), (0, 0)),
            entry(2, (2023, 12, 1), (9, 0), (10, 0), (0, 0)),
            entry(3, (2024, 1, 1), (9, 0), (10, 0), (0, 0)),
        ];
        let keys: Vec<YearMonth> = summarize_by_month(&entries).into_keys().collect();
        assert_eq!(
            keys,
            vec![
                YearMonth::new(2023, 12),
                YearMonth::new(2024, 1),
                YearMonth::new(2024, 12)
            ]
        );
    }

    #[test]
    fn test_entries_in_month() {
        let entries = vec![
            entry(1, (2024, 1, 31), (9, 0), (10, 0), (0, 0)),
            entry(2, (2024, 2, 1), (9, 0), (10, 0), (0, 0)),
        ];
        let february = entries_in_month(&entries, YearMonth::new(2024, 2));
        assert_eq!(february.len(), 1);
        assert_eq!(february[0].id, 2);
    }

    #[test]
    fn test_list_available_years_unions_employees() {
        let first = vec![
            entry(1, (2024, 1, 1), (9, 0), (10, 0), (0, 0)),
            entry(2, (2022, 1, 1), (9, 0), (10, 0), (0, 0)),
        ];
        let second = vec![entry(3, (2023, 6, 1), (9, 0), (10, 0), (0, 0))];
        let empty: Vec<TimeEntry> = Vec::new();
        let years = list_available_years([first.as_slice(), second.as_slice(), empty.as_slice()]);
        assert_eq!(years.into_iter().collect::<Vec<_>>(), vec![2022, 2023, 2024]);
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "?");
        assert_eq!(month_name(13), "?");
        assert_eq!(YearMonth::new(2024, 2).to_string(), "February 2024");
    }
}
