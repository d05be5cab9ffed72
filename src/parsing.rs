//! Parsing of loosely formatted user input.
//!
//! Dates are typed as `D.M.YYYY` and times as `HH:MM` or `HHMM`. These
//! functions only validate and convert; interpreting an empty string or
//! `"0"` as "cancel" is left to the interactive caller.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::error::{TrackerError, TrackerResult};

/// Minutes in one day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parses a `D.M.YYYY` / `DD.MM.YYYY` date.
///
/// Surrounding whitespace is ignored and empty dot-separated tokens are
/// skipped, so `1..2.2024` is read as `1.2.2024`. Exactly three numeric
/// tokens must remain and they must name a real calendar date.
///
/// # Examples
///
/// ```
/// use time_tracker::parsing::parse_loose_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     parse_loose_date(" 1.2.2024 ").unwrap(),
///     NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
/// );
/// assert!(parse_loose_date("30.02.2024").is_err());
/// assert!(parse_loose_date("2024-02-01").is_err());
/// ```
pub fn parse_loose_date(text: &str) -> TrackerResult<NaiveDate> {
    let tokens: Vec<&str> = text
        .trim()
        .split('.')
        .filter(|token| !token.is_empty())
        .collect();

    let [day, month, year] = tokens.as_slice() else {
        return Err(TrackerError::invalid_format(
            text,
            "expected D.M.YYYY with three dot-separated parts",
        ));
    };

    let day: u32 = parse_number(text, day)?;
    let month: u32 = parse_number(text, month)?;
    let year: i32 = parse_number(text, year)?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| TrackerError::invalid_format(text, "not a calendar date"))
}

/// Parses a clock time given as `HH:MM`, `H:M`, `HHMM` or `HMM`.
///
/// All whitespace is removed first, including spaces inside the string.
/// In the colon form each side may have one or two digits. The purely
/// numeric form must have three or four digits; the last two are minutes.
///
/// # Examples
///
/// ```
/// use time_tracker::parsing::parse_loose_time;
/// use chrono::NaiveTime;
///
/// let nine_thirty = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
/// assert_eq!(parse_loose_time("9:30").unwrap(), nine_thirty);
/// assert_eq!(parse_loose_time("0930").unwrap(), nine_thirty);
/// assert_eq!(parse_loose_time("930").unwrap(), nine_thirty);
/// assert_eq!(parse_loose_time(" 09 : 30 ").unwrap(), nine_thirty);
/// assert!(parse_loose_time("2400").is_err());
/// ```
pub fn parse_loose_time(text: &str) -> TrackerResult<NaiveTime> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    let (hour, minute) = if compact.contains(':') {
        let parts: Vec<&str> = compact.split(':').collect();
        let [hour, minute] = parts.as_slice() else {
            return Err(TrackerError::invalid_format(text, "expected HH:MM"));
        };
        if !is_short_number(hour) || !is_short_number(minute) {
            return Err(TrackerError::invalid_format(text, "expected HH:MM"));
        }
        (parse_number::<u32>(text, hour)?, parse_number::<u32>(text, minute)?)
    } else if compact.chars().all(|c| c.is_ascii_digit()) && matches!(compact.len(), 3 | 4) {
        let split = compact.len() - 2;
        (
            parse_number::<u32>(text, &compact[..split])?,
            parse_number::<u32>(text, &compact[split..])?,
        )
    } else {
        return Err(TrackerError::invalid_format(text, "expected HH:MM or HHMM"));
    };

    if hour > 23 {
        return Err(TrackerError::invalid_format(text, "hour must be between 0 and 23"));
    }
    if minute > 59 {
        return Err(TrackerError::invalid_format(
            text,
            "minute must be between 0 and 59",
        ));
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| TrackerError::invalid_format(text, "not a clock time"))
}

/// Formats a minute count as zero-padded `HH:MM`.
///
/// Negative values are clamped to zero. Hours are not wrapped, so a
/// month target of 168 hours prints as `168:00`.
///
/// ```
/// use time_tracker::parsing::format_hhmm;
///
/// assert_eq!(format_hhmm(420), "07:00");
/// assert_eq!(format_hhmm(10_080), "168:00");
/// assert_eq!(format_hhmm(-15), "00:00");
/// ```
pub fn format_hhmm(minutes: i64) -> String {
    let minutes = minutes.max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Reads an `HH:MM` duration back into minutes.
///
/// Unlike [`parse_loose_time`] the hour part is unbounded, which makes
/// this the inverse of [`format_hhmm`] for every non-negative count.
pub fn parse_hhmm_minutes(text: &str) -> TrackerResult<i64> {
    let (hours, minutes) = text
        .trim()
        .split_once(':')
        .ok_or_else(|| TrackerError::invalid_format(text, "expected HH:MM"))?;
    let hours: i64 = parse_number(text, hours)?;
    let minutes: i64 = parse_number(text, minutes)?;
    if !(0..60).contains(&minutes) || hours < 0 {
        return Err(TrackerError::invalid_format(text, "minutes must be between 0 and 59"));
    }
    Ok(hours * 60 + minutes)
}

/// Converts a break length in minutes into the time-of-day value it is stored as.
///
/// Breaks share the clock-time representation, so anything from a full
/// day upwards cannot be stored.
pub fn minutes_to_time(minutes: u32) -> TrackerResult<NaiveTime> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).ok_or_else(|| {
        TrackerError::invalid_value("pause", "break cannot be longer than 23:59")
    })
}

/// Minutes since midnight, ignoring seconds.
pub fn minutes_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

fn is_short_number(part: &str) -> bool {
    matches!(part.len(), 1 | 2) && part.chars().all(|c| c.is_ascii_digit())
}

fn parse_number<T: std::str::FromStr>(input: &str, token: &str) -> TrackerResult<T> {
    token
        .trim()
        .parse()
        .map_err(|_| TrackerError::invalid_format(input, format!("'{}' is not a number", token)))
}
