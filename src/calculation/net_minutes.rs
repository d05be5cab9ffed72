//! Net worked minutes for a single entry.

use chrono::NaiveTime;

use crate::parsing::{MINUTES_PER_DAY, minutes_of_day};

/// Computes the worked minutes of one shift after subtracting the break.
///
/// Times are reduced to minutes since midnight. An end time earlier than
/// the start time is read as a shift that crosses midnight, so a day is
/// added to the end. The result never goes below zero, even when the
/// break is longer than the shift.
///
/// # Examples
///
/// ```
/// use time_tracker::calculation::compute_net_minutes;
/// use chrono::NaiveTime;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
///
/// // A standard day: 8 hours with a 1 hour break.
/// assert_eq!(compute_net_minutes(t(9, 0), t(17, 0), t(1, 0)), 420);
///
/// // End before start wraps to the next day: 23 hours minus the break.
/// assert_eq!(compute_net_minutes(t(10, 0), t(9, 0), t(1, 0)), 1320);
///
/// // A break longer than the shift clamps to zero.
/// assert_eq!(compute_net_minutes(t(9, 0), t(10, 0), t(2, 0)), 0);
/// ```
pub fn compute_net_minutes(start: NaiveTime, end: NaiveTime, pause: NaiveTime) -> i64 {
    let start = minutes_of_day(start);
    let mut end = minutes_of_day(end);
    let pause = minutes_of_day(pause);

    if end < start {
        end += MINUTES_PER_DAY;
    }

    (end - start - pause).max(0)
}
