//! Timestamp arithmetic on Unix seconds.

use chrono::{Days, Local, TimeZone};

const SECONDS_PER_DAY: i64 = 60 * 60 * 24;

/// Weekday names, Monday first.
pub fn days_in_week() -> [&'static str; 7] {
  ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
}

/// Shift `ts` by `days` calendar days in the local time zone.
///
/// Returns `None` when the result is out of range or lands in a
/// non-existent local time.
pub fn add_days_to_ts(days: i64, ts: i64) -> Option<i64> {
  add_days_in(&Local, days, ts)
}

/// Calendar-day shift in an explicit zone: wall-clock time is kept across
/// DST changes, so a "day" is not always 86400 seconds.
pub fn add_days_in<Tz: TimeZone>(tz: &Tz, days: i64, ts: i64) -> Option<i64> {
  let start = tz.timestamp_opt(ts, 0).single()?;
  let shifted = if days >= 0 {
    start.checked_add_days(Days::new(days.unsigned_abs()))?
  } else {
    start.checked_sub_days(Days::new(days.unsigned_abs()))?
  };
  Some(shifted.timestamp())
}

/// Whole days from `ts2` to `ts1`, rounded up (`ceil((ts1 - ts2) / 86400)`).
///
/// Integer arithmetic, so a sub-day negative gap yields a plain `0`. The
/// difference saturates at the ends of the `i64` range.
pub fn days_between_timestamps(ts1: i64, ts2: i64) -> i64 {
  let diff = ts1.saturating_sub(ts2);
  let floor = diff.div_euclid(SECONDS_PER_DAY);
  if diff.rem_euclid(SECONDS_PER_DAY) == 0 { floor } else { floor + 1 }
}
