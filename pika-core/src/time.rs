//! Time utilities: local wall-clock calendar arithmetic.
//!
//! Everything here works on naive (floating) local times. Due dates carry no
//! time component and are compared as end-of-day instants.

use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;

use crate::error::{Error, Result};

/// Minutes in a day, for `minute-of-day` arithmetic.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static regex"));

static CLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("static regex"));

/// Local midnight of the day containing `dt`.
pub fn start_of_day(dt: NaiveDateTime) -> NaiveDateTime {
    dt.date().and_time(NaiveTime::MIN)
}

pub fn add_days(dt: NaiveDateTime, days: i64) -> NaiveDateTime {
    dt + Duration::days(days)
}

pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date_only(input: &str) -> Result<NaiveDate> {
    let s = input.trim();
    if !ISO_DATE_RE.is_match(s) {
        return Err(Error::InvalidDate {
            input: input.to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        });
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| Error::InvalidDate {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// The instant a due date expires: 23:59:59.999 local on that day.
pub fn due_instant(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN))
}

/// Parse `"HH:MM"` into a minute of day. Hours may be one or two digits,
/// minutes are always two.
pub fn parse_clock(input: &str) -> Option<u32> {
    let caps = CLOCK_RE.captures(input.trim())?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(hour * 60 + minute)
}

/// Render a minute of day back as `"HH:MM"`.
pub fn format_clock(minute_of_day: u32) -> String {
    format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60)
}

/// `date` at `minute` past local midnight.
pub fn at_minute(date: NaiveDate, minute: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::minutes(minute.into())
}

/// Weekday index with Sunday as 0, matching the focus-window keys.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Minute of day for a datetime (seconds are truncated).
pub fn minute_of_day(dt: NaiveDateTime) -> u32 {
    dt.hour() * 60 + dt.minute()
}
