//! Clock-time and weekday primitives.
//!
//! Times are minutes since midnight in a single canonical zone. Clock strings
//! are converted at the boundary by [`parse_clock`] and never compared as text.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Minutes since midnight, `0..=1440`. `1440` is the end-of-day boundary and
/// is only meaningful as an exclusive interval end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "ClockRepr", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    /// Build from a raw minute count.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidFormat` when `minutes` exceeds 1440.
    pub fn from_minutes(minutes: u16) -> Result<Self> {
        if minutes > MINUTES_PER_DAY {
            return Err(SlotError::InvalidFormat(format!(
                "{} minutes is past the end of the day",
                minutes
            )));
        }
        Ok(TimeOfDay(minutes))
    }

    /// Build from an hour (0-23, or 24 with minute 0) and a minute (0-59).
    pub fn from_hm(hour: u16, minute: u16) -> Result<Self> {
        if minute > 59 || hour > 24 || (hour == 24 && minute != 0) {
            return Err(SlotError::InvalidFormat(format!(
                "{}:{:02} is not a valid clock time",
                hour, minute
            )));
        }
        Ok(TimeOfDay(hour * 60 + minute))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Advance by `minutes`, or `None` if the result would pass end-of-day.
    pub fn checked_add(self, minutes: u16) -> Option<TimeOfDay> {
        let next = self.0.checked_add(minutes)?;
        (next <= MINUTES_PER_DAY).then_some(TimeOfDay(next))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_clock_24h(*self))
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        parse_clock(s)
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        format_clock_24h(t)
    }
}

/// Wire form accepted for a [`TimeOfDay`]: a clock string or a minute count.
#[derive(Deserialize)]
#[serde(untagged)]
enum ClockRepr {
    Minutes(u16),
    Text(String),
}

impl TryFrom<ClockRepr> for TimeOfDay {
    type Error = SlotError;

    fn try_from(repr: ClockRepr) -> Result<Self> {
        match repr {
            ClockRepr::Minutes(m) => TimeOfDay::from_minutes(m),
            ClockRepr::Text(s) => parse_clock(&s),
        }
    }
}

/// Parse a clock string into minutes since midnight.
///
/// Accepts 24h (`"9:00"`, `"09:00"`, `"17:30"`), 12h (`"9:00 AM"`, `"5:30pm"`),
/// and the end-of-day marker `"24:00"`.
///
/// # Errors
/// Returns `SlotError::InvalidFormat` when the separator is missing, the
/// minute is not exactly two digits, or the hour/minute is out of range.
/// Input is never coerced.
pub fn parse_clock(text: &str) -> Result<TimeOfDay> {
    let trimmed = text.trim();
    if trimmed == "24:00" {
        return Ok(TimeOfDay::END_OF_DAY);
    }
    check_clock_shape(trimmed)?;

    let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%I:%M %p"))
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%I:%M%p"))
        .map_err(|e| SlotError::InvalidFormat(format!("{:?}: {}", trimmed, e)))?;

    Ok(TimeOfDay((parsed.hour() * 60 + parsed.minute()) as u16))
}

/// `H:MM` or `HH:MM`, optionally followed by `AM`/`PM` (one space allowed).
///
/// chrono alone accepts `"9:5"` and `"9: 05"`, so the shape is checked first.
fn check_clock_shape(trimmed: &str) -> Result<()> {
    let malformed = || SlotError::InvalidFormat(format!("malformed clock time {:?}", trimmed));

    let (hour, rest) = trimmed.split_once(':').ok_or_else(|| {
        SlotError::InvalidFormat(format!("missing ':' separator in {:?}", trimmed))
    })?;
    if hour.is_empty() || hour.len() > 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    let minute = rest.get(..2).ok_or_else(malformed)?;
    if !minute.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    let suffix = &rest[2..];
    let meridiem = suffix.strip_prefix(' ').unwrap_or(suffix);
    if suffix.is_empty() || meridiem.eq_ignore_ascii_case("am") || meridiem.eq_ignore_ascii_case("pm") {
        Ok(())
    } else {
        Err(malformed())
    }
}

/// Format as zero-padded 24h clock, e.g. `"09:00"`. End-of-day renders as `"24:00"`.
pub fn format_clock_24h(t: TimeOfDay) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

/// Format as 12h clock with meridiem, e.g. `"9:00 AM"`, `"12:30 PM"`.
///
/// End-of-day renders as `"24:00"`; `"12:00 AM"` would parse back as midnight.
pub fn format_clock_12h(t: TimeOfDay) -> String {
    if t == TimeOfDay::END_OF_DAY {
        return format_clock_24h(t);
    }
    let hour = t.hour() % 24;
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hour, t.minute(), meridiem)
}

/// Signed distance from `a` to `b` in minutes.
pub fn minutes_between(a: TimeOfDay, b: TimeOfDay) -> i32 {
    i32::from(b.0) - i32::from(a.0)
}

/// Half-open interval overlap: `[a_start, a_end)` and `[b_start, b_end)`.
///
/// Touching endpoints do not overlap.
pub fn overlaps(a_start: TimeOfDay, a_end: TimeOfDay, b_start: TimeOfDay, b_end: TimeOfDay) -> bool {
    a_start < b_end && b_start < a_end
}

/// Day of the week for recurring weekly schedules.
///
/// Variant order is the canonical display and iteration order (Monday first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All days in canonical order.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }

    pub fn short_name(self) -> &'static str {
        &self.as_str()[..3]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        DayOfWeek::ALL
            .into_iter()
            .find(|d| lower == d.as_str() || lower == d.short_name())
            .ok_or_else(|| SlotError::InvalidFormat(format!("unknown day of week {:?}", s)))
    }
}

impl TryFrom<String> for DayOfWeek {
    type Error = SlotError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<DayOfWeek> for String {
    fn from(d: DayOfWeek) -> Self {
        d.as_str().to_string()
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(w: Weekday) -> Self {
        DayOfWeek::ALL[w.num_days_from_monday() as usize]
    }
}

impl From<DayOfWeek> for Weekday {
    fn from(d: DayOfWeek) -> Self {
        match d {
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
            DayOfWeek::Sunday => Weekday::Sun,
        }
    }
}
