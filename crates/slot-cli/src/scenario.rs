//! The JSON scenario file the CLI runs against.

use anyhow::{Context, Result};
use serde::Deserialize;
use slot_engine::{
    parse_clock, DayOfWeek, InMemoryCalendar, Interval, OwnerId, Reservation, TeacherId,
    WeeklySlot,
};

/// One teacher's data plus one subscription's request.
///
/// ```json
/// {
///   "teacher": "t-1",
///   "owner": "group-a",
///   "slots": [{"day": "monday", "start": "09:00", "end": "12:00"}],
///   "reservations": [{"owner": "group-b", "day": "monday", "start": "10:00", "end": "11:00"}],
///   "request": [{"day": "monday", "start": "10:00", "end": "11:00"}]
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default = "default_teacher")]
    pub teacher: TeacherId,
    pub owner: OwnerId,
    #[serde(default)]
    pub slots: Vec<WeeklySlot>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default)]
    pub request: Vec<Interval>,
}

fn default_teacher() -> TeacherId {
    TeacherId::from("teacher")
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse scenario JSON")
    }

    /// An in-memory calendar holding just this scenario's teacher.
    pub fn calendar(&self) -> Result<InMemoryCalendar> {
        let calendar = InMemoryCalendar::new();
        calendar.insert_teacher(
            self.teacher.clone(),
            self.slots.clone(),
            self.reservations.clone(),
        )?;
        Ok(calendar)
    }
}

/// Parse a `--pick` value of the form `DAY@START-END`, e.g. `mon@9:00-10:00`.
pub fn parse_pick(raw: &str) -> Result<Interval> {
    let (day, span) = raw
        .split_once('@')
        .with_context(|| format!("Pick '{}' must look like DAY@START-END", raw))?;
    let (start, end) = span
        .split_once('-')
        .with_context(|| format!("Pick '{}' must look like DAY@START-END", raw))?;

    let day: DayOfWeek = day.parse()?;
    let interval = Interval::new(day, parse_clock(start)?, parse_clock(end)?)?;
    Ok(interval)
}
