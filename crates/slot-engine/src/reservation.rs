//! Requested intervals, committed reservations, and the per-teacher read model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::time::{self, DayOfWeek, TimeOfDay};

/// Opaque identity of the subscription/group a reservation belongs to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub String);

impl From<&str> for OwnerId {
    fn from(s: &str) -> Self {
        OwnerId(s.to_string())
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identity of a teacher.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeacherId(pub String);

impl From<&str> for TeacherId {
    fn from(s: &str) -> Self {
        TeacherId(s.to_string())
    }
}

impl fmt::Display for TeacherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A half-open `[start, end)` interval on a weekday.
///
/// Ordering is canonical: day first, then start, then end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    pub day: DayOfWeek,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Interval {
    /// # Errors
    /// Returns `SlotError::InvalidInterval` unless `end > start`.
    pub fn new(day: DayOfWeek, start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        if end <= start {
            return Err(SlotError::InvalidInterval { start, end });
        }
        Ok(Interval { day, start, end })
    }

    pub fn duration_minutes(&self) -> i32 {
        time::minutes_between(self.start, self.end)
    }

    /// Same day and overlapping time ranges.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.day == other.day && time::overlaps(self.start, self.end, other.start, other.end)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.day, self.start, self.end)
    }
}

#[derive(Deserialize)]
struct RawInterval {
    day: DayOfWeek,
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TryFrom<RawInterval> for Interval {
    type Error = SlotError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        Interval::new(raw.day, raw.start, raw.end)
    }
}

/// The intervals a subscription asks for, in request order. Intervals need not
/// be unit-aligned.
pub type ScheduleRequest = Vec<Interval>;

/// A committed booking against one teacher.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawReservation")]
pub struct Reservation {
    pub owner: OwnerId,
    pub day: DayOfWeek,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Reservation {
    pub fn new(owner: OwnerId, interval: Interval) -> Self {
        Reservation {
            owner,
            day: interval.day,
            start: interval.start,
            end: interval.end,
        }
    }

    pub fn interval(&self) -> Interval {
        Interval {
            day: self.day,
            start: self.start,
            end: self.end,
        }
    }
}

#[derive(Deserialize)]
struct RawReservation {
    owner: OwnerId,
    day: DayOfWeek,
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TryFrom<RawReservation> for Reservation {
    type Error = SlotError;

    fn try_from(raw: RawReservation) -> Result<Self> {
        let interval = Interval::new(raw.day, raw.start, raw.end)?;
        Ok(Reservation::new(raw.owner, interval))
    }
}

/// Snapshot of a teacher's committed reservations, as fetched at the start of
/// one workflow run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationSet {
    reservations: Vec<Reservation>,
}

impl ReservationSet {
    pub fn new(reservations: Vec<Reservation>) -> Self {
        ReservationSet { reservations }
    }

    pub fn as_slice(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reservation> {
        self.reservations.iter()
    }

    pub fn on_day(&self, day: DayOfWeek) -> impl Iterator<Item = &Reservation> {
        self.reservations.iter().filter(move |r| r.day == day)
    }

    pub fn owned_by<'a>(&'a self, owner: &'a OwnerId) -> impl Iterator<Item = &'a Reservation> {
        self.reservations.iter().filter(move |r| &r.owner == owner)
    }
}

impl From<Vec<Reservation>> for ReservationSet {
    fn from(reservations: Vec<Reservation>) -> Self {
        ReservationSet::new(reservations)
    }
}
