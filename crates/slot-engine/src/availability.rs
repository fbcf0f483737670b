//! A teacher's recurring weekly availability.
//!
//! The index only filters and orders what the teacher-management side hands
//! over. Overlapping enabled slots on the same day are passed through unchanged.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::reservation::{Interval, OwnerId, Reservation};
use crate::time::{self, DayOfWeek, TimeOfDay};

/// One contiguous window during which a teacher is generally available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWeeklySlot")]
pub struct WeeklySlot {
    pub day: DayOfWeek,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub enabled: bool,
}

impl WeeklySlot {
    /// # Errors
    /// Returns `SlotError::InvalidInterval` unless `end > start`.
    pub fn new(day: DayOfWeek, start: TimeOfDay, end: TimeOfDay, enabled: bool) -> Result<Self> {
        if end <= start {
            return Err(SlotError::InvalidInterval { start, end });
        }
        Ok(WeeklySlot {
            day,
            start,
            end,
            enabled,
        })
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
struct RawWeeklySlot {
    day: DayOfWeek,
    start: TimeOfDay,
    end: TimeOfDay,
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl TryFrom<RawWeeklySlot> for WeeklySlot {
    type Error = SlotError;

    fn try_from(raw: RawWeeklySlot) -> Result<Self> {
        WeeklySlot::new(raw.day, raw.start, raw.end, raw.enabled)
    }
}

/// A free gap inside an enabled slot, after removing other owners' reservations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreeWindow {
    pub day: DayOfWeek,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub duration_minutes: i32,
}

/// Read-only index over one teacher's weekly slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityIndex {
    slots: Vec<WeeklySlot>,
}

impl AvailabilityIndex {
    pub fn new(slots: Vec<WeeklySlot>) -> Self {
        AvailabilityIndex { slots }
    }

    pub fn slots(&self) -> &[WeeklySlot] {
        &self.slots
    }

    /// Enabled slots on `day`, in input order.
    pub fn active_slots_for(&self, day: DayOfWeek) -> Vec<WeeklySlot> {
        self.slots
            .iter()
            .filter(|s| s.enabled && s.day == day)
            .copied()
            .collect()
    }

    /// Days that have at least one enabled slot, in canonical order.
    pub fn active_days(&self) -> Vec<DayOfWeek> {
        DayOfWeek::ALL
            .into_iter()
            .filter(|day| self.slots.iter().any(|s| s.enabled && s.day == *day))
            .collect()
    }

    /// Free gaps inside each enabled slot on `day`, once reservations held by
    /// anyone other than `owner` are carved out.
    ///
    /// Windows are reported per slot in input order; within a slot they are
    /// sorted by start.
    pub fn free_windows(
        &self,
        day: DayOfWeek,
        reservations: &[Reservation],
        owner: &OwnerId,
    ) -> Vec<FreeWindow> {
        let mut windows = Vec::new();

        for slot in self.active_slots_for(day) {
            let busy = merge_busy_periods(reservations, &slot, owner);
            let mut cursor = slot.start;

            for (busy_start, busy_end) in busy {
                if cursor < busy_start {
                    windows.push(free_window(day, cursor, busy_start));
                }
                cursor = cursor.max(busy_end);
            }

            if cursor < slot.end {
                windows.push(free_window(day, cursor, slot.end));
            }
        }

        windows
    }
}

fn free_window(day: DayOfWeek, start: TimeOfDay, end: TimeOfDay) -> FreeWindow {
    FreeWindow {
        day,
        start,
        end,
        duration_minutes: time::minutes_between(start, end),
    }
}

/// Foreign reservations clipped to `slot`, merged into a sorted,
/// non-overlapping list.
fn merge_busy_periods(
    reservations: &[Reservation],
    slot: &WeeklySlot,
    owner: &OwnerId,
) -> Vec<(TimeOfDay, TimeOfDay)> {
    let mut intervals: Vec<(TimeOfDay, TimeOfDay)> = reservations
        .iter()
        .filter(|r| r.day == slot.day && &r.owner != owner)
        .filter(|r| time::overlaps(r.start, r.end, slot.start, slot.end))
        .map(|r| (r.start.max(slot.start), r.end.min(slot.end)))
        .collect();

    intervals.sort();

    let mut merged: Vec<(TimeOfDay, TimeOfDay)> = Vec::new();
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    merged
}
