//! Quantize availability windows into fixed-length bookable units.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::availability::{AvailabilityIndex, WeeklySlot};
use crate::conflict;
use crate::reservation::{Interval, OwnerId, Reservation};
use crate::time::{DayOfWeek, TimeOfDay};

/// Default unit length in minutes.
pub const DEFAULT_UNIT_MINUTES: u16 = 60;

/// A fixed-length piece of a weekly slot offered for selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BookableUnit {
    pub day: DayOfWeek,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    /// Held by an owner other than the one the units were generated for.
    pub reserved: bool,
}

impl BookableUnit {
    /// The unit's identity, used as its selection key.
    pub fn interval(&self) -> Interval {
        Interval {
            day: self.day,
            start: self.start,
            end: self.end,
        }
    }
}

/// Units grouped per day, iterated in canonical day order.
pub type UnitsByDay = BTreeMap<DayOfWeek, Vec<BookableUnit>>;

/// Slice `slot` into back-to-back `unit_minutes` units starting at `slot.start`.
///
/// A trailing remainder shorter than one unit is dropped. Each unit is marked
/// `reserved` when it overlaps a reservation owned by someone other than
/// `owner`. A zero `unit_minutes` yields no units.
pub fn generate_units(
    slot: &WeeklySlot,
    unit_minutes: u16,
    reservations: &[Reservation],
    owner: &OwnerId,
) -> Vec<BookableUnit> {
    let mut units = Vec::new();
    if unit_minutes == 0 {
        return units;
    }

    let mut cursor = slot.start;
    while let Some(end) = cursor.checked_add(unit_minutes) {
        if end > slot.end {
            break;
        }
        let interval = Interval {
            day: slot.day,
            start: cursor,
            end,
        };
        units.push(BookableUnit {
            day: slot.day,
            start: cursor,
            end,
            reserved: conflict::check_one(&interval, reservations, owner),
        });
        cursor = end;
    }

    units
}

/// Units for every enabled slot on `day`, in chronological order.
///
/// Overlapping slots can produce the same unit twice; only one copy is kept.
pub fn generate_day_units(
    index: &AvailabilityIndex,
    day: DayOfWeek,
    unit_minutes: u16,
    reservations: &[Reservation],
    owner: &OwnerId,
) -> Vec<BookableUnit> {
    let mut units: Vec<BookableUnit> = index
        .active_slots_for(day)
        .iter()
        .flat_map(|slot| generate_units(slot, unit_minutes, reservations, owner))
        .collect();

    units.sort_by_key(|u| (u.start, u.end));
    units.dedup_by_key(|u| (u.start, u.end));
    units
}

/// Units for every day with enabled slots, keyed in canonical day order.
pub fn generate_week_units(
    index: &AvailabilityIndex,
    unit_minutes: u16,
    reservations: &[Reservation],
    owner: &OwnerId,
) -> UnitsByDay {
    let week: UnitsByDay = index
        .active_days()
        .into_iter()
        .map(|day| {
            (
                day,
                generate_day_units(index, day, unit_minutes, reservations, owner),
            )
        })
        .filter(|(_, units)| !units.is_empty())
        .collect();

    debug!(
        %owner,
        unit_minutes,
        days = week.len(),
        units = week.values().map(Vec::len).sum::<usize>(),
        "generated bookable units"
    );

    week
}
