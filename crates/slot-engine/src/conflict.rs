//! Classify requested intervals against a teacher's committed reservations.
//!
//! A requested interval conflicts when it overlaps, on the same day, a
//! reservation owned by someone other than the requester. A requester's own
//! reservations never block it. Adjacent intervals (one ends exactly when the
//! other starts) are NOT conflicts.

use serde::Serialize;
use tracing::debug;

use crate::reservation::{Interval, OwnerId, Reservation};
use crate::time;

/// Result of [`check_all`]: a disjoint partition of the requested intervals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConflictReport {
    /// Requested intervals with no foreign overlap, in request order.
    pub available: Vec<Interval>,
    /// Requested intervals overlapping at least one foreign reservation, in request order.
    pub conflicting: Vec<Interval>,
}

impl ConflictReport {
    pub fn is_clear(&self) -> bool {
        self.conflicting.is_empty()
    }
}

/// A requested interval paired with one reservation it collides with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conflict {
    pub requested: Interval,
    pub reservation: Reservation,
    pub overlap_minutes: i32,
}

/// Reservations that can block `owner` on the candidate's day.
fn foreign_on_day<'a>(
    candidate: &'a Interval,
    reservations: &'a [Reservation],
    owner: &'a OwnerId,
) -> impl Iterator<Item = &'a Reservation> {
    reservations
        .iter()
        .filter(move |r| r.day == candidate.day && &r.owner != owner)
}

/// Whether `candidate` is already reserved by a different owner.
pub fn check_one(candidate: &Interval, reservations: &[Reservation], owner: &OwnerId) -> bool {
    foreign_on_day(candidate, reservations, owner)
        .any(|r| time::overlaps(candidate.start, candidate.end, r.start, r.end))
}

/// Partition `requested` into available and conflicting intervals for `owner`.
///
/// Every requested interval lands in exactly one list and request order is kept.
pub fn check_all(
    requested: &[Interval],
    reservations: &[Reservation],
    owner: &OwnerId,
) -> ConflictReport {
    let (conflicting, available): (Vec<Interval>, Vec<Interval>) = requested
        .iter()
        .copied()
        .partition(|interval| check_one(interval, reservations, owner));

    debug!(
        %owner,
        requested = requested.len(),
        conflicting = conflicting.len(),
        "checked requested schedule"
    );

    ConflictReport {
        available,
        conflicting,
    }
}

/// Every (requested, foreign reservation) pair that overlaps, with the overlap
/// length, in request order then reservation order.
///
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn find_conflicts(
    requested: &[Interval],
    reservations: &[Reservation],
    owner: &OwnerId,
) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for interval in requested {
        for r in foreign_on_day(interval, reservations, owner) {
            if time::overlaps(interval.start, interval.end, r.start, r.end) {
                let overlap_start = interval.start.max(r.start);
                let overlap_end = interval.end.min(r.end);

                conflicts.push(Conflict {
                    requested: *interval,
                    reservation: r.clone(),
                    overlap_minutes: time::minutes_between(overlap_start, overlap_end),
                });
            }
        }
    }

    conflicts
}
