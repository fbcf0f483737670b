//! Collaborator contract for fetching teacher data and committing decisions,
//! plus a thread-safe in-memory implementation.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::availability::WeeklySlot;
use crate::conflict;
use crate::error::{Result, SlotError};
use crate::reservation::{Interval, OwnerId, Reservation, TeacherId};

/// How the final slots of a decision were chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionPath {
    /// The requested schedule was fully available and accepted verbatim.
    Direct,
    /// The operator picked replacement units after a conflict.
    Reselected,
}

/// The terminal artifact of an acceptance workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptanceDecision {
    pub teacher_id: TeacherId,
    pub owner_id: OwnerId,
    pub final_slots: Vec<Reservation>,
    pub path: DecisionPath,
}

impl AcceptanceDecision {
    pub fn intervals(&self) -> Vec<Interval> {
        self.final_slots.iter().map(Reservation::interval).collect()
    }
}

/// External systems the acceptance workflow reads from and commits to.
pub trait BookingBackend {
    /// # Errors
    /// `SlotError::NotFound` for an unknown teacher, `SlotError::Unavailable`
    /// when the source cannot be reached.
    fn fetch_weekly_slots(&self, teacher: &TeacherId) -> Result<Vec<WeeklySlot>>;

    /// A point-in-time snapshot; callers expect it to go stale.
    fn fetch_reservations(&self, teacher: &TeacherId) -> Result<Vec<Reservation>>;

    /// Commit atomically with respect to other commits for the same teacher.
    ///
    /// # Errors
    /// `SlotError::StaleConflict` when any final slot now overlaps a reservation
    /// held by another owner; nothing is written in that case.
    fn commit_decision(&self, decision: &AcceptanceDecision) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
struct TeacherCalendar {
    slots: Vec<WeeklySlot>,
    reservations: Vec<Reservation>,
}

/// In-process [`BookingBackend`] holding every teacher behind one lock.
///
/// A committed decision replaces the owner's previous reservations for that
/// teacher.
#[derive(Debug, Default)]
pub struct InMemoryCalendar {
    teachers: Mutex<HashMap<TeacherId, TeacherCalendar>>,
}

impl InMemoryCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a teacher's slots and reservations.
    pub fn insert_teacher(
        &self,
        teacher: TeacherId,
        slots: Vec<WeeklySlot>,
        reservations: Vec<Reservation>,
    ) -> Result<()> {
        self.lock()?.insert(
            teacher,
            TeacherCalendar {
                slots,
                reservations,
            },
        );
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<TeacherId, TeacherCalendar>>> {
        self.teachers
            .lock()
            .map_err(|_| SlotError::Unavailable("calendar lock poisoned".to_string()))
    }
}

fn not_found(teacher: &TeacherId) -> SlotError {
    SlotError::NotFound(format!("teacher {}", teacher))
}

impl BookingBackend for InMemoryCalendar {
    fn fetch_weekly_slots(&self, teacher: &TeacherId) -> Result<Vec<WeeklySlot>> {
        self.lock()?
            .get(teacher)
            .map(|cal| cal.slots.clone())
            .ok_or_else(|| not_found(teacher))
    }

    fn fetch_reservations(&self, teacher: &TeacherId) -> Result<Vec<Reservation>> {
        self.lock()?
            .get(teacher)
            .map(|cal| cal.reservations.clone())
            .ok_or_else(|| not_found(teacher))
    }

    fn commit_decision(&self, decision: &AcceptanceDecision) -> Result<()> {
        let mut teachers = self.lock()?;
        let cal = teachers
            .get_mut(&decision.teacher_id)
            .ok_or_else(|| not_found(&decision.teacher_id))?;

        let conflicting: Vec<Interval> = decision
            .intervals()
            .into_iter()
            .filter(|i| conflict::check_one(i, &cal.reservations, &decision.owner_id))
            .collect();

        if !conflicting.is_empty() {
            warn!(
                teacher = %decision.teacher_id,
                owner = %decision.owner_id,
                conflicting = conflicting.len(),
                "rejected stale commit"
            );
            return Err(SlotError::StaleConflict { conflicting });
        }

        cal.reservations.retain(|r| r.owner != decision.owner_id);
        cal.reservations.extend(decision.final_slots.iter().cloned());

        info!(
            teacher = %decision.teacher_id,
            owner = %decision.owner_id,
            slots = decision.final_slots.len(),
            "committed decision"
        );
        Ok(())
    }
}
