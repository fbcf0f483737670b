//! The acceptance workflow for a subscription request.
//!
//! ```text
//! Checking ──► Available ──────────────────► Committed
//!    │                                          ▲
//!    └──────► Conflict ──► Reselecting ─────────┘
//!                ▲              │
//!                └── Checking ◄─┘  (pick collides, or commit was stale)
//!
//! any non-terminal state ──► Cancelled
//! ```
//!
//! Only `Checking` runs [`conflict::check_all`]. Picks made while reselecting
//! are re-checked against a fresh reservation fetch before they are handed to
//! the backend, and the backend re-checks them again atomically. A rejected
//! commit passes back through `Checking` so the report matches the refreshed
//! reservations, and always lands in `Conflict`.

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::availability::AvailabilityIndex;
use crate::backend::{AcceptanceDecision, BookingBackend, DecisionPath};
use crate::config::EngineConfig;
use crate::conflict::{self, Conflict, ConflictReport};
use crate::error::{Result, SlotError};
use crate::reservation::{Interval, OwnerId, Reservation, ReservationSet, TeacherId};
use crate::session::SelectionSession;
use crate::units::{self, UnitsByDay};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    Checking,
    Available,
    Conflict,
    Reselecting,
    Committed,
    Cancelled,
}

impl WorkflowState {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowState::Checking => "checking",
            WorkflowState::Available => "available",
            WorkflowState::Conflict => "conflict",
            WorkflowState::Reselecting => "reselecting",
            WorkflowState::Committed => "committed",
            WorkflowState::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, WorkflowState::Committed | WorkflowState::Cancelled)
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One run of the accept-a-subscription decision for a single teacher.
///
/// Slots and reservations are fetched once at [`AcceptanceWorkflow::start`]
/// and refreshed only when a commit or confirmation finds them stale.
pub struct AcceptanceWorkflow<'a, B: BookingBackend + ?Sized> {
    backend: &'a B,
    teacher: TeacherId,
    owner: OwnerId,
    request: Vec<Interval>,
    config: EngineConfig,
    state: WorkflowState,
    availability: AvailabilityIndex,
    reservations: ReservationSet,
    report: ConflictReport,
    units: UnitsByDay,
    selection: SelectionSession,
}

impl<'a, B: BookingBackend + ?Sized> AcceptanceWorkflow<'a, B> {
    /// Fetch the teacher's data and classify `request`.
    ///
    /// The returned workflow is in `Available` or `Conflict`.
    ///
    /// # Errors
    /// `SlotError::InvalidConfig` for a bad config, `SlotError::InvalidFormat`
    /// for an empty request, and any collaborator failure from the fetches. No
    /// workflow exists after an error, which is the cancelled outcome.
    pub fn start(
        backend: &'a B,
        teacher: TeacherId,
        owner: OwnerId,
        request: Vec<Interval>,
        config: EngineConfig,
    ) -> Result<Self> {
        let config = config.validate()?;
        if request.is_empty() {
            return Err(SlotError::InvalidFormat(
                "schedule request has no intervals".to_string(),
            ));
        }

        let fetched = backend
            .fetch_weekly_slots(&teacher)
            .and_then(|slots| Ok((slots, backend.fetch_reservations(&teacher)?)));
        let (slots, reservations) = match fetched {
            Ok(data) => data,
            Err(e) => {
                warn!(%teacher, %owner, error = %e, "workflow cancelled before checking");
                return Err(e);
            }
        };

        let mut workflow = AcceptanceWorkflow {
            backend,
            teacher,
            owner,
            request,
            config,
            state: WorkflowState::Checking,
            availability: AvailabilityIndex::new(slots),
            reservations: ReservationSet::new(reservations),
            report: ConflictReport::default(),
            units: UnitsByDay::new(),
            selection: SelectionSession::new(),
        };
        workflow.check();
        Ok(workflow)
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn teacher(&self) -> &TeacherId {
        &self.teacher
    }

    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    pub fn request(&self) -> &[Interval] {
        &self.request
    }

    /// The verdict from the latest pass through `Checking`.
    pub fn report(&self) -> &ConflictReport {
        &self.report
    }

    pub fn availability(&self) -> &AvailabilityIndex {
        &self.availability
    }

    /// The reservation snapshot currently in use.
    pub fn reservations(&self) -> &ReservationSet {
        &self.reservations
    }

    /// Units offered while reselecting; empty in every other state.
    pub fn units(&self) -> &UnitsByDay {
        &self.units
    }

    pub fn selection(&self) -> &SelectionSession {
        &self.selection
    }

    /// Each requested interval paired with the reservations it collides with.
    pub fn conflict_details(&self) -> Vec<Conflict> {
        conflict::find_conflicts(&self.request, self.reservations.as_slice(), &self.owner)
    }

    /// Accept the request verbatim. Only legal from `Available`.
    pub fn accept(&mut self) -> Result<AcceptanceDecision> {
        self.require(WorkflowState::Available, "accept")?;

        let final_slots = self
            .request
            .iter()
            .map(|i| Reservation::new(self.owner.clone(), *i))
            .collect();
        self.commit(final_slots, DecisionPath::Direct)
    }

    /// Offer replacement units from the current snapshot. Only legal from `Conflict`.
    pub fn begin_reselect(&mut self) -> Result<&UnitsByDay> {
        self.require(WorkflowState::Conflict, "reselect")?;

        self.units = units::generate_week_units(
            &self.availability,
            self.config.unit_minutes,
            self.reservations.as_slice(),
            &self.owner,
        );
        self.selection.clear();
        self.transition(WorkflowState::Reselecting);
        Ok(&self.units)
    }

    /// Toggle one offered unit. Returns whether it is now selected.
    pub fn toggle_unit(&mut self, unit: Interval) -> Result<bool> {
        self.require(WorkflowState::Reselecting, "toggle a unit")?;

        let offered = self
            .units
            .get(&unit.day)
            .is_some_and(|day| day.iter().any(|u| u.interval() == unit));
        if !offered {
            return Err(SlotError::UnknownUnit(unit));
        }
        Ok(self.selection.toggle(unit))
    }

    pub fn clear_selection(&mut self) -> Result<()> {
        self.require(WorkflowState::Reselecting, "clear the selection")?;
        self.selection.clear();
        Ok(())
    }

    /// Commit the picked units. Only legal from `Reselecting`.
    ///
    /// # Errors
    /// - `InsufficientSelection` when fewer units are picked than were
    ///   requested; the workflow stays in `Reselecting`.
    /// - `StaleConflict` when a pick is now reserved by another owner; the
    ///   workflow returns to `Conflict` with refreshed reservations.
    /// - Collaborator failures cancel the workflow.
    pub fn confirm_selection(&mut self) -> Result<AcceptanceDecision> {
        self.require(WorkflowState::Reselecting, "confirm a selection")?;

        let required = self.request.len();
        let selected = self.selection.count();
        if selected < required {
            return Err(SlotError::InsufficientSelection { required, selected });
        }

        self.refresh_reservations()?;

        let conflicting: Vec<Interval> = self
            .selection
            .iter()
            .filter(|u| conflict::check_one(u, self.reservations.as_slice(), &self.owner))
            .copied()
            .collect();
        if !conflicting.is_empty() {
            warn!(
                teacher = %self.teacher,
                owner = %self.owner,
                conflicting = conflicting.len(),
                "selected units are no longer free"
            );
            self.back_to_conflict();
            return Err(SlotError::StaleConflict { conflicting });
        }

        let final_slots = self
            .selection
            .iter()
            .map(|i| Reservation::new(self.owner.clone(), *i))
            .collect();
        self.commit(final_slots, DecisionPath::Reselected)
    }

    /// Abandon the workflow. Legal from any non-terminal state.
    pub fn cancel(&mut self) -> Result<()> {
        if self.state.is_terminal() {
            return Err(self.illegal("cancel"));
        }
        self.transition(WorkflowState::Cancelled);
        Ok(())
    }

    fn check(&mut self) {
        self.classify();
        let next = if self.report.is_clear() {
            WorkflowState::Available
        } else {
            WorkflowState::Conflict
        };
        self.transition(next);
    }

    fn commit(
        &mut self,
        final_slots: Vec<Reservation>,
        path: DecisionPath,
    ) -> Result<AcceptanceDecision> {
        let decision = AcceptanceDecision {
            teacher_id: self.teacher.clone(),
            owner_id: self.owner.clone(),
            final_slots,
            path,
        };

        match self.backend.commit_decision(&decision) {
            Ok(()) => {
                self.transition(WorkflowState::Committed);
                Ok(decision)
            }
            Err(SlotError::StaleConflict { conflicting }) => {
                warn!(
                    teacher = %self.teacher,
                    owner = %self.owner,
                    conflicting = conflicting.len(),
                    "commit rejected as stale"
                );
                self.refresh_reservations()?;
                self.back_to_conflict();
                Err(SlotError::StaleConflict { conflicting })
            }
            Err(e) => {
                warn!(teacher = %self.teacher, owner = %self.owner, error = %e, "commit failed");
                self.transition(WorkflowState::Cancelled);
                Err(e)
            }
        }
    }

    /// Replace the snapshot with a fresh fetch. A failed fetch cancels.
    fn refresh_reservations(&mut self) -> Result<()> {
        match self.backend.fetch_reservations(&self.teacher) {
            Ok(fresh) => {
                self.reservations = ReservationSet::new(fresh);
                Ok(())
            }
            Err(e) => {
                warn!(teacher = %self.teacher, owner = %self.owner, error = %e, "reservation refresh failed");
                self.transition(WorkflowState::Cancelled);
                Err(e)
            }
        }
    }

    fn classify(&mut self) {
        debug_assert_eq!(self.state, WorkflowState::Checking);

        self.report =
            conflict::check_all(&self.request, self.reservations.as_slice(), &self.owner);
    }

    /// Reclassify against the current snapshot, then settle in `Conflict`.
    fn back_to_conflict(&mut self) {
        self.units.clear();
        self.selection.clear();
        self.transition(WorkflowState::Checking);
        self.classify();
        self.transition(WorkflowState::Conflict);
    }

    fn require(&self, expected: WorkflowState, action: &'static str) -> Result<()> {
        if self.state != expected {
            return Err(self.illegal(action));
        }
        Ok(())
    }

    fn illegal(&self, action: &'static str) -> SlotError {
        SlotError::InvalidTransition {
            state: self.state.as_str(),
            action,
        }
    }

    fn transition(&mut self, next: WorkflowState) {
        info!(
            teacher = %self.teacher,
            owner = %self.owner,
            from = self.state.as_str(),
            to = next.as_str(),
            "workflow transition"
        );
        self.state = next;
    }
}
