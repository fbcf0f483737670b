//! # slot-engine
//!
//! Teacher availability matching and booking-conflict resolution for weekly
//! lesson schedules.
//!
//! Given a teacher's recurring weekly slots and the reservations already
//! committed against them, the engine decides whether a subscription's
//! requested schedule can be accepted as-is, offers fixed-length replacement
//! units when it cannot, and hands the final schedule to a backend that
//! commits it without double-booking the teacher.
//!
//! ## Quick start
//!
//! ```rust
//! use slot_engine::{
//!     check_all, generate_units, parse_clock, DayOfWeek, Interval, OwnerId, Reservation,
//!     WeeklySlot,
//! };
//!
//! let t = |s: &str| parse_clock(s).unwrap();
//! let slot = WeeklySlot::new(DayOfWeek::Monday, t("9:00"), t("12:00"), true).unwrap();
//! let taken = Reservation::new(
//!     OwnerId::from("group-b"),
//!     Interval::new(DayOfWeek::Monday, t("10:00"), t("11:00")).unwrap(),
//! );
//! let owner = OwnerId::from("group-a");
//!
//! let wanted = Interval::new(DayOfWeek::Monday, t("10:00"), t("11:00")).unwrap();
//! let report = check_all(&[wanted], &[taken.clone()], &owner);
//! assert_eq!(report.conflicting, vec![wanted]);
//!
//! let units = generate_units(&slot, 60, &[taken], &owner);
//! let reserved: Vec<bool> = units.iter().map(|u| u.reserved).collect();
//! assert_eq!(reserved, vec![false, true, false]);
//! ```
//!
//! ## Modules
//!
//! - [`time`] — clock parsing/formatting, weekdays, interval overlap
//! - [`availability`] — weekly slots and free windows
//! - [`reservation`] — requested intervals, reservations, owner/teacher ids
//! - [`conflict`] — classify requested intervals against reservations
//! - [`units`] — fixed-length bookable units
//! - [`session`] — the operator's toggle set of picked units
//! - [`workflow`] — the acceptance state machine
//! - [`backend`] — collaborator trait and in-memory implementation
//! - [`config`] — engine configuration
//! - [`error`] — error types

pub mod availability;
pub mod backend;
pub mod config;
pub mod conflict;
pub mod error;
pub mod reservation;
pub mod session;
pub mod time;
pub mod units;
pub mod workflow;

pub use availability::{AvailabilityIndex, FreeWindow, WeeklySlot};
pub use backend::{AcceptanceDecision, BookingBackend, DecisionPath, InMemoryCalendar};
pub use config::EngineConfig;
pub use conflict::{check_all, check_one, find_conflicts, Conflict, ConflictReport};
pub use error::SlotError;
pub use reservation::{Interval, OwnerId, Reservation, ReservationSet, ScheduleRequest, TeacherId};
pub use session::SelectionSession;
pub use time::{
    format_clock_12h, format_clock_24h, minutes_between, overlaps, parse_clock, DayOfWeek,
    TimeOfDay,
};
pub use units::{generate_day_units, generate_units, generate_week_units, BookableUnit, UnitsByDay};
pub use workflow::{AcceptanceWorkflow, WorkflowState};
