//! Error types for slot-engine operations.
//!
//! Detected booking conflicts are reported as data (see [`crate::conflict`]);
//! only malformed input, illegal workflow moves, and collaborator failures
//! surface here.

use thiserror::Error;

use crate::reservation::Interval;
use crate::time::TimeOfDay;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    /// A clock string or day name could not be parsed.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid interval: end {end} must be after start {start}")]
    InvalidInterval { start: TimeOfDay, end: TimeOfDay },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Fewer replacement units were picked than intervals originally requested.
    #[error("Insufficient selection: {selected} unit(s) selected, {required} required")]
    InsufficientSelection { required: usize, selected: usize },

    /// A commit-time re-check found intervals now held by another owner.
    #[error("Stale conflict: {} interval(s) are now reserved by another owner", conflicting.len())]
    StaleConflict { conflicting: Vec<Interval> },

    #[error("Unit {0} is not one of the offered units")]
    UnknownUnit(Interval),

    #[error("Cannot {action} while workflow is {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
