//! Operator-side toggle set of replacement units picked before confirming.

use std::collections::BTreeSet;

use crate::reservation::Interval;

/// Selected units keyed by their `(day, start, end)` identity.
///
/// Toggling the same unit twice leaves the session as it was; a key is never
/// held twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSession {
    selected: BTreeSet<Interval>,
}

impl SelectionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `unit` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, unit: Interval) -> bool {
        if self.selected.remove(&unit) {
            false
        } else {
            self.selected.insert(unit)
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, unit: &Interval) -> bool {
        self.selected.contains(unit)
    }

    /// Selected units in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.selected.iter()
    }
}
