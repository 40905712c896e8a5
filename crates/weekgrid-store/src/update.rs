//! Change-driven application of decomposition output.
//!
//! [`EventIndex`] keeps a [`DayStore`] in sync with the records a calendar
//! data source supplies. Every mutation reports the set of days whose stored
//! contents actually changed, so the rendering layer only recomputes layout
//! where something is different.

use std::collections::BTreeSet;

use chrono::TimeZone;
use serde::{Deserialize, Serialize};
use tracing::debug;
use weekgrid_core::{DayKey, DayRange, EventRecord, decompose};

use crate::store::DayStore;

/// Days whose stored contents changed during an operation.
///
/// An empty set means downstream caches are still valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    dirty: BTreeSet<DayKey>,
}

impl ChangeSet {
    /// Returns true if no day changed.
    pub fn is_empty(&self) -> bool {
        self.dirty.is_empty()
    }

    /// Returns the number of changed days.
    pub fn len(&self) -> usize {
        self.dirty.len()
    }

    /// Returns true if the given day changed.
    pub fn contains(&self, day: DayKey) -> bool {
        self.dirty.contains(&day)
    }

    /// Iterates the changed days chronologically.
    pub fn iter(&self) -> impl Iterator<Item = DayKey> {
        self.dirty.iter().copied()
    }

    /// Absorbs another change set.
    pub fn merge(&mut self, other: ChangeSet) {
        self.dirty.extend(other.dirty);
    }

    fn mark(&mut self, day: DayKey) {
        self.dirty.insert(day);
    }
}

impl IntoIterator for ChangeSet {
    type Item = DayKey;
    type IntoIter = std::collections::btree_set::IntoIter<DayKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.dirty.into_iter()
    }
}

/// Keeps a [`DayStore`] in sync with a stream of event records.
///
/// The index tolerates repeated submission of identical or updated records:
/// identical submissions are no-ops, updates replace stored sub-events and
/// clear the days a reschedule no longer touches. Callers must pass the same
/// timezone they render with, and must serialize writers; the `&mut self`
/// surface makes the single-writer discipline explicit.
#[derive(Debug, Clone, Default)]
pub struct EventIndex {
    store: DayStore,
}

impl EventIndex {
    /// Creates an index over an empty store.
    pub fn new() -> Self {
        Self {
            store: DayStore::new(),
        }
    }

    /// Returns the underlying store for queries.
    pub fn store(&self) -> &DayStore {
        &self.store
    }

    /// Decomposes `event` and merges the result into the store.
    ///
    /// Sub-events are written only where the stored value differs; days that
    /// held this event but are no longer covered by its span are cleaned up.
    pub fn apply<Tz: TimeZone>(&mut self, event: &EventRecord, tz: &Tz) -> ChangeSet {
        let mut changes = ChangeSet::default();
        let parts = decompose(event, tz);

        let stale: Vec<DayKey> = self
            .store
            .days()
            .filter(|d| !parts.contains_key(d) && self.store.get(*d, &event.id).is_some())
            .collect();
        for d in stale {
            self.store.remove(d, &event.id);
            changes.mark(d);
        }

        for (d, sub) in parts {
            if self.store.insert(d, sub) {
                changes.mark(d);
            }
        }

        if !changes.is_empty() {
            debug!(id = %event.id, dirty = changes.len(), "applied event");
        }
        changes
    }

    /// Removes the event with `id` from every day it appears on.
    pub fn retire(&mut self, id: &str) -> ChangeSet {
        let mut changes = ChangeSet::default();
        let held: Vec<DayKey> = self
            .store
            .days()
            .filter(|d| self.store.get(*d, id).is_some())
            .collect();
        for d in held {
            self.store.remove(d, id);
            changes.mark(d);
        }
        if !changes.is_empty() {
            debug!(id = %id, dirty = changes.len(), "retired event");
        }
        changes
    }

    /// Reconciles the store against a full snapshot of source events.
    ///
    /// Records in the snapshot are applied; ids present in the store but
    /// absent from the snapshot are retired. Submitting the same snapshot
    /// twice yields an empty change set.
    pub fn sync<Tz: TimeZone>(&mut self, events: &[EventRecord], tz: &Tz) -> ChangeSet {
        let mut changes = ChangeSet::default();

        let keep: BTreeSet<&str> = events.iter().map(|e| e.id.as_str()).collect();
        let gone: Vec<String> = self
            .store
            .ids()
            .into_iter()
            .filter(|id| !keep.contains(id))
            .map(str::to_owned)
            .collect();
        for id in gone {
            changes.merge(self.retire(&id));
        }

        for event in events {
            changes.merge(self.apply(event, tz));
        }
        changes
    }

    /// Drops every day outside the visible range.
    pub fn prune_outside(&mut self, range: &DayRange) -> ChangeSet {
        let mut changes = ChangeSet::default();
        for d in self.store.retain_days(|day| range.contains(day)) {
            changes.mark(d);
        }
        changes
    }

    /// Removes every stored sub-event.
    pub fn clear(&mut self) {
        self.store.clear();
    }
}
