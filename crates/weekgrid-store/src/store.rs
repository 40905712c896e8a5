//! Day-indexed sub-event storage with change detection.
//!
//! This module provides [`DayStore`], the mapping from a calendar day to the
//! sub-events active on it. Entries are keyed by event id within each day,
//! which guards against duplicate insertion from repeated submissions and
//! makes replacement idempotent.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use weekgrid_core::{DayKey, EventRecord};

/// Mapping from day to the sub-events stored for it.
///
/// Days iterate chronologically and each day's entries iterate in id order,
/// so query results are stable for a given store state. All mutation goes
/// through `&mut self`: callers that share a store across threads must
/// serialize writers themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayStore {
    days: BTreeMap<DayKey, BTreeMap<String, EventRecord>>,
}

impl DayStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            days: BTreeMap::new(),
        }
    }

    /// Inserts or replaces the entry for `event.id` under `day`.
    ///
    /// Replacing an entry with a value-equal record is a no-op. Returns true
    /// when the day's contents changed.
    pub fn insert(&mut self, day: DayKey, event: EventRecord) -> bool {
        let bucket = self.days.entry(day).or_default();
        match bucket.get(&event.id) {
            Some(stored) if *stored == event => {
                trace!(day = %day, id = %event.id, "sub-event unchanged");
                false
            }
            _ => {
                debug!(day = %day, id = %event.id, "storing sub-event");
                bucket.insert(event.id.clone(), event);
                true
            }
        }
    }

    /// Returns true iff the store has no entry for `event.id` under `day`,
    /// or the stored entry differs by value from `event`.
    ///
    /// This is the predicate downstream layout uses to decide whether a
    /// day's cached geometry must be recomputed.
    pub fn needs_update(&self, event: &EventRecord, day: DayKey) -> bool {
        self.days
            .get(&day)
            .and_then(|bucket| bucket.get(&event.id))
            .is_none_or(|stored| stored != event)
    }

    /// Removes the entry for `id` under `day`, if present.
    pub fn remove(&mut self, day: DayKey, id: &str) -> Option<EventRecord> {
        let bucket = self.days.get_mut(&day)?;
        let removed = bucket.remove(id);
        if bucket.is_empty() {
            self.days.remove(&day);
        }
        if removed.is_some() {
            debug!(day = %day, id = %id, "removed sub-event");
        }
        removed
    }

    /// Returns the stored entry for `id` under `day`.
    pub fn get(&self, day: DayKey, id: &str) -> Option<&EventRecord> {
        self.days.get(&day).and_then(|bucket| bucket.get(id))
    }

    /// Returns the sub-events stored for `day`, in id order.
    pub fn events_on(&self, day: DayKey) -> impl Iterator<Item = &EventRecord> {
        self.days.get(&day).into_iter().flat_map(|bucket| bucket.values())
    }

    /// Returns the days that currently hold at least one sub-event,
    /// chronologically.
    pub fn days(&self) -> impl Iterator<Item = DayKey> {
        self.days.keys().copied()
    }

    /// Returns the distinct event ids present anywhere in the store.
    pub fn ids(&self) -> BTreeSet<&str> {
        self.days
            .values()
            .flat_map(|bucket| bucket.keys())
            .map(String::as_str)
            .collect()
    }

    /// Returns the number of days holding at least one sub-event.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns the total number of stored sub-events across all days.
    pub fn total_events(&self) -> usize {
        self.days.values().map(BTreeMap::len).sum()
    }

    /// Returns true if the store holds no sub-events.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        let count = self.days.len();
        self.days.clear();
        debug!(days = count, "cleared store");
    }

    /// Drops every day for which `keep` returns false; returns the dropped
    /// days.
    pub fn retain_days(&mut self, mut keep: impl FnMut(DayKey) -> bool) -> Vec<DayKey> {
        let mut dropped = Vec::new();
        self.days.retain(|day, _| {
            if keep(*day) {
                true
            } else {
                trace!(day = %day, "dropping day");
                dropped.push(*day);
                false
            }
        });
        if !dropped.is_empty() {
            debug!(dropped = dropped.len(), "pruned days");
        }
        dropped
    }
}
