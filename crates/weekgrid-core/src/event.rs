//! Event value types.
//!
//! This module provides [`EventRecord`], the immutable description of one
//! calendar event, and [`EventColor`], the opaque color token that travels
//! with it.

use std::fmt;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::day::DayKey;

/// Opaque color token attached to an event.
///
/// The engine never interprets or validates the value; it is carried through
/// decomposition and storage for the rendering layer to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventColor(String);

impl EventColor {
    /// Creates a color token from any string value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventColor {
    fn default() -> Self {
        Self("#1a73e8".to_string())
    }
}

impl fmt::Display for EventColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventColor {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EventColor {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One calendar event, possibly spanning multiple days.
///
/// Records are immutable value objects. Construction normalizes reversed
/// bounds: a record built with `start > end` becomes a zero-length event at
/// `start`, never an error.
///
/// Equality is value equality over `(id, start, end, title, location,
/// all_day, color)`. The `show_time_range` flag is a display hint and is
/// excluded, so toggling it never reads as a schedule change. Two records
/// with equal ids but different time bounds are not equal, which lets a
/// store distinguish "same logical event, changed schedule" from
/// "identical".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Stable identifier; preserved across decomposition into sub-events.
    pub id: String,
    /// The event title.
    pub title: String,
    /// When the event starts.
    pub start: DateTime<Utc>,
    /// When the event ends. Never precedes `start`.
    pub end: DateTime<Utc>,
    /// The event location; empty when absent.
    pub location: String,
    /// Opaque color token for the rendering layer.
    pub color: EventColor,
    /// Whether the event occupies full days rather than a time-of-day range.
    pub all_day: bool,
    /// Whether the rendering layer should display the time range.
    pub show_time_range: bool,
}

impl EventRecord {
    /// Creates a record with the given identity and bounds.
    ///
    /// Reversed bounds are normalized to a zero-length event at `start`.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        let end = if end < start { start } else { end };
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            location: String::new(),
            color: EventColor::default(),
            all_day: false,
            show_time_range: false,
        }
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Builder method to set the color token.
    pub fn with_color(mut self, color: impl Into<EventColor>) -> Self {
        self.color = color.into();
        self
    }

    /// Builder method to mark the event as all-day.
    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    /// Builder method to set the time-range display hint.
    pub fn with_show_time_range(mut self, show: bool) -> Self {
        self.show_time_range = show;
        self
    }

    /// Re-derives this record with new bounds and every other field
    /// (including the `id`) preserved.
    ///
    /// Reversed bounds are normalized the same way as in [`EventRecord::new`].
    pub fn with_bounds(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let end = if end < start { start } else { end };
        Self {
            start,
            end,
            ..self.clone()
        }
    }

    /// Returns the duration of the event.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns true if the event has identical start and end instants.
    pub fn is_zero_length(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if start and end fall on different calendar days in the
    /// given timezone.
    pub fn spans_multiple_days<Tz: TimeZone>(&self, tz: &Tz) -> bool {
        DayKey::from_instant(self.start, tz) != DayKey::from_instant(self.end, tz)
    }
}

impl PartialEq for EventRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.start == other.start
            && self.end == other.end
            && self.title == other.title
            && self.location == other.location
            && self.all_day == other.all_day
            && self.color == other.color
    }
}

impl Eq for EventRecord {}
