//! Raw event payloads from a calendar data source.
//!
//! A data source supplies event descriptions with no ordering guarantee, no
//! deduplication guarantee, and loosely-typed fields: ids may be strings or
//! integers, times may be datetimes or bare dates, and most fields may be
//! missing. [`RawEvent`] models that shape as-is; normalization into a
//! [`weekgrid_core::EventRecord`] happens in [`crate::normalize`].

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Event identifier as supplied by a data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawEventId {
    /// String identifier.
    Text(String),
    /// Integer identifier; rendered in decimal when normalized.
    Number(i64),
}

impl fmt::Display for RawEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for RawEventId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for RawEventId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// A start or end bound as supplied: a datetime, or a bare date for all-day
/// events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawEventTime {
    /// A specific instant in UTC.
    DateTime(DateTime<Utc>),
    /// A date without a time of day.
    Date(NaiveDate),
}

impl RawEventTime {
    /// Creates a bound from a UTC datetime.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }

    /// Creates a date-only bound.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::Date(date)
    }

    /// Returns true if this bound is date-only.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Resolves the bound to an instant. Date-only bounds resolve to
    /// midnight UTC.
    pub fn to_instant(&self) -> DateTime<Utc> {
        match self {
            Self::DateTime(dt) => *dt,
            Self::Date(date) => date.and_time(NaiveTime::MIN).and_utc(),
        }
    }
}

/// A raw calendar event as it arrives from a data source.
///
/// Only `id`, `start` and `end` are required. Everything else is optional
/// and tolerated in any combination; nothing here is validated beyond shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Source identifier, string or integer.
    pub id: RawEventId,

    /// When the event starts.
    pub start: RawEventTime,

    /// When the event ends. May precede `start`; normalization handles it.
    pub end: RawEventTime,

    /// The event title.
    #[serde(default)]
    pub title: Option<String>,

    /// The event location.
    #[serde(default)]
    pub location: Option<String>,

    /// Opaque color token; passed through unvalidated.
    #[serde(default)]
    pub color: Option<String>,

    /// Explicit all-day flag. Date-only bounds imply all-day regardless.
    #[serde(default)]
    pub all_day: Option<bool>,

    /// Whether the rendering layer should display the time range.
    #[serde(default)]
    pub show_time_range: Option<bool>,

    /// Source status (e.g. "confirmed", "cancelled").
    #[serde(default)]
    pub status: Option<String>,
}

impl RawEvent {
    /// Creates a raw event with required fields.
    pub fn new(id: impl Into<RawEventId>, start: RawEventTime, end: RawEventTime) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            title: None,
            location: None,
            color: None,
            all_day: None,
            show_time_range: None,
            status: None,
        }
    }

    /// Builder method to set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the color token.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Builder method to set the all-day flag.
    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = Some(all_day);
        self
    }

    /// Builder method to set the time-range display hint.
    pub fn with_show_time_range(mut self, show: bool) -> Self {
        self.show_time_range = Some(show);
        self
    }

    /// Builder method to set the status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Returns the title to use, falling back for missing or empty titles.
    pub fn effective_title(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => "(No title)",
        }
    }

    /// Returns true if the source marked this event cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("cancelled"))
    }

    /// Returns true if either bound is date-only or the explicit flag is set.
    pub fn is_all_day(&self) -> bool {
        self.all_day.unwrap_or(false) || self.start.is_all_day() || self.end.is_all_day()
    }
}
