//! Calendar-day identity and day ranges.
//!
//! This module provides [`DayKey`], the canonical identifier for one calendar
//! day, and [`DayRange`], an inclusive ascending sequence of days. Deriving a
//! key from an instant is timezone-dependent: two instants map to the same
//! key iff they fall on the same calendar day in that timezone.

use std::fmt;

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for day-range operations.
pub type DayResult<T> = Result<T, DayError>;

/// Errors that can occur when constructing day ranges.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DayError {
    /// The range end precedes its start.
    #[error("invalid day range: {end} is before {start}")]
    InvalidRange {
        /// Requested first day.
        start: DayKey,
        /// Requested last day.
        end: DayKey,
    },
}

/// Identifies one calendar day in the proleptic Gregorian calendar.
///
/// Keys are totally ordered chronologically, hashable, and structurally
/// equal. They carry no timezone themselves; the timezone is applied when a
/// key is derived from an instant or resolved back to day boundaries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Returns the calendar day on which `t` falls in the given timezone.
    ///
    /// Total: every instant maps to exactly one day.
    pub fn from_instant<Tz: TimeZone>(t: DateTime<Utc>, tz: &Tz) -> Self {
        Self(t.with_timezone(tz).date_naive())
    }

    /// Creates a key directly from a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the calendar day for the current instant in the given timezone.
    pub fn today<Tz: TimeZone>(tz: &Tz) -> Self {
        Self::from_instant(Utc::now(), tz)
    }

    /// Returns the underlying calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the following day.
    pub fn next(&self) -> Self {
        Self(self.0.succ_opt().expect("day out of chrono range"))
    }

    /// Returns the preceding day.
    pub fn prev(&self) -> Self {
        Self(self.0.pred_opt().expect("day out of chrono range"))
    }

    /// Returns the first instant of this day in the given timezone.
    ///
    /// Total even around DST transitions: an ambiguous local midnight
    /// resolves to its earlier mapping, and a skipped local midnight resolves
    /// to the first representable instant of the day.
    pub fn first_instant<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Utc> {
        let midnight = self.0.and_time(NaiveTime::MIN);
        match tz.from_local_datetime(&midnight) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
            LocalResult::None => {
                // A spring-forward transition can skip local midnight.
                let mut probe = midnight;
                for _ in 0..12 {
                    probe = probe + Duration::minutes(15);
                    if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
                        return dt.with_timezone(&Utc);
                    }
                }
                midnight.and_utc()
            }
        }
    }

    /// Returns the start of the following day in the given timezone.
    ///
    /// This is the exclusive end bound of a full-day span on this day.
    pub fn next_midnight<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Utc> {
        self.next().first_instant(tz)
    }

    /// Returns the last instant of this day (one second before the next
    /// midnight) in the given timezone.
    pub fn last_instant<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Utc> {
        self.next_midnight(tz) - Duration::seconds(1)
    }

    /// Returns the inclusive ascending range of days from `start` to `end`.
    ///
    /// The range yields exactly `end - start + 1` keys.
    ///
    /// # Errors
    ///
    /// Returns [`DayError::InvalidRange`] if `end` precedes `start`.
    pub fn range(start: DayKey, end: DayKey) -> DayResult<DayRange> {
        if end < start {
            return Err(DayError::InvalidRange { start, end });
        }
        Ok(DayRange {
            front: start,
            back: end,
            exhausted: false,
        })
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// An inclusive ascending range of calendar days.
///
/// Produced by [`DayKey::range`]; iterates from the first day to the last,
/// both included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRange {
    front: DayKey,
    back: DayKey,
    exhausted: bool,
}

impl DayRange {
    /// Returns the first day of the range.
    pub fn start(&self) -> DayKey {
        self.front
    }

    /// Returns the last day of the range.
    pub fn end(&self) -> DayKey {
        self.back
    }

    /// Returns true if the given day lies within the remaining range.
    pub fn contains(&self, day: DayKey) -> bool {
        !self.exhausted && self.front <= day && day <= self.back
    }

    /// Returns true if the range has been fully consumed.
    pub fn is_empty(&self) -> bool {
        self.exhausted
    }
}

impl Iterator for DayRange {
    type Item = DayKey;

    fn next(&mut self) -> Option<DayKey> {
        if self.exhausted {
            return None;
        }
        let out = self.front;
        if self.front == self.back {
            self.exhausted = true;
        } else {
            self.front = self.front.next();
        }
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = if self.exhausted {
            0
        } else {
            (self.back.0 - self.front.0).num_days() as usize + 1
        };
        (n, Some(n))
    }
}

impl DoubleEndedIterator for DayRange {
    fn next_back(&mut self) -> Option<DayKey> {
        if self.exhausted {
            return None;
        }
        let out = self.back;
        if self.front == self.back {
            self.exhausted = true;
        } else {
            self.back = self.back.prev();
        }
        Some(out)
    }
}

impl ExactSizeIterator for DayRange {}
