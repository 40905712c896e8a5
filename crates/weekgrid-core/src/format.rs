//! Display strings for events and day labels.
//!
//! The rendering layer decides fonts and geometry; this module only builds
//! the text it draws. All formatting is a pure function of the record and an
//! explicit [`DisplayOptions`] value — there is no shared display mode state.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::day::DayKey;
use crate::event::EventRecord;

/// Time format preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// 24-hour format (e.g., "14:30").
    #[default]
    H24,
    /// 12-hour format with AM/PM (e.g., "02:30 PM").
    H12,
}

/// How much horizontal room a day label has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelMode {
    /// Full weekday, day, month and year.
    #[default]
    Wide,
    /// Abbreviated weekday and month.
    Abbreviated,
    /// Day and month digits only.
    Compact,
}

/// Configuration for event display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    /// Time format preference.
    pub time_format: TimeFormat,
    /// Hour separator character (e.g., ":", "h").
    pub hour_separator: String,
    /// Whether to append the location when present.
    pub show_location: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            time_format: TimeFormat::H24,
            hour_separator: ":".to_string(),
            show_location: true,
        }
    }
}

/// Builds the display string for an event.
///
/// The string is the title, followed by the time range when the record is
/// not all-day and carries the `show_time_range` hint, followed by the
/// location when present and enabled. Times are rendered in the given
/// timezone.
pub fn event_display_string<Tz: TimeZone>(
    event: &EventRecord,
    options: &DisplayOptions,
    tz: &Tz,
) -> String {
    let mut out = event.title.clone();
    if !event.all_day && event.show_time_range {
        out.push_str(&format!(
            " ({} - {})",
            format_time(event.start, options, tz),
            format_time(event.end, options, tz)
        ));
    }
    if options.show_location && !event.location.is_empty() {
        out.push_str(&format!(" | {}", event.location));
    }
    out
}

/// Renders a day label in the requested width mode.
pub fn day_label(day: DayKey, mode: LabelMode) -> String {
    let date = day.date();
    match mode {
        LabelMode::Wide => date.format("%A %-d %B %Y").to_string(),
        LabelMode::Abbreviated => date.format("%a %-d %b").to_string(),
        LabelMode::Compact => date.format("%d/%m").to_string(),
    }
}

fn format_time<Tz: TimeZone>(t: DateTime<Utc>, options: &DisplayOptions, tz: &Tz) -> String {
    let local = t.with_timezone(tz).naive_local();
    let sep = &options.hour_separator;
    match options.time_format {
        TimeFormat::H24 => local.format(&format!("%H{sep}%M")).to_string(),
        TimeFormat::H12 => local.format(&format!("%I{sep}%M %p")).to_string(),
    }
}
