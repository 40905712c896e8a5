//! RawEvent to EventRecord conversion.
//!
//! Normalization is total: every payload the source sends becomes a
//! well-formed [`EventRecord`]. Reversed bounds collapse to a zero-length
//! record (handled by `EventRecord` construction), missing titles get a
//! fallback, date-only bounds force the all-day flag, and color tokens pass
//! through opaquely.

use tracing::debug;
use weekgrid_core::{EventColor, EventRecord};

use crate::error::IngestResult;
use crate::raw::RawEvent;

/// Converts a raw event into a normalized record.
pub fn normalize_event(raw: &RawEvent) -> EventRecord {
    let mut event = EventRecord::new(
        raw.id.to_string(),
        raw.effective_title(),
        raw.start.to_instant(),
        raw.end.to_instant(),
    )
    .with_all_day(raw.is_all_day())
    .with_show_time_range(raw.show_time_range.unwrap_or(false));

    if let Some(ref location) = raw.location {
        event = event.with_location(location);
    }
    if let Some(ref color) = raw.color {
        event = event.with_color(EventColor::new(color));
    }

    event
}

/// Batch-normalizes raw events, preserving input order.
///
/// Cancelled events are filtered out.
pub fn normalize_events(raw_events: &[RawEvent]) -> Vec<EventRecord> {
    let records: Vec<EventRecord> = raw_events
        .iter()
        .filter(|e| !e.is_cancelled())
        .map(normalize_event)
        .collect();
    let skipped = raw_events.len() - records.len();
    if skipped > 0 {
        debug!(skipped, "dropped cancelled events");
    }
    records
}

/// Parses a JSON array of raw events and normalizes the result.
///
/// # Errors
///
/// Returns [`crate::IngestError::Payload`] when the payload is not a valid
/// raw event array.
pub fn parse_events(payload: &str) -> IngestResult<Vec<EventRecord>> {
    let raw: Vec<RawEvent> = serde_json::from_str(payload)?;
    Ok(normalize_events(&raw))
}
