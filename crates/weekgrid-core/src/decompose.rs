//! Splitting events into per-day sub-events.
//!
//! An event with an arbitrary time span is decomposed into one sub-event per
//! calendar day it touches, so each day of a week grid can be laid out
//! independently. Every sub-event keeps the source event's `id`, which is
//! how the rendering layer correlates a day's block back to the event it
//! came from.

use std::collections::BTreeMap;

use chrono::TimeZone;

use crate::day::DayKey;
use crate::event::EventRecord;

/// Decomposes an event into per-day sub-events in the given timezone.
///
/// The result has exactly one entry per calendar day of the inclusive span
/// `[start day, end day]`, keyed chronologically:
///
/// - An event confined to one day maps to itself, unchanged.
/// - An event ending exactly at the midnight that closes its start day
///   collapses to a single sub-event on that day, with its end pulled back
///   to the day's last instant.
/// - A true multi-day span yields its original start time to the first day,
///   its original end time to the last day, and full-day blocks for every
///   interior day. All-day events yield full-day blocks on every day of the
///   span, first and last included.
///
/// Total for any constructed [`EventRecord`]: bounds are normalized at
/// construction, so the start day never follows the end day.
pub fn decompose<Tz: TimeZone>(event: &EventRecord, tz: &Tz) -> BTreeMap<DayKey, EventRecord> {
    let start_day = DayKey::from_instant(event.start, tz);
    let end_day = DayKey::from_instant(event.end, tz);

    let mut days = BTreeMap::new();

    if start_day == end_day {
        days.insert(start_day, event.clone());
        return days;
    }

    // Ends exactly at the midnight closing the start day: a single sub-event
    // on that day, pulled back to its last instant.
    if event.end == start_day.next_midnight(tz) {
        days.insert(
            start_day,
            event.with_bounds(event.start, start_day.last_instant(tz)),
        );
        return days;
    }

    let range = DayKey::range(start_day, end_day).expect("start day not after end day");
    for day in range {
        let sub = if event.all_day {
            event.with_bounds(day.first_instant(tz), day.next_midnight(tz))
        } else if day == start_day {
            event.with_bounds(event.start, start_day.next_midnight(tz))
        } else if day == end_day {
            event.with_bounds(end_day.first_instant(tz), event.end)
        } else {
            // Interior days are always full-day blocks.
            event.with_bounds(day.first_instant(tz), day.next_midnight(tz))
        };
        days.insert(day, sub);
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> DayKey {
        DayKey::from_date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    // Monday 2025-02-03 through Wednesday 2025-02-05.
    fn monday() -> DayKey {
        day(2025, 2, 3)
    }

    fn tuesday() -> DayKey {
        day(2025, 2, 4)
    }

    fn wednesday() -> DayKey {
        day(2025, 2, 5)
    }

    fn event(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> EventRecord {
        EventRecord::new(id, "Test Event", start, end).with_location("Room 4")
    }

    #[test]
    fn single_day_is_identity() {
        let source = event("C", utc(2025, 2, 3, 10, 0, 0), utc(2025, 2, 3, 11, 0, 0));
        let days = decompose(&source, &Utc);
        assert_eq!(days.len(), 1);
        assert_eq!(days[&monday()], source);
    }

    #[test]
    fn zero_length_event_is_single_entry() {
        let source = event("Z", utc(2025, 2, 3, 10, 0, 0), utc(2025, 2, 3, 10, 0, 0));
        let days = decompose(&source, &Utc);
        assert_eq!(days.len(), 1);
        assert_eq!(days[&monday()], source);
    }

    #[test]
    fn ends_at_next_midnight_collapses_to_start_day() {
        // Monday 09:00 to Tuesday 00:00 is a Monday-only event ending at
        // the last instant of Monday.
        let source = event("B", utc(2025, 2, 3, 9, 0, 0), utc(2025, 2, 4, 0, 0, 0));
        let days = decompose(&source, &Utc);
        assert_eq!(days.len(), 1);
        let sub = &days[&monday()];
        assert_eq!(sub.id, "B");
        assert_eq!(sub.start, utc(2025, 2, 3, 9, 0, 0));
        assert_eq!(sub.end, utc(2025, 2, 3, 23, 59, 59));
        assert_eq!(sub.location, "Room 4");
    }

    #[test]
    fn multi_day_span_splits_per_day() {
        // Monday 22:00 to Wednesday 02:00.
        let source = event("A", utc(2025, 2, 3, 22, 0, 0), utc(2025, 2, 5, 2, 0, 0));
        let days = decompose(&source, &Utc);
        assert_eq!(days.len(), 3);

        let first = &days[&monday()];
        assert_eq!(first.start, utc(2025, 2, 3, 22, 0, 0));
        assert_eq!(first.end, utc(2025, 2, 4, 0, 0, 0));

        let interior = &days[&tuesday()];
        assert_eq!(interior.start, utc(2025, 2, 4, 0, 0, 0));
        assert_eq!(interior.end, utc(2025, 2, 5, 0, 0, 0));

        let last = &days[&wednesday()];
        assert_eq!(last.start, utc(2025, 2, 5, 0, 0, 0));
        assert_eq!(last.end, utc(2025, 2, 5, 2, 0, 0));
    }

    #[test]
    fn id_propagates_to_every_sub_event() {
        let source = event("A", utc(2025, 2, 3, 22, 0, 0), utc(2025, 2, 5, 2, 0, 0));
        let days = decompose(&source, &Utc);
        assert!(days.values().all(|sub| sub.id == "A"));
        assert!(days.values().all(|sub| sub.title == source.title));
        assert!(days.values().all(|sub| sub.location == source.location));
    }

    #[test]
    fn day_coverage_matches_inclusive_range() {
        let source = event("A", utc(2025, 2, 3, 22, 0, 0), utc(2025, 2, 7, 2, 0, 0));
        let days = decompose(&source, &Utc);
        let expected: Vec<_> = DayKey::range(monday(), day(2025, 2, 7)).unwrap().collect();
        let keys: Vec<_> = days.keys().copied().collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn all_day_span_yields_full_day_blocks() {
        let source = event("D", utc(2025, 2, 3, 9, 30, 0), utc(2025, 2, 5, 16, 0, 0))
            .with_all_day(true);
        let days = decompose(&source, &Utc);
        assert_eq!(days.len(), 3);
        for (d, sub) in &days {
            assert_eq!(sub.start, d.first_instant(&Utc));
            assert_eq!(sub.end, d.next_midnight(&Utc));
            assert!(sub.all_day);
        }
    }

    #[test]
    fn single_day_all_day_collapses_at_midnight_bound() {
        // The conventional all-day shape: starts at midnight, ends at the
        // next. The midnight-boundary rule applies before the all-day split.
        let source = event("E", utc(2025, 2, 3, 0, 0, 0), utc(2025, 2, 4, 0, 0, 0))
            .with_all_day(true);
        let days = decompose(&source, &Utc);
        assert_eq!(days.len(), 1);
        assert_eq!(days[&monday()].end, utc(2025, 2, 3, 23, 59, 59));
    }

    #[test]
    fn span_ending_at_later_midnight_keeps_inclusive_coverage() {
        // Monday 22:00 to Wednesday 00:00: Wednesday is the derived end day
        // and receives a zero-length sub-event at its first instant.
        let source = event("F", utc(2025, 2, 3, 22, 0, 0), utc(2025, 2, 5, 0, 0, 0));
        let days = decompose(&source, &Utc);
        assert_eq!(days.len(), 3);
        assert_eq!(days[&tuesday()].start, utc(2025, 2, 4, 0, 0, 0));
        assert_eq!(days[&tuesday()].end, utc(2025, 2, 5, 0, 0, 0));
        let last = &days[&wednesday()];
        assert_eq!(last.start, utc(2025, 2, 5, 0, 0, 0));
        assert!(last.is_zero_length());
    }

    #[test]
    fn redecomposing_single_day_sub_event_is_identity() {
        let source = event("A", utc(2025, 2, 3, 22, 0, 0), utc(2025, 2, 5, 2, 0, 0));
        let days = decompose(&source, &Utc);
        // The last-day part is confined to Wednesday; it must survive a
        // second decomposition untouched.
        let last = days[&wednesday()].clone();
        let again = decompose(&last, &Utc);
        assert_eq!(again.len(), 1);
        assert_eq!(again[&wednesday()], last);
    }

    #[test]
    fn redecomposing_midnight_bounded_part_stays_on_its_day() {
        let source = event("A", utc(2025, 2, 3, 22, 0, 0), utc(2025, 2, 5, 2, 0, 0));
        let first = decompose(&source, &Utc)[&monday()].clone();
        // Ends at Tuesday midnight, so the midnight-boundary rule pins it to
        // Monday with a pulled-back end.
        let again = decompose(&first, &Utc);
        assert_eq!(again.len(), 1);
        assert_eq!(again[&monday()].end, utc(2025, 2, 3, 23, 59, 59));
    }

    #[test]
    fn decomposition_is_timezone_dependent() {
        // 22:00 to 02:00 UTC crosses midnight in UTC but not at UTC+3,
        // where it runs 01:00 to 05:00 within one local day.
        let source = event("G", utc(2025, 2, 3, 22, 0, 0), utc(2025, 2, 4, 2, 0, 0));

        let in_utc = decompose(&source, &Utc);
        assert_eq!(in_utc.len(), 2);

        let east = FixedOffset::east_opt(3 * 3600).unwrap();
        let in_east = decompose(&source, &east);
        assert_eq!(in_east.len(), 1);
        assert_eq!(in_east[&tuesday()], source);
    }

    #[test]
    fn offset_timezone_multi_day_bounds_use_local_midnights() {
        let east = FixedOffset::east_opt(2 * 3600).unwrap();
        // 20:00 UTC Feb 3 is 22:00 local; 23:00 UTC Feb 4 is 01:00 local
        // Feb 5: three local days.
        let source = event("H", utc(2025, 2, 3, 20, 0, 0), utc(2025, 2, 4, 23, 0, 0));
        let days = decompose(&source, &east);
        assert_eq!(days.len(), 3);
        let interior = &days[&tuesday()];
        assert_eq!(interior.start, utc(2025, 2, 3, 22, 0, 0));
        assert_eq!(interior.end, utc(2025, 2, 4, 22, 0, 0));
    }
}
