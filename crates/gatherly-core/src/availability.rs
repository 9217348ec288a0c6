//! Availability checks against per-person busy-interval calendars.
//!
//! The overlap test is strict and half-open: an occurrence that ends
//! exactly when a busy interval begins (or starts exactly when one ends)
//! does not conflict. Busy lists are scanned linearly; planning batches
//! are tens to low hundreds of occurrences, so the per-pair check stays
//! cheap without pre-sorting.

use chrono::NaiveDateTime;

use crate::plan::{ActivityOccurrence, BusyInterval, BusyMap};

/// Check whether one person is free during `[start, end)`.
///
/// Returns false iff at least one busy interval strictly overlaps the
/// window. An empty busy list means free.
pub fn is_free(start: NaiveDateTime, end: NaiveDateTime, busy: &[BusyInterval]) -> bool {
    debug_assert!(start < end, "occurrence window must have positive duration");

    for interval in busy {
        debug_assert!(
            interval.start <= interval.end,
            "busy interval must not be inverted"
        );
        if interval.overlaps(start, end) {
            return false;
        }
    }
    true
}

/// Determine which members of the selected group are free for an occurrence.
///
/// Order-preserving over `selected_people`; a person missing from the busy
/// map is treated as having an empty calendar. No minimum-attendance
/// filtering happens here -- that threshold is applied by the ranking
/// engine once counts are known.
pub fn resolve_attendance(
    occurrence: &ActivityOccurrence,
    selected_people: &[String],
    busy_map: &BusyMap,
) -> (Vec<String>, usize) {
    let attendees: Vec<String> = selected_people
        .iter()
        .filter(|person| {
            let busy = busy_map.get(*person).map(Vec::as_slice).unwrap_or(&[]);
            is_free(occurrence.start, occurrence.end, busy)
        })
        .cloned()
        .collect();

    let count = attendees.len();
    (attendees, count)
}
