//! Ranking engine: combines availability and interest into one ordering.
//!
//! A pure batch pipeline, re-run fully on each planning request. Each
//! surviving occurrence gets `sort_score = availability_score +
//! final_interest_score` (both weighted equally; a 2.0 means full
//! attendance and a full interest match). Ties break by attendee count,
//! then by original candidate order, so identical inputs always produce
//! identical output.

use std::cmp::Ordering;

use crate::availability::resolve_attendance;
use crate::interest::{score_interest_batch, InterestInput};
use crate::plan::{ActivityOccurrence, BusyMap, ScoredOccurrence, TagMap};

/// Rank candidate occurrences for a selected group.
///
/// Occurrences with fewer than `min_attendees` free people are dropped
/// before scoring; the TF-IDF vocabulary is built from exactly the
/// occurrences that survive. Returns an empty vector when nothing survives
/// -- this function never fails.
pub fn rank(
    occurrences: &[ActivityOccurrence],
    selected_people: &[String],
    tag_map: &TagMap,
    busy_map: &BusyMap,
    min_attendees: usize,
) -> Vec<ScoredOccurrence> {
    if occurrences.is_empty() {
        return Vec::new();
    }

    let group_size = selected_people.len().max(1);

    // Attendance filter
    let mut survivors: Vec<(&ActivityOccurrence, Vec<String>)> = Vec::new();
    for occurrence in occurrences {
        let (attendees, count) = resolve_attendance(occurrence, selected_people, busy_map);
        if count >= min_attendees {
            survivors.push((occurrence, attendees));
        }
    }
    if survivors.is_empty() {
        return Vec::new();
    }

    // Interest scoring over the surviving batch only
    let inputs: Vec<InterestInput> = survivors
        .iter()
        .map(|(occurrence, attendees)| InterestInput::new(occurrence, attendees, tag_map))
        .collect();
    let interest = score_interest_batch(&inputs);

    let mut scored: Vec<ScoredOccurrence> = survivors
        .into_iter()
        .zip(interest)
        .map(|((occurrence, attendees), interest)| {
            let attendee_count = attendees.len();
            let availability_score = attendee_count as f64 / group_size as f64;
            let sort_score = availability_score + interest.final_interest_score;

            ScoredOccurrence {
                occurrence: occurrence.clone(),
                attendees,
                attendee_count,
                matched_tags: interest.matched_tags,
                interest_score: interest.interest_score,
                availability_score,
                final_interest_score: interest.final_interest_score,
                sort_score,
            }
        })
        .collect();

    // Stable sort keeps original candidate order as the last tie-break
    scored.sort_by(|a, b| {
        b.sort_score
            .partial_cmp(&a.sort_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.attendee_count.cmp(&a.attendee_count))
    });

    scored
}
