//! End-to-end planning scenarios over the full pipeline:
//! candidate generation -> attendance -> interest -> ranking.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use gatherly_core::{
    rank, ActivityOccurrence, BusyInterval, BusyMap, CandidateTable, OccurrenceGenerator, TagMap,
};

// 2026-03-02 is a Monday
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, minute, 0).unwrap()
}

fn group(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn single_occurrence_neutral_fallback_scenario() {
    // Group: Alice and Bob. Alice is busy Monday 18:00-20:00; Bob is free
    // all week. One candidate: Soccer, Monday 18:00-19:00, category Sport.
    // Alice likes Sport, Bob has no tags.
    let soccer = ActivityOccurrence::new("Soccer", at(monday(), 18, 0), at(monday(), 19, 0))
        .unwrap()
        .with_category("Sport");

    let people = group(&["Alice", "Bob"]);
    let mut busy_map = BusyMap::new();
    busy_map.insert(
        "Alice".to_string(),
        vec![BusyInterval::new(at(monday(), 18, 0), at(monday(), 20, 0))],
    );
    let mut tags = TagMap::new();
    tags.insert("Alice".to_string(), "Sport".to_string());

    let ranked = rank(&[soccer], &people, &tags, &busy_map, 1);

    assert_eq!(ranked.len(), 1);
    let scored = &ranked[0];
    // Bob is the only attendee
    assert_eq!(scored.attendees, vec!["Bob".to_string()]);
    assert_eq!(scored.attendee_count, 1);
    assert_eq!(scored.availability_score, 0.5);
    // Bob has no tags, so no exact hit; a single-occurrence batch cannot
    // build a vocabulary, so the final score is the neutral constant
    assert_eq!(scored.interest_score, 0.0);
    assert_eq!(scored.final_interest_score, 0.5);
    assert_eq!(scored.sort_score, 1.0);
    assert_eq!(scored.matched_tags_label(), "General");
}

#[test]
fn exact_match_outranks_similarity_fallback() {
    // Two occurrences, everyone free: one is an exact keyword hit for all
    // attendees, the other only resembles their preferences textually.
    let quiz = ActivityOccurrence::new(
        "Pub quiz",
        at(monday(), 20, 0),
        at(monday(), 22, 0),
    )
    .unwrap()
    .with_category("Party")
    .with_description("trivia night with friends");
    let concert = ActivityOccurrence::new(
        "Open air concert",
        at(monday().succ_opt().unwrap(), 19, 0),
        at(monday().succ_opt().unwrap(), 23, 0),
    )
    .unwrap()
    .with_category("Music")
    .with_description("live bands outdoors");

    let people = group(&["Alice", "Bob"]);
    let mut tags = TagMap::new();
    // "Party" hits the quiz exactly; nothing matches the concert exactly,
    // but "live outdoors" shares vocabulary with its description
    tags.insert("Alice".to_string(), "Party, live outdoors".to_string());
    tags.insert("Bob".to_string(), "Party".to_string());

    let ranked = rank(&[concert, quiz], &people, &tags, &BusyMap::new(), 1);

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].occurrence.title, "Pub quiz");
    assert_eq!(ranked[0].interest_score, 1.0);
    assert_eq!(ranked[0].final_interest_score, 1.0);

    let concert_scored = &ranked[1];
    assert_eq!(concert_scored.interest_score, 0.0);
    // The fallback found textual similarity but it cannot beat the exact hit
    assert!(concert_scored.final_interest_score > 0.0);
    assert!(concert_scored.sort_score < ranked[0].sort_score);
}

#[test]
fn weekly_template_through_full_pipeline() {
    let table = CandidateTable::from_records(
        vec![
            "weekday".to_string(),
            "event_name".to_string(),
            "start_time".to_string(),
            "end_time".to_string(),
            "category".to_string(),
            "description".to_string(),
        ],
        vec![
            vec![
                "0".to_string(),
                "Soccer".to_string(),
                "18:00".to_string(),
                "19:00".to_string(),
                "Sport".to_string(),
                "casual game".to_string(),
            ],
            vec![
                "2".to_string(),
                "Late session".to_string(),
                "22:00".to_string(),
                "02:00".to_string(),
                "Party".to_string(),
                "".to_string(),
            ],
        ],
    );

    let generator = OccurrenceGenerator::new().with_horizon(7);
    let occurrences = generator.generate(&table, monday());
    // One Monday and one Wednesday instance within a single week
    assert_eq!(occurrences.len(), 2);

    let late = occurrences
        .iter()
        .find(|o| o.title == "Late session")
        .unwrap();
    assert_eq!(late.start.weekday().num_days_from_monday(), 2);
    assert_eq!(late.end.date(), late.start.date().succ_opt().unwrap());

    let people = group(&["Alice", "Bob"]);
    let mut tags = TagMap::new();
    tags.insert("Alice".to_string(), "Sport".to_string());
    tags.insert("Bob".to_string(), "Sport".to_string());

    let ranked = rank(&occurrences, &people, &tags, &BusyMap::new(), 1);
    assert_eq!(ranked.len(), 2);
    // Everyone is free for both; the exact Sport hit wins
    assert_eq!(ranked[0].occurrence.title, "Soccer");
    assert_eq!(ranked[0].sort_score, 2.0);
}

#[test]
fn rank_is_idempotent() {
    let occurrences: Vec<ActivityOccurrence> = (0..6)
        .map(|i| {
            let date = monday() + chrono::Duration::days(i);
            ActivityOccurrence::new(format!("Event {i}"), at(date, 18, 0), at(date, 20, 0))
                .unwrap()
                .with_category(["Sport", "Music", "Outdoor"][i as usize % 3])
        })
        .collect();

    let people = group(&["Alice", "Bob", "Carol"]);
    let mut tags = TagMap::new();
    tags.insert("Alice".to_string(), "Music".to_string());
    tags.insert("Carol".to_string(), "Outdoor, Sport".to_string());
    let mut busy_map = BusyMap::new();
    busy_map.insert(
        "Bob".to_string(),
        vec![BusyInterval::new(at(monday(), 17, 0), at(monday(), 21, 0))],
    );

    let first = rank(&occurrences, &people, &tags, &busy_map, 1);
    let second = rank(&occurrences, &people, &tags, &busy_map, 1);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.occurrence.title, b.occurrence.title);
        assert_eq!(a.attendees, b.attendees);
        assert_eq!(a.sort_score, b.sort_score);
    }
}

#[test]
fn raising_min_attendees_never_grows_the_result() {
    let occurrences: Vec<ActivityOccurrence> = (0..5)
        .map(|i| {
            let date = monday() + chrono::Duration::days(i);
            ActivityOccurrence::new(format!("Event {i}"), at(date, 18, 0), at(date, 20, 0))
                .unwrap()
        })
        .collect();

    let people = group(&["Alice", "Bob", "Carol"]);
    let mut busy_map = BusyMap::new();
    busy_map.insert(
        "Alice".to_string(),
        vec![
            BusyInterval::new(at(monday(), 0, 0), at(monday() + chrono::Duration::days(2), 0, 0)),
        ],
    );
    busy_map.insert(
        "Bob".to_string(),
        vec![BusyInterval::new(
            at(monday(), 19, 0),
            at(monday(), 19, 30),
        )],
    );

    let mut previous = usize::MAX;
    for min_attendees in 0..=4 {
        let ranked = rank(&occurrences, &people, &TagMap::new(), &busy_map, min_attendees);
        assert!(ranked.len() <= previous);
        previous = ranked.len();
    }
}

#[test]
fn empty_group_never_panics() {
    let occ = ActivityOccurrence::new("Soccer", at(monday(), 18, 0), at(monday(), 19, 0)).unwrap();
    let ranked = rank(&[occ], &[], &TagMap::new(), &BusyMap::new(), 0);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].attendee_count, 0);
    assert_eq!(ranked[0].availability_score, 0.0);
}
