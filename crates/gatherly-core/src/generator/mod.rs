//! Candidate generator: expands candidate sources into dated occurrences.
//!
//! Two source shapes are supported:
//! - fixed-date tables (`Title/Start/End/...`) are normalized and passed
//!   through;
//! - weekly templates (`weekday/event_name/start_time/end_time/...`) are
//!   expanded over a fixed horizon, one occurrence per matching calendar
//!   day.
//!
//! Malformed rows are skipped individually; an unreadable or unrecognized
//! source produces an empty batch, never an error. Downstream components
//! do not rely on generator ordering.

mod source;

pub use source::{load_candidates, CandidateTable, CATEGORY_ALIASES};

use std::path::Path;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::plan::{ActivityOccurrence, WeeklySlot};

/// Default planning horizon in days.
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

/// Time-of-day formats accepted in weekly template rows.
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Timestamp formats accepted in fixed-date rows (besides RFC 3339).
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Expands candidate tables into concrete activity occurrences.
pub struct OccurrenceGenerator {
    horizon_days: u32,
}

impl OccurrenceGenerator {
    /// Create a generator with the default 30-day horizon
    pub fn new() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }

    /// Set a custom horizon
    pub fn with_horizon(mut self, days: u32) -> Self {
        self.horizon_days = days;
        self
    }

    /// Generate occurrences from a candidate table.
    ///
    /// The shape is detected from the header: weekly template when both
    /// `weekday` and `event_name` columns exist, fixed-date when `title`,
    /// `start`, and `end` exist. Anything else yields an empty batch.
    pub fn generate(&self, table: &CandidateTable, today: NaiveDate) -> Vec<ActivityOccurrence> {
        if table.is_empty() {
            return Vec::new();
        }
        if table.has_columns(&["weekday", "event_name"]) {
            let slots = self.slots_from_table(table);
            self.expand_weekly(&slots, today)
        } else if table.has_columns(&["title", "start", "end"]) {
            self.normalize_fixed(table)
        } else {
            log::debug!("candidate source matches no known shape; returning no candidates");
            Vec::new()
        }
    }

    /// Load a candidate table from disk and generate occurrences.
    ///
    /// An unreadable source is "no candidates", not a failure.
    pub fn generate_from_path(
        &self,
        path: impl AsRef<Path>,
        today: NaiveDate,
    ) -> Vec<ActivityOccurrence> {
        match load_candidates(path.as_ref()) {
            Ok(table) => self.generate(&table, today),
            Err(err) => {
                log::warn!("could not load candidate source: {err}");
                Vec::new()
            }
        }
    }

    /// Expand weekly template slots over the horizon.
    ///
    /// For each of the next `horizon_days` calendar days (today inclusive),
    /// every slot whose weekday matches produces one occurrence dated on
    /// that day. An end time at or before the start time places the end on
    /// the following day; ending exactly at midnight always rolls forward.
    pub fn expand_weekly(&self, slots: &[WeeklySlot], today: NaiveDate) -> Vec<ActivityOccurrence> {
        let mut occurrences = Vec::new();

        for offset in 0..self.horizon_days {
            let date = today + Duration::days(offset as i64);
            let weekday = date.weekday().num_days_from_monday() as u8;

            for slot in slots.iter().filter(|s| s.weekday == weekday) {
                match self.slot_occurrence(slot, date) {
                    Some(occ) => occurrences.push(occ),
                    None => {
                        log::debug!("skipping weekly slot '{}': unparseable times", slot.name)
                    }
                }
            }
        }

        occurrences
    }

    /// One dated occurrence for a slot on a concrete day, or `None` when
    /// the row's times cannot be parsed.
    fn slot_occurrence(&self, slot: &WeeklySlot, date: NaiveDate) -> Option<ActivityOccurrence> {
        let start_time = parse_time(&slot.start_time)?;
        let end_time = parse_time(&slot.end_time)?;

        let start = date.and_time(start_time);
        // Overnight rule: midnight compares as the smallest time of day,
        // so `end <= start` also covers the "ends exactly at 00:00" case.
        let end = if end_time <= start_time {
            (date + Duration::days(1)).and_time(end_time)
        } else {
            date.and_time(end_time)
        };

        let mut occ = ActivityOccurrence::new(slot.name.clone(), start, end).ok()?;
        if let Some(category) = &slot.category {
            occ = occ.with_category(category.clone());
        }
        if let Some(description) = &slot.description {
            occ = occ.with_description(description.clone());
        }
        if let Some(location) = &slot.location {
            occ = occ.with_location(location.clone());
        }
        Some(occ)
    }

    /// Read weekly template rows out of a table, skipping malformed ones.
    fn slots_from_table(&self, table: &CandidateTable) -> Vec<WeeklySlot> {
        let mut slots = Vec::new();

        for row in 0..table.row_count() {
            let Some(weekday) = table.get(row, "weekday").and_then(parse_weekday) else {
                log::debug!("skipping template row {row}: bad weekday");
                continue;
            };
            let Some(name) = table.get(row, "event_name") else {
                continue;
            };
            let (Some(start_time), Some(end_time)) =
                (table.get(row, "start_time"), table.get(row, "end_time"))
            else {
                log::debug!("skipping template row {row}: missing times");
                continue;
            };

            slots.push(WeeklySlot {
                weekday,
                name: name.to_string(),
                start_time: start_time.to_string(),
                end_time: end_time.to_string(),
                category: table.get_any(row, CATEGORY_ALIASES).map(str::to_string),
                description: table.get(row, "description").map(str::to_string),
                location: table.get(row, "location").map(str::to_string),
            });
        }

        slots
    }

    /// Normalize fixed-date rows into occurrences, skipping malformed ones.
    fn normalize_fixed(&self, table: &CandidateTable) -> Vec<ActivityOccurrence> {
        let mut occurrences = Vec::new();

        for row in 0..table.row_count() {
            let (Some(title), Some(start_raw), Some(end_raw)) = (
                table.get(row, "title"),
                table.get(row, "start"),
                table.get(row, "end"),
            ) else {
                continue;
            };
            let (Some(start), Some(end)) = (parse_datetime(start_raw), parse_datetime(end_raw))
            else {
                log::debug!("skipping fixed-date row {row}: bad timestamps");
                continue;
            };

            let Ok(occ) = ActivityOccurrence::new(title, start, end) else {
                log::debug!("skipping fixed-date row {row}: non-positive duration");
                continue;
            };

            let occ = occ
                .with_category(table.get_any(row, CATEGORY_ALIASES).unwrap_or_default())
                .with_description(table.get(row, "description").unwrap_or_default())
                .with_location(table.get(row, "location").unwrap_or_default());
            occurrences.push(occ);
        }

        occurrences
    }
}

impl Default for OccurrenceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a weekday cell; templates exported from spreadsheets sometimes
/// carry it as a float ("2.0").
fn parse_weekday(value: &str) -> Option<u8> {
    let weekday = match value.parse::<u8>() {
        Ok(n) => n,
        Err(_) => {
            let f = value.parse::<f64>().ok()?;
            if f.fract() != 0.0 || !(0.0..=6.0).contains(&f) {
                return None;
            }
            f as u8
        }
    };
    (weekday <= 6).then_some(weekday)
}

/// Parse an HH:mm or HH:mm:ss time of day.
fn parse_time(value: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value.trim(), fmt).ok())
}

/// Parse a timestamp, stripping any timezone offset down to the local
/// clock reading so all comparisons happen on one naive reference.
fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt);
    }
    // Date-only cells read as midnight
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}
