//! Planning data model: busy intervals, activity occurrences, weekly
//! template slots, and scored results.
//!
//! All timestamps are timezone-naive (`chrono::NaiveDateTime`). The busy
//! map and tag map arrive from external collaborators (calendar fetch,
//! profile storage) already expanded and normalized to a single reference;
//! the core treats them as read-only snapshots for the duration of one
//! planning run.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Category label used when a candidate source carries none.
pub const DEFAULT_CATEGORY: &str = "General";

/// Location sentinel for occurrences without a known venue.
pub const UNKNOWN_LOCATION: &str = "unknown";

/// Busy intervals per person, keyed by display name.
pub type BusyMap = HashMap<String, Vec<BusyInterval>>;

/// Comma-separated interest tags per person, keyed by display name.
pub type TagMap = HashMap<String, String>;

/// A half-open time range `[start, end)` during which a person is
/// unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl BusyInterval {
    /// Create a new busy interval
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Strict overlap test against a candidate window.
    ///
    /// Touching boundaries (the window ends exactly when this interval
    /// starts, or vice versa) do not count as a conflict.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < self.end && end > self.start
    }
}

/// One concrete dated instance of a candidate activity.
///
/// Generated fresh per planning run by the candidate generator; never
/// persisted by the core. The invariant `start < end` holds for every
/// constructed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityOccurrence {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub category: String,
    pub description: String,
    pub location: String,
}

impl ActivityOccurrence {
    /// Create a new occurrence, rejecting zero-duration or inverted windows.
    pub fn new(
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::InvalidTimeRange { start, end });
        }
        Ok(Self {
            title: title.into(),
            start,
            end,
            category: DEFAULT_CATEGORY.to_string(),
            description: String::new(),
            location: UNKNOWN_LOCATION.to_string(),
        })
    }

    /// Set the category (empty input keeps the default label)
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        if !category.trim().is_empty() {
            self.category = category;
        }
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the location (empty input keeps the unknown sentinel)
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        let location = location.into();
        if !location.trim().is_empty() {
            self.location = location;
        }
        self
    }

    /// Lowercase searchable blob of title, category, and description,
    /// used for keyword matching and the similarity fallback.
    pub fn feature_text(&self) -> String {
        format!("{} {} {}", self.title, self.category, self.description).to_lowercase()
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// A weekly-recurrence template row.
///
/// Describes an activity that repeats on one weekday at fixed times of
/// day; the candidate generator expands it into dated occurrences over
/// the planning horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySlot {
    /// 0=Monday .. 6=Sunday
    pub weekday: u8,
    pub name: String,
    /// HH:mm
    pub start_time: String,
    /// HH:mm; at or before `start_time` means the activity runs overnight
    pub end_time: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// An occurrence with its derived availability and interest metrics.
///
/// Constructed once per planning run by the ranking engine and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredOccurrence {
    pub occurrence: ActivityOccurrence,
    /// Free members of the selected group, in selection order
    pub attendees: Vec<String>,
    pub attendee_count: usize,
    /// Interest tags found in the occurrence text that belong to at least
    /// one attendee
    pub matched_tags: BTreeSet<String>,
    /// Fraction of attendees with a direct keyword match, in [0, 1]
    pub interest_score: f64,
    /// Fraction of the entire selected group that is free, in [0, 1]
    pub availability_score: f64,
    /// Interest score refined by the similarity fallback, in [0, 1]
    pub final_interest_score: f64,
    /// availability_score + final_interest_score, in [0, 2]
    pub sort_score: f64,
}

impl ScoredOccurrence {
    /// Matched tags formatted for display; "General" when nothing matched.
    pub fn matched_tags_label(&self) -> String {
        if self.matched_tags.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            self.matched_tags
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    /// Attendees formatted for display
    pub fn attendees_label(&self) -> String {
        self.attendees.join(", ")
    }
}
