//! # Gatherly Core Library
//!
//! This library provides the slot-matching and scoring engine for
//! Gatherly: given candidate activity occurrences, per-person busy
//! calendars, and per-person interest tags, it computes who is free for
//! each occurrence and ranks the candidates by a composite of group
//! availability and interest match.
//!
//! ## Architecture
//!
//! - **Candidate Generator**: expands weekly-recurrence templates into
//!   dated occurrences over a fixed horizon and normalizes fixed-date
//!   tables
//! - **Availability**: strict half-open interval overlap checks and
//!   order-preserving attendance resolution
//! - **Interest**: exact keyword matching with a TF-IDF cosine-similarity
//!   fallback, both behind one strategy interface
//! - **Ranking**: the `availability + interest` composite with
//!   deterministic tie-breaks
//!
//! The pipeline is stateless and re-entrant: busy maps and tag maps are
//! read-only snapshots materialized by the caller (calendar fetch and
//! profile storage live outside this crate), and one planning run produces
//! a fresh result vector with no aliasing back into the inputs.
//!
//! ## Key Entry Points
//!
//! - [`OccurrenceGenerator`]: candidate expansion
//! - [`rank`]: one full planning pass
//! - [`PlannerConfig`]: TOML configuration for the surrounding application

pub mod availability;
pub mod config;
pub mod error;
pub mod generator;
pub mod interest;
pub mod plan;
pub mod ranking;

pub use availability::{is_free, resolve_attendance};
pub use config::PlannerConfig;
pub use error::{ConfigError, CoreError, SourceError, ValidationError};
pub use generator::{load_candidates, CandidateTable, OccurrenceGenerator, DEFAULT_HORIZON_DAYS};
pub use interest::{
    score_interest_batch, InterestInput, InterestScore, InterestStrategy, KeywordStrategy,
    TfidfStrategy,
};
pub use plan::{
    ActivityOccurrence, BusyInterval, BusyMap, ScoredOccurrence, TagMap, WeeklySlot,
    DEFAULT_CATEGORY, UNKNOWN_LOCATION,
};
pub use ranking::rank;
