use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use clap::Args;
use gatherly_core::error::Result;
use gatherly_core::{
    rank, BusyMap, CoreError, OccurrenceGenerator, PlannerConfig, ScoredOccurrence, TagMap,
};
use serde::Serialize;

#[derive(Args)]
pub struct PlanArgs {
    /// Candidate table (CSV): fixed dates or a weekly template
    #[arg(long)]
    pub events: Option<PathBuf>,
    /// Busy map JSON: {"Alice": [{"start": "2026-03-02T18:00:00", ...}]}
    #[arg(long)]
    pub busy: Option<PathBuf>,
    /// Tag map JSON: {"Alice": "Sport, Music"}
    #[arg(long)]
    pub tags: Option<PathBuf>,
    /// Selected group members
    #[arg(long, value_delimiter = ',', required = true)]
    pub people: Vec<String>,
    /// Minimum free attendees per occurrence (default from config)
    #[arg(long)]
    pub min_attendees: Option<usize>,
    /// Planning horizon in days (default from config)
    #[arg(long)]
    pub horizon: Option<u32>,
    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// One ranked result flattened for `--json` output.
#[derive(Serialize)]
struct PlanRow {
    position: usize,
    title: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    duration_minutes: i64,
    category: String,
    location: String,
    attendees: Vec<String>,
    attendee_count: usize,
    matched_tags: String,
    interest_score: f64,
    availability_score: f64,
    final_interest_score: f64,
    sort_score: f64,
}

impl PlanRow {
    fn new(position: usize, scored: &ScoredOccurrence) -> Self {
        Self {
            position,
            title: scored.occurrence.title.clone(),
            start: scored.occurrence.start,
            end: scored.occurrence.end,
            duration_minutes: scored.occurrence.duration_minutes(),
            category: scored.occurrence.category.clone(),
            location: scored.occurrence.location.clone(),
            attendees: scored.attendees.clone(),
            attendee_count: scored.attendee_count,
            matched_tags: scored.matched_tags_label(),
            interest_score: scored.interest_score,
            availability_score: scored.availability_score,
            final_interest_score: scored.final_interest_score,
            sort_score: scored.sort_score,
        }
    }
}

pub fn run(args: PlanArgs) -> Result<()> {
    let config = PlannerConfig::load_or_default();

    let events = args
        .events
        .or_else(|| config.events_file.clone().map(PathBuf::from))
        .ok_or_else(|| {
            CoreError::Custom(
                "no candidate table: pass --events or set events_file in the config".to_string(),
            )
        })?;
    let horizon = args.horizon.unwrap_or(config.horizon_days);
    let min_attendees = args.min_attendees.unwrap_or(config.min_attendees);

    let busy_map: BusyMap = match &args.busy {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => BusyMap::new(),
    };
    let tag_map: TagMap = match &args.tags {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => TagMap::new(),
    };

    let today = Local::now().date_naive();
    let occurrences = OccurrenceGenerator::new()
        .with_horizon(horizon)
        .generate_from_path(&events, today);
    log::info!(
        "generated {} occurrences over {} days",
        occurrences.len(),
        horizon
    );

    let ranked = rank(&occurrences, &args.people, &tag_map, &busy_map, min_attendees);

    if args.json {
        let rows: Vec<PlanRow> = ranked
            .iter()
            .enumerate()
            .map(|(i, scored)| PlanRow::new(i + 1, scored))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if ranked.is_empty() {
        println!("no matching slots found");
        return Ok(());
    }

    for (position, scored) in ranked.iter().enumerate() {
        println!(
            "{:>2}. {}  {} - {}",
            position + 1,
            scored.occurrence.title,
            scored.occurrence.start.format("%a %Y-%m-%d %H:%M"),
            scored.occurrence.end.format("%H:%M"),
        );
        println!(
            "    attendees: {} ({}/{})",
            scored.attendees_label(),
            scored.attendee_count,
            args.people.len(),
        );
        println!(
            "    tags: {}  interest: {:.2}  availability: {:.2}  score: {:.2}",
            scored.matched_tags_label(),
            scored.final_interest_score,
            scored.availability_score,
            scored.sort_score,
        );
    }
    Ok(())
}
