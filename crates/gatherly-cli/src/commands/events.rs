use std::path::PathBuf;

use chrono::Local;
use clap::Args;
use gatherly_core::error::Result;
use gatherly_core::{CoreError, OccurrenceGenerator, PlannerConfig};

#[derive(Args)]
pub struct EventsArgs {
    /// Candidate table (CSV)
    #[arg(long)]
    pub events: Option<PathBuf>,
    /// Planning horizon in days (default from config)
    #[arg(long)]
    pub horizon: Option<u32>,
    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: EventsArgs) -> Result<()> {
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

    let today = Local::now().date_naive();
    let occurrences = OccurrenceGenerator::new()
        .with_horizon(horizon)
        .generate_from_path(&events, today);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&occurrences)?);
        return Ok(());
    }

    if occurrences.is_empty() {
        println!("no candidates generated");
        return Ok(());
    }

    for occ in &occurrences {
        println!(
            "{} - {}  [{}]  {}",
            occ.start.format("%a %Y-%m-%d %H:%M"),
            occ.end.format("%H:%M"),
            occ.category,
            occ.title,
        );
    }
    println!("{} occurrences over {} days", occurrences.len(), horizon);
    Ok(())
}
