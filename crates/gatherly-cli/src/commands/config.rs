use clap::Subcommand;
use gatherly_core::error::Result;
use gatherly_core::{ConfigError, PlannerConfig};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Update configuration values
    Set {
        /// Planning horizon in days
        #[arg(long)]
        horizon_days: Option<u32>,
        /// Minimum free attendees per occurrence
        #[arg(long)]
        min_attendees: Option<usize>,
        /// Default candidate table path
        #[arg(long)]
        events_file: Option<String>,
    },
    /// Print the configuration file path
    Path,
}

pub fn run(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = PlannerConfig::load_or_default();
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
            println!("{rendered}");
        }
        ConfigAction::Set {
            horizon_days,
            min_attendees,
            events_file,
        } => {
            let mut config = PlannerConfig::load_or_default();
            if let Some(days) = horizon_days {
                config.horizon_days = days;
            }
            if let Some(min) = min_attendees {
                config.min_attendees = min;
            }
            if let Some(path) = events_file {
                config.events_file = Some(path);
            }
            config.save()?;
            println!("configuration updated");
        }
        ConfigAction::Path => {
            println!("{}", PlannerConfig::config_path().display());
        }
    }
    Ok(())
}
