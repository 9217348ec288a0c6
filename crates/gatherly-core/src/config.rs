//! TOML-based planner configuration.
//!
//! Stores the caller-facing planning knobs: horizon length, the
//! minimum-attendance threshold, and a default candidate table path.
//! Configuration is stored at `~/.config/gatherly/config.toml`. The core
//! pipeline itself never reads this implicitly -- every core function
//! takes explicit parameters.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::generator::DEFAULT_HORIZON_DAYS;

/// Planner configuration.
///
/// Serialized to/from TOML at `~/.config/gatherly/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Days of weekly-template expansion, today inclusive
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    /// Occurrences with fewer free people are dropped before scoring
    #[serde(default = "default_min_attendees")]
    pub min_attendees: usize,
    /// Candidate table consulted when the caller names none
    #[serde(default)]
    pub events_file: Option<String>,
}

fn default_horizon_days() -> u32 {
    DEFAULT_HORIZON_DAYS
}

fn default_min_attendees() -> usize {
    1
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            min_attendees: default_min_attendees(),
            events_file: None,
        }
    }
}

impl PlannerConfig {
    /// Path to the configuration file
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gatherly")
            .join("config.toml")
    }

    /// Load from the default path, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn load_or_default() -> Self {
        Self::load(Self::config_path()).unwrap_or_default()
    }

    /// Load from an explicit path
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&contents).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save to the default path, creating parent directories as needed
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed {
                path: path.clone(),
                message: e.to_string(),
            })?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })
    }
}
