//! Core error types for gatherly-core.
//!
//! The planning pipeline itself never fails: malformed rows are skipped,
//! degenerate batches fall back to neutral constants, and similarity
//! failures degrade to the exact-match score. These types cover the seams
//! around the pipeline instead: candidate-source IO, occurrence
//! construction, and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Core error type for gatherly-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Candidate-source errors
    #[error("Candidate source error: {0}")]
    Source(#[from] SourceError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Candidate-source errors.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Failed to open or decode the tabular source
    #[error("Failed to read candidate source at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Source has no header row to match columns against
    #[error("Candidate source at {path} has no header row")]
    MissingHeader { path: PathBuf },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid time range
    #[error("Invalid time range: end ({end}) must be after start ({start})")]
    InvalidTimeRange {
        start: chrono::NaiveDateTime,
        end: chrono::NaiveDateTime,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
