//! Error types for the experiment driver.

use misinfo_types::{ConfigError, SimulationError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring, running or exporting an experiment.
#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("Experiment needs at least one scenario")]
    NoScenarios,

    #[error("Experiment needs at least one repetition")]
    NoRepetitions,

    #[error("Duplicate scenario name: {0}")]
    DuplicateScenario(String),

    /// A scenario's effective configuration failed validation.
    #[error("Scenario {scenario} has an invalid configuration: {source}")]
    InvalidScenario {
        scenario: String,
        source: ConfigError,
    },

    /// A repetition failed inside the engine.
    #[error("Scenario {scenario} repetition {rep} failed: {source}")]
    Run {
        scenario: String,
        rep: usize,
        source: SimulationError,
    },

    #[error("Failed to read config {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ParseConfig(#[from] toml::de::Error),

    #[error("Failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Export { path: PathBuf, source: csv::Error },
}
