//! Error types for configuration, grid construction and simulation.

use thiserror::Error;

/// Invalid simulation configuration.
///
/// Raised once at construction, before any grid exists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Width or height is zero.
    #[error("Grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    /// `width * height` does not fit in `usize`.
    #[error("Grid of {width}x{height} cells is too large to address")]
    GridTooLarge { width: usize, height: usize },

    /// An initial density is negative or not a number.
    #[error("Initial {name} density must be a finite non-negative probability, got {value}")]
    InvalidDensity { name: &'static str, value: f64 },

    /// Believer and corrected densities together exceed the whole population.
    #[error(
        "Initial densities cannot sum to more than 1 (believer {believer} + corrected {corrected})"
    )]
    DensityBudgetExceeded { believer: f64, corrected: f64 },

    /// A transition rate is NaN or infinite.
    #[error("Rate {name} must be finite, got {value}")]
    NonFiniteRate { name: &'static str, value: f64 },
}

/// Explicit initial grid disagrees with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("Provided grid height {actual} does not match configured height {expected}")]
    HeightMismatch { expected: usize, actual: usize },

    #[error("Provided grid row {row} has width {actual}, configured width is {expected}")]
    WidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid cell value {value} at ({row}, {col})")]
    InvalidCell {
        row: usize,
        col: usize,
        value: String,
    },
}

/// A raw value that does not name any [`CellState`](crate::CellState).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid cell state value: {0}")]
pub struct InvalidCellState(pub String);

/// Errors surfaced by the simulation engine and the history summarizer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Explicit initial grid has the wrong shape or contents.
    #[error("Initial grid rejected: {0}")]
    Shape(#[from] GridError),

    /// A broken engine invariant. Indicates a defect, never a runtime condition.
    #[error("Internal consistency violated: {0}")]
    InternalConsistency(String),

    /// Summarizing a history with no snapshots.
    #[error("History cannot be empty")]
    EmptyHistory,
}
