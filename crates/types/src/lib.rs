//! Core types for the misinformation cellular automaton.
//!
//! This crate holds the plain data shared by the simulation engine and the
//! experiment driver: cell states, grid topology, run configuration, the
//! per-step [`Snapshot`] record and the [`SummaryMetrics`] reduction.
//!
//! Nothing here touches randomness or grid storage. Those live in
//! `misinfo-simulation`.

mod cell;
mod config;
mod error;
mod snapshot;
mod summary;
mod topology;

pub use cell::CellState;
pub use config::SimulationConfig;
pub use error::{ConfigError, GridError, InvalidCellState, SimulationError};
pub use snapshot::{History, PopulationCounts, Snapshot, TransitionCounts, TransitionKind};
pub use summary::{SummaryMetric, SummaryMetrics};
pub use topology::{Topology, MOORE_OFFSETS};
