//! Misinformation experiment driver.
//!
//! Runs the automaton from `misinfo-simulation` many times over a table of
//! policy scenarios and aggregates the results.
//!
//! # Architecture
//!
//! The driver provides:
//!
//! - **Scenarios**: named overrides of the base configuration (fact-checking,
//!   peer correction, initial literacy)
//! - **Repetitions**: independently seeded runs per scenario, optionally on the
//!   rayon pool
//! - **Aggregation**: per-run summaries, per-scenario mean and standard
//!   deviation, and mean believer/corrected trajectories
//! - **Export**: CSV files for downstream analysis
//!
//! # Example
//!
//! ```ignore
//! use misinfo_simulator::{export_report, ExperimentConfig, Simulator};
//!
//! let config = ExperimentConfig::default().with_repetitions(5);
//! let report = Simulator::new(config)?.run()?;
//!
//! export_report(&report, "outputs/misinformation".as_ref())?;
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod metrics;
pub mod runner;

pub use config::{ExperimentConfig, Scenario, ScenarioOverrides};
pub use error::SimulatorError;
pub use export::{export_report, ExportPaths};
pub use metrics::{
    mean_trajectory, ExperimentReport, MetricStats, RunRecord, ScenarioAggregate, ScenarioReport,
    TimeseriesRow,
};
pub use runner::Simulator;
