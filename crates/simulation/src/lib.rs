//! Stochastic cellular automaton for misinformation spread.
//!
//! Given the same configuration and seed, an engine produces an identical
//! history every run.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  SimulationEngine                       │
//! │                                                         │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     grid: Grid (step t-1, read only)               │ │
//! │  │     Moore-8 neighbour counts, toroidal or bounded  │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     TransitionRule + SimRng                        │ │
//! │  │     one Bernoulli draw per cell, row-major         │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     next: Grid (step t) → swap → Snapshot          │ │
//! │  └────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The completed [`History`](misinfo_types::History) is reduced to
//! [`SummaryMetrics`](misinfo_types::SummaryMetrics) by [`summarize`].

mod engine;
mod grid;
mod rng;
mod rule;
mod summary;

pub use engine::SimulationEngine;
pub use grid::{Grid, NeighborCounts};
pub use rng::SimRng;
pub use rule::{clamp01, TransitionRule};
pub use summary::summarize;
