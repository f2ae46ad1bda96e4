//! Simulation configuration.

use crate::{ConfigError, Topology};
use serde::{Deserialize, Serialize};

/// Configuration for a single automaton run.
///
/// Built once, validated once, then owned by an engine. Omitted fields fall
/// back to [`SimulationConfig::default`] when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of columns.
    pub width: usize,

    /// Number of rows.
    pub height: usize,

    /// Number of transitions applied by `run()`.
    pub steps: usize,

    /// Probability that a randomly generated cell starts as a believer.
    pub initial_believer_density: f64,

    /// Probability that a randomly generated cell starts corrected.
    pub initial_corrected_density: f64,

    /// Scales the believer-neighbour ratio into an infection probability.
    pub belief_spread_rate: f64,

    /// Constant per-step chance that a believer is fact-checked.
    pub factcheck_rate: f64,

    /// Scales the corrected-neighbour ratio into extra correction pressure.
    pub peer_correction_rate: f64,

    /// Scales the believer-neighbour ratio into a relapse probability.
    pub relapse_rate: f64,

    /// Edge handling.
    pub topology: Topology,

    /// Random seed. `None` draws from OS entropy and is not reproducible.
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Create a configuration for a `width` x `height` grid with default rates.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Set the number of steps.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Set both initial densities.
    pub fn with_initial_densities(mut self, believer: f64, corrected: f64) -> Self {
        self.initial_believer_density = believer;
        self.initial_corrected_density = corrected;
        self
    }

    /// Set the belief spread rate.
    pub fn with_belief_spread_rate(mut self, rate: f64) -> Self {
        self.belief_spread_rate = rate;
        self
    }

    /// Set the fact-check rate.
    pub fn with_factcheck_rate(mut self, rate: f64) -> Self {
        self.factcheck_rate = rate;
        self
    }

    /// Set the peer-correction rate.
    pub fn with_peer_correction_rate(mut self, rate: f64) -> Self {
        self.peer_correction_rate = rate;
        self
    }

    /// Set the relapse rate.
    pub fn with_relapse_rate(mut self, rate: f64) -> Self {
        self.relapse_rate = rate;
        self
    }

    /// Set all four transition rates at once.
    pub fn with_rates(
        self,
        spread: f64,
        factcheck: f64,
        peer_correction: f64,
        relapse: f64,
    ) -> Self {
        self.with_belief_spread_rate(spread)
            .with_factcheck_rate(factcheck)
            .with_peer_correction_rate(peer_correction)
            .with_relapse_rate(relapse)
    }

    /// Set the topology.
    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    /// Use bounded (non-wrapping) edges.
    pub fn bounded(self) -> Self {
        self.with_topology(Topology::Bounded)
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Clear the random seed so runs draw from OS entropy.
    pub fn without_seed(mut self) -> Self {
        self.seed = None;
        self
    }

    /// Total number of cells. Only meaningful after [`validate`](Self::validate).
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Check every configuration invariant.
    ///
    /// Rates are only required to be finite: values outside `[0, 1]` are
    /// legal and get clamped when turned into probabilities.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
            });
        }

        for (name, value) in [
            ("believer", self.initial_believer_density),
            ("corrected", self.initial_corrected_density),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDensity { name, value });
            }
        }

        if self.initial_believer_density + self.initial_corrected_density > 1.0 {
            return Err(ConfigError::DensityBudgetExceeded {
                believer: self.initial_believer_density,
                corrected: self.initial_corrected_density,
            });
        }

        for (name, value) in [
            ("belief_spread_rate", self.belief_spread_rate),
            ("factcheck_rate", self.factcheck_rate),
            ("peer_correction_rate", self.peer_correction_rate),
            ("relapse_rate", self.relapse_rate),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteRate { name, value });
            }
        }

        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 80,
            steps: 160,
            initial_believer_density: 0.03,
            initial_corrected_density: 0.05,
            belief_spread_rate: 0.60,
            factcheck_rate: 0.04,
            peer_correction_rate: 0.45,
            relapse_rate: 0.07,
            topology: Topology::Toroidal,
            seed: None,
        }
    }
}
