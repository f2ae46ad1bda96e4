//! Configuration types for the experiment driver.

use crate::SimulatorError;
use misinfo_types::SimulationConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Seed spacing between consecutive scenarios.
///
/// Repetition `r` of scenario `s` runs with `base_seed + s * SEED_STRIDE + r`,
/// so scenarios never share seeds while `repetitions <= SEED_STRIDE`.
pub const SEED_STRIDE: u64 = 1000;

/// Configuration for a full experiment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Configuration every scenario starts from. Its seed is ignored;
    /// each repetition gets a derived seed.
    pub base: SimulationConfig,

    /// Independent runs per scenario.
    pub repetitions: usize,

    /// Seed of repetition 0 of the first scenario.
    pub base_seed: u64,

    /// Run the repetitions of a scenario on the rayon pool.
    pub parallel: bool,

    /// Scenarios, in report order.
    pub scenarios: Vec<Scenario>,
}

impl ExperimentConfig {
    /// Create an experiment over the built-in scenarios.
    pub fn new(base: SimulationConfig) -> Self {
        Self {
            base,
            ..Default::default()
        }
    }

    /// Parse from TOML. Omitted fields take their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, SimulatorError> {
        Ok(toml::from_str(input)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self, SimulatorError> {
        let input = std::fs::read_to_string(path).map_err(|source| SimulatorError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&input)
    }

    /// Set the number of repetitions per scenario.
    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Set the base seed.
    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    /// Replace the scenario table.
    pub fn with_scenarios(mut self, scenarios: Vec<Scenario>) -> Self {
        self.scenarios = scenarios;
        self
    }

    /// Run repetitions one after another on the calling thread.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Seed for repetition `rep` of the scenario at `scenario_index`.
    pub fn seed_for(&self, scenario_index: usize, rep: usize) -> u64 {
        self.base_seed
            .wrapping_add((scenario_index as u64).wrapping_mul(SEED_STRIDE))
            .wrapping_add(rep as u64)
    }

    /// Effective configuration of one repetition.
    pub fn run_config(&self, scenario_index: usize, rep: usize) -> Option<SimulationConfig> {
        let scenario = self.scenarios.get(scenario_index)?;
        Some(
            scenario
                .overrides
                .apply(&self.base)
                .with_seed(self.seed_for(scenario_index, rep)),
        )
    }

    /// Check the experiment shape and every scenario's effective configuration.
    pub fn validate(&self) -> Result<(), SimulatorError> {
        if self.scenarios.is_empty() {
            return Err(SimulatorError::NoScenarios);
        }
        if self.repetitions == 0 {
            return Err(SimulatorError::NoRepetitions);
        }

        let mut names = HashSet::new();
        for scenario in &self.scenarios {
            if !names.insert(scenario.name.as_str()) {
                return Err(SimulatorError::DuplicateScenario(scenario.name.clone()));
            }
            scenario
                .overrides
                .apply(&self.base)
                .validate()
                .map_err(|source| SimulatorError::InvalidScenario {
                    scenario: scenario.name.clone(),
                    source,
                })?;
        }

        Ok(())
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            base: SimulationConfig::default(),
            repetitions: 20,
            base_seed: 2026,
            parallel: true,
            scenarios: Scenario::builtin(),
        }
    }
}

/// A named policy scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Label used in reports and exported rows.
    pub name: String,

    /// Changes applied on top of the base configuration.
    #[serde(default)]
    pub overrides: ScenarioOverrides,
}

impl Scenario {
    /// Create a scenario with no overrides.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            overrides: ScenarioOverrides::default(),
        }
    }

    /// Set the overrides.
    pub fn with_overrides(mut self, overrides: ScenarioOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// The standard policy comparison: three fact-checking intensities and a
    /// media literacy campaign.
    pub fn builtin() -> Vec<Self> {
        vec![
            Scenario::new("low_factcheck")
                .with_overrides(ScenarioOverrides::default().with_factcheck_rate(0.01)),
            Scenario::new("moderate_factcheck")
                .with_overrides(ScenarioOverrides::default().with_factcheck_rate(0.04)),
            Scenario::new("intense_factcheck")
                .with_overrides(ScenarioOverrides::default().with_factcheck_rate(0.08)),
            Scenario::new("literacy_campaign").with_overrides(
                ScenarioOverrides::default()
                    .with_factcheck_rate(0.04)
                    .with_initial_corrected_density(0.20)
                    .with_peer_correction_rate(0.55),
            ),
        ]
    }
}

/// Optional replacements for base configuration fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioOverrides {
    pub steps: Option<usize>,
    pub initial_believer_density: Option<f64>,
    pub initial_corrected_density: Option<f64>,
    pub belief_spread_rate: Option<f64>,
    pub factcheck_rate: Option<f64>,
    pub peer_correction_rate: Option<f64>,
    pub relapse_rate: Option<f64>,
}

impl ScenarioOverrides {
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }

    pub fn with_initial_believer_density(mut self, density: f64) -> Self {
        self.initial_believer_density = Some(density);
        self
    }

    pub fn with_initial_corrected_density(mut self, density: f64) -> Self {
        self.initial_corrected_density = Some(density);
        self
    }

    pub fn with_belief_spread_rate(mut self, rate: f64) -> Self {
        self.belief_spread_rate = Some(rate);
        self
    }

    pub fn with_factcheck_rate(mut self, rate: f64) -> Self {
        self.factcheck_rate = Some(rate);
        self
    }

    pub fn with_peer_correction_rate(mut self, rate: f64) -> Self {
        self.peer_correction_rate = Some(rate);
        self
    }

    pub fn with_relapse_rate(mut self, rate: f64) -> Self {
        self.relapse_rate = Some(rate);
        self
    }

    /// Copy `base` with every present override applied.
    pub fn apply(&self, base: &SimulationConfig) -> SimulationConfig {
        let mut config = base.clone();
        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if let Some(density) = self.initial_believer_density {
            config.initial_believer_density = density;
        }
        if let Some(density) = self.initial_corrected_density {
            config.initial_corrected_density = density;
        }
        if let Some(rate) = self.belief_spread_rate {
            config.belief_spread_rate = rate;
        }
        if let Some(rate) = self.factcheck_rate {
            config.factcheck_rate = rate;
        }
        if let Some(rate) = self.peer_correction_rate {
            config.peer_correction_rate = rate;
        }
        if let Some(rate) = self.relapse_rate {
            config.relapse_rate = rate;
        }
        config
    }
}
