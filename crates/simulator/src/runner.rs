//! Scenario and repetition execution.

use crate::metrics::mean_trajectory;
use crate::{
    ExperimentConfig, ExperimentReport, RunRecord, Scenario, ScenarioAggregate, ScenarioReport,
    SimulatorError,
};
use misinfo_simulation::{summarize, SimulationEngine};
use misinfo_types::{History, SimulationError};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, trace};

/// Runs every repetition of every scenario in an experiment.
///
/// Each repetition owns its engine and random stream, so repetitions share
/// no state and may run on any thread. Results are always collected in
/// repetition order, so parallel and sequential runs report identically.
pub struct Simulator {
    config: ExperimentConfig,
}

impl Simulator {
    /// Validate the experiment and prepare to run it.
    pub fn new(config: ExperimentConfig) -> Result<Self, SimulatorError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Run the whole experiment.
    pub fn run(&self) -> Result<ExperimentReport, SimulatorError> {
        info!(
            scenarios = self.config.scenarios.len(),
            repetitions = self.config.repetitions,
            width = self.config.base.width,
            height = self.config.base.height,
            parallel = self.config.parallel,
            "Starting experiment"
        );
        let started = Instant::now();

        let scenarios = self
            .config
            .scenarios
            .iter()
            .enumerate()
            .map(|(index, scenario)| self.run_scenario(index, scenario))
            .collect::<Result<Vec<_>, _>>()?;

        info!(elapsed = ?started.elapsed(), "Experiment complete");

        Ok(ExperimentReport { scenarios })
    }

    /// Run all repetitions of one scenario and aggregate them.
    fn run_scenario(
        &self,
        index: usize,
        scenario: &Scenario,
    ) -> Result<ScenarioReport, SimulatorError> {
        let started = Instant::now();
        let reps = 0..self.config.repetitions;

        let outcomes: Vec<(RunRecord, History)> = if self.config.parallel {
            reps.into_par_iter()
                .map(|rep| self.run_repetition(index, scenario, rep))
                .collect::<Result<_, _>>()?
        } else {
            reps.map(|rep| self.run_repetition(index, scenario, rep))
                .collect::<Result<_, _>>()?
        };

        let (runs, histories): (Vec<_>, Vec<_>) = outcomes.into_iter().unzip();
        let aggregate = ScenarioAggregate::from_runs(&scenario.name, &runs);
        let timeseries = mean_trajectory(&scenario.name, &histories);

        info!(
            scenario = %scenario.name,
            peak_believer_ratio_mean = aggregate.peak_believer_ratio_mean,
            final_believer_ratio_mean = aggregate.final_believer_ratio_mean,
            elapsed = ?started.elapsed(),
            "Scenario complete"
        );

        Ok(ScenarioReport {
            name: scenario.name.clone(),
            runs,
            aggregate,
            timeseries,
        })
    }

    /// Run and summarize a single repetition.
    pub fn run_repetition(
        &self,
        index: usize,
        scenario: &Scenario,
        rep: usize,
    ) -> Result<(RunRecord, History), SimulatorError> {
        let seed = self.config.seed_for(index, rep);
        let config = scenario.overrides.apply(&self.config.base).with_seed(seed);
        let failed = |source: SimulationError| SimulatorError::Run {
            scenario: scenario.name.clone(),
            rep,
            source,
        };

        debug!(scenario = %scenario.name, rep, seed, "Starting repetition");

        let mut engine = SimulationEngine::new(config).map_err(failed)?;
        let history = engine.run().map_err(failed)?;
        let summary = summarize(&history).map_err(failed)?;

        trace!(
            scenario = %scenario.name,
            rep,
            peak_believer_ratio = summary.peak_believer_ratio,
            time_to_peak = summary.time_to_peak,
            "Repetition complete"
        );

        Ok((RunRecord::new(&scenario.name, rep, seed, &summary), history))
    }
}
