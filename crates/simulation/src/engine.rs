//! Step and run loop.

use crate::{Grid, SimRng, TransitionRule};
use misinfo_types::{
    CellState, History, SimulationConfig, SimulationError, Snapshot, TransitionCounts,
    TransitionKind,
};
use std::fmt;
use tracing::{debug, trace};

/// Owns one grid and advances it synchronously.
///
/// Every cell's next state is computed from the previous step's grid only.
/// The engine writes into a scratch buffer and swaps it in at the end of
/// the step, so no cell ever observes a neighbour's same-step update.
pub struct SimulationEngine {
    config: SimulationConfig,
    rule: TransitionRule,
    grid: Grid,
    scratch: Grid,
    rng: SimRng,
    step: usize,
}

impl SimulationEngine {
    /// Create an engine with a randomly generated initial grid.
    ///
    /// Grid generation consumes `width * height` draws before the first
    /// transition.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let mut rng = SimRng::new(config.seed);
        let grid = Grid::random(&config, &mut rng);

        debug!(
            width = config.width,
            height = config.height,
            seed = ?config.seed,
            "Generated initial grid"
        );

        Ok(Self::assemble(config, grid, rng))
    }

    /// Create an engine from explicit rows.
    ///
    /// Values are normalised through `TryInto<CellState>`, so raw integer
    /// codes and [`CellState`] rows are both accepted. The seed still
    /// drives every transition draw.
    pub fn with_initial_grid<T>(
        config: SimulationConfig,
        rows: &[Vec<T>],
    ) -> Result<Self, SimulationError>
    where
        T: Copy + fmt::Debug + TryInto<CellState>,
    {
        config.validate()?;

        let grid = Grid::from_rows(rows, config.width, config.height, config.topology)?;
        let rng = SimRng::new(config.seed);

        debug!(
            width = config.width,
            height = config.height,
            seed = ?config.seed,
            "Loaded explicit initial grid"
        );

        Ok(Self::assemble(config, grid, rng))
    }

    fn assemble(config: SimulationConfig, grid: Grid, rng: SimRng) -> Self {
        Self {
            rule: TransitionRule::from_config(&config),
            scratch: grid.clone(),
            grid,
            config,
            rng,
            step: 0,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current grid, read only.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of transitions applied so far.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Random draws consumed so far, including grid generation.
    pub fn random_draws(&self) -> u64 {
        self.rng.draws()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Simulation
    // ═══════════════════════════════════════════════════════════════════════════

    /// Counts and ratios of the current grid, with zeroed transition counts.
    pub fn snapshot(&self) -> Result<Snapshot, SimulationError> {
        self.snapshot_with(TransitionCounts::default())
    }

    fn snapshot_with(&self, transitions: TransitionCounts) -> Result<Snapshot, SimulationError> {
        let counts = self.grid.population();
        let expected = self.config.cell_count();

        if counts.total() != expected {
            return Err(SimulationError::InternalConsistency(format!(
                "step {} counted {} cells, grid holds {}",
                self.step,
                counts.total(),
                expected
            )));
        }

        Ok(Snapshot::new(self.step, counts, transitions))
    }

    /// Apply the transition rule to every cell once.
    ///
    /// Cells are visited row by row, left to right, each consuming exactly
    /// one draw. Returns the snapshot of the new state annotated with this
    /// step's transition counts.
    pub fn advance(&mut self) -> Result<Snapshot, SimulationError> {
        let mut transitions = TransitionCounts::default();

        for row in 0..self.grid.height() {
            for col in 0..self.grid.width() {
                let current = self.grid[(row, col)];
                let neighbors = self.grid.count_neighbor_states(row, col);
                let next = self.rule.apply(current, &neighbors, &mut self.rng);

                if let Some(kind) = TransitionKind::classify(current, next) {
                    transitions.record(kind);
                }
                self.scratch.set(row, col, next);
            }
        }

        std::mem::swap(&mut self.grid, &mut self.scratch);
        self.step += 1;

        trace!(
            step = self.step,
            new_believers = transitions.new_believers,
            new_corrected = transitions.new_corrected,
            relapses = transitions.relapses,
            "Advanced grid"
        );

        self.snapshot_with(transitions)
    }

    /// Snapshot the current state, then advance `steps` times.
    ///
    /// The returned history has `steps + 1` entries. Calling `run` again
    /// continues from where the previous run stopped.
    pub fn run(&mut self) -> Result<History, SimulationError> {
        let steps = self.config.steps;
        let mut history = Vec::with_capacity(steps + 1);

        history.push(self.snapshot()?);
        for _ in 0..steps {
            history.push(self.advance()?);
        }

        if let Some(last) = history.last() {
            debug!(
                steps,
                final_step = last.step,
                believer_ratio = last.believer_ratio,
                corrected_ratio = last.corrected_ratio,
                draws = self.rng.draws(),
                "Run complete"
            );
        }

        Ok(history)
    }
}
