//! Per-cell stochastic transition rule.

use crate::{NeighborCounts, SimRng};
use misinfo_types::{CellState, SimulationConfig};

/// Clamp to a valid Bernoulli parameter.
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Rates driving the three-state belief model.
///
/// Each state has exactly one outgoing transition:
///
/// | from      | to        | probability                                        |
/// |-----------|-----------|----------------------------------------------------|
/// | unaware   | believer  | `spread * believer_ratio`                          |
/// | believer  | corrected | `factcheck + peer_correction * corrected_ratio`    |
/// | corrected | believer  | `relapse * believer_ratio`                         |
///
/// All probabilities are clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionRule {
    pub belief_spread_rate: f64,
    pub factcheck_rate: f64,
    pub peer_correction_rate: f64,
    pub relapse_rate: f64,
}

impl TransitionRule {
    pub fn new(
        belief_spread_rate: f64,
        factcheck_rate: f64,
        peer_correction_rate: f64,
        relapse_rate: f64,
    ) -> Self {
        Self {
            belief_spread_rate,
            factcheck_rate,
            peer_correction_rate,
            relapse_rate,
        }
    }

    /// Take the rates from a run configuration.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.belief_spread_rate,
            config.factcheck_rate,
            config.peer_correction_rate,
            config.relapse_rate,
        )
    }

    /// State a cell in `state` moves to when its draw succeeds.
    pub fn target(state: CellState) -> CellState {
        match state {
            CellState::Unaware => CellState::Believer,
            CellState::Believer => CellState::Corrected,
            CellState::Corrected => CellState::Believer,
        }
    }

    /// Probability that a cell in `state` leaves it this step.
    pub fn probability(&self, state: CellState, neighbors: &NeighborCounts) -> f64 {
        match state {
            CellState::Unaware => clamp01(self.belief_spread_rate * neighbors.believer_ratio()),
            CellState::Believer => clamp01(
                self.factcheck_rate + self.peer_correction_rate * neighbors.corrected_ratio(),
            ),
            CellState::Corrected => clamp01(self.relapse_rate * neighbors.believer_ratio()),
        }
    }

    /// Decide the next state. Consumes exactly one draw from `rng`.
    pub fn apply(
        &self,
        state: CellState,
        neighbors: &NeighborCounts,
        rng: &mut SimRng,
    ) -> CellState {
        if rng.bernoulli(self.probability(state, neighbors)) {
            Self::target(state)
        } else {
            state
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(believers: usize, corrected: usize, total: usize) -> NeighborCounts {
        NeighborCounts {
            believers,
            corrected,
            total,
        }
    }

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(0.25), 0.25);
        assert_eq!(clamp01(1.7), 1.0);
    }

    #[test]
    fn test_spread_probability_scales_with_believer_ratio() {
        let rule = TransitionRule::new(0.6, 0.0, 0.0, 0.0);
        let p = rule.probability(CellState::Unaware, &counts(4, 0, 8));
        assert!((p - 0.3).abs() < 1e-12);
        assert_eq!(rule.probability(CellState::Unaware, &counts(0, 8, 8)), 0.0);
    }

    #[test]
    fn test_correction_combines_factcheck_and_peers() {
        let rule = TransitionRule::new(0.0, 0.1, 0.4, 0.0);
        let p = rule.probability(CellState::Believer, &counts(0, 2, 8));
        assert!((p - 0.2).abs() < 1e-12);

        // Fact-checking applies even with no neighbours at all.
        let p = rule.probability(CellState::Believer, &counts(0, 0, 0));
        assert!((p - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_relapse_probability() {
        let rule = TransitionRule::new(0.0, 0.0, 0.0, 0.5);
        let p = rule.probability(CellState::Corrected, &counts(8, 0, 8));
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_rates_are_clamped() {
        let rule = TransitionRule::new(5.0, 0.9, 0.9, -2.0);
        assert_eq!(rule.probability(CellState::Unaware, &counts(8, 0, 8)), 1.0);
        assert_eq!(rule.probability(CellState::Believer, &counts(0, 8, 8)), 1.0);
        assert_eq!(rule.probability(CellState::Corrected, &counts(8, 0, 8)), 0.0);
    }

    #[test]
    fn test_apply_consumes_one_draw_per_cell() {
        let rule = TransitionRule::new(0.0, 0.0, 0.0, 0.0);
        let mut rng = SimRng::seeded(5);
        for state in CellState::ALL {
            assert_eq!(rule.apply(state, &counts(3, 3, 8), &mut rng), state);
        }
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn test_certain_transitions() {
        let rule = TransitionRule::new(1.0, 1.0, 0.0, 1.0);
        let mut rng = SimRng::seeded(5);
        let full = counts(8, 0, 8);
        assert_eq!(rule.apply(CellState::Unaware, &full, &mut rng), CellState::Believer);
        assert_eq!(rule.apply(CellState::Believer, &full, &mut rng), CellState::Corrected);
        assert_eq!(rule.apply(CellState::Corrected, &full, &mut rng), CellState::Believer);
    }
}
