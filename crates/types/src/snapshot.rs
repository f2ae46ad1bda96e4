//! Per-step population records.

use crate::CellState;
use serde::{Deserialize, Serialize};

/// Ordered snapshots of one run. Index `i` is the state after `i` transitions.
pub type History = Vec<Snapshot>;

/// Number of cells in each state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulationCounts {
    pub unaware: usize,
    pub believer: usize,
    pub corrected: usize,
}

impl PopulationCounts {
    /// Count one more cell in `state`.
    pub fn record(&mut self, state: CellState) {
        match state {
            CellState::Unaware => self.unaware += 1,
            CellState::Believer => self.believer += 1,
            CellState::Corrected => self.corrected += 1,
        }
    }

    /// Sum over all states.
    pub fn total(&self) -> usize {
        self.unaware + self.believer + self.corrected
    }
}

impl FromIterator<CellState> for PopulationCounts {
    fn from_iter<I: IntoIterator<Item = CellState>>(iter: I) -> Self {
        let mut counts = Self::default();
        for state in iter {
            counts.record(state);
        }
        counts
    }
}

/// The three state changes tracked per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Unaware to believer.
    NewBeliever,
    /// Believer to corrected.
    NewCorrected,
    /// Corrected back to believer.
    Relapse,
}

impl TransitionKind {
    /// Classify a state change. Self-transitions are not counted.
    pub fn classify(from: CellState, to: CellState) -> Option<Self> {
        match (from, to) {
            (CellState::Unaware, CellState::Believer) => Some(TransitionKind::NewBeliever),
            (CellState::Believer, CellState::Corrected) => Some(TransitionKind::NewCorrected),
            (CellState::Corrected, CellState::Believer) => Some(TransitionKind::Relapse),
            _ => None,
        }
    }
}

/// Transition tallies for one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionCounts {
    pub new_believers: usize,
    pub new_corrected: usize,
    pub relapses: usize,
}

impl TransitionCounts {
    /// Tally one transition.
    pub fn record(&mut self, kind: TransitionKind) {
        match kind {
            TransitionKind::NewBeliever => self.new_believers += 1,
            TransitionKind::NewCorrected => self.new_corrected += 1,
            TransitionKind::Relapse => self.relapses += 1,
        }
    }

    /// Total number of tracked transitions.
    pub fn total(&self) -> usize {
        self.new_believers + self.new_corrected + self.relapses
    }
}

/// Population state at one time step.
///
/// Field names are the column names used by downstream CSV and statistics
/// tooling and must stay stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// 0-based step index.
    pub step: usize,
    pub unaware_count: usize,
    pub believer_count: usize,
    pub corrected_count: usize,
    pub unaware_ratio: f64,
    pub believer_ratio: f64,
    pub corrected_ratio: f64,
    /// Unaware to believer transitions during this step.
    pub new_believers: usize,
    /// Believer to corrected transitions during this step.
    pub new_corrected: usize,
    /// Corrected to believer transitions during this step.
    pub relapses: usize,
}

impl Snapshot {
    /// Build a snapshot from population and transition tallies.
    ///
    /// Ratios are taken against `counts.total()`. An empty population yields
    /// zero ratios.
    pub fn new(step: usize, counts: PopulationCounts, transitions: TransitionCounts) -> Self {
        let total = counts.total();
        let ratio = |count: usize| {
            if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            }
        };

        Self {
            step,
            unaware_count: counts.unaware,
            believer_count: counts.believer,
            corrected_count: counts.corrected,
            unaware_ratio: ratio(counts.unaware),
            believer_ratio: ratio(counts.believer),
            corrected_ratio: ratio(counts.corrected),
            new_believers: transitions.new_believers,
            new_corrected: transitions.new_corrected,
            relapses: transitions.relapses,
        }
    }

    /// Population counts captured by this snapshot.
    pub fn counts(&self) -> PopulationCounts {
        PopulationCounts {
            unaware: self.unaware_count,
            believer: self.believer_count,
            corrected: self.corrected_count,
        }
    }

    /// Transition tallies captured by this snapshot.
    pub fn transitions(&self) -> TransitionCounts {
        TransitionCounts {
            new_believers: self.new_believers,
            new_corrected: self.new_corrected,
            relapses: self.relapses,
        }
    }

    /// Total population.
    pub fn population(&self) -> usize {
        self.unaware_count + self.believer_count + self.corrected_count
    }

    /// Ratio for a single state.
    pub fn ratio(&self, state: CellState) -> f64 {
        match state {
            CellState::Unaware => self.unaware_ratio,
            CellState::Believer => self.believer_ratio,
            CellState::Corrected => self.corrected_ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_only_tracked_transitions() {
        use CellState::*;
        assert_eq!(
            TransitionKind::classify(Unaware, Believer),
            Some(TransitionKind::NewBeliever)
        );
        assert_eq!(
            TransitionKind::classify(Believer, Corrected),
            Some(TransitionKind::NewCorrected)
        );
        assert_eq!(
            TransitionKind::classify(Corrected, Believer),
            Some(TransitionKind::Relapse)
        );
        for state in CellState::ALL {
            assert_eq!(TransitionKind::classify(state, state), None);
        }
        assert_eq!(TransitionKind::classify(Unaware, Corrected), None);
    }

    #[test]
    fn test_snapshot_ratios() {
        let counts: PopulationCounts = [
            CellState::Unaware,
            CellState::Believer,
            CellState::Believer,
            CellState::Corrected,
        ]
        .into_iter()
        .collect();

        let snapshot = Snapshot::new(3, counts, TransitionCounts::default());
        assert_eq!(snapshot.step, 3);
        assert_eq!(snapshot.population(), 4);
        assert_eq!(snapshot.believer_ratio, 0.5);
        assert_eq!(snapshot.unaware_ratio, 0.25);
        assert_eq!(snapshot.ratio(CellState::Corrected), 0.25);
        assert_eq!(snapshot.counts(), counts);
        assert_eq!(snapshot.transitions().total(), 0);
    }
}
