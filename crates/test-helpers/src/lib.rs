//! Shared fixtures for engine and driver tests.

use misinfo_types::{CellState, SimulationConfig, Snapshot, Topology};

/// Parse rows of state symbols (`U`/`.`, `B`, `C`) into grid rows.
///
/// # Panics
///
/// Panics on any unrecognised symbol.
pub fn grid_rows(lines: &[&str]) -> Vec<Vec<CellState>> {
    lines
        .iter()
        .map(|line| {
            line.chars()
                .map(|c| {
                    CellState::try_from(c)
                        .unwrap_or_else(|e| panic!("bad fixture symbol in {:?}: {}", line, e))
                })
                .collect()
        })
        .collect()
}

/// A 3x3 grid with `center` in the middle and `ring` everywhere else.
pub fn surrounded(center: CellState, ring: CellState) -> Vec<Vec<CellState>> {
    let mut rows = vec![vec![ring; 3]; 3];
    rows[1][1] = center;
    rows
}

/// Bounded, single-step, seeded configuration with every rate and density at zero.
///
/// Tests switch on exactly the rate they exercise.
pub fn quiet_config(width: usize, height: usize) -> SimulationConfig {
    SimulationConfig::new(width, height)
        .with_steps(1)
        .with_initial_densities(0.0, 0.0)
        .with_rates(0.0, 0.0, 0.0, 0.0)
        .with_topology(Topology::Bounded)
        .with_seed(1)
}

/// Assert every snapshot partitions `cells` and its ratios sum to one.
///
/// # Panics
///
/// Panics on the first snapshot that violates conservation.
pub fn assert_population_conserved(history: &[Snapshot], cells: usize) {
    for snapshot in history {
        assert_eq!(
            snapshot.population(),
            cells,
            "population not conserved at step {}",
            snapshot.step
        );
        let ratio_sum = snapshot.unaware_ratio + snapshot.believer_ratio + snapshot.corrected_ratio;
        assert!(
            (ratio_sum - 1.0).abs() < 1e-6,
            "ratios sum to {} at step {}",
            ratio_sum,
            snapshot.step
        );
    }
}
