//! End-to-end properties of complete runs.

use misinfo_simulation::{summarize, SimulationEngine};
use misinfo_test_helpers::{assert_population_conserved, grid_rows, quiet_config};
use misinfo_types::{CellState, History, SimulationConfig, Topology};

fn run(config: SimulationConfig) -> History {
    SimulationEngine::new(config).unwrap().run().unwrap()
}

#[test]
fn test_population_conserved_across_topologies() {
    for topology in [Topology::Toroidal, Topology::Bounded] {
        for seed in [1, 2, 3] {
            let config = SimulationConfig::new(12, 9)
                .with_steps(30)
                .with_topology(topology)
                .with_seed(seed);
            let history = run(config);
            assert_eq!(history.len(), 31);
            assert_population_conserved(&history, 108);
        }
    }
}

#[test]
fn test_unseeded_runs_still_conserve_population() {
    let config = SimulationConfig::new(10, 10).with_steps(10).without_seed();
    let history = run(config);
    assert_population_conserved(&history, 100);
}

#[test]
fn test_same_seed_gives_identical_history() {
    let config = SimulationConfig::new(20, 15).with_steps(40).with_seed(2026);

    let a = run(config.clone());
    let b = run(config);

    assert_eq!(a, b);
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.believer_ratio.to_bits(), y.believer_ratio.to_bits());
        assert_eq!(x.corrected_ratio.to_bits(), y.corrected_ratio.to_bits());
    }
}

#[test]
fn test_seed_drives_transitions_for_explicit_grid() {
    let config = quiet_config(5, 5)
        .with_rates(0.6, 0.1, 0.5, 0.3)
        .with_topology(Topology::Toroidal)
        .with_steps(15)
        .with_seed(77);
    let rows = grid_rows(&["UUBUU", "UCUUU", "BUUCU", "UUUUB", "CUUUU"]);

    let a = SimulationEngine::with_initial_grid(config.clone(), &rows)
        .unwrap()
        .run()
        .unwrap();
    let b = SimulationEngine::with_initial_grid(config, &rows)
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(a, b);
    assert_population_conserved(&a, 25);
}

#[test]
fn test_different_seeds_diverge() {
    let a = run(SimulationConfig::default().with_steps(5).with_seed(1));
    let b = run(SimulationConfig::default().with_steps(5).with_seed(2));
    assert_ne!(a, b);
}

#[test]
fn test_zero_rates_freeze_random_grid() {
    let config = SimulationConfig::new(16, 16)
        .with_rates(0.0, 0.0, 0.0, 0.0)
        .with_initial_densities(0.3, 0.3)
        .with_steps(12)
        .with_seed(5);

    let mut engine = SimulationEngine::new(config).unwrap();
    let initial = engine.grid().clone();
    let history = engine.run().unwrap();

    assert_eq!(engine.grid(), &initial);
    for snapshot in &history {
        assert_eq!(snapshot.counts(), history[0].counts());
        assert_eq!(snapshot.new_believers, 0);
        assert_eq!(snapshot.new_corrected, 0);
        assert_eq!(snapshot.relapses, 0);
    }
}

#[test]
fn test_transition_counts_explain_population_change() {
    let config = SimulationConfig::new(15, 15).with_steps(25).with_seed(9);
    let history = run(config);

    for pair in history.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        let believer_delta = next.believer_count as i64 - prev.believer_count as i64;
        let expected = next.new_believers as i64 + next.relapses as i64 - next.new_corrected as i64;
        assert_eq!(believer_delta, expected, "step {}", next.step);

        let unaware_delta = prev.unaware_count as i64 - next.unaware_count as i64;
        assert_eq!(unaware_delta, next.new_believers as i64);
    }
}

#[test]
fn test_certain_fact_check_clears_believers() {
    // No spread, no relapse, fact-checking always fires: every believer is
    // corrected after one step and nothing changes afterwards.
    let config = SimulationConfig::new(10, 10)
        .with_initial_densities(0.4, 0.1)
        .with_rates(0.0, 1.0, 0.0, 0.0)
        .with_steps(3)
        .with_seed(4);

    let history = run(config);
    let initial_believers = history[0].believer_count;

    assert_eq!(history[1].believer_count, 0);
    assert_eq!(history[1].new_corrected, initial_believers);
    assert_eq!(history[3].believer_count, 0);
}

#[test]
fn test_summary_of_real_run() {
    let config = SimulationConfig::new(30, 30).with_steps(50).with_seed(31);
    let history = run(config);
    let metrics = summarize(&history).unwrap();

    let max = history
        .iter()
        .map(|s| s.believer_ratio)
        .fold(f64::MIN, f64::max);
    assert_eq!(metrics.peak_believer_ratio, max);
    assert_eq!(history[metrics.time_to_peak].believer_ratio, max);
    assert!(history[..metrics.time_to_peak]
        .iter()
        .all(|s| s.believer_ratio < max));

    let last = history.last().unwrap();
    assert_eq!(metrics.final_believer_ratio, last.believer_ratio);
    assert_eq!(metrics.final_corrected_ratio, last.corrected_ratio);
    assert!(metrics.total_exposure >= metrics.peak_believer_ratio);
}

#[test]
fn test_single_cell_torus_sees_itself() {
    // The only neighbour of a 1x1 torus cell is itself, eight times over.
    // A corrected cell there has no believer neighbours, so even a certain
    // relapse rate never fires.
    let config = quiet_config(1, 1)
        .with_topology(Topology::Toroidal)
        .with_relapse_rate(1.0)
        .with_steps(3);

    let rows = vec![vec![CellState::Corrected]];
    let mut engine = SimulationEngine::with_initial_grid(config, &rows).unwrap();
    let history = engine.run().unwrap();

    assert!(history.iter().all(|s| s.corrected_count == 1));
    assert_eq!(engine.grid().neighbors(0, 0), vec![(0, 0); 8]);
    assert_eq!(engine.grid().count_neighbor_states(0, 0).corrected, 8);
}
