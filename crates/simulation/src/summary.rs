//! History reduction.

use misinfo_types::{SimulationError, Snapshot, SummaryMetrics};

/// Reduce a completed history to its summary metrics.
///
/// Ties for the peak resolve to the earliest step.
pub fn summarize(history: &[Snapshot]) -> Result<SummaryMetrics, SimulationError> {
    let (first, last) = match (history.first(), history.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(SimulationError::EmptyHistory),
    };

    let mut peak = first;
    let mut total_exposure = 0.0;
    for snapshot in history {
        if snapshot.believer_ratio > peak.believer_ratio {
            peak = snapshot;
        }
        total_exposure += snapshot.believer_ratio;
    }

    Ok(SummaryMetrics {
        peak_believer_ratio: peak.believer_ratio,
        time_to_peak: peak.step,
        final_believer_ratio: last.believer_ratio,
        final_corrected_ratio: last.corrected_ratio,
        total_exposure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use misinfo_types::{PopulationCounts, TransitionCounts};

    /// Snapshots over a population of 10 with the given believer counts.
    fn history(believers: &[usize]) -> Vec<Snapshot> {
        believers
            .iter()
            .enumerate()
            .map(|(step, &believer)| {
                let counts = PopulationCounts {
                    unaware: 10 - believer - 1,
                    believer,
                    corrected: 1,
                };
                Snapshot::new(step, counts, TransitionCounts::default())
            })
            .collect()
    }

    #[test]
    fn test_peak_uses_first_occurrence() {
        let metrics = summarize(&history(&[1, 3, 3, 2])).unwrap();

        assert!((metrics.peak_believer_ratio - 0.3).abs() < 1e-12);
        assert_eq!(metrics.time_to_peak, 1);
        assert!((metrics.total_exposure - 0.9).abs() < 1e-12);
        assert!((metrics.final_believer_ratio - 0.2).abs() < 1e-12);
        assert!((metrics.final_corrected_ratio - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_single_snapshot() {
        let metrics = summarize(&history(&[4])).unwrap();
        assert_eq!(metrics.time_to_peak, 0);
        assert_eq!(metrics.peak_believer_ratio, metrics.final_believer_ratio);
        assert_eq!(metrics.total_exposure, metrics.peak_believer_ratio);
    }

    #[test]
    fn test_flat_zero_history_peaks_at_start() {
        let metrics = summarize(&history(&[0, 0, 0])).unwrap();
        assert_eq!(metrics.peak_believer_ratio, 0.0);
        assert_eq!(metrics.time_to_peak, 0);
        assert_eq!(metrics.total_exposure, 0.0);
    }

    #[test]
    fn test_empty_history_is_an_error() {
        assert_eq!(summarize(&[]), Err(SimulationError::EmptyHistory));
    }
}
