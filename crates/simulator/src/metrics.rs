//! Aggregation of repeated runs.

use misinfo_types::{History, SummaryMetric, SummaryMetrics};
use serde::Serialize;

/// Summary of one repetition, as exported.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunRecord {
    pub scenario: String,
    pub rep: usize,
    pub seed: u64,
    pub peak_believer_ratio: f64,
    pub time_to_peak: usize,
    pub final_believer_ratio: f64,
    pub final_corrected_ratio: f64,
    pub total_exposure: f64,
}

impl RunRecord {
    pub fn new(scenario: &str, rep: usize, seed: u64, summary: &SummaryMetrics) -> Self {
        Self {
            scenario: scenario.to_string(),
            rep,
            seed,
            peak_believer_ratio: summary.peak_believer_ratio,
            time_to_peak: summary.time_to_peak,
            final_believer_ratio: summary.final_believer_ratio,
            final_corrected_ratio: summary.final_corrected_ratio,
            total_exposure: summary.total_exposure,
        }
    }

    /// The summary this record was built from.
    pub fn summary(&self) -> SummaryMetrics {
        SummaryMetrics {
            peak_believer_ratio: self.peak_believer_ratio,
            time_to_peak: self.time_to_peak,
            final_believer_ratio: self.final_believer_ratio,
            final_corrected_ratio: self.final_corrected_ratio,
            total_exposure: self.total_exposure,
        }
    }
}

/// Mean and sample standard deviation of one metric.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MetricStats {
    pub mean: f64,
    /// Sample (n - 1) standard deviation; 0 with fewer than two values.
    pub std_dev: f64,
}

impl MetricStats {
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std_dev = if values.len() > 1 {
            let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (sum_sq / (n - 1.0)).sqrt()
        } else {
            0.0
        };

        Self { mean, std_dev }
    }
}

/// Per-scenario statistics over all repetitions.
///
/// Columns are `<metric>_mean` and `<metric>_std` for every summary metric.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenarioAggregate {
    pub scenario: String,
    pub peak_believer_ratio_mean: f64,
    pub peak_believer_ratio_std: f64,
    pub time_to_peak_mean: f64,
    pub time_to_peak_std: f64,
    pub final_believer_ratio_mean: f64,
    pub final_believer_ratio_std: f64,
    pub final_corrected_ratio_mean: f64,
    pub final_corrected_ratio_std: f64,
    pub total_exposure_mean: f64,
    pub total_exposure_std: f64,
}

impl ScenarioAggregate {
    pub fn from_runs(scenario: &str, runs: &[RunRecord]) -> Self {
        let stats = |metric: SummaryMetric| {
            let values: Vec<f64> = runs.iter().map(|run| run.summary().get(metric)).collect();
            MetricStats::from_values(&values)
        };

        let peak = stats(SummaryMetric::PeakBelieverRatio);
        let time_to_peak = stats(SummaryMetric::TimeToPeak);
        let final_believer = stats(SummaryMetric::FinalBelieverRatio);
        let final_corrected = stats(SummaryMetric::FinalCorrectedRatio);
        let exposure = stats(SummaryMetric::TotalExposure);

        Self {
            scenario: scenario.to_string(),
            peak_believer_ratio_mean: peak.mean,
            peak_believer_ratio_std: peak.std_dev,
            time_to_peak_mean: time_to_peak.mean,
            time_to_peak_std: time_to_peak.std_dev,
            final_believer_ratio_mean: final_believer.mean,
            final_believer_ratio_std: final_believer.std_dev,
            final_corrected_ratio_mean: final_corrected.mean,
            final_corrected_ratio_std: final_corrected.std_dev,
            total_exposure_mean: exposure.mean,
            total_exposure_std: exposure.std_dev,
        }
    }

    /// Statistics for one metric.
    pub fn stats(&self, metric: SummaryMetric) -> MetricStats {
        let (mean, std_dev) = match metric {
            SummaryMetric::PeakBelieverRatio => {
                (self.peak_believer_ratio_mean, self.peak_believer_ratio_std)
            }
            SummaryMetric::TimeToPeak => (self.time_to_peak_mean, self.time_to_peak_std),
            SummaryMetric::FinalBelieverRatio => {
                (self.final_believer_ratio_mean, self.final_believer_ratio_std)
            }
            SummaryMetric::FinalCorrectedRatio => {
                (self.final_corrected_ratio_mean, self.final_corrected_ratio_std)
            }
            SummaryMetric::TotalExposure => (self.total_exposure_mean, self.total_exposure_std),
        };
        MetricStats { mean, std_dev }
    }
}

/// Mean trajectory point for one scenario.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimeseriesRow {
    pub scenario: String,
    pub step: usize,
    pub mean_believer_ratio: f64,
    pub mean_corrected_ratio: f64,
}

/// Average believer and corrected ratios per step across repetitions.
///
/// Covers the steps every history has reached.
pub fn mean_trajectory(scenario: &str, histories: &[History]) -> Vec<TimeseriesRow> {
    let steps = histories.iter().map(Vec::len).min().unwrap_or(0);
    let n = histories.len() as f64;

    (0..steps)
        .map(|step| {
            let (believer, corrected) = histories.iter().fold((0.0, 0.0), |(b, c), history| {
                (
                    b + history[step].believer_ratio,
                    c + history[step].corrected_ratio,
                )
            });
            TimeseriesRow {
                scenario: scenario.to_string(),
                step,
                mean_believer_ratio: believer / n,
                mean_corrected_ratio: corrected / n,
            }
        })
        .collect()
}

/// Everything produced for one scenario.
#[derive(Clone, Debug)]
pub struct ScenarioReport {
    pub name: String,
    /// One record per repetition, in repetition order.
    pub runs: Vec<RunRecord>,
    pub aggregate: ScenarioAggregate,
    pub timeseries: Vec<TimeseriesRow>,
}

/// Results of a full experiment.
#[derive(Clone, Debug, Default)]
pub struct ExperimentReport {
    /// One report per scenario, in configuration order.
    pub scenarios: Vec<ScenarioReport>,
}

impl ExperimentReport {
    /// Look up a scenario by name.
    pub fn scenario(&self, name: &str) -> Option<&ScenarioReport> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    /// All run records, scenario by scenario.
    pub fn runs(&self) -> impl Iterator<Item = &RunRecord> {
        self.scenarios.iter().flat_map(|s| s.runs.iter())
    }

    /// All scenario aggregates.
    pub fn aggregates(&self) -> impl Iterator<Item = &ScenarioAggregate> {
        self.scenarios.iter().map(|s| &s.aggregate)
    }

    /// All trajectory rows, scenario by scenario.
    pub fn timeseries(&self) -> impl Iterator<Item = &TimeseriesRow> {
        self.scenarios.iter().flat_map(|s| s.timeseries.iter())
    }
}
