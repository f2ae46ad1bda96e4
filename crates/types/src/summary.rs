//! Scalar metrics derived from a completed history.

use serde::{Deserialize, Serialize};

/// Summary of one run.
///
/// Produced by a pure reduction over a history; never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// Highest believer ratio seen in the history.
    pub peak_believer_ratio: f64,

    /// Step of the first snapshot reaching the peak.
    pub time_to_peak: usize,

    /// Believer ratio of the last snapshot.
    pub final_believer_ratio: f64,

    /// Corrected ratio of the last snapshot.
    pub final_corrected_ratio: f64,

    /// Sum of believer ratios over every snapshot.
    ///
    /// Unnormalized, so only comparable between runs of equal length.
    pub total_exposure: f64,
}

/// Names a single field of [`SummaryMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryMetric {
    PeakBelieverRatio,
    TimeToPeak,
    FinalBelieverRatio,
    FinalCorrectedRatio,
    TotalExposure,
}

impl SummaryMetric {
    /// All metrics, in export column order.
    pub const ALL: [SummaryMetric; 5] = [
        SummaryMetric::PeakBelieverRatio,
        SummaryMetric::TimeToPeak,
        SummaryMetric::FinalBelieverRatio,
        SummaryMetric::FinalCorrectedRatio,
        SummaryMetric::TotalExposure,
    ];

    /// Field name, as used in exported columns.
    pub fn name(self) -> &'static str {
        match self {
            SummaryMetric::PeakBelieverRatio => "peak_believer_ratio",
            SummaryMetric::TimeToPeak => "time_to_peak",
            SummaryMetric::FinalBelieverRatio => "final_believer_ratio",
            SummaryMetric::FinalCorrectedRatio => "final_corrected_ratio",
            SummaryMetric::TotalExposure => "total_exposure",
        }
    }
}

impl SummaryMetrics {
    /// Value of one metric as a float.
    pub fn get(&self, metric: SummaryMetric) -> f64 {
        match metric {
            SummaryMetric::PeakBelieverRatio => self.peak_believer_ratio,
            SummaryMetric::TimeToPeak => self.time_to_peak as f64,
            SummaryMetric::FinalBelieverRatio => self.final_believer_ratio,
            SummaryMetric::FinalCorrectedRatio => self.final_corrected_ratio,
            SummaryMetric::TotalExposure => self.total_exposure,
        }
    }
}
