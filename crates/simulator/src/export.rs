//! CSV export of experiment reports.

use crate::{ExperimentReport, SimulatorError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Per-run summaries.
pub const RUNS_FILE: &str = "misinformation_runs.csv";

/// Per-scenario mean and standard deviation.
pub const SUMMARY_FILE: &str = "misinformation_summary.csv";

/// Per-scenario mean trajectories.
pub const TIMESERIES_FILE: &str = "misinformation_timeseries.csv";

/// Where an export wrote its files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportPaths {
    pub runs: PathBuf,
    pub summary: PathBuf,
    pub timeseries: PathBuf,
}

/// Write all three report tables into `dir`, creating it if needed.
pub fn export_report(report: &ExperimentReport, dir: &Path) -> Result<ExportPaths, SimulatorError> {
    std::fs::create_dir_all(dir).map_err(|source| SimulatorError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let paths = ExportPaths {
        runs: dir.join(RUNS_FILE),
        summary: dir.join(SUMMARY_FILE),
        timeseries: dir.join(TIMESERIES_FILE),
    };

    write_csv(&paths.runs, report.runs())?;
    write_csv(&paths.summary, report.aggregates())?;
    write_csv(&paths.timeseries, report.timeseries())?;

    info!(dir = %dir.display(), "Exported experiment report");

    Ok(paths)
}

/// Serialize `rows` to a CSV file with a header row.
pub fn write_csv<'a, T, I>(path: &Path, rows: I) -> Result<(), SimulatorError>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let export_err = |source: csv::Error| SimulatorError::Export {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(export_err)?;
    for row in rows {
        writer.serialize(row).map_err(export_err)?;
    }
    writer.flush().map_err(|e| export_err(e.into()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExperimentConfig, Simulator};
    use misinfo_types::SimulationConfig;

    fn report() -> ExperimentReport {
        let config = ExperimentConfig::new(SimulationConfig::new(8, 8).with_steps(6))
            .with_repetitions(3)
            .sequential();
        Simulator::new(config).unwrap().run().unwrap()
    }

    fn read_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_export_writes_three_tables() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out");
        let paths = export_report(&report(), &out).unwrap();

        let runs = read_lines(&paths.runs);
        assert_eq!(
            runs[0],
            "scenario,rep,seed,peak_believer_ratio,time_to_peak,final_believer_ratio,final_corrected_ratio,total_exposure"
        );
        assert_eq!(runs.len(), 1 + 4 * 3);
        assert!(runs[1].starts_with("low_factcheck,0,2026,"));

        let summary = read_lines(&paths.summary);
        assert_eq!(
            summary[0],
            "scenario,peak_believer_ratio_mean,peak_believer_ratio_std,time_to_peak_mean,time_to_peak_std,final_believer_ratio_mean,final_believer_ratio_std,final_corrected_ratio_mean,final_corrected_ratio_std,total_exposure_mean,total_exposure_std"
        );
        assert_eq!(summary.len(), 1 + 4);

        let timeseries = read_lines(&paths.timeseries);
        assert_eq!(
            timeseries[0],
            "scenario,step,mean_believer_ratio,mean_corrected_ratio"
        );
        assert_eq!(timeseries.len(), 1 + 4 * 7);
    }

    #[test]
    fn test_unwritable_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();

        assert!(matches!(
            export_report(&report(), &blocker.join("out")),
            Err(SimulatorError::OutputDir { .. })
        ));
    }
}
