//! Misinformation Experiment CLI
//!
//! Runs every policy scenario, exports the result tables and prints a short
//! summary.

use anyhow::Context;
use clap::Parser;
use misinfo_simulator::{export_report, ExperimentConfig, ExperimentReport, Simulator};
use misinfo_types::Topology;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "misinfo-sim")]
#[command(about = "Run misinformation cellular automaton experiments")]
#[command(version)]
struct Cli {
    /// Experiment configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the exported CSV tables
    #[arg(short, long, default_value = "outputs/misinformation")]
    output_dir: PathBuf,

    /// Repetitions per scenario
    #[arg(long)]
    repetitions: Option<usize>,

    /// Seed of the first repetition of the first scenario
    #[arg(long)]
    base_seed: Option<u64>,

    /// Steps per run
    #[arg(long)]
    steps: Option<usize>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Use bounded edges instead of wrapping
    #[arg(long, conflicts_with = "toroidal")]
    bounded: bool,

    /// Wrap edges, overriding a bounded configuration file
    #[arg(long)]
    toroidal: bool,

    /// Run repetitions on a single thread
    #[arg(long)]
    sequential: bool,

    /// Skip writing CSV files
    #[arg(long)]
    no_export: bool,
}

impl Cli {
    /// Layer command-line flags over the loaded configuration.
    fn apply(&self, mut config: ExperimentConfig) -> ExperimentConfig {
        if let Some(repetitions) = self.repetitions {
            config.repetitions = repetitions;
        }
        if let Some(seed) = self.base_seed {
            config.base_seed = seed;
        }
        if let Some(steps) = self.steps {
            config.base.steps = steps;
        }
        if let Some(width) = self.width {
            config.base.width = width;
        }
        if let Some(height) = self.height {
            config.base.height = height;
        }
        if self.bounded || self.toroidal {
            config.base.topology = Topology::from_toroidal(self.toroidal);
        }
        if self.sequential {
            config.parallel = false;
        }
        config
    }
}

/// Print the per-scenario headline numbers.
fn print_report(report: &ExperimentReport) {
    println!("Experiments complete.");
    for aggregate in report.aggregates() {
        println!(
            "- {}: mean peak believer ratio={:.3}, mean final believer ratio={:.3}",
            aggregate.scenario,
            aggregate.peak_believer_ratio_mean,
            aggregate.final_believer_ratio_mean
        );
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ExperimentConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ExperimentConfig::default(),
    };
    let config = cli.apply(config);

    let simulator = Simulator::new(config).context("invalid experiment configuration")?;
    let report = simulator.run()?;

    print_report(&report);

    if !cli.no_export {
        let paths = export_report(&report, &cli.output_dir)?;
        println!("Files saved to: {}", cli.output_dir.display());
        tracing::debug!(?paths, "Export paths");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounded_file() -> ExperimentConfig {
        ExperimentConfig::from_toml_str(
            r#"
            repetitions = 3
            base_seed = 10

            [base]
            width = 20
            steps = 15
            topology = "bounded"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_flags_override_file_values() {
        let cli = Cli::try_parse_from([
            "misinfo-sim",
            "--toroidal",
            "--steps",
            "5",
            "--repetitions",
            "2",
            "--sequential",
        ])
        .unwrap();
        let config = cli.apply(bounded_file());

        assert_eq!(config.base.topology, Topology::Toroidal);
        assert_eq!(config.base.steps, 5);
        assert_eq!(config.repetitions, 2);
        assert!(!config.parallel);
        // Untouched values come from the file.
        assert_eq!(config.base.width, 20);
        assert_eq!(config.base_seed, 10);
    }

    #[test]
    fn test_no_flags_keep_file_values() {
        let cli = Cli::try_parse_from(["misinfo-sim"]).unwrap();
        assert_eq!(cli.apply(bounded_file()), bounded_file());
        assert_eq!(cli.output_dir, PathBuf::from("outputs/misinformation"));
    }

    #[test]
    fn test_bounded_flag() {
        let cli = Cli::try_parse_from(["misinfo-sim", "--bounded"]).unwrap();
        let config = cli.apply(ExperimentConfig::default());
        assert_eq!(config.base.topology, Topology::Bounded);
    }

    #[test]
    fn test_topology_flags_conflict() {
        assert!(Cli::try_parse_from(["misinfo-sim", "--bounded", "--toroidal"]).is_err());
    }
}
