use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use tsp_core::{SolverOptions, Strategy};

#[derive(Debug, Parser)]
#[command(
    name = "tsp-dp",
    version,
    about = "Exact minimum closed-tour cost via bitmask dynamic programming"
)]
pub struct Args {
    /// Points as a JSON array of {"x","y"} objects or one "x,y" per line; `-` reads stdin
    #[arg(long, conflicts_with_all = ["matrix", "random"])]
    pub points: Option<PathBuf>,

    /// Pre-computed cost matrix as nested JSON arrays; `-` reads stdin
    #[arg(long, conflicts_with = "random")]
    pub matrix: Option<PathBuf>,

    /// Generate this many uniform random points in [0, 100)^2
    #[arg(long)]
    pub random: Option<usize>,

    /// Seed for --random
    #[arg(long, default_value_t = 12345)]
    pub seed: u64,

    /// JSON solver options; the flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Worker threads for the layered strategy
    #[arg(long)]
    pub threads: Option<usize>,

    /// Reject instances larger than this
    #[arg(long)]
    pub max_points: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Dump the distance matrix to the log at debug level
    #[arg(long)]
    pub print_matrix: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Memoized,
    Layered,
}

impl From<StrategyArg> for Strategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Memoized => Strategy::Memoized,
            StrategyArg::Layered => Strategy::Layered,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Args {
    pub fn solver_options(&self) -> anyhow::Result<SolverOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                SolverOptions::from_json(&json)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => SolverOptions::default(),
        };

        if let Some(strategy) = self.strategy {
            options = options.with_strategy(strategy.into());
        }
        if let Some(threads) = self.threads {
            options = options.with_threads(threads);
        }
        if let Some(max_points) = self.max_points {
            options = options.with_max_points(max_points);
        }

        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "tsp-dp",
            "--strategy",
            "layered",
            "--threads",
            "4",
            "--max-points",
            "16",
        ])
        .unwrap();
        let options = args.solver_options().unwrap();
        assert_eq!(options.strategy, Strategy::Layered);
        assert_eq!(options.threads, Some(4));
        assert_eq!(options.max_points, 16);
    }

    #[test]
    fn input_sources_are_exclusive() {
        let err = Args::try_parse_from(["tsp-dp", "--points", "a.json", "--random", "5"]);
        assert!(err.is_err());
    }

    #[test]
    fn invalid_flag_values_fail_validation() {
        let args = Args::try_parse_from(["tsp-dp", "--max-points", "40"]).unwrap();
        assert!(args.solver_options().is_err());
    }

    #[test]
    fn defaults_print_text_at_warn() {
        let args = Args::try_parse_from(["tsp-dp"]).unwrap();
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.log_level.to_filter(), LevelFilter::Warn);
        assert!(args.points.is_none() && args.matrix.is_none() && args.random.is_none());
    }
}
