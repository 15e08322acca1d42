use std::path::PathBuf;

use clap::Parser;
use giso_common::{Config, ConfigError, Strategy};

/// GISO - decide whether two graphs are isomorphic
#[derive(Parser, Debug)]
#[command(name = "giso")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// First graph, as a JSON description
    pub left: PathBuf,

    /// Second graph, as a JSON description
    pub right: PathBuf,

    /// Strategy to run
    #[arg(short = 's', long, value_enum, default_value = "all")]
    pub strategy: StrategyArg,

    /// Run each strategy this many times and report the average time
    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: u32,

    /// Ignore vertex labels
    #[arg(long, default_value_t = false)]
    pub no_labels: bool,

    /// Weisfeiler-Lehman round budget
    #[arg(long)]
    pub wl_iterations: Option<usize>,

    /// Cap color refinement at this many rounds instead of running to the fixed point
    #[arg(long)]
    pub max_refinement_rounds: Option<usize>,

    /// Consider every unmapped vertex as a candidate in the exact search
    #[arg(long, default_value_t = false)]
    pub baseline_candidates: bool,

    /// Give up on the exact search after this many milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Run the selected strategies concurrently
    #[arg(short = 'p', long, default_value_t = false)]
    pub parallel: bool,

    /// JSON configuration file; flags given on the command line override it
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Print the vertex mapping found by the exact search
    #[arg(long, default_value_t = false)]
    pub show_mapping: bool,
}

impl Args {
    /// Convert command-line arguments into internal configuration
    pub fn to_config(&self) -> Result<Config, ConfigError> {
        let base = match &self.config {
            Some(path) => Config::from_path(path)?,
            None => Config::default(),
        };

        let mut builder = base.to_builder();
        if self.no_labels {
            builder = builder.ignore_labels();
        }
        if let Some(rounds) = self.wl_iterations {
            builder = builder.wl_iterations(rounds);
        }
        if let Some(rounds) = self.max_refinement_rounds {
            builder = builder.max_refinement_rounds(rounds);
        }
        if self.baseline_candidates {
            builder = builder.baseline_candidates();
        }
        Ok(builder.build())
    }

    /// The strategies selected on the command line, in run order.
    pub fn strategies(&self) -> Vec<Strategy> {
        match self.strategy {
            StrategyArg::All => Strategy::ALL.to_vec(),
            StrategyArg::Exact => vec![Strategy::Exact],
            StrategyArg::ColorRefinement => vec![Strategy::ColorRefinement],
            StrategyArg::WeisfeilerLehman => vec![Strategy::WeisfeilerLehman],
            StrategyArg::QuickThenExact => vec![Strategy::QuickThenExact],
        }
    }
}

/// Command-line argument wrapper for Strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StrategyArg {
    /// Backtracking search
    #[value(name = "exact")]
    Exact,
    /// Color refinement filter
    #[value(name = "color-refinement")]
    ColorRefinement,
    /// Weisfeiler-Lehman filter
    #[value(name = "weisfeiler-lehman")]
    WeisfeilerLehman,
    /// Color refinement, then exact search on a pass
    #[value(name = "quick-then-exact")]
    QuickThenExact,
    /// Every strategy in turn
    #[value(name = "all")]
    All,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["giso", "a.json", "b.json"]);
        assert_eq!(args.strategy, StrategyArg::All);
        assert_eq!(args.repeat, 1);
        assert_eq!(args.strategies(), Strategy::ALL.to_vec());
        assert_eq!(args.to_config().unwrap(), Config::default());
    }

    #[test]
    fn test_flags_map_onto_config() {
        let args = Args::parse_from([
            "giso",
            "a.json",
            "b.json",
            "--strategy",
            "weisfeiler-lehman",
            "--no-labels",
            "--wl-iterations",
            "6",
            "--max-refinement-rounds",
            "2",
            "--baseline-candidates",
        ]);
        assert_eq!(args.strategies(), vec![Strategy::WeisfeilerLehman]);

        let cfg = args.to_config().unwrap();
        assert!(!cfg.use_labels);
        assert_eq!(cfg.wl_iterations, 6);
        assert_eq!(cfg.max_refinement_rounds, Some(2));
        assert!(!cfg.frontier_candidates);
    }

    #[test]
    fn test_zero_repeat_is_rejected() {
        assert!(Args::try_parse_from(["giso", "a.json", "b.json", "--repeat", "0"]).is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = Args::parse_from(["giso", "a.json", "b.json", "--config", "/nonexistent/giso.json"]);
        assert!(matches!(args.to_config(), Err(ConfigError::Io { .. })));
    }
}
