//! Configuration for the isomorphism strategies.
//!
//! This module exposes a small, stable surface for consumers (for example,
//! the `giso_cli` crate) to parameterize how the engine behaves.
//!
//! The main knobs are:
//! - use_labels: whether vertex labels take part in matching and in the
//!   initial refinement coloring.
//! - wl_iterations / max_refinement_rounds: round budgets of the two
//!   refinement filters.
//! - frontier_candidates: whether the exact matcher restricts candidate
//!   pairs to the frontier of the current partial mapping.
//!
//! Quick examples
//!
//! Default behavior (labels on, 3 Weisfeiler-Lehman rounds, frontier search):
//! ```ignore
//! use giso_common::Config;
//! let cfg = Config::default();
//! ```
//!
//! Structure only, deeper Weisfeiler-Lehman refinement:
//! ```ignore
//! use giso_common::Config;
//! let cfg = Config::builder().ignore_labels().wl_iterations(8).build();
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of Weisfeiler-Lehman rounds.
pub const DEFAULT_WL_ITERATIONS: usize = 3;

/// Global engine configuration.
///
/// - use_labels:
///     - true  => vertices may only be matched (and are initially colored)
///       by equal labels.
///     - false => labels are ignored; only structure matters.
/// - wl_iterations: round budget of the Weisfeiler-Lehman filter.
/// - max_refinement_rounds:
///     - None    => color refinement runs until the partition is stable.
///     - Some(k) => color refinement stops after at most k rounds.
/// - frontier_candidates:
///     - true  => candidate pairs are drawn from the frontier of the
///       current mapping whenever it is non-empty.
///     - false => every unmapped pair is a candidate (baseline search).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Whether vertex labels must agree between matched vertices.
    pub use_labels: bool,
    /// Number of Weisfeiler-Lehman refinement rounds.
    pub wl_iterations: usize,
    /// Optional cap on color refinement rounds.
    pub max_refinement_rounds: Option<usize>,
    /// Whether the exact matcher restricts candidates to the frontier.
    pub frontier_candidates: bool,
}

impl Config {
    /// Start building a configuration from the defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Continue building from this configuration.
    pub fn to_builder(&self) -> ConfigBuilder {
        ConfigBuilder {
            config: self.clone(),
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_labels: true,
            wl_iterations: DEFAULT_WL_ITERATIONS,
            max_refinement_rounds: None,
            frontier_candidates: true,
        }
    }
}

/// Chained construction of a [`Config`].
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set whether labels take part in matching.
    pub const fn use_labels(mut self, use_labels: bool) -> Self {
        self.config.use_labels = use_labels;
        self
    }

    /// Shorthand for `use_labels(false)`.
    pub const fn ignore_labels(self) -> Self {
        self.use_labels(false)
    }

    /// Set the Weisfeiler-Lehman round budget.
    pub const fn wl_iterations(mut self, rounds: usize) -> Self {
        self.config.wl_iterations = rounds;
        self
    }

    /// Cap color refinement at `rounds` rounds.
    pub const fn max_refinement_rounds(mut self, rounds: usize) -> Self {
        self.config.max_refinement_rounds = Some(rounds);
        self
    }

    /// Let color refinement run until the partition is stable.
    pub const fn refine_to_fixed_point(mut self) -> Self {
        self.config.max_refinement_rounds = None;
        self
    }

    /// Set whether the exact matcher uses frontier candidates.
    pub const fn frontier_candidates(mut self, enabled: bool) -> Self {
        self.config.frontier_candidates = enabled;
        self
    }

    /// Shorthand for `frontier_candidates(false)`.
    pub const fn baseline_candidates(self) -> Self {
        self.frontier_candidates(false)
    }

    /// Finish building.
    pub const fn build(self) -> Config {
        self.config
    }
}

/// The decision strategies offered by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Backtracking search; sound and complete.
    Exact,
    /// Color refinement to a fixed point; `false` is certain, `true` is a heuristic pass.
    ColorRefinement,
    /// Fixed-round Weisfeiler-Lehman refinement; same guarantee as color refinement.
    WeisfeilerLehman,
    /// Color refinement first, exact search only when the filter passes.
    QuickThenExact,
}

impl Strategy {
    /// Every strategy, in the order a benchmarking caller runs them.
    pub const ALL: [Self; 4] = [
        Self::Exact,
        Self::ColorRefinement,
        Self::WeisfeilerLehman,
        Self::QuickThenExact,
    ];

    /// Whether a positive answer from this strategy is a proof.
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Exact | Self::QuickThenExact)
    }

    /// Human readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Exact => "VF2 exact",
            Self::ColorRefinement => "Color Refinement",
            Self::WeisfeilerLehman => "Weisfeiler Lehman",
            Self::QuickThenExact => "Color Refinement + VF2",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration is not valid JSON for [`Config`].
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let cfg = Config::default();
        assert!(cfg.use_labels);
        assert_eq!(cfg.wl_iterations, DEFAULT_WL_ITERATIONS);
        assert_eq!(cfg.max_refinement_rounds, None);
        assert!(cfg.frontier_candidates);
        assert_eq!(Config::builder().build(), cfg);
    }

    #[test]
    fn test_builder_chain() {
        let cfg = Config::builder()
            .ignore_labels()
            .wl_iterations(7)
            .max_refinement_rounds(2)
            .baseline_candidates()
            .build();
        assert!(!cfg.use_labels);
        assert_eq!(cfg.wl_iterations, 7);
        assert_eq!(cfg.max_refinement_rounds, Some(2));
        assert!(!cfg.frontier_candidates);

        let back = Config::builder()
            .max_refinement_rounds(2)
            .refine_to_fixed_point()
            .build();
        assert_eq!(back.max_refinement_rounds, None);
    }

    #[test]
    fn test_to_builder_keeps_fields() {
        let base = Config::builder().ignore_labels().wl_iterations(5).build();
        let cfg = base.to_builder().baseline_candidates().build();
        assert!(!cfg.use_labels);
        assert_eq!(cfg.wl_iterations, 5);
        assert!(!cfg.frontier_candidates);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg = Config::from_json_str(r#"{ "use_labels": false }"#).unwrap();
        assert!(!cfg.use_labels);
        assert_eq!(cfg.wl_iterations, DEFAULT_WL_ITERATIONS);
        assert!(cfg.frontier_candidates);
    }

    #[test]
    fn test_json_roundtrip() {
        let cfg = Config::builder().wl_iterations(5).max_refinement_rounds(4).build();
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(Config::from_json_str(&json).unwrap(), cfg);
    }

    #[test]
    fn test_bad_json_is_error() {
        let err = Config::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_strategy_serde_names() {
        let json = serde_json::to_string(&Strategy::QuickThenExact).unwrap();
        assert_eq!(json, "\"quick-then-exact\"");
        let back: Strategy = serde_json::from_str("\"weisfeiler-lehman\"").unwrap();
        assert_eq!(back, Strategy::WeisfeilerLehman);
    }

    #[test]
    fn test_strategy_completeness() {
        assert!(Strategy::Exact.is_complete());
        assert!(Strategy::QuickThenExact.is_complete());
        assert!(!Strategy::ColorRefinement.is_complete());
        assert!(!Strategy::WeisfeilerLehman.is_complete());
    }
}
