//! Strategy dispatch and timing.

use std::fmt;
use std::time::{Duration, Instant};

use giso_common::{Config, Strategy};
use tracing::debug;

use crate::cancel::CancelToken;
use crate::error::EngineError;
use crate::graph::GraphModel;
use crate::matcher::{ExactMatcher, Isomorphism};
use crate::refine::RefinementFilter;

/// Outcome of one timed strategy invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    /// The strategy that produced the answer.
    pub strategy: Strategy,
    /// The answer.
    pub isomorphic: bool,
    /// `false` only for a refinement pass, which may be a false positive.
    pub certain: bool,
    /// Wall-clock time of the call.
    pub elapsed: Duration,
}

impl Verdict {
    fn new(strategy: Strategy, isomorphic: bool, elapsed: Duration) -> Self {
        Self {
            strategy,
            isomorphic,
            certain: !isomorphic || strategy.is_complete(),
            elapsed,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let answer = if self.isomorphic { "ARE" } else { "ARE NOT" };
        write!(f, "{}: graphs {} isomorphic", self.strategy, answer)?;
        if !self.certain {
            write!(f, " (inconclusive)")?;
        }
        write!(f, " in {:.9}s", self.elapsed.as_secs_f64())
    }
}

/// Runs the decision strategies under one configuration.
///
/// The engine keeps no state between calls; each call builds its own
/// matcher or refinement and drops it on return.
#[derive(Clone, Copy, Debug)]
pub struct IsomorphismEngine<'cfg> {
    config: &'cfg Config,
}

impl<'cfg> IsomorphismEngine<'cfg> {
    /// Engine running every strategy under `config`.
    pub const fn new(config: &'cfg Config) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub const fn config(&self) -> &'cfg Config {
        self.config
    }

    /// Answer with the given strategy.
    pub fn is_isomorphic(&self, g1: &GraphModel, g2: &GraphModel, strategy: Strategy) -> bool {
        match strategy {
            Strategy::Exact => self.exact(g1, g2),
            Strategy::ColorRefinement => self.color_refinement(g1, g2),
            Strategy::WeisfeilerLehman => self.weisfeiler_lehman(g1, g2),
            Strategy::QuickThenExact => self.quick_then_exact(g1, g2),
        }
    }

    /// Exact backtracking search. Sound and complete.
    pub fn exact(&self, g1: &GraphModel, g2: &GraphModel) -> bool {
        ExactMatcher::new(g1, g2, self.config).is_isomorphic()
    }

    /// Color refinement filter: `false` is certain, `true` is a pass.
    pub fn color_refinement(&self, g1: &GraphModel, g2: &GraphModel) -> bool {
        RefinementFilter::color_refinement(self.config).is_isomorphic(g1, g2)
    }

    /// Weisfeiler-Lehman filter: `false` is certain, `true` is a pass.
    pub fn weisfeiler_lehman(&self, g1: &GraphModel, g2: &GraphModel) -> bool {
        RefinementFilter::weisfeiler_lehman(self.config).is_isomorphic(g1, g2)
    }

    /// Color refinement, falling through to the exact search on a pass.
    ///
    /// Always agrees with [`IsomorphismEngine::exact`].
    pub fn quick_then_exact(&self, g1: &GraphModel, g2: &GraphModel) -> bool {
        if !self.color_refinement(g1, g2) {
            debug!("color refinement rejected, skipping exact search");
            return false;
        }
        self.exact(g1, g2)
    }

    /// First isomorphism found by the exact search.
    pub fn find_isomorphism(&self, g1: &GraphModel, g2: &GraphModel) -> Option<Isomorphism> {
        ExactMatcher::new(g1, g2, self.config).find_isomorphism()
    }

    /// Answer with `strategy` and time the call.
    pub fn run(&self, g1: &GraphModel, g2: &GraphModel, strategy: Strategy) -> Verdict {
        let start = Instant::now();
        let isomorphic = self.is_isomorphic(g1, g2, strategy);
        let verdict = Verdict::new(strategy, isomorphic, start.elapsed());
        debug!("{}", verdict);
        verdict
    }

    /// Like [`IsomorphismEngine::run`], but the exact search stops once
    /// `cancel` trips. The refinement filters always run to completion.
    pub fn run_cancellable(
        &self,
        g1: &GraphModel,
        g2: &GraphModel,
        strategy: Strategy,
        cancel: &CancelToken,
    ) -> Result<Verdict, EngineError> {
        let start = Instant::now();
        let isomorphic = match strategy {
            Strategy::Exact => self.exact_cancellable(g1, g2, cancel)?,
            Strategy::ColorRefinement => self.color_refinement(g1, g2),
            Strategy::WeisfeilerLehman => self.weisfeiler_lehman(g1, g2),
            Strategy::QuickThenExact => {
                self.color_refinement(g1, g2) && self.exact_cancellable(g1, g2, cancel)?
            }
        };
        let verdict = Verdict::new(strategy, isomorphic, start.elapsed());
        debug!("{}", verdict);
        Ok(verdict)
    }

    fn exact_cancellable(
        &self,
        g1: &GraphModel,
        g2: &GraphModel,
        cancel: &CancelToken,
    ) -> Result<bool, EngineError> {
        let found = ExactMatcher::new(g1, g2, self.config).try_find_isomorphism(cancel)?;
        Ok(found.is_some())
    }
}
