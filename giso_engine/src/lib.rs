//! Graph isomorphism decision engine.
//!
//! Three strategies answer whether two simple undirected graphs are
//! isomorphic:
//!
//! - [`ExactMatcher`]: VF2-style backtracking, sound and complete.
//! - [`RefinementFilter`] in its color refinement and Weisfeiler-Lehman
//!   variants: fast invariants whose `false` is a proof and whose `true`
//!   is only a pass.
//!
//! [`IsomorphismEngine`] dispatches between them and times each call.
//! Graphs are built once into an immutable [`GraphModel`] and can be shared
//! between threads.

mod cancel;
mod engine;
mod error;
mod graph;
mod matcher;
mod refine;

#[cfg(test)]
mod test_support;

pub use crate::cancel::CancelToken;
pub use crate::engine::{IsomorphismEngine, Verdict};
pub use crate::error::{EngineError, GraphError};
pub use crate::graph::{GraphModel, VertexIdx};
pub use crate::matcher::{ExactMatcher, Isomorphism, SearchOutcome, SearchStats};
pub use crate::refine::{ClassHistogram, RefinementFilter, RefinementKind, Signature};

pub use giso_common::{Config, Strategy};
