//! Error types for graph construction and search.
//!
//! All malformed input is rejected while building a [`GraphModel`](crate::GraphModel);
//! the strategies themselves only fail when a caller cancels them.

use giso_common::NodeKey;
use thiserror::Error;

/// Malformed graph input, raised by `GraphModel::build`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The same vertex id appears twice in the vertex list.
    #[error("Duplicate vertex id `{0}`")]
    DuplicateVertex(NodeKey),

    /// An edge endpoint is not in the vertex list.
    #[error("Edge ({from}, {to}) references unknown vertex `{missing}`")]
    UnknownVertex {
        /// First endpoint as given.
        from: NodeKey,
        /// Second endpoint as given.
        to: NodeKey,
        /// The endpoint that is not a vertex.
        missing: NodeKey,
    },

    /// An edge joins a vertex to itself.
    #[error("Self-loop on vertex `{0}` is not allowed in a simple graph")]
    SelfLoop(NodeKey),
}

/// Errors surfaced by the engine's fallible entry points.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The cancel token tripped before the search finished.
    #[error("Search cancelled after visiting {states} states")]
    Cancelled {
        /// States visited before the search unwound.
        states: u64,
    },

    /// A graph could not be built.
    #[error(transparent)]
    Graph(#[from] GraphError),
}
