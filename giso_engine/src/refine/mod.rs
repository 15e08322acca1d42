//! Iterative color refinement filters.
//!
//! Each vertex starts with a color derived from its label. Every round,
//! a vertex's local signature is its own color together with the sorted
//! multiset of its neighbors' colors; distinct local signatures are
//! numbered densely in lexicographic order and become the next colors.
//! Because the local signature contains the vertex's own color, a round
//! can only split classes, so an unchanged class count means the
//! partition reached its fixed point.
//!
//! The resulting [`Signature`] is an isomorphism invariant: different
//! signatures prove two graphs are not isomorphic, equal signatures prove
//! nothing. Regular graphs of equal size and degree (two disjoint
//! triangles against a 6-cycle, say) always compare equal.

mod signature;

pub use signature::{ClassHistogram, Signature};

use std::collections::{BTreeMap, BTreeSet};

use giso_common::{Config, NodeKey};
use itertools::Itertools;
use tracing::debug;

use crate::graph::GraphModel;

/// The two refinement filters differ only in round budget and encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefinementKind {
    /// Refine to the fixed point, keep the final histogram.
    ColorRefinement,
    /// Refine for a fixed number of rounds, keep every round's histogram.
    WeisfeilerLehman,
}

/// A configured refinement filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefinementFilter {
    kind: RefinementKind,
    /// Round cap; `None` runs until stable.
    max_iterations: Option<usize>,
    use_labels: bool,
}

/// Dense vertex coloring with ids in `0..classes`.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Coloring {
    colors: Vec<u32>,
    classes: usize,
}

impl RefinementFilter {
    /// A filter with an explicit round cap.
    pub const fn new(kind: RefinementKind, max_iterations: Option<usize>, use_labels: bool) -> Self {
        Self {
            kind,
            max_iterations,
            use_labels,
        }
    }

    /// Color refinement as configured by `config.max_refinement_rounds`.
    pub const fn color_refinement(config: &Config) -> Self {
        Self::new(
            RefinementKind::ColorRefinement,
            config.max_refinement_rounds,
            config.use_labels,
        )
    }

    /// Weisfeiler-Lehman refinement with `config.wl_iterations` rounds.
    pub const fn weisfeiler_lehman(config: &Config) -> Self {
        Self::new(
            RefinementKind::WeisfeilerLehman,
            Some(config.wl_iterations),
            config.use_labels,
        )
    }

    /// Which encoding this filter produces.
    pub const fn kind(&self) -> RefinementKind {
        self.kind
    }

    /// Refine `graph` and return its signature.
    pub fn refine(&self, graph: &GraphModel) -> Signature {
        // A partition of n vertices can split at most n - 1 times.
        let cap = self.max_iterations.unwrap_or(graph.vertex_count());

        let mut coloring = initial_coloring(graph, self.use_labels);
        let mut histograms = Vec::new();
        if self.kind == RefinementKind::WeisfeilerLehman {
            histograms.push(coloring.histogram());
        }

        let mut rounds = 0;
        while rounds < cap {
            let next = refine_round(graph, &coloring);
            rounds += 1;
            let stable = next.classes == coloring.classes;
            coloring = next;
            if self.kind == RefinementKind::WeisfeilerLehman {
                histograms.push(coloring.histogram());
            }
            if stable {
                break;
            }
        }

        if self.kind == RefinementKind::ColorRefinement {
            histograms.push(coloring.histogram());
        }

        debug!(
            "{:?} ran {} rounds over {} vertices, {} classes",
            self.kind,
            rounds,
            graph.vertex_count(),
            coloring.classes
        );

        Signature {
            kind: self.kind,
            histograms,
        }
    }

    /// Compare the signatures of two graphs.
    ///
    /// `false` is a proof of non-isomorphism; `true` is only a pass.
    pub fn is_isomorphic(&self, g1: &GraphModel, g2: &GraphModel) -> bool {
        if g1.vertex_count() != g2.vertex_count() {
            return false;
        }
        self.refine(g1) == self.refine(g2)
    }
}

impl Coloring {
    fn histogram(&self) -> ClassHistogram {
        ClassHistogram::from_colors(&self.colors, self.classes)
    }
}

/// Colors from labels, numbered in label order, or one class when unlabeled.
fn initial_coloring(graph: &GraphModel, use_labels: bool) -> Coloring {
    let n = graph.vertex_count();
    if !use_labels || !graph.has_labels() {
        return Coloring {
            colors: vec![0; n],
            classes: n.min(1),
        };
    }

    let palette: BTreeMap<Option<&NodeKey>, u32> = graph
        .vertices()
        .map(|v| graph.label(v))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .zip(0u32..)
        .collect();

    Coloring {
        colors: graph.vertices().map(|v| palette[&graph.label(v)]).collect(),
        classes: palette.len(),
    }
}

/// One refinement round.
fn refine_round(graph: &GraphModel, current: &Coloring) -> Coloring {
    let locals: Vec<(u32, Vec<u32>)> = graph
        .vertices()
        .map(|v| {
            let own = current.colors[v.as_usize()];
            let around: Vec<u32> = graph
                .neighbors(v)
                .iter()
                .map(|u| current.colors[u.as_usize()])
                .sorted_unstable()
                .collect();
            (own, around)
        })
        .collect();

    // Ordered map: ids follow the lexicographic order of local signatures.
    let mut palette: BTreeMap<&(u32, Vec<u32>), u32> =
        locals.iter().map(|local| (local, 0)).collect();
    for (id, slot) in (0u32..).zip(palette.values_mut()) {
        *slot = id;
    }

    Coloring {
        colors: locals.iter().map(|local| palette[local]).collect(),
        classes: palette.len(),
    }
}
