use std::collections::HashMap;
use std::fmt;

use giso_common::NodeKey;

use crate::graph::{GraphModel, VertexIdx};

/// A bijection between the vertex sets of two graphs, in external ids.
///
/// Pairs are kept in the vertex order of the left graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Isomorphism {
    pairs: Vec<(NodeKey, NodeKey)>,
    /// Left id -> position in `pairs`
    left: HashMap<NodeKey, usize>,
    /// Right id -> position in `pairs`
    right: HashMap<NodeKey, usize>,
}

impl Isomorphism {
    /// Translate a complete dense assignment into external ids.
    #[contracts::debug_requires(core1.iter().all(Option::is_some))]
    #[contracts::debug_ensures(ret.len() == core1.len())]
    pub(crate) fn from_core(core1: &[Option<VertexIdx>], g1: &GraphModel, g2: &GraphModel) -> Self {
        let mut mapping = Self::default();
        for (n, m) in VertexIdx::range(core1.len()).zip(core1) {
            if let Some(m) = m {
                mapping.insert(g1.key(n).clone(), g2.key(*m).clone());
            }
        }
        mapping
    }

    #[contracts::debug_requires(self.left.len() == self.right.len())]
    #[contracts::debug_ensures(self.left.len() == self.right.len())]
    fn insert(&mut self, left: NodeKey, right: NodeKey) {
        let at = self.pairs.len();
        self.left.insert(left.clone(), at);
        self.right.insert(right.clone(), at);
        self.pairs.push((left, right));
    }

    /// Number of mapped vertices.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True for the mapping between two empty graphs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Image of a left vertex.
    pub fn get(&self, left: &NodeKey) -> Option<&NodeKey> {
        self.left.get(left).map(|&at| &self.pairs[at].1)
    }

    /// Preimage of a right vertex.
    pub fn get_inverse(&self, right: &NodeKey) -> Option<&NodeKey> {
        self.right.get(right).map(|&at| &self.pairs[at].0)
    }

    /// All `(left, right)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeKey, &NodeKey)> {
        self.pairs.iter().map(|(l, r)| (l, r))
    }

    /// Check that this mapping is an isomorphism from `g1` to `g2`.
    ///
    /// Verifies bijectivity, adjacency in both directions and, when
    /// `use_labels` is set, label preservation.
    pub fn verify(&self, g1: &GraphModel, g2: &GraphModel, use_labels: bool) -> bool {
        if self.len() != g1.vertex_count() || self.len() != g2.vertex_count() {
            return false;
        }
        if self.left.len() != self.len() || self.right.len() != self.len() {
            return false;
        }

        let mut image = vec![None; g1.vertex_count()];
        for (l, r) in self.iter() {
            match (g1.index_of(l), g2.index_of(r)) {
                (Some(n), Some(m)) => image[n.as_usize()] = Some(m),
                _ => return false,
            }
        }

        g1.vertices().all(|n| {
            let Some(m) = image[n.as_usize()] else {
                return false;
            };
            if use_labels && g1.label(n) != g2.label(m) {
                return false;
            }
            g1.neighbors(n)
                .iter()
                .all(|u| image[u.as_usize()].is_some_and(|w| g2.is_adjacent(m, w)))
        }) && g1.edge_count() == g2.edge_count()
    }
}

impl fmt::Display for Isomorphism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (l, r) in &self.pairs {
            writeln!(f, "{l} -> {r}")?;
        }
        Ok(())
    }
}
