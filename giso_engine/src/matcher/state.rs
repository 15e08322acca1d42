use tracing::trace;

use crate::graph::{GraphModel, VertexIdx};

/// Partial mapping built by the exact search.
///
/// `boundary*` counts, for every unmapped vertex, how many of its neighbors
/// are already mapped. A mapped vertex keeps the count it had when it was
/// mapped, which is what lets [`State::unmap`] restore it exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct State {
    core1: Vec<Option<VertexIdx>>,
    core2: Vec<Option<VertexIdx>>,
    boundary1: Vec<u32>,
    boundary2: Vec<u32>,
    terminal1: usize,
    terminal2: usize,
    mapped: usize,
}

impl State {
    pub(crate) fn new(n1: usize, n2: usize) -> Self {
        Self {
            core1: vec![None; n1],
            core2: vec![None; n2],
            boundary1: vec![0; n1],
            boundary2: vec![0; n2],
            terminal1: 0,
            terminal2: 0,
            mapped: 0,
        }
    }

    pub(crate) fn is_mapped1(&self, n: VertexIdx) -> bool {
        self.core1[n.as_usize()].is_some()
    }

    pub(crate) fn is_mapped2(&self, m: VertexIdx) -> bool {
        self.core2[m.as_usize()].is_some()
    }

    pub(crate) fn image(&self, n: VertexIdx) -> Option<VertexIdx> {
        self.core1[n.as_usize()]
    }

    pub(crate) fn boundary1(&self, n: VertexIdx) -> u32 {
        self.boundary1[n.as_usize()]
    }

    pub(crate) fn boundary2(&self, m: VertexIdx) -> u32 {
        self.boundary2[m.as_usize()]
    }

    /// Unmapped vertex of G1 with at least one mapped neighbor.
    pub(crate) fn in_frontier1(&self, n: VertexIdx) -> bool {
        !self.is_mapped1(n) && self.boundary1(n) > 0
    }

    /// Unmapped vertex of G2 with at least one mapped neighbor.
    pub(crate) fn in_frontier2(&self, m: VertexIdx) -> bool {
        !self.is_mapped2(m) && self.boundary2(m) > 0
    }

    pub(crate) fn terminal_sizes(&self) -> (usize, usize) {
        (self.terminal1, self.terminal2)
    }

    pub(crate) fn mapped_count(&self) -> usize {
        self.mapped
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.mapped == self.core1.len()
    }

    /// Current G1 -> G2 assignment in G1 index order.
    pub(crate) fn core1(&self) -> &[Option<VertexIdx>] {
        &self.core1
    }

    #[contracts::debug_requires(!self.is_mapped1(n) && !self.is_mapped2(m))]
    #[contracts::debug_ensures(self.image(n) == Some(m))]
    pub(crate) fn map(&mut self, g1: &GraphModel, g2: &GraphModel, n: VertexIdx, m: VertexIdx) {
        trace!("map {} -> {} at depth {}", n, m, self.mapped);

        if self.boundary1[n.as_usize()] > 0 {
            self.terminal1 -= 1;
        }
        if self.boundary2[m.as_usize()] > 0 {
            self.terminal2 -= 1;
        }
        self.core1[n.as_usize()] = Some(m);
        self.core2[m.as_usize()] = Some(n);
        self.mapped += 1;

        for &u in g1.neighbors(n) {
            if self.core1[u.as_usize()].is_none() {
                let count = &mut self.boundary1[u.as_usize()];
                *count += 1;
                if *count == 1 {
                    self.terminal1 += 1;
                }
            }
        }
        for &u in g2.neighbors(m) {
            if self.core2[u.as_usize()].is_none() {
                let count = &mut self.boundary2[u.as_usize()];
                *count += 1;
                if *count == 1 {
                    self.terminal2 += 1;
                }
            }
        }
    }

    /// Exact inverse of the matching [`State::map`]; pairs must be undone in
    /// reverse order.
    #[contracts::debug_requires(self.image(n) == Some(m))]
    #[contracts::debug_ensures(!self.is_mapped1(n) && !self.is_mapped2(m))]
    pub(crate) fn unmap(&mut self, g1: &GraphModel, g2: &GraphModel, n: VertexIdx, m: VertexIdx) {
        for &u in g1.neighbors(n) {
            if self.core1[u.as_usize()].is_none() {
                let count = &mut self.boundary1[u.as_usize()];
                *count -= 1;
                if *count == 0 {
                    self.terminal1 -= 1;
                }
            }
        }
        for &u in g2.neighbors(m) {
            if self.core2[u.as_usize()].is_none() {
                let count = &mut self.boundary2[u.as_usize()];
                *count -= 1;
                if *count == 0 {
                    self.terminal2 -= 1;
                }
            }
        }

        self.core1[n.as_usize()] = None;
        self.core2[m.as_usize()] = None;
        self.mapped -= 1;
        if self.boundary1[n.as_usize()] > 0 {
            self.terminal1 += 1;
        }
        if self.boundary2[m.as_usize()] > 0 {
            self.terminal2 += 1;
        }

        trace!("unmap {} -> {} at depth {}", n, m, self.mapped);
    }
}
