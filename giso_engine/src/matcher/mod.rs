//! Exact isomorphism search in the style of VF2.
//!
//! The search grows a partial bijection one vertex pair at a time and
//! backtracks when no candidate pair is feasible. A pair `(n, m)` is
//! feasible when:
//!
//! 1. `n` and `m` carry the same label (when labels are in use),
//! 2. they have the same degree,
//! 3. they have the same number of mapped neighbors,
//! 4. every mapped neighbor of `n` is mapped to a neighbor of `m`,
//! 5. they have as many unmapped neighbors inside the frontier, and
//!    therefore as many outside it.
//!
//! Rules 3 and 4 together make the mapped neighborhoods of `n` and `m`
//! correspond exactly, so a complete mapping is always an isomorphism.
//! Rules 1, 2 and 5 only prune.

mod mapping;
mod state;

pub use mapping::Isomorphism;
pub(crate) use state::State;

use std::collections::BTreeMap;

use giso_common::{Config, NodeKey};
use tracing::debug;

use crate::cancel::CancelToken;
use crate::error::EngineError;
use crate::graph::{GraphModel, VertexIdx};

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Recursion entries, including the root. Zero means the pair was
    /// rejected before searching.
    pub states: u64,
    /// Candidate pairs that failed a feasibility rule.
    pub rejected: u64,
}

/// What a completed search found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// The first isomorphism found, if any.
    pub mapping: Option<Isomorphism>,
    /// Counters of the search.
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// Whether an isomorphism was found.
    pub const fn is_isomorphic(&self) -> bool {
        self.mapping.is_some()
    }
}

/// Exact matcher for one ordered pair of graphs.
///
/// Construction interns labels; every search call starts from a fresh state
/// so one matcher can be queried repeatedly.
#[derive(Clone, Debug)]
pub struct ExactMatcher<'a> {
    g1: &'a GraphModel,
    g2: &'a GraphModel,
    /// Interned label id per G1 vertex, comparable with `labels2`.
    labels1: Vec<u32>,
    labels2: Vec<u32>,
    use_labels: bool,
    frontier_candidates: bool,
}

impl<'a> ExactMatcher<'a> {
    /// Prepare a matcher for `g1` against `g2` under `config`.
    pub fn new(g1: &'a GraphModel, g2: &'a GraphModel, config: &Config) -> Self {
        let (labels1, labels2) = if config.use_labels {
            intern_labels(g1, g2)
        } else {
            (vec![0; g1.vertex_count()], vec![0; g2.vertex_count()])
        };
        Self {
            g1,
            g2,
            labels1,
            labels2,
            use_labels: config.use_labels,
            frontier_candidates: config.frontier_candidates,
        }
    }

    /// Decide whether the two graphs are isomorphic.
    pub fn is_isomorphic(&self) -> bool {
        self.find_isomorphism().is_some()
    }

    /// The first isomorphism in search order, if one exists.
    pub fn find_isomorphism(&self) -> Option<Isomorphism> {
        // Without a token the search cannot be cancelled.
        self.search(None).ok().and_then(|outcome| outcome.mapping)
    }

    /// Like [`ExactMatcher::find_isomorphism`], but gives up once `cancel`
    /// trips.
    pub fn try_find_isomorphism(
        &self,
        cancel: &CancelToken,
    ) -> Result<Option<Isomorphism>, EngineError> {
        self.search(Some(cancel)).map(|outcome| outcome.mapping)
    }

    /// Run a full search and report its statistics.
    pub fn search(&self, cancel: Option<&CancelToken>) -> Result<SearchOutcome, EngineError> {
        let mut state = State::new(self.g1.vertex_count(), self.g2.vertex_count());
        self.search_from(&mut state, cancel)
    }

    pub(crate) fn search_from(
        &self,
        state: &mut State,
        cancel: Option<&CancelToken>,
    ) -> Result<SearchOutcome, EngineError> {
        let mut stats = SearchStats::default();

        if self.g1.vertex_count() != self.g2.vertex_count()
            || self.g1.edge_count() != self.g2.edge_count()
        {
            debug!(
                "fast reject: |V| {} vs {}, |E| {} vs {}",
                self.g1.vertex_count(),
                self.g2.vertex_count(),
                self.g1.edge_count(),
                self.g2.edge_count()
            );
            return Ok(SearchOutcome {
                mapping: None,
                stats,
            });
        }

        let mut found = None;
        let result = self.backtrack(state, &mut stats, &mut found, cancel);
        debug!(
            "exact search visited {} states, rejected {} pairs, found = {}",
            stats.states,
            stats.rejected,
            found.is_some()
        );
        result?;

        Ok(SearchOutcome {
            mapping: found.map(|core1: Vec<Option<VertexIdx>>| {
                Isomorphism::from_core(&core1, self.g1, self.g2)
            }),
            stats,
        })
    }

    /// Returns `Ok(true)` once a complete mapping has been copied into
    /// `found`. The state is unwound on every return path.
    fn backtrack(
        &self,
        st: &mut State,
        stats: &mut SearchStats,
        found: &mut Option<Vec<Option<VertexIdx>>>,
        cancel: Option<&CancelToken>,
    ) -> Result<bool, EngineError> {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            debug!("search cancelled at depth {}", st.mapped_count());
            return Err(EngineError::Cancelled {
                states: stats.states,
            });
        }
        stats.states += 1;

        if st.is_complete() {
            *found = Some(st.core1().to_vec());
            return Ok(true);
        }

        let (t1, t2) = st.terminal_sizes();
        if t1 != t2 {
            return Ok(false);
        }

        let Some(n) = self.next_vertex(st) else {
            return Ok(false);
        };

        // Phase 1: collect candidates with only immutable access to `st`.
        let candidates: Vec<VertexIdx> = self.candidates_for(st).collect();

        // Phase 2: try each feasible candidate under a scoped mapping.
        for m in candidates {
            if !self.is_feasible(st, n, m) {
                stats.rejected += 1;
                continue;
            }
            let done = self.with_pair(st, n, m, |st_inner| {
                self.backtrack(st_inner, stats, found, cancel)
            })?;
            if done {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Maps `(n, m)`, runs `f`, then unmaps, whatever `f` returned.
    fn with_pair<R>(
        &self,
        st: &mut State,
        n: VertexIdx,
        m: VertexIdx,
        f: impl FnOnce(&mut State) -> R,
    ) -> R {
        st.map(self.g1, self.g2, n, m);
        let out = f(st);
        st.unmap(self.g1, self.g2, n, m);
        out
    }

    /// The G1 vertex to extend the mapping with.
    fn next_vertex(&self, st: &State) -> Option<VertexIdx> {
        let lowest_frontier = || self.g1.vertices().find(|&v| st.in_frontier1(v));
        let lowest_unmapped = || self.g1.vertices().find(|&v| !st.is_mapped1(v));

        if self.frontier_candidates && st.terminal_sizes().0 > 0 {
            lowest_frontier()
        } else {
            lowest_unmapped()
        }
    }

    /// G2 vertices that `next_vertex` may be mapped to, in index order.
    fn candidates_for<'s>(&'s self, st: &'s State) -> impl Iterator<Item = VertexIdx> + 's {
        let frontier_only = self.frontier_candidates && st.terminal_sizes().1 > 0;
        self.g2.vertices().filter(move |&m| {
            if frontier_only {
                st.in_frontier2(m)
            } else {
                !st.is_mapped2(m)
            }
        })
    }

    fn is_feasible(&self, st: &State, n: VertexIdx, m: VertexIdx) -> bool {
        // 1. labels
        if self.labels1[n.as_usize()] != self.labels2[m.as_usize()] {
            return false;
        }

        // 2. degree
        if self.g1.degree(n) != self.g2.degree(m) {
            return false;
        }

        // 3. mapped neighbor count
        if st.boundary1(n) != st.boundary2(m) {
            return false;
        }

        // 4. adjacency of mapped neighbors, and 5. frontier look-ahead
        let mut frontier1 = 0usize;
        for &u in self.g1.neighbors(n) {
            match st.image(u) {
                Some(w) => {
                    if !self.g2.is_adjacent(m, w) {
                        return false;
                    }
                }
                None => {
                    if st.boundary1(u) > 0 {
                        frontier1 += 1;
                    }
                }
            }
        }
        let frontier2 = self
            .g2
            .neighbors(m)
            .iter()
            .filter(|&&u| st.in_frontier2(u))
            .count();

        frontier1 == frontier2
    }

    /// Whether labels take part in feasibility.
    pub const fn uses_labels(&self) -> bool {
        self.use_labels
    }
}

/// Intern the labels of both graphs into one dense id space so they can be
/// compared as integers. Unlabeled vertices share the id of the absent label.
fn intern_labels<'g>(g1: &'g GraphModel, g2: &'g GraphModel) -> (Vec<u32>, Vec<u32>) {
    let mut ids: BTreeMap<Option<&'g NodeKey>, u32> = BTreeMap::new();
    let mut intern = |label: Option<&'g NodeKey>| -> u32 {
        let next = ids.len() as u32;
        *ids.entry(label).or_insert(next)
    };
    let labels1 = g1.vertices().map(|v| intern(g1.label(v))).collect();
    let labels2 = g2.vertices().map(|v| intern(g2.label(v))).collect();
    (labels1, labels2)
}

#[cfg(test)]
mod tests {
    use giso_common::GraphDescription;

    use super::*;

    fn graph(edges: &[(i64, i64)]) -> GraphModel {
        GraphModel::from_description(&GraphDescription::from_edges(edges, &[])).unwrap()
    }

    fn labeled_triangle(labels: [&str; 3]) -> GraphModel {
        let mut desc = GraphDescription::from_edges(&[(1_i64, 2_i64), (2, 3), (3, 1)], &[]);
        for (id, label) in (1_i64..).zip(labels) {
            desc = desc.with_label(id, label);
        }
        GraphModel::from_description(&desc).unwrap()
    }

    fn petersen() -> GraphModel {
        graph(&[
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 0),
            (0, 5),
            (1, 6),
            (2, 7),
            (3, 8),
            (4, 9),
            (5, 7),
            (7, 9),
            (9, 6),
            (6, 8),
            (8, 5),
        ])
    }

    #[test]
    fn test_fast_reject_does_not_search() {
        let path = graph(&[(1, 2), (2, 3)]);
        let triangle = graph(&[(1, 2), (2, 3), (3, 1)]);
        let outcome = ExactMatcher::new(&path, &triangle, &Config::default())
            .search(None)
            .unwrap();
        assert!(!outcome.is_isomorphic());
        assert_eq!(outcome.stats.states, 0);
    }

    #[test]
    fn test_two_triangles_vs_hexagon() {
        let two = graph(&[(1, 2), (2, 3), (3, 1), (4, 5), (5, 6), (6, 4)]);
        let hex = graph(&[(1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (6, 1)]);
        let cfg = Config::default();
        assert!(!ExactMatcher::new(&two, &hex, &cfg).is_isomorphic());
        assert!(!ExactMatcher::new(&hex, &two, &cfg).is_isomorphic());
    }

    #[test]
    fn test_labels_restrict_the_mapping() {
        let xyy = labeled_triangle(["x", "y", "y"]);
        let xxy = labeled_triangle(["x", "x", "y"]);
        let yxy = labeled_triangle(["y", "x", "y"]);

        let cfg = Config::default();
        assert!(!ExactMatcher::new(&xyy, &xxy, &cfg).is_isomorphic());
        assert!(ExactMatcher::new(&xyy, &yxy, &cfg).is_isomorphic());

        let blind = Config::builder().ignore_labels().build();
        let matcher = ExactMatcher::new(&xyy, &xxy, &blind);
        assert!(!matcher.uses_labels());
        assert!(matcher.is_isomorphic());
    }

    #[test]
    fn test_found_mapping_is_an_isomorphism() {
        let g1 = petersen();
        // same graph with every id shifted by 3 mod 10
        let shifted: Vec<(i64, i64)> = [
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 0),
            (0, 5),
            (1, 6),
            (2, 7),
            (3, 8),
            (4, 9),
            (5, 7),
            (7, 9),
            (9, 6),
            (6, 8),
            (8, 5),
        ]
        .iter()
        .map(|&(a, b)| ((a + 3) % 10, (b + 3) % 10))
        .collect();
        let g2 = graph(&shifted);

        let cfg = Config::default();
        let iso = ExactMatcher::new(&g1, &g2, &cfg)
            .find_isomorphism()
            .expect("petersen is isomorphic to a relabeling of itself");
        assert_eq!(iso.len(), 10);
        assert!(iso.verify(&g1, &g2, true));
    }

    #[test]
    fn test_search_leaves_state_untouched() {
        let g1 = petersen();
        let g2 = graph(&[(1, 2), (2, 3), (3, 1), (4, 5), (5, 6), (6, 4)]);
        let hex = graph(&[(1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (6, 1)]);

        for (a, b) in [(&g1, &g1), (&g2, &hex), (&hex, &hex)] {
            for cfg in [
                Config::default(),
                Config::builder().baseline_candidates().build(),
            ] {
                let matcher = ExactMatcher::new(a, b, &cfg);
                let fresh = State::new(a.vertex_count(), b.vertex_count());
                let mut st = fresh.clone();
                matcher.search_from(&mut st, None).unwrap();
                assert_eq!(st, fresh);
            }
        }
    }

    #[test]
    fn test_cancelled_search_unwinds() {
        let g = petersen();
        let matcher = ExactMatcher::new(&g, &g, &Config::default());
        let token = CancelToken::new();
        token.cancel();

        let fresh = State::new(10, 10);
        let mut st = fresh.clone();
        let err = matcher.search_from(&mut st, Some(&token)).unwrap_err();
        assert!(matches!(err, EngineError::Cancelled { states: 0 }));
        assert_eq!(st, fresh);
        assert!(matcher.try_find_isomorphism(&token).is_err());
    }

    #[test]
    fn test_frontier_and_baseline_agree() {
        let cube = graph(&[
            (0, 1),
            (1, 3),
            (3, 2),
            (2, 0),
            (4, 5),
            (5, 7),
            (7, 6),
            (6, 4),
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ]);
        // crown graph on 8 vertices: i ~ j' for i != j
        let crown_edges: Vec<(i64, i64)> = (0..4)
            .flat_map(|i| (0..4).filter(move |&j| j != i).map(move |j| (i, j + 10)))
            .filter(|&(i, j)| i < j)
            .collect();
        let crown = graph(&crown_edges);

        let frontier = Config::default();
        let baseline = Config::builder().baseline_candidates().build();
        let a = ExactMatcher::new(&cube, &crown, &frontier).search(None).unwrap();
        let b = ExactMatcher::new(&cube, &crown, &baseline).search(None).unwrap();
        assert!(a.is_isomorphic());
        assert_eq!(a.is_isomorphic(), b.is_isomorphic());
    }

    #[test]
    fn test_empty_graphs_match() {
        let e = graph(&[]);
        let outcome = ExactMatcher::new(&e, &e, &Config::default())
            .search(None)
            .unwrap();
        assert!(outcome.is_isomorphic());
        assert_eq!(outcome.stats.states, 1);
        assert!(outcome.mapping.unwrap().is_empty());
    }

    #[test]
    fn test_label_interning_is_shared() {
        let a = labeled_triangle(["x", "y", "z"]);
        let b = labeled_triangle(["z", "x", "w"]);
        let (l1, l2) = intern_labels(&a, &b);
        assert_eq!(l1, vec![0, 1, 2]);
        assert_eq!(l2, vec![2, 0, 3]);
    }
}
