//! Immutable dense model of a simple undirected graph.

mod vertex_idx;

pub use vertex_idx::VertexIdx;

use std::collections::HashMap;

use giso_common::{EdgeSpec, GraphDescription, NodeKey, NodeSpec};
use tracing::debug;

use crate::error::GraphError;

/// A simple undirected graph with interned vertices.
///
/// Built once from vertex and edge lists and never mutated afterwards.
/// Adjacency is stored in compressed rows: the neighbors of vertex `v` are
/// the sorted slice `adjacency[offsets[v]..offsets[v + 1]]`.
#[derive(Clone, Debug)]
pub struct GraphModel {
    /// Dense index -> external id.
    keys: Vec<NodeKey>,
    /// External id -> dense index.
    index: HashMap<NodeKey, VertexIdx>,
    /// Optional label per vertex.
    labels: Vec<Option<NodeKey>>,
    /// Row offsets into `adjacency`, `len() == vertex_count() + 1`.
    offsets: Vec<usize>,
    /// Concatenated sorted neighbor rows.
    adjacency: Vec<VertexIdx>,
}

impl GraphModel {
    /// Build a model from a vertex list and an edge list.
    ///
    /// Vertices are numbered in the order given. Repeated edges collapse
    /// into one; self-loops, duplicate vertex ids and edges that reference
    /// unknown ids are rejected.
    pub fn build<V, E>(vertices: V, edges: E) -> Result<Self, GraphError>
    where
        V: IntoIterator<Item = NodeSpec>,
        E: IntoIterator<Item = EdgeSpec>,
    {
        // 1. Intern vertex ids
        let mut keys: Vec<NodeKey> = Vec::new();
        let mut labels: Vec<Option<NodeKey>> = Vec::new();
        let mut index: HashMap<NodeKey, VertexIdx> = HashMap::new();
        for NodeSpec { id, label } in vertices {
            if index.contains_key(&id) {
                return Err(GraphError::DuplicateVertex(id));
            }
            index.insert(id.clone(), VertexIdx::from(keys.len()));
            keys.push(id);
            labels.push(label);
        }

        // 2. Resolve edges into per-vertex neighbor lists
        let mut rows: Vec<Vec<VertexIdx>> = vec![Vec::new(); keys.len()];
        let mut raw_edges = 0usize;
        for EdgeSpec { source, target } in edges {
            let lookup = |key: &NodeKey| {
                index
                    .get(key)
                    .copied()
                    .ok_or_else(|| GraphError::UnknownVertex {
                        from: source.clone(),
                        to: target.clone(),
                        missing: key.clone(),
                    })
            };
            let u = lookup(&source)?;
            let v = lookup(&target)?;
            if u == v {
                return Err(GraphError::SelfLoop(source));
            }
            rows[u.as_usize()].push(v);
            rows[v.as_usize()].push(u);
            raw_edges += 1;
        }

        // 3. Compress rows, dropping repeated edges
        let mut offsets = Vec::with_capacity(rows.len() + 1);
        let mut adjacency = Vec::with_capacity(raw_edges * 2);
        offsets.push(0);
        for row in &mut rows {
            row.sort_unstable();
            row.dedup();
            adjacency.extend_from_slice(row);
            offsets.push(adjacency.len());
        }

        let model = Self {
            keys,
            index,
            labels,
            offsets,
            adjacency,
        };
        debug_assert!(model.is_symmetric());
        if raw_edges != model.edge_count() {
            debug!(
                "collapsed {} repeated edges",
                raw_edges - model.edge_count()
            );
        }
        debug!(
            "built graph with {} vertices and {} edges",
            model.vertex_count(),
            model.edge_count()
        );
        Ok(model)
    }

    /// Build a model from a JSON boundary description.
    pub fn from_description(description: &GraphDescription) -> Result<Self, GraphError> {
        Self::build(
            description.nodes.iter().cloned(),
            description.edges.iter().cloned(),
        )
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.keys.len()
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.len() / 2
    }

    /// All vertex indices in ascending order.
    pub fn vertices(&self) -> impl DoubleEndedIterator<Item = VertexIdx> + ExactSizeIterator {
        VertexIdx::range(self.vertex_count())
    }

    /// Sorted neighbors of `v`.
    pub fn neighbors(&self, v: VertexIdx) -> &[VertexIdx] {
        let i = v.as_usize();
        &self.adjacency[self.offsets[i]..self.offsets[i + 1]]
    }

    /// Number of neighbors of `v`.
    pub fn degree(&self, v: VertexIdx) -> usize {
        let i = v.as_usize();
        self.offsets[i + 1] - self.offsets[i]
    }

    /// Label of `v`, if it has one.
    pub fn label(&self, v: VertexIdx) -> Option<&NodeKey> {
        self.labels[v.as_usize()].as_ref()
    }

    /// Whether any vertex carries a label.
    pub fn has_labels(&self) -> bool {
        self.labels.iter().any(Option::is_some)
    }

    /// External id of `v`.
    pub fn key(&self, v: VertexIdx) -> &NodeKey {
        &self.keys[v.as_usize()]
    }

    /// Dense index of an external id.
    pub fn index_of(&self, key: &NodeKey) -> Option<VertexIdx> {
        self.index.get(key).copied()
    }

    /// Whether `u` and `v` are joined by an edge.
    pub fn is_adjacent(&self, u: VertexIdx, v: VertexIdx) -> bool {
        let (probe, target) = if self.degree(u) <= self.degree(v) {
            (u, v)
        } else {
            (v, u)
        };
        self.neighbors(probe).binary_search(&target).is_ok()
    }

    /// Vertex degrees sorted in descending order.
    pub fn degree_sequence(&self) -> Vec<usize> {
        let mut degrees: Vec<usize> = self.vertices().map(|v| self.degree(v)).collect();
        degrees.sort_unstable_by(|a, b| b.cmp(a));
        degrees
    }

    /// Every edge appears in the rows of both endpoints.
    pub(crate) fn is_symmetric(&self) -> bool {
        self.vertices().all(|v| {
            self.neighbors(v)
                .iter()
                .all(|&u| self.neighbors(u).binary_search(&v).is_ok())
        })
    }
}

impl TryFrom<&GraphDescription> for GraphModel {
    type Error = GraphError;

    fn try_from(description: &GraphDescription) -> Result<Self, Self::Error> {
        Self::from_description(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> NodeKey {
        NodeKey::from(k)
    }

    fn triangle() -> GraphModel {
        GraphModel::from_description(&GraphDescription::from_edges(
            &[("A", "B"), ("B", "C"), ("C", "A")],
            &[],
        ))
        .unwrap()
    }

    #[test]
    fn test_interning_follows_input_order() {
        let g = triangle();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.index_of(&key("A")), Some(VertexIdx::new(0)));
        assert_eq!(g.index_of(&key("C")), Some(VertexIdx::new(2)));
        assert_eq!(g.key(VertexIdx::new(1)), &key("B"));
        assert_eq!(g.index_of(&key("Z")), None);
    }

    #[test]
    fn test_queries() {
        let g = triangle();
        assert_eq!(g.edge_count(), 3);
        let a = g.index_of(&key("A")).unwrap();
        let b = g.index_of(&key("B")).unwrap();
        let c = g.index_of(&key("C")).unwrap();
        assert_eq!(g.neighbors(a), &[b, c]);
        assert_eq!(g.degree(a), 2);
        assert!(g.is_adjacent(b, c));
        assert!(g.is_symmetric());
        assert!(!g.has_labels());
        assert_eq!(g.label(a), None);
        assert_eq!(g.degree_sequence(), vec![2, 2, 2]);
    }

    #[test]
    fn test_repeated_edges_collapse() {
        let g = GraphModel::build(
            [NodeSpec::new(1), NodeSpec::new(2)],
            [EdgeSpec::new(1, 2), EdgeSpec::new(2, 1), EdgeSpec::new(1, 2)],
        )
        .unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(VertexIdx::new(0)), 1);
    }

    #[test]
    fn test_duplicate_vertex_rejected() {
        let err = GraphModel::build([NodeSpec::new("A"), NodeSpec::new("A")], []).unwrap_err();
        assert_eq!(err, GraphError::DuplicateVertex(key("A")));
    }

    #[test]
    fn test_unknown_vertex_rejected() {
        let err = GraphModel::build([NodeSpec::new("A")], [EdgeSpec::new("A", "Q")]).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownVertex {
                from: key("A"),
                to: key("Q"),
                missing: key("Q"),
            }
        );
    }

    #[test]
    fn test_self_loop_rejected() {
        let err = GraphModel::build([NodeSpec::new("A")], [EdgeSpec::new("A", "A")]).unwrap_err();
        assert_eq!(err, GraphError::SelfLoop(key("A")));
    }

    #[test]
    fn test_labels() {
        let g = GraphModel::build(
            [NodeSpec::labeled(1, "x"), NodeSpec::new(2)],
            [EdgeSpec::new(1, 2)],
        )
        .unwrap();
        assert!(g.has_labels());
        assert_eq!(g.label(VertexIdx::new(0)), Some(&key("x")));
        assert_eq!(g.label(VertexIdx::new(1)), None);
    }

    #[test]
    fn test_isolated_vertices_have_empty_rows() {
        let g = GraphModel::build([NodeSpec::new(1), NodeSpec::new(2)], []).unwrap();
        assert_eq!(g.edge_count(), 0);
        assert!(g.neighbors(VertexIdx::new(1)).is_empty());
        assert!(!g.is_adjacent(VertexIdx::new(0), VertexIdx::new(1)));
    }
}
