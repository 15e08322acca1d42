//! The JSON graph description format.
//!
//! A description is the boundary between whoever loads a graph and the
//! engine. Its shape is
//! `{ "nodes": [{ "id": .., "label": .. }], "edges": [{ "source": .., "target": .. }] }`
//! where ids and labels are integers or strings and `label` is optional.
//! No validation happens here; the engine checks ids when it builds its model.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An external token used as a vertex id or a vertex label.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeKey {
    /// Integer token.
    Int(i64),
    /// String token.
    Text(String),
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NodeKey {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for NodeKey {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for NodeKey {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for NodeKey {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One entry of the `nodes` array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// External vertex id.
    pub id: NodeKey,
    /// Optional vertex label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<NodeKey>,
}

impl NodeSpec {
    /// An unlabeled vertex.
    pub fn new(id: impl Into<NodeKey>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }

    /// A labeled vertex.
    pub fn labeled(id: impl Into<NodeKey>, label: impl Into<NodeKey>) -> Self {
        Self {
            id: id.into(),
            label: Some(label.into()),
        }
    }
}

/// One entry of the `edges` array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    /// One endpoint.
    pub source: NodeKey,
    /// The other endpoint.
    pub target: NodeKey,
}

impl EdgeSpec {
    /// An undirected edge between `source` and `target`.
    pub fn new(source: impl Into<NodeKey>, target: impl Into<NodeKey>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A whole graph as read from or written to JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDescription {
    /// Vertex list.
    pub nodes: Vec<NodeSpec>,
    /// Edge list.
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

impl GraphDescription {
    /// Build a description from explicit vertex and edge lists.
    pub const fn new(nodes: Vec<NodeSpec>, edges: Vec<EdgeSpec>) -> Self {
        Self { nodes, edges }
    }

    /// Unlabeled description whose vertices are exactly the endpoints of
    /// `edges` plus `extra_vertices`, in order of first appearance.
    pub fn from_edges<K>(edges: &[(K, K)], extra_vertices: &[K]) -> Self
    where
        K: Clone + Into<NodeKey>,
    {
        let mut nodes: Vec<NodeSpec> = Vec::new();
        let mut push_vertex = |key: NodeKey| {
            if !nodes.iter().any(|n| n.id == key) {
                nodes.push(NodeSpec { id: key, label: None });
            }
        };
        for (a, b) in edges {
            push_vertex(a.clone().into());
            push_vertex(b.clone().into());
        }
        for v in extra_vertices {
            push_vertex(v.clone().into());
        }
        let edges = edges
            .iter()
            .map(|(a, b)| EdgeSpec::new(a.clone(), b.clone()))
            .collect();
        Self { nodes, edges }
    }

    /// Attach `label` to the vertex with id `id`. Unknown ids are ignored.
    pub fn with_label(mut self, id: impl Into<NodeKey>, label: impl Into<NodeKey>) -> Self {
        let id = id.into();
        let label = label.into();
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
            node.label = Some(label);
        }
        self
    }

    /// Parse a description from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, DescriptionError> {
        let description = serde_json::from_str(json)?;
        Ok(description)
    }

    /// Read and parse a JSON description file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DescriptionError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DescriptionError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let description = Self::from_json_str(&text)?;
        tracing::debug!(
            "loaded {} with {} nodes and {} edges",
            path.display(),
            description.nodes.len(),
            description.edges.len()
        );
        Ok(description)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, DescriptionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Errors raised while loading a description.
#[derive(Debug, Error)]
pub enum DescriptionError {
    /// The file could not be read.
    #[error("Failed to read graph file {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The text is not a valid description.
    #[error("Failed to parse graph description: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_keys() {
        let json = r#"{
            "nodes": [{ "id": 1, "label": "and" }, { "id": "b" }],
            "edges": [{ "source": 1, "target": "b" }]
        }"#;
        let g = GraphDescription::from_json_str(json).unwrap();
        assert_eq!(g.nodes[0], NodeSpec::labeled(1, "and"));
        assert_eq!(g.nodes[1], NodeSpec::new("b"));
        assert_eq!(g.edges, vec![EdgeSpec::new(1, "b")]);
    }

    #[test]
    fn test_missing_edges_defaults_to_empty() {
        let g = GraphDescription::from_json_str(r#"{ "nodes": [{ "id": 0 }] }"#).unwrap();
        assert!(g.edges.is_empty());
    }

    #[test]
    fn test_from_edges_collects_vertices_in_order() {
        let g = GraphDescription::from_edges(&[("A", "B"), ("B", "C")], &["D"]);
        let ids: Vec<String> = g.nodes.iter().map(|n| n.id.to_string()).collect();
        assert_eq!(ids, ["A", "B", "C", "D"]);
        assert_eq!(g.edges.len(), 2);
    }

    #[test]
    fn test_with_label() {
        let g = GraphDescription::from_edges(&[(1, 2)], &[]).with_label(2, "x");
        assert_eq!(g.nodes[1].label, Some(NodeKey::from("x")));
        assert_eq!(g.nodes[0].label, None);
    }

    #[test]
    fn test_int_and_text_keys_differ() {
        assert_ne!(NodeKey::from(1), NodeKey::from("1"));
        assert_eq!(NodeKey::from(1).to_string(), NodeKey::from("1").to_string());
    }

    #[test]
    fn test_bad_json_is_error() {
        let err = GraphDescription::from_json_str(r#"{ "edges": [] }"#).unwrap_err();
        assert!(matches!(err, DescriptionError::Json(_)));
    }
}
