#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Once;

use giso_common::{EdgeSpec, GraphDescription, NodeKey, NodeSpec};
use giso_engine::GraphModel;

static INIT: Once = Once::new();

/// Configures logging for the test runner.
pub fn setup_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Path of a graph under the workspace `fixtures/graphs` directory.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("fixtures")
        .join("graphs")
        .join(name)
}

#[track_caller]
pub fn load_fixture(name: &str) -> GraphModel {
    let description = GraphDescription::from_path(fixture_path(name))
        .unwrap_or_else(|e| panic!("failed to load fixture {name}: {e}"));
    GraphModel::from_description(&description)
        .unwrap_or_else(|e| panic!("fixture {name} is not a simple graph: {e}"))
}

/// Rename every vertex `v` of `description` to `perm[position of v] + 100`
/// and list the renamed vertices in ascending order, so dense indices are
/// permuted as well.
pub fn relabel(description: &GraphDescription, perm: &[usize]) -> GraphDescription {
    let position: HashMap<NodeKey, usize> = description
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.clone(), i))
        .collect();
    let rename = |key: &NodeKey| -> i64 { (perm[position[key]] + 100) as i64 };

    let mut nodes: Vec<NodeSpec> = description
        .nodes
        .iter()
        .map(|node| NodeSpec {
            id: rename(&node.id).into(),
            label: node.label.clone(),
        })
        .collect();
    nodes.sort_by(|a, b| a.id.cmp(&b.id));

    let edges = description
        .edges
        .iter()
        .rev()
        .map(|edge| EdgeSpec::new(rename(&edge.target), rename(&edge.source)))
        .collect();

    GraphDescription::new(nodes, edges)
}
