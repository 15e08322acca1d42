//! Common test cases for GISO.
//!
//! Each case pairs two graph descriptions with the expected answer of the
//! exact matcher and of the refinement filters under a given configuration.

use crate::config::Config;
use crate::description::GraphDescription;

/// A complete test case definition.
#[derive(Debug, Clone)]
pub struct TestCase {
    /// The name of the test case.
    pub name: &'static str,
    /// The configuration for the comparison.
    pub config: Config,
    /// First graph.
    pub left: &'static GraphDescription,
    /// Second graph.
    pub right: &'static GraphDescription,
    /// Whether the graphs are isomorphic.
    pub expected_exact: bool,
    /// What the refinement filters report (a pass may be a false positive).
    pub expected_filter: bool,
}

fn int_edges(edges: &[(i64, i64)]) -> GraphDescription {
    GraphDescription::from_edges(edges, &[])
}

fn cycle(n: i64) -> GraphDescription {
    let edges: Vec<(i64, i64)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
    int_edges(&edges)
}

fn petersen(relabel: impl Fn(i64) -> i64) -> GraphDescription {
    let mut edges = Vec::new();
    for i in 0..5 {
        edges.push((i, (i + 1) % 5));
        edges.push((i, i + 5));
        edges.push((5 + i, 5 + (i + 2) % 5));
    }
    let edges: Vec<(i64, i64)> = edges.into_iter().map(|(a, b)| (relabel(a), relabel(b))).collect();
    int_edges(&edges)
}

fn cube() -> GraphDescription {
    let mut edges = Vec::new();
    for v in 0..8_i64 {
        for bit in [1, 2, 4] {
            if v & bit == 0 {
                edges.push((v, v | bit));
            }
        }
    }
    int_edges(&edges)
}

fn crown() -> GraphDescription {
    // K(4,4) minus a perfect matching, ids 10..13 and 20..23
    let mut edges = Vec::new();
    for i in 0..4_i64 {
        for j in 0..4_i64 {
            if i != j {
                edges.push((10 + i, 20 + j));
            }
        }
    }
    int_edges(&edges)
}

fn two_k4() -> GraphDescription {
    let mut edges = Vec::new();
    for base in [0_i64, 4] {
        for i in 0..4 {
            for j in (i + 1)..4 {
                edges.push((base + i, base + j));
            }
        }
    }
    int_edges(&edges)
}

// #####################
// GRAPHS
// #####################
lazy_static::lazy_static! {
    static ref TRIANGLE_ABC: GraphDescription =
        GraphDescription::from_edges(&[("A", "B"), ("B", "C"), ("C", "A")], &[]);
    static ref TRIANGLE_123: GraphDescription = int_edges(&[(1, 2), (2, 3), (3, 1)]);
    static ref PATH_ABC: GraphDescription =
        GraphDescription::from_edges(&[("A", "B"), ("B", "C")], &[]);

    static ref TWO_TRIANGLES: GraphDescription =
        int_edges(&[(1, 2), (2, 3), (3, 1), (4, 5), (5, 6), (6, 4)]);
    static ref HEXAGON: GraphDescription = cycle(6);

    static ref TRIANGLE_LABELED_XYY: GraphDescription = GraphDescription::from_edges(
        &[("A", "B"), ("B", "C"), ("C", "A")],
        &[],
    )
    .with_label("A", "x")
    .with_label("B", "y")
    .with_label("C", "y");
    static ref TRIANGLE_LABELED_XXY: GraphDescription = int_edges(&[(1, 2), (2, 3), (3, 1)])
        .with_label(1, "x")
        .with_label(2, "x")
        .with_label(3, "y");
    static ref TRIANGLE_LABELED_YXY: GraphDescription = int_edges(&[(1, 2), (2, 3), (3, 1)])
        .with_label(1, "y")
        .with_label(2, "x")
        .with_label(3, "y");

    static ref PATH_4: GraphDescription = int_edges(&[(1, 2), (2, 3), (3, 4)]);
    static ref STAR_4: GraphDescription = int_edges(&[(1, 2), (1, 3), (1, 4)]);

    static ref PETERSEN: GraphDescription = petersen(|v| v);
    static ref PETERSEN_SHUFFLED: GraphDescription = petersen(|v| (3 * v + 7) % 10);

    static ref CUBE: GraphDescription = cube();
    static ref CROWN: GraphDescription = crown();
    static ref TWO_K4: GraphDescription = two_k4();

    static ref EMPTY: GraphDescription = GraphDescription::default();
    static ref ISOLATED_ABC: GraphDescription = GraphDescription::from_edges::<&str>(&[], &["A", "B", "C"]);
    static ref ISOLATED_123: GraphDescription = GraphDescription::from_edges::<i64>(&[], &[1, 2, 3]);

    static ref TRIANGLE_PLUS_ISOLATED: GraphDescription =
        GraphDescription::from_edges(&[(1_i64, 2_i64), (2, 3), (3, 1)], &[4]);
}

// #####################
// CASES
// #####################
lazy_static::lazy_static! {
    /// Named cases shared by the engine tests.
    pub static ref BASIC_TEST_CASES: Vec<TestCase> = vec![
        TestCase {
            name: "triangle_relabeled",
            config: Config::default(),
            left: &TRIANGLE_ABC,
            right: &TRIANGLE_123,
            expected_exact: true,
            expected_filter: true,
        },
        TestCase {
            name: "path_vs_triangle",
            config: Config::default(),
            left: &PATH_ABC,
            right: &TRIANGLE_ABC,
            expected_exact: false,
            expected_filter: false,
        },
        TestCase {
            name: "two_triangles_vs_hexagon",
            config: Config::default(),
            left: &TWO_TRIANGLES,
            right: &HEXAGON,
            expected_exact: false,
            expected_filter: true,
        },
        TestCase {
            name: "labeled_triangles_mismatch",
            config: Config::default(),
            left: &TRIANGLE_LABELED_XYY,
            right: &TRIANGLE_LABELED_XXY,
            expected_exact: false,
            expected_filter: true,
        },
        TestCase {
            name: "labeled_triangles_mismatch_ignored",
            config: Config::builder().ignore_labels().build(),
            left: &TRIANGLE_LABELED_XYY,
            right: &TRIANGLE_LABELED_XXY,
            expected_exact: true,
            expected_filter: true,
        },
        TestCase {
            name: "labeled_triangles_match",
            config: Config::default(),
            left: &TRIANGLE_LABELED_XYY,
            right: &TRIANGLE_LABELED_YXY,
            expected_exact: true,
            expected_filter: true,
        },
        TestCase {
            name: "path_vs_star",
            config: Config::default(),
            left: &PATH_4,
            right: &STAR_4,
            expected_exact: false,
            expected_filter: false,
        },
        TestCase {
            name: "petersen_shuffled",
            config: Config::default(),
            left: &PETERSEN,
            right: &PETERSEN_SHUFFLED,
            expected_exact: true,
            expected_filter: true,
        },
        TestCase {
            name: "cube_vs_crown",
            config: Config::default(),
            left: &CUBE,
            right: &CROWN,
            expected_exact: true,
            expected_filter: true,
        },
        TestCase {
            name: "cube_vs_two_k4",
            config: Config::default(),
            left: &CUBE,
            right: &TWO_K4,
            expected_exact: false,
            expected_filter: true,
        },
        TestCase {
            name: "empty_graphs",
            config: Config::default(),
            left: &EMPTY,
            right: &EMPTY,
            expected_exact: true,
            expected_filter: true,
        },
        TestCase {
            name: "isolated_vertices",
            config: Config::default(),
            left: &ISOLATED_ABC,
            right: &ISOLATED_123,
            expected_exact: true,
            expected_filter: true,
        },
        TestCase {
            name: "triangle_plus_isolated_vs_star",
            config: Config::default(),
            left: &TRIANGLE_PLUS_ISOLATED,
            right: &STAR_4,
            expected_exact: false,
            // both refine to classes of sizes 1 and 3
            expected_filter: true,
        },
    ];
}

/// Look up a case by name.
pub fn test_case(name: &str) -> Option<&'static TestCase> {
    BASIC_TEST_CASES.iter().find(|tc| tc.name == name)
}
