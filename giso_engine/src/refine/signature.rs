use std::fmt;

use itertools::Itertools;

use super::RefinementKind;

/// Sorted multiset of class sizes of one vertex partition.
///
/// Unlike raw class ids, this is comparable between two independently
/// refined graphs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassHistogram(Vec<usize>);

impl ClassHistogram {
    /// Histogram of a coloring whose ids are dense in `0..classes`.
    pub(crate) fn from_colors(colors: &[u32], classes: usize) -> Self {
        let mut sizes = vec![0usize; classes];
        for &c in colors {
            sizes[c as usize] += 1;
        }
        sizes.sort_unstable();
        Self(sizes)
    }

    /// Class sizes in ascending order.
    pub fn sizes(&self) -> &[usize] {
        &self.0
    }

    /// Number of classes.
    pub fn class_count(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ClassHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

/// Result of refining one graph.
///
/// Color refinement keeps only the final histogram. Weisfeiler-Lehman keeps
/// the histogram of the initial coloring and of every round it ran.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    /// Which refinement produced this signature.
    pub(crate) kind: RefinementKind,
    /// Histograms in round order.
    pub(crate) histograms: Vec<ClassHistogram>,
}

impl Signature {
    /// Which refinement produced this signature.
    pub const fn kind(&self) -> RefinementKind {
        self.kind
    }

    /// All recorded histograms in round order.
    pub fn histograms(&self) -> &[ClassHistogram] {
        &self.histograms
    }

    /// Histogram of the last recorded partition.
    pub fn final_histogram(&self) -> Option<&ClassHistogram> {
        self.histograms.last()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.histograms.iter().join(" -> "))
    }
}
