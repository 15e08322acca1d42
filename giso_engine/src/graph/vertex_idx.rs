use std::fmt;

/// Dense identifier of a vertex within one [`GraphModel`](super::GraphModel).
///
/// External ids are interned to these at build time so the search loops
/// index plain arrays instead of hashing arbitrary keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexIdx(u32);

impl VertexIdx {
    /// Wraps a raw index.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the index as a usize for array access.
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// All indices of a graph with `n` vertices, in ascending order.
    pub fn range(n: usize) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..n).map(Self::from)
    }
}

impl fmt::Display for VertexIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<usize> for VertexIdx {
    #[inline]
    fn from(id: usize) -> Self {
        debug_assert!(u32::try_from(id).is_ok(), "vertex index {id} overflows u32");
        Self(id as u32)
    }
}

impl From<VertexIdx> for usize {
    #[inline]
    fn from(id: VertexIdx) -> Self {
        id.0 as Self
    }
}
