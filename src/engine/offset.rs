//! DFS over the CSR layout.
//!
//! The inner loop touches three flat buffers only: `sizes`, `offsets` and
//! `edges`. Children of a node are a contiguous slice, so the hot loop walks
//! memory sequentially instead of chasing one allocation per node.

use std::marker::PhantomData;

use super::visited::{BitVisited, ByteVisited, FlagVisited, VisitedMarker};
use super::{SizeMap, TransitiveSizes};
use crate::encode::{EdgeIndex, EncodeError, OffsetGraph};
use crate::graph::Graph;

/// DFS over an [`OffsetGraph<W>`], generic over the visited marker.
pub struct OffsetEngine<W: EdgeIndex, V> {
    graph: OffsetGraph<W>,
    result: Vec<u64>,
    name: &'static str,
    _marker: PhantomData<fn() -> V>,
}

/// `usize` CSR buffers with a dense `bool` visited array.
pub type OffsetDfs = OffsetEngine<usize, FlagVisited>;

/// `u32` CSR buffers with byte flags reset by touched index.
pub type OffsetDfsU32 = OffsetEngine<u32, ByteVisited>;

/// `u32` CSR buffers with a word-packed visited bitset.
pub type OffsetDfsBitset = OffsetEngine<u32, BitVisited>;

impl<W: EdgeIndex, V: VisitedMarker> OffsetEngine<W, V> {
    /// Encodes `graph` and labels the engine `name`.
    pub fn with_name(graph: &Graph, name: &'static str) -> Result<Self, EncodeError> {
        Ok(Self::from_encoded(OffsetGraph::encode(graph)?, name))
    }

    /// Wraps an already encoded graph.
    pub fn from_encoded(graph: OffsetGraph<W>, name: &'static str) -> Self {
        Self {
            graph,
            result: Vec::new(),
            name,
            _marker: PhantomData,
        }
    }

    /// The encoded graph.
    pub fn graph(&self) -> &OffsetGraph<W> {
        &self.graph
    }
}

impl OffsetEngine<usize, FlagVisited> {
    /// Encodes `graph` for [`OffsetDfs`].
    pub fn new(graph: &Graph) -> Result<Self, EncodeError> {
        Self::with_name(graph, "OffsetDfs")
    }
}

impl OffsetEngine<u32, ByteVisited> {
    /// Encodes `graph` for [`OffsetDfsU32`].
    pub fn new(graph: &Graph) -> Result<Self, EncodeError> {
        Self::with_name(graph, "OffsetDfsU32")
    }
}

impl OffsetEngine<u32, BitVisited> {
    /// Encodes `graph` for [`OffsetDfsBitset`].
    pub fn new(graph: &Graph) -> Result<Self, EncodeError> {
        Self::with_name(graph, "OffsetDfsBitset")
    }
}

impl<W: EdgeIndex, V: VisitedMarker> TransitiveSizes for OffsetEngine<W, V> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn prepare(&mut self) {
        self.result.clear();
    }

    fn run(&mut self) {
        let sizes = self.graph.sizes();
        let offsets = self.graph.offsets();
        let edges = self.graph.edges();
        let n = sizes.len();

        let mut result = Vec::with_capacity(n);
        let mut visited = V::with_len(n);
        let mut stack: Vec<usize> = Vec::new();

        for root in 0..n {
            visited.reset();
            stack.push(root);
            let mut total = 0u64;

            while let Some(next) = stack.pop() {
                if !visited.try_visit(next) {
                    continue;
                }
                total += sizes[next];

                let start = offsets[next].index();
                let end = offsets[next + 1].index();
                for &child in &edges[start..end] {
                    let child = child.index();
                    if !visited.is_visited(child) {
                        stack.push(child);
                    }
                }
            }
            result.push(total);
        }
        self.result = result;
    }

    fn finalize(&self) -> SizeMap {
        self.graph.names().to_size_map(&self.result)
    }
}
