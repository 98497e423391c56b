//! DFS over interned adjacency lists.

use std::marker::PhantomData;

use super::visited::{FlagVisited, HashVisited, VisitedMarker};
use super::{SizeMap, TransitiveSizes};
use crate::encode::{EncodeError, IndexedGraph};
use crate::graph::Graph;

/// DFS over an [`IndexedGraph`], generic over the visited marker.
pub struct IndexedDfs<V> {
    graph: IndexedGraph,
    result: Vec<u64>,
    name: &'static str,
    _marker: PhantomData<fn() -> V>,
}

/// Interned ids with a hashed visited set.
pub type InternedDfs = IndexedDfs<HashVisited>;

/// Interned ids with a dense `bool` visited array.
pub type ArrayVisitedDfs = IndexedDfs<FlagVisited>;

impl<V: VisitedMarker> IndexedDfs<V> {
    /// Encodes `graph` and labels the engine `name`.
    pub fn with_name(graph: &Graph, name: &'static str) -> Result<Self, EncodeError> {
        Ok(Self {
            graph: IndexedGraph::encode(graph)?,
            result: Vec::new(),
            name,
            _marker: PhantomData,
        })
    }

    /// The encoded graph.
    pub fn graph(&self) -> &IndexedGraph {
        &self.graph
    }
}

impl IndexedDfs<HashVisited> {
    /// Encodes `graph` for [`InternedDfs`].
    pub fn new(graph: &Graph) -> Result<Self, EncodeError> {
        Self::with_name(graph, "InternedDfs")
    }
}

impl IndexedDfs<FlagVisited> {
    /// Encodes `graph` for [`ArrayVisitedDfs`].
    pub fn new(graph: &Graph) -> Result<Self, EncodeError> {
        Self::with_name(graph, "ArrayVisitedDfs")
    }
}

impl<V: VisitedMarker> TransitiveSizes for IndexedDfs<V> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn prepare(&mut self) {
        self.result.clear();
    }

    fn run(&mut self) {
        let nodes = self.graph.nodes();
        let mut result = Vec::with_capacity(nodes.len());
        let mut visited = V::with_len(nodes.len());
        let mut stack = Vec::new();

        for root in 0..nodes.len() {
            visited.reset();
            stack.push(root);
            let mut total = 0u64;

            while let Some(next) = stack.pop() {
                if !visited.try_visit(next) {
                    continue;
                }
                let node = &nodes[next];
                total += node.size_bytes;
                for &child in &node.children {
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
