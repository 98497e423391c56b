//! Interned adjacency lists.

use super::{EncodeError, NameTable};
use crate::graph::Graph;

/// One node of an [`IndexedGraph`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexedNode {
    /// Dense ids of the direct children, in declaration order.
    pub children: Vec<usize>,
    /// Size contributed by this node alone.
    pub size_bytes: u64,
}

/// A graph whose node names were interned into dense ids.
///
/// Each node still owns its own child list, so traversal hops between
/// separately allocated buffers; see [`OffsetGraph`](super::OffsetGraph) for
/// the flattened layout.
#[derive(Debug, Clone, Default)]
pub struct IndexedGraph {
    names: NameTable,
    nodes: Vec<IndexedNode>,
}

impl IndexedGraph {
    /// Interns `graph`.
    ///
    /// # Errors
    /// [`EncodeError::UnknownChild`] if a child is not a node of `graph`.
    pub fn encode(graph: &Graph) -> Result<Self, EncodeError> {
        let names = NameTable::from_graph(graph);
        let nodes = graph
            .iter()
            .map(|(name, node)| {
                let children = node
                    .children
                    .iter()
                    .map(|child| names.resolve_child(name, child))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(IndexedNode {
                    children,
                    size_bytes: node.size_bytes,
                })
            })
            .collect::<Result<Vec<_>, EncodeError>>()?;

        Ok(Self { names, nodes })
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of child references.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.children.len()).sum()
    }

    /// Node `id`.
    ///
    /// # Panics
    /// Panics if `id >= node_count()`.
    #[inline]
    pub fn node(&self, id: usize) -> &IndexedNode {
        &self.nodes[id]
    }

    /// All nodes, indexed by id.
    #[inline]
    pub fn nodes(&self) -> &[IndexedNode] {
        &self.nodes
    }

    /// The interning table.
    #[inline]
    pub fn names(&self) -> &NameTable {
        &self.names
    }
}
