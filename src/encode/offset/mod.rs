//! Offset-indexed (CSR) graph layout.
//!
//! Memory layout:
//! - `sizes`: `Vec<u64>` of length `n`
//! - `offsets`: `Vec<W>` of length `n + 1`, `offsets[0] == 0`, non-decreasing,
//!   `offsets[n] == edges.len()`
//! - `edges`: `Vec<W>`, the children of node `i` are `edges[offsets[i]..offsets[i + 1]]`
//!
//! The id width `W` only changes cache density. `OffsetGraph<u32>` holds twice
//! as many edges per cache line as `OffsetGraph<usize>` on 64-bit targets and
//! traverses identically.

mod width;

use core::ops::Range;

use num_traits::Zero;

use super::{EncodeError, NameTable};
use crate::graph::Graph;

pub use width::EdgeIndex;

/// A CSR graph with per-node sizes.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `encode` | \(O(n + m)\) | Interns names, then flattens adjacency |
/// | `children` | \(O(1)\) | Slice of the shared edge buffer |
/// | `degree` | \(O(1)\) | Difference of adjacent offsets |
/// | `size_of` | \(O(1)\) | |
#[derive(Debug, Clone)]
pub struct OffsetGraph<W: EdgeIndex = usize> {
    names: NameTable,
    sizes: Vec<u64>,
    offsets: Vec<W>,
    edges: Vec<W>,
}

#[inline]
fn narrow<W: EdgeIndex>(value: usize) -> Result<W, EncodeError> {
    W::from_index(value).ok_or(EncodeError::IndexOverflow {
        width: W::NAME,
        required: value,
    })
}

/// Fails if ids `0..nodes` are not all representable in `W`.
fn check_node_count<W: EdgeIndex>(nodes: usize) -> Result<(), EncodeError> {
    match nodes.checked_sub(1) {
        Some(last) if W::from_index(last).is_none() => Err(EncodeError::IndexOverflow {
            width: W::NAME,
            required: nodes,
        }),
        _ => Ok(()),
    }
}

impl<W: EdgeIndex> OffsetGraph<W> {
    /// Flattens `graph` into CSR form. Node order is insertion order.
    ///
    /// # Errors
    /// - [`EncodeError::UnknownChild`] if a child is not a node of `graph`
    /// - [`EncodeError::IndexOverflow`] if the node or edge count exceeds `W`
    pub fn encode(graph: &Graph) -> Result<Self, EncodeError> {
        let names = NameTable::from_graph(graph);
        let n = names.len();
        let m = graph.edge_count();

        // Reject oversized graphs before allocating anything.
        narrow::<W>(m)?;
        check_node_count::<W>(n)?;

        let mut sizes = Vec::with_capacity(n);
        let mut offsets = Vec::with_capacity(n + 1);
        let mut edges = Vec::with_capacity(m);
        offsets.push(W::zero());

        for (name, node) in graph.iter() {
            sizes.push(node.size_bytes);
            for child in &node.children {
                edges.push(narrow(names.resolve_child(name, child)?)?);
            }
            offsets.push(narrow(edges.len())?);
        }

        Ok(Self {
            names,
            sizes,
            offsets,
            edges,
        })
    }

    /// Builds a graph directly from CSR parts.
    ///
    /// # Errors
    /// [`EncodeError::InvalidLayout`] if
    /// - `names` and `sizes` differ in length, or a name repeats
    /// - `offsets.len() != names.len() + 1` or `offsets[0] != 0`
    /// - offsets decrease, or `offsets.last() != edges.len()`
    /// - an edge points past the last node
    pub fn from_parts(
        names: Vec<String>,
        sizes: Vec<u64>,
        offsets: Vec<W>,
        edges: Vec<W>,
    ) -> Result<Self, EncodeError> {
        let invalid = |msg: String| Err(EncodeError::InvalidLayout(msg));
        let n = names.len();

        if sizes.len() != n {
            return invalid(format!("{} sizes for {n} nodes", sizes.len()));
        }
        if offsets.len() != n + 1 {
            return invalid(format!("offsets must have length {}, got {}", n + 1, offsets.len()));
        }
        if !offsets[0].is_zero() {
            return invalid("offsets must start at 0".into());
        }
        if let Some(i) = offsets.windows(2).position(|w| w[0] > w[1]) {
            return invalid(format!("offsets decrease at node {i}"));
        }
        if offsets[n].index() != edges.len() {
            return invalid(format!(
                "offsets end at {} but there are {} edges",
                offsets[n].index(),
                edges.len()
            ));
        }
        if let Some(v) = edges.iter().find(|v| v.index() >= n) {
            return invalid(format!("edge to {} out of bounds for n={n}", v.index()));
        }

        let names = NameTable::from_names(names)?;
        Ok(Self {
            names,
            sizes,
            offsets,
            edges,
        })
    }

    /// Re-encodes this graph with a different id width.
    ///
    /// # Errors
    /// [`EncodeError::IndexOverflow`] if the node or edge count exceeds `V`.
    pub fn to_width<V: EdgeIndex>(&self) -> Result<OffsetGraph<V>, EncodeError> {
        check_node_count::<V>(self.node_count())?;
        let convert = |xs: &[W]| xs.iter().map(|x| narrow::<V>(x.index())).collect::<Result<Vec<_>, _>>();
        Ok(OffsetGraph {
            names: self.names.clone(),
            sizes: self.sizes.clone(),
            offsets: convert(&self.offsets)?,
            edges: convert(&self.edges)?,
        })
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.sizes.len()
    }

    /// Number of edges, duplicates included.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Positions of `node`'s children in the edge buffer.
    ///
    /// # Panics
    /// Panics if `node >= node_count()`.
    #[inline]
    pub fn edge_range(&self, node: usize) -> Range<usize> {
        assert!(node < self.node_count(), "node {node} out of bounds");
        self.offsets[node].index()..self.offsets[node + 1].index()
    }

    /// Children of `node` as dense ids.
    pub fn children(&self, node: usize) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.edges[self.edge_range(node)].iter().map(|e| e.index())
    }

    /// Out-degree of `node`, duplicates included.
    #[inline]
    pub fn degree(&self, node: usize) -> usize {
        self.edge_range(node).len()
    }

    /// Size of `node` alone.
    #[inline]
    pub fn size_of(&self, node: usize) -> u64 {
        self.sizes[node]
    }

    /// Per-node sizes, indexed by id.
    #[inline]
    pub fn sizes(&self) -> &[u64] {
        &self.sizes
    }

    /// Raw offset index (length `node_count() + 1`).
    #[inline]
    pub fn offsets(&self) -> &[W] {
        &self.offsets
    }

    /// Raw flattened edge buffer.
    #[inline]
    pub fn edges(&self) -> &[W] {
        &self.edges
    }

    /// The interning table.
    #[inline]
    pub fn names(&self) -> &NameTable {
        &self.names
    }

    /// Name of the id type.
    #[inline]
    pub fn width(&self) -> &'static str {
        W::NAME
    }

    /// Bytes held by the size, offset and edge buffers (names excluded).
    pub fn memory_footprint(&self) -> usize {
        core::mem::size_of::<u64>() * self.sizes.len()
            + core::mem::size_of::<W>() * (self.offsets.len() + self.edges.len())
    }
}

#[cfg(test)]
mod tests;
