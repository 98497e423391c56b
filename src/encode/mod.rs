//! Traversal-ready encodings of a [`Graph`](crate::graph::Graph).
//!
//! Encoders are pure: they borrow the name-keyed input and build a new,
//! immutable structure. Names are interned once into dense ids (see
//! [`NameTable`]) and never consulted again until results are translated back.
//!
//! - [`IndexedGraph`]: one `Vec<usize>` of children per node.
//! - [`OffsetGraph`]: CSR layout, one flat edge buffer plus an offset index,
//!   generic over the id width ([`EdgeIndex`]).
//!
//! A child name that is not a node of the input aborts encoding with
//! [`EncodeError::UnknownChild`]; no partially encoded graph is returned.

mod indexed;
mod names;
pub mod offset;

pub use indexed::{IndexedGraph, IndexedNode};
pub use names::NameTable;
pub use offset::{EdgeIndex, OffsetGraph};

use crate::graph::Graph;

/// Fails on the first child reference that is not a node of `graph`.
///
/// The encoders perform this check as a side effect of interning; engines that
/// traverse the name-keyed graph directly call it up front.
pub fn check_children(graph: &Graph) -> Result<(), EncodeError> {
    for (name, node) in graph.iter() {
        if let Some(child) = node.children.iter().find(|c| !graph.contains(c)) {
            return Err(EncodeError::UnknownChild {
                parent: name.to_owned(),
                child: child.clone(),
            });
        }
    }
    Ok(())
}

/// Errors raised while encoding a graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// A node lists a child that is not itself a node of the graph.
    #[error("node `{parent}` references unknown child `{child}`")]
    UnknownChild {
        /// Node whose child list is malformed.
        parent: String,
        /// The dangling child name.
        child: String,
    },
    /// The graph has more nodes or edges than the chosen id width can address.
    #[error("{required} does not fit in a {width} index")]
    IndexOverflow {
        /// Name of the id type, e.g. `"u16"`.
        width: &'static str,
        /// The count that could not be represented.
        required: usize,
    },
    /// Raw CSR parts violate a layout invariant.
    #[error("invalid CSR layout: {0}")]
    InvalidLayout(String),
}
