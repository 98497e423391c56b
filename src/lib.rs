//! # `transitive_size` - Dependency-Closure Size Aggregation
//!
//! Computes, for every node of a directed graph, its **transitive size**: the
//! sum of `size_bytes` over the node and every node reachable from it, each
//! counted once. This is the number a bundle analyzer shows next to a module
//! ("importing this pulls in 1.2 MB").
//!
//! The aggregation itself is simple. What this crate is about is how the graph
//! *layout* and the *visited-marker* storage change wall-clock time when the
//! computation is repeated from every root, i.e. O(N) full traversals.
//!
//! ## Layers
//!
//! 1. **Input** ([`graph`]): an insertion-ordered, name-keyed [`Graph`].
//! 2. **Encoders** ([`encode`]): [`IndexedGraph`] interns names into dense ids;
//!    [`OffsetGraph`] flattens adjacency into CSR buffers of a chosen id width.
//! 3. **Engines** ([`engine`]): implementations of [`TransitiveSizes`], from a
//!    recursive DFS over strings to a bitset-marked DFS over `u32` CSR buffers.
//! 4. **Harness** ([`bench`]): median-of-N timing, exact result comparison, and
//!    a suite runner that validates every engine against a reference.
//!
//! ## Guarantees
//!
//! - Every engine produces bit-identical `u64` totals for the same graph.
//! - Cycles, self-loops and duplicate edges are normal input: each reachable
//!   node is counted exactly once per root.
//! - A child name that is not a node of the graph is rejected at encode time
//!   ([`EncodeError::UnknownChild`]) rather than silently dropped.
//! - Everything is single-threaded and deterministic except measured durations.
//!
//! ## Example
//!
//! ```rust
//! use transitive_size::{EngineKind, Graph, Node, TransitiveSizes};
//!
//! let graph: Graph = [
//!     ("a", Node::new(1, ["b", "c"])),
//!     ("b", Node::new(2, ["c"])),
//!     ("c", Node::leaf(3)),
//! ]
//! .into_iter()
//! .collect();
//!
//! let mut engine = EngineKind::OffsetU32.build(&graph).unwrap();
//! engine.prepare();
//! engine.run();
//! let sizes = engine.finalize();
//!
//! assert_eq!(sizes["a"], 6);
//! assert_eq!(sizes["b"], 5);
//! assert_eq!(sizes["c"], 3);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]

pub mod bench;
pub mod encode;
pub mod engine;
pub mod graph;

pub use bench::{benchmark, compare, run_suite, BenchConfig, BenchError, BenchOutcome, Comparison, SuiteReport};
pub use encode::{EdgeIndex, EncodeError, IndexedGraph, NameTable, OffsetGraph};
pub use engine::{EngineKind, SizeMap, TransitiveSizes};
pub use graph::{generate, Graph, GraphError, Node};

// Compile-time layout checks for the fixed-width buffers.
const _: () = {
    use core::mem;

    // `EdgeIndex::index` widens with `as usize`; that is only lossless if
    // `usize` is at least as wide as every id type.
    assert!(mem::size_of::<usize>() >= mem::size_of::<u32>());
};
