//! Visited markers for per-root traversals over dense ids.
//!
//! Four storage choices, one interface:
//! - `HashVisited`: a `HashSet<usize>`, the general form
//! - `FlagVisited`: one `bool` per node, refilled on reset
//! - `ByteVisited`: one `u8` per node, resetting only the touched slots
//! - `BitVisited`: word-packed bits, 64 nodes per `u64`
//!
//! Engines are generic over [`VisitedMarker`] so the traversal loop is written
//! once per graph layout and the marker storage is the only thing that varies.

use std::collections::HashSet;

/// Per-traversal visited state over ids `0..len`.
pub trait VisitedMarker {
    /// Creates a marker for `len` nodes with nothing visited.
    fn with_len(len: usize) -> Self;

    /// Forgets every visit. Called before each root.
    fn reset(&mut self);

    /// Marks `node` visited. Returns `true` iff it was not visited before.
    fn try_visit(&mut self, node: usize) -> bool;

    /// Returns `true` if `node` is currently marked.
    fn is_visited(&self, node: usize) -> bool;
}

/// Hash-set backed marker.
#[derive(Debug, Clone, Default)]
pub struct HashVisited {
    seen: HashSet<usize>,
}

impl VisitedMarker for HashVisited {
    fn with_len(_len: usize) -> Self {
        Self::default()
    }

    #[inline]
    fn reset(&mut self) {
        self.seen.clear();
    }

    #[inline]
    fn try_visit(&mut self, node: usize) -> bool {
        self.seen.insert(node)
    }

    #[inline]
    fn is_visited(&self, node: usize) -> bool {
        self.seen.contains(&node)
    }
}

/// Dense `bool` flags, cleared by refilling the whole array.
#[derive(Debug, Clone, Default)]
pub struct FlagVisited {
    flags: Vec<bool>,
}

impl VisitedMarker for FlagVisited {
    fn with_len(len: usize) -> Self {
        Self {
            flags: vec![false; len],
        }
    }

    #[inline]
    fn reset(&mut self) {
        self.flags.fill(false);
    }

    #[inline(always)]
    fn try_visit(&mut self, node: usize) -> bool {
        !std::mem::replace(&mut self.flags[node], true)
    }

    #[inline(always)]
    fn is_visited(&self, node: usize) -> bool {
        self.flags[node]
    }
}

/// Dense byte flags that remember which slots were set.
///
/// Reset cost is proportional to the nodes reached from the last root, not to
/// the graph size, which matters when most roots reach little.
#[derive(Debug, Clone, Default)]
pub struct ByteVisited {
    flags: Vec<u8>,
    touched: Vec<usize>,
}

impl VisitedMarker for ByteVisited {
    fn with_len(len: usize) -> Self {
        Self {
            flags: vec![0; len],
            touched: Vec::new(),
        }
    }

    #[inline]
    fn reset(&mut self) {
        for &node in &self.touched {
            self.flags[node] = 0;
        }
        self.touched.clear();
    }

    #[inline(always)]
    fn try_visit(&mut self, node: usize) -> bool {
        if self.flags[node] != 0 {
            return false;
        }
        self.flags[node] = 1;
        self.touched.push(node);
        true
    }

    #[inline(always)]
    fn is_visited(&self, node: usize) -> bool {
        self.flags[node] != 0
    }
}

const WORD_BITS: usize = u64::BITS as usize;

/// Word-packed bitset.
#[derive(Debug, Clone, Default)]
pub struct BitVisited {
    words: Vec<u64>,
    len: usize,
}

impl VisitedMarker for BitVisited {
    fn with_len(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    #[inline]
    fn reset(&mut self) {
        self.words.fill(0);
    }

    #[inline(always)]
    fn try_visit(&mut self, node: usize) -> bool {
        debug_assert!(node < self.len, "node {node} out of bounds");
        let word = &mut self.words[node / WORD_BITS];
        let mask = 1u64 << (node % WORD_BITS);
        let fresh = *word & mask == 0;
        *word |= mask;
        fresh
    }

    #[inline(always)]
    fn is_visited(&self, node: usize) -> bool {
        self.words[node / WORD_BITS] & (1u64 << (node % WORD_BITS)) != 0
    }
}
