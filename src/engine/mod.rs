//! Transitive-size engines.
//!
//! Every engine computes, for every node, the sum of `size_bytes` over the node
//! and everything reachable from it, each node counted once. They differ only
//! in graph layout and visited-marker storage:
//!
//! | Engine | Graph | Visited |
//! |--------|-------|---------|
//! | [`RecursiveDfs`] | name-keyed [`Graph`] | `HashSet<&str>`, call stack |
//! | [`IterativeDfs`] | name-keyed [`Graph`] | `HashSet<&str>`, explicit stack |
//! | [`InternedDfs`] | [`IndexedGraph`](crate::encode::IndexedGraph) | [`HashVisited`] |
//! | [`ArrayVisitedDfs`] | [`IndexedGraph`](crate::encode::IndexedGraph) | [`FlagVisited`] |
//! | [`OffsetDfs`] | [`OffsetGraph<usize>`](crate::encode::OffsetGraph) | [`FlagVisited`] |
//! | [`OffsetDfsU32`] | [`OffsetGraph<u32>`](crate::encode::OffsetGraph) | [`ByteVisited`] |
//! | [`OffsetDfsBitset`] | [`OffsetGraph<u32>`](crate::encode::OffsetGraph) | [`BitVisited`] |
//!
//! Each root is traversed from scratch; nothing is memoized across roots.

mod indexed;
mod iterative;
mod offset;
mod recursive;
pub mod visited;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::encode::{self, EncodeError};
use crate::graph::Graph;

pub use indexed::{ArrayVisitedDfs, IndexedDfs, InternedDfs};
pub use iterative::IterativeDfs;
pub use offset::{OffsetDfs, OffsetDfsBitset, OffsetDfsU32, OffsetEngine};
pub use recursive::{RecursiveDfs, MAX_RECURSION_DEPTH};
pub use visited::{BitVisited, ByteVisited, FlagVisited, HashVisited, VisitedMarker};

/// Name-keyed transitive sizes, one entry per node.
pub type SizeMap = BTreeMap<String, u64>;

/// The prepare/run/finalize cycle shared by every engine.
pub trait TransitiveSizes {
    /// Engine identity used in benchmark labels.
    fn name(&self) -> &'static str;

    /// Drops results of the previous run. Not timed by the harness.
    fn prepare(&mut self);

    /// Recomputes the transitive size of every node.
    fn run(&mut self);

    /// Returns the last run's results keyed by node name.
    ///
    /// Calling this repeatedly returns the same snapshot without recomputing.
    fn finalize(&self) -> SizeMap;
}

impl<T: TransitiveSizes + ?Sized> TransitiveSizes for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn prepare(&mut self) {
        (**self).prepare();
    }

    fn run(&mut self) {
        (**self).run();
    }

    fn finalize(&self) -> SizeMap {
        (**self).finalize()
    }
}

/// Returned when an engine name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown engine `{0}` (expected one of: {names})", names = EngineKind::names().join(", "))]
pub struct UnknownEngine(pub String);

/// The available engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    /// [`RecursiveDfs`].
    Recursive,
    /// [`IterativeDfs`].
    Iterative,
    /// [`InternedDfs`].
    Interned,
    /// [`ArrayVisitedDfs`].
    ArrayVisited,
    /// [`OffsetDfs`].
    Offset,
    /// [`OffsetDfsU32`].
    OffsetU32,
    /// [`OffsetDfsBitset`].
    OffsetBitset,
}

impl EngineKind {
    /// Every engine, in benchmark order.
    pub const ALL: [EngineKind; 7] = [
        EngineKind::Recursive,
        EngineKind::Iterative,
        EngineKind::Interned,
        EngineKind::ArrayVisited,
        EngineKind::Offset,
        EngineKind::OffsetU32,
        EngineKind::OffsetBitset,
    ];

    /// Engine name as reported in benchmark labels.
    pub const fn name(self) -> &'static str {
        match self {
            EngineKind::Recursive => "RecursiveDfs",
            EngineKind::Iterative => "IterativeDfs",
            EngineKind::Interned => "InternedDfs",
            EngineKind::ArrayVisited => "ArrayVisitedDfs",
            EngineKind::Offset => "OffsetDfs",
            EngineKind::OffsetU32 => "OffsetDfsU32",
            EngineKind::OffsetBitset => "OffsetDfsBitset",
        }
    }

    /// Names of every engine.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|k| k.name()).collect()
    }

    /// Builds the engine over `graph`, encoding it as needed.
    ///
    /// Dangling children are rejected for every kind, including the engines
    /// that traverse the name-keyed graph directly.
    pub fn build<'g>(self, graph: &'g Graph) -> Result<Box<dyn TransitiveSizes + 'g>, EncodeError> {
        let engine: Box<dyn TransitiveSizes + 'g> = match self {
            EngineKind::Recursive => {
                encode::check_children(graph)?;
                Box::new(RecursiveDfs::new(graph))
            }
            EngineKind::Iterative => {
                encode::check_children(graph)?;
                Box::new(IterativeDfs::new(graph))
            }
            EngineKind::Interned => Box::new(InternedDfs::new(graph)?),
            EngineKind::ArrayVisited => Box::new(ArrayVisitedDfs::new(graph)?),
            EngineKind::Offset => Box::new(OffsetDfs::new(graph)?),
            EngineKind::OffsetU32 => Box::new(OffsetDfsU32::new(graph)?),
            EngineKind::OffsetBitset => Box::new(OffsetDfsBitset::new(graph)?),
        };
        Ok(engine)
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EngineKind {
    type Err = UnknownEngine;

    /// Accepts the engine name (`OffsetDfsU32`) or its kebab-case form
    /// (`offset-dfs-u32`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|k| k.name().to_lowercase() == wanted)
            .ok_or_else(|| UnknownEngine(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;

    #[test]
    fn engine_names_parse_back() {
        for kind in EngineKind::ALL {
            assert_eq!(kind.name().parse::<EngineKind>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.name());
        }
        assert_eq!("offset-dfs-u32".parse::<EngineKind>(), Ok(EngineKind::OffsetU32));
        assert_eq!("array_visited_dfs".parse::<EngineKind>(), Ok(EngineKind::ArrayVisited));
        assert!("bfs".parse::<EngineKind>().is_err());
    }

    #[test]
    fn built_engines_report_their_kind() {
        let g: Graph = [("a", Node::leaf(1))].into_iter().collect();
        for kind in EngineKind::ALL {
            let engine = kind.build(&g).unwrap();
            assert_eq!(engine.name(), kind.name());
        }
    }

    #[test]
    fn every_kind_rejects_dangling_children() {
        let g: Graph = [("a", Node::new(1, ["b"]))].into_iter().collect();
        for kind in EngineKind::ALL {
            assert!(
                matches!(kind.build(&g), Err(EncodeError::UnknownChild { .. })),
                "{kind} accepted a dangling child"
            );
        }
    }
}
