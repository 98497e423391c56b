//! Name-keyed dependency graphs.
//!
//! A [`Graph`] maps node names to a [`Node`] carrying its own byte size and an
//! ordered list of child names. It is the bootstrap form every encoder starts
//! from: cheap to build by hand or from JSON, expensive to traverse.
//!
//! Iteration order is insertion order. Encoders rely on it when they assign
//! dense indices, so two encodings of the same graph always agree on which
//! node is `0`, `1`, and so on.
//!
//! Duplicate children and self-references are legal. Children that are not
//! themselves keys of the graph are only detected when the graph is encoded
//! (or traversed by a name-keyed engine, which treats them as absent).

pub mod generate;

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use generate::{generate, node_name, XorShift64};

/// Errors raised while editing a [`Graph`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An edge was added from a node that does not exist.
    #[error("unknown node `{0}`")]
    UnknownNode(String),
}

/// A single node of the input graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Names of the direct children, in declaration order.
    #[serde(default)]
    pub children: Vec<String>,
    /// Size contributed by this node alone.
    pub size_bytes: u64,
}

impl Node {
    /// Creates a node with the given size and children.
    pub fn new<I, S>(size_bytes: u64, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            children: children.into_iter().map(Into::into).collect(),
            size_bytes,
        }
    }

    /// Creates a node without children.
    pub fn leaf(size_bytes: u64) -> Self {
        Self {
            children: Vec::new(),
            size_bytes,
        }
    }
}

/// An insertion-ordered map from node name to [`Node`].
#[derive(Debug, Clone, Default)]
pub struct Graph {
    names: Vec<String>,
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with room for `nodes` nodes.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            names: Vec::with_capacity(nodes),
            nodes: Vec::with_capacity(nodes),
            index: HashMap::with_capacity(nodes),
        }
    }

    /// Inserts `node` under `name`.
    ///
    /// Replacing an existing node keeps its original position and returns the
    /// previous value.
    pub fn insert(&mut self, name: impl Into<String>, node: Node) -> Option<Node> {
        let name = name.into();
        if let Some(&slot) = self.index.get(&name) {
            return Some(std::mem::replace(&mut self.nodes[slot], node));
        }
        self.index.insert(name.clone(), self.names.len());
        self.names.push(name);
        self.nodes.push(node);
        None
    }

    /// Appends `to` to the children of `from`.
    ///
    /// `to` is not required to exist yet; dangling children are reported by
    /// the encoders.
    pub fn add_edge(&mut self, from: &str, to: impl Into<String>) -> Result<(), GraphError> {
        let slot = *self
            .index
            .get(from)
            .ok_or_else(|| GraphError::UnknownNode(from.to_owned()))?;
        self.nodes[slot].children.push(to.into());
        Ok(())
    }

    /// Returns the node named `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.index.get(name).map(|&slot| &self.nodes[slot])
    }

    /// Returns `true` if `name` is a node of this graph.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the graph has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Total number of child references, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.children.len()).sum()
    }

    /// Node names in insertion order.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Iterates `(name, node)` pairs in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Node)> + '_ {
        self.names.iter().map(String::as_str).zip(self.nodes.iter())
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names && self.nodes == other.nodes
    }
}

impl Eq for Graph {}

impl<S: Into<String>> FromIterator<(S, Node)> for Graph {
    fn from_iter<I: IntoIterator<Item = (S, Node)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut graph = Graph::with_capacity(iter.size_hint().0);
        for (name, node) in iter {
            graph.insert(name, node);
        }
        graph
    }
}

impl<S: Into<String>> Extend<(S, Node)> for Graph {
    fn extend<I: IntoIterator<Item = (S, Node)>>(&mut self, iter: I) {
        for (name, node) in iter {
            self.insert(name, node);
        }
    }
}

impl Serialize for Graph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, node) in self.iter() {
            map.serialize_entry(name, node)?;
        }
        map.end()
    }
}

struct GraphVisitor(PhantomData<fn() -> Graph>);

impl<'de> Visitor<'de> for GraphVisitor {
    type Value = Graph;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from node name to {children, size_bytes}")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Graph, A::Error> {
        let mut graph = Graph::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, node)) = access.next_entry::<String, Node>()? {
            graph.insert(name, node);
        }
        Ok(graph)
    }
}

impl<'de> Deserialize<'de> for Graph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Visiting the map directly keeps document order.
        deserializer.deserialize_map(GraphVisitor(PhantomData))
    }
}
