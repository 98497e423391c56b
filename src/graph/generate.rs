//! Synthetic dependency graphs for benchmarking.
//!
//! Names look like bundler module paths so that interning has realistic key
//! lengths to hash. Edges are drawn uniformly at random, which means
//! duplicates and self-loops show up naturally at benchmark sizes.

use super::{Graph, Node};

const ANIMALS: [&str; 17] = [
    "cat",
    "dog",
    "elephant",
    "giraffe",
    "hippopotamus",
    "horse",
    "monkey",
    "moose",
    "penguin",
    "platypus",
    "rhinoceros",
    "squirrel",
    "tiger",
    "turtle",
    "walrus",
    "whale",
    "zebra",
];

const PATH_DEPTH: usize = 6;

/// Exclusive upper bound for generated node sizes.
pub const MAX_NODE_SIZE: u64 = 1000;

/// Simple xorshift RNG; deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Creates a generator. A zero seed is remapped since xorshift sticks at zero.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 0xDEAD_BEEF_CAFE } else { seed },
        }
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform-ish value in `0..bound`. `bound` must be non-zero.
    #[inline]
    pub fn below(&mut self, bound: u64) -> u64 {
        debug_assert!(bound != 0);
        self.next_u64() % bound
    }
}

/// Path-like name of the `i`-th generated node.
pub fn node_name(i: usize) -> String {
    let animal = ANIMALS[i % ANIMALS.len()];
    let mut name = String::with_capacity((animal.len() + 1) * PATH_DEPTH + 16);
    for _ in 0..PATH_DEPTH {
        name.push_str(animal);
        name.push('/');
    }
    name.push_str("node-");
    name.push_str(&i.to_string());
    name.push_str(".js");
    name
}

/// Builds a random graph with `nodes` nodes and `edges` child references.
///
/// With zero nodes no edges can be placed and the result is empty.
pub fn generate(nodes: usize, edges: usize, seed: u64) -> Graph {
    let mut rng = XorShift64::new(seed);
    let mut graph = Graph::with_capacity(nodes);
    for i in 0..nodes {
        graph.insert(node_name(i), Node::leaf(rng.below(MAX_NODE_SIZE)));
    }
    if nodes == 0 {
        return graph;
    }

    let n = nodes as u64;
    for _ in 0..edges {
        let from = rng.below(n) as usize;
        let to = rng.below(n) as usize;
        let child = graph.names[to].clone();
        graph.nodes[from].children.push(child);
    }

    tracing::debug!(nodes, edges, seed, "generated synthetic graph");
    graph
}
