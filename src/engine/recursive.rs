//! Recursive DFS over the name-keyed graph.

use std::collections::HashSet;

use super::iterative::drain_stack;
use super::{SizeMap, TransitiveSizes};
use crate::graph::Graph;

/// Recursion depth after which the remaining subtree is finished with an
/// explicit stack.
///
/// Long dependency chains would otherwise overflow the call stack, most
/// visibly on test threads, which get a small one.
pub const MAX_RECURSION_DEPTH: usize = 2_048;

fn visit<'g>(graph: &'g Graph, name: &'g str, visited: &mut HashSet<&'g str>, depth: usize) -> u64 {
    if !visited.insert(name) {
        return 0;
    }
    let Some(node) = graph.get(name) else {
        return 0;
    };

    let mut total = node.size_bytes;
    if depth >= MAX_RECURSION_DEPTH {
        let mut stack: Vec<&str> = node
            .children
            .iter()
            .map(String::as_str)
            .filter(|c| !visited.contains(c))
            .collect();
        return total + drain_stack(graph, &mut stack, visited);
    }

    for child in &node.children {
        if !visited.contains(child.as_str()) {
            total += visit(graph, child, visited, depth + 1);
        }
    }
    total
}

/// The textbook recursive formulation, kept as the baseline.
pub struct RecursiveDfs<'g> {
    graph: &'g Graph,
    result: SizeMap,
}

impl<'g> RecursiveDfs<'g> {
    /// Creates the engine. The graph is traversed in place, no encoding.
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            result: SizeMap::new(),
        }
    }
}

impl TransitiveSizes for RecursiveDfs<'_> {
    fn name(&self) -> &'static str {
        "RecursiveDfs"
    }

    fn prepare(&mut self) {
        self.result.clear();
    }

    fn run(&mut self) {
        let graph = self.graph;
        let mut result = SizeMap::new();
        for root in graph.names() {
            let mut visited = HashSet::new();
            result.insert(root.clone(), visit(graph, root, &mut visited, 0));
        }
        self.result = result;
    }

    fn finalize(&self) -> SizeMap {
        self.result.clone()
    }
}
