//! Explicit-stack DFS over the name-keyed graph.

use std::collections::HashSet;

use super::{SizeMap, TransitiveSizes};
use crate::graph::Graph;

/// Drains `stack`, summing the sizes of every node not yet in `visited`.
///
/// Names that are not nodes of `graph` contribute nothing.
pub(super) fn drain_stack<'g>(
    graph: &'g Graph,
    stack: &mut Vec<&'g str>,
    visited: &mut HashSet<&'g str>,
) -> u64 {
    let mut total = 0;
    while let Some(name) = stack.pop() {
        if !visited.insert(name) {
            continue;
        }
        let Some(node) = graph.get(name) else {
            continue;
        };
        total += node.size_bytes;
        for child in &node.children {
            if !visited.contains(child.as_str()) {
                stack.push(child);
            }
        }
    }
    total
}

/// DFS with an explicit stack and a `HashSet` of visited names.
pub struct IterativeDfs<'g> {
    graph: &'g Graph,
    result: SizeMap,
}

impl<'g> IterativeDfs<'g> {
    /// Creates the engine. The graph is traversed in place, no encoding.
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            result: SizeMap::new(),
        }
    }
}

impl TransitiveSizes for IterativeDfs<'_> {
    fn name(&self) -> &'static str {
        "IterativeDfs"
    }

    fn prepare(&mut self) {
        self.result.clear();
    }

    fn run(&mut self) {
        let graph = self.graph;
        let mut result = SizeMap::new();
        let mut stack = Vec::new();
        let mut visited = HashSet::new();

        for root in graph.names() {
            visited.clear();
            stack.push(root.as_str());
            result.insert(root.clone(), drain_stack(graph, &mut stack, &mut visited));
        }
        self.result = result;
    }

    fn finalize(&self) -> SizeMap {
        self.result.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;

    #[test]
    fn chain_with_back_edge() {
        // a -> b -> c -> a
        let g: Graph = [
            ("a", Node::new(1, ["b"])),
            ("b", Node::new(10, ["c"])),
            ("c", Node::new(100, ["a"])),
        ]
        .into_iter()
        .collect();
        let mut engine = IterativeDfs::new(&g);
        engine.prepare();
        engine.run();
        let result = engine.finalize();

        assert_eq!(result.len(), 3);
        assert!(result.values().all(|&v| v == 111));
    }

    #[test]
    fn finalize_before_run_is_empty() {
        let g: Graph = [("a", Node::leaf(1))].into_iter().collect();
        assert!(IterativeDfs::new(&g).finalize().is_empty());
    }
}
