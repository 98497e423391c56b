use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use proptest::prelude::*;
use transitive_size::bench::assert_same;
use transitive_size::{EngineKind, Graph, Node, SizeMap, TransitiveSizes};

/// Random graphs with `1..=max_nodes` nodes; edges may repeat or self-loop.
fn arb_graph(max_nodes: usize) -> impl Strategy<Value = Graph> {
    (1..=max_nodes).prop_flat_map(|n| {
        (
            proptest::collection::vec(0u64..1_000, n),
            proptest::collection::vec((0..n, 0..n), 0..n * 4),
        )
            .prop_map(move |(sizes, edges)| {
                let mut g: Graph = sizes
                    .into_iter()
                    .enumerate()
                    .map(|(i, size)| (format!("m{i}"), Node::leaf(size)))
                    .collect();
                for (from, to) in edges {
                    g.add_edge(&format!("m{from}"), format!("m{to}")).unwrap();
                }
                g
            })
    })
}

fn run(kind: EngineKind, g: &Graph) -> SizeMap {
    let mut engine = kind.build(g).unwrap();
    engine.prepare();
    engine.run();
    engine.finalize()
}

/// Transitive sizes computed independently with petgraph's DFS.
fn oracle(g: &Graph) -> SizeMap {
    let mut pg = DiGraph::<u64, ()>::new();
    let ids: HashMap<&str, NodeIndex> = g
        .iter()
        .map(|(name, node)| (name, pg.add_node(node.size_bytes)))
        .collect();
    for (name, node) in g.iter() {
        for child in &node.children {
            pg.add_edge(ids[name], ids[child.as_str()], ());
        }
    }

    g.names()
        .iter()
        .map(|name| {
            let mut dfs = Dfs::new(&pg, ids[name.as_str()]);
            let mut total = 0;
            while let Some(nx) = dfs.next(&pg) {
                total += pg[nx];
            }
            (name.clone(), total)
        })
        .collect()
}

proptest! {
    #[test]
    fn engines_match_petgraph_oracle(g in arb_graph(40)) {
        let want = oracle(&g);
        for kind in EngineKind::ALL {
            let got = run(kind, &g);
            prop_assert!(assert_same(&want, &got).is_ok(), "{} disagrees with oracle", kind);
        }
    }

    #[test]
    fn totals_bound_own_size(g in arb_graph(30)) {
        let got = run(EngineKind::OffsetBitset, &g);
        prop_assert_eq!(got.len(), g.len());
        for (name, node) in g.iter() {
            prop_assert!(got[name] >= node.size_bytes);
        }
    }

    #[test]
    fn duplicating_an_edge_changes_nothing(g in arb_graph(25), pick in any::<prop::sample::Index>()) {
        let before = run(EngineKind::Interned, &g);

        let mut doubled = g.clone();
        let from = pick.get(g.names()).clone();
        let child = g.get(&from).and_then(|n| n.children.first().cloned());
        if let Some(child) = child {
            doubled.add_edge(&from, child).unwrap();
        }

        prop_assert_eq!(before, run(EngineKind::Interned, &doubled));
    }

    #[test]
    fn children_reachability_bound(g in arb_graph(30)) {
        // A parent's closure includes each child's closure.
        let got = run(EngineKind::Offset, &g);
        for (name, node) in g.iter() {
            for child in &node.children {
                prop_assert!(got[name] >= got[child]);
            }
        }
    }
}
