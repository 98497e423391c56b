//! Tests for the CSR encoder.

use super::*;
use crate::graph::Node;

fn diamond() -> Graph {
    // a -> b, c ; b -> c ; c -> (none) ; d -> d, a
    [
        ("a", Node::new(1, ["b", "c"])),
        ("b", Node::new(2, ["c"])),
        ("c", Node::leaf(3)),
        ("d", Node::new(4, ["d", "a"])),
    ]
    .into_iter()
    .collect()
}

#[test]
fn offsets_delimit_children() {
    let g = OffsetGraph::<usize>::encode(&diamond()).unwrap();

    assert_eq!(g.node_count(), 4);
    assert_eq!(g.edge_count(), 5);
    assert_eq!(g.offsets(), &[0, 2, 3, 3, 5]);
    assert_eq!(g.edges(), &[1, 2, 2, 3, 0]);
    assert_eq!(g.sizes(), &[1, 2, 3, 4]);

    assert_eq!(g.children(0).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(g.children(2).count(), 0);
    assert_eq!(g.degree(3), 2);
    assert_eq!(g.size_of(3), 4);
}

#[test]
fn csr_invariants_hold() {
    let g = OffsetGraph::<u32>::encode(&crate::graph::generate(200, 2_000, 9)).unwrap();
    let offsets = g.offsets();

    assert_eq!(offsets[0], 0);
    assert_eq!(offsets.len(), g.node_count() + 1);
    assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(*offsets.last().unwrap() as usize, g.edge_count());
    assert!(g.edges().iter().all(|&e| (e as usize) < g.node_count()));
}

#[test]
fn widths_encode_identically() {
    let graph = diamond();
    let wide = OffsetGraph::<usize>::encode(&graph).unwrap();
    let narrow = OffsetGraph::<u16>::encode(&graph).unwrap();

    for node in 0..wide.node_count() {
        assert_eq!(
            wide.children(node).collect::<Vec<_>>(),
            narrow.children(node).collect::<Vec<_>>()
        );
    }
    assert_eq!(narrow.width(), "u16");
    assert!(narrow.memory_footprint() < wide.memory_footprint());

    let back = narrow.to_width::<usize>().unwrap();
    assert_eq!(back.offsets(), wide.offsets());
    assert_eq!(back.edges(), wide.edges());
}

#[test]
fn unknown_child_aborts_encoding() {
    let mut graph = diamond();
    graph.add_edge("c", "nowhere").unwrap();

    let err = OffsetGraph::<u32>::encode(&graph).unwrap_err();
    assert_eq!(
        err,
        EncodeError::UnknownChild {
            parent: "c".into(),
            child: "nowhere".into()
        }
    );
}

#[test]
fn narrow_width_overflow() {
    // 70k self-loops on a single node: ids fit in u16, edge offsets do not.
    let mut graph = Graph::new();
    graph.insert("x", Node::leaf(1));
    for _ in 0..70_000 {
        graph.add_edge("x", "x").unwrap();
    }
    let err = OffsetGraph::<u16>::encode(&graph).unwrap_err();
    assert_eq!(
        err,
        EncodeError::IndexOverflow {
            width: "u16",
            required: 70_000
        }
    );
    assert!(OffsetGraph::<u32>::encode(&graph).is_ok());
}

#[test]
fn empty_graph_has_sentinel_only() {
    let g = OffsetGraph::<u32>::encode(&Graph::new()).unwrap();
    assert_eq!(g.node_count(), 0);
    assert_eq!(g.offsets(), &[0]);
    assert!(g.edges().is_empty());
}

#[test]
fn from_csr_parts_reconstruction() {
    let g = OffsetGraph::<u32>::from_parts(
        vec!["a".into(), "b".into(), "c".into()],
        vec![10, 20, 30],
        vec![0, 2, 3, 3],
        vec![1, 2, 2],
    )
    .unwrap();

    assert_eq!(g.children(0).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(g.names().id("c"), Some(2));
}

#[test]
fn from_csr_parts_rejects_bad_layouts() {
    let names = || vec!["a".to_string(), "b".to_string()];
    let bad = [
        OffsetGraph::<u32>::from_parts(names(), vec![1], vec![0, 1, 1], vec![0]),
        OffsetGraph::<u32>::from_parts(names(), vec![1, 2], vec![0, 1], vec![0]),
        OffsetGraph::<u32>::from_parts(names(), vec![1, 2], vec![1, 1, 1], vec![0]),
        OffsetGraph::<u32>::from_parts(names(), vec![1, 2], vec![0, 2, 1], vec![0, 1]),
        OffsetGraph::<u32>::from_parts(names(), vec![1, 2], vec![0, 1, 2], vec![0]),
        OffsetGraph::<u32>::from_parts(names(), vec![1, 2], vec![0, 1, 1], vec![5]),
    ];
    for result in bad {
        assert!(matches!(result, Err(EncodeError::InvalidLayout(_))));
    }
}

fn leaves(count: usize) -> Graph {
    (0..count).map(|i| (format!("n{i}"), Node::leaf(1))).collect()
}

#[test]
fn node_count_overflow() {
    // u16 addresses ids 0..=65_535, so 65_536 nodes is the limit.
    assert!(OffsetGraph::<u16>::encode(&leaves(65_536)).is_ok());

    let err = OffsetGraph::<u16>::encode(&leaves(65_537)).unwrap_err();
    assert_eq!(
        err,
        EncodeError::IndexOverflow {
            width: "u16",
            required: 65_537
        }
    );
}

#[test]
fn to_width_rejects_too_many_nodes() {
    let wide = OffsetGraph::<usize>::encode(&leaves(65_537)).unwrap();
    let err = wide.to_width::<u16>().unwrap_err();
    assert_eq!(
        err,
        EncodeError::IndexOverflow {
            width: "u16",
            required: 65_537
        }
    );
    assert_eq!(wide.to_width::<u32>().unwrap().node_count(), 65_537);

    let fits = OffsetGraph::<usize>::encode(&leaves(65_536)).unwrap();
    assert_eq!(fits.to_width::<u16>().unwrap().node_count(), 65_536);
}
