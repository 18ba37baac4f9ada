mod util;

use labeled_digraph::prelude::*;
use proptest::prelude::*;
use util::*;

/// A -> B -> C plus isolated D (both A and D are seeds).
fn chain() -> (G, Vec<NodeId>) {
    graph_from(
        4,
        &["A", "B", "C", "D"],
        &[(0, 1, None), (1, 2, None)],
        &[0, 3],
    )
}

#[test]
fn sinks_and_sources_on_chain() {
    let (g, ids) = chain();
    let idx = g.index();
    assert_eq!(idx.sinks(false), &[ids[2]]);
    assert_permutation(idx.sinks(true), &[ids[2], ids[3]]);
    assert_eq!(idx.sources(false), &[ids[0]]);
    assert_permutation(idx.sources(true), &[ids[0], ids[3]]);
    // memoized: same slice on every call
    assert!(std::ptr::eq(idx.sinks(false), idx.sinks(false)));
    assert_eq!(sinks(&idx, false), idx.sinks(false));
    assert_eq!(sources(&idx, true), idx.sources(true));
}

#[test]
fn identity_copy_is_isomorphic_with_equal_counts() {
    let (g, _) = graph_from(
        5,
        &["p", "q", "r", "s", "t"],
        &[
            (0, 1, Some("e")),
            (1, 2, Some("f")),
            (2, 0, None),
            (2, 3, Some("e")),
            (3, 3, None),
        ],
        &[0, 4],
    );
    let mut out = G::new();
    let map = copy(&mut out, &g, clone_node, clone_edge);
    assert_eq!(map.len(), g.index().len());
    assert_eq!(out.node_count(), 5);
    assert_eq!(out.edge_count(), 5);
    assert!(check_isomorphism(
        &g.index(),
        &out.index(),
        |_, _| true,
        |a, b| a.label() == b.label()
    ));
}

#[test]
fn projection_changes_types() {
    let mut src: Graph<&str, u32, u32> = Graph::new();
    let a = src.new_node(Some("a"), 1);
    let b = src.create_node(Some("b"), 2);
    src.new_edge(a, b, Some("w"), 5);

    let mut dst: Graph<usize, String, f64> = Graph::new();
    let map = project(
        &src,
        &mut dst,
        |n| Some(Attr::new(n.label().map(|l| l.len()), format!("#{}", n.payload()))),
        |e| Some(Attr::new(None, f64::from(*e.payload()) / 2.0)),
    );
    let nb = dst.node(map[&b]).unwrap();
    assert_eq!(nb.payload(), "#2");
    assert_eq!(nb.label(), Some(&1));
    let edge = dst.node(map[&a]).unwrap().out_edges().next().unwrap();
    assert_eq!(*edge.payload(), 2.5);
    assert_eq!(edge.label(), None);
}

#[test]
fn copy_into_from_subindex() {
    let (g, ids) = graph_from(
        4,
        &["n"],
        &[(0, 1, None), (1, 2, None), (2, 3, None)],
        &[0],
    );
    let sub = g.index_from_roots([ids[2]]);
    let mut out = G::new();
    let map = sub.copy_into(&mut out, clone_node, clone_edge);
    assert_eq!(map.len(), 2);
    assert!(map.contains_key(&ids[2]) && map.contains_key(&ids[3]));
    assert_eq!(out.edge_count(), 1);
}

#[test]
fn isomorphism_rejects_ambiguous_labels() {
    let build = || graph_from(2, &["same"], &[(0, 1, None)], &[0]).0;
    let (g1, g2) = (build(), build());
    assert!(!check_isomorphism(&g1.index(), &g2.index(), |_, _| true, |_, _| true));
}

#[test]
fn isomorphism_respects_edge_equivalence() {
    let mut g1: Graph<&str, (), u8> = Graph::new();
    let a = g1.new_node(Some("a"), ());
    let b = g1.create_node(Some("b"), ());
    g1.new_edge(a, b, None, 1);
    let mut g2: Graph<&str, (), u8> = Graph::new();
    copy(&mut g2, &g1, clone_node, |e| Some(e.attr().clone().map(|w| w + 1)));

    assert!(check_isomorphism(&g1.index(), &g2.index(), |_, _| true, |_, _| true));
    assert!(!check_isomorphism(
        &g1.index(),
        &g2.index(),
        |_, _| true,
        |x, y| x.payload() == y.payload()
    ));
}

proptest! {
    #[test]
    fn copies_are_isomorphic(
        edges in prop::collection::vec((0usize..8, 0usize..8), 0..24),
    ) {
        // distinct node labels keep the greedy mapping unambiguous
        let labels = ["0", "1", "2", "3", "4", "5", "6", "7"];
        let labelled: Vec<_> = edges.iter().map(|&(u, v)| (u, v, Some(labels[(u + v) % 3]))).collect();
        let (g, _) = graph_from(8, &labels, &labelled, &[0, 1, 2, 3, 4, 5, 6, 7]);
        let mut out = G::new();
        copy(&mut out, &g, clone_node, clone_edge);
        prop_assert_eq!(out.node_count(), g.node_count());
        prop_assert_eq!(out.edge_count(), g.edge_count());

        // parallel edges with equal labels are ambiguous by construction
        let mut pairs: Vec<_> = labelled.clone();
        pairs.sort();
        let has_parallel = pairs.windows(2).any(|w| w[0] == w[1]);
        let iso = check_isomorphism(&g.index(), &out.index(), |_, _| true, |_, _| true);
        prop_assert_eq!(iso, !has_parallel);
    }
}
