#![allow(dead_code)]
use labeled_digraph::prelude::*;

pub type G = Graph<&'static str>;

/// Build a graph with `n` nodes labelled by `labels[i % labels.len()]` and
/// the given `(from, to, edge_label)` edges. Nodes listed in `seeds` are
/// added; the rest are only created.
pub fn graph_from(
    n: usize,
    labels: &[&'static str],
    edges: &[(usize, usize, Option<&'static str>)],
    seeds: &[usize],
) -> (G, Vec<NodeId>) {
    let mut g = G::new();
    let ids: Vec<NodeId> = (0..n)
        .map(|i| {
            let label = (!labels.is_empty()).then(|| labels[i % labels.len()]);
            g.create_node(label, ())
        })
        .collect();
    for &s in seeds {
        g.add_node(ids[s]);
    }
    for &(u, v, l) in edges {
        g.new_edge(ids[u], ids[v], l, ());
    }
    (g, ids)
}

/// Nodes reachable from `seeds` in an adjacency list, computed the slow way.
pub fn reachable_naive(n: usize, edges: &[(usize, usize)], seeds: &[usize]) -> Vec<bool> {
    let mut seen = vec![false; n];
    let mut stack: Vec<usize> = seeds.to_vec();
    while let Some(u) = stack.pop() {
        if seen[u] {
            continue;
        }
        seen[u] = true;
        stack.extend(edges.iter().filter(|(a, _)| *a == u).map(|&(_, b)| b));
    }
    seen
}

pub fn clone_node<L: Clone, N: Clone, E>(n: NodeRef<'_, L, N, E>) -> Option<Attr<L, N>> {
    Some(n.attr().clone())
}

pub fn clone_edge<L: Clone, N, E: Clone>(e: EdgeRef<'_, L, N, E>) -> Option<Attr<L, E>> {
    Some(e.attr().clone())
}

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Copy + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}
