//! Sink and source classification over an indexed node set.
//!
//! Both helpers scan the node set of an [`Index`] once, in discovery order.
//! Incoming edges are counted relative to the index, i.e. only edges whose
//! source is itself indexed. A node with no edges at all is *disconnected*
//! and is reported only when asked for.
//!
//! [`Index::sinks`] and [`Index::sources`] memoize these results.

use crate::topology::bounds::Label;
use crate::topology::ids::NodeId;
use crate::topology::index::Index;

/// Indexed nodes with no outgoing edges.
///
/// With `include_disconnected == false` a sink must also have at least one
/// incoming edge.
pub fn sinks<L: Label, N, E>(index: &Index<'_, L, N, E>, include_disconnected: bool) -> Vec<NodeId> {
    index
        .nodes()
        .filter(|n| !n.has_out_edges())
        .filter(|n| include_disconnected || index.in_degree(n.id()) > 0)
        .map(|n| n.id())
        .collect()
}

/// Indexed nodes with no incoming edges from the indexed set.
///
/// With `include_disconnected == false` a source must also have at least
/// one outgoing edge.
pub fn sources<L: Label, N, E>(index: &Index<'_, L, N, E>, include_disconnected: bool) -> Vec<NodeId> {
    index
        .nodes()
        .filter(|n| index.in_degree(n.id()) == 0)
        .filter(|n| include_disconnected || n.has_out_edges())
        .map(|n| n.id())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::graph::Graph;

    /// A -> B -> C plus an isolated D.
    fn chain() -> (Graph<&'static str>, [NodeId; 4]) {
        let mut g = Graph::new();
        let a = g.new_node(Some("A"), ());
        let b = g.create_node(Some("B"), ());
        let c = g.create_node(Some("C"), ());
        let d = g.new_node(Some("D"), ());
        g.new_edge(a, b, None, ());
        g.new_edge(b, c, None, ());
        (g, [a, b, c, d])
    }

    #[test]
    fn sinks_of_chain() {
        let (g, [_, _, c, d]) = chain();
        let idx = g.index();
        assert_eq!(sinks(&idx, false), vec![c]);
        let mut all = sinks(&idx, true);
        all.sort();
        let mut want = vec![c, d];
        want.sort();
        assert_eq!(all, want);
    }

    #[test]
    fn sources_of_chain() {
        let (g, [a, _, _, d]) = chain();
        let idx = g.index();
        assert_eq!(sources(&idx, false), vec![a]);
        assert_eq!(sources(&idx, true), vec![a, d]);
    }

    #[test]
    fn sources_ignore_edges_from_outside_the_index() {
        let (mut g, [a, b, _, _]) = chain();
        let outside = g.create_node(None, ());
        g.new_edge(outside, a, None, ());
        let idx = g.index_from_roots([a]);
        assert_eq!(sources(&idx, false), vec![a]);
        assert!(!sinks(&idx, false).contains(&b));
    }
}
