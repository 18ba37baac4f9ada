//! Extension traits over sequences of nodes and edges.
//!
//! Every adapter here is lazy and works on any `Iterator` yielding
//! [`NodeRef`]s or [`EdgeRef`]s, whether it came from a traversal, an
//! [`Index`](crate::topology::index::Index) or a node's adjacency. A
//! sequence can be re-run simply by asking its source for a fresh iterator.
//!
//! ```rust
//! use labeled_digraph::prelude::*;
//! let mut g: Graph<&str> = Graph::new();
//! let a = g.new_node(Some("a"), ());
//! let b = g.create_node(Some("b"), ());
//! g.new_edge(a, b, Some("x"), ());
//! g.new_edge(a, b, Some("y"), ());
//! let targets: Vec<_> = g.node(a).unwrap().out_edges().targets().unique_nodes().node_ids().collect();
//! assert_eq!(targets, vec![b]);
//! ```

use itertools::{Itertools, UniqueBy};

use crate::topology::bounds::{Label, Labeled};
use crate::topology::entity::{EdgeRef, NodeRef};
use crate::topology::ids::{EdgeId, NodeId};

/// Keeps the items whose label equals a given label.
pub struct LabelFilter<'a, I, L> {
    iter: I,
    label: Option<&'a L>,
}

impl<'a, I, L> Iterator for LabelFilter<'a, I, L>
where
    I: Iterator,
    I::Item: Labeled<Label = L>,
    L: PartialEq,
{
    type Item = I::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let label = self.label;
        self.iter.find(|item| item.label() == label)
    }
}

/// Label filtering for any sequence of labeled things.
pub trait LabeledIterExt: Iterator + Sized
where
    Self::Item: Labeled,
{
    /// Keep items labelled `label` (`None` keeps unlabeled items).
    fn with_label<'a>(
        self,
        label: Option<&'a <Self::Item as Labeled>::Label>,
    ) -> LabelFilter<'a, Self, <Self::Item as Labeled>::Label> {
        LabelFilter { iter: self, label }
    }
}

impl<I> LabeledIterExt for I
where
    I: Iterator,
    I::Item: Labeled,
{
}

fn node_key<L, N, E>(n: &NodeRef<'_, L, N, E>) -> NodeId {
    n.id()
}

fn edge_key<L, N, E>(e: &EdgeRef<'_, L, N, E>) -> EdgeId {
    e.id()
}

/// Node-sequence adapters.
pub trait NodeIterExt<'g, L: 'g, N: 'g, E: 'g>: Iterator<Item = NodeRef<'g, L, N, E>> + Sized {
    /// Drops repeated nodes, keeping first occurrences.
    fn unique_nodes(self) -> UniqueBy<Self, NodeId, fn(&NodeRef<'g, L, N, E>) -> NodeId> {
        self.unique_by(node_key as fn(&NodeRef<'g, L, N, E>) -> NodeId)
    }

    /// Projects every node to its id.
    fn node_ids(self) -> NodeIds<Self> {
        NodeIds { iter: self }
    }
}

impl<'g, L: 'g, N: 'g, E: 'g, I> NodeIterExt<'g, L, N, E> for I where
    I: Iterator<Item = NodeRef<'g, L, N, E>>
{
}

/// Edge-sequence adapters.
pub trait EdgeIterExt<'g, L: 'g, N: 'g, E: 'g>: Iterator<Item = EdgeRef<'g, L, N, E>> + Sized {
    /// Drops repeated edges, keeping first occurrences.
    fn unique_edges(self) -> UniqueBy<Self, EdgeId, fn(&EdgeRef<'g, L, N, E>) -> EdgeId> {
        self.unique_by(edge_key as fn(&EdgeRef<'g, L, N, E>) -> EdgeId)
    }

    /// Target node of each connected edge. Not deduplicated.
    fn targets(self) -> Targets<Self> {
        Targets { iter: self }
    }

    /// Source node of each connected edge. Not deduplicated.
    fn sources(self) -> Sources<Self> {
        Sources { iter: self }
    }

    /// Projects every edge to its id.
    fn edge_ids(self) -> EdgeIds<Self> {
        EdgeIds { iter: self }
    }
}

impl<'g, L: 'g, N: 'g, E: 'g, I> EdgeIterExt<'g, L, N, E> for I where
    I: Iterator<Item = EdgeRef<'g, L, N, E>>
{
}

pub struct NodeIds<I> {
    iter: I,
}

impl<'g, L: 'g, N: 'g, E: 'g, I> Iterator for NodeIds<I>
where
    I: Iterator<Item = NodeRef<'g, L, N, E>>,
{
    type Item = NodeId;

    #[inline]
    fn next(&mut self) -> Option<NodeId> {
        self.iter.next().map(|n| n.id())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

pub struct EdgeIds<I> {
    iter: I,
}

impl<'g, L: 'g, N: 'g, E: 'g, I> Iterator for EdgeIds<I>
where
    I: Iterator<Item = EdgeRef<'g, L, N, E>>,
{
    type Item = EdgeId;

    #[inline]
    fn next(&mut self) -> Option<EdgeId> {
        self.iter.next().map(|e| e.id())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

pub struct Targets<I> {
    iter: I,
}

impl<'g, L: Label + 'g, N: 'g, E: 'g, I> Iterator for Targets<I>
where
    I: Iterator<Item = EdgeRef<'g, L, N, E>>,
{
    type Item = NodeRef<'g, L, N, E>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.find_map(|e| e.target())
    }
}

pub struct Sources<I> {
    iter: I,
}

impl<'g, L: Label + 'g, N: 'g, E: 'g, I> Iterator for Sources<I>
where
    I: Iterator<Item = EdgeRef<'g, L, N, E>>,
{
    type Item = NodeRef<'g, L, N, E>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.find_map(|e| e.source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::graph::Graph;

    fn diamond() -> (Graph<&'static str>, [NodeId; 4]) {
        let mut g = Graph::new();
        let top = g.new_node(Some("top"), ());
        let l = g.create_node(Some("side"), ());
        let r = g.create_node(Some("side"), ());
        let bottom = g.create_node(None, ());
        g.new_edge(top, l, Some("left"), ());
        g.new_edge(top, r, Some("right"), ());
        g.new_edge(l, bottom, None, ());
        g.new_edge(r, bottom, None, ());
        (g, [top, l, r, bottom])
    }

    #[test]
    fn label_filter_on_nodes_and_edges() {
        let (g, [top, l, r, bottom]) = diamond();
        let sides: Vec<_> = g.nodes().with_label(Some(&"side")).node_ids().collect();
        assert_eq!(sides, vec![l, r]);
        let unlabeled: Vec<_> = g.nodes().with_label(None).node_ids().collect();
        assert_eq!(unlabeled, vec![bottom]);
        let right: Vec<_> = g
            .node(top)
            .unwrap()
            .out_edges()
            .with_label(Some(&"right"))
            .targets()
            .node_ids()
            .collect();
        assert_eq!(right, vec![r]);
    }

    #[test]
    fn targets_and_sources_project_edges() {
        let (g, [_, l, r, bottom]) = diamond();
        let into_bottom = g.node(bottom).unwrap().in_edges();
        let srcs: Vec<_> = into_bottom.sources().node_ids().collect();
        assert_eq!(srcs, vec![l, r]);
        let dup: Vec<_> = [l, r]
            .iter()
            .flat_map(|&n| g.node(n).unwrap().out_edges())
            .targets()
            .collect();
        assert_eq!(dup.len(), 2);
        assert_eq!(dup.into_iter().unique_nodes().count(), 1);
    }

    #[test]
    fn disconnected_edges_have_no_endpoints() {
        let mut g: Graph<&str> = Graph::new();
        let a = g.new_node(None, ());
        let e = g.new_edge(a, a, None, ());
        g.disconnect(e);
        assert_eq!([g.edge(e).unwrap()].into_iter().targets().count(), 0);
        assert_eq!([g.edge(e).unwrap()].into_iter().edge_ids().next(), Some(e));
    }
}
