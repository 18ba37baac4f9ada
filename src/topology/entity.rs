//! Node and edge storage slots plus the borrowed views handed to callers.
//!
//! The graph owns every node and edge in two arenas. [`NodeRef`] and
//! [`EdgeRef`] are cheap `Copy` views pairing an id with its slot and the
//! owning graph, so neighbours can be followed without further lookups by
//! the caller. Views compare and hash by id.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::{Copied, Map};
use std::slice;
use std::vec;

use crate::graph_error::DigraphError;
use crate::topology::bounds::{Label, Labeled};
use crate::topology::edge_set::{EdgeSet, EdgeSetIter, OutEdge, WithLabelIter};
use crate::topology::graph::Graph;
use crate::topology::ids::{EdgeId, NodeId};
use crate::topology::label::Attr;

// ----------------------------------------------------------------------------
// Slots
// ----------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub(crate) struct NodeSlot<L, N> {
    pub(crate) attr: Attr<L, N>,
    pub(crate) out: EdgeSet<L>,
    pub(crate) incoming: Vec<EdgeId>,
    /// Position in the graph's label bucket for `attr.label`.
    pub(crate) label_pos: usize,
    /// Position in the graph's seed list, if the node is a seed.
    pub(crate) seed_pos: Option<usize>,
}

impl<L, N> NodeSlot<L, N> {
    pub(crate) fn new(attr: Attr<L, N>) -> Self {
        NodeSlot {
            attr,
            out: EdgeSet::default(),
            incoming: Vec::new(),
            label_pos: 0,
            seed_pos: None,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct EdgeSlot<L, E> {
    pub(crate) attr: Attr<L, E>,
    /// `(source, target)` while connected.
    pub(crate) ends: Option<(NodeId, NodeId)>,
    /// Position in the target's incoming list; meaningless while disconnected.
    pub(crate) in_pos: usize,
}

impl<L, E> EdgeSlot<L, E> {
    pub(crate) fn new(attr: Attr<L, E>) -> Self {
        EdgeSlot {
            attr,
            ends: None,
            in_pos: 0,
        }
    }
}

// ----------------------------------------------------------------------------
// NodeRef
// ----------------------------------------------------------------------------

/// Borrowed view of one node.
pub struct NodeRef<'g, L, N, E> {
    graph: &'g Graph<L, N, E>,
    id: NodeId,
    slot: &'g NodeSlot<L, N>,
}

/// Outgoing edges of a node, in edge-store order.
pub type OutEdges<'g, L, N, E> = Edges<'g, L, N, E, Map<EdgeSetIter<'g, L>, fn(OutEdge) -> EdgeId>>;
/// Outgoing edges of a node carrying one label.
pub type OutEdgesWith<'g, L, N, E> =
    Edges<'g, L, N, E, Map<WithLabelIter<'g, L>, fn(OutEdge) -> EdgeId>>;
/// Edges listed in a borrowed id slice.
pub type EdgeSlice<'g, L, N, E> = Edges<'g, L, N, E, Copied<slice::Iter<'g, EdgeId>>>;
/// Nodes listed in a borrowed id slice.
pub type NodeSlice<'g, L, N, E> = Nodes<'g, L, N, E, Copied<slice::Iter<'g, NodeId>>>;
/// Nodes listed in an owned id vector.
pub type NodeList<'g, L, N, E> = Nodes<'g, L, N, E, vec::IntoIter<NodeId>>;

#[inline]
fn out_edge_id(e: OutEdge) -> EdgeId {
    e.edge
}

impl<'g, L, N, E> NodeRef<'g, L, N, E> {
    #[inline]
    pub(crate) fn new(graph: &'g Graph<L, N, E>, id: NodeId, slot: &'g NodeSlot<L, N>) -> Self {
        NodeRef { graph, id, slot }
    }

    #[inline]
    pub fn id(self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn graph(self) -> &'g Graph<L, N, E> {
        self.graph
    }

    #[inline]
    pub fn label(self) -> Option<&'g L> {
        self.slot.attr.label.as_ref()
    }

    #[inline]
    pub fn payload(self) -> &'g N {
        &self.slot.attr.payload
    }

    #[inline]
    pub fn attr(self) -> &'g Attr<L, N> {
        &self.slot.attr
    }

    /// Whether the node was registered with [`Graph::add_node`].
    #[inline]
    pub fn is_seed(self) -> bool {
        self.slot.seed_pos.is_some()
    }

    #[inline]
    pub fn out_degree(self) -> usize {
        self.slot.out.len()
    }

    /// Number of connected edges pointing at this node.
    #[inline]
    pub fn in_degree(self) -> usize {
        self.slot.incoming.len()
    }

    /// Live incoming edges. Connection order, except that disconnecting an
    /// edge moves the most recent incoming edge into its place.
    pub fn in_edges(self) -> EdgeSlice<'g, L, N, E> {
        Edges::new(self.graph, self.slot.incoming.iter().copied())
    }
}

impl<'g, L: Label, N, E> NodeRef<'g, L, N, E> {
    #[inline]
    pub fn has_out_edges(self) -> bool {
        !self.slot.out.is_empty()
    }

    /// All outgoing edges.
    ///
    /// Order is insertion order until the node's edge store is promoted,
    /// then grouped by label.
    pub fn out_edges(self) -> OutEdges<'g, L, N, E> {
        Edges::new(
            self.graph,
            self.slot.out.iter().map(out_edge_id as fn(OutEdge) -> EdgeId),
        )
    }

    /// Outgoing edges whose label equals `label`.
    pub fn out_edges_with(self, label: Option<&'g L>) -> OutEdgesWith<'g, L, N, E> {
        Edges::new(
            self.graph,
            self.slot
                .out
                .with_label(label)
                .map(out_edge_id as fn(OutEdge) -> EdgeId),
        )
    }

    /// Distinct targets of the outgoing edges, first-seen order.
    pub fn next_nodes(self) -> NodeList<'g, L, N, E> {
        Nodes::new(self.graph, self.slot.out.targets().into_iter())
    }

    /// Distinct targets of the outgoing edges labelled `label`.
    pub fn next_nodes_with(self, label: Option<&L>) -> NodeList<'g, L, N, E> {
        Nodes::new(self.graph, self.slot.out.targets_with(label).into_iter())
    }

    /// Follows the single outgoing edge labelled `label`.
    ///
    /// # Panics
    /// Panics if more than one outgoing edge carries `label`.
    pub fn next_node(self, label: Option<&L>) -> Option<NodeRef<'g, L, N, E>> {
        self.try_next_node(label)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Like [`next_node`](Self::next_node) but reports ambiguity as an error.
    pub fn try_next_node(
        self,
        label: Option<&L>,
    ) -> Result<Option<NodeRef<'g, L, N, E>>, DigraphError> {
        let mut edges = self.slot.out.with_label(label);
        let Some(first) = edges.next() else {
            return Ok(None);
        };
        let extra = edges.count();
        if extra > 0 {
            return Err(DigraphError::AmbiguousNext {
                node: self.id,
                label: format!("{label:?}"),
                count: extra + 1,
            });
        }
        Ok(self.graph.node(first.target))
    }
}

impl<L, N, E> Clone for NodeRef<'_, L, N, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L, N, E> Copy for NodeRef<'_, L, N, E> {}

impl<L, N, E> PartialEq for NodeRef<'_, L, N, E> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<L, N, E> Eq for NodeRef<'_, L, N, E> {}

impl<L, N, E> Hash for NodeRef<'_, L, N, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<L: fmt::Debug, N, E> fmt::Debug for NodeRef<'_, L, N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("label", &self.slot.attr.label)
            .finish()
    }
}

impl<'g, L, N, E> Labeled for NodeRef<'g, L, N, E> {
    type Label = L;

    #[inline]
    fn label(&self) -> Option<&L> {
        self.slot.attr.label.as_ref()
    }
}

// ----------------------------------------------------------------------------
// EdgeRef
// ----------------------------------------------------------------------------

/// Borrowed view of one edge.
pub struct EdgeRef<'g, L, N, E> {
    graph: &'g Graph<L, N, E>,
    id: EdgeId,
    slot: &'g EdgeSlot<L, E>,
}

impl<'g, L, N, E> EdgeRef<'g, L, N, E> {
    #[inline]
    pub(crate) fn new(graph: &'g Graph<L, N, E>, id: EdgeId, slot: &'g EdgeSlot<L, E>) -> Self {
        EdgeRef { graph, id, slot }
    }

    #[inline]
    pub fn id(self) -> EdgeId {
        self.id
    }

    #[inline]
    pub fn label(self) -> Option<&'g L> {
        self.slot.attr.label.as_ref()
    }

    #[inline]
    pub fn payload(self) -> &'g E {
        &self.slot.attr.payload
    }

    #[inline]
    pub fn attr(self) -> &'g Attr<L, E> {
        &self.slot.attr
    }

    #[inline]
    pub fn is_connected(self) -> bool {
        self.slot.ends.is_some()
    }

    /// `(source, target)` ids, or `None` while disconnected.
    #[inline]
    pub fn endpoint_ids(self) -> Option<(NodeId, NodeId)> {
        self.slot.ends
    }
}

impl<'g, L: Label, N, E> EdgeRef<'g, L, N, E> {
    pub fn source(self) -> Option<NodeRef<'g, L, N, E>> {
        let (from, _) = self.slot.ends?;
        self.graph.node(from)
    }

    pub fn target(self) -> Option<NodeRef<'g, L, N, E>> {
        let (_, to) = self.slot.ends?;
        self.graph.node(to)
    }

    pub fn endpoints(self) -> Option<(NodeRef<'g, L, N, E>, NodeRef<'g, L, N, E>)> {
        Some((self.source()?, self.target()?))
    }
}

impl<L, N, E> Clone for EdgeRef<'_, L, N, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L, N, E> Copy for EdgeRef<'_, L, N, E> {}

impl<L, N, E> PartialEq for EdgeRef<'_, L, N, E> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<L, N, E> Eq for EdgeRef<'_, L, N, E> {}

impl<L, N, E> Hash for EdgeRef<'_, L, N, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<L: fmt::Debug, N, E> fmt::Debug for EdgeRef<'_, L, N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeRef")
            .field("id", &self.id)
            .field("label", &self.slot.attr.label)
            .field("ends", &self.slot.ends)
            .finish()
    }
}

impl<'g, L, N, E> Labeled for EdgeRef<'g, L, N, E> {
    type Label = L;

    #[inline]
    fn label(&self) -> Option<&L> {
        self.slot.attr.label.as_ref()
    }
}

// ----------------------------------------------------------------------------
// Id -> view adapters
// ----------------------------------------------------------------------------

/// Resolves a sequence of node ids into [`NodeRef`]s, skipping dead ids.
pub struct Nodes<'g, L, N, E, I> {
    graph: &'g Graph<L, N, E>,
    ids: I,
}

impl<'g, L, N, E, I> Nodes<'g, L, N, E, I> {
    pub(crate) fn new(graph: &'g Graph<L, N, E>, ids: I) -> Self {
        Nodes { graph, ids }
    }
}

impl<'g, L, N, E, I> Iterator for Nodes<'g, L, N, E, I>
where
    L: Label,
    I: Iterator<Item = NodeId>,
{
    type Item = NodeRef<'g, L, N, E>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        self.ids.find_map(|id| graph.node(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.ids.size_hint().1)
    }
}

/// Resolves a sequence of edge ids into [`EdgeRef`]s, skipping dead ids.
pub struct Edges<'g, L, N, E, I> {
    graph: &'g Graph<L, N, E>,
    ids: I,
}

impl<'g, L, N, E, I> Edges<'g, L, N, E, I> {
    pub(crate) fn new(graph: &'g Graph<L, N, E>, ids: I) -> Self {
        Edges { graph, ids }
    }
}

impl<'g, L, N, E, I> Iterator for Edges<'g, L, N, E, I>
where
    L: Label,
    I: Iterator<Item = EdgeId>,
{
    type Item = EdgeRef<'g, L, N, E>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        self.ids.find_map(|id| graph.edge(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.ids.size_hint().1)
    }
}

#[cfg(test)]
mod tests {
    use super::NodeRef;
    use crate::graph_error::DigraphError;
    use crate::topology::graph::Graph;

    // degree accessors carry no bound on the label type
    fn degrees<L, N, E>(node: NodeRef<'_, L, N, E>) -> (usize, usize, bool) {
        (node.out_degree(), node.in_degree(), node.is_seed())
    }

    #[test]
    fn degrees_without_label_bound() {
        let mut g: Graph<u8> = Graph::new();
        let a = g.new_node(Some(1), ());
        let b = g.create_node(None, ());
        g.new_edge(a, b, None, ());
        g.new_edge(a, a, Some(2), ());
        assert_eq!(degrees(g.node(a).unwrap()), (2, 1, true));
        assert_eq!(degrees(g.node(b).unwrap()), (0, 1, false));
    }

    #[test]
    fn views_follow_adjacency() {
        let mut g: Graph<&str, u32, u32> = Graph::new();
        let a = g.new_node(Some("a"), 1);
        let b = g.create_node(Some("b"), 2);
        let e = g.new_edge(a, b, Some("x"), 10);

        let na = g.node(a).unwrap();
        assert!(na.has_out_edges());
        assert_eq!(na.out_degree(), 1);
        assert_eq!(*na.payload(), 1);
        let edge = na.out_edges().next().unwrap();
        assert_eq!(edge.id(), e);
        assert_eq!(edge.label(), Some(&"x"));
        assert_eq!(edge.target().map(|n| n.id()), Some(b));
        assert_eq!(edge.source(), Some(na));

        let nb = g.node(b).unwrap();
        assert!(!nb.is_seed());
        assert_eq!(nb.in_degree(), 1);
        assert_eq!(nb.in_edges().next().map(|e| e.id()), Some(e));
    }

    #[test]
    fn next_node_follows_unique_label() {
        let mut g: Graph<&str> = Graph::new();
        let a = g.new_node(None, ());
        let b = g.create_node(None, ());
        let c = g.create_node(None, ());
        g.new_edge(a, b, Some("left"), ());
        g.new_edge(a, c, Some("right"), ());
        let na = g.node(a).unwrap();
        assert_eq!(na.next_node(Some(&"left")).map(|n| n.id()), Some(b));
        assert_eq!(na.next_node(Some(&"right")).map(|n| n.id()), Some(c));
        assert!(na.next_node(Some(&"up")).is_none());
    }

    #[test]
    fn next_node_reports_ambiguity() {
        let mut g: Graph<&str> = Graph::new();
        let a = g.new_node(None, ());
        let b = g.create_node(None, ());
        g.new_edge(a, b, Some("x"), ());
        g.new_edge(a, b, Some("x"), ());
        let err = g.node(a).unwrap().try_next_node(Some(&"x")).unwrap_err();
        assert!(matches!(err, DigraphError::AmbiguousNext { count: 2, .. }));
        // distinct targets still collapse the parallel edges
        assert_eq!(g.node(a).unwrap().next_nodes_with(Some(&"x")).count(), 1);
    }

    #[test]
    #[should_panic(expected = "expected at most one")]
    fn next_node_panics_on_ambiguity() {
        let mut g: Graph<&str> = Graph::new();
        let a = g.new_node(None, ());
        g.new_edge(a, a, Some("x"), ());
        g.new_edge(a, a, Some("x"), ());
        let _ = g.node(a).unwrap().next_node(Some(&"x"));
    }
}
