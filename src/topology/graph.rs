//! The graph container: owns every node and edge of one graph instance.
//!
//! Nodes and edges live in generational arenas inside [`Graph`]; callers
//! hold [`NodeId`]/[`EdgeId`] handles and borrow [`NodeRef`]/[`EdgeRef`]
//! views. A node becomes a *seed* through [`Graph::add_node`]; traversal
//! starts from the seeds, so nodes that were created but never added are
//! still visible as long as some seed reaches them.
//!
//! Contract violations (foreign handles, connecting a connected edge, ...)
//! panic. Each panicking operation has a `try_*` twin returning
//! [`DigraphError`] instead.

use crate::config::GraphConfig;
use crate::debug_invariants::DebugInvariants;
use crate::graph_error::DigraphError;
use crate::topology::arena::Arena;
use crate::topology::bounds::Label;
use crate::topology::edge_set::{EdgeSet, OutEdge};
use crate::topology::entity::{EdgeRef, EdgeSlot, NodeRef, NodeSlot};
use crate::topology::ids::{EdgeId, GraphId, NodeId};
use crate::topology::index::Index;
use crate::topology::iter_ext::{LabelFilter, LabeledIterExt};
use crate::topology::label::{Attr, LabelBuckets};
use crate::topology::traversal_iter::Reachable;

/// A mutable labeled directed multigraph.
///
/// # Type Parameters
/// - `L`: label type shared by nodes and edges.
/// - `N`: node payload. Defaults to `()`.
/// - `E`: edge payload. Defaults to `()`.
///
/// # Example
/// ```rust
/// use labeled_digraph::topology::graph::Graph;
/// let mut g: Graph<&str> = Graph::new();
/// let a = g.new_node(Some("start"), ());
/// let b = g.create_node(Some("end"), ());
/// g.new_edge(a, b, Some("go"), ());
/// let labels: Vec<_> = g.nodes().map(|n| n.label().copied()).collect();
/// assert_eq!(labels, vec![Some("start"), Some("end")]);
/// ```
#[derive(Debug)]
pub struct Graph<L, N = (), E = ()> {
    id: GraphId,
    config: GraphConfig,
    nodes: Arena<NodeSlot<L, N>>,
    edges: Arena<EdgeSlot<L, E>>,
    seeds: Vec<NodeId>,
    labels: LabelBuckets<L, NodeId>,
}

impl<L: Label, N, E> Default for Graph<L, N, E> {
    fn default() -> Self {
        Self::with_config(GraphConfig::default())
    }
}

impl<L: Label, N, E> Graph<L, N, E> {
    /// Creates an empty graph with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with a custom configuration.
    pub fn with_config(config: GraphConfig) -> Self {
        Graph {
            id: GraphId::fresh(),
            config: config.with_promote_threshold(config.promote_threshold),
            nodes: Arena::default(),
            edges: Arena::default(),
            seeds: Vec::new(),
            labels: LabelBuckets::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> GraphId {
        self.id
    }

    #[inline]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Handle validation
    // ------------------------------------------------------------------

    fn check_node(&self, node: NodeId) -> Result<(), DigraphError> {
        if node.graph() != self.id {
            return Err(DigraphError::ForeignNode {
                node,
                owner: node.graph(),
                graph: self.id,
            });
        }
        if self.nodes.get(node.slot()).is_none() {
            return Err(DigraphError::UnknownNode(node));
        }
        Ok(())
    }

    fn check_edge_owner(&self, edge: EdgeId) -> Result<(), DigraphError> {
        if edge.graph() != self.id {
            return Err(DigraphError::ForeignEdge {
                edge,
                owner: edge.graph(),
                graph: self.id,
            });
        }
        Ok(())
    }

    fn check_edge(&self, edge: EdgeId) -> Result<(), DigraphError> {
        self.check_edge_owner(edge)?;
        if self.edges.get(edge.slot()).is_none() {
            return Err(DigraphError::UnknownEdge(edge));
        }
        Ok(())
    }

    fn check_endpoints(&self, from: NodeId, to: NodeId) -> Result<(), DigraphError> {
        if from.graph() != to.graph() {
            return Err(DigraphError::CrossGraphConnect { from, to });
        }
        self.check_node(from)?;
        self.check_node(to)
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// View of `id`, or `None` if it is stale or belongs to another graph.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, L, N, E>> {
        if id.graph() != self.id {
            return None;
        }
        self.nodes
            .get(id.slot())
            .map(|slot| NodeRef::new(self, id, slot))
    }

    /// View of `id`, or `None` if it is stale or belongs to another graph.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> Option<EdgeRef<'_, L, N, E>> {
        if id.graph() != self.id {
            return None;
        }
        self.edges
            .get(id.slot())
            .map(|slot| EdgeRef::new(self, id, slot))
    }

    pub fn node_payload_mut(&mut self, id: NodeId) -> Option<&mut N> {
        if id.graph() != self.id {
            return None;
        }
        self.nodes.get_mut(id.slot()).map(|s| &mut s.attr.payload)
    }

    pub fn edge_payload_mut(&mut self, id: EdgeId) -> Option<&mut E> {
        if id.graph() != self.id {
            return None;
        }
        self.edges.get_mut(id.slot()).map(|s| &mut s.attr.payload)
    }

    #[inline]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    #[inline]
    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edge(id).is_some()
    }

    /// Number of live nodes owned by this graph, reachable or not.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of live edges owned by this graph, connected or not.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Seed nodes in the order they were added. Removing a seed moves the
    /// most recently added seed into its place.
    #[inline]
    pub fn seeds(&self) -> &[NodeId] {
        &self.seeds
    }

    pub fn is_seed(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.is_seed())
    }

    /// Every live node carrying `label`, reachable or not.
    ///
    /// Nodes appear in creation order; relabelled nodes move to the end of
    /// their new label's list, and removing or relabelling a node moves the
    /// last node of its old list into the vacated position.
    pub fn labeled_nodes(&self, label: Option<&L>) -> &[NodeId] {
        self.labels.get(label)
    }

    /// All nodes reachable from the seeds, breadth-first.
    ///
    /// Each node is yielded exactly once even when the graph has cycles.
    pub fn nodes(&self) -> Reachable<'_, L, N, E> {
        Reachable::new(self, self.seeds.iter().copied())
    }

    /// Reachable nodes whose label equals `label`.
    pub fn nodes_with_label<'a>(
        &'a self,
        label: Option<&'a L>,
    ) -> LabelFilter<'a, Reachable<'a, L, N, E>, L> {
        self.nodes().with_label(label)
    }

    /// Lazily built index over everything reachable from the seeds.
    pub fn index(&self) -> Index<'_, L, N, E> {
        Index::new(self)
    }

    /// Lazily built index over everything reachable from `roots`.
    pub fn index_from_roots(&self, roots: impl IntoIterator<Item = NodeId>) -> Index<'_, L, N, E> {
        Index::from_roots(self, roots)
    }

    // ------------------------------------------------------------------
    // Nodes
    // ------------------------------------------------------------------

    /// Creates a node owned by this graph without making it a seed.
    pub fn create_node(&mut self, label: Option<L>, payload: N) -> NodeId {
        let (index, generation) = self.nodes.insert(NodeSlot::new(Attr::new(label, payload)));
        let id = NodeId::new(self.id, index, generation);
        if let Some(slot) = self.nodes.get_mut(id.slot()) {
            slot.label_pos = self.labels.push(slot.attr.label.as_ref(), id);
        }
        id
    }

    /// Creates a node and registers it as a seed.
    pub fn new_node(&mut self, label: Option<L>, payload: N) -> NodeId {
        let id = self.create_node(label, payload);
        self.mark_seed(id);
        id
    }

    /// Registers `node` as a seed. Adding an existing seed is a no-op.
    ///
    /// # Panics
    /// Panics if `node` belongs to another graph or was removed.
    pub fn add_node(&mut self, node: NodeId) {
        self.try_add_node(node).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_add_node(&mut self, node: NodeId) -> Result<(), DigraphError> {
        self.check_node(node)?;
        self.mark_seed(node);
        Ok(())
    }

    fn mark_seed(&mut self, node: NodeId) {
        if let Some(slot) = self.nodes.get_mut(node.slot()) {
            if slot.seed_pos.is_none() {
                slot.seed_pos = Some(self.seeds.len());
                self.seeds.push(node);
            }
        }
    }

    /// Replaces a node's label, returning the previous one.
    ///
    /// # Panics
    /// Panics if `node` belongs to another graph or was removed.
    pub fn set_node_label(&mut self, node: NodeId, label: Option<L>) -> Option<L> {
        self.try_set_node_label(node, label)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_set_node_label(
        &mut self,
        node: NodeId,
        label: Option<L>,
    ) -> Result<Option<L>, DigraphError> {
        self.check_node(node)?;
        let slot = self
            .nodes
            .get_mut(node.slot())
            .ok_or(DigraphError::UnknownNode(node))?;
        let old = std::mem::replace(&mut slot.attr.label, label);
        let pos = slot.label_pos;
        self.unfile_label(old.as_ref(), pos);
        let slot = self
            .nodes
            .get_mut(node.slot())
            .ok_or(DigraphError::UnknownNode(node))?;
        slot.label_pos = self.labels.push(slot.attr.label.as_ref(), node);
        self.debug_assert_invariants();
        Ok(old)
    }

    /// Removes `node` and every edge incident to it, in time proportional
    /// to its degree. Returns the node's label and payload.
    ///
    /// # Panics
    /// Panics if `node` belongs to another graph or was already removed.
    pub fn remove_node(&mut self, node: NodeId) -> Attr<L, N> {
        self.try_remove_node(node).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_remove_node(&mut self, node: NodeId) -> Result<Attr<L, N>, DigraphError> {
        self.check_node(node)?;
        let slot = self
            .nodes
            .remove(node.slot())
            .ok_or(DigraphError::UnknownNode(node))?;
        let mut dropped = 0usize;

        for out in slot.out.iter() {
            let Some(removed) = self.edges.remove(out.edge.slot()) else {
                continue;
            };
            dropped += 1;
            if out.target != node {
                self.unlink_incoming(out.target, removed.in_pos);
            }
        }
        for &edge in &slot.incoming {
            // self-loops were already dropped with the outgoing edges
            let Some(removed) = self.edges.remove(edge.slot()) else {
                continue;
            };
            dropped += 1;
            if let Some((from, _)) = removed.ends {
                if let Some(source) = self.nodes.get_mut(from.slot()) {
                    source.out.remove(removed.attr.label.as_ref(), edge);
                }
            }
        }

        self.unfile_label(slot.attr.label.as_ref(), slot.label_pos);
        if let Some(pos) = slot.seed_pos {
            self.unfile_seed(pos);
        }
        log::debug!("removed node {node:?} together with {dropped} incident edges");
        self.debug_assert_invariants();
        Ok(slot.attr)
    }

    // Each helper swap-removes one entry and re-records the position of the
    // entry moved into the hole.

    fn unfile_label(&mut self, label: Option<&L>, pos: usize) {
        if let Some((_, Some(&moved))) = self.labels.swap_remove(label, pos) {
            if let Some(slot) = self.nodes.get_mut(moved.slot()) {
                slot.label_pos = pos;
            }
        }
    }

    fn unfile_seed(&mut self, pos: usize) {
        if pos >= self.seeds.len() {
            return;
        }
        self.seeds.swap_remove(pos);
        if let Some(&moved) = self.seeds.get(pos) {
            if let Some(slot) = self.nodes.get_mut(moved.slot()) {
                slot.seed_pos = Some(pos);
            }
        }
    }

    fn unlink_incoming(&mut self, to: NodeId, pos: usize) {
        let Some(target) = self.nodes.get_mut(to.slot()) else {
            return;
        };
        if pos >= target.incoming.len() {
            return;
        }
        target.incoming.swap_remove(pos);
        if let Some(&moved) = target.incoming.get(pos) {
            if let Some(edge) = self.edges.get_mut(moved.slot()) {
                edge.in_pos = pos;
            }
        }
    }

    // ------------------------------------------------------------------
    // Edges
    // ------------------------------------------------------------------

    /// Creates a disconnected edge owned by this graph.
    pub fn create_edge(&mut self, label: Option<L>, payload: E) -> EdgeId {
        let (index, generation) = self.edges.insert(EdgeSlot::new(Attr::new(label, payload)));
        EdgeId::new(self.id, index, generation)
    }

    /// Creates an edge and connects it `from -> to`.
    ///
    /// # Panics
    /// Panics if either endpoint is foreign or stale.
    pub fn new_edge(&mut self, from: NodeId, to: NodeId, label: Option<L>, payload: E) -> EdgeId {
        self.try_new_edge(from, to, label, payload)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        label: Option<L>,
        payload: E,
    ) -> Result<EdgeId, DigraphError> {
        self.check_endpoints(from, to)?;
        let edge = self.create_edge(label, payload);
        self.try_connect(edge, from, to)?;
        Ok(edge)
    }

    /// Connects a disconnected edge `from -> to`.
    ///
    /// # Panics
    /// Panics if the edge is already connected, if the endpoints belong to
    /// different graphs, or if any handle is foreign or stale.
    pub fn connect(&mut self, edge: EdgeId, from: NodeId, to: NodeId) {
        self.try_connect(edge, from, to)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_connect(&mut self, edge: EdgeId, from: NodeId, to: NodeId) -> Result<(), DigraphError> {
        self.check_edge(edge)?;
        self.check_endpoints(from, to)?;
        let threshold = self.config.promote_threshold;
        let in_pos = self.nodes.get(to.slot()).map_or(0, |t| t.incoming.len());
        let slot = self
            .edges
            .get_mut(edge.slot())
            .ok_or(DigraphError::UnknownEdge(edge))?;
        if slot.ends.is_some() {
            return Err(DigraphError::EdgeAlreadyConnected(edge));
        }
        slot.ends = Some((from, to));
        slot.in_pos = in_pos;
        let label = slot.attr.label.as_ref();

        let source = self
            .nodes
            .get_mut(from.slot())
            .ok_or(DigraphError::UnknownNode(from))?;
        if source.out.insert(label, OutEdge { edge, target: to }, threshold) {
            log::debug!(
                "edge store of {from:?} promoted to label index ({} edges, {} labels)",
                source.out.len(),
                source.out.label_count()
            );
        }
        if let Some(target) = self.nodes.get_mut(to.slot()) {
            target.incoming.push(edge);
        }
        log::trace!("connected {edge:?}: {from:?} -> {to:?}");
        self.debug_assert_invariants();
        Ok(())
    }

    /// Detaches `edge` from both endpoints; the edge itself survives and can
    /// be connected again. Returns whether the edge was connected.
    ///
    /// Disconnecting a disconnected or removed edge is a no-op.
    ///
    /// # Panics
    /// Panics if `edge` belongs to another graph.
    pub fn disconnect(&mut self, edge: EdgeId) -> bool {
        self.try_disconnect(edge).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_disconnect(&mut self, edge: EdgeId) -> Result<bool, DigraphError> {
        self.check_edge_owner(edge)?;
        let Some(slot) = self.edges.get_mut(edge.slot()) else {
            return Ok(false);
        };
        let Some((from, to)) = slot.ends.take() else {
            return Ok(false);
        };
        self.detach(edge, from, to);
        self.debug_assert_invariants();
        Ok(true)
    }

    fn detach(&mut self, edge: EdgeId, from: NodeId, to: NodeId) {
        let Some(slot) = self.edges.get(edge.slot()) else {
            return;
        };
        let in_pos = slot.in_pos;
        if let Some(source) = self.nodes.get_mut(from.slot()) {
            let removed = source.out.remove(slot.attr.label.as_ref(), edge);
            debug_assert!(removed.is_some(), "{edge:?} missing from edge store of {from:?}");
        }
        self.unlink_incoming(to, in_pos);
        log::trace!("disconnected {edge:?}: {from:?} -> {to:?}");
    }

    /// Disconnects and destroys `edge`, returning its label and payload.
    /// Returns `None` if the edge was already removed.
    ///
    /// # Panics
    /// Panics if `edge` belongs to another graph.
    pub fn remove_edge(&mut self, edge: EdgeId) -> Option<Attr<L, E>> {
        self.try_remove_edge(edge).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_remove_edge(&mut self, edge: EdgeId) -> Result<Option<Attr<L, E>>, DigraphError> {
        self.try_disconnect(edge)?;
        Ok(self.edges.remove(edge.slot()).map(|slot| slot.attr))
    }

    /// Changes an edge's label, returning the old one. A connected edge is
    /// re-filed under its new label in its source's edge store.
    ///
    /// # Panics
    /// Panics if `edge` belongs to another graph or was removed.
    pub fn relabel_edge(&mut self, edge: EdgeId, label: Option<L>) -> Option<L> {
        self.try_relabel_edge(edge, label)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_relabel_edge(&mut self, edge: EdgeId, label: Option<L>) -> Result<Option<L>, DigraphError> {
        self.check_edge(edge)?;
        let threshold = self.config.promote_threshold;
        let slot = self
            .edges
            .get_mut(edge.slot())
            .ok_or(DigraphError::UnknownEdge(edge))?;
        let old = std::mem::replace(&mut slot.attr.label, label);
        if let Some((from, to)) = slot.ends {
            let new = slot.attr.label.as_ref();
            if let Some(source) = self.nodes.get_mut(from.slot()) {
                source.out.remove(old.as_ref(), edge);
                source.out.insert(new, OutEdge { edge, target: to }, threshold);
            }
        }
        self.debug_assert_invariants();
        Ok(old)
    }
}

impl<L: Label, N, E> DebugInvariants for Graph<L, N, E> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Graph");
    }

    fn validate_invariants(&self) -> Result<(), DigraphError> {
        let fail = |msg: String| Err(DigraphError::InvariantViolation(msg));
        let mut out_total = 0usize;
        let mut in_total = 0usize;
        let mut seed_total = 0usize;

        for ((index, generation), slot) in self.nodes.iter() {
            let id = NodeId::new(self.id, index, generation);
            if self.labels.get(slot.attr.label.as_ref()).get(slot.label_pos) != Some(&id) {
                return fail(format!("{id:?} is not at its recorded label index position"));
            }
            if let Some(pos) = slot.seed_pos {
                seed_total += 1;
                if self.seeds.get(pos) != Some(&id) {
                    return fail(format!("{id:?} is not at its recorded seed position {pos}"));
                }
            }
            if let EdgeSet::Indexed(map) = &slot.out {
                if map.buckets().any(|(_, items)| items.is_empty()) {
                    return fail(format!("empty label bucket in edge store of {id:?}"));
                }
            }
            for out in slot.out.iter() {
                out_total += 1;
                let Some(edge) = self.edges.get(out.edge.slot()) else {
                    return fail(format!("{id:?} lists dead edge {:?}", out.edge));
                };
                if edge.ends != Some((id, out.target)) {
                    return fail(format!(
                        "{:?} filed under {id:?} but has ends {:?}",
                        out.edge, edge.ends
                    ));
                }
                if !slot
                    .out
                    .with_label(edge.attr.label.as_ref())
                    .any(|e| e.edge == out.edge)
                {
                    return fail(format!("{:?} filed under the wrong label", out.edge));
                }
                let listed = self
                    .nodes
                    .get(out.target.slot())
                    .and_then(|t| t.incoming.get(edge.in_pos));
                if listed != Some(&out.edge) {
                    return fail(format!(
                        "{:?} is not at position {} of the incoming list of {:?}",
                        out.edge, edge.in_pos, out.target
                    ));
                }
            }
            for &edge in &slot.incoming {
                in_total += 1;
                match self.edges.get(edge.slot()).and_then(|e| e.ends) {
                    Some((_, to)) if to == id => {}
                    ends => {
                        return fail(format!("{edge:?} listed as incoming to {id:?} but has ends {ends:?}"));
                    }
                }
            }
        }

        let connected = self.edges.iter().filter(|(_, e)| e.ends.is_some()).count();
        if out_total != connected || in_total != connected {
            return fail(format!(
                "{connected} connected edges but {out_total} outgoing and {in_total} incoming entries"
            ));
        }
        if self.labels.len() != self.nodes.len() {
            return fail(format!(
                "label index holds {} nodes, graph holds {}",
                self.labels.len(),
                self.nodes.len()
            ));
        }
        if seed_total != self.seeds.len() {
            return fail(format!(
                "{seed_total} nodes are flagged as seeds but the seed list holds {}",
                self.seeds.len()
            ));
        }
        if let Some(dead) = self.seeds.iter().find(|s| self.nodes.get(s.slot()).is_none()) {
            return fail(format!("seed {dead:?} is not a live node"));
        }
        Ok(())
    }
}
