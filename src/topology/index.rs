//! Lazily built, memoized view over the reachable part of a graph.
//!
//! An [`Index`] records a root set and computes, on first use, the nodes
//! reachable from it, those nodes bucketed by label, the incoming edges of
//! every node (restricted to edges whose source is reachable), and the
//! sinks/sources of the node set. Every projection is computed at most once.
//!
//! The index holds a shared borrow of its graph, so the graph cannot be
//! mutated while the index is alive and cached data never goes stale.

use std::collections::HashMap as StdHashMap;
use std::iter::Copied;
use std::slice;

use hashbrown::{HashMap, HashSet};
use once_cell::unsync::OnceCell;

use crate::algs::{boundary, copy};
use crate::topology::bounds::Label;
use crate::topology::entity::{EdgeRef, EdgeSlice, Edges, NodeRef, NodeSlice, Nodes};
use crate::topology::graph::Graph;
use crate::topology::ids::{EdgeId, NodeId};
use crate::topology::label::{Attr, LabelBuckets};
use crate::topology::traversal_iter::Reachable;

/// Cached reachable-set projections over a borrowed [`Graph`].
///
/// # Example
/// ```rust
/// use labeled_digraph::topology::graph::Graph;
/// let mut g: Graph<&str> = Graph::new();
/// let a = g.new_node(Some("a"), ());
/// let b = g.create_node(Some("b"), ());
/// g.new_edge(a, b, None, ());
/// let idx = g.index();
/// assert_eq!(idx.len(), 2);
/// assert_eq!(idx.in_edges(b).count(), 1);
/// assert_eq!(idx.sinks(false), &[b]);
/// ```
pub struct Index<'g, L, N, E> {
    graph: &'g Graph<L, N, E>,
    roots: Vec<NodeId>,
    nodes: OnceCell<Vec<NodeId>>,
    members: OnceCell<HashSet<NodeId>>,
    by_label: OnceCell<LabelBuckets<L, NodeId>>,
    incoming: OnceCell<HashMap<NodeId, Vec<EdgeId>>>,
    incoming_by_label: OnceCell<HashMap<NodeId, LabelBuckets<L, EdgeId>>>,
    // indexed by `include_disconnected as usize`
    sinks: [OnceCell<Vec<NodeId>>; 2],
    sources: [OnceCell<Vec<NodeId>>; 2],
}

impl<'g, L: Label, N, E> Index<'g, L, N, E> {
    /// Index over everything reachable from the graph's seeds.
    pub fn new(graph: &'g Graph<L, N, E>) -> Self {
        Self::from_roots(graph, graph.seeds().iter().copied())
    }

    /// Index over everything reachable from `roots`.
    pub fn from_roots(graph: &'g Graph<L, N, E>, roots: impl IntoIterator<Item = NodeId>) -> Self {
        Index {
            graph,
            roots: roots.into_iter().collect(),
            nodes: OnceCell::new(),
            members: OnceCell::new(),
            by_label: OnceCell::new(),
            incoming: OnceCell::new(),
            incoming_by_label: OnceCell::new(),
            sinks: [OnceCell::new(), OnceCell::new()],
            sources: [OnceCell::new(), OnceCell::new()],
        }
    }

    #[inline]
    pub fn graph(&self) -> &'g Graph<L, N, E> {
        self.graph
    }

    /// Reachable node ids in breadth-first discovery order.
    pub fn node_ids(&self) -> &[NodeId] {
        self.nodes.get_or_init(|| {
            let nodes: Vec<NodeId> = Reachable::new(self.graph, self.roots.iter().copied())
                .map(|n| n.id())
                .collect();
            log::debug!(
                "index: discovered {} nodes from {} roots",
                nodes.len(),
                self.roots.len()
            );
            nodes
        })
    }

    pub fn nodes(&self) -> NodeSlice<'_, L, N, E> {
        Nodes::new(self.graph, self.node_ids().iter().copied())
    }

    /// Indexed nodes carrying `label`, in discovery order.
    pub fn nodes_with_label(&self, label: Option<&L>) -> NodeSlice<'_, L, N, E> {
        Nodes::new(self.graph, self.by_label().get(label).iter().copied())
    }

    fn by_label(&self) -> &LabelBuckets<L, NodeId> {
        self.by_label.get_or_init(|| {
            let mut map = LabelBuckets::new();
            for node in self.nodes() {
                map.push(node.label(), node.id());
            }
            log::debug!("index: {} node labels", map.label_count());
            map
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.node_ids().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.node_ids().is_empty()
    }

    /// Whether `node` is part of the indexed set.
    pub fn contains(&self, node: NodeId) -> bool {
        self.members
            .get_or_init(|| self.node_ids().iter().copied().collect())
            .contains(&node)
    }

    /// Outgoing edges of `node`; empty if the node is not live.
    pub fn out(&self, node: NodeId) -> impl Iterator<Item = EdgeRef<'g, L, N, E>> {
        self.graph.node(node).into_iter().flat_map(|n| n.out_edges())
    }

    /// Outgoing edges of `node` labelled `label`.
    pub fn out_with<'a>(
        &'a self,
        node: NodeId,
        label: Option<&'a L>,
    ) -> impl Iterator<Item = EdgeRef<'a, L, N, E>> {
        let graph: &'a Graph<L, N, E> = self.graph;
        graph
            .node(node)
            .into_iter()
            .flat_map(move |n| n.out_edges_with(label))
    }

    fn incoming(&self) -> &HashMap<NodeId, Vec<EdgeId>> {
        self.incoming.get_or_init(|| {
            let mut map: HashMap<NodeId, Vec<EdgeId>> = HashMap::new();
            let mut edges = 0usize;
            for node in self.nodes() {
                for edge in node.out_edges() {
                    if let Some((_, to)) = edge.endpoint_ids() {
                        map.entry(to).or_default().push(edge.id());
                        edges += 1;
                    }
                }
            }
            log::debug!("index: recorded {edges} incoming edges over {} targets", map.len());
            map
        })
    }

    fn incoming_by_label(&self) -> &HashMap<NodeId, LabelBuckets<L, EdgeId>> {
        self.incoming_by_label.get_or_init(|| {
            let mut map: HashMap<NodeId, LabelBuckets<L, EdgeId>> = HashMap::new();
            for node in self.nodes() {
                for edge in node.out_edges() {
                    if let Some((_, to)) = edge.endpoint_ids() {
                        map.entry(to).or_default().push(edge.label(), edge.id());
                    }
                }
            }
            map
        })
    }

    /// Incoming edges of `node` whose source is in the indexed set.
    pub fn in_edges(&self, node: NodeId) -> EdgeSlice<'_, L, N, E> {
        let ids = self.incoming().get(&node).map_or(&[][..], Vec::as_slice);
        Edges::new(self.graph, ids.iter().copied())
    }

    /// Incoming edges of `node` labelled `label` whose source is indexed.
    pub fn in_edges_with(&self, node: NodeId, label: Option<&L>) -> EdgeSlice<'_, L, N, E> {
        let ids = self
            .incoming_by_label()
            .get(&node)
            .map_or(&[][..], |m| m.get(label));
        Edges::new(self.graph, ids.iter().copied())
    }

    /// Number of indexed incoming edges of `node`.
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.incoming().get(&node).map_or(0, Vec::len)
    }

    /// Indexed nodes without outgoing edges.
    ///
    /// Unless `include_disconnected` is set, nodes with no incoming edges
    /// either are left out.
    pub fn sinks(&self, include_disconnected: bool) -> &[NodeId] {
        self.sinks[include_disconnected as usize]
            .get_or_init(|| boundary::sinks(self, include_disconnected))
    }

    /// Indexed nodes without incoming edges from the indexed set.
    ///
    /// Unless `include_disconnected` is set, nodes with no outgoing edges
    /// either are left out.
    pub fn sources(&self, include_disconnected: bool) -> &[NodeId] {
        self.sources[include_disconnected as usize]
            .get_or_init(|| boundary::sources(self, include_disconnected))
    }

    /// Copies the indexed nodes, and every edge between two copied nodes,
    /// into `target`. See [`copy::project`] for the cloner contract.
    pub fn copy_into<L2, N2, E2, FN, FE>(
        &self,
        target: &mut Graph<L2, N2, E2>,
        node_cloner: FN,
        edge_cloner: FE,
    ) -> StdHashMap<NodeId, NodeId>
    where
        L2: Label,
        FN: FnMut(NodeRef<'_, L, N, E>) -> Option<Attr<L2, N2>>,
        FE: FnMut(EdgeRef<'_, L, N, E>) -> Option<Attr<L2, E2>>,
    {
        copy::project_from(
            self.graph,
            self.node_ids(),
            target,
            node_cloner,
            edge_cloner,
        )
    }
}

impl<'g, L: Label, N, E> IntoIterator for &'g Index<'_, L, N, E> {
    type Item = NodeRef<'g, L, N, E>;
    type IntoIter = Nodes<'g, L, N, E, Copied<slice::Iter<'g, NodeId>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes()
    }
}
