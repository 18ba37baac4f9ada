//! Structural copy and projection between graphs.
//!
//! Nodes are copied first, in breadth-first discovery order; edges follow,
//! grouped by source node. A node cloner returning `None` drops the node
//! together with every edge touching it. An edge cloner returning `None`
//! drops just that edge. Every copied node becomes a seed of the target.

use std::collections::HashMap;

use crate::topology::bounds::Label;
use crate::topology::entity::{EdgeRef, NodeRef};
use crate::topology::graph::Graph;
use crate::topology::ids::NodeId;
use crate::topology::label::Attr;

/// Projects the reachable part of `input` into `output`, converting labels
/// and payloads through the two cloners.
///
/// Returns the map from input node ids to the ids of their copies.
///
/// # Example
/// ```rust
/// use labeled_digraph::prelude::*;
/// let mut src: Graph<&str, u32> = Graph::new();
/// let a = src.new_node(Some("a"), 1);
/// let b = src.create_node(Some("b"), 2);
/// src.new_edge(a, b, Some("x"), ());
///
/// let mut dst: Graph<String, String> = Graph::new();
/// let map = project(
///     &src,
///     &mut dst,
///     |n| Some(Attr::new(n.label().map(|l| l.to_uppercase()), n.payload().to_string())),
///     |e| Some(Attr::new(e.label().map(|l| l.to_string()), ())),
/// );
/// assert_eq!(map.len(), 2);
/// assert_eq!(dst.node(map[&b]).unwrap().payload(), "2");
/// ```
pub fn project<L1, N1, E1, L2, N2, E2, FN, FE>(
    input: &Graph<L1, N1, E1>,
    output: &mut Graph<L2, N2, E2>,
    node_cloner: FN,
    edge_cloner: FE,
) -> HashMap<NodeId, NodeId>
where
    L1: Label,
    L2: Label,
    FN: FnMut(NodeRef<'_, L1, N1, E1>) -> Option<Attr<L2, N2>>,
    FE: FnMut(EdgeRef<'_, L1, N1, E1>) -> Option<Attr<L2, E2>>,
{
    let order: Vec<NodeId> = input.nodes().map(|n| n.id()).collect();
    project_from(input, &order, output, node_cloner, edge_cloner)
}

/// Copies the reachable part of `source` into `target`, same types on both
/// sides. Passing clones of the attributes yields an isomorphic copy.
///
/// ```rust
/// use labeled_digraph::prelude::*;
/// let mut src: Graph<&str> = Graph::new();
/// let a = src.new_node(Some("a"), ());
/// src.new_edge(a, a, Some("self"), ());
/// let mut dst = Graph::new();
/// copy(&mut dst, &src, |n| Some(n.attr().clone()), |e| Some(e.attr().clone()));
/// assert_eq!((dst.node_count(), dst.edge_count()), (1, 1));
/// ```
pub fn copy<L, N, E, FN, FE>(
    target: &mut Graph<L, N, E>,
    source: &Graph<L, N, E>,
    copy_node: FN,
    copy_edge: FE,
) -> HashMap<NodeId, NodeId>
where
    L: Label,
    FN: FnMut(NodeRef<'_, L, N, E>) -> Option<Attr<L, N>>,
    FE: FnMut(EdgeRef<'_, L, N, E>) -> Option<Attr<L, E>>,
{
    project(source, target, copy_node, copy_edge)
}

/// Shared worker: copies the nodes listed in `order` (and the edges among
/// them) from `input` into `output`.
pub(crate) fn project_from<L1, N1, E1, L2, N2, E2, FN, FE>(
    input: &Graph<L1, N1, E1>,
    order: &[NodeId],
    output: &mut Graph<L2, N2, E2>,
    mut node_cloner: FN,
    mut edge_cloner: FE,
) -> HashMap<NodeId, NodeId>
where
    L1: Label,
    L2: Label,
    FN: FnMut(NodeRef<'_, L1, N1, E1>) -> Option<Attr<L2, N2>>,
    FE: FnMut(EdgeRef<'_, L1, N1, E1>) -> Option<Attr<L2, E2>>,
{
    let mut map = HashMap::with_capacity(order.len());
    for node in order.iter().filter_map(|&id| input.node(id)) {
        if let Some(attr) = node_cloner(node) {
            let copied = output.new_node(attr.label, attr.payload);
            map.insert(node.id(), copied);
        }
    }

    let mut edges = 0usize;
    for node in order.iter().filter_map(|&id| input.node(id)) {
        let Some(&from) = map.get(&node.id()) else {
            continue;
        };
        for edge in node.out_edges() {
            let Some(&to) = edge.endpoint_ids().and_then(|(_, t)| map.get(&t)) else {
                continue;
            };
            if let Some(attr) = edge_cloner(edge) {
                output.new_edge(from, to, attr.label, attr.payload);
                edges += 1;
            }
        }
    }
    log::debug!(
        "copied {} of {} nodes and {edges} edges into graph {:?}",
        map.len(),
        order.len(),
        output.id()
    );
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipped_node_drops_its_edges() {
        let mut src: Graph<&str> = Graph::new();
        let a = src.new_node(Some("keep"), ());
        let b = src.create_node(Some("skip"), ());
        let c = src.create_node(Some("keep"), ());
        src.new_edge(a, b, None, ());
        src.new_edge(b, c, None, ());
        src.new_edge(a, c, None, ());

        let mut dst: Graph<&str> = Graph::new();
        let map = copy(
            &mut dst,
            &src,
            |n| (n.label() != Some(&"skip")).then(|| n.attr().clone()),
            |e| Some(e.attr().clone()),
        );
        assert_eq!(map.len(), 2);
        assert!(!map.contains_key(&b));
        assert_eq!(dst.edge_count(), 1);
        assert!(dst.is_seed(map[&a]) && dst.is_seed(map[&c]));
        let copied_a = dst.node(map[&a]).unwrap();
        assert_eq!(copied_a.next_nodes().next().map(|n| n.id()), Some(map[&c]));
    }

    #[test]
    fn edge_cloner_can_filter() {
        let mut src: Graph<u8, (), u32> = Graph::new();
        let a = src.new_node(None, ());
        src.new_edge(a, a, Some(1), 10);
        src.new_edge(a, a, Some(2), 20);
        let mut dst: Graph<u8, (), u32> = Graph::new();
        copy(
            &mut dst,
            &src,
            |n| Some(n.attr().clone()),
            |e| (*e.payload() > 15).then(|| e.attr().clone()),
        );
        assert_eq!(dst.edge_count(), 1);
        let n = dst.nodes().next().unwrap();
        assert_eq!(n.out_edges().next().map(|e| *e.payload()), Some(20));
    }

    #[test]
    fn unreachable_nodes_are_not_copied() {
        let mut src: Graph<u8> = Graph::new();
        src.new_node(None, ());
        src.create_node(None, ());
        let mut dst: Graph<u8> = Graph::new();
        let map = copy(&mut dst, &src, |n| Some(n.attr().clone()), |e| Some(e.attr().clone()));
        assert_eq!(map.len(), 1);
        assert_eq!(dst.node_count(), 1);
    }
}
