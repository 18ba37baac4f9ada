//! Greedy structural equivalence check between two indexed graphs.
//!
//! The check builds a node bijection from label buckets and the caller's
//! node equivalence, rejecting the pair as soon as any node could map to
//! more than one partner. It then checks that every mapped pair has
//! matching outgoing edges. There is no backtracking: graphs that are
//! isomorphic only under a mapping the greedy pass cannot pin down are
//! reported as not equivalent.

use hashbrown::{HashMap, HashSet};

use crate::topology::bounds::Label;
use crate::topology::entity::{EdgeRef, NodeRef};
use crate::topology::ids::{EdgeId, NodeId};
use crate::topology::index::Index;

/// Returns `true` when the node sets of `first` and `second` correspond
/// one-to-one and their outgoing edges agree under that correspondence.
///
/// - `node_eq` is only called for node pairs with equal labels.
/// - `edge_eq` is only called for edge pairs with equal labels whose
///   targets correspond.
///
/// The check fails when a node is equivalent to several nodes of the other
/// graph (in either direction), or when an edge of `first` matches no edge
/// or several edges of `second`. An edge of `second` already matched by an
/// earlier edge cannot be matched again.
///
/// # Example
/// ```rust
/// use labeled_digraph::prelude::*;
/// let mut g1: Graph<&str> = Graph::new();
/// let a = g1.new_node(Some("a"), ());
/// let b = g1.create_node(Some("b"), ());
/// g1.new_edge(a, b, Some("x"), ());
/// let mut g2 = Graph::new();
/// copy(&mut g2, &g1, |n| Some(n.attr().clone()), |e| Some(e.attr().clone()));
/// assert!(check_isomorphism(&g1.index(), &g2.index(), |_, _| true, |_, _| true));
/// ```
pub fn check_isomorphism<L, N1, E1, N2, E2, FN, FE>(
    first: &Index<'_, L, N1, E1>,
    second: &Index<'_, L, N2, E2>,
    mut node_eq: FN,
    mut edge_eq: FE,
) -> bool
where
    L: Label,
    FN: FnMut(NodeRef<'_, L, N1, E1>, NodeRef<'_, L, N2, E2>) -> bool,
    FE: FnMut(EdgeRef<'_, L, N1, E1>, EdgeRef<'_, L, N2, E2>) -> bool,
{
    if first.len() != second.len() {
        return false;
    }

    let mut forward: HashMap<NodeId, NodeId> = HashMap::with_capacity(first.len());
    let mut backward: HashSet<NodeId> = HashSet::with_capacity(second.len());
    for n1 in first.nodes() {
        for n2 in second.nodes_with_label(n1.label()) {
            if !node_eq(n1, n2) {
                continue;
            }
            if forward.insert(n1.id(), n2.id()).is_some() || !backward.insert(n2.id()) {
                log::trace!("isomorphism: ambiguous node mapping at {:?}", n1.id());
                return false;
            }
        }
    }
    if forward.len() != first.len() {
        return false;
    }

    let mut claimed: HashSet<EdgeId> = HashSet::new();
    for n1 in first.nodes() {
        let Some(n2) = forward.get(&n1.id()).and_then(|&id| second.graph().node(id)) else {
            return false;
        };
        if n1.out_degree() != n2.out_degree() {
            return false;
        }
        claimed.clear();
        for e1 in n1.out_edges() {
            let want = e1
                .endpoint_ids()
                .and_then(|(_, t)| forward.get(&t).copied());
            // claimed candidates still count toward ambiguity
            let mut found: Option<EdgeId> = None;
            for e2 in n2.out_edges_with(e1.label()) {
                let target = e2.endpoint_ids().map(|(_, t)| t);
                if target.is_none() || target != want || !edge_eq(e1, e2) {
                    continue;
                }
                if found.is_some() {
                    log::trace!("isomorphism: ambiguous edge match for {:?}", e1.id());
                    return false;
                }
                found = Some(e2.id());
            }
            match found {
                Some(e2) if claimed.insert(e2) => {}
                _ => return false,
            }
        }
    }
    true
}
