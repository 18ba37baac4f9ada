//! Breadth-first discovery of the nodes reachable from a root set.
//!
//! [`Reachable`] is lazy: it expands one node per `next()` call, keeping a
//! FIFO frontier and a seen set so every node is yielded exactly once no
//! matter how many cycles or converging paths lead to it. Roots are enqueued
//! together, so with several seeds the walk proceeds level by level across
//! all of them.

use std::collections::VecDeque;

use hashbrown::HashSet;

use crate::topology::bounds::Label;
use crate::topology::entity::NodeRef;
use crate::topology::graph::Graph;
use crate::topology::ids::NodeId;

/// Lazy BFS over the nodes reachable from a set of roots.
pub struct Reachable<'g, L, N, E> {
    graph: &'g Graph<L, N, E>,
    queue: VecDeque<NodeId>,
    seen: HashSet<NodeId>,
}

impl<'g, L: Label, N, E> Reachable<'g, L, N, E> {
    /// Starts a walk from `roots`. Roots that are not live nodes of `graph`
    /// are ignored; duplicate roots are visited once.
    pub fn new<I>(graph: &'g Graph<L, N, E>, roots: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut queue = VecDeque::new();
        let mut seen = HashSet::new();
        for root in roots {
            if graph.contains_node(root) && seen.insert(root) {
                queue.push_back(root);
            }
        }
        Reachable { graph, queue, seen }
    }

    /// Number of nodes discovered so far, including ones not yet yielded.
    pub fn discovered(&self) -> usize {
        self.seen.len()
    }
}

impl<'g, L: Label, N, E> Iterator for Reachable<'g, L, N, E> {
    type Item = NodeRef<'g, L, N, E>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.queue.pop_front() {
            let Some(node) = self.graph.node(id) else {
                continue;
            };
            for edge in node.out_edges() {
                if let Some((_, to)) = edge.endpoint_ids() {
                    if self.seen.insert(to) {
                        self.queue.push_back(to);
                    }
                }
            }
            return Some(node);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), None)
    }
}
