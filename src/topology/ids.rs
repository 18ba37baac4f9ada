//! Strong, zero-cost handles for graphs, nodes and edges.
//!
//! Every graph instance draws a process-unique [`GraphId`]. Node and edge
//! handles carry the id of the graph that created them together with an
//! arena slot index and a generation counter:
//! - the graph id lets a graph reject handles that belong to another graph;
//! - the generation makes a handle to a removed entity go stale instead of
//!   silently aliasing whatever reuses the slot.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_GRAPH_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of one [`Graph`](crate::topology::graph::Graph) instance.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(u32);

impl GraphId {
    /// Draws a fresh id, never handed out before in this process.
    pub(crate) fn fresh() -> Self {
        GraphId(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[cfg(test)]
    pub(crate) const fn from_raw(raw: u32) -> Self {
        GraphId(raw)
    }

    /// Returns the raw numeric id.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Handle of a node inside a graph arena.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    graph: GraphId,
    index: u32,
    generation: u32,
}

impl NodeId {
    #[inline]
    pub(crate) const fn new(graph: GraphId, index: u32, generation: u32) -> Self {
        NodeId {
            graph,
            index,
            generation,
        }
    }

    /// The graph this node was created in.
    #[inline]
    pub const fn graph(self) -> GraphId {
        self.graph
    }

    /// Arena slot index. Slots are reused after removal, so the index alone
    /// does not identify a node; compare whole `NodeId`s instead.
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    #[inline]
    pub(crate) const fn slot(self) -> (u32, u32) {
        (self.index, self.generation)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}#{}@{:?}", self.index, self.generation, self.graph)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.index)
    }
}

/// Handle of an edge inside a graph arena.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId {
    graph: GraphId,
    index: u32,
    generation: u32,
}

impl EdgeId {
    #[inline]
    pub(crate) const fn new(graph: GraphId, index: u32, generation: u32) -> Self {
        EdgeId {
            graph,
            index,
            generation,
        }
    }

    /// The graph this edge was created in.
    #[inline]
    pub const fn graph(self) -> GraphId {
        self.graph
    }

    /// Arena slot index (see [`NodeId::index`]).
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    #[inline]
    pub(crate) const fn slot(self) -> (u32, u32) {
        (self.index, self.generation)
    }
}

impl fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}#{}@{:?}", self.index, self.generation, self.graph)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.index)
    }
}

#[cfg(test)]
mod layout_tests {
    use super::*;
    use static_assertions::{assert_eq_size, assert_impl_all};

    assert_eq_size!(NodeId, [u32; 3]);
    assert_eq_size!(EdgeId, [u32; 3]);
    assert_impl_all!(NodeId: Copy, Send, Sync, std::hash::Hash);
}
