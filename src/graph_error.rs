//! DigraphError: unified error type for labeled-digraph contract violations
//!
//! Misusing the graph API (connecting an edge twice, mixing entities of two
//! graphs, ...) is a programming error. The panicking entry points report
//! these conditions by panicking with the error's message; the `try_*`
//! twins hand the same value back to the caller instead.

use thiserror::Error;

use crate::topology::ids::{EdgeId, GraphId, NodeId};

/// Unified error type for labeled-digraph operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DigraphError {
    /// `connect` was called on an edge that already has endpoints.
    #[error("edge {0:?} is already connected; disconnect it first")]
    EdgeAlreadyConnected(EdgeId),
    /// A node handle created by another graph instance was passed in.
    #[error("node {node:?} belongs to graph {owner:?}, not graph {graph:?}")]
    ForeignNode {
        node: NodeId,
        owner: GraphId,
        graph: GraphId,
    },
    /// An edge handle created by another graph instance was passed in.
    #[error("edge {edge:?} belongs to graph {owner:?}, not graph {graph:?}")]
    ForeignEdge {
        edge: EdgeId,
        owner: GraphId,
        graph: GraphId,
    },
    /// The two endpoints of a connection live in different graph instances.
    #[error("cannot connect {from:?} -> {to:?}: endpoints belong to different graphs")]
    CrossGraphConnect { from: NodeId, to: NodeId },
    /// The node was removed (or never existed) in this graph.
    #[error("node {0:?} is not part of this graph")]
    UnknownNode(NodeId),
    /// The edge was removed (or never existed) in this graph.
    #[error("edge {0:?} is not part of this graph")]
    UnknownEdge(EdgeId),
    /// `next_node` found several edges carrying the requested label.
    #[error("node {node:?} has {count} outgoing edges with label {label}; expected at most one")]
    AmbiguousNext {
        node: NodeId,
        label: String,
        count: usize,
    },
    /// A structural invariant check failed.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_handles() {
        let edge = EdgeId::new(GraphId::from_raw(3), 7, 0);
        let msg = DigraphError::EdgeAlreadyConnected(edge).to_string();
        assert!(msg.contains("already connected"));
        assert!(msg.contains("e7"));

        let err = DigraphError::AmbiguousNext {
            node: NodeId::new(GraphId::from_raw(3), 1, 0),
            label: "\"next\"".into(),
            count: 2,
        };
        assert!(err.to_string().contains("2 outgoing edges"));
    }
}
