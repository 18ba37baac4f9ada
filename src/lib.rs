#![cfg_attr(docsrs, feature(doc_cfg))]
//! # labeled-digraph
//!
//! An in-memory, mutable, labeled directed multigraph with lazy traversal,
//! memoized indexing, structural algorithms and DOT output.
//!
//! ## Model
//! - A [`Graph`] owns its nodes and edges in generational arenas and hands
//!   out typed [`NodeId`]/[`EdgeId`] handles. Handles from another graph
//!   instance are rejected.
//! - Nodes and edges carry an optional label `L` plus a payload (`N` for
//!   nodes, `E` for edges).
//! - Nodes registered with [`Graph::add_node`] (or created with
//!   [`Graph::new_node`]) are *seeds*; [`Graph::nodes`] walks everything
//!   reachable from them.
//! - Each node stores its outgoing edges in a small list that is promoted
//!   to a label index once it grows past
//!   [`GraphConfig::promote_threshold`](config::GraphConfig).
//!
//! ## Indexing
//! [`Graph::index`] returns an [`Index`] that lazily builds and caches the
//! reachable node list, nodes by label, incoming edges and sinks/sources.
//! The index borrows the graph, so the graph is frozen while it lives.
//!
//! ## Errors
//! Misuse of the API (connecting a connected edge, mixing graphs, ...) is a
//! programming error and panics. Every panicking operation has a `try_*`
//! twin returning [`DigraphError`].
//!
//! ## Example
//! ```rust
//! use labeled_digraph::prelude::*;
//!
//! let mut g: Graph<&str, u32> = Graph::new();
//! let root = g.new_node(Some("root"), 0);
//! let leaf = g.create_node(Some("leaf"), 1);
//! g.new_edge(root, leaf, Some("child"), ());
//!
//! let idx = g.index();
//! assert_eq!(idx.sinks(false), &[leaf]);
//! assert_eq!(idx.sources(false), &[root]);
//!
//! let mut copy_of: Graph<&str, u32> = Graph::new();
//! copy(&mut copy_of, &g, |n| Some(n.attr().clone()), |e| Some(e.attr().clone()));
//! assert!(check_isomorphism(
//!     &g.index(),
//!     &copy_of.index(),
//!     |a, b| a.payload() == b.payload(),
//!     |_, _| true,
//! ));
//! ```

pub mod algs;
pub mod config;
pub mod debug_invariants;
pub mod graph_error;
pub mod io;
pub mod topology;

pub use config::GraphConfig;
pub use debug_invariants::DebugInvariants;
pub use graph_error::DigraphError;
pub use topology::{EdgeId, EdgeRef, Graph, Index, NodeId, NodeRef};

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::boundary::{sinks, sources};
    pub use crate::algs::copy::{copy, project};
    pub use crate::algs::isomorphism::check_isomorphism;
    pub use crate::config::GraphConfig;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::graph_error::DigraphError;
    pub use crate::io::dot::DotRenderer;
    pub use crate::topology::bounds::{Label, Labeled};
    pub use crate::topology::entity::{EdgeRef, NodeRef};
    pub use crate::topology::graph::Graph;
    pub use crate::topology::ids::{EdgeId, GraphId, NodeId};
    pub use crate::topology::index::Index;
    pub use crate::topology::iter_ext::{EdgeIterExt, LabeledIterExt, NodeIterExt};
    pub use crate::topology::label::Attr;
}
