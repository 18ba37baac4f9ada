//! Core graph data structures.
//!
//! - [`ids`]: typed node/edge/graph handles
//! - [`label`]: label + payload attributes and the label-keyed multi-map
//! - [`edge_set`]: adaptive per-node outgoing edge storage
//! - [`entity`]: node and edge views
//! - [`graph`]: the [`Graph`] container
//! - [`traversal_iter`]: breadth-first reachability
//! - [`index`]: lazily memoized projections over the reachable set
//! - [`iter_ext`]: extension traits for node and edge sequences

mod arena;
pub mod bounds;
pub mod edge_set;
pub mod entity;
pub mod graph;
pub mod ids;
pub mod index;
pub mod iter_ext;
pub mod label;
pub mod traversal_iter;

pub use bounds::{Label, Labeled};
pub use entity::{EdgeRef, NodeRef};
pub use graph::Graph;
pub use ids::{EdgeId, GraphId, NodeId};
pub use index::Index;
pub use label::Attr;
