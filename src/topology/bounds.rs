//! Common bound aliases used across graph code.
//!
//! These traits have blanket impls, so any type satisfying the underlying
//! bounds automatically implements them. They are zero-cost and only reduce
//! duplication in `where` clauses.

use std::fmt::Debug;
use std::hash::Hash;

/// Canonical bound set for node and edge labels.
///
/// - `Eq + Hash` for label-keyed multi-maps
/// - `Clone` because label buckets keep their own copy of the key
/// - `Debug` for diagnostics and error messages
pub trait Label: Clone + Eq + Hash + Debug {}
impl<T> Label for T where T: Clone + Eq + Hash + Debug {}

/// Anything that exposes an optional label: nodes, edges, attributes.
///
/// Used by the label filters in [`iter_ext`](crate::topology::iter_ext).
pub trait Labeled {
    type Label;

    fn label(&self) -> Option<&Self::Label>;
}
