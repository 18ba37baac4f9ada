//! Structural self-checks for graph containers.
//!
//! [`DebugInvariants::validate_invariants`] is always available and is what
//! tests call directly. Mutating operations additionally call
//! [`DebugInvariants::debug_assert_invariants`], which only does work when
//! the `check-invariants` or `strict-invariants` feature is enabled; debug
//! builds without those features skip it.

use crate::graph_error::DigraphError;

/// Containers that can check their own internal consistency.
pub trait DebugInvariants {
    /// Panics on the first violation when an invariant-checking feature is
    /// enabled; a no-op otherwise.
    fn debug_assert_invariants(&self);
    /// Runs every check and reports the first violation found.
    fn validate_invariants(&self) -> Result<(), DigraphError>;
}

/// Run a full invariant check and panic on error when one of the
/// invariant-checking features is enabled. Compiles to nothing otherwise.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
