//! Structural algorithms built on the iteration surface.

pub mod boundary;
pub mod copy;
pub mod isomorphism;

pub use boundary::{sinks, sources};
pub use copy::{copy, project};
pub use isomorphism::check_isomorphism;
