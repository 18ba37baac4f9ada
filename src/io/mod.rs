//! Text output for graphs.

pub mod dot;

pub use dot::DotRenderer;
