//! Tunables for graph storage.
//!
//! `GraphConfig` is plain data with serde support so embedding applications
//! can keep it in their own configuration files:
//!
//! ```rust
//! use labeled_digraph::config::GraphConfig;
//! let cfg: GraphConfig = serde_json::from_str(r#"{ "promote_threshold": 4 }"#).unwrap();
//! assert_eq!(cfg.promote_threshold, 4);
//! ```

use serde::{Deserialize, Serialize};

/// Number of outgoing edges a node may hold in its linear edge list before
/// the list is promoted to a label-indexed multi-map.
pub const DEFAULT_PROMOTE_THRESHOLD: usize = 10;

/// Storage configuration of a [`Graph`](crate::topology::graph::Graph).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// A node's edge list is promoted once it holds more than this many edges.
    pub promote_threshold: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            promote_threshold: DEFAULT_PROMOTE_THRESHOLD,
        }
    }
}

impl GraphConfig {
    /// Returns a copy with a different promotion threshold.
    ///
    /// A threshold of zero is clamped to one: a node with a single edge
    /// never pays for a map.
    pub fn with_promote_threshold(mut self, threshold: usize) -> Self {
        if threshold == 0 {
            log::warn!("promote_threshold of 0 requested; clamping to 1");
        }
        self.promote_threshold = threshold.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold() {
        assert_eq!(GraphConfig::default().promote_threshold, 10);
    }

    #[test]
    fn zero_threshold_is_clamped() {
        let cfg = GraphConfig::default().with_promote_threshold(0);
        assert_eq!(cfg.promote_threshold, 1);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: GraphConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, GraphConfig::default());
        let round = serde_json::to_string(&cfg).unwrap();
        assert_eq!(round, r#"{"promote_threshold":10}"#);
    }
}
