//! Per-node outgoing adjacency with adaptive storage.
//!
//! Most nodes have a handful of edges; for those a plain vector scanned
//! linearly is the cheapest storage. Once a node's list grows past the
//! configured threshold it is promoted to a [`LabelBuckets`] multi-map so
//! label lookups stop scanning every edge. Promotion is one-way.
//!
//! # Ordering
//! - Linear form: insertion order.
//! - Indexed form: concatenation by label, labels in first-appearance order.
//!
//! The global order is therefore not stable across promotion. Only the set
//! of edges (and the per-label order) is.

use std::slice;

use hashbrown::HashSet;

use crate::topology::bounds::Label;
use crate::topology::ids::{EdgeId, NodeId};
use crate::topology::label::{Items, LabelBuckets};

/// One outgoing edge as seen from its source node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OutEdge {
    pub edge: EdgeId,
    pub target: NodeId,
}

/// Outgoing edges of a single node.
#[derive(Clone, Debug)]
pub enum EdgeSet<L> {
    /// Unindexed list of `(label, edge)` pairs.
    Linear(Vec<(Option<L>, OutEdge)>),
    /// Label-keyed multi-map.
    Indexed(LabelBuckets<L, OutEdge>),
}

impl<L> Default for EdgeSet<L> {
    fn default() -> Self {
        EdgeSet::Linear(Vec::new())
    }
}

impl<L> EdgeSet<L> {
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            EdgeSet::Linear(list) => list.len(),
            EdgeSet::Indexed(map) => map.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_indexed(&self) -> bool {
        matches!(self, EdgeSet::Indexed(_))
    }
}

impl<L: Label> EdgeSet<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an edge; returns `true` if this insertion promoted the set.
    pub fn insert(&mut self, label: Option<&L>, entry: OutEdge, threshold: usize) -> bool {
        match self {
            EdgeSet::Linear(list) => {
                list.push((label.cloned(), entry));
                if list.len() > threshold {
                    self.promote();
                    return true;
                }
                false
            }
            EdgeSet::Indexed(map) => {
                map.push(label, entry);
                false
            }
        }
    }

    fn promote(&mut self) {
        if let EdgeSet::Linear(list) = self {
            let mut map = LabelBuckets::new();
            for (label, entry) in list.drain(..) {
                map.push(label.as_ref(), entry);
            }
            *self = EdgeSet::Indexed(map);
        }
    }

    /// Removes `edge` (filed under `label`), preserving the order of the rest.
    pub fn remove(&mut self, label: Option<&L>, edge: EdgeId) -> Option<OutEdge> {
        match self {
            EdgeSet::Linear(list) => {
                let pos = list.iter().position(|(_, e)| e.edge == edge)?;
                Some(list.remove(pos).1)
            }
            EdgeSet::Indexed(map) => map.remove_first(label, |e| e.edge == edge),
        }
    }

    /// Number of distinct edge labels present.
    pub fn label_count(&self) -> usize {
        match self {
            EdgeSet::Linear(list) => list
                .iter()
                .map(|(label, _)| label.as_ref())
                .collect::<HashSet<_>>()
                .len(),
            EdgeSet::Indexed(map) => map.label_count(),
        }
    }

    /// All outgoing edges in native order (see module docs).
    pub fn iter(&self) -> EdgeSetIter<'_, L> {
        match self {
            EdgeSet::Linear(list) => EdgeSetIter::Linear(list.iter()),
            EdgeSet::Indexed(map) => EdgeSetIter::Indexed(map.iter()),
        }
    }

    /// Outgoing edges carrying `label`, in insertion order.
    pub fn with_label<'a>(&'a self, label: Option<&'a L>) -> WithLabelIter<'a, L> {
        match self {
            EdgeSet::Linear(list) => WithLabelIter::Scan {
                iter: list.iter(),
                label,
            },
            EdgeSet::Indexed(map) => WithLabelIter::Bucket(map.get(label).iter()),
        }
    }

    /// Distinct target nodes in first-seen order.
    pub fn targets(&self) -> Vec<NodeId> {
        distinct_targets(self.len(), self.iter())
    }

    /// Distinct target nodes reached through edges labelled `label`.
    pub fn targets_with(&self, label: Option<&L>) -> Vec<NodeId> {
        let n = match self {
            EdgeSet::Linear(list) => list.len(),
            EdgeSet::Indexed(map) => map.get(label).len(),
        };
        distinct_targets(n, self.with_label(label))
    }
}

fn distinct_targets(hint: usize, edges: impl Iterator<Item = OutEdge>) -> Vec<NodeId> {
    match hint {
        0 => Vec::new(),
        1 => edges.map(|e| e.target).collect(),
        _ => {
            let mut seen = HashSet::with_capacity(hint);
            edges
                .map(|e| e.target)
                .filter(|t| seen.insert(*t))
                .collect()
        }
    }
}

/// Iterator over all edges of an [`EdgeSet`].
pub enum EdgeSetIter<'a, L> {
    Linear(slice::Iter<'a, (Option<L>, OutEdge)>),
    Indexed(Items<'a, L, OutEdge>),
}

impl<'a, L> Iterator for EdgeSetIter<'a, L> {
    type Item = OutEdge;

    #[inline]
    fn next(&mut self) -> Option<OutEdge> {
        match self {
            EdgeSetIter::Linear(it) => it.next().map(|(_, e)| *e),
            EdgeSetIter::Indexed(it) => it.next().copied(),
        }
    }
}

/// Iterator over the edges of an [`EdgeSet`] that carry one label.
pub enum WithLabelIter<'a, L> {
    Scan {
        iter: slice::Iter<'a, (Option<L>, OutEdge)>,
        label: Option<&'a L>,
    },
    Bucket(slice::Iter<'a, OutEdge>),
}

impl<'a, L: PartialEq> Iterator for WithLabelIter<'a, L> {
    type Item = OutEdge;

    fn next(&mut self) -> Option<OutEdge> {
        match self {
            WithLabelIter::Scan { iter, label } => iter
                .by_ref()
                .find(|(l, _)| l.as_ref() == *label)
                .map(|(_, e)| *e),
            WithLabelIter::Bucket(it) => it.next().copied(),
        }
    }
}
