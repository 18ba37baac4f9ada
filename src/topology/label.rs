//! Labels and payloads carried by nodes and edges.
//!
//! [`Attr`] bundles the optional label and the opaque application payload of
//! a single entity. [`LabelBuckets`] is the label-keyed multi-map shared by
//! every label-indexed structure in the crate: promoted edge sets, the
//! graph's label index and the lazily built [`Index`](crate::topology::index::Index).
//!
//! Unlabeled entries form their own bucket, so "no label" can be looked up
//! like any other label value by passing `None`.

use std::slice;

use hashbrown::HashMap;

use crate::topology::bounds::{Label, Labeled};

/// Optional label plus payload of a node or an edge.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Attr<L, P> {
    /// Grouping/lookup key; not necessarily unique.
    pub label: Option<L>,
    /// Opaque application data.
    pub payload: P,
}

impl<L, P> Attr<L, P> {
    #[inline]
    pub fn new(label: Option<L>, payload: P) -> Self {
        Attr { label, payload }
    }

    #[inline]
    pub fn labeled(label: L, payload: P) -> Self {
        Attr::new(Some(label), payload)
    }

    #[inline]
    pub fn unlabeled(payload: P) -> Self {
        Attr::new(None, payload)
    }

    /// Transform the payload, keeping the label.
    ///
    /// ```rust
    /// use labeled_digraph::topology::label::Attr;
    /// let a = Attr::labeled("w", 2);
    /// assert_eq!(a.map(|v| v * 10), Attr::labeled("w", 20));
    /// ```
    pub fn map<Q>(self, f: impl FnOnce(P) -> Q) -> Attr<L, Q> {
        Attr::new(self.label, f(self.payload))
    }

    /// Transform the label (if any), keeping the payload.
    pub fn map_label<M>(self, f: impl FnOnce(L) -> M) -> Attr<M, P> {
        Attr::new(self.label.map(f), self.payload)
    }
}

impl<L, P> Labeled for Attr<L, P> {
    type Label = L;

    #[inline]
    fn label(&self) -> Option<&L> {
        self.label.as_ref()
    }
}

#[derive(Clone, Debug)]
struct Bucket<L, T> {
    label: Option<L>,
    items: Vec<T>,
}

/// Label-keyed multi-map with deterministic iteration order.
///
/// Buckets are kept in the order their label first appeared; items inside a
/// bucket keep insertion order. A bucket is deleted as soon as its last item
/// is removed, so the number of buckets always equals the number of distinct
/// labels currently present.
#[derive(Clone, Debug)]
pub struct LabelBuckets<L, T> {
    buckets: Vec<Bucket<L, T>>,
    slots: HashMap<L, usize>,
    unlabeled: Option<usize>,
    len: usize,
}

impl<L, T> Default for LabelBuckets<L, T> {
    fn default() -> Self {
        Self {
            buckets: Vec::new(),
            slots: HashMap::new(),
            unlabeled: None,
            len: 0,
        }
    }
}

impl<L, T> LabelBuckets<L, T> {
    /// Number of distinct labels (buckets) present.
    #[inline]
    pub fn label_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of items across all buckets.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<L: Label, T> LabelBuckets<L, T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn slot(&self, label: Option<&L>) -> Option<usize> {
        match label {
            Some(l) => self.slots.get(l).copied(),
            None => self.unlabeled,
        }
    }

    /// Appends `item` to the bucket of `label`, creating the bucket if needed.
    /// Returns the item's position inside its bucket.
    pub fn push(&mut self, label: Option<&L>, item: T) -> usize {
        let at = match self.slot(label) {
            Some(at) => at,
            None => {
                let at = self.buckets.len();
                self.buckets.push(Bucket {
                    label: label.cloned(),
                    items: Vec::new(),
                });
                match label {
                    Some(l) => {
                        self.slots.insert(l.clone(), at);
                    }
                    None => self.unlabeled = Some(at),
                }
                at
            }
        };
        let items = &mut self.buckets[at].items;
        items.push(item);
        self.len += 1;
        items.len() - 1
    }

    /// Items filed under `label`, in insertion order.
    #[inline]
    pub fn get(&self, label: Option<&L>) -> &[T] {
        match self.slot(label) {
            Some(at) => &self.buckets[at].items,
            None => &[],
        }
    }

    /// Removes the first item of `label`'s bucket matching `pred`.
    ///
    /// Keeps the relative order of the remaining items and drops the bucket
    /// when it becomes empty.
    pub fn remove_first(&mut self, label: Option<&L>, pred: impl FnMut(&T) -> bool) -> Option<T> {
        let at = self.slot(label)?;
        let items = &mut self.buckets[at].items;
        let pos = items.iter().position(pred)?;
        let item = items.remove(pos);
        self.len -= 1;
        if items.is_empty() {
            self.drop_bucket(at);
        }
        Some(item)
    }

    /// Removes the item at `pos` in `label`'s bucket in O(1) by moving the
    /// bucket's last item into the hole.
    ///
    /// Returns the removed item and the item now stored at `pos`, if any,
    /// so callers tracking positions can update the moved entry.
    pub fn swap_remove(&mut self, label: Option<&L>, pos: usize) -> Option<(T, Option<&T>)> {
        let at = self.slot(label)?;
        if pos >= self.buckets[at].items.len() {
            return None;
        }
        let item = self.buckets[at].items.swap_remove(pos);
        self.len -= 1;
        if self.buckets[at].items.is_empty() {
            self.drop_bucket(at);
            return Some((item, None));
        }
        Some((item, self.buckets[at].items.get(pos)))
    }

    fn drop_bucket(&mut self, at: usize) {
        let removed = self.buckets.remove(at);
        match removed.label {
            Some(l) => {
                self.slots.remove(&l);
            }
            None => self.unlabeled = None,
        }
        for slot in self.slots.values_mut() {
            if *slot > at {
                *slot -= 1;
            }
        }
        if let Some(slot) = self.unlabeled.as_mut() {
            if *slot > at {
                *slot -= 1;
            }
        }
    }

    /// Whether a bucket exists for `label`.
    #[inline]
    pub fn contains_label(&self, label: Option<&L>) -> bool {
        self.slot(label).is_some()
    }

    /// Buckets in first-appearance order.
    pub fn buckets(&self) -> impl Iterator<Item = (Option<&L>, &[T])> + '_ {
        self.buckets
            .iter()
            .map(|b| (b.label.as_ref(), b.items.as_slice()))
    }

    /// All items, bucket by bucket.
    pub fn iter(&self) -> Items<'_, L, T> {
        Items {
            buckets: self.buckets.iter(),
            current: Default::default(),
        }
    }
}

/// Iterator over every item of a [`LabelBuckets`], concatenated by label.
pub struct Items<'a, L, T> {
    buckets: slice::Iter<'a, Bucket<L, T>>,
    current: slice::Iter<'a, T>,
}

impl<'a, L, T> Iterator for Items<'a, L, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.next() {
                return Some(item);
            }
            self.current = self.buckets.next()?.items.iter();
        }
    }
}
