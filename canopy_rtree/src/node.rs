// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree nodes and entries, stored in an arena owned by the tree.

use alloc::vec::Vec;

use canopy_bounds::BoundingBox;

/// Arena handle for a node.
///
/// The tree owns all nodes in a single `Vec`; handles never dangle because
/// nodes are only ever appended. Parent handles are informational (used to
/// walk upward during adjustment) and carry no ownership.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(usize);

impl NodeIdx {
    pub(crate) const fn new(i: usize) -> Self {
        Self(i)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

/// What an entry points at: a record in a leaf, or a child node otherwise.
#[derive(Clone, Debug)]
pub(crate) enum EntryPayload {
    /// Record identifier held by a leaf entry.
    Record(u64),
    /// Child node referenced by an internal entry.
    Child(NodeIdx),
}

/// A (bounding box, payload) pair stored in a node.
#[derive(Clone, Debug)]
pub(crate) struct Entry {
    pub(crate) mbr: BoundingBox,
    pub(crate) payload: EntryPayload,
}

impl Entry {
    pub(crate) fn record(mbr: BoundingBox, rid: u64) -> Self {
        Self {
            mbr,
            payload: EntryPayload::Record(rid),
        }
    }

    pub(crate) fn child(mbr: BoundingBox, node: NodeIdx) -> Self {
        Self {
            mbr,
            payload: EntryPayload::Child(node),
        }
    }

    /// The child handle, for internal entries.
    pub(crate) fn child_idx(&self) -> Option<NodeIdx> {
        match self.payload {
            EntryPayload::Child(idx) => Some(idx),
            EntryPayload::Record(_) => None,
        }
    }
}

/// A fixed-capacity collection of entries at one tree level.
///
/// `level == 0` marks a leaf. Entries of an internal node all reference
/// children at `level - 1`.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) level: usize,
    pub(crate) entries: Vec<Entry>,
    pub(crate) parent: Option<NodeIdx>,
}

impl Node {
    pub(crate) fn new(level: usize, capacity: usize) -> Self {
        Self {
            level,
            entries: Vec::with_capacity(capacity),
            parent: None,
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.level == 0
    }

    /// The minimal box enclosing every entry, or `None` for an empty node.
    pub(crate) fn mbr(&self) -> Option<BoundingBox> {
        let mut it = self.entries.iter();
        let first = it.next()?.mbr.clone();
        Some(it.fold(first, |mut acc, e| {
            acc.union_with(&e.mbr);
            acc
        }))
    }
}
