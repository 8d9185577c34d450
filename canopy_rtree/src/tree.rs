// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: construction, insertion, queries.

use alloc::vec::Vec;
use core::cmp::Ordering;

use canopy_bounds::BoundingBox;

use crate::node::{Entry, EntryPayload, Node, NodeIdx};
use crate::order::compare;
use crate::split::{distribute, pick_seeds};

/// Traversal report returned by [`RTree::query_range`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeQuery {
    /// Number of leaf entries whose box intersects the query box.
    pub result_count: usize,
    /// Number of nodes whose box intersected the query box. The root is
    /// always visited, so this is at least 1.
    pub nodes_visited: usize,
}

/// In-memory multi-dimensional R-tree over point records.
///
/// Nodes live in an arena owned by the tree; entries reference children by
/// arena handle. The tree indexes degenerate (point) boxes only, while
/// internal entries carry general boxes. See the crate docs for the
/// determinism guarantees.
pub struct RTree {
    pub(crate) max_entries: usize,
    pub(crate) dimension: usize,
    pub(crate) root: NodeIdx,
    pub(crate) nodes: Vec<Node>,
}

impl core::fmt::Debug for RTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RTree")
            .field("max_entries", &self.max_entries)
            .field("dimension", &self.dimension)
            .field("nodes", &self.nodes.len())
            .field("height", &(self.nodes[self.root.get()].level + 1))
            .finish_non_exhaustive()
    }
}

impl RTree {
    /// Create an empty 2D tree with node capacity `max_entries`.
    pub fn new(max_entries: usize) -> Self {
        Self::with_dimension(max_entries, 2)
    }

    /// Create an empty tree with node capacity `max_entries` indexing
    /// `dimension`-dimensional points.
    ///
    /// `max_entries` must be at least 2 and `dimension` at least 1; debug
    /// builds assert both.
    pub fn with_dimension(max_entries: usize, dimension: usize) -> Self {
        debug_assert!(max_entries >= 2, "node capacity below 2 cannot split");
        debug_assert!(dimension >= 1, "tree needs at least one dimension");
        let mut nodes = Vec::new();
        nodes.push(Node::new(0, max_entries));
        Self {
            max_entries,
            dimension,
            root: NodeIdx::new(0),
            nodes,
        }
    }

    /// Node capacity (the split threshold M).
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Dimensionality of indexed points.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Insert a point record.
    ///
    /// Returns `false` without touching the tree when the coordinate's
    /// dimensionality does not match, or when an identical point is already
    /// indexed. Duplicate detection is a local check in the chosen leaf:
    /// subtree selection is deterministic and enlargement-minimizing, so an
    /// exact duplicate always routes to the leaf holding the original.
    pub fn insert(&mut self, point: &[i64], rid: u64) -> bool {
        if point.len() != self.dimension {
            return false;
        }
        let mbr = BoundingBox::from_point(point);
        let leaf = self.choose_leaf(&mbr);
        if self.nodes[leaf.get()].entries.iter().any(|e| e.mbr == mbr) {
            return false;
        }
        let entry = Entry::record(mbr, rid);
        if self.nodes[leaf.get()].entries.len() < self.max_entries {
            self.nodes[leaf.get()].entries.push(entry);
            self.adjust_tree(leaf, None);
        } else {
            let sibling = self.split_node(leaf, entry);
            self.adjust_tree(leaf, Some(sibling));
        }
        true
    }

    /// Descend from the root to the leaf best suited for `mbr`.
    ///
    /// At each internal node, takes the child whose box enlarges least when
    /// extended to cover `mbr`; ties fall to the smaller child area, then to
    /// the crate-wide total order (candidate against incumbent).
    fn choose_leaf(&self, mbr: &BoundingBox) -> NodeIdx {
        let mut cur = self.root;
        loop {
            let node = &self.nodes[cur.get()];
            if node.is_leaf() {
                return cur;
            }
            // (entry index, enlargement, area) of the best candidate so far.
            let mut best: Option<(usize, i128, i128)> = None;
            for (i, e) in node.entries.iter().enumerate() {
                let area = e.mbr.area();
                let enlargement = BoundingBox::union(&e.mbr, mbr).area() - area;
                let better = match &best {
                    None => true,
                    Some((best_i, best_enl, best_area)) => match enlargement.cmp(best_enl) {
                        Ordering::Less => true,
                        Ordering::Greater => false,
                        Ordering::Equal => match area.cmp(best_area) {
                            Ordering::Less => true,
                            Ordering::Greater => false,
                            Ordering::Equal => {
                                compare(&e.mbr, &node.entries[*best_i].mbr) != Ordering::Greater
                            }
                        },
                    },
                };
                if better {
                    best = Some((i, enlargement, area));
                }
            }
            let (i, _, _) = best.expect("internal node holds at least one entry");
            cur = node.entries[i]
                .child_idx()
                .expect("internal entry references a child");
        }
    }

    /// Split `node` holding M entries plus `extra` into itself and a fresh
    /// sibling at the same level. Children of internal nodes are re-homed to
    /// whichever side of the split they land on.
    fn split_node(&mut self, node: NodeIdx, extra: Entry) -> NodeIdx {
        let level = self.nodes[node.get()].level;
        let mut entries = core::mem::take(&mut self.nodes[node.get()].entries);
        entries.push(extra);
        let (seed1, seed2) = pick_seeds(&entries);
        let (group1, group2) = distribute(entries, seed1, seed2, self.max_entries);
        let sibling = self.alloc_node(level);
        self.nodes[node.get()].entries = group1;
        self.nodes[sibling.get()].entries = group2;
        if level > 0 {
            self.reparent_children(node);
            self.reparent_children(sibling);
        }
        sibling
    }

    /// Walk from `node` to the root, tightening parent boxes and installing
    /// the split sibling. A split that reaches the root grows the tree by
    /// one level; that is the only way height increases.
    fn adjust_tree(&mut self, mut node: NodeIdx, mut sibling: Option<NodeIdx>) {
        loop {
            let Some(parent) = self.nodes[node.get()].parent else {
                if let Some(sib) = sibling {
                    self.grow_root(node, sib);
                }
                return;
            };
            let mbr = self.nodes[node.get()]
                .mbr()
                .expect("adjusted node is never empty");
            let slot = self.nodes[parent.get()]
                .entries
                .iter()
                .position(|e| e.child_idx() == Some(node))
                .expect("parent holds an entry for each child");
            self.nodes[parent.get()].entries[slot].mbr = mbr;

            if let Some(sib) = sibling {
                let sib_mbr = self.nodes[sib.get()]
                    .mbr()
                    .expect("split sibling is never empty");
                let entry = Entry::child(sib_mbr, sib);
                if self.nodes[parent.get()].entries.len() < self.max_entries {
                    self.nodes[sib.get()].parent = Some(parent);
                    self.nodes[parent.get()].entries.push(entry);
                    sibling = None;
                } else {
                    sibling = Some(self.split_node(parent, entry));
                }
            }
            node = parent;
        }
    }

    fn grow_root(&mut self, left: NodeIdx, right: NodeIdx) {
        let level = self.nodes[left.get()].level + 1;
        let root = self.alloc_node(level);
        let left_mbr = self.nodes[left.get()].mbr().expect("old root is never empty");
        let right_mbr = self.nodes[right.get()].mbr().expect("sibling is never empty");
        self.nodes[root.get()].entries.push(Entry::child(left_mbr, left));
        self.nodes[root.get()].entries.push(Entry::child(right_mbr, right));
        self.nodes[left.get()].parent = Some(root);
        self.nodes[right.get()].parent = Some(root);
        self.root = root;
    }

    fn alloc_node(&mut self, level: usize) -> NodeIdx {
        let idx = NodeIdx::new(self.nodes.len());
        self.nodes.push(Node::new(level, self.max_entries));
        idx
    }

    fn reparent_children(&mut self, node: NodeIdx) {
        let children: Vec<NodeIdx> = self.nodes[node.get()]
            .entries
            .iter()
            .filter_map(Entry::child_idx)
            .collect();
        for child in children {
            self.nodes[child.get()].parent = Some(node);
        }
    }

    /// Count records and nodes intersecting `query`.
    ///
    /// Returns `None` when the query box's dimensionality does not match the
    /// tree's. A node counts as visited iff its box intersected the query on
    /// the way down; the root is always visited. Intersection is closed, so
    /// boxes that merely touch the query boundary contribute.
    pub fn query_range(&self, query: &BoundingBox) -> Option<RangeQuery> {
        if query.dim() != self.dimension {
            return None;
        }
        let mut out = RangeQuery {
            result_count: 0,
            nodes_visited: 1,
        };
        self.visit_range(self.root, query, &mut out);
        Some(out)
    }

    fn visit_range(&self, idx: NodeIdx, query: &BoundingBox, out: &mut RangeQuery) {
        let node = &self.nodes[idx.get()];
        if node.is_leaf() {
            out.result_count += node.entries.iter().filter(|e| e.mbr.intersects(query)).count();
            return;
        }
        for e in &node.entries {
            if e.mbr.intersects(query) {
                out.nodes_visited += 1;
                let child = e.child_idx().expect("internal entry references a child");
                self.visit_range(child, query, out);
            }
        }
    }

    /// Look up the record stored at exactly `point`.
    ///
    /// `None` on dimensionality mismatch or when no leaf entry's box equals
    /// the degenerate query box. Since duplicates are rejected on insert,
    /// at most one entry can match.
    pub fn query_point(&self, point: &[i64]) -> Option<u64> {
        if point.len() != self.dimension {
            return None;
        }
        let target = BoundingBox::from_point(point);
        self.find_point(self.root, &target)
    }

    fn find_point(&self, idx: NodeIdx, target: &BoundingBox) -> Option<u64> {
        let node = &self.nodes[idx.get()];
        if node.is_leaf() {
            return node.entries.iter().find(|e| e.mbr == *target).map(|e| match e.payload {
                EntryPayload::Record(rid) => rid,
                EntryPayload::Child(_) => unreachable!("leaf entry carries a record"),
            });
        }
        node.entries
            .iter()
            .filter(|e| e.mbr.intersects(target))
            .find_map(|e| self.find_point(e.child_idx()?, target))
    }
}

#[cfg(test)]
impl RTree {
    /// Structural validator used by tests after every mutation.
    pub(crate) fn check_invariants(&self) {
        let mut leaf_boxes: Vec<&BoundingBox> = Vec::new();
        self.check_node(self.root, None, &mut leaf_boxes);
        for (i, a) in leaf_boxes.iter().enumerate() {
            for b in &leaf_boxes[i + 1..] {
                assert_ne!(a, b, "duplicate leaf boxes in the tree");
            }
        }
    }

    fn check_node<'a>(
        &'a self,
        idx: NodeIdx,
        parent: Option<NodeIdx>,
        leaf_boxes: &mut Vec<&'a BoundingBox>,
    ) {
        let node = &self.nodes[idx.get()];
        assert_eq!(node.parent, parent, "parent back-reference mismatch");
        assert!(node.entries.len() <= self.max_entries, "node over capacity");
        if idx == self.root {
            // The root may hold a single entry, or none on an empty tree.
            assert!(!node.entries.is_empty() || node.is_leaf(), "empty internal root");
        } else {
            assert!(
                node.entries.len() >= self.max_entries / 2,
                "non-root node under minimum fill"
            );
        }
        if node.is_leaf() {
            for e in &node.entries {
                assert!(matches!(e.payload, EntryPayload::Record(_)), "child in leaf");
                leaf_boxes.push(&e.mbr);
            }
            return;
        }
        for e in &node.entries {
            let child = e.child_idx().expect("record entry in internal node");
            let child_node = &self.nodes[child.get()];
            assert_eq!(child_node.level + 1, node.level, "level gap between parent and child");
            assert_eq!(
                Some(&e.mbr),
                child_node.mbr().as_ref(),
                "internal entry box is not the tight child MBR"
            );
            self.check_node(child, Some(idx), leaf_boxes);
        }
    }
}
