// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostics: tree statistics and a deterministic pre-order dump.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write as _};

use crate::node::{EntryPayload, NodeIdx};
use crate::order::compare;
use crate::tree::RTree;

/// Summary of tree shape, gathered by a full traversal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Stats {
    /// Tree height (`root.level + 1`).
    pub height: usize,
    /// Total number of nodes, leaves included.
    pub node_count: usize,
    /// Total number of indexed records.
    pub record_count: usize,
    /// Dimensionality of indexed points.
    pub dimension: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Height of R-tree: {}", self.height)?;
        writeln!(f, "Number of nodes: {}", self.node_count)?;
        writeln!(f, "Number of records: {}", self.record_count)?;
        writeln!(f, "Dimension: {}", self.dimension)
    }
}

impl RTree {
    /// Gather [`Stats`] by traversing the whole tree.
    pub fn stats(&self) -> Stats {
        let mut node_count = 0;
        let mut record_count = 0;
        self.collect_stats(self.root, &mut node_count, &mut record_count);
        Stats {
            height: self.nodes[self.root.get()].level + 1,
            node_count,
            record_count,
            dimension: self.dimension,
        }
    }

    fn collect_stats(&self, idx: NodeIdx, node_count: &mut usize, record_count: &mut usize) {
        let node = &self.nodes[idx.get()];
        *node_count += 1;
        if node.is_leaf() {
            *record_count += node.entries.len();
            return;
        }
        for e in &node.entries {
            if let EntryPayload::Child(child) = e.payload {
                self.collect_stats(child, node_count, record_count);
            }
        }
    }

    /// Render the tree as an indented pre-order dump.
    ///
    /// Children at every node are emitted in the crate-wide total order over
    /// their boxes, so two trees built from the same insertion sequence
    /// render identically, independent of any incidental storage order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.nodes[self.root.get()].entries.is_empty() {
            out.push_str("The tree is empty now.\n");
            return out;
        }
        self.render_node(self.root, 0, &mut out);
        out
    }

    fn render_node(&self, idx: NodeIdx, depth: usize, out: &mut String) {
        let node = &self.nodes[idx.get()];
        let mbr = node.mbr().expect("rendered node is never empty");
        for _ in 0..depth {
            out.push_str("    ");
        }
        let label = if node.is_leaf() { "Leaf node" } else { "Non leaf node" };
        let _ = write!(out, "{label} (level = {}) mbr: (", node.level);
        for axis in 0..mbr.dim() {
            if axis != 0 {
                out.push(' ');
            }
            let _ = write!(out, "{} {}", mbr.low(axis), mbr.high(axis));
        }
        out.push_str(")\n");

        let mut ordered: Vec<usize> = (0..node.entries.len()).collect();
        ordered.sort_by(|&a, &b| compare(&node.entries[a].mbr, &node.entries[b].mbr));
        for i in ordered {
            let e = &node.entries[i];
            match e.payload {
                EntryPayload::Record(rid) => {
                    for _ in 0..=depth {
                        out.push_str("    ");
                    }
                    out.push_str("Entry: <");
                    for axis in 0..e.mbr.dim() {
                        let _ = write!(out, "{}, ", e.mbr.low(axis));
                    }
                    let _ = write!(out, "{rid}>");
                    out.push('\n');
                }
                EntryPayload::Child(child) => {
                    self.render_node(child, depth + 1, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn diagonal_tree(n: i64) -> RTree {
        let mut tree = RTree::new(4);
        for i in 0..n {
            assert!(tree.insert(&[i, i], i as u64 + 1));
        }
        tree
    }

    #[test]
    fn stats_of_a_single_leaf() {
        let tree = diagonal_tree(4);
        let stats = tree.stats();
        assert_eq!(
            stats,
            Stats {
                height: 1,
                node_count: 1,
                record_count: 4,
                dimension: 2
            }
        );
    }

    #[test]
    fn stats_after_root_split() {
        let tree = diagonal_tree(5);
        let stats = tree.stats();
        assert_eq!(
            stats,
            Stats {
                height: 2,
                node_count: 3,
                record_count: 5,
                dimension: 2
            }
        );
    }

    #[test]
    fn stats_display_format() {
        let stats = Stats {
            height: 2,
            node_count: 3,
            record_count: 5,
            dimension: 2,
        };
        assert_eq!(
            stats.to_string(),
            "Height of R-tree: 2\nNumber of nodes: 3\nNumber of records: 5\nDimension: 2\n"
        );
    }

    #[test]
    fn empty_tree_renders_a_notice() {
        let tree = RTree::new(4);
        assert_eq!(tree.render(), "The tree is empty now.\n");
    }

    #[test]
    fn single_leaf_renders_sorted_entries() {
        let mut tree = RTree::new(4);
        assert!(tree.insert(&[1, 1], 2));
        assert!(tree.insert(&[0, 0], 1));
        assert_eq!(
            tree.render(),
            "Leaf node (level = 0) mbr: (0 1 0 1)\n\
             \x20   Entry: <0, 0, 1>\n\
             \x20   Entry: <1, 1, 2>\n"
        );
    }

    #[test]
    fn split_tree_renders_children_in_total_order() {
        let tree = diagonal_tree(5);
        assert_eq!(
            tree.render(),
            "Non leaf node (level = 1) mbr: (0 4 0 4)\n\
             \x20   Leaf node (level = 0) mbr: (0 1 0 1)\n\
             \x20       Entry: <0, 0, 1>\n\
             \x20       Entry: <1, 1, 2>\n\
             \x20   Leaf node (level = 0) mbr: (2 4 2 4)\n\
             \x20       Entry: <2, 2, 3>\n\
             \x20       Entry: <3, 3, 4>\n\
             \x20       Entry: <4, 4, 5>\n"
        );
    }

    #[test]
    fn rendering_is_reproducible_across_builds() {
        let build = || {
            let mut tree = RTree::with_dimension(3, 2);
            for i in 0..80_i64 {
                let _ = tree.insert(&[i * 37 % 100, i * 53 % 100], i as u64);
            }
            tree
        };
        assert_eq!(build().render(), build().render());
    }
}
