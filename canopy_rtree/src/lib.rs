// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy R-tree: an in-memory multi-dimensional point index.
//!
//! The tree indexes point records (degenerate bounding boxes) and answers
//! point and bounding-region overlap queries. It is the indexing primitive a
//! spatial database or GIS engine would sit beneath query execution.
//!
//! - Insert point records with [`RTree::insert`]; duplicate points are
//!   rejected, so each coordinate maps to at most one record.
//! - Query by overlap region with [`RTree::query_range`] or by exact point
//!   with [`RTree::query_point`].
//! - Inspect shape with [`RTree::stats`] and [`RTree::render`].
//!
//! Insertion follows the classic recipe: descend to the leaf whose box
//! enlarges least, split overflowing nodes with linear-cost seed selection
//! and greedy distribution, then tighten boxes on the walk back to the root.
//! Every tie anywhere in those algorithms is broken by one total order over
//! boxes ([`prefer`]), so a tree built from a given insertion sequence is
//! fully reproducible, rendered dump included.
//!
//! # Example
//!
//! ```rust
//! use canopy_rtree::{BoundingBox, RTree};
//!
//! // Capacity 4, 2D points.
//! let mut tree = RTree::new(4);
//! assert!(tree.insert(&[0, 0], 1));
//! assert!(tree.insert(&[5, 5], 2));
//! assert!(!tree.insert(&[5, 5], 3)); // duplicate point, rejected
//!
//! assert_eq!(tree.query_point(&[5, 5]), Some(2));
//!
//! let report = tree.query_range(&BoundingBox::new(&[0, 0], &[3, 3])).unwrap();
//! assert_eq!(report.result_count, 1);
//! ```
//!
//! Higher dimensions work the same way via [`RTree::with_dimension`].
//!
//! The tree is single-threaded and synchronous: callers own exclusive
//! access, and no operation blocks. There is no deletion, persistence, or
//! bulk-loading; see `canopy_bounds` for the box arithmetic contract.

#![no_std]

extern crate alloc;

mod diag;
mod node;
mod order;
mod split;
mod tree;

pub use canopy_bounds::BoundingBox;
pub use diag::Stats;
pub use order::prefer;
pub use tree::{RTree, RangeQuery};
