// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! R-tree basics.
//!
//! Insert a handful of points, hit the duplicate guard, and run both query
//! flavors.
//!
//! Run:
//! - `cargo run -p canopy_demos --example rtree_basics`

use canopy_bounds::BoundingBox;
use canopy_rtree::RTree;

fn main() {
    let mut tree = RTree::new(4);
    for (rid, p) in [[0, 0], [4, 1], [2, 7], [9, 9], [5, 5], [1, 8]]
        .iter()
        .enumerate()
    {
        let ok = tree.insert(p, rid as u64 + 1);
        println!("insert {:?} as record {} -> {}", p, rid + 1, ok);
    }

    // Duplicate points are rejected; the tree is unchanged.
    assert!(!tree.insert(&[5, 5], 42));

    let rid = tree.query_point(&[2, 7]);
    println!("point (2, 7) holds record {:?}", rid);
    assert_eq!(rid, Some(3));

    let query = BoundingBox::new(&[0, 0], &[5, 8]);
    let report = tree.query_range(&query).unwrap();
    println!(
        "range {:?}: {} records, {} nodes visited",
        query, report.result_count, report.nodes_visited
    );
}
