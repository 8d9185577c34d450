// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! R-tree diagnostics.
//!
//! Grow a tree past several splits, then print its statistics and the
//! deterministic pre-order dump.
//!
//! Run:
//! - `cargo run -p canopy_demos --example rtree_diagnostics`

use canopy_rtree::RTree;

fn main() {
    let mut tree = RTree::new(4);
    for i in 0..30_i64 {
        let _ = tree.insert(&[i * 37 % 100, i * 53 % 100], i as u64);
    }

    print!("{}", tree.stats());
    println!();
    print!("{}", tree.render());
}
