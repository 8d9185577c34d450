// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic total order over bounding boxes.
//!
//! Every algorithm in this crate that has to break a tie (equal enlargement
//! costs in subtree selection, equal separations in seed picking, equal group
//! costs during distribution, sibling order while printing) goes through this
//! one comparator, so a tree built from a given insertion sequence is
//! reproducible regardless of incidental storage order.

use core::cmp::Ordering;

use canopy_bounds::BoundingBox;

/// Compare two boxes in the crate-wide total order.
///
/// Scans dimensions in index order: at the first axis where the low bounds
/// differ, the smaller low bound sorts first; otherwise at the first axis
/// where the high bounds differ, the larger high bound sorts first.
/// `Ordering::Equal` only for coordinate-identical boxes.
pub(crate) fn compare(a: &BoundingBox, b: &BoundingBox) -> Ordering {
    debug_assert_eq!(a.dim(), b.dim(), "comparing boxes across dimensions");
    for axis in 0..a.dim() {
        match a.low(axis).cmp(&b.low(axis)) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
        match b.high(axis).cmp(&a.high(axis)) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
    }
    Ordering::Equal
}

/// Whether `a` wins the tie against `b`.
///
/// True when `a` sorts first under the total order, and also when the boxes
/// are identical, so the rule always produces an answer.
pub fn prefer(a: &BoundingBox, b: &BoundingBox) -> bool {
    compare(a, b) != Ordering::Greater
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smaller_low_bound_wins() {
        let a = BoundingBox::new(&[0, 5], &[2, 9]);
        let b = BoundingBox::new(&[1, 0], &[2, 9]);
        assert!(prefer(&a, &b));
        assert!(!prefer(&b, &a));
    }

    #[test]
    fn larger_high_bound_wins_when_lows_agree() {
        let a = BoundingBox::new(&[0, 0], &[5, 1]);
        let b = BoundingBox::new(&[0, 0], &[3, 9]);
        assert!(prefer(&a, &b));
        assert!(!prefer(&b, &a));
    }

    #[test]
    fn later_axis_breaks_earlier_equality() {
        let a = BoundingBox::new(&[0, 2], &[4, 6]);
        let b = BoundingBox::new(&[0, 3], &[4, 6]);
        assert!(prefer(&a, &b));
        assert_eq!(compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn identical_boxes_prefer_the_first() {
        let a = BoundingBox::new(&[1, 1], &[2, 2]);
        let b = a.clone();
        assert!(prefer(&a, &b));
        assert!(prefer(&b, &a));
        assert_eq!(compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn order_is_antisymmetric_on_distinct_boxes() {
        let boxes = [
            BoundingBox::new(&[0, 0], &[1, 1]),
            BoundingBox::new(&[0, 0], &[2, 1]),
            BoundingBox::new(&[0, 1], &[1, 1]),
            BoundingBox::new(&[-3, 0], &[1, 1]),
        ];
        for a in &boxes {
            for b in &boxes {
                if a != b {
                    assert_ne!(prefer(a, b), prefer(b, a), "total order must pick one side");
                }
            }
        }
    }
}
