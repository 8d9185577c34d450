// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear-cost node splitting: seed selection and greedy distribution.

use alloc::vec::Vec;
use core::cmp::Ordering;

use canopy_bounds::BoundingBox;

use crate::node::Entry;
use crate::order::{compare, prefer};

/// Pick the two seed entries for a split.
///
/// For each dimension, find the entry with the maximum low bound and the
/// entry with the minimum high bound, normalize their separation by the
/// overall extent on that dimension, and take the dimension with the widest
/// normalized separation. Separations are compared as cross-multiplied
/// `i128` rationals with saturating products, never floats.
///
/// When the winning dimension nominates one entry as both seeds (heavily
/// overlapping input), fall back to the full deterministic ordering of all
/// entries and seed from its two ends.
pub(crate) fn pick_seeds(entries: &[Entry]) -> (usize, usize) {
    debug_assert!(entries.len() >= 2, "splitting needs at least two entries");
    let dim = entries[0].mbr.dim();

    // (separation numerator, extent denominator, low-max index, high-min index)
    let mut best: Option<(i128, i128, usize, usize)> = None;
    for axis in 0..dim {
        let mut low_max = 0_usize;
        let mut high_min = 0_usize;
        let mut lo = entries[0].mbr.low(axis);
        let mut hi = entries[0].mbr.high(axis);
        for (i, e) in entries.iter().enumerate().skip(1) {
            let m = &e.mbr;
            match m.low(axis).cmp(&entries[low_max].mbr.low(axis)) {
                Ordering::Greater => low_max = i,
                Ordering::Equal if compare(m, &entries[low_max].mbr) == Ordering::Less => {
                    low_max = i;
                }
                _ => {}
            }
            match m.high(axis).cmp(&entries[high_min].mbr.high(axis)) {
                Ordering::Less => high_min = i,
                Ordering::Equal if compare(m, &entries[high_min].mbr) == Ordering::Less => {
                    high_min = i;
                }
                _ => {}
            }
            lo = lo.min(m.low(axis));
            hi = hi.max(m.high(axis));
        }

        // Zero-width dimensions clamp to 1; the numerator is 0 there anyway.
        let extent = (i128::from(hi) - i128::from(lo)).max(1);
        let sep = i128::from(entries[high_min].mbr.high(axis))
            - i128::from(entries[low_max].mbr.low(axis));

        let better = match &best {
            None => true,
            Some((best_sep, best_extent, best_lm, best_hm)) => {
                match sep
                    .saturating_mul(*best_extent)
                    .cmp(&best_sep.saturating_mul(extent))
                {
                    Ordering::Greater => true,
                    Ordering::Less => false,
                    Ordering::Equal => {
                        compare(&entries[low_max].mbr, &entries[*best_lm].mbr)
                            .then_with(|| compare(&entries[high_min].mbr, &entries[*best_hm].mbr))
                            == Ordering::Less
                    }
                }
            }
        };
        if better {
            best = Some((sep, extent, low_max, high_min));
        }
    }

    let (_, _, seed1, seed2) = best.expect("boxes have at least one dimension");
    if seed1 != seed2 {
        return (seed1, seed2);
    }

    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by(|&a, &b| compare(&entries[a].mbr, &entries[b].mbr));
    (order[0], order[entries.len() - 1])
}

/// Distribute `max_entries + 1` entries into two groups anchored by the seeds.
///
/// Returns `(group1, group2)` where `group1` contains the entry at `seed1`.
/// Remaining entries are taken in stored order and assigned to the group
/// whose running MBR enlarges less; ties fall to the smaller resulting area,
/// then the smaller group, then the crate-wide total order over the running
/// MBRs. The first time either group reaches
/// `max_entries - floor(max_entries / 2)` entries, every remaining entry is
/// forced into the other group, so both groups end at or above the minimum
/// fill of `floor(max_entries / 2)`.
pub(crate) fn distribute(
    entries: Vec<Entry>,
    seed1: usize,
    seed2: usize,
    max_entries: usize,
) -> (Vec<Entry>, Vec<Entry>) {
    debug_assert_eq!(entries.len(), max_entries + 1, "split input is M + 1 entries");
    debug_assert_ne!(seed1, seed2, "seeds must be distinct entries");
    let cap = max_entries - max_entries / 2;

    let mut group1: Vec<Entry> = Vec::with_capacity(max_entries);
    let mut group2: Vec<Entry> = Vec::with_capacity(max_entries);
    let mut rest: Vec<Entry> = Vec::with_capacity(entries.len() - 2);
    let mut mbr1: Option<BoundingBox> = None;
    let mut mbr2: Option<BoundingBox> = None;
    for (i, e) in entries.into_iter().enumerate() {
        if i == seed1 {
            mbr1 = Some(e.mbr.clone());
            group1.push(e);
        } else if i == seed2 {
            mbr2 = Some(e.mbr.clone());
            group2.push(e);
        } else {
            rest.push(e);
        }
    }
    let mut mbr1 = mbr1.expect("seed1 within entry list");
    let mut mbr2 = mbr2.expect("seed2 within entry list");

    // `Some(true)` sends every remaining entry to group1.
    let mut forced: Option<bool> = None;
    for e in rest {
        if forced.is_none() {
            if group1.len() >= cap {
                forced = Some(false);
            } else if group2.len() >= cap {
                forced = Some(true);
            }
        }
        let take1 = if let Some(take1) = forced {
            take1
        } else {
            let union1 = BoundingBox::union(&mbr1, &e.mbr);
            let union2 = BoundingBox::union(&mbr2, &e.mbr);
            let enlargement1 = union1.area() - mbr1.area();
            let enlargement2 = union2.area() - mbr2.area();
            match enlargement1.cmp(&enlargement2) {
                Ordering::Less => true,
                Ordering::Greater => false,
                Ordering::Equal => match union1.area().cmp(&union2.area()) {
                    Ordering::Less => true,
                    Ordering::Greater => false,
                    Ordering::Equal => match group1.len().cmp(&group2.len()) {
                        Ordering::Less => true,
                        Ordering::Greater => false,
                        Ordering::Equal => prefer(&mbr1, &mbr2),
                    },
                },
            }
        };
        if take1 {
            mbr1.union_with(&e.mbr);
            group1.push(e);
        } else {
            mbr2.union_with(&e.mbr);
            group2.push(e);
        }
    }

    debug_assert!(group1.len() >= max_entries / 2, "group1 under minimum fill");
    debug_assert!(group2.len() >= max_entries / 2, "group2 under minimum fill");
    (group1, group2)
}
