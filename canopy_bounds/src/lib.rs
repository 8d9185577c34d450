// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Bounds: axis-aligned bounding boxes with a runtime dimension.
//!
//! A [`BoundingBox`] stores per-axis low/high bounds over `i64` coordinates.
//! The dimension is chosen at construction time rather than in the type, so
//! the same box works for 2D map data and higher-dimensional feature spaces.
//!
//! Area and extent arithmetic is widened to `i128`, and area products
//! saturate at the `i128` range, so ranking boxes by area never overflows
//! even for boxes spanning most of the `i64` domain on several axes.
//!
//! # Example
//!
//! ```rust
//! use canopy_bounds::BoundingBox;
//!
//! let a = BoundingBox::new(&[0, 0], &[4, 2]);
//! let b = BoundingBox::new(&[2, 1], &[6, 5]);
//! assert_eq!(a.area(), 8);
//! assert!(a.intersects(&b));
//!
//! let u = BoundingBox::union(&a, &b);
//! assert_eq!((u.low(0), u.high(0)), (0, 6));
//! assert_eq!((u.low(1), u.high(1)), (0, 5));
//! ```
//!
//! Degenerate boxes (points) are first-class: [`BoundingBox::from_point`]
//! builds a box whose low and high bounds coincide on every axis, with area 0.

#![no_std]

use core::fmt;

use smallvec::SmallVec;

/// Inline capacity covers the common 2–4 dimension case without allocating.
type Bounds = SmallVec<[i64; 4]>;

/// Axis-aligned bounding box over `i64` coordinates with a runtime dimension.
///
/// Invariant: `low(i) <= high(i)` for every axis. Constructors check this in
/// debug builds.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    lo: Bounds,
    hi: Bounds,
}

impl BoundingBox {
    /// Create a box from per-axis low and high bounds.
    ///
    /// `lo` and `hi` must have the same length and satisfy `lo[i] <= hi[i]`
    /// on every axis. Debug builds assert both.
    pub fn new(lo: &[i64], hi: &[i64]) -> Self {
        debug_assert_eq!(lo.len(), hi.len(), "low/high bounds must agree on dimension");
        debug_assert!(
            lo.iter().zip(hi).all(|(l, h)| l <= h),
            "low bound above high bound"
        );
        Self {
            lo: SmallVec::from_slice(lo),
            hi: SmallVec::from_slice(hi),
        }
    }

    /// Create a degenerate (zero-extent) box for a point coordinate.
    pub fn from_point(point: &[i64]) -> Self {
        Self {
            lo: SmallVec::from_slice(point),
            hi: SmallVec::from_slice(point),
        }
    }

    /// Number of dimensions.
    #[inline]
    pub fn dim(&self) -> usize {
        self.lo.len()
    }

    /// Low bound on axis `axis`.
    #[inline]
    pub fn low(&self, axis: usize) -> i64 {
        self.lo[axis]
    }

    /// High bound on axis `axis`.
    #[inline]
    pub fn high(&self, axis: usize) -> i64 {
        self.hi[axis]
    }

    /// Extent on axis `axis`, widened to `i128`.
    #[inline]
    pub fn extent(&self, axis: usize) -> i128 {
        i128::from(self.hi[axis]) - i128::from(self.lo[axis])
    }

    /// Area (product of per-axis extents) in `i128`, saturating at
    /// `i128::MAX`.
    ///
    /// Degenerate boxes have area 0, as does any box with a zero extent on
    /// at least one axis.
    pub fn area(&self) -> i128 {
        (0..self.dim()).map(|axis| self.extent(axis)).fold(1, i128::saturating_mul)
    }

    /// Grow this box in place to the minimal box containing both operands.
    pub fn union_with(&mut self, other: &Self) {
        debug_assert_eq!(self.dim(), other.dim(), "union across dimensions");
        for axis in 0..self.dim() {
            self.lo[axis] = self.lo[axis].min(other.lo[axis]);
            self.hi[axis] = self.hi[axis].max(other.hi[axis]);
        }
    }

    /// The minimal box containing both operands.
    pub fn union(a: &Self, b: &Self) -> Self {
        let mut out = a.clone();
        out.union_with(b);
        out
    }

    /// Whether the two boxes overlap on every axis.
    ///
    /// Intervals are closed, so boxes that merely touch on a boundary count
    /// as intersecting, and a degenerate box intersects any box containing
    /// its point.
    pub fn intersects(&self, other: &Self) -> bool {
        debug_assert_eq!(self.dim(), other.dim(), "intersection across dimensions");
        (0..self.dim()).all(|axis| self.lo[axis] <= other.hi[axis] && other.lo[axis] <= self.hi[axis])
    }
}

impl fmt::Debug for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoundingBox(")?;
        for axis in 0..self.dim() {
            if axis != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}..{}", self.lo[axis], self.hi[axis])?;
        }
        write!(f, ")")
    }
}
