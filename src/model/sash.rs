// Copyright The Sashtree Authors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The interactive drag handle between the two children of a split.
//!
//! A drag gesture runs `begin -> move* -> end`, or is cancelled. Positions
//! passed in and out are the leading (left/top) edge of the sash along its
//! split axis, which is what a toolkit reports when it moves a sash control.
//! The ratio is only committed when the gesture ends.

use super::geometry::{Orientation, Point, Rect};
use super::tree::{NodeId, SashId};

#[derive(Debug, Clone)]
pub struct Sash {
    node: NodeId,
    orientation: Orientation,
    /// Where the last layout pass placed the sash.
    bounds: Rect,
    dragging: bool,
    /// Computed on the first move of a gesture and reused until it ends.
    limits: Option<RatioLimits>,
    pub(super) pre_limit: Option<SashId>,
    pub(super) post_limit: Option<SashId>,
}

/// The allowed window for the sash's leading edge, as fractions of the
/// split's extent measured from its start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RatioLimits {
    pub min: f64,
    pub max: f64,
}

impl RatioLimits {
    pub const UNCONSTRAINED: RatioLimits = RatioLimits { min: 0.0, max: 1.0 };

    /// Limits that keep the first child at least `first_min` and the second
    /// child at least `second_min` wide along the split axis.
    pub fn for_minimums(first_min: i32, second_min: i32, extent: i32, sash_thickness: i32) -> Self {
        if extent <= 0 {
            return RatioLimits::UNCONSTRAINED;
        }
        let extent = f64::from(extent);
        RatioLimits {
            min: f64::from(first_min) / extent,
            max: 1.0 - f64::from(second_min + sash_thickness) / extent,
        }
    }
}

impl Sash {
    pub(super) fn new(node: NodeId, orientation: Orientation) -> Self {
        Sash {
            node,
            orientation,
            bounds: Rect::ZERO,
            dragging: false,
            limits: None,
            pre_limit: None,
            post_limit: None,
        }
    }

    /// The split this sash belongs to.
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn cached_limits(&self) -> Option<RatioLimits> {
        self.limits
    }

    /// The nearest enclosing sash of the same orientation before this one.
    pub fn pre_limit(&self) -> Option<SashId> {
        self.pre_limit
    }

    /// The nearest enclosing sash of the same orientation after this one.
    pub fn post_limit(&self) -> Option<SashId> {
        self.post_limit
    }

    pub(super) fn attach(&mut self, node: NodeId) {
        self.node = node;
    }

    pub(super) fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub(super) fn begin(&mut self) {
        self.dragging = true;
        self.limits = None;
    }

    pub(super) fn limits_or_insert_with(
        &mut self,
        compute: impl FnOnce() -> RatioLimits,
    ) -> RatioLimits {
        *self.limits.get_or_insert_with(compute)
    }

    /// Ends the gesture, committed or not.
    pub(super) fn finish(&mut self) {
        self.dragging = false;
        self.limits = None;
    }
}

/// Clamps a dragged sash position first to the split's own rectangle, then
/// to the content window given by `limits`.
///
/// The split's rectangle spans the leading-edge positions [`ratio_at`] maps
/// into `[0, 1]`, so every clamped position can be committed. When the
/// content window is empty because the split is smaller than its contents'
/// minimum sizes, the second child's minimum wins.
pub fn clamp_drag(
    point: Point,
    orientation: Orientation,
    node_bounds: Rect,
    limits: Option<RatioLimits>,
    sash_thickness: i32,
) -> Point {
    let axis = orientation.axis();
    let start = node_bounds.start(axis);
    let extent = node_bounds.extent(axis).max(0);
    let first = start - sash_thickness / 2;
    let last = first + extent;
    let mut position = point.along(axis).clamp(first, last);
    if let Some(limits) = limits {
        let lo = start + (limits.min * f64::from(extent)).round() as i32;
        let hi = start + (limits.max * f64::from(extent)).round() as i32;
        position = position.max(lo).min(hi).clamp(first, last);
    }
    point.with_along(axis, position)
}

/// The ratio that places the sash's leading edge at `point`, if the split has
/// any extent to divide.
pub fn ratio_at(
    point: Point,
    orientation: Orientation,
    node_bounds: Rect,
    sash_thickness: i32,
) -> Option<f64> {
    let axis = orientation.axis();
    let extent = node_bounds.extent(axis);
    if extent <= 0 {
        return None;
    }
    let split_at = point.along(axis) + sash_thickness / 2;
    Some(f64::from(split_at - node_bounds.start(axis)) / f64::from(extent))
}
