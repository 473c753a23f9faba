// Copyright The Sashtree Authors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integer geometry shared by every layer of the engine.

use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    pub fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn with_along(self, axis: Axis, value: i32) -> Self {
        match axis {
            Axis::X => Point { x: value, ..self },
            Axis::Y => Point { y: value, ..self },
        }
    }
}

/// An axis-aligned rectangle.
///
/// Width and height may be zero or negative when a container is too small to
/// fit its contents; such rectangles are valid inputs and outputs everywhere.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const ZERO: Rect = Rect::new(0, 0, 0, 0);

    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn max_x(&self) -> i32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            i64::from(self.width) * i64::from(self.height)
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.max_x() && point.y >= self.y && point.y < self.max_y()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.max_x()
            && other.x < self.max_x()
            && self.y < other.max_y()
            && other.y < self.max_y()
    }

    /// A zero-size rectangle at this rectangle's origin.
    pub fn collapsed(&self) -> Rect {
        Rect { width: 0, height: 0, ..*self }
    }

    pub fn start(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn extent(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    /// Replaces the span of this rectangle along `axis`.
    pub fn with_span(&self, axis: Axis, start: i32, extent: i32) -> Rect {
        match axis {
            Axis::X => Rect { x: start, width: extent, ..*self },
            Axis::Y => Rect { y: start, height: extent, ..*self },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn cross(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Orientation of a sash.
///
/// A `Vertical` sash is a vertical line, so its split lays the two children
/// out side by side (left/right). A `Horizontal` sash stacks them (top/bottom).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The axis along which a split with this sash divides its rectangle.
    pub fn axis(self) -> Axis {
        match self {
            Orientation::Vertical => Axis::X,
            Orientation::Horizontal => Axis::Y,
        }
    }
}

/// Where a new panel goes relative to a reference panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    pub fn orientation(self) -> Orientation {
        use Side::*;
        match self {
            Left | Right => Orientation::Vertical,
            Top | Bottom => Orientation::Horizontal,
        }
    }

    /// Whether the new panel becomes the first (left/top) child.
    pub fn is_leading(self) -> bool {
        matches!(self, Side::Left | Side::Top)
    }
}

/// The three pieces a split divides its rectangle into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitRects {
    pub first: Rect,
    pub sash: Rect,
    pub second: Rect,
}

/// Divides `rect` along `orientation`'s axis.
///
/// The split coordinate is `start + round(ratio * extent)`; the sash is
/// centred on it and the first child ends where the sash begins. The three
/// extents always sum to the extent of `rect`.
pub fn split_rect(rect: Rect, orientation: Orientation, ratio: f64, thickness: i32) -> SplitRects {
    let axis = orientation.axis();
    let start = rect.start(axis);
    let extent = rect.extent(axis);
    let split_at = start + (ratio * f64::from(extent)).round() as i32;
    let first_extent = split_at - start - thickness / 2;
    let sash_start = start + first_extent;
    let second_start = sash_start + thickness;
    SplitRects {
        first: rect.with_span(axis, start, first_extent),
        sash: rect.with_span(axis, sash_start, thickness),
        second: rect.with_span(axis, second_start, start + extent - second_start),
    }
}
