// Copyright The Sashtree Authors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Leaf and split nodes, and the recursive queries over them.

use super::geometry::{Axis, Orientation};
use super::panel::{PanelHost, Payload};
use super::tree::{NodeId, NodeMap, SashId};

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutNode {
    Leaf(Leaf),
    Split(Split),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    payload: Payload,
}

impl Leaf {
    pub fn new(payload: Payload) -> Self {
        Leaf { payload }
    }

    pub fn payload(&self) -> Payload {
        self.payload
    }

    pub(super) fn set_payload(&mut self, payload: Payload) {
        self.payload = payload;
    }
}

/// An internal node dividing its rectangle between two children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split {
    orientation: Orientation,
    /// Share of the split's extent given to the first child, in `[0, 1]`.
    ratio: f64,
    left: NodeId,
    right: NodeId,
    sash: SashId,
}

impl Split {
    pub(super) fn new(
        orientation: Orientation,
        ratio: f64,
        left: NodeId,
        right: NodeId,
        sash: SashId,
    ) -> Self {
        debug_assert!(is_valid_ratio(ratio), "ratio {ratio} out of range");
        Split { orientation, ratio, left, right, sash }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// The first (left or top) child.
    pub fn left(&self) -> NodeId {
        self.left
    }

    /// The second (right or bottom) child.
    pub fn right(&self) -> NodeId {
        self.right
    }

    pub fn sash(&self) -> SashId {
        self.sash
    }

    /// Sets the ratio, rejecting values outside `[0, 1]`.
    pub(super) fn set_ratio(&mut self, ratio: f64) -> bool {
        if !is_valid_ratio(ratio) {
            return false;
        }
        self.ratio = ratio;
        true
    }

    pub(super) fn is_left_child(&self, child: NodeId) -> bool {
        self.left == child
    }

    pub(super) fn sibling(&self, child: NodeId) -> NodeId {
        if self.left == child { self.right } else { self.left }
    }

    pub(super) fn replace_child(&mut self, old: NodeId, new: NodeId) -> bool {
        if self.left == old {
            self.left = new;
        } else if self.right == old {
            self.right = new;
        } else {
            return false;
        }
        true
    }
}

pub fn is_valid_ratio(ratio: f64) -> bool {
    (0.0..=1.0).contains(&ratio)
}

/// A node is visible if it contains at least one materialized panel.
pub(super) fn is_visible(map: &NodeMap, node: NodeId) -> bool {
    match map.get(node).map(|n| &n.kind) {
        Some(LayoutNode::Leaf(leaf)) => !leaf.payload.is_placeholder(),
        Some(LayoutNode::Split(split)) => is_visible(map, split.left) || is_visible(map, split.right),
        None => false,
    }
}

/// The smallest extent along `axis` that fits the minimum sizes of every
/// visible panel under `node`.
pub(super) fn minimum_extent(
    map: &NodeMap,
    node: NodeId,
    axis: Axis,
    host: &impl PanelHost,
    sash_thickness: i32,
) -> i32 {
    match map.get(node).map(|n| &n.kind) {
        Some(LayoutNode::Leaf(leaf)) => match leaf.payload {
            Payload::Panel(id) => host.minimum_extent(id, axis),
            Payload::Placeholder(_) => 0,
        },
        Some(LayoutNode::Split(split)) => {
            let left_visible = is_visible(map, split.left);
            let right_visible = is_visible(map, split.right);
            let left = minimum_extent(map, split.left, axis, host, sash_thickness);
            let right = minimum_extent(map, split.right, axis, host, sash_thickness);
            match (left_visible, right_visible) {
                (true, false) => left,
                (false, true) => right,
                (false, false) => 0,
                (true, true) if split.orientation.axis() == axis => left + right + sash_thickness,
                (true, true) => left.max(right),
            }
        }
        None => 0,
    }
}

/// Finds the leaf holding `payload`, searching first children first.
pub(super) fn find(map: &NodeMap, node: NodeId, payload: Payload) -> Option<NodeId> {
    match &map.get(node)?.kind {
        LayoutNode::Leaf(leaf) => (leaf.payload == payload).then_some(node),
        LayoutNode::Split(split) => {
            find(map, split.left, payload).or_else(|| find(map, split.right, payload))
        }
    }
}

/// Finds the split owning `sash`.
pub(super) fn find_sash(map: &NodeMap, node: NodeId, sash: SashId) -> Option<NodeId> {
    match &map.get(node)?.kind {
        LayoutNode::Leaf(_) => None,
        LayoutNode::Split(split) if split.sash == sash => Some(node),
        LayoutNode::Split(split) => {
            find_sash(map, split.left, sash).or_else(|| find_sash(map, split.right, sash))
        }
    }
}

/// The leaf reached by always preferring the visible second child.
pub(super) fn find_bottom_right(map: &NodeMap, node: NodeId) -> Option<Payload> {
    match &map.get(node)?.kind {
        LayoutNode::Leaf(leaf) => Some(leaf.payload),
        LayoutNode::Split(split) if is_visible(map, split.right) => {
            find_bottom_right(map, split.right)
        }
        LayoutNode::Split(split) => find_bottom_right(map, split.left),
    }
}
