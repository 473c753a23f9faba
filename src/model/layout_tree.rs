// Copyright The Sashtree Authors
// SPDX-License-Identifier: MIT OR Apache-2.0

use slotmap::SlotMap;
use tracing::{debug, trace};

use super::geometry::{Axis, Orientation, Point, Rect, split_rect};
use super::node::{self, LayoutNode, Leaf, Split, is_valid_ratio};
use super::panel::{PanelHost, Payload};
use super::sash::{RatioLimits, Sash, clamp_drag, ratio_at};
use super::tree::{NodeId, NodeMap, SashId};

pub const DEFAULT_SASH_THICKNESS: i32 = 4;

/// A binary tree of splits partitioning a rectangle among panels.
///
/// Every split has exactly two children and owns one [`Sash`]. Leaves hold a
/// [`Payload`]; a payload appears in at most one leaf. All structural
/// operations keep the tree binary: inserting beside a leaf replaces it with a
/// new split, and removing a leaf collapses its parent split into the
/// remaining sibling.
#[derive(Debug, Clone)]
pub struct LayoutTree {
    nodes: NodeMap,
    sashes: SlotMap<SashId, Sash>,
    root: Option<NodeId>,
    /// A leaf currently given the whole container.
    zoomed: Option<NodeId>,
    /// The rectangle passed to the last full layout.
    bounds: Option<Rect>,
    sash_thickness: i32,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("ratio {0} is outside [0, 1]")]
    RatioOutOfRange(f64),
    #[error("{0} is already in the layout")]
    DuplicatePayload(Payload),
}

/// The nearest sash on each side of a node.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sashes {
    pub left: Option<SashId>,
    pub right: Option<SashId>,
    pub top: Option<SashId>,
    pub bottom: Option<SashId>,
}

impl Sashes {
    /// The sash on the leading side for `orientation`.
    pub fn before(&self, orientation: Orientation) -> Option<SashId> {
        match orientation {
            Orientation::Vertical => self.left,
            Orientation::Horizontal => self.top,
        }
    }

    /// The sash on the trailing side for `orientation`.
    pub fn after(&self, orientation: Orientation) -> Option<SashId> {
        match orientation {
            Orientation::Vertical => self.right,
            Orientation::Horizontal => self.bottom,
        }
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::with_sash_thickness(DEFAULT_SASH_THICKNESS)
    }

    pub fn with_sash_thickness(sash_thickness: i32) -> Self {
        LayoutTree {
            nodes: NodeMap::default(),
            sashes: SlotMap::with_key(),
            root: None,
            zoomed: None,
            bounds: None,
            sash_thickness: sash_thickness.max(0),
        }
    }

    pub fn sash_thickness(&self) -> i32 {
        self.sash_thickness
    }

    /// Changes the sash thickness. Takes effect on the next layout.
    pub fn set_sash_thickness(&mut self, sash_thickness: i32) {
        self.sash_thickness = sash_thickness.max(0);
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn node(&self, node: NodeId) -> Option<&LayoutNode> {
        self.nodes.get(node).map(|n| &n.kind)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        node.parent(&self.nodes)
    }

    pub fn split(&self, node: NodeId) -> Option<&Split> {
        self.nodes.split(node)
    }

    pub fn payload(&self, node: NodeId) -> Option<Payload> {
        match self.node(node)? {
            LayoutNode::Leaf(leaf) => Some(leaf.payload()),
            LayoutNode::Split(_) => None,
        }
    }

    pub fn sash(&self, sash: SashId) -> Option<&Sash> {
        self.sashes.get(sash)
    }

    /// The rectangle assigned to `node` by the last layout.
    ///
    /// For a split this is the union of its children's rectangles and its
    /// sash.
    pub fn bounds(&self, node: NodeId) -> Option<Rect> {
        self.nodes.get(node).map(|n| n.bounds)
    }

    /// Every leaf, first children before second.
    pub fn leaves(&self) -> Vec<(NodeId, Payload)> {
        let Some(root) = self.root else { return vec![] };
        root.traverse_preorder(&self.nodes)
            .filter_map(|node| Some((node, self.payload(node)?)))
            .collect()
    }

    /// Every split with its node, parents before children.
    pub fn splits(&self) -> Vec<(NodeId, Split)> {
        let Some(root) = self.root else { return vec![] };
        root.traverse_preorder(&self.nodes)
            .filter_map(|node| Some((node, *self.nodes.split(node)?)))
            .collect()
    }

    /// Lays the whole tree out inside `rect`.
    pub fn set_bounds(&mut self, rect: Rect, host: &mut impl PanelHost) {
        self.bounds = Some(rect);
        let Some(root) = self.root else { return };
        match self.zoomed {
            Some(zoomed) => {
                self.layout_node(root, rect.collapsed(), host);
                self.layout_node(zoomed, rect, host);
            }
            None => self.layout_node(root, rect, host),
        }
    }

    /// Repeats the last layout, e.g. after a ratio changed.
    pub fn relayout(&mut self, host: &mut impl PanelHost) {
        if let Some(rect) = self.bounds {
            self.set_bounds(rect, host);
        }
    }

    fn layout_node(&mut self, node: NodeId, rect: Rect, host: &mut impl PanelHost) {
        let Some(entry) = self.nodes.get_mut(node) else {
            debug_assert!(false, "laying out missing node {node:?}");
            return;
        };
        entry.bounds = rect;
        let split = match &entry.kind {
            LayoutNode::Leaf(leaf) => {
                if let Payload::Panel(id) = leaf.payload() {
                    host.set_bounds(id, rect);
                }
                return;
            }
            LayoutNode::Split(split) => *split,
        };

        let left_visible = node::is_visible(&self.nodes, split.left());
        let right_visible = node::is_visible(&self.nodes, split.right());
        let (first, sash, second) = match (left_visible, right_visible) {
            _ if rect.width == 0 && rect.height == 0 => (rect, rect, rect),
            (true, false) => (rect, rect.collapsed(), rect.collapsed()),
            (false, true) => (rect.collapsed(), rect.collapsed(), rect),
            _ => {
                let parts = split_rect(rect, split.orientation(), split.ratio(), self.sash_thickness);
                (parts.first, parts.sash, parts.second)
            }
        };
        if let Some(s) = self.sashes.get_mut(split.sash()) {
            s.set_bounds(sash);
        }
        self.layout_node(split.left(), first, host);
        self.layout_node(split.right(), second, host);
    }

    pub fn minimum_width(&self, node: NodeId, host: &impl PanelHost) -> i32 {
        node::minimum_extent(&self.nodes, node, Axis::X, host, self.sash_thickness)
    }

    pub fn minimum_height(&self, node: NodeId, host: &impl PanelHost) -> i32 {
        node::minimum_extent(&self.nodes, node, Axis::Y, host, self.sash_thickness)
    }

    pub fn find(&self, payload: Payload) -> Option<NodeId> {
        node::find(&self.nodes, self.root?, payload)
    }

    /// The split owning `sash`, or `None` if the sash was discarded.
    pub fn find_sash(&self, sash: SashId) -> Option<NodeId> {
        let found = node::find_sash(&self.nodes, self.root?, sash);
        debug_assert_eq!(
            found,
            self.sashes.get(sash).map(|s| s.node()),
            "sash {sash:?} is out of sync with its split"
        );
        found
    }

    pub fn find_bottom_right(&self) -> Option<Payload> {
        node::find_bottom_right(&self.nodes, self.root?)
    }

    /// The nearest enclosing sash on each side of the leaf holding `payload`.
    pub fn find_sashes(&self, payload: Payload) -> Sashes {
        match self.find(payload) {
            Some(node) => self.enclosing_sashes(node),
            None => Sashes::default(),
        }
    }

    fn enclosing_sashes(&self, node: NodeId) -> Sashes {
        let mut sashes = Sashes::default();
        let mut child = node;
        for ancestor in node.ancestors(&self.nodes) {
            if let Some(split) = self.nodes.split(ancestor) {
                let slot = match (split.orientation(), split.is_left_child(child)) {
                    (Orientation::Vertical, true) => &mut sashes.right,
                    (Orientation::Vertical, false) => &mut sashes.left,
                    (Orientation::Horizontal, true) => &mut sashes.bottom,
                    (Orientation::Horizontal, false) => &mut sashes.top,
                };
                slot.get_or_insert(split.sash());
            }
            child = ancestor;
        }
        sashes
    }

    /// Links every sash to the nearest enclosing sashes of the same
    /// orientation on either side.
    pub fn update_sash_limits(&mut self) {
        for (node, split) in self.splits() {
            let enclosing = self.enclosing_sashes(node);
            if let Some(sash) = self.sashes.get_mut(split.sash()) {
                sash.pre_limit = enclosing.before(split.orientation());
                sash.post_limit = enclosing.after(split.orientation());
            }
        }
    }

    /// Inserts a new leaf holding `payload`.
    ///
    /// The leaf is placed beside the leaf holding `relative_to` (or beside the
    /// whole tree if there is no such leaf) under a new split with the given
    /// orientation. If `left` is true the new leaf is the first child. `ratio`
    /// is the first child's share.
    pub fn insert(
        &mut self,
        payload: Payload,
        left: bool,
        orientation: Orientation,
        ratio: f64,
        relative_to: Option<Payload>,
    ) -> Result<NodeId, LayoutError> {
        if !is_valid_ratio(ratio) {
            return Err(LayoutError::RatioOutOfRange(ratio));
        }
        if self.find(payload).is_some() {
            return Err(LayoutError::DuplicatePayload(payload));
        }
        self.zoom_out();

        let leaf = self.nodes.insert(LayoutNode::Leaf(Leaf::new(payload)));
        let Some(root) = self.root else {
            self.root = Some(leaf);
            return Ok(leaf);
        };
        let target = match relative_to.and_then(|r| self.find(r)) {
            Some(node) => node,
            None => {
                if let Some(relative) = relative_to {
                    debug!(%relative, "Reference not found; inserting beside the whole tree");
                }
                root
            }
        };

        let parent = self.nodes[target].parent;
        let sash = self.sashes.insert(Sash::new(NodeId::default(), orientation));
        let (first, second) = if left { (leaf, target) } else { (target, leaf) };
        let split = self.nodes.insert(LayoutNode::Split(Split::new(
            orientation,
            ratio,
            first,
            second,
            sash,
        )));
        self.sashes[sash].attach(split);
        self.nodes.reattach(split, parent, Some(target));
        self.nodes.reattach(first, Some(split), None);
        self.nodes.reattach(second, Some(split), None);
        if parent.is_none() {
            self.root = Some(split);
        }
        trace!(%payload, ?split, "Inserted");
        Ok(leaf)
    }

    /// Removes the leaf holding `payload`, collapsing its parent split into
    /// the sibling. Returns false if there was no such leaf.
    pub fn remove(&mut self, payload: Payload) -> bool {
        let Some(leaf) = self.find(payload) else {
            return false;
        };
        self.zoom_out();
        let parent = self.nodes[leaf].parent;
        self.nodes.remove(leaf);
        let Some(parent) = parent else {
            self.root = None;
            return true;
        };
        let Some(split) = self.nodes.split(parent).copied() else {
            debug_assert!(false, "parent {parent:?} of a leaf is not a split");
            return true;
        };
        let sibling = split.sibling(leaf);
        let grandparent = self.nodes[parent].parent;
        self.sashes.remove(split.sash());
        self.nodes.remove(parent);
        self.nodes.reattach(sibling, grandparent, Some(parent));
        if grandparent.is_none() {
            self.root = Some(sibling);
        }
        trace!(%payload, "Removed");
        true
    }

    /// Swaps the payload of a leaf without changing the tree's shape.
    pub fn replace(&mut self, old: Payload, new: Payload) -> bool {
        if old == new {
            return self.find(old).is_some();
        }
        if self.find(new).is_some() {
            return false;
        }
        let Some(node) = self.find(old) else {
            return false;
        };
        self.zoom_out();
        if let LayoutNode::Leaf(leaf) = &mut self.nodes[node].kind {
            leaf.set_payload(new);
        }
        true
    }

    /// Sets the ratio of a split. Values outside `[0, 1]` are rejected.
    pub fn set_ratio(&mut self, node: NodeId, ratio: f64) -> bool {
        self.nodes.split_mut(node).is_some_and(|split| split.set_ratio(ratio))
    }

    /// Recomputes every split's ratio from its children's current bounds, so
    /// stored ratios match what is on screen.
    pub fn recompute_ratio(&mut self) {
        let Some(root) = self.root else { return };
        for node in root.traverse_postorder(&self.nodes) {
            let Some(split) = self.nodes.split(node).copied() else { continue };
            if !node::is_visible(&self.nodes, split.left())
                || !node::is_visible(&self.nodes, split.right())
            {
                continue;
            }
            let axis = split.orientation().axis();
            let first = self.nodes[split.left()].bounds.extent(axis);
            let second = self.nodes[split.right()].bounds.extent(axis);
            let extent = first + self.sash_thickness + second;
            if extent <= 0 {
                continue;
            }
            let ratio = f64::from(first + self.sash_thickness / 2) / f64::from(extent);
            if !self.set_ratio(node, ratio) {
                trace!(?node, ratio, "Keeping ratio; recomputed value out of range");
            }
        }
    }

    /// Whether the tree shows at least one materialized panel.
    pub fn is_visible(&self) -> bool {
        self.root.is_some_and(|root| node::is_visible(&self.nodes, root))
    }

    /// Whether `sash` currently separates two visible children.
    pub fn is_sash_visible(&self, sash: SashId) -> bool {
        if self.zoomed.is_some() {
            return false;
        }
        let Some(split) = self.sashes.get(sash).and_then(|s| self.nodes.split(s.node())) else {
            return false;
        };
        node::is_visible(&self.nodes, split.left()) && node::is_visible(&self.nodes, split.right())
    }

    /// Gives the leaf holding `payload` the whole container until
    /// [`zoom_out`][Self::zoom_out] or the next structural change.
    pub fn zoom_in(&mut self, payload: Payload) -> bool {
        if self.zoomed.is_some() || payload.is_placeholder() {
            return false;
        }
        let Some(node) = self.find(payload) else {
            return false;
        };
        debug_assert!(node.is_leaf(&self.nodes));
        self.zoomed = Some(node);
        true
    }

    pub fn zoom_out(&mut self) -> bool {
        self.zoomed.take().is_some()
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed.is_some()
    }

    pub fn zoomed(&self) -> Option<Payload> {
        self.payload(self.zoomed?)
    }

    fn sash_split(&self, sash: SashId) -> Option<(NodeId, Split)> {
        let node = self.sashes.get(sash)?.node();
        let split = *self.nodes.split(node)?;
        debug_assert_eq!(split.sash(), sash);
        (split.sash() == sash).then_some((node, split))
    }

    /// Starts a drag gesture on `sash`. Returns false if the sash no longer
    /// exists.
    pub fn begin_drag(&mut self, sash: SashId, point: Point) -> bool {
        if self.sash_split(sash).is_none() {
            return false;
        }
        trace!(?sash, ?point, "Begin drag");
        self.sashes[sash].begin();
        true
    }

    /// Clamps a drag position for `sash`, or returns `None` if no gesture is
    /// active on it.
    ///
    /// The content limits are computed from the children's minimum sizes on
    /// the first move of a gesture and reused for the rest of it, even if a
    /// panel's minimum size changes mid-drag.
    pub fn drag_move(
        &mut self,
        sash: SashId,
        point: Point,
        respect_minimums: bool,
        host: &impl PanelHost,
    ) -> Option<Point> {
        let (node, split) = self.sash_split(sash)?;
        if !self.sashes[sash].is_dragging() {
            return None;
        }
        let bounds = self.nodes[node].bounds;
        let mut limits = None;
        if respect_minimums {
            let nodes = &self.nodes;
            let thickness = self.sash_thickness;
            let axis = split.orientation().axis();
            limits = Some(self.sashes[sash].limits_or_insert_with(|| {
                RatioLimits::for_minimums(
                    node::minimum_extent(nodes, split.left(), axis, host, thickness),
                    node::minimum_extent(nodes, split.right(), axis, host, thickness),
                    bounds.extent(axis),
                    thickness,
                )
            }));
        }
        Some(clamp_drag(point, split.orientation(), bounds, limits, self.sash_thickness))
    }

    /// Ends the gesture on `sash`, committing the ratio that puts the sash at
    /// `point` and laying the whole tree out again.
    ///
    /// Returns the committed ratio, or `None` if there was no gesture or the
    /// ratio fell outside `[0, 1]`, in which case the old ratio is kept.
    pub fn end_drag(&mut self, sash: SashId, point: Point, host: &mut impl PanelHost) -> Option<f64> {
        let (node, split) = self.sash_split(sash)?;
        if !self.sashes[sash].is_dragging() {
            return None;
        }
        self.sashes[sash].finish();
        let bounds = self.nodes[node].bounds;
        let ratio = ratio_at(point, split.orientation(), bounds, self.sash_thickness)?;
        if !self.set_ratio(node, ratio) {
            debug!(?sash, ratio, "Rejecting drag outside the split");
            return None;
        }
        self.relayout(host);
        Some(ratio)
    }

    /// Abandons the gesture on `sash` without changing its ratio.
    pub fn cancel_drag(&mut self, sash: SashId) -> bool {
        match self.sashes.get_mut(sash) {
            Some(s) if s.is_dragging() => {
                s.finish();
                true
            }
            _ => false,
        }
    }

    pub fn draw_tree(&self) -> String {
        let Some(root) = self.root else {
            return String::from("<empty>");
        };
        let mut out = String::new();
        _ = ascii_tree::write_tree(&mut out, &self.draw_node(root));
        if let Some(zoomed) = self.zoomed() {
            out.push_str(&format!("zoomed: {zoomed}\n"));
        }
        out
    }

    fn draw_node(&self, node: NodeId) -> ascii_tree::Tree {
        let bounds = self.nodes[node].bounds;
        match &self.nodes[node].kind {
            LayoutNode::Leaf(leaf) => {
                ascii_tree::Tree::Leaf(vec![format!("{} {bounds:?}", leaf.payload())])
            }
            LayoutNode::Split(split) => ascii_tree::Tree::Node(
                format!("{:?} {:.3} {bounds:?}", split.orientation(), split.ratio()),
                vec![self.draw_node(split.left()), self.draw_node(split.right())],
            ),
        }
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        use crate::collections::HashSet;

        let Some(root) = self.root else {
            assert_eq!(self.nodes.len(), 0, "empty tree with dangling nodes");
            assert_eq!(self.sashes.len(), 0, "empty tree with dangling sashes");
            return;
        };
        assert_eq!(root.parent(&self.nodes), None);
        let mut payloads = HashSet::default();
        let mut reachable = 0;
        let mut splits = 0;
        for node in root.traverse_preorder(&self.nodes) {
            reachable += 1;
            for child in node.children(&self.nodes) {
                assert!(self.nodes.contains(child), "{node:?} has a missing child");
                assert_eq!(child.parent(&self.nodes), Some(node));
            }
            match &self.nodes[node].kind {
                LayoutNode::Leaf(leaf) => {
                    assert!(payloads.insert(leaf.payload()), "duplicate {}", leaf.payload());
                }
                LayoutNode::Split(split) => {
                    splits += 1;
                    assert_ne!(split.left(), split.right());
                    assert!(is_valid_ratio(split.ratio()));
                    assert_eq!(self.sashes[split.sash()].node(), node);
                    assert_eq!(self.sashes[split.sash()].orientation(), split.orientation());
                }
            }
        }
        assert_eq!(reachable, self.nodes.len(), "unreachable nodes");
        assert_eq!(splits, self.sashes.len(), "orphaned sashes");
        if let Some(zoomed) = self.zoomed {
            assert!(zoomed.is_leaf(&self.nodes));
        }
    }
}
