// Copyright The Sashtree Authors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The node arena.
//!
//! Nodes are owned by a [`NodeMap`] and refer to each other through
//! [`NodeId`] handles. Ownership flows downward through the child handles
//! stored in each split; the `parent` handle is a non-owning back reference
//! that must be updated whenever a node is reattached.

use std::ops::{Index, IndexMut};

use slotmap::{SlotMap, new_key_type};

use super::geometry::Rect;
use super::node::{LayoutNode, Split};

new_key_type! {
    /// Handle to a node of a [`LayoutTree`][super::LayoutTree].
    ///
    /// Handles of removed nodes are never reused for a different node.
    pub struct NodeId;

    /// Handle to the sash owned by one split.
    pub struct SashId;
}

#[derive(Debug, Clone)]
pub(super) struct Node {
    pub(super) parent: Option<NodeId>,
    /// The rectangle assigned by the last layout pass.
    pub(super) bounds: Rect,
    pub(super) kind: LayoutNode,
}

#[derive(Default, Debug, Clone)]
pub(super) struct NodeMap {
    nodes: SlotMap<NodeId, Node>,
}

impl NodeMap {
    pub(super) fn insert(&mut self, kind: LayoutNode) -> NodeId {
        self.nodes.insert(Node { parent: None, bounds: Rect::ZERO, kind })
    }

    pub(super) fn remove(&mut self, node: NodeId) -> Option<Node> {
        self.nodes.remove(node)
    }

    pub(super) fn get(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node)
    }

    pub(super) fn get_mut(&mut self, node: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(node)
    }

    pub(super) fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    pub(super) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(super) fn split(&self, node: NodeId) -> Option<&Split> {
        match &self.nodes.get(node)?.kind {
            LayoutNode::Split(split) => Some(split),
            LayoutNode::Leaf(_) => None,
        }
    }

    pub(super) fn split_mut(&mut self, node: NodeId) -> Option<&mut Split> {
        match &mut self.nodes.get_mut(node)?.kind {
            LayoutNode::Split(split) => Some(split),
            LayoutNode::Leaf(_) => None,
        }
    }

    /// Makes `child` a child of `parent` in place of `old`, or the detached
    /// top of its own tree if `parent` is `None`.
    pub(super) fn reattach(&mut self, child: NodeId, parent: Option<NodeId>, old: Option<NodeId>) {
        self[child].parent = parent;
        if let (Some(parent), Some(old)) = (parent, old) {
            let replaced = self.split_mut(parent).is_some_and(|split| split.replace_child(old, child));
            debug_assert!(replaced, "{old:?} is not a child of {parent:?}");
        }
    }
}

impl Index<NodeId> for NodeMap {
    type Output = Node;

    fn index(&self, node: NodeId) -> &Node {
        &self.nodes[node]
    }
}

impl IndexMut<NodeId> for NodeMap {
    fn index_mut(&mut self, node: NodeId) -> &mut Node {
        &mut self.nodes[node]
    }
}

impl NodeId {
    pub(super) fn parent(self, map: &NodeMap) -> Option<NodeId> {
        map.get(self)?.parent
    }

    /// The children of a split, first then second. Leaves have none.
    pub(super) fn children(self, map: &NodeMap) -> impl Iterator<Item = NodeId> + use<> {
        let pair = map.split(self).map(|split| [split.left(), split.right()]);
        pair.into_iter().flatten()
    }

    pub(super) fn is_leaf(self, map: &NodeMap) -> bool {
        map.get(self).is_some_and(|node| matches!(node.kind, LayoutNode::Leaf(_)))
    }

    /// Strict ancestors, nearest first.
    pub(super) fn ancestors(self, map: &NodeMap) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(map), move |&node| node.parent(map))
    }

    /// Visits this node and its descendants, parents before children and
    /// first children before second.
    pub(super) fn traverse_preorder(self, map: &NodeMap) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            if let Some(split) = map.split(node) {
                stack.push(split.right());
                stack.push(split.left());
            }
            Some(node)
        })
    }

    /// Visits descendants before their parents.
    pub(super) fn traverse_postorder(self, map: &NodeMap) -> impl Iterator<Item = NodeId> + use<> {
        let mut out = Vec::new();
        let mut pending: Vec<(NodeId, usize)> = vec![(self, 0)];
        while let Some((node, visited)) = pending.pop() {
            let children: Vec<_> = node.children(map).collect();
            if visited < children.len() {
                pending.push((node, visited + 1));
                pending.push((children[visited], 0));
            } else {
                out.push(node);
            }
        }
        out.into_iter()
    }
}
