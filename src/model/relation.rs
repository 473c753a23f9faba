// Copyright The Sashtree Authors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flattening a [`LayoutTree`] into an ordered list of relations and
//! rebuilding it.
//!
//! The first relation names the anchor leaf. Every following relation places
//! `right` to the right of (or below) `left`, which must already be in the
//! tree, under a new split with the given orientation and ratio. Replaying the
//! list in order reproduces the original shape and ratios.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::geometry::Orientation;
use super::layout_tree::{LayoutError, LayoutTree};
use super::panel::Payload;
use super::tree::NodeId;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Relation {
    /// The leaf `right` is placed next to. `None` only for the anchor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Payload>,
    pub right: Payload,
    pub orientation: Orientation,
    /// The ratio of the split created for this relation.
    pub ratio: f64,
}

impl Relation {
    pub fn anchor(payload: Payload) -> Self {
        Relation {
            left: None,
            right: payload,
            orientation: Orientation::Vertical,
            ratio: 0.5,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RestoreError {
    #[error("no relations to restore")]
    Empty,
    #[error("the first relation must not have a left neighbour")]
    FirstEntryAnchored,
    #[error("relation {index} has no left neighbour")]
    Unanchored { index: usize },
    #[error("relation {index} refers to {anchor}, which is not in the layout yet")]
    UnknownAnchor { index: usize, anchor: Payload },
    #[error("relation {index} cannot be applied")]
    Layout {
        index: usize,
        #[source]
        source: LayoutError,
    },
}

impl LayoutTree {
    /// Describes the tree as relations, parents before children.
    ///
    /// Each split contributes one relation between the first leaf of its
    /// first child and the first leaf of its second child. An empty tree
    /// yields no relations.
    pub fn compute_relation(&self) -> Vec<Relation> {
        let Some(root) = self.root() else { return vec![] };
        let Some(anchor) = self.leftmost_leaf(root) else {
            return vec![];
        };
        let mut relations = vec![Relation::anchor(anchor)];
        for (_, split) in self.splits() {
            let (Some(left), Some(right)) =
                (self.leftmost_leaf(split.left()), self.leftmost_leaf(split.right()))
            else {
                debug_assert!(false, "split without leaves");
                continue;
            };
            relations.push(Relation {
                left: Some(left),
                right,
                orientation: split.orientation(),
                ratio: split.ratio(),
            });
        }
        relations
    }

    fn leftmost_leaf(&self, mut node: NodeId) -> Option<Payload> {
        loop {
            match self.split(node) {
                Some(split) => node = split.left(),
                None => return self.payload(node),
            }
        }
    }

    /// Rebuilds a tree from relations produced by
    /// [`compute_relation`][Self::compute_relation].
    pub fn restore(relations: &[Relation], sash_thickness: i32) -> Result<Self, RestoreError> {
        let (first, rest) = relations.split_first().ok_or(RestoreError::Empty)?;
        if first.left.is_some() {
            return Err(RestoreError::FirstEntryAnchored);
        }
        let mut tree = LayoutTree::with_sash_thickness(sash_thickness);
        tree.insert(first.right, false, Orientation::Vertical, 0.5, None)
            .map_err(|source| RestoreError::Layout { index: 0, source })?;
        for (index, relation) in rest.iter().enumerate() {
            let index = index + 1;
            let anchor = relation.left.ok_or(RestoreError::Unanchored { index })?;
            if tree.find(anchor).is_none() {
                return Err(RestoreError::UnknownAnchor { index, anchor });
            }
            tree.insert(relation.right, false, relation.orientation, relation.ratio, Some(anchor))
                .map_err(|source| RestoreError::Layout { index, source })?;
        }
        debug!(relations = relations.len(), "Restored layout");
        Ok(tree)
    }

    /// The relation that placed `payload`, if it is not the anchor.
    pub fn relation_of(&self, payload: Payload) -> Option<Relation> {
        self.compute_relation()
            .into_iter()
            .find(|relation| relation.right == payload && relation.left.is_some())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use test_log::test;

    use super::*;
    use crate::model::geometry::Rect;
    use crate::model::panel::{PanelFrames, PanelId};

    fn panel(id: u64) -> Payload {
        Payload::Panel(PanelId::new(id))
    }

    fn sample() -> LayoutTree {
        let mut tree = LayoutTree::new();
        tree.insert(panel(1), false, Orientation::Vertical, 0.5, None).unwrap();
        tree.insert(panel(2), false, Orientation::Vertical, 0.3, Some(panel(1))).unwrap();
        tree.insert(panel(3), false, Orientation::Horizontal, 0.6, Some(panel(2))).unwrap();
        tree.insert(panel(4), true, Orientation::Horizontal, 0.2, Some(panel(1))).unwrap();
        tree
    }

    #[test]
    fn relations_list_parents_first() {
        let tree = sample();
        let relations = tree.compute_relation();
        assert_eq!(
            relations,
            vec![
                Relation::anchor(panel(4)),
                Relation {
                    left: Some(panel(4)),
                    right: panel(2),
                    orientation: Orientation::Vertical,
                    ratio: 0.3,
                },
                Relation {
                    left: Some(panel(4)),
                    right: panel(1),
                    orientation: Orientation::Horizontal,
                    ratio: 0.2,
                },
                Relation {
                    left: Some(panel(2)),
                    right: panel(3),
                    orientation: Orientation::Horizontal,
                    ratio: 0.6,
                },
            ]
        );
        assert_eq!(LayoutTree::new().compute_relation(), vec![]);
    }

    #[test]
    fn restore_reproduces_layout() {
        let mut tree = sample();
        let mut restored = LayoutTree::restore(&tree.compute_relation(), 4).unwrap();
        restored.check_invariants();
        assert_eq!(restored.compute_relation(), tree.compute_relation());

        let bounds = Rect::new(0, 0, 1000, 700);
        let (mut before, mut after) = (PanelFrames::new(), PanelFrames::new());
        tree.set_bounds(bounds, &mut before);
        restored.set_bounds(bounds, &mut after);
        assert_eq!(before.frames(), after.frames());
    }

    #[test]
    fn random_trees_survive_ron() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut tree = LayoutTree::new();
            for id in 1..=9 {
                let leaves = tree.leaves();
                let relative = (!leaves.is_empty()).then(|| leaves[rng.gen_range(0..leaves.len())].1);
                let orientation =
                    if rng.gen_bool(0.5) { Orientation::Vertical } else { Orientation::Horizontal };
                let payload = if rng.gen_bool(0.2) {
                    Payload::Placeholder(PanelId::new(id))
                } else {
                    panel(id)
                };
                tree.insert(payload, rng.gen_bool(0.5), orientation, rng.gen_range(0.0..=1.0), relative)
                    .unwrap();
            }
            let text = ron::to_string(&tree.compute_relation()).unwrap();
            let relations: Vec<Relation> = ron::from_str(&text).unwrap();
            let restored = LayoutTree::restore(&relations, 4).unwrap();
            restored.check_invariants();
            assert_eq!(restored.compute_relation(), tree.compute_relation(), "seed {seed}");
        }
    }

    #[test]
    fn restore_rejects_malformed_lists() {
        assert_eq!(LayoutTree::restore(&[], 4).unwrap_err(), RestoreError::Empty);

        let anchored = Relation { left: Some(panel(1)), ..Relation::anchor(panel(2)) };
        assert_eq!(
            LayoutTree::restore(&[anchored], 4).unwrap_err(),
            RestoreError::FirstEntryAnchored
        );
        assert_eq!(
            LayoutTree::restore(&[Relation::anchor(panel(1)), Relation::anchor(panel(2))], 4)
                .unwrap_err(),
            RestoreError::Unanchored { index: 1 }
        );
        let dangling = Relation { left: Some(panel(7)), ..Relation::anchor(panel(2)) };
        assert_eq!(
            LayoutTree::restore(&[Relation::anchor(panel(1)), dangling], 4).unwrap_err(),
            RestoreError::UnknownAnchor { index: 1, anchor: panel(7) }
        );
        let duplicate = Relation { left: Some(panel(1)), ..Relation::anchor(panel(1)) };
        assert_eq!(
            LayoutTree::restore(&[Relation::anchor(panel(1)), duplicate], 4).unwrap_err(),
            RestoreError::Layout {
                index: 1,
                source: LayoutError::DuplicatePayload(panel(1)),
            }
        );
    }

    #[test]
    fn relation_of_finds_placing_relation() {
        let tree = sample();
        assert_eq!(tree.relation_of(panel(3)).map(|r| r.left), Some(Some(panel(2))));
        assert_eq!(tree.relation_of(panel(4)), None);
        assert_eq!(tree.relation_of(panel(9)), None);
    }
}
