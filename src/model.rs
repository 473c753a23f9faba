// Copyright The Sashtree Authors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! This module defines the [`LayoutTree`] data structure, on which all layout
//! logic is defined.

pub mod geometry;
mod layout_tree;
mod node;
mod panel;
mod relation;
mod sash;
mod tree;

pub use geometry::{Axis, Orientation, Point, Rect, Side};
pub use layout_tree::{DEFAULT_SASH_THICKNESS, LayoutError, LayoutTree, Sashes};
pub use node::{LayoutNode, Leaf, Split, is_valid_ratio};
pub use panel::{PanelFrames, PanelHost, PanelId, Payload};
pub use relation::{Relation, RestoreError};
pub use sash::{RatioLimits, Sash, clamp_drag, ratio_at};
pub use tree::{NodeId, SashId};
