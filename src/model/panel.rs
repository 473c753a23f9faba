// Copyright The Sashtree Authors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The boundary between the engine and the panels it lays out.
//!
//! The engine never owns or inspects panel content. Each leaf holds a
//! [`Payload`] naming a panel, and everything the engine needs to know about
//! that panel comes through a [`PanelHost`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::{Axis, Rect};
use crate::collections::HashMap;

/// Opaque identifier for a panel, chosen by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(u64);

impl PanelId {
    pub const fn new(raw: u64) -> Self {
        PanelId(raw)
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel#{}", self.0)
    }
}

/// What a leaf holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    /// A materialized panel that receives bounds.
    Panel(PanelId),
    /// Reserves the position of a panel that is not currently materialized,
    /// e.g. a minimized view. Placeholders are invisible and take no space.
    Placeholder(PanelId),
}

impl Payload {
    pub fn is_placeholder(self) -> bool {
        matches!(self, Payload::Placeholder(_))
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Panel(id) => write!(f, "{id}"),
            Payload::Placeholder(id) => write!(f, "placeholder({id})"),
        }
    }
}

/// Callbacks the engine needs from the owner of the panels.
pub trait PanelHost {
    fn minimum_width(&self, panel: PanelId) -> i32;

    fn minimum_height(&self, panel: PanelId) -> i32;

    /// Receives the rectangle assigned to `panel` by a layout pass. The engine
    /// never reads it back.
    fn set_bounds(&mut self, panel: PanelId, rect: Rect);

    fn minimum_extent(&self, panel: PanelId, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.minimum_width(panel),
            Axis::Y => self.minimum_height(panel),
        }
    }
}

/// A host with no minimum sizes that discards bounds.
impl PanelHost for () {
    fn minimum_width(&self, _: PanelId) -> i32 {
        0
    }

    fn minimum_height(&self, _: PanelId) -> i32 {
        0
    }

    fn set_bounds(&mut self, _: PanelId, _: Rect) {}
}

/// A [`PanelHost`] that records declared minimum sizes and the most recent
/// bounds of each panel.
#[derive(Default, Debug, Clone)]
pub struct PanelFrames {
    minimums: HashMap<PanelId, (i32, i32)>,
    frames: HashMap<PanelId, Rect>,
}

impl PanelFrames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_minimum_size(&mut self, panel: PanelId, width: i32, height: i32) {
        self.minimums.insert(panel, (width, height));
    }

    pub fn with_minimum_size(mut self, panel: PanelId, width: i32, height: i32) -> Self {
        self.set_minimum_size(panel, width, height);
        self
    }

    pub fn frame(&self, panel: PanelId) -> Option<Rect> {
        self.frames.get(&panel).copied()
    }

    /// All recorded frames, sorted by panel.
    pub fn frames(&self) -> Vec<(PanelId, Rect)> {
        let mut frames: Vec<_> = self.frames.iter().map(|(&id, &rect)| (id, rect)).collect();
        frames.sort_by_key(|&(id, _)| id);
        frames
    }
}

impl PanelHost for PanelFrames {
    fn minimum_width(&self, panel: PanelId) -> i32 {
        self.minimums.get(&panel).map_or(0, |&(w, _)| w)
    }

    fn minimum_height(&self, panel: PanelId) -> i32 {
        self.minimums.get(&panel).map_or(0, |&(_, h)| h)
    }

    fn set_bounds(&mut self, panel: PanelId, rect: Rect) {
        self.frames.insert(panel, rect);
    }
}
