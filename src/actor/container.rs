// Copyright The Sashtree Authors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Defines the [`Container`] actor.
//!
//! The container owns a [`LayoutTree`], the authoritative bounds it is laid
//! out in, and the sash widgets shown to the user. It turns toolkit events and
//! layout commands into tree operations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

use crate::collections::FxIndexMap;
use crate::config::{Config, Settings};
use crate::model::{
    LayoutError, LayoutTree, Orientation, PanelHost, Payload, Point, Rect, Relation,
    RestoreError, SashId, Side, is_valid_ratio,
};
use crate::{actor, trace_call};

/// Input from the toolkit.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The container's own bounds changed.
    Resize(Rect),
    DragStart(SashId, Point),
    DragMove(SashId, Point),
    DragEnd(SashId, Point),
    /// The gesture was interrupted, e.g. by focus loss.
    DragCancel,
    /// The toolkit destroyed a sash widget.
    Dispose(SashId),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LayoutCommand {
    /// Adds a panel next to the bottom-right panel.
    Add(Payload),
    /// Adds a panel on `side` of `relative`, giving it `ratio` of the space.
    AddRelative {
        payload: Payload,
        side: Side,
        ratio: f64,
        relative: Option<Payload>,
    },
    /// Adds a panel where `placeholder` was placed.
    AddForPlaceholder {
        payload: Payload,
        placeholder: Payload,
    },
    Remove(Payload),
    Replace {
        old: Payload,
        new: Payload,
    },
    ZoomIn(Payload),
    ZoomOut,
    Activate,
    Deactivate,
}

#[derive(Debug, Clone)]
pub enum Request {
    Event(Event),
    Command(LayoutCommand),
    ConfigUpdated(Arc<Config>),
}

#[must_use]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventResponse {
    /// Where the toolkit should draw the sash being dragged.
    pub drag_position: Option<Point>,
    /// Whether panel bounds were pushed to the host.
    pub relayout: bool,
}

/// A sash control currently shown by the toolkit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SashWidget {
    pub orientation: Orientation,
    pub bounds: Rect,
}

pub type Sender = actor::Sender<Request>;
pub type Receiver = actor::Receiver<Request>;

pub struct Container<H> {
    tree: LayoutTree,
    host: H,
    settings: Settings,
    bounds: Option<Rect>,
    active: bool,
    sashes: FxIndexMap<SashId, SashWidget>,
    /// The sash receiving pointer events until the gesture ends.
    drag_target: Option<SashId>,
}

impl<H: PanelHost> Container<H> {
    pub fn new(config: &Config, host: H) -> Self {
        Container {
            tree: LayoutTree::with_sash_thickness(config.settings.sash_thickness),
            host,
            settings: config.settings.clone(),
            bounds: None,
            active: true,
            sashes: FxIndexMap::default(),
            drag_target: None,
        }
    }

    pub fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The live sash widgets, in tree order.
    pub fn sashes(&self) -> impl Iterator<Item = (SashId, &SashWidget)> {
        self.sashes.iter().map(|(&id, widget)| (id, widget))
    }

    pub fn drag_target(&self) -> Option<SashId> {
        self.drag_target
    }

    /// Processes requests until every sender is dropped.
    ///
    /// Requests are handled one at a time, so a resize sent while a layout
    /// pass is running waits for it to finish.
    pub async fn run(mut self, mut rx: Receiver) -> Self {
        while let Some((span, request)) = rx.recv().await {
            let _guard = span.enter();
            self.handle_request(request);
        }
        self
    }

    pub fn handle_request(&mut self, request: Request) {
        match request {
            Request::Event(event) => {
                _ = self.handle_event(event);
            }
            Request::Command(command) => {
                if let Err(e) = self.handle_command(command) {
                    warn!("Layout command failed: {e}");
                }
            }
            Request::ConfigUpdated(config) => self.set_config(&config),
        }
    }

    #[instrument(skip(self))]
    pub fn handle_event(&mut self, event: Event) -> EventResponse {
        let mut response = EventResponse::default();
        match event {
            Event::Resize(rect) => {
                self.bounds = Some(rect);
                response.relayout = self.layout();
            }
            Event::DragStart(sash, point) => {
                if !self.active || !self.sashes.contains_key(&sash) {
                    debug!("Ignoring drag on a sash that is not shown");
                    return response;
                }
                self.cancel_drag();
                if self.tree.begin_drag(sash, point) {
                    self.drag_target = Some(sash);
                }
            }
            Event::DragMove(sash, point) => {
                let Some(target) = self.drag_target else {
                    return response;
                };
                if target != sash {
                    trace!(?target, "Routing move to the sash being dragged");
                }
                response.drag_position = self.tree.drag_move(
                    target,
                    point,
                    self.settings.drag.respect_minimum_sizes,
                    &self.host,
                );
                if response.drag_position.is_none() {
                    debug!(?target, "Sash disappeared mid-drag");
                    self.drag_target = None;
                }
            }
            Event::DragEnd(_, point) => {
                let Some(target) = self.drag_target.take() else {
                    return response;
                };
                let point = if self.settings.drag.commit_clamped_position {
                    let respect = self.settings.drag.respect_minimum_sizes;
                    self.tree.drag_move(target, point, respect, &self.host).unwrap_or(point)
                } else {
                    point
                };
                if let Some(ratio) = self.tree.end_drag(target, point, &mut self.host) {
                    debug!(?target, ratio, "Committed drag");
                    self.update_sashes();
                    response.relayout = true;
                }
            }
            Event::DragCancel => self.cancel_drag(),
            Event::Dispose(sash) => {
                self.sashes.shift_remove(&sash);
                if self.drag_target == Some(sash) {
                    self.cancel_drag();
                }
            }
        }
        response
    }

    #[instrument(skip(self))]
    pub fn handle_command(&mut self, command: LayoutCommand) -> Result<EventResponse, LayoutError> {
        let relayout = match command {
            LayoutCommand::Add(payload) => self.add(payload)?,
            LayoutCommand::AddRelative { payload, side, ratio, relative } => {
                self.add_relative(payload, side, ratio, relative)?
            }
            LayoutCommand::AddForPlaceholder { payload, placeholder } => {
                self.add_for_placeholder(payload, placeholder)?
            }
            LayoutCommand::Remove(payload) => self.structural(|tree| tree.remove(payload)),
            LayoutCommand::Replace { old, new } => self.structural(|tree| tree.replace(old, new)),
            LayoutCommand::ZoomIn(payload) => self.structural(|tree| tree.zoom_in(payload)),
            LayoutCommand::ZoomOut => self.structural(|tree| tree.zoom_out()),
            LayoutCommand::Activate => self.activate(),
            LayoutCommand::Deactivate => {
                self.deactivate();
                false
            }
        };
        Ok(EventResponse { drag_position: None, relayout })
    }

    /// Adds `payload` to the right of the bottom-right panel, giving it the
    /// configured docking ratio. Returns whether the container was laid out.
    pub fn add(&mut self, payload: Payload) -> Result<bool, LayoutError> {
        let relative = self.tree.find_bottom_right();
        self.add_relative(payload, Side::Right, self.settings.docking_ratio, relative)
    }

    /// Adds `payload` on `side` of `relative`, giving it `ratio` of the
    /// region `relative` occupied.
    pub fn add_relative(
        &mut self,
        payload: Payload,
        side: Side,
        ratio: f64,
        relative: Option<Payload>,
    ) -> Result<bool, LayoutError> {
        if !is_valid_ratio(ratio) {
            return Err(LayoutError::RatioOutOfRange(ratio));
        }
        let left = side.is_leading();
        let first_ratio = if left { ratio } else { 1.0 - ratio };
        self.cancel_drag();
        self.tree.insert(payload, left, side.orientation(), first_ratio, relative)?;
        debug!("Tree:\n{}", self.tree.draw_tree().trim());
        Ok(self.layout())
    }

    /// Adds `payload` with the same neighbour, orientation, and ratio as the
    /// relation that placed `placeholder`.
    pub fn add_for_placeholder(
        &mut self,
        payload: Payload,
        placeholder: Payload,
    ) -> Result<bool, LayoutError> {
        let Some(relation) = self.tree.relation_of(placeholder) else {
            let relative = self.tree.find_bottom_right();
            return self.add_relative(payload, Side::Right, 0.5, relative);
        };
        self.cancel_drag();
        self.tree.insert(payload, false, relation.orientation, relation.ratio, relation.left)?;
        debug!("Tree:\n{}", self.tree.draw_tree().trim());
        Ok(self.layout())
    }

    fn structural(&mut self, op: impl FnOnce(&mut LayoutTree) -> bool) -> bool {
        self.cancel_drag();
        if !op(&mut self.tree) {
            return false;
        }
        debug!("Tree:\n{}", self.tree.draw_tree().trim());
        self.layout()
    }

    /// Starts laying out panels and showing sashes again.
    pub fn activate(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.layout()
    }

    /// Hides every panel and sash. Bounds changes are still recorded and
    /// applied on the next activation.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.cancel_drag();
        self.dispose_sashes();
        if let Some(bounds) = self.bounds {
            self.tree.set_bounds(bounds.collapsed(), &mut self.host);
        }
        self.active = false;
    }

    /// Applies new settings and lays the tree out again.
    pub fn set_config(&mut self, config: &Config) {
        self.settings = config.settings.clone();
        self.tree.set_sash_thickness(self.settings.sash_thickness);
        _ = self.layout();
    }

    /// Lays the tree out in the container's bounds. Returns whether anything
    /// was pushed to the host.
    fn layout(&mut self) -> bool {
        let Some(bounds) = self.bounds else { return false };
        if !self.active {
            return false;
        }
        trace_call!(LayoutTree::set_bounds(&mut self.tree, bounds, &mut self.host));
        self.update_sashes();
        true
    }

    /// Makes the sash widgets match the tree: one for every split whose sash
    /// is visible, none for the rest.
    pub fn update_sashes(&mut self) {
        if !self.active {
            return;
        }
        self.tree.update_sash_limits();
        let mut live = FxIndexMap::default();
        for (_, split) in self.tree.splits() {
            let sash = split.sash();
            if !self.tree.is_sash_visible(sash) {
                continue;
            }
            let Some(state) = self.tree.sash(sash) else { continue };
            live.insert(sash, SashWidget {
                orientation: state.orientation(),
                bounds: state.bounds(),
            });
        }
        for gone in self.sashes.keys().filter(|id| !live.contains_key(*id)) {
            trace!(sash = ?gone, "Disposing sash");
        }
        self.sashes = live;
        if self.drag_target.is_some_and(|target| !self.sashes.contains_key(&target)) {
            self.cancel_drag();
        }
    }

    pub fn dispose_sashes(&mut self) {
        self.sashes.clear();
    }

    fn cancel_drag(&mut self) {
        if let Some(target) = self.drag_target.take() {
            debug!(?target, "Cancelling drag");
            self.tree.cancel_drag(target);
        }
    }

    /// The live sash under `point`.
    pub fn sash_at(&self, point: Point) -> Option<SashId> {
        self.sashes
            .iter()
            .find(|(_, widget)| widget.bounds.contains(point))
            .map(|(&id, _)| id)
    }

    pub fn save_layout(&self) -> Vec<Relation> {
        self.tree.compute_relation()
    }

    /// Replaces the tree with one rebuilt from `relations`. On error the
    /// current tree is kept.
    pub fn restore_layout(&mut self, relations: &[Relation]) -> Result<(), RestoreError> {
        let tree = LayoutTree::restore(relations, self.settings.sash_thickness)?;
        self.cancel_drag();
        self.dispose_sashes();
        self.tree = tree;
        debug!("Tree:\n{}", self.tree.draw_tree().trim());
        _ = self.layout();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;
    use crate::model::{PanelFrames, PanelId};

    fn panel(id: u64) -> Payload {
        Payload::Panel(PanelId::new(id))
    }

    fn frame(container: &Container<PanelFrames>, id: u64) -> Option<Rect> {
        container.host().frame(PanelId::new(id))
    }

    fn container(host: PanelFrames) -> Container<PanelFrames> {
        let mut container = Container::new(&Config::default(), host);
        _ = container.handle_event(Event::Resize(Rect::new(0, 0, 800, 600)));
        container
    }

    fn only_sash(container: &Container<PanelFrames>) -> SashId {
        let sashes: Vec<_> = container.sashes().map(|(id, _)| id).collect();
        assert_eq!(sashes.len(), 1);
        sashes[0]
    }

    #[test]
    fn add_docks_new_panels_bottom_right() {
        let mut c = container(PanelFrames::new());
        c.add(panel(1)).unwrap();
        c.add(panel(2)).unwrap();
        _ = c.handle_event(Event::Resize(Rect::new(0, 0, 800, 600)));
        assert_eq!(frame(&c, 1), Some(Rect::new(0, 0, 398, 600)));
        assert_eq!(frame(&c, 2), Some(Rect::new(402, 0, 398, 600)));
        let sash = only_sash(&c);
        assert_eq!(c.sashes().next().unwrap().1.bounds, Rect::new(398, 0, 4, 600));
        assert_eq!(c.sash_at(Point::new(400, 300)), Some(sash));
        assert_eq!(c.sash_at(Point::new(10, 300)), None);
    }

    #[test]
    fn add_relative_gives_ratio_to_the_new_panel() {
        let mut c = container(PanelFrames::new());
        c.add(panel(1)).unwrap();
        let response = c
            .handle_command(LayoutCommand::AddRelative {
                payload: panel(2),
                side: Side::Bottom,
                ratio: 0.25,
                relative: Some(panel(1)),
            })
            .unwrap();
        assert!(response.relayout);
        assert_eq!(frame(&c, 1), Some(Rect::new(0, 0, 800, 448)));
        assert_eq!(frame(&c, 2), Some(Rect::new(0, 452, 800, 148)));

        _ = c
            .handle_command(LayoutCommand::AddRelative {
                payload: panel(3),
                side: Side::Left,
                ratio: 0.25,
                relative: Some(panel(1)),
            })
            .unwrap();
        assert_eq!(frame(&c, 3), Some(Rect::new(0, 0, 198, 448)));
        assert_eq!(
            c.handle_command(LayoutCommand::AddRelative {
                payload: panel(4),
                side: Side::Left,
                ratio: 2.0,
                relative: None,
            }),
            Err(LayoutError::RatioOutOfRange(2.0))
        );
    }

    #[test]
    fn drag_commits_the_clamped_position() {
        let host = PanelFrames::new()
            .with_minimum_size(PanelId::new(1), 100, 0)
            .with_minimum_size(PanelId::new(2), 150, 0);
        let mut c = container(host);
        c.add(panel(1)).unwrap();
        _ = c.handle_command(LayoutCommand::Add(panel(2))).unwrap();
        let sash = only_sash(&c);

        _ = c.handle_event(Event::DragStart(sash, Point::new(398, 10)));
        assert_eq!(c.drag_target(), Some(sash));
        let moved = c.handle_event(Event::DragMove(sash, Point::new(2000, 10)));
        assert_eq!(moved.drag_position, Some(Point::new(646, 10)));
        let ended = c.handle_event(Event::DragEnd(sash, Point::new(2000, 10)));
        assert!(ended.relayout);
        assert_eq!(frame(&c, 1), Some(Rect::new(0, 0, 646, 600)));
        assert_eq!(frame(&c, 2), Some(Rect::new(650, 0, 150, 600)));
        assert_eq!(c.drag_target(), None);
    }

    #[test]
    fn raw_release_outside_split_is_rejected() {
        let mut config = Config::default();
        config.settings.drag.commit_clamped_position = false;
        let mut c = Container::new(&config, PanelFrames::new());
        _ = c.handle_event(Event::Resize(Rect::new(0, 0, 800, 600)));
        c.add(panel(1)).unwrap();
        _ = c.handle_command(LayoutCommand::Add(panel(2))).unwrap();
        let sash = only_sash(&c);

        _ = c.handle_event(Event::DragStart(sash, Point::new(398, 10)));
        let ended = c.handle_event(Event::DragEnd(sash, Point::new(2000, 10)));
        assert!(!ended.relayout);
        assert_eq!(frame(&c, 1), Some(Rect::new(0, 0, 398, 600)));
    }

    #[test]
    fn unconstrained_drag_past_the_edge_commits() {
        let mut config = Config::default();
        config.settings.drag.respect_minimum_sizes = false;
        let mut c = Container::new(&config, PanelFrames::new());
        _ = c.handle_event(Event::Resize(Rect::new(0, 0, 800, 600)));
        c.add(panel(1)).unwrap();
        _ = c.handle_command(LayoutCommand::Add(panel(2))).unwrap();
        let sash = only_sash(&c);

        _ = c.handle_event(Event::DragStart(sash, Point::new(398, 10)));
        let moved = c.handle_event(Event::DragMove(sash, Point::new(2000, 10)));
        assert_eq!(moved.drag_position, Some(Point::new(798, 10)));
        let ended = c.handle_event(Event::DragEnd(sash, Point::new(2000, 10)));
        assert!(ended.relayout);
        assert_eq!(frame(&c, 1), Some(Rect::new(0, 0, 798, 600)));
        assert_eq!(c.sashes().next().unwrap().1.bounds, Rect::new(798, 0, 4, 600));

        _ = c.handle_event(Event::DragStart(sash, Point::new(798, 10)));
        let moved = c.handle_event(Event::DragMove(sash, Point::new(-50, 10)));
        assert_eq!(moved.drag_position, Some(Point::new(-2, 10)));
        assert!(c.handle_event(Event::DragEnd(sash, Point::new(-50, 10))).relayout);
        assert_eq!(c.sashes().next().unwrap().1.bounds, Rect::new(-2, 0, 4, 600));
    }

    #[test]
    fn disposing_the_dragged_sash_cancels_the_gesture() {
        let mut c = container(PanelFrames::new());
        c.add(panel(1)).unwrap();
        _ = c.handle_command(LayoutCommand::Add(panel(2))).unwrap();
        let sash = only_sash(&c);
        _ = c.handle_event(Event::DragStart(sash, Point::new(398, 0)));
        _ = c.handle_event(Event::Dispose(sash));
        assert_eq!(c.drag_target(), None);
        assert!(!c.tree().sash(sash).unwrap().is_dragging());
        assert_eq!(c.handle_event(Event::DragMove(sash, Point::new(10, 0))), EventResponse::default());
        assert_eq!(c.handle_event(Event::DragEnd(sash, Point::new(10, 0))), EventResponse::default());
        assert_eq!(frame(&c, 1), Some(Rect::new(0, 0, 398, 600)));
    }

    #[test]
    fn removing_a_panel_mid_drag_cancels_the_gesture() {
        let mut c = container(PanelFrames::new());
        c.add(panel(1)).unwrap();
        _ = c.handle_command(LayoutCommand::Add(panel(2))).unwrap();
        let sash = only_sash(&c);
        _ = c.handle_event(Event::DragStart(sash, Point::new(398, 0)));
        _ = c.handle_command(LayoutCommand::Remove(panel(2))).unwrap();
        assert_eq!(c.drag_target(), None);
        assert_eq!(c.sashes().count(), 0);
        assert_eq!(c.handle_event(Event::DragMove(sash, Point::new(10, 0))).drag_position, None);
        assert_eq!(frame(&c, 1), Some(Rect::new(0, 0, 800, 600)));
    }

    #[test]
    fn moves_follow_the_drag_target() {
        let mut c = container(PanelFrames::new());
        c.add(panel(1)).unwrap();
        c.add(panel(2)).unwrap();
        _ = c.handle_command(LayoutCommand::AddRelative {
            payload: panel(3),
            side: Side::Bottom,
            ratio: 0.5,
            relative: Some(panel(1)),
        });
        let vertical = c.sashes().find(|(_, w)| w.orientation == Orientation::Vertical).unwrap().0;
        let horizontal =
            c.sashes().find(|(_, w)| w.orientation == Orientation::Horizontal).unwrap().0;
        _ = c.handle_event(Event::DragStart(vertical, Point::new(398, 0)));
        let moved = c.handle_event(Event::DragMove(horizontal, Point::new(300, 5)));
        assert_eq!(moved.drag_position, Some(Point::new(300, 5)));
        _ = c.handle_event(Event::DragCancel);
        assert_eq!(c.drag_target(), None);
        assert_eq!(frame(&c, 1), Some(Rect::new(0, 0, 398, 298)));
    }

    #[test]
    fn zoom_hides_sashes() {
        let mut c = container(PanelFrames::new());
        c.add(panel(1)).unwrap();
        _ = c.handle_command(LayoutCommand::Add(panel(2))).unwrap();
        _ = c.handle_command(LayoutCommand::ZoomIn(panel(1))).unwrap();
        assert_eq!(c.sashes().count(), 0);
        assert_eq!(frame(&c, 1), Some(Rect::new(0, 0, 800, 600)));
        assert_eq!(frame(&c, 2), Some(Rect::new(0, 0, 0, 0)));
        _ = c.handle_command(LayoutCommand::ZoomOut).unwrap();
        assert_eq!(c.sashes().count(), 1);
        assert_eq!(frame(&c, 2), Some(Rect::new(402, 0, 398, 600)));
    }

    #[test]
    fn inactive_container_defers_layout() {
        let mut c = container(PanelFrames::new());
        c.add(panel(1)).unwrap();
        _ = c.handle_command(LayoutCommand::Add(panel(2))).unwrap();
        _ = c.handle_command(LayoutCommand::Deactivate).unwrap();
        assert_eq!(c.sashes().count(), 0);
        assert_eq!(frame(&c, 1), Some(Rect::new(0, 0, 0, 0)));

        let response = c.handle_event(Event::Resize(Rect::new(0, 0, 400, 300)));
        assert!(!response.relayout);
        assert_eq!(frame(&c, 2), Some(Rect::new(0, 0, 0, 0)));

        let response = c.handle_command(LayoutCommand::Activate).unwrap();
        assert!(response.relayout);
        assert_eq!(frame(&c, 1), Some(Rect::new(0, 0, 198, 300)));
        assert_eq!(c.sashes().count(), 1);
    }

    #[test]
    fn placeholder_keeps_the_slot_for_its_panel() {
        let mut c = container(PanelFrames::new());
        c.add(panel(1)).unwrap();
        _ = c.handle_command(LayoutCommand::AddRelative {
            payload: Payload::Placeholder(PanelId::new(2)),
            side: Side::Bottom,
            ratio: 0.25,
            relative: Some(panel(1)),
        });
        assert_eq!(frame(&c, 1), Some(Rect::new(0, 0, 800, 600)));
        assert_eq!(c.sashes().count(), 0);

        _ = c
            .handle_command(LayoutCommand::AddForPlaceholder {
                payload: panel(3),
                placeholder: Payload::Placeholder(PanelId::new(2)),
            })
            .unwrap();
        assert_eq!(frame(&c, 1), Some(Rect::new(0, 0, 800, 448)));
        assert_eq!(frame(&c, 3), Some(Rect::new(0, 452, 800, 148)));
    }

    #[test]
    fn config_update_changes_sash_thickness() {
        let mut c = container(PanelFrames::new());
        c.add(panel(1)).unwrap();
        _ = c.handle_command(LayoutCommand::Add(panel(2))).unwrap();
        let mut config = Config::default();
        config.settings.sash_thickness = 10;
        c.handle_request(Request::ConfigUpdated(Arc::new(config)));
        assert_eq!(frame(&c, 1), Some(Rect::new(0, 0, 395, 600)));
        assert_eq!(frame(&c, 2), Some(Rect::new(405, 0, 395, 600)));
    }

    #[test]
    fn save_and_restore_layout() {
        let mut c = container(PanelFrames::new());
        c.add(panel(1)).unwrap();
        c.add(panel(2)).unwrap();
        c.add_relative(panel(3), Side::Top, 0.3, Some(panel(2))).unwrap();
        let saved = c.save_layout();
        let before = c.host().frames();

        let mut other = container(PanelFrames::new());
        other.restore_layout(&saved).unwrap();
        assert_eq!(other.host().frames(), before);
        assert_eq!(other.save_layout(), saved);
        assert_eq!(other.restore_layout(&[]), Err(RestoreError::Empty));
        assert_eq!(other.save_layout(), saved);
    }

    #[tokio::test]
    async fn run_handles_requests_in_order() {
        let (tx, rx) = actor::channel();
        let c = Container::new(&Config::default(), PanelFrames::new());
        tx.send(Request::Command(LayoutCommand::Add(panel(1))));
        tx.send(Request::Command(LayoutCommand::Add(panel(2))));
        tx.send(Request::Event(Event::Resize(Rect::new(0, 0, 800, 600))));
        tx.send(Request::Event(Event::Resize(Rect::new(0, 0, 400, 600))));
        drop(tx);
        let c = c.run(rx).await;
        assert_eq!(c.bounds(), Some(Rect::new(0, 0, 400, 600)));
        assert_eq!(frame(&c, 1), Some(Rect::new(0, 0, 198, 600)));
        assert_eq!(frame(&c, 2), Some(Rect::new(202, 0, 198, 600)));
    }
}
