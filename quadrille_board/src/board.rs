// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use kurbo::{Point, Vec2};
use quadrille_anim::{Animation, Scheduler};
use quadrille_coords::CoordinateSystem;
use quadrille_events::{
    ClickConfig, ClickOutcome, ClickState, DeviceRouter, FrameThrottle, Key, Modifiers,
    PinchClassifier, PinchConfig, PointerEvent, PointerId, RawEvent, TwoFingerKind,
};
use quadrille_gesture::{
    drag_to, pick_drag_target, two_finger_transform, BoardMode, DragConfig, SelectionRect,
    SessionTable,
};
use quadrille_pipeline::{
    prepare_update, update_elements, update_renderer, Renderer, UpdateQuality,
};
use quadrille_registry::{CascadeMode, Element, Registry};
use quadrille_viewport as viewport;
use quadrille_viewport::{BoundingBox, ResizePolicy, ViewportError, ZoomSettings};

use crate::factory::{build, Attributes, ConstructError};
use crate::hooks::{BoardEvent, HookKind, Hooks};
use crate::host::Host;

/// Everything tunable about a board's interaction behavior.
#[derive(Clone, Copy, Debug)]
pub struct BoardConfig {
    /// Click/double-click recognition.
    pub click: ClickConfig,
    /// Two-finger pan-vs-pinch thresholds.
    pub pinch: PinchConfig,
    /// Drag snapping.
    pub drag: DragConfig,
    /// Zoom steps and clamps.
    pub zoom: ZoomSettings,
    /// Pick radius in pixels for drag starts.
    pub pick_tolerance: f64,
    /// Move-event processing cap in frames per second; 0 disables.
    pub max_fps: u32,
    /// Screen pixels one keyboard pan step moves the origin.
    pub key_pan_px: f64,
    /// Whether pointer gestures may pan the view at all.
    pub pan_enabled: bool,
    /// Modifier that starts a pan on pointer down, even over an element.
    /// Empty disables the modifier route.
    pub pan_modifier: Modifiers,
    /// Whether a plain background finger pans without the modifier.
    pub one_finger_pan: bool,
    /// Modifier that enters selection mode on a pointer down from idle.
    /// Empty (the default) leaves selection to
    /// [`Board::start_selection`].
    pub selection_modifier: Modifiers,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            click: ClickConfig::default(),
            pinch: PinchConfig::default(),
            drag: DragConfig::default(),
            zoom: ZoomSettings::default(),
            pick_tolerance: 6.0,
            max_fps: 0,
            key_pan_px: 10.0,
            pan_enabled: true,
            pan_modifier: Modifiers::SHIFT,
            one_finger_pan: true,
            selection_modifier: Modifiers::empty(),
        }
    }
}

/// Snapshot of a board's interaction state, for debugging and tests.
#[derive(Clone, Debug)]
pub struct BoardDebugInfo {
    /// Current interaction mode.
    pub mode: BoardMode,
    /// Live element count.
    pub elements: usize,
    /// Live pointer sessions.
    pub sessions: usize,
    /// Cumulative zoom factors.
    pub zoom: (f64, f64),
    /// Current rendering quality.
    pub quality: UpdateQuality,
    /// Whether animations are pending.
    pub animating: bool,
    /// Update-suspension depth.
    pub suspend_depth: u32,
}

/// An interactive geometry board.
///
/// The board owns the element registry, the coordinate system, the gesture
/// state, the animation scheduler, and one renderer. It is host-agnostic:
/// the embedder forwards raw input through [`Board::handle_raw`], drives
/// deferred work through [`Board::poll`], and answers environment queries
/// through a [`Host`] implementation at attach time.
pub struct Board {
    id: String,
    width: f64,
    height: f64,
    max_box: Option<BoundingBox>,
    cs: CoordinateSystem,
    registry: Registry,
    scheduler: Scheduler,
    host: Box<dyn Host>,
    renderer: Box<dyn Renderer>,
    hooks: Hooks,

    mode: BoardMode,
    quality: UpdateQuality,
    sessions: SessionTable,
    selection: Option<SelectionRect>,
    selected: Vec<String>,
    router: DeviceRouter,
    element_clicks: ClickState<String>,
    board_clicks: ClickState<()>,
    pinch: Option<PinchClassifier>,
    throttle: FrameThrottle,
    config: BoardConfig,

    in_update: bool,
    full_update_pending: bool,
    suspend_depth: u32,
    update_while_suspended: bool,
    dependents: Vec<Rc<RefCell<Board>>>,
}

impl Board {
    /// Default visible box for a fresh board: `[-5, 5] x [-5, 5]`.
    const DEFAULT_BOX: BoundingBox = BoundingBox {
        left: -5.0,
        top: 5.0,
        right: 5.0,
        bottom: -5.0,
    };

    /// Creates a board attached to a host, drawing through `renderer`.
    ///
    /// The board keeps the host: it re-reads the container transform on
    /// every pointer down, so embedder-side restyling between gestures is
    /// picked up before positions are mapped. The board starts with the
    /// default bounding box; call [`Board::set_bounding_box`] to configure
    /// the view.
    pub fn new(id: &str, host: Box<dyn Host>, renderer: Box<dyn Renderer>) -> Self {
        let (width, height) = host.container_size();
        let mut cs = CoordinateSystem::new(Point::ZERO, 1.0, 1.0);
        // The default box is non-degenerate, so this cannot fail.
        let _ = viewport::set_bounding_box(&mut cs, width, height, Self::DEFAULT_BOX, false);
        cs.refresh_container_transform(host.container_transform());
        let router = DeviceRouter::new(host.pointer_events_supported());
        Self {
            id: String::from(id),
            width,
            height,
            max_box: None,
            cs,
            registry: Registry::new(id),
            scheduler: Scheduler::new(),
            host,
            renderer,
            hooks: Hooks::new(),
            mode: BoardMode::Idle,
            quality: UpdateQuality::High,
            sessions: SessionTable::new(),
            selection: None,
            selected: Vec::new(),
            router,
            element_clicks: ClickState::new(),
            board_clicks: ClickState::new(),
            pinch: None,
            throttle: FrameThrottle::new(0),
            config: BoardConfig::default(),
            in_update: false,
            full_update_pending: false,
            suspend_depth: 0,
            update_while_suspended: false,
            dependents: Vec::new(),
        }
    }

    /// Replaces the interaction configuration.
    pub fn set_config(&mut self, config: BoardConfig) {
        self.config = config;
        self.throttle = FrameThrottle::new(config.max_fps);
    }

    /// The board id (also the minted-id prefix).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The element registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access to the registry, for direct element manipulation.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// The board's coordinate system.
    #[must_use]
    pub fn coords(&self) -> &CoordinateSystem {
        &self.cs
    }

    /// Current interaction mode.
    #[must_use]
    pub fn mode(&self) -> BoardMode {
        self.mode
    }

    /// Current update quality.
    #[must_use]
    pub fn quality(&self) -> UpdateQuality {
        self.quality
    }

    /// Subscribes a callback to one event class.
    pub fn on<F: FnMut(&BoardEvent) + 'static>(&mut self, kind: HookKind, callback: F) {
        self.hooks.on(kind, callback);
    }

    /// State snapshot for debugging and tests.
    #[must_use]
    pub fn debug_info(&self) -> BoardDebugInfo {
        BoardDebugInfo {
            mode: self.mode,
            elements: self.registry.len(),
            sessions: self.sessions.len(),
            zoom: (self.cs.zoom_x(), self.cs.zoom_y()),
            quality: self.quality,
            animating: self.scheduler.is_active(),
            suspend_depth: self.suspend_depth,
        }
    }

    // ---- element lifecycle -------------------------------------------------

    /// Constructs and registers an element.
    ///
    /// `kind` is one of `point`, `line`, `circle`, `polygon`, `curve`,
    /// `text`, `image`, `group`; `parents` are ids or names of already
    /// registered elements. An unknown kind or a bad parent list is a hard
    /// error and registers nothing. On success the new element is wired as
    /// a child of each parent and an update runs.
    pub fn create(
        &mut self,
        kind: &str,
        parents: &[&str],
        attrs: &Attributes,
    ) -> Result<String, ConstructError> {
        let (element, parent_ids) = build(kind, parents, attrs, &self.registry, &self.cs)?;
        let id = self.registry.register(element);
        for parent in &parent_ids {
            self.registry.wire_dependency(parent, &id);
        }
        self.update();
        Ok(id)
    }

    /// Resolves an element by id or name.
    #[must_use]
    pub fn select(&self, key: &str) -> Option<&Element> {
        self.registry.lookup(key)
    }

    /// Removes an element and its dependents, then updates.
    ///
    /// Unknown keys are a silent no-op. Any animation on the element is
    /// torn down and any finger on it released.
    pub fn remove_object(&mut self, key: &str) {
        let Some(id) = self.registry.lookup(key).map(|el| el.id.clone()) else {
            return;
        };
        self.scheduler.stop(&id);
        self.sessions.release_target(&id);
        self.registry.remove(&id, CascadeMode::Ancestors);
        self.update();
    }

    /// Removes several elements (and their dependents) with a single
    /// update at the end.
    ///
    /// Unknown keys are skipped, matching [`Board::remove_object`].
    pub fn remove_objects<'a, I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let ids: Vec<String> = keys
            .into_iter()
            .filter_map(|key| self.registry.lookup(key).map(|el| el.id.clone()))
            .collect();
        for id in &ids {
            self.scheduler.stop(id);
            self.sessions.release_target(id);
        }
        self.registry
            .remove_many(ids.iter().map(String::as_str), CascadeMode::Ancestors);
        self.update();
    }

    /// Records a dependency edge: `child` depends on `parent`.
    pub fn add_child(&mut self, parent: &str, child: &str) {
        self.registry.wire_dependency(parent, child);
    }

    /// Removes a previously recorded dependency edge.
    pub fn remove_child(&mut self, parent: &str, child: &str) {
        self.registry.unwire_dependency(parent, child);
    }

    // ---- update orchestration ----------------------------------------------

    /// Runs one update pass: recompute flagged elements, redraw, propagate
    /// to dependent boards.
    ///
    /// Re-entrant calls (from hooks or dependent boards) are silent
    /// no-ops; while updates are suspended the pass is deferred to
    /// [`Board::unsuspend_update`].
    pub fn update(&mut self) {
        if self.in_update {
            return;
        }
        if self.suspend_depth > 0 {
            self.update_while_suspended = true;
            return;
        }
        self.in_update = true;
        self.run_pipeline();
        let quality = self.quality;
        let deps: Vec<Rc<RefCell<Self>>> = self.dependents.clone();
        for dep in deps {
            // A board reachable from its own dependent list is already
            // borrowed here and gets skipped: propagation is non-recursive.
            if let Ok(mut b) = dep.try_borrow_mut() {
                b.quality = quality;
                b.update_as_dependent();
            }
        }
        self.in_update = false;
        self.hooks.emit(&BoardEvent::Update);
    }

    /// Runs a full update: every element recomputes, including those that
    /// opted out of regular updates.
    pub fn full_update(&mut self) {
        self.full_update_pending = true;
        self.update();
    }

    /// Suspends update passes; nestable.
    pub fn suspend_update(&mut self) {
        self.suspend_depth += 1;
    }

    /// Ends one suspension level. Leaving the outermost level runs the one
    /// deferred full update if anything asked for an update meanwhile.
    pub fn unsuspend_update(&mut self) {
        self.suspend_depth = self.suspend_depth.saturating_sub(1);
        if self.suspend_depth == 0 && self.update_while_suspended {
            self.update_while_suspended = false;
            self.full_update();
        }
    }

    /// Registers another board to update after this one.
    pub fn add_dependent_board(&mut self, board: Rc<RefCell<Self>>) {
        self.dependents.push(board);
    }

    /// Recomputes every element's coords after an origin/zoom/unit change.
    ///
    /// Frozen elements keep their screen position and re-derive the user
    /// side; everything else re-derives the screen side.
    pub fn update_coords(&mut self) {
        let cs = self.cs.clone();
        for el in self.registry.iter_mut() {
            el.update_coords(&cs);
        }
    }

    fn update_as_dependent(&mut self) {
        if self.in_update || self.suspend_depth > 0 {
            return;
        }
        self.in_update = true;
        self.full_update_pending = true;
        self.run_pipeline();
        self.in_update = false;
        self.hooks.emit(&BoardEvent::Update);
    }

    fn run_pipeline(&mut self) {
        prepare_update(&mut self.registry, self.full_update_pending);
        self.full_update_pending = false;
        update_elements(&mut self.registry, &self.cs);
        update_renderer(&mut self.registry, self.renderer.as_mut(), self.quality);
    }

    // ---- viewport ----------------------------------------------------------

    /// Shows the given logical rectangle; see
    /// [`quadrille_viewport::set_bounding_box`].
    ///
    /// With a maximum box configured, the request is clamped to it;
    /// requests with no overlap fail and leave the view unchanged.
    pub fn set_bounding_box(
        &mut self,
        bbox: BoundingBox,
        keep_aspect_ratio: bool,
    ) -> Result<(), ViewportError> {
        let bbox = match self.max_box {
            Some(max) => viewport::clamp_to_max(bbox, max)?,
            None => bbox,
        };
        viewport::set_bounding_box(&mut self.cs, self.width, self.height, bbox, keep_aspect_ratio)?;
        self.after_view_change();
        Ok(())
    }

    /// Limits future [`Board::set_bounding_box`] requests to a maximum
    /// box; `None` removes the limit.
    pub fn set_max_bounding_box(&mut self, max: Option<BoundingBox>) {
        self.max_box = max;
    }

    /// The logical rectangle currently visible.
    #[must_use]
    pub fn get_bounding_box(&self) -> BoundingBox {
        viewport::bounding_box(&self.cs, self.width, self.height)
    }

    /// Zooms in one step around `anchor` (logical; `None` = view center).
    /// Out-of-range requests are state-preserving no-ops.
    pub fn zoom_in(&mut self, anchor: Option<Point>) -> bool {
        let ok = viewport::zoom_in(&mut self.cs, self.width, self.height, anchor, &self.config.zoom);
        if ok {
            self.after_view_change();
        }
        ok
    }

    /// Zooms out one step around `anchor`.
    pub fn zoom_out(&mut self, anchor: Option<Point>) -> bool {
        let ok =
            viewport::zoom_out(&mut self.cs, self.width, self.height, anchor, &self.config.zoom);
        if ok {
            self.after_view_change();
        }
        ok
    }

    /// Resets the cumulative zoom to 1, keeping the view center.
    pub fn zoom_100(&mut self) {
        viewport::zoom_100(&mut self.cs, self.width, self.height);
        self.after_view_change();
    }

    /// Pans the view by a screen-space delta.
    pub fn move_origin(&mut self, delta: Vec2) {
        self.cs.translate_origin(delta);
        self.after_view_change();
    }

    /// Adapts to a new canvas size.
    pub fn resize(&mut self, width: f64, height: f64, policy: ResizePolicy) -> Result<(), ViewportError> {
        viewport::resize(&mut self.cs, (self.width, self.height), (width, height), policy)?;
        self.width = width;
        self.height = height;
        self.renderer.resize(width, height);
        self.refresh_client_mapping();
        self.after_view_change();
        Ok(())
    }

    /// Drops the cached container transform and re-reads it from the host.
    fn refresh_client_mapping(&mut self) {
        self.cs.invalidate_container_transform();
        self.cs
            .refresh_container_transform(self.host.container_transform());
    }

    fn after_view_change(&mut self) {
        self.update_coords();
        self.full_update();
        self.hooks.emit(&BoardEvent::BoundingBox);
    }

    // ---- animation ---------------------------------------------------------

    /// Queues an animation; it advances on subsequent [`Board::poll`]
    /// calls.
    pub fn animate(&mut self, animation: Animation) {
        self.scheduler.add(animation);
    }

    /// Tears down every animation without completing any.
    pub fn stop_all_animation(&mut self) {
        self.scheduler.stop_all();
    }

    // ---- selection ---------------------------------------------------------

    /// Enters selection mode: the next pointer down anchors a rubber-band
    /// rectangle instead of dragging or panning.
    pub fn start_selection(&mut self) {
        self.mode = BoardMode::Selecting;
        self.selection = None;
    }

    /// Ids captured by the most recent completed selection.
    #[must_use]
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    // ---- input -------------------------------------------------------------

    /// Feeds one raw host event through the device router and the gesture
    /// machine.
    pub fn handle_raw(&mut self, raw: RawEvent) {
        let Some(event) = self.router.route(raw) else {
            return;
        };
        match event {
            PointerEvent::Down {
                pointer,
                pos,
                modifiers,
                time,
            } => self.on_down(pointer, pos, modifiers, time),
            PointerEvent::Move {
                pointer, pos, time, ..
            } => self.on_move(pointer, pos, time),
            PointerEvent::Up { pointer, pos, time } => self.on_up(pointer, pos, time),
            PointerEvent::Cancel { pointer, .. } => self.on_cancel(pointer),
            PointerEvent::Leave { .. } => self.on_leave(),
            PointerEvent::Wheel { pos, delta, .. } => self.on_wheel(pos, delta),
            PointerEvent::Key { key, .. } => self.on_key(key),
        }
    }

    /// Drives deferred work: fires expired single clicks and advances
    /// animations. Call once per host frame with the current time in
    /// milliseconds.
    pub fn poll(&mut self, now: u64) {
        if let Some(ClickOutcome::Click { target, pos }) = self.element_clicks.poll(now) {
            self.hooks.emit(&BoardEvent::Click {
                element: Some(target),
                pos,
            });
        }
        if let Some(ClickOutcome::Click { pos, .. }) = self.board_clicks.poll(now) {
            self.hooks.emit(&BoardEvent::Click { element: None, pos });
        }
        if self.scheduler.is_active() && self.scheduler.tick(&mut self.registry, &self.cs, now) {
            self.update();
        }
    }

    fn on_down(&mut self, pointer: PointerId, pos: Point, modifiers: Modifiers, time: u64) {
        // The embedder may have restyled the container since the last
        // gesture; re-read its transform before mapping this position.
        self.refresh_client_mapping();
        let pos = self.cs.client_to_screen(pos);

        if self.mode == BoardMode::Idle
            && !self.config.selection_modifier.is_empty()
            && modifiers.contains(self.config.selection_modifier)
        {
            self.start_selection();
        }

        // Selection owns the pointer outright.
        if self.mode == BoardMode::Selecting {
            if self.sessions.begin(pointer, None, pos, Vec2::ZERO) {
                self.selection = Some(SelectionRect::begin(pos));
            }
            self.hooks.emit(&BoardEvent::Down { pos });
            return;
        }

        // A held pan modifier grabs the view before any element can; no
        // picking runs for this down.
        if self.mode == BoardMode::Idle
            && self.config.pan_enabled
            && !self.config.pan_modifier.is_empty()
            && modifiers.contains(self.config.pan_modifier)
        {
            if self.sessions.begin(pointer, None, pos, Vec2::ZERO) {
                self.mode = BoardMode::PanningOrigin;
            }
            self.throttle.reset();
            self.hooks.emit(&BoardEvent::Down { pos });
            return;
        }

        let target = pick_drag_target(&self.registry, pos, &self.cs, self.config.pick_tolerance);
        match target {
            Some(id) => {
                let grab_offset = self
                    .registry
                    .screen_of(&id)
                    .map_or(Vec2::ZERO, |el_pos| el_pos - pos);
                if self.sessions.begin(pointer, Some(&id), pos, grab_offset) {
                    self.mode = BoardMode::Dragging;
                    self.quality = UpdateQuality::Low;
                    if let Some(el) = self.registry.get_mut(&id) {
                        el.highlighted = true;
                        el.last_drag_time = time;
                    }
                    self.hooks.emit(&BoardEvent::Hit { element: id, pos });
                }
            }
            None => {
                if self.sessions.begin(pointer, None, pos, Vec2::ZERO) {
                    let bg = self.sessions.background_sessions();
                    match bg.len() {
                        1 if self.mode == BoardMode::Idle
                            && self.config.pan_enabled
                            && self.config.one_finger_pan =>
                        {
                            self.mode = BoardMode::PanningOrigin;
                        }
                        // A second finger cancels a one-finger pan. An
                        // element gesture in flight is not interrupted.
                        2 if matches!(self.mode, BoardMode::Idle | BoardMode::PanningOrigin) => {
                            self.pinch =
                                Some(PinchClassifier::begin(bg[0].current, bg[1].current));
                            self.mode = BoardMode::ZoomGesture;
                        }
                        _ => {}
                    }
                }
            }
        }
        self.throttle.reset();
        self.hooks.emit(&BoardEvent::Down { pos });
    }

    fn on_move(&mut self, pointer: PointerId, pos: Point, time: u64) {
        let pos = self.cs.client_to_screen(pos);
        if self.mode == BoardMode::Selecting {
            if let Some(sel) = &mut self.selection {
                sel.update(pos);
            }
            return;
        }
        if !self.throttle.admit(time) {
            return;
        }
        // Moves for unknown pointers (rejected third finger, missed down)
        // are ignored.
        if !self
            .sessions
            .record_move(pointer, pos, self.config.click.click_slop_px)
        {
            return;
        }
        let Some(session) = self.sessions.get(pointer).cloned() else {
            return;
        };
        if session.moved {
            self.element_clicks.cancel();
            self.board_clicks.cancel();
        }

        match &session.target {
            Some(id) => {
                let id = id.clone();
                if self.sessions.fingers_on(&id) == 2 {
                    let fingers = self.sessions.sessions_on(&id);
                    let prev = [fingers[0].previous, fingers[1].previous];
                    let now_pos = [fingers[0].current, fingers[1].current];
                    two_finger_transform(&mut self.registry, &self.cs, &id, prev, now_pos, time);
                    self.sessions.commit_steps(Some(&id));
                } else {
                    drag_to(
                        &mut self.registry,
                        &self.cs,
                        &id,
                        pos,
                        session.grab_offset,
                        session.step(),
                        time,
                        &self.config.drag,
                    );
                }
                self.update();
                self.hooks.emit(&BoardEvent::Drag { element: id });
            }
            None => match self.mode {
                BoardMode::PanningOrigin => {
                    self.move_origin(session.step());
                }
                BoardMode::ZoomGesture => self.two_finger_view_step(),
                _ => {}
            },
        }
    }

    fn two_finger_view_step(&mut self) {
        let bg = self.sessions.background_sessions();
        if bg.len() < 2 {
            return;
        }
        let (a, b) = (bg[0], bg[1]);
        let (pa, pb) = (a.previous, b.previous);
        let (ca, cb) = (a.current, b.current);
        let step = ((ca - pa) + (cb - pb)) / 2.0;
        let prev_dist = (pb - pa).hypot();
        let cur_dist = (cb - ca).hypot();
        let kind = match &mut self.pinch {
            Some(pinch) => pinch.classify(ca, cb, &self.config.pinch),
            None => return,
        };
        match kind {
            TwoFingerKind::Pan => {
                self.move_origin(step);
                self.sessions.commit_steps(None);
            }
            TwoFingerKind::Pinch => {
                if prev_dist > 0.0 && cur_dist > 0.0 {
                    let factor = cur_dist / prev_dist;
                    let anchor = self.cs.screen_to_user(ca.midpoint(cb));
                    let ok = viewport::zoom_to(
                        &mut self.cs,
                        self.width,
                        self.height,
                        Some(anchor),
                        factor,
                        factor,
                        &self.config.zoom,
                    );
                    if ok {
                        self.after_view_change();
                    }
                }
                self.sessions.commit_steps(None);
            }
            TwoFingerKind::Undecided => {}
        }
    }

    fn on_up(&mut self, pointer: PointerId, pos: Point, time: u64) {
        let pos = self.cs.client_to_screen(pos);
        let Some(session) = self.sessions.end(pointer) else {
            return;
        };

        // Releasing a selection finalizes it; no click recognition runs.
        if self.mode == BoardMode::Selecting {
            if let Some(sel) = self.selection.take() {
                self.selected = sel.contained(&self.registry);
            }
            self.mode = BoardMode::Idle;
            if self.sessions.is_empty() {
                self.settle();
            }
            self.hooks.emit(&BoardEvent::Up);
            return;
        }

        if !session.moved {
            if let Some(target) = &session.target {
                if let Some(ClickOutcome::DoubleClick { target, pos }) =
                    self.element_clicks
                        .on_tap(target.clone(), pos, time, &self.config.click)
                {
                    self.hooks.emit(&BoardEvent::DblClick {
                        element: Some(target),
                        pos,
                    });
                }
            }
            if let Some(ClickOutcome::DoubleClick { pos, .. }) =
                self.board_clicks.on_tap((), pos, time, &self.config.click)
            {
                self.hooks.emit(&BoardEvent::DblClick { element: None, pos });
            }
        }

        if let Some(id) = &session.target
            && self.sessions.fingers_on(id) == 0
            && let Some(el) = self.registry.get_mut(id)
        {
            el.highlighted = false;
        }

        if self.sessions.is_empty() {
            self.settle();
        }
        self.hooks.emit(&BoardEvent::Up);
    }

    fn on_cancel(&mut self, pointer: PointerId) {
        if self.sessions.end(pointer).is_none() {
            return;
        }
        if self.sessions.is_empty() {
            self.selection = None;
            self.settle();
        }
        self.hooks.emit(&BoardEvent::Up);
    }

    /// Pointer left the tracking area: highlight teardown only. An active
    /// drag survives until a real up or cancel.
    fn on_leave(&mut self) {
        for el in self.registry.iter_mut() {
            el.highlighted = false;
        }
    }

    fn on_wheel(&mut self, pos: Point, delta: Vec2) {
        let anchor = self.cs.client_to_user(pos);
        if delta.y < 0.0 {
            self.zoom_in(Some(anchor));
        } else if delta.y > 0.0 {
            self.zoom_out(Some(anchor));
        }
    }

    fn on_key(&mut self, key: Key) {
        let d = self.config.key_pan_px;
        match key {
            Key::ArrowLeft => self.move_origin(Vec2::new(d, 0.0)),
            Key::ArrowRight => self.move_origin(Vec2::new(-d, 0.0)),
            Key::ArrowUp => self.move_origin(Vec2::new(0.0, d)),
            Key::ArrowDown => self.move_origin(Vec2::new(0.0, -d)),
            Key::PageUp => {
                self.zoom_in(None);
            }
            Key::PageDown => {
                self.zoom_out(None);
            }
            Key::Other(_) => {}
        }
    }

    fn settle(&mut self) {
        if self.mode != BoardMode::Selecting {
            self.mode = BoardMode::Idle;
        }
        self.pinch = None;
        self.quality = UpdateQuality::High;
        self.full_update();
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("id", &self.id)
            .field("size", &(self.width, self.height))
            .field("info", &self.debug_info())
            .finish_non_exhaustive()
    }
}
