// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;

/// A board-level notification.
#[derive(Clone, Debug, PartialEq)]
pub enum BoardEvent {
    /// An update pass completed.
    Update,
    /// The visible bounding box changed (zoom, pan, resize).
    BoundingBox,
    /// A pointer-down landed on an element.
    Hit {
        /// Id of the hit element.
        element: String,
        /// Screen position of the hit.
        pos: Point,
    },
    /// A pointer went down.
    Down {
        /// Screen position.
        pos: Point,
    },
    /// A pointer was released.
    Up,
    /// An element moved under a drag step.
    Drag {
        /// Id of the dragged element.
        element: String,
    },
    /// A click resolved (after the double-click window).
    Click {
        /// Id of the clicked element; `None` for a board-background click.
        element: Option<String>,
        /// Screen position of the tap.
        pos: Point,
    },
    /// A double click resolved.
    DblClick {
        /// Id of the clicked element; `None` for a board-background click.
        element: Option<String>,
        /// Screen position of the second tap.
        pos: Point,
    },
}

/// The event classes subscribers can register for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookKind {
    /// [`BoardEvent::Update`].
    Update,
    /// [`BoardEvent::BoundingBox`].
    BoundingBox,
    /// [`BoardEvent::Hit`].
    Hit,
    /// [`BoardEvent::Down`].
    Down,
    /// [`BoardEvent::Up`].
    Up,
    /// [`BoardEvent::Drag`].
    Drag,
    /// [`BoardEvent::Click`].
    Click,
    /// [`BoardEvent::DblClick`].
    DblClick,
}

impl BoardEvent {
    /// The hook class this event belongs to.
    #[must_use]
    pub fn kind(&self) -> HookKind {
        match self {
            Self::Update => HookKind::Update,
            Self::BoundingBox => HookKind::BoundingBox,
            Self::Hit { .. } => HookKind::Hit,
            Self::Down { .. } => HookKind::Down,
            Self::Up => HookKind::Up,
            Self::Drag { .. } => HookKind::Drag,
            Self::Click { .. } => HookKind::Click,
            Self::DblClick { .. } => HookKind::DblClick,
        }
    }
}

/// Subscriber registry for board events.
///
/// Callbacks run synchronously, in registration order, and cannot reach
/// back into the board (the borrow is held by the emitting call); they
/// record or forward and return.
#[derive(Default)]
pub struct Hooks {
    subscribers: Vec<(HookKind, Box<dyn FnMut(&BoardEvent)>)>,
}

impl Hooks {
    /// Creates an empty subscriber registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to one event class.
    pub fn on<F: FnMut(&BoardEvent) + 'static>(&mut self, kind: HookKind, callback: F) {
        self.subscribers.push((kind, Box::new(callback)));
    }

    /// Delivers an event to every matching subscriber.
    pub fn emit(&mut self, event: &BoardEvent) {
        let kind = event.kind();
        for (k, cb) in &mut self.subscribers {
            if *k == kind {
                cb(event);
            }
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use kurbo::Point;

    use super::{BoardEvent, HookKind, Hooks};

    #[test]
    fn only_matching_subscribers_fire() {
        let hits: Rc<RefCell<Vec<BoardEvent>>> = Rc::default();
        let ups = Rc::new(RefCell::new(0));
        let mut hooks = Hooks::new();
        let h = hits.clone();
        hooks.on(HookKind::Hit, move |ev| h.borrow_mut().push(ev.clone()));
        let u = ups.clone();
        hooks.on(HookKind::Up, move |_| *u.borrow_mut() += 1);

        hooks.emit(&BoardEvent::Hit {
            element: "p1".into(),
            pos: Point::ZERO,
        });
        hooks.emit(&BoardEvent::Up);
        hooks.emit(&BoardEvent::Up);

        assert_eq!(hits.borrow().len(), 1);
        assert_eq!(*ups.borrow(), 2);
    }
}
