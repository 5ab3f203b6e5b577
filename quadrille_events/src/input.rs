// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

/// Stable identifier of one physical finger/mouse/pen for the duration of a
/// gesture (down → up/cancel).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

/// Which listener family delivered a raw event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceFamily {
    /// Legacy mouse events.
    Mouse,
    /// Legacy touch events.
    Touch,
    /// Unified pointer events (mouse, touch, and pen).
    Pointer,
}

bitflags::bitflags! {
    /// Keyboard modifiers captured alongside input events.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        /// Shift key held.
        const SHIFT = 0b0001;
        /// Control key held.
        const CTRL  = 0b0010;
        /// Alt/Option key held.
        const ALT   = 0b0100;
        /// Meta/Command key held.
        const META  = 0b1000;
    }
}

/// Keys the board reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Pan/step left.
    ArrowLeft,
    /// Pan/step right.
    ArrowRight,
    /// Pan/step up.
    ArrowUp,
    /// Pan/step down.
    ArrowDown,
    /// Zoom in.
    PageUp,
    /// Zoom out.
    PageDown,
    /// Any other key, by code.
    Other(u32),
}

/// A raw event as delivered by a host listener, tagged with its family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RawEvent {
    /// A pointing device was pressed.
    Down {
        /// Delivering family.
        family: DeviceFamily,
        /// Gesture-stable identifier.
        pointer: PointerId,
        /// Position in the page's coordinate space.
        pos: Point,
        /// Modifier state.
        modifiers: Modifiers,
        /// Timestamp in milliseconds.
        time: u64,
    },
    /// A pressed pointing device moved.
    Move {
        /// Delivering family.
        family: DeviceFamily,
        /// Gesture-stable identifier.
        pointer: PointerId,
        /// Position in the page's coordinate space.
        pos: Point,
        /// Modifier state.
        modifiers: Modifiers,
        /// Timestamp in milliseconds.
        time: u64,
    },
    /// A pointing device was released.
    Up {
        /// Delivering family.
        family: DeviceFamily,
        /// Gesture-stable identifier.
        pointer: PointerId,
        /// Position, if the host reports one on release.
        pos: Point,
        /// Timestamp in milliseconds.
        time: u64,
    },
    /// The gesture was cancelled by the host.
    Cancel {
        /// Delivering family.
        family: DeviceFamily,
        /// Gesture-stable identifier.
        pointer: PointerId,
        /// Timestamp in milliseconds.
        time: u64,
    },
    /// The pointer left the tracking area without an up.
    Leave {
        /// Delivering family.
        family: DeviceFamily,
        /// Timestamp in milliseconds.
        time: u64,
    },
    /// Wheel/scroll input.
    Wheel {
        /// Position in the page's coordinate space.
        pos: Point,
        /// Scroll delta.
        delta: Vec2,
        /// Modifier state.
        modifiers: Modifiers,
        /// Timestamp in milliseconds.
        time: u64,
    },
    /// A key was pressed while the board had focus.
    Key {
        /// Which key.
        key: Key,
        /// Modifier state.
        modifiers: Modifiers,
        /// Timestamp in milliseconds.
        time: u64,
    },
}

/// Normalized input: the single vocabulary the interaction core consumes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed.
    Down {
        /// Gesture-stable identifier.
        pointer: PointerId,
        /// Position in the page's coordinate space.
        pos: Point,
        /// Modifier state.
        modifiers: Modifiers,
        /// Timestamp in milliseconds.
        time: u64,
    },
    /// Pointer moved while pressed.
    Move {
        /// Gesture-stable identifier.
        pointer: PointerId,
        /// Position in the page's coordinate space.
        pos: Point,
        /// Modifier state.
        modifiers: Modifiers,
        /// Timestamp in milliseconds.
        time: u64,
    },
    /// Pointer released.
    Up {
        /// Gesture-stable identifier.
        pointer: PointerId,
        /// Position at release.
        pos: Point,
        /// Timestamp in milliseconds.
        time: u64,
    },
    /// Gesture cancelled; equivalent to up for session teardown.
    Cancel {
        /// Gesture-stable identifier.
        pointer: PointerId,
        /// Timestamp in milliseconds.
        time: u64,
    },
    /// Pointer left the tracking area (highlight teardown only).
    Leave {
        /// Timestamp in milliseconds.
        time: u64,
    },
    /// Wheel/scroll input.
    Wheel {
        /// Position in the page's coordinate space.
        pos: Point,
        /// Scroll delta.
        delta: Vec2,
        /// Modifier state.
        modifiers: Modifiers,
        /// Timestamp in milliseconds.
        time: u64,
    },
    /// Key press.
    Key {
        /// Which key.
        key: Key,
        /// Modifier state.
        modifiers: Modifiers,
        /// Timestamp in milliseconds.
        time: u64,
    },
}

/// Admits one pointing-device family and rejects the others.
///
/// Pointer-event support is feature-detected once by the host and passed to
/// [`DeviceRouter::new`]. When supported, only [`DeviceFamily::Pointer`]
/// events pass; legacy mouse/touch deliveries of the same physical gesture
/// are dropped so logical events never double-fire. Without pointer
/// support, mouse and touch are both admitted (they carry distinct pointer
/// ids, so the interaction layer can still track them independently).
#[derive(Clone, Copy, Debug)]
pub struct DeviceRouter {
    pointer_events: bool,
}

impl DeviceRouter {
    /// Creates a router; `pointer_events` is the host's capability flag.
    #[must_use]
    pub fn new(pointer_events: bool) -> Self {
        Self {
            pointer_events,
        }
    }

    /// Whether the unified pointer family is in use.
    #[must_use]
    pub fn uses_pointer_events(&self) -> bool {
        self.pointer_events
    }

    /// Normalizes a raw event, or returns `None` if its family is
    /// suppressed.
    #[must_use]
    pub fn route(&self, raw: RawEvent) -> Option<PointerEvent> {
        match raw {
            RawEvent::Down {
                family,
                pointer,
                pos,
                modifiers,
                time,
            } => self.admit(family).then_some(PointerEvent::Down {
                pointer,
                pos,
                modifiers,
                time,
            }),
            RawEvent::Move {
                family,
                pointer,
                pos,
                modifiers,
                time,
            } => self.admit(family).then_some(PointerEvent::Move {
                pointer,
                pos,
                modifiers,
                time,
            }),
            RawEvent::Up {
                family,
                pointer,
                pos,
                time,
            } => self
                .admit(family)
                .then_some(PointerEvent::Up { pointer, pos, time }),
            RawEvent::Cancel {
                family,
                pointer,
                time,
            } => self
                .admit(family)
                .then_some(PointerEvent::Cancel { pointer, time }),
            RawEvent::Leave { family, time } => {
                self.admit(family).then_some(PointerEvent::Leave { time })
            }
            RawEvent::Wheel {
                pos,
                delta,
                modifiers,
                time,
            } => Some(PointerEvent::Wheel {
                pos,
                delta,
                modifiers,
                time,
            }),
            RawEvent::Key {
                key,
                modifiers,
                time,
            } => Some(PointerEvent::Key {
                key,
                modifiers,
                time,
            }),
        }
    }

    fn admit(&self, family: DeviceFamily) -> bool {
        if self.pointer_events {
            family == DeviceFamily::Pointer
        } else {
            family != DeviceFamily::Pointer
        }
    }
}
