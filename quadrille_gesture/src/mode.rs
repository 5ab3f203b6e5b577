// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// The board's current interaction mode.
///
/// Exactly one mode is active at a time. Mode transitions happen on
/// pointer down/up and on two-finger classification; a pointer down while
/// [`BoardMode::Selecting`] is active short-circuits normal down handling
/// so the selection gesture owns the pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoardMode {
    /// No gesture in progress.
    #[default]
    Idle,
    /// One or more pointers are dragging elements.
    Dragging,
    /// A background gesture is panning the origin.
    PanningOrigin,
    /// A two-finger background gesture is zooming the view.
    ZoomGesture,
    /// A rubber-band selection rectangle is being drawn.
    Selecting,
}

impl BoardMode {
    /// Whether any gesture currently owns the pointer stream.
    #[must_use]
    pub fn is_active(self) -> bool {
        self != Self::Idle
    }
}
