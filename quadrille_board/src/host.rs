// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Affine;

/// What the embedding environment must answer for a board.
///
/// The board never touches a DOM, a clock, or a device API directly; the
/// host implements this trait and the embedder forwards raw input through
/// [`Board::handle_raw`](crate::Board::handle_raw). Capability absence is
/// never fatal: a host without pointer events falls back to mouse+touch
/// listeners, a host without CSS transforms reports the identity.
pub trait Host {
    /// Current drawing surface size in pixels.
    fn container_size(&self) -> (f64, f64);

    /// The container's external transform (CSS transforms, page zoom).
    /// Identity when the host has no such concept.
    fn container_transform(&self) -> Affine {
        Affine::IDENTITY
    }

    /// Whether the host delivers unified pointer events. Feature-detected
    /// once at listener attach; the board never mixes device families.
    fn pointer_events_supported(&self) -> bool {
        true
    }
}

/// A fixed-size host with no container transform, for tests and
/// server-side use.
#[derive(Clone, Copy, Debug)]
pub struct StaticHost {
    /// Surface width in pixels.
    pub width: f64,
    /// Surface height in pixels.
    pub height: f64,
    /// Pointer-event capability flag.
    pub pointer_events: bool,
}

impl StaticHost {
    /// Creates a pointer-capable host of the given size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            pointer_events: true,
        }
    }
}

impl Host for StaticHost {
    fn container_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn pointer_events_supported(&self) -> bool {
        self.pointer_events
    }
}
