// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use quadrille_registry::Element;

use crate::update::UpdateQuality;

/// The drawing model of a renderer backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RendererKind {
    /// Retained-mode vector backend: per-element nodes updated in place.
    Svg,
    /// Immediate-mode raster backend: every frame redraws the full scene.
    Canvas,
    /// Legacy retained-mode vector backend.
    Vml,
    /// Headless: no drawing at all.
    None,
}

impl RendererKind {
    /// Whether this backend must redraw the whole scene per frame.
    #[must_use]
    pub fn is_immediate(self) -> bool {
        self == Self::Canvas
    }
}

/// The seam between the update pipeline and a drawing backend.
///
/// Implementations own the backend-specific scene state (DOM nodes, a
/// canvas context, a display list). The pipeline calls [`Renderer::display`]
/// once per element that must be (re)drawn or hidden; for immediate-mode
/// backends the pipeline first calls [`Renderer::clear`] and then displays
/// every visible element in paint order.
pub trait Renderer {
    /// The backend's drawing model.
    fn kind(&self) -> RendererKind;

    /// Draws, refreshes, or (for retained backends) hides one element.
    ///
    /// `quality` is [`UpdateQuality::Low`] while a gesture or animation is
    /// in flight; backends may skip anti-aliasing or exact curve sampling
    /// for those frames.
    fn display(&mut self, element: &Element, visible: bool, quality: UpdateQuality);

    /// Erases the scene. Called before a full immediate-mode redraw.
    fn clear(&mut self);

    /// Stops flushing drawing output; paired with
    /// [`Renderer::unsuspend_redraw`] to batch many displays into one
    /// visible frame.
    fn suspend_redraw(&mut self) {}

    /// Resumes flushing and presents everything displayed while suspended.
    fn unsuspend_redraw(&mut self) {}

    /// Adapts the backend to a new drawing surface size in pixels.
    fn resize(&mut self, _width: f64, _height: f64) {}
}

/// A renderer that draws nothing.
///
/// Used for headless boards: the geometry and interaction model work as
/// usual, only the drawing is skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::None
    }

    fn display(&mut self, _element: &Element, _visible: bool, _quality: UpdateQuality) {}

    fn clear(&mut self) {}
}
