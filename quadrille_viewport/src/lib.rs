// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadrille Viewport: what part of the logical plane the board shows.
//!
//! The board's [`CoordinateSystem`] holds origin, units, and zoom; this
//! crate provides the operations that reconfigure it as a whole:
//!
//! - [`set_bounding_box`]: show a given logical rectangle, optionally
//!   preserving the aspect ratio by letting the dominant axis win and
//!   centering the other.
//! - [`clamp_to_max`]: restrict a requested rectangle to a configured
//!   maximum box, refusing requests with no overlap at all.
//! - [`zoom_in`] / [`zoom_out`] / [`zoom_to`]: multiplicative zoom steps
//!   around an anchor point, clamped to [`ZoomSettings`] bounds.
//! - [`zoom_100`]: reset the cumulative zoom to 1 while keeping the view
//!   center.
//! - [`resize`]: adapt to a new canvas size, either preserving the visible
//!   logical rectangle or preserving units and re-centering the origin.
//!
//! This crate is `no_std`.

#![no_std]

use core::fmt;

use kurbo::{Point, Vec2};
use quadrille_coords::{CoordinateSystem, EPS};

/// The logical rectangle a board displays: `[left, top, right, bottom]`
/// with `left < right` and `bottom < top` (logical y grows upward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Logical x at the left canvas edge.
    pub left: f64,
    /// Logical y at the top canvas edge.
    pub top: f64,
    /// Logical x at the right canvas edge.
    pub right: f64,
    /// Logical y at the bottom canvas edge.
    pub bottom: f64,
}

impl BoundingBox {
    /// Creates a bounding box from its four edges.
    #[must_use]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Horizontal logical extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical logical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Whether a logical point lies inside the box.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.bottom && p.y <= self.top
    }

    /// The overlap of two boxes. The result may have non-positive extent
    /// when the boxes are disjoint.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            left: self.left.max(other.left),
            top: self.top.min(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// Restricts a requested box to a maximum box.
///
/// A request partially outside the maximum is clamped to the overlap; a
/// request with (within epsilon) no overlap is refused, leaving the caller
/// free to keep its current view.
pub fn clamp_to_max(bbox: BoundingBox, max: BoundingBox) -> Result<BoundingBox, ViewportError> {
    let clamped = bbox.intersect(&max);
    if clamped.width() <= EPS || clamped.height() <= EPS {
        return Err(ViewportError::OutsideMaxBox);
    }
    Ok(clamped)
}

/// Errors from view reconfiguration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportError {
    /// A bounding box edge was NaN or infinite.
    NonFiniteBox,
    /// The bounding box has (near-)zero extent on some axis.
    DegenerateBox,
    /// The canvas size is not positive.
    BadCanvasSize,
    /// The requested box lies entirely outside the configured maximum.
    OutsideMaxBox,
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteBox => write!(f, "bounding box has a non-finite edge"),
            Self::DegenerateBox => write!(f, "bounding box has zero extent"),
            Self::BadCanvasSize => write!(f, "canvas size must be positive"),
            Self::OutsideMaxBox => write!(f, "bounding box lies outside the maximum box"),
        }
    }
}

impl core::error::Error for ViewportError {}

/// Zoom step factors and clamps.
#[derive(Clone, Copy, Debug)]
pub struct ZoomSettings {
    /// Multiplicative step along x per zoom-in.
    pub factor_x: f64,
    /// Multiplicative step along y per zoom-in.
    pub factor_y: f64,
    /// Smallest allowed cumulative zoom.
    pub min: f64,
    /// Largest allowed cumulative zoom.
    pub max: f64,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            factor_x: 1.25,
            factor_y: 1.25,
            min: 0.001,
            max: 1000.0,
        }
    }
}

/// Reconfigures the coordinate system to display `bbox` on a
/// `width` x `height` pixel canvas.
///
/// With `keep_aspect_ratio`, the axis that would need the smaller
/// pixels-per-unit scale dominates: both axes adopt that scale, and the
/// other axis's range grows symmetrically so the requested box stays fully
/// visible, centered.
///
/// The cumulative zoom factors are preserved: the computed total scale is
/// split as `unit * zoom`, so a later zoom reset returns to the units this
/// call establishes.
pub fn set_bounding_box(
    cs: &mut CoordinateSystem,
    width: f64,
    height: f64,
    bbox: BoundingBox,
    keep_aspect_ratio: bool,
) -> Result<(), ViewportError> {
    if !(width > 0.0 && height > 0.0) {
        return Err(ViewportError::BadCanvasSize);
    }
    if ![bbox.left, bbox.top, bbox.right, bbox.bottom]
        .iter()
        .all(|v| v.is_finite())
    {
        return Err(ViewportError::NonFiniteBox);
    }
    if bbox.width() <= EPS || bbox.height() <= EPS {
        return Err(ViewportError::DegenerateBox);
    }

    let mut bbox = bbox;
    let mut stretch_x = width / bbox.width();
    let mut stretch_y = height / bbox.height();
    if keep_aspect_ratio {
        if stretch_x < stretch_y {
            // x dominates: widen the y range around its center.
            stretch_y = stretch_x;
            let half = height / stretch_y / 2.0;
            let cy = (bbox.top + bbox.bottom) / 2.0;
            bbox.top = cy + half;
            bbox.bottom = cy - half;
        } else {
            stretch_x = stretch_y;
            let half = width / stretch_x / 2.0;
            let cx = (bbox.left + bbox.right) / 2.0;
            bbox.left = cx - half;
            bbox.right = cx + half;
        }
    }

    cs.set_units(stretch_x / cs.zoom_x(), stretch_y / cs.zoom_y());
    cs.set_origin(Point::new(-bbox.left * stretch_x, bbox.top * stretch_y));
    Ok(())
}

/// The logical rectangle currently visible on a `width` x `height` canvas.
#[must_use]
pub fn bounding_box(cs: &CoordinateSystem, width: f64, height: f64) -> BoundingBox {
    let tl = cs.screen_to_user(Point::ZERO);
    let br = cs.screen_to_user(Point::new(width, height));
    BoundingBox::new(tl.x, tl.y, br.x, br.y)
}

/// Zooms in one step around `anchor` (logical coordinates; `None` means
/// the view center). Returns `false` without changing anything when either
/// axis would exceed [`ZoomSettings::max`].
pub fn zoom_in(
    cs: &mut CoordinateSystem,
    width: f64,
    height: f64,
    anchor: Option<Point>,
    settings: &ZoomSettings,
) -> bool {
    zoom_to(cs, width, height, anchor, settings.factor_x, settings.factor_y, settings)
}

/// Zooms out one step around `anchor`. Returns `false` without changing
/// anything when either axis would fall below [`ZoomSettings::min`].
pub fn zoom_out(
    cs: &mut CoordinateSystem,
    width: f64,
    height: f64,
    anchor: Option<Point>,
    settings: &ZoomSettings,
) -> bool {
    zoom_to(
        cs,
        width,
        height,
        anchor,
        1.0 / settings.factor_x,
        1.0 / settings.factor_y,
        settings,
    )
}

/// Applies arbitrary per-axis zoom factors around `anchor`, clamped to the
/// settings' range. The anchor keeps its screen position: the visible box
/// shrinks or grows with the anchor as the fixed point.
pub fn zoom_to(
    cs: &mut CoordinateSystem,
    width: f64,
    height: f64,
    anchor: Option<Point>,
    factor_x: f64,
    factor_y: f64,
    settings: &ZoomSettings,
) -> bool {
    let zx = cs.zoom_x() * factor_x;
    let zy = cs.zoom_y() * factor_y;
    if zx < settings.min || zx > settings.max || zy < settings.min || zy > settings.max {
        return false;
    }

    let bb = bounding_box(cs, width, height);
    let anchor = anchor.unwrap_or_else(|| bb.center());
    // Fraction of the box left of / above the anchor; the shrink is
    // distributed so the anchor keeps its relative position.
    let lr = ((anchor.x - bb.left) / bb.width()).clamp(0.0, 1.0);
    let tr = ((bb.top - anchor.y) / bb.height()).clamp(0.0, 1.0);
    let dx = bb.width() * (1.0 - 1.0 / factor_x);
    let dy = bb.height() * (1.0 - 1.0 / factor_y);
    let new_box = BoundingBox::new(
        bb.left + dx * lr,
        bb.top - dy * tr,
        bb.right - dx * (1.0 - lr),
        bb.bottom + dy * (1.0 - tr),
    );

    cs.set_zoom(zx, zy);
    set_bounding_box(cs, width, height, new_box, false).is_ok()
}

/// Resets the cumulative zoom to 1 on both axes, keeping the view center.
///
/// The visible box is scaled by the cumulative zoom factors around its
/// center, so the board returns to the magnification the units were
/// configured with.
pub fn zoom_100(cs: &mut CoordinateSystem, width: f64, height: f64) {
    let bb = bounding_box(cs, width, height);
    let c = bb.center();
    let half_w = bb.width() * cs.zoom_x() / 2.0;
    let half_h = bb.height() * cs.zoom_y() / 2.0;
    let restored = BoundingBox::new(c.x - half_w, c.y + half_h, c.x + half_w, c.y - half_h);
    cs.set_zoom(1.0, 1.0);
    // The restored box has positive extent whenever the current one does.
    let _ = set_bounding_box(cs, width, height, restored, false);
}

/// What a canvas resize should preserve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizePolicy {
    /// Keep the visible logical rectangle; units rescale to fit.
    PreserveView,
    /// Keep units and zoom; the origin shifts by half the size delta so
    /// the view center stays centered.
    PreserveUnits,
}

/// Adapts the coordinate system to a new canvas size.
pub fn resize(
    cs: &mut CoordinateSystem,
    old: (f64, f64),
    new: (f64, f64),
    policy: ResizePolicy,
) -> Result<(), ViewportError> {
    if !(new.0 > 0.0 && new.1 > 0.0) {
        return Err(ViewportError::BadCanvasSize);
    }
    match policy {
        ResizePolicy::PreserveView => {
            let bb = bounding_box(cs, old.0, old.1);
            set_bounding_box(cs, new.0, new.1, bb, false)
        }
        ResizePolicy::PreserveUnits => {
            cs.translate_origin(Vec2::new((new.0 - old.0) / 2.0, (new.1 - old.1) / 2.0));
            Ok(())
        }
    }
}
