// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

/// Pan/zoom/unit state mapping logical user coordinates to screen pixels.
///
/// The system is parametrized by:
///
/// - `origin`: the screen-space pixel position of the logical point `(0, 0)`.
/// - `unit_x` / `unit_y`: base pixels per logical unit, as configured through
///   the bounding box or explicit unit setup.
/// - `zoom_x` / `zoom_y`: cumulative zoom factors applied on top of the base
///   units. Kept separate so zoom can be reset to `1.0` without losing the
///   configured unit scale.
/// - An optional external container transform whose cached inverse corrects
///   raw input positions delivered in the embedding page's space.
///
/// The screen y axis points down; the logical y axis points up.
#[derive(Clone, Debug)]
pub struct CoordinateSystem {
    origin: Point,
    unit_x: f64,
    unit_y: f64,
    zoom_x: f64,
    zoom_y: f64,
    container_transform: Affine,
    container_inverse: Affine,
    container_dirty: bool,
}

impl CoordinateSystem {
    /// Creates a new system with the given origin and base unit scale.
    ///
    /// Zoom starts at `1.0` on both axes and no container transform is
    /// assumed (identity correction).
    #[must_use]
    pub fn new(origin: Point, unit_x: f64, unit_y: f64) -> Self {
        Self {
            origin,
            unit_x,
            unit_y,
            zoom_x: 1.0,
            zoom_y: 1.0,
            container_transform: Affine::IDENTITY,
            container_inverse: Affine::IDENTITY,
            container_dirty: false,
        }
    }

    /// Returns the screen position of the logical origin.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Moves the logical origin to the given screen position.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Translates the logical origin by a screen-space delta.
    pub fn translate_origin(&mut self, delta: Vec2) {
        self.origin += delta;
    }

    /// Returns the base pixels-per-unit scale along x.
    #[must_use]
    pub fn unit_x(&self) -> f64 {
        self.unit_x
    }

    /// Returns the base pixels-per-unit scale along y.
    #[must_use]
    pub fn unit_y(&self) -> f64 {
        self.unit_y
    }

    /// Sets the base pixels-per-unit scale.
    pub fn set_units(&mut self, unit_x: f64, unit_y: f64) {
        self.unit_x = unit_x;
        self.unit_y = unit_y;
    }

    /// Returns the cumulative zoom factor along x.
    #[must_use]
    pub fn zoom_x(&self) -> f64 {
        self.zoom_x
    }

    /// Returns the cumulative zoom factor along y.
    #[must_use]
    pub fn zoom_y(&self) -> f64 {
        self.zoom_y
    }

    /// Sets the cumulative zoom factors.
    pub fn set_zoom(&mut self, zoom_x: f64, zoom_y: f64) {
        self.zoom_x = zoom_x;
        self.zoom_y = zoom_y;
    }

    /// Effective pixels per logical unit along x (`unit_x * zoom_x`).
    #[must_use]
    pub fn stretch_x(&self) -> f64 {
        self.unit_x * self.zoom_x
    }

    /// Effective pixels per logical unit along y (`unit_y * zoom_y`).
    #[must_use]
    pub fn stretch_y(&self) -> f64 {
        self.unit_y * self.zoom_y
    }

    /// Converts a logical point to screen pixels.
    #[must_use]
    pub fn user_to_screen(&self, user: Point) -> Point {
        Point::new(
            self.origin.x + user.x * self.stretch_x(),
            self.origin.y - user.y * self.stretch_y(),
        )
    }

    /// Converts a screen pixel position to logical coordinates.
    #[must_use]
    pub fn screen_to_user(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.origin.x) / self.stretch_x(),
            (self.origin.y - screen.y) / self.stretch_y(),
        )
    }

    /// Marks the cached container-transform inverse as stale.
    ///
    /// Call this on every pointer-down/touch-start and whenever a resize or
    /// fullscreen transition happens; the embedding page may change the
    /// container transform at any time between input events.
    pub fn invalidate_container_transform(&mut self) {
        self.container_dirty = true;
    }

    /// Returns `true` if the cached inverse needs a refresh.
    #[must_use]
    pub fn container_transform_stale(&self) -> bool {
        self.container_dirty
    }

    /// Supplies the current external container transform and rebuilds the
    /// cached inverse.
    ///
    /// The board queries the host for the transform only when the cache is
    /// stale, so this is the lazy half of the invalidate/refresh pair.
    pub fn refresh_container_transform(&mut self, transform: Affine) {
        self.container_transform = transform;
        self.container_inverse = transform.inverse();
        self.container_dirty = false;
    }

    /// Returns the most recently supplied container transform.
    #[must_use]
    pub fn container_transform(&self) -> Affine {
        self.container_transform
    }

    /// Maps a raw input position (page space) into board screen space.
    ///
    /// This applies the cached inverse of the external container transform.
    /// If no transform was ever supplied, this is the identity.
    #[must_use]
    pub fn client_to_screen(&self, client: Point) -> Point {
        self.container_inverse * client
    }

    /// Full raw-input-to-logical conversion: container correction followed by
    /// the pan/zoom mapping.
    #[must_use]
    pub fn client_to_user(&self, client: Point) -> Point {
        self.screen_to_user(self.client_to_screen(client))
    }
}
