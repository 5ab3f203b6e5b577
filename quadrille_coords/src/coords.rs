// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

use crate::{CoordinateSystem, EPS};

/// Which representation a caller is supplying or asking about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordsKind {
    /// Logical/user coordinates.
    User,
    /// Screen pixel coordinates.
    Screen,
}

/// Both representations of a single point at a single moment in time.
///
/// The logical side is a homogeneous triple `[w, x, y]` so that points at
/// infinity (`w == 0`) are representable; the screen side is a plain pixel
/// pair. The two sides are linked through a [`CoordinateSystem`]: setting one
/// recomputes the other, and they must never silently diverge.
///
/// ```
/// use kurbo::Point;
/// use quadrille_coords::{CoordinateSystem, Coords, CoordsKind};
///
/// let cs = CoordinateSystem::new(Point::new(250.0, 250.0), 50.0, 50.0);
/// let c = Coords::from_user(&cs, Point::new(1.0, 0.0));
/// assert_eq!(c.screen(), Point::new(300.0, 250.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coords {
    /// Homogeneous user coordinates `[w, x, y]`, normalized so `w == 1`
    /// whenever `w` is not (numerically) zero.
    usr: [f64; 3],
    /// Screen pixel coordinates.
    scr: Point,
}

impl Coords {
    /// Creates a coords value from an affine user-space point.
    #[must_use]
    pub fn from_user(cs: &CoordinateSystem, user: Point) -> Self {
        let mut c = Self {
            usr: [1.0, user.x, user.y],
            scr: Point::ZERO,
        };
        c.usr_to_screen(cs);
        c
    }

    /// Creates a coords value from a homogeneous user triple `[w, x, y]`.
    ///
    /// The triple is normalized unless the weight is numerically zero, in
    /// which case it is kept as a point at infinity.
    #[must_use]
    pub fn from_user_homogeneous(cs: &CoordinateSystem, usr: [f64; 3]) -> Self {
        let mut c = Self {
            usr,
            scr: Point::ZERO,
        };
        c.normalize_user();
        c.usr_to_screen(cs);
        c
    }

    /// Creates a coords value from a screen pixel position.
    #[must_use]
    pub fn from_screen(cs: &CoordinateSystem, screen: Point) -> Self {
        let mut c = Self {
            usr: [1.0, 0.0, 0.0],
            scr: screen,
        };
        c.screen_to_usr(cs);
        c
    }

    /// Returns the screen pixel position.
    #[must_use]
    pub fn screen(&self) -> Point {
        self.scr
    }

    /// Returns the affine user-space position.
    ///
    /// For points at infinity the returned values are not meaningful; check
    /// [`Coords::is_real`] first.
    #[must_use]
    pub fn user(&self) -> Point {
        Point::new(self.usr[1], self.usr[2])
    }

    /// Returns the homogeneous user triple `[w, x, y]`.
    #[must_use]
    pub fn user_homogeneous(&self) -> [f64; 3] {
        self.usr
    }

    /// Replaces one representation and recomputes the other.
    pub fn set(&mut self, cs: &CoordinateSystem, kind: CoordsKind, pos: Point) {
        match kind {
            CoordsKind::User => {
                self.usr = [1.0, pos.x, pos.y];
                self.usr_to_screen(cs);
            }
            CoordsKind::Screen => {
                self.scr = pos;
                self.screen_to_usr(cs);
            }
        }
    }

    /// Recomputes the screen side from the user side.
    ///
    /// This is the per-element resync step after a pan/zoom change for
    /// ordinary elements; frozen elements go the other way.
    pub fn usr_to_screen(&mut self, cs: &CoordinateSystem) {
        let [w, x, y] = self.usr;
        let o = cs.origin();
        self.scr = Point::new(
            w * o.x + x * cs.stretch_x(),
            w * o.y - y * cs.stretch_y(),
        );
    }

    /// Recomputes the user side from the screen side.
    pub fn screen_to_usr(&mut self, cs: &CoordinateSystem) {
        let u = cs.screen_to_user(self.scr);
        self.usr = [1.0, u.x, u.y];
    }

    /// Returns `true` if the point is finite and not at infinity.
    #[must_use]
    pub fn is_real(&self) -> bool {
        !(self.usr[1] + self.usr[2]).is_nan() && self.usr[0].abs() > EPS
    }

    /// Distance to another coords value in the requested representation.
    ///
    /// In user space, two points with differing homogeneous weights are
    /// infinitely far apart.
    #[must_use]
    pub fn distance(&self, kind: CoordsKind, other: &Self) -> f64 {
        match kind {
            CoordsKind::User => {
                let dw = self.usr[0] - other.usr[0];
                if dw * dw > EPS * EPS {
                    return f64::INFINITY;
                }
                let dx = self.usr[1] - other.usr[1];
                let dy = self.usr[2] - other.usr[2];
                (dx * dx + dy * dy).sqrt()
            }
            CoordsKind::Screen => {
                let d = self.scr - other.scr;
                d.hypot()
            }
        }
    }

    fn normalize_user(&mut self) {
        if self.usr[0].abs() > EPS {
            self.usr[1] /= self.usr[0];
            self.usr[2] /= self.usr[0];
            self.usr[0] = 1.0;
        }
    }
}
