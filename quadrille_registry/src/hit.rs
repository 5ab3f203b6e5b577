// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen-space hit predicates for each element kind.
//!
//! Hit tests run in screen space so tolerances are device pixels regardless
//! of zoom. Shape kinds resolve their defining points through the registry;
//! a missing or non-real defining point makes the predicate return `false`
//! (degenerate, not an error), which keeps the interaction layer robust when
//! NaN propagates through a single element's geometry.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Line, ParamCurveNearest, Point, Rect};
use quadrille_coords::CoordinateSystem;

use crate::element::{CircleRadius, Geometry};
use crate::registry::Registry;

impl Registry {
    /// Whether the pointer position (screen pixels) hits the element.
    ///
    /// `tolerance` is the pick radius in pixels. Unknown ids miss.
    #[must_use]
    pub fn hit_test(&self, id: &str, pt: Point, cs: &CoordinateSystem, tolerance: f64) -> bool {
        let Some(el) = self.get(id) else {
            return false;
        };
        match &el.geometry {
            Geometry::Point { coords } | Geometry::Text { coords, .. } => {
                coords.is_real() && (coords.screen() - pt).hypot() <= tolerance
            }
            Geometry::Image {
                coords,
                width,
                height,
            } => {
                if !coords.is_real() {
                    return false;
                }
                let anchor = coords.screen();
                let w = width * cs.stretch_x();
                let h = height * cs.stretch_y();
                // Anchor is the lower-left corner; screen y grows downward.
                let rect = Rect::new(anchor.x, anchor.y - h, anchor.x + w, anchor.y);
                rect.inflate(tolerance, tolerance).contains(pt)
            }
            Geometry::Line { p1, p2 } => match (self.screen_of(p1), self.screen_of(p2)) {
                (Some(a), Some(b)) => segment_distance(a, b, pt) <= tolerance,
                _ => false,
            },
            Geometry::Circle { center, radius } => {
                let Some(c) = self.screen_of(center) else {
                    return false;
                };
                let r_px = match radius {
                    CircleRadius::Value(r) => r * cs.stretch_x(),
                    CircleRadius::Through(p) => match self.screen_of(p) {
                        Some(q) => (q - c).hypot(),
                        None => return false,
                    },
                };
                ((pt - c).hypot() - r_px).abs() <= tolerance
            }
            Geometry::Polygon { vertices } => {
                let pts: Option<alloc::vec::Vec<Point>> =
                    vertices.iter().map(|v| self.screen_of(v)).collect();
                let Some(pts) = pts else {
                    return false;
                };
                if pts.len() < 2 {
                    return false;
                }
                // Closed ring: test every border segment.
                (0..pts.len()).any(|i| {
                    let a = pts[i];
                    let b = pts[(i + 1) % pts.len()];
                    segment_distance(a, b, pt) <= tolerance
                })
            }
            Geometry::Curve { points } => points.windows(2).any(|w| {
                let a = cs.user_to_screen(w[0]);
                let b = cs.user_to_screen(w[1]);
                segment_distance(a, b, pt) <= tolerance
            }),
            Geometry::Group { members } => members
                .iter()
                .any(|m| self.hit_test(m, pt, cs, tolerance)),
        }
    }

    /// Screen position of a coordinate-bearing element, if real.
    #[must_use]
    pub fn screen_of(&self, id: &str) -> Option<Point> {
        let coords = self.get(id)?.coords()?;
        coords.is_real().then(|| coords.screen())
    }

    /// User position of a coordinate-bearing element, if real.
    #[must_use]
    pub fn user_of(&self, id: &str) -> Option<Point> {
        let coords = self.get(id)?.coords()?;
        coords.is_real().then(|| coords.user())
    }
}

fn segment_distance(a: Point, b: Point, pt: Point) -> f64 {
    Line::new(a, b).nearest(pt, 0.0).distance_sq.sqrt()
}
