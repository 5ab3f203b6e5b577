// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};
use quadrille_coords::{CoordinateSystem, CoordsKind};
use quadrille_registry::{ElementFlags, Registry};
use smallvec::SmallVec;

/// Tunables for drag application.
#[derive(Clone, Copy, Debug)]
pub struct DragConfig {
    /// Grid pitch in user units along x for grid-snapped elements.
    pub snap_size_x: f64,
    /// Grid pitch in user units along y for grid-snapped elements.
    pub snap_size_y: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            snap_size_x: 1.0,
            snap_size_y: 1.0,
        }
    }
}

/// Applies a single-pointer drag step to an element.
///
/// Coordinate-bearing elements (points, texts, images) follow the pointer
/// absolutely: their screen position becomes `pointer + grab_offset`, so
/// accumulated rounding never makes the element creep away from the finger.
/// Shape elements are translated relatively by `step`, the screen delta of
/// this move, applied to every defining point.
///
/// Returns the ids whose geometry changed (the element itself, or its
/// defining points), for the caller to mark for update.
pub fn drag_to(
    registry: &mut Registry,
    cs: &CoordinateSystem,
    id: &str,
    pointer: Point,
    grab_offset: Vec2,
    step: Vec2,
    now: u64,
    config: &DragConfig,
) -> Vec<String> {
    let Some(el) = registry.get_mut(id) else {
        return Vec::new();
    };
    if !el.is_draggable() {
        return Vec::new();
    }
    el.last_drag_time = now;
    if el.carries_coords() {
        let snap = el.flags.contains(ElementFlags::SNAP_TO_GRID);
        if let Some(coords) = el.coords_mut() {
            coords.set(cs, CoordsKind::Screen, pointer + grab_offset);
            if snap {
                let u = coords.user();
                let snapped = Point::new(
                    (u.x / config.snap_size_x).round() * config.snap_size_x,
                    (u.y / config.snap_size_y).round() * config.snap_size_y,
                );
                coords.set(cs, CoordsKind::User, snapped);
            }
        }
        el.needs_update = true;
        alloc::vec![String::from(id)]
    } else {
        translate_shape(registry, cs, id, step, now)
    }
}

/// Translates a shape by moving each of its defining points by `step`
/// (screen pixels). Shared defining points move once. Fixed defining
/// points do not move, so a shape pinned by one point deforms rather than
/// drags it.
pub fn translate_shape(
    registry: &mut Registry,
    cs: &CoordinateSystem,
    id: &str,
    step: Vec2,
    now: u64,
) -> Vec<String> {
    let Some(el) = registry.get(id) else {
        return Vec::new();
    };
    let mut point_ids: SmallVec<[String; 4]> =
        el.defining_points().iter().map(|&s| String::from(s)).collect();
    point_ids.dedup();
    let mut moved = Vec::with_capacity(point_ids.len());
    for pid in point_ids {
        let Some(p) = registry.get_mut(&pid) else {
            continue;
        };
        if p.flags.contains(ElementFlags::FIXED) {
            continue;
        }
        if let Some(coords) = p.coords_mut() {
            let screen = coords.screen();
            coords.set(cs, CoordsKind::Screen, screen + step);
            p.needs_update = true;
            p.last_drag_time = now;
            moved.push(pid);
        }
    }
    if let Some(el) = registry.get_mut(id) {
        el.needs_update = true;
    }
    moved
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};
    use quadrille_coords::CoordinateSystem;
    use quadrille_registry::{Element, ElementFlags, Geometry, Registry};

    use super::{drag_to, DragConfig};

    fn cs() -> CoordinateSystem {
        CoordinateSystem::new(Point::new(250.0, 250.0), 50.0, 50.0)
    }

    #[test]
    fn point_follows_pointer_absolutely() {
        let cs = cs();
        let mut reg = Registry::new("b");
        let id = reg.register(Element::new(Geometry::point(&cs, Point::new(0.0, 0.0))));
        // Pointer grabbed 2 px right of the point; moving to 300,250 keeps
        // the offset, so the point lands at 298,250 on screen = (0.96, 0).
        let moved = drag_to(
            &mut reg,
            &cs,
            &id,
            Point::new(300.0, 250.0),
            Vec2::new(-2.0, 0.0),
            Vec2::new(50.0, 0.0),
            100,
            &DragConfig::default(),
        );
        assert_eq!(moved, [id.clone()]);
        let u = reg.user_of(&id).unwrap();
        assert!((u.x - 0.96).abs() < 1e-12);
        assert_eq!(reg.get(&id).unwrap().last_drag_time, 100);
    }

    #[test]
    fn snap_to_grid_rounds_user_position() {
        let cs = cs();
        let mut reg = Registry::new("b");
        let mut e = Element::new(Geometry::point(&cs, Point::new(0.0, 0.0)));
        e.flags.insert(ElementFlags::SNAP_TO_GRID);
        let id = reg.register(e);
        drag_to(
            &mut reg,
            &cs,
            &id,
            Point::new(283.0, 250.0),
            Vec2::ZERO,
            Vec2::ZERO,
            1,
            &DragConfig::default(),
        );
        // 283 px is 0.66 units; snaps to 1.0.
        let u = reg.user_of(&id).unwrap();
        assert!((u.x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn shape_drag_translates_defining_points() {
        let cs = cs();
        let mut reg = Registry::new("b");
        let a = reg.register(Element::new(Geometry::point(&cs, Point::new(0.0, 0.0))));
        let b = reg.register(Element::new(Geometry::point(&cs, Point::new(1.0, 0.0))));
        let l = reg.register(Element::new(Geometry::Line {
            p1: a.clone(),
            p2: b.clone(),
        }));
        let moved = drag_to(
            &mut reg,
            &cs,
            &l,
            Point::new(280.0, 250.0),
            Vec2::ZERO,
            Vec2::new(50.0, -50.0),
            7,
            &DragConfig::default(),
        );
        assert_eq!(moved.len(), 2);
        let ua = reg.user_of(&a).unwrap();
        let ub = reg.user_of(&b).unwrap();
        assert!((ua.x - 1.0).abs() < 1e-12 && (ua.y - 1.0).abs() < 1e-12);
        assert!((ub.x - 2.0).abs() < 1e-12 && (ub.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn fixed_defining_point_stays_put() {
        let cs = cs();
        let mut reg = Registry::new("b");
        let a = reg.register(Element::new(Geometry::point(&cs, Point::new(0.0, 0.0))));
        let b = reg.register(Element::new(Geometry::point(&cs, Point::new(1.0, 0.0))));
        reg.get_mut(&a).unwrap().flags.insert(ElementFlags::FIXED);
        let l = reg.register(Element::new(Geometry::Line {
            p1: a.clone(),
            p2: b.clone(),
        }));
        let moved = drag_to(
            &mut reg,
            &cs,
            &l,
            Point::ZERO,
            Vec2::ZERO,
            Vec2::new(50.0, 0.0),
            7,
            &DragConfig::default(),
        );
        assert_eq!(moved, [b.clone()]);
        assert!(reg.user_of(&a).unwrap().x.abs() < 1e-12);
    }
}
