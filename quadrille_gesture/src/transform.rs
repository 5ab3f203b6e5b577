// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};
use quadrille_coords::{CoordinateSystem, CoordsKind, EPS};
use quadrille_registry::{ElementFlags, Registry};
use smallvec::{smallvec, SmallVec};

/// Applies a two-finger step to an element.
///
/// `prev` and `now` are the two fingers' screen positions before and after
/// the move, in the same finger order. The step is interpreted as a
/// similarity transform in user space: the finger midpoint translation plus
/// the rotation/scale that carries the previous finger vector onto the new
/// one. The element's flags restrict the transform: without
/// [`ElementFlags::SCALABLE`] the scale part is normalized away, without
/// [`ElementFlags::ROTATABLE`] the rotation part is dropped, leaving pure
/// translation (plus scale, if allowed).
///
/// The whole step is cancelled (no-op, empty result) when any defining
/// point is fixed or grid-snapped; a partial transform would tear the shape
/// apart or fight the snap every frame.
///
/// Returns the ids whose geometry changed.
pub fn two_finger_transform(
    registry: &mut Registry,
    cs: &CoordinateSystem,
    id: &str,
    prev: [Point; 2],
    now: [Point; 2],
    time: u64,
) -> Vec<String> {
    let Some(el) = registry.get(id) else {
        return Vec::new();
    };
    let scalable = el.flags.contains(ElementFlags::SCALABLE);
    let rotatable = el.flags.contains(ElementFlags::ROTATABLE);

    let targets: SmallVec<[String; 4]> = if el.carries_coords() {
        smallvec![String::from(id)]
    } else {
        let mut ids: SmallVec<[String; 4]> =
            el.defining_points().iter().map(|&s| String::from(s)).collect();
        ids.dedup();
        ids
    };
    for pid in &targets {
        let Some(p) = registry.get(pid) else {
            return Vec::new();
        };
        if p.flags.contains(ElementFlags::FIXED) || p.flags.contains(ElementFlags::SNAP_TO_GRID) {
            return Vec::new();
        }
    }

    // Work in user space so the transform commutes with pan/zoom.
    let (o1, o2) = (cs.screen_to_user(prev[0]), cs.screen_to_user(prev[1]));
    let (n1, n2) = (cs.screen_to_user(now[0]), cs.screen_to_user(now[1]));
    let ov = o2 - o1;
    let nv = n2 - n1;
    if ov.hypot() < EPS {
        return Vec::new();
    }

    // Complex ratio nv / ov: rotation and scale of the finger vector.
    let denom = ov.hypot2();
    let mut r = Vec2::new(
        (nv.x * ov.x + nv.y * ov.y) / denom,
        (nv.y * ov.x - nv.x * ov.y) / denom,
    );
    if !scalable {
        let m = r.hypot();
        if m < EPS {
            return Vec::new();
        }
        r /= m;
    }
    if !rotatable {
        r = Vec2::new(r.hypot(), 0.0);
    }

    let omid = o1.midpoint(o2);
    let nmid = n1.midpoint(n2);
    let mut moved = Vec::with_capacity(targets.len());
    for pid in targets {
        let Some(p) = registry.get_mut(&pid) else {
            continue;
        };
        if let Some(coords) = p.coords_mut() {
            let d = coords.user() - omid;
            // Complex multiplication r * d, then re-anchor at the new midpoint.
            let rotated = Vec2::new(r.x * d.x - r.y * d.y, r.x * d.y + r.y * d.x);
            coords.set(cs, CoordsKind::User, nmid + rotated);
            p.needs_update = true;
            p.last_drag_time = time;
            moved.push(pid);
        }
    }
    if let Some(el) = registry.get_mut(id) {
        el.needs_update = true;
        el.last_drag_time = time;
    }
    moved
}
