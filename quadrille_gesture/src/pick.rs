// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use kurbo::Point;
use quadrille_coords::CoordinateSystem;
use quadrille_registry::{ElementFlags, Registry};

/// Picks the element a drag at `pt` should grab, if any.
///
/// Candidates must be visible, draggable, and not fixed, and must pass the
/// screen-space hit test. Among candidates the highest layer wins; within a
/// layer the most recently dragged element wins, so stacked points stay
/// grabbable in the order the user last touched them. Label elements are
/// skipped unless their labelled element opts in with
/// [`ElementFlags::LABEL_HITS`], in which case the pick redirects to the
/// labelled element itself.
#[must_use]
pub fn pick_drag_target(
    registry: &Registry,
    pt: Point,
    cs: &CoordinateSystem,
    tolerance: f64,
) -> Option<String> {
    let mut best: Option<(&str, i32, u64)> = None;
    for el in registry.iter() {
        let (candidate, layer, drag_time) = match &el.label_of {
            Some(owner_id) => {
                // A label hits on behalf of its owner, and only when the
                // owner opted in.
                let Some(owner) = registry.get(owner_id) else {
                    continue;
                };
                if !owner.flags.contains(ElementFlags::LABEL_HITS) || !owner.is_draggable() {
                    continue;
                }
                if !el.flags.contains(ElementFlags::VISIBLE) {
                    continue;
                }
                if !registry.hit_test(&el.id, pt, cs, tolerance) {
                    continue;
                }
                (owner.id.as_str(), owner.layer, owner.last_drag_time)
            }
            None => {
                if !el.is_draggable() {
                    continue;
                }
                if !registry.hit_test(&el.id, pt, cs, tolerance) {
                    continue;
                }
                (el.id.as_str(), el.layer, el.last_drag_time)
            }
        };
        let better = match best {
            None => true,
            Some((_, best_layer, best_time)) => {
                layer > best_layer || (layer == best_layer && drag_time >= best_time)
            }
        };
        if better {
            best = Some((candidate, layer, drag_time));
        }
    }
    best.map(|(id, _, _)| String::from(id))
}

#[cfg(test)]
mod tests {
    use kurbo::Point;
    use quadrille_coords::CoordinateSystem;
    use quadrille_registry::{Element, ElementFlags, Geometry, Registry};

    use super::pick_drag_target;

    fn cs() -> CoordinateSystem {
        CoordinateSystem::new(Point::new(250.0, 250.0), 50.0, 50.0)
    }

    #[test]
    fn higher_layer_wins() {
        let cs = cs();
        let mut reg = Registry::new("b");
        let lo = reg.register(Element::new(Geometry::point(&cs, Point::new(0.0, 0.0))));
        let hi_el = {
            let mut e = Element::new(Geometry::point(&cs, Point::new(0.0, 0.0)));
            e.layer = 5;
            e
        };
        let hi = reg.register(hi_el);
        let picked = pick_drag_target(&reg, Point::new(250.0, 250.0), &cs, 5.0);
        assert_eq!(picked.as_deref(), Some(hi.as_str()));
        assert_ne!(picked.as_deref(), Some(lo.as_str()));
    }

    #[test]
    fn last_dragged_wins_within_a_layer() {
        let cs = cs();
        let mut reg = Registry::new("b");
        let a = reg.register(Element::new(Geometry::point(&cs, Point::new(0.0, 0.0))));
        let b = reg.register(Element::new(Geometry::point(&cs, Point::new(0.0, 0.0))));
        reg.get_mut(&a).unwrap().last_drag_time = 5000;
        reg.get_mut(&b).unwrap().last_drag_time = 1000;
        let picked = pick_drag_target(&reg, Point::new(250.0, 250.0), &cs, 5.0);
        assert_eq!(picked.as_deref(), Some(a.as_str()));
    }

    #[test]
    fn fixed_and_invisible_elements_are_skipped() {
        let cs = cs();
        let mut reg = Registry::new("b");
        let a = reg.register(Element::new(Geometry::point(&cs, Point::new(0.0, 0.0))));
        reg.get_mut(&a).unwrap().flags.insert(ElementFlags::FIXED);
        assert!(pick_drag_target(&reg, Point::new(250.0, 250.0), &cs, 5.0).is_none());

        reg.get_mut(&a).unwrap().flags.remove(ElementFlags::FIXED);
        reg.get_mut(&a).unwrap().flags.remove(ElementFlags::VISIBLE);
        assert!(pick_drag_target(&reg, Point::new(250.0, 250.0), &cs, 5.0).is_none());
    }

    #[test]
    fn label_redirects_to_owner_only_when_opted_in() {
        let cs = cs();
        let mut reg = Registry::new("b");
        let owner = reg.register(Element::new(Geometry::point(&cs, Point::new(0.0, 0.0))));
        let label = {
            let mut e = Element::new(Geometry::Text {
                coords: quadrille_coords::Coords::from_user(&cs, Point::new(2.0, 0.0)),
                content: "A".into(),
            });
            e.label_of = Some(owner.clone());
            reg.register(e)
        };
        reg.get_mut(&owner).unwrap().label = Some(label);

        // Label position on screen is (350, 250); no opt-in, no pick.
        assert!(pick_drag_target(&reg, Point::new(350.0, 250.0), &cs, 5.0).is_none());

        reg.get_mut(&owner).unwrap().flags.insert(ElementFlags::LABEL_HITS);
        let picked = pick_drag_target(&reg, Point::new(350.0, 250.0), &cs, 5.0);
        assert_eq!(picked.as_deref(), Some(owner.as_str()));
    }
}
