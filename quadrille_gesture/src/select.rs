// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use quadrille_registry::{ElementFlags, Registry};

/// A rubber-band selection rectangle in screen space.
///
/// The rectangle is anchored at the pointer-down position and tracks the
/// pointer until release. Corners may be dragged in any direction; the
/// normalized [`SelectionRect::rect`] always has positive extent.
#[derive(Clone, Copy, Debug)]
pub struct SelectionRect {
    anchor: Point,
    current: Point,
}

impl SelectionRect {
    /// Starts a selection at the pointer-down position.
    #[must_use]
    pub fn begin(anchor: Point) -> Self {
        Self {
            anchor,
            current: anchor,
        }
    }

    /// Tracks the pointer.
    pub fn update(&mut self, pos: Point) {
        self.current = pos;
    }

    /// The normalized screen-space rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.anchor, self.current)
    }

    /// Ids of the visible coordinate-bearing elements whose screen
    /// position lies inside the rectangle, in registry order.
    #[must_use]
    pub fn contained(&self, registry: &Registry) -> Vec<String> {
        let rect = self.rect();
        registry
            .iter()
            .filter(|el| el.flags.contains(ElementFlags::VISIBLE) && el.carries_coords())
            .filter(|el| {
                el.coords()
                    .is_some_and(|c| c.is_real() && rect.contains(c.screen()))
            })
            .map(|el| el.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;
    use quadrille_coords::CoordinateSystem;
    use quadrille_registry::{Element, ElementFlags, Geometry, Registry};

    use super::SelectionRect;

    fn cs() -> CoordinateSystem {
        CoordinateSystem::new(Point::new(250.0, 250.0), 50.0, 50.0)
    }

    #[test]
    fn collects_points_inside_regardless_of_drag_direction() {
        let cs = cs();
        let mut reg = Registry::new("b");
        let inside = reg.register(Element::new(Geometry::point(&cs, Point::new(0.5, 0.5))));
        let outside = reg.register(Element::new(Geometry::point(&cs, Point::new(4.0, 4.0))));

        // Dragged up-left: anchor below-right of the released corner.
        let mut sel = SelectionRect::begin(Point::new(300.0, 300.0));
        sel.update(Point::new(200.0, 200.0));
        let ids = sel.contained(&reg);
        assert_eq!(ids, [inside.clone()]);
        assert!(!ids.contains(&outside));
    }

    #[test]
    fn hidden_points_are_not_selected() {
        let cs = cs();
        let mut reg = Registry::new("b");
        let id = reg.register(Element::new(Geometry::point(&cs, Point::new(0.0, 0.0))));
        reg.get_mut(&id).unwrap().flags.remove(ElementFlags::VISIBLE);
        let mut sel = SelectionRect::begin(Point::new(200.0, 200.0));
        sel.update(Point::new(300.0, 300.0));
        assert!(sel.contained(&reg).is_empty());
    }
}
