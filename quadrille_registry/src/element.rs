// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use quadrille_coords::{CoordinateSystem, Coords};
use smallvec::SmallVec;

bitflags::bitflags! {
    /// Cross-cutting element state shared by every kind.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u16 {
        /// Element is shown and participates in hit testing.
        const VISIBLE      = 0b0000_0001;
        /// Element may never be moved by interaction.
        const FIXED        = 0b0000_0010;
        /// Element responds to drag gestures.
        const DRAGGABLE    = 0b0000_0100;
        /// Screen position is authoritative: pan/zoom re-derives the user
        /// coordinates instead of the screen coordinates.
        const FROZEN       = 0b0000_1000;
        /// Two-finger gestures may scale this element.
        const SCALABLE     = 0b0001_0000;
        /// Two-finger gestures may rotate this element.
        const ROTATABLE    = 0b0010_0000;
        /// Position snaps to the grid; cancels two-finger transforms that
        /// would fight the snap.
        const SNAP_TO_GRID = 0b0100_0000;
        /// Hit testing may report the element's label instead of the
        /// element itself.
        const LABEL_HITS   = 0b1000_0000;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::DRAGGABLE | Self::SCALABLE | Self::ROTATABLE
    }
}

/// The closed set of element kinds the board can construct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A free or derived point.
    Point,
    /// A line through two point elements.
    Line,
    /// A circle around a center point.
    Circle,
    /// A polygon over point vertices.
    Polygon,
    /// A sampled curve.
    Curve,
    /// A text anchored at a coordinate.
    Text,
    /// An image anchored at a coordinate.
    Image,
    /// A group of elements updated after all primitives.
    Group,
}

impl ElementKind {
    /// Single-letter tag used when minting ids (`<boardId><tag><counter>`).
    #[must_use]
    pub fn type_tag(self) -> char {
        match self {
            Self::Point => 'P',
            Self::Line => 'L',
            Self::Circle => 'C',
            Self::Polygon => 'Y',
            Self::Curve => 'V',
            Self::Text => 'T',
            Self::Image => 'I',
            Self::Group => 'G',
        }
    }
}

/// How a circle's radius is defined.
#[derive(Clone, Debug, PartialEq)]
pub enum CircleRadius {
    /// A fixed radius in user units.
    Value(f64),
    /// The circle passes through another point element.
    Through(String),
}

/// Kind-specific geometry payload.
///
/// Coordinate-bearing kinds (point, text, image) store their own position as
/// a [`Coords`] value; shape kinds reference the ids of their defining point
/// elements and derive geometry from them at update/hit time.
#[derive(Clone, Debug)]
pub enum Geometry {
    /// A point with its own position.
    Point {
        /// Position in both representations.
        coords: Coords,
    },
    /// A text anchored at a position.
    Text {
        /// Anchor position.
        coords: Coords,
        /// Displayed content.
        content: String,
    },
    /// An image anchored at its lower-left corner.
    Image {
        /// Anchor position.
        coords: Coords,
        /// Width in user units.
        width: f64,
        /// Height in user units.
        height: f64,
    },
    /// A line through two point elements.
    Line {
        /// Id of the first defining point.
        p1: String,
        /// Id of the second defining point.
        p2: String,
    },
    /// A circle defined by a center point and a radius rule.
    Circle {
        /// Id of the center point.
        center: String,
        /// Radius definition.
        radius: CircleRadius,
    },
    /// A polygon over point vertices (closed implicitly).
    Polygon {
        /// Ids of the vertex points, in order.
        vertices: Vec<String>,
    },
    /// A curve as a sequence of user-space samples.
    Curve {
        /// Sampled points in user space.
        points: Vec<Point>,
    },
    /// A group of member elements.
    Group {
        /// Ids of the member elements.
        members: Vec<String>,
    },
}

impl Geometry {
    /// Convenience constructor for a point payload.
    #[must_use]
    pub fn point(cs: &CoordinateSystem, user: Point) -> Self {
        Self::Point {
            coords: Coords::from_user(cs, user),
        }
    }

    /// The kind tag for this payload.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Point { .. } => ElementKind::Point,
            Self::Text { .. } => ElementKind::Text,
            Self::Image { .. } => ElementKind::Image,
            Self::Line { .. } => ElementKind::Line,
            Self::Circle { .. } => ElementKind::Circle,
            Self::Polygon { .. } => ElementKind::Polygon,
            Self::Curve { .. } => ElementKind::Curve,
            Self::Group { .. } => ElementKind::Group,
        }
    }
}

/// A constructed board element: common base plus kind-specific payload.
#[derive(Clone, Debug)]
pub struct Element {
    /// Unique id within the board. Empty until registered; the registry
    /// mints `<boardId><typeTag><counter>` ids for elements without one.
    pub id: String,
    /// Optional human-readable name, unique within the board when present.
    pub name: Option<String>,
    /// Kind-specific geometry.
    pub geometry: Geometry,
    /// Cross-cutting state flags.
    pub flags: ElementFlags,
    /// Render layer; higher layers win hit-test ties.
    pub layer: i32,
    /// Optional depth override consulted by canvas-ordered renderers.
    pub depth: Option<i32>,
    /// Index into the registry's insertion-ordered sequence. Maintained by
    /// the registry; do not write from outside.
    pub pos: usize,
    /// Set by the pipeline's prepare phase; cleared when the element has
    /// recomputed its derived geometry.
    pub needs_update: bool,
    /// Whether the element participates in regular (non-full) updates.
    pub needs_regular_update: bool,
    /// Ids of elements that depend on this one (strong: cascade target).
    pub children: SmallVec<[String; 4]>,
    /// Ids of elements this one depends on (weak: lookup only).
    pub ancestors: SmallVec<[String; 4]>,
    /// Timestamp (ms) of the most recent drag that touched this element;
    /// used as a hit-test tie-breaker within a layer.
    pub last_drag_time: u64,
    /// Id of the element's label, if it has one.
    pub label: Option<String>,
    /// Set on label elements: the id of the element this labels.
    pub label_of: Option<String>,
    /// Whether the element is currently highlighted.
    pub highlighted: bool,
}

impl Element {
    /// Creates an unregistered element with default attributes.
    #[must_use]
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: String::new(),
            name: None,
            geometry,
            flags: ElementFlags::default(),
            layer: 0,
            depth: None,
            pos: usize::MAX,
            needs_update: false,
            needs_regular_update: true,
            children: SmallVec::new(),
            ancestors: SmallVec::new(),
            last_drag_time: 0,
            label: None,
            label_of: None,
            highlighted: false,
        }
    }

    /// Creates an unregistered element with an explicit id.
    #[must_use]
    pub fn with_id(geometry: Geometry, id: &str) -> Self {
        let mut el = Self::new(geometry);
        el.id = String::from(id);
        el
    }

    /// The element's kind.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.geometry.kind()
    }

    /// Whether this element stores its own position (point, text, image).
    ///
    /// Coordinate-bearing elements are dragged by setting their screen
    /// position directly; shape elements are dragged by translating their
    /// defining points.
    #[must_use]
    pub fn carries_coords(&self) -> bool {
        matches!(
            self.geometry,
            Geometry::Point { .. } | Geometry::Text { .. } | Geometry::Image { .. }
        )
    }

    /// Shared access to the element's own coords, if it carries any.
    #[must_use]
    pub fn coords(&self) -> Option<&Coords> {
        match &self.geometry {
            Geometry::Point { coords }
            | Geometry::Text { coords, .. }
            | Geometry::Image { coords, .. } => Some(coords),
            _ => None,
        }
    }

    /// Mutable access to the element's own coords, if it carries any.
    pub fn coords_mut(&mut self) -> Option<&mut Coords> {
        match &mut self.geometry {
            Geometry::Point { coords }
            | Geometry::Text { coords, .. }
            | Geometry::Image { coords, .. } => Some(coords),
            _ => None,
        }
    }

    /// Resyncs the element's coords after a pan/zoom/resize change.
    ///
    /// Ordinary elements keep their user coordinates and recompute the
    /// screen side; frozen elements keep their screen position and recompute
    /// the user side.
    pub fn update_coords(&mut self, cs: &CoordinateSystem) {
        let frozen = self.flags.contains(ElementFlags::FROZEN);
        if let Some(coords) = self.coords_mut() {
            if frozen {
                coords.screen_to_usr(cs);
            } else {
                coords.usr_to_screen(cs);
            }
        }
    }

    /// Whether the element can currently be picked up by a drag.
    #[must_use]
    pub fn is_draggable(&self) -> bool {
        self.flags.contains(ElementFlags::VISIBLE)
            && self.flags.contains(ElementFlags::DRAGGABLE)
            && !self.flags.contains(ElementFlags::FIXED)
    }

    /// The ids of the free points that define this element's position.
    ///
    /// For coordinate-bearing elements this is empty (they move themselves);
    /// for shapes it is the defining point list a two-finger transform
    /// applies to.
    #[must_use]
    pub fn defining_points(&self) -> Vec<&str> {
        match &self.geometry {
            Geometry::Line { p1, p2 } => alloc::vec![p1.as_str(), p2.as_str()],
            Geometry::Circle { center, radius } => {
                let mut v = alloc::vec![center.as_str()];
                if let CircleRadius::Through(p) = radius {
                    v.push(p.as_str());
                }
                v
            }
            Geometry::Polygon { vertices } => vertices.iter().map(String::as_str).collect(),
            Geometry::Group { members } => members.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}
