// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element construction: kind names, attribute validation, and payload
//! assembly.
//!
//! Construction is all-or-nothing: every check runs before anything is
//! registered, so a failed `create` leaves no partial element and no
//! dangling dependency edges.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use quadrille_coords::{CoordinateSystem, Coords};
use quadrille_registry::{CircleRadius, Element, ElementFlags, Geometry, Registry};

/// Why a `create` call failed. The board registers nothing on failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstructError {
    /// The kind name is not one of the supported element kinds.
    UnknownKind(String),
    /// A named parent is not registered on the board.
    MissingParent(String),
    /// The parent list has the wrong length for the kind.
    ParentCount {
        /// The requested kind.
        kind: &'static str,
        /// What the kind requires.
        expected: &'static str,
        /// How many parents were passed.
        got: usize,
    },
    /// A required attribute was not supplied.
    MissingAttribute(&'static str),
}

impl fmt::Display for ConstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind(kind) => write!(f, "unknown element kind `{kind}`"),
            Self::MissingParent(id) => write!(f, "parent `{id}` is not on the board"),
            Self::ParentCount {
                kind,
                expected,
                got,
            } => write!(f, "`{kind}` expects {expected} parents, got {got}"),
            Self::MissingAttribute(name) => write!(f, "required attribute `{name}` missing"),
        }
    }
}

impl core::error::Error for ConstructError {}

/// Optional attributes for element construction.
#[derive(Clone, Debug, Default)]
pub struct Attributes {
    /// Human-readable name, unique per board.
    pub name: Option<String>,
    /// Logical position for coordinate-bearing kinds.
    pub position: Option<Point>,
    /// Text content for `text` elements.
    pub content: Option<String>,
    /// Width and height in user units for `image` elements.
    pub size: Option<(f64, f64)>,
    /// Radius in user units for a `circle` without a through-point parent.
    pub radius: Option<f64>,
    /// User-space samples for `curve` elements.
    pub samples: Option<Vec<Point>>,
    /// Flag overrides; defaults apply when absent.
    pub flags: Option<ElementFlags>,
    /// Render layer.
    pub layer: Option<i32>,
}

impl Attributes {
    /// Attributes with just a position set.
    #[must_use]
    pub fn at(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }
}

/// Validates a `create` request and assembles the element.
///
/// `parents` are resolved against the registry (id or name); the returned
/// id list is what the caller wires as dependency parents after
/// registration.
pub(crate) fn build(
    kind: &str,
    parents: &[&str],
    attrs: &Attributes,
    registry: &Registry,
    cs: &CoordinateSystem,
) -> Result<(Element, Vec<String>), ConstructError> {
    let mut parent_ids = Vec::with_capacity(parents.len());
    for key in parents {
        match registry.lookup(key) {
            Some(el) => parent_ids.push(el.id.clone()),
            None => return Err(ConstructError::MissingParent(String::from(*key))),
        }
    }

    let geometry = match kind {
        "point" => Geometry::Point {
            coords: coords_from(attrs, cs)?,
        },
        "text" => Geometry::Text {
            coords: coords_from(attrs, cs)?,
            content: attrs
                .content
                .clone()
                .ok_or(ConstructError::MissingAttribute("content"))?,
        },
        "image" => {
            let (width, height) = attrs
                .size
                .ok_or(ConstructError::MissingAttribute("size"))?;
            Geometry::Image {
                coords: coords_from(attrs, cs)?,
                width,
                height,
            }
        }
        "line" => {
            let [p1, p2] = require_parents::<2>("line", "exactly 2", &parent_ids)?;
            Geometry::Line { p1, p2 }
        }
        "circle" => match parent_ids.len() {
            1 => Geometry::Circle {
                center: parent_ids[0].clone(),
                radius: CircleRadius::Value(
                    attrs
                        .radius
                        .ok_or(ConstructError::MissingAttribute("radius"))?,
                ),
            },
            2 => Geometry::Circle {
                center: parent_ids[0].clone(),
                radius: CircleRadius::Through(parent_ids[1].clone()),
            },
            got => {
                return Err(ConstructError::ParentCount {
                    kind: "circle",
                    expected: "1 (center) or 2 (center, through-point)",
                    got,
                });
            }
        },
        "polygon" => {
            if parent_ids.len() < 3 {
                return Err(ConstructError::ParentCount {
                    kind: "polygon",
                    expected: "at least 3",
                    got: parent_ids.len(),
                });
            }
            Geometry::Polygon {
                vertices: parent_ids.clone(),
            }
        }
        "curve" => Geometry::Curve {
            points: attrs
                .samples
                .clone()
                .ok_or(ConstructError::MissingAttribute("samples"))?,
        },
        "group" => {
            if parent_ids.is_empty() {
                return Err(ConstructError::ParentCount {
                    kind: "group",
                    expected: "at least 1",
                    got: 0,
                });
            }
            Geometry::Group {
                members: parent_ids.clone(),
            }
        }
        other => return Err(ConstructError::UnknownKind(String::from(other))),
    };

    let mut element = Element::new(geometry);
    element.name = attrs.name.clone();
    if let Some(flags) = attrs.flags {
        element.flags = flags;
    }
    if let Some(layer) = attrs.layer {
        element.layer = layer;
    }
    Ok((element, parent_ids))
}

fn coords_from(attrs: &Attributes, cs: &CoordinateSystem) -> Result<Coords, ConstructError> {
    attrs
        .position
        .map(|p| Coords::from_user(cs, p))
        .ok_or(ConstructError::MissingAttribute("position"))
}

fn require_parents<const N: usize>(
    kind: &'static str,
    expected: &'static str,
    ids: &[String],
) -> Result<[String; N], ConstructError> {
    let arr: [String; N] = match <[String; N]>::try_from(ids.to_vec()) {
        Ok(arr) => arr,
        Err(_) => {
            return Err(ConstructError::ParentCount {
                kind,
                expected,
                got: ids.len(),
            });
        }
    };
    Ok(arr)
}
