// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadrille Registry: the element collection behind a geometry board.
//!
//! A board owns an ordered set of constructed elements (points, lines,
//! circles, polygons, curves, texts, images, groups). This crate provides:
//!
//! - [`Element`]: the common base every element shares — string id, optional
//!   name, flags, layer, dependency edges, and a kind-specific geometry
//!   payload ([`Geometry`]).
//! - [`Registry`]: an insertion-ordered arena with id and name lookup,
//!   automatic id minting, dependency-edge bookkeeping, and cascade removal.
//! - Screen-space hit testing for every element kind
//!   ([`Registry::hit_test`]).
//!
//! ## Ordering invariant
//!
//! Insertion order doubles as both z-order fallback and **update order**: an
//! element is always registered after every element it depends on, so a
//! plain forward sweep recomputes the construction correctly. Each element
//! stores its index in that sequence ([`Element::pos`]); removal splices the
//! sequence and patches every later index, so the stored position always
//! equals the actual position and the sequence has no gaps.
//!
//! ## Dependency edges
//!
//! Edges are stored as id lists, not references: each element owns the ids
//! of its *children* (elements to cascade updates/removal into) and a weak
//! list of *ancestor* ids used only to strip edges cheaply on removal. This
//! keeps the arena free of ownership cycles.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use quadrille_coords::CoordinateSystem;
//! use quadrille_registry::{CascadeMode, Element, Geometry, Registry};
//!
//! let cs = CoordinateSystem::new(Point::new(250.0, 250.0), 50.0, 50.0);
//! let mut reg = Registry::new("brd1");
//!
//! let a = reg.register(Element::new(Geometry::point(&cs, Point::new(0.0, 0.0))));
//! let b = reg.register(Element::new(Geometry::point(&cs, Point::new(1.0, 0.0))));
//! let line = reg.register(Element::new(Geometry::Line {
//!     p1: a.clone(),
//!     p2: b.clone(),
//! }));
//! reg.wire_dependency(&a, &line);
//! reg.wire_dependency(&b, &line);
//!
//! // Removing an ancestor cascades into the line.
//! reg.remove(&a, CascadeMode::Ancestors);
//! assert!(reg.lookup(&line).is_none());
//! assert!(reg.lookup(&b).is_some());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod element;
mod hit;
mod registry;
mod rng;

pub use element::{CircleRadius, Element, ElementFlags, ElementKind, Geometry};
pub use registry::{CascadeMode, Registry};
pub use rng::Rand64;
