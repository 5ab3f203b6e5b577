// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadrille Coords: coordinate primitives for an interactive geometry board.
//!
//! A board draws logical ("user") coordinates into a pixel canvas. This crate
//! owns the bidirectional mapping between the two spaces:
//!
//! - [`CoordinateSystem`]: pan offset (screen position of the logical
//!   origin), base unit scale, cumulative zoom factors, and an optional
//!   correction for CSS-style transforms applied to the hosting container by
//!   code outside the board.
//! - [`Coords`]: a value holding *both* representations of a single point —
//!   a screen pixel pair and a logical homogeneous triple — kept consistent
//!   through the coordinate system.
//!
//! ## Conversion model
//!
//! The horizontal stretch is `unit_x * zoom_x` pixels per logical unit (and
//! analogously for y, with the screen y axis pointing down):
//!
//! ```text
//! screen.x = origin.x + user.x * unit_x * zoom_x
//! screen.y = origin.y - user.y * unit_y * zoom_y
//! ```
//!
//! Zoom factors are tracked separately from the base unit scale so that a
//! "reset to 100%" operation can restore `zoom = 1.0` without forgetting the
//! configured units.
//!
//! ## Container transform correction
//!
//! Embedding pages may scale, rotate, or translate the hosting container at
//! any time. Raw input positions arrive in the page's space, so the board
//! must multiply them by the inverse of that external transform before the
//! pan/zoom mapping applies. The inverse is cached; callers invalidate the
//! cache on every pointer-down and on resize/fullscreen transitions and
//! re-supply the current transform via
//! [`CoordinateSystem::refresh_container_transform`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use quadrille_coords::CoordinateSystem;
//!
//! // 500x500 canvas showing [-5, 5] x [-5, 5]: 50 px per unit, origin at center.
//! let cs = CoordinateSystem::new(Point::new(250.0, 250.0), 50.0, 50.0);
//!
//! let screen = cs.user_to_screen(Point::new(1.0, 0.0));
//! assert_eq!(screen, Point::new(300.0, 250.0));
//!
//! let user = cs.screen_to_user(screen);
//! assert!((user.x - 1.0).abs() < 1e-12);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod coords;
mod system;

pub use coords::{CoordsKind, Coords};
pub use system::CoordinateSystem;

/// Numerical tolerance used when comparing homogeneous weights.
///
/// A homogeneous triple whose weight is within this tolerance of zero is
/// treated as a point at infinity.
pub const EPS: f64 = 1e-12;
