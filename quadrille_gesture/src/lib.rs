// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadrille Gesture: interpret normalized pointer input against board
//! content.
//!
//! This crate sits between [`quadrille_events`] (which normalizes raw
//! device input) and the board (which owns the update pipeline). It
//! provides:
//!
//! - [`BoardMode`]: the board's interaction mode machine.
//! - [`SessionTable`]: active pointer sessions, at most two per element;
//!   additional fingers on an already two-fingered element are ignored.
//! - [`pick_drag_target`]: ranked hit testing for drag starts (layer
//!   first, most recently dragged within a layer, labels excluded).
//! - [`drag_to`] / [`translate_shape`]: single-pointer drag application
//!   for coordinate-bearing elements and shapes.
//! - [`two_finger_transform`]: similarity transform of a shape under two
//!   fingers, respecting scalable/rotatable flags and cancelled by fixed
//!   or grid-snapped defining points.
//! - [`SelectionRect`]: rubber-band selection over coordinate-bearing
//!   elements.
//!
//! This crate is `no_std` and requires an allocator.

#![no_std]

extern crate alloc;

mod drag;
mod mode;
mod pick;
mod select;
mod session;
mod transform;

pub use drag::{drag_to, translate_shape, DragConfig};
pub use mode::BoardMode;
pub use pick::pick_drag_target;
pub use select::SelectionRect;
pub use session::{PointerSession, SessionTable};
pub use transform::two_finger_transform;
