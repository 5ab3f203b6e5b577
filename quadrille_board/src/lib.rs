// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadrille Board: the interactive geometry board aggregate.
//!
//! A [`Board`] owns an element registry, a pan/zoom coordinate system, a
//! gesture state machine, an animation scheduler, and one renderer. The
//! embedder supplies the environment through a [`Host`] implementation,
//! forwards raw device input with [`Board::handle_raw`], and drives
//! deferred work (deferred clicks, animations) with [`Board::poll`].
//! Everything else — element construction, drags and two-finger
//! transforms, view management, dependent-board fan-out — happens behind
//! the board's methods.
//!
//! ```
//! use kurbo::Point;
//! use quadrille_board::{Attributes, Board, BoundingBox, NullRenderer, StaticHost};
//!
//! let host = StaticHost::new(500.0, 500.0);
//! let mut board = Board::new("brd", Box::new(host), Box::new(NullRenderer));
//! board.set_bounding_box(BoundingBox::new(-5.0, 5.0, 5.0, -5.0), false).unwrap();
//!
//! let a = board.create("point", &[], &Attributes::at(Point::new(0.0, 0.0))).unwrap();
//! let b = board.create("point", &[], &Attributes::at(Point::new(2.0, 0.0))).unwrap();
//! let line = board.create("line", &[&a, &b], &Attributes::default()).unwrap();
//!
//! board.remove_object(&a);
//! assert!(board.select(&line).is_none()); // the line depended on `a`
//! assert!(board.select(&b).is_some());
//! ```
//!
//! This crate is `no_std` and requires an allocator.

#![no_std]

extern crate alloc;

mod board;
mod factory;
mod hooks;
mod host;

pub use board::{Board, BoardConfig, BoardDebugInfo};
pub use factory::{Attributes, ConstructError};
pub use hooks::{BoardEvent, HookKind, Hooks};
pub use host::{Host, StaticHost};

// The vocabulary types embedders need alongside `Board`.
pub use quadrille_anim::Animation;
pub use quadrille_coords::CoordinateSystem;
pub use quadrille_events::{DeviceFamily, Key, Modifiers, PointerId, RawEvent};
pub use quadrille_gesture::BoardMode;
pub use quadrille_pipeline::{NullRenderer, Renderer, RendererKind, UpdateQuality};
pub use quadrille_registry::{
    CascadeMode, CircleRadius, Element, ElementFlags, ElementKind, Geometry,
};
pub use quadrille_viewport::{BoundingBox, ResizePolicy, ViewportError, ZoomSettings};
