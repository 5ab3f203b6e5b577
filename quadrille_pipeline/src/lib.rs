// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadrille Pipeline: the phased update sweep and the renderer seam.
//!
//! A board change (drag, pan, zoom, removal, animation tick) flows through
//! three phases, mirrored by the three functions in this crate:
//!
//! 1. [`prepare_update`]: flag which elements must recompute.
//! 2. [`update_elements`]: one forward sweep over the registry in
//!    insertion order, which is dependency order by construction; groups
//!    are swept last so they observe their members' final positions.
//! 3. [`update_renderer`]: push changed elements to a [`Renderer`].
//!    Immediate-mode backends redraw everything in layer order;
//!    retained-mode backends receive only the elements that changed.
//!
//! [`Renderer`] is the only seam to the drawing backend; [`NullRenderer`]
//! is the headless implementation used in tests and server-side layouts.
//!
//! This crate is `no_std` and requires an allocator.

#![no_std]

extern crate alloc;

mod renderer;
mod update;

pub use renderer::{NullRenderer, Renderer, RendererKind};
pub use update::{prepare_update, update_elements, update_renderer, UpdateQuality};
