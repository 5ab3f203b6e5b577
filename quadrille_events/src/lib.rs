// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadrille Events: normalize raw device input into one internal vocabulary.
//!
//! Browsers and host shells deliver pointing input through several
//! overlapping families (mouse, touch, unified pointer events) plus wheel
//! and keyboard streams. The board's interaction core wants exactly one
//! vocabulary: down / move / up / cancel / leave with a stable per-gesture
//! pointer id. This crate provides the stateful pieces that turn the former
//! into the latter:
//!
//! - [`DeviceRouter`]: admits one device family at a time. Pointer-event
//!   support is feature-detected once; while the pointer family is in use,
//!   legacy mouse/touch events for the same gestures are dropped rather
//!   than double-fired.
//! - [`ClickState`]: click vs. double-click disambiguation with a deferred,
//!   deadline-driven single click, generic over the target key so it works
//!   per-element and board-wide simultaneously.
//! - [`PinchClassifier`]: decides whether a two-finger gesture is a pinch
//!   (zoom) or a pan, with configurable thresholds and a sticky pan
//!   decision to avoid mid-gesture jitter.
//! - [`FrameThrottle`]: caps move-event processing at a configured frame
//!   rate.
//!
//! Everything is host-agnostic: no timers, no DOM. Timestamps are
//! caller-supplied milliseconds and deferred work is polled with
//! [`ClickState::poll`].
//!
//! This crate is `no_std`.

#![no_std]

mod click;
mod input;
mod pinch;
mod throttle;

pub use click::{ClickConfig, ClickOutcome, ClickState};
pub use input::{DeviceFamily, DeviceRouter, Key, Modifiers, PointerEvent, PointerId, RawEvent};
pub use pinch::{PinchClassifier, PinchConfig, TwoFingerKind};
pub use throttle::FrameThrottle;
