// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click / double-click disambiguation.
//!
//! A tap (down then up without a drag) does not fire a click immediately.
//! It arms a deadline; if a second tap on the same target lands before the
//! deadline, a double click fires and the pending single click is
//! discarded. Otherwise [`ClickState::poll`] fires the single click once
//! the deadline passes. One tap therefore produces exactly one of
//! `Click` or `DoubleClick`, never both.

use kurbo::Point;

/// Tunables for click recognition.
#[derive(Clone, Copy, Debug)]
pub struct ClickConfig {
    /// How long a single click is deferred waiting for a second tap,
    /// in milliseconds.
    pub click_delay_ms: u64,
    /// Maximum distance in pixels between down and up for the release to
    /// count as a tap rather than a drag.
    pub click_slop_px: f64,
    /// Maximum distance in pixels between two taps for them to pair into
    /// a double click. Taps further apart (e.g. on opposite ends of a
    /// large element) stay independent single clicks.
    pub dbl_click_radius_px: f64,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            click_delay_ms: 300,
            click_slop_px: 4.0,
            dbl_click_radius_px: 24.0,
        }
    }
}

/// A recognized click gesture.
#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome<K> {
    /// A single click on `target` at `pos`, fired after the double-click
    /// window expired.
    Click {
        /// What was tapped.
        target: K,
        /// Screen position of the tap.
        pos: Point,
    },
    /// Two taps on the same target within the window.
    DoubleClick {
        /// What was tapped twice.
        target: K,
        /// Screen position of the second tap.
        pos: Point,
    },
}

/// Deadline-driven click recognizer, generic over the target key.
///
/// The board runs one instance keyed by element id and can run another
/// keyed by `()` for board-level clicks. There are no timers: the host
/// calls [`ClickState::poll`] with the current time (each frame, or from
/// its own timer) to flush an expired pending click.
#[derive(Clone, Debug, Default)]
pub struct ClickState<K> {
    pending: Option<Pending<K>>,
}

#[derive(Clone, Debug)]
struct Pending<K> {
    target: K,
    pos: Point,
    deadline: u64,
}

impl<K: Clone + PartialEq> ClickState<K> {
    /// Creates an empty recognizer.
    #[must_use]
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Feeds a completed tap.
    ///
    /// Returns `Some(DoubleClick)` when this tap pairs with a pending one
    /// on the same target, nearby, before the deadline; otherwise arms a
    /// deferred single click and returns `None`.
    pub fn on_tap(&mut self, target: K, pos: Point, now: u64, config: &ClickConfig) -> Option<ClickOutcome<K>> {
        match self.pending.take() {
            Some(p)
                if p.target == target
                    && now < p.deadline
                    && (pos - p.pos).hypot() <= config.dbl_click_radius_px =>
            {
                Some(ClickOutcome::DoubleClick { target, pos })
            }
            stale => {
                // A stale tap on a different target (or past its deadline)
                // is dropped without firing; its click window is over.
                let _ = stale;
                self.pending = Some(Pending {
                    target,
                    pos,
                    deadline: now + config.click_delay_ms,
                });
                None
            }
        }
    }

    /// Fires the deferred single click if its deadline has passed.
    pub fn poll(&mut self, now: u64) -> Option<ClickOutcome<K>> {
        if self.pending.as_ref().is_some_and(|p| now >= p.deadline) {
            let p = self.pending.take()?;
            Some(ClickOutcome::Click {
                target: p.target,
                pos: p.pos,
            })
        } else {
            None
        }
    }

    /// Discards any pending click, e.g. when the gesture became a drag.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a click is armed and waiting on its deadline.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
