// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-finger gesture classification: pan or pinch.
//!
//! While two fingers rest on the board background, each move frame is
//! classified from the fingers' movement vectors since the gesture began.
//! The gesture is a pan when both fingers travel in the same direction,
//! nearly parallel, with the inter-finger distance roughly constant;
//! anything else (anti-parallel spread, distance change) is a pinch.
//! Once a frame classifies as pan the decision sticks for the rest of the
//! gesture, so a pan does not degrade into jittery zooming when the
//! fingers drift slightly apart.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

/// Thresholds for the pan-vs-pinch decision.
#[derive(Clone, Copy, Debug)]
pub struct PinchConfig {
    /// Maximum angle in radians between the two movement vectors for them
    /// to count as parallel.
    pub pinch_angle_eps: f64,
    /// Maximum relative change of the inter-finger distance for the
    /// gesture to still count as a pan.
    pub pinch_dist_eps: f64,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            pinch_angle_eps: 0.2,
            pinch_dist_eps: 0.1,
        }
    }
}

/// What a two-finger frame means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TwoFingerKind {
    /// Not enough movement yet to decide.
    Undecided,
    /// Both fingers translate together.
    Pan,
    /// The fingers zoom (and possibly rotate) the view.
    Pinch,
}

/// Per-gesture classifier state.
#[derive(Clone, Copy, Debug)]
pub struct PinchClassifier {
    start_a: Point,
    start_b: Point,
    start_dist: f64,
    decided_pan: bool,
}

impl PinchClassifier {
    /// Minimum travel in pixels before a frame is classified.
    const MIN_TRAVEL: f64 = 2.0;

    /// Starts a gesture from the two initial finger positions.
    #[must_use]
    pub fn begin(a: Point, b: Point) -> Self {
        Self {
            start_a: a,
            start_b: b,
            start_dist: (b - a).hypot(),
            decided_pan: false,
        }
    }

    /// Classifies the current frame given the fingers' latest positions.
    pub fn classify(&mut self, a: Point, b: Point, config: &PinchConfig) -> TwoFingerKind {
        if self.decided_pan {
            return TwoFingerKind::Pan;
        }
        let ma = a - self.start_a;
        let mb = b - self.start_b;
        let (la, lb) = (ma.hypot(), mb.hypot());
        // Moves arrive per pointer, so right after one finger's move the
        // other still sits at its start. Wait until both have travelled.
        if la < Self::MIN_TRAVEL || lb < Self::MIN_TRAVEL {
            return TwoFingerKind::Undecided;
        }
        let same_direction = ma.dot(mb) > 0.0;
        // |cross| / (|ma| |mb|) = sin of the angle between the vectors.
        let parallel = (ma.cross(mb) / (la * lb)).abs() <= config.pinch_angle_eps.sin();
        let dist = (b - a).hypot();
        let dist_kept = if self.start_dist > 0.0 {
            (dist / self.start_dist - 1.0).abs() <= config.pinch_dist_eps
        } else {
            false
        };
        if same_direction && parallel && dist_kept {
            self.decided_pan = true;
            TwoFingerKind::Pan
        } else {
            TwoFingerKind::Pinch
        }
    }
}
