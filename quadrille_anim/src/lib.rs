// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadrille Anim: a shared-tick animation scheduler for board elements.
//!
//! All animations on a board advance from one tick. The host drives the
//! tick from whatever frame source it has (requestAnimationFrame, a game
//! loop, a test loop) by calling [`Scheduler::tick`] with the current time
//! in milliseconds; the scheduler never reads a clock itself. It is lazily
//! active: [`Scheduler::is_active`] tells the host whether another tick is
//! worth scheduling, and the set self-terminates as animations run out.
//!
//! Per tick, each animation pops the next positional target for its
//! element (from a precomputed frame sequence or a time-parametrized
//! function) and one value from each of its property tracks. When both
//! sources are exhausted the animation is removed and its completion
//! callback runs exactly once. The caller runs one board update per tick,
//! however many animations advanced.
//!
//! ```
//! use kurbo::Point;
//! use quadrille_anim::{Animation, Scheduler};
//! use quadrille_coords::CoordinateSystem;
//! use quadrille_registry::{Element, Geometry, Registry};
//!
//! let cs = CoordinateSystem::new(Point::new(250.0, 250.0), 50.0, 50.0);
//! let mut registry = Registry::new("brd");
//! let p = registry.register(Element::new(Geometry::point(&cs, Point::ZERO)));
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.add(Animation::new(&p).with_frames([Point::new(1.0, 0.0), Point::new(2.0, 0.0)]));
//! while scheduler.is_active() {
//!     scheduler.tick(&mut registry, &cs, 0);
//! }
//! assert_eq!(registry.user_of(&p), Some(Point::new(2.0, 0.0)));
//! ```
//!
//! This crate is `no_std` and requires an allocator.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use quadrille_coords::{CoordinateSystem, CoordsKind};
use quadrille_registry::{Element, Registry};

/// Where an animation's positional targets come from.
pub enum PathSource {
    /// Precomputed user-space positions, one per tick.
    Frames(VecDeque<Point>),
    /// A position function of normalized time `t` in `[0, 1]`.
    ///
    /// The clock starts on the first tick that observes the animation, so
    /// queued animations do not lose time before the host starts ticking.
    Timed {
        /// Tick time at which the animation first advanced.
        start: Option<u64>,
        /// Total duration in milliseconds.
        duration_ms: u64,
        /// Position at normalized time `t`.
        f: Box<dyn Fn(f64) -> Point>,
    },
}

/// One property track: a value sequence and the setter that applies it.
struct ValueTrack {
    values: VecDeque<f64>,
    apply: Box<dyn FnMut(&mut Element, f64)>,
}

/// One element's animation: an optional positional path plus any number of
/// property tracks, with an optional completion callback.
pub struct Animation {
    element: String,
    path: Option<PathSource>,
    tracks: Vec<ValueTrack>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl Animation {
    /// Creates an empty animation for an element. Without a path or any
    /// track it completes on its first tick.
    #[must_use]
    pub fn new(element: &str) -> Self {
        Self {
            element: String::from(element),
            path: None,
            tracks: Vec::new(),
            on_complete: None,
        }
    }

    /// Animates along precomputed user-space positions, one per tick.
    #[must_use]
    pub fn with_frames<I: IntoIterator<Item = Point>>(mut self, frames: I) -> Self {
        self.path = Some(PathSource::Frames(frames.into_iter().collect()));
        self
    }

    /// Animates along `f(t)` for `t` in `[0, 1]` over `duration_ms`.
    #[must_use]
    pub fn with_timed<F: Fn(f64) -> Point + 'static>(mut self, duration_ms: u64, f: F) -> Self {
        self.path = Some(PathSource::Timed {
            start: None,
            duration_ms,
            f: Box::new(f),
        });
        self
    }

    /// Adds a property track: one value is popped per tick and handed to
    /// `apply` together with the element.
    #[must_use]
    pub fn with_track<I, F>(mut self, values: I, apply: F) -> Self
    where
        I: IntoIterator<Item = f64>,
        F: FnMut(&mut Element, f64) + 'static,
    {
        self.tracks.push(ValueTrack {
            values: values.into_iter().collect(),
            apply: Box::new(apply),
        });
        self
    }

    /// Runs `f` exactly once when the animation finishes. Animations torn
    /// down early via [`Scheduler::stop`] do not complete.
    #[must_use]
    pub fn on_complete<F: FnOnce() + 'static>(mut self, f: F) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Advances one tick. Returns `true` when finished.
    fn advance(&mut self, registry: &mut Registry, cs: &CoordinateSystem, now: u64) -> bool {
        let mut path_done = true;
        let mut target = None;
        if let Some(path) = &mut self.path {
            match path {
                PathSource::Frames(frames) => {
                    target = frames.pop_front();
                    path_done = frames.is_empty();
                }
                PathSource::Timed {
                    start,
                    duration_ms,
                    f,
                } => {
                    let t0 = *start.get_or_insert(now);
                    let t = if *duration_ms == 0 {
                        1.0
                    } else {
                        ((now.saturating_sub(t0)) as f64 / *duration_ms as f64).min(1.0)
                    };
                    target = Some(f(t));
                    path_done = t >= 1.0;
                }
            }
        }

        let Some(el) = registry.get_mut(&self.element) else {
            // The element was removed out from under the animation; finish
            // without completing.
            self.on_complete = None;
            return true;
        };
        if let Some(pos) = target {
            if let Some(coords) = el.coords_mut() {
                coords.set(cs, CoordsKind::User, pos);
            }
        }
        let mut tracks_done = true;
        for track in &mut self.tracks {
            if let Some(v) = track.values.pop_front() {
                (track.apply)(el, v);
            }
            tracks_done &= track.values.is_empty();
        }
        el.needs_update = true;

        path_done && tracks_done
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("element", &self.element)
            .field("tracks", &self.tracks.len())
            .finish_non_exhaustive()
    }
}

/// The board's animation set.
#[derive(Default)]
pub struct Scheduler {
    animations: Vec<Animation>,
}

impl Scheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an animation. It first advances on the next tick.
    pub fn add(&mut self, animation: Animation) {
        self.animations.push(animation);
    }

    /// Whether another tick would advance anything.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.animations.is_empty()
    }

    /// Advances every animation one step.
    ///
    /// Finished animations are removed and their completion callbacks run.
    /// Returns `true` when any element moved, in which case the caller
    /// runs one board update.
    pub fn tick(&mut self, registry: &mut Registry, cs: &CoordinateSystem, now: u64) -> bool {
        if self.animations.is_empty() {
            return false;
        }
        let mut finished = Vec::new();
        for (i, anim) in self.animations.iter_mut().enumerate() {
            if anim.advance(registry, cs, now) {
                finished.push(i);
            }
        }
        for &i in finished.iter().rev() {
            let anim = self.animations.remove(i);
            if let Some(done) = anim.on_complete {
                done();
            }
        }
        true
    }

    /// Tears down the animations of one element without completing them.
    pub fn stop(&mut self, element: &str) {
        self.animations.retain(|a| a.element != element);
    }

    /// Tears down every animation without completing any of them.
    pub fn stop_all(&mut self) {
        self.animations.clear();
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("animations", &self.animations)
            .finish()
    }
}
