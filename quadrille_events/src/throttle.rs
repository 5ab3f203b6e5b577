// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-rate limiting for high-frequency move events.

/// Admits at most `max_fps` events per second.
///
/// Move events can arrive far faster than the board can usefully redraw.
/// The drag handler asks `admit(now)` before processing a move; denied
/// frames are dropped (the next admitted frame carries the latest
/// position, so nothing is lost). A `max_fps` of 0 disables throttling.
#[derive(Clone, Copy, Debug)]
pub struct FrameThrottle {
    min_interval_ms: u64,
    last: Option<u64>,
}

impl FrameThrottle {
    /// Creates a throttle capping processing at `max_fps` frames per second.
    #[must_use]
    pub fn new(max_fps: u32) -> Self {
        Self {
            min_interval_ms: if max_fps == 0 { 0 } else { 1000 / u64::from(max_fps) },
            last: None,
        }
    }

    /// Whether an event at `now` (milliseconds) may be processed.
    pub fn admit(&mut self, now: u64) -> bool {
        match self.last {
            Some(last) if now.saturating_sub(last) < self.min_interval_ms => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forgets the last admitted frame, e.g. at gesture start.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::FrameThrottle;

    #[test]
    fn caps_at_configured_rate() {
        let mut t = FrameThrottle::new(25); // 40 ms interval
        assert!(t.admit(1000));
        assert!(!t.admit(1010));
        assert!(!t.admit(1039));
        assert!(t.admit(1040));
    }

    #[test]
    fn zero_fps_disables_throttling() {
        let mut t = FrameThrottle::new(0);
        assert!(t.admit(1));
        assert!(t.admit(1));
        assert!(t.admit(2));
    }

    #[test]
    fn reset_admits_immediately() {
        let mut t = FrameThrottle::new(25);
        assert!(t.admit(1000));
        t.reset();
        assert!(t.admit(1001));
    }
}
