//! Frame time controller.
//!
//! Turns the host's per-tick timestamp into a clamped simulation step.
//! Time beyond the cap is dropped, never carried over.

use crate::core::config::DEFAULT_MAX_FRAME_DELTA;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    last: Option<f64>,
    max_delta: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_DELTA)
    }
}

impl FrameClock {
    pub fn new(max_delta: f64) -> Self {
        Self {
            last: None,
            max_delta,
        }
    }

    /// Record `now` and return the step to apply, if any.
    ///
    /// The first call after construction or [`reset`](Self::reset) only
    /// records the timestamp. A timestamp that did not move forward
    /// yields no step either.
    pub fn advance(&mut self, now: f64) -> Option<f32> {
        let previous = self.last.replace(now)?;
        let dt = (now - previous).min(self.max_delta);
        if dt > 0.0 {
            Some(dt as f32)
        } else {
            None
        }
    }

    /// Forget the last timestamp.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last
    }

    pub fn max_delta(&self) -> f64 {
        self.max_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_yields_no_step() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(12.5), None);
        assert_eq!(clock.last_timestamp(), Some(12.5));
    }

    #[test]
    fn test_large_delta_is_clamped() {
        let mut clock = FrameClock::default();
        clock.advance(0.0);
        assert_eq!(clock.advance(5.0), Some((1.0 / 60.0) as f32));
        assert_eq!(clock.last_timestamp(), Some(5.0));
    }

    #[test]
    fn test_small_delta_passes_through() {
        let mut clock = FrameClock::new(0.5);
        clock.advance(1.0);
        assert_eq!(clock.advance(1.25), Some(0.25));
    }

    #[test]
    fn test_non_increasing_timestamp_yields_no_step() {
        let mut clock = FrameClock::default();
        clock.advance(3.0);
        assert_eq!(clock.advance(3.0), None);
        assert_eq!(clock.advance(2.0), None);
        // the backwards timestamp is still recorded
        assert_eq!(clock.advance(2.01), Some((2.01f64 - 2.0) as f32));
    }

    #[test]
    fn test_reset_forgets_timestamp() {
        let mut clock = FrameClock::default();
        clock.advance(1.0);
        clock.reset();
        assert_eq!(clock.advance(100.0), None);
    }
}
