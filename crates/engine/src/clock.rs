//! Frame-rate measurement.

use std::time::Instant;

/// Measures the instantaneous frame rate from consecutive frame timestamps.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Start measuring from `now` (e.g. when the loop starts).
    pub fn started_at(now: Instant) -> Self {
        Self { last: Some(now) }
    }

    /// Record a frame at `now` and return `round(1000 / delta_ms)`.
    ///
    /// Returns `None` for the first frame and when no time has passed.
    pub fn tick(&mut self, now: Instant) -> Option<u32> {
        let prev = self.last.replace(now)?;
        // Microseconds keep 1000 / delta_ms exact for whole-millisecond deltas.
        let delta_us = now.saturating_duration_since(prev).as_micros();
        if delta_us == 0 {
            return None;
        }
        Some((1_000_000.0 / delta_us as f64).round() as u32)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
