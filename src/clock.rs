//! Frame clock - converts wall time into bounded simulation steps
//!
//! The host's display-refresh callback drives the simulation with real
//! timestamps. A tab switch or debugger pause can make two consecutive
//! timestamps arbitrarily far apart; integrating that gap in one step
//! would launch fighters through the floor. The clock clamps every step
//! to a configured ceiling instead.

use std::time::Instant;

/// Bounded wall-time step source
#[derive(Debug)]
pub struct FrameClock {
    max_dt: f32,
    last: Option<Instant>,
}

impl FrameClock {
    /// Create a clock that never yields a step larger than `max_dt` seconds
    pub fn new(max_dt: f32) -> Self {
        Self { max_dt, last: None }
    }

    /// Clamp an externally measured step into the stable range
    pub fn bound(&self, dt: f32) -> f32 {
        dt.clamp(0.0, self.max_dt)
    }

    /// Yield the bounded step since the previous call
    ///
    /// The first call anchors the clock and yields zero.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Deterministic variant of [`tick`](Self::tick) for tests
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            None => 0.0,
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
        };
        self.last = Some(now);
        self.bound(dt)
    }

    /// Forget the anchor, so the next tick yields zero
    ///
    /// Called when the round unpauses; the paused span must not be
    /// integrated.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_first_tick_yields_zero() {
        let mut clock = FrameClock::new(1.0 / 30.0);
        assert_eq!(clock.tick_at(Instant::now()), 0.0);
    }

    #[test]
    fn test_normal_step_passes_through() {
        let mut clock = FrameClock::new(1.0 / 30.0);
        let start = Instant::now();
        clock.tick_at(start);
        let dt = clock.tick_at(start + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-4);
    }

    #[test]
    fn test_long_pause_is_clamped() {
        let mut clock = FrameClock::new(1.0 / 30.0);
        let start = Instant::now();
        clock.tick_at(start);
        let dt = clock.tick_at(start + Duration::from_secs(5));
        assert_eq!(dt, 1.0 / 30.0);
    }

    #[test]
    fn test_reset_forgets_anchor() {
        let mut clock = FrameClock::new(1.0 / 30.0);
        let start = Instant::now();
        clock.tick_at(start);
        clock.reset();
        assert_eq!(clock.tick_at(start + Duration::from_secs(1)), 0.0);
    }

    #[test]
    fn test_bound_rejects_negative() {
        let clock = FrameClock::new(1.0 / 30.0);
        assert_eq!(clock.bound(-0.5), 0.0);
    }
}
