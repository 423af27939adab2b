//! Frame timing primitives.

use std::time::{Duration, Instant};

/// Elapsed wall-clock time since the previous frame.
///
/// Updates take a `Timestep` so camera motion and object animation stay
/// frame-rate independent.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Timestep(f32);

impl Timestep {
    pub fn from_seconds(seconds: f32) -> Self {
        Self(seconds.max(0.0))
    }

    pub fn from_millis(millis: f32) -> Self {
        Self::from_seconds(millis / 1000.0)
    }

    pub fn seconds(self) -> f32 {
        self.0
    }

    pub fn millis(self) -> f32 {
        self.0 * 1000.0
    }
}

/// Produces one `Timestep` per frame from a monotonic clock.
///
/// Delta time is clamped so a debugger pause or a minimized window does not
/// feed an enormous step into animation code.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            dt_max: Duration::from_millis(250),
        }
    }

    /// Resets the baseline without producing a step.
    ///
    /// Useful when resuming after a long suspension.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns the elapsed step.
    pub fn tick(&mut self) -> Timestep {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last).min(self.dt_max);
        self.last = now;
        Timestep::from_seconds(dt.as_secs_f32())
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestep_unit_conversions() {
        let ts = Timestep::from_millis(250.0);
        assert_eq!(ts.seconds(), 0.25);
        assert_eq!(ts.millis(), 250.0);
    }

    #[test]
    fn timestep_never_negative() {
        assert_eq!(Timestep::from_seconds(-1.0).seconds(), 0.0);
    }

    #[test]
    fn tick_is_clamped_to_maximum() {
        let mut clock = FrameClock {
            last: Instant::now() - Duration::from_secs(10),
            dt_max: Duration::from_millis(250),
        };
        assert_eq!(clock.tick().millis(), 250.0);
    }

    #[test]
    fn consecutive_ticks_are_small_and_non_negative() {
        let mut clock = FrameClock::new();
        let ts = clock.tick();
        assert!(ts.seconds() >= 0.0);
        assert!(ts.seconds() < 1.0);
    }
}
