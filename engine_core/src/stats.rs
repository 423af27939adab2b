//! Rolling frame statistics for the performance readout.

use crate::time::Timestep;

/// Totals of one completed timing window.
///
/// Published snapshots always contain at least one frame and at least the
/// window length of accumulated time, so the derived averages are safe to
/// compute.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameSnapshot {
    /// Accumulated wall-clock time of the window, in milliseconds.
    pub time_ms: f32,
    /// Frames counted in the window.
    pub frames: u32,
}

impl FrameSnapshot {
    /// Average milliseconds per frame.
    pub fn millis_per_frame(self) -> f32 {
        self.time_ms / self.frames as f32
    }

    /// Average seconds per frame.
    pub fn seconds_per_frame(self) -> f32 {
        self.millis_per_frame() / 1000.0
    }

    /// Average frames per second.
    pub fn fps(self) -> f32 {
        self.frames as f32 * 1000.0 / self.time_ms
    }
}

/// Frame statistics accumulated over a fixed window.
///
/// `tick` accounts one frame; once the accumulated time reaches the window
/// length the totals are published as the current snapshot and the
/// accumulators start over. Readers see a smoothed value that changes a
/// couple of times per second instead of a noisy per-frame one.
#[derive(Debug, Clone)]
pub struct FrameStats {
    window_ms: f32,
    time_ms: f32,
    frames: u32,
    last: Option<FrameSnapshot>,
}

impl FrameStats {
    pub const DEFAULT_WINDOW_MS: f32 = 500.0;

    pub fn new() -> Self {
        Self::with_window(Self::DEFAULT_WINDOW_MS)
    }

    pub fn with_window(window_ms: f32) -> Self {
        debug_assert!(window_ms > 0.0);
        Self {
            window_ms,
            time_ms: 0.0,
            frames: 0,
            last: None,
        }
    }

    /// Accounts one frame worth of elapsed time.
    pub fn tick(&mut self, ts: Timestep) {
        self.frames += 1;
        self.time_ms += ts.millis();
        if self.time_ms >= self.window_ms {
            self.last = Some(FrameSnapshot {
                time_ms: self.time_ms,
                frames: self.frames,
            });
            self.time_ms = 0.0;
            self.frames = 0;
        }
    }

    /// Last completed window, `None` until the first one finishes.
    pub fn snapshot(&self) -> Option<FrameSnapshot> {
        self.last
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(stats: &mut FrameStats, millis: f32, count: u32) {
        for _ in 0..count {
            stats.tick(Timestep::from_millis(millis));
        }
    }

    #[test]
    fn no_snapshot_before_first_window_completes() {
        let mut stats = FrameStats::new();
        step(&mut stats, 60.0, 8); // 480ms, still inside the window
        assert_eq!(stats.snapshot(), None);
    }

    #[test]
    fn sixty_ms_steps_publish_once_per_window() {
        let mut stats = FrameStats::new();
        // 10 x 60ms = 600ms total; the 9th tick crosses 500ms and publishes
        // the window, the 10th starts the next one.
        let mut publications = 0;
        let mut last = None;
        for _ in 0..10 {
            stats.tick(Timestep::from_millis(60.0));
            if stats.snapshot() != last {
                publications += 1;
                last = stats.snapshot();
            }
        }
        assert_eq!(publications, 1);
        let snap = last.expect("one window completed");
        assert_eq!(snap.frames, 9);
        assert!((snap.time_ms - 540.0).abs() < 1e-3);
    }

    #[test]
    fn snapshot_is_stable_between_windows() {
        let mut stats = FrameStats::new();
        step(&mut stats, 100.0, 5); // publishes {500ms, 5}
        let first = stats.snapshot();
        step(&mut stats, 100.0, 3); // mid-window, must not change the readout
        assert_eq!(stats.snapshot(), first);
    }

    #[test]
    fn published_snapshots_never_divide_by_zero() {
        let mut stats = FrameStats::new();
        step(&mut stats, 100.0, 5);
        let snap = stats.snapshot().expect("window completed");
        assert!(snap.frames > 0);
        assert!(snap.time_ms > 0.0);
        assert_eq!(snap.millis_per_frame(), 100.0);
        assert_eq!(snap.seconds_per_frame(), 0.1);
        assert_eq!(snap.fps(), 10.0);
    }

    #[test]
    fn accumulators_reset_after_publishing() {
        let mut stats = FrameStats::with_window(100.0);
        step(&mut stats, 100.0, 1); // publishes {100ms, 1}
        step(&mut stats, 40.0, 1);
        // 40ms into the next window: the published snapshot is unchanged.
        assert_eq!(
            stats.snapshot(),
            Some(FrameSnapshot {
                time_ms: 100.0,
                frames: 1
            })
        );
        step(&mut stats, 40.0, 2); // 120ms, publishes {120ms, 3}
        assert_eq!(
            stats.snapshot(),
            Some(FrameSnapshot {
                time_ms: 120.0,
                frames: 3
            })
        );
    }
}
