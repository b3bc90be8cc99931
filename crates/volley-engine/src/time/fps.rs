use std::time::{Duration, Instant};

/// One FPS measurement window.
#[derive(Debug, Copy, Clone)]
struct Window {
    frame_count: u64,
    start: Instant,
    since_start: Duration,
}

impl Window {
    fn new(start: Instant) -> Self {
        Self { frame_count: 0, start, since_start: Duration::ZERO }
    }
}

/// FPS estimator with two alternating measurement windows.
///
/// Both windows count every accepted frame. Only the active one feeds the
/// exposed value; when it grows past the reset threshold it restarts from
/// zero and the other window (which kept accumulating) becomes active, so
/// the estimate never jumps back to a cold start.
///
/// Threshold: `reset_multiple * target_fps` frames while both windows hold
/// the same count, twice that once they are staggered.
#[derive(Debug, Clone)]
pub struct FpsMeter {
    windows: [Window; 2],
    active: usize,
    target_fps: u32,
    reset_multiple: u32,
    fps: f64,
}

impl FpsMeter {
    pub fn new(target_fps: u32, reset_multiple: u32, now: Instant) -> Self {
        Self {
            windows: [Window::new(now), Window::new(now)],
            active: 0,
            target_fps,
            reset_multiple,
            fps: 0.0,
        }
    }

    /// Restarts both windows at `now`. The exposed value is kept.
    pub fn reset(&mut self, now: Instant) {
        self.windows = [Window::new(now), Window::new(now)];
        self.active = 0;
    }

    /// Records an accepted frame at `now` and returns the updated estimate.
    pub fn record(&mut self, now: Instant) -> f64 {
        for w in &mut self.windows {
            w.frame_count += 1;
            w.since_start = now.saturating_duration_since(w.start);
        }

        let active = self.windows[self.active];
        let since_ms = active.since_start.as_secs_f64() * 1000.0;
        if active.frame_count > 0 && since_ms > 0.0 {
            let per_frame_ms = since_ms / active.frame_count as f64;
            self.fps = ((1000.0 / per_frame_ms) * 100.0).round() / 100.0;
        }

        let base = u64::from(self.reset_multiple) * u64::from(self.target_fps);
        let threshold = if self.windows[0].frame_count == self.windows[1].frame_count {
            base
        } else {
            base * 2
        };

        if active.frame_count > threshold {
            self.windows[self.active] = Window::new(now);
            self.active ^= 1;
        }

        self.fps
    }

    /// Last computed estimate, two-decimal precision.
    #[inline]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Index of the window currently feeding the estimate.
    #[inline]
    pub fn active_window(&self) -> usize {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(meter: &mut FpsMeter, t0: Instant, step: Duration, frames: u32) -> Instant {
        let mut now = t0;
        for _ in 0..frames {
            now += step;
            meter.record(now);
        }
        now
    }

    #[test]
    fn steady_rate_reports_that_rate() {
        let t0 = Instant::now();
        let mut meter = FpsMeter::new(50, 5, t0);
        feed(&mut meter, t0, Duration::from_millis(20), 10);
        assert_eq!(meter.fps(), 50.0);
    }

    #[test]
    fn estimate_is_rounded_to_two_decimals() {
        let t0 = Instant::now();
        let mut meter = FpsMeter::new(60, 5, t0);
        feed(&mut meter, t0, Duration::from_millis(7), 3);
        // 1000 / 7 = 142.857...
        assert_eq!(meter.fps(), 142.86);
    }

    #[test]
    fn windows_swap_past_threshold() {
        let t0 = Instant::now();
        let mut meter = FpsMeter::new(10, 1, t0);
        let step = Duration::from_millis(100);

        let now = feed(&mut meter, t0, step, 10);
        assert_eq!(meter.active_window(), 0);

        // 11th frame exceeds 1 * 10 frames: window 0 restarts, window 1 takes over.
        let now = feed(&mut meter, now, step, 1);
        assert_eq!(meter.active_window(), 1);
        assert_eq!(meter.fps(), 10.0);

        // Staggered windows wait for twice the threshold before swapping back.
        let now = feed(&mut meter, now, step, 9);
        assert_eq!(meter.active_window(), 1);
        feed(&mut meter, now, step, 1);
        assert_eq!(meter.active_window(), 0);
    }

    #[test]
    fn swap_does_not_reset_estimate_to_zero() {
        let t0 = Instant::now();
        let mut meter = FpsMeter::new(10, 1, t0);
        feed(&mut meter, t0, Duration::from_millis(100), 40);
        assert_eq!(meter.fps(), 10.0);
    }
}
