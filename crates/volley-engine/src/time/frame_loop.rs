use std::time::{Duration, Instant};

use super::FpsMeter;

/// Frame scheduler configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LoopConfig {
    /// Maximum rate at which frames are accepted.
    pub target_fps: u32,
    /// FPS window reset threshold, as a multiple of `target_fps`.
    pub reset_multiple: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self { target_fps: 60, reset_multiple: 5 }
    }
}

/// Snapshot handed to per-frame work for an accepted frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Host timestamp of this frame.
    pub now: Instant,
    /// Time since the previous accepted frame.
    pub elapsed: Duration,
    /// Monotonic counter of accepted frames since `start`.
    pub frame_index: u64,
    /// Smoothed FPS estimate including this frame.
    pub fps: f64,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Stopped,
    Running,
}

/// Fixed-target-rate frame driver.
///
/// `stopped -> running -> stopped`. While running, every host frame is
/// offered to [`advance`](Self::advance); frames arriving sooner than
/// `1 / target_fps` after the last accepted one are dropped without work,
/// which caps the rate without blocking the host.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    config: LoopConfig,
    interval: Duration,
    state: LoopState,
    before: Instant,
    last_accepted: Instant,
    frame_index: u64,
    meter: FpsMeter,
}

impl FrameLoop {
    pub fn new(config: LoopConfig) -> Self {
        debug_assert!(config.target_fps > 0, "target_fps must be positive");
        let target = config.target_fps.max(1);
        let now = Instant::now();
        Self {
            config,
            interval: Duration::from_secs_f64(1.0 / f64::from(target)),
            state: LoopState::Stopped,
            before: now,
            last_accepted: now,
            frame_index: 0,
            meter: FpsMeter::new(target, config.reset_multiple, now),
        }
    }

    /// Enters `running`; the next host frame after `now` is the first one offered.
    ///
    /// Starting a running loop is a no-op.
    pub fn start(&mut self, now: Instant) {
        if self.state == LoopState::Running {
            log::debug!("frame loop already running");
            return;
        }
        self.before = now;
        self.last_accepted = now;
        self.frame_index = 0;
        self.meter.reset(now);
        self.state = LoopState::Running;
        log::info!(
            "frame loop started (target {} fps, interval {:.3} ms)",
            self.config.target_fps,
            self.interval.as_secs_f64() * 1000.0
        );
    }

    /// Cancels the pending frame and returns to `stopped`.
    ///
    /// Stopping a stopped loop is a no-op.
    pub fn stop(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.state = LoopState::Stopped;
        log::info!("frame loop stopped after {} frames", self.frame_index);
    }

    /// Offers one host frame. Returns `Some` when the frame is accepted and
    /// per-frame work should run.
    pub fn advance(&mut self, now: Instant) -> Option<FrameTime> {
        if self.state != LoopState::Running {
            return None;
        }

        let elapsed = now.saturating_duration_since(self.before);
        if elapsed < self.interval {
            return None;
        }

        // Keep the phase of the cadence: carry the remainder over.
        let interval_ns = self.interval.as_nanos().max(1);
        let remainder = Duration::from_nanos((elapsed.as_nanos() % interval_ns) as u64);
        self.before = now.checked_sub(remainder).unwrap_or(now);

        let since_last = now.saturating_duration_since(self.last_accepted);
        self.last_accepted = now;
        self.frame_index += 1;
        let fps = self.meter.record(now);

        Some(FrameTime { now, elapsed: since_last, frame_index: self.frame_index, fps })
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Exposed FPS estimate (two-decimal precision).
    #[inline]
    pub fn fps(&self) -> f64 {
        self.meter.fps()
    }

    /// Target frame interval, `1 / target_fps`.
    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn config(&self) -> LoopConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(target_fps: u32) -> (FrameLoop, Instant) {
        let mut lp = FrameLoop::new(LoopConfig { target_fps, ..LoopConfig::default() });
        let t0 = Instant::now();
        lp.start(t0);
        (lp, t0)
    }

    // ── state machine ─────────────────────────────────────────────────────

    #[test]
    fn stopped_loop_does_no_work() {
        let mut lp = FrameLoop::new(LoopConfig::default());
        assert_eq!(lp.state(), LoopState::Stopped);
        assert!(lp.advance(Instant::now() + Duration::from_secs(1)).is_none());
    }

    #[test]
    fn stop_cancels_pending_frame() {
        let (mut lp, t0) = running(60);
        lp.stop();
        assert_eq!(lp.state(), LoopState::Stopped);
        assert!(lp.advance(t0 + Duration::from_secs(1)).is_none());
    }

    #[test]
    fn stop_while_stopped_is_noop() {
        let mut lp = FrameLoop::new(LoopConfig::default());
        lp.stop();
        lp.stop();
        assert_eq!(lp.state(), LoopState::Stopped);
    }

    // ── pacing ────────────────────────────────────────────────────────────

    #[test]
    fn frames_at_target_interval_stabilize_fps() {
        let (mut lp, t0) = running(60);
        let step = lp.interval();
        let mut accepted = 0;
        for k in 1..=120u32 {
            if lp.advance(t0 + step * k).is_some() {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 120);
        assert!((lp.fps() - 60.0).abs() <= 0.6, "fps {}", lp.fps());
    }

    #[test]
    fn frames_faster_than_target_are_dropped() {
        let (mut lp, t0) = running(60);
        let step = lp.interval() / 3;
        let mut accepted = 0;
        let fed = 90u32;
        for k in 1..=fed {
            if lp.advance(t0 + step * k).is_some() {
                accepted += 1;
            }
        }
        assert!(accepted > 0);
        assert!(accepted < fed, "accepted {accepted} of {fed}");
        assert!(accepted <= 31);
    }

    #[test]
    fn accepted_frames_carry_index_and_elapsed() {
        let (mut lp, t0) = running(10);
        let first = lp.advance(t0 + Duration::from_millis(100)).unwrap();
        assert_eq!(first.frame_index, 1);
        assert!(lp.advance(t0 + Duration::from_millis(150)).is_none());
        let second = lp.advance(t0 + Duration::from_millis(230)).unwrap();
        assert_eq!(second.frame_index, 2);
        assert_eq!(second.elapsed, Duration::from_millis(130));
    }
}
