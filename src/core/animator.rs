//! Time-based scroll animation.
//!
//! A [`ScrollAnimation`] is a pure description of one transition: where it
//! started, where it is headed, when it started and how long it lasts.  The
//! owner samples it once per frame and writes the result to the scroll
//! offset; nothing here touches the offset directly.

use std::time::{Duration, Instant};

use super::easing::ease_out_quart;

/// Default duration of a programmatic scroll.
pub const DEFAULT_SCROLL_DURATION: Duration = Duration::from_millis(800);

/// Result of sampling an animation on a given frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    /// Still moving; write this offset and ask again next frame.
    Running(f64),
    /// Finished; this is exactly the target offset.
    Done(f64),
}

impl Frame {
    pub fn offset(self) -> f64 {
        match self {
            Frame::Running(v) | Frame::Done(v) => v,
        }
    }

    pub fn is_done(self) -> bool {
        matches!(self, Frame::Done(_))
    }
}

/// One eased transition of the scroll offset from `from` to `to`.
#[derive(Debug, Clone, Copy)]
pub struct ScrollAnimation {
    from: f64,
    to: f64,
    started_at: Instant,
    duration: Duration,
}

impl ScrollAnimation {
    pub fn new(from: f64, to: f64, started_at: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    /// Normalised progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Sample the offset for the frame drawn at `now`.
    ///
    /// The last frame reports the target itself rather than the
    /// interpolated value, so no rounding residue survives the animation.
    pub fn sample(&self, now: Instant) -> Frame {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return Frame::Done(self.to);
        }
        let eased = ease_out_quart(progress);
        Frame::Running(self.from + (self.to - self.from) * eased)
    }
}
