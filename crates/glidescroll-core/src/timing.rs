//! Time calculation utilities for the animation loop.

use std::time::Duration;

/// Number of timer firings for an animation of `time_secs` seconds at
/// `fps` ticks per second, rounded to the nearest whole tick.
///
/// May round to zero; a zero-tick animation completes on its very first
/// timer firing.
#[inline]
pub fn total_ticks(time_secs: f64, fps: u32) -> u32 {
    (time_secs * f64::from(fps)).round() as u32
}

/// Interval between timer firings. `fps` must be non-zero; callers
/// sanitize options before reaching this point.
#[inline]
pub fn tick_duration(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(fps))
}
