//! Time management utilities

use std::time::{Duration, Instant};

/// Default upper bound on a single simulation step, in seconds
///
/// Frame hitches (window drags, debugger pauses) would otherwise feed a
/// huge elapsed time into movement resolution and let movers tunnel
/// through thin shapes.
pub const DEFAULT_MAX_STEP: f32 = 0.1;

/// High-precision frame timer with a clamped simulation step
pub struct Timer {
    last_frame: Instant,
    max_step: f32,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer with the default step clamp
    pub fn new() -> Self {
        Self::with_max_step(DEFAULT_MAX_STEP)
    }

    /// Create a new timer clamping each step to `max_step` seconds
    pub fn with_max_step(max_step: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            max_step,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.delta_time = elapsed.as_secs_f32().min(self.max_step);
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds, clamped to the
    /// maximum step
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total simulated time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Simple stopwatch for measuring elapsed time
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a new stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start the stopwatch
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed += start.elapsed();
            self.start_time = None;
        }
    }

    /// Reset the stopwatch to zero
    pub fn reset(&mut self) {
        self.start_time = None;
        self.elapsed = Duration::ZERO;
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        let current_elapsed = if let Some(start) = self.start_time {
            start.elapsed()
        } else {
            Duration::ZERO
        };
        self.elapsed + current_elapsed
    }

    /// Get the elapsed time in seconds
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }

    /// Check if the stopwatch is currently running
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_clamps_long_steps() {
        let mut timer = Timer::with_max_step(0.05);
        timer.last_frame = Instant::now() - Duration::from_millis(500);
        timer.update();
        assert!(timer.delta_time() <= 0.05);
        assert_eq!(timer.frame_count(), 1);
    }

    #[test]
    fn test_stopwatch_accumulates() {
        let mut stopwatch = Stopwatch::start_new();
        assert!(stopwatch.is_running());
        stopwatch.stop();
        let first = stopwatch.elapsed();
        assert!(!stopwatch.is_running());
        // Elapsed time must not advance while stopped.
        assert_eq!(stopwatch.elapsed(), first);
    }
}
