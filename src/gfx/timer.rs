//! Fixed-rate frame pacing

use std::{
    thread,
    time::{Duration, Instant},
};

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
#[error("target FPS must be greater than 0, got {0}")]
pub struct InvalidFrameRate(pub f32);

/// Sleeps away whatever is left of each frame's time slot and reports the
/// real length of the last frame.
#[derive(Debug)]
pub struct FixedRateTimer {
    target_frame_duration: Duration,
    frame_start: Instant,
    /// Milliseconds
    delta_time: f32,
}

impl FixedRateTimer {
    pub fn new(target_fps: f32) -> Result<Self, InvalidFrameRate> {
        if !target_fps.is_finite() || target_fps <= f32::EPSILON {
            return Err(InvalidFrameRate(target_fps));
        }

        let target_frame_duration = Duration::from_secs_f32(1.0 / target_fps);
        Ok(Self {
            target_frame_duration,
            frame_start: Instant::now(),
            delta_time: target_frame_duration.as_secs_f32() * 1000.0,
        })
    }

    pub fn target_frame_duration(&self) -> Duration {
        self.target_frame_duration
    }

    pub fn start_frame(&mut self) {
        self.frame_start = Instant::now();
    }

    pub fn end_frame(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.target_frame_duration {
            thread::sleep(self.target_frame_duration - elapsed);
        }
        self.delta_time = self.frame_start.elapsed().as_secs_f32() * 1000.0;
    }

    /// Length of the last completed frame in milliseconds; the target frame
    /// length before the first one.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }
}
