//! Frame-Rate Meter
//!
//! Exponential moving average of frame time, published at a fixed
//! interval with running min/max FPS.

use crate::game::config::FpsConfig;

/// Weight of each new sample in the frame-time average.
const SMOOTHING: f32 = 0.1;

/// Smoothed FPS diagnostic.
#[derive(Clone, Debug)]
pub struct FrameRateMeter {
    update_interval: f32,
    time_left: f32,
    smoothed_dt: f32,
    current_fps: u32,
    min_fps: Option<u32>,
    max_fps: u32,
}

impl FrameRateMeter {
    /// Create a meter publishing every `update_interval` seconds.
    pub fn new(config: &FpsConfig) -> Self {
        Self {
            update_interval: config.update_interval,
            time_left: config.update_interval,
            smoothed_dt: 0.0,
            current_fps: 0,
            min_fps: None,
            max_fps: 0,
        }
    }

    /// Feed one unscaled frame time. Returns true when a new reading
    /// was published.
    pub fn update(&mut self, frame_dt: f32) -> bool {
        self.smoothed_dt += (frame_dt - self.smoothed_dt) * SMOOTHING;
        self.time_left -= frame_dt;

        if self.time_left > 0.0 {
            return false;
        }
        self.time_left = self.update_interval;

        if self.smoothed_dt <= 0.0 {
            return false;
        }

        let fps = (1.0 / self.smoothed_dt).round() as u32;
        self.current_fps = fps;
        self.min_fps = Some(self.min_fps.map_or(fps, |m| m.min(fps)));
        self.max_fps = self.max_fps.max(fps);
        true
    }

    /// Last published FPS.
    pub fn current_fps(&self) -> u32 {
        self.current_fps
    }

    /// Lowest published FPS, if any reading exists.
    pub fn min_fps(&self) -> Option<u32> {
        self.min_fps
    }

    /// Highest published FPS.
    pub fn max_fps(&self) -> u32 {
        self.max_fps
    }

    /// Smoothed frame time in milliseconds.
    pub fn frame_time_ms(&self) -> f32 {
        self.smoothed_dt * 1000.0
    }

    /// Overlay text.
    pub fn summary(&self) -> String {
        format!(
            "FPS: {}\nMin FPS: {}\nMax FPS: {}\nFrame Time: {:.1} ms",
            self.current_fps,
            self.min_fps.unwrap_or(0),
            self.max_fps,
            self.frame_time_ms(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter(interval: f32) -> FrameRateMeter {
        FrameRateMeter::new(&FpsConfig { update_interval: interval })
    }

    #[test]
    fn test_publishes_on_interval() {
        let mut meter = meter(0.5);
        let mut published = 0;
        for _ in 0..128 {
            if meter.update(1.0 / 64.0) {
                published += 1;
            }
        }
        // 2 seconds at 0.5 s interval
        assert_eq!(published, 4);
    }

    #[test]
    fn test_converges_to_steady_rate() {
        let mut meter = meter(0.25);
        for _ in 0..600 {
            meter.update(1.0 / 60.0);
        }
        assert_eq!(meter.current_fps(), 60);
        assert!((meter.frame_time_ms() - 16.67).abs() < 0.05);
    }

    #[test]
    fn test_tracks_min_and_max() {
        let mut meter = meter(0.1);
        for _ in 0..300 {
            meter.update(0.01);
        }
        for _ in 0..300 {
            meter.update(0.02);
        }
        // Early readings run high while the average warms up from zero
        assert!(meter.max_fps() >= 100);
        assert_eq!(meter.min_fps(), Some(50));
        assert_eq!(meter.current_fps(), 50);
    }

    #[test]
    fn test_summary_format() {
        let meter = meter(0.5);
        assert_eq!(meter.summary(), "FPS: 0\nMin FPS: 0\nMax FPS: 0\nFrame Time: 0.0 ms");
    }
}
