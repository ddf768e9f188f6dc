//! # Frame Statistics
//!
//! Tracks the interval between presented frames and derives fps and
//! frame-time figures from a ring buffer of recent samples. The app logs a
//! summary at `debug` level every few seconds.
//!
//! ```rust
//! use nebula::performance::PerformanceMonitor;
//!
//! let mut monitor = PerformanceMonitor::new();
//! // once per RedrawRequested
//! monitor.record_frame();
//! monitor.log_if_due();
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Derived frame statistics
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetrics {
    /// Frames per second over the sample window
    pub fps: f32,
    /// Average frame time in milliseconds
    pub frame_time_ms: f32,
    /// Minimum frame time in the current window
    pub min_frame_time_ms: f32,
    /// Maximum frame time in the current window
    pub max_frame_time_ms: f32,
    /// Meshes drawn in the last frame
    pub draw_calls: u32,
    /// Frames recorded since start
    pub total_frames: u64,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time_ms: 0.0,
            min_frame_time_ms: 0.0,
            max_frame_time_ms: 0.0,
            draw_calls: 0,
            total_frames: 0,
        }
    }
}

pub struct PerformanceMonitor {
    /// Ring buffer of recent frame intervals
    frame_times: VecDeque<Duration>,
    max_samples: usize,
    last_frame: Option<Instant>,
    current_metrics: PerformanceMetrics,
    last_report: Instant,
    report_interval: Duration,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::with_config(120, Duration::from_secs(5))
    }

    /// `max_samples` frame intervals are averaged; a summary is logged at
    /// most once per `report_interval`.
    pub fn with_config(max_samples: usize, report_interval: Duration) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples: max_samples.max(1),
            last_frame: None,
            current_metrics: PerformanceMetrics::default(),
            last_report: Instant::now(),
            report_interval,
        }
    }

    /// Records that a frame was presented now
    pub fn record_frame(&mut self) {
        self.record_frame_at(Instant::now());
    }

    /// Records a frame presented at `now`; the first call only sets the origin
    pub fn record_frame_at(&mut self, now: Instant) {
        self.current_metrics.total_frames += 1;
        if let Some(previous) = self.last_frame.replace(now) {
            self.add_frame_time(now.saturating_duration_since(previous));
            self.update_metrics();
        }
    }

    fn add_frame_time(&mut self, frame_time: Duration) {
        if self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);
    }

    fn update_metrics(&mut self) {
        if self.frame_times.is_empty() {
            return;
        }

        let total_time: Duration = self.frame_times.iter().sum();
        let avg_frame_time_ms =
            total_time.as_secs_f32() * 1000.0 / self.frame_times.len() as f32;

        self.current_metrics.frame_time_ms = avg_frame_time_ms;
        self.current_metrics.fps = if avg_frame_time_ms > 0.0 {
            1000.0 / avg_frame_time_ms
        } else {
            0.0
        };

        if let (Some(min_time), Some(max_time)) =
            (self.frame_times.iter().min(), self.frame_times.iter().max())
        {
            self.current_metrics.min_frame_time_ms = min_time.as_secs_f32() * 1000.0;
            self.current_metrics.max_frame_time_ms = max_time.as_secs_f32() * 1000.0;
        }
    }

    pub fn update_render_stats(&mut self, draw_calls: u32) {
        self.current_metrics.draw_calls = draw_calls;
    }

    pub fn get_metrics(&self) -> &PerformanceMetrics {
        &self.current_metrics
    }

    /// Logs a summary at `debug` if the report interval has elapsed
    pub fn log_if_due(&mut self) -> bool {
        if self.last_report.elapsed() < self.report_interval {
            return false;
        }
        self.last_report = Instant::now();

        let m = &self.current_metrics;
        log::debug!(
            "{:.1} fps, frame {:.2}ms (min {:.2}, max {:.2}), {} meshes, {} frames",
            m.fps,
            m.frame_time_ms,
            m.min_frame_time_ms,
            m.max_frame_time_ms,
            m.draw_calls,
            m.total_frames
        );
        true
    }

    /// Reset all metrics and history
    pub fn reset(&mut self) {
        self.frame_times.clear();
        self.current_metrics = PerformanceMetrics::default();
        self.last_frame = None;
        self.last_report = Instant::now();
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steady_frames() {
        let mut monitor = PerformanceMonitor::new();
        let start = Instant::now();
        for i in 0..=10 {
            monitor.record_frame_at(start + Duration::from_millis(20 * i));
        }
        let metrics = monitor.get_metrics();
        assert_eq!(metrics.total_frames, 11);
        assert!((metrics.frame_time_ms - 20.0).abs() < 0.01);
        assert!((metrics.fps - 50.0).abs() < 0.1);
    }

    #[test]
    fn test_first_frame_has_no_interval() {
        let mut monitor = PerformanceMonitor::new();
        monitor.record_frame_at(Instant::now());
        assert_eq!(monitor.get_metrics().fps, 0.0);
        assert_eq!(monitor.get_metrics().total_frames, 1);
    }

    #[test]
    fn test_window_drops_old_samples() {
        let mut monitor = PerformanceMonitor::with_config(2, Duration::from_secs(5));
        let start = Instant::now();
        monitor.record_frame_at(start);
        monitor.record_frame_at(start + Duration::from_millis(100));
        monitor.record_frame_at(start + Duration::from_millis(110));
        monitor.record_frame_at(start + Duration::from_millis(120));
        let metrics = monitor.get_metrics();
        assert!((metrics.max_frame_time_ms - 10.0).abs() < 0.01);
        assert!((metrics.min_frame_time_ms - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_reset() {
        let mut monitor = PerformanceMonitor::new();
        let start = Instant::now();
        monitor.record_frame_at(start);
        monitor.record_frame_at(start + Duration::from_millis(16));
        monitor.update_render_stats(203);
        monitor.reset();
        assert_eq!(monitor.get_metrics(), &PerformanceMetrics::default());
    }
}
