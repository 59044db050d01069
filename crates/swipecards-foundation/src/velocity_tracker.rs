//! Velocity tracking for release velocity.
//!
//! A weighted least-squares fit over the most recent samples; newer samples
//! weigh more. Samples older than the horizon are ignored.

use swipecards_ui_graphics::Point;

/// Ring buffer size for velocity tracking samples.
const HISTORY_SIZE: usize = 20;

/// Only use samples within the last 100ms for velocity calculation.
const HORIZON_MS: i64 = 100;

/// If no movement for this duration, assume the pointer has stopped.
const ASSUME_STOPPED_MS: i64 = 40;

/// Minimum pointer movement (in pixels) to consider as non-stopped.
const MIN_MOVEMENT_THRESHOLD: f32 = 2.0;

/// Per-sample weight decay; more recent samples weigh more.
const RECENCY_DECAY: f32 = 0.95;

#[derive(Clone, Copy, Debug, Default)]
struct DataPointAtTime {
    time_ms: i64,
    data_point: f32,
}

/// 1D velocity tracker over absolute positions.
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    samples: [Option<DataPointAtTime>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    /// Adds a position sample at the given time.
    pub fn add_data_point(&mut self, time_ms: i64, data_point: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(DataPointAtTime { time_ms, data_point });
    }

    /// Calculates the velocity in units/second.
    ///
    /// Returns 0.0 if there aren't enough samples or if the pointer hasn't moved.
    pub fn calculate_velocity(&self) -> f32 {
        let mut data_points = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut sample_count = 0;

        let newest_sample = match self.samples[self.index] {
            Some(s) => s,
            None => return 0.0,
        };

        let mut current_index = self.index;
        let mut oldest_sample_in_window: Option<DataPointAtTime> = None;

        while let Some(sample) = self.samples[current_index] {
            let age = (newest_sample.time_ms - sample.time_ms) as f32;
            if age > HORIZON_MS as f32 {
                break;
            }

            oldest_sample_in_window = Some(sample);
            data_points[sample_count] = sample.data_point;
            times[sample_count] = -age;

            current_index = if current_index == 0 {
                HISTORY_SIZE - 1
            } else {
                current_index - 1
            };

            sample_count += 1;
            if sample_count >= HISTORY_SIZE {
                break;
            }
        }

        if sample_count < 2 {
            return 0.0;
        }

        // A pointer that barely moved over a meaningful span has stopped.
        if let Some(oldest) = oldest_sample_in_window {
            let total_movement = (newest_sample.data_point - oldest.data_point).abs();
            let time_span_ms = (newest_sample.time_ms - oldest.time_ms) as f32;
            if time_span_ms > ASSUME_STOPPED_MS as f32 && total_movement < MIN_MOVEMENT_THRESHOLD {
                return 0.0;
            }
        }

        Self::weighted_slope(&data_points, &times, sample_count) * 1000.0
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }

    /// Slope of `x = a + b*t` by weighted least squares; units per ms.
    fn weighted_slope(
        data_points: &[f32; HISTORY_SIZE],
        times: &[f32; HISTORY_SIZE],
        sample_count: usize,
    ) -> f32 {
        let mut sum_weight = 0.0f32;
        let mut sum_t = 0.0f32;
        let mut sum_x = 0.0f32;
        let mut sum_tt = 0.0f32;
        let mut sum_tx = 0.0f32;

        for i in 0..sample_count {
            let weight = RECENCY_DECAY.powi(i as i32);
            let t = times[i];
            let x = data_points[i];

            sum_weight += weight;
            sum_t += weight * t;
            sum_x += weight * x;
            sum_tt += weight * t * t;
            sum_tx += weight * t * x;
        }

        let denom = sum_weight * sum_tt - sum_t * sum_t;
        if denom.abs() < f32::EPSILON {
            return 0.0;
        }

        (sum_weight * sum_tx - sum_t * sum_x) / denom
    }
}

/// Tracks both axes of a pointer.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    x: VelocityTracker1D,
    y: VelocityTracker1D,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_position(&mut self, time_ms: i64, position: Point) {
        self.x.add_data_point(time_ms, position.x);
        self.y.add_data_point(time_ms, position.y);
    }

    /// Velocity in logical pixels per second.
    pub fn velocity_per_second(&self) -> Point {
        Point::new(self.x.calculate_velocity(), self.y.calculate_velocity())
    }

    /// Velocity in logical pixels per millisecond.
    pub fn velocity_per_ms(&self) -> Point {
        self.velocity_per_second() * 0.001
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tracker_returns_zero() {
        let tracker = VelocityTracker1D::new();
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn single_point_returns_zero() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 100.0);
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn constant_velocity() {
        let mut tracker = VelocityTracker1D::new();
        // 100 px per 10ms = 10000 px/s
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(10, 100.0);
        tracker.add_data_point(20, 200.0);
        tracker.add_data_point(30, 300.0);

        let velocity = tracker.calculate_velocity();
        assert!(
            (velocity - 10000.0).abs() < 1000.0,
            "Expected ~10000, got {}",
            velocity
        );
    }

    #[test]
    fn reset_clears_samples() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(10, 100.0);
        tracker.reset();
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn negative_velocity() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 300.0);
        tracker.add_data_point(10, 200.0);
        tracker.add_data_point(20, 100.0);

        let velocity = tracker.calculate_velocity();
        assert!(velocity < 0.0, "Expected negative velocity, got {}", velocity);
    }

    #[test]
    fn old_samples_ignored() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(150, 100.0);
        tracker.add_data_point(160, 200.0);
        tracker.add_data_point(170, 300.0);

        let velocity = tracker.calculate_velocity();
        assert!((velocity - 10000.0).abs() < 1000.0, "got {}", velocity);
    }

    #[test]
    fn resting_pointer_has_no_velocity() {
        let mut tracker = VelocityTracker1D::new();
        for t in 0..6 {
            tracker.add_data_point(t * 10, 50.0 + (t % 2) as f32 * 0.5);
        }
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn two_dimensional_tracker_reports_per_ms() {
        let mut tracker = VelocityTracker::new();
        tracker.add_position(0, Point::new(0.0, 0.0));
        tracker.add_position(10, Point::new(30.0, -10.0));
        tracker.add_position(20, Point::new(60.0, -20.0));
        let velocity = tracker.velocity_per_ms();
        assert!((velocity.x - 3.0).abs() < 0.1, "vx {}", velocity.x);
        assert!((velocity.y + 1.0).abs() < 0.1, "vy {}", velocity.y);
    }
}
