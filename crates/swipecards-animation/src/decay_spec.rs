//! Decay animation specification for fling-off animations.
//!
//! A decay animation has no fixed target: it starts with a velocity and
//! decelerates exponentially. Time is measured in milliseconds and velocity in
//! units per millisecond, which is what pointer trackers report on release.

/// Trait for decay animation specifications.
///
/// The final position depends only on the initial value and velocity.
pub trait FloatDecayAnimationSpec {
    /// Velocity (units/ms) below which the animation is considered finished.
    fn abs_velocity_threshold(&self) -> f32;

    /// Get position at a given time.
    fn get_value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32;

    /// Get velocity (units/ms) at a given time.
    fn get_velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32;

    /// Get total animation duration in nanoseconds.
    fn get_duration_nanos(&self, initial_value: f32, initial_velocity: f32) -> i64;

    /// Get the target value (final position) of the animation.
    fn get_target_value(&self, initial_value: f32, initial_velocity: f32) -> f32;
}

/// Exponential velocity decay.
///
/// `value(t) = v0 + v / (1 - d) * (1 - e^(-(1 - d) * t))` with `t` in ms.
/// A `deceleration` close to 1 glides for a long time; 0.6 stops within a
/// couple of frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialDecaySpec {
    deceleration: f32,
    abs_velocity_threshold: f32,
}

impl ExponentialDecaySpec {
    /// Roughly a tenth of a pixel of travel per 60 Hz frame.
    pub const DEFAULT_VELOCITY_THRESHOLD: f32 = 0.1 / 16.0;

    /// `deceleration` is clamped into `(0, 1)`.
    pub fn new(deceleration: f32) -> Self {
        Self {
            deceleration: deceleration.clamp(f32::EPSILON, 1.0 - f32::EPSILON),
            abs_velocity_threshold: Self::DEFAULT_VELOCITY_THRESHOLD,
        }
    }

    fn rate(&self) -> f32 {
        1.0 - self.deceleration
    }
}

impl FloatDecayAnimationSpec for ExponentialDecaySpec {
    fn abs_velocity_threshold(&self) -> f32 {
        self.abs_velocity_threshold
    }

    fn get_value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let time_ms = play_time_nanos.max(0) as f32 / 1_000_000.0;
        let rate = self.rate();
        initial_value + initial_velocity / rate * (1.0 - (-rate * time_ms).exp())
    }

    fn get_velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        _initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let time_ms = play_time_nanos.max(0) as f32 / 1_000_000.0;
        initial_velocity * (-self.rate() * time_ms).exp()
    }

    fn get_duration_nanos(&self, _initial_value: f32, initial_velocity: f32) -> i64 {
        let speed = initial_velocity.abs();
        if speed <= self.abs_velocity_threshold {
            return 0;
        }
        let duration_ms = (speed / self.abs_velocity_threshold).ln() / self.rate();
        (duration_ms as f64 * 1_000_000.0).ceil() as i64
    }

    fn get_target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        initial_value + initial_velocity / self.rate()
    }
}
