//! Release classification.

use swipecards_foundation::gesture_constants::{
    HORIZONTAL_THRESHOLD, MAX_EXIT_VELOCITY, MIN_EXIT_VELOCITY, VERTICAL_THRESHOLD,
};
use swipecards_ui_graphics::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeDecision {
    /// Dismiss the card. `exit_velocity` is in logical pixels per millisecond.
    Commit {
        direction: SwipeDirection,
        exit_velocity: Point,
    },
    /// Spring back to center.
    Cancel,
}

impl SwipeDecision {
    pub fn direction(&self) -> Option<SwipeDirection> {
        match self {
            SwipeDecision::Commit { direction, .. } => Some(*direction),
            SwipeDecision::Cancel => None,
        }
    }
}

/// Clamp the horizontal release speed into the exit range, keeping its sign.
///
/// Zero and NaN take the positive branch.
pub fn normalize_exit_velocity(vx: f32) -> f32 {
    let magnitude = if vx.is_nan() { 0.0 } else { vx.abs() };
    let clamped = magnitude.clamp(MIN_EXIT_VELOCITY, MAX_EXIT_VELOCITY);
    if vx < 0.0 {
        -clamped
    } else {
        clamped
    }
}

/// Classify a finished drag. Horizontal wins over vertical; a displacement
/// exactly on a threshold cancels.
pub fn classify(displacement: Point, velocity: Point) -> SwipeDecision {
    let direction = if displacement.x.abs() > HORIZONTAL_THRESHOLD {
        if displacement.x > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        }
    } else if displacement.y.abs() > VERTICAL_THRESHOLD {
        if displacement.y > 0.0 {
            SwipeDirection::Down
        } else {
            SwipeDirection::Up
        }
    } else {
        return SwipeDecision::Cancel;
    };

    let vy = if velocity.y.is_finite() { velocity.y } else { 0.0 };
    SwipeDecision::Commit {
        direction,
        exit_velocity: Point::new(normalize_exit_velocity(velocity.x), vy),
    }
}
