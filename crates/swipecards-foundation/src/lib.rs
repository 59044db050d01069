//! Pointer input and gesture foundations for the swipe card stack.

pub mod gesture_constants;
pub mod input;
mod velocity_tracker;

pub use input::*;
pub use velocity_tracker::{VelocityTracker, VelocityTracker1D};
