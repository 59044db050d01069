//! Animation system for the swipe card stack.
//!
//! Provides frame-clock driven values with spring and decay physics, and the
//! range interpolation used to derive rotation and opacity from a drag.

mod animation;
mod decay_spec;
mod interpolation;

pub use animation::*;
pub use decay_spec::*;
pub use interpolation::*;
