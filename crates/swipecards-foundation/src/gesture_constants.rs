//! Shared gesture constants for the swipe decision and its animations.
//!
//! Distances are logical pixels, velocities are logical pixels per
//! millisecond (the unit pointer trackers report on release).

/// Horizontal displacement a release must exceed to dismiss the card.
pub const HORIZONTAL_THRESHOLD: f32 = 100.0;

/// Vertical displacement a release must exceed to dismiss the card.
///
/// Far beyond any screen, so vertical dismissals only happen when a host
/// drives the gesture programmatically.
pub const VERTICAL_THRESHOLD: f32 = 5000.0;

/// Slowest horizontal fling speed handed to the exit animation.
pub const MIN_EXIT_VELOCITY: f32 = 5.0;

/// Fastest horizontal fling speed handed to the exit animation.
pub const MAX_EXIT_VELOCITY: f32 = 8.0;

/// Deceleration of the exit fling.
pub const EXIT_DECELERATION: f32 = 0.6;

/// Friction of the spring that returns a cancelled card to the centre.
pub const RETURN_FRICTION: f32 = 4.0;

/// Default friction of the entrance scale spring.
pub const DEFAULT_ENTRANCE_FRICTION: f32 = 10.0;

/// Scale the next card starts its entrance from.
pub const EXIT_RESET_SCALE: f32 = 0.7;

/// Horizontal drag distance at which tilt and card fade reach their extremes.
pub const TILT_RANGE: f32 = 200.0;

/// Tilt in degrees at [`TILT_RANGE`].
pub const MAX_TILT_DEGREES: f32 = 30.0;

/// Horizontal drag distance at which the yup/nope overlays are fully opaque.
pub const OVERLAY_RANGE: f32 = 100.0;
