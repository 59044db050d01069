//! Pure math for the swipe card stack.
//!
//! Geometry primitives shared by the runtime, animation, gesture and widget
//! crates. No rendering lives here.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::Point;
}
