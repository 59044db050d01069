//! Testing utilities and harness for the swipe card stack

mod recorder;
mod testing;

pub use recorder::{SwipeEvent, SwipeRecorder, TextRenderer};
pub use testing::*;

pub mod prelude {
    pub use crate::recorder::{SwipeEvent, SwipeRecorder, TextRenderer};
    pub use crate::testing::*;
}
