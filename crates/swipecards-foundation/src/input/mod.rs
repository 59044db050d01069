mod drag;
mod types;

pub use drag::{DragGesture, DragSignal};
pub use types::*;
