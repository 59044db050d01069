//! Core runtime for the swipe card stack.
//!
//! Everything runs on one logical event loop: pointer events, frame callbacks
//! and animation completions are all serviced from the thread that owns the
//! [`Runtime`]. Nothing in here is `Send`.

mod frame_clock;
mod platform;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{Clock, RuntimeScheduler, WebTimeClock};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};

/// Identifier handed out for every registered frame callback.
pub type FrameCallbackId = u64;

/// Nanoseconds in one 60 Hz frame, the cadence hosts and tests pump at.
pub const FRAME_NANOS_60HZ: u64 = 16_666_667;
