//! Platform abstraction traits for runtime services.
//!
//! These traits let the runtime delegate scheduling and clock
//! responsibilities to the host, so the widget can be driven by a winit
//! loop, a browser `requestAnimationFrame` or a test harness alike.

use web_time::Instant;

/// Schedules work for the runtime.
///
/// Implementations are responsible for waking the host so that it pumps a
/// new frame. They must be safe to use from multiple threads.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Provides timing information for the runtime.
pub trait Clock: Send + Sync {
    /// Instant type produced by this clock implementation.
    type Instant: Copy + Send + Sync;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of milliseconds elapsed since `since`.
    fn elapsed_millis(&self, since: Self::Instant) -> u64;

    /// Returns the number of nanoseconds elapsed since `since`.
    fn elapsed_nanos(&self, since: Self::Instant) -> u64;
}

/// Monotonic clock backed by `web_time::Instant`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebTimeClock;

impl Clock for WebTimeClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed_millis(&self, since: Instant) -> u64 {
        since.elapsed().as_millis() as u64
    }

    fn elapsed_nanos(&self, since: Instant) -> u64 {
        since.elapsed().as_nanos() as u64
    }
}
