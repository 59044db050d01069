use std::fmt;

use swipecards_core::{Runtime, RuntimeHandle, FRAME_NANOS_60HZ};
use swipecards_foundation::{PointerEvent, PointerEventKind};
use swipecards_ui::{SwipeCards, SwipeCardsBuilder, SwipeDecision};
use swipecards_ui_graphics::Point;

/// Frames [`SwipeTestRule::pump_until_idle`] runs before giving up.
pub const DEFAULT_FRAME_BUDGET: usize = 2_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestError {
    /// Frames were still being requested after the budget ran out.
    FrameBudgetExceeded { frames: usize },
    /// A scripted swipe found no card to drag.
    NoActiveCard,
}

impl fmt::Display for TestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestError::FrameBudgetExceeded { frames } => {
                write!(f, "still animating after {frames} frames")
            }
            TestError::NoActiveCard => write!(f, "no active card to swipe"),
        }
    }
}

impl std::error::Error for TestError {}

/// Headless harness for exercising a [`SwipeCards`] widget in tests.
///
/// Owns the runtime the widget animates on and a synthetic 60 Hz frame
/// clock, so scripted gestures and their animations run deterministically
/// without a host.
pub struct SwipeTestRule<C: 'static> {
    runtime: Runtime,
    widget: SwipeCards<C>,
    frame_time_nanos: u64,
    uptime_ms: i64,
}

impl<C: 'static> SwipeTestRule<C> {
    /// Build the widget with `configure` on a fresh runtime.
    pub fn new(configure: impl FnOnce(SwipeCardsBuilder<C>) -> SwipeCardsBuilder<C>) -> Self {
        let runtime = Runtime::default();
        let widget = configure(SwipeCards::builder(runtime.handle())).build();
        Self {
            runtime,
            widget,
            frame_time_nanos: 0,
            uptime_ms: 0,
        }
    }

    /// Build the widget and let its entrance settle.
    pub fn settled(
        configure: impl FnOnce(SwipeCardsBuilder<C>) -> SwipeCardsBuilder<C>,
    ) -> Result<Self, TestError> {
        let mut rule = Self::new(configure);
        rule.pump_until_idle()?;
        Ok(rule)
    }

    pub fn widget(&self) -> &SwipeCards<C> {
        &self.widget
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn needs_frame(&self) -> bool {
        self.runtime.needs_frame()
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    /// Run one 60 Hz frame.
    pub fn advance_frame(&mut self) {
        self.frame_time_nanos += FRAME_NANOS_60HZ;
        self.runtime
            .handle()
            .drain_frame_callbacks(self.frame_time_nanos);
    }

    pub fn pump_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.advance_frame();
        }
    }

    /// Advance frames until no animation asks for another one. Returns the
    /// number of frames run.
    pub fn pump_until_idle(&mut self) -> Result<usize, TestError> {
        self.pump_until_idle_within(DEFAULT_FRAME_BUDGET)
    }

    pub fn pump_until_idle_within(&mut self, budget: usize) -> Result<usize, TestError> {
        let mut frames = 0;
        while self.runtime.needs_frame() {
            if frames >= budget {
                return Err(TestError::FrameBudgetExceeded { frames });
            }
            self.advance_frame();
            frames += 1;
        }
        log::trace!("idle after {} frame(s)", frames);
        Ok(frames)
    }

    /// Drag the current card by `translation` and release it with
    /// `velocity` (pixels per millisecond). Does not pump frames.
    pub fn swipe(&mut self, translation: Point, velocity: Point) -> Result<SwipeDecision, TestError> {
        if !self.widget.drag_start() {
            return Err(TestError::NoActiveCard);
        }
        self.widget.drag_move(translation);
        self.widget
            .drag_end(velocity)
            .ok_or(TestError::NoActiveCard)
    }

    /// [`swipe`](Self::swipe), then let every animation it started finish.
    pub fn swipe_and_settle(
        &mut self,
        translation: Point,
        velocity: Point,
    ) -> Result<SwipeDecision, TestError> {
        let decision = self.swipe(translation, velocity)?;
        self.pump_until_idle()?;
        Ok(decision)
    }

    /// Deliver a pointer drag from `from` to `to` as `steps` evenly spaced
    /// moves, `step_ms` apart. Returns whether the widget took the drag.
    pub fn pointer_drag(&mut self, from: Point, to: Point, steps: usize, step_ms: i64) -> bool {
        let steps = steps.max(1);
        let handled = self.send_pointer(PointerEventKind::Down, from);
        for step in 1..=steps {
            self.uptime_ms += step_ms;
            let fraction = step as f32 / steps as f32;
            let position = from + (to - from) * fraction;
            self.send_pointer(PointerEventKind::Move, position);
        }
        self.send_pointer(PointerEventKind::Up, to);
        handled
    }

    /// Deliver one pointer event at the harness's current uptime.
    pub fn send_pointer(&mut self, kind: PointerEventKind, position: Point) -> bool {
        let event = PointerEvent::at(kind, position, self.uptime_ms);
        self.widget.on_pointer_event(&event)
    }
}

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;
