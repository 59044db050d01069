//! Position and scale channels of the active card.

use swipecards_animation::{Animatable, AnimationEnd, ExponentialDecaySpec, SpringSpec};
use swipecards_core::RuntimeHandle;
use swipecards_foundation::gesture_constants::{
    EXIT_DECELERATION, EXIT_RESET_SCALE, RETURN_FRICTION,
};
use swipecards_ui_graphics::Point;

/// Drives the entrance spring, the exit decay and the return-to-center
/// spring. The two channels animate independently.
#[derive(Clone)]
pub struct AnimationSequencer {
    position: Animatable<Point>,
    enter: Animatable<f32>,
}

impl AnimationSequencer {
    /// Card at center at full scale.
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            position: Animatable::with_label(Point::ZERO, runtime.clone(), "card-position"),
            enter: Animatable::with_label(1.0, runtime, "card-enter"),
        }
    }

    pub fn position(&self) -> Point {
        self.position.value()
    }

    pub fn scale(&self) -> f32 {
        self.enter.value()
    }

    pub fn position_channel(&self) -> &Animatable<Point> {
        &self.position
    }

    /// Spring the scale toward 1.
    pub fn animate_entrance(&self, friction: f32) {
        log::debug!("entrance from scale {:.2}", self.enter.value());
        self.enter.animate_to(1.0, SpringSpec::from_friction(friction));
    }

    /// Spring the position back to center.
    pub fn return_to_center(&self) {
        log::debug!("return to center from {:?}", self.position.value());
        self.position
            .animate_to(Point::ZERO, SpringSpec::from_friction(RETURN_FRICTION));
    }

    /// Fling the card off with `velocity` (pixels per millisecond).
    pub fn animate_exit(&self, velocity: Point, on_end: impl FnOnce(AnimationEnd) + 'static) {
        log::debug!(
            "exit from {:?} with velocity {:?}",
            self.position.value(),
            velocity
        );
        self.position.animate_decay(
            velocity,
            ExponentialDecaySpec::new(EXIT_DECELERATION),
            on_end,
        );
    }

    /// Shrink the scale to the entrance start and bring the position home.
    pub fn reset_after_exit(&self) {
        self.enter.snap_to(EXIT_RESET_SCALE);
        self.position.snap_to(Point::ZERO);
    }

    /// Halt any position motion and return where the card stopped.
    pub fn begin_drag(&self) -> Point {
        self.position.stop();
        self.position.value()
    }

    pub fn follow_drag(&self, position: Point) {
        self.position.snap_to(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use swipecards_core::{Runtime, FRAME_NANOS_60HZ};

    fn pump(runtime: &Runtime, frames: u64) {
        let handle = runtime.handle();
        for frame in 1..=frames {
            handle.drain_frame_callbacks(frame * FRAME_NANOS_60HZ);
        }
    }

    #[test]
    fn entrance_springs_scale_to_one() {
        let runtime = Runtime::default();
        let sequencer = AnimationSequencer::new(runtime.handle());
        assert_eq!(sequencer.scale(), 1.0);
        sequencer.reset_after_exit();
        assert_eq!(sequencer.scale(), 0.7);
        sequencer.animate_entrance(10.0);
        pump(&runtime, 240);
        assert!((sequencer.scale() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn return_to_center_settles_at_origin() {
        let runtime = Runtime::default();
        let sequencer = AnimationSequencer::new(runtime.handle());
        sequencer.follow_drag(Point::new(60.0, -20.0));
        sequencer.return_to_center();
        pump(&runtime, 600);
        assert_eq!(sequencer.position(), Point::ZERO);
        assert!(!sequencer.position_channel().is_running());
    }

    #[test]
    fn exit_moves_along_velocity_and_reports_finish() {
        let runtime = Runtime::default();
        let sequencer = AnimationSequencer::new(runtime.handle());
        sequencer.follow_drag(Point::new(150.0, 0.0));
        let finished = Rc::new(Cell::new(None));
        let sink = finished.clone();
        sequencer.animate_exit(Point::new(6.0, 0.0), move |end| sink.set(Some(end)));
        assert!(sequencer.position_channel().is_running());
        pump(&runtime, 30);
        assert_eq!(finished.get(), Some(AnimationEnd::Finished));
        assert!(sequencer.position().x > 150.0);
    }

    #[test]
    fn begin_drag_interrupts_motion_in_place() {
        let runtime = Runtime::default();
        let sequencer = AnimationSequencer::new(runtime.handle());
        sequencer.follow_drag(Point::new(80.0, 0.0));
        sequencer.return_to_center();
        pump(&runtime, 3);
        let caught = sequencer.begin_drag();
        assert!(caught.x < 80.0 && caught.x > 0.0);
        assert!(!sequencer.position_channel().is_running());
        assert_eq!(sequencer.position(), caught);
    }

    #[test]
    fn reset_after_exit_restores_start_values() {
        let runtime = Runtime::default();
        let sequencer = AnimationSequencer::new(runtime.handle());
        sequencer.follow_drag(Point::new(400.0, 12.0));
        sequencer.reset_after_exit();
        assert_eq!(sequencer.position(), Point::ZERO);
        assert_eq!(sequencer.scale(), 0.7);
    }
}
