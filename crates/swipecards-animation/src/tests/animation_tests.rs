use super::*;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use swipecards_core::{Runtime, FRAME_NANOS_60HZ};
use swipecards_ui_graphics::Point;

/// Pumps 60 Hz frames until nothing is scheduled, returning the frame count.
fn pump_until_idle(runtime: &Runtime, max_frames: usize) -> usize {
    let handle = runtime.handle();
    let mut frame_time = handle.last_frame_nanos().unwrap_or(0);
    let mut frames = 0;
    while runtime.needs_frame() && frames < max_frames {
        frame_time += FRAME_NANOS_60HZ;
        handle.drain_frame_callbacks(frame_time);
        frames += 1;
    }
    frames
}

#[test]
fn spring_settles_exactly_on_target() {
    let runtime = Runtime::default();
    let scale = Animatable::new(0.7f32, runtime.handle());
    let ended = Rc::new(RefCell::new(None));
    {
        let ended = Rc::clone(&ended);
        scale.animate_spring(1.0, SpringSpec::from_friction(10.0), move |end| {
            *ended.borrow_mut() = Some(end);
        });
    }
    assert!(scale.is_running());

    let frames = pump_until_idle(&runtime, 600);
    assert!(frames < 600, "spring never settled");
    assert_eq!(scale.value(), 1.0);
    assert!(!scale.is_running());
    assert_eq!(*ended.borrow(), Some(AnimationEnd::Finished));
}

#[test]
fn spring_reports_intermediate_values() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let position = Animatable::new(Point::new(150.0, -20.0), runtime.handle());
    position.animate_to(Point::ZERO, SpringSpec::from_friction(4.0));

    handle.drain_frame_callbacks(FRAME_NANOS_60HZ);
    // First frame only records the start time.
    assert_eq!(position.value(), Point::new(150.0, -20.0));

    handle.drain_frame_callbacks(2 * FRAME_NANOS_60HZ);
    let mid = position.value();
    assert!(mid.x < 150.0 && mid.x > -150.0, "x was {}", mid.x);
    assert!(mid.y > -20.0, "y was {}", mid.y);

    pump_until_idle(&runtime, 1000);
    assert_eq!(position.value(), Point::ZERO);
}

#[test]
fn low_friction_spring_overshoots() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let position = Animatable::new(100.0f32, runtime.handle());
    position.animate_to(0.0, SpringSpec::from_friction(4.0));

    let mut min_seen = f32::MAX;
    let mut frame_time = 0;
    for _ in 0..120 {
        frame_time += FRAME_NANOS_60HZ;
        handle.drain_frame_callbacks(frame_time);
        min_seen = min_seen.min(position.value());
    }
    assert!(min_seen < 0.0, "under-damped spring should cross the target");
}

#[test]
fn decay_comes_to_rest_past_start_and_reports_finished() {
    let runtime = Runtime::default();
    let position = Animatable::new(Point::new(120.0, 0.0), runtime.handle());
    let finished = Rc::new(Cell::new(false));
    {
        let finished = Rc::clone(&finished);
        position.animate_decay(
            Point::new(5.0, 0.0),
            ExponentialDecaySpec::new(0.6),
            move |end| finished.set(end == AnimationEnd::Finished),
        );
    }

    let frames = pump_until_idle(&runtime, 100);
    assert!(frames < 100);
    assert!(finished.get());
    let rest = position.value();
    assert!(rest.x > 120.0 && rest.x <= 132.5 + 0.01, "rest x {}", rest.x);
    assert_eq!(rest.y, 0.0);
    assert_eq!(position.target(), rest);
}

#[test]
fn completion_is_not_reported_before_the_decay_ends() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let position = Animatable::new(0.0f32, runtime.handle());
    let finished = Rc::new(Cell::new(false));
    {
        let finished = Rc::clone(&finished);
        position.animate_decay(
            8.0,
            ExponentialDecaySpec::new(0.998),
            move |_| finished.set(true),
        );
    }
    handle.drain_frame_callbacks(FRAME_NANOS_60HZ);
    handle.drain_frame_callbacks(2 * FRAME_NANOS_60HZ);
    assert!(!finished.get());
    assert!(position.is_running());
}

#[test]
fn snap_interrupts_running_animation() {
    let runtime = Runtime::default();
    let position = Animatable::new(Point::new(50.0, 50.0), runtime.handle());
    let ended = Rc::new(RefCell::new(Vec::new()));
    {
        let ended = Rc::clone(&ended);
        position.animate_spring(Point::ZERO, SpringSpec::from_friction(10.0), move |end| {
            ended.borrow_mut().push(end);
        });
    }
    position.snap_to(Point::new(10.0, 10.0));

    assert_eq!(*ended.borrow(), vec![AnimationEnd::Interrupted]);
    assert_eq!(position.value(), Point::new(10.0, 10.0));
    assert!(!position.is_running());
    assert_eq!(pump_until_idle(&runtime, 10), 0);
}

#[test]
fn completion_callback_may_start_next_animation() {
    let runtime = Runtime::default();
    let scale = Animatable::new(1.0f32, runtime.handle());
    {
        let chained = scale.clone();
        scale.animate_decay(
            0.5,
            ExponentialDecaySpec::new(0.6),
            move |end| {
                if end == AnimationEnd::Finished {
                    chained.snap_to(0.7);
                    chained.animate_to(1.0, SpringSpec::from_friction(10.0));
                }
            },
        );
    }
    pump_until_idle(&runtime, 1000);
    assert_eq!(scale.value(), 1.0);
}

#[test]
fn friction_tension_conversion_matches_reference_values() {
    let entrance = SpringSpec::from_friction(10.0);
    assert!((entrance.stiffness - 230.2).abs() < 1e-3);
    assert!((entrance.damping() - 31.0).abs() < 1e-3);

    let recenter = SpringSpec::from_friction(4.0);
    assert!(recenter.damping_ratio < 1.0, "friction 4 should bounce");
    assert!(entrance.damping_ratio > recenter.damping_ratio);
}

#[test]
fn point_components_round_trip() {
    let point = Point::new(3.5, -2.0);
    assert_eq!(Point::from_components(&point.components()), point);
    assert_eq!(f32::from_components(&[]), 0.0);
}
