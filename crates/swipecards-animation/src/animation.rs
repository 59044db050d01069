//! Frame-clock driven animatable values.
//!
//! An [`Animatable`] owns one value of any [`AnimationVector`] type and moves
//! it toward a target with spring physics, or flings it with a decay. Every
//! animation reports how it ended through an optional completion callback,
//! which runs after the final frame has been applied and after all internal
//! borrows are released, so the callback may start the next animation.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;
use swipecards_core::{FrameCallbackRegistration, RuntimeHandle};
use swipecards_ui_graphics::Point;

use crate::decay_spec::{ExponentialDecaySpec, FloatDecayAnimationSpec};

/// Per-component storage; two inline slots cover scalars and points.
pub type Components = SmallVec<[f32; 2]>;

/// Types that can be animated component by component.
pub trait AnimationVector: Copy + PartialEq + fmt::Debug + 'static {
    fn components(&self) -> Components;

    /// Rebuild a value from the components returned by [`components`](Self::components).
    fn from_components(components: &[f32]) -> Self;
}

impl AnimationVector for f32 {
    fn components(&self) -> Components {
        smallvec::smallvec![*self]
    }

    fn from_components(components: &[f32]) -> Self {
        components.first().copied().unwrap_or_default()
    }
}

impl AnimationVector for Point {
    fn components(&self) -> Components {
        smallvec::smallvec![self.x, self.y]
    }

    fn from_components(components: &[f32]) -> Self {
        let x = components.first().copied().unwrap_or_default();
        let y = components.get(1).copied().unwrap_or_default();
        Point::new(x, y)
    }
}

/// Spring animation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Damping ratio. 1.0 = critically damped, < 1.0 = under-damped (bouncy), > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Stiffness constant. Higher values = faster animation.
    pub stiffness: f32,
    /// Velocity threshold (units/s) to stop animation.
    pub velocity_threshold: f32,
    /// Position threshold to stop animation.
    pub position_threshold: f32,
}

impl SpringSpec {
    /// Tension paired with a bare friction value when none is given.
    pub const DEFAULT_TENSION: f32 = 40.0;

    /// Spring described by friction and tension, with unit mass.
    ///
    /// stiffness = (tension - 30) * 3.62 + 194, damping = (friction - 8) * 3 + 25.
    pub fn from_friction_tension(friction: f32, tension: f32) -> Self {
        let stiffness = ((tension - 30.0) * 3.62 + 194.0).max(f32::EPSILON);
        let damping = ((friction - 8.0) * 3.0 + 25.0).max(0.0);
        Self {
            damping_ratio: damping / (2.0 * stiffness.sqrt()),
            stiffness,
            velocity_threshold: 0.01,
            position_threshold: 0.01,
        }
    }

    /// [`from_friction_tension`](Self::from_friction_tension) with the default tension.
    pub fn from_friction(friction: f32) -> Self {
        Self::from_friction_tension(friction, Self::DEFAULT_TENSION)
    }

    fn damping(&self) -> f32 {
        2.0 * self.damping_ratio * self.stiffness.sqrt()
    }
}

/// How an animation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEnd {
    /// Reached its target (spring) or came to rest (decay).
    Finished,
    /// Replaced by another animation, a snap or an explicit stop.
    Interrupted,
}

type OnEnd = Box<dyn FnOnce(AnimationEnd) + 'static>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion<T> {
    Idle,
    Spring(SpringSpec),
    Decay {
        spec: ExponentialDecaySpec,
        initial_value: T,
        initial_velocity: T,
    },
}

/// Generic animatable value holder.
pub struct Animatable<T: AnimationVector> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: AnimationVector> {
    runtime: RuntimeHandle,
    label: &'static str,
    current: T,
    /// Units per second, one entry per component.
    velocity: Components,
    target: T,
    motion: Motion<T>,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_end: Option<OnEnd>,
}

impl<T: AnimationVector> AnimatableInner<T> {
    /// Detach the running animation, returning its completion callback.
    fn halt(&mut self) -> Option<OnEnd> {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        self.motion = Motion::Idle;
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
        self.on_end.take()
    }

    fn zero_velocity(&mut self) {
        self.velocity = self.current.components().iter().map(|_| 0.0).collect();
    }
}

impl<T: AnimationVector> Animatable<T> {
    /// Create a new animatable with the given initial value.
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        Self::with_label(initial, runtime, "animatable")
    }

    /// Like [`new`](Self::new) with a label used in log output.
    pub fn with_label(initial: T, runtime: RuntimeHandle, label: &'static str) -> Self {
        let inner = AnimatableInner {
            runtime,
            label,
            current: initial,
            velocity: initial.components().iter().map(|_| 0.0).collect(),
            target: initial,
            motion: Motion::Idle,
            start_time_nanos: None,
            last_frame_nanos: None,
            registration: None,
            on_end: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    pub fn value(&self) -> T {
        self.inner.borrow().current
    }

    /// Current velocity in units per second.
    pub fn velocity(&self) -> T {
        T::from_components(&self.inner.borrow().velocity)
    }

    /// Return the current animation target. For a decay this is the
    /// projected resting value.
    pub fn target(&self) -> T {
        self.inner.borrow().target
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.inner.borrow().motion, Motion::Idle)
    }

    /// Snap immediately to the target value without animating.
    pub fn snap_to(&self, value: T) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.halt();
            inner.current = value;
            inner.target = value;
            inner.zero_velocity();
            interrupted
        };
        Self::notify(interrupted, AnimationEnd::Interrupted);
    }

    /// Stop any running animation, keeping the current value.
    pub fn stop(&self) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.halt();
            inner.target = inner.current;
            inner.zero_velocity();
            interrupted
        };
        Self::notify(interrupted, AnimationEnd::Interrupted);
    }

    /// Spring toward `target`, keeping the current velocity.
    pub fn animate_to(&self, target: T, spec: SpringSpec) {
        self.start(Motion::Spring(spec), target, None);
    }

    /// Spring toward `target` and report the outcome through `on_end`.
    pub fn animate_spring(
        &self,
        target: T,
        spec: SpringSpec,
        on_end: impl FnOnce(AnimationEnd) + 'static,
    ) {
        self.start(Motion::Spring(spec), target, Some(Box::new(on_end)));
    }

    /// Fling with `initial_velocity` (units per millisecond) until the decay
    /// comes to rest, then report through `on_end`.
    pub fn animate_decay(
        &self,
        initial_velocity: T,
        spec: ExponentialDecaySpec,
        on_end: impl FnOnce(AnimationEnd) + 'static,
    ) {
        let initial_value = self.value();
        let target = T::from_components(
            &initial_value
                .components()
                .iter()
                .zip(initial_velocity.components().iter())
                .map(|(value, velocity)| spec.get_target_value(*value, *velocity))
                .collect::<Components>(),
        );
        self.start(
            Motion::Decay {
                spec,
                initial_value,
                initial_velocity,
            },
            target,
            Some(Box::new(on_end)),
        );
    }

    fn start(&self, motion: Motion<T>, target: T, on_end: Option<OnEnd>) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.halt();
            if let Motion::Decay {
                initial_velocity, ..
            } = motion
            {
                inner.velocity = initial_velocity.components().iter().map(|v| v * 1000.0).collect();
            }
            inner.target = target;
            inner.motion = motion;
            inner.on_end = on_end;
            log::trace!(
                "{}: start {:?} from {:?} toward {:?}",
                inner.label,
                inner.motion,
                inner.current,
                inner.target
            );
            interrupted
        };
        Self::notify(interrupted, AnimationEnd::Interrupted);
        Self::schedule_frame(&self.inner);
    }

    fn notify(on_end: Option<OnEnd>, end: AnimationEnd) {
        if let Some(on_end) = on_end {
            on_end(end);
        }
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let runtime = {
            let inner = this.borrow();
            if inner.registration.is_some() || matches!(inner.motion, Motion::Idle) {
                return;
            }
            inner.runtime.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = runtime.frame_clock().with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        if !registration.is_active() {
            log::debug!("runtime gone; animation cannot run");
        }
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let finished = {
            let mut inner = this.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.disarm();
            }

            let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
            let last_frame = inner.last_frame_nanos.replace(frame_time_nanos);

            let motion = inner.motion;
            let settled = match motion {
                Motion::Idle => false,
                Motion::Spring(spec) => {
                    let dt = last_frame
                        .map(|last| frame_time_nanos.saturating_sub(last) as f32 / 1_000_000_000.0)
                        .unwrap_or(0.0);
                    Self::step_spring(&mut inner, spec, dt)
                }
                Motion::Decay {
                    spec,
                    initial_value,
                    initial_velocity,
                } => {
                    let play_time = frame_time_nanos.saturating_sub(start_time) as i64;
                    Self::step_decay(&mut inner, &spec, initial_value, initial_velocity, play_time)
                }
            };

            log::trace!("{}: frame value {:?}", inner.label, inner.current);

            if settled {
                log::trace!("{}: settled at {:?}", inner.label, inner.current);
                inner.motion = Motion::Idle;
                inner.start_time_nanos = None;
                inner.last_frame_nanos = None;
                inner.zero_velocity();
                Some(inner.on_end.take())
            } else {
                None
            }
        };

        match finished {
            Some(on_end) => Self::notify(on_end, AnimationEnd::Finished),
            None => Self::schedule_frame(this),
        }
    }

    /// Damped harmonic oscillator per component, integrated with semi-implicit
    /// Euler in fixed sub-steps. Returns true once every component rests.
    fn step_spring(inner: &mut AnimatableInner<T>, spec: SpringSpec, dt: f32) -> bool {
        let target = inner.target.components();
        let mut position = inner.current.components();
        if inner.velocity.len() != position.len() {
            inner.velocity = position.iter().map(|_| 0.0).collect();
        }

        let stiffness = spec.stiffness;
        let damping = spec.damping();
        let timestep: f32 = 0.016;

        let mut elapsed = 0.0f32;
        while elapsed < dt {
            let step = timestep.min(dt - elapsed);
            for (index, value) in position.iter_mut().enumerate() {
                let displacement = *value - target[index];
                let force = -stiffness * displacement - damping * inner.velocity[index];
                inner.velocity[index] += force * step;
                *value += inner.velocity[index] * step;
            }
            elapsed += step;
        }

        let at_rest = inner
            .velocity
            .iter()
            .all(|velocity| velocity.abs() < spec.velocity_threshold);
        let near_target = position
            .iter()
            .zip(target.iter())
            .all(|(value, target)| (value - target).abs() < spec.position_threshold);

        if at_rest && near_target {
            inner.current = inner.target;
            true
        } else {
            inner.current = T::from_components(&position);
            false
        }
    }

    fn step_decay(
        inner: &mut AnimatableInner<T>,
        spec: &ExponentialDecaySpec,
        initial_value: T,
        initial_velocity: T,
        play_time_nanos: i64,
    ) -> bool {
        let start = initial_value.components();
        let velocity = initial_velocity.components();
        let mut finished = true;
        let mut position = Components::new();
        inner.velocity.clear();
        for (value, velocity) in start.iter().zip(velocity.iter()) {
            let duration = spec.get_duration_nanos(*value, *velocity);
            if play_time_nanos >= duration {
                position.push(spec.get_value_from_nanos(duration, *value, *velocity));
                inner.velocity.push(0.0);
            } else {
                finished = false;
                position.push(spec.get_value_from_nanos(play_time_nanos, *value, *velocity));
                inner
                    .velocity
                    .push(spec.get_velocity_from_nanos(play_time_nanos, *value, *velocity) * 1000.0);
            }
        }
        inner.current = T::from_components(&position);
        if finished {
            inner.target = inner.current;
        }
        finished
    }
}

impl<T: AnimationVector> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: AnimationVector> fmt::Debug for Animatable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Animatable")
            .field("label", &inner.label)
            .field("value", &inner.current)
            .field("target", &inner.target)
            .field("running", &!matches!(inner.motion, Motion::Idle))
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
