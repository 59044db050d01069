//! Drag gesture recogniser.
//!
//! Turns a stream of pointer events into grant / move / release signals with
//! the translation measured from the pointer-down position, plus the release
//! velocity. Only the pointer that started the drag is followed.

use super::types::{PointerEvent, PointerEventKind, PointerId};
use crate::VelocityTracker;
use swipecards_ui_graphics::Point;

/// What a pointer event meant for the drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragSignal {
    /// A pointer went down and now owns the drag.
    Started,
    /// Cumulative translation since [`DragSignal::Started`].
    Moved { translation: Point },
    /// The owning pointer lifted (or was cancelled). Velocity is in
    /// logical pixels per millisecond.
    Released { translation: Point, velocity: Point },
}

#[derive(Debug, Clone, Default)]
pub struct DragGesture {
    pointer: Option<PointerId>,
    origin: Point,
    translation: Point,
    tracker: VelocityTracker,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.pointer.is_some()
    }

    /// Translation of the current drag, zero when idle.
    pub fn translation(&self) -> Point {
        self.translation
    }

    /// Feed one event. Events that belong to the drag are consumed.
    pub fn on_event(&mut self, event: &PointerEvent) -> Option<DragSignal> {
        if event.is_consumed() {
            return None;
        }
        match event.kind {
            PointerEventKind::Down => {
                if self.pointer.is_some() {
                    return None;
                }
                self.pointer = Some(event.id);
                self.origin = event.global_position;
                self.translation = Point::ZERO;
                self.tracker.reset();
                self.tracker.add_position(event.uptime_ms, event.global_position);
                event.consume();
                log::debug!("drag started by pointer {}", event.id);
                Some(DragSignal::Started)
            }
            PointerEventKind::Move => {
                if self.pointer != Some(event.id) {
                    return None;
                }
                self.translation = event.global_position - self.origin;
                self.tracker.add_position(event.uptime_ms, event.global_position);
                event.consume();
                Some(DragSignal::Moved {
                    translation: self.translation,
                })
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                if self.pointer != Some(event.id) {
                    return None;
                }
                let velocity = if event.kind == PointerEventKind::Up {
                    self.translation = event.global_position - self.origin;
                    self.tracker.add_position(event.uptime_ms, event.global_position);
                    self.tracker.velocity_per_ms()
                } else {
                    Point::ZERO
                };
                let translation = self.translation;
                self.reset();
                event.consume();
                log::debug!(
                    "drag released: translation {:?} velocity {:?}",
                    translation,
                    velocity
                );
                Some(DragSignal::Released {
                    translation,
                    velocity,
                })
            }
        }
    }

    pub fn reset(&mut self) {
        self.pointer = None;
        self.origin = Point::ZERO;
        self.translation = Point::ZERO;
        self.tracker.reset();
    }
}
