//! Offset bookkeeping for consecutive drags.
//!
//! When a drag starts, wherever the card currently sits becomes the drag's
//! origin and the active translation restarts at zero. Moves replace the
//! active translation. On release the origin is folded back in, so the
//! reported displacement is the card's true position, which is what the
//! decision reads.

use swipecards_ui_graphics::Point;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging {
        origin: Point,
        active: Point,
    },
    Released {
        displacement: Point,
    },
}

#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    phase: DragPhase,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Capture `current` as the origin and zero the active translation.
    pub fn begin(&mut self, current: Point) {
        self.phase = DragPhase::Dragging {
            origin: current,
            active: Point::ZERO,
        };
    }

    /// Record the cumulative translation since [`begin`](Self::begin) and
    /// return where the card should be drawn. `None` when not dragging.
    pub fn update(&mut self, translation: Point) -> Option<Point> {
        match &mut self.phase {
            DragPhase::Dragging { origin, active } => {
                *active = translation;
                Some(*origin + *active)
            }
            _ => None,
        }
    }

    /// Fold the origin into the active translation and end the drag.
    pub fn release(&mut self) -> Option<Point> {
        match self.phase {
            DragPhase::Dragging { origin, active } => {
                let displacement = origin + active;
                self.phase = DragPhase::Released { displacement };
                Some(displacement)
            }
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.phase = DragPhase::Idle;
    }
}
