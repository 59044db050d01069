//! Swipeable card stack widget.
//!
//! One card is visible at a time. The user drags it; on release the drag is
//! classified as a dismissal in one of four directions or a cancel. A
//! dismissed card flings off, the next card scales in, and the direction
//! callback fires with the card that was swiped.
//!
//! The widget is headless: [`SwipeCards::render`] describes what to draw
//! through a [`CardRenderer`], and the host feeds it pointer input and
//! frame ticks.

mod callbacks;
mod decision;
mod deck;
mod gesture;
mod options;
mod render;
mod sequencer;
pub mod widgets;

pub use callbacks::{CardCallback, IndexCallback, SwipeCallbacks};
pub use decision::{classify, normalize_exit_velocity, SwipeDecision, SwipeDirection};
pub use deck::{CardCursor, CardDeck, CardStack};
pub use gesture::{DragPhase, GestureTracker};
pub use options::SwipeCardsOptions;
pub use render::{
    CardContent, CardRenderer, CardTransform, Overlay, PositionSignal, SwipeCardsScene,
};
pub use sequencer::AnimationSequencer;
pub use widgets::{SwipeCards, SwipeCardsBuilder};

pub use swipecards_foundation::{PointerEvent, PointerEventKind};
pub use swipecards_ui_graphics::Point;

pub mod prelude {
    pub use crate::options::SwipeCardsOptions;
    pub use crate::render::{CardContent, CardRenderer, Overlay, PositionSignal, SwipeCardsScene};
    pub use crate::widgets::SwipeCards;
    pub use crate::{Point, SwipeDirection};
}
