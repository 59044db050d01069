use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use swipecards_ui::{CardRenderer, PositionSignal, SwipeCardsBuilder, SwipeDirection};

#[derive(Debug, Clone, PartialEq)]
pub enum SwipeEvent<C> {
    Swiped(SwipeDirection, C),
    Removed(usize),
}

/// Collects every callback the widget fires, in order.
pub struct SwipeRecorder<C> {
    events: Rc<RefCell<Vec<SwipeEvent<C>>>>,
}

impl<C> Clone for SwipeRecorder<C> {
    fn clone(&self) -> Self {
        Self {
            events: Rc::clone(&self.events),
        }
    }
}

impl<C> Default for SwipeRecorder<C> {
    fn default() -> Self {
        Self {
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<C: Clone + 'static> SwipeRecorder<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install handlers for all four directions and card removal.
    pub fn attach(&self, builder: SwipeCardsBuilder<C>) -> SwipeCardsBuilder<C> {
        let (right, left, up, down, removed) = (
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
        );
        builder
            .on_swipe_right(move |card| {
                right.push(SwipeEvent::Swiped(SwipeDirection::Right, card.clone()))
            })
            .on_swipe_left(move |card| {
                left.push(SwipeEvent::Swiped(SwipeDirection::Left, card.clone()))
            })
            .on_swipe_up(move |card| up.push(SwipeEvent::Swiped(SwipeDirection::Up, card.clone())))
            .on_swipe_down(move |card| {
                down.push(SwipeEvent::Swiped(SwipeDirection::Down, card.clone()))
            })
            .on_card_removed(move |index| removed.push(SwipeEvent::Removed(index)))
    }

    pub fn events(&self) -> Vec<SwipeEvent<C>> {
        self.events.borrow().clone()
    }

    pub fn take(&self) -> Vec<SwipeEvent<C>> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    fn push(&self, event: SwipeEvent<C>) {
        self.events.borrow_mut().push(event);
    }
}

/// Renders cards through `Display`. Overlays are left to the defaults
/// unless custom ones are enabled.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    pub no_more_cards: Option<String>,
    pub custom_overlays: bool,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_no_more_cards(mut self, text: impl Into<String>) -> Self {
        self.no_more_cards = Some(text.into());
        self
    }

    /// Render yup/nope as text carrying the live horizontal position.
    pub fn with_custom_overlays(mut self) -> Self {
        self.custom_overlays = true;
        self
    }
}

impl<C: Display> CardRenderer<C> for TextRenderer {
    type Output = String;

    fn render_card(&mut self, card: &C) -> String {
        card.to_string()
    }

    fn render_no_more_cards(&mut self) -> Option<String> {
        self.no_more_cards.clone()
    }

    fn render_yup(&mut self, position: &PositionSignal) -> Option<String> {
        self.custom_overlays
            .then(|| format!("yup@{:.0}", position.x()))
    }

    fn render_nope(&mut self, position: &PositionSignal) -> Option<String> {
        self.custom_overlays
            .then(|| format!("nope@{:.0}", position.x()))
    }
}
