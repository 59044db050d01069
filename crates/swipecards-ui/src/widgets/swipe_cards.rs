//! The swipe card stack.

use std::cell::RefCell;
use std::rc::Rc;

use swipecards_animation::AnimationEnd;
use swipecards_core::RuntimeHandle;
use swipecards_foundation::{DragGesture, DragSignal, PointerEvent};
use swipecards_ui_graphics::Point;

use crate::callbacks::SwipeCallbacks;
use crate::decision::{classify, SwipeDecision, SwipeDirection};
use crate::deck::CardStack;
use crate::gesture::{DragPhase, GestureTracker};
use crate::options::SwipeCardsOptions;
use crate::render::{
    default_nope_opacity, default_yup_opacity, CardContent, CardRenderer, CardTransform, Overlay,
    PositionSignal, SwipeCardsScene,
};
use crate::sequencer::AnimationSequencer;

struct SwipeState<C> {
    stack: CardStack<C>,
    options: SwipeCardsOptions,
    gesture: GestureTracker,
    /// Deck generation of the card currently flying off.
    exiting: Option<u64>,
}

struct SwipeInner<C> {
    state: RefCell<SwipeState<C>>,
    callbacks: RefCell<SwipeCallbacks<C>>,
    sequencer: AnimationSequencer,
    drag: RefCell<DragGesture>,
}

/// Swipeable card stack.
///
/// Cheap to clone; clones share the same stack. All methods must be called
/// from the thread that owns the runtime. Host callbacks and the renderer are
/// never invoked while widget state is borrowed, so they may call back into
/// the widget (for example to [`set_cards`](Self::set_cards)).
pub struct SwipeCards<C: 'static> {
    inner: Rc<SwipeInner<C>>,
}

impl<C: 'static> Clone for SwipeCards<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

pub struct SwipeCardsBuilder<C: 'static> {
    runtime: RuntimeHandle,
    cards: Rc<[C]>,
    options: SwipeCardsOptions,
    callbacks: SwipeCallbacks<C>,
}

impl<C: 'static> SwipeCardsBuilder<C> {
    pub fn cards(mut self, cards: impl Into<Rc<[C]>>) -> Self {
        self.cards = cards.into();
        self
    }

    pub fn options(mut self, options: SwipeCardsOptions) -> Self {
        self.options = options;
        self
    }

    pub fn on_swipe_right(mut self, handler: impl FnMut(&C) + 'static) -> Self {
        self.callbacks.on_swipe_right = Some(Box::new(handler));
        self
    }

    pub fn on_swipe_left(mut self, handler: impl FnMut(&C) + 'static) -> Self {
        self.callbacks.on_swipe_left = Some(Box::new(handler));
        self
    }

    pub fn on_swipe_up(mut self, handler: impl FnMut(&C) + 'static) -> Self {
        self.callbacks.on_swipe_up = Some(Box::new(handler));
        self
    }

    pub fn on_swipe_down(mut self, handler: impl FnMut(&C) + 'static) -> Self {
        self.callbacks.on_swipe_down = Some(Box::new(handler));
        self
    }

    /// Receives the index of each swiped card, before the stack advances.
    pub fn on_card_removed(mut self, handler: impl FnMut(usize) + 'static) -> Self {
        self.callbacks.on_card_removed = Some(Box::new(handler));
        self
    }

    /// Mount the widget and start the first card's entrance.
    pub fn build(self) -> SwipeCards<C> {
        let friction = self.options.entrance_friction();
        let inner = SwipeInner {
            state: RefCell::new(SwipeState {
                stack: CardStack::new(self.cards),
                options: self.options,
                gesture: GestureTracker::new(),
                exiting: None,
            }),
            callbacks: RefCell::new(self.callbacks),
            sequencer: AnimationSequencer::new(self.runtime),
            drag: RefCell::new(DragGesture::new()),
        };
        let widget = SwipeCards {
            inner: Rc::new(inner),
        };
        log::debug!(
            "mounted with {} card(s)",
            widget.inner.state.borrow().stack.deck().len()
        );
        widget.inner.sequencer.animate_entrance(friction);
        widget
    }
}

impl<C: 'static> SwipeCards<C> {
    pub fn builder(runtime: RuntimeHandle) -> SwipeCardsBuilder<C> {
        SwipeCardsBuilder {
            runtime,
            cards: Rc::from(Vec::new()),
            options: SwipeCardsOptions::default(),
            callbacks: SwipeCallbacks::default(),
        }
    }

    /// Grab the card where it currently sits.
    ///
    /// Refused (returns `false`) when there is no card or the current one
    /// is flying off. A return-to-center spring is interrupted and its
    /// position becomes the drag's origin. The entrance keeps running.
    pub fn drag_start(&self) -> bool {
        {
            let state = self.inner.state.borrow();
            if state.exiting.is_some() {
                log::debug!("drag refused: card is exiting");
                return false;
            }
            if state.stack.cursor().is_none() {
                log::debug!("drag refused: no current card");
                return false;
            }
        }
        let origin = self.inner.sequencer.begin_drag();
        self.inner.state.borrow_mut().gesture.begin(origin);
        log::debug!("drag started at {:?}", origin);
        true
    }

    /// Cumulative translation since [`drag_start`](Self::drag_start).
    pub fn drag_move(&self, translation: Point) {
        let position = self.inner.state.borrow_mut().gesture.update(translation);
        if let Some(position) = position {
            self.inner.sequencer.follow_drag(position);
        }
    }

    /// Release with `velocity` in logical pixels per millisecond.
    pub fn drag_end(&self, velocity: Point) -> Option<SwipeDecision> {
        let displacement = self.inner.state.borrow_mut().gesture.release()?;
        let decision = classify(displacement, velocity);
        log::debug!(
            "released at {:?} with velocity {:?}: {:?}",
            displacement,
            velocity,
            decision
        );
        match decision {
            SwipeDecision::Cancel => self.inner.sequencer.return_to_center(),
            SwipeDecision::Commit {
                direction,
                exit_velocity,
            } => SwipeInner::commit(&self.inner, direction, exit_velocity),
        }
        Some(decision)
    }

    /// Route a raw pointer event through the drag recogniser. Returns
    /// whether the event belonged to the card's drag. A press is refused
    /// the same way [`drag_start`](Self::drag_start) refuses it.
    pub fn on_pointer_event(&self, event: &PointerEvent) -> bool {
        let signal = self.inner.drag.borrow_mut().on_event(event);
        match signal {
            Some(DragSignal::Started) => {
                let accepted = self.drag_start();
                if !accepted {
                    // Later moves and the release of this pointer are ignored.
                    self.inner.drag.borrow_mut().reset();
                }
                accepted
            }
            Some(DragSignal::Moved { translation }) => {
                self.drag_move(translation);
                true
            }
            Some(DragSignal::Released { translation, velocity }) => {
                self.drag_move(translation);
                self.drag_end(velocity);
                true
            }
            None => false,
        }
    }

    /// Replace the card collection and restart at its first card.
    ///
    /// Runs on every call, even with an unchanged collection. Any gesture
    /// in progress is dropped and the card springs back to center; an
    /// in-flight exit is interrupted without advancing.
    pub fn set_cards(&self, cards: impl Into<Rc<[C]>>) {
        {
            let mut state = self.inner.state.borrow_mut();
            state.stack.reset(cards);
            state.gesture.reset();
            state.exiting = None;
        }
        self.inner.drag.borrow_mut().reset();
        let sequencer = &self.inner.sequencer;
        if sequencer.position_channel().is_running() || !sequencer.position().is_zero() {
            sequencer.return_to_center();
        }
    }

    pub fn set_options(&self, options: SwipeCardsOptions) {
        self.inner.state.borrow_mut().options = options;
    }

    pub fn options(&self) -> SwipeCardsOptions {
        self.inner.state.borrow().options
    }

    /// Describe the current frame through `renderer`.
    pub fn render<R: CardRenderer<C>>(&self, renderer: &mut R) -> SwipeCardsScene<R::Output> {
        let (deck, cursor, options) = {
            let state = self.inner.state.borrow();
            (
                state.stack.deck().clone(),
                state.stack.cursor(),
                state.options,
            )
        };
        let position = self.inner.sequencer.position();
        let content = match cursor.and_then(|cursor| deck.resolve(cursor)) {
            Some(card) => CardContent::Card {
                view: renderer.render_card(card),
                transform: CardTransform::from_channels(
                    position,
                    self.inner.sequencer.scale(),
                    options.rotation,
                ),
            },
            None => CardContent::NoMoreCards(renderer.render_no_more_cards()),
        };

        let signal = self.position_signal();
        let nope = match renderer.render_nope(&signal) {
            Some(view) => Overlay::Custom(view),
            None if options.show_nope => Overlay::Default {
                opacity: default_nope_opacity(position.x),
            },
            None => Overlay::Hidden,
        };
        let yup = match renderer.render_yup(&signal) {
            Some(view) => Overlay::Custom(view),
            None if options.show_yup => Overlay::Default {
                opacity: default_yup_opacity(position.x),
            },
            None => Overlay::Hidden,
        };

        SwipeCardsScene { content, nope, yup }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.inner.state.borrow().stack.current_index()
    }

    pub fn current_card(&self) -> Option<C>
    where
        C: Clone,
    {
        self.inner.state.borrow().stack.current().cloned()
    }

    /// Run `f` on the current card without cloning it. The widget is not
    /// borrowed while `f` runs.
    pub fn with_current_card<R>(&self, f: impl FnOnce(Option<&C>) -> R) -> R {
        let (deck, cursor) = {
            let state = self.inner.state.borrow();
            (state.stack.deck().clone(), state.stack.cursor())
        };
        f(cursor.and_then(|cursor| deck.resolve(cursor)))
    }

    pub fn position(&self) -> Point {
        self.inner.sequencer.position()
    }

    pub fn scale(&self) -> f32 {
        self.inner.sequencer.scale()
    }

    pub fn position_signal(&self) -> PositionSignal {
        PositionSignal::new(self.inner.sequencer.position_channel().clone())
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.inner.state.borrow().gesture.phase()
    }

    pub fn is_exiting(&self) -> bool {
        self.inner.state.borrow().exiting.is_some()
    }
}

impl<C: 'static> SwipeInner<C> {
    fn commit(this: &Rc<Self>, direction: SwipeDirection, exit_velocity: Point) {
        let (deck, cursor) = {
            let state = this.state.borrow();
            (state.stack.deck().clone(), state.stack.cursor())
        };
        let Some(cursor) = cursor else {
            this.sequencer.return_to_center();
            return;
        };

        if let Some(card) = deck.resolve(cursor) {
            log::debug!("card {} swiped {:?}", cursor.index, direction);
            this.notify_swiped(direction, card);
            this.notify_card_removed(cursor.index);
        }

        this.state.borrow_mut().exiting = Some(cursor.generation);
        let weak = Rc::downgrade(this);
        this.sequencer.animate_exit(exit_velocity, move |end| {
            if let Some(inner) = weak.upgrade() {
                inner.finish_exit(cursor.generation, end);
            }
        });
    }

    fn notify_swiped(&self, direction: SwipeDirection, card: &C) {
        let handler = self.callbacks.borrow_mut().take_swiped(direction);
        if let Some(mut handler) = handler {
            handler(card);
            self.callbacks.borrow_mut().restore_swiped(direction, handler);
        }
    }

    fn notify_card_removed(&self, index: usize) {
        let handler = self.callbacks.borrow_mut().take_card_removed();
        if let Some(mut handler) = handler {
            handler(index);
            self.callbacks.borrow_mut().restore_card_removed(handler);
        }
    }

    fn finish_exit(&self, generation: u64, end: AnimationEnd) {
        if end == AnimationEnd::Interrupted {
            log::debug!("exit interrupted");
            let mut state = self.state.borrow_mut();
            if state.exiting == Some(generation) {
                state.exiting = None;
            }
            return;
        }

        self.sequencer.reset_after_exit();
        let friction = {
            let mut state = self.state.borrow_mut();
            state.exiting = None;
            state.gesture.reset();
            if state.stack.deck().generation() == generation {
                let looping = state.options.looping;
                state.stack.advance(looping);
            } else {
                log::debug!("deck replaced during exit; not advancing");
            }
            state.options.entrance_friction()
        };
        self.sequencer.animate_entrance(friction);
    }
}

#[cfg(test)]
#[path = "../tests/swipe_cards_tests.rs"]
mod tests;
