//! Host callbacks fired on commit.

use crate::decision::SwipeDirection;

pub type CardCallback<C> = Box<dyn FnMut(&C)>;
pub type IndexCallback = Box<dyn FnMut(usize)>;

/// Optional host handlers. A missing handler is a no-op.
pub struct SwipeCallbacks<C> {
    pub on_swipe_right: Option<CardCallback<C>>,
    pub on_swipe_left: Option<CardCallback<C>>,
    pub on_swipe_up: Option<CardCallback<C>>,
    pub on_swipe_down: Option<CardCallback<C>>,
    pub on_card_removed: Option<IndexCallback>,
}

impl<C> Default for SwipeCallbacks<C> {
    fn default() -> Self {
        Self {
            on_swipe_right: None,
            on_swipe_left: None,
            on_swipe_up: None,
            on_swipe_down: None,
            on_card_removed: None,
        }
    }
}

impl<C> SwipeCallbacks<C> {
    pub fn slot_mut(&mut self, direction: SwipeDirection) -> &mut Option<CardCallback<C>> {
        match direction {
            SwipeDirection::Right => &mut self.on_swipe_right,
            SwipeDirection::Left => &mut self.on_swipe_left,
            SwipeDirection::Up => &mut self.on_swipe_up,
            SwipeDirection::Down => &mut self.on_swipe_down,
        }
    }

    /// Take the direction handler out so it can run without the owner
    /// borrowed. Pair with [`restore_swiped`](Self::restore_swiped).
    pub fn take_swiped(&mut self, direction: SwipeDirection) -> Option<CardCallback<C>> {
        self.slot_mut(direction).take()
    }

    /// Put a handler back unless the host installed a new one meanwhile.
    pub fn restore_swiped(&mut self, direction: SwipeDirection, callback: CardCallback<C>) {
        let slot = self.slot_mut(direction);
        if slot.is_none() {
            *slot = Some(callback);
        }
    }

    pub fn take_card_removed(&mut self) -> Option<IndexCallback> {
        self.on_card_removed.take()
    }

    pub fn restore_card_removed(&mut self, callback: IndexCallback) {
        if self.on_card_removed.is_none() {
            self.on_card_removed = Some(callback);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn slots_map_to_directions() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut callbacks = SwipeCallbacks::<u32>::default();
        let sink = log.clone();
        callbacks.on_swipe_up = Some(Box::new(move |card: &u32| sink.borrow_mut().push(*card)));

        assert!(callbacks.take_swiped(SwipeDirection::Down).is_none());
        let mut handler = callbacks.take_swiped(SwipeDirection::Up).expect("up handler");
        handler(&7);
        callbacks.restore_swiped(SwipeDirection::Up, handler);
        assert!(callbacks.on_swipe_up.is_some());
        assert_eq!(*log.borrow(), vec![7]);
    }

    #[test]
    fn restore_keeps_replacement_installed_during_call() {
        let mut callbacks = SwipeCallbacks::<u32>::default();
        callbacks.on_card_removed = Some(Box::new(|_| {}));
        let old = callbacks.take_card_removed().expect("handler");
        let hits = Rc::new(RefCell::new(0));
        let sink = hits.clone();
        callbacks.on_card_removed = Some(Box::new(move |_| *sink.borrow_mut() += 1));
        callbacks.restore_card_removed(old);
        if let Some(handler) = callbacks.on_card_removed.as_mut() {
            handler(0);
        }
        assert_eq!(*hits.borrow(), 1);
    }
}
