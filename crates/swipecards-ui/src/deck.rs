//! Card collection snapshots and the index manager.
//!
//! The host owns the card list; the widget keeps an immutable snapshot of it
//! (`Rc<[C]>`) tagged with a generation. The current card is a cursor into
//! one generation, so a cursor taken before a collection update can never
//! resolve against the new list.

use std::rc::Rc;

/// Immutable snapshot of the host's cards.
pub struct CardDeck<C> {
    cards: Rc<[C]>,
    generation: u64,
}

impl<C> Clone for CardDeck<C> {
    fn clone(&self) -> Self {
        Self {
            cards: Rc::clone(&self.cards),
            generation: self.generation,
        }
    }
}

impl<C> CardDeck<C> {
    pub fn new(cards: impl Into<Rc<[C]>>) -> Self {
        Self {
            cards: cards.into(),
            generation: 0,
        }
    }

    /// Snapshot of `cards` one generation after this one.
    pub fn succeeded_by(&self, cards: impl Into<Rc<[C]>>) -> Self {
        Self {
            cards: cards.into(),
            generation: self.generation.wrapping_add(1),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cards(&self) -> &[C] {
        &self.cards
    }

    /// Cursor at the first card, or `None` for an empty deck.
    pub fn first(&self) -> Option<CardCursor> {
        (!self.cards.is_empty()).then_some(CardCursor {
            generation: self.generation,
            index: 0,
        })
    }

    /// Card under `cursor`, if the cursor belongs to this generation.
    pub fn resolve(&self, cursor: CardCursor) -> Option<&C> {
        if cursor.generation != self.generation {
            return None;
        }
        self.cards.get(cursor.index)
    }
}

/// Position of the current card within one deck generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardCursor {
    pub generation: u64,
    pub index: usize,
}

/// Owns the deck snapshot and which card is current.
pub struct CardStack<C> {
    deck: CardDeck<C>,
    current: Option<CardCursor>,
}

impl<C> CardStack<C> {
    pub fn new(cards: impl Into<Rc<[C]>>) -> Self {
        let deck = CardDeck::new(cards);
        let current = deck.first();
        Self { deck, current }
    }

    pub fn deck(&self) -> &CardDeck<C> {
        &self.deck
    }

    pub fn cursor(&self) -> Option<CardCursor> {
        self.current
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current.map(|cursor| cursor.index)
    }

    pub fn current(&self) -> Option<&C> {
        self.current.and_then(|cursor| self.deck.resolve(cursor))
    }

    /// Move past the current card: the next one, the first one when
    /// `looping`, or none at the end. A stack with no current card stays
    /// empty.
    pub fn advance(&mut self, looping: bool) -> Option<CardCursor> {
        let cursor = self.current?;
        let next = cursor.index + 1;
        self.current = if next >= self.deck.len() {
            if looping {
                self.deck.first()
            } else {
                None
            }
        } else {
            Some(CardCursor {
                generation: cursor.generation,
                index: next,
            })
        };
        log::debug!(
            "advanced from card {} to {:?} (looping: {})",
            cursor.index,
            self.current.map(|cursor| cursor.index),
            looping
        );
        self.current
    }

    /// Replace the snapshot and restart at its first card.
    ///
    /// Runs on every update, even when the new list equals the old one. An
    /// empty update leaves no current card.
    pub fn reset(&mut self, cards: impl Into<Rc<[C]>>) {
        self.deck = self.deck.succeeded_by(cards);
        self.current = self.deck.first();
        log::debug!(
            "deck replaced: generation {} with {} card(s)",
            self.deck.generation(),
            self.deck.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_first_card() {
        let stack = CardStack::new(vec!["a", "b"]);
        assert_eq!(stack.current(), Some(&"a"));
        assert_eq!(stack.current_index(), Some(0));
    }

    #[test]
    fn empty_deck_has_no_current_card() {
        let stack = CardStack::<&str>::new(Vec::new());
        assert_eq!(stack.current(), None);
        assert_eq!(stack.cursor(), None);
    }

    #[test]
    fn advance_walks_forward_then_ends() {
        let mut stack = CardStack::new(vec![1, 2, 3]);
        stack.advance(false);
        assert_eq!(stack.current(), Some(&2));
        stack.advance(false);
        assert_eq!(stack.current(), Some(&3));
        assert_eq!(stack.advance(false), None);
        assert_eq!(stack.current(), None);
        assert_eq!(stack.advance(false), None);
    }

    #[test]
    fn advance_wraps_when_looping() {
        let mut stack = CardStack::new(vec!["only"]);
        stack.advance(true);
        assert_eq!(stack.current(), Some(&"only"));
        assert_eq!(stack.current_index(), Some(0));
    }

    #[test]
    fn reset_restarts_even_with_identical_cards() {
        let mut stack = CardStack::new(vec![1, 2, 3]);
        stack.advance(false);
        stack.reset(vec![1, 2, 3]);
        assert_eq!(stack.current_index(), Some(0));
        stack.advance(false);
        stack.reset(vec![1, 2, 3]);
        assert_eq!(stack.current_index(), Some(0));
        assert_eq!(stack.deck().generation(), 2);
    }

    #[test]
    fn stale_cursor_does_not_resolve() {
        let mut stack = CardStack::new(vec![1, 2, 3]);
        let old = stack.cursor().expect("first card");
        stack.reset(vec![9]);
        assert_eq!(stack.deck().resolve(old), None);
        assert_eq!(stack.current(), Some(&9));
    }

    #[test]
    fn empty_reset_clears_current_card() {
        let mut stack = CardStack::new(vec![1]);
        stack.reset(Vec::new());
        assert_eq!(stack.current(), None);
    }
}
