mod swipe_cards;

pub use swipe_cards::{SwipeCards, SwipeCardsBuilder};
