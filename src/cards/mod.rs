//! Cards, the base-game catalog and the shared deck.

pub mod card;
pub mod deck;

pub use card::{Card, CardKind, CraftCost, Item};
pub use deck::{Deck, BASE_DECK, BASE_DECK_SIZE};
