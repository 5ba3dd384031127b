//! The shared deck and discard pile, plus the base-game card catalog.
//!
//! Cards only ever flow deck -> hand -> discard; the discard pile is never
//! shuffled back in, so an exhausted deck is a hard error.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Suit;
use crate::error::EngineError;

use super::card::{Card, CardKind, CraftCost, Item};

use Suit::{Bird, Fox, Mouse, Rabbit};

const fn effect(suit: Suit, name: &'static str, persistent: bool, cost: &[Suit]) -> Card {
    Card::new(
        suit,
        CardKind::Effect {
            name,
            persistent,
            cost: CraftCost::from_suits(cost),
        },
    )
}

const fn item(suit: Suit, item: Item, vp: u32, cost: &[Suit]) -> Card {
    Card::new(
        suit,
        CardKind::Item {
            item,
            vp,
            cost: CraftCost::from_suits(cost),
        },
    )
}

/// Number of cards in the base deck.
pub const BASE_DECK_SIZE: usize = 54;

/// The base-game deck, in catalog order.
pub const BASE_DECK: [Card; BASE_DECK_SIZE] = [
    Card::new(Fox, CardKind::Dominance),
    Card::new(Mouse, CardKind::Dominance),
    Card::new(Rabbit, CardKind::Dominance),
    Card::new(Bird, CardKind::Dominance),
    Card::new(Fox, CardKind::Ambush),
    Card::new(Mouse, CardKind::Ambush),
    Card::new(Rabbit, CardKind::Ambush),
    Card::new(Bird, CardKind::Ambush),
    Card::new(Bird, CardKind::Ambush),
    effect(Bird, "Royal Claim", true, &[Bird, Bird, Bird, Bird]),
    effect(Bird, "Sappers", true, &[Mouse]),
    effect(Bird, "Sappers", true, &[Mouse]),
    effect(Bird, "Armorers", true, &[Fox]),
    effect(Bird, "Armorers", true, &[Fox]),
    effect(Bird, "Brutal Tactics", true, &[Fox, Fox]),
    effect(Bird, "Brutal Tactics", true, &[Fox, Fox]),
    effect(Rabbit, "Better Burrow Bank", true, &[Rabbit, Rabbit]),
    effect(Rabbit, "Better Burrow Bank", true, &[Rabbit, Rabbit]),
    effect(Rabbit, "Command Warren", true, &[Rabbit, Rabbit]),
    effect(Rabbit, "Command Warren", true, &[Rabbit, Rabbit]),
    effect(Rabbit, "Cobbler", true, &[Rabbit, Rabbit]),
    effect(Rabbit, "Cobbler", true, &[Rabbit, Rabbit]),
    effect(Mouse, "Codebreakers", true, &[Mouse]),
    effect(Mouse, "Codebreakers", true, &[Mouse]),
    effect(Mouse, "Scouting Party", true, &[Mouse, Mouse]),
    effect(Mouse, "Scouting Party", true, &[Mouse, Mouse]),
    effect(Fox, "Stand and Deliver", true, &[Mouse, Mouse, Mouse]),
    effect(Fox, "Stand and Deliver", true, &[Mouse, Mouse, Mouse]),
    effect(Fox, "Tax Collector", true, &[Rabbit, Fox, Mouse]),
    effect(Fox, "Tax Collector", true, &[Rabbit, Fox, Mouse]),
    effect(Fox, "Tax Collector", true, &[Rabbit, Fox, Mouse]),
    effect(Fox, "Favor of the Foxes", false, &[Fox, Fox, Fox]),
    effect(Mouse, "Favor of the Mice", false, &[Mouse, Mouse, Mouse]),
    effect(Rabbit, "Favor of the Rabbits", false, &[Rabbit, Rabbit, Rabbit]),
    item(Bird, Item::Crossbow, 1, &[Fox]),
    item(Mouse, Item::Crossbow, 1, &[Fox]),
    item(Rabbit, Item::Tea, 2, &[Mouse]),
    item(Mouse, Item::Tea, 2, &[Mouse]),
    item(Fox, Item::Tea, 2, &[Mouse]),
    item(Bird, Item::Bag, 1, &[Mouse]),
    item(Rabbit, Item::Bag, 1, &[Mouse]),
    item(Mouse, Item::Bag, 1, &[Mouse]),
    item(Fox, Item::Bag, 1, &[Mouse]),
    item(Bird, Item::Boots, 1, &[Rabbit]),
    item(Rabbit, Item::Boots, 1, &[Rabbit]),
    item(Mouse, Item::Boots, 1, &[Rabbit]),
    item(Fox, Item::Boots, 1, &[Rabbit]),
    item(Rabbit, Item::Coins, 3, &[Rabbit, Rabbit]),
    item(Mouse, Item::Coins, 3, &[Rabbit, Rabbit]),
    item(Fox, Item::Coins, 3, &[Rabbit, Rabbit]),
    item(Bird, Item::Sword, 2, &[Fox, Fox]),
    item(Mouse, Item::Sword, 2, &[Fox, Fox]),
    item(Fox, Item::Sword, 2, &[Fox, Fox]),
    item(Fox, Item::Hammer, 2, &[Fox]),
];

/// Draw pile and discard pile.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    /// Top of the pile is the end of the vector.
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
}

impl Deck {
    /// Creates a deck from explicit cards; the last card is drawn first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Deck {
            draw_pile: cards,
            discard_pile: Vec::new(),
        }
    }

    /// The unshuffled base deck.
    pub fn base() -> Self {
        Self::from_cards(BASE_DECK.to_vec())
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.draw_pile.shuffle(rng);
    }

    /// Cards left to draw.
    pub fn remaining(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    /// Draws `count` cards, or none at all if fewer remain.
    pub fn draw(&mut self, count: usize) -> Result<Vec<Card>, EngineError> {
        if count > self.draw_pile.len() {
            return Err(EngineError::DeckExhausted {
                requested: count,
                remaining: self.draw_pile.len(),
            });
        }
        let split = self.draw_pile.len() - count;
        let mut drawn = self.draw_pile.split_off(split);
        drawn.reverse();
        Ok(drawn)
    }

    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }
}
