//! Card values.
//!
//! The engine only looks at a card's suit and, for craftable cards, its
//! crafting cost and victory points. Effect text is not modelled.

use serde::Serialize;

use crate::board::Suit;

/// Per-suit crafting requirements. The Bird entry is the wild count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct CraftCost {
    counts: [u8; 4],
}

impl CraftCost {
    /// Builds a cost from a list of required suits.
    pub const fn from_suits(suits: &[Suit]) -> Self {
        let mut counts = [0u8; 4];
        let mut i = 0;
        while i < suits.len() {
            counts[suits[i] as usize] += 1;
            i += 1;
        }
        CraftCost { counts }
    }

    /// Required count of `suit` (Bird returns the wild count).
    pub const fn count(self, suit: Suit) -> u8 {
        self.counts[suit as usize]
    }

    /// Required wild count.
    pub const fn wild(self) -> u8 {
        self.counts[Suit::Bird as usize]
    }

    pub fn total(self) -> u32 {
        self.counts.iter().map(|c| u32::from(*c)).sum()
    }
}

/// Craftable items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Item {
    Bag,
    Boots,
    Coins,
    Crossbow,
    Hammer,
    Sword,
    Tea,
}

/// What a card does once played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CardKind {
    Dominance,
    Ambush,
    Effect {
        name: &'static str,
        persistent: bool,
        cost: CraftCost,
    },
    Item {
        item: Item,
        vp: u32,
        cost: CraftCost,
    },
}

/// A playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Card {
    pub suit: Suit,
    pub kind: CardKind,
}

impl Card {
    pub const fn new(suit: Suit, kind: CardKind) -> Self {
        Card { suit, kind }
    }

    /// The crafting cost, or None if the card cannot be crafted.
    pub const fn crafting_cost(&self) -> Option<CraftCost> {
        match self.kind {
            CardKind::Effect { cost, .. } | CardKind::Item { cost, .. } => Some(cost),
            CardKind::Dominance | CardKind::Ambush => None,
        }
    }

    pub const fn is_bird(&self) -> bool {
        matches!(self.suit, Suit::Bird)
    }
}
