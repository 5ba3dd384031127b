//! Players: a hand of cards, a score and the identity of their faction.

use crate::board::FactionName;
use crate::cards::{Card, Item};

/// Hand size a player must discard down to at the end of evening.
pub const MAX_HAND_SIZE: usize = 5;

/// A seated player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub faction: FactionName,
    /// Order carries no meaning beyond the indices actions refer to.
    pub hand: Vec<Card>,
    pub score: u32,
    pub crafted_items: Vec<Item>,
    /// Persistent effect cards crafted and kept in front of the player.
    pub effects: Vec<Card>,
}

impl Player {
    pub fn new(faction: FactionName) -> Self {
        Player {
            faction,
            hand: Vec::new(),
            score: 0,
            crafted_items: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn has_card(&self, index: usize) -> bool {
        index < self.hand.len()
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.hand.get(index)
    }

    /// Removes and returns the card at `index`.
    pub fn take_card(&mut self, index: usize) -> Option<Card> {
        if index < self.hand.len() {
            Some(self.hand.remove(index))
        } else {
            None
        }
    }

    /// Removes the cards at `indices` (any order, duplicates ignored) and returns them.
    pub fn take_cards(&mut self, indices: &[usize]) -> Vec<Card> {
        let mut sorted: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|i| *i < self.hand.len())
            .collect();
        sorted.sort_unstable();
        sorted.dedup();
        sorted
            .into_iter()
            .rev()
            .map(|i| self.hand.remove(i))
            .collect()
    }
}
