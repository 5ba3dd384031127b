//! The Eyrie decree and its leaders.

use serde::{Deserialize, Serialize};

use crate::board::{DecreeOption, Suit, DECREE_ORDER};
use crate::cards::Card;

/// Eyrie leaders. Each seeds two decree columns with a vizier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Leader {
    Builder,
    Charismatic,
    Commander,
    Despot,
}

pub const ALL_LEADERS: [Leader; 4] = [
    Leader::Builder,
    Leader::Charismatic,
    Leader::Commander,
    Leader::Despot,
];

impl Leader {
    /// Columns that receive a loyal vizier under this leader.
    pub const fn viziers(self) -> [DecreeOption; 2] {
        match self {
            Leader::Builder => [DecreeOption::Recruit, DecreeOption::Move],
            Leader::Charismatic => [DecreeOption::Recruit, DecreeOption::Battle],
            Leader::Commander => [DecreeOption::Move, DecreeOption::Battle],
            Leader::Despot => [DecreeOption::Move, DecreeOption::Build],
        }
    }
}

/// One card slot in a decree column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecreeEntry {
    pub suit: Suit,
    /// None for a loyal vizier.
    pub card: Option<Card>,
    /// Set once the entry has been carried out this turn.
    pub resolved: bool,
}

impl DecreeEntry {
    pub const fn vizier() -> Self {
        DecreeEntry {
            suit: Suit::Bird,
            card: None,
            resolved: false,
        }
    }

    pub const fn from_card(card: Card) -> Self {
        DecreeEntry {
            suit: card.suit,
            card: Some(card),
            resolved: false,
        }
    }
}

/// Four columns of cards, resolved left to right each daylight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Decree {
    columns: [Vec<DecreeEntry>; 4],
}

impl Decree {
    /// A decree holding only `leader`'s viziers.
    pub fn for_leader(leader: Leader) -> Self {
        let mut decree = Decree::default();
        decree.seed_viziers(leader);
        decree
    }

    pub fn seed_viziers(&mut self, leader: Leader) {
        for option in leader.viziers() {
            self.columns[option as usize].push(DecreeEntry::vizier());
        }
    }

    pub fn add(&mut self, option: DecreeOption, card: Card) {
        self.columns[option as usize].push(DecreeEntry::from_card(card));
    }

    pub fn column(&self, option: DecreeOption) -> &[DecreeEntry] {
        &self.columns[option as usize]
    }

    /// Entries in every column, viziers included.
    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries of `option` still to resolve this turn.
    pub fn unresolved(&self, option: DecreeOption) -> usize {
        self.column(option).iter().filter(|e| !e.resolved).count()
    }

    /// The first column in resolution order with work left.
    pub fn current_column(&self) -> Option<DecreeOption> {
        DECREE_ORDER.into_iter().find(|o| self.unresolved(*o) > 0)
    }

    fn find_match(&self, option: DecreeOption, clearing_suit: Suit) -> Option<usize> {
        let column = self.column(option);
        column
            .iter()
            .position(|e| !e.resolved && e.suit == clearing_suit)
            .or_else(|| {
                column
                    .iter()
                    .position(|e| !e.resolved && e.suit == Suit::Bird)
            })
    }

    /// Whether an unresolved entry of `option` can act in a clearing of `clearing_suit`.
    pub fn can_resolve(&self, option: DecreeOption, clearing_suit: Suit) -> bool {
        self.find_match(option, clearing_suit).is_some()
    }

    /// Marks the best matching entry resolved: an exact suit before a bird.
    pub fn resolve(&mut self, option: DecreeOption, clearing_suit: Suit) -> bool {
        match self.find_match(option, clearing_suit) {
            Some(i) => {
                self.columns[option as usize][i].resolved = true;
                true
            }
            None => false,
        }
    }

    /// Bird entries in the decree, viziers included.
    pub fn bird_count(&self) -> usize {
        self.columns
            .iter()
            .flatten()
            .filter(|e| e.suit == Suit::Bird)
            .count()
    }

    /// Empties the decree and returns the real cards it held.
    pub fn purge(&mut self) -> Vec<Card> {
        self.columns
            .iter_mut()
            .flat_map(|c| c.drain(..))
            .filter_map(|e| e.card)
            .collect()
    }

    /// Clears every resolved flag for a new turn.
    pub fn reset_progress(&mut self) {
        for entry in self.columns.iter_mut().flatten() {
            entry.resolved = false;
        }
    }

    /// Suits per column in resolution order.
    pub fn suits(&self) -> Vec<(DecreeOption, Vec<Suit>)> {
        DECREE_ORDER
            .into_iter()
            .map(|o| (o, self.column(o).iter().map(|e| e.suit).collect()))
            .collect()
    }
}
