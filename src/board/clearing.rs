//! Clearing definitions and per-clearing state for the woodland map.
//!
//! The map has 12 clearings identified by their index. Suits and building
//! slot counts are compile-time tables indexed by clearing id. Faction
//! identity is a small enum used as an array index, so board state never
//! holds a reference to a player or faction object.

use serde::{Deserialize, Serialize};

use super::piece::{Building, BuildingType, Token};

/// The number of clearings on the map.
pub const CLEARING_COUNT: usize = 12;

/// Index of a clearing on the map.
pub type ClearingId = usize;

/// The number of faction identities (implemented or not).
pub const FACTION_COUNT: usize = 4;

/// A card or clearing suit. Bird is wild and never labels a clearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Fox = 0,
    Rabbit = 1,
    Mouse = 2,
    Bird = 3,
}

impl Suit {
    /// Returns true if a card of this suit may be spent for a clearing of `clearing_suit`.
    pub const fn matches(self, clearing_suit: Suit) -> bool {
        matches!(self, Suit::Bird) || self as u8 == clearing_suit as u8
    }

    /// Lowercase display name.
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Fox => "fox",
            Suit::Rabbit => "rabbit",
            Suit::Mouse => "mouse",
            Suit::Bird => "bird",
        }
    }
}

/// Stable identity of a faction.
///
/// Used as the key for warriors, tokens and buildings on the board, and to
/// resolve cross-player references such as a battle's defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum FactionName {
    MarquiseDeCat = 0,
    EyrieDynasties = 1,
    WoodlandAlliance = 2,
    Vagabond = 3,
}

/// All faction identities in index order.
pub const ALL_FACTIONS: [FactionName; FACTION_COUNT] = [
    FactionName::MarquiseDeCat,
    FactionName::EyrieDynasties,
    FactionName::WoodlandAlliance,
    FactionName::Vagabond,
];

impl FactionName {
    /// Single-letter code used by the board view.
    pub const fn code(self) -> char {
        match self {
            FactionName::MarquiseDeCat => 'C',
            FactionName::EyrieDynasties => 'E',
            FactionName::WoodlandAlliance => 'A',
            FactionName::Vagabond => 'V',
        }
    }

    /// Parses a faction from its single-letter code.
    pub fn from_code(c: char) -> Option<FactionName> {
        ALL_FACTIONS.iter().copied().find(|f| f.code() == c)
    }
}

/// Suit of each clearing, indexed by clearing id.
pub const CLEARING_SUITS: [Suit; CLEARING_COUNT] = [
    Suit::Fox,    // 0  (corner, keep)
    Suit::Rabbit, // 1
    Suit::Mouse,  // 2
    Suit::Fox,    // 3
    Suit::Rabbit, // 4
    Suit::Mouse,  // 5
    Suit::Fox,    // 6
    Suit::Rabbit, // 7
    Suit::Mouse,  // 8
    Suit::Fox,    // 9
    Suit::Rabbit, // 10
    Suit::Mouse,  // 11 (corner, roost)
];

/// Number of building slots in each clearing, indexed by clearing id.
pub const BUILDING_LIMITS: [usize; CLEARING_COUNT] = [1, 2, 2, 2, 2, 3, 2, 2, 2, 2, 2, 1];

/// A single clearing: warriors, buildings and tokens per faction.
///
/// `ruler` is recomputed by every mutator that touches warriors or buildings,
/// so it is never stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clearing {
    pub suit: Suit,
    pub building_limit: usize,
    pub buildings: Vec<Building>,
    /// Warrior count per faction, indexed by `FactionName as usize`.
    pub warriors: [u32; FACTION_COUNT],
    /// Tokens per faction, indexed by `FactionName as usize`.
    pub tokens: [Vec<Token>; FACTION_COUNT],
    ruler: Option<FactionName>,
}

impl Clearing {
    /// Creates an empty clearing.
    pub fn new(suit: Suit, building_limit: usize) -> Self {
        Clearing {
            suit,
            building_limit,
            buildings: Vec::new(),
            warriors: [0; FACTION_COUNT],
            tokens: Default::default(),
            ruler: None,
        }
    }

    /// The faction with strictly the most warriors plus buildings, if any.
    pub fn ruler(&self) -> Option<FactionName> {
        self.ruler
    }

    /// Warriors of `faction` in this clearing.
    pub fn warriors_of(&self, faction: FactionName) -> u32 {
        self.warriors[faction as usize]
    }

    /// Tokens of `faction` in this clearing.
    pub fn tokens_of(&self, faction: FactionName) -> &[Token] {
        &self.tokens[faction as usize]
    }

    /// Number of `token` held by `faction` here.
    pub fn count_tokens(&self, faction: FactionName, token: Token) -> usize {
        self.tokens[faction as usize]
            .iter()
            .filter(|t| **t == token)
            .count()
    }

    /// Number of buildings of any type owned by `faction` here.
    pub fn buildings_owned_by(&self, faction: FactionName) -> usize {
        self.buildings.iter().filter(|b| b.owner == faction).count()
    }

    /// Returns true if `faction` has a building of `building_type` here.
    pub fn has_building(&self, faction: FactionName, building_type: BuildingType) -> bool {
        self.buildings
            .iter()
            .any(|b| b.owner == faction && b.building_type == building_type)
    }

    /// Returns true if another building fits.
    pub fn has_free_slot(&self) -> bool {
        self.buildings.len() < self.building_limit
    }

    pub fn add_warriors(&mut self, faction: FactionName, count: u32) {
        self.warriors[faction as usize] += count;
        self.update_ruler();
    }

    /// Removes up to `count` warriors; returns how many were actually removed.
    pub fn remove_warriors(&mut self, faction: FactionName, count: u32) -> u32 {
        let slot = &mut self.warriors[faction as usize];
        let removed = count.min(*slot);
        *slot -= removed;
        self.update_ruler();
        removed
    }

    /// Appends a building. Returns false (and changes nothing) when the clearing is full.
    pub fn add_building(&mut self, building_type: BuildingType, owner: FactionName) -> bool {
        if !self.has_free_slot() {
            return false;
        }
        self.buildings.push(Building::new(building_type, owner));
        self.update_ruler();
        true
    }

    pub fn add_token(&mut self, faction: FactionName, token: Token) {
        self.tokens[faction as usize].push(token);
    }

    /// Removes up to `count` copies of `token`; returns how many were removed.
    pub fn remove_tokens(&mut self, faction: FactionName, token: Token, count: usize) -> usize {
        let tokens = &mut self.tokens[faction as usize];
        let mut removed = 0;
        while removed < count {
            match tokens.iter().position(|t| *t == token) {
                Some(pos) => {
                    tokens.remove(pos);
                    removed += 1;
                }
                None => break,
            }
        }
        removed
    }

    /// Recomputes the ruler from current warriors and buildings.
    fn update_ruler(&mut self) {
        let mut best: Option<FactionName> = None;
        let mut best_score = 0usize;
        let mut tied = false;
        for faction in ALL_FACTIONS {
            let score = self.warriors[faction as usize] as usize + self.buildings_owned_by(faction);
            if score == 0 {
                continue;
            }
            if score > best_score {
                best = Some(faction);
                best_score = score;
                tied = false;
            } else if score == best_score {
                tied = true;
            }
        }
        self.ruler = if tied { None } else { best };
    }
}
