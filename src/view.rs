//! Read-only board projection for renderers.
//!
//! Faction keys are the single-letter codes from [`FactionName::code`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::board::{Board, BuildingType, ClearingId, FactionName, Suit, Token, ALL_FACTIONS};

/// One clearing as a renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClearingView {
    pub id: ClearingId,
    pub suit: Suit,
    pub buildings: Vec<BuildingType>,
    /// Only factions with at least one warrior appear.
    pub warriors: BTreeMap<char, u32>,
    /// Only factions with at least one token appear.
    pub tokens: BTreeMap<char, Vec<Token>>,
    pub ruler: Option<char>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub clearings: Vec<ClearingView>,
}

impl BoardView {
    pub fn from_board(board: &Board) -> Self {
        let clearings = board
            .clearings()
            .iter()
            .enumerate()
            .map(|(id, c)| {
                let mut warriors = BTreeMap::new();
                let mut tokens = BTreeMap::new();
                for faction in ALL_FACTIONS {
                    let n = c.warriors_of(faction);
                    if n > 0 {
                        warriors.insert(faction.code(), n);
                    }
                    let t = c.tokens_of(faction);
                    if !t.is_empty() {
                        tokens.insert(faction.code(), t.to_vec());
                    }
                }
                ClearingView {
                    id,
                    suit: c.suit,
                    buildings: c.buildings.iter().map(|b| b.building_type).collect(),
                    warriors,
                    tokens,
                    ruler: c.ruler().map(FactionName::code),
                }
            })
            .collect();
        BoardView { clearings }
    }

    /// Compact JSON for renderers outside the process.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
