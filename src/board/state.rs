//! Board state: the 12 clearings and every spatial operation on them.
//!
//! The board is the only owner of warriors, buildings and tokens. Mutators
//! are lenient (they clamp instead of failing); legality lives entirely in
//! the faction `is_action_legal` checks, which call the query methods here.

use std::collections::BTreeMap;

use rand::Rng;

use super::action::Move;
use super::adjacency::{adjacent_to, is_adjacent};
use super::clearing::{
    Clearing, ClearingId, FactionName, BUILDING_LIMITS, CLEARING_COUNT, CLEARING_SUITS,
};
use super::piece::{BuildingType, Token};

/// Highest face of a hit die.
pub const DIE_MAX: u8 = 3;

/// Result of one battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleOutcome {
    pub rolls: (u8, u8),
    /// Warriors removed from the defender.
    pub attacker_hits: u32,
    /// Warriors removed from the attacker.
    pub defender_hits: u32,
}

/// Complete board state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    clearings: [Clearing; CLEARING_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates the empty map with its fixed suits and building limits.
    pub fn new() -> Self {
        Board {
            clearings: std::array::from_fn(|i| Clearing::new(CLEARING_SUITS[i], BUILDING_LIMITS[i])),
        }
    }

    pub fn is_valid_clearing(&self, clearing: ClearingId) -> bool {
        clearing < CLEARING_COUNT
    }

    pub fn clearing(&self, clearing: ClearingId) -> Option<&Clearing> {
        self.clearings.get(clearing)
    }

    pub fn clearings(&self) -> &[Clearing] {
        &self.clearings
    }

    /// The ruler of `clearing`, or None if tied, empty or invalid.
    pub fn ruler(&self, clearing: ClearingId) -> Option<FactionName> {
        self.clearing(clearing).and_then(Clearing::ruler)
    }

    /// Returns true if `faction` rules `clearing`.
    pub fn rules(&self, faction: FactionName, clearing: ClearingId) -> bool {
        self.ruler(clearing) == Some(faction)
    }

    pub fn warriors(&self, faction: FactionName, clearing: ClearingId) -> u32 {
        self.clearing(clearing).map_or(0, |c| c.warriors_of(faction))
    }

    /// Total warriors of `faction` on the map.
    pub fn total_warriors(&self, faction: FactionName) -> u32 {
        self.clearings.iter().map(|c| c.warriors_of(faction)).sum()
    }

    pub fn add_warriors(&mut self, faction: FactionName, count: u32, clearing: ClearingId) {
        if let Some(c) = self.clearings.get_mut(clearing) {
            c.add_warriors(faction, count);
        }
    }

    /// Removes up to `count` warriors; returns how many were removed.
    pub fn remove_warriors(&mut self, faction: FactionName, count: u32, clearing: ClearingId) -> u32 {
        self.clearings
            .get_mut(clearing)
            .map_or(0, |c| c.remove_warriors(faction, count))
    }

    pub fn add_token(&mut self, faction: FactionName, token: Token, clearing: ClearingId) {
        if let Some(c) = self.clearings.get_mut(clearing) {
            c.add_token(faction, token);
        }
    }

    /// Total `token` held by `faction` across the map.
    pub fn count_tokens(&self, faction: FactionName, token: Token) -> usize {
        self.clearings
            .iter()
            .map(|c| c.count_tokens(faction, token))
            .sum()
    }

    /// Number of buildings of `building_type` owned by `faction` on the map.
    pub fn buildings_of(&self, faction: FactionName, building_type: BuildingType) -> usize {
        self.clearings
            .iter()
            .flat_map(|c| c.buildings.iter())
            .filter(|b| b.owner == faction && b.building_type == building_type)
            .count()
    }

    /// Clearings holding a `building_type` owned by `faction`, one entry per building.
    pub fn clearings_with_building(
        &self,
        faction: FactionName,
        building_type: BuildingType,
    ) -> Vec<ClearingId> {
        let mut out = Vec::new();
        for (id, c) in self.clearings.iter().enumerate() {
            for b in &c.buildings {
                if b.owner == faction && b.building_type == building_type {
                    out.push(id);
                }
            }
        }
        out
    }

    /// Transfers up to `count` warriors from `src` to `dst` without checking legality.
    pub fn move_warriors(&mut self, faction: FactionName, count: u32, src: ClearingId, dst: ClearingId) {
        if !self.is_valid_clearing(src) || !self.is_valid_clearing(dst) {
            return;
        }
        let moved = self.clearings[src].remove_warriors(faction, count);
        self.clearings[dst].add_warriors(faction, moved);
    }

    /// Returns true if `faction` may move `count` warriors from `src` to `dst`.
    ///
    /// The clearings must be adjacent, the faction must have enough warriors
    /// at `src`, and it must rule at least one of the two endpoints.
    pub fn can_move(&self, faction: FactionName, count: u32, src: ClearingId, dst: ClearingId) -> bool {
        if !self.is_valid_clearing(src) || !self.is_valid_clearing(dst) || src == dst {
            return false;
        }
        if count == 0 {
            return false;
        }
        if !is_adjacent(src, dst) {
            return false;
        }
        if self.warriors(faction, src) < count {
            return false;
        }
        self.rules(faction, src) || self.rules(faction, dst)
    }

    /// Returns true if both moves are legal in sequence, the second judged
    /// against the board as it would be after the first.
    ///
    /// Works on a private copy; `self` is never touched.
    pub fn can_move_twice(&self, faction: FactionName, first: Move, second: Move) -> bool {
        if !self.can_move(faction, first.count, first.from, first.to) {
            return false;
        }
        let mut after_first = self.clone();
        after_first.move_warriors(faction, first.count, first.from, first.to);
        after_first.can_move(faction, second.count, second.from, second.to)
    }

    /// Returns true if `attacker` may battle `defender` in `clearing`.
    pub fn can_battle(&self, attacker: FactionName, defender: FactionName, clearing: ClearingId) -> bool {
        if !self.is_valid_clearing(clearing) || attacker == defender {
            return false;
        }
        self.warriors(attacker, clearing) > 0 && self.warriors(defender, clearing) > 0
    }

    /// Rolls two hit dice and resolves a battle.
    pub fn battle<R: Rng + ?Sized>(
        &mut self,
        attacker: FactionName,
        defender: FactionName,
        clearing: ClearingId,
        rng: &mut R,
    ) -> BattleOutcome {
        let rolls = (rng.gen_range(0..=DIE_MAX), rng.gen_range(0..=DIE_MAX));
        self.battle_with_rolls(attacker, defender, clearing, rolls)
    }

    /// Resolves a battle from fixed dice.
    ///
    /// The higher die is the attacker's hits against the defender and the
    /// lower die the defender's hits against the attacker, each capped by the
    /// warriors the other side has in the clearing.
    pub fn battle_with_rolls(
        &mut self,
        attacker: FactionName,
        defender: FactionName,
        clearing: ClearingId,
        rolls: (u8, u8),
    ) -> BattleOutcome {
        let high = u32::from(rolls.0.max(rolls.1));
        let low = u32::from(rolls.0.min(rolls.1));
        let attacker_hits = high.min(self.warriors(defender, clearing));
        let defender_hits = low.min(self.warriors(attacker, clearing));

        self.remove_warriors(defender, attacker_hits, clearing);
        self.remove_warriors(attacker, defender_hits, clearing);

        BattleOutcome {
            rolls,
            attacker_hits,
            defender_hits,
        }
    }

    /// Places a building. Returns false and changes nothing if the clearing is full.
    pub fn build(&mut self, clearing: ClearingId, building_type: BuildingType, owner: FactionName) -> bool {
        match self.clearings.get_mut(clearing) {
            Some(c) => c.add_building(building_type, owner),
            None => false,
        }
    }

    /// Count of unused buildings of `building_type` per clearing; clearings without any are omitted.
    pub fn get_unused_buildings_of_type(&self, building_type: BuildingType) -> BTreeMap<ClearingId, usize> {
        let mut out = BTreeMap::new();
        for (id, c) in self.clearings.iter().enumerate() {
            let n = c
                .buildings
                .iter()
                .filter(|b| b.building_type == building_type && !b.used)
                .count();
            if n > 0 {
                out.insert(id, n);
            }
        }
        out
    }

    /// Marks up to `count` unused buildings of `building_type` in `clearing` as used.
    /// Returns how many were marked.
    pub fn mark_buildings_used(&mut self, clearing: ClearingId, building_type: BuildingType, count: usize) -> usize {
        let Some(c) = self.clearings.get_mut(clearing) else {
            return 0;
        };
        let mut marked = 0;
        for b in c.buildings.iter_mut() {
            if marked == count {
                break;
            }
            if b.building_type == building_type && !b.used {
                b.used = true;
                marked += 1;
            }
        }
        marked
    }

    /// Clears the used flag on every building.
    pub fn mark_all_buildings_unused(&mut self) {
        for c in self.clearings.iter_mut() {
            for b in c.buildings.iter_mut() {
                b.used = false;
            }
        }
    }

    /// Clearings holding `faction` wood, reachable from `start` through
    /// clearings the faction rules.
    ///
    /// `start` is searched whether or not it is ruled. Result order follows
    /// the search and is not otherwise meaningful.
    pub fn find_wood_in_connected_ruled_clearings(
        &self,
        faction: FactionName,
        start: ClearingId,
    ) -> Vec<ClearingId> {
        if !self.is_valid_clearing(start) {
            return Vec::new();
        }
        let mut visited = [false; CLEARING_COUNT];
        let mut stack = vec![start];
        visited[start] = true;
        let mut with_wood = Vec::new();

        while let Some(current) = stack.pop() {
            if self.clearings[current].count_tokens(faction, Token::Wood) > 0 {
                with_wood.push(current);
            }
            for &next in adjacent_to(current) {
                if !visited[next] && self.rules(faction, next) {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }

        with_wood
    }

    /// Wood `faction` can spend on a building in `start`.
    pub fn wood_available(&self, faction: FactionName, start: ClearingId) -> usize {
        self.find_wood_in_connected_ruled_clearings(faction, start)
            .into_iter()
            .map(|id| self.clearings[id].count_tokens(faction, Token::Wood))
            .sum()
    }

    /// Removes up to `amount` wood from the region reachable from `start`.
    /// Returns how much was removed.
    pub fn spend_wood(&mut self, faction: FactionName, start: ClearingId, amount: usize) -> usize {
        let mut remaining = amount;
        for id in self.find_wood_in_connected_ruled_clearings(faction, start) {
            if remaining == 0 {
                break;
            }
            remaining -= self.clearings[id].remove_tokens(faction, Token::Wood, remaining);
        }
        amount - remaining
    }
}
