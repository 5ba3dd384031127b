//! Board representation and action values.
//!
//! Contains the clearing tables, the adjacency graph, buildings and tokens,
//! the mutable board state and the closed set of actions.

pub mod action;
pub mod adjacency;
pub mod clearing;
pub mod piece;
pub mod state;

pub use action::{count_kind, Action, ActionKind, DecreeOption, Move, DECREE_ORDER};
pub use adjacency::{adjacent_to, is_adjacent, EDGES, EDGE_COUNT};
pub use clearing::{
    Clearing, ClearingId, FactionName, Suit, ALL_FACTIONS, BUILDING_LIMITS, CLEARING_COUNT,
    CLEARING_SUITS, FACTION_COUNT,
};
pub use piece::{Building, BuildingType, Token};
pub use state::{BattleOutcome, Board, DIE_MAX};
