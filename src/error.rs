//! Errors surfaced by the engine.
//!
//! `IllegalAction` is the only validation error: the action was rejected by
//! the active faction's legality check and the game state is unchanged.

use crate::board::{Action, FactionName};
use crate::resolve::TurnPhase;

/// Errors returned by the public engine API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("illegal action {action:?} for {faction:?} during {phase:?}")]
    IllegalAction {
        faction: FactionName,
        phase: TurnPhase,
        action: Action,
    },

    #[error("deck exhausted: requested {requested} card(s), {remaining} remaining")]
    DeckExhausted { requested: usize, remaining: usize },

    #[error("faction {0:?} is not implemented")]
    UnsupportedFaction(FactionName),

    #[error("invalid game setup: {0}")]
    InvalidSetup(String),
}
