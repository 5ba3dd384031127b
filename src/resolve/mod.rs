//! Turn sequencing and the action log.
//!
//! Tracks which phase of a player's turn is active and records every applied
//! action per round and phase for the legality checks that need history.

pub mod game_log;
pub mod phase;

pub use game_log::{GameLog, RoundEntry};
pub use phase::{TurnPhase, PHASE_COUNT};
