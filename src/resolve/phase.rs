//! Phase sequencing.
//!
//! A round is one player's turn: BIRDSONG -> DAYLIGHT -> EVENING, after which
//! the next player starts again at BIRDSONG.

use serde::{Deserialize, Serialize};

/// The phase within a player's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TurnPhase {
    Birdsong = 0,
    Daylight = 1,
    Evening = 2,
}

/// Number of phases in a turn.
pub const PHASE_COUNT: usize = 3;

impl TurnPhase {
    /// The phase that follows this one.
    pub const fn next(self) -> TurnPhase {
        match self {
            TurnPhase::Birdsong => TurnPhase::Daylight,
            TurnPhase::Daylight => TurnPhase::Evening,
            TurnPhase::Evening => TurnPhase::Birdsong,
        }
    }

    /// Returns true if ending this phase ends the round.
    pub const fn ends_round(self) -> bool {
        matches!(self, TurnPhase::Evening)
    }

    pub const fn name(self) -> &'static str {
        match self {
            TurnPhase::Birdsong => "BIRDSONG",
            TurnPhase::Daylight => "DAYLIGHT",
            TurnPhase::Evening => "EVENING",
        }
    }
}
