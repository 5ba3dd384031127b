//! Faction capability trait and its implementations.
//!
//! Every faction validates and applies its own actions. The turn engine only
//! ever holds a `Box<dyn Faction>` and dispatches through this trait; it
//! never inspects a concrete faction type.

pub mod common;
pub mod decree;
pub mod eyrie;
pub mod marquise;

use std::fmt;

use rand::RngCore;
use serde::Serialize;

use crate::board::{Action, ActionKind, Board, BuildingType, DecreeOption, FactionName, Suit};
use crate::cards::Deck;
use crate::error::EngineError;
use crate::player::Player;
use crate::resolve::TurnPhase;

pub use decree::{Decree, DecreeEntry, Leader, ALL_LEADERS};
pub use eyrie::EyrieDynasties;
pub use marquise::MarquiseDeCat;

/// Mutable state an action may touch while being applied.
pub struct TurnContext<'a> {
    pub board: &'a mut Board,
    pub player: &'a mut Player,
    pub deck: &'a mut Deck,
    pub rng: &'a mut dyn RngCore,
}

impl fmt::Debug for TurnContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurnContext")
            .field("player", &self.player.faction)
            .field("deck_remaining", &self.deck.remaining())
            .finish_non_exhaustive()
    }
}

/// Read-only summary of a faction's private counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactionStatus {
    pub faction: FactionName,
    pub warriors_in_supply: u32,
    pub buildings_placed: Vec<(BuildingType, usize)>,
    pub extra_actions: u32,
    pub leader: Option<Leader>,
    /// Suits of every decree card per column, resolved or not.
    pub decree: Vec<(DecreeOption, Vec<Suit>)>,
}

/// The rules of one faction.
///
/// `is_action_legal` is the only gate: `apply_action` assumes the action
/// passed it against the same state and does not re-validate.
pub trait Faction: fmt::Debug {
    /// Identity used for board keys and cross-player references.
    fn name(&self) -> FactionName;

    /// Places starting pieces.
    fn board_setup(&mut self, board: &mut Board);

    /// Coarse action kinds available in `phase`, without per-instance checks.
    fn legal_action_kinds(&self, phase: TurnPhase) -> Vec<ActionKind>;

    /// Checks `action` against the board, the player and the actions already
    /// taken in the current round and phase. Never mutates anything.
    fn is_action_legal(
        &self,
        action: &Action,
        phase: TurnPhase,
        player: &Player,
        board: &Board,
        actions_taken: &[Action],
    ) -> bool;

    /// Applies a legal action.
    ///
    /// Only fails on a fatal condition (an exhausted deck), checked before
    /// anything is changed.
    fn apply_action(&mut self, action: &Action, ctx: &mut TurnContext<'_>) -> Result<(), EngineError>;

    /// Clears round-scoped state at the end of this faction's turn.
    fn reset_state(&mut self);

    /// Actions applied automatically on entering birdsong.
    fn pre_birdsong_actions(&self, _player: &Player, _board: &Board) -> Vec<Action> {
        Vec::new()
    }

    /// Actions applied automatically on entering evening.
    fn pre_evening_actions(&self, _player: &Player, _board: &Board) -> Vec<Action> {
        Vec::new()
    }

    /// Snapshot of private counters for display.
    fn status(&self, board: &Board) -> FactionStatus;
}
