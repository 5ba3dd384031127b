//! Action types for every faction and phase.
//!
//! Actions are transient values: built by the caller, checked by the active
//! faction, applied once and then appended to the game log. Card references
//! are indices into the acting player's hand at the time of submission.

use serde::{Deserialize, Serialize};

use super::clearing::{ClearingId, FactionName};
use super::piece::BuildingType;

/// A single warrior move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub count: u32,
    pub from: ClearingId,
    pub to: ClearingId,
}

impl Move {
    pub const fn new(count: u32, from: ClearingId, to: ClearingId) -> Self {
        Move { count, from, to }
    }
}

/// A column of the decree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DecreeOption {
    Recruit = 0,
    Move = 1,
    Battle = 2,
    Build = 3,
}

/// Decree columns in resolution order.
pub const DECREE_ORDER: [DecreeOption; 4] = [
    DecreeOption::Recruit,
    DecreeOption::Move,
    DecreeOption::Battle,
    DecreeOption::Build,
];

/// A game action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move warriors between adjacent clearings.
    Move(Move),

    /// Attack `defender` in `clearing`. The attacker is the acting faction.
    Battle {
        clearing: ClearingId,
        defender: FactionName,
    },

    /// Place warriors at a single clearing (decree recruit).
    Recruit { clearing: ClearingId },

    /// End the current phase.
    EndPhase,

    /// Draw `count` cards from the deck.
    Draw { count: usize },

    /// Discard the given hand indices.
    Discard { cards: Vec<usize> },

    /// Spend a hand card against unused crafting buildings.
    Craft { card: usize },

    /// Place wood at every sawmill (birdsong).
    AddWood,

    /// Two moves resolved in order; counts as one action.
    March { first: Move, second: Move },

    /// Place a building, paying its cost.
    Build {
        clearing: ClearingId,
        building: BuildingType,
    },

    /// Place one warrior at every recruiter.
    RecruitAtRecruiters,

    /// Spend a card matching the clearing's suit to add wood at its sawmill.
    Overwork { clearing: ClearingId, card: usize },

    /// Spend a bird card for one more daylight action.
    ExtraAction { card: usize },

    /// Add a hand card to a decree column.
    AddToDecree { card: usize, option: DecreeOption },

    /// Give up on the decree: purge it and replace the leader.
    Turmoil,
}

/// Coarse, phase-dependent action kinds offered to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Move,
    Battle,
    Recruit,
    EndPhase,
    Draw,
    Discard,
    Craft,
    AddWood,
    March,
    Build,
    RecruitAtRecruiters,
    Overwork,
    ExtraAction,
    AddToDecree,
    Turmoil,
}

impl Action {
    /// The kind of this action.
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Move(_) => ActionKind::Move,
            Action::Battle { .. } => ActionKind::Battle,
            Action::Recruit { .. } => ActionKind::Recruit,
            Action::EndPhase => ActionKind::EndPhase,
            Action::Draw { .. } => ActionKind::Draw,
            Action::Discard { .. } => ActionKind::Discard,
            Action::Craft { .. } => ActionKind::Craft,
            Action::AddWood => ActionKind::AddWood,
            Action::March { .. } => ActionKind::March,
            Action::Build { .. } => ActionKind::Build,
            Action::RecruitAtRecruiters => ActionKind::RecruitAtRecruiters,
            Action::Overwork { .. } => ActionKind::Overwork,
            Action::ExtraAction { .. } => ActionKind::ExtraAction,
            Action::AddToDecree { .. } => ActionKind::AddToDecree,
            Action::Turmoil => ActionKind::Turmoil,
        }
    }

    /// The decree column this action resolves, if any.
    pub fn decree_option(&self) -> Option<DecreeOption> {
        match self {
            Action::Recruit { .. } => Some(DecreeOption::Recruit),
            Action::Move(_) => Some(DecreeOption::Move),
            Action::Battle { .. } => Some(DecreeOption::Battle),
            Action::Build { .. } => Some(DecreeOption::Build),
            _ => None,
        }
    }
}

/// Counts actions of `kind` in `actions`.
pub fn count_kind(actions: &[Action], kind: ActionKind) -> usize {
    actions.iter().filter(|a| a.kind() == kind).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decree_option_follows_action() {
        assert_eq!(
            Action::Recruit { clearing: 3 }.decree_option(),
            Some(DecreeOption::Recruit)
        );
        assert_eq!(
            Action::Move(Move::new(1, 0, 1)).decree_option(),
            Some(DecreeOption::Move)
        );
        assert_eq!(Action::EndPhase.decree_option(), None);
        assert_eq!(Action::Turmoil.decree_option(), None);
    }

    #[test]
    fn count_kind_counts_only_matching() {
        let actions = vec![
            Action::Craft { card: 0 },
            Action::Craft { card: 0 },
            Action::EndPhase,
        ];
        assert_eq!(count_kind(&actions, ActionKind::Craft), 2);
        assert_eq!(count_kind(&actions, ActionKind::EndPhase), 1);
        assert_eq!(count_kind(&actions, ActionKind::Battle), 0);
    }

    #[test]
    fn decree_order_is_recruit_move_battle_build() {
        let idx: Vec<u8> = DECREE_ORDER.iter().map(|o| *o as u8).collect();
        assert_eq!(idx, vec![0, 1, 2, 3]);
    }
}
