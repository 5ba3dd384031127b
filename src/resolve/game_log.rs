//! Append-only action log.
//!
//! One entry per round, each holding the acting faction and an action list
//! per phase. Legality checks only ever read the current round and phase.

use crate::board::{Action, FactionName};

use super::phase::{TurnPhase, PHASE_COUNT};

/// Everything one faction did during one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundEntry {
    pub faction: FactionName,
    phases: [Vec<Action>; PHASE_COUNT],
}

impl RoundEntry {
    fn new(faction: FactionName) -> Self {
        RoundEntry {
            faction,
            phases: Default::default(),
        }
    }

    pub fn actions(&self, phase: TurnPhase) -> &[Action] {
        &self.phases[phase as usize]
    }
}

/// The game log, indexed by round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameLog {
    rounds: Vec<RoundEntry>,
}

impl GameLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `action` to `round`/`phase`, opening the round entry if needed.
    ///
    /// Rounds are opened in order; logging to a round beyond the next one
    /// opens the skipped rounds for the same faction.
    pub fn log_action(&mut self, round: usize, faction: FactionName, phase: TurnPhase, action: Action) {
        while self.rounds.len() <= round {
            self.rounds.push(RoundEntry::new(faction));
        }
        self.rounds[round].phases[phase as usize].push(action);
    }

    /// Actions taken in `round`/`phase`; empty if nothing was logged there.
    pub fn actions_for(&self, round: usize, phase: TurnPhase) -> &[Action] {
        self.rounds.get(round).map_or(&[], |r| r.actions(phase))
    }

    pub fn round(&self, round: usize) -> Option<&RoundEntry> {
        self.rounds.get(round)
    }

    /// Number of rounds with at least one logged action.
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_log_returns_no_actions() {
        let log = GameLog::new();
        assert!(log.actions_for(0, TurnPhase::Birdsong).is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn actions_are_scoped_by_round_and_phase() {
        let mut log = GameLog::new();
        log.log_action(0, FactionName::MarquiseDeCat, TurnPhase::Birdsong, Action::AddWood);
        log.log_action(0, FactionName::MarquiseDeCat, TurnPhase::Birdsong, Action::EndPhase);
        log.log_action(0, FactionName::MarquiseDeCat, TurnPhase::Daylight, Action::RecruitAtRecruiters);
        log.log_action(1, FactionName::EyrieDynasties, TurnPhase::Birdsong, Action::Turmoil);

        assert_eq!(log.actions_for(0, TurnPhase::Birdsong), &[Action::AddWood, Action::EndPhase]);
        assert_eq!(log.actions_for(0, TurnPhase::Daylight), &[Action::RecruitAtRecruiters]);
        assert!(log.actions_for(0, TurnPhase::Evening).is_empty());
        assert_eq!(log.actions_for(1, TurnPhase::Birdsong), &[Action::Turmoil]);
        assert_eq!(log.round(1).map(|r| r.faction), Some(FactionName::EyrieDynasties));
        assert_eq!(log.len(), 2);
    }
}
