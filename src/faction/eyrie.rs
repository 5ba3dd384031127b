//! Eyrie Dynasties: a decree that grows every birdsong and must be carried
//! out in full each daylight, or the dynasty falls into turmoil.

use rand::seq::SliceRandom;

use crate::board::{
    count_kind, Action, ActionKind, Board, BuildingType, ClearingId, DecreeOption, FactionName, Move,
    Suit,
};
use crate::error::EngineError;
use crate::player::Player;
use crate::resolve::TurnPhase;

use super::common::{
    apply_craft, apply_discard, apply_draw, can_craft, craft_window_open, is_evening_action_legal,
};
use super::decree::{Decree, Leader, ALL_LEADERS};
use super::{Faction, FactionStatus, TurnContext};

const EYRIE: FactionName = FactionName::EyrieDynasties;

pub const WARRIOR_LIMIT: u32 = 20;
pub const ROOST_LIMIT: usize = 7;
pub const STARTING_CLEARING: ClearingId = 11;
pub const STARTING_WARRIORS: u32 = 6;
/// Cards added to the decree per birdsong.
pub const MAX_DECREE_ADDS: usize = 2;
/// Crafted items score this much regardless of the card.
pub const ITEM_VP: u32 = 1;

const BIRDSONG_KINDS: [ActionKind; 3] = [ActionKind::Draw, ActionKind::AddToDecree, ActionKind::EndPhase];
const DAYLIGHT_KINDS: [ActionKind; 7] = [
    ActionKind::Craft,
    ActionKind::Recruit,
    ActionKind::Move,
    ActionKind::Battle,
    ActionKind::Build,
    ActionKind::Turmoil,
    ActionKind::EndPhase,
];
const EVENING_KINDS: [ActionKind; 3] = [ActionKind::Draw, ActionKind::Discard, ActionKind::EndPhase];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EyrieDynasties {
    leader: Leader,
    /// Leaders deposed since the last reset, current one excluded.
    used_leaders: Vec<Leader>,
    decree: Decree,
    roosts_placed: usize,
    /// A bird card went into the decree this birdsong.
    bird_added: bool,
}

impl EyrieDynasties {
    pub fn new(leader: Leader) -> Self {
        EyrieDynasties {
            leader,
            used_leaders: Vec::new(),
            decree: Decree::for_leader(leader),
            roosts_placed: 0,
            bird_added: false,
        }
    }

    pub fn leader(&self) -> Leader {
        self.leader
    }

    pub fn decree(&self) -> &Decree {
        &self.decree
    }

    pub fn roosts_placed(&self) -> usize {
        self.roosts_placed
    }

    /// Cards drawn in evening.
    pub fn draw_count(&self) -> usize {
        let bonus = match self.roosts_placed {
            0..=2 => 0,
            3..=5 => 1,
            _ => 2,
        };
        1 + bonus
    }

    fn warriors_in_supply(board: &Board) -> u32 {
        WARRIOR_LIMIT.saturating_sub(board.total_warriors(EYRIE))
    }

    fn suit_of(board: &Board, clearing: ClearingId) -> Option<Suit> {
        board.clearing(clearing).map(|c| c.suit)
    }

    fn is_birdsong_action_legal(&self, action: &Action, player: &Player, actions_taken: &[Action]) -> bool {
        let added = count_kind(actions_taken, ActionKind::AddToDecree);
        match action {
            Action::Draw { count } => {
                player.hand.is_empty() && *count == 1 && count_kind(actions_taken, ActionKind::Draw) == 0
            }
            Action::AddToDecree { card, .. } => {
                let Some(card) = player.card(*card) else {
                    return false;
                };
                added < MAX_DECREE_ADDS && !(card.is_bird() && self.bird_added)
            }
            Action::EndPhase => added > 0,
            _ => false,
        }
    }

    /// Whether the decree can carry out `action` now.
    fn can_resolve(&self, action: &Action, board: &Board) -> bool {
        let Some(option) = action.decree_option() else {
            return false;
        };
        if self.decree.current_column() != Some(option) {
            return false;
        }
        let clearing = match action {
            Action::Recruit { clearing } => *clearing,
            Action::Move(Move { from, .. }) => *from,
            Action::Battle { clearing, .. } => *clearing,
            Action::Build { clearing, .. } => *clearing,
            _ => return false,
        };
        let Some(suit) = Self::suit_of(board, clearing) else {
            return false;
        };
        if !self.decree.can_resolve(option, suit) {
            return false;
        }

        match action {
            Action::Recruit { clearing } => {
                board
                    .clearing(*clearing)
                    .is_some_and(|c| c.has_building(EYRIE, BuildingType::Roost))
                    && Self::warriors_in_supply(board) > 0
            }
            Action::Move(m) => board.can_move(EYRIE, m.count, m.from, m.to),
            Action::Battle { clearing, defender } => board.can_battle(EYRIE, *defender, *clearing),
            Action::Build { clearing, building } => {
                *building == BuildingType::Roost
                    && self.roosts_placed < ROOST_LIMIT
                    && board.rules(EYRIE, *clearing)
                    && board.clearing(*clearing).is_some_and(|c| {
                        c.has_free_slot() && !c.has_building(EYRIE, BuildingType::Roost)
                    })
            }
            _ => false,
        }
    }

    fn is_daylight_action_legal(
        &self,
        action: &Action,
        player: &Player,
        board: &Board,
        actions_taken: &[Action],
    ) -> bool {
        if count_kind(actions_taken, ActionKind::Turmoil) > 0 {
            return matches!(action, Action::EndPhase);
        }
        match action {
            Action::Craft { card } => {
                craft_window_open(actions_taken) && can_craft(player, board, *card, BuildingType::Roost)
            }
            Action::Turmoil => self.decree.current_column().is_some(),
            Action::EndPhase => self.decree.current_column().is_none(),
            _ => self.can_resolve(action, board),
        }
    }

    /// Marks the decree entry spent by a resolved action.
    fn spend_decree(&mut self, option: DecreeOption, board: &Board, clearing: ClearingId) {
        if let Some(suit) = Self::suit_of(board, clearing) {
            self.decree.resolve(option, suit);
        }
    }

    fn turmoil(&mut self, ctx: &mut TurnContext<'_>) {
        let birds = self.decree.bird_count() as u32;
        ctx.player.score = ctx.player.score.saturating_sub(birds);
        for card in self.decree.purge() {
            ctx.deck.discard(card);
        }

        self.used_leaders.push(self.leader);
        if self.used_leaders.len() >= ALL_LEADERS.len() {
            self.used_leaders.clear();
        }
        let candidates: Vec<Leader> = ALL_LEADERS
            .into_iter()
            .filter(|l| !self.used_leaders.contains(l))
            .collect();
        let deposed = self.leader;
        if let Some(next) = candidates.choose(&mut *ctx.rng) {
            self.leader = *next;
        }
        self.decree.seed_viziers(self.leader);
        log::info!(
            "eyrie turmoil: lost {} vp, {:?} deposed, {:?} takes over",
            birds,
            deposed,
            self.leader
        );
    }
}

impl Faction for EyrieDynasties {
    fn name(&self) -> FactionName {
        EYRIE
    }

    fn board_setup(&mut self, board: &mut Board) {
        board.add_warriors(EYRIE, STARTING_WARRIORS, STARTING_CLEARING);
        if board.build(STARTING_CLEARING, BuildingType::Roost, EYRIE) {
            self.roosts_placed += 1;
        }
    }

    fn legal_action_kinds(&self, phase: TurnPhase) -> Vec<ActionKind> {
        match phase {
            TurnPhase::Birdsong => BIRDSONG_KINDS.to_vec(),
            TurnPhase::Daylight => DAYLIGHT_KINDS.to_vec(),
            TurnPhase::Evening => EVENING_KINDS.to_vec(),
        }
    }

    fn is_action_legal(
        &self,
        action: &Action,
        phase: TurnPhase,
        player: &Player,
        board: &Board,
        actions_taken: &[Action],
    ) -> bool {
        match phase {
            TurnPhase::Birdsong => self.is_birdsong_action_legal(action, player, actions_taken),
            TurnPhase::Daylight => self.is_daylight_action_legal(action, player, board, actions_taken),
            TurnPhase::Evening => is_evening_action_legal(action, player, actions_taken, self.draw_count()),
        }
    }

    fn apply_action(&mut self, action: &Action, ctx: &mut TurnContext<'_>) -> Result<(), EngineError> {
        match action {
            Action::AddToDecree { card, option } => {
                if let Some(card) = ctx.player.take_card(*card) {
                    self.bird_added |= card.is_bird();
                    log::debug!("eyrie adds a {} card to {:?}", card.suit.name(), option);
                    self.decree.add(*option, card);
                }
            }
            Action::Craft { card } => apply_craft(ctx, *card, BuildingType::Roost, Some(ITEM_VP)),
            Action::Recruit { clearing } => {
                ctx.board.add_warriors(EYRIE, 1, *clearing);
                self.spend_decree(DecreeOption::Recruit, ctx.board, *clearing);
            }
            Action::Move(m) => {
                // suit is judged where the move starts
                self.spend_decree(DecreeOption::Move, ctx.board, m.from);
                ctx.board.move_warriors(EYRIE, m.count, m.from, m.to);
            }
            Action::Battle { clearing, defender } => {
                let outcome = ctx.board.battle(EYRIE, *defender, *clearing, &mut *ctx.rng);
                log::debug!(
                    "eyrie battles {:?} in {}: rolls {:?}, dealt {}, took {}",
                    defender,
                    clearing,
                    outcome.rolls,
                    outcome.attacker_hits,
                    outcome.defender_hits
                );
                self.spend_decree(DecreeOption::Battle, ctx.board, *clearing);
            }
            Action::Build { clearing, .. } => {
                if ctx.board.build(*clearing, BuildingType::Roost, EYRIE) {
                    self.roosts_placed += 1;
                }
                self.spend_decree(DecreeOption::Build, ctx.board, *clearing);
            }
            Action::Turmoil => self.turmoil(ctx),
            Action::Draw { count } => apply_draw(ctx, *count)?,
            Action::Discard { cards } => apply_discard(ctx, cards),
            Action::EndPhase => {}
            Action::AddWood
            | Action::March { .. }
            | Action::RecruitAtRecruiters
            | Action::Overwork { .. }
            | Action::ExtraAction { .. } => {}
        }
        Ok(())
    }

    fn reset_state(&mut self) {
        self.decree.reset_progress();
        self.bird_added = false;
    }

    fn pre_birdsong_actions(&self, player: &Player, _board: &Board) -> Vec<Action> {
        if player.hand.is_empty() {
            vec![Action::Draw { count: 1 }]
        } else {
            Vec::new()
        }
    }

    fn pre_evening_actions(&self, _player: &Player, _board: &Board) -> Vec<Action> {
        vec![Action::Draw {
            count: self.draw_count(),
        }]
    }

    fn status(&self, board: &Board) -> FactionStatus {
        FactionStatus {
            faction: EYRIE,
            warriors_in_supply: Self::warriors_in_supply(board),
            buildings_placed: vec![(BuildingType::Roost, self.roosts_placed)],
            extra_actions: 0,
            leader: Some(self.leader),
            decree: self.decree.suits(),
        }
    }
}
