//! Marquise de Cat: wood economy, buildings and a three-action daylight.

use crate::board::{
    count_kind, Action, ActionKind, Board, BuildingType, ClearingId, FactionName, Token,
    CLEARING_COUNT,
};
use crate::error::EngineError;
use crate::player::Player;
use crate::resolve::TurnPhase;

use super::common::{
    apply_craft, apply_discard, apply_draw, can_craft, craft_window_open, is_evening_action_legal,
};
use super::{Faction, FactionStatus, TurnContext};

const CAT: FactionName = FactionName::MarquiseDeCat;

pub const WARRIOR_LIMIT: u32 = 25;
pub const BUILDING_LIMIT: usize = 6;
pub const WOOD_LIMIT: usize = 8;
/// Major actions per daylight before extra actions.
pub const TURN_ACTION_LIMIT: u32 = 3;
/// Wood cost of the next building, indexed by buildings of that type already placed.
pub const BUILDING_COST: [usize; BUILDING_LIMIT] = [0, 1, 2, 3, 3, 4];

pub const KEEP_CLEARING: ClearingId = 0;
pub const STARTING_WORKSHOP: ClearingId = 4;
pub const STARTING_SAWMILL: ClearingId = 3;
pub const STARTING_RECRUITER: ClearingId = 1;
/// The corner opposite the keep starts empty.
pub const EMPTY_CORNER: ClearingId = 11;

const BIRDSONG_KINDS: [ActionKind; 2] = [ActionKind::AddWood, ActionKind::EndPhase];
const DAYLIGHT_KINDS: [ActionKind; 8] = [
    ActionKind::Craft,
    ActionKind::Battle,
    ActionKind::March,
    ActionKind::RecruitAtRecruiters,
    ActionKind::Build,
    ActionKind::Overwork,
    ActionKind::ExtraAction,
    ActionKind::EndPhase,
];
const EVENING_KINDS: [ActionKind; 3] = [ActionKind::Draw, ActionKind::Discard, ActionKind::EndPhase];

/// Actions that spend the daylight budget.
fn is_major(action: &Action) -> bool {
    matches!(
        action,
        Action::Battle { .. }
            | Action::March { .. }
            | Action::RecruitAtRecruiters
            | Action::Build { .. }
            | Action::Overwork { .. }
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarquiseDeCat {
    sawmills_placed: usize,
    workshops_placed: usize,
    recruiters_placed: usize,
    extra_actions: u32,
}

impl Default for MarquiseDeCat {
    fn default() -> Self {
        Self::new()
    }
}

impl MarquiseDeCat {
    pub fn new() -> Self {
        MarquiseDeCat {
            sawmills_placed: 0,
            workshops_placed: 0,
            recruiters_placed: 0,
            extra_actions: 0,
        }
    }

    /// Buildings of `building_type` placed so far, or None if the Marquise cannot build it.
    pub fn placed(&self, building_type: BuildingType) -> Option<usize> {
        match building_type {
            BuildingType::Sawmill => Some(self.sawmills_placed),
            BuildingType::Workshop => Some(self.workshops_placed),
            BuildingType::Recruiter => Some(self.recruiters_placed),
            BuildingType::Roost => None,
        }
    }

    fn placed_mut(&mut self, building_type: BuildingType) -> Option<&mut usize> {
        match building_type {
            BuildingType::Sawmill => Some(&mut self.sawmills_placed),
            BuildingType::Workshop => Some(&mut self.workshops_placed),
            BuildingType::Recruiter => Some(&mut self.recruiters_placed),
            BuildingType::Roost => None,
        }
    }

    pub fn extra_actions(&self) -> u32 {
        self.extra_actions
    }

    /// Daylight budget for this turn.
    pub fn action_limit(&self) -> u32 {
        TURN_ACTION_LIMIT + self.extra_actions
    }

    /// Wood cost of the next `building_type`, or None at the cap.
    pub fn building_cost(&self, building_type: BuildingType) -> Option<usize> {
        self.placed(building_type)
            .and_then(|placed| BUILDING_COST.get(placed).copied())
    }

    /// Cards drawn in evening.
    pub fn draw_count(&self) -> usize {
        let bonus = match self.recruiters_placed {
            0..=2 => 0,
            3 | 4 => 1,
            _ => 2,
        };
        1 + bonus
    }

    fn warriors_in_supply(board: &Board) -> u32 {
        WARRIOR_LIMIT.saturating_sub(board.total_warriors(CAT))
    }

    fn can_build(&self, board: &Board, clearing: ClearingId, building: BuildingType) -> bool {
        let Some(cost) = self.building_cost(building) else {
            return false;
        };
        let Some(c) = board.clearing(clearing) else {
            return false;
        };
        board.rules(CAT, clearing) && c.has_free_slot() && board.wood_available(CAT, clearing) >= cost
    }

    fn can_overwork(&self, player: &Player, board: &Board, clearing: ClearingId, card: usize) -> bool {
        let Some(c) = board.clearing(clearing) else {
            return false;
        };
        let Some(card) = player.card(card) else {
            return false;
        };
        card.suit.matches(c.suit)
            && c.has_building(CAT, BuildingType::Sawmill)
            && board.count_tokens(CAT, Token::Wood) < WOOD_LIMIT
    }

    fn is_daylight_action_legal(
        &self,
        action: &Action,
        player: &Player,
        board: &Board,
        actions_taken: &[Action],
    ) -> bool {
        let majors = actions_taken.iter().filter(|a| is_major(a)).count();
        let budget_left = (majors as u32) < self.action_limit();

        match action {
            Action::EndPhase => true,
            Action::Craft { card } => {
                craft_window_open(actions_taken) && can_craft(player, board, *card, BuildingType::Workshop)
            }
            Action::ExtraAction { card } => player.card(*card).is_some_and(|c| c.is_bird()),
            _ if !budget_left => false,
            Action::Battle { clearing, defender } => board.can_battle(CAT, *defender, *clearing),
            Action::March { first, second } => board.can_move_twice(CAT, *first, *second),
            Action::RecruitAtRecruiters => {
                count_kind(actions_taken, ActionKind::RecruitAtRecruiters) == 0
                    && board.buildings_of(CAT, BuildingType::Recruiter) > 0
                    && Self::warriors_in_supply(board) > 0
            }
            Action::Build { clearing, building } => self.can_build(board, *clearing, *building),
            Action::Overwork { clearing, card } => self.can_overwork(player, board, *clearing, *card),
            _ => false,
        }
    }

    fn add_wood(board: &mut Board) {
        for clearing in board.clearings_with_building(CAT, BuildingType::Sawmill) {
            if board.count_tokens(CAT, Token::Wood) >= WOOD_LIMIT {
                break;
            }
            board.add_token(CAT, Token::Wood, clearing);
            board.mark_buildings_used(clearing, BuildingType::Sawmill, 1);
        }
    }

    fn recruit(board: &mut Board) {
        for clearing in board.clearings_with_building(CAT, BuildingType::Recruiter) {
            if Self::warriors_in_supply(board) == 0 {
                break;
            }
            board.add_warriors(CAT, 1, clearing);
        }
    }
}

impl Faction for MarquiseDeCat {
    fn name(&self) -> FactionName {
        CAT
    }

    fn board_setup(&mut self, board: &mut Board) {
        board.add_token(CAT, Token::Keep, KEEP_CLEARING);
        for clearing in 0..CLEARING_COUNT {
            if clearing != EMPTY_CORNER {
                board.add_warriors(CAT, 1, clearing);
            }
        }
        for (clearing, building) in [
            (STARTING_WORKSHOP, BuildingType::Workshop),
            (STARTING_SAWMILL, BuildingType::Sawmill),
            (STARTING_RECRUITER, BuildingType::Recruiter),
        ] {
            if board.build(clearing, building, CAT) {
                if let Some(placed) = self.placed_mut(building) {
                    *placed += 1;
                }
            }
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
            TurnPhase::Birdsong => {
                let has_sawmill = board.buildings_of(CAT, BuildingType::Sawmill) > 0;
                let added = count_kind(actions_taken, ActionKind::AddWood) > 0;
                match action {
                    Action::AddWood => has_sawmill && !added,
                    Action::EndPhase => added || !has_sawmill,
                    _ => false,
                }
            }
            TurnPhase::Daylight => self.is_daylight_action_legal(action, player, board, actions_taken),
            TurnPhase::Evening => is_evening_action_legal(action, player, actions_taken, self.draw_count()),
        }
    }

    fn apply_action(&mut self, action: &Action, ctx: &mut TurnContext<'_>) -> Result<(), EngineError> {
        match action {
            Action::AddWood => Self::add_wood(ctx.board),
            Action::Craft { card } => apply_craft(ctx, *card, BuildingType::Workshop, None),
            Action::Battle { clearing, defender } => {
                let outcome = ctx.board.battle(CAT, *defender, *clearing, &mut *ctx.rng);
                log::debug!(
                    "marquise battles {:?} in {}: rolls {:?}, dealt {}, took {}",
                    defender,
                    clearing,
                    outcome.rolls,
                    outcome.attacker_hits,
                    outcome.defender_hits
                );
            }
            Action::March { first, second } => {
                ctx.board.move_warriors(CAT, first.count, first.from, first.to);
                ctx.board.move_warriors(CAT, second.count, second.from, second.to);
            }
            Action::RecruitAtRecruiters => Self::recruit(ctx.board),
            Action::Build { clearing, building } => {
                let cost = self.building_cost(*building).unwrap_or(0);
                let spent = ctx.board.spend_wood(CAT, *clearing, cost);
                if ctx.board.build(*clearing, *building, CAT) {
                    if let Some(placed) = self.placed_mut(*building) {
                        *placed += 1;
                    }
                }
                log::debug!("marquise built {} in {} for {} wood", building.name(), clearing, spent);
            }
            Action::Overwork { clearing, card } => {
                if let Some(card) = ctx.player.take_card(*card) {
                    ctx.deck.discard(card);
                }
                ctx.board.add_token(CAT, Token::Wood, *clearing);
            }
            Action::ExtraAction { card } => {
                if let Some(card) = ctx.player.take_card(*card) {
                    ctx.deck.discard(card);
                }
                self.extra_actions += 1;
            }
            Action::Draw { count } => apply_draw(ctx, *count)?,
            Action::Discard { cards } => apply_discard(ctx, cards),
            Action::EndPhase => {}
            Action::Move(_)
            | Action::Recruit { .. }
            | Action::AddToDecree { .. }
            | Action::Turmoil => {}
        }
        Ok(())
    }

    fn reset_state(&mut self) {
        self.extra_actions = 0;
    }

    fn pre_birdsong_actions(&self, _player: &Player, board: &Board) -> Vec<Action> {
        if board.buildings_of(CAT, BuildingType::Sawmill) > 0 {
            vec![Action::AddWood, Action::EndPhase]
        } else {
            vec![Action::EndPhase]
        }
    }

    fn pre_evening_actions(&self, _player: &Player, _board: &Board) -> Vec<Action> {
        vec![Action::Draw {
            count: self.draw_count(),
        }]
    }

    fn status(&self, board: &Board) -> FactionStatus {
        FactionStatus {
            faction: CAT,
            warriors_in_supply: Self::warriors_in_supply(board),
            buildings_placed: vec![
                (BuildingType::Sawmill, self.sawmills_placed),
                (BuildingType::Workshop, self.workshops_placed),
                (BuildingType::Recruiter, self.recruiters_placed),
            ],
            extra_actions: self.extra_actions,
            leader: None,
            decree: Vec::new(),
        }
    }
}
