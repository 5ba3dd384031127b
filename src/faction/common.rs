//! Rules shared by every faction: the evening draw/discard sequence and
//! crafting against a faction's crafting buildings.

use std::collections::BTreeMap;

use crate::board::{count_kind, Action, ActionKind, Board, BuildingType, ClearingId, Suit, CLEARING_SUITS};
use crate::cards::{CardKind, CraftCost};
use crate::error::EngineError;
use crate::player::{Player, MAX_HAND_SIZE};

use super::TurnContext;

const CRAFT_SUITS: [Suit; 3] = [Suit::Fox, Suit::Rabbit, Suit::Mouse];

/// Evening legality: one draw of exactly `draw_count`, then discards down to
/// the hand limit, then end.
pub fn is_evening_action_legal(
    action: &Action,
    player: &Player,
    actions_taken: &[Action],
    draw_count: usize,
) -> bool {
    let drawn = count_kind(actions_taken, ActionKind::Draw) > 0;
    match action {
        Action::Draw { count } => !drawn && *count == draw_count,
        Action::Discard { cards } => {
            if !drawn || player.hand.len() <= MAX_HAND_SIZE {
                return false;
            }
            let mut sorted = cards.clone();
            sorted.sort_unstable();
            sorted.dedup();
            sorted.len() == cards.len()
                && cards.iter().all(|i| player.has_card(*i))
                && player.hand.len() - cards.len() == MAX_HAND_SIZE
        }
        Action::EndPhase => drawn && player.hand.len() <= MAX_HAND_SIZE,
        _ => false,
    }
}

/// Draws `count` cards into the player's hand.
pub fn apply_draw(ctx: &mut TurnContext<'_>, count: usize) -> Result<(), EngineError> {
    let cards = ctx.deck.draw(count)?;
    ctx.player.hand.extend(cards);
    Ok(())
}

/// Moves the given hand cards to the discard pile.
pub fn apply_discard(ctx: &mut TurnContext<'_>, indices: &[usize]) {
    for card in ctx.player.take_cards(indices) {
        ctx.deck.discard(card);
    }
}

/// Crafting happens only at the start of a phase: a craft is legal while
/// every earlier action in the phase was also a craft.
pub fn craft_window_open(actions_taken: &[Action]) -> bool {
    actions_taken.iter().all(|a| matches!(a, Action::Craft { .. }))
}

/// Unused crafting pieces per clearing suit. Bird is always zero.
fn unused_by_suit(unused: &BTreeMap<ClearingId, usize>) -> [usize; 4] {
    let mut by_suit = [0usize; 4];
    for (&clearing, &n) in unused {
        by_suit[CLEARING_SUITS[clearing] as usize] += n;
    }
    by_suit
}

/// Whether `cost` can be paid from `unused` pieces. Suited requirements
/// need pieces in clearings of that suit; wild requirements take any
/// leftover piece.
pub fn can_pay_craft_cost(cost: CraftCost, unused: &BTreeMap<ClearingId, usize>) -> bool {
    let available = unused_by_suit(unused);
    let mut leftover = 0usize;
    for suit in CRAFT_SUITS {
        let need = usize::from(cost.count(suit));
        let have = available[suit as usize];
        if have < need {
            return false;
        }
        leftover += have - need;
    }
    usize::from(cost.wild()) <= leftover
}

/// Whether the card at `index` can be crafted with `building_type`.
pub fn can_craft(player: &Player, board: &Board, index: usize, building_type: BuildingType) -> bool {
    let Some(cost) = player.card(index).and_then(|c| c.crafting_cost()) else {
        return false;
    };
    can_pay_craft_cost(cost, &board.get_unused_buildings_of_type(building_type))
}

/// Exhausts crafting pieces for `cost`: suited requirements first, then the
/// wild remainder from whatever is left in clearing order.
fn exhaust_for_cost(board: &mut Board, cost: CraftCost, building_type: BuildingType) {
    for suit in CRAFT_SUITS {
        let mut need = usize::from(cost.count(suit));
        for (clearing, _) in board.get_unused_buildings_of_type(building_type) {
            if need == 0 {
                break;
            }
            if CLEARING_SUITS[clearing] == suit {
                need -= board.mark_buildings_used(clearing, building_type, need);
            }
        }
    }
    let mut wild = usize::from(cost.wild());
    for (clearing, _) in board.get_unused_buildings_of_type(building_type) {
        if wild == 0 {
            break;
        }
        wild -= board.mark_buildings_used(clearing, building_type, wild);
    }
}

/// Crafts the card at `index`: exhausts pieces, then resolves the card.
///
/// Items go to the player and score `item_vp` (the card's printed value when
/// None). Persistent effects stay in front of the player; everything else is
/// discarded.
pub fn apply_craft(
    ctx: &mut TurnContext<'_>,
    index: usize,
    building_type: BuildingType,
    item_vp: Option<u32>,
) {
    let Some(card) = ctx.player.take_card(index) else {
        return;
    };
    let Some(cost) = card.crafting_cost() else {
        ctx.deck.discard(card);
        return;
    };
    exhaust_for_cost(ctx.board, cost, building_type);
    log::trace!("exhausted {} {} for craft", cost.total(), building_type.name());

    match card.kind {
        CardKind::Item { item, vp, .. } => {
            let scored = item_vp.unwrap_or(vp);
            ctx.player.crafted_items.push(item);
            ctx.player.score += scored;
            log::debug!(
                "{:?} crafted {:?} for {} vp",
                ctx.player.faction,
                item,
                scored
            );
            ctx.deck.discard(card);
        }
        CardKind::Effect { persistent: true, .. } => ctx.player.effects.push(card),
        _ => ctx.deck.discard(card),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{FactionName, Token};
    use crate::cards::{Card, Deck, Item};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const CAT: FactionName = FactionName::MarquiseDeCat;

    fn ambush(suit: Suit) -> Card {
        Card::new(suit, CardKind::Ambush)
    }

    fn tea() -> Card {
        Card::new(
            Suit::Fox,
            CardKind::Item {
                item: Item::Tea,
                vp: 2,
                cost: CraftCost::from_suits(&[Suit::Mouse]),
            },
        )
    }

    #[test]
    fn evening_requires_draw_before_end() {
        let player = Player::new(CAT);
        assert!(!is_evening_action_legal(&Action::EndPhase, &player, &[], 1));
        assert!(is_evening_action_legal(&Action::Draw { count: 1 }, &player, &[], 1));
        assert!(!is_evening_action_legal(&Action::Draw { count: 2 }, &player, &[], 1));

        let taken = [Action::Draw { count: 1 }];
        assert!(is_evening_action_legal(&Action::EndPhase, &player, &taken, 1));
        assert!(!is_evening_action_legal(&Action::Draw { count: 1 }, &player, &taken, 1));
    }

    #[test]
    fn discard_must_land_exactly_on_hand_limit() {
        let mut player = Player::new(CAT);
        player.hand = vec![ambush(Suit::Fox); 7];
        let taken = [Action::Draw { count: 1 }];

        assert!(!is_evening_action_legal(&Action::EndPhase, &player, &taken, 1));
        assert!(!is_evening_action_legal(&Action::Discard { cards: vec![0] }, &player, &taken, 1));
        assert!(!is_evening_action_legal(&Action::Discard { cards: vec![0, 0] }, &player, &taken, 1));
        assert!(!is_evening_action_legal(&Action::Discard { cards: vec![0, 9] }, &player, &taken, 1));
        assert!(is_evening_action_legal(&Action::Discard { cards: vec![6, 2] }, &player, &taken, 1));
    }

    #[test]
    fn craft_window_closes_after_other_action() {
        assert!(craft_window_open(&[]));
        assert!(craft_window_open(&[Action::Craft { card: 0 }]));
        assert!(!craft_window_open(&[Action::Craft { card: 0 }, Action::EndPhase]));
        assert!(!craft_window_open(&[Action::RecruitAtRecruiters]));
    }

    #[test]
    fn suited_cost_needs_matching_clearing() {
        let mut unused = BTreeMap::new();
        // clearing 0 is fox, 2 is mouse
        unused.insert(0, 1);
        let mouse = CraftCost::from_suits(&[Suit::Mouse]);
        assert!(!can_pay_craft_cost(mouse, &unused));
        unused.insert(2, 1);
        assert!(can_pay_craft_cost(mouse, &unused));
    }

    #[test]
    fn wild_cost_uses_leftovers() {
        let mut unused = BTreeMap::new();
        unused.insert(0, 2);
        let fox_and_wild = CraftCost::from_suits(&[Suit::Fox, Suit::Bird]);
        assert!(can_pay_craft_cost(fox_and_wild, &unused));
        let fox_and_two_wild = CraftCost::from_suits(&[Suit::Fox, Suit::Bird, Suit::Bird]);
        assert!(!can_pay_craft_cost(fox_and_two_wild, &unused));
    }

    #[test]
    fn crafting_item_scores_and_exhausts_workshop() {
        let mut board = Board::new();
        board.add_warriors(CAT, 1, 2);
        assert!(board.build(2, BuildingType::Workshop, CAT));
        let mut player = Player::new(CAT);
        player.hand = vec![tea()];
        let mut deck = Deck::from_cards(Vec::new());
        let mut rng = SmallRng::seed_from_u64(0);

        assert!(can_craft(&player, &board, 0, BuildingType::Workshop));
        let mut ctx = TurnContext {
            board: &mut board,
            player: &mut player,
            deck: &mut deck,
            rng: &mut rng,
        };
        apply_craft(&mut ctx, 0, BuildingType::Workshop, None);

        assert_eq!(player.score, 2);
        assert_eq!(player.crafted_items, vec![Item::Tea]);
        assert!(player.hand.is_empty());
        assert_eq!(deck.discard_pile().len(), 1);
        assert!(board.get_unused_buildings_of_type(BuildingType::Workshop).is_empty());
        assert_eq!(board.count_tokens(CAT, Token::Wood), 0);
    }

    #[test]
    fn item_vp_override_replaces_printed_value() {
        let mut board = Board::new();
        board.add_warriors(CAT, 1, 2);
        board.build(2, BuildingType::Workshop, CAT);
        let mut player = Player::new(CAT);
        player.hand = vec![tea()];
        let mut deck = Deck::default();
        let mut rng = SmallRng::seed_from_u64(0);
        let mut ctx = TurnContext {
            board: &mut board,
            player: &mut player,
            deck: &mut deck,
            rng: &mut rng,
        };
        apply_craft(&mut ctx, 0, BuildingType::Workshop, Some(1));
        assert_eq!(player.score, 1);
    }
}
