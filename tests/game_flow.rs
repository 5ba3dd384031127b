//! Full turns driven through the public `GameState` API.

use rootgame::board::{Action, ActionKind, BuildingType, DecreeOption, FactionName, Move, Suit, Token};
use rootgame::faction::Leader;
use rootgame::resolve::TurnPhase;
use rootgame::{EngineError, GameConfig, GameState};

const CAT: FactionName = FactionName::MarquiseDeCat;
const EYRIE: FactionName = FactionName::EyrieDynasties;

fn new_game(seed: u64) -> GameState {
    GameState::new_game(GameConfig {
        seed,
        eyrie_leader: Some(Leader::Builder),
        ..GameConfig::default()
    })
    .unwrap()
}

fn apply_all(game: &mut GameState, actions: &[Action]) {
    for action in actions {
        game.apply_action(action.clone()).unwrap();
    }
}

/// Plays the Marquise's opening turn: build, recruit, march, then evening.
fn play_marquise_turn(game: &mut GameState) {
    assert_eq!(game.active_faction(), CAT);
    assert_eq!(game.phase(), TurnPhase::Daylight);
    apply_all(
        game,
        &[
            Action::Build {
                clearing: 0,
                building: BuildingType::Sawmill,
            },
            Action::RecruitAtRecruiters,
            Action::March {
                first: Move::new(1, 5, 6),
                second: Move::new(1, 6, 7),
            },
            Action::EndPhase,
        ],
    );
    assert_eq!(game.phase(), TurnPhase::Evening);
    let hand = game.player(CAT).map(|p| p.hand.len()).unwrap_or(0);
    if hand > 5 {
        let extra: Vec<usize> = (0..hand - 5).collect();
        game.apply_action(Action::Discard { cards: extra }).unwrap();
    }
    game.apply_action(Action::EndPhase).unwrap();
}

#[test]
fn marquise_opening_turn() {
    let mut game = new_game(11);
    assert_eq!(game.board().count_tokens(CAT, Token::Wood), 1);

    play_marquise_turn(&mut game);

    let board = game.board();
    assert_eq!(board.buildings_of(CAT, BuildingType::Sawmill), 2);
    assert_eq!(board.count_tokens(CAT, Token::Wood), 0);
    assert_eq!(board.warriors(CAT, 1), 2);
    assert_eq!(board.warriors(CAT, 5), 0);
    assert_eq!(board.warriors(CAT, 7), 2);
    assert_eq!(game.round(), 1);
    assert_eq!(game.active_faction(), EYRIE);
    assert_eq!(game.log().round(0).map(|r| r.actions(TurnPhase::Daylight).len()), Some(4));
}

#[test]
fn fourth_major_action_is_rejected_but_end_phase_is_not() {
    let mut game = new_game(3);
    apply_all(
        &mut game,
        &[
            Action::RecruitAtRecruiters,
            Action::March {
                first: Move::new(1, 0, 1),
                second: Move::new(1, 1, 2),
            },
            Action::March {
                first: Move::new(1, 2, 3),
                second: Move::new(1, 3, 5),
            },
        ],
    );

    let fourth = Action::March {
        first: Move::new(1, 4, 5),
        second: Move::new(1, 5, 6),
    };
    assert!(!game.is_action_legal(&fourth));
    assert!(matches!(
        game.apply_action(fourth),
        Err(EngineError::IllegalAction { .. })
    ));
    assert!(game.is_action_legal(&Action::EndPhase));
}

#[test]
fn march_legality_check_does_not_touch_board() {
    let game = new_game(5);
    let march = Action::March {
        first: Move::new(1, 0, 3),
        second: Move::new(2, 3, 5),
    };
    let before = game.board().clone();
    let first = game.is_action_legal(&march);
    let second = game.is_action_legal(&march);
    assert!(first);
    assert_eq!(first, second);
    assert_eq!(game.board(), &before);
}

#[test]
fn eyrie_turn_with_turmoil() {
    let mut game = new_game(11);
    play_marquise_turn(&mut game);

    assert_eq!(game.phase(), TurnPhase::Birdsong);
    assert!(game.legal_action_kinds().contains(&ActionKind::AddToDecree));
    assert!(!game.is_action_legal(&Action::EndPhase));

    apply_all(
        &mut game,
        &[
            Action::AddToDecree {
                card: 0,
                option: DecreeOption::Build,
            },
            Action::EndPhase,
        ],
    );
    assert_eq!(game.phase(), TurnPhase::Daylight);

    // Builder's viziers sit in recruit and move; move must wait for recruit
    let mv = Action::Move(Move::new(2, 11, 10));
    assert!(!game.is_action_legal(&mv));
    apply_all(&mut game, &[Action::Recruit { clearing: 11 }, mv]);
    assert_eq!(game.board().warriors(EYRIE, 11), 5);
    assert_eq!(game.board().warriors(EYRIE, 10), 2);

    assert!(!game.is_action_legal(&Action::Recruit { clearing: 11 }));
    apply_all(&mut game, &[Action::Turmoil]);
    let status = game.faction_status(EYRIE).unwrap();
    assert_ne!(status.leader, Some(Leader::Builder));
    assert_eq!(game.player(EYRIE).map(|p| p.score), Some(0));
    assert_eq!(game.legal_action_kinds().len(), 7);
    assert!(!game.is_action_legal(&Action::Turmoil));

    apply_all(&mut game, &[Action::EndPhase]);
    assert_eq!(game.phase(), TurnPhase::Evening);
    assert_eq!(game.actions_taken(), &[Action::Draw { count: 1 }]);
    apply_all(&mut game, &[Action::EndPhase]);

    assert_eq!(game.round(), 2);
    assert_eq!(game.active_faction(), CAT);
    // the Marquise's birdsong ran on its own again
    assert_eq!(game.phase(), TurnPhase::Daylight);
    assert_eq!(game.board().count_tokens(CAT, Token::Wood), 2);
}

#[test]
fn round_cleanup_clears_used_buildings() {
    let mut game = new_game(2);
    // both sawmill uses happen in birdsong
    assert!(game
        .board()
        .get_unused_buildings_of_type(BuildingType::Sawmill)
        .is_empty());
    apply_all(&mut game, &[Action::EndPhase]);
    apply_all(&mut game, &[Action::EndPhase]);

    assert_eq!(game.phase(), TurnPhase::Birdsong);
    assert_eq!(
        game.board()
            .get_unused_buildings_of_type(BuildingType::Sawmill)
            .get(&3),
        Some(&1)
    );
}

/// First seed whose opening hands give the Marquise a Bird card and the
/// Eyrie a card it can spend in its mouse start clearing.
fn seed_with_bird_and_mouse() -> (GameState, usize, usize) {
    (0..500)
        .find_map(|seed| {
            let game = new_game(seed);
            let bird = game.player(CAT)?.hand.iter().position(|c| c.is_bird())?;
            let mouse = game
                .player(EYRIE)?
                .hand
                .iter()
                .position(|c| matches!(c.suit, Suit::Mouse | Suit::Bird))?;
            Some((game, bird, mouse))
        })
        .unwrap()
}

#[test]
fn turn_counters_reset_when_the_turn_ends() {
    let (mut game, bird, mouse) = seed_with_bird_and_mouse();

    apply_all(&mut game, &[Action::ExtraAction { card: bird }]);
    assert_eq!(game.faction_status(CAT).unwrap().extra_actions, 1);
    apply_all(&mut game, &[Action::EndPhase]);
    assert_eq!(game.phase(), TurnPhase::Evening);
    apply_all(&mut game, &[Action::EndPhase]);
    assert_eq!(game.active_faction(), EYRIE);
    assert_eq!(game.faction_status(CAT).unwrap().extra_actions, 0);

    apply_all(
        &mut game,
        &[
            Action::AddToDecree {
                card: mouse,
                option: DecreeOption::Recruit,
            },
            Action::EndPhase,
            Action::Recruit { clearing: 11 },
            Action::Recruit { clearing: 11 },
            Action::Move(Move::new(1, 11, 10)),
        ],
    );
    let recruit = Action::Recruit { clearing: 11 };
    assert!(!game.is_action_legal(&recruit));
    assert!(game.is_action_legal(&Action::EndPhase));
    apply_all(&mut game, &[Action::EndPhase, Action::EndPhase]);

    // the Marquise passes its whole turn
    assert_eq!(game.active_faction(), CAT);
    apply_all(&mut game, &[Action::EndPhase, Action::EndPhase]);

    assert_eq!(game.active_faction(), EYRIE);
    apply_all(
        &mut game,
        &[
            Action::AddToDecree {
                card: 0,
                option: DecreeOption::Build,
            },
            Action::EndPhase,
        ],
    );
    assert_eq!(game.phase(), TurnPhase::Daylight);
    assert!(game.is_action_legal(&recruit));
}

#[test]
fn same_seed_same_game() {
    let a = new_game(99);
    let b = new_game(99);
    assert_eq!(a.player(CAT), b.player(CAT));
    assert_eq!(a.player(EYRIE), b.player(EYRIE));
    assert_eq!(a.deck_remaining(), b.deck_remaining());
}

#[test]
fn board_view_reflects_setup() {
    let game = new_game(1);
    let view = game.export_board_view();
    assert_eq!(view.clearings.len(), 12);
    assert_eq!(view.clearings[11].warriors.get(&'E'), Some(&6));
    assert_eq!(view.clearings[11].buildings, vec![BuildingType::Roost]);
    assert_eq!(view.clearings[0].tokens.get(&'C'), Some(&vec![Token::Keep]));
    assert_eq!(view.clearings[0].ruler, Some('C'));
}
