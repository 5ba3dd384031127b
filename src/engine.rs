//! Game state and the turn engine.
//!
//! Holds the board, the seated players with their factions, the deck and the
//! action log. The caller asks for legal action kinds, submits actions, and
//! the engine validates them against the active faction, applies them, logs
//! them and advances phases, running each faction's phase-entry hooks.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::board::{Action, ActionKind, Board, ClearingId, FactionName, EDGES};
use crate::cards::Deck;
use crate::error::EngineError;
use crate::faction::{EyrieDynasties, Faction, FactionStatus, Leader, MarquiseDeCat, TurnContext, ALL_LEADERS};
use crate::player::Player;
use crate::resolve::{GameLog, TurnPhase};
use crate::view::BoardView;

/// Cards dealt to each player before the first turn.
pub const DEFAULT_STARTING_HAND: usize = 3;

/// Per-game settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seating order; the first faction acts first.
    pub factions: Vec<FactionName>,
    pub seed: u64,
    pub starting_hand: usize,
    /// Fixed opening leader for the Eyrie; random when unset.
    pub eyrie_leader: Option<Leader>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            factions: vec![FactionName::MarquiseDeCat, FactionName::EyrieDynasties],
            seed: 0,
            starting_hand: DEFAULT_STARTING_HAND,
            eyrie_leader: None,
        }
    }
}

impl GameConfig {
    fn validate(&self) -> Result<(), EngineError> {
        if self.factions.is_empty() {
            return Err(EngineError::InvalidSetup("no factions assigned".to_string()));
        }
        for (i, f) in self.factions.iter().enumerate() {
            if self.factions[..i].contains(f) {
                return Err(EngineError::InvalidSetup(format!(
                    "{:?} assigned more than once",
                    f
                )));
            }
        }
        Ok(())
    }
}

/// A player and the rules they play by.
#[derive(Debug)]
struct Seat {
    player: Player,
    faction: Box<dyn Faction>,
}

/// The static board graph, for layout.
pub fn board_topology() -> &'static [(ClearingId, ClearingId)] {
    &EDGES
}

/// A game in progress.
#[derive(Debug)]
pub struct GameState {
    board: Board,
    seats: Vec<Seat>,
    deck: Deck,
    log: GameLog,
    round: usize,
    active: usize,
    phase: TurnPhase,
    rng: SmallRng,
}

impl GameState {
    /// Sets up the board, shuffles and deals, then enters the first player's
    /// birdsong.
    pub fn new_game(config: GameConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(config.seed);

        let mut seats = Vec::with_capacity(config.factions.len());
        for &name in &config.factions {
            let faction: Box<dyn Faction> = match name {
                FactionName::MarquiseDeCat => Box::new(MarquiseDeCat::new()),
                FactionName::EyrieDynasties => {
                    let leader = match config.eyrie_leader {
                        Some(l) => l,
                        None => *ALL_LEADERS.choose(&mut rng).unwrap_or(&Leader::Builder),
                    };
                    Box::new(EyrieDynasties::new(leader))
                }
                FactionName::WoodlandAlliance | FactionName::Vagabond => {
                    return Err(EngineError::UnsupportedFaction(name))
                }
            };
            seats.push(Seat {
                player: Player::new(name),
                faction,
            });
        }

        let mut board = Board::new();
        for seat in seats.iter_mut() {
            seat.faction.board_setup(&mut board);
        }

        let mut deck = Deck::base();
        deck.shuffle(&mut rng);
        for seat in seats.iter_mut() {
            let hand = deck.draw(config.starting_hand)?;
            seat.player.hand = hand;
        }

        let mut state = GameState {
            board,
            seats,
            deck,
            log: GameLog::new(),
            round: 0,
            active: 0,
            phase: TurnPhase::Birdsong,
            rng,
        };
        log::info!(
            "new game: {:?}, seed {}, {} cards left",
            config.factions,
            config.seed,
            state.deck.remaining()
        );
        state.run_phase_hooks()?;
        Ok(state)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn log(&self) -> &GameLog {
        &self.log
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn active_faction(&self) -> FactionName {
        self.seats[self.active].player.faction
    }

    pub fn player(&self, faction: FactionName) -> Option<&Player> {
        self.seat(faction).map(|s| &s.player)
    }

    /// Seating order.
    pub fn factions(&self) -> Vec<FactionName> {
        self.seats.iter().map(|s| s.player.faction).collect()
    }

    pub fn faction_status(&self, faction: FactionName) -> Option<FactionStatus> {
        self.seat(faction).map(|s| s.faction.status(&self.board))
    }

    fn seat(&self, faction: FactionName) -> Option<&Seat> {
        self.seats.iter().find(|s| s.player.faction == faction)
    }

    /// Actions already taken in the current round and phase.
    pub fn actions_taken(&self) -> &[Action] {
        self.log.actions_for(self.round, self.phase)
    }

    /// Coarse action kinds the active faction may use in the current phase.
    pub fn legal_action_kinds(&self) -> Vec<ActionKind> {
        self.seats[self.active].faction.legal_action_kinds(self.phase)
    }

    pub fn is_action_legal(&self, action: &Action) -> bool {
        let seat = &self.seats[self.active];
        let legal = seat.faction.is_action_legal(
            action,
            self.phase,
            &seat.player,
            &self.board,
            self.actions_taken(),
        );
        if !legal {
            log::trace!(
                "rejected {:?} for {:?} in {} of round {}",
                action,
                seat.player.faction,
                self.phase.name(),
                self.round
            );
        }
        legal
    }

    /// Validates and applies `action` for the active faction.
    ///
    /// An illegal action leaves the game untouched.
    pub fn apply_action(&mut self, action: Action) -> Result<(), EngineError> {
        if !self.is_action_legal(&action) {
            return Err(EngineError::IllegalAction {
                faction: self.active_faction(),
                phase: self.phase,
                action,
            });
        }
        self.apply_unchecked(action)
    }

    pub fn export_board_view(&self) -> BoardView {
        BoardView::from_board(&self.board)
    }

    fn apply_unchecked(&mut self, action: Action) -> Result<(), EngineError> {
        let Seat { player, faction } = &mut self.seats[self.active];
        let mut ctx = TurnContext {
            board: &mut self.board,
            player,
            deck: &mut self.deck,
            rng: &mut self.rng,
        };
        faction.apply_action(&action, &mut ctx)?;
        let name = faction.name();
        log::debug!("{:?} applied {:?} in {}", name, action, self.phase.name());

        let ends_phase = matches!(action, Action::EndPhase);
        self.log.log_action(self.round, name, self.phase, action);
        if ends_phase {
            self.end_phase()?;
        }
        Ok(())
    }

    fn end_phase(&mut self) -> Result<(), EngineError> {
        if self.phase.ends_round() {
            self.board.mark_all_buildings_unused();
            self.seats[self.active].faction.reset_state();
            self.active = (self.active + 1) % self.seats.len();
            self.round += 1;
            log::info!("round {}: {:?} to act", self.round, self.active_faction());
        }
        self.phase = self.phase.next();
        log::debug!("{:?} enters {}", self.active_faction(), self.phase.name());
        self.run_phase_hooks()
    }

    /// Applies the active faction's automatic actions for the phase just entered.
    ///
    /// Stops early once a hook action ends the phase. Hook actions that fail
    /// the legality check are skipped.
    fn run_phase_hooks(&mut self) -> Result<(), EngineError> {
        let (phase, round) = (self.phase, self.round);
        let seat = &self.seats[self.active];
        let hooks = match phase {
            TurnPhase::Birdsong => seat.faction.pre_birdsong_actions(&seat.player, &self.board),
            TurnPhase::Evening => seat.faction.pre_evening_actions(&seat.player, &self.board),
            TurnPhase::Daylight => Vec::new(),
        };

        for action in hooks {
            if self.phase != phase || self.round != round {
                break;
            }
            if self.is_action_legal(&action) {
                self.apply_unchecked(action)?;
            } else {
                log::warn!(
                    "skipping illegal {} hook action {:?} for {:?}",
                    phase.name(),
                    action,
                    self.active_faction()
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BuildingType, Token};

    fn two_player() -> GameState {
        GameState::new_game(GameConfig {
            seed: 7,
            eyrie_leader: Some(Leader::Builder),
            ..GameConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn default_config_seats_marquise_then_eyrie() {
        let config = GameConfig::default();
        assert_eq!(config.starting_hand, 3);
        assert_eq!(
            config.factions,
            vec![FactionName::MarquiseDeCat, FactionName::EyrieDynasties]
        );
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"seed": 42}"#).unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.starting_hand, DEFAULT_STARTING_HAND);
        assert_eq!(config.eyrie_leader, None);
    }

    #[test]
    fn rejects_empty_and_duplicate_seating() {
        let empty = GameConfig {
            factions: Vec::new(),
            ..GameConfig::default()
        };
        assert!(matches!(
            GameState::new_game(empty),
            Err(EngineError::InvalidSetup(_))
        ));

        let dup = GameConfig {
            factions: vec![FactionName::MarquiseDeCat, FactionName::MarquiseDeCat],
            ..GameConfig::default()
        };
        assert!(matches!(
            GameState::new_game(dup),
            Err(EngineError::InvalidSetup(_))
        ));
    }

    #[test]
    fn unimplemented_factions_are_rejected() {
        let config = GameConfig {
            factions: vec![FactionName::MarquiseDeCat, FactionName::Vagabond],
            ..GameConfig::default()
        };
        assert_eq!(
            GameState::new_game(config).unwrap_err(),
            EngineError::UnsupportedFaction(FactionName::Vagabond)
        );
    }

    #[test]
    fn marquise_birdsong_runs_itself() {
        let game = two_player();
        assert_eq!(game.active_faction(), FactionName::MarquiseDeCat);
        assert_eq!(game.phase(), TurnPhase::Daylight);
        assert_eq!(game.round(), 0);
        assert_eq!(game.board().count_tokens(FactionName::MarquiseDeCat, Token::Wood), 1);
        let birdsong = game.log().actions_for(0, TurnPhase::Birdsong);
        assert_eq!(birdsong, &[Action::AddWood, Action::EndPhase]);
    }

    #[test]
    fn deals_starting_hands() {
        let game = two_player();
        for faction in game.factions() {
            assert_eq!(game.player(faction).map(|p| p.hand.len()), Some(3));
        }
        assert_eq!(game.deck_remaining(), crate::cards::BASE_DECK_SIZE - 6);
    }

    #[test]
    fn illegal_action_leaves_state_untouched() {
        let mut game = two_player();
        let before = game.board().clone();
        let action = Action::AddToDecree {
            card: 0,
            option: crate::board::DecreeOption::Move,
        };
        let err = game.apply_action(action.clone()).unwrap_err();
        assert_eq!(
            err,
            EngineError::IllegalAction {
                faction: FactionName::MarquiseDeCat,
                phase: TurnPhase::Daylight,
                action,
            }
        );
        assert_eq!(game.board(), &before);
        assert!(game.actions_taken().is_empty());
    }

    #[test]
    fn evening_hook_draws_for_marquise() {
        let mut game = two_player();
        game.apply_action(Action::EndPhase).unwrap();
        assert_eq!(game.phase(), TurnPhase::Evening);
        assert_eq!(
            game.player(FactionName::MarquiseDeCat).map(|p| p.hand.len()),
            Some(4)
        );
        assert_eq!(game.actions_taken(), &[Action::Draw { count: 1 }]);
    }

    #[test]
    fn round_end_hands_turn_to_next_seat() {
        let mut game = two_player();
        game.apply_action(Action::EndPhase).unwrap();
        game.apply_action(Action::EndPhase).unwrap();

        assert_eq!(game.round(), 1);
        assert_eq!(game.active_faction(), FactionName::EyrieDynasties);
        assert_eq!(game.phase(), TurnPhase::Birdsong);
        assert!(game
            .board()
            .get_unused_buildings_of_type(BuildingType::Sawmill)
            .contains_key(&3));
        assert_eq!(
            game.log().round(0).map(|r| r.faction),
            Some(FactionName::MarquiseDeCat)
        );
    }

    #[test]
    fn faction_status_reports_leader() {
        let game = two_player();
        let status = game.faction_status(FactionName::EyrieDynasties).unwrap();
        assert_eq!(status.leader, Some(Leader::Builder));
        assert_eq!(status.warriors_in_supply, 14);
        assert!(game.faction_status(FactionName::Vagabond).is_none());
    }

    #[test]
    fn topology_has_eighteen_edges() {
        assert_eq!(board_topology().len(), 18);
    }
}
