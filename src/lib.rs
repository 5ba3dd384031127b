//! Rules engine for an asymmetric woodland territory-control board game.
//!
//! Exposes the board model, the card catalog, the faction rule sets and the
//! turn engine. Rendering and input parsing live outside this crate; they
//! drive a [`GameState`] through its legality query, its apply entry point
//! and the read-only [`BoardView`].

pub mod board;
pub mod cards;
pub mod engine;
pub mod error;
pub mod faction;
pub mod player;
pub mod resolve;
pub mod view;

pub use engine::{board_topology, GameConfig, GameState};
pub use error::EngineError;
pub use view::{BoardView, ClearingView};
