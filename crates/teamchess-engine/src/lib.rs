//! Four-player team chess on top of standard chess rules.
//!
//! This crate provides:
//! - [`RulesEngine`] - the contract for the standard-chess engine underneath
//! - [`StandardRules`] - the default engine, backed by the `chess` crate
//! - [`TeamChessBoard`] - the game itself: rules, ownership table and turn order
//! - [`owned_by`] - the filter that narrows generated moves to one player
//!
//! # Example
//!
//! ```
//! use teamchess_engine::TeamChessBoard;
//! use teamchess_core::Player;
//!
//! let mut board = TeamChessBoard::new_game();
//! assert_eq!(board.turn(), Player::Spades);
//!
//! let first = board.legal_moves().next().unwrap();
//! board.apply_move(&first.to_uci()).unwrap();
//! assert_eq!(board.turn(), Player::Hearts);
//! println!("{}", board.extended_fen(true));
//! ```

mod board;
mod filter;
mod san;
pub mod rules;

pub use board::{BoardError, GameSummary, MoveClass, PieceRecord, TeamChessBoard};
pub use filter::{owned_by, OwnedMoves};
pub use rules::{GameStatus, RulesEngine, RulesError, StandardRules};
