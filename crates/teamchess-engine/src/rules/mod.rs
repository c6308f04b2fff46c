//! Base rules engine abstraction.
//!
//! Team chess does not reimplement chess legality. The board delegates piece
//! movement, check detection, castling, en passant and promotion to a
//! [`RulesEngine`], and only layers ownership and turn order on top.

mod standard;

pub use standard::StandardRules;

use serde::{Deserialize, Serialize};
use teamchess_core::{Color, Move, Piece, Square, SquareSet};
use thiserror::Error;

/// Errors raised by a rules engine. The board passes them through unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("unrecognised move notation: {0}")]
    InvalidNotation(String),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("position cannot be played (kings missing or setup illegal)")]
    UnplayablePosition,
}

/// Where a game stands, as far as standard chess is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameStatus {
    Ongoing,
    /// The side to move is mated; `winner` is the other color's team.
    Checkmate { winner: Color },
    Stalemate,
    /// The setup is not a legal chess position, so nothing can be played.
    Unplayable,
}

impl GameStatus {
    /// Returns true if no further moves can be played.
    #[inline]
    pub const fn is_finished(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

/// Contract for the standard-chess engine a team chess board is built on.
///
/// Generators take a source and a destination mask and stream fully
/// described legal moves. Every generator must be lazy and must not reorder
/// moves between calls on the same position.
pub trait RulesEngine {
    /// Sets up the standard starting position.
    fn reset(&mut self);

    /// Removes every piece and all castling and en passant state.
    fn clear(&mut self);

    /// Replaces the whole position with a standard FEN string.
    fn load_fen(&mut self, fen: &str) -> Result<(), RulesError>;

    /// Returns the full standard FEN of the position.
    fn fen(&self) -> String;

    /// Returns only the piece placement field of [`fen`](RulesEngine::fen).
    fn board_fen(&self) -> String {
        self.fen()
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string()
    }

    fn piece_at(&self, square: Square) -> Option<Piece>;

    fn set_piece_at(&mut self, square: Square, piece: Piece);

    fn remove_piece_at(&mut self, square: Square) -> Option<Piece>;

    fn side_to_move(&self) -> Color;

    /// Streams every legal move, including captures, en passant and castling.
    fn legal_moves(&self, from: SquareSet, to: SquareSet) -> impl Iterator<Item = Move> + '_;

    /// Streams legal en passant captures.
    fn legal_en_passant(&self, from: SquareSet, to: SquareSet) -> impl Iterator<Item = Move> + '_ {
        self.legal_moves(from, to)
            .filter(|mv| mv.kind == teamchess_core::MoveKind::EnPassant)
    }

    /// Streams legal castling moves, expressed as king moves.
    fn legal_castling(&self, from: SquareSet, to: SquareSet) -> impl Iterator<Item = Move> + '_ {
        self.legal_moves(from, to).filter(|mv| mv.kind.is_castling())
    }

    /// Streams legal captures, en passant included.
    fn legal_captures(&self, from: SquareSet, to: SquareSet) -> impl Iterator<Item = Move> + '_ {
        self.legal_moves(from, to).filter(|mv| mv.kind.is_capture())
    }

    /// Resolves a move in UCI ("e2e4") or SAN ("Nf3") notation against the
    /// current position without playing it.
    fn parse_move(&self, notation: &str) -> Result<Move, RulesError>;

    /// Plays a legal move.
    fn play(&mut self, mv: Move) -> Result<(), RulesError>;

    fn status(&self) -> GameStatus;
}
