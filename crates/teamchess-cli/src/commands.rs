//! The work behind each subcommand, kept free of argument parsing and I/O.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use teamchess_core::{Move, PieceKind, Player, Square, SquareSet};
use teamchess_engine::{BoardError, GameStatus, MoveClass, PieceRecord, TeamChessBoard};
use thiserror::Error;

use crate::config::Settings;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("move {index} ('{notation}') rejected: {source}")]
    Rejected {
        index: usize,
        notation: String,
        source: BoardError,
    },
}

/// A game position as printed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameReport {
    pub extended_fen: String,
    pub fen: String,
    pub turn: Player,
    pub status: GameStatus,
}

impl GameReport {
    fn of(board: &TeamChessBoard, settings: &Settings) -> Self {
        GameReport {
            extended_fen: board.extended_fen(settings.include_promoted),
            fen: board.plain_fen(),
            turn: board.turn(),
            status: board.status(),
        }
    }
}

/// One generated move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub uci: String,
    pub from: Square,
    pub to: Square,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
    pub capture: bool,
    pub castling: bool,
}

impl From<Move> for MoveRecord {
    fn from(mv: Move) -> Self {
        MoveRecord {
            uci: mv.to_uci(),
            from: mv.from,
            to: mv.to,
            promotion: mv.promotion,
            capture: mv.kind.is_capture(),
            castling: mv.kind.is_castling(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayReport {
    pub played: Vec<MoveRecord>,
    pub game: GameReport,
}

/// Starts a game, seeded from the settings when a seed is configured.
pub fn new_game(settings: &Settings) -> GameReport {
    let board = match settings.seed {
        Some(seed) => TeamChessBoard::new_game_with_rng(&mut StdRng::seed_from_u64(seed)),
        None => TeamChessBoard::new_game(),
    };
    GameReport::of(&board, settings)
}

/// Lists the moves available to the player on turn.
pub fn list_moves(
    efen: &str,
    turn: Option<Player>,
    class: MoveClass,
    from: Option<Square>,
) -> Result<Vec<MoveRecord>, CommandError> {
    let board = TeamChessBoard::from_extended_fen(efen, turn)?;
    let from = from.map_or(SquareSet::ALL, SquareSet::from_square);
    Ok(board
        .generate(class, from, SquareSet::ALL)
        .map(MoveRecord::from)
        .collect())
}

/// Plays `moves` in order, each by whoever is on turn at that point.
///
/// Stops at the first rejected move and reports its position in the list.
pub fn play(
    efen: &str,
    turn: Option<Player>,
    moves: &[String],
    settings: &Settings,
) -> Result<PlayReport, CommandError> {
    let mut board = TeamChessBoard::from_extended_fen(efen, turn)?;
    let mut played = Vec::with_capacity(moves.len());

    for (index, notation) in moves.iter().enumerate() {
        let mv = board
            .apply_move(notation)
            .map_err(|source| CommandError::Rejected {
                index: index + 1,
                notation: notation.clone(),
                source,
            })?;
        played.push(MoveRecord::from(mv));
        if board.is_finished() {
            tracing::info!(status = ?board.status(), "game over");
        }
    }

    Ok(PlayReport {
        played,
        game: GameReport::of(&board, settings),
    })
}

/// Lists every piece with its owner, optionally only one player's.
pub fn pieces(
    efen: &str,
    turn: Option<Player>,
    owner: Option<Player>,
) -> Result<Vec<PieceRecord>, CommandError> {
    let board = TeamChessBoard::from_extended_fen(efen, turn)?;
    Ok(board
        .pieces()
        .into_iter()
        .filter(|record| owner.map_or(true, |player| record.player == player))
        .collect())
}

/// Renders a value as JSON, pretty-printed if configured.
pub fn render<T: Serialize>(value: &T, settings: &Settings) -> serde_json::Result<String> {
    if settings.pretty_json {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
