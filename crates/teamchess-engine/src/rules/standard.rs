//! Standard chess rules backed by the `chess` crate.

use std::fmt;
use std::str::FromStr;

use chess::{Board, BoardBuilder, BoardStatus, ChessMove, MoveGen, ALL_COLORS, ALL_SQUARES};
use teamchess_core::{Color, Move, MoveKind, Piece, PieceKind, Square, SquareSet};

use super::{GameStatus, RulesEngine, RulesError};

/// Rules engine for orthodox chess.
///
/// The editable setup is kept as a [`BoardBuilder`] so that any placement can
/// be represented while pieces are being placed one by one. Whenever the setup
/// forms a legal position, a validated [`Board`] is cached and used for move
/// generation; otherwise no moves are generated and [`play`](RulesEngine::play)
/// fails with [`RulesError::UnplayablePosition`].
#[derive(Clone)]
pub struct StandardRules {
    setup: BoardBuilder,
    board: Option<Board>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl StandardRules {
    /// Creates the standard starting position.
    pub fn new() -> Self {
        let board = Board::default();
        StandardRules {
            setup: BoardBuilder::from(&board),
            board: Some(board),
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates a position from a standard FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let mut rules = Self::new();
        rules.load_fen(fen)?;
        Ok(rules)
    }

    /// Returns true if the current setup is a legal position.
    pub fn is_playable(&self) -> bool {
        self.board.is_some()
    }

    /// Revalidates the setup. `Board::try_from` computes pins from each
    /// king's square before checking sanity, so a setup without exactly one
    /// king per color must never reach it.
    fn refresh(&mut self) {
        self.board = if self.has_one_king_each() {
            Board::try_from(&self.setup).ok()
        } else {
            None
        };
    }

    fn has_one_king_each(&self) -> bool {
        ALL_COLORS.iter().all(|&color| {
            ALL_SQUARES
                .iter()
                .filter(|&&square| self.setup[square] == Some((chess::Piece::King, color)))
                .count()
                == 1
        })
    }

    fn playable(&self) -> Result<&Board, RulesError> {
        self.board.as_ref().ok_or(RulesError::UnplayablePosition)
    }
}

impl Default for StandardRules {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StandardRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardRules")
            .field("fen", &self.fen())
            .field("playable", &self.is_playable())
            .finish()
    }
}

/// Checks the fields `BoardBuilder` parses loosely: the field count, and an
/// en passant square on the rank a double push just crossed. The builder
/// keeps only the file and rederives the rank from the side to move.
fn validate_fields(fields: &[&str]) -> Result<(), RulesError> {
    if fields.len() < 4 || fields.len() > 6 {
        return Err(RulesError::InvalidFen(format!(
            "expected 4 to 6 fields, found {}",
            fields.len()
        )));
    }
    let expected_rank = match fields[1] {
        "w" => 5,
        "b" => 2,
        other => {
            return Err(RulesError::InvalidFen(format!(
                "bad side to move '{}'",
                other
            )))
        }
    };
    match fields[3] {
        "-" => Ok(()),
        text => match Square::from_algebraic(text) {
            Some(square) if square.rank() == expected_rank => Ok(()),
            _ => Err(RulesError::InvalidFen(format!(
                "bad en passant square '{}'",
                text
            ))),
        },
    }
}

fn to_chess_square(square: Square) -> chess::Square {
    ALL_SQUARES[square.index() as usize]
}

fn from_chess_square(square: chess::Square) -> Square {
    Square::from_index_masked(square.to_int())
}

fn to_chess_color(color: Color) -> chess::Color {
    match color {
        Color::White => chess::Color::White,
        Color::Black => chess::Color::Black,
    }
}

fn from_chess_color(color: chess::Color) -> Color {
    match color {
        chess::Color::White => Color::White,
        chess::Color::Black => Color::Black,
    }
}

fn to_chess_piece(kind: PieceKind) -> chess::Piece {
    match kind {
        PieceKind::Pawn => chess::Piece::Pawn,
        PieceKind::Knight => chess::Piece::Knight,
        PieceKind::Bishop => chess::Piece::Bishop,
        PieceKind::Rook => chess::Piece::Rook,
        PieceKind::Queen => chess::Piece::Queen,
        PieceKind::King => chess::Piece::King,
    }
}

fn from_chess_piece(piece: chess::Piece) -> PieceKind {
    match piece {
        chess::Piece::Pawn => PieceKind::Pawn,
        chess::Piece::Knight => PieceKind::Knight,
        chess::Piece::Bishop => PieceKind::Bishop,
        chess::Piece::Rook => PieceKind::Rook,
        chess::Piece::Queen => PieceKind::Queen,
        chess::Piece::King => PieceKind::King,
    }
}

/// Classifies a legal `chess` move against the board it is played on.
fn describe(board: &Board, m: ChessMove) -> Move {
    let from = from_chess_square(m.get_source());
    let to = from_chess_square(m.get_dest());
    let target_occupied = board.piece_on(m.get_dest()).is_some();

    let kind = match board.piece_on(m.get_source()) {
        Some(chess::Piece::King) if from.file().abs_diff(to.file()) == 2 => {
            if to.file() > from.file() {
                MoveKind::CastleKingside
            } else {
                MoveKind::CastleQueenside
            }
        }
        Some(chess::Piece::Pawn) if from.file() != to.file() && !target_occupied => {
            MoveKind::EnPassant
        }
        _ if target_occupied => MoveKind::Capture,
        _ => MoveKind::Quiet,
    };

    Move {
        from,
        to,
        promotion: m.get_promotion().map(from_chess_piece),
        kind,
    }
}

fn to_chess_move(mv: Move) -> ChessMove {
    ChessMove::new(
        to_chess_square(mv.from),
        to_chess_square(mv.to),
        mv.promotion.map(to_chess_piece),
    )
}

impl RulesEngine for StandardRules {
    fn reset(&mut self) {
        *self = Self::new();
    }

    fn clear(&mut self) {
        self.setup = BoardBuilder::new();
        self.board = None;
        self.halfmove_clock = 0;
        self.fullmove_number = 1;
    }

    fn load_fen(&mut self, fen: &str) -> Result<(), RulesError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        validate_fields(&fields)?;
        let setup = BoardBuilder::from_str(&format!("{} 0 1", fields[..4].join(" ")))
            .map_err(|e| RulesError::InvalidFen(e.to_string()))?;
        let counter = |index: usize, default: u32| -> Result<u32, RulesError> {
            match fields.get(index) {
                Some(text) => text
                    .parse()
                    .map_err(|_| RulesError::InvalidFen(format!("bad move counter '{}'", text))),
                None => Ok(default),
            }
        };
        let halfmove_clock = counter(4, 0)?;
        let fullmove_number = counter(5, 1)?;

        self.setup = setup;
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
        self.refresh();
        Ok(())
    }

    fn fen(&self) -> String {
        // The builder always prints "0 1"; the clocks are tracked here instead.
        let text = self.setup.to_string();
        let fields: Vec<&str> = text.split_whitespace().take(4).collect();
        format!(
            "{} {} {}",
            fields.join(" "),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.setup[to_chess_square(square)]
            .map(|(piece, color)| Piece::new(from_chess_piece(piece), from_chess_color(color)))
    }

    fn set_piece_at(&mut self, square: Square, piece: Piece) {
        self.setup.piece(
            to_chess_square(square),
            to_chess_piece(piece.kind),
            to_chess_color(piece.color),
        );
        self.refresh();
    }

    fn remove_piece_at(&mut self, square: Square) -> Option<Piece> {
        let previous = self.piece_at(square);
        self.setup.clear_square(to_chess_square(square));
        self.refresh();
        previous
    }

    fn side_to_move(&self) -> Color {
        from_chess_color(self.setup.get_side_to_move())
    }

    fn legal_moves(&self, from: SquareSet, to: SquareSet) -> impl Iterator<Item = Move> + '_ {
        self.board.iter().flat_map(move |board| {
            MoveGen::new_legal(board)
                .filter(move |m| {
                    from.contains(from_chess_square(m.get_source()))
                        && to.contains(from_chess_square(m.get_dest()))
                })
                .map(move |m| describe(board, m))
        })
    }

    fn parse_move(&self, notation: &str) -> Result<Move, RulesError> {
        let board = self.playable()?;
        let notation = notation.trim();

        if let Ok(m) = ChessMove::from_str(notation) {
            return if board.legal(m) {
                Ok(describe(board, m))
            } else {
                Err(RulesError::IllegalMove(notation.to_string()))
            };
        }

        ChessMove::from_san(board, notation)
            .map(|m| describe(board, m))
            .map_err(|_| RulesError::InvalidNotation(notation.to_string()))
    }

    fn play(&mut self, mv: Move) -> Result<(), RulesError> {
        let board = *self.playable()?;
        let m = to_chess_move(mv);
        if !board.legal(m) {
            return Err(RulesError::IllegalMove(mv.to_uci()));
        }

        let moved = board.piece_on(m.get_source());
        let next = board.make_move_new(m);

        if moved == Some(chess::Piece::Pawn) || mv.kind.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if board.side_to_move() == chess::Color::Black {
            self.fullmove_number += 1;
        }

        self.setup = BoardBuilder::from(&next);
        self.board = Some(next);
        Ok(())
    }

    fn status(&self) -> GameStatus {
        let Some(board) = &self.board else {
            return GameStatus::Unplayable;
        };
        match board.status() {
            BoardStatus::Ongoing => GameStatus::Ongoing,
            BoardStatus::Stalemate => GameStatus::Stalemate,
            BoardStatus::Checkmate => GameStatus::Checkmate {
                winner: from_chess_color(!board.side_to_move()),
            },
        }
    }
}
