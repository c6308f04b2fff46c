//! The team chess board: a rules engine plus ownership and turn order.
//!
//! [`TeamChessBoard`] owns a [`RulesEngine`] for standard legality, an
//! [`OwnershipTable`] recording which player owns each piece, and the turn
//! pointer. Every public query and mutation keeps the three in step.

use rand::Rng;
use serde::{Deserialize, Serialize};
use teamchess_core::{
    allocation, efen, Color, ExtendedFenError, Move, OwnershipTable, PieceKind, Player, Square,
    SquareSet, UnknownPlayerSymbol,
};
use thiserror::Error;

use crate::filter::OwnedMoves;
use crate::san::{SanError, SanPattern};
use crate::rules::{GameStatus, RulesEngine, RulesError, StandardRules};

/// Errors returned by board operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error(transparent)]
    UnknownPlayerSymbol(#[from] UnknownPlayerSymbol),

    #[error("invalid extended FEN: {0}")]
    InvalidExtendedFen(#[from] ExtendedFenError),

    #[error("{player} does not own the piece on {square}")]
    NotYourPiece { square: Square, player: Player },

    #[error("{player} plays {}, but the position has {side_to_move} to move", .player.team())]
    TurnMismatch { player: Player, side_to_move: Color },

    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// Which of the rules engine's generators to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveClass {
    /// Every legal move.
    All,
    Captures,
    EnPassant,
    Castling,
}

/// One occupied square as presented to callers that render the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRecord {
    pub square: Square,
    pub player: Player,
    pub piece: PieceKind,
    pub color: Color,
}

/// Persistable snapshot of a game, enough to rebuild the board later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Standard FEN, without ownership.
    pub fen: String,
    /// Extended FEN with owner symbols and promotion markers.
    pub extended_fen: String,
    pub turn: Player,
    pub is_finished: bool,
}

/// A four-player team chess game.
///
/// A board is a single game and expects exclusive access for each call;
/// hosts sharing one across threads must serialise access themselves.
#[derive(Debug, Clone)]
pub struct TeamChessBoard<R = StandardRules> {
    rules: R,
    ownership: OwnershipTable,
    turn: Player,
}

impl TeamChessBoard<StandardRules> {
    /// Starts a fresh game with pieces allocated at random.
    pub fn new_game() -> Self {
        Self::new_game_with_rng(&mut rand::thread_rng())
    }

    /// Starts a fresh game, drawing the allocation from `rng`.
    pub fn new_game_with_rng<G: Rng + ?Sized>(rng: &mut G) -> Self {
        Self::new_game_on(StandardRules::new(), rng)
    }

    /// Rebuilds a game from extended FEN.
    ///
    /// `text` is either the extended placement alone or the placement
    /// followed by the standard side-to-move, castling, en passant and clock
    /// fields. The turn pointer starts at `starting_player`, or Spades.
    pub fn from_extended_fen(
        text: &str,
        starting_player: Option<Player>,
    ) -> Result<Self, BoardError> {
        Self::from_extended_fen_on(StandardRules::new(), text, starting_player)
    }

    /// Rebuilds a game from a stored summary.
    pub fn from_summary(summary: &GameSummary) -> Result<Self, BoardError> {
        Self::from_extended_fen(&summary.extended_fen, Some(summary.turn))
    }
}

impl<R: RulesEngine> TeamChessBoard<R> {
    /// Starts a fresh game on the given rules engine.
    pub fn new_game_on<G: Rng + ?Sized>(mut rules: R, rng: &mut G) -> Self {
        rules.reset();
        let board = TeamChessBoard {
            rules,
            ownership: allocation::allocate(rng),
            turn: Player::Spades,
        };
        board.check_sync();
        tracing::debug!(efen = %board.extended_board_fen(false), "new team chess game");
        board
    }

    /// Rebuilds a game from extended FEN on the given rules engine.
    ///
    /// Nothing is returned unless the whole text decodes, so a failure never
    /// leaves a half-built board behind.
    pub fn from_extended_fen_on(
        mut rules: R,
        text: &str,
        starting_player: Option<Player>,
    ) -> Result<Self, BoardError> {
        let text = text.trim();
        let (placement, fields) = match text.split_once(char::is_whitespace) {
            Some((placement, fields)) => (placement, fields.trim()),
            None => (text, ""),
        };

        let ownership = efen::decode(placement)?;
        let turn = starting_player.unwrap_or(Player::Spades);

        let fields = if fields.is_empty() {
            default_fields(&ownership, turn)
        } else {
            let side_to_move = match fields.split_whitespace().next() {
                Some("w") => Color::White,
                Some("b") => Color::Black,
                _ => {
                    return Err(RulesError::InvalidFen(format!(
                        "bad side to move in '{}'",
                        fields
                    ))
                    .into())
                }
            };
            if side_to_move != turn.team() {
                return Err(BoardError::TurnMismatch {
                    player: turn,
                    side_to_move,
                });
            }
            fields.to_string()
        };

        rules.load_fen(&format!("{} {}", efen::strip_ownership(placement), fields))?;

        let board = TeamChessBoard {
            rules,
            ownership,
            turn,
        };
        board.check_sync();
        if board.status() == GameStatus::Unplayable {
            tracing::warn!(efen = %text, "extended FEN describes an unplayable position");
        }
        Ok(board)
    }

    /// The player whose move it is.
    #[inline]
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Read-only access to the ownership table.
    #[inline]
    pub fn ownership(&self) -> &OwnershipTable {
        &self.ownership
    }

    /// Read-only access to the underlying rules engine.
    #[inline]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Returns the owner of the piece on `square`.
    pub fn owner_of(&self, square: Square) -> Option<Player> {
        self.ownership.owner(square)
    }

    /// Resolves a player symbol.
    pub fn player_by_symbol(&self, symbol: char) -> Result<Player, BoardError> {
        Ok(Player::from_symbol(symbol)?)
    }

    /// Plays a move given in UCI or SAN notation for the current player.
    ///
    /// The origin must hold one of the current player's pieces. For UCI this
    /// is checked before the rules engine sees the move at all; SAN is
    /// resolved among the current player's legal moves first, so a piece
    /// letter only has to be unambiguous among that player's own pieces.
    /// On success the ownership table follows the move and the turn passes to
    /// the next player, whether or not the move gives check. On failure
    /// nothing changes.
    pub fn apply_move(&mut self, notation: &str) -> Result<Move, BoardError> {
        let notation = notation.trim();
        let player = self.turn;

        let mv = match uci_origin(notation) {
            Some(from) => {
                if let Some(owner) = self.ownership.owner(from) {
                    if owner != player {
                        return Err(BoardError::NotYourPiece {
                            square: from,
                            player,
                        });
                    }
                }
                self.rules.parse_move(notation)?
            }
            None => self.resolve_san(notation)?,
        };

        match self.ownership.owner(mv.from) {
            Some(owner) if owner == player => {}
            Some(_) => {
                return Err(BoardError::NotYourPiece {
                    square: mv.from,
                    player,
                })
            }
            None => {
                tracing::error!(
                    square = %mv.from,
                    "ownership invariant violated: occupied square has no owner"
                );
                debug_assert!(false, "no ownership entry for occupied square {}", mv.from);
                return Err(BoardError::NotYourPiece {
                    square: mv.from,
                    player,
                });
            }
        }

        self.rules.play(mv)?;
        self.ownership.record_move(&mv);
        self.turn = player.successor();
        self.check_sync();

        tracing::debug!(%player, mv = %mv, next = %self.turn, "move applied");
        Ok(mv)
    }

    fn resolve_san(&self, notation: &str) -> Result<Move, BoardError> {
        let pattern = match SanPattern::parse(notation) {
            Ok(pattern) => pattern,
            Err(_) => return Ok(self.rules.parse_move(notation)?),
        };
        let moved = |square: Square| self.rules.piece_at(square).map(|piece| piece.kind);
        match pattern.resolve(self.legal_moves(), moved) {
            Ok(mv) => Ok(mv),
            Err(SanError::AmbiguousMove(_)) => {
                Err(RulesError::InvalidNotation(notation.to_string()).into())
            }
            // Not one of ours: let the engine say whether it is someone
            // else's piece or no move at all.
            Err(_) => Ok(self.rules.parse_move(notation)?),
        }
    }

    /// Legal moves for the current player.
    pub fn legal_moves(&self) -> impl Iterator<Item = Move> + '_ {
        OwnedMoves::new(
            self.rules.legal_moves(SquareSet::ALL, SquareSet::ALL),
            &self.ownership,
            self.turn,
        )
    }

    /// Legal captures for the current player, en passant included.
    pub fn legal_captures(&self) -> impl Iterator<Item = Move> + '_ {
        OwnedMoves::new(
            self.rules.legal_captures(SquareSet::ALL, SquareSet::ALL),
            &self.ownership,
            self.turn,
        )
    }

    /// Legal en passant captures for the current player.
    pub fn legal_en_passant(&self) -> impl Iterator<Item = Move> + '_ {
        OwnedMoves::new(
            self.rules.legal_en_passant(SquareSet::ALL, SquareSet::ALL),
            &self.ownership,
            self.turn,
        )
    }

    /// Legal castling moves for the current player, as king moves.
    pub fn legal_castling_moves(&self) -> impl Iterator<Item = Move> + '_ {
        OwnedMoves::new(
            self.rules.legal_castling(SquareSet::ALL, SquareSet::ALL),
            &self.ownership,
            self.turn,
        )
    }

    /// Legal moves of one class for the current player, restricted to the
    /// given origin and destination squares.
    pub fn generate(
        &self,
        class: MoveClass,
        from: SquareSet,
        to: SquareSet,
    ) -> impl Iterator<Item = Move> + '_ {
        let moves: Box<dyn Iterator<Item = Move> + '_> = match class {
            MoveClass::All => Box::new(self.rules.legal_moves(from, to)),
            MoveClass::Captures => Box::new(self.rules.legal_captures(from, to)),
            MoveClass::EnPassant => Box::new(self.rules.legal_en_passant(from, to)),
            MoveClass::Castling => Box::new(self.rules.legal_castling(from, to)),
        };
        OwnedMoves::new(moves, &self.ownership, self.turn)
    }

    /// Extended placement field only.
    pub fn extended_board_fen(&self, include_promoted: bool) -> String {
        efen::encode(&self.ownership, include_promoted)
    }

    /// Extended placement followed by the rules engine's remaining FEN fields.
    pub fn extended_fen(&self, include_promoted: bool) -> String {
        let fen = self.rules.fen();
        match fen.split_once(' ') {
            Some((_, fields)) => format!("{} {}", self.extended_board_fen(include_promoted), fields),
            None => self.extended_board_fen(include_promoted),
        }
    }

    /// Standard FEN with no ownership information.
    pub fn plain_fen(&self) -> String {
        self.rules.fen()
    }

    /// Standard placement field with no ownership information.
    pub fn plain_board_fen(&self) -> String {
        self.rules.board_fen()
    }

    /// Every occupied square with its owner, ordered a1 to h8.
    pub fn pieces(&self) -> Vec<PieceRecord> {
        self.ownership
            .iter()
            .map(|(square, entry)| PieceRecord {
                square,
                player: entry.player,
                piece: entry.piece.kind,
                color: entry.piece.color,
            })
            .collect()
    }

    pub fn status(&self) -> GameStatus {
        self.rules.status()
    }

    pub fn is_finished(&self) -> bool {
        self.status().is_finished()
    }

    /// Snapshot for storage; see [`TeamChessBoard::from_summary`].
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            fen: self.plain_fen(),
            extended_fen: self.extended_fen(true),
            turn: self.turn,
            is_finished: self.is_finished(),
        }
    }

    /// Squares where the ownership table and the rules engine disagree.
    pub fn desynchronized_squares(&self) -> Vec<Square> {
        Square::all()
            .filter(|&square| {
                self.rules.piece_at(square) != self.ownership.get(square).map(|entry| entry.piece)
            })
            .collect()
    }

    fn check_sync(&self) {
        let drifted = self.desynchronized_squares();
        if !drifted.is_empty() {
            tracing::error!(squares = ?drifted, "ownership table out of sync with board");
            debug_assert!(drifted.is_empty(), "ownership drifted on {:?}", drifted);
        }
    }
}

/// The origin square of UCI notation such as "e2e4" or "a7a8q".
fn uci_origin(notation: &str) -> Option<Square> {
    if !(4..=5).contains(&notation.len()) {
        return None;
    }
    let from = Square::from_algebraic(notation.get(0..2)?)?;
    Square::from_algebraic(notation.get(2..4)?)?;
    Some(from)
}

/// Standard FEN fields for a placement given without them: the turn
/// player's color to move, castling wherever king and rook stand on their
/// home squares, no en passant square, fresh clocks.
fn default_fields(ownership: &OwnershipTable, turn: Player) -> String {
    let has = |square: Square, kind: PieceKind, color: Color| {
        ownership
            .get(square)
            .is_some_and(|entry| entry.piece.kind == kind && entry.piece.color == color)
    };

    let mut castling = String::new();
    for (color, king, short_rook, long_rook, short, long) in [
        (Color::White, Square::E1, Square::H1, Square::A1, 'K', 'Q'),
        (Color::Black, Square::E8, Square::H8, Square::A8, 'k', 'q'),
    ] {
        if !has(king, PieceKind::King, color) {
            continue;
        }
        if has(short_rook, PieceKind::Rook, color) {
            castling.push(short);
        }
        if has(long_rook, PieceKind::Rook, color) {
            castling.push(long);
        }
    }
    if castling.is_empty() {
        castling.push('-');
    }

    format!("{} {} - 0 1", turn.team().fen_char(), castling)
}
