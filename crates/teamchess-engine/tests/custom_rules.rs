//! The board over a rules engine other than the default.

use std::cell::Cell;

use rand::rngs::StdRng;
use rand::SeedableRng;
use teamchess_core::{Color, Move, Piece, Player, Square, SquareSet};
use teamchess_engine::{
    BoardError, GameStatus, RulesEngine, RulesError, StandardRules, TeamChessBoard,
};

/// Delegates to [`StandardRules`] and counts the moves actually played.
#[derive(Default)]
struct CountingRules {
    inner: StandardRules,
    played: Cell<usize>,
}

impl RulesEngine for CountingRules {
    fn reset(&mut self) {
        self.inner.reset();
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn load_fen(&mut self, fen: &str) -> Result<(), RulesError> {
        self.inner.load_fen(fen)
    }

    fn fen(&self) -> String {
        self.inner.fen()
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.inner.piece_at(square)
    }

    fn set_piece_at(&mut self, square: Square, piece: Piece) {
        self.inner.set_piece_at(square, piece);
    }

    fn remove_piece_at(&mut self, square: Square) -> Option<Piece> {
        self.inner.remove_piece_at(square)
    }

    fn side_to_move(&self) -> Color {
        self.inner.side_to_move()
    }

    fn legal_moves(&self, from: SquareSet, to: SquareSet) -> impl Iterator<Item = Move> + '_ {
        self.inner.legal_moves(from, to)
    }

    fn parse_move(&self, notation: &str) -> Result<Move, RulesError> {
        self.inner.parse_move(notation)
    }

    fn play(&mut self, mv: Move) -> Result<(), RulesError> {
        self.inner.play(mv)?;
        self.played.set(self.played.get() + 1);
        Ok(())
    }

    fn status(&self) -> GameStatus {
        self.inner.status()
    }
}

#[test]
fn ownership_is_checked_before_the_engine_plays() {
    let text =
        "r♥n♣b♥q♥k♣b♣n♣r♥/p♥p♣p♣p♥p♥p♥p♣p♣/8/8/8/8/P♠P♦P♦P♦P♠P♦P♠P♠/R♦N♠B♠Q♦K♦B♠N♦R♠";
    let mut board =
        TeamChessBoard::from_extended_fen_on(CountingRules::default(), text, None).unwrap();

    assert!(matches!(
        board.apply_move("d2d4"),
        Err(BoardError::NotYourPiece { .. })
    ));
    assert_eq!(board.rules().played.get(), 0);

    board.apply_move("e2e4").unwrap();
    assert_eq!(board.rules().played.get(), 1);
    assert_eq!(board.turn(), Player::Hearts);
}

#[test]
fn default_generators_come_from_legal_moves() {
    let board = TeamChessBoard::new_game_on(
        CountingRules::default(),
        &mut StdRng::seed_from_u64(8),
    );
    assert_eq!(board.legal_captures().count(), 0);
    assert_eq!(board.legal_en_passant().count(), 0);
    assert_eq!(board.legal_castling_moves().count(), 0);
    assert!(board.legal_moves().count() >= 8);
}
