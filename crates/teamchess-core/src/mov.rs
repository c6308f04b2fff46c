//! Move representation.

use std::fmt;

use crate::{PieceKind, Square};

/// What a move does besides relocating the moving piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Move to an empty square.
    Quiet,
    /// Move onto an enemy piece.
    Capture,
    /// Pawn capture of a pawn that just double-pushed past.
    EnPassant,
    /// King moves two files towards the h-file rook.
    CastleKingside,
    /// King moves two files towards the a-file rook.
    CastleQueenside,
}

impl MoveKind {
    /// Returns true if this move removes an enemy piece.
    #[inline]
    pub const fn is_capture(self) -> bool {
        matches!(self, MoveKind::Capture | MoveKind::EnPassant)
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveKind::CastleKingside | MoveKind::CastleQueenside)
    }
}

/// A fully described legal move, as produced by a rules engine.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub kind: MoveKind,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Move {
            from,
            to,
            promotion: None,
            kind,
        }
    }

    /// Returns a copy of this move promoting to `kind`.
    #[inline]
    pub fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }

    /// Square of the pawn removed by an en passant capture.
    #[inline]
    pub fn en_passant_victim(self) -> Option<Square> {
        match self.kind {
            MoveKind::EnPassant => Square::new(self.to.file(), self.from.rank()),
            _ => None,
        }
    }

    /// Origin and destination of the rook moved by a castling move.
    pub fn castling_rook(self) -> Option<(Square, Square)> {
        let rank = self.from.rank();
        let (rook_from, rook_to) = match self.kind {
            MoveKind::CastleKingside => (7, 5),
            MoveKind::CastleQueenside => (0, 3),
            _ => return None,
        };
        Some((Square::new(rook_from, rank)?, Square::new(rook_to, rank)?))
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        match self.promotion {
            Some(kind) => format!("{}{}{}", self.from, self.to, kind.to_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}, {:?})", self.to_uci(), self.kind)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn move_uci() {
        assert_eq!(Move::new(sq("e2"), sq("e4"), MoveKind::Quiet).to_uci(), "e2e4");
        let promo = Move::new(sq("e7"), sq("e8"), MoveKind::Quiet).with_promotion(PieceKind::Queen);
        assert_eq!(promo.to_uci(), "e7e8q");
        assert_eq!(format!("{}", promo), "e7e8q");
    }

    #[test]
    fn en_passant_victim_is_beside_origin() {
        let ep = Move::new(sq("e5"), sq("d6"), MoveKind::EnPassant);
        assert_eq!(ep.en_passant_victim(), Some(sq("d5")));
        let plain = Move::new(sq("e5"), sq("d6"), MoveKind::Capture);
        assert_eq!(plain.en_passant_victim(), None);
    }

    #[test]
    fn castling_rook_squares() {
        let short = Move::new(Square::E1, Square::G1, MoveKind::CastleKingside);
        assert_eq!(short.castling_rook(), Some((Square::H1, Square::F1)));
        let long = Move::new(Square::E8, Square::C8, MoveKind::CastleQueenside);
        assert_eq!(long.castling_rook(), Some((Square::A8, Square::D8)));
        assert_eq!(
            Move::new(Square::E1, Square::F1, MoveKind::Quiet).castling_rook(),
            None
        );
    }

    #[test]
    fn kind_predicates() {
        assert!(MoveKind::EnPassant.is_capture());
        assert!(MoveKind::Capture.is_capture());
        assert!(!MoveKind::CastleKingside.is_capture());
        assert!(MoveKind::CastleQueenside.is_castling());
        assert!(!MoveKind::Quiet.is_castling());
    }
}
