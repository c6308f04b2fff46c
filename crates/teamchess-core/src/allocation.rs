//! Random allocation of the starting pieces between teammates.
//!
//! Each color's eight pawns and eight back-rank pieces are split 4/4 between
//! the color's two players. The split is uniform and ignores piece type, so a
//! player may end up with, say, both bishops and both knights.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::{Color, Ownership, OwnershipTable, Piece, PieceKind, Square};

/// Back rank layout of the standard starting position, a-file to h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Splits eight squares into two random halves of four.
///
/// Every 4-element subset is equally likely to be the first half; the second
/// half is its complement.
pub fn split_evenly<R: Rng + ?Sized>(squares: [Square; 8], rng: &mut R) -> (Vec<Square>, Vec<Square>) {
    let mut shuffled = squares;
    shuffled.shuffle(rng);
    let (first, second) = shuffled.split_at(4);
    (first.to_vec(), second.to_vec())
}

/// Allocates one color's starting pieces between its two players.
///
/// The first player of the color (Spades for white, Hearts for black)
/// receives one random half of the pawns and one random half of the back
/// rank; the other player receives the complements.
pub fn allocate_color<R: Rng + ?Sized>(table: &mut OwnershipTable, color: Color, rng: &mut R) {
    let [first, second] = color.players();
    let pawns = split_evenly(Square::rank_squares(color.pawn_rank()), rng);
    let pieces = split_evenly(Square::rank_squares(color.back_rank()), rng);

    for (player, squares) in [
        (first, &pawns.0),
        (first, &pieces.0),
        (second, &pawns.1),
        (second, &pieces.1),
    ] {
        for &square in squares {
            let kind = if square.rank() == color.pawn_rank() {
                PieceKind::Pawn
            } else {
                BACK_RANK[square.file() as usize]
            };
            table.insert(square, Ownership::new(player, Piece::new(kind, color)));
        }
    }
}

/// Builds the ownership table for a fresh game in the standard starting position.
pub fn allocate<R: Rng + ?Sized>(rng: &mut R) -> OwnershipTable {
    let mut table = OwnershipTable::new();
    for color in Color::ALL {
        allocate_color(&mut table, color, rng);
    }
    table
}
