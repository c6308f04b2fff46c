//! Extended FEN: standard piece placement with an owner symbol after every piece.
//!
//! ```text
//! r♥n♣b♥q♥k♣b♣n♣r♥/p♥p♣p♣p♥p♥p♥p♣p♣/8/8/8/8/P♠P♦P♦P♦P♠P♦P♠P♠/R♦N♠B♠Q♦K♦B♠N♦R♠
//! ```
//!
//! Each piece letter may carry a `~` marker (the piece was promoted) and is
//! then followed by exactly one of `♠ ♥ ♦ ♣`. Empty squares are written as a
//! single digit 1-8, exactly as in standard FEN.

use thiserror::Error;

use crate::{Ownership, OwnershipTable, Piece, Player, Square};

/// Marker written after a promoted piece's letter.
pub const PROMOTED_MARKER: char = '~';

/// Grammar violations in an extended FEN placement field.
///
/// Ranks are reported by their board number (8 for the first field, 1 for the last).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtendedFenError {
    #[error("empty piece placement")]
    Empty,

    #[error("expected 8 ranks, got {0}")]
    RankCount(usize),

    #[error("rank {rank}: consecutive digits '{previous}{digit}'")]
    ConsecutiveDigits { rank: u8, previous: char, digit: char },

    #[error("rank {rank}: invalid empty-square count '{digit}'")]
    InvalidDigit { rank: u8, digit: char },

    #[error("rank {rank} has {columns} columns, expected 8")]
    ColumnCount { rank: u8, columns: u32 },

    #[error("rank {rank}: player symbol '{symbol}' does not follow a piece")]
    OrphanSymbol { rank: u8, symbol: char },

    #[error("rank {rank}: piece '{piece}' has no player symbol")]
    MissingSymbol { rank: u8, piece: char },

    #[error("rank {rank}: promotion marker does not follow a piece")]
    OrphanPromotionMarker { rank: u8 },

    #[error("rank {rank}: {player} cannot own '{piece}'")]
    WrongTeam { rank: u8, piece: char, player: Player },

    #[error("rank {rank}: unexpected character '{ch}'")]
    UnexpectedChar { rank: u8, ch: char },
}

/// Writes the extended placement field for `table`.
///
/// Squares without an entry are written as empty. With `include_promoted`,
/// promoted pieces carry the `~` marker.
pub fn encode(table: &OwnershipTable, include_promoted: bool) -> String {
    let mut out = String::with_capacity(160);

    for rank in (0..8).rev() {
        let mut empty = 0u8;
        for square in Square::rank_squares(rank) {
            match table.get(square) {
                None => empty += 1,
                Some(entry) => {
                    if empty > 0 {
                        out.push((b'0' + empty) as char);
                        empty = 0;
                    }
                    out.push(entry.piece.to_fen_char());
                    if include_promoted && entry.promoted {
                        out.push(PROMOTED_MARKER);
                    }
                    out.push(entry.player.symbol());
                }
            }
        }
        if empty > 0 {
            out.push((b'0' + empty) as char);
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out
}

/// A piece read from the text whose owner symbol has not been seen yet.
struct Pending {
    piece: Piece,
    letter: char,
    promoted: bool,
    square: Square,
}

/// Parses an extended placement field into an ownership table.
///
/// Parsing is all-or-nothing: the returned table is only built once the
/// whole field has been validated.
pub fn decode(placement: &str) -> Result<OwnershipTable, ExtendedFenError> {
    if placement.is_empty() {
        return Err(ExtendedFenError::Empty);
    }

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(ExtendedFenError::RankCount(ranks.len()));
    }

    let mut table = OwnershipTable::new();
    for (i, text) in ranks.iter().enumerate() {
        let rank_index = 7 - i as u8;
        decode_rank(text, rank_index, &mut table)?;
    }
    Ok(table)
}

fn decode_rank(text: &str, rank_index: u8, table: &mut OwnershipTable) -> Result<(), ExtendedFenError> {
    let rank = rank_index + 1;
    let mut columns: u32 = 0;
    let mut pending: Option<Pending> = None;
    let mut previous_digit: Option<char> = None;

    for c in text.chars() {
        if let Some(digit) = c.to_digit(10) {
            if let Some(p) = &pending {
                return Err(ExtendedFenError::MissingSymbol { rank, piece: p.letter });
            }
            if let Some(previous) = previous_digit {
                return Err(ExtendedFenError::ConsecutiveDigits {
                    rank,
                    previous,
                    digit: c,
                });
            }
            if !(1..=8).contains(&digit) {
                return Err(ExtendedFenError::InvalidDigit { rank, digit: c });
            }
            columns += digit;
            previous_digit = Some(c);
            continue;
        }
        previous_digit = None;

        if let Some(piece) = Piece::from_fen_char(c) {
            if let Some(p) = &pending {
                return Err(ExtendedFenError::MissingSymbol { rank, piece: p.letter });
            }
            // Overflowing columns are reported once the rank is complete.
            let square = Square::new(columns.min(7) as u8, rank_index).unwrap_or(Square::A1);
            pending = Some(Pending {
                piece,
                letter: c,
                promoted: false,
                square,
            });
            columns += 1;
        } else if c == PROMOTED_MARKER {
            match &mut pending {
                Some(p) if !p.promoted => p.promoted = true,
                _ => return Err(ExtendedFenError::OrphanPromotionMarker { rank }),
            }
        } else if Player::is_symbol(c) {
            let p = pending
                .take()
                .ok_or(ExtendedFenError::OrphanSymbol { rank, symbol: c })?;
            let player = Player::from_symbol(c)
                .map_err(|_| ExtendedFenError::UnexpectedChar { rank, ch: c })?;
            if player.team() != p.piece.color {
                return Err(ExtendedFenError::WrongTeam {
                    rank,
                    piece: p.letter,
                    player,
                });
            }
            if columns <= 8 {
                table.insert(
                    p.square,
                    Ownership {
                        player,
                        piece: p.piece,
                        promoted: p.promoted,
                    },
                );
            }
        } else {
            return Err(ExtendedFenError::UnexpectedChar { rank, ch: c });
        }
    }

    if let Some(p) = pending {
        return Err(ExtendedFenError::MissingSymbol { rank, piece: p.letter });
    }
    if columns != 8 {
        return Err(ExtendedFenError::ColumnCount { rank, columns });
    }
    Ok(())
}

/// Removes owner symbols and promotion markers, leaving standard FEN text.
///
/// Anything after the placement field (side to move, castling, ...) is
/// passed through untouched.
pub fn strip_ownership(text: &str) -> String {
    text.chars()
        .filter(|&c| !Player::is_symbol(c) && c != PROMOTED_MARKER)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, PieceKind};

    const START: &str =
        "r♥n♣b♥q♥k♣b♣n♣r♥/p♥p♣p♣p♥p♥p♥p♣p♣/8/8/8/8/P♠P♦P♦P♦P♠P♦P♠P♠/R♦N♠B♠Q♦K♦B♠N♦R♠";

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn decode_start_position() {
        let table = decode(START).unwrap();
        assert_eq!(table.len(), 32);
        assert_eq!(table.owner(sq("a8")), Some(Player::Hearts));
        assert_eq!(table.owner(sq("e8")), Some(Player::Clubs));
        assert_eq!(table.owner(sq("b7")), Some(Player::Clubs));
        assert_eq!(table.owner(sq("a2")), Some(Player::Spades));
        assert_eq!(table.owner(sq("b2")), Some(Player::Diamonds));
        assert_eq!(table.owner(sq("e1")), Some(Player::Diamonds));
        assert_eq!(table.owner(sq("h1")), Some(Player::Spades));
        assert_eq!(
            table.get(sq("d1")).map(|e| e.piece),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
    }

    #[test]
    fn encode_roundtrips_start_position() {
        let table = decode(START).unwrap();
        assert_eq!(encode(&table, true), START);
    }

    #[test]
    fn strip_start_position() {
        assert_eq!(
            strip_ownership(START),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
        assert_eq!(strip_ownership("8/8/8/8/8/8/8/8 w - - 0 1"), "8/8/8/8/8/8/8/8 w - - 0 1");
    }

    #[test]
    fn empty_board() {
        let table = decode("8/8/8/8/8/8/8/8").unwrap();
        assert!(table.is_empty());
        assert_eq!(encode(&table, false), "8/8/8/8/8/8/8/8");
    }

    #[test]
    fn mixed_digits_and_pieces() {
        let table = decode("4k♣3/8/8/3p♥4/4P♦3/8/8/4K♠2R♦").unwrap();
        assert_eq!(table.len(), 5);
        assert_eq!(table.owner(sq("e8")), Some(Player::Clubs));
        assert_eq!(table.owner(sq("d5")), Some(Player::Hearts));
        assert_eq!(table.owner(sq("e4")), Some(Player::Diamonds));
        assert_eq!(table.owner(sq("h1")), Some(Player::Diamonds));
        assert_eq!(encode(&table, false), "4k♣3/8/8/3p♥4/4P♦3/8/8/4K♠2R♦");
    }

    #[test]
    fn promoted_marker() {
        let table = decode("Q~♠7/8/8/8/8/8/8/8").unwrap();
        let entry = table.get(Square::A8).unwrap();
        assert!(entry.promoted);
        assert_eq!(entry.player, Player::Spades);
        assert_eq!(encode(&table, true), "Q~♠7/8/8/8/8/8/8/8");
        assert_eq!(encode(&table, false), "Q♠7/8/8/8/8/8/8/8");
    }

    #[test]
    fn wrong_rank_count() {
        assert_eq!(decode("8/8/8/8/8/8/8"), Err(ExtendedFenError::RankCount(7)));
        assert_eq!(
            decode("8/8/8/8/8/8/8/8/8"),
            Err(ExtendedFenError::RankCount(9))
        );
        assert_eq!(decode(""), Err(ExtendedFenError::Empty));
    }

    #[test]
    fn consecutive_digits_rejected() {
        assert_eq!(
            decode("44/8/8/8/8/8/8/8"),
            Err(ExtendedFenError::ConsecutiveDigits {
                rank: 8,
                previous: '4',
                digit: '4'
            })
        );
    }

    #[test]
    fn invalid_digits_rejected() {
        assert!(matches!(
            decode("8/8/8/8/8/8/8/9"),
            Err(ExtendedFenError::InvalidDigit { rank: 1, digit: '9' })
        ));
        assert!(matches!(
            decode("0/8/8/8/8/8/8/8"),
            Err(ExtendedFenError::InvalidDigit { rank: 8, .. })
        ));
    }

    #[test]
    fn column_sum_must_be_eight() {
        assert_eq!(
            decode("7/8/8/8/8/8/8/8"),
            Err(ExtendedFenError::ColumnCount { rank: 8, columns: 7 })
        );
        assert_eq!(
            decode("8/8/8/8/8/8/8/K♠8"),
            Err(ExtendedFenError::ColumnCount { rank: 1, columns: 9 })
        );
    }

    #[test]
    fn orphan_symbol_rejected() {
        assert_eq!(
            decode("♠8/8/8/8/8/8/8/8"),
            Err(ExtendedFenError::OrphanSymbol { rank: 8, symbol: '♠' })
        );
        assert_eq!(
            decode("8/8/8/8/8/8/8/K♠♠7"),
            Err(ExtendedFenError::OrphanSymbol { rank: 1, symbol: '♠' })
        );
        assert!(matches!(
            decode("8/8/8/8/8/8/8/4♦4"),
            Err(ExtendedFenError::OrphanSymbol { rank: 1, .. })
        ));
    }

    #[test]
    fn missing_symbol_rejected() {
        assert_eq!(
            decode("8/8/8/8/8/8/8/K7"),
            Err(ExtendedFenError::MissingSymbol { rank: 1, piece: 'K' })
        );
        assert_eq!(
            decode("8/8/8/8/8/8/8/7K"),
            Err(ExtendedFenError::MissingSymbol { rank: 1, piece: 'K' })
        );
        assert!(matches!(
            decode("rnbqkbnr/8/8/8/8/8/8/8"),
            Err(ExtendedFenError::MissingSymbol { rank: 8, piece: 'r' })
        ));
    }

    #[test]
    fn promotion_marker_placement() {
        assert_eq!(
            decode("~7/8/8/8/8/8/8/8"),
            Err(ExtendedFenError::OrphanPromotionMarker { rank: 8 })
        );
        assert_eq!(
            decode("Q~~♠7/8/8/8/8/8/8/8"),
            Err(ExtendedFenError::OrphanPromotionMarker { rank: 8 })
        );
        assert_eq!(
            decode("Q♠~7/8/8/8/8/8/8/8"),
            Err(ExtendedFenError::OrphanPromotionMarker { rank: 8 })
        );
    }

    #[test]
    fn owner_must_play_piece_color() {
        assert_eq!(
            decode("8/8/8/8/8/8/8/K♥7"),
            Err(ExtendedFenError::WrongTeam {
                rank: 1,
                piece: 'K',
                player: Player::Hearts
            })
        );
    }

    #[test]
    fn unknown_characters_rejected() {
        assert_eq!(
            decode("8/8/8/8/8/8/8/K♤7"),
            Err(ExtendedFenError::UnexpectedChar { rank: 1, ch: '♤' })
        );
        assert!(matches!(
            decode("8/8/8/8/8/8/8/X7"),
            Err(ExtendedFenError::UnexpectedChar { rank: 1, ch: 'X' })
        ));
    }

    #[test]
    fn error_messages_name_the_rank() {
        let err = decode("8/8/8/5/8/8/8/8").unwrap_err();
        assert_eq!(err.to_string(), "rank 5 has 5 columns, expected 8");
    }
}
