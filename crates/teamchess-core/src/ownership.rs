//! Per-square record of which player owns the piece standing there.

use crate::{Move, Piece, Player, Square};

/// One ownership entry: who owns the piece on a square, and what that piece is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ownership {
    pub player: Player,
    pub piece: Piece,
    /// The piece reached its square by promotion (written as `~` in extended FEN).
    pub promoted: bool,
}

impl Ownership {
    #[inline]
    pub const fn new(player: Player, piece: Piece) -> Self {
        Ownership {
            player,
            piece,
            promoted: false,
        }
    }
}

/// Fixed-size ownership table indexed by square.
///
/// An entry must exist for a square exactly when that square is occupied on
/// the rules engine's board, and the entry's player must play the piece's color.
#[derive(Clone, PartialEq, Eq)]
pub struct OwnershipTable {
    entries: [Option<Ownership>; 64],
}

impl OwnershipTable {
    /// Creates a table with no entries.
    pub const fn new() -> Self {
        OwnershipTable {
            entries: [None; 64],
        }
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<&Ownership> {
        self.entries[square.index() as usize].as_ref()
    }

    /// Returns the player owning the piece on `square`, if any.
    #[inline]
    pub fn owner(&self, square: Square) -> Option<Player> {
        self.get(square).map(|entry| entry.player)
    }

    /// Inserts an entry, returning the one it replaced.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the player does not play the piece's color.
    pub fn insert(&mut self, square: Square, entry: Ownership) -> Option<Ownership> {
        debug_assert_eq!(
            entry.player.team(),
            entry.piece.color,
            "{} cannot own {} on {}",
            entry.player,
            entry.piece,
            square
        );
        self.entries[square.index() as usize].replace(entry)
    }

    #[inline]
    pub fn remove(&mut self, square: Square) -> Option<Ownership> {
        self.entries[square.index() as usize].take()
    }

    pub fn clear(&mut self) {
        self.entries = [None; 64];
    }

    /// Number of occupied entries.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    /// Iterates entries in ascending square order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, &Ownership)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|entry| (sq, entry)))
    }

    /// Squares owned by `player`, ascending.
    pub fn squares_of(&self, player: Player) -> Vec<Square> {
        self.iter()
            .filter(|(_, entry)| entry.player == player)
            .map(|(sq, _)| sq)
            .collect()
    }

    /// Applies a legal move to the table.
    ///
    /// The destination inherits the origin's entry and anything captured
    /// there is dropped. En passant drops the bypassed pawn's entry, castling
    /// carries the rook's entry (and its own owner) to the rook's new square,
    /// and promotion rewrites the cached piece and marks it promoted.
    ///
    /// Returns the captured entry, if any.
    pub fn record_move(&mut self, mv: &Move) -> Option<Ownership> {
        let mut captured = self.remove(mv.to);
        if let Some(victim) = mv.en_passant_victim() {
            captured = self.remove(victim);
        }

        if let Some(mut entry) = self.remove(mv.from) {
            if let Some(kind) = mv.promotion {
                entry.piece = Piece::new(kind, entry.piece.color);
                entry.promoted = true;
            }
            self.insert(mv.to, entry);
        }

        if let Some((rook_from, rook_to)) = mv.castling_rook() {
            if let Some(rook) = self.remove(rook_from) {
                self.insert(rook_to, rook);
            }
        }

        captured
    }
}

impl Default for OwnershipTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OwnershipTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
