//! Restricting generated moves to the player whose turn it is.

use teamchess_core::{Move, OwnershipTable, Player};

/// Iterator adapter yielding only the moves whose origin `player` owns.
///
/// Order is preserved and nothing is buffered. A move from a square with no
/// ownership entry means the table has drifted from the board; such moves are
/// dropped and reported.
pub struct OwnedMoves<'a, I> {
    inner: I,
    ownership: &'a OwnershipTable,
    player: Player,
}

impl<'a, I> OwnedMoves<'a, I>
where
    I: Iterator<Item = Move>,
{
    pub fn new(inner: I, ownership: &'a OwnershipTable, player: Player) -> Self {
        OwnedMoves {
            inner,
            ownership,
            player,
        }
    }
}

impl<I> Iterator for OwnedMoves<'_, I>
where
    I: Iterator<Item = Move>,
{
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        for mv in self.inner.by_ref() {
            match self.ownership.owner(mv.from) {
                Some(owner) if owner == self.player => return Some(mv),
                Some(_) => {}
                None => {
                    tracing::error!(
                        square = %mv.from,
                        mv = %mv,
                        "ownership invariant violated: move generated from unowned square"
                    );
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// Wraps `moves` so that only `player`'s moves come through.
pub fn owned_by<I>(moves: I, ownership: &OwnershipTable, player: Player) -> OwnedMoves<'_, I::IntoIter>
where
    I: IntoIterator<Item = Move>,
{
    OwnedMoves::new(moves.into_iter(), ownership, player)
}
