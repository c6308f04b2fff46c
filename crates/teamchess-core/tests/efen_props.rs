//! Property tests for extended FEN and the starting allocation.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use teamchess_core::{allocation, efen, Color, Ownership, OwnershipTable, Piece, PieceKind, Player, Square};

/// A random but team-consistent ownership table.
fn arb_table() -> impl Strategy<Value = OwnershipTable> {
    let entry = (0usize..4, 0usize..6, any::<bool>());
    proptest::collection::vec(proptest::option::weighted(0.4, entry), 64).prop_map(|cells| {
        let mut table = OwnershipTable::new();
        for (index, cell) in cells.into_iter().enumerate() {
            if let Some((player, kind, promoted)) = cell {
                let player = Player::ALL[player];
                let piece = Piece::new(PieceKind::ALL[kind], player.team());
                let square = Square::from_index(index as u8).unwrap();
                table.insert(
                    square,
                    Ownership {
                        player,
                        piece,
                        promoted,
                    },
                );
            }
        }
        table
    })
}

proptest! {
    #[test]
    fn encode_then_decode_is_identity(table in arb_table()) {
        let text = efen::encode(&table, true);
        prop_assert_eq!(efen::decode(&text).unwrap(), table);
    }

    #[test]
    fn stripped_text_has_no_owner_marks(table in arb_table()) {
        let plain = efen::strip_ownership(&efen::encode(&table, true));
        prop_assert!(plain.chars().all(|c| !Player::is_symbol(c) && c != efen::PROMOTED_MARKER));
        prop_assert_eq!(plain.split('/').count(), 8);
    }

    #[test]
    fn decode_never_panics(text in "\\PC{0,80}") {
        let _ = efen::decode(&text);
    }

    #[test]
    fn decode_never_panics_on_near_fen(text in "[1-9pnbrqkPNBRQK♠♥♦♣~/]{0,90}") {
        if let Ok(table) = efen::decode(&text) {
            // Anything accepted re-encodes to something accepted.
            let again = efen::decode(&efen::encode(&table, true)).unwrap();
            prop_assert_eq!(again, table);
        }
    }

    #[test]
    fn allocation_is_balanced_for_any_seed(seed in any::<u64>()) {
        let table = allocation::allocate(&mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(table.len(), 32);
        for color in Color::ALL {
            let [first, second] = color.players();
            prop_assert_eq!(table.squares_of(first).len(), 8);
            prop_assert_eq!(table.squares_of(second).len(), 8);
        }
    }
}
