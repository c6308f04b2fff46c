//! Core types for four-player team chess.
//!
//! Two teams of two share the white and black piece sets, but every piece is
//! owned by exactly one of the four seated players. This crate provides:
//! - [`Player`] and [`Color`] for the seats, their teams and the turn cycle
//! - [`Square`], [`SquareSet`], [`Piece`] and [`Move`] for board data
//! - [`OwnershipTable`] mapping occupied squares to their owners
//! - [`allocation`] for the random split of starting pieces between teammates
//! - [`efen`] for the extended FEN placement format that records owners
//!
//! Chess legality lives elsewhere; nothing here knows how pieces move.

pub mod allocation;
mod color;
pub mod efen;
mod mov;
mod ownership;
mod piece;
mod player;
mod square;

pub use color::Color;
pub use efen::ExtendedFenError;
pub use mov::{Move, MoveKind};
pub use ownership::{Ownership, OwnershipTable};
pub use piece::{Piece, PieceKind};
pub use player::{Player, UnknownPlayer, UnknownPlayerSymbol};
pub use square::{InvalidSquare, Square, SquareSet};
