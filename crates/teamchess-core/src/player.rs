//! The four seated players and their turn cycle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Color;

/// Returned when a character is not one of the four player symbols.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("unknown player symbol '{0}'")]
pub struct UnknownPlayerSymbol(pub char);

/// Returned when a player name or symbol given as text cannot be resolved.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown player '{0}'")]
pub struct UnknownPlayer(pub String);

/// One of the four seated players.
///
/// Turns rotate Spades → Hearts → Diamonds → Clubs → Spades, so the
/// side to move alternates between white and black just as in standard chess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
#[repr(u8)]
pub enum Player {
    Spades = 0,
    Hearts = 1,
    Diamonds = 2,
    Clubs = 3,
}

impl Player {
    /// All players in turn order, starting with the opening player.
    pub const ALL: [Player; 4] = [
        Player::Spades,
        Player::Hearts,
        Player::Diamonds,
        Player::Clubs,
    ];

    /// Returns the index in turn order (0-3).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the player who moves after this one.
    #[inline]
    pub const fn successor(self) -> Player {
        Self::ALL[(self.index() + 1) % 4]
    }

    /// Returns the color this player's pieces belong to.
    #[inline]
    pub const fn team(self) -> Color {
        match self {
            Player::Spades | Player::Diamonds => Color::White,
            Player::Hearts | Player::Clubs => Color::Black,
        }
    }

    /// Returns the card-suit symbol used in extended FEN.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            Player::Spades => '♠',
            Player::Hearts => '♥',
            Player::Diamonds => '♦',
            Player::Clubs => '♣',
        }
    }

    /// Resolves a card-suit symbol.
    pub const fn from_symbol(symbol: char) -> Result<Player, UnknownPlayerSymbol> {
        match symbol {
            '♠' => Ok(Player::Spades),
            '♥' => Ok(Player::Hearts),
            '♦' => Ok(Player::Diamonds),
            '♣' => Ok(Player::Clubs),
            other => Err(UnknownPlayerSymbol(other)),
        }
    }

    /// Returns true if `c` is one of the four player symbols.
    #[inline]
    pub const fn is_symbol(c: char) -> bool {
        matches!(c, '♠' | '♥' | '♦' | '♣')
    }

    /// Returns the lowercase suit name.
    pub const fn name(self) -> &'static str {
        match self {
            Player::Spades => "spades",
            Player::Hearts => "hearts",
            Player::Diamonds => "diamonds",
            Player::Clubs => "clubs",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl From<Player> for char {
    fn from(player: Player) -> char {
        player.symbol()
    }
}

impl TryFrom<char> for Player {
    type Error = UnknownPlayerSymbol;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        Player::from_symbol(symbol)
    }
}

/// Accepts either the suit symbol or the suit name ("spades", "Hearts", ...).
impl FromStr for Player {
    type Err = UnknownPlayer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Ok(player) = Player::from_symbol(c) {
                return Ok(player);
            }
        }
        Player::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPlayer(s.to_string()))
    }
}
