//! Standard Algebraic Notation matched against a restricted move list.
//!
//! The rules engine resolves SAN against every legal move, so "Nd2" is
//! ambiguous when two knights can reach d2 even if only one of them belongs
//! to the player on turn. [`SanPattern`] parses the notation once and is then
//! matched against whichever candidate moves the caller supplies.

use teamchess_core::{Move, MoveKind, PieceKind, Square};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SanError {
    #[error("empty SAN string")]
    Empty,

    #[error("invalid SAN format: {0}")]
    InvalidFormat(String),

    #[error("no candidate move matches: {0}")]
    NoMatchingMove(String),

    #[error("ambiguous move: {0}")]
    AmbiguousMove(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Castle(MoveKind),
    Square {
        piece: PieceKind,
        to: Square,
        from_file: Option<u8>,
        from_rank: Option<u8>,
        promotion: Option<PieceKind>,
    },
}

/// A parsed SAN move, not yet tied to a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanPattern {
    text: String,
    target: Target,
}

impl SanPattern {
    pub fn parse(san: &str) -> Result<Self, SanError> {
        let text = san.trim();
        if text.is_empty() {
            return Err(SanError::Empty);
        }
        let core = text.trim_end_matches(['+', '#', '!', '?']);

        let target = match core {
            "O-O" | "0-0" => Target::Castle(MoveKind::CastleKingside),
            "O-O-O" | "0-0-0" => Target::Castle(MoveKind::CastleQueenside),
            _ => parse_square_move(core)
                .ok_or_else(|| SanError::InvalidFormat(text.to_string()))?,
        };

        Ok(SanPattern {
            text: text.to_string(),
            target,
        })
    }

    /// Returns true if `mv`, made by a piece of kind `moved`, fits the pattern.
    pub fn matches(&self, mv: Move, moved: Option<PieceKind>) -> bool {
        match self.target {
            Target::Castle(kind) => mv.kind == kind,
            Target::Square {
                piece,
                to,
                from_file,
                from_rank,
                promotion,
            } => {
                !mv.kind.is_castling()
                    && moved == Some(piece)
                    && mv.to == to
                    && from_file.map_or(true, |file| mv.from.file() == file)
                    && from_rank.map_or(true, |rank| mv.from.rank() == rank)
                    && mv.promotion == promotion
            }
        }
    }

    /// Picks the single candidate that fits the pattern.
    pub fn resolve<I, F>(&self, candidates: I, moved: F) -> Result<Move, SanError>
    where
        I: IntoIterator<Item = Move>,
        F: Fn(Square) -> Option<PieceKind>,
    {
        let mut matching = candidates
            .into_iter()
            .filter(|&mv| self.matches(mv, moved(mv.from)));
        match (matching.next(), matching.next()) {
            (Some(mv), None) => Ok(mv),
            (Some(_), Some(_)) => Err(SanError::AmbiguousMove(self.text.clone())),
            (None, _) => Err(SanError::NoMatchingMove(self.text.clone())),
        }
    }
}

fn parse_square_move(core: &str) -> Option<Target> {
    let mut chars: Vec<char> = core.chars().filter(|&c| c != 'x').collect();

    let piece = match chars.first() {
        Some(&c) if c.is_ascii_uppercase() => {
            chars.remove(0);
            match PieceKind::from_char(c.to_ascii_lowercase()) {
                Some(PieceKind::Pawn) | None => return None,
                Some(kind) => kind,
            }
        }
        _ => PieceKind::Pawn,
    };

    // "e8=Q" or "e8Q"
    let mut promotion = None;
    if chars.len() >= 3 && piece == PieceKind::Pawn {
        if let Some(&last) = chars.last() {
            if last.is_ascii_uppercase() {
                chars.pop();
                if chars.last() == Some(&'=') {
                    chars.pop();
                }
                promotion = match PieceKind::from_char(last.to_ascii_lowercase()) {
                    Some(PieceKind::Pawn | PieceKind::King) | None => return None,
                    kind => kind,
                };
            }
        }
    }

    if chars.len() < 2 {
        return None;
    }
    let split = chars.len() - 2;
    let to: String = chars[split..].iter().collect();
    let to = Square::from_algebraic(&to)?;

    let mut from_file = None;
    let mut from_rank = None;
    for &c in &chars[..split] {
        match c {
            'a'..='h' if from_file.is_none() && from_rank.is_none() => {
                from_file = Some(c as u8 - b'a')
            }
            '1'..='8' if from_rank.is_none() => from_rank = Some(c as u8 - b'1'),
            _ => return None,
        }
    }

    Some(Target::Square {
        piece,
        to,
        from_file,
        from_rank,
        promotion,
    })
}
