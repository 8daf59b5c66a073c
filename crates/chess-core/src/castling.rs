//! Castling rights.

use crate::Color;
use std::fmt;

/// The two castling wings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wing {
    Kingside,
    Queenside,
}

/// Castling-right flags, one per color and wing.
///
/// During play rights only ever get revoked; restoring them is the job of
/// move undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    const fn flag(color: Color, wing: Wing) -> u8 {
        match (color, wing) {
            (Color::White, Wing::Kingside) => Self::WHITE_KINGSIDE,
            (Color::White, Wing::Queenside) => Self::WHITE_QUEENSIDE,
            (Color::Black, Wing::Kingside) => Self::BLACK_KINGSIDE,
            (Color::Black, Wing::Queenside) => Self::BLACK_QUEENSIDE,
        }
    }

    /// Returns true if `color` still holds the right to castle on `wing`.
    #[inline]
    pub const fn has(self, color: Color, wing: Wing) -> bool {
        self.0 & Self::flag(color, wing) != 0
    }

    /// Revokes a single right.
    #[inline]
    pub fn revoke(&mut self, color: Color, wing: Wing) {
        self.0 &= !Self::flag(color, wing);
    }

    /// Revokes both rights of a color.
    #[inline]
    pub fn revoke_color(&mut self, color: Color) {
        self.revoke(color, Wing::Kingside);
        self.revoke(color, Wing::Queenside);
    }

    /// Parses the castling field of position text (`KQkq` subset or `-`).
    ///
    /// Returns `None` on any letter outside `KQkq`.
    pub fn from_fen(field: &str) -> Option<Self> {
        if field == "-" {
            return Some(Self::NONE);
        }
        if field.is_empty() {
            return None;
        }
        let mut rights = Self::NONE;
        for c in field.chars() {
            rights.0 |= match c {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                _ => return None,
            };
        }
        Some(rights)
    }
}

impl fmt::Display for CastlingRights {
    /// Formats in canonical `KQkq` order, or `-` when no right is held.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }
        for (color, wing, c) in [
            (Color::White, Wing::Kingside, 'K'),
            (Color::White, Wing::Queenside, 'Q'),
            (Color::Black, Wing::Kingside, 'k'),
            (Color::Black, Wing::Queenside, 'q'),
        ] {
            if self.has(color, wing) {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}
