//! Move representation and coordinate move text.

use crate::{Piece, Square};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of move kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Quiet move of any piece.
    Normal,
    /// Pawn advancing two squares from its starting rank.
    DoublePawnPush,
    /// Castling on the king's wing (O-O).
    KingCastle,
    /// Castling on the queen's wing (O-O-O).
    QueenCastle,
    /// Capture of the piece standing on the destination square.
    Capture,
    /// Pawn capture of a pawn that just double-pushed past it.
    EnPassant,
    /// Quiet pawn push onto the last rank.
    Promotion,
    /// Pawn capture onto the last rank.
    PromotionCapture,
}

impl MoveKind {
    /// Returns true for kinds that remove an enemy piece.
    #[inline]
    pub const fn is_capture(self) -> bool {
        matches!(
            self,
            MoveKind::Capture | MoveKind::EnPassant | MoveKind::PromotionCapture
        )
    }

    /// Returns true for kinds that replace the pawn with another piece.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self, MoveKind::Promotion | MoveKind::PromotionCapture)
    }

    /// Returns true for both castling kinds.
    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self, MoveKind::KingCastle | MoveKind::QueenCastle)
    }
}

const CODE_NORMAL: u16 = 0;
const CODE_DOUBLE_PUSH: u16 = 1;
const CODE_KING_CASTLE: u16 = 2;
const CODE_QUEEN_CASTLE: u16 = 3;
const CODE_CAPTURE: u16 = 4;
const CODE_EN_PASSANT: u16 = 5;
const CODE_PROMOTION: u16 = 0b1000;
const CODE_PROMOTION_CAPTURE: u16 = 0b1100;

/// A chess move.
///
/// Encoded in 16 bits: 6 bits from, 6 bits to, 4 bits kind code. Promotion
/// codes carry the promotion piece in their two low bits. Two moves are equal
/// exactly when their encodings are equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// Placeholder value for fixed-size move buffers; never generated.
    pub const NULL: Move = Move(0);

    #[inline]
    const fn encode(from: Square, to: Square, code: u16) -> Self {
        Move((from.index() as u16) | ((to.index() as u16) << 6) | (code << 12))
    }

    /// Creates a non-promotion move of the given kind.
    ///
    /// Promotion kinds are mapped to a queen promotion; use
    /// [`Move::promotion`] to choose the piece.
    #[inline]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        let code = match kind {
            MoveKind::Normal => CODE_NORMAL,
            MoveKind::DoublePawnPush => CODE_DOUBLE_PUSH,
            MoveKind::KingCastle => CODE_KING_CASTLE,
            MoveKind::QueenCastle => CODE_QUEEN_CASTLE,
            MoveKind::Capture => CODE_CAPTURE,
            MoveKind::EnPassant => CODE_EN_PASSANT,
            MoveKind::Promotion => CODE_PROMOTION | 3,
            MoveKind::PromotionCapture => CODE_PROMOTION_CAPTURE | 3,
        };
        Self::encode(from, to, code)
    }

    /// Creates a promotion to `piece`, capturing when `capture` is set.
    ///
    /// `piece` must be a knight, bishop, rook or queen.
    #[inline]
    pub const fn promotion(from: Square, to: Square, piece: Piece, capture: bool) -> Self {
        let base = if capture {
            CODE_PROMOTION_CAPTURE
        } else {
            CODE_PROMOTION
        };
        let bits = match piece {
            Piece::Knight => 0,
            Piece::Bishop => 1,
            Piece::Rook => 2,
            _ => 3,
        };
        Self::encode(from, to, base | bits)
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        Square::from_index_masked((self.0 & 0x3F) as u8)
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        Square::from_index_masked(((self.0 >> 6) & 0x3F) as u8)
    }

    #[inline]
    const fn code(self) -> u16 {
        self.0 >> 12
    }

    /// Returns the move kind.
    #[inline]
    pub const fn kind(self) -> MoveKind {
        let code = self.code();
        if code & CODE_PROMOTION_CAPTURE == CODE_PROMOTION_CAPTURE {
            return MoveKind::PromotionCapture;
        }
        if code & CODE_PROMOTION != 0 {
            return MoveKind::Promotion;
        }
        match code {
            CODE_DOUBLE_PUSH => MoveKind::DoublePawnPush,
            CODE_KING_CASTLE => MoveKind::KingCastle,
            CODE_QUEEN_CASTLE => MoveKind::QueenCastle,
            CODE_CAPTURE => MoveKind::Capture,
            CODE_EN_PASSANT => MoveKind::EnPassant,
            _ => MoveKind::Normal,
        }
    }

    /// Returns the promotion piece for promotion kinds.
    #[inline]
    pub const fn promotion_piece(self) -> Option<Piece> {
        if self.code() & CODE_PROMOTION == 0 {
            return None;
        }
        Some(match self.code() & 0b11 {
            0 => Piece::Knight,
            1 => Piece::Bishop,
            2 => Piece::Rook,
            _ => Piece::Queen,
        })
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.kind().is_capture()
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.kind().is_promotion()
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        self.kind().is_castle()
    }

    /// Returns the coordinate text for this move (e.g., "e2e4", "e7e8q").
    pub fn to_text(self) -> String {
        match self.promotion_piece() {
            Some(piece) => format!("{}{}{}", self.from(), self.to(), piece.to_char()),
            None => format!("{}{}", self.from(), self.to()),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {:?})", self.to_text(), self.kind())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

/// Errors from parsing coordinate move text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveTextError {
    #[error("move text must be 4 or 5 characters, got {0:?}")]
    InvalidLength(String),

    #[error("invalid square {0:?}")]
    InvalidSquare(String),

    #[error("invalid promotion piece {0:?}, expected one of q, r, b, n")]
    InvalidPromotion(char),
}

/// Coordinate move text: from-square, to-square and optional promotion piece.
///
/// The text carries no move kind; a board resolves it against its legal
/// moves to obtain a [`Move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveText {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Piece>,
}

impl MoveText {
    /// Returns true if `m` has the same squares and promotion piece.
    pub fn matches(&self, m: Move) -> bool {
        m.from() == self.from && m.to() == self.to && m.promotion_piece() == self.promotion
    }
}

impl FromStr for MoveText {
    type Err = MoveTextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(MoveTextError::InvalidLength(s.to_string()));
        }
        let square = |text: &str| {
            Square::from_algebraic(text).ok_or_else(|| MoveTextError::InvalidSquare(text.to_string()))
        };
        let from = square(&s[0..2])?;
        let to = square(&s[2..4])?;
        let promotion = match s[4..].chars().next() {
            Some(c) => Some(Piece::from_promotion_char(c).ok_or(MoveTextError::InvalidPromotion(c))?),
            None => None,
        };
        Ok(MoveText { from, to, promotion })
    }
}

impl fmt::Display for MoveText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(piece) = self.promotion {
            write!(f, "{}", piece.to_char())?;
        }
        Ok(())
    }
}
