//! Position text (FEN) parsing and formatting.
//!
//! Six space-separated fields: piece placement from rank 8 down to rank 1,
//! side to move, castling rights, en-passant target, halfmove clock and
//! fullmove number. The two clock fields may be omitted.

use crate::{CastlingRights, Color, Piece, Rank, Square};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 to 6 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// A fully parsed position text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Occupant of each square, indexed by [`Square::index`].
    pub placement: [Option<(Piece, Color)>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Fen {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::InvalidFieldCount(fields.len()));
        }

        let placement = Self::parse_placement(fields[0])?;

        let mut side = fields[1].chars();
        let side_to_move = match (side.next().and_then(Color::from_fen_char), side.next()) {
            (Some(color), None) => color,
            _ => return Err(FenError::InvalidActiveColor(fields[1].to_string())),
        };

        let castling = CastlingRights::from_fen(fields[2])
            .ok_or_else(|| FenError::InvalidCastlingRights(fields[2].to_string()))?;

        let en_passant = Self::parse_en_passant(fields[3])?;

        let halfmove_clock = match fields.get(4) {
            Some(field) => field
                .parse::<u32>()
                .map_err(|_| FenError::InvalidHalfmoveClock(field.to_string()))?,
            None => 0,
        };

        let fullmove_number = match fields.get(5) {
            Some(field) => field
                .parse::<u32>()
                .map_err(|_| FenError::InvalidFullmoveNumber(field.to_string()))?,
            None => 1,
        };

        Ok(Fen {
            placement,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_placement(field: &str) -> Result<[Option<(Piece, Color)>; 64], FenError> {
        let ranks: Vec<&str> = field.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut placement = [None; 64];
        for (i, rank_text) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file = 0u8;
            for c in rank_text.chars() {
                if let Some(run) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += run as u8;
                } else if let Some(occupant) = Piece::from_fen_char(c) {
                    if file < 8 {
                        placement[(rank * 8 + file) as usize] = Some(occupant);
                    }
                    file += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        rank + 1
                    )));
                }
                if file > 8 {
                    break;
                }
            }
            if file != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} does not describe exactly 8 squares",
                    rank + 1
                )));
            }
        }
        Ok(placement)
    }

    fn parse_en_passant(field: &str) -> Result<Option<Square>, FenError> {
        if field == "-" {
            return Ok(None);
        }
        match Square::from_algebraic(field) {
            Some(sq) if matches!(sq.rank(), Rank::R3 | Rank::R6) => Ok(Some(sq)),
            _ => Err(FenError::InvalidEnPassantSquare(field.to_string())),
        }
    }

    /// Returns the occupant of a square.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.placement[sq.index() as usize]
    }
}

impl Default for Fen {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}

impl FromStr for Fen {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.placement[(rank * 8 + file) as usize] {
                    Some((piece, color)) => {
                        if empty > 0 {
                            write!(f, "{}", empty)?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.to_fen_char(color))?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{}", empty)?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }

        write!(
            f,
            " {} {} ",
            self.side_to_move.to_fen_char(),
            self.castling
        )?;
        match self.en_passant {
            Some(sq) => write!(f, "{}", sq)?,
            None => write!(f, "-")?,
        }
        write!(f, " {} {}", self.halfmove_clock, self.fullmove_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Wing;

    #[test]
    fn parse_startpos() {
        let fen = Fen::parse(Fen::STARTPOS).unwrap();
        assert_eq!(fen.side_to_move, Color::White);
        assert_eq!(fen.castling, CastlingRights::ALL);
        assert_eq!(fen.en_passant, None);
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);
        assert_eq!(fen.piece_at(Square::E1), Some((Piece::King, Color::White)));
        assert_eq!(fen.piece_at(Square::D8), Some((Piece::Queen, Color::Black)));
        assert_eq!(fen.placement.iter().flatten().count(), 32);
    }

    #[test]
    fn parse_custom_position() {
        let fen = Fen::parse("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3")
            .unwrap();
        assert_eq!(fen.halfmove_clock, 2);
        assert_eq!(fen.fullmove_number, 3);
        assert_eq!(
            fen.piece_at(Square::from_algebraic("c6").unwrap()),
            Some((Piece::Knight, Color::Black))
        );
    }

    #[test]
    fn roundtrip() {
        let original = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let parsed = Fen::parse(original).unwrap();
        assert_eq!(parsed.to_string(), original);
    }

    #[test]
    fn clocks_may_be_omitted() {
        let fen = Fen::parse("8/8/8/8/8/8/8/K6k w - -").unwrap();
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);

        let fen = Fen::parse("8/8/8/8/8/8/8/K6k b - - 7").unwrap();
        assert_eq!(fen.halfmove_clock, 7);
        assert_eq!(fen.fullmove_number, 1);
    }

    #[test]
    fn invalid_field_count() {
        assert_eq!(Fen::parse("invalid"), Err(FenError::InvalidFieldCount(1)));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - 0 1 extra"),
            Err(FenError::InvalidFieldCount(7))
        ));
    }

    #[test]
    fn invalid_active_color() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 x KQkq - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 wb KQkq - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 W KQkq - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
        let black = Fen::parse("8/8/8/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(black.side_to_move, Color::Black);
    }

    #[test]
    fn invalid_piece_placement() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8 w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            Fen::parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            Fen::parse("rnbqkbn/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            Fen::parse("9/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_castling_rights() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w XYZ - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
    }

    #[test]
    fn invalid_en_passant() {
        for bad in ["abc", "x3", "e4"] {
            let text = format!("8/8/8/8/8/8/8/8 w - {} 0 1", bad);
            assert!(matches!(
                Fen::parse(&text),
                Err(FenError::InvalidEnPassantSquare(_))
            ));
        }
    }

    #[test]
    fn invalid_clocks() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - abc 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - 0 xyz"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
    }

    #[test]
    fn partial_castling() {
        let fen = Fen::parse("8/8/8/8/8/8/8/8 w Kq - 0 1").unwrap();
        assert!(fen.castling.has(Color::White, Wing::Kingside));
        assert!(!fen.castling.has(Color::White, Wing::Queenside));
        assert!(fen.castling.has(Color::Black, Wing::Queenside));
        assert_eq!(fen.to_string(), "8/8/8/8/8/8/8/8 w Kq - 0 1");
    }

    #[test]
    fn default_is_startpos() {
        assert_eq!(Fen::default().to_string(), Fen::STARTPOS);
    }

    #[test]
    fn error_display() {
        assert!(FenError::InvalidFieldCount(3).to_string().contains('3'));
        assert!(FenError::InvalidActiveColor("x".into()).to_string().contains('x'));
        assert!(FenError::InvalidEnPassantSquare("z9".into()).to_string().contains("z9"));
    }
}
