//! Static evaluation.
//!
//! Scores are in centipawns and always from White's point of view: positive
//! favors White. The search negates them for Black.

use chess_core::{Color, Piece, Square};
use chess_engine::Board;

/// A static scoring function consulted at search leaves.
///
/// Implementations must be deterministic and must not depend on anything
/// but the board; they run once per leaf, so they should be cheap.
pub trait Evaluator {
    /// White-positive score of `board` in centipawns.
    fn evaluate(&self, board: &Board) -> i32;

    /// Nominal material value of a piece, used for move ordering.
    fn piece_value(&self, piece: Piece) -> i32;
}

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 20_000;

/// Non-king pieces on the board at or below which the endgame terms apply.
const ENDGAME_PIECES: u32 = 12;

// Piece-square tables, laid out as seen from White: the first row is rank 8,
// the last row rank 1.
#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_PST: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_PST: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_MIDDLEGAME_PST: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

#[rustfmt::skip]
const KING_ENDGAME_PST: [i32; 64] = [
    -50,-40,-30,-20,-20,-30,-40,-50,
    -30,-20,-10,  0,  0,-10,-20,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-30,  0,  0,  0,  0,-30,-30,
    -50,-30,-30,-30,-30,-30,-30,-50,
];

/// Material plus piece-square evaluation.
///
/// The king reads the endgame table while it stands on ranks 3 to 6 and the
/// middlegame table otherwise. With few pieces left, the side ahead in
/// material is rewarded for bringing its king toward the other one.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareEvaluator;

impl PieceSquareEvaluator {
    pub fn new() -> Self {
        PieceSquareEvaluator
    }

    /// Table bonus for `piece` of `color` on `sq`.
    pub fn square_bonus(piece: Piece, color: Color, sq: Square) -> i32 {
        // Tables are written rank 8 first, so White reads them flipped.
        let idx = match color {
            Color::White => sq.flip_rank().index() as usize,
            Color::Black => sq.index() as usize,
        };
        match piece {
            Piece::Pawn => PAWN_PST[idx],
            Piece::Knight => KNIGHT_PST[idx],
            Piece::Bishop => BISHOP_PST[idx],
            Piece::Rook => ROOK_PST[idx],
            Piece::Queen => QUEEN_PST[idx],
            Piece::King => {
                if (2..=5).contains(&sq.rank().index()) {
                    KING_ENDGAME_PST[idx]
                } else {
                    KING_MIDDLEGAME_PST[idx]
                }
            }
        }
    }

    fn material(&self, board: &Board, color: Color) -> i32 {
        Piece::ALL
            .iter()
            .map(|&piece| self.piece_value(piece) * board.piece_count(color, piece) as i32)
            .sum()
    }

    fn is_endgame(board: &Board) -> bool {
        let pieces: u32 = Color::ALL
            .iter()
            .flat_map(|&color| {
                [Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]
                    .map(|piece| board.piece_count(color, piece))
            })
            .sum();
        pieces <= ENDGAME_PIECES
    }

    /// King proximity bonus for the side ahead in material.
    fn king_proximity(&self, board: &Board, material_balance: i32) -> i32 {
        let (Some(white), Some(black)) = (
            board.king_square(Color::White),
            board.king_square(Color::Black),
        ) else {
            return 0;
        };
        let distance = (white.file().index() as i32 - black.file().index() as i32).abs()
            + (white.rank().index() as i32 - black.rank().index() as i32).abs();
        if distance <= 2 {
            return 0;
        }
        (14 - distance) * 10 * material_balance.signum()
    }
}

impl Evaluator for PieceSquareEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        let balance = self.material(board, Color::White) - self.material(board, Color::Black);

        let mut positional = 0;
        for color in Color::ALL {
            let sign = if color == Color::White { 1 } else { -1 };
            for piece in Piece::ALL {
                for sq in board.pieces(color, piece) {
                    positional += sign * Self::square_bonus(piece, color, sq);
                }
            }
        }

        let mut score = balance + positional;
        if Self::is_endgame(board) {
            score += self.king_proximity(board, balance);
        }
        score
    }

    fn piece_value(&self, piece: Piece) -> i32 {
        match piece {
            Piece::Pawn => PAWN_VALUE,
            Piece::Knight => KNIGHT_VALUE,
            Piece::Bishop => BISHOP_VALUE,
            Piece::Rook => ROOK_VALUE,
            Piece::Queen => QUEEN_VALUE,
            Piece::King => KING_VALUE,
        }
    }
}
