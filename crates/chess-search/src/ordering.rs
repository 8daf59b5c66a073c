//! Move ordering heuristics.
//!
//! Ordering only affects how early alpha-beta cuts off, never which score a
//! search returns.

use crate::eval::Evaluator;
use chess_core::{File, Move, MoveKind, Piece, Rank};
use chess_engine::{Board, MoveList};
use std::cmp::Reverse;

const CASTLE_BONUS: i32 = 50;
const CENTER_PAWN_BONUS: i32 = 10;

/// Heuristic priority of `m` on `board`; higher is searched first.
///
/// Captures score victim value times ten minus attacker value, promotions
/// eight times the new piece's value. Castling and pawn moves onto c4-f5
/// get small bonuses.
pub fn score_move<E: Evaluator + ?Sized>(board: &Board, m: Move, evaluator: &E) -> i32 {
    let mover = board.piece_at(m.from()).map(|(piece, _)| piece);
    let mut score = 0;

    if m.is_capture() {
        let victim = if m.kind() == MoveKind::EnPassant {
            Some(Piece::Pawn)
        } else {
            board.piece_at(m.to()).map(|(piece, _)| piece)
        };
        let victim_value = victim.map_or(0, |p| evaluator.piece_value(p));
        let mover_value = mover.map_or(0, |p| evaluator.piece_value(p));
        score += victim_value * 10 - mover_value;
    }

    if let Some(promo) = m.promotion_piece() {
        score += evaluator.piece_value(promo) * 8;
    }

    if m.is_castle() {
        score += CASTLE_BONUS;
    }

    if mover == Some(Piece::Pawn) {
        let to = m.to();
        let central_file = (File::C..=File::F).contains(&to.file());
        let central_rank = matches!(to.rank(), Rank::R4 | Rank::R5);
        if central_file && central_rank {
            score += CENTER_PAWN_BONUS;
        }
    }

    score
}

/// Sorts `moves` by descending [`score_move`].
pub fn order_moves<E: Evaluator + ?Sized>(moves: &mut MoveList, board: &Board, evaluator: &E) {
    moves
        .as_mut_slice()
        .sort_by_cached_key(|&m| Reverse(score_move(board, m, evaluator)));
}
