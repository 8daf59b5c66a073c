//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator and
//! the make/undo pair together.

use crate::Board;
use chess_core::Move;

/// Counts the leaf nodes of the legal move tree at `depth`.
pub fn perft(board: &Board, depth: u32) -> u64 {
    let mut scratch = board.clone();
    count(&mut scratch, depth)
}

fn count(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for &m in &moves {
        board.apply_move(m);
        nodes += count(board, depth - 1);
        board.undo_move();
    }
    nodes
}

/// Perft split by root move, sorted by move text.
///
/// Useful for finding which root move has an incorrect count.
pub fn perft_divide(board: &Board, depth: u32) -> Vec<(Move, u64)> {
    let mut scratch = board.clone();
    let moves = scratch.legal_moves();
    let mut results = Vec::with_capacity(moves.len());

    for &m in &moves {
        scratch.apply_move(m);
        let nodes = count(&mut scratch, depth.saturating_sub(1));
        scratch.undo_move();
        results.push((m, nodes));
    }

    results.sort_by_key(|(m, _)| m.to_text());
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn perft_fen(fen: &str, depth: u32) -> u64 {
        perft(&Board::from_fen(fen).unwrap(), depth)
    }

    #[test]
    fn perft_startpos_shallow() {
        let board = Board::startpos();
        assert_eq!(perft(&board, 0), 1);
        assert_eq!(perft(&board, 1), 20);
        assert_eq!(perft(&board, 2), 400);
        assert_eq!(perft(&board, 3), 8902);
    }

    #[test]
    fn perft_startpos_depth_4() {
        assert_eq!(perft(&Board::startpos(), 4), 197_281);
    }

    // Slow in debug builds.
    #[test]
    #[ignore]
    fn perft_startpos_depth_5() {
        assert_eq!(perft(&Board::startpos(), 5), 4_865_609);
    }

    // Kiwipete: castling, en passant, pins and promotions all at once.
    #[test]
    fn perft_kiwipete() {
        assert_eq!(perft_fen(KIWIPETE, 1), 48);
        assert_eq!(perft_fen(KIWIPETE, 2), 2039);
        assert_eq!(perft_fen(KIWIPETE, 3), 97_862);
    }

    #[test]
    #[ignore]
    fn perft_kiwipete_depth_4() {
        assert_eq!(perft_fen(KIWIPETE, 4), 4_085_603);
    }

    // Check evasions, en passant discovered checks.
    #[test]
    fn perft_position3() {
        assert_eq!(perft_fen(POSITION_3, 1), 14);
        assert_eq!(perft_fen(POSITION_3, 2), 191);
        assert_eq!(perft_fen(POSITION_3, 3), 2812);
        assert_eq!(perft_fen(POSITION_3, 4), 43_238);
    }

    #[test]
    fn perft_position4() {
        assert_eq!(perft_fen(POSITION_4, 1), 6);
        assert_eq!(perft_fen(POSITION_4, 2), 264);
        assert_eq!(perft_fen(POSITION_4, 3), 9467);
    }

    #[test]
    fn perft_position5() {
        assert_eq!(perft_fen(POSITION_5, 1), 44);
        assert_eq!(perft_fen(POSITION_5, 2), 1486);
        assert_eq!(perft_fen(POSITION_5, 3), 62_379);
    }

    #[test]
    fn perft_leaves_board_untouched() {
        let board = Board::from_fen(KIWIPETE).unwrap();
        let before = board.clone();
        perft(&board, 2);
        assert_eq!(board, before);
    }

    #[test]
    fn perft_divide_sums_to_perft() {
        let board = Board::startpos();
        let results = perft_divide(&board, 3);
        assert_eq!(results.len(), 20);
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 8902);
        assert_eq!(results[0].0.to_text(), "a2a3");
        assert_eq!(results[0].1, 380);
    }

    #[test]
    fn perft_divide_depth_one_counts_each_move_once() {
        let results = perft_divide(&Board::from_fen(KIWIPETE).unwrap(), 1);
        assert_eq!(results.len(), 48);
        assert!(results.iter().all(|&(_, n)| n == 1));
    }
}
