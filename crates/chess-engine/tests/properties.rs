//! Property tests over random legal playouts.

use chess_core::{Color, Fen};
use chess_engine::Board;
use proptest::prelude::*;

const SEEDS: [&str; 4] = [
    Fen::STARTPOS,
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
];

/// Plays moves chosen by `choices` from `fen`, stopping early at game end.
fn playout(fen: &str, choices: &[usize]) -> Board {
    let mut board = Board::from_fen(fen).unwrap();
    for &choice in choices {
        let moves = board.legal_moves();
        if moves.is_empty() {
            break;
        }
        board.apply_move(moves[choice % moves.len()]);
    }
    board
}

fn playouts() -> impl Strategy<Value = (usize, Vec<usize>)> {
    (0..SEEDS.len(), prop::collection::vec(any::<usize>(), 0..40))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn apply_then_undo_restores_board((seed, choices) in playouts()) {
        let board = playout(SEEDS[seed], &choices);
        for &m in &board.legal_moves() {
            let mut copy = board.clone();
            copy.apply_move(m);
            prop_assert_eq!(copy.history_len(), board.history_len() + 1);
            prop_assert_eq!(copy.undo_move(), Some(m));
            prop_assert_eq!(&copy, &board);
        }
    }

    #[test]
    fn undo_all_returns_to_seed((seed, choices) in playouts()) {
        let mut board = playout(SEEDS[seed], &choices);
        while board.undo_move().is_some() {}
        prop_assert_eq!(board, Board::from_fen(SEEDS[seed]).unwrap());
    }

    #[test]
    fn serialize_load_round_trip((seed, choices) in playouts()) {
        let board = playout(SEEDS[seed], &choices);
        let text = board.serialize();
        let reloaded = Board::from_fen(&text).unwrap();
        prop_assert_eq!(reloaded.piece_boards(), board.piece_boards());
        prop_assert_eq!(reloaded.state(), board.state());
        prop_assert_eq!(reloaded.serialize(), text);
    }

    #[test]
    fn legal_moves_never_leave_king_attacked((seed, choices) in playouts()) {
        let board = playout(SEEDS[seed], &choices);
        let us = board.side_to_move();
        for &m in &board.legal_moves() {
            let mut copy = board.clone();
            copy.apply_move(m);
            prop_assert!(!copy.in_check(us), "{} leaves {} in check", m, us);
        }
    }

    #[test]
    fn bitboards_stay_disjoint((seed, choices) in playouts()) {
        let board = playout(SEEDS[seed], &choices);
        let boards = board.piece_boards();
        let mut seen = 0u64;
        for bb in boards.iter().flatten() {
            prop_assert_eq!(seen & bb.0, 0);
            seen |= bb.0;
        }
        prop_assert_eq!(board.piece_count(Color::White, chess_core::Piece::King), 1);
        prop_assert_eq!(board.piece_count(Color::Black, chess_core::Piece::King), 1);
    }

    #[test]
    fn checkmate_and_stalemate_are_exclusive((seed, choices) in playouts()) {
        let board = playout(SEEDS[seed], &choices);
        prop_assert!(!(board.is_checkmate() && board.is_stalemate()));
        if board.legal_moves().is_empty() {
            prop_assert!(board.is_checkmate() || board.is_stalemate());
        }
    }

    #[test]
    fn captures_are_the_capturing_legal_moves((seed, choices) in playouts()) {
        let board = playout(SEEDS[seed], &choices);
        let all = board.legal_moves();
        let captures = board.legal_captures();
        let expected: Vec<_> = all.iter().copied().filter(|m| m.is_capture()).collect();
        prop_assert_eq!(captures.as_slice(), expected.as_slice());
    }
}

#[test]
fn scenario_after_e4_e5_nf3() {
    let mut board = Board::startpos();
    for text in ["e2e4", "e7e5", "g1f3"] {
        let m = board.parse_move(text).unwrap();
        board.apply_move(m);
    }
    let fen = "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2";
    assert_eq!(board.serialize(), fen);
    assert_eq!(Board::from_fen(fen).unwrap().legal_moves().len(), 29);
}
