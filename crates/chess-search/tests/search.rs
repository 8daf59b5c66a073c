//! Search behavior across a suite of positions.

use chess_engine::Board;
use chess_search::{
    PieceSquareEvaluator, SearchContext, SearchLimits, Searcher, INFINITY, MATE_SCORE,
};
use proptest::prelude::*;
use std::time::{Duration, Instant};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";

fn searcher(limits: SearchLimits) -> Searcher<PieceSquareEvaluator> {
    Searcher::new(PieceSquareEvaluator, limits)
}

/// Root score where every root move gets the full window.
fn unpruned_root_score(s: &Searcher<PieceSquareEvaluator>, board: &Board, depth: u32) -> i32 {
    let mut board = board.clone();
    let mut ctx = SearchContext::unbounded();
    let moves = board.legal_moves();
    let mut best = -INFINITY;
    for &m in &moves {
        board.apply_move(m);
        let score = -s.negamax(&mut board, depth - 1, -INFINITY, INFINITY, &mut ctx);
        board.undo_move();
        best = best.max(score);
    }
    best
}

fn pruned_root_score(s: &Searcher<PieceSquareEvaluator>, board: &Board, depth: u32) -> i32 {
    let mut board = board.clone();
    let mut ctx = SearchContext::unbounded();
    let moves = board.legal_moves();
    let (_, score) = s
        .search_root(&mut board, moves.as_slice(), depth, &mut ctx)
        .unwrap();
    score
}

#[test]
fn pruning_does_not_change_root_score() {
    let s = searcher(SearchLimits::default());
    let suite: [(&str, u32); 5] = [
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 2),
        ("rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2", 2),
        ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 3),
        ("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1", 3),
        ("8/8/4k3/8/2R5/8/4K3/6r1 w - - 0 1", 3),
    ];
    for (fen, depth) in suite {
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(
            pruned_root_score(&s, &board, depth),
            unpruned_root_score(&s, &board, depth),
            "{} at depth {}",
            fen,
            depth
        );
    }
}

#[test]
fn pruning_visits_fewer_nodes() {
    let s = searcher(SearchLimits::default());
    let mut board = Board::startpos();
    let moves = board.legal_moves();

    let mut pruned = SearchContext::unbounded();
    s.search_root(&mut board, moves.as_slice(), 3, &mut pruned);

    let mut unpruned = SearchContext::unbounded();
    for &m in &moves {
        board.apply_move(m);
        s.negamax(&mut board, 2, -INFINITY, INFINITY, &mut unpruned);
        board.undo_move();
    }
    assert!(pruned.nodes() < unpruned.nodes());
}

#[test]
fn search_returns_within_time_budget() {
    let budget = Duration::from_millis(100);
    let slack = Duration::from_millis(250);
    let s = searcher(SearchLimits::new(64, budget));
    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        KIWIPETE,
        POSITION_4,
    ] {
        let board = Board::from_fen(fen).unwrap();
        for _ in 0..3 {
            let start = Instant::now();
            let result = s.search(&board);
            let took = start.elapsed();
            assert!(took <= budget + slack, "{} took {:?}", fen, took);
            assert!(result.best_move.is_some());
            assert!(result.depth < 64);
        }
    }
}

#[test]
fn prefers_shorter_mate() {
    // Qg7 mates at once; slower mates exist too.
    let board = Board::from_fen("7k/8/5KQ1/8/8/8/8/8 w - - 0 1").unwrap();
    let s = searcher(SearchLimits::new(4, Duration::from_secs(30)));
    let result = s.search(&board);
    assert_eq!(result.score, MATE_SCORE + 3);
    let m = result.best_move.unwrap();
    let mut after = board.clone();
    after.apply_move(m);
    assert!(after.is_checkmate(), "{} is not mate", m);
}

#[test]
fn losing_side_sees_mate_coming() {
    // Black can only shuffle; White mates next move whatever Black plays.
    let board = Board::from_fen("7k/8/6K1/8/8/8/8/1Q6 b - - 0 1").unwrap();
    let s = searcher(SearchLimits::new(3, Duration::from_secs(30)));
    let result = s.search(&board);
    assert!(result.best_move.is_some());
    assert!(result.is_mate_score());
    assert!(result.score < 0);
}

#[test]
fn depth_reported_is_completed_depth() {
    let s = searcher(SearchLimits::new(3, Duration::from_secs(30)));
    let result = s.search(&Board::startpos());
    assert_eq!(result.depth, 3);
    assert!(result.elapsed < Duration::from_secs(30));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn best_move_is_legal(choices in prop::collection::vec(any::<usize>(), 0..20)) {
        let mut board = Board::startpos();
        for choice in choices {
            let moves = board.legal_moves();
            if moves.is_empty() {
                break;
            }
            board.apply_move(moves[choice % moves.len()]);
        }
        let limits = SearchLimits::new(3, Duration::from_secs(30)).with_max_nodes(2_000);
        let result = searcher(limits).search(&board);
        match result.best_move {
            Some(m) => prop_assert!(board.legal_moves().contains(m)),
            None => prop_assert!(board.legal_moves().is_empty()),
        }
        prop_assert!(result.nodes <= 2_000);
    }
}
