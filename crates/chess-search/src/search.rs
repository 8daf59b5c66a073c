//! Iterative-deepening negamax with alpha-beta pruning and quiescence.

use crate::eval::{Evaluator, QUEEN_VALUE};
use crate::ordering::order_moves;
use chess_core::{Color, Move};
use chess_engine::Board;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Score of a side that has been checkmated, before the depth offset.
pub const MATE_SCORE: i32 = 100_000;

/// Bound larger than any reachable score.
pub const INFINITY: i32 = 1_000_000;

/// Capture plies searched past the nominal horizon at most.
pub const MAX_QUIESCENCE_PLY: u32 = 32;

/// Stand-pat deficit beyond which quiescence skips capture search.
const DELTA_MARGIN: i32 = QUEEN_VALUE;

/// Budget for one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_depth: u32,
    pub max_time: Duration,
    /// Node ceiling; `None` means time and depth are the only limits.
    pub max_nodes: Option<u64>,
}

impl SearchLimits {
    pub const DEFAULT_DEPTH: u32 = 4;
    pub const DEFAULT_TIME: Duration = Duration::from_millis(5000);

    pub fn new(max_depth: u32, max_time: Duration) -> Self {
        SearchLimits {
            max_depth,
            max_time,
            max_nodes: None,
        }
    }

    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DEPTH, Self::DEFAULT_TIME)
    }
}

/// Outcome of a search, with diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` only when the root position has no legal move.
    pub best_move: Option<Move>,
    /// Score from the side to move's point of view.
    pub score: i32,
    /// Deepest fully completed iteration; 0 if none completed.
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
}

impl SearchResult {
    /// Returns true if the score announces a forced mate for either side.
    pub fn is_mate_score(&self) -> bool {
        self.score.abs() >= MATE_SCORE
    }
}

/// Deadline and node accounting threaded through one search.
#[derive(Debug, Clone)]
pub struct SearchContext {
    started: Instant,
    deadline: Instant,
    max_nodes: Option<u64>,
    nodes: u64,
    interrupted: bool,
}

impl SearchContext {
    pub fn new(limits: &SearchLimits) -> Self {
        let started = Instant::now();
        SearchContext {
            started,
            deadline: started + limits.max_time,
            max_nodes: limits.max_nodes,
            nodes: 0,
            interrupted: false,
        }
    }

    /// A context that never runs out.
    pub fn unbounded() -> Self {
        let started = Instant::now();
        SearchContext {
            started,
            deadline: started + Duration::from_secs(60 * 60 * 24 * 365),
            max_nodes: None,
            nodes: 0,
            interrupted: false,
        }
    }

    /// Counts a node and reports whether the search must stop.
    fn enter_node(&mut self) -> bool {
        if self.interrupted {
            return true;
        }
        if self.max_nodes.is_some_and(|max| self.nodes >= max) || Instant::now() >= self.deadline {
            self.interrupted = true;
            return true;
        }
        self.nodes += 1;
        false
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[inline]
    pub fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Game-tree search over a [`Board`] scored by an [`Evaluator`].
#[derive(Debug, Clone)]
pub struct Searcher<E> {
    evaluator: E,
    limits: SearchLimits,
}

impl<E: Evaluator> Searcher<E> {
    pub fn new(evaluator: E, limits: SearchLimits) -> Self {
        Searcher { evaluator, limits }
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    pub fn set_limits(&mut self, limits: SearchLimits) {
        self.limits = limits;
    }

    /// Evaluation from the side to move's point of view.
    pub fn relative_eval(&self, board: &Board) -> i32 {
        let score = self.evaluator.evaluate(board);
        match board.side_to_move() {
            Color::White => score,
            Color::Black => -score,
        }
    }

    /// Finds the best move for the side to move within the configured limits.
    ///
    /// Depths run from 1 up to `max_depth`; only fully completed depths
    /// count. If even depth 1 is cut short, the first move in heuristic
    /// order is returned with depth 0.
    pub fn search(&self, board: &Board) -> SearchResult {
        let mut ctx = SearchContext::new(&self.limits);
        let mut scratch = board.clone();

        let mut moves = scratch.legal_moves();
        if moves.is_empty() {
            let score = if scratch.is_check() { -MATE_SCORE } else { 0 };
            info!(score, "no legal moves at root");
            return SearchResult {
                best_move: None,
                score,
                depth: 0,
                nodes: 0,
                elapsed: ctx.elapsed(),
            };
        }
        order_moves(&mut moves, &scratch, &self.evaluator);

        let mut result = SearchResult {
            best_move: Some(moves[0]),
            score: self.relative_eval(&scratch),
            depth: 0,
            nodes: 0,
            elapsed: Duration::ZERO,
        };

        for depth in 1..=self.limits.max_depth.max(1) {
            let Some((best, score)) = self.search_root(&mut scratch, moves.as_slice(), depth, &mut ctx)
            else {
                debug!(depth, nodes = ctx.nodes(), "iteration abandoned");
                break;
            };

            result.best_move = Some(best);
            result.score = score;
            result.depth = depth;
            debug!(
                depth,
                score,
                nodes = ctx.nodes(),
                elapsed_ms = ctx.elapsed().as_millis() as u64,
                best = %best,
                "iteration complete"
            );

            // Search the previous best first at the next depth.
            if let Some(pos) = moves.iter().position(|&m| m == best) {
                moves.as_mut_slice()[..=pos].rotate_right(1);
            }
        }

        result.nodes = ctx.nodes();
        result.elapsed = ctx.elapsed();
        info!(
            best = ?result.best_move.map(|m| m.to_text()),
            score = result.score,
            depth = result.depth,
            nodes = result.nodes,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "search finished"
        );
        result
    }

    /// One full-width pass over the root moves at `depth`.
    ///
    /// Alpha is raised across siblings. Returns `None` if the context ran
    /// out before every move was searched.
    pub fn search_root(
        &self,
        board: &mut Board,
        moves: &[Move],
        depth: u32,
        ctx: &mut SearchContext,
    ) -> Option<(Move, i32)> {
        let beta = INFINITY;
        let mut alpha = -INFINITY;
        let mut best: Option<(Move, i32)> = None;

        for &m in moves {
            board.apply_move(m);
            let score = -self.negamax(board, depth.saturating_sub(1), -beta, -alpha, ctx);
            board.undo_move();

            if ctx.is_interrupted() {
                return None;
            }
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((m, score));
            }
            alpha = alpha.max(score);
        }

        best
    }

    /// Negamax alpha-beta. Scores are from the side to move's point of view.
    ///
    /// Returns 0 once the context is interrupted; callers must discard the
    /// value in that case.
    pub fn negamax(
        &self,
        board: &mut Board,
        depth: u32,
        mut alpha: i32,
        beta: i32,
        ctx: &mut SearchContext,
    ) -> i32 {
        if ctx.enter_node() {
            return 0;
        }
        if depth == 0 {
            return self.quiescence(board, alpha, beta, 0, ctx);
        }

        let mut moves = board.legal_moves();
        if moves.is_empty() {
            // Mates closer to the root keep more depth and score further
            // from zero.
            return if board.is_check() {
                -(MATE_SCORE + depth as i32)
            } else {
                0
            };
        }
        if board.is_draw() {
            return 0;
        }

        order_moves(&mut moves, board, &self.evaluator);
        let mut best = -INFINITY;
        for &m in &moves {
            board.apply_move(m);
            let score = -self.negamax(board, depth - 1, -beta, -alpha, ctx);
            board.undo_move();

            if ctx.is_interrupted() {
                return 0;
            }
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        best
    }

    /// Capture-only search past the horizon.
    pub fn quiescence(
        &self,
        board: &mut Board,
        mut alpha: i32,
        beta: i32,
        ply: u32,
        ctx: &mut SearchContext,
    ) -> i32 {
        if ctx.enter_node() {
            return 0;
        }

        let stand_pat = self.relative_eval(board);
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat + DELTA_MARGIN < alpha {
            return alpha;
        }
        if ply >= MAX_QUIESCENCE_PLY {
            return stand_pat;
        }
        alpha = alpha.max(stand_pat);

        let mut captures = board.legal_captures();
        order_moves(&mut captures, board, &self.evaluator);

        let mut best = stand_pat;
        for &m in &captures {
            board.apply_move(m);
            let score = -self.quiescence(board, -beta, -alpha, ply + 1, ctx);
            board.undo_move();

            if ctx.is_interrupted() {
                return 0;
            }
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        best
    }
}
