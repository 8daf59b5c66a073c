//! Move search for the chess engine.
//!
//! - [`Evaluator`] - the static scoring contract, with [`PieceSquareEvaluator`]
//!   as the stock implementation
//! - [`Searcher`] - iterative deepening over negamax alpha-beta with a
//!   quiescence extension, bounded by [`SearchLimits`]
//!
//! # Example
//!
//! ```
//! use chess_engine::Board;
//! use chess_search::{PieceSquareEvaluator, SearchLimits, Searcher};
//! use std::time::Duration;
//!
//! let board = Board::startpos();
//! let searcher = Searcher::new(
//!     PieceSquareEvaluator,
//!     SearchLimits::new(2, Duration::from_secs(5)),
//! );
//! let result = searcher.search(&board);
//! assert!(result.best_move.is_some());
//! ```

pub mod eval;
pub mod ordering;
mod search;

pub use eval::{Evaluator, PieceSquareEvaluator};
pub use ordering::{order_moves, score_move};
pub use search::{
    SearchContext, SearchLimits, SearchResult, Searcher, INFINITY, MATE_SCORE, MAX_QUIESCENCE_PLY,
};
