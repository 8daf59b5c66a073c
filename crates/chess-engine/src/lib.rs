//! Bitboard board representation, attack tables and move generation.
//!
//! This crate provides:
//! - [`Bitboard`] - 64-bit square sets with efficient operations
//! - [`AttackTables`] - precomputed leaper tables and ray-based slider attacks
//! - [`Board`] - position state with make/undo history and game-end predicates
//! - Pseudo-legal move generation and perft
//!
//! # Example
//!
//! ```
//! use chess_engine::Board;
//!
//! let mut board = Board::startpos();
//! assert_eq!(board.legal_moves().len(), 20);
//!
//! let e4 = board.parse_move("e2e4").unwrap();
//! board.apply_move(e4);
//! assert_eq!(
//!     board.serialize(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
//! );
//!
//! board.undo_move();
//! assert_eq!(board, Board::startpos());
//! ```

mod attacks;
mod bitboard;
mod board;
pub mod movegen;

pub use attacks::{AttackTables, Direction, PieceBoards};
pub use bitboard::{Bitboard, BitboardIter};
pub use board::{Board, GameState, MoveError, Undo};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{generate_captures, generate_pseudo_legal, MoveList};
