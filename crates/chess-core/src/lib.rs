//! Core types for chess.
//!
//! This crate provides the fundamental value types shared by the engine,
//! the search and the command interface:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`CastlingRights`] per color and [`Wing`]
//! - [`Move`] with its closed [`MoveKind`] tag set, and [`MoveText`] for
//!   coordinate notation
//! - [`Fen`] position text parsing and formatting

mod castling;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use castling::{CastlingRights, Wing};
pub use color::Color;
pub use fen::{Fen, FenError};
pub use mov::{Move, MoveKind, MoveText, MoveTextError};
pub use piece::Piece;
pub use square::{File, Rank, Square};
