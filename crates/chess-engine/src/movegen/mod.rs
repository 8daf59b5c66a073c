//! Pseudo-legal move generation.
//!
//! The generators here read a [`Board`] and never mutate it. They do not
//! check whether the mover's king is left attacked; [`Board::legal_moves`]
//! filters for that.

pub mod perft;

use crate::Board;
use chess_core::{Color, File, Move, MoveKind, Piece, Square, Wing};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves the list can hold.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Mutable view of the moves, for in-place reordering.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    pub fn contains(&self, m: Move) -> bool {
        self.as_slice().contains(&m)
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates every pseudo-legal move for the side to move.
pub fn generate_pseudo_legal(board: &Board) -> MoveList {
    let mut moves = MoveList::new();

    generate_pawn_moves(board, &mut moves);
    for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen, Piece::King] {
        generate_piece_moves(board, piece, &mut moves);
    }
    generate_castling_moves(board, &mut moves);

    moves
}

/// Pseudo-legal captures, taken from the full list so both always agree.
pub fn generate_captures(board: &Board) -> MoveList {
    let mut moves = generate_pseudo_legal(board);
    moves.retain(|m| m.is_capture());
    moves
}

fn push_pawn_move(moves: &mut MoveList, from: Square, to: Square, capture: bool, promote: bool) {
    if promote {
        for piece in Piece::PROMOTIONS {
            moves.push(Move::promotion(from, to, piece, capture));
        }
    } else if capture {
        moves.push(Move::new(from, to, MoveKind::Capture));
    } else {
        moves.push(Move::new(from, to, MoveKind::Normal));
    }
}

fn generate_pawn_moves(board: &Board, moves: &mut MoveList) {
    let us = board.side_to_move();
    let them = us.opposite();
    let tables = board.tables();
    let occupied = board.occupied();
    let enemies = board.occupied_by(them);
    let step = match us {
        Color::White => 1,
        Color::Black => -1,
    };

    for from in board.pieces(us, Piece::Pawn) {
        if let Some(one) = from.offset(0, step).filter(|&sq| !occupied.contains(sq)) {
            push_pawn_move(moves, from, one, false, one.rank() == us.promotion_rank());

            if from.rank() == us.pawn_start_rank() {
                if let Some(two) = one.offset(0, step).filter(|&sq| !occupied.contains(sq)) {
                    moves.push(Move::new(from, two, MoveKind::DoublePawnPush));
                }
            }
        }

        let attacks = tables.pawn_attacks(from, us);
        for to in attacks & enemies {
            push_pawn_move(moves, from, to, true, to.rank() == us.promotion_rank());
        }

        if let Some(ep) = board.state().en_passant {
            // The target is only real if the pawn that just passed it is there.
            let passed = ep.offset(0, -step);
            let victim_present =
                passed.is_some_and(|sq| board.pieces(them, Piece::Pawn).contains(sq));
            if attacks.contains(ep) && victim_present {
                moves.push(Move::new(from, ep, MoveKind::EnPassant));
            }
        }
    }
}

fn generate_piece_moves(board: &Board, piece: Piece, moves: &mut MoveList) {
    let us = board.side_to_move();
    let own = board.occupied_by(us);
    let enemies = board.occupied_by(us.opposite());
    let occupied = own | enemies;
    let tables = board.tables();

    for from in board.pieces(us, piece) {
        let targets = tables.attacks(piece, from, occupied) & !own;
        for to in targets {
            let kind = if enemies.contains(to) {
                MoveKind::Capture
            } else {
                MoveKind::Normal
            };
            moves.push(Move::new(from, to, kind));
        }
    }
}

/// Castling needs the right, a king not in check, empty squares between king
/// and rook, and no attack on the two squares the king crosses or lands on.
/// On the queen's wing the b-file square only has to be empty.
fn generate_castling_moves(board: &Board, moves: &mut MoveList) {
    let us = board.side_to_move();
    let them = us.opposite();
    let rights = board.state().castling;
    if !rights.has(us, Wing::Kingside) && !rights.has(us, Wing::Queenside) {
        return;
    }

    let home = match us {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    };
    if board.king_square(us) != Some(home) || board.in_check(us) {
        return;
    }

    let rank = home.rank();
    let at = |file: File| Square::new(file, rank);
    let occupied = board.occupied();
    let rooks = board.pieces(us, Piece::Rook);
    let empty = |files: &[File]| files.iter().all(|&f| !occupied.contains(at(f)));
    let safe = |files: &[File]| {
        files
            .iter()
            .all(|&f| !board.tables().is_attacked(at(f), them, board.piece_boards()))
    };

    if rights.has(us, Wing::Kingside)
        && rooks.contains(at(File::H))
        && empty(&[File::F, File::G])
        && safe(&[File::F, File::G])
    {
        moves.push(Move::new(home, at(File::G), MoveKind::KingCastle));
    }

    if rights.has(us, Wing::Queenside)
        && rooks.contains(at(File::A))
        && empty(&[File::B, File::C, File::D])
        && safe(&[File::D, File::C])
    {
        moves.push(Move::new(home, at(File::C), MoveKind::QueenCastle));
    }
}
