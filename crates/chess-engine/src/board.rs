//! Mutable board state with move history.
//!
//! A [`Board`] owns piece placement as twelve disjoint bitboards, the
//! [`GameState`] fields of a position, and a stack of [`Undo`] records so
//! that every applied move can be taken back exactly.

use crate::attacks::{AttackTables, PieceBoards};
use crate::movegen::{self, MoveList};
use crate::Bitboard;
use chess_core::{
    CastlingRights, Color, Fen, FenError, File, Move, MoveKind, MoveText, MoveTextError, Piece,
    Square, Wing,
};
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors from resolving move text against a position.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error(transparent)]
    Text(#[from] MoveTextError),

    #[error("illegal move: {0}")]
    Illegal(String),
}

/// Position fields other than piece placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    /// Half-moves since the last pawn move or capture.
    pub halfmove_clock: u32,
    /// Starts at 1 and increments after each Black move.
    pub fullmove_number: u32,
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

/// Snapshot pushed by [`Board::apply_move`] and consumed by [`Board::undo_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    pub mv: Move,
    pub piece: Piece,
    pub color: Color,
    pub captured: Option<(Piece, Square)>,
    pub prev_state: GameState,
}

/// The authoritative board.
///
/// Cloning copies the history as well, so a clone can be undone back to the
/// same starting point as the original.
#[derive(Clone)]
pub struct Board {
    pieces: PieceBoards,
    state: GameState,
    history: Vec<Undo>,
    tables: &'static AttackTables,
}

impl Board {
    /// Creates an empty board using the shared attack tables.
    pub fn new() -> Self {
        Self::with_tables(AttackTables::shared())
    }

    /// Creates an empty board that reads from `tables`.
    pub fn with_tables(tables: &'static AttackTables) -> Self {
        Board {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            state: GameState::default(),
            history: Vec::new(),
            tables,
        }
    }

    /// Creates a board set up at the standard starting position.
    pub fn startpos() -> Self {
        let mut board = Self::new();
        board.set_from(&Fen::default());
        board
    }

    /// Creates a board from position text.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Self::new();
        board.load(fen)?;
        Ok(board)
    }

    /// Replaces the whole board state with the position in `fen`.
    ///
    /// History is cleared. On error the board is left untouched.
    pub fn load(&mut self, fen: &str) -> Result<(), FenError> {
        let parsed = Fen::parse(fen).map_err(|e| {
            debug!(fen, error = %e, "rejected position text");
            e
        })?;
        self.set_from(&parsed);
        Ok(())
    }

    fn set_from(&mut self, fen: &Fen) {
        self.pieces = [[Bitboard::EMPTY; 6]; 2];
        for sq in Square::all() {
            if let Some((piece, color)) = fen.piece_at(sq) {
                self.pieces[color.index()][piece.index()].set(sq);
            }
        }
        self.state = GameState {
            side_to_move: fen.side_to_move,
            castling: fen.castling,
            en_passant: fen.en_passant,
            halfmove_clock: fen.halfmove_clock,
            fullmove_number: fen.fullmove_number,
        };
        self.history.clear();
    }

    /// Formats the board as position text.
    pub fn serialize(&self) -> String {
        let mut placement = [None; 64];
        for sq in Square::all() {
            placement[sq.index() as usize] = self.piece_at(sq);
        }
        Fen {
            placement,
            side_to_move: self.state.side_to_move,
            castling: self.state.castling,
            en_passant: self.state.en_passant,
            halfmove_clock: self.state.halfmove_clock,
            fullmove_number: self.state.fullmove_number,
        }
        .to_string()
    }

    #[inline]
    pub fn tables(&self) -> &'static AttackTables {
        self.tables
    }

    #[inline]
    pub fn piece_boards(&self) -> &PieceBoards {
        &self.pieces
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    /// Number of applied moves that can still be undone.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The most recently applied move, if any.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|u| u.mv)
    }

    #[inline]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.pieces[color.index()]
            .iter()
            .fold(Bitboard::EMPTY, |acc, &bb| acc | bb)
    }

    pub fn occupied(&self) -> Bitboard {
        self.occupied_by(Color::White) | self.occupied_by(Color::Black)
    }

    /// Returns the piece and color on `sq`, if any.
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        for color in Color::ALL {
            for piece in Piece::ALL {
                if self.pieces(color, piece).contains(sq) {
                    return Some((piece, color));
                }
            }
        }
        None
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color, Piece::King).lsb()
    }

    pub fn piece_count(&self, color: Color, piece: Piece) -> u32 {
        self.pieces(color, piece).count()
    }

    /// Plays `m` and records an undo snapshot.
    ///
    /// The mover is whatever stands on the from-square. `m` is expected to
    /// come from [`Board::legal_moves`]; a move from an empty square is
    /// ignored.
    pub fn apply_move(&mut self, m: Move) {
        let from = m.from();
        let to = m.to();
        let Some((piece, us)) = self.piece_at(from) else {
            debug!(%m, "apply_move from an empty square ignored");
            return;
        };
        let them = us.opposite();
        let kind = m.kind();
        let prev_state = self.state;

        let captured = if kind == MoveKind::EnPassant {
            behind(to, us)
                .filter(|&sq| self.pieces(them, Piece::Pawn).contains(sq))
                .map(|sq| (Piece::Pawn, sq))
        } else {
            self.piece_at(to)
                .filter(|&(_, color)| color == them)
                .map(|(p, _)| (p, to))
        };
        if let Some((victim, sq)) = captured {
            self.pieces[them.index()][victim.index()].clear(sq);
        }

        let placed = match m.promotion_piece() {
            Some(promo) if piece == Piece::Pawn => promo,
            _ => piece,
        };
        self.pieces[us.index()][piece.index()].clear(from);
        self.pieces[us.index()][placed.index()].set(to);

        if let Some((rook_from, rook_to)) = castle_rook_squares(kind, from) {
            let rooks = &mut self.pieces[us.index()][Piece::Rook.index()];
            rooks.clear(rook_from);
            rooks.set(rook_to);
        }

        if piece == Piece::King {
            self.state.castling.revoke_color(us);
        }
        // Leaving or landing on a rook's home square ends that rook's right.
        for sq in [from, to] {
            if let Some((color, wing)) = rook_home(sq) {
                self.state.castling.revoke(color, wing);
            }
        }

        self.state.en_passant = if kind == MoveKind::DoublePawnPush {
            behind(to, us)
        } else {
            None
        };

        if piece == Piece::Pawn || captured.is_some() {
            self.state.halfmove_clock = 0;
        } else {
            self.state.halfmove_clock = self.state.halfmove_clock.saturating_add(1);
        }
        if us == Color::Black {
            self.state.fullmove_number = self.state.fullmove_number.saturating_add(1);
        }
        self.state.side_to_move = self.state.side_to_move.opposite();

        self.history.push(Undo {
            mv: m,
            piece,
            color: us,
            captured,
            prev_state,
        });
    }

    /// Takes back the last applied move and returns it.
    ///
    /// With empty history this does nothing and returns `None`.
    pub fn undo_move(&mut self) -> Option<Move> {
        let Some(undo) = self.history.pop() else {
            trace!("undo with empty history");
            return None;
        };
        let m = undo.mv;
        let us = undo.color;

        let placed = match m.promotion_piece() {
            Some(promo) if undo.piece == Piece::Pawn => promo,
            _ => undo.piece,
        };
        self.pieces[us.index()][placed.index()].clear(m.to());
        self.pieces[us.index()][undo.piece.index()].set(m.from());

        if let Some((rook_from, rook_to)) = castle_rook_squares(m.kind(), m.from()) {
            let rooks = &mut self.pieces[us.index()][Piece::Rook.index()];
            rooks.clear(rook_to);
            rooks.set(rook_from);
        }

        if let Some((victim, sq)) = undo.captured {
            self.pieces[us.opposite().index()][victim.index()].set(sq);
        }

        self.state = undo.prev_state;
        Some(m)
    }

    /// Pseudo-legal moves that do not leave the mover's king attacked.
    pub fn legal_moves(&self) -> MoveList {
        self.filter_legal(movegen::generate_pseudo_legal(self))
    }

    /// Legal captures only, including en passant and capturing promotions.
    pub fn legal_captures(&self) -> MoveList {
        self.filter_legal(movegen::generate_captures(self))
    }

    fn filter_legal(&self, mut moves: MoveList) -> MoveList {
        let us = self.side_to_move();
        let mut scratch = Board {
            pieces: self.pieces,
            state: self.state,
            history: Vec::with_capacity(1),
            tables: self.tables,
        };
        moves.retain(|&m| {
            scratch.apply_move(m);
            let safe = !scratch.in_check(us);
            scratch.undo_move();
            safe
        });
        moves
    }

    /// Returns true if `color`'s king is attacked. A color without a king is
    /// never in check.
    pub fn in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => self
                .tables
                .is_attacked(king, color.opposite(), &self.pieces),
            None => false,
        }
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.in_check(self.side_to_move())
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.legal_moves().is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.legal_moves().is_empty()
    }

    /// Fifty-move rule: 100 half-moves without a pawn move or capture.
    pub fn is_draw(&self) -> bool {
        self.state.halfmove_clock >= 100
    }

    pub fn is_game_over(&self) -> bool {
        self.is_draw() || self.legal_moves().is_empty()
    }

    /// The side that delivered checkmate, if the game ended that way.
    pub fn winner(&self) -> Option<Color> {
        self.is_checkmate().then(|| self.side_to_move().opposite())
    }

    /// Resolves coordinate move text against the legal moves.
    pub fn parse_move(&self, text: &str) -> Result<Move, MoveError> {
        let parsed: MoveText = text.parse()?;
        self.legal_moves()
            .iter()
            .copied()
            .find(|&m| parsed.matches(m))
            .ok_or_else(|| MoveError::Illegal(text.trim().to_string()))
    }

    pub fn is_valid_move(&self, text: &str) -> bool {
        self.parse_move(text).is_ok()
    }
}

/// The square one step back from `sq`, seen from `color`'s side.
#[inline]
fn behind(sq: Square, color: Color) -> Option<Square> {
    match color {
        Color::White => sq.offset(0, -1),
        Color::Black => sq.offset(0, 1),
    }
}

/// Rook source and destination for a castling move by the king on `king_from`.
fn castle_rook_squares(kind: MoveKind, king_from: Square) -> Option<(Square, Square)> {
    let rank = king_from.rank();
    match kind {
        MoveKind::KingCastle => Some((Square::new(File::H, rank), Square::new(File::F, rank))),
        MoveKind::QueenCastle => Some((Square::new(File::A, rank), Square::new(File::D, rank))),
        _ => None,
    }
}

fn rook_home(sq: Square) -> Option<(Color, Wing)> {
    match sq {
        Square::A1 => Some((Color::White, Wing::Queenside)),
        Square::H1 => Some((Color::White, Wing::Kingside)),
        Square::A8 => Some((Color::Black, Wing::Queenside)),
        Square::H8 => Some((Color::Black, Wing::Kingside)),
        _ => None,
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces && self.state == other.state && self.history == other.history
    }
}

impl Eq for Board {}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("fen", &self.serialize())
            .field("history", &self.history.len())
            .finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let sq = Square::from_index_masked(rank * 8 + file);
                let c = match self.piece_at(sq) {
                    Some((piece, color)) => piece.to_fen_char(color),
                    None => '.',
                };
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
