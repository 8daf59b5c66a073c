//! Precomputed attack tables.
//!
//! Leaper attacks (pawn, knight, king) are plain lookups. Sliding attacks are
//! computed from per-direction ray masks: each ray is cut at its first
//! blocker, found with the lowest set bit for directions of increasing square
//! index and the highest set bit for decreasing ones.

use crate::Bitboard;
use chess_core::{Color, Piece, Square};
use std::sync::OnceLock;

/// Piece placement indexed by `[color.index()][piece.index()]`.
pub type PieceBoards = [[Bitboard; 6]; 2];

/// The eight ray directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// File and rank step of one move along this direction.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
        }
    }

    /// True if stepping along this direction increases the square index.
    pub const fn is_positive(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::NorthEast | Direction::East | Direction::NorthWest
        )
    }

    const fn index(self) -> usize {
        self as usize
    }
}

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Immutable lookup data for attack generation.
///
/// Build it once with [`AttackTables::new`] or share the process-wide copy
/// returned by [`AttackTables::shared`].
#[derive(Clone, PartialEq, Eq)]
pub struct AttackTables {
    files: [Bitboard; 64],
    ranks: [Bitboard; 64],
    rays: [[Bitboard; 8]; 64],
    pawn: [[Bitboard; 64]; 2],
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
}

impl AttackTables {
    /// Computes every table.
    pub fn new() -> Self {
        let mut tables = AttackTables {
            files: [Bitboard::EMPTY; 64],
            ranks: [Bitboard::EMPTY; 64],
            rays: [[Bitboard::EMPTY; 8]; 64],
            pawn: [[Bitboard::EMPTY; 64]; 2],
            knight: [Bitboard::EMPTY; 64],
            king: [Bitboard::EMPTY; 64],
        };

        for sq in Square::all() {
            let i = sq.index() as usize;
            tables.files[i] = Bitboard::file(sq.file());
            tables.ranks[i] = Bitboard::rank(sq.rank());

            for dir in Direction::ALL {
                let (df, dr) = dir.delta();
                let mut ray = Bitboard::EMPTY;
                let mut cur = sq;
                while let Some(next) = cur.offset(df, dr) {
                    ray.set(next);
                    cur = next;
                }
                tables.rays[i][dir.index()] = ray;

                if let Some(target) = sq.offset(df, dr) {
                    tables.king[i].set(target);
                }
            }

            for (df, dr) in KNIGHT_DELTAS {
                if let Some(target) = sq.offset(df, dr) {
                    tables.knight[i].set(target);
                }
            }

            for color in Color::ALL {
                let dr = if color == Color::White { 1 } else { -1 };
                for df in [-1, 1] {
                    if let Some(target) = sq.offset(df, dr) {
                        tables.pawn[color.index()][i].set(target);
                    }
                }
            }
        }

        tables
    }

    /// Returns the process-wide tables, building them on first use.
    pub fn shared() -> &'static AttackTables {
        static TABLES: OnceLock<AttackTables> = OnceLock::new();
        TABLES.get_or_init(AttackTables::new)
    }

    /// All squares on the file of `sq`.
    #[inline]
    pub fn file_mask(&self, sq: Square) -> Bitboard {
        self.files[sq.index() as usize]
    }

    /// All squares on the rank of `sq`.
    #[inline]
    pub fn rank_mask(&self, sq: Square) -> Bitboard {
        self.ranks[sq.index() as usize]
    }

    /// Squares from `sq` (exclusive) to the board edge along `dir`.
    #[inline]
    pub fn ray(&self, sq: Square, dir: Direction) -> Bitboard {
        self.rays[sq.index() as usize][dir.index()]
    }

    /// Squares a pawn of `color` on `sq` attacks.
    #[inline]
    pub fn pawn_attacks(&self, sq: Square, color: Color) -> Bitboard {
        self.pawn[color.index()][sq.index() as usize]
    }

    #[inline]
    pub fn knight_attacks(&self, sq: Square) -> Bitboard {
        self.knight[sq.index() as usize]
    }

    #[inline]
    pub fn king_attacks(&self, sq: Square) -> Bitboard {
        self.king[sq.index() as usize]
    }

    /// Ray along `dir` cut just after its first occupied square.
    #[inline]
    fn blocked_ray(&self, sq: Square, dir: Direction, occupied: Bitboard) -> Bitboard {
        let ray = self.ray(sq, dir);
        let blockers = ray & occupied;
        let first = if dir.is_positive() {
            blockers.lsb()
        } else {
            blockers.msb()
        };
        match first {
            Some(blocker) => ray ^ self.ray(blocker, dir),
            None => ray,
        }
    }

    fn slide(&self, sq: Square, dirs: &[Direction; 4], occupied: Bitboard) -> Bitboard {
        dirs.iter()
            .fold(Bitboard::EMPTY, |acc, &dir| acc | self.blocked_ray(sq, dir, occupied))
    }

    #[inline]
    pub fn bishop_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.slide(sq, &Direction::DIAGONAL, occupied)
    }

    #[inline]
    pub fn rook_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.slide(sq, &Direction::ORTHOGONAL, occupied)
    }

    #[inline]
    pub fn queen_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.bishop_attacks(sq, occupied) | self.rook_attacks(sq, occupied)
    }

    /// Attack set of a non-pawn piece on `sq`.
    ///
    /// Sliding attacks include the first occupied square in each direction,
    /// whatever its color; removing own pieces is up to the caller. Pawns
    /// have color-dependent attacks, so this returns White's set for them;
    /// use [`AttackTables::pawn_attacks`] instead.
    pub fn attacks(&self, piece: Piece, sq: Square, occupied: Bitboard) -> Bitboard {
        match piece {
            Piece::Pawn => self.pawn_attacks(sq, Color::White),
            Piece::Knight => self.knight_attacks(sq),
            Piece::Bishop => self.bishop_attacks(sq, occupied),
            Piece::Rook => self.rook_attacks(sq, occupied),
            Piece::Queen => self.queen_attacks(sq, occupied),
            Piece::King => self.king_attacks(sq),
        }
    }

    /// Returns true if any piece of color `by` attacks `sq`.
    pub fn is_attacked(&self, sq: Square, by: Color, pieces: &PieceBoards) -> bool {
        let theirs = &pieces[by.index()];

        // A pawn of `by` attacks sq exactly when a pawn of the other color
        // standing on sq would attack it back.
        if (self.pawn_attacks(sq, by.opposite()) & theirs[Piece::Pawn.index()]).is_not_empty() {
            return true;
        }
        if (self.knight_attacks(sq) & theirs[Piece::Knight.index()]).is_not_empty() {
            return true;
        }
        if (self.king_attacks(sq) & theirs[Piece::King.index()]).is_not_empty() {
            return true;
        }

        let occupied = pieces
            .iter()
            .flatten()
            .fold(Bitboard::EMPTY, |acc, &bb| acc | bb);
        let queens = theirs[Piece::Queen.index()];

        let diagonal = theirs[Piece::Bishop.index()] | queens;
        if diagonal.is_not_empty()
            && (self.bishop_attacks(sq, occupied) & diagonal).is_not_empty()
        {
            return true;
        }

        let orthogonal = theirs[Piece::Rook.index()] | queens;
        orthogonal.is_not_empty() && (self.rook_attacks(sq, occupied) & orthogonal).is_not_empty()
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AttackTables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttackTables").finish_non_exhaustive()
    }
}
