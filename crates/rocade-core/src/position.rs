//! The position: piece placement, side to move, castling rights,
//! en-passant target, and ply counter.
//!
//! A `Position` is a plain value. Copying one yields a fully independent
//! snapshot, which is what the validator and the search rely on: every
//! speculative move is tried on a throwaway copy and the original is never
//! aliased.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::PositionError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Complete chess position state.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// One occupancy mask per (color, kind) pair. The twelve masks are
    /// pairwise disjoint at all times.
    pieces: [[Bitboard; PieceKind::COUNT]; Color::COUNT],
    /// Which side moves next.
    side_to_move: Color,
    /// Remaining castling rights.
    castling: CastleRights,
    /// En-passant target square, set only directly after a double pawn push.
    en_passant: Option<Square>,
    /// Half-moves played since the start of the game.
    ply: u32,
}

impl Position {
    /// The standard starting position: full back ranks, all castling
    /// rights, White to move, ply 0.
    pub fn starting() -> Position {
        let mut pieces = [[Bitboard::EMPTY; PieceKind::COUNT]; Color::COUNT];

        pieces[Color::White.index()][PieceKind::Pawn.index()] = Bitboard::RANK_2;
        pieces[Color::White.index()][PieceKind::Rook.index()] =
            Square::A1.bitboard() | Square::H1.bitboard();
        pieces[Color::White.index()][PieceKind::Knight.index()] =
            Square::B1.bitboard() | Square::G1.bitboard();
        pieces[Color::White.index()][PieceKind::Bishop.index()] =
            Square::C1.bitboard() | Square::F1.bitboard();
        pieces[Color::White.index()][PieceKind::Queen.index()] = Square::D1.bitboard();
        pieces[Color::White.index()][PieceKind::King.index()] = Square::E1.bitboard();

        pieces[Color::Black.index()][PieceKind::Pawn.index()] = Bitboard::RANK_7;
        pieces[Color::Black.index()][PieceKind::Rook.index()] =
            Square::A8.bitboard() | Square::H8.bitboard();
        pieces[Color::Black.index()][PieceKind::Knight.index()] =
            Square::B8.bitboard() | Square::G8.bitboard();
        pieces[Color::Black.index()][PieceKind::Bishop.index()] =
            Square::C8.bitboard() | Square::F8.bitboard();
        pieces[Color::Black.index()][PieceKind::Queen.index()] = Square::D8.bitboard();
        pieces[Color::Black.index()][PieceKind::King.index()] = Square::E8.bitboard();

        Position {
            pieces,
            side_to_move: Color::White,
            castling: CastleRights::ALL,
            en_passant: None,
            ply: 0,
        }
    }

    /// An empty board with no pieces. Used by the FEN parser, which places
    /// pieces one by one and then validates the result.
    pub(crate) fn empty() -> Position {
        Position {
            pieces: [[Bitboard::EMPTY; PieceKind::COUNT]; Color::COUNT],
            side_to_move: Color::White,
            castling: CastleRights::NONE,
            en_passant: None,
            ply: 0,
        }
    }

    /// Return the piece on `sq`, if any.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        for color in Color::ALL {
            for kind in PieceKind::ALL {
                if self.pieces[color.index()][kind.index()].contains(sq) {
                    return Some(Piece::new(color, kind));
                }
            }
        }
        None
    }

    /// The occupancy mask for one (color, kind) pair.
    #[inline]
    pub fn bitboard(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[color.index()][kind.index()]
    }

    /// Number of pieces of one (color, kind) pair on the board.
    #[inline]
    pub fn count(&self, color: Color, kind: PieceKind) -> u32 {
        self.bitboard(color, kind).count()
    }

    /// Union of all of `color`'s occupancy masks.
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        let mut acc = Bitboard::EMPTY;
        for kind in PieceKind::ALL {
            acc |= self.pieces[color.index()][kind.index()];
        }
        acc
    }

    /// Union of both sides' occupancy masks.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied_by(Color::White) | self.occupied_by(Color::Black)
    }

    /// Return `true` if any piece stands on `sq`.
    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.occupied().contains(sq)
    }

    /// The square of `color`'s king.
    ///
    /// # Panics
    ///
    /// Panics if the board has no king of that color (invalid state;
    /// construction always yields one king per side).
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces[color.index()][PieceKind::King.index()]
            .lsb()
            .expect("position must have a king for each side")
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.side_to_move
    }

    /// Half-moves played since the start of the game.
    #[inline]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Remaining castling rights.
    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    /// The en-passant target square, if the last move was a double pawn push.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Put `piece` on `sq`.
    #[inline]
    pub(crate) fn put(&mut self, sq: Square, piece: Piece) {
        let mask = &mut self.pieces[piece.color().index()][piece.kind().index()];
        *mask = mask.with(sq);
    }

    /// Remove and return whatever piece stands on `sq`.
    pub(crate) fn take(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.piece_at(sq)?;
        let mask = &mut self.pieces[piece.color().index()][piece.kind().index()];
        *mask = mask.without(sq);
        Some(piece)
    }

    #[inline]
    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    #[inline]
    pub(crate) fn set_castling(&mut self, rights: CastleRights) {
        self.castling = rights;
    }

    #[inline]
    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }

    #[inline]
    pub(crate) fn set_ply(&mut self, ply: u32) {
        self.ply = ply;
    }

    /// Check the structural invariants: pairwise-disjoint masks, exactly
    /// one king per side, no pawns on a back rank, and a sane en-passant
    /// target.
    pub fn validate(&self) -> Result<(), PositionError> {
        // Disjointness of the twelve masks.
        let mut seen = Bitboard::EMPTY;
        for color in Color::ALL {
            for kind in PieceKind::ALL {
                let mask = self.pieces[color.index()][kind.index()];
                let overlap = seen & mask;
                if let Some(square) = overlap.lsb() {
                    return Err(PositionError::OverlappingPieces { square });
                }
                seen |= mask;
            }
        }

        for color in Color::ALL {
            let kings = self.pieces[color.index()][PieceKind::King.index()].count();
            if kings != 1 {
                let name = match color {
                    Color::White => "white",
                    Color::Black => "black",
                };
                return Err(PositionError::InvalidKingCount {
                    color: name,
                    count: kings,
                });
            }
        }

        let back_ranks = Bitboard::RANK_1 | Bitboard::RANK_8;
        let pawns = self.pieces[Color::White.index()][PieceKind::Pawn.index()]
            | self.pieces[Color::Black.index()][PieceKind::Pawn.index()];
        if (pawns & back_ranks).is_nonempty() {
            return Err(PositionError::PawnsOnBackRank);
        }

        if let Some(sq) = self.en_passant {
            let rank = sq.rank().index();
            if rank != 2 && rank != 5 {
                return Err(PositionError::BadEnPassantTarget { square: sq });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Position {
    /// Render the board as 8 lines of 8 characters, rank 8 first.
    /// Uppercase letters are White, lowercase are Black, `-` is empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank_idx in (0u8..8).rev() {
            for file_idx in 0u8..8 {
                let sq = Square::from_index(rank_idx * 8 + file_idx)
                    .expect("rank and file indices stay in range");
                match self.piece_at(sq) {
                    Some(piece) => write!(f, "{}", piece.letter())?,
                    None => write!(f, "-")?,
                }
            }
            if rank_idx > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(\"{}\")", self.to_fen())
    }
}
