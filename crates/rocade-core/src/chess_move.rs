//! Move values: a request to move between two squares.
//!
//! A move carries no board reference and no judgement about legality; it is
//! what a player hands to [`Position::make`](crate::Position::make). The
//! distinguished empty move is the protocol's "no previous move" sentinel
//! and is accepted by `make` as a no-op.

use std::fmt;

use crate::castle_rights::CastleSide;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum Repr {
    Empty,
    Board {
        src: Square,
        dst: Square,
        promotion: Option<PieceKind>,
    },
}

/// An immutable (source, destination, optional promotion) triple,
/// or the empty sentinel.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(Repr);

impl Move {
    /// The empty move: a no-op accepted by `make`, used where a protocol
    /// slot requires a move but no move exists yet.
    pub const EMPTY: Move = Move(Repr::Empty);

    /// Create a move from a source and destination square.
    pub const fn new(src: Square, dst: Square) -> Move {
        Move(Repr::Board {
            src,
            dst,
            promotion: None,
        })
    }

    /// Return this move with a promotion kind attached.
    pub const fn with_promotion(self, kind: PieceKind) -> Move {
        match self.0 {
            Repr::Board { src, dst, .. } => Move(Repr::Board {
                src,
                dst,
                promotion: Some(kind),
            }),
            Repr::Empty => panic!("cannot attach a promotion to the empty move"),
        }
    }

    /// Build the castling king move for a color and side: the king slides
    /// two files from its home square toward the chosen rook.
    pub const fn castle(color: Color, side: CastleSide) -> Move {
        let dst = match (color, side) {
            (Color::White, CastleSide::KingSide) => Square::G1,
            (Color::White, CastleSide::QueenSide) => Square::C1,
            (Color::Black, CastleSide::KingSide) => Square::G8,
            (Color::Black, CastleSide::QueenSide) => Square::C8,
        };
        Move::new(Piece::home_square(color), dst)
    }

    /// Return `true` for the empty sentinel.
    pub const fn is_empty(self) -> bool {
        matches!(self.0, Repr::Empty)
    }

    /// The source square.
    ///
    /// # Panics
    ///
    /// Panics when called on the empty move.
    pub const fn source(self) -> Square {
        match self.0 {
            Repr::Board { src, .. } => src,
            Repr::Empty => panic!("source() called on the empty move"),
        }
    }

    /// The destination square.
    ///
    /// # Panics
    ///
    /// Panics when called on the empty move.
    pub const fn dest(self) -> Square {
        match self.0 {
            Repr::Board { dst, .. } => dst,
            Repr::Empty => panic!("dest() called on the empty move"),
        }
    }

    /// The promotion kind, if one was attached.
    ///
    /// # Panics
    ///
    /// Panics when called on the empty move.
    pub const fn promotion(self) -> Option<PieceKind> {
        match self.0 {
            Repr::Board { promotion, .. } => promotion,
            Repr::Empty => panic!("promotion() called on the empty move"),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::Empty => write!(f, "(empty)"),
            Repr::Board {
                src,
                dst,
                promotion: Some(kind),
            } => write!(f, "{}{}={}", src, dst, kind.letter().to_ascii_uppercase()),
            Repr::Board { src, dst, .. } => write!(f, "{}{}", src, dst),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self)
    }
}
