//! Rejection and parse error types.

use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Why a move was rejected by the legality validator.
///
/// Every variant is a recoverable rejection: the position is left untouched
/// and the caller is expected to pick a different move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMove {
    /// The source square is empty.
    #[error("no piece on {square}")]
    NoPieceAtSource { square: Square },
    /// The source square holds a piece of the side not on move.
    #[error("it is not {piece}'s turn to move")]
    WrongSide { piece: Piece },
    /// The destination square holds a piece of the mover's own color.
    #[error("own piece on destination {square}")]
    DestinationOccupied { square: Square },
    /// The move matches neither the piece's movement nor its capture shape.
    #[error("{piece} cannot go from {src} to {dst}")]
    ShapeViolation {
        piece: Piece,
        src: Square,
        dst: Square,
    },
    /// A sliding move is obstructed strictly between source and destination.
    #[error("path is blocked at {square}")]
    BlockedPath { square: Square },
    /// A pawn moved diagonally onto an empty square that is not the
    /// en-passant target.
    #[error("pawn has nothing to capture on {square}")]
    PawnDiagonalToEmpty { square: Square },
    /// A pawn moved straight onto an occupied square.
    #[error("pawn is blocked by the piece on {square}")]
    PawnForwardBlocked { square: Square },
    /// A pawn reached the last rank without naming a promotion piece.
    #[error("promotion required for a pawn reaching {square}")]
    MissingPromotion { square: Square },
    /// The named promotion piece is not one a pawn may become.
    #[error("cannot promote a pawn to a {kind}")]
    InvalidPromotion { kind: PieceKind },
    /// Castling rights for that color and side were already forfeited.
    #[error("castling rights have been lost")]
    CastlingRightsLost,
    /// No rook stands on the corner square, or the path to it is occupied.
    #[error("no rook available to castle with")]
    CastlingRookMissing,
    /// The king may not castle while in check.
    #[error("cannot castle out of check")]
    CastleOutOfCheck,
    /// The king may not cross an attacked square while castling.
    #[error("cannot castle through check")]
    CastleThroughCheck,
    /// The move would leave the mover's own king in check.
    #[error("move would leave the king in check")]
    SelfCheck,
}

/// Structural invariant violations in a [`Position`](crate::Position).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// A side does not have exactly one king.
    #[error("expected 1 {color} king, found {count}")]
    InvalidKingCount { color: &'static str, count: u32 },
    /// Pawns occupy rank 1 or rank 8.
    #[error("pawns found on a back rank")]
    PawnsOnBackRank,
    /// Two of the twelve occupancy masks share a square.
    #[error("two pieces claim {square}")]
    OverlappingPieces { square: Square },
    /// The en-passant target is not on a legal target rank.
    #[error("en passant target {square} is not on rank 3 or 6")]
    BadEnPassantTarget { square: Square },
}

/// Errors from parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// Fewer than the four mandatory fields were present.
    #[error("expected at least 4 FEN fields, found {found}")]
    MissingFields { found: usize },
    /// The piece placement does not describe exactly 8 ranks of 8 squares.
    #[error("bad piece placement: {reason}")]
    BadPlacement { reason: &'static str },
    /// An unrecognized character in the piece placement.
    #[error("invalid piece character '{character}'")]
    InvalidPieceChar { character: char },
    /// The active color field is not "w" or "b".
    #[error("invalid active color \"{found}\"")]
    InvalidColor { found: String },
    /// The castling field holds characters outside "KQkq-".
    #[error("invalid castling field \"{found}\"")]
    InvalidCastling { found: String },
    /// The en passant field is neither "-" nor a square name.
    #[error("invalid en passant square \"{found}\"")]
    InvalidEnPassant { found: String },
    /// A move counter is not a number.
    #[error("invalid {field} \"{found}\"")]
    InvalidCounter { field: &'static str, found: String },
    /// The parsed position fails structural validation.
    #[error("invalid position: {0}")]
    InvalidPosition(#[from] PositionError),
}
