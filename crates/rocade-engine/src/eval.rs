//! Material evaluation.
//!
//! Scores are from White's point of view: positive means White is ahead.
//! Terminal positions override the material count entirely.

use rocade_core::{Color, PieceKind, Position, Status};

/// Score assigned when a side is checkmated, positive when it is Black.
pub const CHECKMATE_SCORE: f64 = 1000.0;

/// Material weight of one piece.
const fn piece_weight(kind: PieceKind) -> f64 {
    match kind {
        PieceKind::Queen => 9.0,
        PieceKind::Rook => 5.0,
        PieceKind::Bishop => 3.2,
        PieceKind::Knight => 3.1,
        PieceKind::Pawn => 1.0,
        PieceKind::King => 0.0,
    }
}

/// Evaluate a position.
///
/// Checkmate scores `±`[`CHECKMATE_SCORE`] depending on which side is
/// mated; every drawn status scores 0; anything still in play scores its
/// weighted material balance.
pub fn evaluate(position: &Position) -> f64 {
    match position.status() {
        Status::Checkmate => match position.turn() {
            // The side to move is the side with no way out.
            Color::Black => CHECKMATE_SCORE,
            Color::White => -CHECKMATE_SCORE,
        },
        Status::Stalemate
        | Status::InsufficientMaterial
        | Status::FiftyMoveRule
        | Status::ThreefoldRepetition => 0.0,
        Status::Undetermined => material_balance(position),
    }
}

/// Weighted piece-count balance, White minus Black.
pub fn material_balance(position: &Position) -> f64 {
    let mut balance = 0.0;
    for kind in PieceKind::ALL {
        let diff = position.count(Color::White, kind) as f64
            - position.count(Color::Black, kind) as f64;
        balance += piece_weight(kind) * diff;
    }
    balance
}
