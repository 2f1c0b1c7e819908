//! Check detection by ray casting from the king.

use crate::color::Color;
use crate::direction::Direction;
use crate::piece_kind::PieceKind;
use crate::position::Position;

/// The eight knight jumps as (file, rank) offsets.
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

impl Position {
    /// Return `true` if the side to move is currently in check.
    ///
    /// Casts a ray from the king along each of the eight directions to the
    /// first occupied square and asks whether that piece threatens back
    /// down the ray; then probes the eight knight-jump squares. Stops at
    /// the first threat found.
    pub fn is_check(&self) -> bool {
        let us = self.turn();
        let them = !us;
        let king = self.king_square(us);

        for dir in Direction::ALL {
            let mut cursor = king;
            let mut steps = 0u32;
            while let Some(next) = cursor.step(dir) {
                cursor = next;
                steps += 1;
                let Some(piece) = self.piece_at(cursor) else {
                    continue;
                };
                // The first occupied square ends the ray either way.
                if piece.color() == them && threatens_along(piece.kind(), us, dir, steps) {
                    return true;
                }
                break;
            }
        }

        for (df, dr) in KNIGHT_JUMPS {
            if let Some(sq) = king.offset(df, dr) {
                if self.bitboard(them, PieceKind::Knight).contains(sq) {
                    return true;
                }
            }
        }

        false
    }
}

/// Does an enemy piece of `kind`, sitting `steps` squares from the king
/// along `dir`, attack back along that ray?
fn threatens_along(kind: PieceKind, king_color: Color, dir: Direction, steps: u32) -> bool {
    match kind {
        PieceKind::Queen => true,
        PieceKind::Rook => !dir.is_diagonal(),
        PieceKind::Bishop => dir.is_diagonal(),
        PieceKind::King => steps == 1,
        PieceKind::Pawn => {
            // A pawn only reaches the king one diagonal step away, from the
            // side it captures toward: black pawns sit north of a white
            // king, white pawns south of a black king.
            let from_front = match king_color {
                Color::White => dir.rank_delta() == 1,
                Color::Black => dir.rank_delta() == -1,
            };
            steps == 1 && dir.is_diagonal() && from_front
        }
        PieceKind::Knight => false,
    }
}
