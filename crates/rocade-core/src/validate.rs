//! The move legality validator.
//!
//! `validate_move` runs a fixed sequence of checks and reports the first
//! failure: referential checks on the two squares, the piece's travel
//! shape, path blocking, the pawn special cases, promotion, castling, and
//! finally a full simulation of the move on a copy to rule out leaving the
//! own king in check. That last gate also covers the "castling into check"
//! case, so the castling stage only has to guard the departure and transit
//! squares.

use crate::castle_rights::CastleSide;
use crate::chess_move::Move;
use crate::color::Color;
use crate::direction::Direction;
use crate::error::IllegalMove;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

impl Position {
    /// Check whether `mv` is legal in this position without applying it.
    ///
    /// Returns the first failing reason. The empty move is always accepted
    /// (it is applied as a no-op).
    pub fn validate_move(&self, mv: Move) -> Result<(), IllegalMove> {
        if mv.is_empty() {
            return Ok(());
        }

        let us = self.turn();
        let src = mv.source();
        let dst = mv.dest();

        // A side-to-move piece must stand on the source square.
        let piece = self
            .piece_at(src)
            .ok_or(IllegalMove::NoPieceAtSource { square: src })?;
        if piece.color() != us {
            return Err(IllegalMove::WrongSide { piece });
        }

        // The destination may hold an opponent piece, never an own one.
        let target = self.piece_at(dst);
        if target.is_some_and(|t| t.color() == us) {
            return Err(IllegalMove::DestinationOccupied { square: dst });
        }

        // The move must match the piece's movement or capture shape.
        if !piece.is_valid_movement(src, dst) && !piece.is_valid_capture(src, dst) {
            return Err(IllegalMove::ShapeViolation { piece, src, dst });
        }

        // Everything but a knight travels through the squares in between.
        if piece.kind() != PieceKind::Knight {
            if let Some(dir) = src.direction_to(dst) {
                let mut cursor = src;
                loop {
                    cursor = cursor
                        .step(dir)
                        .expect("an aligned path stays on the board until it reaches dst");
                    if cursor == dst {
                        break;
                    }
                    if self.is_occupied(cursor) {
                        return Err(IllegalMove::BlockedPath { square: cursor });
                    }
                }
            }
        }

        if piece.kind() == PieceKind::Pawn {
            let diagonal = src.file() != dst.file();
            // A diagonal step needs a victim: either on the destination or,
            // for en passant, implied by the target square.
            if diagonal && target.is_none() && self.en_passant() != Some(dst) {
                return Err(IllegalMove::PawnDiagonalToEmpty { square: dst });
            }
            // A straight step may never land on a piece.
            if !diagonal && target.is_some() {
                return Err(IllegalMove::PawnForwardBlocked { square: dst });
            }

            // Reaching the last rank requires choosing what to become.
            if dst.rank().is_promotion_rank() {
                match mv.promotion() {
                    None => return Err(IllegalMove::MissingPromotion { square: dst }),
                    Some(kind) if !kind.is_promotable() => {
                        return Err(IllegalMove::InvalidPromotion { kind });
                    }
                    Some(_) => {}
                }
            }
        }

        // A king sliding two files is the castling shape; the shape check
        // already pinned it to the home square and rank.
        if piece.kind() == PieceKind::King && src.distance_squared(dst) == 4 {
            self.validate_castle(us, src, dst)?;
        }

        // Simulate the full move and make sure the own king survives.
        let mut probe = *self;
        probe.make_unchecked(mv);
        probe.set_side_to_move(us);
        if probe.is_check() {
            return Err(IllegalMove::SelfCheck);
        }

        Ok(())
    }

    /// The castling-specific gates: rights, a reachable rook on the corner,
    /// and the no-castling-out-of-or-through-check rules.
    fn validate_castle(&self, us: Color, src: Square, dst: Square) -> Result<(), IllegalMove> {
        let (side, toward) = if dst.file() > src.file() {
            (CastleSide::KingSide, Direction::East)
        } else {
            (CastleSide::QueenSide, Direction::West)
        };

        if !self.castling().has(us, side) {
            return Err(IllegalMove::CastlingRightsLost);
        }

        // Scan from the king toward the board edge. The first occupied
        // square must be the corner itself, holding an own rook.
        let mut cursor = src;
        let mut first_piece = None;
        while let Some(next) = cursor.step(toward) {
            cursor = next;
            if let Some(found) = self.piece_at(cursor) {
                first_piece = Some((cursor, found));
                break;
            }
        }
        match first_piece {
            Some((sq, found))
                if found == Piece::new(us, PieceKind::Rook) && sq.step(toward).is_none() => {}
            _ => return Err(IllegalMove::CastlingRookMissing),
        }

        if self.is_check() {
            return Err(IllegalMove::CastleOutOfCheck);
        }

        // The king's transit square must be safe as well.
        let mid = src
            .step(toward)
            .expect("the home rank has room beside the king");
        let mut probe = *self;
        probe.make_unchecked(Move::new(src, mid));
        probe.set_side_to_move(us);
        if probe.is_check() {
            return Err(IllegalMove::CastleThroughCheck);
        }

        Ok(())
    }
}
