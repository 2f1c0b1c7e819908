//! Move application.
//!
//! `make` is the public validate-then-apply entry point; `make_unchecked`
//! is the raw transition used on positions cloned for simulation and by
//! the search, where the move is already known to be legal.

use tracing::trace;

use crate::castle_rights::CastleSide;
use crate::chess_move::Move;
use crate::color::Color;
use crate::direction::Direction;
use crate::error::IllegalMove;
use crate::file::File;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::rank::Rank;
use crate::square::Square;

impl Position {
    /// Validate `mv` and apply it. On rejection the position is untouched.
    pub fn make(&mut self, mv: Move) -> Result<(), IllegalMove> {
        self.validate_move(mv)?;
        self.make_unchecked(mv);
        if !mv.is_empty() {
            trace!(ply = self.ply(), "applied {mv}");
        }
        Ok(())
    }

    /// Apply a move without validating it.
    ///
    /// The caller must have established legality (or obtained the move from
    /// a source that did). The whole transition is performed before
    /// returning: capture, promotion placement, en-passant victim removal,
    /// castling rook relocation, rights revocation, en-passant target
    /// recompute, side toggle, and ply increment.
    pub fn make_unchecked(&mut self, mv: Move) {
        if mv.is_empty() {
            return;
        }

        let us = self.turn();
        let src = mv.source();
        let dst = mv.dest();

        let Some(piece) = self.take(src) else {
            return;
        };
        let is_pawn = piece.kind() == PieceKind::Pawn;

        // Classify the special shapes before the board changes any further.
        let en_passant_capture = is_pawn
            && src.file() != dst.file()
            && self.en_passant() == Some(dst)
            && !self.is_occupied(dst);
        let is_castle = piece.kind() == PieceKind::King && src.distance_squared(dst) == 4;

        // Capture whatever stands on the destination, then land there.
        // A pawn reaching the last rank lands as its promotion piece.
        self.take(dst);
        match mv.promotion() {
            Some(kind) if is_pawn && dst.rank().is_promotion_rank() => {
                self.put(dst, Piece::new(us, kind));
            }
            _ => self.put(dst, piece),
        }

        if en_passant_capture {
            // The passed pawn stands one rank behind the target square.
            let behind = match us {
                Color::White => Direction::South,
                Color::Black => Direction::North,
            };
            if let Some(victim) = dst.step(behind) {
                self.take(victim);
            }
        }

        if is_castle {
            let back = Rank::back_rank(us);
            let (rook_src, rook_dst) = if dst.file() > src.file() {
                (Square::new(back, File::FileH), Square::new(back, File::FileF))
            } else {
                (Square::new(back, File::FileA), Square::new(back, File::FileD))
            };
            if let Some(rook) = self.take(rook_src) {
                self.put(rook_dst, rook);
            }
        }

        // Rights: a king move forfeits both of its side's rights; a rook
        // leaving its original corner forfeits that corner's right.
        let mut rights = self.castling();
        match piece.kind() {
            PieceKind::King => rights = rights.remove_color(us),
            PieceKind::Rook => {
                let back = Rank::back_rank(us);
                if src == Square::new(back, File::FileH) {
                    rights = rights.remove_side(us, CastleSide::KingSide);
                } else if src == Square::new(back, File::FileA) {
                    rights = rights.remove_side(us, CastleSide::QueenSide);
                }
            }
            _ => {}
        }
        self.set_castling(rights);

        // The en-passant target lives for exactly one reply: set it after a
        // double pawn push, clear it otherwise.
        let double_push = is_pawn
            && src.file() == dst.file()
            && src.rank().index().abs_diff(dst.rank().index()) == 2;
        if double_push {
            let mid = (src.rank().index() + dst.rank().index()) / 2;
            let rank = Rank::from_index(mid as u8)
                .expect("the midpoint of a double push is on the board");
            self.set_en_passant(Some(Square::new(rank, src.file())));
        } else {
            self.set_en_passant(None);
        }

        self.set_side_to_move(!us);
        self.set_ply(self.ply() + 1);
    }
}
