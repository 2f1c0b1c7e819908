//! Terminal-state classification.

use std::fmt;

use crate::chess_move::Move;
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

/// Terminal classification of a position. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Undetermined,
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Undetermined => "undetermined",
            Status::Checkmate => "checkmate",
            Status::Stalemate => "stalemate",
            Status::InsufficientMaterial => "insufficient material",
            Status::FiftyMoveRule => "fifty move rule",
            Status::ThreefoldRepetition => "threefold repetition",
        };
        write!(f, "{name}")
    }
}

impl Position {
    /// Classify this position. Checks run in fixed priority order:
    /// insufficient material, checkmate, stalemate, then the two draw
    /// rules that are not tracked (see below), then undetermined.
    pub fn status(&self) -> Status {
        if self.has_insufficient_material() {
            return Status::InsufficientMaterial;
        }

        if !self.has_legal_move() {
            return if self.is_check() {
                Status::Checkmate
            } else {
                Status::Stalemate
            };
        }

        // Fifty-move and threefold-repetition detection would need a
        // halfmove clock and a position history that this engine does not
        // keep; both statuses exist as outcomes but are never produced.
        Status::Undetermined
    }

    /// Return `true` if the side to move is checkmated.
    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_legal_move()
    }

    /// Return `true` if the side to move has no legal move but is not in
    /// check.
    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.has_legal_move()
    }

    /// Exhaustively probe every (source, destination) pair for one legal
    /// move, short-circuiting on the first hit. Pawn moves onto a last
    /// rank are probed with a queen promotion attached, so promotions are
    /// not missed.
    pub fn has_legal_move(&self) -> bool {
        for src in Square::all() {
            for dst in Square::all() {
                let mut mv = Move::new(src, dst);
                if dst.rank().is_promotion_rank()
                    && self
                        .piece_at(src)
                        .is_some_and(|p| p.kind() == PieceKind::Pawn)
                {
                    mv = mv.with_promotion(PieceKind::Queen);
                }
                if self.validate_move(mv).is_ok() {
                    return true;
                }
            }
        }
        false
    }

    /// Return `true` for the bare-material draws: king versus king, or
    /// king versus king plus one minor piece. Any queen, rook, or pawn on
    /// the board means mating material may still exist.
    pub fn has_insufficient_material(&self) -> bool {
        let mut minors = 0;
        for color in Color::ALL {
            if self.count(color, PieceKind::Queen) > 0
                || self.count(color, PieceKind::Rook) > 0
                || self.count(color, PieceKind::Pawn) > 0
            {
                return false;
            }
            minors +=
                self.count(color, PieceKind::Bishop) + self.count(color, PieceKind::Knight);
        }
        minors <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::Status;
    use crate::position::Position;

    fn pos(fen: &str) -> Position {
        fen.parse().unwrap()
    }

    #[test]
    fn starting_position_is_undetermined() {
        let p = Position::starting();
        assert_eq!(p.status(), Status::Undetermined);
        assert!(p.has_legal_move());
        assert!(!p.is_checkmate());
        assert!(!p.is_stalemate());
    }

    #[test]
    fn back_rank_mate() {
        // Rook delivers mate on the back rank; the king is walled in by
        // its own pawns.
        let p = pos("4k3/8/8/8/8/8/5PPP/r5K1 w - - 0 1");
        assert!(p.is_checkmate());
        assert_eq!(p.status(), Status::Checkmate);
    }

    #[test]
    fn scholars_mate() {
        // 1.e4 e5 2.Bc4 Nc6 3.Qh5 Nf6?? 4.Qxf7#
        let p = pos("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
        assert!(p.is_check());
        assert!(p.is_checkmate());
        assert_eq!(p.status(), Status::Checkmate);
    }

    #[test]
    fn check_with_an_escape_is_not_mate() {
        let p = pos("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
        assert!(p.is_check());
        assert!(!p.is_checkmate());
        assert_eq!(p.status(), Status::Undetermined);
    }

    #[test]
    fn cornered_king_stalemate() {
        // Black to move: the king on A8 has no square and is not in check.
        let p = pos("k7/8/1QK5/8/8/8/8/8 b - - 0 1");
        assert!(!p.is_check());
        assert!(p.is_stalemate());
        assert_eq!(p.status(), Status::Stalemate);
    }

    #[test]
    fn mate_and_stalemate_are_mutually_exclusive() {
        for fen in [
            "4k3/8/8/8/8/8/5PPP/r5K1 w - - 0 1",
            "k7/8/1QK5/8/8/8/8/8 b - - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        ] {
            let p = pos(fen);
            assert!(
                !(p.is_checkmate() && p.is_stalemate()),
                "both flags set for {fen}"
            );
            assert_eq!(
                p.has_legal_move(),
                !p.is_checkmate() && !p.is_stalemate(),
                "legal-move sweep disagrees for {fen}"
            );
        }
    }

    #[test]
    fn bare_kings_are_insufficient() {
        let p = pos("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert!(p.has_insufficient_material());
        assert_eq!(p.status(), Status::InsufficientMaterial);
    }

    #[test]
    fn king_and_minor_versus_king_is_insufficient() {
        assert!(pos("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1").has_insufficient_material());
        assert!(pos("4k3/8/8/8/8/8/8/2N1K3 w - - 0 1").has_insufficient_material());
        assert!(pos("2b1k3/8/8/8/8/8/8/4K3 w - - 0 1").has_insufficient_material());
    }

    #[test]
    fn rook_or_pawn_is_sufficient() {
        assert!(!pos("4k3/8/8/8/8/8/8/2R1K3 w - - 0 1").has_insufficient_material());
        assert!(!pos("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1").has_insufficient_material());
        assert!(!pos("3qk3/8/8/8/8/8/8/4K3 w - - 0 1").has_insufficient_material());
    }

    #[test]
    fn two_minors_are_not_classified_as_insufficient() {
        // One minor per side, or a minor pair on one side: treated as
        // live positions.
        assert!(!pos("2b1k3/8/8/8/8/8/8/2B1K3 w - - 0 1").has_insufficient_material());
        assert!(!pos("4k3/8/8/8/8/8/8/1NB1K3 w - - 0 1").has_insufficient_material());
    }

    #[test]
    fn insufficient_material_wins_the_priority_order() {
        // Bare kings classify on material alone, before any move sweep.
        let p = pos("k7/8/1K6/8/8/8/8/8 b - - 0 1");
        assert_eq!(p.status(), Status::InsufficientMaterial);
    }

    #[test]
    fn untracked_draw_rules_never_fire() {
        let p = Position::starting();
        assert_ne!(p.status(), Status::FiftyMoveRule);
        assert_ne!(p.status(), Status::ThreefoldRepetition);
    }

    #[test]
    fn status_display() {
        assert_eq!(format!("{}", Status::Checkmate), "checkmate");
        assert_eq!(
            format!("{}", Status::InsufficientMaterial),
            "insufficient material"
        );
    }
}
