//! Fixed-depth minimax search.
//!
//! Candidate generation is deliberately blunt: every (source, destination)
//! pair is tried and the position's own `make` rejects the illegal ones.
//! Moves tied for the best score are collected and one is drawn uniformly
//! at random from the caller-supplied generator, so a seeded generator
//! yields a fully reproducible game.

use std::sync::LazyLock;

use rand::Rng;
use tracing::debug;

use rocade_core::{Color, Move, PieceKind, Position, Square};

use crate::eval::{CHECKMATE_SCORE, evaluate};

/// Default search depth in plies.
pub const DEFAULT_DEPTH: u32 = 2;

/// Every (source, destination) pair on the board, in index order.
static ALL_MOVES: LazyLock<Vec<Move>> = LazyLock::new(|| {
    let mut moves = Vec::with_capacity(Square::COUNT * Square::COUNT);
    for src in Square::all() {
        for dst in Square::all() {
            moves.push(Move::new(src, dst));
        }
    }
    moves
});

/// A fixed-depth minimax player over the material evaluation.
pub struct Searcher<R: Rng> {
    depth: u32,
    rng: R,
}

impl<R: Rng> Searcher<R> {
    /// Create a searcher.
    ///
    /// # Panics
    ///
    /// Panics if `depth` is zero.
    pub fn new(depth: u32, rng: R) -> Searcher<R> {
        assert!(depth > 0, "search depth must be at least 1");
        Searcher { depth, rng }
    }

    /// Pick a move for the side to move: maximize the evaluation for
    /// White, minimize it for Black. Returns the empty move when the
    /// position offers no legal move at all.
    pub fn best_move(&mut self, position: &Position) -> Move {
        let (mv, score) = match position.turn() {
            Color::White => self.maximize(position, self.depth),
            Color::Black => self.minimize(position, self.depth),
        };
        debug!(score, "search chose {mv}");
        mv
    }

    fn maximize(&mut self, position: &Position, depth: u32) -> (Move, f64) {
        let mut best_score = -CHECKMATE_SCORE;
        let mut best_moves: Vec<Move> = Vec::new();

        for &candidate in ALL_MOVES.iter() {
            let mv = with_default_promotion(position, candidate);
            let mut child = *position;
            if child.make(mv).is_err() {
                continue;
            }

            let score = if depth == 1 {
                evaluate(&child)
            } else {
                self.minimize(&child, depth - 1).1
            };

            if score > best_score {
                best_score = score;
                best_moves.clear();
                best_moves.push(mv);
            } else if score == best_score {
                best_moves.push(mv);
            }
        }

        self.conclude(position, best_moves, best_score)
    }

    fn minimize(&mut self, position: &Position, depth: u32) -> (Move, f64) {
        let mut best_score = CHECKMATE_SCORE;
        let mut best_moves: Vec<Move> = Vec::new();

        for &candidate in ALL_MOVES.iter() {
            let mv = with_default_promotion(position, candidate);
            let mut child = *position;
            if child.make(mv).is_err() {
                continue;
            }

            let score = if depth == 1 {
                evaluate(&child)
            } else {
                self.maximize(&child, depth - 1).1
            };

            if score < best_score {
                best_score = score;
                best_moves.clear();
                best_moves.push(mv);
            } else if score == best_score {
                best_moves.push(mv);
            }
        }

        self.conclude(position, best_moves, best_score)
    }

    /// Draw one of the tied best moves at random. A position with no
    /// playable candidate is terminal: report it as it stands, so mate
    /// and stalemate scores surface to the parent node.
    fn conclude(
        &mut self,
        position: &Position,
        best_moves: Vec<Move>,
        best_score: f64,
    ) -> (Move, f64) {
        if best_moves.is_empty() {
            return (Move::EMPTY, evaluate(position));
        }
        let pick = self.rng.gen_range(0..best_moves.len());
        (best_moves[pick], best_score)
    }
}

/// Attach a queen promotion to any pawn move ending on a last rank, so the
/// blunt 64x64 sweep never skips promotions for lack of a named piece.
fn with_default_promotion(position: &Position, mv: Move) -> Move {
    let pawn_at_src = position
        .piece_at(mv.source())
        .is_some_and(|p| p.kind() == PieceKind::Pawn);
    if pawn_at_src && mv.dest().rank().is_promotion_rank() {
        mv.with_promotion(PieceKind::Queen)
    } else {
        mv
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rocade_core::{Move, PieceKind, Position, Square};

    use super::{ALL_MOVES, DEFAULT_DEPTH, Searcher, with_default_promotion};

    fn searcher(seed: u64) -> Searcher<StdRng> {
        Searcher::new(DEFAULT_DEPTH, StdRng::seed_from_u64(seed))
    }

    #[test]
    fn move_table_covers_the_whole_board() {
        assert_eq!(ALL_MOVES.len(), 4096);
        assert_eq!(ALL_MOVES[0], Move::new(Square::A1, Square::A1));
        assert_eq!(ALL_MOVES[4095], Move::new(Square::H8, Square::H8));
    }

    #[test]
    #[should_panic(expected = "search depth must be at least 1")]
    fn zero_depth_is_rejected() {
        let _ = Searcher::new(0, StdRng::seed_from_u64(0));
    }

    #[test]
    fn default_promotion_only_touches_pawn_moves() {
        let p: Position = "8/4P3/8/8/8/8/k6K/8 w - - 0 1".parse().unwrap();
        let promoted = with_default_promotion(&p, Move::new(Square::E7, Square::E8));
        assert_eq!(promoted.promotion(), Some(PieceKind::Queen));

        // A king heading for the back rank is left alone.
        let king_mv = with_default_promotion(&p, Move::new(Square::H2, Square::H1));
        assert_eq!(king_mv.promotion(), None);

        // So is a pawn move that stays short of it.
        let p2 = Position::starting();
        let quiet = with_default_promotion(&p2, Move::new(Square::E2, Square::E4));
        assert_eq!(quiet.promotion(), None);
    }

    #[test]
    fn same_seed_gives_the_same_game_opening() {
        let p = Position::starting();
        let a = searcher(7).best_move(&p);
        let b = searcher(7).best_move(&p);
        assert_eq!(a, b);
    }

    #[test]
    fn chosen_move_is_always_legal() {
        let mut p = Position::starting();
        let mut s = searcher(123);
        for _ in 0..4 {
            let mv = s.best_move(&p);
            assert!(!mv.is_empty());
            p.make(mv).unwrap();
        }
    }
}
