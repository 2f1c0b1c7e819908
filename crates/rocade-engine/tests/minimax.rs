//! End-to-end search behavior.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rocade_core::{Move, PieceKind, Position, Square, Status};
use rocade_engine::{DEFAULT_DEPTH, Searcher};

fn pos(fen: &str) -> Position {
    fen.parse().unwrap()
}

fn searcher(seed: u64) -> Searcher<StdRng> {
    Searcher::new(DEFAULT_DEPTH, StdRng::seed_from_u64(seed))
}

#[test]
fn finds_a_back_rank_mate_regardless_of_seed() {
    // Ra8 is mate: the black king is walled in by its own pawns.
    let p = pos("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1");
    for seed in 0..10 {
        let mv = searcher(seed).best_move(&p);
        assert_eq!(mv, Move::new(Square::A1, Square::A8), "seed {seed} missed the mate");
    }

    let mut after = p;
    after.make(Move::new(Square::A1, Square::A8)).unwrap();
    assert_eq!(after.status(), Status::Checkmate);
}

#[test]
fn takes_the_hanging_queen() {
    // The rook on A1 can win the queen on A8; nothing else comes close.
    let p = pos("q5k1/5p1p/6p1/8/8/8/5PPP/R5K1 w - - 0 1");
    for seed in 0..10 {
        let mv = searcher(seed).best_move(&p);
        assert_eq!(mv, Move::new(Square::A1, Square::A8), "seed {seed} left the queen");
    }
}

#[test]
fn promotes_by_default() {
    // Pushing the pawn queens it; every alternative just shuffles a king.
    let p = pos("8/4P3/8/8/8/8/k6K/8 w - - 0 1");
    let mv = searcher(3).best_move(&p);
    assert_eq!(mv.source(), Square::E7);
    assert_eq!(mv.dest(), Square::E8);
    assert_eq!(mv.promotion(), Some(PieceKind::Queen));
}

#[test]
fn black_minimizes() {
    // Mirror of the hanging-queen case: Black wins the white queen.
    let p = pos("r5k1/5p1p/6p1/8/8/6P1/5P1P/Q5K1 b - - 0 1");
    for seed in 0..10 {
        let mv = searcher(seed).best_move(&p);
        assert_eq!(mv, Move::new(Square::A8, Square::A1), "seed {seed} left the queen");
    }
}

#[test]
fn terminal_position_yields_the_empty_move() {
    // Scholar's mate: Black has nothing to play.
    let p = pos("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
    assert!(searcher(0).best_move(&p).is_empty());
}

#[test]
fn seeded_searchers_replay_identically() {
    let mut left = searcher(99);
    let mut right = searcher(99);
    let mut p_left = Position::starting();
    let mut p_right = Position::starting();

    for _ in 0..3 {
        let a = left.best_move(&p_left);
        let b = right.best_move(&p_right);
        assert_eq!(a, b);
        p_left.make(a).unwrap();
        p_right.make(b).unwrap();
    }
    assert_eq!(p_left, p_right);
}

#[test]
fn avoids_losing_the_queen_for_nothing() {
    // The white queen is attacked by the pawn on D5; at two plies the
    // search sees the recapture and keeps the queen out of reach.
    let p = pos("6k1/8/8/3p4/2Q5/8/8/6K1 w - - 0 1");
    let mv = searcher(11).best_move(&p);
    let mut after = p;
    after.make(mv).unwrap();

    // Whatever was chosen, Black must not be able to win the queen next move.
    let mut replies_taking_queen = 0;
    for src in Square::all() {
        for dst in Square::all() {
            let reply = Move::new(src, dst);
            let mut probe = after;
            if probe.make(reply).is_err() {
                continue;
            }
            if probe.count(rocade_core::Color::White, PieceKind::Queen) == 0 {
                replies_taking_queen += 1;
            }
        }
    }
    assert_eq!(replies_taking_queen, 0, "queen was left en prise after {mv}");
}
