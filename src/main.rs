use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rocade_core::{Color, Position, Status};
use rocade_engine::{DEFAULT_DEPTH, Searcher};
use tracing::info;

/// Hard stop for the demo game, in plies.
const PLY_LIMIT: u32 = 120;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    info!("rocade starting");

    let mut position = Position::starting();
    let mut white = Searcher::new(DEFAULT_DEPTH, StdRng::from_entropy());
    let mut black = Searcher::new(DEFAULT_DEPTH, StdRng::from_entropy());

    while position.status() == Status::Undetermined && position.ply() < PLY_LIMIT {
        let mv = match position.turn() {
            Color::White => white.best_move(&position),
            Color::Black => black.best_move(&position),
        };
        if mv.is_empty() {
            break;
        }

        let mover = position.turn();
        position
            .make(mv)
            .with_context(|| format!("search produced an illegal move: {mv}"))?;
        info!("{mover} played {mv}");
    }

    println!("{position}");
    println!("after {} plies: {}", position.ply(), position.status());
    Ok(())
}
