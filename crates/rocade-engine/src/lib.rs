//! Search and evaluation for rocade.

pub mod eval;
pub mod search;

pub use eval::{CHECKMATE_SCORE, evaluate, material_balance};
pub use search::{DEFAULT_DEPTH, Searcher};
