//! FEN parsing and serialization for [`Position`].
//!
//! FEN is the construction seam for arbitrary positions: tests and tools
//! build mid-game boards from it. The position's ply counter maps to the
//! FEN fullmove number; the halfmove-clock field is accepted on input and
//! always written as 0, since no fifty-move tracking exists.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::FenError;
use crate::file::File;
use crate::piece::Piece;
use crate::position::Position;
use crate::rank::Rank;
use crate::square::Square;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl FromStr for Position {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(FenError::MissingFields {
                found: fields.len(),
            });
        }

        let mut position = Position::empty();

        // Piece placement, rank 8 down to rank 1.
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::BadPlacement {
                reason: "expected 8 ranks",
            });
        }

        for (row, rank_str) in ranks.iter().enumerate() {
            let rank = Rank::from_index(7 - row as u8).expect("row index stays below 8");
            let mut file_index: u8 = 0;

            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    if !(1..=8).contains(&digit) {
                        return Err(FenError::InvalidPieceChar { character: c });
                    }
                    file_index += digit as u8;
                    if file_index > 8 {
                        return Err(FenError::BadPlacement {
                            reason: "rank describes more than 8 squares",
                        });
                    }
                } else {
                    let piece = Piece::from_letter(c)
                        .ok_or(FenError::InvalidPieceChar { character: c })?;
                    let file = File::from_index(file_index).ok_or(FenError::BadPlacement {
                        reason: "rank describes more than 8 squares",
                    })?;
                    position.put(Square::new(rank, file), piece);
                    file_index += 1;
                }
            }

            if file_index != 8 {
                return Err(FenError::BadPlacement {
                    reason: "rank describes fewer than 8 squares",
                });
            }
        }

        // Active color.
        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidColor {
                    found: other.to_string(),
                });
            }
        };
        position.set_side_to_move(side_to_move);

        // Castling rights.
        let castling = CastleRights::from_fen(fields[2]).ok_or(FenError::InvalidCastling {
            found: fields[2].to_string(),
        })?;
        position.set_castling(castling);

        // En passant target.
        if fields[3] != "-" {
            let sq = Square::from_algebraic(fields[3]).ok_or(FenError::InvalidEnPassant {
                found: fields[3].to_string(),
            })?;
            position.set_en_passant(Some(sq));
        }

        // Halfmove clock: accepted for compatibility, not tracked.
        if let Some(field) = fields.get(4) {
            field.parse::<u16>().map_err(|_| FenError::InvalidCounter {
                field: "halfmove clock",
                found: field.to_string(),
            })?;
        }

        // Fullmove number drives the ply counter.
        if let Some(field) = fields.get(5) {
            let fullmove = field.parse::<u32>().map_err(|_| FenError::InvalidCounter {
                field: "fullmove number",
                found: field.to_string(),
            })?;
            let base = fullmove.saturating_sub(1) * 2;
            position.set_ply(base + side_to_move.index() as u32);
        } else {
            position.set_ply(side_to_move.index() as u32);
        }

        position.validate()?;
        Ok(position)
    }
}

impl Position {
    /// Serialize this position to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank_idx in (0u8..8).rev() {
            let rank = Rank::from_index(rank_idx).expect("rank index stays below 8");
            let mut empty_run = 0u8;

            for file in File::ALL {
                let sq = Square::new(rank, file);
                match self.piece_at(sq) {
                    Some(piece) => {
                        if empty_run > 0 {
                            let _ = write!(fen, "{empty_run}");
                            empty_run = 0;
                        }
                        fen.push(piece.letter());
                    }
                    None => empty_run += 1,
                }
            }

            if empty_run > 0 {
                let _ = write!(fen, "{empty_run}");
            }
            if rank_idx > 0 {
                fen.push('/');
            }
        }

        match self.turn() {
            Color::White => fen.push_str(" w"),
            Color::Black => fen.push_str(" b"),
        }

        let _ = write!(fen, " {}", self.castling().to_fen());

        match self.en_passant() {
            Some(sq) => {
                let _ = write!(fen, " {}", sq.to_string().to_ascii_lowercase());
            }
            None => fen.push_str(" -"),
        }

        let fullmove = self.ply() / 2 + 1;
        let _ = write!(fen, " 0 {fullmove}");

        fen
    }
}
