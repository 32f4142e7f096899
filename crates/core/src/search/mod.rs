//! Bounded forced-mate search
//!
//! Decides whether the side to move can force checkmate within a fixed
//! number of plies, against every defence.

pub mod limits;
pub mod mate;

pub use limits::{CancelToken, SearchLimits};
pub use mate::{forced_mate_in, MateOutcome, MateSearch};

use shakmaty::{File, Move, Square};

/// Convert shakmaty Move to UCI string
pub fn move_to_uci(mv: &Move) -> String {
    match mv {
        Move::Normal {
            from, to, promotion, ..
        } => {
            let promo = promotion
                .map(|r| r.char().to_string())
                .unwrap_or_default();
            format!("{}{}{}", from, to, promo)
        }
        Move::EnPassant { from, to } => format!("{}{}", from, to),
        Move::Castle { king, rook } => {
            let file = if rook.file() > king.file() { File::G } else { File::C };
            format!("{}{}", king, Square::from_coords(file, king.rank()))
        }
        Move::Put { role, to } => format!("{}@{}", role.upper_char(), to),
    }
}
