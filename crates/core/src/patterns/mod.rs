//! Property detectors for chess positions

mod back_rank;
mod battery;
mod detector;
mod line_defense;
mod pawns;
mod types;

pub use back_rank::{back_rank_mate, back_rank_weakness, king_square};
pub use battery::{battery_alignment, find_battery, Battery};
pub use detector::PatternDetector;
pub use line_defense::defends_along_line;
pub use pawns::backward_pawns;
pub use types::*;
