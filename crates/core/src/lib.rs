//! Chess Properties Core Library
//!
//! Detects tactical and positional properties of chess positions: back-rank
//! weaknesses, rook/queen batteries, backward pawns and bounded forced mates.

use shakmaty::{fen::Fen, CastlingMode, Chess};

pub mod analysis;
pub mod error;
pub mod geometry;
pub mod parser;
pub mod patterns;
pub mod search;

pub use analysis::{AnalysisType, MetaBoard, Metadata, MoveAnalysis};
pub use error::{Error, Result};
pub use patterns::{
    back_rank_mate, back_rank_weakness, backward_pawns, battery_alignment, defends_along_line,
    find_battery, Battery, PatternDetector, Property, Side,
};
pub use search::{forced_mate_in, CancelToken, MateOutcome, MateSearch, SearchLimits};

/// Builds a standard chess position from a FEN string
pub fn position_from_fen(fen: &str) -> Result<Chess> {
    let parsed: Fen = fen
        .parse()
        .map_err(|e| Error::InvalidFen(format!("{}: {}", fen, e)))?;
    parsed
        .into_position(CastlingMode::Standard)
        .map_err(|e| Error::InvalidPosition(e.to_string()))
}

/// Creates the standard starting position
pub fn starting_position() -> Chess {
    Chess::default()
}
