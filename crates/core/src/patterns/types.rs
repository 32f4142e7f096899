//! Property types reported by the detectors

use serde::{Deserialize, Serialize};
use shakmaty::Color;

/// Serializable mirror of `shakmaty::Color`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }
}

impl From<Color> for Side {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

/// A property found in a position.
///
/// Squares and moves are kept in algebraic / UCI form so a property can be
/// serialized as-is. `side` is always the color the property is about: the
/// weak side for weaknesses, the owner for batteries and pawns, and the side
/// being mated for mates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Property {
    Checkmate {
        side: Side,
    },
    BackRankMate {
        side: Side,
        king: String,
    },
    BackRankWeakness {
        side: Side,
        king: String,
    },
    BatteryAlignment {
        side: Side,
        queen: String,
        rooks: [String; 2],
    },
    BackwardPawn {
        side: Side,
        square: String,
    },
    ForcedMate {
        side: Side,
        plies: u32,
        first_move: String,
    },
}

impl Property {
    pub fn side(&self) -> Side {
        match self {
            Property::Checkmate { side }
            | Property::BackRankMate { side, .. }
            | Property::BackRankWeakness { side, .. }
            | Property::BatteryAlignment { side, .. }
            | Property::BackwardPawn { side, .. }
            | Property::ForcedMate { side, .. } => *side,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Property::Checkmate { .. } => "checkmate",
            Property::BackRankMate { .. } => "back_rank_mate",
            Property::BackRankWeakness { .. } => "back_rank_weakness",
            Property::BatteryAlignment { .. } => "battery_alignment",
            Property::BackwardPawn { .. } => "backward_pawn",
            Property::ForcedMate { .. } => "forced_mate",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Property::Checkmate { .. } => "Checkmate",
            Property::BackRankMate { .. } => "Back Rank Mate",
            Property::BackRankWeakness { .. } => "Back Rank Weakness",
            Property::BatteryAlignment { .. } => "Alekhine's Gun",
            Property::BackwardPawn { .. } => "Backward Pawn",
            Property::ForcedMate { .. } => "Forced Mate",
        }
    }

    /// One-line human readable description
    pub fn description(&self) -> String {
        let side = self.side().as_str();
        match self {
            Property::Checkmate { .. } => format!("{} is checkmated", side),
            Property::BackRankMate { king, .. } => {
                format!("{} king on {} is mated along the back rank", side, king)
            }
            Property::BackRankWeakness { king, .. } => {
                format!("{} king on {} has no back rank cover", side, king)
            }
            Property::BatteryAlignment { queen, rooks, .. } => format!(
                "{} queen on {} backs rooks on {} and {}",
                side, queen, rooks[0], rooks[1]
            ),
            Property::BackwardPawn { square, .. } => {
                format!("{} pawn on {} is backward", side, square)
            }
            Property::ForcedMate {
                plies, first_move, ..
            } => format!("{} is mated within {} plies, starting {}", side, plies, first_move),
        }
    }
}
