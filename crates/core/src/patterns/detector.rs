//! Runs every property detector over a position

use shakmaty::{Chess, Color, Position};
use tracing::debug;

use super::back_rank::{back_rank_mate, back_rank_weakness, king_square};
use super::battery::find_battery;
use super::pawns::backward_pawns;
use super::types::*;
use crate::error::Result;
use crate::search::{move_to_uci, MateSearch, SearchLimits};

/// Collects the properties of a position for one or both colors.
///
/// The forced-mate search is off unless a ply bound is configured, since its
/// cost grows exponentially with the bound.
#[derive(Debug, Clone, Default)]
pub struct PatternDetector {
    mate_plies: Option<u32>,
    limits: SearchLimits,
}

impl PatternDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mate_search(mut self, plies: u32) -> Self {
        self.mate_plies = Some(plies);
        self
    }

    pub fn limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn mate_plies(&self) -> Option<u32> {
        self.mate_plies
    }

    /// Properties concerning `color`.
    pub fn detect(&self, position: &Chess, color: Color) -> Result<Vec<Property>> {
        let side = Side::from(color);
        let board = position.board();
        let mut found = Vec::new();

        if position.turn() == color && position.is_checkmate() {
            found.push(Property::Checkmate { side });
            if back_rank_mate(position, color)? {
                found.push(Property::BackRankMate {
                    side,
                    king: king_square(board, color)?.to_string(),
                });
            }
        }

        if back_rank_weakness(position, color)? {
            found.push(Property::BackRankWeakness {
                side,
                king: king_square(board, color)?.to_string(),
            });
        }

        if let Some(battery) = find_battery(board, color) {
            found.push(Property::BatteryAlignment {
                side,
                queen: battery.queen.to_string(),
                rooks: battery.rooks.map(|sq| sq.to_string()),
            });
        }

        for square in backward_pawns(board, color) {
            found.push(Property::BackwardPawn {
                side,
                square: square.to_string(),
            });
        }

        if let Some(plies) = self.mate_plies {
            if position.turn() != color {
                let outcome = MateSearch::new(plies)
                    .limits(self.limits.clone())
                    .run(position, color)?;
                if let Some(mv) = outcome.first_move {
                    found.push(Property::ForcedMate {
                        side,
                        plies,
                        first_move: move_to_uci(&mv),
                    });
                }
            }
        }

        debug!(side = side.as_str(), count = found.len(), "properties detected");
        Ok(found)
    }

    /// Properties for White followed by those for Black.
    pub fn detect_all(&self, position: &Chess) -> Result<Vec<Property>> {
        let mut found = self.detect(position, Color::White)?;
        found.extend(self.detect(position, Color::Black)?);
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position_from_fen;

    fn position(fen: &str) -> Chess {
        position_from_fen(fen).unwrap()
    }

    #[test]
    fn test_detect_structural_properties() {
        let pos = position("4k3/8/8/8/1P1P4/2R5/2PR4/2Q1K3 w - - 0 1");
        let found = PatternDetector::new().detect(&pos, Color::White).unwrap();
        let kinds: Vec<&str> = found.iter().map(|p| p.as_str()).collect();
        assert!(kinds.contains(&"backward_pawn"));
        assert!(!kinds.contains(&"forced_mate"));
    }

    #[test]
    fn test_detect_gun() {
        let pos = position("4k3/8/8/8/8/2R5/2R5/2Q1K3 w - - 0 1");
        let found = PatternDetector::new().detect(&pos, Color::White).unwrap();
        assert!(found.contains(&Property::BatteryAlignment {
            side: Side::White,
            queen: "c1".to_string(),
            rooks: ["c2".to_string(), "c3".to_string()],
        }));
    }

    #[test]
    fn test_detect_forced_mate_against_opponent() {
        let pos = position("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        let detector = PatternDetector::new().with_mate_search(1);

        let black = detector.detect(&pos, Color::Black).unwrap();
        assert!(black.contains(&Property::ForcedMate {
            side: Side::Black,
            plies: 1,
            first_move: "a1a8".to_string(),
        }));
        assert!(black.contains(&Property::BackRankWeakness {
            side: Side::Black,
            king: "g8".to_string(),
        }));

        // White is on move, so no mate search runs against it
        let white = detector.detect(&pos, Color::White).unwrap();
        assert!(white
            .iter()
            .all(|p| !matches!(p, Property::ForcedMate { .. })));
    }

    #[test]
    fn test_detect_checkmate() {
        let pos = position("R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1");
        let found = PatternDetector::new().detect_all(&pos).unwrap();
        assert!(found.contains(&Property::Checkmate { side: Side::Black }));
        assert!(found.contains(&Property::BackRankMate {
            side: Side::Black,
            king: "g8".to_string(),
        }));
    }
}
