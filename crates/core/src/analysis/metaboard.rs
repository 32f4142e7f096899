//! Board plus analysis metadata

use serde::{Deserialize, Serialize};
use shakmaty::{Chess, Color};

use crate::error::Result;
use crate::patterns::{PatternDetector, Property, Side};
use crate::position_from_fen;

/// Scope of an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    /// A single position
    Snapshot,
    /// The position reached by one move
    Move,
    /// Every position of one game
    Game,
    /// Several games
    Session,
}

impl AnalysisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisType::Snapshot => "snapshot",
            AnalysisType::Move => "move",
            AnalysisType::Game => "game",
            AnalysisType::Session => "session",
        }
    }
}

/// Properties recorded against a board, in the order they were found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    properties: Vec<Property>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `property` unless an equal one is already present.
    pub fn record(&mut self, property: Property) {
        if !self.properties.contains(&property) {
            self.properties.push(property);
        }
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn for_side(&self, side: Side) -> impl Iterator<Item = &Property> {
        self.properties.iter().filter(move |p| p.side() == side)
    }

    pub fn has(&self, kind: &str) -> bool {
        self.properties.iter().any(|p| p.as_str() == kind)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn clear(&mut self) {
        self.properties.clear();
    }
}

impl Extend<Property> for Metadata {
    fn extend<I: IntoIterator<Item = Property>>(&mut self, iter: I) {
        for property in iter {
            self.record(property);
        }
    }
}

/// A position under analysis and what has been found in it
#[derive(Debug, Clone)]
pub struct MetaBoard {
    position: Chess,
    analysis_type: AnalysisType,
    metadata: Metadata,
}

impl MetaBoard {
    /// Starts from the standard starting position
    pub fn new(analysis_type: AnalysisType) -> Self {
        Self::with_position(analysis_type, Chess::default())
    }

    pub fn with_position(analysis_type: AnalysisType, position: Chess) -> Self {
        Self {
            position,
            analysis_type,
            metadata: Metadata::new(),
        }
    }

    pub fn from_fen(analysis_type: AnalysisType, fen: &str) -> Result<Self> {
        Ok(Self::with_position(analysis_type, position_from_fen(fen)?))
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    pub fn analysis_type(&self) -> AnalysisType {
        self.analysis_type
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Runs `detector` for `color` and records what it finds.
    pub fn annotate(&mut self, detector: &PatternDetector, color: Color) -> Result<&Metadata> {
        let found = detector.detect(&self.position, color)?;
        self.metadata.extend(found);
        Ok(&self.metadata)
    }

    /// Annotates for White, then Black.
    pub fn annotate_all(&mut self, detector: &PatternDetector) -> Result<&Metadata> {
        let found = detector.detect_all(&self.position)?;
        self.metadata.extend(found);
        Ok(&self.metadata)
    }
}

impl Default for MetaBoard {
    fn default() -> Self {
        Self::new(AnalysisType::Snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::Position;

    #[test]
    fn test_new_board_starts_empty() {
        let board = MetaBoard::new(AnalysisType::Snapshot);
        assert_eq!(board.analysis_type(), AnalysisType::Snapshot);
        assert!(board.metadata().is_empty());
        assert_eq!(board.position().board(), Chess::default().board());
    }

    #[test]
    fn test_annotate_is_idempotent() {
        let mut board =
            MetaBoard::from_fen(AnalysisType::Snapshot, "4k3/8/8/8/1P1P4/8/2P5/4K3 w - - 0 1")
                .unwrap();
        let detector = PatternDetector::new();

        let first = board.annotate(&detector, Color::White).unwrap().clone();
        let second = board.annotate(&detector, Color::White).unwrap().clone();
        assert_eq!(first, second);
        assert!(first.has("backward_pawn"));
        assert!(first.has("back_rank_weakness"));
    }

    #[test]
    fn test_for_side() {
        let mut board = MetaBoard::from_fen(AnalysisType::Snapshot, "4k3/8/8/8/8/8/8/4K3 w - - 0 1")
            .unwrap();
        board.annotate_all(&PatternDetector::new()).unwrap();
        assert_eq!(board.metadata().for_side(Side::White).count(), 1);
        assert_eq!(board.metadata().for_side(Side::Black).count(), 1);
    }

    #[test]
    fn test_metadata_serializes() {
        let mut metadata = Metadata::new();
        metadata.record(Property::BackwardPawn {
            side: Side::White,
            square: "c2".to_string(),
        });
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["properties"][0]["kind"], "backward_pawn");
        assert_eq!(json["properties"][0]["side"], "white");
        assert_eq!(json["properties"][0]["square"], "c2");

        let back: Metadata = serde_json::from_value(json).unwrap();
        assert_eq!(back, metadata);
    }
}
