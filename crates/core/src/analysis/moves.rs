//! Properties created or removed by a single move

use shakmaty::{uci::UciMove, Chess, Color, Move, Position};

use super::metaboard::{AnalysisType, MetaBoard, Metadata};
use crate::error::{Error, Result};
use crate::patterns::{PatternDetector, Property};

/// A move applied to a position, with the resulting board under analysis
#[derive(Debug, Clone)]
pub struct MoveAnalysis {
    uci: String,
    mv: Move,
    mover: Color,
    before: Chess,
    board: MetaBoard,
}

impl MoveAnalysis {
    /// Plays `uci` (e.g. `"e2e4"`) on a copy of `position`.
    pub fn new(position: &Chess, uci: &str) -> Result<Self> {
        let parsed: UciMove = uci
            .parse()
            .map_err(|e| Error::IllegalMove(format!("{}: {}", uci, e)))?;
        let mv = parsed
            .to_move(position)
            .map_err(|e| Error::IllegalMove(format!("{}: {}", uci, e)))?;
        let after = position
            .clone()
            .play(mv.clone())
            .map_err(|e| Error::IllegalMove(format!("{}: {}", uci, e)))?;

        Ok(Self {
            uci: uci.to_string(),
            mv,
            mover: position.turn(),
            before: position.clone(),
            board: MetaBoard::with_position(AnalysisType::Move, after),
        })
    }

    pub fn uci(&self) -> &str {
        &self.uci
    }

    pub fn played(&self) -> &Move {
        &self.mv
    }

    pub fn mover(&self) -> Color {
        self.mover
    }

    pub fn before(&self) -> &Chess {
        &self.before
    }

    pub fn after(&self) -> &Chess {
        self.board.position()
    }

    pub fn board(&self) -> &MetaBoard {
        &self.board
    }

    /// Annotates the position after the move for both colors.
    pub fn annotate(&mut self, detector: &PatternDetector) -> Result<&Metadata> {
        self.board.annotate_all(detector)
    }

    /// Properties present after the move that were absent before it.
    pub fn introduced(&self, detector: &PatternDetector) -> Result<Vec<Property>> {
        let before = detector.detect_all(&self.before)?;
        let after = detector.detect_all(self.after())?;
        Ok(after.into_iter().filter(|p| !before.contains(p)).collect())
    }

    /// Properties present before the move that it removed.
    pub fn resolved(&self, detector: &PatternDetector) -> Result<Vec<Property>> {
        let before = detector.detect_all(&self.before)?;
        let after = detector.detect_all(self.after())?;
        Ok(before.into_iter().filter(|p| !after.contains(p)).collect())
    }
}
