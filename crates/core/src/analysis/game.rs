//! Whole-game and multi-game annotation

use serde::Serialize;
use shakmaty::{fen::Fen, EnPassantMode};
use tracing::debug;

use super::metaboard::{AnalysisType, MetaBoard};
use crate::error::Result;
use crate::parser::{parse_pgn_string, PgnGame};
use crate::patterns::{PatternDetector, Property};

/// Properties of the position reached after one ply
#[derive(Debug, Clone, Serialize)]
pub struct PlyAnnotation {
    /// 0 for the starting position
    pub ply: usize,
    /// Move that reached this position, in SAN with its check suffix
    pub san: Option<String>,
    pub fen: String,
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameAnalysis {
    pub summary: String,
    pub annotations: Vec<PlyAnnotation>,
}

impl GameAnalysis {
    /// Plies at which a property of `kind` first appears after being absent
    pub fn first_seen(&self, kind: &str) -> Vec<usize> {
        let mut seen = Vec::new();
        let mut present = false;
        for annotation in &self.annotations {
            let now = annotation.properties.iter().any(|p| p.as_str() == kind);
            if now && !present {
                seen.push(annotation.ply);
            }
            present = now;
        }
        seen
    }

    pub fn last(&self) -> Option<&PlyAnnotation> {
        self.annotations.last()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub games: Vec<GameAnalysis>,
}

impl Session {
    pub fn analysis_type(&self) -> AnalysisType {
        AnalysisType::Session
    }
}

/// Annotates every position of `game`, starting position included.
pub fn analyze_game(game: &PgnGame, detector: &PatternDetector) -> Result<GameAnalysis> {
    let mut annotations = Vec::with_capacity(game.positions.len());

    for (ply, position) in game.positions.iter().enumerate() {
        let mut board = MetaBoard::with_position(AnalysisType::Game, position.clone());
        let metadata = board.annotate_all(detector)?;

        annotations.push(PlyAnnotation {
            ply,
            san: ply.checked_sub(1).and_then(|i| game.moves.get(i).cloned()),
            fen: Fen::from_position(position, EnPassantMode::Legal).to_string(),
            properties: metadata.properties().to_vec(),
        });
    }

    debug!(game = %game.summary(), plies = game.move_count(), "game annotated");

    Ok(GameAnalysis {
        summary: game.summary(),
        annotations,
    })
}

/// Parses `pgn` and annotates each game in it.
pub fn analyze_session(pgn: &str, detector: &PatternDetector) -> Result<Session> {
    let games = parse_pgn_string(pgn)?
        .iter()
        .map(|game| analyze_game(game, detector))
        .collect::<Result<Vec<_>>>()?;

    Ok(Session { games })
}
