//! Annotated boards: positions together with the properties found in them

mod game;
mod metaboard;
mod moves;

pub use game::{analyze_game, analyze_session, GameAnalysis, PlyAnnotation, Session};
pub use metaboard::{AnalysisType, MetaBoard, Metadata};
pub use moves::MoveAnalysis;
