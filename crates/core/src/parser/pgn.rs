//! PGN file parsing functionality

use pgn_reader::{RawTag, SanPlus, Skip, Visitor};
use shakmaty::{Chess, Position};
use std::fs;
use std::io::Cursor;
use std::ops::ControlFlow;
use std::path::Path;
use tracing::warn;

use crate::error::{Error, Result};
use crate::position_from_fen;

/// A parsed game with every position it passed through
#[derive(Debug, Clone)]
pub struct PgnGame {
    pub event: Option<String>,
    pub white: Option<String>,
    pub black: Option<String>,
    pub result: Option<String>,
    /// Moves in SAN with any `+`/`#` suffix, one per ply
    pub moves: Vec<String>,
    /// `positions[0]` is the start, `positions[n]` follows `moves[n - 1]`
    pub positions: Vec<Chess>,
}

impl PgnGame {
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn final_position(&self) -> &Chess {
        // begin_movetext always pushes the start position
        &self.positions[self.positions.len() - 1]
    }

    pub fn summary(&self) -> String {
        let white = self.white.as_deref().unwrap_or("Unknown");
        let black = self.black.as_deref().unwrap_or("Unknown");
        let result = self.result.as_deref().unwrap_or("*");
        format!("{} vs {} - {}", white, black, result)
    }
}

#[derive(Default)]
struct GameTags {
    event: Option<String>,
    white: Option<String>,
    black: Option<String>,
    result: Option<String>,
    fen: Option<String>,
}

struct GameMoves {
    tags: GameTags,
    moves: Vec<String>,
    positions: Vec<Chess>,
    failure: Option<String>,
}

impl GameMoves {
    fn current(&self) -> &Chess {
        &self.positions[self.positions.len() - 1]
    }
}

struct GameParser;

impl Visitor for GameParser {
    type Tags = GameTags;
    type Movetext = GameMoves;
    type Output = std::result::Result<PgnGame, String>;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        ControlFlow::Continue(GameTags::default())
    }

    fn tag(
        &mut self,
        tags: &mut Self::Tags,
        name: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        let name_str = String::from_utf8_lossy(name);
        let value_str = value.decode_utf8_lossy().to_string();

        match name_str.as_ref() {
            "Event" => tags.event = Some(value_str),
            "White" => tags.white = Some(value_str),
            "Black" => tags.black = Some(value_str),
            "Result" => tags.result = Some(value_str),
            "FEN" => tags.fen = Some(value_str),
            _ => {}
        }

        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        let start = match tags.fen.as_deref() {
            Some(fen) => match position_from_fen(fen) {
                Ok(pos) => pos,
                Err(e) => return ControlFlow::Break(Err(e.to_string())),
            },
            None => Chess::default(),
        };

        ControlFlow::Continue(GameMoves {
            tags,
            moves: Vec::new(),
            positions: vec![start],
            failure: None,
        })
    }

    fn san(&mut self, movetext: &mut Self::Movetext, san: SanPlus) -> ControlFlow<Self::Output> {
        if movetext.failure.is_some() {
            return ControlFlow::Continue(());
        }

        let played = san
            .san
            .to_move(movetext.current())
            .map_err(|e| e.to_string())
            .and_then(|m| {
                movetext
                    .current()
                    .clone()
                    .play(m)
                    .map_err(|e| e.to_string())
            });

        match played {
            Ok(next) => {
                movetext.moves.push(san.to_string());
                movetext.positions.push(next);
            }
            Err(e) => {
                let ply = movetext.moves.len() + 1;
                movetext.failure = Some(format!("{} at ply {}: {}", san, ply, e));
            }
        }

        ControlFlow::Continue(())
    }

    fn begin_variation(
        &mut self,
        _movetext: &mut Self::Movetext,
    ) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn end_game(&mut self, movetext: Self::Movetext) -> Self::Output {
        match movetext.failure {
            Some(reason) => Err(reason),
            None => Ok(PgnGame {
                event: movetext.tags.event,
                white: movetext.tags.white,
                black: movetext.tags.black,
                result: movetext.tags.result,
                moves: movetext.moves,
                positions: movetext.positions,
            }),
        }
    }
}

pub fn parse_pgn_file<P: AsRef<Path>>(path: P) -> Result<Vec<PgnGame>> {
    let contents = fs::read_to_string(path)?;
    parse_pgn_string(&contents)
}

/// Parses every game in `pgn`, skipping games whose moves do not replay.
pub fn parse_pgn_string(pgn: &str) -> Result<Vec<PgnGame>> {
    let mut parser = GameParser;
    let mut games: Vec<PgnGame> = Vec::new();

    let cursor = Cursor::new(pgn.as_bytes());
    let mut reader = pgn_reader::Reader::new(cursor);

    loop {
        match reader.read_game(&mut parser) {
            Ok(Some(Ok(game))) => games.push(game),
            Ok(Some(Err(reason))) => warn!(%reason, "skipping unplayable game"),
            Ok(None) => break,
            Err(e) => return Err(Error::Pgn(e.to_string())),
        }
    }

    if games.is_empty() {
        Err(Error::Pgn("no valid games found in PGN".to_string()))
    } else {
        Ok(games)
    }
}
