//! Error types for chess-properties-core

use shakmaty::{Color, Role, Square};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("coordinate out of range: file {file}, rank {rank}")]
    OutOfRange { file: u8, rank: u8 },

    #[error("{square} holds {found:?}, expected a rook or queen")]
    InvalidPieceKind { square: Square, found: Option<Role> },

    #[error("no {0:?} king on the board")]
    NoKingFound(Color),

    #[error("{count} {color:?} kings on the board")]
    MultipleKingsFound { color: Color, count: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("search aborted after {nodes} nodes")]
    SearchAborted { nodes: u64 },

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("PGN parsing error: {0}")]
    Pgn(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
