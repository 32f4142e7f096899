//! Parser module for reading chess game formats
//!
//! Currently supports:
//! - PGN (Portable Game Notation)

pub mod pgn;

pub use pgn::{parse_pgn_file, parse_pgn_string, PgnGame};
