//! Board geometry helpers
//!
//! Squares are indexed `rank * 8 + file` with both coordinates in `0..8`,
//! matching `shakmaty::Square`.

use shakmaty::{Color, File, Rank, Role, Square};

use crate::error::{Error, Result};

pub fn file_of(square: Square) -> u8 {
    square.file() as u8
}

pub fn rank_of(square: Square) -> u8 {
    square.rank() as u8
}

/// Builds a square from zero-based file and rank indices.
pub fn square_of(file: u8, rank: u8) -> Result<Square> {
    if file > 7 || rank > 7 {
        return Err(Error::OutOfRange { file, rank });
    }
    Ok(Square::from_coords(
        File::new(u32::from(file)),
        Rank::new(u32::from(rank)),
    ))
}

pub fn same_rank(a: Square, b: Square) -> bool {
    rank_of(a) == rank_of(b)
}

pub fn same_file(a: Square, b: Square) -> bool {
    file_of(a) == file_of(b)
}

pub fn is_adjacent_file(a: Square, b: Square) -> bool {
    file_of(a).abs_diff(file_of(b)) == 1
}

/// Per-color board conventions.
///
/// Every color-dependent rule in the detectors reads from this table instead
/// of branching on the color itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    /// Rank index of the color's first rank.
    pub back_rank: u8,
    /// Rank step that moves a pawn of this color forward.
    pub forward: i8,
    /// Whether FEN writes this color's pieces in upper case.
    pub uppercase: bool,
}

const WHITE: Orientation = Orientation {
    back_rank: 0,
    forward: 1,
    uppercase: true,
};

const BLACK: Orientation = Orientation {
    back_rank: 7,
    forward: -1,
    uppercase: false,
};

impl Orientation {
    pub const fn of(color: Color) -> Self {
        match color {
            Color::White => WHITE,
            Color::Black => BLACK,
        }
    }

    pub fn is_back_rank(&self, square: Square) -> bool {
        rank_of(square) == self.back_rank
    }

    /// True if rank `a` is strictly closer to the opponent than rank `b`.
    pub fn is_further_advanced(&self, a: u8, b: u8) -> bool {
        (i16::from(a) - i16::from(b)) * i16::from(self.forward) > 0
    }

    /// True if rank `a` is strictly closer to this color's back edge than rank `b`.
    pub fn is_behind(&self, a: u8, b: u8) -> bool {
        self.is_further_advanced(b, a)
    }

    pub fn symbol(&self, role: Role) -> char {
        if self.uppercase {
            role.upper_char()
        } else {
            role.char()
        }
    }
}
