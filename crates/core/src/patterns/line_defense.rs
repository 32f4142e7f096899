//! Rook and queen cover along ranks and files

use std::borrow::Cow;

use shakmaty::{
    attacks, CastlingMode, Chess, Color, EnPassantMode, FromSetup, Piece, Position, Role, Square,
};
use tracing::trace;

use crate::error::{Error, Result};
use crate::geometry::{is_adjacent_file, rank_of, same_file, same_rank};

/// Does the rook or queen on `defender` cover `target`?
///
/// A legal horizontal move landing next to `target` on its rank, or a legal
/// vertical move landing directly above or below it, counts as cover. Cover
/// from further along the line is not modelled, so a rook already standing
/// beside the target does not defend it unless it can slide to the other
/// side. Moves are generated for the defender's color even when the other
/// side is to move.
pub fn defends_along_line(position: &Chess, defender: Square, target: Square) -> Result<bool> {
    let color = match position.board().piece_at(defender) {
        Some(Piece {
            color,
            role: Role::Rook | Role::Queen,
        }) => color,
        other => {
            return Err(Error::InvalidPieceKind {
                square: defender,
                found: other.map(|piece| piece.role),
            })
        }
    };

    let defends = destinations(position, defender, color)
        .into_iter()
        .any(|to| covers(defender, to, target));

    Ok(defends)
}

fn covers(from: Square, to: Square, target: Square) -> bool {
    if from == to {
        return false;
    }
    if same_rank(from, to) {
        same_rank(to, target) && is_adjacent_file(to, target)
    } else if same_file(from, to) {
        same_file(to, target) && rank_of(to).abs_diff(rank_of(target)) == 1
    } else {
        false
    }
}

/// Squares the piece on `from` can move to, as if `color` were on move.
///
/// While the side to move is in check the other color has no legal turn,
/// so its straight slides over the current occupancy are used instead.
fn destinations(position: &Chess, from: Square, color: Color) -> Vec<Square> {
    match with_turn(position, color) {
        Ok(view) => view
            .legal_moves()
            .iter()
            .filter(|mv| mv.from() == Some(from))
            .map(|mv| mv.to())
            .collect(),
        Err(e) => {
            trace!(%from, reason = %e, "falling back to pseudo-legal slides");
            let board = position.board();
            (attacks::rook_attacks(from, board.occupied()) & !board.by_color(color))
                .into_iter()
                .collect()
        }
    }
}

/// The same placement with `color` to move.
///
/// The en passant square is dropped since it only belongs to the real side
/// to move.
fn with_turn(position: &Chess, color: Color) -> Result<Cow<'_, Chess>> {
    if position.turn() == color {
        return Ok(Cow::Borrowed(position));
    }

    let mut setup = position.to_setup(EnPassantMode::Legal);
    setup.turn = color;
    setup.ep_square = None;

    Chess::from_setup(setup, CastlingMode::Standard)
        .map(Cow::Owned)
        .map_err(|e| Error::InvalidPosition(format!("{:?} to move: {}", color, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position_from_fen;

    fn position(fen: &str) -> Chess {
        position_from_fen(fen).unwrap()
    }

    #[test]
    fn test_rook_slides_next_to_king() {
        // Ra1 can reach d1, next to the king on e1
        let pos = position("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        assert!(defends_along_line(&pos, Square::A1, Square::E1).unwrap());
    }

    #[test]
    fn test_vertical_cover() {
        // Rc8 can drop to c4, directly above c3
        let pos = position("2R5/8/8/8/8/8/8/k3K3 w - - 0 1");
        assert!(defends_along_line(&pos, Square::C8, Square::C3).unwrap());
        assert!(!defends_along_line(&pos, Square::C8, Square::D3).unwrap());
    }

    #[test]
    fn test_blocked_rook_does_not_cover() {
        // The knight on b1 stops Ra1 from reaching d1
        let pos = position("4k3/8/8/8/8/8/8/RN2K3 w - - 0 1");
        assert!(!defends_along_line(&pos, Square::A1, Square::E1).unwrap());
    }

    #[test]
    fn test_adjacent_rook_is_not_cover() {
        // Rd1 is already beside the king and cannot slide to f1
        let pos = position("4k3/8/8/8/8/8/8/3RK3 w - - 0 1");
        assert!(!defends_along_line(&pos, Square::D1, Square::E1).unwrap());
    }

    #[test]
    fn test_queen_diagonals_ignored() {
        // Qb4-d2 lands beside e2, but only along a diagonal
        let pos = position("4k3/8/8/8/1Q6/8/8/4K3 w - - 0 1");
        assert!(!defends_along_line(&pos, Square::B4, Square::E2).unwrap());
        // Qb4-d4 slides past c4 and stops beside it
        assert!(defends_along_line(&pos, Square::B4, Square::C4).unwrap());
    }

    #[test]
    fn test_defender_not_on_move() {
        // Black rook with White to move still gets its own moves
        let pos = position("r3k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert!(defends_along_line(&pos, Square::A8, Square::E8).unwrap());
    }

    #[test]
    fn test_other_side_in_check() {
        // White is in check, so Black cannot be put on move; Ra8 still
        // slides to d8 over the empty squares
        let pos = position("r3k3/8/8/8/8/8/8/4K2q w - - 0 1");
        assert!(defends_along_line(&pos, Square::A8, Square::E8).unwrap());
    }

    #[test]
    fn test_invalid_piece_kind() {
        let pos = position("4k3/8/8/8/8/8/8/1N2K3 w - - 0 1");
        assert!(matches!(
            defends_along_line(&pos, Square::B1, Square::E1),
            Err(Error::InvalidPieceKind {
                square: Square::B1,
                found: Some(Role::Knight)
            })
        ));
        assert!(matches!(
            defends_along_line(&pos, Square::C1, Square::E1),
            Err(Error::InvalidPieceKind { found: None, .. })
        ));
    }
}
