//! Pawn structure

use shakmaty::{Bitboard, Board, Color, Role, Square};

use crate::geometry::{file_of, rank_of, Orientation};

/// Squares of `color`'s backward pawns, in ascending order.
///
/// A pawn is backward when both neighbouring files hold pawns of its color
/// and every one of them is further advanced. Pawns on the a- and h-files
/// have a single neighbour and are never reported.
pub fn backward_pawns(board: &Board, color: Color) -> Vec<Square> {
    let orientation = Orientation::of(color);
    let pawns = board.by_piece(Role::Pawn.of(color));

    pawns
        .into_iter()
        .filter(|&pawn| is_backward(pawns, pawn, orientation))
        .collect()
}

fn is_backward(pawns: Bitboard, pawn: Square, orientation: Orientation) -> bool {
    let file = file_of(pawn);
    if file == 0 || file == 7 {
        return false;
    }

    [file - 1, file + 1].into_iter().all(|flank| {
        let mut neighbours = pawns
            .into_iter()
            .filter(|&sq| file_of(sq) == flank)
            .peekable();
        neighbours.peek().is_some()
            && neighbours.all(|sq| orientation.is_further_advanced(rank_of(sq), rank_of(pawn)))
    })
}
