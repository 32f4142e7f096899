//! Back rank weakness and back rank mate

use shakmaty::{Board, Chess, Color, Position, Role, Square};
use tracing::debug;

use super::line_defense::defends_along_line;
use crate::error::{Error, Result};
use crate::geometry::{same_rank, Orientation};

/// The square of `color`'s only king
pub fn king_square(board: &Board, color: Color) -> Result<Square> {
    let kings = board.by_piece(Role::King.of(color));
    match kings.count() {
        0 => Err(Error::NoKingFound(color)),
        1 => kings.first().ok_or(Error::NoKingFound(color)),
        count => Err(Error::MultipleKingsFound { color, count }),
    }
}

/// Is `color`'s king exposed to a back rank mate?
///
/// The king must stand on its own back rank, and no rook or queen of the
/// same color on that rank may cover the king square (see
/// [`defends_along_line`]). A back-ranked king with no heavy pieces at all
/// is weak.
pub fn back_rank_weakness(position: &Chess, color: Color) -> Result<bool> {
    let orientation = Orientation::of(color);
    let board = position.board();
    let king = king_square(board, color)?;

    if !orientation.is_back_rank(king) {
        return Ok(false);
    }

    let heavy = (board.rooks() | board.queens()) & board.by_color(color);
    for square in heavy {
        if !orientation.is_back_rank(square) {
            continue;
        }
        if defends_along_line(position, square, king)? {
            let piece = board
                .piece_at(square)
                .map(|p| orientation.symbol(p.role))
                .unwrap_or('?');
            debug!(%king, cover = %square, %piece, "back rank covered");
            return Ok(false);
        }
    }

    Ok(true)
}

/// Is `color` checkmated by a rook or queen on its own back rank?
pub fn back_rank_mate(position: &Chess, color: Color) -> Result<bool> {
    if position.turn() != color || !position.is_checkmate() {
        return Ok(false);
    }

    let board = position.board();
    let king = king_square(board, color)?;
    if !Orientation::of(color).is_back_rank(king) {
        return Ok(false);
    }

    let checkers = position.checkers();
    let along_rank = checkers.into_iter().all(|checker| {
        let heavy = matches!(
            board.piece_at(checker).map(|piece| piece.role),
            Some(Role::Rook | Role::Queen)
        );
        heavy && same_rank(checker, king)
    });

    Ok(!checkers.is_empty() && along_rank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position_from_fen;
    use shakmaty::Piece;

    fn position(fen: &str) -> Chess {
        position_from_fen(fen).unwrap()
    }

    #[test]
    fn test_lone_king_is_weak() {
        let pos = position("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert!(back_rank_weakness(&pos, Color::White).unwrap());
        assert!(back_rank_weakness(&pos, Color::Black).unwrap());
    }

    #[test]
    fn test_rook_covers_king() {
        let pos = position("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        assert!(!back_rank_weakness(&pos, Color::White).unwrap());
    }

    #[test]
    fn test_black_rook_covers_king_with_white_to_move() {
        let pos = position("r3k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert!(!back_rank_weakness(&pos, Color::Black).unwrap());
        assert!(back_rank_weakness(&pos, Color::White).unwrap());
    }

    #[test]
    fn test_rook_off_back_rank_gives_no_cover() {
        let pos = position("4k3/8/8/8/8/8/R7/4K3 w - - 0 1");
        assert!(back_rank_weakness(&pos, Color::White).unwrap());
    }

    #[test]
    fn test_king_off_back_rank() {
        let pos = position("8/4k3/8/8/8/8/4K3/8 w - - 0 1");
        assert!(!back_rank_weakness(&pos, Color::White).unwrap());
        assert!(!back_rank_weakness(&pos, Color::Black).unwrap());
    }

    #[test]
    fn test_starting_position_has_no_cover() {
        // Neither rook nor the queen has a legal move yet
        let pos = Chess::default();
        assert!(back_rank_weakness(&pos, Color::White).unwrap());
    }

    #[test]
    fn test_king_square_errors() {
        let mut board = Board::empty();
        assert!(matches!(
            king_square(&board, Color::White),
            Err(Error::NoKingFound(Color::White))
        ));

        let king = Piece {
            color: Color::White,
            role: Role::King,
        };
        board.set_piece_at(Square::E1, king);
        assert_eq!(king_square(&board, Color::White).unwrap(), Square::E1);

        board.set_piece_at(Square::E4, king);
        assert!(matches!(
            king_square(&board, Color::White),
            Err(Error::MultipleKingsFound { count: 2, .. })
        ));
    }

    #[test]
    fn test_back_rank_mate() {
        let pos = position("R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1");
        assert!(back_rank_mate(&pos, Color::Black).unwrap());
        assert!(!back_rank_mate(&pos, Color::White).unwrap());
    }

    #[test]
    fn test_mate_off_the_back_rank() {
        // Scholar's mate: the queen checks from f7, not along the rank
        let pos = position("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
        assert!(pos.is_checkmate());
        assert!(!back_rank_mate(&pos, Color::Black).unwrap());
    }
}
