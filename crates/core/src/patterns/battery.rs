//! Alekhine's gun: two rooks on a file with the queen behind them

use shakmaty::{Board, Chess, Color, Position, Role, Square};

use crate::geometry::{file_of, rank_of, same_file, Orientation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Battery {
    pub queen: Square,
    /// Rook squares in ascending order
    pub rooks: [Square; 2],
}

impl Battery {
    pub fn file(&self) -> u8 {
        file_of(self.queen)
    }
}

/// Finds the first rook pair and queen forming a battery for `color`.
///
/// Rook pairs are tried in ascending square order (`a < b`, then by `b`),
/// and for each pair sharing a file the lowest-indexed queen on that file
/// that stands behind both rooks, seen from `color`'s side, completes it.
pub fn find_battery(board: &Board, color: Color) -> Option<Battery> {
    let rooks: Vec<Square> = board.by_piece(Role::Rook.of(color)).into_iter().collect();
    let queens: Vec<Square> = board.by_piece(Role::Queen.of(color)).into_iter().collect();

    if rooks.len() < 2 || queens.is_empty() {
        return None;
    }

    let orientation = Orientation::of(color);
    for (i, &a) in rooks.iter().enumerate() {
        for &b in &rooks[i + 1..] {
            if !same_file(a, b) {
                continue;
            }
            let queen = queens.iter().copied().find(|&q| {
                same_file(q, a)
                    && orientation.is_behind(rank_of(q), rank_of(a))
                    && orientation.is_behind(rank_of(q), rank_of(b))
            });
            if let Some(queen) = queen {
                return Some(Battery {
                    queen,
                    rooks: [a, b],
                });
            }
        }
    }

    None
}

/// Does `color` have two rooks stacked on a file with its queen behind both?
pub fn battery_alignment(position: &Chess, color: Color) -> bool {
    find_battery(position.board(), color).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position_from_fen;

    fn position(fen: &str) -> Chess {
        position_from_fen(fen).unwrap()
    }

    #[test]
    fn test_white_gun() {
        let pos = position("4k3/8/8/8/8/2R5/2R5/2Q1K3 w - - 0 1");
        assert!(battery_alignment(&pos, Color::White));
        assert_eq!(
            find_battery(pos.board(), Color::White),
            Some(Battery {
                queen: Square::C1,
                rooks: [Square::C2, Square::C3],
            })
        );
        assert!(!battery_alignment(&pos, Color::Black));
    }

    #[test]
    fn test_single_rook() {
        let pos = position("4k3/8/8/8/8/8/2R5/2Q1K3 w - - 0 1");
        assert!(!battery_alignment(&pos, Color::White));
    }

    #[test]
    fn test_no_queen() {
        let pos = position("4k3/8/8/8/8/2R5/2R5/4K3 w - - 0 1");
        assert!(!battery_alignment(&pos, Color::White));
    }

    #[test]
    fn test_queen_in_front_of_rooks() {
        let pos = position("4k3/8/8/8/2Q5/2R5/2R5/4K3 w - - 0 1");
        assert!(!battery_alignment(&pos, Color::White));
    }

    #[test]
    fn test_queen_between_rooks() {
        let pos = position("4k3/8/8/8/8/2R5/2Q5/2R1K3 w - - 0 1");
        assert!(!battery_alignment(&pos, Color::White));
    }

    #[test]
    fn test_rooks_on_different_files() {
        let pos = position("4k3/8/8/8/8/3R4/2R5/2Q1K3 w - - 0 1");
        assert!(!battery_alignment(&pos, Color::White));
    }

    #[test]
    fn test_black_gun_points_down() {
        let pos = position("2q1k3/2r5/2r5/8/8/8/8/4K3 w - - 0 1");
        assert!(battery_alignment(&pos, Color::Black));

        // The same stack reads backwards for Black when the queen is lowest
        let pos = position("4k3/8/8/8/8/2r5/2r5/2q1K3 w - - 0 1");
        assert!(!battery_alignment(&pos, Color::Black));
    }

    #[test]
    fn test_first_pair_wins() {
        // Guns on the a-file and the h-file; (a2, a3) is the lowest pair
        let pos = position("4k3/8/8/8/8/R6R/R6R/Q3K2Q w - - 0 1");
        let battery = find_battery(pos.board(), Color::White).unwrap();
        assert_eq!(battery.file(), 0);
        assert_eq!(battery.queen, Square::A1);
        assert_eq!(battery.rooks, [Square::A2, Square::A3]);
    }

    #[test]
    fn test_three_rooks_on_a_file() {
        let pos = position("4k3/8/8/8/2R5/2R5/2R5/2Q1K3 w - - 0 1");
        let battery = find_battery(pos.board(), Color::White).unwrap();
        assert_eq!(battery.rooks, [Square::C2, Square::C3]);
    }
}
