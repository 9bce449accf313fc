//! Board evaluation functions for the informed searches.
//!
//! Every heuristic shares the signature `fn(&Grid, &[Piece]) -> i64` and
//! follows the convention that *lower is better* (0 or negative values are
//! promising, large positive values are bad). All are total and side-effect
//! free, and are well-defined on empty grids and empty hands.
//!
//! None of these is proven admissible, so A* guided by them trades the
//! optimality guarantee for speed. BFS remains the reference for
//! minimum-move answers.
use crate::engine::{Grid, Piece};

/// Reward per line that is currently complete and about to clear.
pub const LINE_CLEAR_WEIGHT: i64 = 10;
/// Penalty per piece still in hand.
pub const PIECE_OPTION_WEIGHT: i64 = 5;

/// Number of occupied cells. The most direct measure of distance from the
/// all-empty goal.
pub fn heuristic_filled_cells(grid: &Grid, _pieces: &[Piece]) -> i64 {
    grid.filled_cells() as i64
}

/// Number of pieces still in hand. Crude, but cheap; it steers toward
/// states that have consumed more of the hand.
pub fn heuristic_remaining_pieces(_grid: &Grid, pieces: &[Piece]) -> i64 {
    pieces.len() as i64
}

/// Weighted blend: occupied cells, minus a bonus for lines ready to clear,
/// plus a penalty per held piece. The weights are tuning constants, not
/// derived quantities.
pub fn combined_heuristic(grid: &Grid, pieces: &[Piece]) -> i64 {
    grid.filled_cells() as i64 - LINE_CLEAR_WEIGHT * grid.clearable_lines() as i64
        + PIECE_OPTION_WEIGHT * pieces.len() as i64
}

/// Negative count of pieces that still have at least one valid placement
/// (any rotation, any position). More placeable pieces means more options,
/// so a lower (more negative) value.
pub fn heuristic_piece_removal(grid: &Grid, pieces: &[Piece]) -> i64 {
    let mut placeable: i64 = 0;
    'pieces: for piece in pieces {
        for rotation in piece.shape.rotations() {
            for x in 0..grid.size() {
                for y in 0..grid.size() {
                    if grid.can_place(&rotation, x, y) {
                        placeable += 1;
                        continue 'pieces;
                    }
                }
            }
        }
    }
    -placeable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Color, Grid, Piece};
    use crate::levels::Level;
    use crate::utils::{grid_from_str_array, shape_from_str_array};

    fn square_piece() -> Piece {
        Piece::new(shape_from_str_array(&["##", "##"]).unwrap(), Color::Yellow)
    }

    fn line_piece() -> Piece {
        Piece::new(shape_from_str_array(&["###"]).unwrap(), Color::Red)
    }

    #[test]
    fn test_filled_cells_on_empty_grid_is_zero() {
        let grid = Grid::new_empty(4);
        assert_eq!(heuristic_filled_cells(&grid, &[]), 0);
    }

    #[test]
    fn test_filled_cells_counts_occupancy() {
        let grid = grid_from_str_array(&["RR.", "G..", "..."]).unwrap();
        assert_eq!(heuristic_filled_cells(&grid, &[line_piece()]), 3);
    }

    #[test]
    fn test_remaining_pieces_counts_hand() {
        let grid = Grid::new_empty(3);
        assert_eq!(heuristic_remaining_pieces(&grid, &[]), 0);
        let hand = vec![square_piece(), line_piece()];
        assert_eq!(heuristic_remaining_pieces(&grid, &hand), 2);
    }

    #[test]
    fn test_combined_heuristic_blend() {
        // 4 filled cells, 1 clearable row, 2 pieces: 4 - 10 + 10 = 4
        let grid = grid_from_str_array(&["RRR", "G..", "..."]).unwrap();
        let hand = vec![square_piece(), line_piece()];
        assert_eq!(combined_heuristic(&grid, &hand), 4);
    }

    #[test]
    fn test_combined_heuristic_goal_state_scores_hand_only() {
        let grid = Grid::new_empty(3);
        let hand = vec![line_piece()];
        assert_eq!(combined_heuristic(&grid, &hand), PIECE_OPTION_WEIGHT);
    }

    #[test]
    fn test_piece_removal_on_full_grid_is_zero() {
        let grid = grid_from_str_array(&["RR", "GG"]).unwrap();
        let hand = vec![square_piece(), line_piece()];
        assert_eq!(heuristic_piece_removal(&grid, &hand), 0);
    }

    #[test]
    fn test_piece_removal_counts_each_placeable_piece_once() {
        let grid = Grid::new_empty(4);
        let level = Level::standard(1).unwrap();
        assert_eq!(heuristic_piece_removal(&grid, level.pieces()), -4);
    }

    #[test]
    fn test_piece_removal_rotation_counts() {
        // horizontal 1x3 cannot fit, but its vertical rotation can
        let grid = grid_from_str_array(&[".RR", ".RR", ".RR"]).unwrap();
        assert_eq!(heuristic_piece_removal(&grid, &[line_piece()]), -1);
    }
}
