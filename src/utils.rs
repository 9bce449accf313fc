//! Utility functions: text parsing of grids and shapes, seeded random board
//! generation, and action replay.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::engine::{Action, Cell, Color, Grid, Shape};
use crate::levels::Level;

/// Parses an array of string slices into a `Grid`.
///
/// The grid dimension is the number of rows provided. Each string is one
/// row, starting from row 0. If a row string is shorter than the dimension,
/// the rest of that row is filled with `Cell::Empty`.
///
/// Valid characters are `R`, `G`, `B`, `Y`, `P` for occupied cells and `.`
/// for empty. Any other character, or a row longer than the dimension, is
/// an error.
///
/// # Examples
/// ```
/// use woodblock_solver::utils::grid_from_str_array;
/// use woodblock_solver::engine::{Cell, Color};
///
/// let grid = grid_from_str_array(&["RG.", "B", "..."]).unwrap();
/// assert_eq!(grid.size(), 3);
/// assert_eq!(grid.get_cell(0, 0), Cell::Occupied(Color::Red));
/// assert_eq!(grid.get_cell(1, 1), Cell::Empty); // short row padded
///
/// assert!(grid_from_str_array(&["RX.", "...", "..."]).is_err());
/// ```
pub fn grid_from_str_array(s: &[&str]) -> Result<Grid, String> {
    let size = s.len();
    if size == 0 {
        return Err("grid must have at least one row".to_string());
    }

    let mut grid = Grid::new_empty(size);
    for (r, row_str) in s.iter().enumerate() {
        if row_str.chars().count() > size {
            return Err(format!(
                "Row {} has too many characters. Expected at most {}, found {}",
                r,
                size,
                row_str.chars().count()
            ));
        }
        for (c, ch) in row_str.chars().enumerate() {
            let cell = match ch {
                'R' => Cell::Occupied(Color::Red),
                'G' => Cell::Occupied(Color::Green),
                'B' => Cell::Occupied(Color::Blue),
                'Y' => Cell::Occupied(Color::Yellow),
                'P' => Cell::Occupied(Color::Purple),
                '.' => Cell::Empty,
                _ => {
                    return Err(format!(
                        "Invalid character '{}' at row {}, col {}",
                        ch, r, c
                    ))
                }
            };
            grid.set_cell(r, c, cell);
        }
    }
    Ok(grid)
}

/// Parses an array of string slices into a `Shape`.
///
/// `#` marks a filled cell, `.` an empty one. All rows must be the same
/// length and at least one cell must be filled; violations are reported as
/// errors rather than panics, so this is the entry point for
/// externally-supplied shape data.
pub fn shape_from_str_array(s: &[&str]) -> Result<Shape, String> {
    if s.is_empty() || s[0].is_empty() {
        return Err("shape must have at least one row and column".to_string());
    }
    let cols = s[0].chars().count();
    let mut cells = Vec::with_capacity(s.len());
    for (r, row_str) in s.iter().enumerate() {
        if row_str.chars().count() != cols {
            return Err(format!(
                "Row {} has {} characters, expected {}",
                r,
                row_str.chars().count(),
                cols
            ));
        }
        let mut row = Vec::with_capacity(cols);
        for (c, ch) in row_str.chars().enumerate() {
            match ch {
                '#' => row.push(true),
                '.' => row.push(false),
                _ => {
                    return Err(format!(
                        "Invalid character '{}' at row {}, col {}",
                        ch, r, c
                    ))
                }
            }
        }
        cells.push(row);
    }
    if !cells.iter().flatten().any(|&filled| filled) {
        return Err("shape must have at least one filled cell".to_string());
    }
    Ok(Shape::new(cells))
}

/// Generates a `size`×`size` grid by making `placements` random piece
/// placements from `level`, deterministically from `seed`.
///
/// Each placement draws a random piece, picks a random rotation, and drops
/// it at a random valid position; a placement with no valid position is
/// skipped, so the result can hold fewer pieces than requested. Completed
/// lines are *not* cleared, so the board keeps everything that was placed.
pub fn random_grid(size: usize, level: &Level, placements: usize, seed: u64) -> Grid {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut grid = Grid::new_empty(size);

    for _ in 0..placements {
        let piece = level.random_piece(&mut rng);
        let rotations = piece.shape.rotations();
        let rotation = &rotations[rng.gen_range(0..rotations.len())];

        let mut spots = Vec::new();
        for x in 0..size {
            for y in 0..size {
                if grid.can_place(rotation, x, y) {
                    spots.push((x, y));
                }
            }
        }
        if spots.is_empty() {
            continue;
        }
        let (x, y) = spots[rng.gen_range(0..spots.len())];
        grid.place(rotation, x, y, piece.color);
    }

    grid
}

/// Re-applies a sequence of actions to `grid`, clearing completed lines
/// after each placement, and returns the resulting grid. Errors if any
/// action is not a valid placement on the grid it meets.
pub fn replay_actions(mut grid: Grid, actions: &[Action]) -> Result<Grid, String> {
    for (i, action) in actions.iter().enumerate() {
        if !grid.can_place(&action.shape, action.x, action.y) {
            return Err(format!(
                "Action {} is not a valid placement at ({}, {})",
                i, action.x, action.y
            ));
        }
        grid.place(&action.shape, action.x, action.y, action.color);
        grid.clear_completed_lines();
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_parse_round_trip() {
        let grid = grid_from_str_array(&["RG.", ".B.", "..Y"]).unwrap();
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.get_cell(0, 0), Cell::Occupied(Color::Red));
        assert_eq!(grid.get_cell(0, 1), Cell::Occupied(Color::Green));
        assert_eq!(grid.get_cell(1, 1), Cell::Occupied(Color::Blue));
        assert_eq!(grid.get_cell(2, 2), Cell::Occupied(Color::Yellow));
        assert_eq!(grid.filled_cells(), 4);
    }

    #[test]
    fn test_grid_parse_pads_short_rows() {
        let grid = grid_from_str_array(&["R", "..", ""]).unwrap();
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.get_cell(0, 0), Cell::Occupied(Color::Red));
        assert_eq!(grid.get_cell(0, 2), Cell::Empty);
        assert_eq!(grid.get_cell(2, 0), Cell::Empty);
    }

    #[test]
    fn test_grid_parse_rejects_bad_input() {
        assert!(grid_from_str_array(&[]).is_err());
        assert!(grid_from_str_array(&["RX", ".."]).is_err());
        assert!(grid_from_str_array(&["RRRR", "...", "..."]).is_err());
    }

    #[test]
    fn test_grid_parse_accepts_full_width_row() {
        // a row of exactly the grid dimension is valid, not an overflow
        let grid = grid_from_str_array(&["RRR", "..", ".."]).unwrap();
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.filled_cells(), 3);
    }

    #[test]
    fn test_shape_parse() {
        let shape = shape_from_str_array(&["##.", ".##"]).unwrap();
        assert_eq!(shape.rows(), 2);
        assert_eq!(shape.cols(), 3);
        assert!(shape.is_filled(0, 0));
        assert!(!shape.is_filled(0, 2));
        assert!(shape.is_filled(1, 2));
    }

    #[test]
    fn test_shape_parse_rejects_bad_input() {
        assert!(shape_from_str_array(&[]).is_err());
        assert!(shape_from_str_array(&["##", "#"]).is_err());
        assert!(shape_from_str_array(&["..", ".."]).is_err());
        assert!(shape_from_str_array(&["#x"]).is_err());
    }

    #[test]
    fn test_random_grid_is_deterministic_per_seed() {
        let level = Level::standard(1).unwrap();
        let a = random_grid(5, &level, 3, 7);
        let b = random_grid(5, &level, 3, 7);
        assert_eq!(a, b);
        assert!(a.filled_cells() > 0);
    }

    #[test]
    fn test_random_grid_differs_across_seeds() {
        let level = Level::standard(1).unwrap();
        let a = random_grid(5, &level, 3, 0);
        let b = random_grid(5, &level, 3, 1);
        // not guaranteed in general, but stable for these fixed seeds
        assert_ne!(a, b);
    }

    #[test]
    fn test_replay_rejects_invalid_action() {
        let grid = grid_from_str_array(&["RR", ".."]).unwrap();
        let shape = shape_from_str_array(&["##"]).unwrap();
        let actions = vec![Action {
            shape,
            color: Color::Green,
            x: 0,
            y: 0,
        }];
        assert!(replay_actions(grid, &actions).is_err());
    }

    #[test]
    fn test_replay_clears_lines() {
        let grid = grid_from_str_array(&["R.", ".."]).unwrap();
        let shape = shape_from_str_array(&["#", "#"]).unwrap();
        let actions = vec![Action {
            shape,
            color: Color::Green,
            x: 1,
            y: 0,
        }];
        let result = replay_actions(grid, &actions).unwrap();
        // the vertical domino completes row 0 and column 1 at once
        assert!(result.is_empty());
    }
}
