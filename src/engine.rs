//! Core engine for the wood block puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Shape`: A rectangular boolean occupancy matrix with rotation generation.
//! - `Piece`: A shape paired with a color identity.
//! - `Grid`: The N×N board, with placement-validity testing, placement, and
//!   line-clear detection/execution.
//! - `State`: An immutable search-tree node combining a grid snapshot, the
//!   pieces still in hand, a move counter, and provenance (parent back-pointer
//!   plus the action that produced it).
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::levels::Level;

/// Identity of an occupied cell. Colors carry no game semantics beyond
/// tagging placements and distinguishing otherwise shape-identical pieces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
}

impl Color {
    /// Converts the color to its character representation.
    ///
    /// This is the same alphabet `utils::grid_from_str_array` parses.
    ///
    /// # Examples
    ///
    /// ```
    /// use woodblock_solver::engine::Color;
    /// assert_eq!(Color::Red.to_char(), 'R');
    /// assert_eq!(Color::Purple.to_char(), 'P');
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
            Color::Purple => 'P',
        }
    }

    /// Returns the ANSI background color code for terminal output.
    fn to_ansi_color_code(&self) -> &'static str {
        match self {
            Color::Red => "41",
            Color::Green => "42",
            Color::Yellow => "43",
            Color::Blue => "44",
            Color::Purple => "45",
        }
    }
}

/// A single board cell: empty, or occupied by a colored placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    fn to_ansi_color_code(&self) -> &'static str {
        match self {
            Cell::Empty => "40",
            Cell::Occupied(color) => color.to_ansi_color_code(),
        }
    }
}

/// A piece footprint in one orientation: a rectangular boolean matrix where
/// `true` marks a filled cell.
///
/// Shapes are immutable once constructed; rotation produces derived copies.
/// The matrix must be rectangular and contain at least one filled cell;
/// both are asserted at construction. Validation of externally-supplied
/// shape text belongs in `utils::shape_from_str_array`, which reports
/// errors as `Result` instead of panicking.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Shape {
    cells: Vec<Vec<bool>>,
}

impl Shape {
    /// Creates a shape from an occupancy matrix.
    ///
    /// # Panics
    /// Panics if the matrix is empty, non-rectangular, or has no filled cell.
    pub fn new(cells: Vec<Vec<bool>>) -> Self {
        assert!(
            !cells.is_empty() && !cells[0].is_empty(),
            "shape matrix must be non-empty"
        );
        let cols = cells[0].len();
        assert!(
            cells.iter().all(|row| row.len() == cols),
            "shape matrix must be rectangular"
        );
        assert!(
            cells.iter().flatten().any(|&filled| filled),
            "shape must have at least one filled cell"
        );
        Shape { cells }
    }

    /// Number of rows in this orientation.
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns in this orientation.
    pub fn cols(&self) -> usize {
        self.cells[0].len()
    }

    /// Whether the cell at (`r`, `c`) is filled.
    pub fn is_filled(&self, r: usize, c: usize) -> bool {
        self.cells[r][c]
    }

    /// Returns the shape rotated 90° clockwise.
    pub fn rotated(&self) -> Shape {
        let rows = self.rows();
        let cols = self.cols();
        let mut rotated = vec![vec![false; rows]; cols];
        for (r, row) in rotated.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = self.cells[rows - 1 - c][r];
            }
        }
        Shape { cells: rotated }
    }

    /// Returns the distinct cardinal orientations of this shape, starting
    /// with the identity and proceeding clockwise (0°, 90°, 180°, 270°),
    /// filtered for structural uniqueness in that order.
    ///
    /// Symmetric shapes contribute fewer than 4 orientations (a square only
    /// 1, a line 2), which shrinks the successor fan-out accordingly.
    pub fn rotations(&self) -> Vec<Shape> {
        let mut rotations: Vec<Shape> = vec![self.clone()];
        let mut current = self.clone();
        for _ in 0..3 {
            current = current.rotated();
            if !rotations.contains(&current) {
                rotations.push(current.clone());
            }
        }
        rotations
    }
}

impl fmt::Display for Shape {
    /// Renders the shape as rows of `#` (filled) and `.` (empty).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            for &filled in row {
                f.write_str(if filled { "#" } else { "." })?;
            }
            if r < self.rows() - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// A placeable unit: a shape together with a color identity.
///
/// Two pieces are equal iff their shapes are structurally identical and
/// their colors match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece {
    pub shape: Shape,
    pub color: Color,
}

impl Piece {
    pub fn new(shape: Shape, color: Color) -> Self {
        Piece { shape, color }
    }
}

/// Record of one placement: the shape as placed (after rotation), its color,
/// and the board coordinates of its top-left corner (`x` = column, `y` = row).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    pub shape: Shape,
    pub color: Color,
    pub x: usize,
    pub y: usize,
}

/// The N×N playing surface.
///
/// The size is fixed at construction and never changes. All placement and
/// line-clearing mechanics live here so they are usable standalone; the
/// interactive play path applies them directly, without a search.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an empty `size`×`size` grid.
    pub fn new_empty(size: usize) -> Self {
        Grid {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// The grid dimension N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` are outside `[0, size)`.
    pub fn get_cell(&self, r: usize, c: usize) -> Cell {
        assert!(r < self.size && c < self.size, "cell index out of bounds");
        self.cells[r * self.size + c]
    }

    /// Sets the cell at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` are outside `[0, size)`.
    pub fn set_cell(&mut self, r: usize, c: usize, cell: Cell) {
        assert!(r < self.size && c < self.size, "cell index out of bounds");
        self.cells[r * self.size + c] = cell;
    }

    /// Tests whether `shape` fits with its top-left corner at (`x`, `y`):
    /// every filled shape cell must land inside the grid on a currently
    /// empty cell. Pure, no side effects.
    pub fn can_place(&self, shape: &Shape, x: usize, y: usize) -> bool {
        for r in 0..shape.rows() {
            for c in 0..shape.cols() {
                if !shape.is_filled(r, c) {
                    continue;
                }
                let (tx, ty) = (x + c, y + r);
                if tx >= self.size || ty >= self.size || !self.get_cell(ty, tx).is_empty() {
                    return false;
                }
            }
        }
        true
    }

    /// Writes `shape` onto the grid at (`x`, `y`) with the given color.
    ///
    /// # Panics
    /// Panics if any target cell is out of bounds or already occupied.
    /// Callers must gate every placement behind [`Grid::can_place`];
    /// violating that contract is a programming error and fails fast.
    pub fn place(&mut self, shape: &Shape, x: usize, y: usize, color: Color) {
        for r in 0..shape.rows() {
            for c in 0..shape.cols() {
                if !shape.is_filled(r, c) {
                    continue;
                }
                let (tx, ty) = (x + c, y + r);
                assert!(
                    self.get_cell(ty, tx).is_empty(),
                    "placement onto occupied cell ({}, {}); can_place was not honored",
                    tx,
                    ty
                );
                self.set_cell(ty, tx, Cell::Occupied(color));
            }
        }
    }

    /// Clears every completed row and column and returns how many lines
    /// cleared in total.
    ///
    /// A line is completed iff all of its N cells are occupied. Completed
    /// rows and columns are identified on the grid state *before* any
    /// clearing, then all are emptied together. A cell at the intersection
    /// of a completed row and a completed column is cleared once, but the
    /// count still includes one line per axis.
    pub fn clear_completed_lines(&mut self) -> usize {
        let full_rows: Vec<usize> = (0..self.size)
            .filter(|&r| (0..self.size).all(|c| !self.get_cell(r, c).is_empty()))
            .collect();
        let full_cols: Vec<usize> = (0..self.size)
            .filter(|&c| (0..self.size).all(|r| !self.get_cell(r, c).is_empty()))
            .collect();

        for &r in &full_rows {
            for c in 0..self.size {
                self.set_cell(r, c, Cell::Empty);
            }
        }
        for &c in &full_cols {
            for r in 0..self.size {
                self.set_cell(r, c, Cell::Empty);
            }
        }

        full_rows.len() + full_cols.len()
    }

    /// Counts rows and columns that are currently fully occupied, without
    /// mutating the grid.
    pub fn clearable_lines(&self) -> usize {
        let rows = (0..self.size)
            .filter(|&r| (0..self.size).all(|c| !self.get_cell(r, c).is_empty()))
            .count();
        let cols = (0..self.size)
            .filter(|&c| (0..self.size).all(|r| !self.get_cell(r, c).is_empty()))
            .count();
        rows + cols
    }

    /// Number of occupied cells.
    pub fn filled_cells(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// True iff every cell is empty.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    /// True iff no piece in `pieces` has any rotation with any valid
    /// placement on this grid. Short-circuits on the first placeable
    /// (rotation, position) found. Detects game over without running a
    /// full search.
    pub fn no_valid_moves_left(&self, pieces: &[Piece]) -> bool {
        for piece in pieces {
            for rotation in piece.shape.rotations() {
                for x in 0..self.size {
                    for y in 0..self.size {
                        if self.can_place(&rotation, x, y) {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }
}

impl fmt::Display for Grid {
    /// Formats the grid with row/column numbers and ANSI background colors
    /// for terminal output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for c in 0..self.size {
            write!(f, "{:<2}", c)?;
        }
        writeln!(f)?;
        for r in 0..self.size {
            write!(f, "{:<2}", r)?;
            for c in 0..self.size {
                write!(
                    f,
                    "\x1b[1;{};m  \x1b[m",
                    self.get_cell(r, c).to_ansi_color_code()
                )?;
            }
            if r < self.size - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Default tolerance carried by root states. The core goal test never reads
/// it; see [`State::tolerance`].
pub const DEFAULT_TOLERANCE: u32 = 2;

/// A complete snapshot of grid + remaining pieces + move count + provenance,
/// used as a search-tree node.
///
/// States are immutable after construction; every transition produces a new
/// state over freshly cloned grid and piece storage, so no two states alias
/// mutable data. Parents are shared via `Rc` because multiple successors
/// reference the same ancestor.
///
/// Equality and hashing cover the grid and the piece *multiset* only (pieces
/// are canonicalized by sorting before comparison, so supply order is
/// irrelevant). `moves`, `parent`, `action`, and `tolerance` are provenance
/// metadata, excluded on purpose: the visited set of every search algorithm
/// relies on this to recognize the same board+hand reached via a different
/// move order.
#[derive(Clone, Debug)]
pub struct State {
    grid: Grid,
    pieces: Vec<Piece>,
    moves: u32,
    parent: Option<Rc<State>>,
    action: Option<Action>,
    tolerance: u32,
}

impl State {
    /// Builds a root state (moves = 0, no parent, no action) with the
    /// default tolerance.
    pub fn root(grid: Grid, pieces: Vec<Piece>) -> Rc<State> {
        State::root_with_tolerance(grid, pieces, DEFAULT_TOLERANCE)
    }

    /// Builds a root state carrying an explicit tolerance.
    pub fn root_with_tolerance(grid: Grid, pieces: Vec<Piece>, tolerance: u32) -> Rc<State> {
        Rc::new(State {
            grid,
            pieces,
            moves: 0,
            parent: None,
            action: None,
            tolerance,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// The grid dimension N of this state's board.
    pub fn grid_size(&self) -> usize {
        self.grid.size()
    }

    /// Placements taken to reach this state from the root.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn parent(&self) -> Option<&Rc<State>> {
        self.parent.as_ref()
    }

    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    /// Pass-through attribute for relaxed goal checking by external callers
    /// (allowed remaining occupied cells). The core goal test is strict and
    /// ignores it.
    pub fn tolerance(&self) -> u32 {
        self.tolerance
    }

    /// True iff the grid is entirely empty.
    pub fn is_goal(&self) -> bool {
        self.grid.is_empty()
    }

    /// Generates every state reachable by one valid placement.
    ///
    /// For each held piece (tracked by index, so duplicate-valued pieces are
    /// consumed independently), each distinct rotation, and each position:
    /// clone the grid, place, clear completed lines, remove that one piece
    /// instance, and replenish the hand with the level's full piece set if
    /// it emptied. Pieces come back only once all are used up, not
    /// one-for-one per placement.
    ///
    /// Returns the full fan-out with no pruning or deduplication; visited-set
    /// filtering is the search algorithm's job. This is the dominant cost of
    /// a search: up to pieces × rotations × N² successors per node, each
    /// paying an O(N²) grid clone. Grid size and piece-set size directly
    /// control the branching factor.
    pub fn successors(self: &Rc<Self>, level: &Level) -> Vec<Rc<State>> {
        let mut successors = Vec::new();

        for (i, piece) in self.pieces.iter().enumerate() {
            for rotation in piece.shape.rotations() {
                for x in 0..self.grid.size() {
                    for y in 0..self.grid.size() {
                        if !self.grid.can_place(&rotation, x, y) {
                            continue;
                        }

                        let mut new_grid = self.grid.clone();
                        new_grid.place(&rotation, x, y, piece.color);
                        new_grid.clear_completed_lines();

                        let mut new_pieces = self.pieces.clone();
                        new_pieces.remove(i);
                        if new_pieces.is_empty() {
                            new_pieces = level.pieces().to_vec();
                        }

                        successors.push(Rc::new(State {
                            grid: new_grid,
                            pieces: new_pieces,
                            moves: self.moves + 1,
                            parent: Some(Rc::clone(self)),
                            action: Some(Action {
                                shape: rotation.clone(),
                                color: piece.color,
                                x,
                                y,
                            }),
                            tolerance: self.tolerance,
                        }));
                    }
                }
            }
        }

        successors
    }

    fn canonical_pieces(&self) -> Vec<&Piece> {
        let mut sorted: Vec<&Piece> = self.pieces.iter().collect();
        sorted.sort();
        sorted
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid && self.canonical_pieces() == other.canonical_pieces()
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        self.grid.hash(hasher);
        self.canonical_pieces().hash(hasher);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::Level;
    use crate::utils::{grid_from_str_array, shape_from_str_array};
    use std::collections::hash_map::DefaultHasher;

    fn corner_tromino() -> Shape {
        shape_from_str_array(&["##", ".#"]).unwrap()
    }

    fn square() -> Shape {
        shape_from_str_array(&["##", "##"]).unwrap()
    }

    fn horizontal_line() -> Shape {
        shape_from_str_array(&["###"]).unwrap()
    }

    fn state_hash(state: &State) -> u64 {
        let mut hasher = DefaultHasher::new();
        state.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_rotation_closure() {
        let shape = corner_tromino();
        let back = shape.rotated().rotated().rotated().rotated();
        assert_eq!(shape, back, "four clockwise rotations must be identity");
    }

    #[test]
    fn test_rotated_clockwise() {
        // ##      .#
        // .#  ->  ##
        let rotated = corner_tromino().rotated();
        assert_eq!(rotated, shape_from_str_array(&[".#", "##"]).unwrap());
    }

    #[test]
    fn test_rotations_deduplicate_symmetric_shapes() {
        assert_eq!(square().rotations().len(), 1);
        assert_eq!(horizontal_line().rotations().len(), 2);
        assert_eq!(corner_tromino().rotations().len(), 4);
        let z = shape_from_str_array(&["##.", ".##"]).unwrap();
        assert_eq!(z.rotations().len(), 2);
    }

    #[test]
    fn test_rotations_start_with_identity() {
        let shape = horizontal_line();
        let rotations = shape.rotations();
        assert_eq!(rotations[0], shape);
        assert_eq!(rotations[1], shape_from_str_array(&["#", "#", "#"]).unwrap());
    }

    #[test]
    #[should_panic(expected = "rectangular")]
    fn test_shape_rejects_ragged_matrix() {
        Shape::new(vec![vec![true, true], vec![true]]);
    }

    #[test]
    #[should_panic(expected = "at least one filled cell")]
    fn test_shape_rejects_all_empty_matrix() {
        Shape::new(vec![vec![false, false]]);
    }

    #[test]
    fn test_can_place_respects_bounds_and_occupancy() {
        let grid = grid_from_str_array(&["R..", "...", "..."]).unwrap();
        let line = horizontal_line();
        assert!(grid.can_place(&line, 0, 1));
        // overlaps the occupied cell at row 0, col 0
        assert!(!grid.can_place(&line, 0, 0));
        // sticks out past the right edge
        assert!(!grid.can_place(&line, 1, 1));
        // sticks out past the bottom edge
        let vertical = line.rotated();
        assert!(!grid.can_place(&vertical, 0, 1));
    }

    #[test]
    fn test_place_invalidates_same_position() {
        let mut grid = Grid::new_empty(4);
        let shape = square();
        assert!(grid.can_place(&shape, 1, 1));
        grid.place(&shape, 1, 1, Color::Yellow);
        assert!(!grid.can_place(&shape, 1, 1));
        assert_eq!(grid.get_cell(1, 1), Cell::Occupied(Color::Yellow));
        assert_eq!(grid.get_cell(2, 2), Cell::Occupied(Color::Yellow));
        assert_eq!(grid.filled_cells(), 4);
    }

    #[test]
    #[should_panic(expected = "can_place was not honored")]
    fn test_place_onto_occupied_cell_panics() {
        let mut grid = Grid::new_empty(3);
        grid.place(&square(), 0, 0, Color::Blue);
        grid.place(&square(), 1, 1, Color::Red);
    }

    #[test]
    fn test_clear_single_completed_row() {
        let mut grid = grid_from_str_array(&["RRR", "G..", "..."]).unwrap();
        let cleared = grid.clear_completed_lines();
        assert_eq!(cleared, 1);
        for c in 0..3 {
            assert_eq!(grid.get_cell(0, c), Cell::Empty);
        }
        // untouched cell stays put
        assert_eq!(grid.get_cell(1, 0), Cell::Occupied(Color::Green));
        assert_eq!(grid.filled_cells(), 1);
    }

    #[test]
    fn test_clear_counts_row_and_column_once_per_axis() {
        // row 1 and column 1 are both complete; the shared cell (1, 1) is
        // cleared once but each axis contributes one line to the count.
        let mut grid = grid_from_str_array(&[".R.", "RRR", ".R."]).unwrap();
        let cleared = grid.clear_completed_lines();
        assert_eq!(cleared, 2);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_clear_nothing_when_no_line_complete() {
        let mut grid = grid_from_str_array(&["RR.", "...", "..."]).unwrap();
        let before = grid.clone();
        assert_eq!(grid.clear_completed_lines(), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_clearable_lines_does_not_mutate() {
        let grid = grid_from_str_array(&["RRR", "G..", "..."]).unwrap();
        assert_eq!(grid.clearable_lines(), 1);
        assert_eq!(grid.filled_cells(), 4);
    }

    #[test]
    fn test_no_valid_moves_left_on_full_grid() {
        let grid = grid_from_str_array(&["RR", "GG"]).unwrap();
        let pieces = vec![Piece::new(horizontal_line(), Color::Red)];
        assert!(grid.no_valid_moves_left(&pieces));
    }

    #[test]
    fn test_no_valid_moves_left_finds_a_placement() {
        let grid = Grid::new_empty(3);
        let pieces = vec![Piece::new(square(), Color::Yellow)];
        assert!(!grid.no_valid_moves_left(&pieces));
    }

    #[test]
    fn test_no_valid_moves_left_rotation_rescues_piece() {
        // the 1x3 line only fits vertically, in the free left column
        let grid = grid_from_str_array(&[".RR", ".RR", ".RR"]).unwrap();
        let pieces = vec![Piece::new(horizontal_line(), Color::Red)];
        assert!(!grid.no_valid_moves_left(&pieces));
    }

    #[test]
    fn test_goal_is_empty_grid() {
        let empty = State::root(Grid::new_empty(3), vec![]);
        assert!(empty.is_goal());
        let occupied = State::root(grid_from_str_array(&["R..", "...", "..."]).unwrap(), vec![]);
        assert!(!occupied.is_goal());
    }

    #[test]
    fn test_state_equality_ignores_piece_order() {
        let grid = grid_from_str_array(&["R..", "...", "..."]).unwrap();
        let a = Piece::new(horizontal_line(), Color::Red);
        let b = Piece::new(square(), Color::Yellow);
        let first = State::root(grid.clone(), vec![a.clone(), b.clone()]);
        let second = State::root(grid, vec![b, a]);
        assert_eq!(*first, *second);
        assert_eq!(state_hash(&first), state_hash(&second));
    }

    #[test]
    fn test_state_equality_excludes_provenance() {
        // placing the square into the empty 2x2 grid completes both rows and
        // both columns, so the board returns to empty and the hand
        // replenishes: structurally the same state as a fresh root, despite
        // different moves/parent/action.
        let level = Level::new(vec![Piece::new(square(), Color::Yellow)]);
        let grid = Grid::new_empty(2);
        let root = State::root(grid.clone(), level.pieces().to_vec());
        let successors = root.successors(&level);
        assert_eq!(successors.len(), 1);
        let child = &successors[0];
        assert_eq!(child.moves(), 1);
        assert!(child.parent().is_some());
        assert_eq!(**child, *root);
        assert_eq!(state_hash(child), state_hash(&root));
    }

    #[test]
    fn test_successor_count_bound_and_exact_fanout() {
        // one square on an empty 3x3 grid: 1 rotation, 2x2 positions
        let level = Level::new(vec![Piece::new(square(), Color::Yellow)]);
        let root = State::root(Grid::new_empty(3), level.pieces().to_vec());
        let successors = root.successors(&level);
        assert_eq!(successors.len(), 4);

        // general bound: pieces x rotations x N^2
        let level2 = Level::standard(1).unwrap();
        let root2 = State::root(Grid::new_empty(4), level2.pieces().to_vec());
        let successors2 = root2.successors(&level2);
        let bound: usize = level2
            .pieces()
            .iter()
            .map(|p| p.shape.rotations().len() * 4 * 4)
            .sum();
        assert!(successors2.len() <= bound);
        assert!(successors2
            .iter()
            .all(|s| s.moves() == 1 && s.action().is_some()));
    }

    #[test]
    fn test_duplicate_pieces_consumed_by_index() {
        let piece = Piece::new(square(), Color::Yellow);
        let level = Level::new(vec![piece.clone()]);
        let root = State::root(Grid::new_empty(4), vec![piece.clone(), piece.clone()]);
        let successors = root.successors(&level);
        assert!(!successors.is_empty());
        // exactly one of the two equal pieces is removed per successor
        assert!(successors.iter().all(|s| s.pieces() == [piece.clone()]));
    }

    #[test]
    fn test_replenishment_on_exhausted_hand() {
        let level = Level::standard(1).unwrap();
        let root = State::root(
            Grid::new_empty(4),
            vec![Piece::new(square(), Color::Yellow)],
        );
        let successors = root.successors(&level);
        assert!(!successors.is_empty());
        for successor in &successors {
            assert_eq!(successor.pieces(), level.pieces());
        }
    }

    #[test]
    fn test_empty_hand_yields_no_successors() {
        let level = Level::standard(1).unwrap();
        let root = State::root(grid_from_str_array(&["R..", "...", "..."]).unwrap(), vec![]);
        assert!(root.successors(&level).is_empty());
    }

    #[test]
    fn test_successor_clears_completed_line() {
        // row 0 of the 4x4 grid lacks only its last cell; the line dropped
        // vertically into the rightmost column completes and clears it,
        // leaving the line's two lower cells behind.
        let level = Level::new(vec![Piece::new(horizontal_line(), Color::Red)]);
        let grid = grid_from_str_array(&["RRR.", "....", "....", "...."]).unwrap();
        let root = State::root(grid, level.pieces().to_vec());
        let cleared: Vec<_> = root
            .successors(&level)
            .into_iter()
            .filter(|s| {
                s.action().map_or(false, |a| {
                    (a.x, a.y) == (3, 0) && a.shape.rows() == 3 && a.shape.cols() == 1
                })
            })
            .collect();
        assert_eq!(cleared.len(), 1);
        let state = &cleared[0];
        assert_eq!(state.grid().filled_cells(), 2);
        assert_eq!(state.grid().get_cell(1, 3), Cell::Occupied(Color::Red));
        assert_eq!(state.grid().get_cell(2, 3), Cell::Occupied(Color::Red));
    }

    #[test]
    fn test_tolerance_is_carried_through_successors() {
        let level = Level::new(vec![Piece::new(square(), Color::Yellow)]);
        let root = State::root_with_tolerance(Grid::new_empty(3), level.pieces().to_vec(), 5);
        assert_eq!(root.tolerance(), 5);
        for successor in root.successors(&level) {
            assert_eq!(successor.tolerance(), 5);
        }
    }
}
