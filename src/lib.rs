//! # Wood Block Puzzle Solver Library
//!
//! This library models a block-placement puzzle played on an N×N grid:
//! polyomino pieces are placed onto empty cells, completed rows and columns
//! clear, and the goal is to empty the board entirely. On top of the game
//! mechanics it provides four search algorithms (BFS, DFS, greedy
//! best-first, A*) and a set of board-evaluation heuristics to guide them.
//!
//! It is used by three binaries:
//! - `human_player`: Interactive play via the command line, with a hint
//!   command backed by the greedy search.
//! - `ai_solver`: Takes a board (from a file or generated from a seed) and
//!   prints the sequence of placements that empties it.
//! - `heuristic_evaluator`: Compares the heuristics against each other over
//!   a batch of seeded random boards.
//!
//! ## Modules
//! - `engine`: Grid, shapes, pieces, placement and line-clearing mechanics,
//!   and the search-tree `State` with successor generation.
//! - `levels`: The replenishment piece sets, including the three built-in
//!   level configurations.
//! - `heuristics`: Board evaluation functions for the informed searches.
//! - `solver`: The four search algorithms, path reconstruction, and the
//!   single-move hint query.
//! - `utils`: Parsing grids and shapes from text, seeded random board
//!   generation, and action replay.

pub mod engine;
pub mod heuristics;
pub mod levels;
pub mod solver;
pub mod utils;
