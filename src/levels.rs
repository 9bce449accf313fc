//! Level configurations: the piece set a board replenishes from.
//!
//! A `Level` is nothing more than a non-empty list of pieces. The three
//! standard levels are built in; anything else is caller-supplied
//! configuration.
use rand::Rng;

use crate::engine::{Color, Piece, Shape};

/// The replenishment piece set for one level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    pieces: Vec<Piece>,
}

impl Level {
    /// Creates a level from an explicit piece set.
    ///
    /// # Panics
    /// Panics if `pieces` is empty; a level with no pieces would make every
    /// replenishment a dead end.
    pub fn new(pieces: Vec<Piece>) -> Self {
        assert!(!pieces.is_empty(), "level must have at least one piece");
        Level { pieces }
    }

    /// Returns the built-in level `n` (1 through 3), or `None` for any
    /// other number.
    pub fn standard(n: u32) -> Option<Level> {
        let pieces = match n {
            1 => vec![
                Piece::new(shape(&["###"]), Color::Red),
                Piece::new(shape(&["#", "#", "#"]), Color::Green),
                Piece::new(shape(&["##", ".#"]), Color::Blue),
                Piece::new(shape(&["##", "##"]), Color::Yellow),
            ],
            2 => vec![
                Piece::new(shape(&["####"]), Color::Red),
                Piece::new(shape(&["#", "#", "#", "#"]), Color::Green),
                Piece::new(shape(&["##", ".#"]), Color::Blue),
                Piece::new(shape(&["##", "##"]), Color::Yellow),
            ],
            3 => vec![
                Piece::new(shape(&["###"]), Color::Red),
                Piece::new(shape(&["#", "#", "#", "#", "#"]), Color::Green),
                Piece::new(shape(&["###", "###"]), Color::Blue),
                Piece::new(shape(&["##.", ".##"]), Color::Purple),
            ],
            _ => return None,
        };
        Some(Level { pieces })
    }

    /// The level's full piece set, in configuration order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Picks one piece uniformly at random, for random board generation.
    pub fn random_piece(&self, rng: &mut impl Rng) -> Piece {
        self.pieces[rng.gen_range(0..self.pieces.len())].clone()
    }
}

// Shapes in this module come from trusted literals, so the panicking
// constructor is fine here.
fn shape(rows: &[&str]) -> Shape {
    Shape::new(
        rows.iter()
            .map(|row| row.chars().map(|ch| ch == '#').collect())
            .collect(),
    )
}
