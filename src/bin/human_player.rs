use std::io::{self, Write};
use std::rc::Rc;
use woodblock_solver::engine::{Grid, Piece, State};
use woodblock_solver::heuristics::heuristic_filled_cells;
use woodblock_solver::levels::Level;
use woodblock_solver::solver::{suggest_move, SearchLimits};
use woodblock_solver::utils::random_grid;

const GRID_SIZE: usize = 4;
const LEVEL_NUMBER: u32 = 1;
const BOARD_SEED: u64 = 514514;
const PREFILL_PLACEMENTS: usize = 2;

fn print_hand(hand: &[Piece]) {
    println!("Pieces in hand:");
    for (i, piece) in hand.iter().enumerate() {
        println!("  [{}] {}:", i, piece.color.to_char());
        for line in piece.shape.to_string().lines() {
            println!("      {}", line);
        }
    }
}

fn main() {
    let level = match Level::standard(LEVEL_NUMBER) {
        Some(level) => level,
        None => unreachable!("built-in level number"),
    };
    let mut grid: Grid = random_grid(GRID_SIZE, &level, PREFILL_PLACEMENTS, BOARD_SEED);
    let mut hand: Vec<Piece> = level.pieces().to_vec();
    let mut moves: u32 = 0;
    let mut lines_cleared: usize = 0;

    println!("Welcome to the wood block puzzle!");
    println!("Clear the whole board to win.");

    loop {
        println!("---------------------");
        println!("Moves: {}, Lines cleared: {}", moves, lines_cleared);
        println!("{}", grid);

        if grid.is_empty() {
            println!();
            println!("---------------------");
            println!("🎉 YOU WIN! 🎉");
            println!("Board cleared in {} moves ({} lines).", moves, lines_cleared);
            println!("---------------------");
            break;
        }

        if hand.is_empty() {
            hand = level.pieces().to_vec();
            println!("Hand replenished.");
        }

        if grid.no_valid_moves_left(&hand) {
            println!();
            println!("---------------------");
            println!("GAME OVER: no piece fits anywhere.");
            println!("Moves: {}, Lines cleared: {}", moves, lines_cleared);
            println!("---------------------");
            break;
        }

        print_hand(&hand);
        print!("Enter your move (piece rotation x y), 'h' for a hint, 'q' to quit: ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("Error reading input. Please try again.");
            continue;
        }

        let trimmed_input = input.trim();

        if trimmed_input == "q" {
            println!("Thanks for playing!");
            break;
        }

        if trimmed_input == "h" {
            let state: Rc<State> = State::root(grid.clone(), hand.clone());
            match suggest_move(&state, heuristic_filled_cells, &level, &SearchLimits::default())
            {
                Some(action) => {
                    println!(
                        "Hint: place the {} piece at ({}, {}) in this orientation:",
                        action.color.to_char(),
                        action.x,
                        action.y
                    );
                    for line in action.shape.to_string().lines() {
                        println!("  {}", line);
                    }
                }
                None => println!("No winning line found from here."),
            }
            continue;
        }

        let parts: Vec<&str> = trimmed_input.split_whitespace().collect();
        if parts.len() != 4 {
            println!("Invalid input format. Use 'piece rotation x y', 'h', or 'q'.");
            continue;
        }

        let parsed: Option<(usize, usize, usize, usize)> = match (
            parts[0].parse(),
            parts[1].parse(),
            parts[2].parse(),
            parts[3].parse(),
        ) {
            (Ok(p), Ok(rot), Ok(x), Ok(y)) => Some((p, rot, x, y)),
            _ => None,
        };
        let (piece_idx, rotation_idx, x, y) = match parsed {
            Some(values) => values,
            None => {
                println!("Invalid input: all four values must be numbers (e.g., '0 1 2 3').");
                continue;
            }
        };

        if piece_idx >= hand.len() {
            println!(
                "Invalid piece index: must be between 0 and {}.",
                hand.len() - 1
            );
            continue;
        }
        let rotations = hand[piece_idx].shape.rotations();
        if rotation_idx >= rotations.len() {
            println!(
                "Invalid rotation: this piece has {} orientation(s).",
                rotations.len()
            );
            continue;
        }
        let rotation = rotations[rotation_idx].clone();
        if !grid.can_place(&rotation, x, y) {
            println!("That piece does not fit at ({}, {}).", x, y);
            continue;
        }

        let color = hand[piece_idx].color;
        grid.place(&rotation, x, y, color);
        lines_cleared += grid.clear_completed_lines();
        hand.remove(piece_idx);
        moves += 1;
    }
}
