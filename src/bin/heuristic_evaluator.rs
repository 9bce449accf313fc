use std::collections::HashMap;
use std::time::Duration;
use woodblock_solver::engine::State;
use woodblock_solver::heuristics::{
    combined_heuristic, heuristic_filled_cells, heuristic_piece_removal,
    heuristic_remaining_pieces,
};
use woodblock_solver::levels::Level;
use woodblock_solver::solver::{greedy, Heuristic, SearchLimits, MAX_DEPTH};
use woodblock_solver::utils::random_grid;

const NUM_RANDOM_BOARDS_FOR_EVALUATION: usize = 20;
const START_SEED: u64 = 0;
const GRID_SIZE: usize = 5;
const PREFILL_PLACEMENTS: usize = 3;
const PER_BOARD_TIMEOUT: Duration = Duration::from_secs(2);
const LEVEL_NUMBER: u32 = 1;

fn main() {
    let heuristics: Vec<(&str, Heuristic)> = vec![
        ("Filled", heuristic_filled_cells),
        ("Remaining", heuristic_remaining_pieces),
        ("Combined", combined_heuristic),
        ("PieceRemoval", heuristic_piece_removal),
    ];

    let level = match Level::standard(LEVEL_NUMBER) {
        Some(level) => level,
        None => unreachable!("built-in level number"),
    };

    let mut all_moves: HashMap<String, Vec<u32>> = HashMap::new();
    for (name, _) in &heuristics {
        all_moves.insert(name.to_string(), Vec::new());
    }

    println!(
        "Starting heuristic evaluation for {} boards ({}x{}, {} placements, {}s per run)...",
        NUM_RANDOM_BOARDS_FOR_EVALUATION,
        GRID_SIZE,
        GRID_SIZE,
        PREFILL_PLACEMENTS,
        PER_BOARD_TIMEOUT.as_secs()
    );

    let limits = SearchLimits {
        timeout: PER_BOARD_TIMEOUT,
        max_depth: MAX_DEPTH,
    };

    for board_idx in 0..NUM_RANDOM_BOARDS_FOR_EVALUATION {
        let current_seed = START_SEED + board_idx as u64;
        let initial_grid = random_grid(GRID_SIZE, &level, PREFILL_PLACEMENTS, current_seed);

        println!("\nEvaluating Board {} (Seed: {})", board_idx, current_seed);

        for (heuristic_name, heuristic_fn) in &heuristics {
            let initial = State::root(initial_grid.clone(), level.pieces().to_vec());
            match greedy(&initial, *heuristic_fn, &level, &limits) {
                Some(goal) => {
                    println!(
                        "  Heuristic: {:<12} solved in {} moves",
                        heuristic_name,
                        goal.moves()
                    );
                    all_moves
                        .get_mut(*heuristic_name)
                        .expect("registered above")
                        .push(goal.moves());
                }
                None => {
                    println!("  Heuristic: {:<12} no solution within limits", heuristic_name);
                }
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!(
        "Number of boards evaluated: {}",
        NUM_RANDOM_BOARDS_FOR_EVALUATION
    );

    let mut summary: Vec<(&str, usize, f64)> = Vec::new();
    for (heuristic_name, _) in &heuristics {
        let moves = &all_moves[*heuristic_name];
        if moves.is_empty() {
            println!("Heuristic {}: no boards solved.", heuristic_name);
            continue;
        }
        let total: u32 = moves.iter().sum();
        let avg = total as f64 / moves.len() as f64;
        summary.push((heuristic_name, moves.len(), avg));
    }

    // best solve rate first, then fewest average moves
    summary.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal))
    });

    println!("\n--- Results ---");
    for (heuristic_name, solved, avg_moves) in summary {
        println!(
            "Heuristic {:<12}: solved {}/{} boards, average {:.2} moves",
            heuristic_name, solved, NUM_RANDOM_BOARDS_FOR_EVALUATION, avg_moves
        );
    }
}
