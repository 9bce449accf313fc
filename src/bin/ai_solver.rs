use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;
use std::process::exit;
use std::rc::Rc;
use std::time::Duration;
use woodblock_solver::engine::{Grid, State};
use woodblock_solver::heuristics::{
    combined_heuristic, heuristic_filled_cells, heuristic_piece_removal,
    heuristic_remaining_pieces,
};
use woodblock_solver::levels::Level;
use woodblock_solver::solver::{
    a_star, bfs, dfs, greedy, reconstruct_path, Heuristic, SearchLimits, DEFAULT_TIMEOUT,
    MAX_DEPTH,
};
use woodblock_solver::utils::{grid_from_str_array, random_grid, replay_actions};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Algorithm {
    Bfs,
    Dfs,
    Greedy,
    AStar,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HeuristicChoice {
    Filled,
    Remaining,
    Combined,
    PieceRemoval,
}

impl HeuristicChoice {
    fn function(self) -> Heuristic {
        match self {
            HeuristicChoice::Filled => heuristic_filled_cells,
            HeuristicChoice::Remaining => heuristic_remaining_pieces,
            HeuristicChoice::Combined => combined_heuristic,
            HeuristicChoice::PieceRemoval => heuristic_piece_removal,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Search algorithm to run
    #[clap(short, long, value_enum, default_value_t = Algorithm::AStar)]
    algorithm: Algorithm,

    /// Heuristic for the informed searches (greedy, a-star)
    #[clap(long, value_enum, default_value_t = HeuristicChoice::Combined)]
    heuristic: HeuristicChoice,

    /// Built-in level number (1-3) supplying the piece set
    #[clap(short, long, default_value_t = 1)]
    level: u32,

    /// Wall-clock search budget in seconds
    #[clap(short, long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    /// Depth cutoff (BFS only)
    #[clap(long, default_value_t = MAX_DEPTH)]
    max_depth: u32,

    /// Grid dimension for generated boards
    #[clap(short, long, default_value_t = 4)]
    grid_size: usize,

    /// Random piece placements when generating a board
    #[clap(short, long, default_value_t = 2)]
    prefill: usize,

    /// Seed for board generation
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Optional board file; overrides generation. One row per line, using
    /// the characters R G B Y P and '.'
    board_file: Option<PathBuf>,
}

fn read_board_file(path: &PathBuf) -> Result<Grid, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

    let lines: Vec<&str> = content
        .lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    grid_from_str_array(&lines).map_err(|e| format!("Invalid board format: {}", e))
}

fn main() {
    let args = Args::parse();

    let level = match Level::standard(args.level) {
        Some(level) => level,
        None => {
            eprintln!("Unknown level {}; choose 1, 2, or 3.", args.level);
            exit(1);
        }
    };

    let grid = match &args.board_file {
        Some(path) => match read_board_file(path) {
            Ok(grid) => {
                println!("Loaded board from {}\n", path.display());
                grid
            }
            Err(e) => {
                eprintln!("{}", e);
                exit(1);
            }
        },
        None => {
            println!(
                "Generated {}x{} board (seed {}, {} placements)\n",
                args.grid_size, args.grid_size, args.seed, args.prefill
            );
            random_grid(args.grid_size, &level, args.prefill, args.seed)
        }
    };

    println!("Initial board state:\n{}\n", grid);

    let limits = SearchLimits {
        timeout: Duration::from_secs(args.timeout),
        max_depth: args.max_depth,
    };
    let initial = State::root(grid.clone(), level.pieces().to_vec());
    let heuristic = args.heuristic.function();

    println!(
        "Searching with {:?} (timeout {}s)...\n",
        args.algorithm, args.timeout
    );

    let goal: Option<Rc<State>> = match args.algorithm {
        Algorithm::Bfs => bfs(&initial, &level, &limits),
        Algorithm::Dfs => dfs(&initial, &level, &limits),
        Algorithm::Greedy => greedy(&initial, heuristic, &level, &limits),
        Algorithm::AStar => a_star(&initial, heuristic, &level, &limits),
    };

    match goal {
        Some(goal) => {
            let path = reconstruct_path(&goal);
            println!("Solution found in {} moves:\n", path.len());
            for (i, action) in path.iter().enumerate() {
                println!(
                    "  Move {}: {:?} piece at ({}, {})",
                    i + 1,
                    action.color,
                    action.x,
                    action.y
                );
                for line in action.shape.to_string().lines() {
                    println!("    {}", line);
                }
            }
            match replay_actions(grid, &path) {
                Ok(final_grid) => println!("\nFinal board state:\n{}\n", final_grid),
                Err(e) => eprintln!("\nFailed to replay solution: {}", e),
            }
        }
        None => println!("No solution found within the limits.\n"),
    }
}
