use clap::Parser;
use env_logger::TimestampPrecision;
use log::{debug, warn, LevelFilter};
use npuzzle_solver::engine::Board;
use npuzzle_solver::heuristics::Heuristic;
use npuzzle_solver::solver::{solve_astar, SearchOutcome};
use std::collections::HashMap;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare the search heuristics on seeded random boards", long_about = None)]
struct Args {
    /// Side length of the boards
    #[clap(short, long, default_value_t = 3, value_parser = clap::value_parser!(u16).range(2..=5))]
    k: u16,

    /// Number of random boards to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: u64,

    /// Random slides applied to the goal to build each board
    #[clap(short, long, default_value_t = 40)]
    scramble: usize,

    /// Seed of the first board; board i uses seed + i
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Default)]
struct Totals {
    moves: u64,
    expanded: u64,
    explored: u64,
    solved: u64,
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let k = args.k as usize;
    let goal = Board::goal(k);
    let mut totals: HashMap<Heuristic, Totals> = HashMap::new();

    println!(
        "Starting heuristic evaluation for {} boards of size {}x{}...",
        args.boards, k, k
    );

    for board_idx in 0..args.boards {
        let current_seed = args.seed + board_idx;
        let initial_board = Board::scrambled(k, args.scramble, current_seed);

        println!("\nEvaluating Board {} (Seed: {})", board_idx, current_seed);
        debug!("Board {}:\n{}", board_idx, initial_board);

        for heuristic in Heuristic::ALL {
            let entry = totals.entry(heuristic).or_default();
            match solve_astar(&initial_board, &goal, heuristic) {
                SearchOutcome::Solved(solution) => {
                    println!(
                        "  Heuristic: {:<20} Moves: {:<4} Expanded: {:<8} Explored: {}",
                        heuristic.name(),
                        solution.cost,
                        solution.stats.expanded,
                        solution.stats.explored
                    );
                    entry.moves += solution.cost as u64;
                    entry.expanded += solution.stats.expanded;
                    entry.explored += solution.stats.explored;
                    entry.solved += 1;
                }
                SearchOutcome::Exhausted(stats) => {
                    warn!(
                        "{} exhausted board {} (Seed: {}) after {} expansions",
                        heuristic, board_idx, current_seed, stats.expanded
                    );
                }
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!("\n--- Averages ---");

    for heuristic in Heuristic::ALL {
        let Some(t) = totals.get(&heuristic).filter(|t| t.solved > 0) else {
            println!("Heuristic {}: No solutions recorded.", heuristic.name());
            continue;
        };
        let n = t.solved as f64;
        println!(
            "Heuristic {:<20}: Moves = {:.2}, Expanded = {:.1}, Explored = {:.1}{}",
            heuristic.name(),
            t.moves as f64 / n,
            t.expanded as f64 / n,
            t.explored as f64 / n,
            if heuristic.is_admissible() { "" } else { " (non-optimal)" }
        );
    }
}
