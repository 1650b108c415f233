//! Runs one board through every selected heuristic and renders the report.
use crate::engine::Board;
use crate::heuristics::Heuristic;
use crate::solvability::is_solvable;
use crate::solver::{solve_astar, SearchOutcome, SearchStats, Solution};
use crate::utils::{parse_puzzle, InputError};
use log::{debug, info};
use std::fmt;
use std::io::{self, Write};

/// Line written after every heuristic's section of a solvable board's report.
pub const SEPARATOR: &str = "#######################################################";

/// The result of running one heuristic on a session's board.
#[derive(Clone, Debug)]
pub enum HeuristicReport {
    /// The board cannot reach the goal; no search was run.
    Unsolvable,
    Solved {
        heuristic: Heuristic,
        solution: Solution,
    },
    /// The search ran out of states without reaching the goal.
    Exhausted {
        heuristic: Heuristic,
        stats: SearchStats,
    },
}

impl fmt::Display for HeuristicReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeuristicReport::Unsolvable => writeln!(f, "Unsolvable puzzle"),
            HeuristicReport::Solved {
                heuristic,
                solution,
            } => {
                writeln!(f, "Solvable puzzle")?;
                writeln!(f, "{}", heuristic)?;
                writeln!(f, "Minimum number of moves: {}", solution.cost)?;
                writeln!(f, "Expanded nodes: {}", solution.stats.expanded)?;
                writeln!(f, "Explored nodes: {}", solution.stats.explored)?;
                for board in solution.path() {
                    writeln!(f, "{}", board)?;
                }
                writeln!(f, "{}", SEPARATOR)
            }
            HeuristicReport::Exhausted { heuristic, stats } => {
                writeln!(f, "Solvable puzzle")?;
                writeln!(f, "{}", heuristic)?;
                writeln!(f, "No solution found")?;
                writeln!(f, "Expanded nodes: {}", stats.expanded)?;
                writeln!(f, "Explored nodes: {}", stats.explored)?;
                writeln!(f, "{}", SEPARATOR)
            }
        }
    }
}

/// One puzzle board together with its goal and solvability verdict.
///
/// The goal and the verdict are computed once in `new` and shared, read-only, by every
/// heuristic run.
///
/// # Examples
/// ```
/// use npuzzle_solver::heuristics::Heuristic;
/// use npuzzle_solver::session::PuzzleSession;
///
/// let session = PuzzleSession::from_input("3\n1 2 3\n4 5 6\n7 0 8\n").unwrap();
/// assert!(session.is_solvable());
///
/// let mut out = Vec::new();
/// session.write_report(&mut out, &Heuristic::ALL).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert_eq!(text.matches("Minimum number of moves: 1").count(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct PuzzleSession {
    initial: Board,
    goal: Board,
    solvable: bool,
}

impl PuzzleSession {
    /// Creates a session for `initial`, building the goal of the same size and checking
    /// solvability.
    pub fn new(initial: Board) -> Self {
        let goal = Board::goal(initial.size());
        let solvable = is_solvable(&initial);
        info!(
            "{}x{} board is {}",
            initial.size(),
            initial.size(),
            if solvable { "solvable" } else { "unsolvable" }
        );
        PuzzleSession {
            initial,
            goal,
            solvable,
        }
    }

    /// Parses `input` (see `crate::utils::parse_puzzle`) and creates a session for it.
    pub fn from_input(input: &str) -> Result<Self, InputError> {
        parse_puzzle(input).map(PuzzleSession::new)
    }

    pub fn initial(&self) -> &Board {
        &self.initial
    }

    pub fn goal(&self) -> &Board {
        &self.goal
    }

    pub fn is_solvable(&self) -> bool {
        self.solvable
    }

    /// Runs a single heuristic. Unsolvable boards are reported without searching.
    pub fn run(&self, heuristic: Heuristic) -> HeuristicReport {
        if !self.solvable {
            return HeuristicReport::Unsolvable;
        }
        debug!("Running {}", heuristic);
        match solve_astar(&self.initial, &self.goal, heuristic) {
            SearchOutcome::Solved(solution) => HeuristicReport::Solved {
                heuristic,
                solution,
            },
            SearchOutcome::Exhausted(stats) => HeuristicReport::Exhausted { heuristic, stats },
        }
    }

    /// Runs each heuristic in `selection`, in the fixed session order and without
    /// repeats, writing each report to `out` as soon as it is ready.
    pub fn write_report<W: Write>(&self, out: &mut W, selection: &[Heuristic]) -> io::Result<()> {
        for heuristic in ordered_selection(selection) {
            write!(out, "{}", self.run(heuristic))?;
        }
        out.flush()
    }
}

/// Orders `selection` like `Heuristic::ALL` and drops duplicates.
pub fn ordered_selection(selection: &[Heuristic]) -> Vec<Heuristic> {
    Heuristic::ALL
        .into_iter()
        .filter(|h| selection.contains(h))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_for(input: &str) -> String {
        let session = PuzzleSession::from_input(input).unwrap();
        let mut out = Vec::new();
        session.write_report(&mut out, &Heuristic::ALL).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_unsolvable_report() {
        let text = report_for("3\n1 2 3\n4 0 5\n7 8 6\n");
        assert_eq!(text, "Unsolvable puzzle\n".repeat(4));
    }

    #[test]
    fn test_one_move_report() {
        let text = report_for("3\n1 2 3\n4 5 6\n7 0 8\n");
        let section = |name: &str| {
            format!(
                "Solvable puzzle\n{}\nMinimum number of moves: 1\nExpanded nodes: 1\nExplored nodes: 4\n\
                 1 2 3\n4 5 6\n7 0 8\n\n1 2 3\n4 5 6\n7 8 0\n\n{}\n",
                name, SEPARATOR
            )
        };
        let expected = [
            "Hamming Distance",
            "Manhattan Distance",
            "Linear Conflict",
            "Euclidean Distance",
        ]
        .iter()
        .map(|name| section(name))
        .collect::<String>();
        assert_eq!(text, expected);
    }

    #[test]
    fn test_solvability_shared_across_runs() {
        let session = PuzzleSession::new(Board::scrambled(3, 15, 9));
        assert!(session.is_solvable());
        let costs: Vec<u32> = [
            Heuristic::Hamming,
            Heuristic::Manhattan,
            Heuristic::LinearConflict,
        ]
        .into_iter()
        .map(|h| match session.run(h) {
            HeuristicReport::Solved { solution, .. } => solution.cost,
            other => panic!("unexpected report {:?}", other),
        })
        .collect();
        assert!(costs.windows(2).all(|w| w[0] == w[1]), "{:?}", costs);
    }

    #[test]
    fn test_exhausted_report_text() {
        let report = HeuristicReport::Exhausted {
            heuristic: Heuristic::Manhattan,
            stats: SearchStats {
                expanded: 12,
                explored: 12,
            },
        };
        assert_eq!(
            report.to_string(),
            format!(
                "Solvable puzzle\nManhattan Distance\nNo solution found\nExpanded nodes: 12\nExplored nodes: 12\n{}\n",
                SEPARATOR
            )
        );
    }

    #[test]
    fn test_ordered_selection() {
        assert_eq!(
            ordered_selection(&[
                Heuristic::Euclidean,
                Heuristic::Hamming,
                Heuristic::Euclidean
            ]),
            vec![Heuristic::Hamming, Heuristic::Euclidean]
        );
        assert!(ordered_selection(&[]).is_empty());
    }

    #[test]
    fn test_goal_built_for_board_size() {
        let session = PuzzleSession::from_input("2 1 2 0 3").unwrap();
        assert_eq!(session.goal(), &Board::goal(2));
        assert_eq!(session.initial().find_blank(), (1, 0));
        assert!(session.is_solvable());
    }

    #[test]
    fn test_bad_input_is_rejected() {
        assert!(matches!(
            PuzzleSession::from_input("3 1 2 3 4"),
            Err(InputError::WrongTileCount { .. })
        ));
    }
}
