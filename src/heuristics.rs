use crate::engine::{Board, Tile, BLANK};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A cost estimator for the search, chosen from a fixed set.
///
/// Each variant maps to a pure function `&Board -> u32` through `Heuristic::estimator`.
/// `Hamming`, `Manhattan` and `LinearConflict` never overestimate the remaining number
/// of slides. `Euclidean` is the fast mode and carries no optimality promise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Heuristic {
    Hamming,
    Manhattan,
    LinearConflict,
    Euclidean,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown heuristic '{0}', expected one of: hamming, manhattan, linear-conflict, euclidean")]
pub struct UnknownHeuristic(pub String);

type EstimatorFn = fn(&Board) -> u32;

impl Heuristic {
    /// All heuristics in the order a session runs them.
    pub const ALL: [Heuristic; 4] = [
        Heuristic::Hamming,
        Heuristic::Manhattan,
        Heuristic::LinearConflict,
        Heuristic::Euclidean,
    ];

    /// Returns the estimator function backing this heuristic.
    pub fn estimator(self) -> EstimatorFn {
        match self {
            Heuristic::Hamming => hamming_distance,
            Heuristic::Manhattan => manhattan_distance,
            Heuristic::LinearConflict => linear_conflict,
            Heuristic::Euclidean => euclidean_distance,
        }
    }

    /// Estimates the remaining number of slides from `board` to the goal.
    pub fn estimate(self, board: &Board) -> u32 {
        (self.estimator())(board)
    }

    /// Whether the estimate never exceeds the true remaining cost.
    pub fn is_admissible(self) -> bool {
        !matches!(self, Heuristic::Euclidean)
    }

    /// Human-readable name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Hamming => "Hamming Distance",
            Heuristic::Manhattan => "Manhattan Distance",
            Heuristic::LinearConflict => "Linear Conflict",
            Heuristic::Euclidean => "Euclidean Distance",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Heuristic {
    type Err = UnknownHeuristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hamming" => Ok(Heuristic::Hamming),
            "manhattan" => Ok(Heuristic::Manhattan),
            "linear-conflict" | "linear_conflict" | "linearconflict" => {
                Ok(Heuristic::LinearConflict)
            }
            "euclidean" => Ok(Heuristic::Euclidean),
            _ => Err(UnknownHeuristic(s.to_string())),
        }
    }
}

/// Goal `(row, column)` of a non-blank label on a board of side `k`.
fn goal_position(label: Tile, k: usize) -> (usize, usize) {
    let index = (label - 1) as usize;
    (index / k, index % k)
}

/// Iterates `(row, col, goal_row, goal_col)` for every non-blank tile.
fn placed_tiles(board: &Board) -> impl Iterator<Item = (usize, usize, usize, usize)> + '_ {
    let k = board.size();
    board
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &t)| t != BLANK)
        .map(move |(i, &t)| {
            let (goal_row, goal_col) = goal_position(t, k);
            (i / k, i % k, goal_row, goal_col)
        })
}

/// Counts the non-blank tiles that are not on their goal cell.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Board;
/// use npuzzle_solver::heuristics::hamming_distance;
/// use npuzzle_solver::utils::board_from_rows;
///
/// assert_eq!(hamming_distance(&Board::goal(3)), 0);
/// let board = board_from_rows(&[&[1, 2, 3], &[4, 0, 5], &[7, 8, 6]]).unwrap();
/// assert_eq!(hamming_distance(&board), 2);
/// ```
pub fn hamming_distance(board: &Board) -> u32 {
    placed_tiles(board)
        .filter(|&(r, c, gr, gc)| (r, c) != (gr, gc))
        .count() as u32
}

/// Sums, over the non-blank tiles, the row plus column distance to the goal cell.
pub fn manhattan_distance(board: &Board) -> u32 {
    placed_tiles(board)
        .map(|(r, c, gr, gc)| (r.abs_diff(gr) + c.abs_diff(gc)) as u32)
        .sum()
}

/// Sums, over the non-blank tiles, the straight-line distance to the goal cell, each
/// term truncated to an integer before summing.
///
/// Fast, but searches guided by it are not guaranteed to find a shortest solution.
pub fn euclidean_distance(board: &Board) -> u32 {
    placed_tiles(board)
        .map(|(r, c, gr, gc)| {
            let dr = r.abs_diff(gr) as f64;
            let dc = c.abs_diff(gc) as f64;
            (dr * dr + dc * dc).sqrt() as u32
        })
        .sum()
}

/// Manhattan distance plus two slides for every linear conflict.
///
/// Two tiles are in linear conflict when both sit in their goal row (or column) but
/// appear in the reverse of their goal order along it. Each row and column contributes
/// the fewest tiles that must leave the line so no reversed pair remains; each such
/// tile needs at least two extra slides to step aside and back. When no tile is
/// reversed against more than one other this equals the number of reversed pairs.
///
/// # Examples
/// ```
/// use npuzzle_solver::heuristics::{linear_conflict, manhattan_distance};
/// use npuzzle_solver::utils::board_from_rows;
///
/// let board = board_from_rows(&[&[2, 1, 3], &[4, 5, 6], &[7, 8, 0]]).unwrap();
/// assert_eq!(manhattan_distance(&board), 2);
/// assert_eq!(linear_conflict(&board), 4);
/// ```
pub fn linear_conflict(board: &Board) -> u32 {
    let k = board.size();
    let mut removals = 0;
    let mut line: Vec<usize> = Vec::with_capacity(k);

    for row in 0..k {
        line.clear();
        for col in 0..k {
            let t = board.get_tile(row, col);
            if t == BLANK {
                continue;
            }
            let (goal_row, goal_col) = goal_position(t, k);
            if goal_row == row {
                line.push(goal_col);
            }
        }
        removals += line_removals(&line);
    }

    for col in 0..k {
        line.clear();
        for row in 0..k {
            let t = board.get_tile(row, col);
            if t == BLANK {
                continue;
            }
            let (goal_row, goal_col) = goal_position(t, k);
            if goal_col == col {
                line.push(goal_row);
            }
        }
        removals += line_removals(&line);
    }

    manhattan_distance(board) + 2 * removals
}

/// Given the goal offsets of the tiles in one line, listed in their current order,
/// returns how many must be pulled out so the rest appear in goal order: the line
/// length minus its longest increasing subsequence.
fn line_removals(goal_offsets: &[usize]) -> u32 {
    // tails[i] holds the smallest tail of an increasing run of length i + 1.
    let mut tails: Vec<usize> = Vec::with_capacity(goal_offsets.len());
    for &offset in goal_offsets {
        let at = tails.partition_point(|&t| t < offset);
        if at == tails.len() {
            tails.push(offset);
        } else {
            tails[at] = offset;
        }
    }
    (goal_offsets.len() - tails.len()) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{board_from_rows, board_from_tiles};

    #[test]
    fn test_goal_costs_nothing() {
        for k in 2..=5 {
            let goal = Board::goal(k);
            for h in Heuristic::ALL {
                assert_eq!(h.estimate(&goal), 0, "{} on goal of size {}", h, k);
            }
        }
    }

    #[test]
    fn test_single_slide_board() {
        let board = board_from_rows(&[&[1, 2, 3], &[4, 5, 6], &[7, 0, 8]]).unwrap();
        assert_eq!(hamming_distance(&board), 1);
        assert_eq!(manhattan_distance(&board), 1);
        assert_eq!(euclidean_distance(&board), 1);
        assert_eq!(linear_conflict(&board), 1);
    }

    #[test]
    fn test_manhattan_counts_rows_and_columns() {
        // 8 and 1 have traded places, each three slides from home.
        let board = board_from_rows(&[&[8, 2, 3], &[4, 5, 6], &[7, 1, 0]]).unwrap();
        assert_eq!(manhattan_distance(&board), 3 + 3);
        assert_eq!(hamming_distance(&board), 2);
    }

    #[test]
    fn test_euclidean_truncates_each_term() {
        // 8 and 5 have traded places one row apart.
        let board = board_from_rows(&[&[1, 2, 3], &[4, 8, 6], &[7, 5, 0]]).unwrap();
        assert_eq!(euclidean_distance(&board), 1 + 1);
        // 11 and 1 have traded places; each is sqrt(8) ~ 2.83 from home.
        let far = board_from_tiles(
            4,
            vec![11, 2, 3, 4, 5, 6, 7, 8, 9, 10, 1, 12, 13, 14, 15, 0],
        )
        .unwrap();
        assert_eq!(euclidean_distance(&far), 2 + 2);
    }

    #[test]
    fn test_linear_conflict_reversed_row() {
        let board = board_from_rows(&[&[3, 2, 1], &[4, 5, 6], &[7, 8, 0]]).unwrap();
        assert_eq!(manhattan_distance(&board), 4);
        // Three tiles pairwise reversed: two must leave the row.
        assert_eq!(linear_conflict(&board), 4 + 2 * 2);
    }

    #[test]
    fn test_linear_conflict_column() {
        let board = board_from_rows(&[&[4, 2, 3], &[1, 5, 6], &[7, 8, 0]]).unwrap();
        assert_eq!(manhattan_distance(&board), 2);
        assert_eq!(linear_conflict(&board), 2 + 2);
    }

    #[test]
    fn test_linear_conflict_ignores_tiles_outside_goal_line() {
        let board = board_from_rows(&[&[1, 2, 3], &[4, 0, 5], &[7, 8, 6]]).unwrap();
        assert_eq!(linear_conflict(&board), manhattan_distance(&board));
    }

    #[test]
    fn test_line_removals() {
        assert_eq!(line_removals(&[]), 0);
        assert_eq!(line_removals(&[0, 1, 2]), 0);
        assert_eq!(line_removals(&[1, 0]), 1);
        assert_eq!(line_removals(&[2, 1, 0]), 2);
        assert_eq!(line_removals(&[1, 0, 3, 2]), 2);
        assert_eq!(line_removals(&[3, 0, 1, 2]), 1);
    }

    #[test]
    fn test_estimators_are_ordered() {
        for seed in 0..30 {
            let board = Board::scrambled(4, 50, seed);
            let hamming = hamming_distance(&board);
            let manhattan = manhattan_distance(&board);
            let conflict = linear_conflict(&board);
            let euclidean = euclidean_distance(&board);
            assert!(hamming <= manhattan, "seed {}", seed);
            assert!(manhattan <= conflict, "seed {}", seed);
            assert!(euclidean <= manhattan, "seed {}", seed);
        }
    }

    #[test]
    fn test_heuristic_from_str() {
        assert_eq!("hamming".parse::<Heuristic>(), Ok(Heuristic::Hamming));
        assert_eq!("Manhattan".parse::<Heuristic>(), Ok(Heuristic::Manhattan));
        assert_eq!(
            "linear-conflict".parse::<Heuristic>(),
            Ok(Heuristic::LinearConflict)
        );
        assert_eq!("euclidean".parse::<Heuristic>(), Ok(Heuristic::Euclidean));
        assert_eq!(
            "chebyshev".parse::<Heuristic>(),
            Err(UnknownHeuristic("chebyshev".to_string()))
        );
    }

    #[test]
    fn test_heuristic_names() {
        let names: Vec<&str> = Heuristic::ALL.iter().map(|h| h.name()).collect();
        assert_eq!(
            names,
            [
                "Hamming Distance",
                "Manhattan Distance",
                "Linear Conflict",
                "Euclidean Distance"
            ]
        );
        assert!(!Heuristic::Euclidean.is_admissible());
        assert!(Heuristic::LinearConflict.is_admissible());
    }
}
