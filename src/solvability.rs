//! Parity-based solvability test for sliding-tile boards.
//!
//! A board can reach the goal exactly when its inversion parity (combined with the
//! blank's row for even sizes) matches that of the goal. Both checks only read the
//! board, so they can be run once per board regardless of the heuristic used later.
use crate::engine::{Board, BLANK};

/// Counts inversions among the non-blank tiles read in row-major order.
///
/// An inversion is a pair `i < j` with `tile[i] > tile[j]`. The count is computed
/// with a merge sort in `O(n log n)`.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Board;
/// use npuzzle_solver::solvability::count_inversions;
/// use npuzzle_solver::utils::board_from_rows;
///
/// assert_eq!(count_inversions(&Board::goal(4)), 0);
/// let board = board_from_rows(&[&[1, 2, 3], &[4, 0, 5], &[7, 8, 6]]).unwrap();
/// assert_eq!(count_inversions(&board), 1);
/// ```
pub fn count_inversions(board: &Board) -> u64 {
    let mut values: Vec<u32> = board
        .tiles()
        .iter()
        .copied()
        .filter(|&t| t != BLANK)
        .collect();
    let mut scratch = Vec::with_capacity(values.len());
    sort_and_count(&mut values, &mut scratch)
}

fn sort_and_count(values: &mut [u32], scratch: &mut Vec<u32>) -> u64 {
    if values.len() < 2 {
        return 0;
    }
    let mid = values.len() / 2;
    let left = sort_and_count(&mut values[..mid], scratch);
    let right = sort_and_count(&mut values[mid..], scratch);
    left + right + merge_and_count(values, mid, scratch)
}

/// Merges the sorted halves `values[..mid]` and `values[mid..]`, returning the number
/// of pairs split across the halves that were out of order.
fn merge_and_count(values: &mut [u32], mid: usize, scratch: &mut Vec<u32>) -> u64 {
    scratch.clear();
    let (mut i, mut j) = (0, mid);
    let mut inversions = 0u64;

    while i < mid && j < values.len() {
        if values[i] <= values[j] {
            scratch.push(values[i]);
            i += 1;
        } else {
            scratch.push(values[j]);
            j += 1;
            inversions += (mid - i) as u64;
        }
    }
    scratch.extend_from_slice(&values[i..mid]);
    scratch.extend_from_slice(&values[j..]);
    values.copy_from_slice(scratch);

    inversions
}

/// Decides whether `board` can reach the goal ordering.
///
/// - Odd `k`: solvable iff the inversion count is even.
/// - Even `k`: with the blank's row counted from the bottom as `k - blank_row`,
///   solvable iff exactly one of "inversions even" and "that row even" holds.
pub fn is_solvable(board: &Board) -> bool {
    let k = board.size();
    let inversions_even = count_inversions(board) % 2 == 0;

    if k % 2 == 1 {
        inversions_even
    } else {
        let (blank_row, _) = board.find_blank();
        let blank_row_from_bottom = k - blank_row;
        inversions_even ^ (blank_row_from_bottom % 2 == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Move, Tile};
    use crate::utils::{board_from_rows, board_from_tiles};

    fn brute_force_inversions(board: &Board) -> u64 {
        let values: Vec<Tile> = board.tiles().iter().copied().filter(|&t| t != BLANK).collect();
        let mut count = 0;
        for i in 0..values.len() {
            for j in i + 1..values.len() {
                if values[i] > values[j] {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_goal_has_no_inversions() {
        for k in 2..=6 {
            let goal = Board::goal(k);
            assert_eq!(count_inversions(&goal), 0, "goal of size {}", k);
            assert!(is_solvable(&goal), "goal of size {} must be solvable", k);
        }
    }

    #[test]
    fn test_count_inversions_matches_brute_force() {
        for seed in 0..20 {
            let board = Board::scrambled(4, 60, seed);
            assert_eq!(count_inversions(&board), brute_force_inversions(&board));
        }
        let reversed = board_from_tiles(3, vec![8, 7, 6, 5, 4, 3, 2, 1, 0]).unwrap();
        assert_eq!(count_inversions(&reversed), 28);
    }

    #[test]
    fn test_count_inversions_is_pure() {
        let board = Board::scrambled(5, 100, 11);
        let before = board.clone();
        let first = count_inversions(&board);
        assert_eq!(count_inversions(&board), first);
        assert_eq!(board, before, "counting must not reorder the board");
    }

    #[test]
    fn test_odd_board_single_inversion_is_unsolvable() {
        let board = board_from_rows(&[&[1, 2, 3], &[4, 0, 5], &[7, 8, 6]]).unwrap();
        assert_eq!(count_inversions(&board), 1);
        assert!(!is_solvable(&board));
    }

    #[test]
    fn test_even_board_swapped_tiles_is_unsolvable() {
        // Classic 15-puzzle with 14 and 15 exchanged.
        let board = board_from_tiles(
            4,
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 15, 14, 0],
        )
        .unwrap();
        assert!(!is_solvable(&board));
    }

    #[test]
    fn test_even_board_blank_row_parity() {
        // A vertical slide on k=4 moves one tile past three others, flipping the
        // inversion parity; the blank's row change flips the other term.
        let goal = Board::goal(4);
        let up = goal.try_move(Move::Up).unwrap();
        assert_eq!(count_inversions(&up) % 2, 1);
        assert!(is_solvable(&up));
    }

    #[test]
    fn test_solvability_invariant_under_moves() {
        for k in 2..=5 {
            for seed in 0..10 {
                let mut board = Board::scrambled(k, 40, seed);
                let expected = is_solvable(&board);
                assert!(expected, "scrambles from the goal are always solvable");
                for mv in Move::ALL.iter().cycle().take(12) {
                    board = board.apply_move(*mv);
                    assert_eq!(is_solvable(&board), expected);
                }
            }
        }
    }

    #[test]
    fn test_unsolvable_stays_unsolvable_under_moves() {
        let mut board = board_from_tiles(3, vec![2, 1, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        assert!(!is_solvable(&board));
        for mv in [Move::Up, Move::Left, Move::Up, Move::Right, Move::Down, Move::Left] {
            board = board.apply_move(mv);
            assert!(!is_solvable(&board));
        }
    }
}
