//! Board model for the sliding-tile puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Move`: One of the four directions the blank can slide in.
//! - `Board`: A `k x k` grid of tile labels with one blank (`0`), supporting
//!   move application, blank lookup and canonical fingerprinting.
//! - `Fingerprint`: The flattened row-major key used for equality and hashing
//!   in the search's closed map.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// A tile label. `BLANK` (0) marks the empty cell; every other label is in `1..k*k`.
pub type Tile = u32;

/// The label used for the empty cell.
pub const BLANK: Tile = 0;

/// A single slide, named after the direction the blank travels.
///
/// The discriminants are fixed so that a move and its direct reverse always sum
/// to 5 (`Up + Down`, `Left + Right`). The search relies on this to skip the
/// move that would undo the previous one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Move {
    /// The blank swaps with the tile above it.
    Up = 1,
    /// The blank swaps with the tile to its left.
    Left = 2,
    /// The blank swaps with the tile to its right.
    Right = 3,
    /// The blank swaps with the tile below it.
    Down = 4,
}

impl Move {
    /// All moves in expansion order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Left, Move::Right, Move::Down];

    /// Returns the numeric identifier (1..=4) of the move.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Move;
    /// assert_eq!(Move::Up.id() + Move::Down.id(), 5);
    /// assert_eq!(Move::Left.id() + Move::Right.id(), 5);
    /// ```
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Returns the move that exactly undoes this one.
    pub fn reverse(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
            Move::Down => Move::Up,
        }
    }

    /// Returns `true` if applying `self` right after `previous` would undo `previous`.
    pub fn is_reverse_of(self, previous: Move) -> bool {
        self.id() + previous.id() == 5
    }

    /// Row and column offset of the blank for this move.
    fn offset(self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
            Move::Down => (1, 0),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Right => "Right",
            Move::Down => "Down",
        };
        write!(f, "{}", s)
    }
}

/// Canonical encoding of a board: its labels flattened in row-major order.
///
/// Two boards of the same size are equal exactly when their fingerprints are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint(Box<[Tile]>);

impl Fingerprint {
    /// Returns the flattened labels backing this fingerprint.
    pub fn as_slice(&self) -> &[Tile] {
        &self.0
    }
}

/// A `k x k` sliding-tile board.
///
/// Every label in `0..k*k` appears exactly once; `0` is the blank. Boards are only
/// built from already-validated labels (see `crate::utils::parse_puzzle`) or derived
/// from another valid board, so the permutation invariant always holds.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    tiles: Vec<Tile>,
    blank: usize,
}

impl Board {
    /// Creates the goal board for side length `size`: labels `1..k*k` in row-major
    /// order with the blank in the last cell.
    ///
    /// # Panics
    /// Panics if `size < 2`.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    /// let goal = Board::goal(3);
    /// assert_eq!(goal.tiles(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
    /// assert_eq!(goal.find_blank(), (2, 2));
    /// ```
    pub fn goal(size: usize) -> Self {
        assert!(size >= 2, "board size must be at least 2, got {}", size);
        let cells = size * size;
        let mut tiles: Vec<Tile> = (1..cells as Tile).collect();
        tiles.push(BLANK);
        Board {
            size,
            tiles,
            blank: cells - 1,
        }
    }

    /// Builds a board from labels the caller has already validated as a permutation
    /// of `0..size*size`.
    pub(crate) fn from_validated(size: usize, tiles: Vec<Tile>) -> Self {
        debug_assert_eq!(tiles.len(), size * size);
        let blank = tiles
            .iter()
            .position(|&t| t == BLANK)
            .unwrap_or(tiles.len() - 1);
        Board { size, tiles, blank }
    }

    /// Creates a solvable board by sliding the blank `steps` times at random, starting
    /// from the goal.
    ///
    /// The walk never immediately undoes its previous slide. The same `(size, steps, seed)`
    /// always produces the same board.
    ///
    /// # Panics
    /// Panics if `size < 2`.
    pub fn scrambled(size: usize, steps: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::goal(size);
        let mut previous: Option<Move> = None;

        let mut taken = 0;
        while taken < steps {
            let mv = Move::ALL[rng.gen_range(0..Move::ALL.len())];
            if previous.is_some_and(|p| mv.is_reverse_of(p)) {
                continue;
            }
            if let Some(next) = board.try_move(mv) {
                board = next;
                previous = Some(mv);
                taken += 1;
            }
        }
        board
    }

    /// Side length `k` of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Labels in row-major order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Returns the label at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is outside the board.
    pub fn get_tile(&self, r: usize, c: usize) -> Tile {
        assert!(r < self.size && c < self.size, "({}, {}) is off the board", r, c);
        self.tiles[r * self.size + c]
    }

    /// Returns the `(row, column)` of the blank, both 0-indexed from the top-left.
    pub fn find_blank(&self) -> (usize, usize) {
        (self.blank / self.size, self.blank % self.size)
    }

    /// Returns the board reached by sliding the blank in direction `mv`, or `None`
    /// if the blank would leave the grid.
    pub fn try_move(&self, mv: Move) -> Option<Board> {
        let (row, col) = self.find_blank();
        let (dr, dc) = mv.offset();
        let new_row = row.checked_add_signed(dr).filter(|&r| r < self.size)?;
        let new_col = col.checked_add_signed(dc).filter(|&c| c < self.size)?;

        let target = new_row * self.size + new_col;
        let mut next = self.clone();
        next.tiles.swap(self.blank, target);
        next.blank = target;
        Some(next)
    }

    /// Applies `mv`, returning an unchanged copy when the slide is off the grid.
    ///
    /// Callers must not treat the returned board as progress; use `try_move` to
    /// tell legal slides apart from no-ops.
    pub fn apply_move(&self, mv: Move) -> Board {
        self.try_move(mv).unwrap_or_else(|| self.clone())
    }

    /// Returns the canonical fingerprint of this board.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint(self.tiles.clone().into_boxed_slice())
    }

    /// Returns `true` if `other` is reachable from `self` with exactly one legal slide.
    pub fn is_one_slide_from(&self, other: &Board) -> bool {
        Move::ALL
            .iter()
            .filter_map(|&mv| self.try_move(mv))
            .any(|next| next == *other)
    }
}

impl fmt::Display for Board {
    /// Writes one line per row, labels separated by single spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.size) {
            let line: Vec<String> = row.iter().map(|t| t.to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
