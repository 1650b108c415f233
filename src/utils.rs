//! Input parsing for puzzle boards.
//!
//! All validation happens here, before a `Board` is constructed: a board that
//! exists is always a permutation of `0..k*k`.
use crate::engine::{Board, Tile};
use thiserror::Error;

/// Largest accepted side length. Keeps `k * k` labels well inside `Tile`.
pub const MAX_BOARD_SIZE: usize = u16::MAX as usize;

/// Reasons a textual or row-based board description is rejected.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("Input is empty, expected the board size k")]
    MissingSize,
    #[error("Board size '{token}' is not a non-negative integer")]
    InvalidSize { token: String },
    #[error("Board size must be at least 2, got {size}")]
    SizeTooSmall { size: usize },
    #[error("Board size must be at most {max}, got {size}")]
    SizeTooLarge { size: usize, max: usize },
    #[error("Expected {expected} tile labels, found {found}")]
    WrongTileCount { expected: usize, found: usize },
    #[error("Row {row} has {found} labels (expected {expected})")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Tile {position} ('{token}') is not a non-negative integer")]
    InvalidTile { position: usize, token: String },
    #[error("Tile {position} has label {label}, expected a value in 0..={max}")]
    TileOutOfRange {
        position: usize,
        label: Tile,
        max: Tile,
    },
    #[error("Label {label} appears more than once")]
    DuplicateTile { label: Tile },
}

/// Parses a board from whitespace-separated text: the size `k`, then `k * k`
/// labels in row-major order, `0` marking the blank.
///
/// Line breaks carry no meaning; any whitespace separates tokens.
///
/// # Returns
/// * `Ok(Board)` when the text describes a valid permutation of `0..k*k`.
/// * `Err(InputError)` describing the first problem found otherwise.
///
/// # Examples
/// ```
/// use npuzzle_solver::utils::{parse_puzzle, InputError};
///
/// let board = parse_puzzle("3\n1 2 3\n4 0 5\n7 8 6\n").unwrap();
/// assert_eq!(board.size(), 3);
/// assert_eq!(board.find_blank(), (1, 1));
///
/// assert_eq!(
///     parse_puzzle("2\n1 2 3").unwrap_err(),
///     InputError::WrongTileCount { expected: 4, found: 3 }
/// );
/// ```
pub fn parse_puzzle(input: &str) -> Result<Board, InputError> {
    let mut tokens = input.split_whitespace();

    let size_token = tokens.next().ok_or(InputError::MissingSize)?;
    let size: usize = size_token.parse().map_err(|_| InputError::InvalidSize {
        token: size_token.to_string(),
    })?;
    check_size(size)?;

    let raw: Vec<&str> = tokens.collect();
    let expected = size * size;
    if raw.len() != expected {
        return Err(InputError::WrongTileCount {
            expected,
            found: raw.len(),
        });
    }

    let tiles = raw
        .iter()
        .enumerate()
        .map(|(position, token)| {
            token.parse::<Tile>().map_err(|_| InputError::InvalidTile {
                position,
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<Tile>, InputError>>()?;

    board_from_tiles(size, tiles)
}

/// Builds a board from explicit rows. The number of rows sets `k`.
///
/// # Examples
/// ```
/// use npuzzle_solver::utils::board_from_rows;
///
/// let board = board_from_rows(&[&[1, 2], &[3, 0]]).unwrap();
/// assert_eq!(board.get_tile(1, 0), 3);
/// assert!(board_from_rows(&[&[1, 2], &[3]]).is_err());
/// ```
pub fn board_from_rows(rows: &[&[Tile]]) -> Result<Board, InputError> {
    let size = rows.len();
    check_size(size)?;

    let mut tiles = Vec::with_capacity(size * size);
    for (row, labels) in rows.iter().enumerate() {
        if labels.len() != size {
            return Err(InputError::RaggedRow {
                row,
                expected: size,
                found: labels.len(),
            });
        }
        tiles.extend_from_slice(labels);
    }
    board_from_tiles(size, tiles)
}

/// Validates `tiles` as a row-major permutation of `0..size*size` and builds the board.
pub fn board_from_tiles(size: usize, tiles: Vec<Tile>) -> Result<Board, InputError> {
    check_size(size)?;
    let expected = size * size;
    if tiles.len() != expected {
        return Err(InputError::WrongTileCount {
            expected,
            found: tiles.len(),
        });
    }

    let max = (expected - 1) as Tile;
    let mut seen = vec![false; expected];
    for (position, &label) in tiles.iter().enumerate() {
        if label > max {
            return Err(InputError::TileOutOfRange {
                position,
                label,
                max,
            });
        }
        let slot = &mut seen[label as usize];
        if *slot {
            return Err(InputError::DuplicateTile { label });
        }
        *slot = true;
    }
    // Every label is in range and none repeats, so with `expected` entries none is missing.

    Ok(Board::from_validated(size, tiles))
}

fn check_size(size: usize) -> Result<(), InputError> {
    if size < 2 {
        return Err(InputError::SizeTooSmall { size });
    }
    if size > MAX_BOARD_SIZE {
        return Err(InputError::SizeTooLarge {
            size,
            max: MAX_BOARD_SIZE,
        });
    }
    Ok(())
}
