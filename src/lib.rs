//! # N-Puzzle Solver Library
//!
//! This library decides whether a `k x k` sliding-tile board can reach the goal
//! ordering and, if so, finds a shortest sequence of slides with A* search.
//!
//! It is used by two binaries:
//! - `npuzzle_solver`: Reads `k` and a board, then reports the solution found with
//!   each heuristic.
//! - `heuristic_evaluator`: Compares the heuristics on seeded random boards.
//!
//! ## Modules
//! - `engine`: The board representation (`Board`), slides (`Move`) and fingerprints.
//! - `solvability`: Inversion counting and the parity test.
//! - `heuristics`: The four cost estimators and the `Heuristic` selector.
//! - `solver`: Provides the `solve_astar` function.
//! - `session`: Runs a board through the heuristics and renders the report.
//! - `utils`: Parses and validates board input.

pub mod engine;
pub mod heuristics;
pub mod session;
pub mod solvability;
pub mod solver;
pub mod utils;
