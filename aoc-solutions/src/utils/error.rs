//! Errors shared by the grid toolkit and the puzzles built on it.

use aoc_solver::{ParseError, SolveError};
use thiserror::Error;

/// Everything that can go wrong between raw puzzle text and an answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// The input contained no cells at all.
    #[error("grid input is empty")]
    EmptyGrid,
    /// A row's length differs from the first row's.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character that does not map to any cell kind.
    #[error("unknown cell {found:?} at row {row}, column {column}")]
    UnknownCell {
        found: char,
        row: usize,
        column: usize,
    },
    /// A required marker such as the start tile is absent.
    #[error("missing {0:?} marker")]
    MissingMarker(char),
    /// Run-length limits that no path could satisfy.
    #[error("invalid run limits: min {min}, max {max}")]
    InvalidRunLimits { min: usize, max: usize },
    /// A search exhausted its frontier.
    #[error("no {0} found")]
    NotFound(&'static str),
    /// The input is valid but outside what the solver can handle.
    #[error("unsupported input: {0}")]
    Unsupported(String),
}

impl From<PuzzleError> for ParseError {
    fn from(error: PuzzleError) -> Self {
        match error {
            PuzzleError::EmptyGrid | PuzzleError::MissingMarker(_) => {
                ParseError::MissingData(error.to_string())
            }
            _ => ParseError::InvalidFormat(error.to_string()),
        }
    }
}

impl From<PuzzleError> for SolveError {
    fn from(error: PuzzleError) -> Self {
        SolveError::failed(error)
    }
}
