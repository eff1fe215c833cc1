//! Error types for matrix parsing and loading.

use std::{io, num::ParseIntError, path::PathBuf};

use thiserror::Error;

/// Errors produced while turning an adjacency matrix into a graph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// The matrix had no rows at all, so no location labels.
    #[error("adjacency matrix is missing its location row")]
    MissingLocationRow,
    /// The number of weight rows differs from the number of locations.
    #[error("expected {expected} weight rows, found {found}")]
    RowCount { expected: usize, found: usize },
    /// A weight row has the wrong number of columns.
    #[error("row {row} has {found} columns, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A cell could not be parsed as an integer travel time.
    #[error("invalid weight {value:?} at row {row}, column {column}: {source}")]
    InvalidWeight {
        row: usize,
        column: usize,
        value: String,
        source: ParseIntError,
    },
}

/// Errors produced while reading a matrix file from disk.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MatrixReadError {
    #[error("failed to read matrix file {path:?}: {source}")]
    Io { source: io::Error, path: PathBuf },
    #[error("malformed matrix in {path:?}: {source}")]
    Parse { source: ParseError, path: PathBuf },
}
