//! Reading adjacency matrices from text.
//!
//! Cells are separated by commas or whitespace. Blank lines and lines
//! starting with `#` are ignored. The first remaining line holds the
//! location labels.

use std::fs;
use std::path::Path;

use crate::error::MatrixReadError;
use crate::graph::Graph;
use crate::traits::PlannerObserver;

/// Split matrix text into rows of cells.
pub fn parse_matrix_text(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(split_cells)
        .collect()
}

fn split_cells(line: &str) -> Vec<String> {
    if line.contains(',') {
        line.split(',').map(|cell| cell.trim().to_string()).collect()
    } else {
        line.split_whitespace().map(str::to_string).collect()
    }
}

/// Read a matrix file and build the graph from it.
pub fn read_matrix_file<O>(path: &Path, observer: &mut O) -> Result<Graph<String>, MatrixReadError>
where
    O: PlannerObserver<String>,
{
    let text = fs::read_to_string(path).map_err(|source| MatrixReadError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    let rows = parse_matrix_text(&text);
    Graph::from_matrix(&rows, observer).map_err(|source| MatrixReadError::Parse {
        source,
        path: path.to_path_buf(),
    })
}
