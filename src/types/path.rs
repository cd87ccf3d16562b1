use serde::{Deserialize, Serialize};
use std::fmt;

use super::TableCell;

/// Structural position of a cell inside its table: `[row, cell]`.
///
/// `cell` is the index among the row's children, not a logical column.
/// Serializes as a two-element array like host document paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct CellPath {
    pub row: usize,
    pub cell: usize,
}

impl CellPath {
    pub const fn new(row: usize, cell: usize) -> Self {
        Self { row, cell }
    }
}

impl From<[usize; 2]> for CellPath {
    fn from([row, cell]: [usize; 2]) -> Self {
        Self { row, cell }
    }
}

impl From<CellPath> for [usize; 2] {
    fn from(path: CellPath) -> Self {
        [path.row, path.cell]
    }
}

impl fmt::Display for CellPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.cell)
    }
}

/// Logical grid coordinate of a cell, accounting for spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellIndices {
    pub row: usize,
    pub col: usize,
}

impl CellIndices {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A selected cell together with the path it was selected at.
#[derive(Debug, Clone)]
pub struct CellEntry {
    pub cell: TableCell,
    pub path: CellPath,
}

impl CellEntry {
    pub fn new(cell: TableCell, path: CellPath) -> Self {
        Self { cell, path }
    }
}
