//! Common test utilities and assertion helpers.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use std::collections::BTreeSet;

use tablespan::{CellIndexCache, CellPath, Table, TableGrid, TableOptions, TableSession};

// Re-export fixtures for convenience
pub use super::fixtures::*;

// ============================================================================
// Session Helpers
// ============================================================================

pub fn session(table: Table) -> TableSession {
    TableSession::new(table, TableOptions::default())
}

pub fn paths(list: &[(usize, usize)]) -> Vec<CellPath> {
    list.iter().map(|&(r, c)| CellPath::new(r, c)).collect()
}

// ============================================================================
// Inspection Helpers
// ============================================================================

/// Text of every structural cell in `row`.
pub fn row_texts(table: &Table, row: usize) -> Vec<String> {
    table.rows[row]
        .cells
        .iter()
        .map(|cell| cell.text_content())
        .collect()
}

/// `(col_span, row_span)` of the cell at `path`.
pub fn spans_at(table: &Table, row: usize, index: usize) -> (usize, usize) {
    let cell = table
        .cell(CellPath::new(row, index))
        .unwrap_or_else(|| panic!("no cell at [{row}, {index}]"));
    (cell.col_span(), cell.row_span())
}

/// Logical slots covered by any cell, from a fresh index pass.
pub fn covered_slots(table: &Table) -> BTreeSet<(usize, usize)> {
    let grid = TableGrid::build(table, &mut CellIndexCache::new());
    (0..grid.row_count())
        .flat_map(|r| (0..grid.col_count()).map(move |c| (r, c)))
        .filter(|&(r, c)| grid.cell_at(r, c).is_some())
        .collect()
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// No two cells claim the same logical slot.
pub fn assert_no_shared_slots(table: &Table) {
    let grid = TableGrid::build(table, &mut CellIndexCache::new());
    assert!(
        grid.overlaps().is_empty(),
        "slots claimed twice: {:?}",
        grid.overlaps()
    );
}

/// Every row covers the same logical width with no overlaps or holes.
pub fn assert_rectangular(table: &Table) {
    let grid = TableGrid::build(table, &mut CellIndexCache::new());
    assert!(
        grid.is_rectangular(),
        "overlaps: {:?}, holes: {:?}",
        grid.overlaps(),
        grid.holes()
    );
}
