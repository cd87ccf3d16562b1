//! Logical cell indices.
//!
//! A cell's structural position (`[row, cell]`) says nothing about where it
//! sits in the visual grid once spans are involved: a cell with `rowSpan > 1`
//! occupies columns in the rows below it without appearing among their
//! children. Resolution is two passes:
//!
//! 1. a structural scan of the target row, summing the `colSpan` of the
//!    cells to the left of the target;
//! 2. a shift for every cell in the rows above that starts at or before the
//!    tentative column and still reaches down into the target row.
//!
//! Results are cached by [`CellId`] in a [`CellIndexCache`] owned by the
//! caller. The cache describes one tree shape only; any structural edit makes
//! it stale, and the merge/split engine clears it after every edit.

use std::collections::HashMap;

use crate::types::{CellId, CellIndices, Table};

/// Per-table map from cell identity to logical coordinate.
#[derive(Debug, Default, Clone)]
pub struct CellIndexCache {
    indices: HashMap<CellId, CellIndices>,
}

impl CellIndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: CellId) -> Option<CellIndices> {
        self.indices.get(&id).copied()
    }

    pub fn set(&mut self, id: CellId, indices: CellIndices) {
        self.indices.insert(id, indices);
    }

    pub fn remove(&mut self, id: CellId) -> Option<CellIndices> {
        self.indices.remove(&id)
    }

    /// Drop every entry. Called after each structural edit.
    pub fn invalidate(&mut self) {
        self.indices.clear();
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellId, CellIndices)> + '_ {
        self.indices.iter().map(|(&id, &indices)| (id, indices))
    }
}

/// Resolve the logical `{row, col}` of one cell and store it in `cache`.
///
/// Returns `None` when the cell is not part of `table`.
///
/// Cells in the rows above that have not been indexed yet are resolved
/// first, so the result does not depend on prior calls. Recursion only ever
/// walks to strictly earlier rows.
pub fn compute_cell_indices(
    table: &Table,
    cell: CellId,
    cache: &mut CellIndexCache,
) -> Option<CellIndices> {
    let (row_index, mut col_index) = structural_column(table, cell)?;

    for (prev_row_index, prev_row) in table.rows.iter().enumerate().take(row_index) {
        for prev_cell in &prev_row.cells {
            let prev = match cache.get(prev_cell.id()) {
                Some(prev) => prev,
                None => match compute_cell_indices(table, prev_cell.id(), cache) {
                    Some(prev) => prev,
                    None => continue,
                },
            };

            let reaches_target = row_index - prev_row_index < prev_cell.row_span();
            if prev.col <= col_index && prev_cell.row_span() > 1 && reaches_target {
                col_index += prev_cell.col_span();
            }
        }
    }

    let indices = CellIndices::new(row_index, col_index);
    log::trace!("cell {cell:?} resolved to ({}, {})", indices.row, indices.col);
    cache.set(cell, indices);
    Some(indices)
}

/// Resolve every cell of `table` in structural order.
///
/// Idempotent: calling it twice on an unchanged table yields the same cache.
pub fn compute_all_cell_indices(table: &Table, cache: &mut CellIndexCache) {
    for (path, cell) in table.cells() {
        if compute_cell_indices(table, cell.id(), cache).is_none() {
            log::warn!("cell at {path} could not be indexed");
        }
    }
}

/// Row index and span-summed column of `cell`, ignoring spans from above.
fn structural_column(table: &Table, cell: CellId) -> Option<(usize, usize)> {
    table.rows.iter().enumerate().find_map(|(r, row)| {
        let mut col = 0;
        for candidate in &row.cells {
            if candidate.id() == cell {
                return Some((r, col));
            }
            col += candidate.col_span();
        }
        None
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{CellKind, CellPath, TableCell, TableRow};

    fn cell(col_span: usize, row_span: usize) -> TableCell {
        TableCell::new(CellKind::Body, vec![]).with_spans(col_span, row_span)
    }

    fn table(rows: Vec<Vec<TableCell>>) -> Table {
        Table::new(rows.into_iter().map(TableRow::new).collect())
    }

    fn resolve(table: &Table, row: usize, cell: usize) -> Option<CellIndices> {
        let mut cache = CellIndexCache::new();
        let id = table.cell(CellPath::new(row, cell))?.id();
        compute_cell_indices(table, id, &mut cache)
    }

    #[test]
    fn test_unit_cells_match_structure() {
        let t = table(vec![
            vec![cell(1, 1), cell(1, 1), cell(1, 1)],
            vec![cell(1, 1), cell(1, 1), cell(1, 1)],
        ]);
        let mut cache = CellIndexCache::new();
        compute_all_cell_indices(&t, &mut cache);

        for (path, c) in t.cells() {
            assert_eq!(
                cache.get(c.id()),
                Some(CellIndices::new(path.row, path.cell))
            );
        }
    }

    #[test]
    fn test_col_span_advances_counter() {
        let t = table(vec![vec![cell(2, 1), cell(1, 1), cell(3, 1), cell(1, 1)]]);
        assert_eq!(resolve(&t, 0, 3), Some(CellIndices::new(0, 6)));
    }

    #[test]
    fn test_row_span_from_above_shifts_column() {
        // | A (2x2) | b |
        // |         | d |
        let t = table(vec![vec![cell(2, 2), cell(1, 1)], vec![cell(1, 1)]]);
        assert_eq!(resolve(&t, 1, 0), Some(CellIndices::new(1, 2)));
    }

    #[test]
    fn test_expired_row_span_does_not_shift() {
        // A spans rows 0-1 only; row 2 is unaffected.
        let t = table(vec![
            vec![cell(1, 2), cell(1, 1)],
            vec![cell(1, 1)],
            vec![cell(1, 1), cell(1, 1)],
        ]);
        assert_eq!(resolve(&t, 1, 0), Some(CellIndices::new(1, 1)));
        assert_eq!(resolve(&t, 2, 0), Some(CellIndices::new(2, 0)));
    }

    #[test]
    fn test_span_right_of_target_does_not_shift() {
        // | a | B (1x2) | c |
        // | d |         | e |
        let t = table(vec![
            vec![cell(1, 1), cell(1, 2), cell(1, 1)],
            vec![cell(1, 1), cell(1, 1)],
        ]);
        assert_eq!(resolve(&t, 1, 0), Some(CellIndices::new(1, 0)));
        assert_eq!(resolve(&t, 1, 1), Some(CellIndices::new(1, 2)));
    }

    #[test]
    fn test_lazy_resolution_without_bulk_pass() {
        let t = table(vec![
            vec![cell(1, 3), cell(1, 1), cell(1, 1)],
            vec![cell(1, 2), cell(1, 1)],
            vec![cell(1, 1)],
        ]);
        // Row 2's only cell sits right of both spanning cells.
        assert_eq!(resolve(&t, 2, 0), Some(CellIndices::new(2, 2)));
    }

    #[test]
    fn test_unknown_cell_is_none() {
        let t = table(vec![vec![cell(1, 1)]]);
        let mut cache = CellIndexCache::new();
        let stranger = cell(1, 1);
        assert_eq!(compute_cell_indices(&t, stranger.id(), &mut cache), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_bulk_is_idempotent() {
        let t = table(vec![
            vec![cell(2, 2), cell(1, 1)],
            vec![cell(1, 1)],
            vec![cell(1, 1), cell(1, 1), cell(1, 1)],
        ]);
        let mut cache = CellIndexCache::new();
        compute_all_cell_indices(&t, &mut cache);
        let mut first: Vec<_> = cache.iter().collect();
        compute_all_cell_indices(&t, &mut cache);
        let mut second: Vec<_> = cache.iter().collect();
        first.sort();
        second.sort();
        assert_eq!(first, second);
        assert_eq!(cache.len(), t.cell_count());
    }
}
