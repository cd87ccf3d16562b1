//! Building and validating cell selections.
//!
//! The merge engine trusts its input to be a solid rectangle. Hosts run
//! [`validate_rectangular`] before calling it; the JS bindings always do.

use std::collections::HashSet;

use crate::error::{Result, TableError};
use crate::grid::TableGrid;
use crate::indices::CellIndexCache;
use crate::types::{CellEntry, CellPath, Table};

/// Inclusive logical bounds of a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionBounds {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

impl SelectionBounds {
    pub fn new(top: usize, left: usize, bottom: usize, right: usize) -> Self {
        Self {
            top: top.min(bottom),
            left: left.min(right),
            bottom: top.max(bottom),
            right: left.max(right),
        }
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.top..=self.bottom).contains(&row) && (self.left..=self.right).contains(&col)
    }
}

/// Look up the cells at `paths`, in the given order.
pub fn entries_at(table: &Table, paths: &[CellPath]) -> Result<Vec<CellEntry>> {
    paths
        .iter()
        .map(|&path| {
            table
                .cell(path)
                .map(|cell| CellEntry::new(cell.clone(), path))
                .ok_or(TableError::NotFound(path))
        })
        .collect()
}

/// Cells whose origin lies inside `bounds`, in structural (row-major) order.
pub fn entries_in_bounds(
    table: &Table,
    cache: &mut CellIndexCache,
    bounds: SelectionBounds,
) -> Vec<CellEntry> {
    // Builds the grid for the side effect of a fully populated cache.
    TableGrid::build(table, cache);
    table
        .cells()
        .filter(|(_, cell)| {
            cache
                .get(cell.id())
                .is_some_and(|origin| bounds.contains(origin.row, origin.col))
        })
        .map(|(path, cell)| CellEntry::new(cell.clone(), path))
        .collect()
}

/// Check that `entries` cover a solid logical rectangle and return its bounds.
///
/// Fails with `InvalidSelection` when the selection is empty, lists a cell
/// twice, leaves a hole, or when a cell that is not selected reaches into the
/// rectangle. Fails with `NotFound` when an entry's path no longer holds the
/// entry's cell.
pub fn validate_rectangular(
    table: &Table,
    cache: &mut CellIndexCache,
    entries: &[CellEntry],
) -> Result<SelectionBounds> {
    if entries.is_empty() {
        return Err(TableError::InvalidSelection("no cells selected".into()));
    }

    let grid = TableGrid::build(table, cache);

    let mut selected = HashSet::with_capacity(entries.len());
    let mut bounds: Option<SelectionBounds> = None;
    for entry in entries {
        let id = entry.cell.id();
        if table.cell(entry.path).map(|cell| cell.id()) != Some(id) {
            return Err(TableError::NotFound(entry.path));
        }
        if !selected.insert(id) {
            return Err(TableError::InvalidSelection(format!(
                "cell at {} is selected twice",
                entry.path
            )));
        }
        let origin = cache.get(id).ok_or(TableError::NotFound(entry.path))?;
        let bottom = origin.row + entry.cell.row_span() - 1;
        let right = origin.col + entry.cell.col_span() - 1;
        bounds = Some(match bounds {
            None => SelectionBounds::new(origin.row, origin.col, bottom, right),
            Some(b) => SelectionBounds::new(
                b.top.min(origin.row),
                b.left.min(origin.col),
                b.bottom.max(bottom),
                b.right.max(right),
            ),
        });
    }
    let bounds = bounds.ok_or_else(|| TableError::InvalidSelection("no cells selected".into()))?;

    for row in bounds.top..=bounds.bottom {
        for col in bounds.left..=bounds.right {
            match grid.cell_at(row, col) {
                Some(id) if selected.contains(&id) => {}
                Some(_) => {
                    return Err(TableError::InvalidSelection(format!(
                        "slot ({row}, {col}) belongs to an unselected cell"
                    )))
                }
                None => {
                    return Err(TableError::InvalidSelection(format!(
                        "slot ({row}, {col}) is not covered by any cell"
                    )))
                }
            }
        }
    }

    if let Some(&(row, col)) = grid.overlaps().iter().find(|&&(r, c)| bounds.contains(r, c)) {
        return Err(TableError::InvalidSelection(format!(
            "slot ({row}, {col}) is claimed by more than one cell"
        )));
    }

    Ok(bounds)
}
