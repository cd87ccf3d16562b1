//! Logical occupancy grid for a table.
//!
//! Expands every cell over the rectangle its spans cover, so callers can ask
//! "which cell covers (row, col)?" and detect slots claimed twice or not at all.

use std::collections::HashMap;

use crate::indices::{compute_all_cell_indices, CellIndexCache};
use crate::types::{CellId, CellIndices, Table};

/// Occupant of one logical slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSlot {
    /// Cell covering this slot
    pub cell: CellId,
    /// True if this slot is the cell's top-left origin
    pub is_origin: bool,
    /// Logical coordinate of the cell's origin
    pub origin: CellIndices,
}

/// Logical layout of a table computed from resolved indices.
#[derive(Debug, Clone, Default)]
pub struct TableGrid {
    slots: HashMap<(usize, usize), GridSlot>,
    /// Slots claimed by more than one cell, in discovery order
    overlaps: Vec<(usize, usize)>,
    row_count: usize,
    col_count: usize,
}

impl TableGrid {
    /// Resolve all indices of `table` into `cache` and lay the cells out.
    ///
    /// The grid has exactly as many rows as the table.
    pub fn build(table: &Table, cache: &mut CellIndexCache) -> Self {
        compute_all_cell_indices(table, cache);

        let mut grid = Self {
            row_count: table.rows.len(),
            ..Self::default()
        };

        for (_, cell) in table.cells() {
            let Some(origin) = cache.get(cell.id()) else {
                continue;
            };
            // Rows past the table's last row do not exist; a span reaching
            // into them covers nothing there.
            let bottom = origin
                .row
                .saturating_add(cell.row_span())
                .min(table.rows.len());
            let right = origin.col.saturating_add(cell.col_span());
            for row in origin.row..bottom {
                for col in origin.col..right {
                    let slot = GridSlot {
                        cell: cell.id(),
                        is_origin: row == origin.row && col == origin.col,
                        origin,
                    };
                    if grid.slots.insert((row, col), slot).is_some() {
                        grid.overlaps.push((row, col));
                    }
                }
            }
            grid.col_count = grid.col_count.max(right);
        }

        grid
    }

    pub fn slot(&self, row: usize, col: usize) -> Option<&GridSlot> {
        self.slots.get(&(row, col))
    }

    /// Id of the cell covering `(row, col)`.
    pub fn cell_at(&self, row: usize, col: usize) -> Option<CellId> {
        self.slot(row, col).map(|slot| slot.cell)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn col_count(&self) -> usize {
        self.col_count
    }

    pub fn overlaps(&self) -> &[(usize, usize)] {
        &self.overlaps
    }

    /// Slots inside the grid bounds that no cell covers.
    pub fn holes(&self) -> Vec<(usize, usize)> {
        (0..self.row_count)
            .flat_map(|row| (0..self.col_count).map(move |col| (row, col)))
            .filter(|key| !self.slots.contains_key(key))
            .collect()
    }

    /// Every slot covered exactly once and every row the same width.
    pub fn is_rectangular(&self) -> bool {
        self.overlaps.is_empty() && self.holes().is_empty()
    }
}
