//! A table together with its index cache.
//!
//! This is the glue an editor plugin keeps per table instance: the document
//! host, the cache the resolver fills, and the options. Merges are validated
//! as rectangles before they reach the engine.

use crate::editor::{merge_cells, split_cell, TableDocument, TableHost};
use crate::error::{Result, TableError};
use crate::grid::TableGrid;
use crate::indices::{compute_all_cell_indices, compute_cell_indices, CellIndexCache};
use crate::selection::{entries_at, validate_rectangular};
use crate::types::{CellEntry, CellIndices, CellPath, Table, TableOptions};

/// Editing session for one table.
#[derive(Debug, Clone)]
pub struct TableSession {
    document: TableDocument,
    cache: CellIndexCache,
}

impl TableSession {
    pub fn new(table: Table, options: TableOptions) -> Self {
        Self {
            document: TableDocument::new(table, options),
            cache: CellIndexCache::new(),
        }
    }

    pub fn table(&self) -> &Table {
        self.document.table()
    }

    pub fn document(&self) -> &TableDocument {
        &self.document
    }

    pub fn cache(&self) -> &CellIndexCache {
        &self.cache
    }

    pub fn into_table(self) -> Table {
        self.document.into_table()
    }

    /// Logical coordinate of the cell at `path`, resolved lazily.
    pub fn indices_at(&mut self, path: CellPath) -> Option<CellIndices> {
        let id = self.document.find_cell_by_path(path)?.id();
        match self.cache.get(id) {
            Some(indices) => Some(indices),
            None => compute_cell_indices(self.document.table(), id, &mut self.cache),
        }
    }

    /// Logical coordinates of every cell, shaped like the table's rows.
    pub fn all_indices(&mut self) -> Vec<Vec<CellIndices>> {
        compute_all_cell_indices(self.document.table(), &mut self.cache);
        let cache = &self.cache;
        self.document
            .table()
            .rows
            .iter()
            .map(|row| {
                row.cells
                    .iter()
                    .filter_map(|cell| cache.get(cell.id()))
                    .collect()
            })
            .collect()
    }

    pub fn grid(&mut self) -> TableGrid {
        TableGrid::build(self.document.table(), &mut self.cache)
    }

    /// Merge the cells at `paths` (row-major) after checking they form a
    /// rectangle. Returns the merged cell's path.
    pub fn merge(&mut self, paths: &[CellPath]) -> Result<CellPath> {
        let entries = entries_at(self.document.table(), paths)?;
        validate_rectangular(self.document.table(), &mut self.cache, &entries)?;
        merge_cells(&mut self.document, &mut self.cache, &entries)
    }

    /// Split the cell at `path` into unit cells. Returns the new cells' paths.
    pub fn split(&mut self, path: CellPath) -> Result<Vec<CellPath>> {
        let cell = self
            .document
            .find_cell_by_path(path)
            .ok_or(TableError::NotFound(path))?
            .clone();
        split_cell(&mut self.document, &mut self.cache, &CellEntry::new(cell, path))
    }
}
