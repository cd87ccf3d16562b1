//! Splitting a spanning cell back into unit cells.

use super::{EmptyCellOptions, InsertOptions, TableHost};
use crate::error::{Result, TableError};
use crate::indices::{compute_all_cell_indices, CellIndexCache};
use crate::types::{CellEntry, CellId, CellPath, Table};

/// Replace a spanning cell with `colSpan x rowSpan` unit cells.
///
/// The first new cell (top-left) takes the original content verbatim; the
/// others are blank. All keep the original's header/body kind. Returns the
/// inserted paths in insertion order (row-major). A 1x1 cell is replaced by
/// one equivalent cell.
///
/// Fails with `StructuralInconsistency` when the row span reaches past the
/// table's last row. `cache` is cleared afterwards; on error the table is
/// left as it was.
pub fn split_cell<H: TableHost>(
    host: &mut H,
    cache: &mut CellIndexCache,
    entry: &CellEntry,
) -> Result<Vec<CellPath>> {
    let id = entry.cell.id();
    compute_all_cell_indices(host.table(), cache);
    let origin = cache.get(id).ok_or(TableError::NotFound(entry.path))?;

    let col_span = entry.cell.col_span();
    let row_span = entry.cell.row_span();
    let header = entry.cell.is_header();

    let bottom = origin
        .row
        .checked_add(row_span)
        .filter(|&bottom| bottom <= host.table().rows.len())
        .ok_or_else(|| TableError::structural(entry.path, "row span reaches past the last row"))?;

    let mut paths = Vec::with_capacity(col_span.saturating_mul(bottom - origin.row));
    for row in origin.row..bottom {
        let slot = insertion_slot(host.table(), cache, row, origin.col, id);
        paths.extend((0..col_span).map(|offset| CellPath::new(row, slot + offset)));
    }

    log::debug!(
        "splitting {col_span}x{row_span} cell at {} (logical {}, {})",
        entry.path,
        origin.row,
        origin.col
    );

    let result = host.transact(|host| {
        let removed = host.remove_node_at(entry.path)?;
        if removed.id() != id {
            return Err(TableError::structural(
                entry.path,
                "path no longer holds the cell being split",
            ));
        }

        for (n, &path) in paths.iter().enumerate() {
            let children = (n == 0).then(|| removed.children.clone());
            let mut cell = host.empty_cell_template(EmptyCellOptions { header, children });
            cell.set_spans(1, 1);
            host.insert_node_at(cell, path, InsertOptions::default())?;
        }
        Ok(paths)
    });

    cache.invalidate();
    result
}

/// Structural index in `row` at which cells for logical column `col` go.
///
/// That is directly after the last cell of the row that starts left of
/// `col`. When no such cell exists (the columns to the left are covered by
/// spans from above, or the row is empty) the run starts the row. Cells of
/// the row that start right of `col` keep following the inserted run, so
/// paths stay gap-free.
fn insertion_slot(
    table: &Table,
    cache: &CellIndexCache,
    row: usize,
    col: usize,
    splitting: CellId,
) -> usize {
    let Some(cells) = table.row(row).map(|r| &r.cells) else {
        return 0;
    };
    cells
        .iter()
        .rposition(|cell| {
            cell.id() != splitting && cache.get(cell.id()).is_some_and(|idx| idx.col < col)
        })
        .map_or(0, |preceding| preceding + 1)
}
