//! Merging a rectangular selection into one spanning cell.

use std::collections::{BTreeMap, HashSet};

use super::{EmptyCellOptions, InsertOptions, TableHost};
use crate::error::{Result, TableError};
use crate::indices::{compute_all_cell_indices, CellIndexCache};
use crate::types::{CellEntry, CellIndices, CellPath, MAX_COL_SPAN, MAX_ROW_SPAN};

/// Replace the selected cells with a single cell covering their union.
///
/// `entries` must describe a solid rectangle in logical coordinates (see
/// [`crate::selection::validate_rectangular`]); this is not re-checked here
/// beyond what the edits themselves require. They may be listed in any order.
///
/// - `colSpan` is the sum over the selected cells starting in the first
///   logical row, `rowSpan` the sum over those starting in the first logical
///   column.
/// - Content is the children of every selected cell with non-empty text, in
///   selection order. Cells without text (an image on its own, for example)
///   contribute nothing.
/// - The result is a header cell if any selected cell is one.
///
/// The merged cell is inserted at the path of the top-left cell, which is
/// returned. A merged span larger than [`MAX_COL_SPAN`] x [`MAX_ROW_SPAN`] is
/// rejected with `InvalidSelection`.
/// `cache` is cleared afterwards; on error the table is left as it was.
pub fn merge_cells<H: TableHost>(
    host: &mut H,
    cache: &mut CellIndexCache,
    entries: &[CellEntry],
) -> Result<CellPath> {
    if entries.is_empty() {
        return Err(TableError::InvalidSelection("no cells selected".into()));
    }

    compute_all_cell_indices(host.table(), cache);
    let placed = entries
        .iter()
        .map(|entry| {
            cache
                .get(entry.cell.id())
                .map(|origin| (entry, origin))
                .ok_or(TableError::NotFound(entry.path))
        })
        .collect::<Result<Vec<(&CellEntry, CellIndices)>>>()?;

    // The top-left cell's path is where the merged cell goes, whatever order
    // the selection was listed in.
    let (anchor, origin) = placed
        .iter()
        .copied()
        .min_by_key(|(_, o)| (o.row, o.col))
        .ok_or_else(|| TableError::InvalidSelection("no cells selected".into()))?;
    let (top, left) = (origin.row, origin.col);

    let col_span: usize = placed
        .iter()
        .filter(|(_, o)| o.row == top)
        .map(|(entry, _)| entry.cell.col_span())
        .sum();
    let row_span: usize = placed
        .iter()
        .filter(|(_, o)| o.col == left)
        .map(|(entry, _)| entry.cell.row_span())
        .sum();

    if col_span > MAX_COL_SPAN || row_span > MAX_ROW_SPAN {
        return Err(TableError::InvalidSelection(format!(
            "merged cell would span {col_span}x{row_span}, more than {MAX_COL_SPAN}x{MAX_ROW_SPAN}"
        )));
    }

    let header = entries.iter().any(|entry| entry.cell.is_header());

    let mut contents = Vec::new();
    for entry in entries {
        if !host.text_content_of(&entry.cell).is_empty() {
            contents.extend(entry.cell.children.iter().cloned());
        }
    }

    let start = anchor.path;
    log::debug!(
        "merging {} cells at ({top}, {left}) into {col_span}x{row_span} at {start}",
        entries.len()
    );

    let result = host.transact(|host| {
        remove_selected(host, entries)?;

        let mut merged = host.empty_cell_template(EmptyCellOptions {
            header,
            children: Some(contents),
        });
        merged.set_spans(col_span, row_span);
        host.insert_node_at(merged, start, InsertOptions { select: true })?;
        Ok(start)
    });

    cache.invalidate();
    result
}

/// Remove the selected cells row by row.
///
/// Selected cells of one row are contiguous siblings, so each row's run is
/// removed by deleting at the run's first path once per entry; every removal
/// shifts the next selected cell into that path.
fn remove_selected<H: TableHost>(host: &mut H, entries: &[CellEntry]) -> Result<()> {
    let selected: HashSet<_> = entries.iter().map(|entry| entry.cell.id()).collect();

    let mut rows: BTreeMap<usize, Vec<CellPath>> = BTreeMap::new();
    for entry in entries {
        rows.entry(entry.path.row).or_default().push(entry.path);
    }

    for paths in rows.values() {
        let Some(&slot) = paths.iter().min() else {
            continue;
        };
        for _ in paths {
            let removed = host.remove_node_at(slot)?;
            if !selected.contains(&removed.id()) {
                return Err(TableError::structural(
                    slot,
                    "removed a cell outside the selection; selected cells are not contiguous",
                ));
            }
        }
    }
    Ok(())
}
