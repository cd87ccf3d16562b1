//! Structural table edits.
//!
//! The engine never touches a [`Table`] directly. It goes through
//! [`TableHost`], the set of node primitives the surrounding document editor
//! provides:
//! - path lookups in both directions
//! - single-node remove/insert
//! - the empty-cell template
//! - a transaction boundary
//!
//! [`TableDocument`] is the in-memory host used by the JS bindings and tests.

pub mod merge;
pub mod split;

pub use merge::merge_cells;
pub use split::split_cell;

use crate::error::{Result, TableError};
use crate::types::{CellId, CellKind, CellPath, ContentNode, Table, TableCell, TableOptions};

/// Options for [`TableHost::insert_node_at`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertOptions {
    /// Move the host selection onto the inserted cell
    pub select: bool,
}

/// Options for [`TableHost::empty_cell_template`].
#[derive(Debug, Clone, Default)]
pub struct EmptyCellOptions {
    pub header: bool,
    /// Content for the new cell; `None` or empty means a blank paragraph
    pub children: Option<Vec<ContentNode>>,
}

/// Node primitives the engine needs from the host document.
///
/// Edits are applied one node at a time and fail fast: an edit at a path that
/// does not exist returns `StructuralInconsistency` without touching the tree.
pub trait TableHost {
    /// The table being edited, in its current shape.
    fn table(&self) -> &Table;

    fn find_cell_by_path(&self, path: CellPath) -> Option<&TableCell> {
        self.table().cell(path)
    }

    fn find_structural_path(&self, id: CellId) -> Option<CellPath> {
        self.table().find_path(id)
    }

    /// Remove the cell at `path`; later siblings shift left by one.
    fn remove_node_at(&mut self, path: CellPath) -> Result<TableCell>;

    /// Insert `cell` at `path`; the cell previously there shifts right.
    /// `path.cell` may equal the row length (append) but never exceed it.
    fn insert_node_at(&mut self, cell: TableCell, path: CellPath, options: InsertOptions)
        -> Result<()>;

    /// Text used to decide whether a cell contributes content to a merge.
    fn text_content_of(&self, cell: &TableCell) -> String {
        cell.text_content()
    }

    /// A fresh 1x1 cell of the right kind with the given (or blank) content.
    fn empty_cell_template(&self, options: EmptyCellOptions) -> TableCell;

    /// Run `edit` as one unit: if it fails, the table is restored to its state
    /// before the call and the error is returned.
    fn transact<R, F>(&mut self, edit: F) -> Result<R>
    where
        F: FnOnce(&mut Self) -> Result<R>,
        Self: Sized;
}

/// In-memory host owning a single table.
#[derive(Debug, Clone)]
pub struct TableDocument {
    table: Table,
    options: TableOptions,
    selection: Option<CellPath>,
}

impl TableDocument {
    pub fn new(table: Table, options: TableOptions) -> Self {
        Self {
            table,
            options,
            selection: None,
        }
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Path of the selected cell, set by inserts with `select: true`.
    pub fn selection(&self) -> Option<CellPath> {
        self.selection
    }

    pub fn into_table(self) -> Table {
        self.table
    }
}

impl TableHost for TableDocument {
    fn table(&self) -> &Table {
        &self.table
    }

    fn remove_node_at(&mut self, path: CellPath) -> Result<TableCell> {
        let row = self
            .table
            .rows
            .get_mut(path.row)
            .ok_or_else(|| TableError::structural(path, "row does not exist"))?;
        if path.cell >= row.cells.len() {
            return Err(TableError::structural(path, "no cell to remove"));
        }
        if self.selection == Some(path) {
            self.selection = None;
        }
        Ok(row.cells.remove(path.cell))
    }

    fn insert_node_at(
        &mut self,
        cell: TableCell,
        path: CellPath,
        options: InsertOptions,
    ) -> Result<()> {
        let row = self
            .table
            .rows
            .get_mut(path.row)
            .ok_or_else(|| TableError::structural(path, "row does not exist"))?;
        if path.cell > row.cells.len() {
            return Err(TableError::structural(
                path,
                format!("insert would leave a gap after {} cells", row.cells.len()),
            ));
        }
        row.cells.insert(path.cell, cell);
        if options.select && self.options.select_merged_cell {
            self.selection = Some(path);
        }
        Ok(())
    }

    fn empty_cell_template(&self, options: EmptyCellOptions) -> TableCell {
        let kind = if options.header {
            CellKind::Header
        } else {
            CellKind::Body
        };
        let children = match options.children {
            Some(children) if !children.is_empty() => children,
            _ => vec![ContentNode::element(
                self.options.paragraph_type.as_str(),
                vec![ContentNode::text("")],
            )],
        };
        TableCell::new(kind, children)
    }

    fn transact<R, F>(&mut self, edit: F) -> Result<R>
    where
        F: FnOnce(&mut Self) -> Result<R>,
    {
        let table = self.table.clone();
        let selection = self.selection;
        edit(self).inspect_err(|e| {
            log::warn!("table edit rolled back: {e}");
            self.table = table;
            self.selection = selection;
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::TableRow;

    fn doc() -> TableDocument {
        let row = TableRow::new(vec![
            TableCell::new(CellKind::Body, vec![ContentNode::text("a")]),
            TableCell::new(CellKind::Body, vec![ContentNode::text("b")]),
        ]);
        TableDocument::new(Table::new(vec![row]), TableOptions::default())
    }

    #[test]
    fn test_remove_shifts_siblings() {
        let mut d = doc();
        let removed = d.remove_node_at(CellPath::new(0, 0)).unwrap();
        assert_eq!(removed.text_content(), "a");
        assert_eq!(d.table().rows[0].cells[0].text_content(), "b");
    }

    #[test]
    fn test_insert_rejects_gap() {
        let mut d = doc();
        let cell = d.empty_cell_template(EmptyCellOptions::default());
        let err = d
            .insert_node_at(cell, CellPath::new(0, 3), InsertOptions::default())
            .unwrap_err();
        assert!(matches!(err, TableError::StructuralInconsistency { .. }));

        let cell = d.empty_cell_template(EmptyCellOptions::default());
        d.insert_node_at(cell, CellPath::new(0, 2), InsertOptions { select: true })
            .unwrap();
        assert_eq!(d.table().rows[0].cells.len(), 3);
        assert_eq!(d.selection(), Some(CellPath::new(0, 2)));
    }

    #[test]
    fn test_selection_follows_options() {
        let options = TableOptions {
            select_merged_cell: false,
            ..TableOptions::default()
        };
        let mut d = TableDocument::new(doc().into_table(), options);
        let cell = d.empty_cell_template(EmptyCellOptions::default());
        d.insert_node_at(cell, CellPath::new(0, 0), InsertOptions { select: true })
            .unwrap();
        assert_eq!(d.selection(), None);
    }

    #[test]
    fn test_missing_row_is_structural_error() {
        let mut d = doc();
        assert!(matches!(
            d.remove_node_at(CellPath::new(4, 0)),
            Err(TableError::StructuralInconsistency { .. })
        ));
    }

    #[test]
    fn test_template_defaults_to_blank_paragraph() {
        let d = doc();
        let cell = d.empty_cell_template(EmptyCellOptions {
            header: true,
            children: Some(vec![]),
        });
        assert!(cell.is_header());
        assert_eq!(
            cell.children,
            vec![ContentNode::element("p", vec![ContentNode::text("")])]
        );
    }

    #[test]
    fn test_transaction_rolls_back() {
        let mut d = doc();
        let result: Result<()> = d.transact(|d| {
            d.remove_node_at(CellPath::new(0, 0))?;
            d.remove_node_at(CellPath::new(0, 5))?;
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(d.table().cell_count(), 2);
        assert_eq!(d.table().rows[0].cells[0].text_content(), "a");
    }
}
