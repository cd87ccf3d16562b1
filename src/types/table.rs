use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{CellId, CellPath, TableCell};

/// A table node: rows of cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    #[serde(rename = "type", default = "table_type")]
    pub kind: String,
    #[serde(rename = "children")]
    pub rows: Vec<TableRow>,
    /// Attributes the engine does not interpret (column widths, margins, ...)
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// A row node. Holds structural children only; cells spanning down from
/// rows above have no entry here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(rename = "type", default = "row_type")]
    pub kind: String,
    #[serde(rename = "children")]
    pub cells: Vec<TableCell>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

fn table_type() -> String {
    "table".to_string()
}

fn row_type() -> String {
    "tr".to_string()
}

impl Table {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self {
            kind: table_type(),
            rows,
            attributes: Map::new(),
        }
    }

    pub fn row(&self, index: usize) -> Option<&TableRow> {
        self.rows.get(index)
    }

    pub fn cell(&self, path: CellPath) -> Option<&TableCell> {
        self.rows.get(path.row)?.cells.get(path.cell)
    }

    /// Structural path of the cell with the given id.
    pub fn find_path(&self, id: CellId) -> Option<CellPath> {
        self.cells()
            .find(|(_, cell)| cell.id() == id)
            .map(|(path, _)| path)
    }

    /// Every cell in structural order (row by row, left to right).
    pub fn cells(&self) -> impl Iterator<Item = (CellPath, &TableCell)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.cells
                .iter()
                .enumerate()
                .map(move |(c, cell)| (CellPath::new(r, c), cell))
        })
    }

    /// Number of structural cells in the table.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).sum()
    }
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            kind: row_type(),
            cells,
            attributes: Map::new(),
        }
    }
}
