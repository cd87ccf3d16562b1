//! Test fixtures for building tables in memory.
//!
//! # Example
//!
//! ```rust,ignore
//! use fixtures::{td, TableBuilder};
//!
//! // | A (2x2) | b |
//! // |         | d |
//! let table = TableBuilder::new()
//!     .row(vec![td("A").span(2, 2), td("b")])
//!     .row(vec![td("d")])
//!     .build();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use tablespan::{CellKind, ContentNode, Table, TableCell, TableRow};

// ============================================================================
// Cell Builders
// ============================================================================

/// Extension for setting spans inline in fixtures.
pub trait Spanned {
    fn span(self, col_span: usize, row_span: usize) -> TableCell;
}

impl Spanned for TableCell {
    fn span(self, col_span: usize, row_span: usize) -> TableCell {
        self.with_spans(col_span, row_span)
    }
}

/// Body cell holding one paragraph of text.
pub fn td(text: &str) -> TableCell {
    TableCell::new(CellKind::Body, vec![paragraph(text)])
}

/// Header cell holding one paragraph of text.
pub fn th(text: &str) -> TableCell {
    TableCell::new(CellKind::Header, vec![paragraph(text)])
}

/// Body cell holding only an image (no text).
pub fn image_td(url: &str) -> TableCell {
    let mut image = ContentNode::element("img", vec![ContentNode::text("")]);
    if let ContentNode::Element(element) = &mut image {
        element
            .attributes
            .insert("url".to_string(), serde_json::Value::from(url));
    }
    TableCell::new(CellKind::Body, vec![image])
}

/// Body cell with an empty paragraph.
pub fn empty_td() -> TableCell {
    td("")
}

pub fn paragraph(text: &str) -> ContentNode {
    ContentNode::element("p", vec![ContentNode::text(text)])
}

// ============================================================================
// Table Builder
// ============================================================================

/// Builder for tables, one row at a time.
#[derive(Debug, Default)]
pub struct TableBuilder {
    rows: Vec<Vec<TableCell>>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(mut self, cells: Vec<TableCell>) -> Self {
        self.rows.push(cells);
        self
    }

    pub fn build(self) -> Table {
        Table::new(self.rows.into_iter().map(TableRow::new).collect())
    }
}

/// `rows x cols` unit cells with text `r{row}c{col}`.
pub fn unit_grid(rows: usize, cols: usize) -> Table {
    let mut builder = TableBuilder::new();
    for r in 0..rows {
        builder = builder.row((0..cols).map(|c| td(&format!("r{r}c{c}"))).collect());
    }
    builder.build()
}
