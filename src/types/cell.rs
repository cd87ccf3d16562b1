use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};

use super::ContentNode;

static NEXT_CELL_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque cell identity.
///
/// Assigned when a cell is constructed or deserialized and never serialized.
/// Paths shift on every structural edit; the id does not, which is what the
/// index cache keys on. Clones share the id of the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId(u64);

impl CellId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        Self(NEXT_CELL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Header (`th`) or body (`td`) cell
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellKind {
    #[serde(rename = "th", alias = "table_header_cell")]
    Header,
    #[default]
    #[serde(rename = "td", alias = "table_cell")]
    Body,
}

/// A table cell: content plus its row/column span.
///
/// Spans are always >= 1; a missing, null or zero span in the source JSON
/// reads as 1. Spans are clamped to [`MAX_COL_SPAN`] and [`MAX_ROW_SPAN`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    #[serde(skip, default = "CellId::next")]
    id: CellId,
    #[serde(rename = "type", default)]
    pub kind: CellKind,
    #[serde(default)]
    pub children: Vec<ContentNode>,
    #[serde(
        default = "unit_span",
        deserialize_with = "deserialize_col_span",
        skip_serializing_if = "is_unit_span"
    )]
    col_span: usize,
    #[serde(
        default = "unit_span",
        deserialize_with = "deserialize_row_span",
        skip_serializing_if = "is_unit_span"
    )]
    row_span: usize,
    /// Attributes the engine does not interpret (background, borders, ...)
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

fn unit_span() -> usize {
    1
}

fn is_unit_span(span: &usize) -> bool {
    *span == 1
}

/// Largest `colSpan` a cell may carry (the HTML table limit).
pub const MAX_COL_SPAN: usize = 1000;

/// Largest `rowSpan` a cell may carry (the HTML table limit).
pub const MAX_ROW_SPAN: usize = 65534;

/// Read a span as `u64` so values past `usize` on 32-bit targets clamp
/// instead of failing.
fn read_span<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?
        .map(|span| usize::try_from(span).unwrap_or(usize::MAX)))
}

fn deserialize_col_span<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(normalize_span(read_span(deserializer)?, MAX_COL_SPAN))
}

fn deserialize_row_span<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(normalize_span(read_span(deserializer)?, MAX_ROW_SPAN))
}

/// Treat absent and zero spans as 1 and clamp to `max`.
pub fn normalize_span(span: Option<usize>, max: usize) -> usize {
    span.filter(|&s| s > 0).unwrap_or(1).min(max)
}

impl TableCell {
    /// Create a 1x1 cell.
    pub fn new(kind: CellKind, children: Vec<ContentNode>) -> Self {
        Self {
            id: CellId::next(),
            kind,
            children,
            col_span: 1,
            row_span: 1,
            attributes: Map::new(),
        }
    }

    /// Builder form of [`TableCell::set_spans`].
    #[must_use]
    pub fn with_spans(mut self, col_span: usize, row_span: usize) -> Self {
        self.set_spans(col_span, row_span);
        self
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn col_span(&self) -> usize {
        self.col_span
    }

    pub fn row_span(&self) -> usize {
        self.row_span
    }

    pub fn set_spans(&mut self, col_span: usize, row_span: usize) {
        self.col_span = normalize_span(Some(col_span), MAX_COL_SPAN);
        self.row_span = normalize_span(Some(row_span), MAX_ROW_SPAN);
    }

    pub fn is_header(&self) -> bool {
        self.kind == CellKind::Header
    }

    /// Concatenated text of all leaves in the cell.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }
}
