//! Structured error types for tablespan.
//!
//! Index lookups never fail with an error (they return `Option`); everything
//! here comes from structural edits, selections, or host JSON.

use crate::types::CellPath;

/// All errors that can occur while editing a table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A selected cell is not part of the table (stale entry).
    #[error("Cell not found in table at {0}")]
    NotFound(CellPath),

    /// Selection is empty or not a solid rectangle.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// A tree edit targeted a path that does not exist or holds another cell.
    #[error("Structural inconsistency at {path}: {reason}")]
    StructuralInconsistency { path: CellPath, reason: String },

    /// Host JSON could not be decoded or encoded.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for string errors from the host boundary.
    #[error("{0}")]
    Other(String),
}

impl TableError {
    pub(crate) fn structural(path: CellPath, reason: impl Into<String>) -> Self {
        Self::StructuralInconsistency {
            path,
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors cross into JavaScript as their display string.
impl From<TableError> for wasm_bindgen::JsValue {
    fn from(e: TableError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
