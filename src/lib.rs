//! tablespan - grid consistency for rich-document tables
//!
//! Tables in a tree-shaped document are rows of cells, and cells may span
//! several rows and columns. This crate:
//! - resolves the logical (row, col) of every cell given arbitrary spans
//! - merges a rectangular selection into one spanning cell
//! - splits a spanning cell back into unit cells
//!
//! while keeping child paths gap-free after every edit.
//!
//! # Usage (Rust)
//!
//! ```rust
//! use tablespan::{CellPath, TableSession, TableOptions};
//!
//! let table = serde_json::from_str(r#"{"type": "table", "children": [
//!     {"type": "tr", "children": [
//!         {"type": "td", "children": [{"type": "p", "children": [{"text": "a"}]}]},
//!         {"type": "td", "children": [{"type": "p", "children": [{"text": "b"}]}]}
//!     ]}
//! ]}"#).unwrap();
//!
//! let mut session = TableSession::new(table, TableOptions::default());
//! let at = session.merge(&[CellPath::new(0, 0), CellPath::new(0, 1)]).unwrap();
//! assert_eq!(session.table().cell(at).unwrap().col_span(), 2);
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { mergeCells } from 'tablespan';
//! await init();
//! const { table, path } = JSON.parse(mergeCells(JSON.stringify(node), JSON.stringify([[0, 0], [0, 1]])));
//! ```

pub mod editor;
pub mod error;
pub mod grid;
pub mod indices;
pub mod selection;
pub mod session;
pub mod types;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

pub use editor::{merge_cells, split_cell, TableDocument, TableHost};
pub use error::{Result, TableError};
pub use grid::TableGrid;
pub use indices::{compute_all_cell_indices, compute_cell_indices, CellIndexCache};
pub use session::TableSession;
pub use types::*;

/// Result of a merge through the JSON interface
#[derive(Debug, Serialize, Deserialize)]
pub struct MergeOutput {
    pub table: Table,
    pub path: CellPath,
}

/// Result of a split through the JSON interface
#[derive(Debug, Serialize, Deserialize)]
pub struct SplitOutput {
    pub table: Table,
    pub paths: Vec<CellPath>,
}

fn session_from_json(table_json: &str, options_json: Option<&str>) -> Result<TableSession> {
    let table: Table = serde_json::from_str(table_json)?;
    let options = match options_json {
        Some(json) => serde_json::from_str(json)?,
        None => TableOptions::default(),
    };
    Ok(TableSession::new(table, options))
}

/// Resolve every cell of a JSON table; the result mirrors the row structure.
pub fn cell_indices_json(table_json: &str) -> Result<String> {
    let mut session = session_from_json(table_json, None)?;
    Ok(serde_json::to_string(&session.all_indices())?)
}

/// Merge the cells at `paths_json` (`[[row, cell], ...]`) of a JSON table.
pub fn merge_cells_json(
    table_json: &str,
    paths_json: &str,
    options_json: Option<&str>,
) -> Result<String> {
    let mut session = session_from_json(table_json, options_json)?;
    let paths: Vec<CellPath> = serde_json::from_str(paths_json)?;
    let path = session.merge(&paths)?;
    Ok(serde_json::to_string(&MergeOutput {
        table: session.into_table(),
        path,
    })?)
}

/// Split the cell at `path_json` (`[row, cell]`) of a JSON table.
pub fn split_cell_json(
    table_json: &str,
    path_json: &str,
    options_json: Option<&str>,
) -> Result<String> {
    let mut session = session_from_json(table_json, options_json)?;
    let path: CellPath = serde_json::from_str(path_json)?;
    let paths = session.split(path)?;
    Ok(serde_json::to_string(&SplitOutput {
        table: session.into_table(),
        paths,
    })?)
}

/// Install the panic hook so Rust panics show up in the browser console.
#[wasm_bindgen(js_name = initPanicHook)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Compute logical `{row, col}` indices for every cell of a JSON table.
///
/// # Errors
/// Returns an error if the table JSON is invalid.
#[wasm_bindgen(js_name = computeCellIndices)]
pub fn compute_cell_indices_js(table_json: &str) -> std::result::Result<String, JsValue> {
    cell_indices_json(table_json).map_err(JsValue::from)
}

/// Merge a rectangular selection of a JSON table into one cell.
///
/// Returns `{"table": ..., "path": [row, cell]}`.
///
/// # Errors
/// Returns an error if the JSON is invalid, the selection is not a
/// rectangle, or the edit fails (the input table is then unchanged).
#[wasm_bindgen(js_name = mergeCells)]
pub fn merge_cells_js(
    table_json: &str,
    paths_json: &str,
    options_json: Option<String>,
) -> std::result::Result<String, JsValue> {
    merge_cells_json(table_json, paths_json, options_json.as_deref())
        .map_err(JsValue::from)
}

/// Split a spanning cell of a JSON table into unit cells.
///
/// Returns `{"table": ..., "paths": [[row, cell], ...]}`.
///
/// # Errors
/// Returns an error if the JSON is invalid or the edit fails.
#[wasm_bindgen(js_name = splitCell)]
pub fn split_cell_js(
    table_json: &str,
    path_json: &str,
    options_json: Option<String>,
) -> std::result::Result<String, JsValue> {
    split_cell_json(table_json, path_json, options_json.as_deref())
        .map_err(JsValue::from)
}

/// Merge cells of a table passed as a JS object, returning a JS object.
///
/// More efficient than `mergeCells` when the table already lives in
/// JavaScript.
///
/// # Errors
/// Returns an error if the values do not describe a table and paths, or the
/// merge fails.
#[wasm_bindgen(js_name = mergeCellsValue)]
pub fn merge_cells_value(table: JsValue, paths: JsValue) -> std::result::Result<JsValue, JsValue> {
    let table: Table = serde_wasm_bindgen::from_value(table)?;
    let paths: Vec<CellPath> = serde_wasm_bindgen::from_value(paths)?;
    let mut session = TableSession::new(table, TableOptions::default());
    let path = session
        .merge(&paths)
        .map_err(JsValue::from)?;
    // Flattened attributes serialize as maps; emit plain objects for them.
    let output = MergeOutput {
        table: session.into_table(),
        path,
    };
    output
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
