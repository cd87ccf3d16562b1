use serde::{Deserialize, Serialize};

/// Host-facing configuration for table edits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableOptions {
    /// Element type used for the paragraph of an empty cell
    pub paragraph_type: String,
    /// Whether a merge moves the host selection onto the merged cell
    pub select_merged_cell: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            paragraph_type: "p".to_string(),
            select_merged_cell: true,
        }
    }
}
