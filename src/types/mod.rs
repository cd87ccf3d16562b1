//! Document model for tables: table, row, cell and cell content.

mod cell;
mod content;
mod options;
mod path;
mod table;

pub use cell::*;
pub use content::*;
pub use options::*;
pub use path::*;
pub use table::*;
