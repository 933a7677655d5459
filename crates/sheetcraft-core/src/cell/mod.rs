//! Cell-related types
//!
//! This module contains:
//! - [`CellValue`] - The content stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A rectangular area (e.g., "A1:B10")
//! - [`Cell`] - A cell's value together with its style reference

mod address;
mod value;

pub use address::{CellAddress, CellRange};
pub use value::CellValue;

/// A single cell: its content plus an index into the sheet's style pool
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    /// Cell content
    pub value: CellValue,
    /// Style pool index (0 = default style)
    pub style_index: u32,
}

impl Cell {
    /// Create a cell holding a value with the default style
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            style_index: 0,
        }
    }
}
