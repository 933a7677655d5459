//! Rows and their cells

use std::collections::BTreeMap;

use crate::cell::{Cell, CellValue};

/// A row of a worksheet
///
/// Rows exist independently of their cells: a row created without any
/// cells still counts towards [`Worksheet::last_row_index`].
///
/// [`Worksheet::last_row_index`]: crate::Worksheet::last_row_index
#[derive(Debug, Clone, Default)]
pub struct Row {
    /// Row index (0-based)
    index: u32,
    /// Cells keyed by column index
    cells: BTreeMap<u16, Cell>,
    /// Custom height in points (None = default)
    pub height: Option<f64>,
}

impl Row {
    /// Create an empty row
    pub fn new(index: u32) -> Self {
        Self {
            index,
            cells: BTreeMap::new(),
            height: None,
        }
    }

    /// Row index (0-based)
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Index of the right-most cell, or `None` for a row without cells
    pub fn last_cell_index(&self) -> Option<u16> {
        self.cells.keys().next_back().copied()
    }

    /// Create (or reset) the cell at `col`, returning it blank
    pub fn create_cell(&mut self, col: u16) -> &mut Cell {
        let cell = self.cells.entry(col).or_default();
        *cell = Cell::default();
        cell
    }

    /// Get the cell at `col`, creating a blank one if missing
    pub fn cell_entry(&mut self, col: u16) -> &mut Cell {
        self.cells.entry(col).or_default()
    }

    /// Set the value of the cell at `col`, keeping its style
    pub fn set_value(&mut self, col: u16, value: CellValue) {
        self.cell_entry(col).value = value;
    }

    /// Get a cell by column index
    pub fn cell(&self, col: u16) -> Option<&Cell> {
        self.cells.get(&col)
    }

    /// Get a mutable cell by column index
    pub fn cell_mut(&mut self, col: u16) -> Option<&mut Cell> {
        self.cells.get_mut(&col)
    }

    /// Iterate over cells in column order
    pub fn cells(&self) -> impl Iterator<Item = (u16, &Cell)> {
        self.cells.iter().map(|(&col, cell)| (col, cell))
    }

    /// Number of cells in the row
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_row_has_no_last_cell() {
        let row = Row::new(4);
        assert_eq!(row.index(), 4);
        assert_eq!(row.last_cell_index(), None);
        assert!(row.is_empty());
    }

    #[test]
    fn test_last_cell_tracks_rightmost_column() {
        let mut row = Row::new(0);
        row.set_value(3, CellValue::Number(1.0));
        row.set_value(1, CellValue::Number(2.0));
        assert_eq!(row.last_cell_index(), Some(3));
        assert_eq!(row.cell_count(), 2);

        let cols: Vec<u16> = row.cells().map(|(col, _)| col).collect();
        assert_eq!(cols, vec![1, 3]);
    }

    #[test]
    fn test_create_cell_resets_existing_content() {
        let mut row = Row::new(0);
        row.set_value(0, CellValue::from("old"));
        row.cell_mut(0).unwrap().style_index = 3;

        let cell = row.create_cell(0);
        assert!(cell.value.is_empty());
        assert_eq!(cell.style_index, 0);
    }
}
