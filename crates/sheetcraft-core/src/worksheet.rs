//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{Cell, CellAddress, CellRange, CellValue};
use crate::column::Column;
use crate::comment::CellComment;
use crate::error::{Error, Result};
use crate::row::Row;
use crate::style::{Style, StylePool};
use crate::table::Table;
use crate::{DEFAULT_COLUMN_WIDTH_UNITS, MAX_COLS, MAX_COLUMN_WIDTH_UNITS, MAX_ROWS};

/// A worksheet (single sheet in a workbook)
#[derive(Debug)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Rows keyed by index; a row may exist without cells
    rows: BTreeMap<u32, Row>,
    /// Columns with custom settings
    columns: BTreeMap<u16, Column>,
    /// Deduplicated styles referenced by cells and columns
    styles: StylePool,
    /// Cell comments keyed by (row, col)
    comments: BTreeMap<(u32, u16), CellComment>,
    /// Unique comment authors, in first-seen order
    comment_authors: Vec<String>,
    /// Structured tables on this sheet
    tables: Vec<Table>,
}

fn check_col(col: u16) -> Result<()> {
    if col >= MAX_COLS {
        return Err(Error::ColumnOutOfBounds(col as u32, MAX_COLS - 1));
    }
    Ok(())
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            rows: BTreeMap::new(),
            columns: BTreeMap::new(),
            styles: StylePool::new(),
            comments: BTreeMap::new(),
            comment_authors: Vec::new(),
            tables: Vec::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Rows ===

    /// Create the row at `index`, or return it if it already exists
    pub fn create_row(&mut self, index: u32) -> Result<&mut Row> {
        if index >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(index, MAX_ROWS - 1));
        }
        Ok(self.rows.entry(index).or_insert_with(|| Row::new(index)))
    }

    /// Get a row by index
    pub fn row(&self, index: u32) -> Option<&Row> {
        self.rows.get(&index)
    }

    /// Get a mutable row by index
    pub fn row_mut(&mut self, index: u32) -> Option<&mut Row> {
        self.rows.get_mut(&index)
    }

    /// Iterate over rows in index order
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.values()
    }

    /// Number of created rows, empty ones included
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the last created row, or `None` if the sheet has no rows
    pub fn last_row_index(&self) -> Option<u32> {
        self.rows.keys().next_back().copied()
    }

    // === Cells ===

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&Cell>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_at(addr.row, addr.col))
    }

    /// Get a cell by row and column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&Cell> {
        self.rows.get(&row).and_then(|r| r.cell(col))
    }

    /// Get a cell value by address string
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Get a cell value by indices (blank if the cell doesn't exist)
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cell_at(row, col)
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by indices, keeping the cell's style
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        check_col(col)?;
        self.create_row(row)?.set_value(col, value.into());
        Ok(())
    }

    /// Set a formula by indices
    ///
    /// The text is stored as given; no leading `=` is added or stripped.
    pub fn set_cell_formula_at(&mut self, row: u32, col: u16, formula: &str) -> Result<()> {
        self.set_cell_value_at(row, col, CellValue::formula(formula))
    }

    /// Set a cell style by indices
    pub fn set_cell_style_at(&mut self, row: u32, col: u16, style: &Style) -> Result<()> {
        check_col(col)?;
        let style_index = self.styles.get_or_insert(style.clone());
        self.create_row(row)?.cell_entry(col).style_index = style_index;
        Ok(())
    }

    /// Get the style of a cell (the default style for unstyled cells)
    pub fn cell_style_at(&self, row: u32, col: u16) -> Option<&Style> {
        let index = self.cell_at(row, col).map_or(0, |c| c.style_index);
        self.styles.get(index)
    }

    /// Register a style in the sheet's pool, returning its index
    pub fn add_style(&mut self, style: &Style) -> u32 {
        self.styles.get_or_insert(style.clone())
    }

    /// The sheet's style pool
    pub fn styles(&self) -> &StylePool {
        &self.styles
    }

    /// Iterate over all cells: (row, col, cell)
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &Cell)> {
        self.rows
            .values()
            .flat_map(|row| row.cells().map(move |(col, cell)| (row.index(), col, cell)))
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(Row::cell_count).sum()
    }

    /// Check if the sheet has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Smallest area containing every cell, or `None` if there are no cells
    pub fn used_range(&self) -> Option<CellRange> {
        let mut cells = self.iter_cells();
        let (row, col, _) = cells.next()?;
        let (mut min_row, mut min_col, mut max_row, mut max_col) = (row, col, row, col);
        for (row, col, _) in cells {
            min_row = min_row.min(row);
            max_row = max_row.max(row);
            min_col = min_col.min(col);
            max_col = max_col.max(col);
        }
        Some(CellRange::from_indices(min_row, min_col, max_row, max_col))
    }

    // === Columns ===

    /// Column settings, if the column has been customized
    pub fn column(&self, col: u16) -> Option<&Column> {
        self.columns.get(&col)
    }

    /// Iterate over customized columns in index order
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    fn column_entry(&mut self, col: u16) -> Result<&mut Column> {
        check_col(col)?;
        Ok(self.columns.entry(col).or_insert_with(|| Column::new(col)))
    }

    /// Column width in 1/256 of a character
    pub fn column_width(&self, col: u16) -> u32 {
        self.columns
            .get(&col)
            .map_or(DEFAULT_COLUMN_WIDTH_UNITS, Column::width_units)
    }

    /// Set a column width in 1/256 of a character; zero is a valid width
    pub fn set_column_width(&mut self, col: u16, width: u32) -> Result<()> {
        if width > MAX_COLUMN_WIDTH_UNITS {
            return Err(Error::InvalidColumnWidth {
                col,
                width,
                max: MAX_COLUMN_WIDTH_UNITS,
            });
        }
        self.column_entry(col)?.width = Some(width);
        Ok(())
    }

    /// Default style of a column, if one was set
    pub fn column_style(&self, col: u16) -> Option<&Style> {
        self.columns
            .get(&col)
            .and_then(|c| c.style_index)
            .and_then(|idx| self.styles.get(idx))
    }

    /// Set the default style of a column
    pub fn set_column_style(&mut self, col: u16, style: &Style) -> Result<()> {
        let style_index = self.styles.get_or_insert(style.clone());
        self.column_entry(col)?.style_index = Some(style_index);
        Ok(())
    }

    /// Hide or show a column
    pub fn set_column_hidden(&mut self, col: u16, hidden: bool) -> Result<()> {
        self.column_entry(col)?.hidden = hidden;
        Ok(())
    }

    // === Comments ===

    /// Attach a comment to a cell, replacing any existing one
    ///
    /// ```rust
    /// use sheetcraft_core::{CellComment, Worksheet};
    ///
    /// let mut ws = Worksheet::new("Notes");
    /// ws.set_comment_at(0, 0, CellComment::new("Reviewer", "Check this")).unwrap();
    /// assert_eq!(ws.comment_authors(), &["Reviewer"]);
    /// ```
    pub fn set_comment_at(&mut self, row: u32, col: u16, comment: CellComment) -> Result<()> {
        check_col(col)?;
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if !comment.author.is_empty() && !self.comment_authors.contains(&comment.author) {
            self.comment_authors.push(comment.author.clone());
        }
        self.comments.insert((row, col), comment);
        Ok(())
    }

    pub fn comment_at(&self, row: u32, col: u16) -> Option<&CellComment> {
        self.comments.get(&(row, col))
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    /// Iterate over comments in row-major order: ((row, col), comment)
    pub fn comments(&self) -> impl Iterator<Item = ((u32, u16), &CellComment)> {
        self.comments.iter().map(|(&k, v)| (k, v))
    }

    /// Unique comment authors, in first-seen order
    pub fn comment_authors(&self) -> &[String] {
        &self.comment_authors
    }

    // === Tables ===

    /// Add a table, rejecting one that overlaps an existing table
    pub fn add_table(&mut self, table: Table) -> Result<&mut Table> {
        if let Some(other) = self
            .tables
            .iter()
            .find(|t| t.area().overlaps(&table.area()))
        {
            return Err(Error::InvalidTable(format!(
                "{} at {} overlaps {} at {}",
                table.name(),
                table.area(),
                other.name(),
                other.area()
            )));
        }
        let index = self.tables.len();
        self.tables.push(table);
        Ok(&mut self.tables[index])
    }

    /// Tables on this sheet, in creation order
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::style::NumberFormat;

    #[test]
    fn test_new_worksheet() {
        let ws = Worksheet::new("Test");
        assert_eq!(ws.name(), "Test");
        assert!(ws.is_empty());
        assert_eq!(ws.last_row_index(), None);
    }

    #[test]
    fn test_create_row_is_idempotent() {
        let mut ws = Worksheet::new("Test");
        ws.create_row(2).unwrap().set_value(0, CellValue::from("x"));

        let row = ws.create_row(2).unwrap();
        assert_eq!(row.cell_count(), 1);
        assert_eq!(ws.row_count(), 1);
    }

    #[test]
    fn test_empty_rows_count_towards_last_row() {
        let mut ws = Worksheet::new("Test");
        ws.create_row(0).unwrap();
        ws.create_row(4).unwrap();
        assert_eq!(ws.last_row_index(), Some(4));
        assert_eq!(ws.cell_count(), 0);
        assert_eq!(ws.used_range(), None);
    }

    #[test]
    fn test_row_out_of_bounds() {
        let mut ws = Worksheet::new("Test");
        assert!(ws.create_row(MAX_ROWS - 1).is_ok());
        assert!(matches!(
            ws.create_row(MAX_ROWS),
            Err(Error::RowOutOfBounds(_, _))
        ));
        assert!(ws.set_cell_value_at(0, MAX_COLS, 1.0).is_err());
    }

    #[test]
    fn test_set_cell_values() {
        let mut ws = Worksheet::new("Test");

        ws.set_cell_value("A1", "Hello").unwrap();
        ws.set_cell_value("B1", 42.0).unwrap();
        ws.set_cell_value("C1", true).unwrap();

        assert_eq!(ws.get_value("A1").unwrap().as_string(), Some("Hello"));
        assert_eq!(ws.get_value("B1").unwrap().as_number(), Some(42.0));
        assert_eq!(ws.get_value("C1").unwrap().as_bool(), Some(true));
        assert!(ws.get_value("D1").unwrap().is_empty());
    }

    #[test]
    fn test_formula_stored_verbatim() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_formula_at(0, 2, "SUM(A1, B1)").unwrap();
        assert_eq!(ws.get_value_at(0, 2).formula_text(), Some("SUM(A1, B1)"));
    }

    #[test]
    fn test_cell_style_survives_value_change() {
        let mut ws = Worksheet::new("Test");
        let dated = Style::new().with_number_format(NumberFormat::date_short());

        ws.set_cell_style_at(0, 0, &dated).unwrap();
        ws.set_cell_value_at(0, 0, 45000.0).unwrap();

        assert_eq!(ws.cell_style_at(0, 0), Some(&dated));
        assert_eq!(ws.cell_style_at(5, 5), Some(&Style::default()));
    }

    #[test]
    fn test_used_range() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_value_at(5, 3, "A").unwrap();
        ws.set_cell_value_at(10, 7, "B").unwrap();

        let range = ws.used_range().unwrap();
        assert_eq!(range.to_a1_string(), "D6:H11");
    }

    #[test]
    fn test_column_width_and_style() {
        let mut ws = Worksheet::new("Test");
        assert_eq!(ws.column_width(3), DEFAULT_COLUMN_WIDTH_UNITS);

        ws.set_column_width(3, 20 * 256).unwrap();
        ws.set_column_width(4, 0).unwrap();
        assert_eq!(ws.column_width(3), 5120);
        assert_eq!(ws.column_width(4), 0);

        let err = ws.set_column_width(5, MAX_COLUMN_WIDTH_UNITS + 1).unwrap_err();
        assert!(matches!(err, Error::InvalidColumnWidth { col: 5, .. }));

        let bold = Style::new().bold(true);
        ws.set_column_style(1, &bold).unwrap();
        assert_eq!(ws.column_style(1), Some(&bold));
        assert_eq!(ws.column_style(3), None);
        assert_eq!(ws.columns().count(), 3);
    }

    #[test]
    fn test_comments() {
        let mut ws = Worksheet::new("Test");
        ws.set_comment_at(1, 1, CellComment::new("John", "Review this"))
            .unwrap();
        ws.set_comment_at(0, 0, CellComment::new("John", "Another note"))
            .unwrap();
        ws.set_comment_at(2, 2, CellComment::new("Jane", "Mine")).unwrap();

        assert_eq!(ws.comment_count(), 3);
        assert_eq!(ws.comment_authors(), &["John", "Jane"]);
        assert_eq!(ws.comment_at(1, 1).unwrap().text, "Review this");

        let order: Vec<(u32, u16)> = ws.comments().map(|(pos, _)| pos).collect();
        assert_eq!(order, vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_overlapping_tables_rejected() {
        let mut ws = Worksheet::new("Test");
        let first = Table::new(1, CellRange::parse("A1:B3").unwrap(), ["a", "b"]).unwrap();
        let second = Table::new(2, CellRange::parse("B3:C4").unwrap(), ["b", "c"]).unwrap();
        let third = Table::new(3, CellRange::parse("A5:B6").unwrap(), ["a", "b"]).unwrap();

        ws.add_table(first).unwrap();
        assert!(matches!(ws.add_table(second), Err(Error::InvalidTable(_))));
        ws.add_table(third).unwrap();
        assert_eq!(ws.tables().len(), 2);
    }
}
