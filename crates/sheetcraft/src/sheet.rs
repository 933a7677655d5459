//! Sheet builder: row placement, skips and column settings

use log::{debug, trace};
use sheetcraft_core::{
    CellAddress, CellRange, Error, Style, Workbook, Worksheet, COLUMN_WIDTH_UNITS_PER_CHAR, MAX_COLS,
};

use crate::cursor::SkipCursor;
use crate::error::{BuildError, Result};
use crate::options::BuildOptions;
use crate::row::RowBuilder;
use crate::table::TableBuilder;

/// A column given by zero-based index (`2`) or by letters (`"C"`)
pub trait ColumnRef {
    fn column_index(&self) -> Result<u16>;
}

fn check_index(index: u64) -> Result<u16> {
    u16::try_from(index)
        .ok()
        .filter(|&c| c < MAX_COLS)
        .ok_or_else(|| {
            Error::ColumnOutOfBounds(u32::try_from(index).unwrap_or(u32::MAX), MAX_COLS - 1).into()
        })
}

macro_rules! unsigned_column_ref {
    ($($t:ty),*) => {
        $(
            impl ColumnRef for $t {
                fn column_index(&self) -> Result<u16> {
                    check_index(*self as u64)
                }
            }
        )*
    };
}

unsigned_column_ref!(u16, u32, usize);

impl ColumnRef for i32 {
    fn column_index(&self) -> Result<u16> {
        let index = u64::try_from(*self)
            .map_err(|_| BuildError::configuration(format!("negative column index {}", self)))?;
        check_index(index)
    }
}

impl ColumnRef for &str {
    fn column_index(&self) -> Result<u16> {
        Ok(CellAddress::letters_to_column(self)?)
    }
}

impl ColumnRef for String {
    fn column_index(&self) -> Result<u16> {
        self.as_str().column_index()
    }
}

/// Builds the content of one sheet
///
/// Rows are appended after the sheet's last row; [`skip`](Self::skip) leaves
/// blank rows before the next one. Column widths are in characters (the
/// native unit is 1/256 of a character).
pub struct SheetBuilder<'a> {
    workbook: &'a mut Workbook,
    index: usize,
    skip: SkipCursor,
    options: &'a BuildOptions,
}

impl<'a> SheetBuilder<'a> {
    pub(crate) fn new(workbook: &'a mut Workbook, index: usize, options: &'a BuildOptions) -> Self {
        Self {
            workbook,
            index,
            skip: SkipCursor::new(),
            options,
        }
    }

    pub(crate) fn worksheet_mut(&mut self) -> Result<&mut Worksheet> {
        let count = self.workbook.sheet_count();
        Ok(self
            .workbook
            .worksheet_mut(self.index)
            .ok_or(Error::SheetOutOfBounds(self.index, count))?)
    }

    /// The sheet being built
    pub fn worksheet(&self) -> Result<&Worksheet> {
        let count = self.workbook.sheet_count();
        Ok(self
            .workbook
            .worksheet(self.index)
            .ok_or(Error::SheetOutOfBounds(self.index, count))?)
    }

    /// Index of the last row, `None` while the sheet is empty
    pub fn last_row_index(&self) -> Result<Option<u32>> {
        Ok(self.worksheet()?.last_row_index())
    }

    /// Append a row and fill it with `block`
    pub fn row<F>(&mut self, block: F) -> Result<()>
    where
        F: FnOnce(&mut RowBuilder<'_>) -> Result<()>,
    {
        let last = self.last_row_index()?;
        let index = self.skip.next_row(last);
        self.row_at(index, block)
    }

    pub(crate) fn row_at<F>(&mut self, index: u32, block: F) -> Result<()>
    where
        F: FnOnce(&mut RowBuilder<'_>) -> Result<()>,
    {
        let options = self.options;
        let mut row = RowBuilder::new(self.worksheet_mut()?, index, options)?;
        block(&mut row)
    }

    /// Leave `n` blank rows before the next row (applies to that row only)
    pub fn skip(&mut self, n: u32) {
        trace!("skip {} row(s)", n);
        self.skip.skip(n);
    }

    /// Leave one blank row before the next row
    pub fn skip_one(&mut self) {
        self.skip(1);
    }

    /// Width of a column in characters
    pub fn column_width<C: ColumnRef>(&self, col: C) -> Result<f64> {
        let col = col.column_index()?;
        let units = self.worksheet()?.column_width(col);
        Ok(f64::from(units) / f64::from(COLUMN_WIDTH_UNITS_PER_CHAR))
    }

    /// Set the width of a column in characters
    ///
    /// Zero is a valid width. Negative or non-finite widths are rejected;
    /// widths above 255 characters fail in the engine.
    pub fn set_column_width<C: ColumnRef>(&mut self, col: C, width: f64) -> Result<()> {
        let col = col.column_index()?;
        if !width.is_finite() || width < 0.0 {
            return Err(BuildError::configuration(format!(
                "column width {} for column {}",
                width,
                CellAddress::column_to_letters(col)
            )));
        }
        // Partial units are dropped; huge widths saturate and the engine rejects them
        let units = (width * f64::from(COLUMN_WIDTH_UNITS_PER_CHAR)).trunc() as u32;
        self.worksheet_mut()?.set_column_width(col, units)?;
        Ok(())
    }

    /// Set the widths of columns 0, 1, 2, ...; a negative width leaves that column as it is
    pub fn column_widths<I>(&mut self, widths: I) -> Result<()>
    where
        I: IntoIterator<Item = f64>,
    {
        for (col, width) in (0u32..).zip(widths) {
            if width >= 0.0 {
                self.set_column_width(col, width)?;
            }
        }
        Ok(())
    }

    /// Set the default style of a column, built by `block` from the default style
    pub fn column_style<C, F>(&mut self, col: C, block: F) -> Result<()>
    where
        C: ColumnRef,
        F: FnOnce(Style) -> Style,
    {
        let col = col.column_index()?;
        let style = block(Style::new());
        self.worksheet_mut()?.set_column_style(col, &style)?;
        Ok(())
    }

    /// Emit a structured table: a header row of `column_names`, then the rows
    /// added by `block`
    ///
    /// The table covers the header row through the last body row and columns
    /// `0..column_names.len()`. A body without rows gets one empty row. The
    /// table style is the one set through [`TableBuilder::style`], or else
    /// [`BuildOptions::table_style`]; the auto-filter covers the whole table.
    pub fn table<I, S, F>(&mut self, column_names: I, block: F) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnOnce(&mut TableBuilder<'_, 'a>) -> Result<()>,
    {
        let names: Vec<String> = column_names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(BuildError::configuration(
                "a table needs at least one column name",
            ));
        }
        let last_col = u16::try_from(names.len() - 1)
            .ok()
            .filter(|&c| c < MAX_COLS)
            .ok_or_else(|| {
                BuildError::configuration(format!("{} table columns is too many", names.len()))
            })?;

        self.row(|header| {
            for name in &names {
                header.cell(name.as_str())?;
            }
            Ok(())
        })?;
        let top = self.require_last_row()?;

        let mut body = TableBuilder::new(self);
        block(&mut body)?;
        let style = body.into_style();

        if self.last_row_index()? == Some(top) {
            self.row_at(top + 1, |_| Ok(()))?;
        }
        let bottom = self.require_last_row()?;

        let area = CellRange::from_indices(top, 0, bottom, last_col);
        let style = style.unwrap_or_else(|| self.options.table_style.clone());
        let table = self.workbook.add_table(self.index, area, names)?;
        table.style = style;
        table.auto_filter = Some(area);
        debug!("table {} over {}", table.name(), area);
        Ok(())
    }

    fn require_last_row(&self) -> Result<u32> {
        self.last_row_index()?
            .ok_or_else(|| BuildError::configuration("table header row was not created"))
    }
}
