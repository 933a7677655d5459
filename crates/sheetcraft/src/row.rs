//! Row and cell builders

use log::trace;
use sheetcraft_core::{CellAddress, CellComment, CellValue, Style, Worksheet};

use crate::cursor::RowCursor;
use crate::error::Result;
use crate::options::BuildOptions;
use crate::value::{normalize_with, CellInput};

/// Appends cells to one row, left to right
///
/// Every `cell*` and `formula*` call takes the next free column and returns the
/// new cell's address, ready to use inside a formula.
///
/// ```rust
/// # fn main() -> sheetcraft::Result<()> {
/// let mut bytes = Vec::new();
/// sheetcraft::build(&mut bytes, |wb| {
///     wb.sheet("", |sheet| {
///         sheet.row(|row| {
///             let a = row.cell(1)?;
///             let b = row.cell(2)?;
///             let sum = row.formula(&format!("SUM({a}, {b})"))?;
///             assert_eq!(sum.to_string(), "C1");
///             Ok(())
///         })
///     })
/// })?;
/// # Ok(())
/// # }
/// ```
pub struct RowBuilder<'a> {
    sheet: &'a mut Worksheet,
    row: u32,
    cursor: RowCursor,
    options: &'a BuildOptions,
}

impl<'a> RowBuilder<'a> {
    pub(crate) fn new(sheet: &'a mut Worksheet, row: u32, options: &'a BuildOptions) -> Result<Self> {
        let last_col = sheet.create_row(row)?.last_cell_index();
        trace!("row {} on '{}' (next column {:?})", row, sheet.name(), last_col);
        Ok(Self {
            sheet,
            row,
            cursor: RowCursor::after(last_col),
            options,
        })
    }

    /// Zero-based index of the row
    pub fn index(&self) -> u32 {
        self.row
    }

    /// Add a cell holding `value`
    pub fn cell<V: Into<CellInput>>(&mut self, value: V) -> Result<CellAddress> {
        self.place_value(value.into(), None)
    }

    /// Add a cell and run `block` on it
    pub fn cell_with<V, F>(&mut self, value: V, block: F) -> Result<CellAddress>
    where
        V: Into<CellInput>,
        F: FnOnce(&mut CellBuilder<'_>) -> Result<()>,
    {
        let address = self.place_value(value.into(), None)?;
        self.run_block(address, block)
    }

    /// Add a cell with an explicit style
    ///
    /// The style replaces the date format a temporal value would get.
    pub fn styled_cell<V: Into<CellInput>>(&mut self, value: V, style: &Style) -> Result<CellAddress> {
        self.place_value(value.into(), Some(style))
    }

    /// Add a styled cell and run `block` on it
    pub fn styled_cell_with<V, F>(&mut self, value: V, style: &Style, block: F) -> Result<CellAddress>
    where
        V: Into<CellInput>,
        F: FnOnce(&mut CellBuilder<'_>) -> Result<()>,
    {
        let address = self.place_value(value.into(), Some(style))?;
        self.run_block(address, block)
    }

    /// Add a formula cell; the expression is stored verbatim, without a leading `=`
    pub fn formula(&mut self, expression: &str) -> Result<CellAddress> {
        self.place(CellValue::formula(expression), None)
    }

    /// Add a formula cell and run `block` on it
    pub fn formula_with<F>(&mut self, expression: &str, block: F) -> Result<CellAddress>
    where
        F: FnOnce(&mut CellBuilder<'_>) -> Result<()>,
    {
        let address = self.place(CellValue::formula(expression), None)?;
        self.run_block(address, block)
    }

    fn place_value(&mut self, input: CellInput, style: Option<&Style>) -> Result<CellAddress> {
        let normalized = normalize_with(input, &self.options.date_format);
        let date_style = normalized
            .format
            .map(|format| Style::new().with_number_format(format));
        self.place(normalized.content.into_value(), style.or(date_style.as_ref()))
    }

    fn place(&mut self, value: CellValue, style: Option<&Style>) -> Result<CellAddress> {
        let col = self.cursor.advance()?;
        self.sheet.set_cell_value_at(self.row, col, value)?;
        if let Some(style) = style {
            self.sheet.set_cell_style_at(self.row, col, style)?;
        }
        Ok(CellAddress::new(self.row, col))
    }

    fn run_block<F>(&mut self, address: CellAddress, block: F) -> Result<CellAddress>
    where
        F: FnOnce(&mut CellBuilder<'_>) -> Result<()>,
    {
        block(&mut CellBuilder {
            sheet: &mut *self.sheet,
            address,
        })?;
        Ok(address)
    }
}

/// A freshly created cell, handed to `*_with` blocks
pub struct CellBuilder<'a> {
    sheet: &'a mut Worksheet,
    address: CellAddress,
}

impl CellBuilder<'_> {
    pub fn address(&self) -> CellAddress {
        self.address
    }

    /// Current value of the cell
    pub fn value(&self) -> CellValue {
        self.sheet.get_value_at(self.address.row, self.address.col)
    }

    /// Current style of the cell
    pub fn style(&self) -> Style {
        self.sheet
            .cell_style_at(self.address.row, self.address.col)
            .cloned()
            .unwrap_or_default()
    }

    /// Replace the cell's style
    pub fn set_style(&mut self, style: &Style) -> Result<()> {
        self.sheet
            .set_cell_style_at(self.address.row, self.address.col, style)?;
        Ok(())
    }

    /// Give the cell a fresh style built by `block`
    ///
    /// The block starts from the default style, not the cell's current one.
    pub fn cell_style<F: FnOnce(Style) -> Style>(&mut self, block: F) -> Result<()> {
        self.set_style(&block(Style::new()))
    }

    /// Attach a comment
    pub fn set_comment<A: Into<String>, T: Into<String>>(&mut self, author: A, text: T) -> Result<()> {
        self.sheet.set_comment_at(
            self.address.row,
            self.address.col,
            CellComment::new(author, text),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use sheetcraft_core::{Color, NumberFormat};

    fn sheet() -> Worksheet {
        Worksheet::new("Test")
    }

    #[test]
    fn test_cells_fill_consecutive_columns() {
        let mut ws = sheet();
        let options = BuildOptions::default();
        let mut row = RowBuilder::new(&mut ws, 2, &options).unwrap();

        assert_eq!(row.cell(true).unwrap().to_string(), "A3");
        assert_eq!(row.cell("x").unwrap().to_string(), "B3");
        assert_eq!(row.cell(None::<f64>).unwrap().to_string(), "C3");
        assert_eq!(row.formula("A3").unwrap().to_string(), "D3");

        assert_eq!(ws.get_value_at(2, 0), CellValue::Boolean(true));
        assert_eq!(ws.get_value_at(2, 1), CellValue::from("x"));
        assert!(ws.cell_at(2, 2).is_some());
        assert_eq!(ws.get_value_at(2, 3).formula_text(), Some("A3"));
    }

    #[test]
    fn test_appends_after_existing_cells() {
        let mut ws = sheet();
        ws.set_cell_value_at(0, 3, 1.0).unwrap();
        let options = BuildOptions::default();

        let mut row = RowBuilder::new(&mut ws, 0, &options).unwrap();
        assert_eq!(row.cell(2).unwrap(), CellAddress::new(0, 4));
    }

    #[test]
    fn test_dates_get_the_date_format() {
        let mut ws = sheet();
        let options = BuildOptions::default();
        let mut row = RowBuilder::new(&mut ws, 0, &options).unwrap();
        row.cell(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).unwrap();

        assert_eq!(ws.get_value_at(0, 0), CellValue::Number(45292.0));
        assert_eq!(
            ws.cell_style_at(0, 0).unwrap().number_format,
            NumberFormat::date_short()
        );
    }

    #[test]
    fn test_explicit_style_replaces_date_format() {
        let mut ws = sheet();
        let options = BuildOptions::default();
        let bold = Style::new().bold(true);
        let mut row = RowBuilder::new(&mut ws, 0, &options).unwrap();
        row.styled_cell(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), &bold)
            .unwrap();

        assert_eq!(ws.cell_style_at(0, 0), Some(&bold));
    }

    #[test]
    fn test_cell_block_can_restyle_and_comment() {
        let mut ws = sheet();
        let options = BuildOptions::default();
        let mut row = RowBuilder::new(&mut ws, 0, &options).unwrap();
        let address = row
            .cell_with("Done!", |cell| {
                assert_eq!(cell.value(), CellValue::from("Done!"));
                cell.cell_style(|s| s.fill_color(Color::TAN))?;
                cell.set_comment("Reviewer", "looks good")
            })
            .unwrap();

        assert_eq!(address, CellAddress::new(0, 0));
        assert_eq!(
            ws.cell_style_at(0, 0),
            Some(&Style::new().fill_color(Color::TAN))
        );
        assert_eq!(ws.comment_at(0, 0).unwrap().text, "looks good");
    }

    #[test]
    fn test_block_error_propagates() {
        let mut ws = sheet();
        let options = BuildOptions::default();
        let mut row = RowBuilder::new(&mut ws, 0, &options).unwrap();
        let result = row.formula_with("1+1", |_| {
            Err(crate::BuildError::configuration("stop"))
        });
        assert!(matches!(result, Err(crate::BuildError::Configuration(_))));
    }
}
