//! Workbook type - the main document structure

use crate::cell::CellRange;
use crate::error::{Error, Result};
use crate::table::Table;
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// A workbook (spreadsheet document)
///
/// Owns its worksheets in order. Table ids are unique across the whole
/// workbook, not per sheet.
#[derive(Debug)]
pub struct Workbook {
    /// Worksheets in the workbook
    worksheets: Vec<Worksheet>,
}

impl Workbook {
    /// Create a new workbook with one worksheet named "Sheet1"
    pub fn new() -> Self {
        Self {
            worksheets: vec![Worksheet::new("Sheet1")],
        }
    }

    /// Create an empty workbook with no worksheets
    pub fn empty() -> Self {
        Self {
            worksheets: Vec::new(),
        }
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a mutable worksheet by index
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Get the index of a worksheet by name
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.worksheets.iter().position(|ws| ws.name() == name)
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Add a new worksheet named `Sheet<n>`
    pub fn add_worksheet(&mut self) -> Result<usize> {
        let name = self.generate_sheet_name();
        self.add_worksheet_with_name(&name)
    }

    /// Add a new worksheet with specified name
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.validate_sheet_name(name)?;

        let index = self.worksheets.len();
        self.worksheets.push(Worksheet::new(name));
        Ok(index)
    }

    /// Create a structured table on a sheet
    ///
    /// The table receives the next workbook-wide id and is named after it.
    /// It starts with a blank [`TableStyleInfo`](crate::TableStyleInfo) and
    /// no auto-filter.
    pub fn add_table<I, S>(
        &mut self,
        sheet: usize,
        area: CellRange,
        column_names: I,
    ) -> Result<&mut Table>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let count = self.worksheets.len();
        let id = self.next_table_id();
        let worksheet = self
            .worksheets
            .get_mut(sheet)
            .ok_or(Error::SheetOutOfBounds(sheet, count))?;
        worksheet.add_table(Table::new(id, area, column_names)?)
    }

    /// Total number of tables across all sheets
    pub fn table_count(&self) -> usize {
        self.worksheets.iter().map(|ws| ws.tables().len()).sum()
    }

    fn next_table_id(&self) -> u32 {
        self.worksheets
            .iter()
            .flat_map(|ws| ws.tables())
            .map(Table::id)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Validate a sheet name
    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }

        // Case-insensitive, like Excel
        let name_lower = name.to_lowercase();
        if self
            .worksheets
            .iter()
            .any(|ws| ws.name().to_lowercase() == name_lower)
        {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }

    fn generate_sheet_name(&self) -> String {
        let mut n = self.worksheets.len() + 1;
        loop {
            let name = format!("Sheet{}", n);
            if self.validate_sheet_name(&name).is_ok() {
                return name;
            }
            n += 1;
        }
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_workbook() {
        let wb = Workbook::new();
        assert_eq!(wb.sheet_count(), 1);
        assert_eq!(wb.worksheet(0).unwrap().name(), "Sheet1");
        assert!(Workbook::empty().is_empty());
    }

    #[test]
    fn test_add_worksheets() {
        let mut wb = Workbook::new();

        let idx = wb.add_worksheet().unwrap();
        assert_eq!(idx, 1);
        assert_eq!(wb.worksheet(1).unwrap().name(), "Sheet2");

        let idx = wb.add_worksheet_with_name("Data").unwrap();
        assert_eq!(idx, 2);
        assert_eq!(wb.sheet_index("Data"), Some(2));
    }

    #[test]
    fn test_generated_name_skips_taken_names() {
        let mut wb = Workbook::empty();
        wb.add_worksheet_with_name("Sheet2").unwrap();
        let idx = wb.add_worksheet().unwrap();
        assert_eq!(wb.worksheet(idx).unwrap().name(), "Sheet3");
    }

    #[test]
    fn test_duplicate_name() {
        let mut wb = Workbook::new();
        assert!(matches!(
            wb.add_worksheet_with_name("SHEET1"),
            Err(Error::DuplicateSheetName(_))
        ));
        assert!(wb.add_worksheet_with_name("sheet1").is_err());
    }

    #[test]
    fn test_invalid_sheet_name() {
        let mut wb = Workbook::new();

        assert!(wb.add_worksheet_with_name("").is_err());
        assert!(wb.add_worksheet_with_name("Sheet/1").is_err());
        assert!(wb.add_worksheet_with_name("Sheet:1").is_err());
        assert!(wb.add_worksheet_with_name("Sheet[1]").is_err());

        let long_name = "A".repeat(MAX_SHEET_NAME_LEN + 1);
        assert!(wb.add_worksheet_with_name(&long_name).is_err());
    }

    #[test]
    fn test_table_ids_are_workbook_wide() {
        let mut wb = Workbook::new();
        wb.add_worksheet_with_name("Other").unwrap();

        let area = CellRange::parse("A1:B2").unwrap();
        let first = wb.add_table(0, area, ["a", "b"]).unwrap().id();
        let second = wb.add_table(1, area, ["a", "b"]).unwrap().name().to_string();

        assert_eq!(first, 1);
        assert_eq!(second, "Table2");
        assert_eq!(wb.table_count(), 2);
    }

    #[test]
    fn test_add_table_to_missing_sheet() {
        let mut wb = Workbook::new();
        let area = CellRange::parse("A1:A2").unwrap();
        assert!(matches!(
            wb.add_table(3, area, ["a"]),
            Err(Error::SheetOutOfBounds(3, 1))
        ));
    }
}
