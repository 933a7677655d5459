//! Body builder for structured tables

use sheetcraft_core::TableStyleInfo;

use crate::error::Result;
use crate::row::RowBuilder;
use crate::sheet::SheetBuilder;

/// Adds body rows to a table opened by [`SheetBuilder::table`]
///
/// Body rows always go directly below the previous row; there is no skipping
/// inside a table.
pub struct TableBuilder<'s, 'a> {
    sheet: &'s mut SheetBuilder<'a>,
    style: Option<TableStyleInfo>,
}

impl<'s, 'a> TableBuilder<'s, 'a> {
    pub(crate) fn new(sheet: &'s mut SheetBuilder<'a>) -> Self {
        Self { sheet, style: None }
    }

    /// Append a body row
    pub fn row<F>(&mut self, block: F) -> Result<()>
    where
        F: FnOnce(&mut RowBuilder<'_>) -> Result<()>,
    {
        let next = self.sheet.last_row_index()?.map_or(0, |last| last + 1);
        self.sheet.row_at(next, block)
    }

    /// Style the table with `block`, replacing the default style entirely
    ///
    /// The block starts from a blank style (no name, every flag off). Calling
    /// this again replaces the earlier result.
    pub fn style<F>(&mut self, block: F)
    where
        F: FnOnce(TableStyleInfo) -> TableStyleInfo,
    {
        self.style = Some(block(TableStyleInfo::default()));
    }

    pub(crate) fn into_style(self) -> Option<TableStyleInfo> {
        self.style
    }
}

#[cfg(test)]
mod tests {
    use crate::options::BuildOptions;
    use crate::sheet::SheetBuilder;
    use crate::BuildError;
    use pretty_assertions::assert_eq;
    use sheetcraft_core::{CellRange, CellValue, TableStyleInfo, Workbook};

    fn build_sheet<F>(f: F) -> Workbook
    where
        F: FnOnce(&mut SheetBuilder<'_>) -> crate::Result<()>,
    {
        let mut workbook = Workbook::new();
        let options = BuildOptions::default();
        f(&mut SheetBuilder::new(&mut workbook, 0, &options)).unwrap();
        workbook
    }

    #[test]
    fn test_empty_body_gets_one_row() {
        let wb = build_sheet(|sheet| sheet.table(["A", "B"], |_| Ok(())));
        let ws = wb.worksheet(0).unwrap();

        assert_eq!(ws.row_count(), 2);
        assert_eq!(ws.get_value_at(0, 0), CellValue::from("A"));
        assert_eq!(ws.get_value_at(0, 1), CellValue::from("B"));
        assert!(ws.row(1).unwrap().is_empty());

        let table = &ws.tables()[0];
        assert_eq!(table.area(), CellRange::parse("A1:B2").unwrap());
    }

    #[test]
    fn test_body_rows_and_default_style() {
        let wb = build_sheet(|sheet| {
            sheet.table(["Q1", "Q2", "Q3"], |table| {
                table.row(|row| {
                    row.cell(1)?;
                    row.cell(2)?;
                    Ok(())
                })?;
                table.row(|row| {
                    row.cell(3)?;
                    row.cell(4)?;
                    Ok(())
                })
            })
        });
        let table = &wb.worksheet(0).unwrap().tables()[0];

        assert_eq!(table.area().to_a1_string(), "A1:C3");
        assert_eq!(table.auto_filter, Some(table.area()));
        assert_eq!(table.style, TableStyleInfo::medium9());
        assert_eq!(
            table.columns().iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_style_block_replaces_default() {
        let wb = build_sheet(|sheet| {
            sheet.table(vec!["No".to_string(), "Name".to_string()], |table| {
                table.style(|s| s.with_name("TableStyleLight13").with_row_stripes(true));
                table.row(|row| row.cell(1).map(|_| ()))
            })
        });
        let table = &wb.worksheet(0).unwrap().tables()[0];

        assert_eq!(
            table.style,
            TableStyleInfo::named("TableStyleLight13").with_row_stripes(true)
        );
        assert!(!table.style.show_column_stripes);
    }

    #[test]
    fn test_table_after_skip_and_existing_rows() {
        let wb = build_sheet(|sheet| {
            sheet.row(|row| row.cell("title").map(|_| ()))?;
            sheet.skip(2);
            sheet.table(["X"], |table| {
                table.row(|row| row.cell(1).map(|_| ()))?;
                table.row(|row| row.cell(2).map(|_| ()))
            })?;
            sheet.row(|row| row.cell("after").map(|_| ()))
        });
        let ws = wb.worksheet(0).unwrap();

        assert_eq!(ws.tables()[0].area().to_a1_string(), "A4:A6");
        assert_eq!(ws.get_value_at(6, 0), CellValue::from("after"));
    }

    #[test]
    fn test_table_ids_span_sheets() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet_with_name("Other").unwrap();
        let options = BuildOptions::default();
        for index in 0..2 {
            SheetBuilder::new(&mut workbook, index, &options)
                .table(["a"], |_| Ok(()))
                .unwrap();
        }
        assert_eq!(workbook.worksheet(1).unwrap().tables()[0].name(), "Table2");
    }

    #[test]
    fn test_empty_column_list_is_a_configuration_error() {
        let mut workbook = Workbook::new();
        let options = BuildOptions::default();
        let result = SheetBuilder::new(&mut workbook, 0, &options)
            .table(Vec::<String>::new(), |_| Ok(()));

        assert!(matches!(result, Err(BuildError::Configuration(_))));
        assert_eq!(workbook.worksheet(0).unwrap().row_count(), 0);
    }

    #[test]
    fn test_repeated_column_names_are_an_engine_error() {
        let mut workbook = Workbook::new();
        let options = BuildOptions::default();
        let result = SheetBuilder::new(&mut workbook, 0, &options)
            .table(["A", "a"], |_| Ok(()));

        assert!(matches!(
            result,
            Err(BuildError::Engine(sheetcraft_core::Error::InvalidTable(_)))
        ));
        assert!(workbook.worksheet(0).unwrap().tables().is_empty());
    }
}
