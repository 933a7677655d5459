//! Write workbooks with the XLSX writer and read them back

use std::io::Cursor;

use pretty_assertions::assert_eq;
use sheetcraft_core::style::{Color, HorizontalAlignment, NumberFormat, Style};
use sheetcraft_core::{CellComment, CellRange, CellValue, TableStyleInfo, Workbook};
use sheetcraft_xlsx::{XlsxReader, XlsxWriter};

fn roundtrip(workbook: &Workbook) -> Workbook {
    let mut buf = Vec::new();
    XlsxWriter::write(workbook, Cursor::new(&mut buf)).expect("write workbook");
    XlsxReader::read(Cursor::new(&buf)).expect("read workbook")
}

#[test]
fn test_values_survive() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_cell_value("A1", "Name <&> \"quoted\"").unwrap();
    sheet.set_cell_value("B1", 42.5).unwrap();
    sheet.set_cell_value("C1", true).unwrap();
    sheet.set_cell_value("D1", "  padded  ").unwrap();
    sheet.set_cell_formula_at(0, 4, "SUM(B1, 1)").unwrap();

    let read = roundtrip(&wb);
    let sheet = read.worksheet(0).unwrap();

    assert_eq!(sheet.name(), "Sheet1");
    assert_eq!(
        sheet.get_value("A1").unwrap(),
        CellValue::from("Name <&> \"quoted\"")
    );
    assert_eq!(sheet.get_value("B1").unwrap(), CellValue::Number(42.5));
    assert_eq!(sheet.get_value("C1").unwrap(), CellValue::Boolean(true));
    assert_eq!(sheet.get_value("D1").unwrap(), CellValue::from("  padded  "));
    assert_eq!(
        sheet.get_value("E1").unwrap().formula_text(),
        Some("SUM(B1, 1)")
    );
}

#[test]
fn test_empty_rows_and_blank_cells_are_kept() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_cell_value_at(0, 0, "top").unwrap();
    sheet.create_row(3).unwrap();
    sheet.set_cell_value_at(5, 2, CellValue::Empty).unwrap();

    let read = roundtrip(&wb);
    let sheet = read.worksheet(0).unwrap();

    assert_eq!(sheet.last_row_index(), Some(5));
    assert!(sheet.row(3).is_some());
    assert_eq!(sheet.row(5).unwrap().last_cell_index(), Some(2));
}

#[test]
fn test_column_widths_and_styles() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_column_width(0, 20 * 256).unwrap();
    sheet.set_column_width(1, 0).unwrap();
    sheet.set_column_width(3, 2 * 256 + 128).unwrap();

    let header = Style::new()
        .bold(true)
        .fill_color(Color::TAN)
        .horizontal_alignment(HorizontalAlignment::Center);
    sheet.set_column_style(2, &header).unwrap();
    sheet.set_cell_value_at(0, 0, "Header").unwrap();
    sheet.set_cell_style_at(0, 0, &header).unwrap();

    let read = roundtrip(&wb);
    let sheet = read.worksheet(0).unwrap();

    assert_eq!(sheet.column_width(0), 5120);
    assert_eq!(sheet.column_width(1), 0);
    assert_eq!(sheet.column_width(3), 640);
    assert_eq!(sheet.column_style(2), Some(&header));
    assert_eq!(sheet.cell_style_at(0, 0), Some(&header));
}

#[test]
fn test_date_format_survives() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_cell_value_at(0, 0, 45000.0).unwrap();
    let date = Style::new().with_number_format(NumberFormat::date_short());
    sheet.set_cell_style_at(0, 0, &date).unwrap();

    let read = roundtrip(&wb);
    let style = read.worksheet(0).unwrap().cell_style_at(0, 0).unwrap();
    assert!(style.number_format.is_date_format());
    assert_eq!(style.number_format.builtin_id(), Some(14));
}

#[test]
fn test_tables_on_several_sheets() {
    let mut wb = Workbook::new();
    wb.add_worksheet_with_name("Second").unwrap();
    for sheet in 0..2 {
        let ws = wb.worksheet_mut(sheet).unwrap();
        ws.set_cell_value_at(0, 0, "Item").unwrap();
        ws.set_cell_value_at(0, 1, "Qty").unwrap();
        ws.set_cell_value_at(1, 0, "apple").unwrap();
        ws.set_cell_value_at(1, 1, 3.0).unwrap();
    }
    let area = CellRange::parse("A1:B2").unwrap();
    wb.add_table(0, area, ["Item", "Qty"])
        .unwrap()
        .style = TableStyleInfo::medium9();
    let second = wb.add_table(1, area, ["Item", "Qty"]).unwrap();
    second.style = TableStyleInfo::named("TableStyleLight1").with_row_stripes(true);
    second.auto_filter = Some(area);

    let read = roundtrip(&wb);

    let first = &read.worksheet(0).unwrap().tables()[0];
    assert_eq!(first.id(), 1);
    assert_eq!(first.name(), "Table1");
    assert_eq!(first.style, TableStyleInfo::medium9());
    assert_eq!(first.auto_filter, None);

    let second = &read.worksheet(1).unwrap().tables()[0];
    assert_eq!(second.id(), 2);
    assert_eq!(second.area(), area);
    assert_eq!(second.auto_filter, Some(area));
    assert_eq!(
        second.columns().iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["Item", "Qty"]
    );
    assert!(second.style.show_row_stripes);
    assert!(!second.style.show_column_stripes);
}

#[test]
fn test_comments_with_tables_share_sheet_relationships() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_cell_value_at(0, 0, "a").unwrap();
    sheet.set_cell_value_at(1, 0, "b").unwrap();
    sheet
        .set_comment_at(0, 0, CellComment::new("Reviewer", "Check"))
        .unwrap();
    sheet
        .set_comment_at(4, 3, CellComment::text_only("anonymous"))
        .unwrap();
    wb.add_table(0, CellRange::parse("A1:A2").unwrap(), ["a"])
        .unwrap();

    let read = roundtrip(&wb);
    let sheet = read.worksheet(0).unwrap();

    assert_eq!(sheet.comment_count(), 2);
    assert_eq!(sheet.comment_at(0, 0).unwrap().author, "Reviewer");
    assert_eq!(sheet.comment_at(4, 3).unwrap().text, "anonymous");
    assert_eq!(sheet.comment_at(4, 3).unwrap().author, "");
    assert_eq!(sheet.tables().len(), 1);
}

#[test]
fn test_escape_like_text_and_control_characters_survive() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_cell_value_at(0, 0, "_x0041_").unwrap();
    sheet.set_cell_value_at(0, 1, "a\u{1}b").unwrap();
    sheet.set_cell_value_at(1, 0, "x").unwrap();
    sheet
        .set_comment_at(0, 0, CellComment::new("_x0042_", "bell\u{7}"))
        .unwrap();
    wb.add_table(0, CellRange::parse("A2:A3").unwrap(), ["col_x0043_"])
        .unwrap();

    let mut buf = Vec::new();
    XlsxWriter::write(&wb, Cursor::new(&mut buf)).unwrap();

    let mut archive = zip::ZipArchive::new(Cursor::new(&buf)).unwrap();
    let mut sheet_xml = String::new();
    std::io::Read::read_to_string(
        &mut archive.by_name("xl/worksheets/sheet1.xml").unwrap(),
        &mut sheet_xml,
    )
    .unwrap();
    assert!(!sheet_xml.contains('\u{1}'));
    assert!(sheet_xml.contains("a_x0001_b"));

    let read = XlsxReader::read(Cursor::new(&buf)).unwrap();
    let sheet = read.worksheet(0).unwrap();
    assert_eq!(sheet.get_value("A1").unwrap(), CellValue::from("_x0041_"));
    assert_eq!(sheet.get_value("B1").unwrap(), CellValue::from("a\u{1}b"));
    assert_eq!(sheet.comment_at(0, 0).unwrap().author, "_x0042_");
    assert_eq!(sheet.comment_at(0, 0).unwrap().text, "bell\u{7}");
    assert_eq!(sheet.tables()[0].columns()[0].name, "col_x0043_");
}

#[test]
fn test_write_file_and_read_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xlsx");

    let mut wb = Workbook::new();
    wb.add_worksheet_with_name("Q&A").unwrap();
    wb.worksheet_mut(1)
        .unwrap()
        .set_cell_value("B2", "answer")
        .unwrap();
    XlsxWriter::write_file(&wb, &path).unwrap();

    let read = XlsxReader::read_file(&path).unwrap();
    assert_eq!(read.sheet_count(), 2);
    assert_eq!(read.worksheet(1).unwrap().name(), "Q&A");
    assert_eq!(
        read.worksheet(1).unwrap().get_value("B2").unwrap(),
        CellValue::from("answer")
    );
}
