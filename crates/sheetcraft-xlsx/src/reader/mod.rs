//! XLSX reader

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use zip::ZipArchive;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::read_styles_xml;
use crate::xml::{attr_value, bool_attr, decode_excel_escapes, resolve_target};
use sheetcraft_core::style::Style;
use sheetcraft_core::{
    CellAddress, CellComment, CellRange, CellValue, Table, TableStyleInfo, Workbook, Worksheet,
    COLUMN_WIDTH_UNITS_PER_CHAR,
};

/// A relationship entry from a `.rels` part, with its target resolved
#[derive(Debug, Clone)]
struct Relationship {
    id: String,
    rel_type: String,
    target: String,
}

impl Relationship {
    fn is(&self, kind: &str) -> bool {
        self.rel_type.rsplit('/').next() == Some(kind)
    }
}

/// Raw state of the `<c>` element being read
#[derive(Debug, Default)]
struct PendingCell {
    reference: Option<String>,
    cell_type: Option<String>,
    style: Option<u32>,
    value: Option<String>,
    formula: Option<String>,
}

/// Text-bearing child element currently open inside a cell
#[derive(Debug, Clone, Copy, PartialEq)]
enum CellText {
    None,
    Value,
    Formula,
    Inline,
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let file = File::open(path)?;
        Self::read(file)
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let cell_styles = match archive.by_name("xl/styles.xml") {
            Ok(file) => read_styles_xml(file)?,
            Err(_) => vec![Style::default()],
        };

        let sheet_info = Self::read_workbook_xml(&mut archive)?;
        let workbook_rels: HashMap<String, Relationship> =
            Self::read_relationships(&mut archive, "xl/_rels/workbook.xml.rels")?
                .ok_or_else(|| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?
                .into_iter()
                .filter(|rel| rel.is("worksheet"))
                .map(|rel| (rel.id.clone(), rel))
                .collect();

        let mut workbook = Workbook::empty();

        for (name, r_id) in &sheet_info {
            let Some(rel) = workbook_rels.get(r_id) else {
                warn!("sheet '{}' has no worksheet relationship {}", name, r_id);
                continue;
            };
            let sheet_idx = workbook.add_worksheet_with_name(name)?;
            let worksheet = workbook
                .worksheet_mut(sheet_idx)
                .ok_or_else(|| XlsxError::InvalidFormat(format!("sheet '{}' vanished", name)))?;

            Self::read_worksheet(
                &mut archive,
                &rel.target,
                worksheet,
                &shared_strings,
                &cell_styles,
            )?;
            Self::read_worksheet_parts(&mut archive, &rel.target, worksheet)?;
        }

        // Ensure at least one sheet exists
        if workbook.is_empty() {
            workbook.add_worksheet()?;
        }

        debug!(
            "read workbook: {} sheet(s), {} table(s)",
            workbook.sheet_count(),
            workbook.table_count()
        );
        Ok(workbook)
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"t" if in_si => in_t = true,
                    _ => {}
                },
                Event::End(e) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current_string));
                        in_si = false;
                    }
                    b"t" => in_t = false,
                    _ => {}
                },
                Event::Text(e) if in_t => current_string.push_str(&e.unescape()?),
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Read workbook.xml to get sheet names and rIds
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut ZipArchive<R>,
    ) -> XlsxResult<Vec<(String, String)>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e) if e.name().as_ref() == b"sheet" => {
                    if let (Some(name), Some(r_id)) =
                        (attr_value(&e, b"name"), attr_value(&e, b"r:id"))
                    {
                        sheets.push((name, r_id));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read a `.rels` part; `None` if the part doesn't exist
    ///
    /// Targets are resolved against the directory of the part the
    /// relationships belong to.
    fn read_relationships<R: Read + Seek>(
        archive: &mut ZipArchive<R>,
        rels_path: &str,
    ) -> XlsxResult<Option<Vec<Relationship>>> {
        let file = match archive.by_name(rels_path) {
            Ok(f) => f,
            Err(_) => return Ok(None),
        };

        // "xl/worksheets/_rels/sheet1.xml.rels" belongs to "xl/worksheets/sheet1.xml"
        let base_dir = rels_path
            .rsplit_once("/_rels/")
            .map_or("", |(dir, _)| dir)
            .to_string();

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e) if e.name().as_ref() == b"Relationship" => {
                    if let (Some(id), Some(target), Some(rel_type)) = (
                        attr_value(&e, b"Id"),
                        attr_value(&e, b"Target"),
                        attr_value(&e, b"Type"),
                    ) {
                        rels.push(Relationship {
                            id,
                            rel_type,
                            target: resolve_target(&base_dir, &target),
                        });
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(Some(rels))
    }

    /// Read a worksheet from the archive
    fn read_worksheet<R: Read + Seek>(
        archive: &mut ZipArchive<R>,
        path: &str,
        worksheet: &mut Worksheet,
        shared_strings: &[String],
        cell_styles: &[Style],
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut cell: Option<PendingCell> = None;
        let mut text = CellText::None;
        let mut in_inline_str = false;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().as_ref() {
                    b"row" => Self::read_row_attrs(&e, worksheet)?,
                    b"col" => Self::read_col_attrs(&e, worksheet, cell_styles)?,
                    b"c" => cell = Some(Self::start_cell(&e)),
                    b"v" if cell.is_some() => text = CellText::Value,
                    b"f" if cell.is_some() => text = CellText::Formula,
                    b"is" if cell.is_some() => in_inline_str = true,
                    b"t" if in_inline_str => text = CellText::Inline,
                    _ => {}
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"row" => Self::read_row_attrs(&e, worksheet)?,
                    b"col" => Self::read_col_attrs(&e, worksheet, cell_styles)?,
                    b"c" => Self::process_cell(
                        worksheet,
                        Self::start_cell(&e),
                        shared_strings,
                        cell_styles,
                    )?,
                    _ => {}
                },
                Event::Text(e) => {
                    let slot = cell.as_mut().and_then(|pending| match text {
                        CellText::Value | CellText::Inline => Some(&mut pending.value),
                        CellText::Formula => Some(&mut pending.formula),
                        CellText::None => None,
                    });
                    if let Some(slot) = slot {
                        slot.get_or_insert_with(String::new)
                            .push_str(&e.unescape()?);
                    }
                }
                Event::End(e) => match e.name().as_ref() {
                    b"c" => {
                        if let Some(pending) = cell.take() {
                            Self::process_cell(worksheet, pending, shared_strings, cell_styles)?;
                        }
                        in_inline_str = false;
                        text = CellText::None;
                    }
                    b"v" | b"f" | b"t" => text = CellText::None,
                    b"is" => in_inline_str = false,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    fn start_cell(e: &BytesStart<'_>) -> PendingCell {
        PendingCell {
            reference: attr_value(e, b"r"),
            cell_type: attr_value(e, b"t"),
            style: attr_value(e, b"s").and_then(|s| s.parse().ok()),
            value: None,
            formula: None,
        }
    }

    /// Create the row (even when it has no cells) and apply its height
    fn read_row_attrs(e: &BytesStart<'_>, worksheet: &mut Worksheet) -> XlsxResult<()> {
        let Some(r) = attr_value(e, b"r").and_then(|s| s.parse::<u32>().ok()) else {
            warn!("skipping <row> without a valid r attribute");
            return Ok(());
        };
        let row = worksheet.create_row(r.saturating_sub(1))?;
        if bool_attr(e, b"customHeight", false) {
            row.height = attr_value(e, b"ht").and_then(|s| s.parse().ok());
        }
        Ok(())
    }

    /// Apply a `<col min max width style hidden>` span
    fn read_col_attrs(
        e: &BytesStart<'_>,
        worksheet: &mut Worksheet,
        cell_styles: &[Style],
    ) -> XlsxResult<()> {
        let bound = |key: &[u8]| attr_value(e, key).and_then(|s| s.parse::<u16>().ok());
        let (Some(min), Some(max)) = (bound(b"min"), bound(b"max")) else {
            warn!("skipping <col> without min/max");
            return Ok(());
        };

        let width = attr_value(e, b"width")
            .and_then(|s| s.parse::<f64>().ok())
            .map(|w| (w * COLUMN_WIDTH_UNITS_PER_CHAR as f64).round() as u32);
        let style = attr_value(e, b"style")
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|&s| s != 0)
            .and_then(|s| cell_styles.get(s));
        let hidden = bool_attr(e, b"hidden", false);

        // Files often close with a span up to the last column (16384); keep it cheap
        if width.is_none() && style.is_none() && !hidden {
            return Ok(());
        }

        for col in min.saturating_sub(1)..max {
            if let Some(width) = width {
                worksheet.set_column_width(col, width)?;
            }
            if let Some(style) = style {
                worksheet.set_column_style(col, style)?;
            }
            if hidden {
                worksheet.set_column_hidden(col, true)?;
            }
        }
        Ok(())
    }

    /// Store a cell in the worksheet
    ///
    /// Formulas keep their text exactly as written in the file (no leading `=`).
    fn process_cell(
        worksheet: &mut Worksheet,
        cell: PendingCell,
        shared_strings: &[String],
        styles: &[Style],
    ) -> XlsxResult<()> {
        let Some(cell_ref) = cell.reference else {
            warn!("skipping <c> without a reference");
            return Ok(());
        };
        let addr = CellAddress::parse(&cell_ref).map_err(|e| {
            XlsxError::Parse(format!("Invalid cell reference '{}': {}", cell_ref, e))
        })?;

        let cell_type = cell.cell_type.as_deref();
        let literal = cell
            .value
            .as_deref()
            .map(|v| Self::parse_value(v, cell_type, shared_strings))
            .transpose()?;

        let value = match (cell.formula, literal) {
            (Some(text), cached) => CellValue::Formula {
                text,
                cached_value: cached.map(Box::new),
            },
            (None, Some(value)) => value,
            (None, None) => CellValue::Empty,
        };
        worksheet.set_cell_value_at(addr.row, addr.col, value)?;

        if let Some(s) = cell.style.filter(|&s| s != 0) {
            let style = styles
                .get(s as usize)
                .ok_or_else(|| XlsxError::Parse(format!("Style index {} out of bounds", s)))?;
            worksheet.set_cell_style_at(addr.row, addr.col, style)?;
        }

        Ok(())
    }

    fn parse_value(
        value: &str,
        cell_type: Option<&str>,
        shared_strings: &[String],
    ) -> XlsxResult<CellValue> {
        Ok(match cell_type {
            Some("s") => {
                let idx: usize = value.parse().map_err(|_| {
                    XlsxError::Parse(format!("Invalid shared string index: {}", value))
                })?;
                let s = shared_strings.get(idx).ok_or_else(|| {
                    XlsxError::Parse(format!("Shared string index {} out of bounds", idx))
                })?;
                CellValue::String(s.clone())
            }
            Some("b") => CellValue::Boolean(value == "1" || value.eq_ignore_ascii_case("true")),
            Some("inlineStr") | Some("str") => CellValue::String(decode_excel_escapes(value)),
            None | Some("n") => match value.parse::<f64>() {
                Ok(n) => CellValue::Number(n),
                Err(_) => CellValue::String(value.to_string()),
            },
            // Errors and unknown types keep their text
            Some(_) => CellValue::String(value.to_string()),
        })
    }

    /// Read the parts a worksheet links to: comments and tables
    fn read_worksheet_parts<R: Read + Seek>(
        archive: &mut ZipArchive<R>,
        sheet_path: &str,
        worksheet: &mut Worksheet,
    ) -> XlsxResult<()> {
        let (dir, file_name) = sheet_path.rsplit_once('/').unwrap_or(("", sheet_path));
        let rels_path = format!("{}/_rels/{}.rels", dir, file_name);
        let Some(rels) = Self::read_relationships(archive, &rels_path)? else {
            return Ok(());
        };

        for rel in rels {
            if rel.is("comments") {
                Self::read_comments(archive, &rel.target, worksheet)?;
            } else if rel.is("table") {
                Self::read_table(archive, &rel.target, worksheet)?;
            }
        }
        Ok(())
    }

    /// Read comments for a worksheet from the comments XML file
    fn read_comments<R: Read + Seek>(
        archive: &mut ZipArchive<R>,
        path: &str,
        worksheet: &mut Worksheet,
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut authors: Vec<String> = Vec::new();

        let mut in_author = false;
        let mut in_t = false;
        let mut current: Option<(Option<String>, Option<usize>)> = None;
        let mut current_text = String::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().as_ref() {
                    b"author" => {
                        in_author = true;
                        authors.push(String::new());
                    }
                    b"comment" => {
                        current = Some((
                            attr_value(&e, b"ref"),
                            attr_value(&e, b"authorId").and_then(|s| s.parse().ok()),
                        ));
                        current_text.clear();
                    }
                    b"t" if current.is_some() => in_t = true,
                    _ => {}
                },
                Event::Empty(e) if e.name().as_ref() == b"author" => authors.push(String::new()),
                Event::Text(e) => {
                    if in_author {
                        if let Some(author) = authors.last_mut() {
                            author.push_str(&decode_excel_escapes(&e.unescape()?));
                        }
                    } else if in_t {
                        // Rich text runs are concatenated
                        current_text.push_str(&decode_excel_escapes(&e.unescape()?));
                    }
                }
                Event::End(e) => match e.name().as_ref() {
                    b"author" => in_author = false,
                    b"t" => in_t = false,
                    b"comment" => {
                        if let Some((Some(cell_ref), author_id)) = current.take() {
                            match CellAddress::parse(&cell_ref) {
                                Ok(addr) => {
                                    let author = author_id
                                        .and_then(|id| authors.get(id))
                                        .cloned()
                                        .unwrap_or_default();
                                    worksheet.set_comment_at(
                                        addr.row,
                                        addr.col,
                                        CellComment::new(author, current_text.as_str()),
                                    )?;
                                }
                                Err(err) => warn!("skipping comment at '{}': {}", cell_ref, err),
                            }
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// Read a table part and attach it to the worksheet
    fn read_table<R: Read + Seek>(
        archive: &mut ZipArchive<R>,
        path: &str,
        worksheet: &mut Worksheet,
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut header: Option<(u32, String, String, CellRange)> = None;
        let mut auto_filter: Option<CellRange> = None;
        let mut columns: Vec<String> = Vec::new();
        let mut style = TableStyleInfo::default();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                    b"table" => {
                        let id = attr_value(&e, b"id").and_then(|s| s.parse().ok());
                        let area = attr_value(&e, b"ref").and_then(|s| CellRange::parse(&s).ok());
                        if let (Some(id), Some(area)) = (id, area) {
                            let name = attr_value(&e, b"name").unwrap_or_default();
                            let display = attr_value(&e, b"displayName")
                                .unwrap_or_else(|| name.clone());
                            header = Some((id, name, display, area));
                        }
                    }
                    b"autoFilter" => {
                        auto_filter = attr_value(&e, b"ref").and_then(|s| CellRange::parse(&s).ok());
                    }
                    b"tableColumn" => columns.push(decode_excel_escapes(
                        &attr_value(&e, b"name").unwrap_or_default(),
                    )),
                    b"tableStyleInfo" => {
                        style = TableStyleInfo {
                            name: attr_value(&e, b"name"),
                            show_first_column: bool_attr(&e, b"showFirstColumn", false),
                            show_last_column: bool_attr(&e, b"showLastColumn", false),
                            show_row_stripes: bool_attr(&e, b"showRowStripes", false),
                            show_column_stripes: bool_attr(&e, b"showColumnStripes", false),
                        };
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        let Some((id, name, display, area)) = header else {
            warn!("skipping table part {} without id/ref", path);
            return Ok(());
        };

        let mut table = Table::new(id, area, columns)?
            .with_names(name, display)
            .with_style(style);
        table.auto_filter = auto_filter;
        worksheet.add_table(table)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Write};

    fn minimal_package(sheet_xml: &str, extra: &[(&str, &str)]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            let options = zip::write::SimpleFileOptions::default();
            let mut parts = vec![
                ("[Content_Types].xml", r#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#),
                ("xl/workbook.xml", r#"<?xml version="1.0"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Data" sheetId="1" r:id="rId1"/></sheets></workbook>"#),
                ("xl/_rels/workbook.xml.rels", r#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#),
                ("xl/worksheets/sheet1.xml", sheet_xml),
            ];
            parts.extend_from_slice(extra);
            for (name, content) in parts {
                zip.start_file(name, options).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
        }
        buf
    }

    #[test]
    fn test_read_empty_xlsx() {
        let buf = minimal_package(
            r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData/></worksheet>"#,
            &[],
        );
        let workbook = XlsxReader::read(Cursor::new(buf)).unwrap();

        assert_eq!(workbook.sheet_count(), 1);
        let sheet = workbook.worksheet(0).unwrap();
        assert_eq!(sheet.name(), "Data");
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_read_shared_strings_and_empty_rows() {
        let buf = minimal_package(
            r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>
                <row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1"><v>2.5</v></c></row>
                <row r="3"/>
            </sheetData></worksheet>"#,
            &[(
                "xl/sharedStrings.xml",
                r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><si><t>Shared</t></si></sst>"#,
            )],
        );
        let workbook = XlsxReader::read(Cursor::new(buf)).unwrap();
        let sheet = workbook.worksheet(0).unwrap();

        assert_eq!(sheet.get_value_at(0, 0), CellValue::from("Shared"));
        assert_eq!(sheet.get_value_at(0, 1), CellValue::Number(2.5));
        assert_eq!(sheet.last_row_index(), Some(2));
        assert!(sheet.row(2).unwrap().is_empty());
    }

    #[test]
    fn test_read_table_through_sheet_relationships() {
        let buf = minimal_package(
            r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheetData/><tableParts count="1"><tablePart r:id="rId1"/></tableParts></worksheet>"#,
            &[
                (
                    "xl/worksheets/_rels/sheet1.xml.rels",
                    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/table" Target="../tables/table7.xml"/></Relationships>"#,
                ),
                (
                    "xl/tables/table7.xml",
                    r#"<table xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" id="7" name="Sales" displayName="Sales" ref="B2:C5"><autoFilter ref="B2:C5"/><tableColumns count="2"><tableColumn id="1" name="Item"/><tableColumn id="2" name="Total"/></tableColumns><tableStyleInfo name="TableStyleLight2" showFirstColumn="0" showLastColumn="0" showRowStripes="1" showColumnStripes="0"/></table>"#,
                ),
            ],
        );
        let workbook = XlsxReader::read(Cursor::new(buf)).unwrap();
        let tables = workbook.worksheet(0).unwrap().tables();

        assert_eq!(tables.len(), 1);
        let table = &tables[0];
        assert_eq!(table.id(), 7);
        assert_eq!(table.name(), "Sales");
        assert_eq!(table.area().to_a1_string(), "B2:C5");
        assert_eq!(table.auto_filter, Some(table.area()));
        assert_eq!(table.columns()[1].name, "Total");
        assert_eq!(table.style.name.as_deref(), Some("TableStyleLight2"));
        assert!(table.style.show_row_stripes);
    }

    #[test]
    fn test_missing_content_types_is_invalid() {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            zip.start_file("hello.txt", zip::write::SimpleFileOptions::default())
                .unwrap();
            zip.write_all(b"not a workbook").unwrap();
            zip.finish().unwrap();
        }
        assert!(matches!(
            XlsxReader::read(Cursor::new(buf)),
            Err(XlsxError::InvalidFormat(_))
        ));
    }
}
