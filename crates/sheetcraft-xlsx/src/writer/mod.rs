//! XLSX writer

use std::collections::HashMap;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use log::debug;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::XlsxResult;
use crate::styles::XlsxStyleTable;
use crate::xml::{escape_text, escape_xml, flag};
use sheetcraft_core::{CellAddress, CellValue, Table, Workbook, Worksheet};

const REL_COMMENTS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/comments";
const REL_TABLE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/table";

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let file = File::create(path)?;
        Self::write(workbook, file)
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        let mut zip = ZipWriter::new(writer);

        // Build a workbook-wide style table.
        let style_table = XlsxStyleTable::build(workbook);

        Self::write_content_types(&mut zip, workbook)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip, workbook)?;
        Self::write_workbook_rels(&mut zip, workbook)?;
        Self::write_part(&mut zip, "xl/styles.xml", &style_table.to_styles_xml())?;

        for (i, sheet) in workbook.worksheets().enumerate() {
            let rels = SheetRels::for_sheet(sheet);
            Self::write_worksheet(&mut zip, sheet, i, &style_table, &rels)?;

            if !rels.is_empty() {
                Self::write_worksheet_rels(&mut zip, i, &rels)?;
            }
            if sheet.comment_count() > 0 {
                Self::write_comments(&mut zip, sheet, i)?;
            }
            for table in sheet.tables() {
                Self::write_table(&mut zip, table)?;
            }
        }

        zip.finish()?;
        debug!(
            "wrote workbook: {} sheet(s), {} table(s)",
            workbook.sheet_count(),
            workbook.table_count()
        );
        Ok(())
    }

    fn write_part<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        name: &str,
        content: &str,
    ) -> XlsxResult<()> {
        zip.start_file(name, SimpleFileOptions::default())?;
        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );

        for (i, sheet) in workbook.worksheets().enumerate() {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
            if sheet.comment_count() > 0 {
                content.push_str(&format!(
                    r#"
    <Override PartName="/xl/comments{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.comments+xml"/>"#,
                    i + 1
                ));
            }
            for table in sheet.tables() {
                content.push_str(&format!(
                    r#"
    <Override PartName="/xl/tables/table{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.table+xml"/>"#,
                    table.id()
                ));
            }
        }

        content.push_str("\n</Types>");
        Self::write_part(zip, "[Content_Types].xml", &content)
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut ZipWriter<W>) -> XlsxResult<()> {
        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;
        Self::write_part(zip, "_rels/.rels", content)
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        );

        for (i, sheet) in workbook.worksheets().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape_xml(sheet.name()),
                i + 1,
                i + 1
            ));
        }

        content.push_str(
            r#"
    </sheets>
</workbook>"#,
        );
        Self::write_part(zip, "xl/workbook.xml", &content)
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        // Styles relationship follows the sheets
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
            workbook.sheet_count() + 1
        ));

        content.push_str("\n</Relationships>");
        Self::write_part(zip, "xl/_rels/workbook.xml.rels", &content)
    }

    fn write_worksheet<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        sheet: &Worksheet,
        index: usize,
        style_table: &XlsxStyleTable,
        rels: &SheetRels,
    ) -> XlsxResult<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );

        if let Some(range) = sheet.used_range() {
            content.push_str(&format!("\n    <dimension ref=\"{}\"/>", range));
        }

        Self::write_cols(&mut content, sheet, index, style_table);

        content.push_str("\n    <sheetData>");
        for row in sheet.rows() {
            let height = row.height.map_or(String::new(), |h| {
                format!(" ht=\"{}\" customHeight=\"1\"", h)
            });
            if row.is_empty() {
                content.push_str(&format!("\n        <row r=\"{}\"{}/>", row.index() + 1, height));
                continue;
            }

            content.push_str(&format!("\n        <row r=\"{}\"{}>", row.index() + 1, height));
            for (col, cell) in row.cells() {
                let cell_ref = CellAddress::new(row.index(), col);
                let xf_id = style_table.xf_id_for(index, cell.style_index);
                let style_attr = if xf_id != 0 {
                    format!(" s=\"{}\"", xf_id)
                } else {
                    String::new()
                };
                content.push_str("\n            ");
                content.push_str(&Self::cell_xml(&cell_ref, &style_attr, &cell.value));
            }
            content.push_str("\n        </row>");
        }
        content.push_str("\n    </sheetData>");

        if !rels.table_ids.is_empty() {
            content.push_str(&format!(
                "\n    <tableParts count=\"{}\">",
                rels.table_ids.len()
            ));
            for (_, rel_id) in &rels.table_ids {
                content.push_str(&format!("\n        <tablePart r:id=\"{}\"/>", rel_id));
            }
            content.push_str("\n    </tableParts>");
        }

        content.push_str("\n</worksheet>");
        Self::write_part(zip, &format!("xl/worksheets/sheet{}.xml", index + 1), &content)
    }

    fn write_cols(
        content: &mut String,
        sheet: &Worksheet,
        index: usize,
        style_table: &XlsxStyleTable,
    ) {
        let columns: Vec<_> = sheet
            .columns()
            .filter(|c| c.has_custom_settings())
            .collect();
        if columns.is_empty() {
            return;
        }

        content.push_str("\n    <cols>");
        for column in columns {
            let n = column.index + 1;
            let mut attrs = format!("min=\"{}\" max=\"{}\"", n, n);
            if column.width.is_some() {
                attrs.push_str(&format!(
                    " width=\"{}\" customWidth=\"1\"",
                    column.width_chars()
                ));
            }
            if let Some(style_index) = column.style_index {
                attrs.push_str(&format!(
                    " style=\"{}\"",
                    style_table.xf_id_for(index, style_index)
                ));
            }
            if column.hidden {
                attrs.push_str(" hidden=\"1\"");
            }
            content.push_str(&format!("\n        <col {}/>", attrs));
        }
        content.push_str("\n    </cols>");
    }

    fn cell_xml(cell_ref: &CellAddress, style_attr: &str, value: &CellValue) -> String {
        match value {
            CellValue::Empty => format!("<c r=\"{}\"{}/>", cell_ref, style_attr),
            CellValue::Number(n) if n.is_finite() => {
                format!("<c r=\"{}\"{}><v>{}</v></c>", cell_ref, style_attr, n)
            }
            // SpreadsheetML has no representation for NaN or infinities
            CellValue::Number(_) => format!(
                "<c r=\"{}\"{} t=\"e\"><v>#NUM!</v></c>",
                cell_ref, style_attr
            ),
            CellValue::String(s) => format!(
                "<c r=\"{}\"{} t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>",
                cell_ref,
                style_attr,
                escape_text(s)
            ),
            CellValue::Boolean(b) => format!(
                "<c r=\"{}\"{} t=\"b\"><v>{}</v></c>",
                cell_ref,
                style_attr,
                flag(*b)
            ),
            CellValue::Formula { text, cached_value } => {
                let formula = text.strip_prefix('=').unwrap_or(text.as_str());
                let (type_attr, cached) = match cached_value.as_deref() {
                    Some(CellValue::Number(n)) if n.is_finite() => ("", format!("<v>{}</v>", n)),
                    Some(CellValue::String(s)) => {
                        (" t=\"str\"", format!("<v>{}</v>", escape_text(s)))
                    }
                    Some(CellValue::Boolean(b)) => (" t=\"b\"", format!("<v>{}</v>", flag(*b))),
                    _ => ("", String::new()),
                };
                format!(
                    "<c r=\"{}\"{}{}><f>{}</f>{}</c>",
                    cell_ref,
                    style_attr,
                    type_attr,
                    escape_xml(formula),
                    cached
                )
            }
        }
    }

    /// Write worksheet relationships file (comments and tables)
    fn write_worksheet_rels<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        sheet_index: usize,
        rels: &SheetRels,
    ) -> XlsxResult<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        if let Some(rel_id) = &rels.comments {
            content.push_str(&format!(
                r#"
    <Relationship Id="{}" Type="{}" Target="../comments{}.xml"/>"#,
                rel_id,
                REL_COMMENTS,
                sheet_index + 1
            ));
        }
        for (table_id, rel_id) in &rels.table_ids {
            content.push_str(&format!(
                r#"
    <Relationship Id="{}" Type="{}" Target="../tables/table{}.xml"/>"#,
                rel_id, REL_TABLE, table_id
            ));
        }

        content.push_str("\n</Relationships>");
        Self::write_part(
            zip,
            &format!("xl/worksheets/_rels/sheet{}.xml.rels", sheet_index + 1),
            &content,
        )
    }

    /// Write comments file for a worksheet
    fn write_comments<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        sheet: &Worksheet,
        sheet_index: usize,
    ) -> XlsxResult<()> {
        // Comments without an author point at a trailing empty author entry
        let mut authors: Vec<&str> = sheet.comment_authors().iter().map(String::as_str).collect();
        if sheet.comments().any(|(_, c)| c.author.is_empty()) {
            authors.push("");
        }
        let author_index: HashMap<&str, usize> =
            authors.iter().enumerate().map(|(i, a)| (*a, i)).collect();

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<comments xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <authors>"#,
        );
        for author in &authors {
            content.push_str(&format!("\n        <author>{}</author>", escape_text(author)));
        }
        content.push_str(
            r#"
    </authors>
    <commentList>"#,
        );

        for ((row, col), comment) in sheet.comments() {
            content.push_str(&format!(
                r#"
        <comment ref="{}" authorId="{}"><text><r><t xml:space="preserve">{}</t></r></text></comment>"#,
                CellAddress::new(row, col),
                author_index.get(comment.author.as_str()).copied().unwrap_or(0),
                escape_text(&comment.text)
            ));
        }

        content.push_str(
            r#"
    </commentList>
</comments>"#,
        );
        Self::write_part(zip, &format!("xl/comments{}.xml", sheet_index + 1), &content)
    }

    fn write_table<W: Write + Seek>(zip: &mut ZipWriter<W>, table: &Table) -> XlsxResult<()> {
        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<table xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" id="{}" name="{}" displayName="{}" ref="{}" totalsRowShown="0">"#,
            table.id(),
            escape_xml(table.name()),
            escape_xml(table.display_name()),
            table.area()
        );

        if let Some(filter) = table.auto_filter {
            content.push_str(&format!("\n    <autoFilter ref=\"{}\"/>", filter));
        }

        content.push_str(&format!(
            "\n    <tableColumns count=\"{}\">",
            table.columns().len()
        ));
        for column in table.columns() {
            content.push_str(&format!(
                "\n        <tableColumn id=\"{}\" name=\"{}\"/>",
                column.id,
                escape_text(&column.name)
            ));
        }
        content.push_str("\n    </tableColumns>");

        let style = &table.style;
        let name_attr = style
            .name
            .as_ref()
            .map_or(String::new(), |n| format!(" name=\"{}\"", escape_xml(n)));
        content.push_str(&format!(
            "\n    <tableStyleInfo{} showFirstColumn=\"{}\" showLastColumn=\"{}\" showRowStripes=\"{}\" showColumnStripes=\"{}\"/>",
            name_attr,
            flag(style.show_first_column),
            flag(style.show_last_column),
            flag(style.show_row_stripes),
            flag(style.show_column_stripes)
        ));

        content.push_str("\n</table>");
        Self::write_part(zip, &format!("xl/tables/table{}.xml", table.id()), &content)
    }
}

/// Relationship ids assigned to one worksheet's comments and tables
#[derive(Debug, Default)]
struct SheetRels {
    comments: Option<String>,
    /// Table id -> relationship id, in table order
    table_ids: Vec<(u32, String)>,
}

impl SheetRels {
    fn for_sheet(sheet: &Worksheet) -> Self {
        let has_comments = sheet.comment_count() > 0;
        let first_table_rel = if has_comments { 2 } else { 1 };
        Self {
            comments: has_comments.then(|| "rId1".to_string()),
            table_ids: sheet
                .tables()
                .iter()
                .zip(first_table_rel..)
                .map(|(table, n)| (table.id(), format!("rId{}", n)))
                .collect(),
        }
    }

    fn is_empty(&self) -> bool {
        self.comments.is_none() && self.table_ids.is_empty()
    }
}
