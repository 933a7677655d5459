//! XLSX styles (styles.xml) read/write helpers

use std::collections::HashMap;
use std::io::{BufReader, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::XlsxResult;
use crate::xml::{attr_value, escape_xml};
use sheetcraft_core::style::{
    Alignment, Color, FillStyle, FontStyle, HorizontalAlignment, NumberFormat, PatternType,
    Style, Underline, VerticalAlignment,
};
use sheetcraft_core::Workbook;

// === Writing ===

/// Workbook-wide `cellXfs` table
///
/// Worksheets keep their own style pools; this maps every sheet-local style
/// index onto one deduplicated list whose positions are the `s` attribute
/// values written on cells and columns.
#[derive(Debug)]
pub(crate) struct XlsxStyleTable {
    /// Global, deduplicated styles. Index corresponds to the cellXfs index (xfId).
    styles: Vec<Style>,
    /// Per-worksheet mapping: local worksheet style index -> global xfId.
    sheet_maps: Vec<HashMap<u32, u32>>,
}

#[derive(Debug, Clone, Copy)]
struct ResolvedXfIds {
    font_id: u32,
    fill_id: u32,
    num_fmt_id: u32,
}

/// Position of `item` in `items`, appending it first if absent
fn intern<T: Clone + Eq + std::hash::Hash>(
    items: &mut Vec<T>,
    ids: &mut HashMap<T, u32>,
    item: &T,
) -> u32 {
    if let Some(&id) = ids.get(item) {
        return id;
    }
    let id = items.len() as u32;
    items.push(item.clone());
    ids.insert(item.clone(), id);
    id
}

impl XlsxStyleTable {
    pub(crate) fn build(workbook: &Workbook) -> Self {
        let mut styles: Vec<Style> = Vec::new();
        let mut style_to_xf: HashMap<Style, u32> = HashMap::new();

        // Index 0 is always default style
        intern(&mut styles, &mut style_to_xf, &Style::default());

        let sheet_maps = workbook
            .worksheets()
            .map(|sheet| {
                sheet
                    .styles()
                    .iter()
                    .map(|(local_idx, style)| {
                        (local_idx, intern(&mut styles, &mut style_to_xf, style))
                    })
                    .collect()
            })
            .collect();

        Self { styles, sheet_maps }
    }

    pub(crate) fn xf_id_for(&self, sheet_index: usize, local_style_index: u32) -> u32 {
        self.sheet_maps
            .get(sheet_index)
            .and_then(|m| m.get(&local_style_index).copied())
            .unwrap_or(0)
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        let mut font_ids: HashMap<FontStyle, u32> = HashMap::new();
        let mut fonts: Vec<FontStyle> = Vec::new();
        intern(&mut fonts, &mut font_ids, &FontStyle::default());

        // Excel requires the first two fills to be: none and gray125
        let mut fill_ids: HashMap<FillStyle, u32> = HashMap::new();
        let mut fills: Vec<FillStyle> = Vec::new();
        intern(&mut fills, &mut fill_ids, &FillStyle::None);
        intern(
            &mut fills,
            &mut fill_ids,
            &FillStyle::pattern(PatternType::Gray125, Color::Auto, Color::Auto),
        );

        let mut numfmt_ids: HashMap<String, u32> = HashMap::new();
        let mut numfmts: Vec<(u32, String)> = Vec::new();

        let resolved: Vec<ResolvedXfIds> = self
            .styles
            .iter()
            .map(|style| {
                let num_fmt_id = style.number_format.builtin_id().unwrap_or_else(|| {
                    let code = style.number_format.format_string().to_string();
                    let next = NumberFormat::FIRST_CUSTOM_ID + numfmts.len() as u32;
                    *numfmt_ids.entry(code.clone()).or_insert_with(|| {
                        numfmts.push((next, code));
                        next
                    })
                });
                ResolvedXfIds {
                    font_id: intern(&mut fonts, &mut font_ids, &style.font),
                    fill_id: intern(&mut fills, &mut fill_ids, &style.fill),
                    num_fmt_id,
                }
            })
            .collect();

        let mut xml = String::new();
        xml.push_str(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        if !numfmts.is_empty() {
            xml.push_str(&format!("\n  <numFmts count=\"{}\">", numfmts.len()));
            for (id, code) in &numfmts {
                xml.push_str(&format!(
                    "\n    <numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                    id,
                    escape_xml(code)
                ));
            }
            xml.push_str("\n  </numFmts>");
        }

        xml.push_str(&format!("\n  <fonts count=\"{}\">", fonts.len()));
        for font in &fonts {
            xml.push_str("\n    ");
            xml.push_str(&write_font(font));
        }
        xml.push_str("\n  </fonts>");

        xml.push_str(&format!("\n  <fills count=\"{}\">", fills.len()));
        for fill in &fills {
            xml.push_str("\n    ");
            xml.push_str(&write_fill(fill));
        }
        xml.push_str("\n  </fills>");

        // Borders are not modelled; one empty border satisfies the schema
        xml.push_str(
            r#"
  <borders count="1">
    <border><left/><right/><top/><bottom/><diagonal/></border>
  </borders>
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
        );

        xml.push_str(&format!("\n  <cellXfs count=\"{}\">", self.styles.len()));
        for (style, ids) in self.styles.iter().zip(&resolved) {
            xml.push_str("\n    ");
            xml.push_str(&write_xf(style, *ids));
        }
        xml.push_str("\n  </cellXfs>");

        xml.push_str(
            r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>
  <dxfs count="0"/>
  <tableStyles count="0" defaultTableStyle="TableStyleMedium9" defaultPivotStyle="PivotStyleLight16"/>
</styleSheet>"#,
        );
        xml
    }
}

fn write_color(tag: &str, color: &Color) -> String {
    match color {
        Color::Auto => format!("<{tag} indexed=\"64\"/>"),
        Color::Rgb { .. } | Color::Argb { .. } => {
            format!(
                "<{tag} rgb=\"{}\"/>",
                color.to_argb_hex().unwrap_or_default()
            )
        }
        Color::Indexed(i) => format!("<{tag} indexed=\"{}\"/>", i),
        Color::Theme { index, tint: 0 } => format!("<{tag} theme=\"{}\"/>", index),
        Color::Theme { index, tint } => {
            format!(
                "<{tag} theme=\"{}\" tint=\"{}\"/>",
                index,
                (*tint as f64) / 100.0
            )
        }
    }
}

fn write_font(font: &FontStyle) -> String {
    let mut s = String::from("<font>");
    if font.bold {
        s.push_str("<b/>");
    }
    if font.italic {
        s.push_str("<i/>");
    }
    if font.strikethrough {
        s.push_str("<strike/>");
    }
    match font.underline {
        Underline::None => {}
        Underline::Single => s.push_str("<u/>"),
        Underline::Double => s.push_str("<u val=\"double\"/>"),
    }
    s.push_str(&format!("<sz val=\"{}\"/>", font.size));
    if !font.color.is_auto() {
        s.push_str(&write_color("color", &font.color));
    }
    s.push_str(&format!("<name val=\"{}\"/>", escape_xml(&font.name)));
    s.push_str("</font>");
    s
}

fn write_fill(fill: &FillStyle) -> String {
    match fill {
        FillStyle::None => "<fill><patternFill patternType=\"none\"/></fill>".to_string(),
        FillStyle::Solid { color } => format!(
            "<fill><patternFill patternType=\"solid\">{}<bgColor indexed=\"64\"/></patternFill></fill>",
            write_color("fgColor", color)
        ),
        FillStyle::Pattern {
            pattern,
            foreground,
            background,
        } => format!(
            "<fill><patternFill patternType=\"{}\">{}{}</patternFill></fill>",
            pattern.xlsx_name(),
            write_color("fgColor", foreground),
            write_color("bgColor", background)
        ),
    }
}

fn write_alignment(al: &Alignment) -> Option<String> {
    let default = Alignment::default();
    if al == &default {
        return None;
    }

    let mut s = String::from("<alignment");
    if al.horizontal != default.horizontal {
        s.push_str(&format!(" horizontal=\"{}\"", al.horizontal.xlsx_name()));
    }
    if al.vertical != default.vertical {
        s.push_str(&format!(" vertical=\"{}\"", al.vertical.xlsx_name()));
    }
    if al.wrap_text {
        s.push_str(" wrapText=\"1\"");
    }
    if al.indent != 0 {
        s.push_str(&format!(" indent=\"{}\"", al.indent));
    }
    s.push_str("/>");
    Some(s)
}

fn write_xf(style: &Style, ids: ResolvedXfIds) -> String {
    let mut attrs = String::new();
    if ids.num_fmt_id != 0 {
        attrs.push_str(" applyNumberFormat=\"1\"");
    }
    if style.font != FontStyle::default() {
        attrs.push_str(" applyFont=\"1\"");
    }
    if !style.fill.is_none() {
        attrs.push_str(" applyFill=\"1\"");
    }
    if style.alignment != Alignment::default() {
        attrs.push_str(" applyAlignment=\"1\"");
    }

    let head = format!(
        "<xf numFmtId=\"{}\" fontId=\"{}\" fillId=\"{}\" borderId=\"0\" xfId=\"0\"{}",
        ids.num_fmt_id, ids.font_id, ids.fill_id, attrs
    );
    match write_alignment(&style.alignment) {
        Some(alignment) => format!("{}>{}</xf>", head, alignment),
        None => format!("{}/>", head),
    }
}

// === Reading ===

/// Pattern fill under construction
#[derive(Debug, Default)]
struct FillParts {
    pattern: Option<PatternType>,
    foreground: Color,
    background: Color,
}

impl FillParts {
    fn finish(self) -> FillStyle {
        match self.pattern.unwrap_or(PatternType::None) {
            PatternType::None | PatternType::Gray125 => FillStyle::None,
            PatternType::Solid => FillStyle::Solid {
                color: self.foreground,
            },
            p => FillStyle::pattern(p, self.foreground, self.background),
        }
    }
}

/// Event-driven state for one pass over styles.xml
#[derive(Debug, Default)]
struct StylesParser {
    numfmts: HashMap<u32, String>,
    fonts: Vec<FontStyle>,
    fills: Vec<FillStyle>,
    cell_xfs: Vec<Style>,
    font: Option<FontStyle>,
    fill: Option<FillParts>,
    xf: Option<Style>,
    in_cell_xfs: bool,
    /// Differential formats reuse `<font>`/`<fill>`; they are skipped
    in_dxfs: bool,
}

impl StylesParser {
    fn open(&mut self, e: &BytesStart<'_>) {
        if self.in_dxfs {
            return;
        }
        match e.name().as_ref() {
            b"numFmt" => {
                let id = attr_value(e, b"numFmtId").and_then(|s| s.parse().ok());
                if let (Some(id), Some(code)) = (id, attr_value(e, b"formatCode")) {
                    self.numfmts.insert(id, code);
                }
            }
            b"font" => self.font = Some(FontStyle::default()),
            b"fill" => self.fill = Some(FillParts::default()),
            b"cellXfs" => self.in_cell_xfs = true,
            b"dxfs" => self.in_dxfs = true,
            b"xf" if self.in_cell_xfs => self.xf = Some(self.resolve_xf(e)),
            _ => {}
        }

        if let Some(font) = self.font.as_mut() {
            read_font_child(font, e);
        }
        if let Some(fill) = self.fill.as_mut() {
            match e.name().as_ref() {
                b"patternFill" => {
                    fill.pattern = attr_value(e, b"patternType")
                        .and_then(|v| PatternType::from_xlsx(&v));
                }
                b"fgColor" => fill.foreground = parse_color_attrs(e),
                b"bgColor" => fill.background = parse_color_attrs(e),
                _ => {}
            }
        }
        if let (Some(xf), b"alignment") = (self.xf.as_mut(), e.name().as_ref()) {
            read_alignment(&mut xf.alignment, e);
        }
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"dxfs" => self.in_dxfs = false,
            _ if self.in_dxfs => {}
            b"font" => {
                if let Some(font) = self.font.take() {
                    self.fonts.push(font);
                }
            }
            b"fill" => {
                if let Some(fill) = self.fill.take() {
                    self.fills.push(fill.finish());
                }
            }
            b"xf" => {
                if let Some(xf) = self.xf.take() {
                    self.cell_xfs.push(xf);
                }
            }
            b"cellXfs" => self.in_cell_xfs = false,
            _ => {}
        }
    }

    fn resolve_xf(&self, e: &BytesStart<'_>) -> Style {
        let id = |key: &[u8]| -> u32 {
            attr_value(e, key)
                .and_then(|s| s.parse().ok())
                .unwrap_or(0)
        };
        let num_fmt_id = id(b"numFmtId");

        Style {
            font: self.fonts.get(id(b"fontId") as usize).cloned().unwrap_or_default(),
            fill: self.fills.get(id(b"fillId") as usize).cloned().unwrap_or_default(),
            alignment: Alignment::default(),
            number_format: match self.numfmts.get(&num_fmt_id) {
                Some(code) => NumberFormat::Custom(code.clone()),
                None => NumberFormat::from_id(num_fmt_id),
            },
        }
    }
}

fn read_font_child(font: &mut FontStyle, e: &BytesStart<'_>) {
    match e.name().as_ref() {
        b"b" => font.bold = attr_value(e, b"val").as_deref() != Some("0"),
        b"i" => font.italic = attr_value(e, b"val").as_deref() != Some("0"),
        b"strike" => font.strikethrough = attr_value(e, b"val").as_deref() != Some("0"),
        b"u" => {
            font.underline = match attr_value(e, b"val").as_deref() {
                Some("double") | Some("doubleAccounting") => Underline::Double,
                Some("none") => Underline::None,
                _ => Underline::Single,
            }
        }
        b"sz" => {
            if let Some(size) = attr_value(e, b"val").and_then(|v| v.parse().ok()) {
                font.size = size;
            }
        }
        b"name" => {
            if let Some(name) = attr_value(e, b"val") {
                font.name = name;
            }
        }
        b"color" => font.color = parse_color_attrs(e),
        _ => {}
    }
}

fn read_alignment(align: &mut Alignment, e: &BytesStart<'_>) {
    if let Some(h) = attr_value(e, b"horizontal").and_then(|v| HorizontalAlignment::from_xlsx(&v))
    {
        align.horizontal = h;
    }
    if let Some(v) = attr_value(e, b"vertical").and_then(|v| VerticalAlignment::from_xlsx(&v)) {
        align.vertical = v;
    }
    align.wrap_text = attr_value(e, b"wrapText").as_deref() == Some("1");
    align.indent = attr_value(e, b"indent")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
}

fn parse_color_attrs(e: &BytesStart<'_>) -> Color {
    // Priority: rgb > theme > indexed > auto
    match attr_value(e, b"rgb").and_then(|v| Color::from_hex(&v)) {
        // Opaque colors are written as FFRRGGBB
        Some(Color::Argb { a: 0xFF, r, g, b }) => return Color::Rgb { r, g, b },
        Some(color) => return color,
        None => {}
    }
    if let Some(index) = attr_value(e, b"theme").and_then(|v| v.parse::<u8>().ok()) {
        let tint = attr_value(e, b"tint")
            .and_then(|v| v.parse::<f64>().ok())
            .map(|t| (t * 100.0).round() as i8)
            .unwrap_or(0);
        return Color::Theme { index, tint };
    }
    match attr_value(e, b"indexed").and_then(|v| v.parse::<u8>().ok()) {
        // 64 is the system foreground, i.e. automatic
        Some(64) | None => Color::Auto,
        Some(i) => Color::Indexed(i),
    }
}

/// Read the `cellXfs` table of styles.xml, resolved into full styles
pub(crate) fn read_styles_xml<R: Read>(reader: R) -> XlsxResult<Vec<Style>> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut parser = StylesParser::default();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) => parser.open(&e),
            Event::Empty(e) => {
                parser.open(&e);
                parser.close(e.name().as_ref());
            }
            Event::End(e) => parser.close(e.name().as_ref()),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if parser.cell_xfs.is_empty() {
        parser.cell_xfs.push(Style::default());
    }
    Ok(parser.cell_xfs)
}
