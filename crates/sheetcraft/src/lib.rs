//! # sheetcraft
//!
//! Declarative builder for XLSX workbooks.
//!
//! A workbook is described by nested closures: the workbook block adds
//! sheets, a sheet block adds rows and tables and sets column widths and
//! styles, and a row block appends cells from left to right. Each builder
//! keeps its own cursor, so callers never compute row or column indices.
//!
//! ## Features
//!
//! - Cells from booleans, numbers, strings, `Option`s and `chrono` dates
//!   (stored as serial numbers with a date format)
//! - Formulas that reference the addresses returned by earlier cells
//! - Skipped rows, column widths in characters, column default styles
//! - Structured tables with header row, table style and auto-filter
//! - XLSX output through `sheetcraft-xlsx`, read-back for verification
//!
//! ## Example
//!
//! ```rust
//! use sheetcraft::prelude::*;
//!
//! # fn main() -> sheetcraft::Result<()> {
//! let mut bytes = Vec::new();
//! sheetcraft::build(&mut bytes, |wb| {
//!     wb.sheet("", |sheet| {
//!         sheet.set_column_width("A", 10.0)?;
//!         sheet.row(|row| {
//!             let a = row.cell(1)?;
//!             let b = row.cell(2)?;
//!             row.formula(&format!("SUM({a}, {b})"))?;
//!             Ok(())
//!         })?;
//!
//!         sheet.skip(2);
//!         sheet.table(["Q1", "Q2"], |table| {
//!             table.style(|s| s.with_name("TableStyleLight13").with_column_stripes(true));
//!             table.row(|row| {
//!                 row.cell(1)?;
//!                 row.cell(2)?;
//!                 Ok(())
//!             })
//!         })
//!     })
//! })?;
//!
//! let workbook = XlsxReader::read(std::io::Cursor::new(bytes))?;
//! let sheet = workbook.worksheet(0).unwrap();
//! assert_eq!(sheet.get_value("C1")?.formula_text(), Some("SUM(A1, B1)"));
//! assert_eq!(sheet.tables()[0].area().to_a1_string(), "A4:B5");
//! # Ok(())
//! # }
//! ```

pub mod cursor;
pub mod error;
pub mod options;
pub mod prelude;
pub mod row;
pub mod sheet;
pub mod table;
pub mod value;
pub mod workbook;

pub use error::{BuildError, Result};
pub use options::BuildOptions;
pub use row::{CellBuilder, RowBuilder};
pub use sheet::{ColumnRef, SheetBuilder};
pub use table::TableBuilder;
pub use value::{normalize, normalize_with, CellContent, CellInput, Normalized};
pub use workbook::{build, build_file, build_with_options, WorkbookBuilder};

// Re-export the engine and codec types callers work with
pub use sheetcraft_core::{
    CellAddress, CellComment, CellRange, CellValue, Color, FillStyle, FontStyle,
    HorizontalAlignment, NumberFormat, PatternType, Style, Table, TableStyleInfo,
    VerticalAlignment, Workbook, Worksheet,
};
pub use sheetcraft_xlsx::{XlsxError, XlsxReader, XlsxWriter};
