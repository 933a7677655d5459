//! # sheetcraft-core
//!
//! In-memory workbook model for the sheetcraft builder.
//!
//! This crate provides the document engine the builder drives:
//! - [`Workbook`], [`Worksheet`], [`Row`] - the document structure
//! - [`CellValue`] - cell content (numbers, strings, booleans, formulas)
//! - [`CellAddress`] and [`CellRange`] - A1-style addressing
//! - [`Style`] - cell formatting (fonts, fills, alignment, number formats)
//! - [`Table`] - structured tables with style info and auto-filter
//!
//! ## Example
//!
//! ```rust
//! use sheetcraft_core::{CellValue, Workbook};
//!
//! let mut workbook = Workbook::empty();
//! let index = workbook.add_worksheet_with_name("Data").unwrap();
//! let sheet = workbook.worksheet_mut(index).unwrap();
//!
//! let row = sheet.create_row(0).unwrap();
//! row.set_value(0, CellValue::from("Hello"));
//! row.set_value(1, CellValue::Number(42.0));
//!
//! assert_eq!(sheet.last_row_index(), Some(0));
//! assert_eq!(sheet.row(0).unwrap().last_cell_index(), Some(1));
//! ```

pub mod cell;
pub mod column;
pub mod comment;
pub mod error;
pub mod row;
pub mod style;
pub mod table;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{Cell, CellAddress, CellRange, CellValue};
pub use column::Column;
pub use comment::CellComment;
pub use error::{Error, Result};
pub use row::Row;
pub use table::{Table, TableColumn, TableStyleInfo};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

// Re-export all style types for convenience
pub use style::{
    Alignment, Color, FillStyle, FontStyle, HorizontalAlignment, NumberFormat, PatternType,
    Style, StylePool, Underline, VerticalAlignment,
};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Number of native width units per character of column width
pub const COLUMN_WIDTH_UNITS_PER_CHAR: u32 = 256;

/// Widest column Excel accepts, in native units (255 characters)
pub const MAX_COLUMN_WIDTH_UNITS: u32 = 255 * COLUMN_WIDTH_UNITS_PER_CHAR;

/// Column width used when none has been set, in native units (8 characters)
pub const DEFAULT_COLUMN_WIDTH_UNITS: u32 = 8 * COLUMN_WIDTH_UNITS_PER_CHAR;
