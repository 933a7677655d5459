//! Prelude module - common imports for sheetcraft users
//!
//! ```rust
//! use sheetcraft::prelude::*;
//! ```

pub use crate::{
    // Entry points
    build,
    build_file,
    build_with_options,
    // Options and errors
    BuildError,
    BuildOptions,
    Result,
    // Builders
    CellBuilder,
    // Values
    CellInput,
    ColumnRef,
    RowBuilder,
    SheetBuilder,
    TableBuilder,
    WorkbookBuilder,

    // Engine types
    CellAddress,
    CellRange,
    CellValue,
    Color,
    FillStyle,
    HorizontalAlignment,
    NumberFormat,
    Style,
    TableStyleInfo,
    VerticalAlignment,
    Workbook,

    // I/O types
    XlsxReader,
    XlsxWriter,
};
