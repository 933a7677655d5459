//! # sheetcraft-xlsx
//!
//! XLSX (Office Open XML) reader and writer for sheetcraft workbooks.
//!
//! The writer emits one inline-string worksheet part per sheet plus the
//! shared `styles.xml`, comment parts and table parts. The reader accepts
//! both inline and shared strings, so files saved by spreadsheet
//! applications load as well.

pub mod error;
pub mod reader;
pub mod writer;

mod styles;
mod xml;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;
