//! Workbook builder and the `build` entry points

use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;

use log::debug;
use sheetcraft_core::Workbook;
use sheetcraft_xlsx::XlsxWriter;

use crate::error::Result;
use crate::options::BuildOptions;
use crate::sheet::SheetBuilder;

/// Adds sheets to the workbook being built
pub struct WorkbookBuilder<'a> {
    workbook: &'a mut Workbook,
    options: &'a BuildOptions,
}

impl<'a> WorkbookBuilder<'a> {
    fn new(workbook: &'a mut Workbook, options: &'a BuildOptions) -> Self {
        Self { workbook, options }
    }

    /// Add a sheet and fill it with `block`
    ///
    /// An empty `name` becomes `Sheet<N>`, N being the new sheet's 1-based
    /// position. Invalid or duplicate names fail in the engine.
    pub fn sheet<F>(&mut self, name: &str, block: F) -> Result<()>
    where
        F: FnOnce(&mut SheetBuilder<'_>) -> Result<()>,
    {
        let name = if name.is_empty() {
            format!("Sheet{}", self.workbook.sheet_count() + 1)
        } else {
            name.to_string()
        };
        let index = self.workbook.add_worksheet_with_name(&name)?;
        debug!("sheet '{}' created at position {}", name, index);

        block(&mut SheetBuilder::new(self.workbook, index, self.options))
    }

    /// Number of sheets created so far
    pub fn sheet_count(&self) -> usize {
        self.workbook.sheet_count()
    }
}

/// Build a workbook with `block` and write it to `sink` as XLSX
///
/// Nothing is written unless the block succeeds; the in-memory workbook is
/// dropped before this returns either way. A block that adds no sheet
/// produces a workbook with one empty `Sheet1`.
///
/// ```rust
/// # fn main() -> sheetcraft::Result<()> {
/// let mut bytes = Vec::new();
/// sheetcraft::build(&mut bytes, |wb| {
///     wb.sheet("Report", |sheet| {
///         sheet.column_widths([12.0, 8.0])?;
///         sheet.table(["Item", "Qty"], |table| {
///             table.row(|row| {
///                 row.cell("apples")?;
///                 row.cell(3)?;
///                 Ok(())
///             })
///         })
///     })
/// })?;
/// assert!(!bytes.is_empty());
/// # Ok(())
/// # }
/// ```
pub fn build<W, F>(sink: W, block: F) -> Result<()>
where
    W: Write,
    F: FnOnce(&mut WorkbookBuilder<'_>) -> Result<()>,
{
    build_with_options(sink, &BuildOptions::default(), block)
}

/// [`build`] with explicit options
pub fn build_with_options<W, F>(mut sink: W, options: &BuildOptions, block: F) -> Result<()>
where
    W: Write,
    F: FnOnce(&mut WorkbookBuilder<'_>) -> Result<()>,
{
    let bytes = render(options, block)?;
    sink.write_all(&bytes)?;
    sink.flush()?;
    debug!("wrote {} bytes", bytes.len());
    Ok(())
}

/// [`build`] into a file; the file is only created once the block has succeeded
pub fn build_file<P, F>(path: P, block: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut WorkbookBuilder<'_>) -> Result<()>,
{
    let bytes = render(&BuildOptions::default(), block)?;
    let mut file = File::create(path.as_ref())?;
    file.write_all(&bytes)?;
    debug!("wrote {} bytes to {}", bytes.len(), path.as_ref().display());
    Ok(())
}

/// Run the block against a fresh workbook and serialize it
fn render<F>(options: &BuildOptions, block: F) -> Result<Vec<u8>>
where
    F: FnOnce(&mut WorkbookBuilder<'_>) -> Result<()>,
{
    let mut workbook = Workbook::empty();
    block(&mut WorkbookBuilder::new(&mut workbook, options))?;

    if workbook.is_empty() {
        workbook.add_worksheet()?;
    }

    let mut buffer = Cursor::new(Vec::new());
    XlsxWriter::write(&workbook, &mut buffer)?;
    debug!(
        "serialized {} sheet(s), {} table(s)",
        workbook.sheet_count(),
        workbook.table_count()
    );
    Ok(buffer.into_inner())
}
