//! Demo workbooks

use std::io::Write;

use sheetcraft::prelude::*;

/// Column widths, a formula over two cells, a skip, a styled table with
/// formula rows and a highlighted closing cell
pub fn showcase<W: Write>(sink: W) -> sheetcraft::Result<()> {
    build(sink, |wb| {
        wb.sheet("", |sheet| {
            sheet.set_column_width("A", 10.0)?;
            sheet.set_column_width("B", 10.0)?;
            let c = sheet.column_width("A")? + sheet.column_width("B")?;
            sheet.set_column_width("C", c)?;

            sheet.row(|row| {
                let first = row.cell_with(1, |_| Ok(()))?;
                let second = row.cell(1)?;
                row.formula(&format!("SUM({}, {})", first, second))?;
                Ok(())
            })?;

            sheet.skip(2);

            sheet.table(["Q1", "Q2", "Q3"], |table| {
                table.style(|s| {
                    s.with_name("TableStyleLight13")
                        .with_column_stripes(true)
                        .with_row_stripes(false)
                });
                for (a, b) in [(1, 2), (3, 4), (5, 6)] {
                    table.row(|row| {
                        let c1 = row.cell(a)?;
                        let c2 = row.cell(b)?;
                        row.formula(&format!("SUM({}, {})", c1, c2))?;
                        Ok(())
                    })?;
                }
                Ok(())
            })?;

            sheet.row(|row| {
                row.cell_with("Done!", |cell| {
                    cell.cell_style(|s| s.fill_color(Color::TAN))
                })?;
                Ok(())
            })
        })
    })
}

/// A numbered table of `rows` rows under a header of five columns
pub fn numbered_table<W: Write>(sink: W, rows: u32) -> sheetcraft::Result<()> {
    build(sink, |wb| {
        wb.sheet("Table", |sheet| {
            sheet.column_widths([10.0])?;
            sheet.table(
                ["No", "Column1", "Column2", "Column3", "Formula1"],
                |table| {
                    table.style(|s| {
                        s.with_name("TableStyleLight13")
                            .with_column_stripes(true)
                            .with_row_stripes(false)
                    });
                    for n in 1..=rows {
                        table.row(|row| row.cell(n).map(|_| ()))?;
                    }
                    Ok(())
                },
            )
        })
    })
}
