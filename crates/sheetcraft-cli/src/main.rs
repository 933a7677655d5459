//! sheetcraft CLI - generate demo workbooks and inspect XLSX files

mod demo;
mod inspect;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sheetcraft::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::inspect::WorkbookDump;

#[derive(Parser)]
#[command(name = "sheetcraft")]
#[command(author, version, about = "Build and inspect XLSX workbooks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the showcase workbook (widths, formulas, a styled table)
    Showcase {
        /// Output XLSX file
        output: PathBuf,
    },

    /// Write a workbook holding one numbered table
    Table {
        /// Output XLSX file
        output: PathBuf,

        /// Number of body rows
        #[arg(short, long, default_value = "1000")]
        rows: u32,
    },

    /// Show information about a workbook
    Info {
        /// Input XLSX file
        input: PathBuf,
    },

    /// Print the cells and tables of a workbook as JSON
    Dump {
        /// Input XLSX file
        input: PathBuf,

        /// Only dump this sheet (0-based)
        #[arg(short, long)]
        sheet: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Showcase { output } => {
            write_output(&output, |sink| demo::showcase(sink))?;
            eprintln!("Wrote showcase to '{}'", output.display());
            Ok(())
        }
        Commands::Table { output, rows } => {
            write_output(&output, |sink| demo::numbered_table(sink, rows))?;
            eprintln!("Wrote {} table rows to '{}'", rows, output.display());
            Ok(())
        }
        Commands::Info { input } => show_info(&input),
        Commands::Dump { input, sheet } => dump(&input, sheet),
    }
}

/// Run a generator against a buffered file; the file is removed if it fails
fn write_output<F>(path: &Path, generate: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> sheetcraft::Result<()>,
{
    let file =
        File::create(path).with_context(|| format!("Failed to create '{}'", path.display()))?;
    let mut sink = BufWriter::new(file);

    if let Err(err) = generate(&mut sink) {
        drop(sink);
        // Best effort: the build error is the one worth reporting
        let _ = std::fs::remove_file(path);
        return Err(err).with_context(|| format!("Failed to build '{}'", path.display()));
    }
    sink.flush()
        .with_context(|| format!("Failed to write '{}'", path.display()))
}

fn open(input: &Path) -> Result<Workbook> {
    XlsxReader::read_file(input).with_context(|| format!("Failed to open '{}'", input.display()))
}

fn show_info(input: &Path) -> Result<()> {
    let workbook = open(input)?;

    println!("File: {}", input.display());
    println!("Sheets: {}", workbook.sheet_count());

    for (i, sheet) in workbook.worksheets().enumerate() {
        let formula_count = sheet
            .iter_cells()
            .filter(|(_, _, cell)| cell.value.is_formula())
            .count();

        println!();
        println!("  Sheet {}: \"{}\"", i, sheet.name());

        if let Some(range) = sheet.used_range() {
            println!(
                "    Used range: {} ({} rows x {} columns)",
                range,
                range.row_count(),
                range.col_count()
            );
        } else {
            println!("    Used range: empty");
        }
        println!("    Rows: {}", sheet.row_count());
        println!("    Formulas: {}", formula_count);

        for table in sheet.tables() {
            println!(
                "    Table {}: {} [{}]",
                table.name(),
                table.area(),
                table.style.name.as_deref().unwrap_or("no style")
            );
        }
    }

    Ok(())
}

fn dump(input: &Path, sheet: Option<usize>) -> Result<()> {
    let workbook = open(input)?;
    let mut dump = WorkbookDump::from_workbook(&workbook);

    if let Some(index) = sheet {
        anyhow::ensure!(
            index < dump.sheets.len(),
            "Sheet index {} not found ({} sheets)",
            index,
            dump.sheets.len()
        );
        dump.sheets = vec![dump.sheets.swap_remove(index)];
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &dump).context("Failed to serialize workbook")?;
    writeln!(out).context("Failed to write to stdout")?;
    Ok(())
}
