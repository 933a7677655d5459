//! Structured tables (ListObjects)
//!
//! A table covers a rectangular area of one worksheet. Its first row holds the
//! column headers and the remaining rows are the data body. Tables carry a
//! style reference and an auto-filter over the whole area.

use ahash::AHashSet;

use crate::cell::CellRange;
use crate::error::{Error, Result};

/// Built-in table style applied when nothing else is configured
pub const DEFAULT_TABLE_STYLE: &str = "TableStyleMedium9";

/// A column of a structured table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    /// Column id, 1-based within the table
    pub id: u32,
    /// Header text
    pub name: String,
}

/// Visual style of a table
///
/// The `Default` value is blank: no named style and every stripe/emphasis
/// flag off. Use [`TableStyleInfo::medium9`] for the usual preset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableStyleInfo {
    /// Built-in or custom table style name (e.g., "TableStyleMedium9")
    pub name: Option<String>,
    pub show_first_column: bool,
    pub show_last_column: bool,
    /// Alternate shading of body rows
    pub show_row_stripes: bool,
    /// Alternate shading of columns
    pub show_column_stripes: bool,
}

impl TableStyleInfo {
    /// Create a blank style with the given name
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// `TableStyleMedium9` with column stripes on and row stripes off
    pub fn medium9() -> Self {
        Self {
            show_column_stripes: true,
            ..Self::named(DEFAULT_TABLE_STYLE)
        }
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_row_stripes(mut self, on: bool) -> Self {
        self.show_row_stripes = on;
        self
    }

    pub fn with_column_stripes(mut self, on: bool) -> Self {
        self.show_column_stripes = on;
        self
    }

    pub fn with_first_column(mut self, on: bool) -> Self {
        self.show_first_column = on;
        self
    }

    pub fn with_last_column(mut self, on: bool) -> Self {
        self.show_last_column = on;
        self
    }
}

/// A structured table on a worksheet
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    id: u32,
    name: String,
    display_name: String,
    area: CellRange,
    columns: Vec<TableColumn>,
    /// Style reference and stripe flags
    pub style: TableStyleInfo,
    /// Auto-filter area (normally the whole table)
    pub auto_filter: Option<CellRange>,
}

impl Table {
    /// Create a table over `area` with one column per name
    ///
    /// The table is named `Table<id>`. Fails if the number of names differs
    /// from the area's width, if the area has no room for a body row, or if a
    /// name is empty or repeats another one (ignoring case).
    pub fn new<I, S>(id: u32, area: CellRange, column_names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if id == 0 {
            return Err(Error::InvalidTable("table ids start at 1".into()));
        }

        let columns: Vec<TableColumn> = column_names
            .into_iter()
            .zip(1u32..)
            .map(|(name, id)| TableColumn {
                id,
                name: name.into(),
            })
            .collect();

        if columns.len() != area.col_count() as usize {
            return Err(Error::InvalidTable(format!(
                "{} column names for area {} ({} columns wide)",
                columns.len(),
                area,
                area.col_count()
            )));
        }
        let mut seen = AHashSet::with_capacity(columns.len());
        for column in &columns {
            if column.name.is_empty() {
                return Err(Error::InvalidTable(format!(
                    "column {} of area {} has an empty name",
                    column.id, area
                )));
            }
            if !seen.insert(column.name.to_lowercase()) {
                return Err(Error::InvalidTable(format!(
                    "duplicate column name '{}' in area {}",
                    column.name, area
                )));
            }
        }
        if area.row_count() < 2 {
            return Err(Error::InvalidTable(format!(
                "area {} needs a header row and at least one body row",
                area
            )));
        }

        let name = format!("Table{}", id);
        Ok(Self {
            id,
            display_name: name.clone(),
            name,
            area,
            columns,
            style: TableStyleInfo::default(),
            auto_filter: None,
        })
    }

    /// Workbook-wide table id (1-based)
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Cell area covered by the table, header row included
    pub fn area(&self) -> CellRange {
        self.area
    }

    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    /// Replace the generated `Table<id>` names (used when reading files)
    pub fn with_names<N: Into<String>, D: Into<String>>(mut self, name: N, display_name: D) -> Self {
        self.name = name.into();
        self.display_name = display_name.into();
        self
    }

    /// Set the style and return self
    pub fn with_style(mut self, style: TableStyleInfo) -> Self {
        self.style = style;
        self
    }

    /// Filter over the whole table area
    pub fn with_auto_filter(mut self) -> Self {
        self.auto_filter = Some(self.area);
        self
    }
}
