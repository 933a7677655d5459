//! Build configuration

use sheetcraft_core::{NumberFormat, TableStyleInfo};

/// Settings shared by every builder of one build
///
/// ```rust
/// use sheetcraft::{BuildOptions, NumberFormat, TableStyleInfo};
///
/// let options = BuildOptions::default()
///     .with_date_format(NumberFormat::datetime())
///     .with_table_style(TableStyleInfo::named("TableStyleLight13").with_column_stripes(true));
/// assert_eq!(options.table_style.name.as_deref(), Some("TableStyleLight13"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// Number format given to date and time cells (default: built-in 14, short date)
    pub date_format: NumberFormat,
    /// Style for tables whose block doesn't call `style`
    pub table_style: TableStyleInfo,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            date_format: NumberFormat::date_short(),
            table_style: TableStyleInfo::medium9(),
        }
    }
}

impl BuildOptions {
    pub fn with_date_format(mut self, format: NumberFormat) -> Self {
        self.date_format = format;
        self
    }

    pub fn with_table_style(mut self, style: TableStyleInfo) -> Self {
        self.table_style = style;
        self
    }
}
