//! Column settings

use crate::{COLUMN_WIDTH_UNITS_PER_CHAR, DEFAULT_COLUMN_WIDTH_UNITS};

/// Per-column settings of a worksheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column index (0-based)
    pub index: u16,
    /// Custom width in 1/256 of a character (None = sheet default)
    pub width: Option<u32>,
    /// Default style for the column (None = no column style)
    pub style_index: Option<u32>,
    /// Column is hidden
    pub hidden: bool,
}

impl Column {
    /// Create a new column with default settings
    pub fn new(index: u16) -> Self {
        Self {
            index,
            width: None,
            style_index: None,
            hidden: false,
        }
    }

    /// Width in native units, falling back to the default width
    pub fn width_units(&self) -> u32 {
        self.width.unwrap_or(DEFAULT_COLUMN_WIDTH_UNITS)
    }

    /// Width in characters, as written to the `<col width>` attribute
    pub fn width_chars(&self) -> f64 {
        self.width_units() as f64 / COLUMN_WIDTH_UNITS_PER_CHAR as f64
    }

    /// Check if this column has any custom settings
    pub fn has_custom_settings(&self) -> bool {
        self.width.is_some() || self.style_index.is_some() || self.hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_width() {
        let col = Column::new(0);
        assert_eq!(col.width_units(), 2048);
        assert_eq!(col.width_chars(), 8.0);
        assert!(!col.has_custom_settings());
    }

    #[test]
    fn test_custom_width() {
        let mut col = Column::new(2);
        col.width = Some(5120);
        assert_eq!(col.width_chars(), 20.0);
        assert!(col.has_custom_settings());
    }
}
