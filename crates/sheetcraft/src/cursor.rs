//! Position tracking for builder scopes

use sheetcraft_core::{Error, MAX_COLS};

use crate::error::Result;

/// Next free column of a row
///
/// Starts one past the row's last occupied column, so appending to a row that
/// already has cells continues after them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCursor {
    next_col: u32,
}

impl RowCursor {
    /// Cursor for a row whose last occupied column is `last_col`
    pub fn after(last_col: Option<u16>) -> Self {
        Self {
            next_col: last_col.map_or(0, |c| u32::from(c) + 1),
        }
    }

    /// Column the next cell goes to
    pub fn peek(&self) -> u32 {
        self.next_col
    }

    /// Take the next column and move past it
    pub fn advance(&mut self) -> Result<u16> {
        let col = u16::try_from(self.next_col)
            .ok()
            .filter(|&c| c < MAX_COLS)
            .ok_or(Error::ColumnOutOfBounds(self.next_col, MAX_COLS - 1))?;
        self.next_col += 1;
        Ok(col)
    }
}

/// Row spacing of a sheet, with a pending skip consumed by the next row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipCursor {
    pending: u32,
}

impl Default for SkipCursor {
    fn default() -> Self {
        Self { pending: 1 }
    }
}

impl SkipCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave `n` blank rows before the next row
    pub fn skip(&mut self, n: u32) {
        self.pending = n.saturating_add(1);
    }

    /// Distance from the last row to the next one
    pub fn pending(&self) -> u32 {
        self.pending
    }

    /// Index of the next row given the sheet's last row, resetting the skip
    ///
    /// An empty sheet behaves as if its last row were -1.
    pub fn next_row(&mut self, last_row: Option<u32>) -> u32 {
        let next = match last_row {
            Some(last) => last.saturating_add(self.pending),
            None => self.pending - 1,
        };
        self.pending = 1;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_cursor_starts_after_last_cell() {
        let mut fresh = RowCursor::after(None);
        assert_eq!(fresh.advance().unwrap(), 0);
        assert_eq!(fresh.advance().unwrap(), 1);
        assert_eq!(fresh.peek(), 2);

        let mut existing = RowCursor::after(Some(4));
        assert_eq!(existing.advance().unwrap(), 5);
    }

    #[test]
    fn test_row_cursor_stops_at_last_column() {
        let mut cursor = RowCursor::after(Some(MAX_COLS - 1));
        assert!(matches!(
            cursor.advance(),
            Err(crate::BuildError::Engine(Error::ColumnOutOfBounds(16384, _)))
        ));
    }

    #[test]
    fn test_skip_is_consumed_once() {
        let mut cursor = SkipCursor::new();
        assert_eq!(cursor.next_row(None), 0);
        assert_eq!(cursor.next_row(Some(0)), 1);

        cursor.skip(2);
        assert_eq!(cursor.pending(), 3);
        assert_eq!(cursor.next_row(Some(1)), 4);
        assert_eq!(cursor.next_row(Some(4)), 5);
    }

    #[test]
    fn test_skip_on_empty_sheet() {
        let mut cursor = SkipCursor::new();
        cursor.skip(3);
        assert_eq!(cursor.next_row(None), 3);

        cursor.skip(0);
        assert_eq!(cursor.next_row(Some(3)), 4);
    }
}
