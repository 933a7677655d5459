//! Cell comments (notes)

/// A note attached to a cell
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellComment {
    /// Author of the comment (may be empty)
    pub author: String,
    /// Comment text content
    pub text: String,
}

impl CellComment {
    /// Create a new comment with the given author and text
    ///
    /// ```rust
    /// use sheetcraft_core::CellComment;
    ///
    /// let comment = CellComment::new("Reviewer", "Check this total");
    /// assert_eq!(comment.author, "Reviewer");
    /// ```
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
        }
    }

    /// Create a comment with just text (empty author)
    pub fn text_only(text: impl Into<String>) -> Self {
        Self::new(String::new(), text)
    }
}
