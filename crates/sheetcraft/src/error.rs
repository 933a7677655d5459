//! Builder error types

use thiserror::Error;

use sheetcraft_xlsx::XlsxError;

/// Result type for builder operations and blocks
pub type Result<T> = std::result::Result<T, BuildError>;

/// Errors that end a build
#[derive(Debug, Error)]
pub enum BuildError {
    /// The builder was used in a way it cannot honour (e.g. a table without columns)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Raised by the workbook model and passed through unchanged
    #[error(transparent)]
    Engine(#[from] sheetcraft_core::Error),

    /// Serialization failed
    #[error(transparent)]
    Xlsx(#[from] XlsxError),

    /// Writing the finished bytes to the sink failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    /// Create a configuration error with a message
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        BuildError::Configuration(msg.into())
    }
}
