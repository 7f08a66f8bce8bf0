//! Error types for QST file operations

use thiserror::Error;

/// QST operation result type
pub type QstResult<T> = Result<T, QstError>;

/// Error types for QST loading and saving
///
/// Parsing itself never fails; malformed calls are skipped.
#[derive(Debug, Error)]
pub enum QstError {
    /// Save called with no explicit path and no remembered source path
    #[error("Invalid operation: no output path given and the file was not loaded from disk")]
    NoOutputPath,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
