//! Error types for BIG archive operations

use thiserror::Error;

/// BIG archive operation result type
pub type BigResult<T> = Result<T, BigError>;

/// Error types for BIG archive reading and entry access
#[derive(Debug, Error)]
pub enum BigError {
    /// Input stream cannot be seeked
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// Archive magic is neither of the accepted spellings
    #[error("Invalid BIG magic: {0:02x?}")]
    InvalidMagic([u8; 4]),

    /// Bank or entry created with an empty name
    #[error("Empty {kind} name")]
    EmptyName {
        /// What was being named ("bank" or "entry")
        kind: &'static str,
    },

    /// Binary read/write error
    #[error("Binary format error: {0}")]
    BinRead(#[from] binrw::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BigError {
    /// Check if this error means the input is not a usable BIG archive
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidMagic(_) | Self::EmptyName { .. } | Self::BinRead(_)
        )
    }

    /// Check if this error comes from the input itself rather than its contents
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::UnsupportedInput(_) | Self::Io(_))
    }
}
