//! Error types for benc operations.

use thiserror::Error;

/// Result type for benc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for benc operations.
///
/// Every failing operation leaves the caller's offset untouched: an `Err`
/// carries no offset, so the one passed in is still the valid one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Not enough bytes left in the buffer, on either the encode or decode side.
    #[error("buffer too small: needed {needed} bytes, only {available} available")]
    BufferTooSmall { needed: usize, available: usize },

    /// Varint ran past its byte budget or its last byte carried bits that do not fit.
    #[error("varint overflow")]
    Overflow,

    /// Boolean or presence byte other than 0 or 1.
    #[error("invalid bool byte: {0:#04x}")]
    InvalidBool(u8),

    /// Invalid UTF-8 string.
    #[error("invalid UTF-8 string")]
    InvalidUtf8,

    /// Container terminator did not match `01 01 01 01`.
    #[error("invalid container terminator: {0:02x?}")]
    InvalidTerminator([u8; 4]),

    /// Declared element count is above the configured limit.
    #[error("container holds {count} elements, limit is {max}")]
    TooManyElements { count: usize, max: usize },

    /// Final offset disagrees with the buffer length.
    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

impl Error {
    /// Creates a buffer too small error.
    pub fn buffer_too_small(needed: usize, available: usize) -> Self {
        Self::BufferTooSmall { needed, available }
    }

    /// Creates a size mismatch error.
    pub fn size_mismatch(expected: usize, actual: usize) -> Self {
        Self::SizeMismatch { expected, actual }
    }

    /// Returns true for [`Error::BufferTooSmall`].
    pub fn is_buffer_too_small(&self) -> bool {
        matches!(self, Self::BufferTooSmall { .. })
    }

    /// Returns true for [`Error::Overflow`].
    pub fn is_overflow(&self) -> bool {
        matches!(self, Self::Overflow)
    }
}

/// Fails with `BufferTooSmall` unless `needed` bytes are available at `offset`.
#[inline]
pub(crate) fn check_available(len: usize, offset: usize, needed: usize) -> Result<()> {
    let available = len.saturating_sub(offset);
    if needed > available {
        return Err(Error::buffer_too_small(needed, available));
    }
    Ok(())
}
