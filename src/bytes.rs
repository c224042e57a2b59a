//! Length-prefixed byte blobs and strings.
//!
//! Layout is `varint(len) · bytes`, with no padding and no terminator.
//! The `*_view` decoders borrow from the source buffer; the others copy.

use crate::error::{check_available, Error, Result};
use crate::varint::{marshal_uint, size_uint, unmarshal_len};

/// Returns the encoded size of a byte blob.
#[inline]
pub fn size_bytes(b: &[u8]) -> usize {
    size_uint(b.len() as u64) + b.len()
}

/// Writes a length-prefixed byte blob.
pub fn marshal_bytes(buf: &mut [u8], offset: usize, b: &[u8]) -> Result<usize> {
    check_available(buf.len(), offset, size_bytes(b))?;
    let start = marshal_uint(buf, offset, b.len() as u64)?;
    let end = start + b.len();
    buf[start..end].copy_from_slice(b);
    Ok(end)
}

/// Reads a length-prefixed byte blob as a slice of `buf`.
///
/// The slice aliases the source buffer and lives only as long as it does.
pub fn unmarshal_bytes_view(buf: &[u8], offset: usize) -> Result<(&[u8], usize)> {
    let (len, start) = unmarshal_len(buf, offset)?;
    check_available(buf.len(), start, len)?;
    let end = start + len;
    Ok((&buf[start..end], end))
}

/// Reads a length-prefixed byte blob into an owned vector.
pub fn unmarshal_bytes(buf: &[u8], offset: usize) -> Result<(Vec<u8>, usize)> {
    let (view, end) = unmarshal_bytes_view(buf, offset)?;
    Ok((view.to_vec(), end))
}

/// Skips a length-prefixed byte blob without looking at its content.
pub fn skip_bytes(buf: &[u8], offset: usize) -> Result<usize> {
    let (len, start) = unmarshal_len(buf, offset)?;
    check_available(buf.len(), start, len)?;
    Ok(start + len)
}

/// Returns the encoded size of a string.
#[inline]
pub fn size_string(s: &str) -> usize {
    size_bytes(s.as_bytes())
}

/// Writes a length-prefixed UTF-8 string.
pub fn marshal_string(buf: &mut [u8], offset: usize, s: &str) -> Result<usize> {
    marshal_bytes(buf, offset, s.as_bytes())
}

/// Reads a string as a slice of `buf`.
pub fn unmarshal_string_view(buf: &[u8], offset: usize) -> Result<(&str, usize)> {
    let (bytes, end) = unmarshal_bytes_view(buf, offset)?;
    let s = std::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)?;
    Ok((s, end))
}

/// Reads a string into an owned `String`.
pub fn unmarshal_string(buf: &[u8], offset: usize) -> Result<(String, usize)> {
    let (s, end) = unmarshal_string_view(buf, offset)?;
    Ok((s.to_owned(), end))
}

/// Skips a string. The payload is not validated as UTF-8.
pub fn skip_string(buf: &[u8], offset: usize) -> Result<usize> {
    skip_bytes(buf, offset)
}
