//! Base-128 varints and zigzag-mapped signed varints.
//!
//! Each byte carries 7 value bits, least significant group first; the high
//! bit is set on every byte except the last.

use crate::error::{check_available, Error, Result};

/// Maximum number of bytes for a varint-encoded u64.
/// A u64 has 64 bits and each varint byte encodes 7 bits,
/// so we need ceil(64/7) = 10 bytes maximum.
pub const MAX_VARINT_LEN_64: usize = 10;

/// Maximum number of bytes for a varint-encoded u32.
pub const MAX_VARINT_LEN_32: usize = 5;

/// Maps a signed 32-bit integer onto an unsigned one so small magnitudes stay small.
#[inline]
pub fn encode_zigzag_32(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

/// Maps a signed 64-bit integer onto an unsigned one so small magnitudes stay small.
#[inline]
pub fn encode_zigzag_64(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Inverse of [`encode_zigzag_32`].
#[inline]
pub fn decode_zigzag_32(n: u32) -> i32 {
    ((n >> 1) as i32) ^ (-((n & 1) as i32))
}

/// Inverse of [`encode_zigzag_64`].
#[inline]
pub fn decode_zigzag_64(n: u64) -> i64 {
    ((n >> 1) as i64) ^ (-((n & 1) as i64))
}

/// Walks one varint starting at `offset`, feeding each byte to `visit`.
///
/// `last_byte_max` is the largest value the final byte of a full-length
/// varint may hold. Returns the offset just past the terminating byte.
#[inline]
fn walk_varint(
    buf: &[u8],
    offset: usize,
    max_len: usize,
    last_byte_max: u8,
    mut visit: impl FnMut(usize, u8),
) -> Result<usize> {
    let mut pos = offset;
    for i in 0..max_len {
        if pos >= buf.len() {
            return Err(Error::buffer_too_small(i + 1, i));
        }
        let b = buf[pos];
        pos += 1;

        // The final byte can only contribute the leftover high bits; anything
        // larger (continuation bit included) cannot fit the integer.
        if i == max_len - 1 && b > last_byte_max {
            return Err(Error::Overflow);
        }

        visit(i, b & 0x7f);
        if b & 0x80 == 0 {
            return Ok(pos);
        }
    }

    Err(Error::Overflow)
}

/// Returns the encoded size of an unsigned varint.
#[inline]
pub fn size_uint(v: u64) -> usize {
    let bits = 64 - (v | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Writes an unsigned varint at `offset` and returns the offset past it.
pub fn marshal_uint(buf: &mut [u8], offset: usize, v: u64) -> Result<usize> {
    check_available(buf.len(), offset, size_uint(v))?;

    let mut value = v;
    let mut pos = offset;
    while value > 0x7f {
        buf[pos] = (value as u8 & 0x7f) | 0x80;
        value >>= 7;
        pos += 1;
    }
    buf[pos] = value as u8;
    Ok(pos + 1)
}

/// Reads an unsigned 64-bit varint.
pub fn unmarshal_uint(buf: &[u8], offset: usize) -> Result<(u64, usize)> {
    let mut result: u64 = 0;
    let end = walk_varint(buf, offset, MAX_VARINT_LEN_64, 1, |i, bits| {
        result |= u64::from(bits) << (7 * i);
    })?;
    Ok((result, end))
}

/// Skips an unsigned 64-bit varint.
pub fn skip_uint(buf: &[u8], offset: usize) -> Result<usize> {
    walk_varint(buf, offset, MAX_VARINT_LEN_64, 1, |_, _| {})
}

/// Returns the encoded size of a 32-bit unsigned varint.
#[inline]
pub fn size_uint32(v: u32) -> usize {
    size_uint(u64::from(v))
}

/// Writes a 32-bit unsigned varint.
pub fn marshal_uint32(buf: &mut [u8], offset: usize, v: u32) -> Result<usize> {
    marshal_uint(buf, offset, u64::from(v))
}

/// Reads a 32-bit unsigned varint. At most 5 bytes are consumed and the
/// fifth may only carry the top 4 bits.
pub fn unmarshal_uint32(buf: &[u8], offset: usize) -> Result<(u32, usize)> {
    let mut result: u32 = 0;
    let end = walk_varint(buf, offset, MAX_VARINT_LEN_32, 0x0f, |i, bits| {
        result |= u32::from(bits) << (7 * i);
    })?;
    Ok((result, end))
}

/// Skips a 32-bit unsigned varint.
pub fn skip_uint32(buf: &[u8], offset: usize) -> Result<usize> {
    walk_varint(buf, offset, MAX_VARINT_LEN_32, 0x0f, |_, _| {})
}

/// Returns the encoded size of a zigzag signed varint.
#[inline]
pub fn size_int(v: i64) -> usize {
    size_uint(encode_zigzag_64(v))
}

/// Writes a zigzag signed varint.
pub fn marshal_int(buf: &mut [u8], offset: usize, v: i64) -> Result<usize> {
    marshal_uint(buf, offset, encode_zigzag_64(v))
}

/// Reads a zigzag signed varint.
pub fn unmarshal_int(buf: &[u8], offset: usize) -> Result<(i64, usize)> {
    let (u, end) = unmarshal_uint(buf, offset)?;
    Ok((decode_zigzag_64(u), end))
}

/// Skips a zigzag signed varint.
pub fn skip_int(buf: &[u8], offset: usize) -> Result<usize> {
    skip_uint(buf, offset)
}

/// Returns the encoded size of a 32-bit zigzag varint.
pub fn size_int32(v: i32) -> usize {
    size_uint32(encode_zigzag_32(v))
}

/// Writes a 32-bit zigzag varint.
pub fn marshal_int32(buf: &mut [u8], offset: usize, v: i32) -> Result<usize> {
    marshal_uint32(buf, offset, encode_zigzag_32(v))
}

/// Reads a 32-bit zigzag varint within the 5-byte window.
pub fn unmarshal_int32(buf: &[u8], offset: usize) -> Result<(i32, usize)> {
    let (u, end) = unmarshal_uint32(buf, offset)?;
    Ok((decode_zigzag_32(u), end))
}

/// Skips a 32-bit zigzag varint.
pub fn skip_int32(buf: &[u8], offset: usize) -> Result<usize> {
    skip_uint32(buf, offset)
}

/// Returns the encoded size of a native-width unsigned integer.
/// Native widths always travel as 64-bit varints.
#[inline]
pub fn size_usize(v: usize) -> usize {
    size_uint(v as u64)
}

/// Writes a native-width unsigned integer as a 64-bit varint.
pub fn marshal_usize(buf: &mut [u8], offset: usize, v: usize) -> Result<usize> {
    marshal_uint(buf, offset, v as u64)
}

/// Reads a native-width unsigned integer. Values that do not fit the
/// platform's `usize` fail with `Overflow`.
pub fn unmarshal_usize(buf: &[u8], offset: usize) -> Result<(usize, usize)> {
    let (u, end) = unmarshal_uint(buf, offset)?;
    let v = usize::try_from(u).map_err(|_| Error::Overflow)?;
    Ok((v, end))
}

/// Skips a native-width unsigned integer.
pub fn skip_usize(buf: &[u8], offset: usize) -> Result<usize> {
    skip_uint(buf, offset)
}

/// Returns the encoded size of a native-width signed integer.
#[inline]
pub fn size_isize(v: isize) -> usize {
    size_int(v as i64)
}

/// Writes a native-width signed integer as a 64-bit zigzag varint.
pub fn marshal_isize(buf: &mut [u8], offset: usize, v: isize) -> Result<usize> {
    marshal_int(buf, offset, v as i64)
}

/// Reads a native-width signed integer. Values that do not fit the
/// platform's `isize` fail with `Overflow`.
pub fn unmarshal_isize(buf: &[u8], offset: usize) -> Result<(isize, usize)> {
    let (i, end) = unmarshal_int(buf, offset)?;
    let v = isize::try_from(i).map_err(|_| Error::Overflow)?;
    Ok((v, end))
}

/// Skips a native-width signed integer.
pub fn skip_isize(buf: &[u8], offset: usize) -> Result<usize> {
    skip_int(buf, offset)
}

/// Reads a varint length prefix and converts it to `usize`.
///
/// A length that cannot be addressed on this platform can never be backed
/// by the buffer, so it is reported as `BufferTooSmall`.
pub(crate) fn unmarshal_len(buf: &[u8], offset: usize) -> Result<(usize, usize)> {
    let (len, end) = unmarshal_uint(buf, offset)?;
    let len = usize::try_from(len)
        .map_err(|_| Error::buffer_too_small(usize::MAX, buf.len().saturating_sub(end)))?;
    Ok((len, end))
}
