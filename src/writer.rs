//! Cursor for encoding into a pre-sized buffer.

use crate::bytes::{marshal_bytes, marshal_string};
use crate::codec::Codec;
use crate::container::{marshal_map, marshal_slice};
use crate::error::{Error, Result};
use crate::fixed::*;
use crate::optional::marshal_option;
#[cfg(feature = "chrono")]
use crate::time::marshal_time;
use crate::varint::{
    marshal_int, marshal_int32, marshal_isize, marshal_uint, marshal_uint32, marshal_usize,
};

/// Writer encodes values into a caller-owned buffer.
///
/// The buffer must already be sized with the `size_*` functions; the
/// writer never grows it. A failed write leaves the position unchanged.
pub struct Writer<'b> {
    buffer: &'b mut [u8],
    pos: usize,
}

impl<'b> Writer<'b> {
    /// Creates a writer starting at the beginning of `buffer`.
    pub fn new(buffer: &'b mut [u8]) -> Self {
        Self::at(buffer, 0)
    }

    /// Creates a writer starting at `offset`.
    pub fn at(buffer: &'b mut [u8], offset: usize) -> Self {
        Self {
            buffer,
            pos: offset,
        }
    }

    /// Returns the current position in the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes left to fill.
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.pos)
    }

    /// Returns the bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.pos.min(self.buffer.len())]
    }

    /// Checks that the buffer was filled exactly and returns its length.
    pub fn finish(self) -> Result<usize> {
        if self.pos != self.buffer.len() {
            return Err(Error::size_mismatch(self.buffer.len(), self.pos));
        }
        Ok(self.pos)
    }

    /// Runs an offset-style marshaler at the current position.
    pub fn write_with(
        &mut self,
        marshaler: impl FnOnce(&mut [u8], usize) -> Result<usize>,
    ) -> Result<()> {
        self.pos = marshaler(self.buffer, self.pos)?;
        Ok(())
    }

    /// Writes any [`Codec`] value.
    pub fn write<'de, T: Codec<'de>>(&mut self, value: &T) -> Result<()> {
        self.write_with(|buf, n| value.marshal(buf, n))
    }

    /// Writes an unsigned varint.
    pub fn write_uint(&mut self, value: u64) -> Result<()> {
        self.write_with(|buf, n| marshal_uint(buf, n, value))
    }

    /// Writes a zigzag signed varint.
    pub fn write_int(&mut self, value: i64) -> Result<()> {
        self.write_with(|buf, n| marshal_int(buf, n, value))
    }

    /// Writes a 32-bit unsigned varint.
    pub fn write_uint32(&mut self, value: u32) -> Result<()> {
        self.write_with(|buf, n| marshal_uint32(buf, n, value))
    }

    /// Writes a 32-bit zigzag signed varint.
    pub fn write_int32(&mut self, value: i32) -> Result<()> {
        self.write_with(|buf, n| marshal_int32(buf, n, value))
    }

    /// Writes a native-width unsigned integer as a 64-bit varint.
    pub fn write_usize(&mut self, value: usize) -> Result<()> {
        self.write_with(|buf, n| marshal_usize(buf, n, value))
    }

    /// Writes a native-width signed integer as a 64-bit zigzag varint.
    pub fn write_isize(&mut self, value: isize) -> Result<()> {
        self.write_with(|buf, n| marshal_isize(buf, n, value))
    }

    /// Writes a raw byte.
    pub fn write_byte(&mut self, value: u8) -> Result<()> {
        self.write_with(|buf, n| marshal_u8(buf, n, value))
    }

    /// Writes a signed byte.
    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_with(|buf, n| marshal_i8(buf, n, value))
    }

    /// Writes a boolean.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_with(|buf, n| marshal_bool(buf, n, value))
    }

    /// Writes a fixed 16-bit value (little-endian).
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_with(|buf, n| marshal_u16(buf, n, value))
    }

    /// Writes a fixed signed 16-bit value (little-endian).
    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.write_with(|buf, n| marshal_i16(buf, n, value))
    }

    /// Writes a fixed 32-bit value (little-endian).
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_with(|buf, n| marshal_u32(buf, n, value))
    }

    /// Writes a fixed signed 32-bit value (little-endian).
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_with(|buf, n| marshal_i32(buf, n, value))
    }

    /// Writes a fixed 64-bit value (little-endian).
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.write_with(|buf, n| marshal_u64(buf, n, value))
    }

    /// Writes a fixed signed 64-bit value (little-endian).
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_with(|buf, n| marshal_i64(buf, n, value))
    }

    /// Writes a 32-bit float (IEEE 754, little-endian).
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_with(|buf, n| marshal_f32(buf, n, value))
    }

    /// Writes a 64-bit float (IEEE 754, little-endian).
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_with(|buf, n| marshal_f64(buf, n, value))
    }

    /// Writes a UTC timestamp as fixed i64 nanoseconds.
    #[cfg(feature = "chrono")]
    pub fn write_time(&mut self, value: &chrono::DateTime<chrono::Utc>) -> Result<()> {
        self.write_with(|buf, n| marshal_time(buf, n, value))
    }

    /// Writes a length-prefixed string.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_with(|buf, n| marshal_string(buf, n, value))
    }

    /// Writes length-prefixed bytes.
    pub fn write_bytes(&mut self, value: &[u8]) -> Result<()> {
        self.write_with(|buf, n| marshal_bytes(buf, n, value))
    }

    /// Writes a sequence using `marshaler` for each element.
    pub fn write_slice<T>(
        &mut self,
        items: &[T],
        marshaler: impl Fn(&mut [u8], usize, &T) -> Result<usize>,
    ) -> Result<()> {
        self.write_with(|buf, n| marshal_slice(buf, n, items, marshaler))
    }

    /// Writes a map from its `(key, value)` iterator.
    pub fn write_map<'m, K: 'm, V: 'm, I>(
        &mut self,
        map: I,
        key_marshaler: impl Fn(&mut [u8], usize, &K) -> Result<usize>,
        value_marshaler: impl Fn(&mut [u8], usize, &V) -> Result<usize>,
    ) -> Result<()>
    where
        I: IntoIterator<Item = (&'m K, &'m V)>,
        I::IntoIter: ExactSizeIterator,
    {
        self.write_with(|buf, n| marshal_map(buf, n, map, key_marshaler, value_marshaler))
    }

    /// Writes an optional value.
    pub fn write_option<T>(
        &mut self,
        value: &Option<T>,
        marshaler: impl Fn(&mut [u8], usize, &T) -> Result<usize>,
    ) -> Result<()> {
        self.write_with(|buf, n| marshal_option(buf, n, value, marshaler))
    }
}
