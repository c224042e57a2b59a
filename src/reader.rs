//! Cursor for decoding and skipping.

use crate::bytes::{
    skip_bytes, skip_string, unmarshal_bytes, unmarshal_bytes_view, unmarshal_string,
    unmarshal_string_view,
};
use crate::codec::Codec;
use crate::container::{skip_map_with, skip_slice_with, unmarshal_map_with, unmarshal_slice_with};
use crate::error::{Error, Result};
use crate::fixed::*;
use crate::optional::{skip_option, unmarshal_option};
use crate::options::DecodeOptions;
#[cfg(feature = "chrono")]
use crate::time::{skip_time, unmarshal_time};
use crate::varint::{
    skip_int, skip_int32, skip_isize, skip_uint, skip_uint32, skip_usize, unmarshal_int,
    unmarshal_int32, unmarshal_isize, unmarshal_uint, unmarshal_uint32, unmarshal_usize,
};

/// Reader decodes values from a borrowed buffer.
///
/// The position only moves when a read or skip succeeds, so after an
/// error it still points at the start of the value that failed.
pub struct Reader<'a> {
    buffer: &'a [u8],
    pos: usize,
    options: DecodeOptions,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, DecodeOptions::default())
    }

    /// Creates a reader that applies `options` to containers.
    pub fn with_options(data: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            buffer: data,
            pos: 0,
            options,
        }
    }

    /// Returns the decode options in effect.
    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Returns the current position in the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes remaining.
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.pos)
    }

    /// Returns true if there is more data to read.
    pub fn has_more(&self) -> bool {
        self.pos < self.buffer.len()
    }

    /// Checks that the whole buffer was consumed.
    pub fn finish(&self) -> Result<()> {
        if self.pos != self.buffer.len() {
            return Err(Error::size_mismatch(self.buffer.len(), self.pos));
        }
        Ok(())
    }

    /// Runs an offset-style unmarshaler at the current position.
    pub fn read_with<T>(
        &mut self,
        unmarshaler: impl FnOnce(&'a [u8], usize) -> Result<(T, usize)>,
    ) -> Result<T> {
        let (value, n) = unmarshaler(self.buffer, self.pos)?;
        self.pos = n;
        Ok(value)
    }

    /// Runs an offset-style skipper at the current position.
    pub fn skip_with(&mut self, skipper: impl FnOnce(&[u8], usize) -> Result<usize>) -> Result<()> {
        self.pos = skipper(self.buffer, self.pos)?;
        Ok(())
    }

    /// Reads any [`Codec`] value. The reader's options apply to every
    /// container inside it.
    pub fn read<T: Codec<'a>>(&mut self) -> Result<T> {
        let opts = self.options;
        self.read_with(|buf, n| T::unmarshal_with(buf, n, opts))
    }

    /// Skips any [`Codec`] value.
    pub fn skip<T: Codec<'a>>(&mut self) -> Result<()> {
        let opts = self.options;
        self.skip_with(|buf, n| T::skip_with(buf, n, opts))
    }

    /// Reads an unsigned 64-bit varint.
    pub fn read_uint(&mut self) -> Result<u64> {
        self.read_with(unmarshal_uint)
    }

    /// Reads a zigzag signed 64-bit varint.
    pub fn read_int(&mut self) -> Result<i64> {
        self.read_with(unmarshal_int)
    }

    /// Reads an unsigned 32-bit varint.
    pub fn read_uint32(&mut self) -> Result<u32> {
        self.read_with(unmarshal_uint32)
    }

    /// Reads a zigzag signed 32-bit varint.
    pub fn read_int32(&mut self) -> Result<i32> {
        self.read_with(unmarshal_int32)
    }

    /// Reads a native-width unsigned varint.
    pub fn read_usize(&mut self) -> Result<usize> {
        self.read_with(unmarshal_usize)
    }

    /// Reads a native-width zigzag varint.
    pub fn read_isize(&mut self) -> Result<isize> {
        self.read_with(unmarshal_isize)
    }

    /// Reads a raw byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        self.read_with(unmarshal_u8)
    }

    /// Reads a signed byte.
    pub fn read_i8(&mut self) -> Result<i8> {
        self.read_with(unmarshal_i8)
    }

    /// Reads a boolean; only 0 and 1 are accepted.
    pub fn read_bool(&mut self) -> Result<bool> {
        self.read_with(unmarshal_bool)
    }

    /// Reads a fixed 16-bit value (little-endian).
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_with(unmarshal_u16)
    }

    /// Reads a fixed signed 16-bit value (little-endian).
    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_with(unmarshal_i16)
    }

    /// Reads a fixed 32-bit value (little-endian).
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_with(unmarshal_u32)
    }

    /// Reads a fixed signed 32-bit value (little-endian).
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_with(unmarshal_i32)
    }

    /// Reads a fixed 64-bit value (little-endian).
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_with(unmarshal_u64)
    }

    /// Reads a fixed signed 64-bit value (little-endian).
    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_with(unmarshal_i64)
    }

    /// Reads a 32-bit float (IEEE 754, little-endian).
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_with(unmarshal_f32)
    }

    /// Reads a 64-bit float (IEEE 754, little-endian).
    pub fn read_f64(&mut self) -> Result<f64> {
        self.read_with(unmarshal_f64)
    }

    /// Reads a UTC timestamp.
    #[cfg(feature = "chrono")]
    pub fn read_time(&mut self) -> Result<chrono::DateTime<chrono::Utc>> {
        self.read_with(unmarshal_time)
    }

    /// Reads a length-prefixed string borrowed from the buffer.
    pub fn read_str(&mut self) -> Result<&'a str> {
        self.read_with(unmarshal_string_view)
    }

    /// Reads a length-prefixed string into an owned `String`.
    pub fn read_string(&mut self) -> Result<String> {
        self.read_with(unmarshal_string)
    }

    /// Reads length-prefixed bytes borrowed from the buffer.
    pub fn read_bytes_view(&mut self) -> Result<&'a [u8]> {
        self.read_with(unmarshal_bytes_view)
    }

    /// Reads length-prefixed bytes into an owned vector.
    pub fn read_bytes(&mut self) -> Result<Vec<u8>> {
        self.read_with(unmarshal_bytes)
    }

    /// Reads a sequence using `unmarshaler` for each element.
    pub fn read_slice<T>(
        &mut self,
        unmarshaler: impl Fn(&'a [u8], usize) -> Result<(T, usize)>,
    ) -> Result<Vec<T>> {
        let opts = self.options;
        self.read_with(|buf, n| unmarshal_slice_with(buf, n, opts, unmarshaler))
    }

    /// Reads a map into any collection built from `(key, value)` pairs.
    pub fn read_map<M, K, V>(
        &mut self,
        key_unmarshaler: impl Fn(&'a [u8], usize) -> Result<(K, usize)>,
        value_unmarshaler: impl Fn(&'a [u8], usize) -> Result<(V, usize)>,
    ) -> Result<M>
    where
        M: FromIterator<(K, V)>,
    {
        let opts = self.options;
        self.read_with(|buf, n| {
            unmarshal_map_with(buf, n, opts, key_unmarshaler, value_unmarshaler)
        })
    }

    /// Reads an optional value.
    pub fn read_option<T>(
        &mut self,
        unmarshaler: impl Fn(&'a [u8], usize) -> Result<(T, usize)>,
    ) -> Result<Option<T>> {
        self.read_with(|buf, n| unmarshal_option(buf, n, unmarshaler))
    }

    /// Skips an unsigned 64-bit varint.
    pub fn skip_uint(&mut self) -> Result<()> {
        self.skip_with(skip_uint)
    }

    /// Skips a zigzag signed 64-bit varint.
    pub fn skip_int(&mut self) -> Result<()> {
        self.skip_with(skip_int)
    }

    /// Skips an unsigned 32-bit varint.
    pub fn skip_uint32(&mut self) -> Result<()> {
        self.skip_with(skip_uint32)
    }

    /// Skips a zigzag signed 32-bit varint.
    pub fn skip_int32(&mut self) -> Result<()> {
        self.skip_with(skip_int32)
    }

    /// Skips a native-width unsigned varint.
    pub fn skip_usize(&mut self) -> Result<()> {
        self.skip_with(skip_usize)
    }

    /// Skips a native-width zigzag varint.
    pub fn skip_isize(&mut self) -> Result<()> {
        self.skip_with(skip_isize)
    }

    /// Skips a raw byte.
    pub fn skip_byte(&mut self) -> Result<()> {
        self.skip_with(skip_u8)
    }

    /// Skips a signed byte.
    pub fn skip_i8(&mut self) -> Result<()> {
        self.skip_with(skip_i8)
    }

    /// Skips a boolean. The byte itself is not inspected.
    pub fn skip_bool(&mut self) -> Result<()> {
        self.skip_with(skip_bool)
    }

    /// Skips a fixed 16-bit value.
    pub fn skip_u16(&mut self) -> Result<()> {
        self.skip_with(skip_u16)
    }

    /// Skips a fixed signed 16-bit value.
    pub fn skip_i16(&mut self) -> Result<()> {
        self.skip_with(skip_i16)
    }

    /// Skips a fixed 32-bit value.
    pub fn skip_u32(&mut self) -> Result<()> {
        self.skip_with(skip_u32)
    }

    /// Skips a fixed signed 32-bit value.
    pub fn skip_i32(&mut self) -> Result<()> {
        self.skip_with(skip_i32)
    }

    /// Skips a fixed 64-bit value.
    pub fn skip_u64(&mut self) -> Result<()> {
        self.skip_with(skip_u64)
    }

    /// Skips a fixed signed 64-bit value.
    pub fn skip_i64(&mut self) -> Result<()> {
        self.skip_with(skip_i64)
    }

    /// Skips a 32-bit float.
    pub fn skip_f32(&mut self) -> Result<()> {
        self.skip_with(skip_f32)
    }

    /// Skips a 64-bit float.
    pub fn skip_f64(&mut self) -> Result<()> {
        self.skip_with(skip_f64)
    }

    /// Skips a UTC timestamp.
    #[cfg(feature = "chrono")]
    pub fn skip_time(&mut self) -> Result<()> {
        self.skip_with(skip_time)
    }

    /// Skips `width` bytes of a fixed-width primitive.
    pub fn skip_fixed(&mut self, width: usize) -> Result<()> {
        self.skip_with(|buf, n| skip_fixed(buf, n, width))
    }

    /// Skips a length-prefixed string without validating it as UTF-8.
    pub fn skip_string(&mut self) -> Result<()> {
        self.skip_with(skip_string)
    }

    /// Skips length-prefixed bytes.
    pub fn skip_bytes(&mut self) -> Result<()> {
        self.skip_with(skip_bytes)
    }

    /// Skips a sequence using `skipper` for each element.
    pub fn skip_slice(&mut self, skipper: impl Fn(&[u8], usize) -> Result<usize>) -> Result<()> {
        let opts = self.options;
        self.skip_with(|buf, n| skip_slice_with(buf, n, opts, skipper))
    }

    /// Skips a map.
    pub fn skip_map(
        &mut self,
        key_skipper: impl Fn(&[u8], usize) -> Result<usize>,
        value_skipper: impl Fn(&[u8], usize) -> Result<usize>,
    ) -> Result<()> {
        let opts = self.options;
        self.skip_with(|buf, n| skip_map_with(buf, n, opts, key_skipper, value_skipper))
    }

    /// Skips an optional value.
    pub fn skip_option(&mut self, skipper: impl Fn(&[u8], usize) -> Result<usize>) -> Result<()> {
        self.skip_with(|buf, n| skip_option(buf, n, skipper))
    }
}
