//! Benc - compact schema-less binary encoding for Rust
//!
//! Values are written back to back with no tags or field names; the
//! decoder must know the shape it expects. Every type has four operations:
//! `size_*`, `marshal_*`, `unmarshal_*` and `skip_*`, all working on a
//! caller-owned buffer and a byte offset.
//!
//! Wire format:
//!
//! - fixed-width primitives: little-endian
//! - `uint`/`int`: base-128 varints, signed values zigzag-mapped first
//! - strings and bytes: `varint(len) · bytes`
//! - sequences and maps: `varint(count) · elements · 01 01 01 01`
//! - optionals: `u8(0|1) · value?`
//!
//! # Example
//!
//! ```rust
//! use benc::{Reader, Result, Writer};
//!
//! fn main() -> Result<()> {
//!     let tags = ["a", "bb"];
//!
//!     // Encoding: size first, then marshal into an exact buffer.
//!     let size = benc::size_int(-42)
//!         + benc::size_slice(&tags, |s| benc::size_string(s));
//!     let data = benc::marshal(size, |buf, n| {
//!         let n = benc::marshal_int(buf, n, -42)?;
//!         benc::marshal_slice(buf, n, &tags, |buf, n, s| benc::marshal_string(buf, n, s))
//!     })?;
//!
//!     // Decoding, in the same field order.
//!     let mut reader = Reader::new(&data);
//!     assert_eq!(reader.read_int()?, -42);
//!     let decoded = reader.read_slice(benc::unmarshal_string_view)?;
//!     assert_eq!(decoded, ["a", "bb"]);
//!     reader.finish()?;
//!
//!     // Skipping walks the same framing without building values.
//!     let mut reader = Reader::new(&data);
//!     reader.skip_int()?;
//!     reader.skip_slice(benc::skip_string)?;
//!     assert!(!reader.has_more());
//!
//!     // The cursor types work the same way over a pre-sized buffer.
//!     let mut buf = vec![0u8; size];
//!     let mut writer = Writer::new(&mut buf);
//!     writer.write_int(-42)?;
//!     writer.write_slice(&tags, |buf, n, s| benc::marshal_string(buf, n, s))?;
//!     writer.finish()?;
//!     assert_eq!(buf, data);
//!     Ok(())
//! }
//! ```

mod bytes;
mod codec;
mod container;
mod error;
mod fixed;
mod optional;
mod options;
mod reader;
#[cfg(feature = "chrono")]
mod time;
mod varint;
mod writer;

pub use bytes::{
    marshal_bytes, marshal_string, size_bytes, size_string, skip_bytes, skip_string,
    unmarshal_bytes, unmarshal_bytes_view, unmarshal_string, unmarshal_string_view,
};
pub use codec::{ByteBuf, Codec, VarInt, VarUint};
pub use container::{
    marshal_map, marshal_slice, size_map, size_slice, skip_map, skip_map_with, skip_slice,
    skip_slice_with, unmarshal_map, unmarshal_map_with, unmarshal_slice, unmarshal_slice_with,
    TERMINATOR,
};
pub use error::{Error, Result};
pub use fixed::{
    marshal_bool, marshal_complex128, marshal_complex64, marshal_f32, marshal_f64, marshal_i16,
    marshal_i32, marshal_i64, marshal_i8, marshal_u16, marshal_u32, marshal_u64, marshal_u8,
    size_bool, size_complex128, size_complex64, size_f32, size_f64, size_i16, size_i32,
    size_i64, size_i8, size_u16, size_u32, size_u64, size_u8, skip_bool, skip_complex128,
    skip_complex64, skip_f32, skip_f64, skip_i16, skip_i32, skip_i64, skip_i8, skip_u16,
    skip_u32, skip_u64, skip_u8, unmarshal_bool, unmarshal_complex128, unmarshal_complex64,
    unmarshal_f32, unmarshal_f64, unmarshal_i16, unmarshal_i32, unmarshal_i64, unmarshal_i8,
    unmarshal_u16, unmarshal_u32, unmarshal_u64, unmarshal_u8,
};
pub use optional::{marshal_option, size_option, skip_option, unmarshal_option};
pub use options::DecodeOptions;
pub use reader::Reader;
#[cfg(feature = "chrono")]
pub use time::{marshal_time, size_time, skip_time, unmarshal_time};
pub use varint::{
    decode_zigzag_32, decode_zigzag_64, encode_zigzag_32, encode_zigzag_64, marshal_int,
    marshal_int32, marshal_isize, marshal_uint, marshal_uint32, marshal_usize, size_int,
    size_int32, size_isize, size_uint, size_uint32, size_usize, skip_int, skip_int32,
    skip_isize, skip_uint, skip_uint32, skip_usize, unmarshal_int, unmarshal_int32,
    unmarshal_isize, unmarshal_uint, unmarshal_uint32, unmarshal_usize, MAX_VARINT_LEN_32,
    MAX_VARINT_LEN_64,
};
pub use writer::Writer;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Allocates exactly `size` bytes and marshals into them with `f`.
///
/// Fails with `SizeMismatch` when `f` does not fill the buffer exactly,
/// which points at a disagreement between the size and marshal steps.
pub fn marshal<F>(size: usize, f: F) -> Result<Vec<u8>>
where
    F: FnOnce(&mut [u8], usize) -> Result<usize>,
{
    let mut buf = vec![0u8; size];
    let n = f(buf.as_mut_slice(), 0)?;
    verify_marshal(n, &buf)?;
    Ok(buf)
}

/// Like [`marshal`], but reuses the allocation of `out`.
pub fn marshal_into<F>(out: &mut Vec<u8>, size: usize, f: F) -> Result<()>
where
    F: FnOnce(&mut [u8], usize) -> Result<usize>,
{
    out.clear();
    out.resize(size, 0);
    let n = f(out.as_mut_slice(), 0)?;
    verify_marshal(n, out)
}

/// Decodes a whole buffer with `f` and checks nothing is left over.
pub fn unmarshal<'a, T, F>(data: &'a [u8], f: F) -> Result<T>
where
    F: FnOnce(&'a [u8], usize) -> Result<(T, usize)>,
{
    let (value, n) = f(data, 0)?;
    verify_unmarshal(n, data)?;
    Ok(value)
}

/// Encodes a [`Codec`] value into a new buffer.
pub fn encode<'de, T: Codec<'de>>(value: &T) -> Result<Vec<u8>> {
    marshal(value.size(), |buf, n| value.marshal(buf, n))
}

/// Decodes a [`Codec`] value that must span the whole buffer.
pub fn decode<'de, T: Codec<'de>>(data: &'de [u8]) -> Result<T> {
    unmarshal(data, T::unmarshal)
}

/// Checks that marshaling ended exactly at the end of `buf`.
pub fn verify_marshal(n: usize, buf: &[u8]) -> Result<()> {
    if n != buf.len() {
        return Err(Error::size_mismatch(buf.len(), n));
    }
    Ok(())
}

/// Checks that unmarshaling consumed all of `buf`.
pub fn verify_unmarshal(n: usize, buf: &[u8]) -> Result<()> {
    if n != buf.len() {
        return Err(Error::size_mismatch(buf.len(), n));
    }
    Ok(())
}
