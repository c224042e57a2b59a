//! Fixed-width little-endian primitives.
//!
//! Floats travel as their raw bit pattern; NaN payloads and signed zeros
//! round-trip unchanged.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{check_available, Error, Result};

/// Advances past `width` bytes after checking they exist.
#[inline]
pub(crate) fn skip_fixed(buf: &[u8], offset: usize, width: usize) -> Result<usize> {
    check_available(buf.len(), offset, width)?;
    Ok(offset + width)
}

macro_rules! fixed_codec {
    ($ty:ty, $width:expr, $size:ident, $marshal:ident, $unmarshal:ident, $skip:ident, $write:ident, $read:ident) => {
        #[doc = concat!("Returns the encoded size of a `", stringify!($ty), "`.")]
        #[inline]
        pub const fn $size() -> usize {
            $width
        }

        #[doc = concat!("Writes a `", stringify!($ty), "` in ", stringify!($width), " little-endian bytes.")]
        #[inline]
        pub fn $marshal(buf: &mut [u8], offset: usize, v: $ty) -> Result<usize> {
            check_available(buf.len(), offset, $width)?;
            LittleEndian::$write(&mut buf[offset..offset + $width], v);
            Ok(offset + $width)
        }

        #[doc = concat!("Reads a `", stringify!($ty), "` from ", stringify!($width), " little-endian bytes.")]
        #[inline]
        pub fn $unmarshal(buf: &[u8], offset: usize) -> Result<($ty, usize)> {
            check_available(buf.len(), offset, $width)?;
            let v = LittleEndian::$read(&buf[offset..offset + $width]);
            Ok((v, offset + $width))
        }

        #[doc = concat!("Skips an encoded `", stringify!($ty), "`.")]
        #[inline]
        pub fn $skip(buf: &[u8], offset: usize) -> Result<usize> {
            skip_fixed(buf, offset, $width)
        }
    };
}

fixed_codec!(u16, 2, size_u16, marshal_u16, unmarshal_u16, skip_u16, write_u16, read_u16);
fixed_codec!(i16, 2, size_i16, marshal_i16, unmarshal_i16, skip_i16, write_i16, read_i16);
fixed_codec!(u32, 4, size_u32, marshal_u32, unmarshal_u32, skip_u32, write_u32, read_u32);
fixed_codec!(i32, 4, size_i32, marshal_i32, unmarshal_i32, skip_i32, write_i32, read_i32);
fixed_codec!(u64, 8, size_u64, marshal_u64, unmarshal_u64, skip_u64, write_u64, read_u64);
fixed_codec!(i64, 8, size_i64, marshal_i64, unmarshal_i64, skip_i64, write_i64, read_i64);
fixed_codec!(f32, 4, size_f32, marshal_f32, unmarshal_f32, skip_f32, write_f32, read_f32);
fixed_codec!(f64, 8, size_f64, marshal_f64, unmarshal_f64, skip_f64, write_f64, read_f64);

/// Returns the encoded size of a `u8`.
#[inline]
pub const fn size_u8() -> usize {
    1
}

/// Writes a single byte.
#[inline]
pub fn marshal_u8(buf: &mut [u8], offset: usize, v: u8) -> Result<usize> {
    check_available(buf.len(), offset, 1)?;
    buf[offset] = v;
    Ok(offset + 1)
}

/// Reads a single byte.
#[inline]
pub fn unmarshal_u8(buf: &[u8], offset: usize) -> Result<(u8, usize)> {
    check_available(buf.len(), offset, 1)?;
    Ok((buf[offset], offset + 1))
}

/// Skips a single byte.
#[inline]
pub fn skip_u8(buf: &[u8], offset: usize) -> Result<usize> {
    skip_fixed(buf, offset, 1)
}

/// Returns the encoded size of an `i8`.
#[inline]
pub const fn size_i8() -> usize {
    1
}

/// Writes an `i8` as its two's complement byte.
#[inline]
pub fn marshal_i8(buf: &mut [u8], offset: usize, v: i8) -> Result<usize> {
    marshal_u8(buf, offset, v as u8)
}

/// Reads an `i8` from its two's complement byte.
#[inline]
pub fn unmarshal_i8(buf: &[u8], offset: usize) -> Result<(i8, usize)> {
    let (b, end) = unmarshal_u8(buf, offset)?;
    Ok((b as i8, end))
}

/// Skips an encoded `i8`.
#[inline]
pub fn skip_i8(buf: &[u8], offset: usize) -> Result<usize> {
    skip_fixed(buf, offset, 1)
}

/// Returns the encoded size of a `bool`.
#[inline]
pub const fn size_bool() -> usize {
    1
}

/// Writes `1` for true and `0` for false.
#[inline]
pub fn marshal_bool(buf: &mut [u8], offset: usize, v: bool) -> Result<usize> {
    marshal_u8(buf, offset, u8::from(v))
}

/// Reads a bool. Only the canonical bytes `0` and `1` are accepted.
#[inline]
pub fn unmarshal_bool(buf: &[u8], offset: usize) -> Result<(bool, usize)> {
    match unmarshal_u8(buf, offset)? {
        (0, end) => Ok((false, end)),
        (1, end) => Ok((true, end)),
        (b, _) => Err(Error::InvalidBool(b)),
    }
}

/// Skips a bool. The byte itself is not inspected.
#[inline]
pub fn skip_bool(buf: &[u8], offset: usize) -> Result<usize> {
    skip_fixed(buf, offset, 1)
}

/// Returns the encoded size of a complex number with `f32` parts.
#[inline]
pub const fn size_complex64() -> usize {
    2 * size_f32()
}

/// Writes a `(re, im)` pair as two little-endian `f32`s.
pub fn marshal_complex64(buf: &mut [u8], offset: usize, v: (f32, f32)) -> Result<usize> {
    check_available(buf.len(), offset, size_complex64())?;
    let n = marshal_f32(buf, offset, v.0)?;
    marshal_f32(buf, n, v.1)
}

/// Reads a `(re, im)` pair of `f32`s.
pub fn unmarshal_complex64(buf: &[u8], offset: usize) -> Result<((f32, f32), usize)> {
    check_available(buf.len(), offset, size_complex64())?;
    let (re, n) = unmarshal_f32(buf, offset)?;
    let (im, n) = unmarshal_f32(buf, n)?;
    Ok(((re, im), n))
}

#[inline]
pub fn skip_complex64(buf: &[u8], offset: usize) -> Result<usize> {
    skip_fixed(buf, offset, size_complex64())
}

/// Returns the encoded size of a complex number with `f64` parts.
#[inline]
pub const fn size_complex128() -> usize {
    2 * size_f64()
}

/// Writes a `(re, im)` pair as two little-endian `f64`s.
pub fn marshal_complex128(buf: &mut [u8], offset: usize, v: (f64, f64)) -> Result<usize> {
    check_available(buf.len(), offset, size_complex128())?;
    let n = marshal_f64(buf, offset, v.0)?;
    marshal_f64(buf, n, v.1)
}

/// Reads a `(re, im)` pair of `f64`s.
pub fn unmarshal_complex128(buf: &[u8], offset: usize) -> Result<((f64, f64), usize)> {
    check_available(buf.len(), offset, size_complex128())?;
    let (re, n) = unmarshal_f64(buf, offset)?;
    let (im, n) = unmarshal_f64(buf, n)?;
    Ok(((re, im), n))
}

#[inline]
pub fn skip_complex128(buf: &[u8], offset: usize) -> Result<usize> {
    skip_fixed(buf, offset, size_complex128())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        assert_eq!(size_u8(), 1);
        assert_eq!(size_i8(), 1);
        assert_eq!(size_bool(), 1);
        assert_eq!(size_u16(), 2);
        assert_eq!(size_i16(), 2);
        assert_eq!(size_u32(), 4);
        assert_eq!(size_i32(), 4);
        assert_eq!(size_f32(), 4);
        assert_eq!(size_u64(), 8);
        assert_eq!(size_i64(), 8);
        assert_eq!(size_f64(), 8);
    }

    #[test]
    fn test_little_endian_layout() {
        let mut buf = [0u8; 4];
        assert_eq!(marshal_u32(&mut buf, 0, 5).unwrap(), 4);
        assert_eq!(buf, [5, 0, 0, 0]);

        let mut buf = [0u8; 2];
        marshal_i16(&mut buf, 0, -2).unwrap();
        assert_eq!(buf, [0xfe, 0xff]);

        let mut buf = [0u8; 8];
        marshal_u64(&mut buf, 0, 0x0102_0304_0506_0708).unwrap();
        assert_eq!(buf, [8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_fixed_roundtrip_at_offset() {
        let mut buf = [0u8; 9];
        let end = marshal_i64(&mut buf, 1, i64::MIN).unwrap();
        assert_eq!(end, 9);
        assert_eq!(unmarshal_i64(&buf, 1).unwrap(), (i64::MIN, 9));
        assert_eq!(skip_i64(&buf, 1).unwrap(), 9);
    }

    #[test]
    fn test_float_bit_patterns() {
        let nan = f64::from_bits(0x7ff8_dead_beef_0001);
        let mut buf = [0u8; 8];
        marshal_f64(&mut buf, 0, nan).unwrap();
        let (back, _) = unmarshal_f64(&buf, 0).unwrap();
        assert_eq!(back.to_bits(), nan.to_bits());

        let mut buf = [0u8; 4];
        marshal_f32(&mut buf, 0, -0.0).unwrap();
        assert_eq!(buf, [0, 0, 0, 0x80]);
        let (back, _) = unmarshal_f32(&buf, 0).unwrap();
        assert!(back.is_sign_negative());
    }

    #[test]
    fn test_fixed_buffer_too_small() {
        let mut buf = [0u8; 3];
        assert_eq!(
            marshal_u32(&mut buf, 0, 1),
            Err(Error::buffer_too_small(4, 3))
        );
        assert_eq!(buf, [0, 0, 0]);
        assert!(unmarshal_u32(&buf, 0).unwrap_err().is_buffer_too_small());
        assert!(skip_u32(&buf, 0).unwrap_err().is_buffer_too_small());
        assert!(unmarshal_u8(&buf, 3).unwrap_err().is_buffer_too_small());
    }

    #[test]
    fn test_bool() {
        let mut buf = [0u8; 2];
        let n = marshal_bool(&mut buf, 0, true).unwrap();
        marshal_bool(&mut buf, n, false).unwrap();
        assert_eq!(buf, [1, 0]);
        assert_eq!(unmarshal_bool(&buf, 0).unwrap(), (true, 1));
        assert_eq!(unmarshal_bool(&buf, 1).unwrap(), (false, 2));
    }

    #[test]
    fn test_bool_rejects_non_canonical() {
        assert_eq!(unmarshal_bool(&[2], 0), Err(Error::InvalidBool(2)));
        assert_eq!(unmarshal_bool(&[0xff], 0), Err(Error::InvalidBool(0xff)));
        // Skip only checks length.
        assert_eq!(skip_bool(&[2], 0).unwrap(), 1);
    }

    #[test]
    fn test_i8() {
        let mut buf = [0u8; 1];
        marshal_i8(&mut buf, 0, -1).unwrap();
        assert_eq!(buf, [0xff]);
        assert_eq!(unmarshal_i8(&buf, 0).unwrap(), (-1, 1));
    }

    #[test]
    fn test_complex_layout() {
        let mut buf = [0xaau8; 8];
        assert_eq!(marshal_complex64(&mut buf, 0, (1.5, -2.0)).unwrap(), 8);
        assert_eq!(buf, [0, 0, 0xc0, 0x3f, 0, 0, 0, 0xc0]);
        assert_eq!(unmarshal_complex64(&buf, 0).unwrap(), ((1.5, -2.0), 8));
        assert_eq!(skip_complex64(&buf, 0).unwrap(), 8);

        let mut buf = [0u8; 16];
        assert_eq!(marshal_complex128(&mut buf, 0, (0.25, 4.0)).unwrap(), 16);
        assert_eq!(unmarshal_complex128(&buf, 0).unwrap(), ((0.25, 4.0), 16));

        // Short buffers are rejected before either half is touched.
        let mut short = [0u8; 12];
        assert_eq!(
            marshal_complex128(&mut short, 0, (1.0, 1.0)),
            Err(Error::buffer_too_small(16, 12))
        );
        assert_eq!(short, [0; 12]);
        assert!(unmarshal_complex128(&short, 0).unwrap_err().is_buffer_too_small());
        assert!(skip_complex64(&short, 5).unwrap_err().is_buffer_too_small());
    }
}
