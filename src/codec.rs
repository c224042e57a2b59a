//! The `Codec` trait: size, marshal, unmarshal and skip for one type.
//!
//! Fixed-width primitives use their little-endian layout. `usize`/`isize`
//! and the [`VarUint`]/[`VarInt`] wrappers use varints. `Vec<T>` is a
//! sequence of `T`, so a byte blob needs [`ByteBuf`] or `&[u8]`.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::bytes::{
    marshal_bytes, marshal_string, size_bytes, size_string, skip_bytes, skip_string,
    unmarshal_bytes, unmarshal_bytes_view, unmarshal_string, unmarshal_string_view,
};
use crate::container::{
    marshal_map, marshal_slice, size_map, size_slice, skip_map_with, skip_slice_with,
    unmarshal_map_with, unmarshal_slice_with,
};
use crate::error::Result;
use crate::fixed::*;
use crate::optional::{marshal_option, size_option, skip_option, unmarshal_option};
use crate::options::DecodeOptions;
use crate::varint::{
    marshal_int, marshal_isize, marshal_uint, marshal_usize, size_int, size_isize, size_uint,
    size_usize, skip_int, skip_isize, skip_uint, skip_usize, unmarshal_int, unmarshal_isize,
    unmarshal_uint, unmarshal_usize,
};

/// A value with a fixed encoding.
///
/// `'de` is the lifetime of the buffer being decoded; borrowed
/// implementations (`&'de str`, `&'de [u8]`) alias it.
pub trait Codec<'de>: Sized {
    /// Number of bytes `marshal` will write.
    fn size(&self) -> usize;

    /// Writes the value at `offset`, returning the offset past it.
    fn marshal(&self, buf: &mut [u8], offset: usize) -> Result<usize>;

    /// Reads a value at `offset`, returning it and the offset past it.
    fn unmarshal(buf: &'de [u8], offset: usize) -> Result<(Self, usize)>;

    /// Advances past an encoded value without building it.
    fn skip(buf: &[u8], offset: usize) -> Result<usize>;

    /// Reads a value, applying `opts` to every container inside it.
    ///
    /// Types without containers ignore the options.
    fn unmarshal_with(
        buf: &'de [u8],
        offset: usize,
        _opts: DecodeOptions,
    ) -> Result<(Self, usize)> {
        Self::unmarshal(buf, offset)
    }

    /// Skips a value, applying `opts` to every container inside it.
    fn skip_with(buf: &[u8], offset: usize, _opts: DecodeOptions) -> Result<usize> {
        Self::skip(buf, offset)
    }
}

macro_rules! impl_codec {
    ($ty:ty, $size:expr, $marshal:ident, $unmarshal:ident, $skip:ident) => {
        impl<'de> Codec<'de> for $ty {
            #[inline]
            fn size(&self) -> usize {
                $size(*self)
            }

            #[inline]
            fn marshal(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
                $marshal(buf, offset, *self)
            }

            #[inline]
            fn unmarshal(buf: &'de [u8], offset: usize) -> Result<(Self, usize)> {
                $unmarshal(buf, offset)
            }

            #[inline]
            fn skip(buf: &[u8], offset: usize) -> Result<usize> {
                $skip(buf, offset)
            }
        }
    };
}

impl_codec!(u8, |_| size_u8(), marshal_u8, unmarshal_u8, skip_u8);
impl_codec!(i8, |_| size_i8(), marshal_i8, unmarshal_i8, skip_i8);
impl_codec!(bool, |_| size_bool(), marshal_bool, unmarshal_bool, skip_bool);
impl_codec!(u16, |_| size_u16(), marshal_u16, unmarshal_u16, skip_u16);
impl_codec!(i16, |_| size_i16(), marshal_i16, unmarshal_i16, skip_i16);
impl_codec!(u32, |_| size_u32(), marshal_u32, unmarshal_u32, skip_u32);
impl_codec!(i32, |_| size_i32(), marshal_i32, unmarshal_i32, skip_i32);
impl_codec!(u64, |_| size_u64(), marshal_u64, unmarshal_u64, skip_u64);
impl_codec!(i64, |_| size_i64(), marshal_i64, unmarshal_i64, skip_i64);
impl_codec!(f32, |_| size_f32(), marshal_f32, unmarshal_f32, skip_f32);
impl_codec!(f64, |_| size_f64(), marshal_f64, unmarshal_f64, skip_f64);
impl_codec!(usize, size_usize, marshal_usize, unmarshal_usize, skip_usize);
impl_codec!(isize, size_isize, marshal_isize, unmarshal_isize, skip_isize);

/// An unsigned integer encoded as a varint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VarUint(pub u64);

/// A signed integer encoded as a zigzag varint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VarInt(pub i64);

/// An owned byte blob with length-prefixed framing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ByteBuf(pub Vec<u8>);

impl<'de> Codec<'de> for VarUint {
    fn size(&self) -> usize {
        size_uint(self.0)
    }

    fn marshal(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
        marshal_uint(buf, offset, self.0)
    }

    fn unmarshal(buf: &'de [u8], offset: usize) -> Result<(Self, usize)> {
        let (v, n) = unmarshal_uint(buf, offset)?;
        Ok((Self(v), n))
    }

    fn skip(buf: &[u8], offset: usize) -> Result<usize> {
        skip_uint(buf, offset)
    }
}

impl<'de> Codec<'de> for VarInt {
    fn size(&self) -> usize {
        size_int(self.0)
    }

    fn marshal(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
        marshal_int(buf, offset, self.0)
    }

    fn unmarshal(buf: &'de [u8], offset: usize) -> Result<(Self, usize)> {
        let (v, n) = unmarshal_int(buf, offset)?;
        Ok((Self(v), n))
    }

    fn skip(buf: &[u8], offset: usize) -> Result<usize> {
        skip_int(buf, offset)
    }
}

impl<'de> Codec<'de> for ByteBuf {
    fn size(&self) -> usize {
        size_bytes(&self.0)
    }

    fn marshal(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
        marshal_bytes(buf, offset, &self.0)
    }

    fn unmarshal(buf: &'de [u8], offset: usize) -> Result<(Self, usize)> {
        let (v, n) = unmarshal_bytes(buf, offset)?;
        Ok((Self(v), n))
    }

    fn skip(buf: &[u8], offset: usize) -> Result<usize> {
        skip_bytes(buf, offset)
    }
}

impl<'de> Codec<'de> for &'de [u8] {
    fn size(&self) -> usize {
        size_bytes(self)
    }

    fn marshal(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
        marshal_bytes(buf, offset, self)
    }

    fn unmarshal(buf: &'de [u8], offset: usize) -> Result<(Self, usize)> {
        unmarshal_bytes_view(buf, offset)
    }

    fn skip(buf: &[u8], offset: usize) -> Result<usize> {
        skip_bytes(buf, offset)
    }
}

impl<'de> Codec<'de> for String {
    fn size(&self) -> usize {
        size_string(self)
    }

    fn marshal(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
        marshal_string(buf, offset, self)
    }

    fn unmarshal(buf: &'de [u8], offset: usize) -> Result<(Self, usize)> {
        unmarshal_string(buf, offset)
    }

    fn skip(buf: &[u8], offset: usize) -> Result<usize> {
        skip_string(buf, offset)
    }
}

impl<'de> Codec<'de> for &'de str {
    fn size(&self) -> usize {
        size_string(self)
    }

    fn marshal(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
        marshal_string(buf, offset, self)
    }

    fn unmarshal(buf: &'de [u8], offset: usize) -> Result<(Self, usize)> {
        unmarshal_string_view(buf, offset)
    }

    fn skip(buf: &[u8], offset: usize) -> Result<usize> {
        skip_string(buf, offset)
    }
}

impl<'de, T: Codec<'de>> Codec<'de> for Vec<T> {
    fn size(&self) -> usize {
        size_slice(self, T::size)
    }

    fn marshal(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
        marshal_slice(buf, offset, self, |b, n, v: &T| v.marshal(b, n))
    }

    fn unmarshal(buf: &'de [u8], offset: usize) -> Result<(Self, usize)> {
        Self::unmarshal_with(buf, offset, DecodeOptions::default())
    }

    fn skip(buf: &[u8], offset: usize) -> Result<usize> {
        Self::skip_with(buf, offset, DecodeOptions::default())
    }

    fn unmarshal_with(
        buf: &'de [u8],
        offset: usize,
        opts: DecodeOptions,
    ) -> Result<(Self, usize)> {
        unmarshal_slice_with(buf, offset, opts, |b, n| T::unmarshal_with(b, n, opts))
    }

    fn skip_with(buf: &[u8], offset: usize, opts: DecodeOptions) -> Result<usize> {
        skip_slice_with(buf, offset, opts, |b, n| T::skip_with(b, n, opts))
    }
}

impl<'de, T: Codec<'de>> Codec<'de> for Option<T> {
    fn size(&self) -> usize {
        size_option(self, T::size)
    }

    fn marshal(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
        marshal_option(buf, offset, self, |b, n, v: &T| v.marshal(b, n))
    }

    fn unmarshal(buf: &'de [u8], offset: usize) -> Result<(Self, usize)> {
        unmarshal_option(buf, offset, T::unmarshal)
    }

    fn skip(buf: &[u8], offset: usize) -> Result<usize> {
        skip_option(buf, offset, T::skip)
    }

    fn unmarshal_with(
        buf: &'de [u8],
        offset: usize,
        opts: DecodeOptions,
    ) -> Result<(Self, usize)> {
        unmarshal_option(buf, offset, |b, n| T::unmarshal_with(b, n, opts))
    }

    fn skip_with(buf: &[u8], offset: usize, opts: DecodeOptions) -> Result<usize> {
        skip_option(buf, offset, |b, n| T::skip_with(b, n, opts))
    }
}

impl<'de, K, V, S> Codec<'de> for HashMap<K, V, S>
where
    K: Codec<'de> + Eq + Hash,
    V: Codec<'de>,
    S: BuildHasher + Default,
{
    fn size(&self) -> usize {
        size_map(self, K::size, V::size)
    }

    fn marshal(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
        marshal_map(
            buf,
            offset,
            self,
            |b, n, k: &K| k.marshal(b, n),
            |b, n, v: &V| v.marshal(b, n),
        )
    }

    fn unmarshal(buf: &'de [u8], offset: usize) -> Result<(Self, usize)> {
        Self::unmarshal_with(buf, offset, DecodeOptions::default())
    }

    fn skip(buf: &[u8], offset: usize) -> Result<usize> {
        Self::skip_with(buf, offset, DecodeOptions::default())
    }

    fn unmarshal_with(
        buf: &'de [u8],
        offset: usize,
        opts: DecodeOptions,
    ) -> Result<(Self, usize)> {
        unmarshal_map_with(
            buf,
            offset,
            opts,
            |b, n| K::unmarshal_with(b, n, opts),
            |b, n| V::unmarshal_with(b, n, opts),
        )
    }

    fn skip_with(buf: &[u8], offset: usize, opts: DecodeOptions) -> Result<usize> {
        skip_map_with(
            buf,
            offset,
            opts,
            |b, n| K::skip_with(b, n, opts),
            |b, n| V::skip_with(b, n, opts),
        )
    }
}

impl<'de, K, V> Codec<'de> for BTreeMap<K, V>
where
    K: Codec<'de> + Ord,
    V: Codec<'de>,
{
    fn size(&self) -> usize {
        size_map(self, K::size, V::size)
    }

    fn marshal(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
        marshal_map(
            buf,
            offset,
            self,
            |b, n, k: &K| k.marshal(b, n),
            |b, n, v: &V| v.marshal(b, n),
        )
    }

    fn unmarshal(buf: &'de [u8], offset: usize) -> Result<(Self, usize)> {
        Self::unmarshal_with(buf, offset, DecodeOptions::default())
    }

    fn skip(buf: &[u8], offset: usize) -> Result<usize> {
        Self::skip_with(buf, offset, DecodeOptions::default())
    }

    fn unmarshal_with(
        buf: &'de [u8],
        offset: usize,
        opts: DecodeOptions,
    ) -> Result<(Self, usize)> {
        unmarshal_map_with(
            buf,
            offset,
            opts,
            |b, n| K::unmarshal_with(b, n, opts),
            |b, n| V::unmarshal_with(b, n, opts),
        )
    }

    fn skip_with(buf: &[u8], offset: usize, opts: DecodeOptions) -> Result<usize> {
        skip_map_with(
            buf,
            offset,
            opts,
            |b, n| K::skip_with(b, n, opts),
            |b, n| V::skip_with(b, n, opts),
        )
    }
}

/// Pairs are their two halves back to back, so `(f32, f32)` matches the
/// complex64 layout.
impl<'de, A: Codec<'de>, B: Codec<'de>> Codec<'de> for (A, B) {
    fn size(&self) -> usize {
        self.0.size() + self.1.size()
    }

    fn marshal(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
        let n = self.0.marshal(buf, offset)?;
        self.1.marshal(buf, n)
    }

    fn unmarshal(buf: &'de [u8], offset: usize) -> Result<(Self, usize)> {
        let (a, n) = A::unmarshal(buf, offset)?;
        let (b, n) = B::unmarshal(buf, n)?;
        Ok(((a, b), n))
    }

    fn skip(buf: &[u8], offset: usize) -> Result<usize> {
        B::skip(buf, A::skip(buf, offset)?)
    }

    fn unmarshal_with(
        buf: &'de [u8],
        offset: usize,
        opts: DecodeOptions,
    ) -> Result<(Self, usize)> {
        let (a, n) = A::unmarshal_with(buf, offset, opts)?;
        let (b, n) = B::unmarshal_with(buf, n, opts)?;
        Ok(((a, b), n))
    }

    fn skip_with(buf: &[u8], offset: usize, opts: DecodeOptions) -> Result<usize> {
        B::skip_with(buf, A::skip_with(buf, offset, opts)?, opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<'de, T>(value: &T, buf: &'de mut Vec<u8>) -> (T, usize)
    where
        T: Codec<'de>,
    {
        buf.resize(value.size(), 0);
        let end = value.marshal(buf, 0).unwrap();
        assert_eq!(end, buf.len());
        let buf: &'de [u8] = buf;
        let skipped = T::skip(buf, 0).unwrap();
        let (decoded, n) = T::unmarshal(buf, 0).unwrap();
        assert_eq!(skipped, n);
        (decoded, n)
    }

    #[test]
    fn test_primitives_use_fixed_layout() {
        let mut buf = Vec::new();
        assert_eq!(roundtrip(&5u32, &mut buf), (5, 4));
        let mut buf = Vec::new();
        assert_eq!(roundtrip(&-1i64, &mut buf), (-1, 8));
        let mut buf = Vec::new();
        assert_eq!(roundtrip(&true, &mut buf), (true, 1));
    }

    #[test]
    fn test_native_width_uses_varint() {
        let mut buf = Vec::new();
        assert_eq!(roundtrip(&5usize, &mut buf), (5, 1));
        let mut buf = Vec::new();
        assert_eq!(roundtrip(&-1isize, &mut buf), (-1, 1));
        let mut buf = Vec::new();
        assert_eq!(roundtrip(&VarUint(300), &mut buf), (VarUint(300), 2));
        let mut buf = Vec::new();
        assert_eq!(roundtrip(&VarInt(-64), &mut buf), (VarInt(-64), 1));
    }

    #[test]
    fn test_vec_of_strings() {
        let value = vec!["a".to_string(), "bb".to_string()];
        let mut buf = Vec::new();
        let (decoded, n) = roundtrip(&value, &mut buf);
        assert_eq!(decoded, value);
        assert_eq!(n, 10);
        assert_eq!(buf, [2, 1, b'a', 2, b'b', b'b', 1, 1, 1, 1]);
    }

    #[test]
    fn test_borrowed_str_and_bytes() {
        let data = [3, b'a', b'b', b'c'];
        let (s, n) = <&str>::unmarshal(&data, 0).unwrap();
        assert_eq!((s, n), ("abc", 4));
        let (b, n) = <&[u8]>::unmarshal(&data, 0).unwrap();
        assert_eq!((b, n), (&b"abc"[..], 4));
    }

    #[test]
    fn test_byte_buf_vs_vec_u8() {
        let blob = ByteBuf(vec![7, 8]);
        let mut buf = Vec::new();
        roundtrip(&blob, &mut buf);
        assert_eq!(buf, [2, 7, 8]);

        let seq = vec![7u8, 8];
        let mut buf = Vec::new();
        roundtrip(&seq, &mut buf);
        assert_eq!(buf, [2, 7, 8, 1, 1, 1, 1]);
    }

    #[test]
    fn test_option_and_maps() {
        let value: Option<Vec<Option<u16>>> = Some(vec![Some(1), None]);
        let mut buf = Vec::new();
        let (decoded, _) = roundtrip(&value, &mut buf);
        assert_eq!(decoded, value);

        let mut tree = BTreeMap::new();
        tree.insert(VarUint(1), "x".to_string());
        tree.insert(VarUint(2), "y".to_string());
        let mut buf = Vec::new();
        let (decoded, _) = roundtrip(&tree, &mut buf);
        assert_eq!(decoded, tree);

        let mut hash: HashMap<String, i32> = HashMap::new();
        hash.insert("k".into(), -5);
        let mut buf = Vec::new();
        let (decoded, _) = roundtrip(&hash, &mut buf);
        assert_eq!(decoded, hash);
    }

    #[test]
    fn test_options_reach_nested_containers() {
        use crate::error::Error;

        // Some([[5]]) with a corrupt terminator on the inner sequence.
        let data = [1, 1, 1, 5, 9, 9, 9, 9, 1, 1, 1, 1];
        let strict = DecodeOptions::strict();
        assert!(<Option<Vec<Vec<u8>>>>::unmarshal(&data, 0).is_ok());
        assert_eq!(
            <Option<Vec<Vec<u8>>>>::unmarshal_with(&data, 0, strict),
            Err(Error::InvalidTerminator([9, 9, 9, 9]))
        );
        assert_eq!(
            <Option<Vec<Vec<u8>>>>::skip_with(&data, 0, strict),
            Err(Error::InvalidTerminator([9, 9, 9, 9]))
        );

        // Map value holding a two-element sequence.
        let data = [1, 7, 2, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1];
        let limited = DecodeOptions::new().max_elements(1);
        let (map, n) = <BTreeMap<u8, Vec<u8>>>::unmarshal(&data, 0).unwrap();
        assert_eq!((map[&7].len(), n), (2, data.len()));
        assert_eq!(
            <BTreeMap<u8, Vec<u8>>>::unmarshal_with(&data, 0, limited),
            Err(Error::TooManyElements { count: 2, max: 1 })
        );
        assert_eq!(
            <HashMap<u8, Vec<u8>>>::skip_with(&data, 0, limited),
            Err(Error::TooManyElements { count: 2, max: 1 })
        );
    }

    #[test]
    fn test_pairs() {
        let value = (1.5f32, -2.0f32);
        let mut buf = Vec::new();
        assert_eq!(roundtrip(&value, &mut buf), (value, 8));
        let mut complex = [0u8; 8];
        marshal_complex64(&mut complex, 0, value).unwrap();
        assert_eq!(buf, complex);

        let entries = vec![(VarUint(1), "a".to_string()), (VarUint(300), "bc".to_string())];
        let mut buf = Vec::new();
        let (decoded, n) = roundtrip(&entries, &mut buf);
        assert_eq!(decoded, entries);
        assert_eq!(n, 1 + (1 + 2) + (2 + 3) + 4);
    }
}
