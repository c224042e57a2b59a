//! Sequences and maps.
//!
//! Every container is framed as `varint(count) · elements · 01 01 01 01`.
//! Decoders read exactly `count` elements and then consume exactly four
//! trailing bytes; they never scan for the terminator. Element codecs are
//! supplied by the caller, so this module knows nothing about element types.

use log::{debug, trace};

use crate::error::{check_available, Error, Result};
use crate::options::DecodeOptions;
use crate::varint::{marshal_uint, size_uint, unmarshal_len};

/// Marker closing every container encoding.
pub const TERMINATOR: [u8; 4] = [1, 1, 1, 1];

fn marshal_terminator(buf: &mut [u8], offset: usize) -> Result<usize> {
    check_available(buf.len(), offset, TERMINATOR.len())?;
    let end = offset + TERMINATOR.len();
    buf[offset..end].copy_from_slice(&TERMINATOR);
    Ok(end)
}

fn read_terminator(buf: &[u8], offset: usize, opts: DecodeOptions) -> Result<usize> {
    check_available(buf.len(), offset, TERMINATOR.len())?;
    let end = offset + TERMINATOR.len();
    if opts.verify_terminator && buf[offset..end] != TERMINATOR {
        let mut found = [0u8; 4];
        found.copy_from_slice(&buf[offset..end]);
        debug!("container terminator mismatch at offset {offset}: {found:02x?}");
        return Err(Error::InvalidTerminator(found));
    }
    Ok(end)
}

fn read_count(buf: &[u8], offset: usize, opts: DecodeOptions) -> Result<(usize, usize)> {
    let (count, n) = unmarshal_len(buf, offset)?;
    if let Some(max) = opts.max_elements {
        if count > max {
            debug!("container at offset {offset} declares {count} elements, limit is {max}");
            return Err(Error::TooManyElements { count, max });
        }
    }
    Ok((count, n))
}

/// Returns the encoded size of a sequence.
pub fn size_slice<T>(slice: &[T], sizer: impl Fn(&T) -> usize) -> usize {
    size_uint(slice.len() as u64) + slice.iter().map(sizer).sum::<usize>() + TERMINATOR.len()
}

/// Writes the count, each element in order, then the terminator.
pub fn marshal_slice<T>(
    buf: &mut [u8],
    offset: usize,
    slice: &[T],
    marshaler: impl Fn(&mut [u8], usize, &T) -> Result<usize>,
) -> Result<usize> {
    let mut n = marshal_uint(buf, offset, slice.len() as u64)?;
    for item in slice {
        n = marshaler(buf, n, item)?;
    }
    marshal_terminator(buf, n)
}

/// Reads a sequence with default options.
pub fn unmarshal_slice<'a, T>(
    buf: &'a [u8],
    offset: usize,
    unmarshaler: impl Fn(&'a [u8], usize) -> Result<(T, usize)>,
) -> Result<(Vec<T>, usize)> {
    unmarshal_slice_with(buf, offset, DecodeOptions::default(), unmarshaler)
}

/// Reads a sequence.
///
/// Preallocation is capped by the bytes left in `buf`, so a corrupt count
/// cannot force a large allocation up front. The first element error is
/// returned as is and no partial sequence is produced.
pub fn unmarshal_slice_with<'a, T>(
    buf: &'a [u8],
    offset: usize,
    opts: DecodeOptions,
    unmarshaler: impl Fn(&'a [u8], usize) -> Result<(T, usize)>,
) -> Result<(Vec<T>, usize)> {
    let (count, mut n) = read_count(buf, offset, opts)?;
    let mut items = Vec::with_capacity(count.min(buf.len().saturating_sub(n)));
    for i in 0..count {
        let (item, next) = unmarshaler(buf, n).map_err(|err| {
            trace!("sequence element {i} at offset {n} failed: {err}");
            err
        })?;
        items.push(item);
        n = next;
    }
    let end = read_terminator(buf, n, opts)?;
    Ok((items, end))
}

/// Skips a sequence with default options.
pub fn skip_slice(
    buf: &[u8],
    offset: usize,
    skipper: impl Fn(&[u8], usize) -> Result<usize>,
) -> Result<usize> {
    skip_slice_with(buf, offset, DecodeOptions::default(), skipper)
}

/// Skips a sequence, walking every element with `skipper`.
pub fn skip_slice_with(
    buf: &[u8],
    offset: usize,
    opts: DecodeOptions,
    skipper: impl Fn(&[u8], usize) -> Result<usize>,
) -> Result<usize> {
    let (count, mut n) = read_count(buf, offset, opts)?;
    for i in 0..count {
        n = skipper(buf, n).map_err(|err| {
            trace!("skipping sequence element {i} at offset {n} failed: {err}");
            err
        })?;
    }
    read_terminator(buf, n, opts)
}

/// Returns the encoded size of a map given its `(key, value)` iterator.
pub fn size_map<'m, K: 'm, V: 'm, I>(
    map: I,
    key_sizer: impl Fn(&K) -> usize,
    value_sizer: impl Fn(&V) -> usize,
) -> usize
where
    I: IntoIterator<Item = (&'m K, &'m V)>,
    I::IntoIter: ExactSizeIterator,
{
    let entries = map.into_iter();
    let count = entries.len();
    let body: usize = entries.map(|(k, v)| key_sizer(k) + value_sizer(v)).sum();
    size_uint(count as u64) + body + TERMINATOR.len()
}

/// Writes a map as count, key/value pairs in iteration order, then the terminator.
///
/// Order is whatever the iterator yields; pass an ordered map for
/// deterministic output.
pub fn marshal_map<'m, K: 'm, V: 'm, I>(
    buf: &mut [u8],
    offset: usize,
    map: I,
    key_marshaler: impl Fn(&mut [u8], usize, &K) -> Result<usize>,
    value_marshaler: impl Fn(&mut [u8], usize, &V) -> Result<usize>,
) -> Result<usize>
where
    I: IntoIterator<Item = (&'m K, &'m V)>,
    I::IntoIter: ExactSizeIterator,
{
    let entries = map.into_iter();
    let mut n = marshal_uint(buf, offset, entries.len() as u64)?;
    for (k, v) in entries {
        n = key_marshaler(buf, n, k)?;
        n = value_marshaler(buf, n, v)?;
    }
    marshal_terminator(buf, n)
}

/// Reads a map with default options.
pub fn unmarshal_map<'a, M, K, V>(
    buf: &'a [u8],
    offset: usize,
    key_unmarshaler: impl Fn(&'a [u8], usize) -> Result<(K, usize)>,
    value_unmarshaler: impl Fn(&'a [u8], usize) -> Result<(V, usize)>,
) -> Result<(M, usize)>
where
    M: FromIterator<(K, V)>,
{
    unmarshal_map_with(
        buf,
        offset,
        DecodeOptions::default(),
        key_unmarshaler,
        value_unmarshaler,
    )
}

/// Reads a map into any collection built from `(key, value)` pairs.
///
/// Pairs are inserted in wire order, so with `HashMap` or `BTreeMap` a
/// repeated key keeps the last value.
pub fn unmarshal_map_with<'a, M, K, V>(
    buf: &'a [u8],
    offset: usize,
    opts: DecodeOptions,
    key_unmarshaler: impl Fn(&'a [u8], usize) -> Result<(K, usize)>,
    value_unmarshaler: impl Fn(&'a [u8], usize) -> Result<(V, usize)>,
) -> Result<(M, usize)>
where
    M: FromIterator<(K, V)>,
{
    let (count, mut n) = read_count(buf, offset, opts)?;
    let map = (0..count)
        .map(|i| -> Result<(K, V)> {
            let (k, next) = key_unmarshaler(buf, n).map_err(|err| {
                trace!("map key {i} at offset {n} failed: {err}");
                err
            })?;
            let (v, next) = value_unmarshaler(buf, next).map_err(|err| {
                trace!("map value {i} at offset {next} failed: {err}");
                err
            })?;
            n = next;
            Ok((k, v))
        })
        .collect::<Result<M>>()?;
    let end = read_terminator(buf, n, opts)?;
    Ok((map, end))
}

/// Skips a map with default options.
pub fn skip_map(
    buf: &[u8],
    offset: usize,
    key_skipper: impl Fn(&[u8], usize) -> Result<usize>,
    value_skipper: impl Fn(&[u8], usize) -> Result<usize>,
) -> Result<usize> {
    skip_map_with(buf, offset, DecodeOptions::default(), key_skipper, value_skipper)
}

/// Skips a map, walking every key and value.
pub fn skip_map_with(
    buf: &[u8],
    offset: usize,
    opts: DecodeOptions,
    key_skipper: impl Fn(&[u8], usize) -> Result<usize>,
    value_skipper: impl Fn(&[u8], usize) -> Result<usize>,
) -> Result<usize> {
    let (count, mut n) = read_count(buf, offset, opts)?;
    for i in 0..count {
        n = key_skipper(buf, n)
            .and_then(|next| value_skipper(buf, next))
            .map_err(|err| {
                trace!("skipping map entry {i} at offset {n} failed: {err}");
                err
            })?;
    }
    read_terminator(buf, n, opts)
}
