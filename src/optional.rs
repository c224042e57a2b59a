//! Optional values: `u8(0|1)` presence flag followed by the value if present.

use crate::error::Result;
use crate::fixed::{marshal_bool, size_bool, unmarshal_bool};

/// Returns the encoded size of an optional value.
pub fn size_option<T>(v: &Option<T>, sizer: impl Fn(&T) -> usize) -> usize {
    size_bool() + v.as_ref().map_or(0, sizer)
}

/// Writes the presence flag, then the value when present.
pub fn marshal_option<T>(
    buf: &mut [u8],
    offset: usize,
    v: &Option<T>,
    marshaler: impl Fn(&mut [u8], usize, &T) -> Result<usize>,
) -> Result<usize> {
    let n = marshal_bool(buf, offset, v.is_some())?;
    match v {
        Some(value) => marshaler(buf, n, value),
        None => Ok(n),
    }
}

/// Reads an optional value. An absent value consumes only the flag byte.
pub fn unmarshal_option<'a, T>(
    buf: &'a [u8],
    offset: usize,
    unmarshaler: impl Fn(&'a [u8], usize) -> Result<(T, usize)>,
) -> Result<(Option<T>, usize)> {
    let (present, n) = unmarshal_bool(buf, offset)?;
    if !present {
        return Ok((None, n));
    }
    let (value, n) = unmarshaler(buf, n)?;
    Ok((Some(value), n))
}

/// Skips an optional value. The flag is validated since it decides the framing.
pub fn skip_option(
    buf: &[u8],
    offset: usize,
    skipper: impl Fn(&[u8], usize) -> Result<usize>,
) -> Result<usize> {
    let (present, n) = unmarshal_bool(buf, offset)?;
    if present {
        skipper(buf, n)
    } else {
        Ok(n)
    }
}
