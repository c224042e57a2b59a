//! UTC timestamps as fixed-width nanoseconds since the UNIX epoch.

use chrono::{DateTime, Utc};

use crate::codec::Codec;
use crate::error::Result;
use crate::fixed::{marshal_i64, size_i64, skip_i64, unmarshal_i64};

/// Returns the encoded size of a timestamp.
#[inline]
pub const fn size_time() -> usize {
    size_i64()
}

/// Writes a timestamp as i64 nanoseconds.
///
/// Instants outside the i64 nanosecond range (before 1677 or after 2262)
/// are written as the epoch.
pub fn marshal_time(buf: &mut [u8], offset: usize, t: &DateTime<Utc>) -> Result<usize> {
    marshal_i64(buf, offset, t.timestamp_nanos_opt().unwrap_or(0))
}

/// Reads a timestamp.
pub fn unmarshal_time(buf: &[u8], offset: usize) -> Result<(DateTime<Utc>, usize)> {
    let (nanos, n) = unmarshal_i64(buf, offset)?;
    Ok((DateTime::from_timestamp_nanos(nanos), n))
}

/// Skips an encoded timestamp.
pub fn skip_time(buf: &[u8], offset: usize) -> Result<usize> {
    skip_i64(buf, offset)
}

impl<'de> Codec<'de> for DateTime<Utc> {
    fn size(&self) -> usize {
        size_time()
    }

    fn marshal(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
        marshal_time(buf, offset, self)
    }

    fn unmarshal(buf: &'de [u8], offset: usize) -> Result<(Self, usize)> {
        unmarshal_time(buf, offset)
    }

    fn skip(buf: &[u8], offset: usize) -> Result<usize> {
        skip_time(buf, offset)
    }
}
