//! Fixed-length array decoders.
//!
//! Each fills a caller-owned slice one element at a time in index order and
//! stops at the first element that fails. After an error the contents of
//! `out` from the failing index onward are unspecified.

use crate::error::Result;
use crate::float::read_f32;
use crate::int::{read_s32, read_u32};
use crate::stream::Stream;

fn fill<S, T>(stream: &mut S, out: &mut [T], read: fn(&mut S) -> Result<T>) -> Result<()>
where
    S: Stream + ?Sized,
{
    for slot in out.iter_mut() {
        *slot = read(stream)?;
    }
    Ok(())
}

/// Fill `out` with unsigned 32-bit little-endian values.
///
/// # Errors
///
/// Fails at the first element that cannot be read.
pub fn read_u32_arr<S: Stream + ?Sized>(stream: &mut S, out: &mut [u32]) -> Result<()> {
    fill(stream, out, read_u32)
}

/// Fill `out` with signed 32-bit little-endian values.
///
/// # Errors
///
/// Fails at the first element that cannot be read.
pub fn read_s32_arr<S: Stream + ?Sized>(stream: &mut S, out: &mut [i32]) -> Result<()> {
    fill(stream, out, read_s32)
}

/// Fill `out` with IEEE-754 binary32 values.
///
/// # Errors
///
/// Fails at the first element that cannot be read.
pub fn read_f32_arr<S: Stream + ?Sized>(stream: &mut S, out: &mut [f32]) -> Result<()> {
    fill(stream, out, read_f32)
}
