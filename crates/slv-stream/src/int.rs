//! Little-endian integer decoders.
//!
//! Values are assembled byte by byte (`byte[i] << 8·i`) and signed values
//! are derived from the unsigned ones by testing the sign bit, so the result
//! never depends on how the host lays out its integers.

use crate::error::Result;
use crate::stream::Stream;

/// Assemble two little-endian bytes.
#[must_use]
pub fn decode_u16(bytes: [u8; 2]) -> u16 {
    bytes
        .iter()
        .enumerate()
        .fold(0, |acc, (i, &b)| acc | u16::from(b) << (8 * i))
}

/// Assemble four little-endian bytes.
#[must_use]
pub fn decode_u32(bytes: [u8; 4]) -> u32 {
    bytes
        .iter()
        .enumerate()
        .fold(0, |acc, (i, &b)| acc | u32::from(b) << (8 * i))
}

/// Reinterpret a 16-bit pattern as two's complement.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn u16_to_s16(value: u16) -> i16 {
    if value & 0x8000 != 0 {
        // !value < 0x8000, so the cast is lossless.
        -((!value) as i16) - 1
    } else {
        value as i16
    }
}

/// Reinterpret a 32-bit pattern as two's complement.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn u32_to_s32(value: u32) -> i32 {
    if value & 0x8000_0000 != 0 {
        -((!value) as i32) - 1
    } else {
        value as i32
    }
}

/// Read an unsigned 16-bit little-endian integer.
///
/// # Errors
///
/// Fails if fewer than 2 bytes are available; the stream does not advance.
pub fn read_u16<S: Stream + ?Sized>(stream: &mut S) -> Result<u16> {
    let mut buf = [0u8; 2];
    stream.read_buf(&mut buf)?;
    Ok(decode_u16(buf))
}

/// Read a signed 16-bit little-endian integer.
///
/// # Errors
///
/// Fails if fewer than 2 bytes are available; the stream does not advance.
pub fn read_s16<S: Stream + ?Sized>(stream: &mut S) -> Result<i16> {
    read_u16(stream).map(u16_to_s16)
}

/// Read an unsigned 32-bit little-endian integer.
///
/// # Errors
///
/// Fails if fewer than 4 bytes are available; the stream does not advance.
pub fn read_u32<S: Stream + ?Sized>(stream: &mut S) -> Result<u32> {
    let mut buf = [0u8; 4];
    stream.read_buf(&mut buf)?;
    Ok(decode_u32(buf))
}

/// Read a signed 32-bit little-endian integer.
///
/// # Errors
///
/// Fails if fewer than 4 bytes are available; the stream does not advance.
pub fn read_s32<S: Stream + ?Sized>(stream: &mut S) -> Result<i32> {
    read_u32(stream).map(u32_to_s32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStream;

    #[test]
    fn u16_is_little_endian() {
        assert_eq!(decode_u16([0x34, 0x12]), 0x1234);
        assert_eq!(decode_u16([0xFF, 0xFF]), u16::MAX);
    }

    #[test]
    fn u32_is_little_endian() {
        assert_eq!(decode_u32([0x78, 0x56, 0x34, 0x12]), 0x1234_5678);
        assert_eq!(decode_u32([0, 0, 0, 0x80]), 0x8000_0000);
    }

    #[test]
    fn s16_sign_boundaries() {
        assert_eq!(u16_to_s16(0x0000), 0);
        assert_eq!(u16_to_s16(0x7FFF), i16::MAX);
        assert_eq!(u16_to_s16(0x8000), i16::MIN);
        assert_eq!(u16_to_s16(0xFFFF), -1);
        assert_eq!(u16_to_s16(0xFFFE), -2);
    }

    #[test]
    fn s32_sign_boundaries() {
        assert_eq!(u32_to_s32(0x7FFF_FFFF), i32::MAX);
        assert_eq!(u32_to_s32(0x8000_0000), i32::MIN);
        assert_eq!(u32_to_s32(0xFFFF_FFFF), -1);
        assert_eq!(u32_to_s32(0xFFFF_FF85), -123);
    }

    #[test]
    fn sign_conversion_matches_native_for_sampled_patterns() {
        for value in (0..=u32::MAX).step_by(65_521) {
            assert_eq!(u32_to_s32(value), i32::from_le_bytes(value.to_le_bytes()));
        }
        for value in 0..=u16::MAX {
            assert_eq!(u16_to_s16(value), i16::from_le_bytes(value.to_le_bytes()));
        }
    }

    #[test]
    fn reads_mixed_sequence() {
        let data = [0x01, 0x00, 0xFE, 0xFF, 0x10, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF];
        let mut stream = MemoryStream::new(&data);
        assert_eq!(read_u16(&mut stream).unwrap(), 1);
        assert_eq!(read_s16(&mut stream).unwrap(), -2);
        assert_eq!(read_u32(&mut stream).unwrap(), 16);
        assert_eq!(read_s32(&mut stream).unwrap(), -1);
        assert_eq!(stream.position(), 12);
    }

    #[test]
    fn truncated_read_does_not_advance() {
        let data = [0x01, 0x02, 0x03];
        let mut stream = MemoryStream::new(&data);
        assert!(read_u32(&mut stream).is_err());
        assert_eq!(stream.position(), 0);
        assert_eq!(read_u16(&mut stream).unwrap(), 0x0201);
        assert!(read_s16(&mut stream).is_err());
        assert_eq!(stream.position(), 2);
    }
}
