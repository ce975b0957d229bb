//! IEEE-754 binary32 decoding from raw little-endian bytes.
//!
//! The value is rebuilt from its bit fields with arithmetic instead of a
//! bit cast, so neither the host byte order nor its native float layout
//! matter:
//!
//! ```text
//!   byte 3          byte 2             byte 1      byte 0
//!   ┌─┬─────────┐   ┌─┬────────────┐   ┌─────────┐ ┌────────┐
//!   │s│exp[7..1]│   │e│ sig[22..16]│   │sig[15..8]│ │sig[7..0]│
//!   └─┴─────────┘   └─┴────────────┘   └─────────┘ └────────┘
//!
//!   exp = 0,   sig = 0   → ±0
//!   exp = 0,   sig ≠ 0   → ±(sig / 2^23) · 2^-126        (subnormal)
//!   exp = 255, sig = 0   → ±∞
//!   exp = 255, sig ≠ 0   → NaN
//!   otherwise            → ±(1 + sig / 2^23) · 2^(exp - 127)
//! ```

use crate::error::Result;
use crate::stream::Stream;

/// 2^23: scale that turns the 23-bit significand into a fraction in `[0, 1)`.
const SIGNIFICAND_SCALE: f64 = 8_388_608.0;

const EXPONENT_BIAS: i32 = 127;
const EXPONENT_MAX: i32 = 0xFF;

/// Decode four little-endian bytes as a binary32 value.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn decode_f32(bytes: [u8; 4]) -> f32 {
    let sign: f64 = if bytes[3] & 0x80 != 0 { -1.0 } else { 1.0 };
    let exponent = i32::from(bytes[3] & 0x7F) << 1 | i32::from(bytes[2] & 0x80) >> 7;
    let significand = u32::from(bytes[2] & 0x7F) << 16 | u32::from(bytes[1]) << 8 | u32::from(bytes[0]);
    let fraction = f64::from(significand) / SIGNIFICAND_SCALE;

    // Every intermediate below is exact in f64, so the final cast is too.
    match (exponent, significand) {
        (0, 0) => (sign * 0.0) as f32,
        (0, _) => (sign * fraction * 2f64.powi(1 - EXPONENT_BIAS)) as f32,
        (EXPONENT_MAX, 0) => (sign * f64::INFINITY) as f32,
        (EXPONENT_MAX, _) => f32::NAN,
        _ => (sign * (1.0 + fraction) * 2f64.powi(exponent - EXPONENT_BIAS)) as f32,
    }
}

/// Read a little-endian IEEE-754 binary32 value.
///
/// # Errors
///
/// Fails only if fewer than 4 bytes are available; the stream does not
/// advance. Every 4-byte pattern decodes to some `f32`.
pub fn read_f32<S: Stream + ?Sized>(stream: &mut S) -> Result<f32> {
    let mut buf = [0u8; 4];
    stream.read_buf(&mut buf)?;
    Ok(decode_f32(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStream;

    fn bits(bytes: [u8; 4]) -> u32 {
        decode_f32(bytes).to_bits()
    }

    #[test]
    fn one() {
        assert_eq!(decode_f32([0x00, 0x00, 0x80, 0x3F]), 1.0);
    }

    #[test]
    fn signed_zeros_keep_their_sign() {
        assert_eq!(bits([0, 0, 0, 0]), 0x0000_0000);
        assert_eq!(bits([0, 0, 0, 0x80]), 0x8000_0000);
    }

    #[test]
    fn infinities() {
        assert_eq!(decode_f32([0, 0, 0x80, 0x7F]), f32::INFINITY);
        assert_eq!(decode_f32([0, 0, 0x80, 0xFF]), f32::NEG_INFINITY);
    }

    #[test]
    fn nan_patterns() {
        assert!(decode_f32([0x01, 0, 0x80, 0x7F]).is_nan());
        assert!(decode_f32([0, 0, 0xC0, 0xFF]).is_nan());
    }

    #[test]
    fn subnormals() {
        assert_eq!(bits([0x01, 0, 0, 0]), 0x0000_0001);
        assert_eq!(bits([0x01, 0, 0, 0x80]), 0x8000_0001);
        assert_eq!(bits([0xFF, 0xFF, 0x7F, 0x00]), 0x007F_FFFF);
    }

    #[test]
    fn normal_extremes() {
        assert_eq!(decode_f32(f32::MAX.to_le_bytes()), f32::MAX);
        assert_eq!(decode_f32(f32::MIN_POSITIVE.to_le_bytes()), f32::MIN_POSITIVE);
        assert_eq!(decode_f32((-2.5f32).to_le_bytes()), -2.5);
    }

    #[test]
    fn matches_bit_cast_for_sampled_patterns() {
        for pattern in (0..=u32::MAX).step_by(40_009) {
            let expected = f32::from_bits(pattern);
            let decoded = decode_f32(pattern.to_le_bytes());
            if expected.is_nan() {
                assert!(decoded.is_nan(), "pattern {pattern:#010X}");
            } else {
                assert_eq!(decoded.to_bits(), pattern, "pattern {pattern:#010X}");
            }
        }
    }

    #[test]
    fn read_from_stream() {
        let data = [0x00, 0x00, 0x20, 0xC1, 0x00];
        let mut stream = MemoryStream::new(&data);
        assert_eq!(read_f32(&mut stream).unwrap(), -10.0);
        assert!(read_f32(&mut stream).is_err());
        assert_eq!(stream.position(), 4);
    }
}
