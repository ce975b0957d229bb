#![no_main]

use libfuzzer_sys::fuzz_target;
use slv_stream::decode_f32;

// Fuzz target: bit-field float reconstruction.
//
// For every 4-byte pattern the arithmetic decode must agree bit-for-bit
// with the host's own reinterpretation, except that any NaN is accepted
// for a NaN pattern.
fuzz_target!(|bytes: [u8; 4]| {
    let expected = f32::from_le_bytes(bytes);
    let decoded = decode_f32(bytes);
    if expected.is_nan() {
        assert!(decoded.is_nan());
    } else {
        assert_eq!(decoded.to_bits(), expected.to_bits());
    }
});
