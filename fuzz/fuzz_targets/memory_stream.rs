#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use slv_stream::{
    MemoryStream, Stream, StreamConfig, read_f32, read_f32_arr, read_s16, read_s32, read_s32_arr,
    read_str, read_u16, read_u32, read_u32_arr,
};

#[derive(Arbitrary, Debug)]
enum Op {
    U16,
    S16,
    U32,
    S32,
    F32,
    Str,
    Buf(u8),
    U32Arr(u8),
    S32Arr(u8),
    F32Arr(u8),
}

#[derive(Arbitrary, Debug)]
struct Input {
    chunk: u8,
    ops: Vec<Op>,
    data: Vec<u8>,
}

// Fuzz target: arbitrary decode sequences over a memory stream.
//
// Checks the cursor invariant after every operation:
// - a scalar or buffer read either advances by its full width or not at all
// - the position never exceeds the data length
// - a failed scalar read leaves the position untouched
fuzz_target!(|input: Input| {
    let config = StreamConfig {
        string_chunk_size: usize::from(input.chunk),
        ..StreamConfig::default()
    };
    let mut stream = MemoryStream::with_config(&input.data, config);

    for op in &input.ops {
        let before = stream.position();
        let (ok, width) = match op {
            Op::U16 => (read_u16(&mut stream).is_ok(), Some(2)),
            Op::S16 => (read_s16(&mut stream).is_ok(), Some(2)),
            Op::U32 => (read_u32(&mut stream).is_ok(), Some(4)),
            Op::S32 => (read_s32(&mut stream).is_ok(), Some(4)),
            Op::F32 => (read_f32(&mut stream).is_ok(), Some(4)),
            Op::Buf(n) => {
                let mut buf = vec![0u8; usize::from(*n)];
                (stream.read_buf(&mut buf).is_ok(), Some(u64::from(*n)))
            }
            Op::Str => {
                let result = read_str(&mut stream);
                if let Ok(s) = &result {
                    assert_eq!(stream.position() - before, s.as_bytes_with_nul().len() as u64);
                }
                (result.is_ok(), None)
            }
            Op::U32Arr(n) => {
                let mut out = vec![0u32; usize::from(*n)];
                (read_u32_arr(&mut stream, &mut out).is_ok(), Some(4 * u64::from(*n)))
            }
            Op::S32Arr(n) => {
                let mut out = vec![0i32; usize::from(*n)];
                (read_s32_arr(&mut stream, &mut out).is_ok(), Some(4 * u64::from(*n)))
            }
            Op::F32Arr(n) => {
                let mut out = vec![0f32; usize::from(*n)];
                (read_f32_arr(&mut stream, &mut out).is_ok(), Some(4 * u64::from(*n)))
            }
        };

        let after = stream.position();
        assert!(after <= input.data.len() as u64);
        assert!(after >= before);
        if let Some(width) = width {
            if ok {
                assert_eq!(after - before, width);
            } else if !matches!(op, Op::U32Arr(_) | Op::S32Arr(_) | Op::F32Arr(_)) {
                assert_eq!(after, before);
            }
        }
    }
});
