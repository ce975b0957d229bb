use std::ffi::CString;

use crate::error::{Result, StreamError};
use crate::stream::Stream;

/// Read a nul-terminated string of any length.
///
/// Bytes are consumed one at a time up to and including the first zero
/// byte. The buffer grows by [`StreamConfig::string_chunk`] bytes whenever
/// it is full, using fallible reservation so running out of memory is an
/// error rather than an abort.
///
/// The returned [`CString`] owns the bytes and keeps the terminator
/// (`as_bytes_with_nul`).
///
/// # Errors
///
/// - [`StreamError::OutOfMemory`] if the buffer cannot grow.
/// - Any read failure from the stream, typically end of data before the
///   terminator.
///
/// On error the partial buffer is dropped; a half-read string is never
/// returned.
///
/// [`StreamConfig::string_chunk`]: crate::StreamConfig::string_chunk
pub fn read_str<S: Stream + ?Sized>(stream: &mut S) -> Result<CString> {
    let start = stream.position();
    let chunk = stream.config().string_chunk();
    let mut buf: Vec<u8> = Vec::new();

    loop {
        if buf.len() == buf.capacity() {
            buf.try_reserve_exact(chunk)
                .map_err(|source| StreamError::OutOfMemory {
                    requested: buf.len() + chunk,
                    source,
                })?;
        }

        let mut byte = [0u8; 1];
        stream.read_buf(&mut byte)?;
        buf.push(byte[0]);

        if byte[0] == 0 {
            break;
        }
    }

    // `buf` ends at the first nul, so this conversion cannot fail.
    CString::from_vec_with_nul(buf).map_err(|_| StreamError::InvalidString { offset: start })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StreamConfig;
    use crate::memory::MemoryStream;

    #[test]
    fn consecutive_nuls_give_empty_strings() {
        let mut stream = MemoryStream::new(b"a\0\0b\0");
        let first = read_str(&mut stream).unwrap();
        assert_eq!(first.as_bytes_with_nul(), b"a\0");
        assert_eq!(stream.position(), 2);
        assert!(read_str(&mut stream).unwrap().as_bytes().is_empty());
        assert_eq!(read_str(&mut stream).unwrap().as_bytes(), b"b");
    }

    #[test]
    fn short_string() {
        let mut stream = MemoryStream::new(b"abc\0");
        let s = read_str(&mut stream).unwrap();
        assert_eq!(s.as_bytes(), b"abc");
        assert_eq!(s.as_bytes_with_nul(), b"abc\0");
        assert_eq!(stream.position(), 4);
    }

    #[test]
    fn empty_string() {
        let mut stream = MemoryStream::new(b"\0rest");
        assert!(read_str(&mut stream).unwrap().as_bytes().is_empty());
        assert_eq!(stream.position(), 1);
    }

    #[test]
    fn stops_at_first_terminator() {
        let mut stream = MemoryStream::new(b"one\0two\0");
        assert_eq!(read_str(&mut stream).unwrap().as_bytes(), b"one");
        assert_eq!(read_str(&mut stream).unwrap().as_bytes(), b"two");
    }

    #[test]
    fn chunk_boundary() {
        // Exactly one chunk of text forces a second growth for the terminator.
        let mut data = vec![b'x'; 32];
        data.push(0);
        let mut stream = MemoryStream::new(&data);
        let s = read_str(&mut stream).unwrap();
        assert_eq!(s.as_bytes().len(), 32);
        assert_eq!(stream.position(), 33);
    }

    #[test]
    fn one_byte_chunks() {
        let config = StreamConfig {
            string_chunk_size: 1,
            ..StreamConfig::default()
        };
        let mut stream = MemoryStream::with_config(b"hello\0", config);
        assert_eq!(read_str(&mut stream).unwrap().as_bytes(), b"hello");
    }

    #[test]
    fn unterminated_fails() {
        let mut stream = MemoryStream::new(b"abc");
        let err = read_str(&mut stream).unwrap_err();
        assert!(err.is_eof());
    }
}
