use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

/// Errors that can occur while opening a stream or decoding from it.
///
/// Every failure falls into one of two kinds (see [`ErrorKind`]):
///
/// ```text
///   StreamError
///   ├── Open            ← Resource: file could not be opened
///   ├── OutOfMemory     ← Resource: growable buffer could not be grown
///   ├── OutOfBounds     ← Read: memory view has fewer bytes than requested
///   ├── Io              ← Read: file read failed (end of file or I/O error)
///   └── InvalidString   ← Read: decoded bytes are not a C string
/// ```
///
/// A single `read_buf` that fails has not moved the stream position; the
/// composite decoders (strings, arrays) keep whatever whole reads succeeded
/// before the failing one.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The file backing a [`FileStream`](crate::FileStream) could not be opened.
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A decoder buffer could not be grown to `requested` bytes.
    #[error("out of memory growing buffer to {requested} bytes")]
    OutOfMemory {
        requested: usize,
        #[source]
        source: TryReserveError,
    },

    /// A memory-backed read asked for more bytes than remain in the view.
    #[error("read of {requested} bytes at offset {offset} exceeds view ({available} bytes left)")]
    OutOfBounds {
        offset: u64,
        requested: usize,
        available: u64,
    },

    /// A file-backed read could not deliver `requested` bytes.
    #[error("read of {requested} bytes at offset {offset} failed: {source}")]
    Io {
        offset: u64,
        requested: usize,
        #[source]
        source: io::Error,
    },

    /// The bytes collected by the string decoder did not form a C string.
    ///
    /// `read_str` stops at the first nul, so it never produces this; the
    /// variant exists for decoders that take their bytes from elsewhere.
    #[error("string at offset {offset} is not nul-terminated exactly once")]
    InvalidString { offset: u64 },
}

/// The two failure classes a caller has to tell apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A file could not be opened or memory could not be allocated.
    Resource,
    /// The requested bytes were not available.
    Read,
}

impl StreamError {
    /// Classify this error as a resource or a read failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Open { .. } | Self::OutOfMemory { .. } => ErrorKind::Resource,
            Self::OutOfBounds { .. } | Self::Io { .. } | Self::InvalidString { .. } => {
                ErrorKind::Read
            }
        }
    }

    /// Whether the read failed only because the data ran out.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        match self {
            Self::OutOfBounds { .. } => true,
            Self::Io { source, .. } => source.kind() == io::ErrorKind::UnexpectedEof,
            _ => false,
        }
    }
}

/// A convenience `Result` alias using [`StreamError`].
pub type Result<T> = std::result::Result<T, StreamError>;
