use std::fmt;

use crate::config::StreamConfig;
use crate::error::Result;
use crate::file::FileStream;
use crate::memory::MemoryStream;

/// Callback invoked after every successful read with the position the read
/// started at and the bytes it delivered.
pub type Observer = Box<dyn FnMut(u64, &[u8])>;

/// Uniform read interface over the file and memory backends.
///
/// The contract every implementation upholds:
///
/// - `read_buf` either fills the whole buffer, advances [`position`] by
///   exactly `buf.len()` and notifies the observer, or fails and leaves both
///   the position and `buf` as they were. There are no partial reads.
/// - The observer sees the position *before* the read.
///
/// The decoders in this crate are free functions generic over `Stream`, so
/// swapping the backend never touches decode logic.
///
/// [`position`]: Stream::position
pub trait Stream {
    /// Copy exactly `buf.len()` bytes from the current position into `buf`.
    ///
    /// # Errors
    ///
    /// Returns a read failure if fewer than `buf.len()` bytes are available.
    fn read_buf(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Number of bytes delivered by successful reads so far.
    fn position(&self) -> u64;

    /// Install or remove the per-read observer.
    fn set_observer(&mut self, observer: Option<Observer>);

    /// Configuration this stream was built with.
    fn config(&self) -> &StreamConfig;
}

impl<S: Stream + ?Sized> Stream for &mut S {
    fn read_buf(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).read_buf(buf)
    }

    fn position(&self) -> u64 {
        (**self).position()
    }

    fn set_observer(&mut self, observer: Option<Observer>) {
        (**self).set_observer(observer);
    }

    fn config(&self) -> &StreamConfig {
        (**self).config()
    }
}

/// Cursor, observer and configuration shared by both backends.
///
/// Backends validate and copy; `StreamState` owns the bookkeeping that
/// follows a successful copy so both advance identically.
pub(crate) struct StreamState {
    pub(crate) position: u64,
    observer: Option<Observer>,
    pub(crate) config: StreamConfig,
}

impl StreamState {
    pub(crate) fn new(config: StreamConfig) -> Self {
        Self {
            position: 0,
            observer: None,
            config,
        }
    }

    pub(crate) fn set_observer(&mut self, observer: Option<Observer>) {
        self.observer = observer;
    }

    /// Record a successful read of `buf`: notify, then advance.
    pub(crate) fn delivered(&mut self, buf: &[u8]) {
        if let Some(observer) = self.observer.as_mut() {
            observer(self.position, buf);
        }
        self.position += buf.len() as u64;
    }
}

impl fmt::Debug for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamState")
            .field("position", &self.position)
            .field("observer", &self.observer.is_some())
            .field("config", &self.config)
            .finish()
    }
}

/// A stream whose backend is chosen at run time.
///
/// Only two backends exist, so dispatch is a `match` rather than a trait
/// object. Convert from either backend with `into()`.
///
/// ```rust,no_run
/// use slv_stream::{AnyStream, FileStream, MemoryStream, read_u32};
///
/// # fn main() -> slv_stream::Result<()> {
/// let data = [0x2A, 0, 0, 0];
/// let mut stream: AnyStream = if std::env::args().count() > 1 {
///     FileStream::open("data.bin")?.into()
/// } else {
///     MemoryStream::new(&data).into()
/// };
/// let value = read_u32(&mut stream)?;
/// # let _ = value;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub enum AnyStream<'a> {
    File(FileStream),
    Memory(MemoryStream<'a>),
}

impl AnyStream<'_> {
    /// Release the backend. Failures while closing are not reported.
    pub fn close(self) {
        match self {
            Self::File(stream) => stream.close(),
            Self::Memory(stream) => stream.close(),
        }
    }
}

impl Stream for AnyStream<'_> {
    fn read_buf(&mut self, buf: &mut [u8]) -> Result<()> {
        match self {
            Self::File(stream) => stream.read_buf(buf),
            Self::Memory(stream) => stream.read_buf(buf),
        }
    }

    fn position(&self) -> u64 {
        match self {
            Self::File(stream) => stream.position(),
            Self::Memory(stream) => stream.position(),
        }
    }

    fn set_observer(&mut self, observer: Option<Observer>) {
        match self {
            Self::File(stream) => stream.set_observer(observer),
            Self::Memory(stream) => stream.set_observer(observer),
        }
    }

    fn config(&self) -> &StreamConfig {
        match self {
            Self::File(stream) => stream.config(),
            Self::Memory(stream) => stream.config(),
        }
    }
}

impl From<FileStream> for AnyStream<'_> {
    fn from(stream: FileStream) -> Self {
        Self::File(stream)
    }
}

impl<'a> From<MemoryStream<'a>> for AnyStream<'a> {
    fn from(stream: MemoryStream<'a>) -> Self {
        Self::Memory(stream)
    }
}
