use log::{debug, trace};

use crate::config::StreamConfig;
use crate::error::{Result, StreamError};
use crate::stream::{Observer, Stream, StreamState};

/// Stream over a byte region the caller already holds.
///
/// The region is borrowed, never copied and never written to. Every read is
/// bounds-checked against the bytes left in the view:
///
/// ```text
///   data:  [ consumed .......... | remaining ............ ]
///          0                  position                 len()
///
///   read_buf(n) succeeds  ⇔  position + n ≤ len()
/// ```
#[derive(Debug)]
pub struct MemoryStream<'a> {
    data: &'a [u8],
    state: StreamState,
}

impl<'a> MemoryStream<'a> {
    /// Wrap `data` with the default configuration.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, StreamConfig::default())
    }

    /// Wrap `data` with an explicit configuration.
    #[must_use]
    pub fn with_config(data: &'a [u8], config: StreamConfig) -> Self {
        Self {
            data,
            state: StreamState::new(config),
        }
    }

    /// Total size of the viewed region.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor()
    }

    /// Release the stream. The viewed region is untouched.
    pub fn close(self) {}

    /// The position as an index into `data`. Always `<= data.len()`.
    #[allow(clippy::cast_possible_truncation)]
    fn cursor(&self) -> usize {
        self.state.position as usize
    }
}

impl Stream for MemoryStream<'_> {
    fn read_buf(&mut self, buf: &mut [u8]) -> Result<()> {
        let start = self.cursor();
        let end = match start.checked_add(buf.len()) {
            Some(end) if end <= self.data.len() => end,
            _ => {
                debug!(
                    "memory read of {} bytes at offset {start} out of bounds ({} left)",
                    buf.len(),
                    self.remaining()
                );
                return Err(StreamError::OutOfBounds {
                    offset: self.state.position,
                    requested: buf.len(),
                    available: self.remaining() as u64,
                });
            }
        };

        buf.copy_from_slice(&self.data[start..end]);
        trace!("memory read {} bytes at offset {start}", buf.len());
        self.state.delivered(buf);
        Ok(())
    }

    fn position(&self) -> u64 {
        self.state.position
    }

    fn set_observer(&mut self, observer: Option<Observer>) {
        self.state.set_observer(observer);
    }

    fn config(&self) -> &StreamConfig {
        &self.state.config
    }
}
